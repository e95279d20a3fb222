use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::routes::{NAV_ITEMS, Route};
use crate::state::AppState;

#[component]
pub(crate) fn Layout(state: AppState, children: Children) -> impl IntoView {
    let on_logout = move |_| {
        if let Err(err) = state.client.with_value(|client| client.logout()) {
            leptos::logging::warn!("logout failed: {err}");
        }
        state.session.set(None);
        state.navigate(Route::Login);
    };

    let nav = NAV_ITEMS
        .iter()
        .map(|item| {
            let title = item.title();
            let highlighted = item.clone();
            let target = item.clone();
            view! {
                <a
                    href="#"
                    class="nav-link"
                    class:active=move || state.route.with(|route| route.highlights(&highlighted))
                    on:click=move |ev: MouseEvent| {
                        ev.prevent_default();
                        state.navigate(target.clone());
                    }
                >
                    {title}
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="brand">"Admin Panel"</div>
                <nav>{nav}</nav>
            </aside>
            <div class="content">
                <header class="navbar">
                    <h2>{move || state.route.with(|route| route.title())}</h2>
                    <span class="muted">
                        {move || {
                            state
                                .session
                                .with(|session| {
                                    session.as_ref().map(|session| session.role.to_string())
                                })
                                .unwrap_or_default()
                        }}
                    </span>
                    <button class="logout" on:click=on_logout>"Logout"</button>
                </header>
                <section class="content-body">{children()}</section>
            </div>
        </div>
    }
}
