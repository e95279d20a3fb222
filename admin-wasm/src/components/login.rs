use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::routes::Route;
use crate::state::AppState;

#[component]
pub(crate) fn LoginPage(state: AppState) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        busy.set(true);

        let client = state.client();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let result = client.login(&email, &password).await;
            busy.set(false);
            match result {
                Ok(session) => {
                    state.session.set(Some(session));
                    state.navigate(Route::Dashboard);
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h1>"Admin Login"</h1>
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Signing in..." } else { "Sign in" }}
            </button>
            <p class="muted">
                "No admin account yet? "
                <a
                    href="#"
                    on:click=move |ev: MouseEvent| {
                        ev.prevent_default();
                        state.navigate(Route::Register);
                    }
                >
                    "Register"
                </a>
            </p>
        </form>
    }
}
