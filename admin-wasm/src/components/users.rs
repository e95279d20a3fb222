use std::rc::Rc;

use admin_client::views::{self, USER_LABELS};
use admin_client::{ListView, User};
use leptos::prelude::*;

use crate::components::list::{ListError, list_pager, spawn_load, spawn_toggle};
use crate::state::AppState;

#[component]
pub(crate) fn UsersPage(state: AppState) -> impl IntoView {
    let users = Rc::new(state.client.with_value(|client| client.users()));
    let snapshot = RwSignal::new(users.snapshot());
    let controller = StoredValue::new_local(users);
    spawn_load(state, controller.get_value(), snapshot, None);

    let list_view = Memo::new(move |_| snapshot.with(|snapshot| snapshot.view()));
    let error = Signal::derive(move || snapshot.with(|snapshot| snapshot.error.clone()));

    let row = move |user: User| {
        let id = user.id.clone();
        let pending_key = user.id.clone();
        let pending =
            Signal::derive(move || snapshot.with(|snapshot| snapshot.is_pending(&pending_key)));
        let active = user.is_active;
        view! {
            <tr>
                <td>
                    <span class="avatar">{views::initial(&user.full_name)}</span>
                    {user.full_name.clone()}
                </td>
                <td>{user.email.clone()}</td>
                <td>{views::or_na(user.phone.as_deref()).to_string()}</td>
                <td>{views::format_date(user.created_at.as_ref())}</td>
                <td>
                    <span class="badge" class:inactive={!active}>
                        {USER_LABELS.status(active)}
                    </span>
                </td>
                <td>
                    <button
                        disabled=move || pending.get()
                        on:click=move |_| {
                            spawn_toggle(state, controller.get_value(), snapshot, id.clone(), active)
                        }
                    >
                        {move || USER_LABELS.action(active, pending.get())}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="list-page">
            {move || match list_view.get() {
                ListView::Loading => view! { <p class="muted">"Loading users..."</p> }.into_any(),
                ListView::Failed => view! {
                    <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
                }
                .into_any(),
                ListView::Empty => view! { <p class="muted">"No users found."</p> }.into_any(),
                ListView::Rows => view! {
                    <ListError error=error />
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Phone"</th>
                                <th>"Joined"</th>
                                <th>"Status"</th>
                                <th>"Action"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || snapshot.with(|snapshot| snapshot.state.items.clone())
                                key=|user| (user.id.clone(), user.is_active)
                                children=row
                            />
                        </tbody>
                    </table>
                    {list_pager(state, controller, snapshot)}
                }
                .into_any(),
            }}
        </div>
    }
}
