use std::rc::Rc;

use admin_client::views::{self, COMPANY_LABELS};
use admin_client::{Company, ListView};
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::components::list::{ListError, list_pager, spawn_load, spawn_toggle};
use crate::routes::Route;
use crate::state::AppState;

#[component]
pub(crate) fn CompaniesPage(state: AppState) -> impl IntoView {
    let companies = Rc::new(state.client.with_value(|client| client.companies()));
    let snapshot = RwSignal::new(companies.snapshot());
    let controller = StoredValue::new_local(companies);
    spawn_load(state, controller.get_value(), snapshot, None);

    let list_view = Memo::new(move |_| snapshot.with(|snapshot| snapshot.view()));
    let error = Signal::derive(move || snapshot.with(|snapshot| snapshot.error.clone()));

    let row = move |company: Company| {
        let id = company.id.clone();
        let target = company.id.clone();
        let pending_key = company.id.clone();
        let pending =
            Signal::derive(move || snapshot.with(|snapshot| snapshot.is_pending(&pending_key)));
        let active = company.is_active();
        let owner_email = company
            .owner
            .as_ref()
            .and_then(|owner| owner.email.as_deref());
        view! {
            <tr>
                <td>
                    <span class="avatar">{views::initial(&company.name)}</span>
                    <a
                        href="#"
                        on:click=move |ev: MouseEvent| {
                            ev.prevent_default();
                            state.navigate(Route::CompanyJobs(target.clone()));
                        }
                    >
                        {company.name.clone()}
                    </a>
                </td>
                <td>{views::or_na(company.industry.as_deref()).to_string()}</td>
                <td>{views::or_na(owner_email).to_string()}</td>
                <td>{views::or_na(company.location.as_deref()).to_string()}</td>
                <td>
                    <span class="badge" class:inactive={!active}>
                        {COMPANY_LABELS.status(active)}
                    </span>
                </td>
                <td>
                    <button
                        disabled=move || pending.get()
                        on:click=move |_| {
                            spawn_toggle(state, controller.get_value(), snapshot, id.clone(), active)
                        }
                    >
                        {move || COMPANY_LABELS.action(active, pending.get())}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="list-page">
            {move || match list_view.get() {
                ListView::Loading => view! { <p class="muted">"Loading companies..."</p> }.into_any(),
                ListView::Failed => view! {
                    <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
                }
                .into_any(),
                ListView::Empty => view! { <p class="muted">"No companies found."</p> }.into_any(),
                ListView::Rows => view! {
                    <ListError error=error />
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Company"</th>
                                <th>"Industry"</th>
                                <th>"Owner"</th>
                                <th>"Location"</th>
                                <th>"Status"</th>
                                <th>"Action"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || snapshot.with(|snapshot| snapshot.state.items.clone())
                                key=|company| (company.id.clone(), company.is_active())
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
