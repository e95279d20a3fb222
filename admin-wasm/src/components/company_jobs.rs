use std::rc::Rc;

use admin_client::views::{self, JOB_LABELS};
use admin_client::{Company, Job, ListView};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::list::{ListError, list_pager, spawn_load, spawn_toggle};
use crate::routes::Route;
use crate::state::AppState;

/// Шапка с профилем компании. Ошибка профиля не мешает списку вакансий.
#[component]
fn CompanyHeader(#[prop(into)] profile: Signal<Option<Result<Company, String>>>) -> impl IntoView {
    move || match profile.get() {
        None => view! { <p class="muted">"Loading company..."</p> }.into_any(),
        Some(Err(message)) => view! { <div class="error-banner">{message}</div> }.into_any(),
        Some(Ok(company)) => {
            let owner = company.owner.clone();
            let owner_name = owner.as_ref().and_then(|owner| owner.full_name.clone());
            let owner_email = owner.as_ref().and_then(|owner| owner.email.clone());
            view! {
                <div class="company-header">
                    <span class="avatar large">{views::initial(&company.name)}</span>
                    <div>
                        <h3>{company.name.clone()}</h3>
                        <p class="muted">
                            {views::or_na(company.industry.as_deref()).to_string()} " · "
                            {views::or_na(company.location.as_deref()).to_string()}
                        </p>
                        <p class="muted">
                            "Owner: " {views::or_na(owner_name.as_deref()).to_string()} " "
                            {views::or_na(owner_email.as_deref()).to_string()}
                        </p>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub(crate) fn CompanyJobsPage(state: AppState, company_id: String) -> impl IntoView {
    let profile = RwSignal::new(None::<Result<Company, String>>);
    let client = state.client();
    let profile_id = company_id.clone();
    spawn_local(async move {
        let result = client.company(&profile_id).await;
        if let Err(err) = &result {
            leptos::logging::warn!("company {profile_id} failed to load: {err}");
        }
        profile.set(Some(result.map_err(|err| err.user_message())));
        state.sync_session();
    });

    let jobs = Rc::new(state.client.with_value(|client| client.company_jobs(company_id)));
    let snapshot = RwSignal::new(jobs.snapshot());
    let controller = StoredValue::new_local(jobs);
    spawn_load(state, controller.get_value(), snapshot, None);

    let list_view = Memo::new(move |_| snapshot.with(|snapshot| snapshot.view()));
    let error = Signal::derive(move || snapshot.with(|snapshot| snapshot.error.clone()));

    let row = move |job: Job| {
        let id = job.id.clone();
        let pending_key = job.id.clone();
        let pending =
            Signal::derive(move || snapshot.with(|snapshot| snapshot.is_pending(&pending_key)));
        let live = job.status.is_live();
        view! {
            <tr>
                <td>{job.title.clone()}</td>
                <td>{views::or_na(job.job_type.as_deref()).to_string()}</td>
                <td>{job.applicants_count}</td>
                <td>{views::format_date(job.created_at.as_ref())}</td>
                <td>
                    <span class="badge" class:inactive={!live}>
                        {JOB_LABELS.status(live)}
                    </span>
                </td>
                <td>
                    <button
                        disabled=move || pending.get()
                        on:click=move |_| {
                            spawn_toggle(state, controller.get_value(), snapshot, id.clone(), live)
                        }
                    >
                        {move || JOB_LABELS.action(live, pending.get())}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="list-page">
            <a
                href="#"
                class="back-link"
                on:click=move |ev: MouseEvent| {
                    ev.prevent_default();
                    state.navigate(Route::Companies);
                }
            >
                "Back to companies"
            </a>
            <CompanyHeader profile=profile />
            {move || match list_view.get() {
                ListView::Loading => view! { <p class="muted">"Loading jobs..."</p> }.into_any(),
                ListView::Failed => view! {
                    <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
                }
                .into_any(),
                ListView::Empty => view! {
                    <p class="muted">"This company has not posted any jobs yet."</p>
                }
                .into_any(),
                ListView::Rows => view! {
                    <ListError error=error />
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Type"</th>
                                <th>"Applicants"</th>
                                <th>"Posted"</th>
                                <th>"Status"</th>
                                <th>"Action"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || snapshot.with(|snapshot| snapshot.state.items.clone())
                                key=|job| (job.id.clone(), job.status.is_live())
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
