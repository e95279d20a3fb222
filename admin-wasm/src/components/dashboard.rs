use admin_client::views;
use admin_client::{Activity, DashboardStats};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::AppState;

const BAR_WIDTH_PERCENT: usize = 100;

#[component]
fn StatCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="muted">{label}</span>
            <strong>{value}</strong>
        </div>
    }
}

fn stats_view(stats: DashboardStats) -> impl IntoView {
    let max = stats
        .job_distribution
        .iter()
        .map(|entry| entry.value)
        .max()
        .unwrap_or(0);
    let bars = stats
        .job_distribution
        .into_iter()
        .map(|entry| {
            let width = views::bar_length(entry.value, max, BAR_WIDTH_PERCENT);
            view! {
                <div class="bar-row">
                    <span class="bar-label">{entry.name}</span>
                    <div class="bar" style=format!("width: {width}%")></div>
                    <span class="bar-value">{entry.value}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="stat-grid">
            <StatCard label="Total users" value=stats.total_users />
            <StatCard label="Companies" value=stats.total_companies />
            <StatCard label="Live jobs" value=stats.live_jobs />
            <StatCard label="Applications" value=stats.total_applications />
        </div>
        <section class="chart">
            <h3>"Job distribution"</h3>
            {bars}
        </section>
    }
}

fn activity_view(activity: Vec<Activity>) -> impl IntoView {
    if activity.is_empty() {
        return view! { <p class="muted">"No recent activity."</p> }.into_any();
    }
    let entries = activity
        .into_iter()
        .map(|entry| {
            view! {
                <li>
                    <span class="avatar">{views::initial(&entry.user)}</span>
                    <strong>{entry.user.clone()}</strong>
                    " "
                    {entry.action.clone()}
                    <span class="muted">{views::activity_time(&entry)}</span>
                </li>
            }
        })
        .collect_view();
    view! { <ul class="activity">{entries}</ul> }.into_any()
}

#[component]
pub(crate) fn DashboardPage(state: AppState) -> impl IntoView {
    let stats = RwSignal::new(None::<Result<DashboardStats, String>>);
    let activity = RwSignal::new(None::<Result<Vec<Activity>, String>>);

    let client = state.client();
    spawn_local(async move {
        let result = client.dashboard_stats().await;
        if let Err(err) = &result {
            leptos::logging::warn!("dashboard stats failed to load: {err}");
        }
        stats.set(Some(result.map_err(|err| err.user_message())));
        state.sync_session();
    });

    let client = state.client();
    spawn_local(async move {
        let result = client.recent_activity().await;
        if let Err(err) = &result {
            leptos::logging::warn!("recent activity failed to load: {err}");
        }
        activity.set(Some(result.map_err(|err| err.user_message())));
        state.sync_session();
    });

    view! {
        <div class="dashboard">
            {move || match stats.get() {
                None => view! { <p class="muted">"Loading stats..."</p> }.into_any(),
                Some(Err(message)) => view! { <div class="error-banner">{message}</div> }.into_any(),
                Some(Ok(stats)) => stats_view(stats).into_any(),
            }}
            <section class="recent-activity">
                <h3>"Recent activity"</h3>
                {move || match activity.get() {
                    None => view! { <p class="muted">"Loading activity..."</p> }.into_any(),
                    Some(Err(message)) => view! { <div class="error-banner">{message}</div> }.into_any(),
                    Some(Ok(activity)) => activity_view(activity).into_any(),
                }}
            </section>
        </div>
    }
}
