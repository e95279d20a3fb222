use std::sync::Arc;

use admin_client::{AdminClient, AdminClientResult, ClientConfig, DEFAULT_API_URL};
use leptos::prelude::*;

use crate::components::companies::CompaniesPage;
use crate::components::company_jobs::CompanyJobsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::guard::ProtectedAdmin;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::users::UsersPage;
use crate::routes::Route;
use crate::state::AppState;
use crate::storage::LocalStorageSessionStore;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => DEFAULT_API_URL,
};

fn build_client() -> AdminClientResult<AdminClient> {
    AdminClient::new(
        ClientConfig::new(API_BASE_URL),
        Arc::new(LocalStorageSessionStore),
    )
}

#[component]
pub fn App() -> impl IntoView {
    match build_client() {
        Ok(client) => view! { <Shell state=AppState::new(client) /> }.into_any(),
        Err(err) => view! {
            <main class="page">
                <div class="error-banner">{err.user_message()}</div>
            </main>
        }
        .into_any(),
    }
}

#[component]
fn Shell(state: AppState) -> impl IntoView {
    view! {
        <main class="page">
            {move || match state.route.get() {
                Route::Login => view! { <LoginPage state=state /> }.into_any(),
                Route::Register => view! { <RegisterPage state=state /> }.into_any(),
                Route::Dashboard => view! {
                    <ProtectedAdmin state=state>
                        <Layout state=state>
                            <DashboardPage state=state />
                        </Layout>
                    </ProtectedAdmin>
                }
                .into_any(),
                Route::Users => view! {
                    <ProtectedAdmin state=state>
                        <Layout state=state>
                            <UsersPage state=state />
                        </Layout>
                    </ProtectedAdmin>
                }
                .into_any(),
                Route::Companies => view! {
                    <ProtectedAdmin state=state>
                        <Layout state=state>
                            <CompaniesPage state=state />
                        </Layout>
                    </ProtectedAdmin>
                }
                .into_any(),
                Route::CompanyJobs(company_id) => view! {
                    <ProtectedAdmin state=state>
                        <Layout state=state>
                            <CompanyJobsPage state=state company_id=company_id.clone() />
                        </Layout>
                    </ProtectedAdmin>
                }
                .into_any(),
            }}
        </main>
    }
}
