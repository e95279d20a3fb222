//! Источники страниц для списков Users, Companies и вакансий компании.

use async_trait::async_trait;

use crate::error::{AdminClientError, AdminClientResult};
use crate::http_client::ApiClient;
use crate::models::{Company, Job, JobStatus, User};
use crate::pagination::{PageResponse, PageSource, Toggleable};

impl Toggleable for User {
    fn key(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Toggleable for Company {
    fn key(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        Company::is_active(self)
    }

    fn set_active(&mut self, active: bool) {
        if let Some(owner) = self.owner.as_mut() {
            owner.is_active = active;
        }
    }
}

impl Toggleable for Job {
    fn key(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.status.is_live()
    }

    fn set_active(&mut self, active: bool) {
        self.status = JobStatus::from_live(active);
    }
}

#[derive(Debug, Clone)]
/// Соискатели: `GET /admin/users`, `PATCH /admin/users/:id/status`.
pub struct UsersSource {
    api: ApiClient,
}

impl UsersSource {
    /// Источник поверх API-клиента.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PageSource for UsersSource {
    type Item = User;

    async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<User>> {
        self.api.list_users(page, limit).await
    }

    async fn set_status(&self, item: &User, active: bool) -> AdminClientResult<()> {
        self.api.set_user_status(&item.id, active).await
    }
}

#[derive(Debug, Clone)]
/// Компании: `GET /admin/companies`; статус меняется у аккаунта владельца.
pub struct CompaniesSource {
    api: ApiClient,
}

impl CompaniesSource {
    /// Источник поверх API-клиента.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PageSource for CompaniesSource {
    type Item = Company;

    async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<Company>> {
        self.api.list_companies(page, limit).await
    }

    async fn set_status(&self, item: &Company, active: bool) -> AdminClientResult<()> {
        let owner_id = item
            .owner
            .as_ref()
            .and_then(|owner| owner.id.as_deref())
            .ok_or_else(|| {
                AdminClientError::Validation(
                    "No associated user found for this company.".to_string(),
                )
            })?;
        self.api.set_user_status(owner_id, active).await
    }
}

#[derive(Debug, Clone)]
/// Вакансии одной компании: `GET /admin/companies/:id/jobs`, `PATCH /admin/jobs/:id/status`.
pub struct CompanyJobsSource {
    api: ApiClient,
    company_id: String,
}

impl CompanyJobsSource {
    /// Источник вакансий компании `company_id`.
    pub fn new(api: ApiClient, company_id: impl Into<String>) -> Self {
        Self {
            api,
            company_id: company_id.into(),
        }
    }

    /// Идентификатор компании.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PageSource for CompanyJobsSource {
    type Item = Job;

    async fn fetch_page(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<Job>> {
        self.api
            .list_company_jobs(&self.company_id, page, limit)
            .await
    }

    async fn set_status(&self, item: &Job, active: bool) -> AdminClientResult<()> {
        self.api.set_job_status(&item.id, active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyOwner;

    fn company(owner_active: Option<bool>) -> Company {
        Company {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            industry: None,
            location: None,
            owner: owner_active.map(|is_active| CompanyOwner {
                id: Some("u1".to_string()),
                email: None,
                full_name: None,
                phone: None,
                avatar_url: None,
                is_active,
            }),
            created_at: None,
        }
    }

    #[test]
    fn company_status_follows_owner() {
        let mut company = company(Some(true));
        assert!(Toggleable::is_active(&company));
        company.set_active(false);
        assert!(!Toggleable::is_active(&company));
    }

    #[test]
    fn company_without_owner_stays_inactive() {
        let mut company = company(None);
        company.set_active(true);
        assert!(!Toggleable::is_active(&company));
    }

    #[test]
    fn job_toggle_switches_between_live_and_closed() {
        let mut job = Job {
            id: "j1".to_string(),
            title: "Rust dev".to_string(),
            job_type: None,
            status: JobStatus::Other("draft".to_string()),
            applicants_count: 0,
            created_at: None,
        };
        assert!(!job.is_active());
        job.set_active(true);
        assert_eq!(job.status, JobStatus::Live);
        job.set_active(false);
        assert_eq!(job.status, JobStatus::Closed);
    }

    #[tokio::test]
    async fn company_without_owner_cannot_be_toggled() {
        let api = ApiClient::new(
            &crate::config::ClientConfig::new("http://127.0.0.1:9"),
            crate::session::SessionContext::in_memory(),
        )
        .expect("client");
        let source = CompaniesSource::new(api);

        let err = source
            .set_status(&company(None), true)
            .await
            .expect_err("must be rejected before any request");
        assert_eq!(err.user_message(), "No associated user found for this company.");
    }
}
