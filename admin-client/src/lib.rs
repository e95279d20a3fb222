//! Клиентская библиотека админки доски вакансий.
//!
//! Предоставляет единый API (`AdminClient`) поверх REST API бэкенда:
//! - вход и регистрация администратора с сохранением сессии;
//! - проверка доступа к страницам (`RouteGuard`);
//! - постраничные списки пользователей, компаний и вакансий с переключением
//!   статуса строки (`ListController`);
//! - данные дашборда.
//!
//! Сессия (токен и роль) хранится в [`SessionStore`], который выбирает
//! приложение: файл для CLI, `localStorage` для браузера, память для тестов.
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod guard;
mod http_client;
mod models;
mod pagination;
mod resources;
mod session;
pub mod views;

use std::sync::Arc;

use tracing::info;

pub use auth::{LoginForm, PASSWORD_MISMATCH_MESSAGE, RegisterAdminForm};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_JOBS_PAGE_LIMIT, DEFAULT_PAGE_LIMIT};
pub use error::{AdminClientError, AdminClientResult, NETWORK_FAILURE_MESSAGE};
pub use guard::{
    DASHBOARD_ROUTE, GuardDecision, GuardState, LOGIN_ROUTE, RouteGuard, evaluate, require_admin,
};
pub use http_client::{ApiClient, ApiResponse};
pub use models::{
    ADMIN_ROLE, Activity, ActivityKind, Company, CompanyOwner, Dashboard, DashboardStats,
    DistributionEntry, Job, JobStatus, Role, Session, User,
};
pub use pagination::{
    ListController, ListSnapshot, ListView, LoadOutcome, PageResponse, PageSource, PageState,
    Toggleable,
};
pub use resources::{CompaniesSource, CompanyJobsSource, UsersSource};
pub use session::{
    DEFAULT_SESSION_FILE, FileSessionStore, MemorySessionStore, SessionContext, SessionStore,
};

/// Метод HTTP для [`ApiClient::request`].
pub use reqwest::Method;

#[derive(Debug, Clone)]
/// Унифицированный клиент админки.
///
/// Клонирование дешёвое: клоны разделяют HTTP-пул и сессию.
pub struct AdminClient {
    api: ApiClient,
    config: ClientConfig,
}

impl AdminClient {
    /// Создаёт клиент поверх хранилища сессии.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> AdminClientResult<Self> {
        let session = SessionContext::new(store);
        let api = ApiClient::new(&config, session)?;
        Ok(Self { api, config })
    }

    /// Конфигурация клиента.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Контекст сессии (только чтение).
    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    /// Низкоуровневый API-клиент.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Новый guard, уже проверивший текущую сессию.
    pub fn guard(&self) -> (RouteGuard, GuardDecision) {
        let mut guard = RouteGuard::new();
        let decision = guard.check(self.session());
        (guard, decision)
    }

    /// Вход администратора.
    ///
    /// Сессия сохраняется только при успехе и только для роли ADMIN; иначе
    /// [`AdminClientError::AccessDenied`] и сессия не меняется.
    pub async fn login(&self, email: &str, password: &str) -> AdminClientResult<Session> {
        let form = LoginForm::new(email, password);
        form.check()?;

        let session = self.api.login(&form.email, &form.password).await?;
        if !session.role.is_admin() {
            info!(role = %session.role, "login rejected: not an admin");
            return Err(AdminClientError::AccessDenied);
        }

        let session = self
            .session()
            .set_session(session.access_token, session.role)?;
        info!(email = %form.email, "admin signed in");
        Ok(session)
    }

    /// Регистрация администратора.
    ///
    /// Несовпадение паролей отклоняется до отправки запроса. Серверное
    /// "already exists" дополняется пояснением.
    pub async fn register_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        re_password: &str,
    ) -> AdminClientResult<Session> {
        let form = RegisterAdminForm::new(full_name, email, password, re_password);
        form.check()?;

        let session = self
            .api
            .register_admin(
                &form.full_name,
                &form.email,
                &form.password,
                &form.re_password,
            )
            .await
            .map_err(auth::explain_duplicate_admin)?;

        let session = self
            .session()
            .set_session(session.access_token, session.role)?;
        info!(email = %form.email, "admin registered");
        Ok(session)
    }

    /// Выход: удаляет токен и роль независимо от текущего состояния.
    pub fn logout(&self) -> AdminClientResult<()> {
        self.session().clear()?;
        info!("signed out");
        Ok(())
    }

    /// Сводные показатели дашборда.
    pub async fn dashboard_stats(&self) -> AdminClientResult<DashboardStats> {
        self.api.dashboard_stats().await
    }

    /// Лента последней активности.
    pub async fn recent_activity(&self) -> AdminClientResult<Vec<Activity>> {
        self.api.recent_activity().await
    }

    /// Показатели и лента активности одним вызовом.
    ///
    /// Части грузятся независимо, ошибка одной попадает в `*_error`.
    /// `Err` только если не загрузилось ничего.
    pub async fn dashboard(&self) -> AdminClientResult<Dashboard> {
        let stats = self.api.dashboard_stats().await;
        let activity = self.api.recent_activity().await;

        let mut dashboard = Dashboard::default();
        let stats_err = match stats {
            Ok(stats) => {
                dashboard.stats = stats;
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "dashboard stats failed to load");
                dashboard.stats_error = Some(err.user_message());
                Some(err)
            }
        };
        match activity {
            Ok(activity) => dashboard.activity = activity,
            Err(err) => {
                tracing::warn!(error = %err, "recent activity failed to load");
                dashboard.activity_error = Some(err.user_message());
                if let Some(stats_err) = stats_err {
                    return Err(stats_err);
                }
            }
        }
        Ok(dashboard)
    }

    /// Профиль компании.
    pub async fn company(&self, company_id: &str) -> AdminClientResult<Company> {
        self.api.company(company_id).await
    }

    /// Список соискателей с размером страницы из конфигурации.
    pub fn users(&self) -> ListController<UsersSource> {
        ListController::new(UsersSource::new(self.api.clone()), self.config.page_limit)
    }

    /// Список компаний с размером страницы из конфигурации.
    pub fn companies(&self) -> ListController<CompaniesSource> {
        ListController::new(
            CompaniesSource::new(self.api.clone()),
            self.config.page_limit,
        )
    }

    /// Вакансии компании `company_id`.
    pub fn company_jobs(&self, company_id: impl Into<String>) -> ListController<CompanyJobsSource> {
        ListController::new(
            CompanyJobsSource::new(self.api.clone(), company_id),
            self.config.jobs_page_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdminClient {
        AdminClient::new(
            ClientConfig::new("http://127.0.0.1:9"),
            Arc::new(MemorySessionStore::new()),
        )
        .expect("client")
    }

    #[test]
    fn logout_clears_an_empty_session_too() {
        let client = client();
        client.logout().expect("logout");
        assert!(client.session().session().is_none());

        client
            .session()
            .set_session("tok", Role::Admin)
            .expect("save");
        client.logout().expect("logout");
        assert!(client.session().token().is_none());
        assert!(client.session().role().is_none());
    }

    #[test]
    fn controllers_use_configured_limits() {
        let client = client();
        assert_eq!(client.users().snapshot().state.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(
            client.company_jobs("c1").snapshot().state.limit,
            DEFAULT_JOBS_PAGE_LIMIT
        );
    }

    #[tokio::test]
    async fn mismatched_passwords_fail_before_any_request() {
        let client = client();
        let err = client
            .register_admin("Ann", "ann@example.com", "one", "two")
            .await
            .expect_err("mismatch");
        assert_eq!(err.user_message(), PASSWORD_MISMATCH_MESSAGE);
        assert!(client.session().session().is_none());
    }

    #[test]
    fn guard_redirects_without_session() {
        let (guard, decision) = client().guard();
        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(decision, GuardDecision::Redirect { to: LOGIN_ROUTE });
    }
}
