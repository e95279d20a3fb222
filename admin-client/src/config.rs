use std::time::Duration;

/// Адрес бэкенда по умолчанию.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
/// Размер страницы для Users и Companies по умолчанию.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Размер страницы вакансий компании по умолчанию.
pub const DEFAULT_JOBS_PAGE_LIMIT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Параметры клиента. Разбор окружения делают приложения (CLI, wasm).
pub struct ClientConfig {
    /// Базовый URL API, например `http://localhost:3000`.
    pub base_url: String,
    /// Размер страницы для списков пользователей и компаний.
    pub page_limit: u32,
    /// Размер страницы для вакансий компании.
    pub jobs_page_limit: u32,
    /// Общий таймаут запроса. `None` = без таймаута.
    pub request_timeout: Option<Duration>,
    /// Таймаут установки соединения. `None` = без таймаута.
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Конфигурация по умолчанию с заданным базовым URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            jobs_page_limit: DEFAULT_JOBS_PAGE_LIMIT,
            request_timeout: None,
            connect_timeout: None,
        }
    }
}
