use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{AdminClientError, AdminClientResult};
use crate::models::{
    Activity, ActivityKind, Company, CompanyOwner, DashboardStats, DistributionEntry, Job,
    JobStatus, Role, Session, User,
};
use crate::pagination::PageResponse;
use crate::session::SessionContext;

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterAdminRequestDto<'a> {
    full_name: &'a str,
    email: &'a str,
    password: &'a str,
    re_password: &'a str,
    role: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserStatusRequestDto {
    is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobStatusRequestDto {
    is_live: bool,
}

#[derive(Debug, Serialize)]
struct PageQuery {
    page: u32,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckDto {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeDto<T> {
    data: T,
    #[serde(default)]
    pagination: Option<PaginationDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PaginationDto {
    total_count: u64,
    total_pages: u32,
    current_page: u32,
    limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthDataDto {
    access_token: String,
    user: AuthUserDto,
}

#[derive(Debug, Deserialize)]
struct AuthUserDto {
    #[serde(default)]
    role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyOwnerDto {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(rename = "userId", default)]
    owner: Option<CompanyOwnerDto>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    applicants_count: u64,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JobsPageDto {
    data: Vec<JobDto>,
    total: u64,
    total_pages: u32,
    page: u32,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct DistributionDto {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DashboardStatsDto {
    total_users: u64,
    total_companies: u64,
    live_jobs: u64,
    total_applications: u64,
    job_distribution: Vec<DistributionDto>,
}

#[derive(Debug, Deserialize)]
struct ActivityDto {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    user: String,
    #[serde(default)]
    action: String,
    #[serde(default)]
    time: Option<String>,
    #[serde(rename = "type", default)]
    kind: ActivityKind,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// RFC 3339, затем дата-время без смещения (считается UTC), затем голая дата.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            phone: non_blank(value.phone),
            avatar_url: non_blank(value.avatar_url),
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

impl From<CompanyOwnerDto> for CompanyOwner {
    fn from(value: CompanyOwnerDto) -> Self {
        Self {
            id: non_blank(value.id),
            email: non_blank(value.email),
            full_name: non_blank(value.full_name),
            phone: non_blank(value.phone),
            avatar_url: non_blank(value.avatar_url),
            is_active: value.is_active,
        }
    }
}

impl From<CompanyDto> for Company {
    fn from(value: CompanyDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            industry: non_blank(value.industry),
            location: non_blank(value.location),
            owner: value.owner.map(CompanyOwner::from),
            created_at: value.created_at,
        }
    }
}

impl From<JobDto> for Job {
    fn from(value: JobDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            job_type: non_blank(value.job_type),
            status: value.status.map_or(JobStatus::Closed, JobStatus::from),
            applicants_count: value.applicants_count,
            created_at: value.created_at,
        }
    }
}

impl From<DashboardStatsDto> for DashboardStats {
    fn from(value: DashboardStatsDto) -> Self {
        Self {
            total_users: value.total_users,
            total_companies: value.total_companies,
            live_jobs: value.live_jobs,
            total_applications: value.total_applications,
            job_distribution: value
                .job_distribution
                .into_iter()
                .map(|entry| DistributionEntry {
                    name: entry.name,
                    value: entry.value,
                })
                .collect(),
        }
    }
}

impl From<ActivityDto> for Activity {
    fn from(value: ActivityDto) -> Self {
        let raw_time = value.time.unwrap_or_default();
        Self {
            id: non_blank(value.id)
                .or_else(|| non_blank(value.object_id))
                .unwrap_or_default(),
            user: value.user,
            action: value.action,
            time: parse_time(&raw_time),
            raw_time,
            kind: value.kind,
        }
    }
}

fn page_from_pagination<T>(
    items: Vec<T>,
    pagination: Option<PaginationDto>,
    page: u32,
    limit: u32,
) -> PageResponse<T> {
    let pagination = pagination.unwrap_or_default();
    let total = if pagination.total_count == 0 {
        items.len() as u64
    } else {
        pagination.total_count
    };
    PageResponse {
        items,
        page: if pagination.current_page == 0 {
            page
        } else {
            pagination.current_page
        },
        total_pages: pagination.total_pages,
        limit: if pagination.limit == 0 {
            limit
        } else {
            pagination.limit
        },
        total,
    }
}

impl JobsPageDto {
    fn into_page(self, page: u32, limit: u32) -> PageResponse<Job> {
        PageResponse {
            items: self.data.into_iter().map(Job::from).collect(),
            page: if self.page == 0 { page } else { self.page },
            total_pages: self.total_pages,
            limit: if self.limit == 0 { limit } else { self.limit },
            total: self.total,
        }
    }
}

fn message_text(value: Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(part) => Some(part),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

fn fallback_message(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "Bad request".to_string(),
        401 => "Authentication required".to_string(),
        403 => "You do not have permission for this action".to_string(),
        404 => "Resource not found".to_string(),
        409 => "Conflict: the resource already exists".to_string(),
        500..=599 => "Server error".to_string(),
        other => format!("Request failed with status {other}"),
    }
}

/// Достаёт сообщение об ошибке из тела ответа: `message` (строка или массив),
/// затем `error`, затем голый текст, затем запасной текст по статусу.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(dto) = serde_json::from_str::<ErrorResponseDto>(body) {
        let message = dto
            .message
            .and_then(message_text)
            .or(dto.error)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = message {
            return message;
        }
    }

    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') && !text.starts_with('<') {
        return text.to_string();
    }
    fallback_message(status)
}

fn parse_body(text: &str) -> AdminClientResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|err| AdminClientError::Decode(err.to_string()))
}

fn path_segment(id: &str) -> AdminClientResult<&str> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(AdminClientError::Validation(format!(
            "invalid identifier: {id:?}"
        )));
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq)]
/// Успешный ответ API: статус и разобранное JSON-тело (`Null` для пустого тела).
pub struct ApiResponse {
    /// HTTP-статус (2xx).
    pub status: u16,
    /// Тело ответа.
    pub data: Value,
}

impl ApiResponse {
    /// Разбирает тело в типизированную структуру.
    pub fn decode<T: DeserializeOwned>(self) -> AdminClientResult<T> {
        serde_json::from_value(self.data).map_err(|err| AdminClientError::Decode(err.to_string()))
    }

    fn ensure_acknowledged(self) -> AdminClientResult<()> {
        let status = self.status;
        if self.data.is_null() {
            return Ok(());
        }
        let ack: AckDto = self.decode()?;
        if ack.success == Some(false) {
            return Err(AdminClientError::Http {
                status,
                message: ack
                    .message
                    .unwrap_or_else(|| "The server did not confirm the change".to_string()),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент REST API админки.
///
/// Подставляет базовый URL и заголовок `Authorization: Bearer <token>` из
/// [`SessionContext`]. Повторов и дедупликации нет: каждый вызов независим.
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionContext,
}

impl ApiClient {
    /// Создаёт клиент по конфигурации и контексту сессии.
    pub fn new(config: &ClientConfig, session: SessionContext) -> AdminClientResult<Self> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = config.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            if let Some(timeout) = config.request_timeout {
                builder = builder.timeout(timeout);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            session,
        })
    }

    /// Контекст сессии, общий с остальными частями клиента.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Базовый URL API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Отправляет произвольный запрос с токеном текущей сессии.
    ///
    /// Не-2xx ответ превращается в [`AdminClientError::Http`], сбой транспорта
    /// в [`AdminClientError::Network`].
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
    ) -> AdminClientResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, None::<&PageQuery>, body, extra_headers, true)
            .await
    }

    async fn execute<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
        authenticated: bool,
    ) -> AdminClientResult<ApiResponse>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);

        let mut request = self.client.request(method.clone(), url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let token = if authenticated {
            self.session.token()
        } else {
            None
        };
        let sent_token = token.is_some();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%method, path, status = status.as_u16(), "api request completed");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED && sent_token {
                warn!(path, "server rejected the session token, clearing session");
                if let Err(err) = self.session.clear() {
                    warn!(error = %err, "failed to clear rejected session");
                }
            }
            return Err(AdminClientError::Http {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            data: parse_body(&text)?,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        limit: u32,
    ) -> AdminClientResult<T> {
        let query = PageQuery { page, limit };
        self.execute(Method::GET, path, Some(&query), None::<&()>, &[], true)
            .await?
            .decode()
    }

    /// Вход по email и паролю. Сессию не сохраняет.
    pub async fn login(&self, email: &str, password: &str) -> AdminClientResult<Session> {
        let payload = LoginRequestDto { email, password };
        let dto: EnvelopeDto<AuthDataDto> = self
            .execute(
                Method::POST,
                "/auth/login",
                None::<&PageQuery>,
                Some(&payload),
                &[],
                false,
            )
            .await?
            .decode()?;
        Ok(Session::new(
            dto.data.access_token,
            Role::parse(&dto.data.user.role),
        ))
    }

    /// Регистрация администратора. Сессию не сохраняет.
    pub async fn register_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        re_password: &str,
    ) -> AdminClientResult<Session> {
        let payload = RegisterAdminRequestDto {
            full_name,
            email,
            password,
            re_password,
            role: crate::models::ADMIN_ROLE,
        };
        let dto: EnvelopeDto<AuthDataDto> = self
            .execute(
                Method::POST,
                "/auth/admin/register",
                None::<&PageQuery>,
                Some(&payload),
                &[],
                false,
            )
            .await?
            .decode()?;
        Ok(Session::new(
            dto.data.access_token,
            Role::parse(&dto.data.user.role),
        ))
    }

    /// Страница соискателей.
    pub async fn list_users(&self, page: u32, limit: u32) -> AdminClientResult<PageResponse<User>> {
        let dto: EnvelopeDto<Vec<UserDto>> = self.get_page("/admin/users", page, limit).await?;
        let items = dto.data.into_iter().map(User::from).collect();
        Ok(page_from_pagination(items, dto.pagination, page, limit))
    }

    /// Блокирует или разблокирует пользователя.
    pub async fn set_user_status(&self, user_id: &str, is_active: bool) -> AdminClientResult<()> {
        let path = format!("/admin/users/{}/status", path_segment(user_id)?);
        let payload = UserStatusRequestDto { is_active };
        self.request(Method::PATCH, &path, Some(&payload), &[])
            .await?
            .ensure_acknowledged()
    }

    /// Страница компаний.
    pub async fn list_companies(
        &self,
        page: u32,
        limit: u32,
    ) -> AdminClientResult<PageResponse<Company>> {
        let dto: EnvelopeDto<Vec<CompanyDto>> =
            self.get_page("/admin/companies", page, limit).await?;
        let items = dto.data.into_iter().map(Company::from).collect();
        Ok(page_from_pagination(items, dto.pagination, page, limit))
    }

    /// Профиль компании.
    pub async fn company(&self, company_id: &str) -> AdminClientResult<Company> {
        let path = format!("/companies/{}", path_segment(company_id)?);
        let dto: EnvelopeDto<CompanyDto> = self
            .request(Method::GET, &path, None::<&()>, &[])
            .await?
            .decode()?;
        Ok(dto.data.into())
    }

    /// Страница вакансий компании.
    pub async fn list_company_jobs(
        &self,
        company_id: &str,
        page: u32,
        limit: u32,
    ) -> AdminClientResult<PageResponse<Job>> {
        let path = format!("/admin/companies/{}/jobs", path_segment(company_id)?);
        let dto: EnvelopeDto<JobsPageDto> = self.get_page(&path, page, limit).await?;
        Ok(dto.data.into_page(page, limit))
    }

    /// Публикует или закрывает вакансию.
    pub async fn set_job_status(&self, job_id: &str, is_live: bool) -> AdminClientResult<()> {
        let path = format!("/admin/jobs/{}/status", path_segment(job_id)?);
        let payload = JobStatusRequestDto { is_live };
        self.request(Method::PATCH, &path, Some(&payload), &[])
            .await?
            .ensure_acknowledged()
    }

    /// Сводные показатели дашборда.
    pub async fn dashboard_stats(&self) -> AdminClientResult<DashboardStats> {
        let dto: EnvelopeDto<DashboardStatsDto> = self
            .request(Method::GET, "/admin/dashboard-stats", None::<&()>, &[])
            .await?
            .decode()?;
        Ok(dto.data.into())
    }

    /// Лента последней активности.
    pub async fn recent_activity(&self) -> AdminClientResult<Vec<Activity>> {
        let dto: EnvelopeDto<Vec<ActivityDto>> = self
            .request(Method::GET, "/admin/recent-activity", None::<&()>, &[])
            .await?
            .decode()?;
        Ok(dto.data.into_iter().map(Activity::from).collect())
    }
}
