use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Строковое значение роли администратора на сервере.
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Роль пользователя, которую вернул сервер.
pub enum Role {
    /// Администратор (`ADMIN`).
    Admin,
    /// Любая другая роль, значение сохраняется как есть.
    Other(String),
}

impl Role {
    /// Разбирает роль из строки сервера.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == ADMIN_ROLE {
            Self::Admin
        } else {
            Self::Other(raw.to_string())
        }
    }

    /// Строковое представление роли.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => ADMIN_ROLE,
            Self::Other(raw) => raw,
        }
    }

    /// `true` для роли `ADMIN`.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Клиентская сессия: токен доступа и роль.
pub struct Session {
    /// Токен доступа (bearer).
    pub access_token: String,
    /// Роль владельца токена.
    pub role: Role,
}

impl Session {
    /// Создаёт сессию из токена и роли.
    pub fn new(access_token: impl Into<String>, role: Role) -> Self {
        Self {
            access_token: access_token.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Соискатель (строка страницы Users).
pub struct User {
    /// Идентификатор пользователя.
    pub id: String,
    /// Полное имя.
    pub full_name: String,
    /// Email.
    pub email: String,
    /// Телефон, если указан.
    pub phone: Option<String>,
    /// URL аватара, если есть.
    pub avatar_url: Option<String>,
    /// Активен ли аккаунт (false = заблокирован).
    pub is_active: bool,
    /// Дата регистрации (UTC).
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пользователь-владелец компании.
pub struct CompanyOwner {
    /// Идентификатор пользователя. Без него статус компании не переключить.
    pub id: Option<String>,
    /// Email владельца.
    pub email: Option<String>,
    /// Имя владельца.
    pub full_name: Option<String>,
    /// Телефон владельца.
    pub phone: Option<String>,
    /// URL аватара.
    pub avatar_url: Option<String>,
    /// Активен ли аккаунт владельца.
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Компания-работодатель.
pub struct Company {
    /// Идентификатор компании.
    pub id: String,
    /// Название.
    pub name: String,
    /// Отрасль.
    pub industry: Option<String>,
    /// Местоположение.
    pub location: Option<String>,
    /// Аккаунт владельца; статус компании = статус владельца.
    pub owner: Option<CompanyOwner>,
    /// Дата создания (UTC).
    pub created_at: Option<DateTime<Utc>>,
}

impl Company {
    /// Активна ли компания (активен ли её владелец).
    pub fn is_active(&self) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Статус публикации вакансии.
pub enum JobStatus {
    /// Вакансия опубликована (`live`).
    Live,
    /// Вакансия закрыта (`closed`).
    Closed,
    /// Неизвестный статус, хранится как есть.
    Other(String),
}

impl JobStatus {
    /// Статус, соответствующий флагу `isLive`.
    pub fn from_live(is_live: bool) -> Self {
        if is_live { Self::Live } else { Self::Closed }
    }

    /// `true` только для `live`.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Строковое представление статуса.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Live => "live",
            Self::Closed => "closed",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "live" => Self::Live,
            "closed" => Self::Closed,
            _ => Self::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Вакансия компании.
pub struct Job {
    /// Идентификатор вакансии.
    pub id: String,
    /// Название.
    pub title: String,
    /// Тип занятости.
    pub job_type: Option<String>,
    /// Статус публикации.
    pub status: JobStatus,
    /// Количество откликов.
    pub applicants_count: u64,
    /// Дата публикации (UTC).
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Столбец диаграммы распределения вакансий.
pub struct DistributionEntry {
    /// Подпись столбца.
    pub name: String,
    /// Значение.
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Сводные показатели для дашборда.
pub struct DashboardStats {
    /// Всего пользователей.
    pub total_users: u64,
    /// Всего компаний.
    pub total_companies: u64,
    /// Опубликованных вакансий.
    pub live_jobs: u64,
    /// Всего откликов.
    pub total_applications: u64,
    /// Распределение вакансий для диаграммы.
    pub job_distribution: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// К чему относится событие ленты активности.
pub enum ActivityKind {
    /// Пользователь.
    User,
    /// Вакансия.
    Job,
    /// Компания.
    Company,
    /// Отклик.
    Application,
    /// Прочее.
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Событие ленты последней активности.
pub struct Activity {
    /// Идентификатор события.
    pub id: String,
    /// Кто совершил действие.
    pub user: String,
    /// Описание действия.
    pub action: String,
    /// Когда (UTC), если дату удалось разобрать.
    pub time: Option<DateTime<Utc>>,
    /// Время в том виде, как его прислал сервер.
    pub raw_time: String,
    /// Тип события.
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Данные страницы дашборда. Показатели и лента грузятся независимо:
/// ошибка одной части не прячет другую.
pub struct Dashboard {
    /// Сводные показатели (нули, если загрузить не удалось).
    pub stats: DashboardStats,
    /// Ошибка загрузки показателей.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_error: Option<String>,
    /// Лента последней активности.
    pub activity: Vec<Activity>,
    /// Ошибка загрузки ленты.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_admin_and_keeps_other_values() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert!(Role::parse(" ADMIN ").is_admin());
        assert_eq!(Role::parse("USER"), Role::Other("USER".to_string()));
        assert!(!Role::parse("admin").is_admin());
    }

    #[test]
    fn session_serializes_role_as_plain_string() {
        let session = Session::new("tok", Role::Admin);
        let raw = serde_json::to_string(&session).expect("serialize");
        assert_eq!(raw, r#"{"access_token":"tok","role":"ADMIN"}"#);
    }

    #[test]
    fn job_status_round_trips_unknown_values() {
        assert_eq!(JobStatus::from("live".to_string()), JobStatus::Live);
        assert_eq!(
            JobStatus::from("draft".to_string()),
            JobStatus::Other("draft".to_string())
        );
        assert_eq!(JobStatus::from_live(false).as_str(), "closed");
    }

    #[test]
    fn company_without_owner_is_inactive() {
        let company = Company {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            industry: None,
            location: None,
            owner: None,
            created_at: None,
        };
        assert!(!company.is_active());
    }
}
