use thiserror::Error;

/// Сообщение, которое показывается при сбое транспорта.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Network error: could not reach the server. Please try again.";

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `admin-client`.
pub enum AdminClientError {
    /// Ошибка клиентской валидации. Запрос на сервер не отправлялся.
    #[error("validation error: {0}")]
    Validation(String),

    /// Сбой транспорта (DNS, соединение, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Сервер ответил статусом вне 2xx.
    #[error("http error {status}: {message}")]
    Http {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение сервера (или запасной текст по статусу).
        message: String,
    },

    /// Тело успешного ответа не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),

    /// Для операции нужна сессия, а её нет.
    #[error("unauthorized")]
    Unauthorized,

    /// Сессия есть, но роль не ADMIN.
    #[error("access denied: admins only")]
    AccessDenied,

    /// Строка не найдена в текущей странице списка.
    #[error("not found: {0}")]
    NotFound(String),

    /// Не удалось прочитать или записать хранилище сессии.
    #[error("session storage error: {0}")]
    Storage(String),
}

/// Результат операций `admin-client`.
pub type AdminClientResult<T> = Result<T, AdminClientError>;

impl AdminClientError {
    /// Текст для показа пользователю рядом с формой или списком.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::NotFound(message) => message.clone(),
            Self::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Decode(_) => "Unexpected response from the server".to_string(),
            Self::Unauthorized => "Please sign in to continue".to_string(),
            Self::AccessDenied => "Access denied: Admins only".to_string(),
            Self::Storage(message) => format!("Could not access session storage: {message}"),
        }
    }

    /// HTTP-статус, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true`, если запрос не дошёл до сервера.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_surfaces_server_message_verbatim() {
        let err = AdminClientError::Http {
            status: 400,
            message: "Email is already taken".to_string(),
        };
        assert_eq!(err.user_message(), "Email is already taken");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_network());
    }

    #[test]
    fn validation_error_has_no_status() {
        let err = AdminClientError::Validation("Passwords do not match".to_string());
        assert_eq!(err.user_message(), "Passwords do not match");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn access_denied_mentions_admins() {
        assert_eq!(
            AdminClientError::AccessDenied.user_message(),
            "Access denied: Admins only"
        );
    }
}
