use validator::{Validate, ValidationErrors};

use crate::error::{AdminClientError, AdminClientResult};

/// Сообщение при несовпадении паролей в форме регистрации.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

const DUPLICATE_ADMIN_HINT: &str = "Only one admin account can be registered. \
     Sign in with the existing admin credentials instead.";

#[derive(Debug, Clone, Validate)]
/// Форма входа.
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

impl LoginForm {
    /// Собирает форму; email обрезается по краям, пароль берётся как есть.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    /// Проверяет форму до отправки.
    pub fn check(&self) -> AdminClientResult<()> {
        self.validate().map_err(validation_error)
    }
}

#[derive(Debug, Clone, Validate)]
/// Форма регистрации администратора.
pub struct RegisterAdminForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub(crate) full_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
    pub(crate) re_password: String,
}

impl RegisterAdminForm {
    /// Собирает форму; имя и email обрезаются по краям.
    pub fn new(full_name: &str, email: &str, password: &str, re_password: &str) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            re_password: re_password.to_string(),
        }
    }

    /// Проверяет форму до отправки. Несовпадение паролей проверяется первым.
    pub fn check(&self) -> AdminClientResult<()> {
        if self.password != self.re_password {
            return Err(AdminClientError::Validation(
                PASSWORD_MISMATCH_MESSAGE.to_string(),
            ));
        }
        self.validate().map_err(validation_error)
    }
}

fn validation_error(errors: ValidationErrors) -> AdminClientError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string());

    AdminClientError::Validation(message)
}

/// Дополняет серверное "Admin already exists" пояснением. Остальные ошибки
/// возвращаются без изменений.
pub(crate) fn explain_duplicate_admin(err: AdminClientError) -> AdminClientError {
    match err {
        AdminClientError::Http { status, message }
            if message.to_lowercase().contains("already exists") =>
        {
            AdminClientError::Http {
                status,
                message: format!("{}. {DUPLICATE_ADMIN_HINT}", message.trim_end_matches('.')),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_rejects_bad_email_and_empty_password() {
        let err = LoginForm::new("not-an-email", "secret")
            .check()
            .expect_err("bad email");
        assert_eq!(err.user_message(), "Enter a valid email address");

        let err = LoginForm::new("admin@example.com", "")
            .check()
            .expect_err("empty password");
        assert_eq!(err.user_message(), "Password is required");

        assert!(LoginForm::new("  admin@example.com ", "secret").check().is_ok());
    }

    #[test]
    fn register_form_reports_password_mismatch_first() {
        let err = RegisterAdminForm::new("", "bad", "one", "two")
            .check()
            .expect_err("mismatch");
        assert_eq!(err.user_message(), PASSWORD_MISMATCH_MESSAGE);
    }

    #[test]
    fn register_form_requires_full_name() {
        let err = RegisterAdminForm::new("  ", "admin@example.com", "pw", "pw")
            .check()
            .expect_err("no name");
        assert_eq!(err.user_message(), "Full name is required");
    }

    #[test]
    fn duplicate_admin_message_is_enriched() {
        let err = explain_duplicate_admin(AdminClientError::Http {
            status: 400,
            message: "Admin already exists.".to_string(),
        });
        let text = err.user_message();
        assert!(text.starts_with("Admin already exists. Only one admin"));
        assert!(text.contains("already exists"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn other_errors_pass_through_untouched() {
        let err = explain_duplicate_admin(AdminClientError::Http {
            status: 500,
            message: "Server error".to_string(),
        });
        assert_eq!(err.user_message(), "Server error");
    }
}
