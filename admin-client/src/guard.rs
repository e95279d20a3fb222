//! Проверка доступа к страницам админки.
//!
//! Проверка только по локальной сессии, без обращения к серверу. Это удобство
//! для интерфейса: права всё равно проверяет сервер.

use crate::error::{AdminClientError, AdminClientResult};
use crate::models::Session;
use crate::session::SessionContext;

/// Маршрут страницы входа.
pub const LOGIN_ROUTE: &str = "/login";
/// Маршрут, куда ведёт успешный вход.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Состояние защищённой страницы.
pub enum GuardState {
    /// Сессия ещё не прочитана; показывать заглушку.
    #[default]
    Checking,
    /// Есть токен и роль ADMIN.
    Authorized,
    /// Доступа нет, идёт переход на вход; ничего не показывать.
    Redirecting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Результат проверки.
pub enum GuardDecision {
    /// Страницу можно показать.
    Allow(Session),
    /// Нужно уйти на `to`.
    Redirect {
        /// Куда переходить.
        to: &'static str,
    },
}

/// Решение по сессии: без токена или с ролью не ADMIN доступа нет.
pub fn evaluate(session: Option<&Session>) -> GuardDecision {
    match session {
        Some(session) if !session.access_token.is_empty() && session.role.is_admin() => {
            GuardDecision::Allow(session.clone())
        }
        _ => GuardDecision::Redirect { to: LOGIN_ROUTE },
    }
}

#[derive(Debug, Clone, Default)]
/// Конечный автомат защиты маршрута: `Checking -> Authorized | Redirecting`.
pub struct RouteGuard {
    state: GuardState,
}

impl RouteGuard {
    /// Новый guard в состоянии [`GuardState::Checking`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее состояние.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Читает сессию и переходит в `Authorized` или `Redirecting`.
    pub fn check(&mut self, session: &SessionContext) -> GuardDecision {
        let decision = evaluate(session.session().as_ref());
        self.state = match decision {
            GuardDecision::Allow(_) => GuardState::Authorized,
            GuardDecision::Redirect { .. } => GuardState::Redirecting,
        };
        decision
    }
}

/// То же, что [`evaluate`], но в виде ошибки: `Unauthorized` без сессии,
/// `AccessDenied` для роли не ADMIN.
pub fn require_admin(session: &SessionContext) -> AdminClientResult<Session> {
    let session = session
        .session()
        .filter(|session| !session.access_token.is_empty())
        .ok_or(AdminClientError::Unauthorized)?;
    if !session.role.is_admin() {
        return Err(AdminClientError::AccessDenied);
    }
    Ok(session)
}
