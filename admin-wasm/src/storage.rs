use admin_client::{Role, Session};

/// Ключи `localStorage`, общие с прежней версией дашборда.
pub(crate) const TOKEN_KEY: &str = "accessToken";
pub(crate) const ROLE_KEY: &str = "role";

/// Сессия из сырых значений `localStorage`. Пустой токен = нет сессии;
/// без роли сессия есть, но guard её не пропустит.
pub(crate) fn parse_session(token: Option<String>, role: Option<String>) -> Option<Session> {
    let token = token?.trim().to_string();
    if token.is_empty() {
        return None;
    }
    let role = role
        .map(|role| Role::parse(&role))
        .unwrap_or_else(|| Role::Other(String::new()));
    Some(Session::new(token, role))
}

#[cfg(target_arch = "wasm32")]
pub(crate) use browser::LocalStorageSessionStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use admin_client::{AdminClientError, AdminClientResult, Session, SessionStore};
    use web_sys::Storage;

    use super::{ROLE_KEY, TOKEN_KEY, parse_session};

    fn storage() -> AdminClientResult<Storage> {
        let window = web_sys::window()
            .ok_or_else(|| AdminClientError::Storage("window is not available".to_string()))?;
        window
            .local_storage()
            .map_err(|_| AdminClientError::Storage("failed to access localStorage".to_string()))?
            .ok_or_else(|| AdminClientError::Storage("localStorage is not available".to_string()))
    }

    #[derive(Debug, Default, Clone, Copy)]
    /// Сессия в `localStorage` браузера.
    pub(crate) struct LocalStorageSessionStore;

    impl SessionStore for LocalStorageSessionStore {
        fn load(&self) -> Option<Session> {
            let storage = storage().ok()?;
            let token = storage.get_item(TOKEN_KEY).ok()?;
            let role = storage.get_item(ROLE_KEY).ok().flatten();
            parse_session(token, role)
        }

        fn save(&self, session: &Session) -> AdminClientResult<()> {
            let storage = storage()?;
            storage
                .set_item(TOKEN_KEY, &session.access_token)
                .map_err(|_| AdminClientError::Storage("failed to save token".to_string()))?;
            storage
                .set_item(ROLE_KEY, session.role.as_str())
                .map_err(|_| AdminClientError::Storage("failed to save role".to_string()))
        }

        fn clear(&self) -> AdminClientResult<()> {
            let storage = storage()?;
            storage
                .remove_item(TOKEN_KEY)
                .map_err(|_| AdminClientError::Storage("failed to clear token".to_string()))?;
            storage
                .remove_item(ROLE_KEY)
                .map_err(|_| AdminClientError::Storage("failed to clear role".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session_trims_token() {
        let session = parse_session(
            Some("  abc.def.ghi  ".to_string()),
            Some("ADMIN".to_string()),
        )
        .expect("session should parse");
        assert_eq!(session.access_token, "abc.def.ghi");
        assert!(session.role.is_admin());
    }

    #[test]
    fn parse_session_rejects_blank_token() {
        assert!(parse_session(Some("   ".to_string()), Some("ADMIN".to_string())).is_none());
        assert!(parse_session(None, Some("ADMIN".to_string())).is_none());
    }

    #[test]
    fn missing_role_is_not_admin() {
        let session = parse_session(Some("tok".to_string()), None).expect("session");
        assert!(!session.role.is_admin());
    }
}
