//! Хранилище клиентской сессии и контекст, через который её читают страницы.
//!
//! Писать в сессию может только сам крейт: вход, регистрация, выход и ответ
//! 401 от сервера. Страницы и внешние крейты получают доступ на чтение.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{AdminClientError, AdminClientResult};
use crate::models::{Role, Session};

/// Имя файла сессии по умолчанию для CLI.
pub const DEFAULT_SESSION_FILE: &str = ".admin_session";

/// Бэкенд долговременного хранения сессии.
///
/// Реализации должны переживать перезапуск клиента (файл, localStorage)
/// либо быть явно временными (память, тесты).
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Читает сохранённую сессию. Повреждённые данные считаются отсутствием сессии.
    fn load(&self) -> Option<Session>;

    /// Сохраняет сессию, перезаписывая предыдущую.
    fn save(&self, session: &Session) -> AdminClientResult<()>;

    /// Удаляет токен и роль. Повторный вызов не является ошибкой.
    fn clear(&self) -> AdminClientResult<()>;
}

#[derive(Debug, Default)]
/// Сессия в памяти процесса.
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с уже установленной сессией.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, session: &Session) -> AdminClientResult<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AdminClientResult<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Сессия в JSON-файле (`{"access_token": ..., "role": ...}`).
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Хранилище в указанном файле. Файл создаётся при первом `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Путь к файлу сессии.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_session(raw: &str) -> Option<Session> {
    let session = serde_json::from_str::<Session>(raw.trim()).ok()?;
    if session.access_token.trim().is_empty() {
        return None;
    }
    Some(session)
}

/// Открывает файл на запись с правами 0600 до того, как в него попадёт токен.
/// Уже существующий файл тоже получает 0600.
fn open_private(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let session = parse_session(&raw);
        if session.is_none() {
            debug!(path = %self.path.display(), "ignoring unreadable session file");
        }
        session
    }

    fn save(&self, session: &Session) -> AdminClientResult<()> {
        let raw = serde_json::to_string(session)
            .map_err(|err| AdminClientError::Storage(err.to_string()))?;
        open_private(&self.path)
            .and_then(|mut file| file.write_all(raw.as_bytes()))
            .map_err(|err| AdminClientError::Storage(err.to_string()))
    }

    fn clear(&self) -> AdminClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AdminClientError::Storage(err.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Общий контекст сессии, который передаётся в API-клиент и во все страницы.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Оборачивает хранилище.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Контекст поверх пустого хранилища в памяти.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Текущая сессия, если есть.
    pub fn session(&self) -> Option<Session> {
        self.store.load()
    }

    /// Токен доступа, если есть.
    pub fn token(&self) -> Option<String> {
        self.session().map(|session| session.access_token)
    }

    /// Роль, если есть.
    pub fn role(&self) -> Option<Role> {
        self.session().map(|session| session.role)
    }

    pub(crate) fn set_session(
        &self,
        token: impl Into<String>,
        role: Role,
    ) -> AdminClientResult<Session> {
        let session = Session::new(token, role);
        self.store.save(&session)?;
        Ok(session)
    }

    pub(crate) fn clear(&self) -> AdminClientResult<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_session_overwrites_previous_one() {
        let ctx = SessionContext::in_memory();
        ctx.set_session("first", Role::Admin).expect("save");
        ctx.set_session("second", Role::Other("USER".to_string()))
            .expect("save");

        assert_eq!(ctx.token().as_deref(), Some("second"));
        assert_eq!(ctx.role(), Some(Role::Other("USER".to_string())));
    }

    #[test]
    fn clear_removes_both_fields_and_is_idempotent() {
        let ctx = SessionContext::in_memory();
        ctx.clear().expect("clear on empty store");

        ctx.set_session("tok", Role::Admin).expect("save");
        ctx.clear().expect("clear");

        assert!(ctx.token().is_none());
        assert!(ctx.role().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let store = FileSessionStore::new(&path);
        store
            .save(&Session::new("abc.def.ghi", Role::Admin))
            .expect("save");

        let reopened = FileSessionStore::new(&path);
        let session = reopened.load().expect("session should load");
        assert_eq!(session.access_token, "abc.def.ghi");
        assert!(session.role.is_admin());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_keeps_token_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let fresh = FileSessionStore::new(dir.path().join("fresh.json"));
        fresh.save(&Session::new("tok", Role::Admin)).expect("save");
        let mode = fs::metadata(fresh.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let existing_path = dir.path().join("existing.json");
        fs::write(&existing_path, "{}").expect("seed");
        fs::set_permissions(&existing_path, fs::Permissions::from_mode(0o644)).expect("chmod");
        let existing = FileSessionStore::new(&existing_path);
        existing
            .save(&Session::new("tok", Role::Admin))
            .expect("save");
        let mode = fs::metadata(&existing_path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(existing.load().map(|session| session.access_token).as_deref(), Some("tok"));
    }

    #[test]
    fn file_store_clear_deletes_file_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.clear().expect("clear missing file");
        store
            .save(&Session::new("tok", Role::Admin))
            .expect("save");
        store.clear().expect("clear");

        assert!(!store.path().exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn parse_session_rejects_blank_token_and_garbage() {
        assert!(parse_session(r#"{"access_token":"  ","role":"ADMIN"}"#).is_none());
        assert!(parse_session("{not-json}").is_none());
        assert!(parse_session("").is_none());
    }
}
