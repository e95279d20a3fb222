use std::path::PathBuf;
use std::time::Duration;

use admin_client::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_JOBS_PAGE_LIMIT, DEFAULT_PAGE_LIMIT,
    DEFAULT_SESSION_FILE,
};
use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_limit: u32,
    pub jobs_page_limit: u32,
    pub session_file: PathBuf,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("ADMIN_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let page_limit = parse_u32_env(
            "ADMIN_PAGE_LIMIT",
            lookup("ADMIN_PAGE_LIMIT"),
            DEFAULT_PAGE_LIMIT,
        )?;
        let jobs_page_limit = parse_u32_env(
            "ADMIN_JOBS_PAGE_LIMIT",
            lookup("ADMIN_JOBS_PAGE_LIMIT"),
            DEFAULT_JOBS_PAGE_LIMIT,
        )?;
        let session_file = lookup("ADMIN_SESSION_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
        let request_timeout_secs = parse_optional_u64_env(
            "ADMIN_REQUEST_TIMEOUT_SECS",
            lookup("ADMIN_REQUEST_TIMEOUT_SECS"),
        )?;
        let connect_timeout_secs = parse_optional_u64_env(
            "ADMIN_CONNECT_TIMEOUT_SECS",
            lookup("ADMIN_CONNECT_TIMEOUT_SECS"),
        )?;
        let log_level = lookup("ADMIN_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            api_url,
            page_limit,
            jobs_page_limit,
            session_file,
            request_timeout_secs,
            connect_timeout_secs,
            log_level,
        })
    }

    /// Флаги командной строки важнее окружения.
    pub fn apply_overrides(
        &mut self,
        server: Option<String>,
        limit: Option<u32>,
        session_file: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(server) = server {
            self.api_url = normalize_server(server);
        }
        if let Some(limit) = limit {
            if limit == 0 {
                return Err(anyhow!("--limit must be > 0"));
            }
            self.page_limit = limit;
            self.jobs_page_limit = limit;
        }
        if let Some(session_file) = session_file {
            self.session_file = session_file;
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: normalize_server(self.api_url.clone()),
            page_limit: self.page_limit,
            jobs_page_limit: self.jobs_page_limit,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn normalize_server(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_u32_env(key: &str, raw: Option<String>, default: u32) -> Result<u32> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_optional_u64_env(key: &str, raw: Option<String>) -> Result<Option<u64>> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(Some(value))
}
