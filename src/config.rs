//! Backend Selection
//!
//! Endpoint and credentials are baked in at build time. The hosted table is
//! used only when both url and key are present; anything else falls back to
//! browser storage.

use log::LevelFilter;
use todo_core::BackendConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    Remote(BackendConfig),
    Local,
}

/// Raw build-time settings
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildEnv<'a> {
    pub backend_url: Option<&'a str>,
    pub backend_key: Option<&'a str>,
    pub backend_table: Option<&'a str>,
    /// `local` forces browser storage even when a backend is configured
    pub storage: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

impl BuildEnv<'static> {
    pub fn current() -> Self {
        Self {
            backend_url: option_env!("TODO_BACKEND_URL"),
            backend_key: option_env!("TODO_BACKEND_KEY"),
            backend_table: option_env!("TODO_BACKEND_TABLE"),
            storage: option_env!("TODO_STORAGE"),
            log_level: option_env!("TODO_LOG_LEVEL"),
        }
    }
}

impl BuildEnv<'_> {
    pub fn storage_choice(&self) -> StorageChoice {
        if self
            .storage
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("local"))
        {
            return StorageChoice::Local;
        }
        let (Some(url), Some(key)) = (self.backend_url, self.backend_key) else {
            return StorageChoice::Local;
        };
        match BackendConfig::new(url, key) {
            Ok(config) => StorageChoice::Remote(config.with_table(self.backend_table.unwrap_or(""))),
            Err(e) => {
                log::warn!("[APP] Ignoring backend settings: {}", e);
                StorageChoice::Local
            }
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_local() {
        assert_eq!(BuildEnv::default().storage_choice(), StorageChoice::Local);
    }

    #[test]
    fn test_remote_needs_url_and_key() {
        let env = BuildEnv {
            backend_url: Some("https://abc.example.co"),
            ..Default::default()
        };
        assert_eq!(env.storage_choice(), StorageChoice::Local);

        let env = BuildEnv {
            backend_url: Some("https://abc.example.co/"),
            backend_key: Some("anon"),
            ..Default::default()
        };
        match env.storage_choice() {
            StorageChoice::Remote(config) => {
                assert_eq!(config.table_url(), "https://abc.example.co/rest/v1/todos");
                assert_eq!(config.api_key, "anon");
            }
            StorageChoice::Local => panic!("expected remote"),
        }
    }

    #[test]
    fn test_blank_key_falls_back() {
        let env = BuildEnv {
            backend_url: Some("https://abc.example.co"),
            backend_key: Some(" "),
            ..Default::default()
        };
        assert_eq!(env.storage_choice(), StorageChoice::Local);
    }

    #[test]
    fn test_custom_table_and_forced_local() {
        let env = BuildEnv {
            backend_url: Some("https://abc.example.co"),
            backend_key: Some("anon"),
            backend_table: Some("tasks"),
            ..Default::default()
        };
        let StorageChoice::Remote(config) = env.storage_choice() else {
            panic!("expected remote");
        };
        assert_eq!(config.table, "tasks");

        let env = BuildEnv { storage: Some("LOCAL"), ..env };
        assert_eq!(env.storage_choice(), StorageChoice::Local);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(BuildEnv::default().log_level(), LevelFilter::Info);
        let env = BuildEnv { log_level: Some("debug"), ..Default::default() };
        assert_eq!(env.log_level(), LevelFilter::Debug);
        let env = BuildEnv { log_level: Some("loud"), ..Default::default() };
        assert_eq!(env.log_level(), LevelFilter::Info);
    }
}
