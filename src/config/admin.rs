use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use derive_getters::Getters;
use log::debug;
use serde::Deserialize;

use crate::{
    api::CookieJar,
    config::{AuthConfig, ConfigError, default_location, default_statedir},
    storage::{Storage, StorageError, StorageKey},
};

#[derive(Debug, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct Config {
    api_base_url: String,
    #[getter(skip)]
    platform_base_url: Option<String>,
    #[serde(default)]
    is_platform_admin: bool,
    #[getter(skip)]
    statedir: Option<PathBuf>,
    #[getter(skip)]
    auth: Option<AuthConfig>,
}

impl Config {
    pub fn load_from_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match file {
            Some(file) => file.to_path_buf(),
            None => default_location()?,
        };
        debug!("reading config {}", path.display());
        let contents = read_to_string(&path)
            .map_err(|source| ConfigError::Unreadable { path, source })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn platform_base_url(&self) -> &str {
        self.platform_base_url.as_deref().unwrap_or(&self.api_base_url)
    }

    pub fn statedir(&self) -> Result<PathBuf, ConfigError> {
        match &self.statedir {
            Some(statedir) => Ok(statedir.clone()),
            None => default_statedir(),
        }
    }

    /// Session cookies sent with every request. Without `[auth]` requests go
    /// out anonymously.
    pub fn cookies(&self) -> Result<CookieJar, ConfigError> {
        self.auth
            .as_ref()
            .map_or_else(|| Ok(CookieJar::default()), AuthConfig::cookies)
    }

    /// Writes the configured endpoints and role into client storage, where
    /// the application context is read from.
    pub fn seed(&self, storage: &Storage) -> Result<(), StorageError> {
        storage.set(StorageKey::ApiBaseUrl, &self.api_base_url)?;
        storage.set(StorageKey::PlatformBaseUrl, self.platform_base_url())?;
        storage.set(
            StorageKey::IsPlatformAdmin,
            if self.is_platform_admin { "true" } else { "false" },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use assertables::*;
    use rstest::*;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::context::AppContext;

    const FULL: &str = r#"
        api_base_url = "https://learn.example/api"
        platform_base_url = "https://learn.example"
        is_platform_admin = true
        statedir = "/tmp/learn-state"

        [auth]
        type = "Cookie"
        cookie = "csrftoken=abc; sessionid=xyz"
    "#;

    #[rstest]
    fn test_full_config_is_parsed() {
        let config: Config = assert_ok!(toml::from_str(FULL));

        assert_eq!("https://learn.example/api", config.api_base_url());
        assert_eq!("https://learn.example", config.platform_base_url());
        assert!(config.is_platform_admin());
        assert_eq!(PathBuf::from("/tmp/learn-state"), assert_ok!(config.statedir()));
        assert_eq!(Some("abc"), assert_ok!(config.cookies()).csrf_token());
    }

    #[rstest]
    fn test_minimal_config_uses_defaults() {
        let config: Config =
            assert_ok!(toml::from_str(r#"api_base_url = "https://learn.example/api""#));

        assert_eq!("https://learn.example/api", config.platform_base_url());
        assert!(!config.is_platform_admin());
        assert_is_empty!(assert_ok!(config.cookies()).header());
    }

    #[rstest]
    fn test_unknown_auth_type_is_rejected() {
        let config = toml::from_str::<Config>(
            r#"
            api_base_url = "https://learn.example/api"
            [auth]
            type = "Password"
            "#,
        );
        assert_err!(config);
    }

    #[rstest]
    fn test_config_file_is_loaded() {
        let mut file = assert_ok!(NamedTempFile::new());
        assert_ok!(file.write_all(FULL.as_bytes()));

        let config = assert_ok!(Config::load_from_file(Some(file.path())));

        assert!(config.is_platform_admin());
    }

    #[rstest]
    fn test_missing_file_is_reported() {
        let result = Config::load_from_file(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }

    #[rstest]
    fn test_seeded_storage_yields_context() {
        let config: Config = assert_ok!(toml::from_str(FULL));
        let storage = assert_ok!(Storage::in_memory());

        assert_ok!(config.seed(&storage));
        let context = assert_ok!(AppContext::load(&storage, CookieJar::default()));

        assert_eq!("https://learn.example/api", context.api_base_url());
        assert_eq!("https://learn.example/users/", context.page_url("/users/"));
        assert!(context.is_platform_admin());
    }
}
