use derive_builder::Builder;
use derive_getters::Getters;
use thiserror::Error;

use crate::{
    api::CookieJar,
    storage::{Storage, StorageError, StorageKey},
};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("{0} is not set in client storage")]
    Missing(StorageKey),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("incomplete application context: {0}")]
    Incomplete(#[from] AppContextBuilderError),
}

/// Everything a page needs to know about where and as whom it talks to the
/// platform. Built once per invocation and passed down explicitly.
#[derive(Debug, Clone, Builder, Getters)]
#[builder(setter(into))]
pub struct AppContext {
    api_base_url: String,
    platform_base_url: String,
    #[builder(default)]
    is_platform_admin: bool,
    #[builder(default)]
    cookies: CookieJar,
}

impl AppContext {
    pub fn load(storage: &Storage, cookies: CookieJar) -> Result<Self, ContextError> {
        let api_base_url = storage
            .get(StorageKey::ApiBaseUrl)?
            .ok_or(ContextError::Missing(StorageKey::ApiBaseUrl))?;
        let platform_base_url = storage
            .get(StorageKey::PlatformBaseUrl)?
            .unwrap_or_else(|| api_base_url.clone());
        let is_platform_admin = storage
            .get(StorageKey::IsPlatformAdmin)?
            .is_some_and(|flag| flag == "true");

        Ok(AppContextBuilder::default()
            .api_base_url(api_base_url)
            .platform_base_url(platform_base_url)
            .is_platform_admin(is_platform_admin)
            .cookies(cookies)
            .build()?)
    }

    /// Absolute API url for `path`, which must start with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url.trim_end_matches('/'))
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}{path}", self.platform_base_url.trim_end_matches('/'))
    }
}
