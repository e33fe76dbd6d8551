use std::fmt::Display;

/// Keys of the persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    ApiBaseUrl,
    PlatformBaseUrl,
    ActiveOrganizationId,
    IsPlatformAdmin,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::ApiBaseUrl => "apiBaseUrl",
            StorageKey::PlatformBaseUrl => "platformBaseUrl",
            StorageKey::ActiveOrganizationId => "activeOrganizationId",
            StorageKey::IsPlatformAdmin => "isPlatformAdmin",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
