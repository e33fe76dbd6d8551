use log::{debug, error, info, warn};

use crate::{
    api::{Api, OrganizationId},
    storage::{Storage, StorageError, StorageKey},
};

/// What happened to the server-side session after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSync {
    /// Selection matched the persisted one, nothing was written.
    Unchanged,
    Persisted,
    /// Stored locally, but the server rejected the session update.
    Rejected,
}

/// Owner of the active organization.
///
/// Every selection is reported to the page through the refresh callback
/// first; only then is a changed selection written to client storage and
/// mirrored to the server session.
#[derive(Debug)]
pub struct SessionProvider<'a, A: Api> {
    api: &'a A,
    storage: &'a Storage,
    active: Option<OrganizationId>,
}

impl<'a, A: Api> SessionProvider<'a, A> {
    pub fn mount(api: &'a A, storage: &'a Storage) -> Result<Self, StorageError> {
        let active = Self::persisted(storage)?;
        if let Some(id) = active {
            debug!("found saved organization {id}");
        }
        Ok(Self {
            api,
            storage,
            active,
        })
    }

    fn persisted(storage: &Storage) -> Result<Option<OrganizationId>, StorageError> {
        Ok(storage
            .get(StorageKey::ActiveOrganizationId)?
            .and_then(|id| match id.parse() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("ignoring unparsable saved organization {id:?}: {e}");
                    None
                }
            }))
    }

    pub fn active_organization(&self) -> Option<OrganizationId> {
        self.active
    }

    /// Re-announces the mounted selection, as a page does on first render.
    pub async fn refresh(
        &mut self,
        on_refresh: impl FnOnce(Option<OrganizationId>),
    ) -> Result<SessionSync, StorageError> {
        self.select(self.active, on_refresh).await
    }

    pub async fn select(
        &mut self,
        organization: Option<OrganizationId>,
        on_refresh: impl FnOnce(Option<OrganizationId>),
    ) -> Result<SessionSync, StorageError> {
        self.active = organization;
        on_refresh(organization);

        let Some(organization) = organization else {
            return Ok(SessionSync::Unchanged);
        };
        if Self::persisted(self.storage)? == Some(organization) {
            return Ok(SessionSync::Unchanged);
        }
        self.storage
            .set(StorageKey::ActiveOrganizationId, &organization.to_string())?;
        match self.api.update_session(organization).await {
            Ok(ack) => {
                info!(
                    "session switched to organization {}",
                    ack.active_organization_id
                );
                Ok(SessionSync::Persisted)
            }
            Err(e) => {
                error!("updating session failed: {e}");
                Ok(SessionSync::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::api::mock::{Call, MockApi};

    #[fixture]
    fn storage() -> Storage {
        assert_ok!(Storage::in_memory())
    }

    #[rstest]
    #[tokio::test]
    async fn test_initial_refresh_fires_without_session_write(storage: Storage) {
        assert_ok!(storage.set(StorageKey::ActiveOrganizationId, "3"));
        let api = MockApi::new();
        let mut session = assert_ok!(SessionProvider::mount(&api, &storage));
        let mut refreshed = None;

        let sync = assert_ok!(session.refresh(|id| refreshed = Some(id)).await);

        assert_eq!(Some(Some(OrganizationId::from(3))), refreshed);
        assert_eq!(SessionSync::Unchanged, sync);
        assert_is_empty!(api.calls());
    }

    #[rstest]
    #[tokio::test]
    async fn test_refresh_fires_for_unset_organization(storage: Storage) {
        let api = MockApi::new();
        let mut session = assert_ok!(SessionProvider::mount(&api, &storage));
        let mut refreshed = None;

        let sync = assert_ok!(session.refresh(|id| refreshed = Some(id)).await);

        assert_eq!(Some(None), refreshed);
        assert_eq!(SessionSync::Unchanged, sync);
        assert_is_empty!(api.calls());
    }

    #[rstest]
    #[tokio::test]
    async fn test_new_selection_is_persisted_and_mirrored(storage: Storage) {
        assert_ok!(storage.set(StorageKey::ActiveOrganizationId, "1"));
        let api = MockApi::new().respond(json!({ "active_organization_id": 2 }));
        let mut session = assert_ok!(SessionProvider::mount(&api, &storage));

        let sync = assert_ok!(session.select(Some(2.into()), |_| ()).await);

        assert_eq!(SessionSync::Persisted, sync);
        assert_eq!(Some(OrganizationId::from(2)), session.active_organization());
        assert_eq!(
            Some("2".to_owned()),
            assert_ok!(storage.get(StorageKey::ActiveOrganizationId))
        );
        assert_eq!(
            vec![Call {
                method: "POST",
                path: "/session".to_owned(),
                body: Some(json!({ "active_organization_id": 2 })),
            }],
            api.calls()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_rejected_session_update_keeps_local_selection(storage: Storage) {
        let api = MockApi::new().fail(403, Some("Forbidden"));
        let mut session = assert_ok!(SessionProvider::mount(&api, &storage));

        let sync = assert_ok!(session.select(Some(4.into()), |_| ()).await);

        assert_eq!(SessionSync::Rejected, sync);
        assert_eq!(
            Some("4".to_owned()),
            assert_ok!(storage.get(StorageKey::ActiveOrganizationId))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_garbage_in_storage_mounts_without_organization(storage: Storage) {
        assert_ok!(storage.set(StorageKey::ActiveOrganizationId, "null"));
        let api = MockApi::new();

        let session = assert_ok!(SessionProvider::mount(&api, &storage));

        assert_none!(session.active_organization());
    }
}
