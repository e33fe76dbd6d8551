use serde::{Deserialize, Serialize};

use crate::api::{ImapConnectionId, OrganizationId};

/// A stored mailbox credential. The password is write-only and never comes
/// back from the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImapConnection {
    pub id: ImapConnectionId,
    pub email: String,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewImapConnection {
    pub email: String,
    pub password: String,
    pub server: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub(super) struct ImapConnectionList {
    pub imap_connections: Vec<ImapConnection>,
}
