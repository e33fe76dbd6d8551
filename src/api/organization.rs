use serde::{Deserialize, Serialize};

use crate::api::OrganizationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrganization {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub active_organization_id: OrganizationId,
}

#[derive(Deserialize)]
pub(super) struct OrganizationList {
    pub organizations: Vec<Organization>,
}
