use log::error;

use crate::api::{Api, Organization, OrganizationId};

/// Organizations listing with the "Add an Organization" dialog.
#[derive(Debug, Default)]
pub struct OrganizationsPage {
    organizations: Vec<Organization>,
    dialog_open: bool,
}

impl OrganizationsPage {
    pub async fn mount(api: &impl Api) -> Self {
        let organizations = api.organizations().await.unwrap_or_else(|e| {
            error!("fetching organizations failed: {e}");
            Vec::new()
        });
        Self {
            organizations,
            dialog_open: false,
        }
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn organization(&self, id: OrganizationId) -> Option<&Organization> {
        self.organizations.iter().find(|organization| organization.id == id)
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn created(&mut self, organization: Organization) {
        self.organizations.push(organization);
        self.dialog_open = false;
    }
}
