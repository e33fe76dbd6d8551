use derive_getters::Getters;
use log::{error, info};

use crate::{
    api::{Api, FailureKind, NewOrganization, Organization},
    courses::{SERVER_FAILURE, SubmitError},
};

pub const NOT_ALLOWED: &str = "You are not allowed to create organizations.";

#[derive(Debug, Default, Getters)]
pub struct OrganizationForm {
    name: String,
    description: String,
    #[getter(skip)]
    name_helper_text: Option<&'static str>,
    #[getter(skip)]
    description_helper_text: Option<&'static str>,
    #[getter(skip)]
    error_message: Option<&'static str>,
}

impl OrganizationForm {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn name_helper_text(&self) -> Option<&'static str> {
        self.name_helper_text
    }

    pub fn description_helper_text(&self) -> Option<&'static str> {
        self.description_helper_text
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn validate(&mut self) -> bool {
        self.name_helper_text = self.name.is_empty().then_some("Name is required");
        self.description_helper_text = self
            .description
            .is_empty()
            .then_some("Description is required");
        self.name_helper_text.is_none() && self.description_helper_text.is_none()
    }

    pub async fn submit(&mut self, api: &impl Api) -> Result<Organization, SubmitError> {
        if !self.validate() {
            return Err(SubmitError::Invalid);
        }
        self.error_message = None;
        let organization = NewOrganization {
            name: self.name.clone(),
            description: self.description.clone(),
        };
        match api.create_organization(&organization).await {
            Ok(created) => {
                info!("organization {} ({}) created", created.id, created.name);
                *self = Self::default();
                Ok(created)
            }
            Err(e) => {
                error!("creating organization failed: {e}");
                self.error_message = match e.kind() {
                    FailureKind::Forbidden => Some(NOT_ALLOWED),
                    FailureKind::Server => Some(SERVER_FAILURE),
                    FailureKind::Conflict | FailureKind::Unclassified => None,
                };
                Err(e.into())
            }
        }
    }
}
