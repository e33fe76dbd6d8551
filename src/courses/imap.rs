use std::sync::LazyLock;

use derive_getters::Getters;
use log::{debug, error, info};
use regex::Regex;

use crate::api::{Api, ApiError, ImapConnection, ImapConnectionId, NewImapConnection, OrganizationId};

pub const CREATE_FAILURE: &str = "Failed to create IMAP connection. Please try again.";

static EMAIL: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_ok_and(|pattern| pattern.is_match(email))
}

/// Picks an existing IMAP connection of the organization or creates one
/// inline. Both paths report the chosen id through the same callback.
#[derive(Debug, Getters)]
pub struct AddImapConnectionForm {
    #[getter(skip)]
    organization: OrganizationId,
    connections: Vec<ImapConnection>,
    expanded: bool,
    #[getter(skip)]
    selected: Option<ImapConnectionId>,
}

impl AddImapConnectionForm {
    pub fn new(organization: OrganizationId, initial: Option<ImapConnectionId>) -> Self {
        Self {
            organization,
            connections: Vec::new(),
            expanded: false,
            selected: initial,
        }
    }

    pub async fn mount(&mut self, api: &impl Api) {
        match api.imap_connections(self.organization).await {
            Ok(connections) => {
                debug!(
                    "organization {} has {} imap connections",
                    self.organization,
                    connections.len()
                );
                self.connections = connections;
                if self.connections.is_empty() {
                    self.expanded = true;
                }
            }
            Err(e) => error!("fetching imap connections failed: {e}"),
        }
    }

    pub fn selected(&self) -> Option<ImapConnectionId> {
        self.selected
    }

    pub fn has_connections(&self) -> bool {
        !self.connections.is_empty()
    }

    /// The "new connection" panel stays open while there is nothing to pick.
    pub fn toggle_expanded(&mut self) {
        if self.has_connections() {
            self.expanded = !self.expanded;
        }
    }

    pub fn select(
        &mut self,
        connection: Option<ImapConnectionId>,
        on_change: impl FnOnce(Option<ImapConnectionId>),
    ) {
        self.selected = connection;
        on_change(connection);
    }

    pub fn created(
        &mut self,
        connection: ImapConnection,
        on_change: impl FnOnce(Option<ImapConnectionId>),
    ) {
        let id = connection.id;
        self.connections.push(connection);
        self.expanded = false;
        self.select(Some(id), on_change);
    }
}

/// Inline form creating a new IMAP connection.
#[derive(Debug, Default, Getters)]
pub struct CreateImapForm {
    email: String,
    #[getter(skip)]
    password: String,
    server: String,
    port: String,
    #[getter(skip)]
    email_helper_text: Option<&'static str>,
    #[getter(skip)]
    password_helper_text: Option<&'static str>,
    #[getter(skip)]
    server_helper_text: Option<&'static str>,
    #[getter(skip)]
    port_helper_text: Option<&'static str>,
    #[getter(skip)]
    error_message: Option<&'static str>,
}

impl CreateImapForm {
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_server(&mut self, server: impl Into<String>) {
        self.server = server.into();
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    pub fn email_helper_text(&self) -> Option<&'static str> {
        self.email_helper_text
    }

    pub fn password_helper_text(&self) -> Option<&'static str> {
        self.password_helper_text
    }

    pub fn server_helper_text(&self) -> Option<&'static str> {
        self.server_helper_text
    }

    pub fn port_helper_text(&self) -> Option<&'static str> {
        self.port_helper_text
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    fn parsed_port(&self) -> Result<u16, &'static str> {
        if self.port.is_empty() {
            return Err("Port is required");
        }
        match self.port.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err("Port must be a positive number"),
            Ok(port) => u16::try_from(port).map_err(|_| "Port must be at most 65535"),
        }
    }

    pub fn validate(&mut self) -> bool {
        self.email_helper_text = if self.email.is_empty() {
            Some("Email is required")
        } else if !is_valid_email(&self.email) {
            Some("Email is invalid")
        } else {
            None
        };
        self.password_helper_text = self.password.is_empty().then_some("Password is required");
        self.server_helper_text = self.server.is_empty().then_some("Server is required");
        self.port_helper_text = self.parsed_port().err();
        [
            self.email_helper_text,
            self.password_helper_text,
            self.server_helper_text,
            self.port_helper_text,
        ]
        .iter()
        .all(Option::is_none)
    }

    /// Returns `None` without a request when validation fails.
    pub async fn submit(
        &mut self,
        api: &impl Api,
        organization: OrganizationId,
    ) -> Option<Result<ImapConnection, ApiError>> {
        if !self.validate() {
            return None;
        }
        let port = self.parsed_port().ok()?;
        let connection = NewImapConnection {
            email: self.email.clone(),
            password: self.password.clone(),
            server: self.server.clone(),
            port,
        };
        let result = api.create_imap_connection(organization, &connection).await;
        match &result {
            Ok(created) => {
                info!("imap connection {} created for {}", created.id, created.email);
                *self = Self::default();
            }
            Err(e) => {
                error!("creating imap connection failed: {e}");
                self.error_message = Some(CREATE_FAILURE);
            }
        }
        Some(result)
    }
}
