use anyhow::{Result, bail};
use clap::Subcommand;
use log::info;

use email_learning_admin::{
    api::{Api, OrganizationId},
    courses::SubmitError,
    organizations::{OrganizationForm, OrganizationsPage},
    session::{SessionProvider, SessionSync},
    storage::Storage,
};

use crate::cli::render;

#[derive(Debug, Subcommand)]
pub enum OrganizationsCommand {
    /// List organizations, marking the active one
    List,
    /// Add an organization
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Make an organization the active one
    Use { organization: OrganizationId },
}

pub async fn run(command: &OrganizationsCommand, api: &impl Api, storage: &Storage) -> Result<()> {
    let mut session = SessionProvider::mount(api, storage)?;
    match command {
        OrganizationsCommand::List => {
            let page = OrganizationsPage::mount(api).await;
            render::organizations(page.organizations(), session.active_organization());
        }
        OrganizationsCommand::Create { name, description } => {
            let mut page = OrganizationsPage::mount(api).await;
            page.open_dialog();
            let mut form = OrganizationForm::default();
            form.set_name(name.as_str());
            form.set_description(description.as_str());
            match form.submit(api).await {
                Ok(organization) => page.created(organization),
                Err(SubmitError::Invalid) => {
                    render::problems([form.name_helper_text(), form.description_helper_text()]);
                    bail!("organization is invalid");
                }
                Err(SubmitError::Api(e)) => {
                    render::problems([form.error_message()]);
                    return Err(e.into());
                }
            }
            render::organizations(page.organizations(), session.active_organization());
        }
        OrganizationsCommand::Use { organization } => {
            match session.select(Some(*organization), |_| ()).await? {
                SessionSync::Unchanged => info!("organization {organization} is already active"),
                SessionSync::Persisted => info!("organization {organization} is now active"),
                SessionSync::Rejected => {
                    bail!("organization {organization} was saved locally but the server rejected it")
                }
            }
        }
    }
    Ok(())
}
