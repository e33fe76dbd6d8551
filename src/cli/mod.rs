mod courses;
mod imap;
mod organizations;
mod prompt;
mod render;

use anyhow::{Context as _, Result};
use clap::Subcommand;

pub use courses::CoursesCommand;
pub use imap::ImapCommand;
pub use organizations::OrganizationsCommand;

use email_learning_admin::{
    api::{Api, OrganizationId},
    context::AppContext,
    courses::{CourseFetch, CoursesPage, StatusFilter},
    navigation::{Page, menu},
    session::SessionProvider,
    storage::Storage,
};

use crate::Args;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage organizations (platform admins only)
    #[command(subcommand)]
    Organizations(OrganizationsCommand),
    /// Manage the courses of the active organization
    #[command(subcommand)]
    Courses(CoursesCommand),
    /// Manage the IMAP connections of the active organization
    #[command(subcommand)]
    Imap(ImapCommand),
    /// Print the navigation menu
    Menu,
    Users,
    Analytics,
}

impl Command {
    /// Page the command acts on, used to tag log records.
    pub fn page(&self) -> Option<Page> {
        match self {
            Command::Organizations(_) => Some(Page::Organizations),
            Command::Courses(_) | Command::Imap(_) => Some(Page::Courses),
            Command::Users => Some(Page::Users),
            Command::Analytics => Some(Page::Analytics),
            Command::Menu => None,
        }
    }
}

pub async fn run(args: &Args, context: &AppContext, storage: &Storage, api: &impl Api) -> Result<()> {
    match &args.command {
        Command::Organizations(command) => organizations::run(command, api, storage).await,
        Command::Courses(command) => courses::run(command, api, storage, args.yes).await,
        Command::Imap(command) => imap::run(command, api, storage).await,
        Command::Menu => {
            render::menu(&menu(context));
            Ok(())
        }
        Command::Users | Command::Analytics => {
            if let Some(page) = args.command.page() {
                render::placeholder(page);
            }
            Ok(())
        }
    }
}

/// Mounts the courses page for the active organization the way the session
/// provider announces it, optionally narrowing the list to `status`.
async fn mount_courses_page(
    api: &impl Api,
    storage: &Storage,
    status: Option<StatusFilter>,
) -> Result<(CoursesPage, OrganizationId)> {
    let mut session = SessionProvider::mount(api, storage)?;
    let mut page = CoursesPage::new();
    let mut fetch: Option<CourseFetch> = None;
    session
        .refresh(|organization| fetch = page.set_organization(organization))
        .await?;
    let organization = page
        .organization()
        .context("no active organization, select one with `organizations use <id>`")?;
    if let Some(status) = status {
        fetch = page.set_filter(status);
    }
    if let Some(fetch) = fetch {
        let fetched = fetch.run(api).await;
        page.apply_fetch(&fetch, fetched);
    }
    Ok((page, organization))
}

fn active_organization(api: &impl Api, storage: &Storage) -> Result<OrganizationId> {
    SessionProvider::mount(api, storage)?
        .active_organization()
        .context("no active organization, select one with `organizations use <id>`")
}
