use anyhow::{Context as _, Result, bail};
use clap::Subcommand;
use log::info;

use email_learning_admin::{
    api::{Api, CourseId},
    courses::{AddImapConnectionForm, CourseForm, CreateImapForm, SubmitError},
    storage::Storage,
};

use crate::cli::{active_organization, render};

#[derive(Debug, Subcommand)]
pub enum ImapCommand {
    /// List the IMAP connections of the active organization
    List,
    /// Create an IMAP connection; the password is read from the terminal
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        server: String,
        #[arg(long, default_value = "993")]
        port: String,
        /// Attach the new connection to this course right away
        #[arg(long)]
        course: Option<CourseId>,
    },
}

pub async fn run(command: &ImapCommand, api: &impl Api, storage: &Storage) -> Result<()> {
    let organization = active_organization(api, storage)?;
    match command {
        ImapCommand::List => {
            let mut connections = AddImapConnectionForm::new(organization, None);
            connections.mount(api).await;
            render::imap_connections(connections.connections(), connections.selected());
        }
        ImapCommand::Create {
            email,
            server,
            port,
            course,
        } => {
            let mut course_form = match course {
                Some(course) => {
                    let mut form = CourseForm::edit(organization, *course);
                    form.load(api).await?;
                    Some(form)
                }
                None => None,
            };
            let mut connections = AddImapConnectionForm::new(
                organization,
                course_form.as_ref().and_then(CourseForm::imap_connection_id),
            );
            connections.mount(api).await;

            let mut form = CreateImapForm::default();
            form.set_email(email.as_str());
            form.set_server(server.as_str());
            form.set_port(port.as_str());
            form.set_password(
                rpassword::prompt_password(format!("IMAP password for {email}: "))
                    .context("could not read password")?,
            );
            let created = match form.submit(api, organization).await {
                None => {
                    render::problems([
                        form.email_helper_text(),
                        form.password_helper_text(),
                        form.server_helper_text(),
                        form.port_helper_text(),
                    ]);
                    bail!("imap connection is invalid");
                }
                Some(Err(e)) => {
                    render::problems([form.error_message()]);
                    return Err(e.into());
                }
                Some(Ok(created)) => created,
            };

            connections.created(created, |selected| {
                if let Some(course_form) = course_form.as_mut() {
                    if !course_form.attach_imap_connection() {
                        course_form.toggle_imap_connection();
                    }
                    course_form.set_imap_connection(selected);
                }
            });
            render::imap_connections(connections.connections(), connections.selected());

            if let Some(mut course_form) = course_form {
                match course_form.submit(api).await {
                    Ok(course) => info!("course {} now receives mail through {email}", course.slug),
                    Err(SubmitError::Invalid) => bail!("course could not be updated"),
                    Err(SubmitError::Api(e)) => {
                        render::problems([course_form.error_message()]);
                        return Err(e.into());
                    }
                }
            }
        }
    }
    Ok(())
}
