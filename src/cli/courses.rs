use anyhow::{Context as _, Result, bail};
use clap::Subcommand;

use email_learning_admin::{
    api::{Api, Course, CourseId, ImapConnectionId},
    courses::{
        CourseForm, CoursesPage, DeleteCoursePopup, EnableCoursePopup, StatusFilter,
        SubmitError, ToggleAction,
    },
    storage::Storage,
};

use crate::cli::{active_organization, mount_courses_page, prompt::confirm, render};

#[derive(Debug, Subcommand)]
pub enum CoursesCommand {
    /// List the courses of the active organization
    List {
        #[arg(long, value_enum, default_value_t)]
        status: StatusFilter,
    },
    Show {
        course: CourseId,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        description: String,
        /// Existing IMAP connection receiving the course's mail
        #[arg(long)]
        imap_connection: Option<ImapConnectionId>,
    },
    /// Change title, description or IMAP connection; the slug is fixed
    Edit {
        course: CourseId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "detach_imap_connection")]
        imap_connection: Option<ImapConnectionId>,
        #[arg(long)]
        detach_imap_connection: bool,
    },
    Enable {
        course: CourseId,
    },
    Disable {
        course: CourseId,
    },
    Delete {
        course: CourseId,
    },
}

pub async fn run(
    command: &CoursesCommand,
    api: &impl Api,
    storage: &Storage,
    assume_yes: bool,
) -> Result<()> {
    match command {
        CoursesCommand::List { status } => {
            let (page, _) = mount_courses_page(api, storage, Some(*status)).await?;
            render::courses(page.courses());
        }
        CoursesCommand::Show { course } => {
            let organization = active_organization(api, storage)?;
            render::course(&api.course(organization, *course).await?);
        }
        CoursesCommand::Create {
            title,
            slug,
            description,
            imap_connection,
        } => {
            let (mut page, organization) = mount_courses_page(api, storage, None).await?;
            page.open_create();
            let mut form = CourseForm::create(organization);
            form.set_title(title.as_str());
            form.set_slug(slug.as_str());
            form.set_description(description.as_str());
            if imap_connection.is_some() {
                form.toggle_imap_connection();
                form.set_imap_connection(*imap_connection);
            }
            let course = submit(&mut form, api).await?;
            render::course(&course);
            page.created(course);
        }
        CoursesCommand::Edit {
            course,
            title,
            description,
            imap_connection,
            detach_imap_connection,
        } => {
            let (mut page, organization) = mount_courses_page(api, storage, None).await?;
            page.open_edit(*course);
            let mut form = CourseForm::edit(organization, *course);
            form.load(api).await?;
            if let Some(title) = title {
                form.set_title(title.as_str());
            }
            if let Some(description) = description {
                form.set_description(description.as_str());
            }
            if imap_connection.is_some() {
                if !form.attach_imap_connection() {
                    form.toggle_imap_connection();
                }
                form.set_imap_connection(*imap_connection);
            } else if *detach_imap_connection && form.attach_imap_connection() {
                form.toggle_imap_connection();
            }
            let course = submit(&mut form, api).await?;
            render::course(&course);
            page.updated(course);
        }
        CoursesCommand::Enable { course } => {
            toggle(api, storage, *course, ToggleAction::Enable, assume_yes).await?;
        }
        CoursesCommand::Disable { course } => {
            toggle(api, storage, *course, ToggleAction::Disable, assume_yes).await?;
        }
        CoursesCommand::Delete { course } => delete(api, storage, *course, assume_yes).await?,
    }
    Ok(())
}

async fn submit(form: &mut CourseForm, api: &impl Api) -> Result<Course> {
    match form.submit(api).await {
        Ok(course) => Ok(course),
        Err(SubmitError::Invalid) => {
            render::problems([
                form.title_helper_text(),
                form.slug_helper_text(),
                form.description_helper_text(),
            ]);
            bail!("course is invalid")
        }
        Err(SubmitError::Api(e)) => {
            render::problems([form.error_message()]);
            Err(e.into())
        }
    }
}

fn listed_title(page: &CoursesPage, course: CourseId) -> Result<String> {
    Ok(page
        .course(course)
        .with_context(|| format!("course {course} is not in the active organization"))?
        .title
        .clone())
}

async fn toggle(
    api: &impl Api,
    storage: &Storage,
    course: CourseId,
    wanted: ToggleAction,
    assume_yes: bool,
) -> Result<()> {
    let (mut page, organization) = mount_courses_page(api, storage, None).await?;
    let title = listed_title(&page, course)?;
    let offered = page
        .open_toggle(course)
        .with_context(|| format!("course {course} is not in the active organization"))?;
    if offered != wanted {
        page.close_dialog();
        bail!("course {course} is already {}d", wanted.verb());
    }
    let popup = EnableCoursePopup::new(course, title, wanted);
    if !confirm(&popup.title(), &popup.question(), assume_yes)? {
        page.close_dialog();
        return Ok(());
    }
    let updated = popup
        .confirm(api, organization)
        .await
        .with_context(|| format!("could not {} course {course}", wanted.verb()))?;
    page.toggled(&updated);
    render::courses(page.courses());
    Ok(())
}

async fn delete(
    api: &impl Api,
    storage: &Storage,
    course: CourseId,
    assume_yes: bool,
) -> Result<()> {
    let (mut page, organization) = mount_courses_page(api, storage, None).await?;
    let title = listed_title(&page, course)?;
    page.open_delete(course);
    let mut popup = DeleteCoursePopup::new(course, title);
    if !confirm(&popup.title(), &popup.question(), assume_yes)? {
        page.close_dialog();
        return Ok(());
    }
    if !popup.confirm(api, organization).await {
        render::problems([popup.error_message()]);
        bail!("course {course} was not deleted");
    }
    page.deleted(course);
    render::courses(page.courses());
    Ok(())
}
