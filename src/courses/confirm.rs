use log::{error, info};

use crate::{
    api::{Api, Course, CourseId, CourseUpdate, OrganizationId},
    courses::ToggleAction,
};

const UNHANDLED_DELETE_FAILURE: &str = "Unhandled network Error! course is not deleted";

/// Yes/no popup switching a course on or off.
#[derive(Debug, Clone)]
pub struct EnableCoursePopup {
    course_id: CourseId,
    course_title: String,
    action: ToggleAction,
}

impl EnableCoursePopup {
    pub fn new(course_id: CourseId, course_title: impl Into<String>, action: ToggleAction) -> Self {
        Self {
            course_id,
            course_title: course_title.into(),
            action,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {} Course", self.action, self.course_title)
    }

    pub fn question(&self) -> String {
        format!(
            "Are you sure you want to {} the course \"{}\"?",
            self.action.verb(),
            self.course_title
        )
    }

    /// Returns the server's view of the course on success. Failures are only
    /// logged; the popup has no error state.
    pub async fn confirm(&self, api: &impl Api, organization: OrganizationId) -> Option<Course> {
        let update = CourseUpdate::State {
            enabled: self.action.enables(),
        };
        match api
            .update_course(organization, self.course_id, &update)
            .await
        {
            Ok(course) => {
                info!("course {} {}d", course.id, self.action.verb());
                Some(course)
            }
            Err(e) => {
                error!("updating course state failed: {e}");
                None
            }
        }
    }
}

/// Yes/no popup deleting a course. Keeps the reason a delete was refused so
/// it can be shown above the question.
#[derive(Debug, Clone)]
pub struct DeleteCoursePopup {
    course_id: CourseId,
    course_title: String,
    error_message: Option<String>,
}

impl DeleteCoursePopup {
    pub fn new(course_id: CourseId, course_title: impl Into<String>) -> Self {
        Self {
            course_id,
            course_title: course_title.into(),
            error_message: None,
        }
    }

    pub fn title(&self) -> String {
        format!("Delete {} Course", self.course_title)
    }

    pub fn question(&self) -> String {
        format!(
            "Are you sure you want to delete the course \"{}\"?",
            self.course_title
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns whether the course is gone.
    pub async fn confirm(&mut self, api: &impl Api, organization: OrganizationId) -> bool {
        let message = match api.delete_course(organization, self.course_id).await {
            Ok(outcome) => match outcome.error {
                None => {
                    info!("course {} deleted", self.course_id);
                    self.error_message = None;
                    return true;
                }
                Some(message) => message,
            },
            Err(e) => {
                error!("deleting course {} failed: {e}", self.course_id);
                UNHANDLED_DELETE_FAILURE.to_owned()
            }
        };
        error!("course {} not deleted: {message}", self.course_id);
        self.error_message = Some(message);
        false
    }
}
