use derive_getters::Getters;
use log::{debug, error, info};
use thiserror::Error;

use crate::api::{
    Api, ApiError, Course, CourseId, CourseUpdate, FailureKind, ImapConnectionId, NewCourse,
    OrganizationId,
};

pub const DUPLICATE_COURSE: &str = "A course with this title or slug already exists.";
pub const SERVER_FAILURE: &str = "Server error occurred. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CourseId),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields")]
    Invalid,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Create/edit dialog for a single course.
#[derive(Debug, Getters)]
pub struct CourseForm {
    #[getter(skip)]
    mode: FormMode,
    #[getter(skip)]
    organization: OrganizationId,
    title: String,
    slug: String,
    description: String,
    attach_imap_connection: bool,
    #[getter(skip)]
    imap_connection_id: Option<ImapConnectionId>,
    #[getter(skip)]
    title_helper_text: Option<&'static str>,
    #[getter(skip)]
    slug_helper_text: Option<&'static str>,
    #[getter(skip)]
    description_helper_text: Option<&'static str>,
    #[getter(skip)]
    error_message: Option<&'static str>,
}

impl CourseForm {
    fn new(mode: FormMode, organization: OrganizationId) -> Self {
        Self {
            mode,
            organization,
            title: String::new(),
            slug: String::new(),
            description: String::new(),
            attach_imap_connection: false,
            imap_connection_id: None,
            title_helper_text: None,
            slug_helper_text: None,
            description_helper_text: None,
            error_message: None,
        }
    }

    pub fn create(organization: OrganizationId) -> Self {
        Self::new(FormMode::Create, organization)
    }

    pub fn edit(organization: OrganizationId, course: CourseId) -> Self {
        Self::new(FormMode::Edit(course), organization)
    }

    /// Pre-populates an edit form from the server. Create forms start empty.
    pub async fn load(&mut self, api: &impl Api) -> Result<(), ApiError> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(());
        };
        let course = api.course(self.organization, id).await.inspect_err(|e| {
            error!("loading course {id} failed: {e}");
        })?;
        debug!("editing course {} ({})", course.id, course.slug);
        self.title = course.title;
        self.slug = course.slug;
        self.description = course.description;
        if let Some(connection) = course.imap_connection_id {
            self.imap_connection_id = Some(connection);
            self.attach_imap_connection = true;
        }
        Ok(())
    }

    pub fn imap_connection_id(&self) -> Option<ImapConnectionId> {
        self.imap_connection_id
    }

    pub fn title_helper_text(&self) -> Option<&'static str> {
        self.title_helper_text
    }

    pub fn slug_helper_text(&self) -> Option<&'static str> {
        self.slug_helper_text
    }

    pub fn description_helper_text(&self) -> Option<&'static str> {
        self.description_helper_text
    }

    /// Banner shown above the fields after a failed submission.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The slug is fixed once a course exists; edits are ignored.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        if self.slug_editable() {
            self.slug = slug.into();
        }
    }

    pub fn slug_editable(&self) -> bool {
        self.mode == FormMode::Create
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn toggle_imap_connection(&mut self) {
        self.attach_imap_connection = !self.attach_imap_connection;
    }

    /// Change callback of the nested IMAP connection form.
    pub fn set_imap_connection(&mut self, connection: Option<ImapConnectionId>) {
        self.imap_connection_id = connection;
    }

    fn selected_imap_connection(&self) -> Option<ImapConnectionId> {
        self.imap_connection_id
            .filter(|_| self.attach_imap_connection)
    }

    pub fn validate(&mut self) -> bool {
        self.title_helper_text = self.title.is_empty().then_some("Title is required");
        self.slug_helper_text = self.slug.is_empty().then_some("Slug is required");
        self.description_helper_text = self
            .description
            .is_empty()
            .then_some("Description is required");
        self.title_helper_text.is_none()
            && self.slug_helper_text.is_none()
            && self.description_helper_text.is_none()
    }

    pub async fn submit(&mut self, api: &impl Api) -> Result<Course, SubmitError> {
        if !self.validate() {
            debug!("course form invalid, not submitting");
            return Err(SubmitError::Invalid);
        }
        self.error_message = None;
        let imap_connection_id = self.selected_imap_connection();
        let result = match self.mode {
            FormMode::Create => {
                let course = NewCourse {
                    title: self.title.clone(),
                    slug: self.slug.clone(),
                    description: self.description.clone(),
                    imap_connection_id,
                };
                api.create_course(self.organization, &course).await
            }
            FormMode::Edit(id) => {
                let update = CourseUpdate::Fields {
                    title: self.title.clone(),
                    description: self.description.clone(),
                    imap_connection_id,
                    reset_imap_connection: imap_connection_id.is_none(),
                };
                api.update_course(self.organization, id, &update).await
            }
        };

        match result {
            Ok(course) => {
                info!("course {} saved", course.id);
                if self.mode == FormMode::Create {
                    self.title.clear();
                    self.slug.clear();
                    self.description.clear();
                }
                Ok(course)
            }
            Err(e) => {
                error!("saving course failed: {e}");
                self.error_message = match (e.kind(), self.mode) {
                    (FailureKind::Conflict, FormMode::Create) => Some(DUPLICATE_COURSE),
                    (FailureKind::Server, _) => Some(SERVER_FAILURE),
                    _ => None,
                };
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockApi;

    #[fixture]
    fn filled() -> CourseForm {
        let mut form = CourseForm::create(1.into());
        form.set_title("Rust");
        form.set_slug("rust");
        form.set_description("Ownership by email");
        form
    }

    fn course_json() -> serde_json::Value {
        json!({
            "id": 9,
            "title": "Rust",
            "slug": "rust",
            "description": "Ownership by email",
            "enabled": false,
            "imap_connection_id": null,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn test_empty_title_blocks_submission(mut filled: CourseForm) {
        filled.set_title("");
        let api = MockApi::new();

        let result = filled.submit(&api).await;

        assert!(matches!(result, Err(SubmitError::Invalid)));
        assert_eq!(Some("Title is required"), filled.title_helper_text());
        assert_none!(filled.slug_helper_text());
        assert_is_empty!(api.calls());
    }

    #[rstest]
    fn test_every_required_field_gets_helper_text() {
        let mut form = CourseForm::create(1.into());
        assert!(!form.validate());
        assert_eq!(Some("Title is required"), form.title_helper_text());
        assert_eq!(Some("Slug is required"), form.slug_helper_text());
        assert_eq!(
            Some("Description is required"),
            form.description_helper_text()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_conflict_shows_duplicate_message_and_keeps_input(mut filled: CourseForm) {
        let api = MockApi::new().fail(409, Some("Course already exists"));

        let result = filled.submit(&api).await;

        assert!(matches!(result, Err(SubmitError::Api(_))));
        assert_eq!(Some(DUPLICATE_COURSE), filled.error_message());
        assert_eq!("Rust", filled.title());
        assert_eq!("rust", filled.slug());
        assert_eq!("Ownership by email", filled.description());
    }

    #[rstest]
    #[case(500, Some(SERVER_FAILURE))]
    #[case(502, Some(SERVER_FAILURE))]
    #[case(400, None)]
    #[case(403, None)]
    #[tokio::test]
    async fn test_failures_map_to_banner(
        mut filled: CourseForm,
        #[case] status: u16,
        #[case] expected: Option<&'static str>,
    ) {
        let api = MockApi::new().fail(status, None);

        assert_err!(filled.submit(&api).await);

        assert_eq!(expected, filled.error_message());
    }

    #[rstest]
    #[case(409, None)]
    #[case(500, Some(SERVER_FAILURE))]
    #[case(400, None)]
    #[tokio::test]
    async fn test_edit_failures_map_to_banner(
        #[case] status: u16,
        #[case] expected: Option<&'static str>,
    ) {
        let api = MockApi::new()
            .respond(json!({ "id": 9, "title": "Go", "slug": "go", "description": "Channels" }))
            .fail(status, Some("Course not found"));
        let mut form = CourseForm::edit(1.into(), 9.into());
        assert_ok!(form.load(&api).await);

        let result = form.submit(&api).await;

        assert!(matches!(result, Err(SubmitError::Api(_))));
        assert_eq!(expected, form.error_message());
        assert_eq!("Go", form.title());
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_posts_course_and_clears_fields(mut filled: CourseForm) {
        let api = MockApi::new().respond(course_json());

        let course = assert_ok!(filled.submit(&api).await);

        assert_eq!(CourseId::from(9), course.id);
        assert_is_empty!(filled.title());
        assert_is_empty!(filled.slug());
        let calls = api.calls();
        assert_eq!("/organizations/1/courses/", calls[0].path);
        assert_eq!(
            Some(json!({
                "title": "Rust",
                "slug": "rust",
                "description": "Ownership by email",
                "imap_connection_id": null,
            })),
            calls[0].body
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_loads_course_and_attaches_connection() {
        let api = MockApi::new().respond(json!({
            "id": 4,
            "title": "Go",
            "slug": "go",
            "description": "Channels",
            "enabled": true,
            "imap_connection_id": 2,
        }));
        let mut form = CourseForm::edit(1.into(), 4.into());

        assert_ok!(form.load(&api).await);

        assert_eq!("Go", form.title());
        assert_eq!("go", form.slug());
        assert!(form.attach_imap_connection());
        assert_eq!(Some(ImapConnectionId::from(2)), form.imap_connection_id());
        assert_eq!("/organizations/1/courses/4/", api.calls()[0].path);
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_ignores_slug_and_resets_detached_connection() {
        let api = MockApi::new()
            .respond(json!({
                "id": 4,
                "title": "Go",
                "slug": "go",
                "description": "Channels",
                "imap_connection_id": 2,
            }))
            .respond(json!({ "id": 4, "title": "Go!", "slug": "go" }));
        let mut form = CourseForm::edit(1.into(), 4.into());
        assert_ok!(form.load(&api).await);

        form.set_slug("golang");
        form.set_title("Go!");
        form.toggle_imap_connection();
        let course = assert_ok!(form.submit(&api).await);

        assert_eq!("Go!", course.title);
        assert_eq!("go", form.slug());
        assert_eq!("Go!", form.title());
        assert_eq!(
            Some(json!({
                "title": "Go!",
                "description": "Channels",
                "imap_connection_id": null,
                "reset_imap_connection": true,
            })),
            api.calls()[1].body
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_keeps_selected_connection() {
        let api = MockApi::new()
            .respond(json!({ "id": 4, "title": "Go", "slug": "go", "description": "Channels" }))
            .respond(json!({ "id": 4, "title": "Go", "slug": "go", "imap_connection_id": 5 }));
        let mut form = CourseForm::edit(1.into(), 4.into());
        assert_ok!(form.load(&api).await);
        assert!(!form.attach_imap_connection());

        form.toggle_imap_connection();
        form.set_imap_connection(Some(5.into()));
        assert_ok!(form.submit(&api).await);

        assert_eq!(
            Some(json!({
                "title": "Go",
                "description": "Channels",
                "imap_connection_id": 5,
                "reset_imap_connection": false,
            })),
            api.calls()[1].body
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_failed_load_is_reported() {
        let api = MockApi::new().fail(404, None);
        let mut form = CourseForm::edit(1.into(), 4.into());

        assert_err!(form.load(&api).await);
        assert_is_empty!(form.title());
    }
}
