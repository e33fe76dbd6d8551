use log::{debug, error, warn};

use crate::{
    api::{Api, ApiError, Course, CourseId, OrganizationId},
    courses::{
        Dialog, FetchGuard, FetchTicket, Fetched, FilterForm, ListPatch, StatusFilter,
        ToggleAction, apply,
    },
};

/// A course list request bound to the organization and query that started it.
#[derive(Debug)]
pub struct CourseFetch {
    ticket: FetchTicket,
    organization: OrganizationId,
    query: &'static str,
}

impl CourseFetch {
    pub fn organization(&self) -> OrganizationId {
        self.organization
    }

    pub fn query(&self) -> &'static str {
        self.query
    }

    pub async fn run(&self, api: &impl Api) -> Fetched<Result<Vec<Course>, ApiError>> {
        self.ticket
            .run(api.courses(self.organization, self.query))
            .await
    }
}

/// Course management page state: the visible list, the status filter and
/// the single open dialog.
#[derive(Debug, Default)]
pub struct CoursesPage {
    organization: Option<OrganizationId>,
    filter: FilterForm,
    query: &'static str,
    courses: Vec<Course>,
    dialog: Dialog,
    fetches: FetchGuard,
}

impl CoursesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organization(&self) -> Option<OrganizationId> {
        self.organization
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter.selection()
    }

    pub fn query(&self) -> &'static str {
        self.query
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    /// Refresh callback of the session provider. The filter goes back to
    /// "all" before the list is fetched for the new organization.
    pub fn set_organization(&mut self, organization: Option<OrganizationId>) -> Option<CourseFetch> {
        self.organization = organization;
        self.filter.reset();
        self.query = self.filter.selection().query();
        self.begin_fetch()
    }

    pub fn set_filter(&mut self, status: StatusFilter) -> Option<CourseFetch> {
        let mut query = self.query;
        self.filter.select(status, |selected| query = selected);
        self.query = query;
        self.begin_fetch()
    }

    /// Starts a fetch for the current organization and query, superseding any
    /// fetch still in flight. Without an organization nothing is fetched.
    pub fn begin_fetch(&mut self) -> Option<CourseFetch> {
        let Some(organization) = self.organization else {
            self.fetches.cancel();
            self.courses.clear();
            return None;
        };
        debug!("fetching courses of organization {organization} with query {:?}", self.query);
        Some(CourseFetch {
            ticket: self.fetches.issue(),
            organization,
            query: self.query,
        })
    }

    /// Returns whether the result replaced the list.
    pub fn apply_fetch(
        &mut self,
        fetch: &CourseFetch,
        fetched: Fetched<Result<Vec<Course>, ApiError>>,
    ) -> bool {
        if !self.fetches.is_current(&fetch.ticket) {
            debug!("dropping superseded course list for organization {}", fetch.organization);
            return false;
        }
        match fetched {
            Fetched::Done(Ok(courses)) => {
                self.courses = courses;
                true
            }
            Fetched::Done(Err(e)) => {
                error!("fetching courses failed: {e}");
                false
            }
            Fetched::Superseded => false,
        }
    }

    /// Runs a fetch for the current state to completion.
    pub async fn reload(&mut self, api: &impl Api) -> bool {
        let Some(fetch) = self.begin_fetch() else {
            return false;
        };
        let fetched = fetch.run(api).await;
        self.apply_fetch(&fetch, fetched)
    }

    pub fn open_create(&mut self) {
        self.dialog = Dialog::CreateCourse;
    }

    pub fn open_edit(&mut self, id: CourseId) {
        self.dialog = Dialog::EditCourse(id);
    }

    /// Opens the enable/disable popup offering the opposite of the course's
    /// current state. Unknown courses leave the dialog slot untouched.
    pub fn open_toggle(&mut self, id: CourseId) -> Option<ToggleAction> {
        let Some(course) = self.course(id) else {
            warn!("no course {id} to toggle");
            return None;
        };
        let action = ToggleAction::for_state(course.enabled);
        self.dialog = Dialog::EnableDisable(id, action);
        Some(action)
    }

    pub fn open_delete(&mut self, id: CourseId) {
        self.dialog = Dialog::Delete(id);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    fn patch(&mut self, patch: ListPatch) {
        self.courses = apply(&self.courses, patch);
        self.dialog = Dialog::None;
    }

    pub fn toggled(&mut self, course: &Course) {
        self.patch(ListPatch::StateChanged {
            id: course.id,
            enabled: course.enabled,
        });
    }

    pub fn deleted(&mut self, id: CourseId) {
        self.patch(ListPatch::Deleted(id));
    }

    pub fn updated(&mut self, course: Course) {
        self.patch(ListPatch::Updated(course));
    }

    pub fn created(&mut self, course: Course) {
        self.patch(ListPatch::Created(course));
    }
}
