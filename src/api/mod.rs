mod cookie;
mod course;
mod http;
mod ids;
mod imap_connection;
#[cfg(test)]
pub mod mock;
mod organization;

use futures::future::BoxFuture;
use thiserror::Error;

pub use cookie::CookieJar;
pub use course::Course;
pub use course::CourseUpdate;
pub use course::DeleteOutcome;
pub use course::NewCourse;
pub use http::HttpApi;
pub use ids::CourseId;
pub use ids::ImapConnectionId;
pub use ids::OrganizationId;
pub use imap_connection::ImapConnection;
pub use imap_connection::NewImapConnection;
pub use organization::NewOrganization;
pub use organization::Organization;
pub use organization::SessionUpdate;

/// REST surface of the email learning platform.
///
/// Every page talks to the server through this trait only, so the same page
/// logic runs against [`HttpApi`] and against the scripted mock in tests.
pub trait Api {
    fn organizations(&self) -> BoxFuture<'_, Result<Vec<Organization>, ApiError>>;

    fn create_organization<'a>(
        &'a self,
        organization: &'a NewOrganization,
    ) -> BoxFuture<'a, Result<Organization, ApiError>>;

    fn update_session(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<SessionUpdate, ApiError>>;

    /// `query` is appended verbatim, see [`crate::courses::StatusFilter::query`].
    fn courses<'a>(
        &'a self,
        organization: OrganizationId,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Course>, ApiError>>;

    fn course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<Course, ApiError>>;

    fn create_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: &'a NewCourse,
    ) -> BoxFuture<'a, Result<Course, ApiError>>;

    fn update_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: CourseId,
        update: &'a CourseUpdate,
    ) -> BoxFuture<'a, Result<Course, ApiError>>;

    /// Resolves to `Ok` for every response the server considers handled (200
    /// and 409); the outcome then tells whether the course is actually gone.
    fn delete_course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<DeleteOutcome, ApiError>>;

    fn imap_connections(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<Vec<ImapConnection>, ApiError>>;

    fn create_imap_connection<'a>(
        &'a self,
        organization: OrganizationId,
        connection: &'a NewImapConnection,
    ) -> BoxFuture<'a, Result<ImapConnection, ApiError>>;
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with status {status}{}", detail(.error.as_deref()))]
    Status { status: u16, error: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn detail(error: Option<&str>) -> String {
    error.map(|e| format!(": {e}")).unwrap_or_default()
}

/// How a failed request is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Conflict,
    Forbidden,
    Server,
    Unclassified,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Status { status: 409, .. } => FailureKind::Conflict,
            ApiError::Status { status: 403, .. } => FailureKind::Forbidden,
            ApiError::Status { status, .. } if *status >= 500 => FailureKind::Server,
            _ => FailureKind::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(409, FailureKind::Conflict)]
    #[case(403, FailureKind::Forbidden)]
    #[case(500, FailureKind::Server)]
    #[case(503, FailureKind::Server)]
    #[case(400, FailureKind::Unclassified)]
    #[case(404, FailureKind::Unclassified)]
    fn test_status_errors_are_classified(#[case] status: u16, #[case] expected: FailureKind) {
        let error = ApiError::Status {
            status,
            error: None,
        };
        assert_eq!(expected, error.kind());
    }

    #[rstest]
    fn test_status_error_displays_server_message() {
        let error = ApiError::Status {
            status: 409,
            error: Some("Course cannot be deleted".to_owned()),
        };
        assert_eq!(
            "server responded with status 409: Course cannot be deleted",
            error.to_string()
        );
    }
}
