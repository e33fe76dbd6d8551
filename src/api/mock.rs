use std::{collections::VecDeque, sync::Mutex};

use futures::{FutureExt as _, future::BoxFuture};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::{
    Api, ApiError, Course, CourseId, CourseUpdate, DeleteOutcome, ImapConnection, NewCourse,
    NewImapConnection, NewOrganization, Organization, OrganizationId, SessionUpdate,
};

/// One request as the server would have seen it.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Scripted [`Api`]: every request pops the next queued response, which is
/// decoded into whatever the called method returns.
#[derive(Debug, Default)]
pub struct MockApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, body: Value) -> Self {
        self.push(Ok(body));
        self
    }

    #[must_use]
    pub fn fail(self, status: u16, error: Option<&str>) -> Self {
        self.push(Err(ApiError::Status {
            status,
            error: error.map(ToOwned::to_owned),
        }));
        self
    }

    pub fn push(&self, response: Result<Value, ApiError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn call<T: DeserializeOwned + Send + 'static>(
        &self,
        method: &'static str,
        path: String,
        body: Option<&impl Serialize>,
    ) -> BoxFuture<'static, Result<T, ApiError>> {
        let body = body.and_then(|body| serde_json::to_value(body).ok());
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call { method, path, body });
        }
        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: 599,
                    error: Some("no scripted response left".to_owned()),
                })
            });
        async move {
            let body = response?;
            serde_json::from_value::<T>(body).map_err(ApiError::from)
        }
        .boxed()
    }
}

const NO_BODY: Option<&()> = None;

impl Api for MockApi {
    fn organizations(&self) -> BoxFuture<'_, Result<Vec<Organization>, ApiError>> {
        self.call("GET", "/organizations/".to_owned(), NO_BODY)
    }

    fn create_organization<'a>(
        &'a self,
        organization: &'a NewOrganization,
    ) -> BoxFuture<'a, Result<Organization, ApiError>> {
        self.call("POST", "/organizations/".to_owned(), Some(organization))
    }

    fn update_session(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<SessionUpdate, ApiError>> {
        let body = SessionUpdate {
            active_organization_id: organization,
        };
        self.call("POST", "/session".to_owned(), Some(&body))
    }

    fn courses<'a>(
        &'a self,
        organization: OrganizationId,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Course>, ApiError>> {
        let path = format!("/organizations/{organization}/courses{query}");
        self.call("GET", path, NO_BODY)
    }

    fn course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        self.call("GET", path, NO_BODY)
    }

    fn create_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: &'a NewCourse,
    ) -> BoxFuture<'a, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/");
        self.call("POST", path, Some(course))
    }

    fn update_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: CourseId,
        update: &'a CourseUpdate,
    ) -> BoxFuture<'a, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        self.call("POST", path, Some(update))
    }

    fn delete_course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<DeleteOutcome, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        self.call("DELETE", path, NO_BODY)
    }

    fn imap_connections(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<Vec<ImapConnection>, ApiError>> {
        let path = format!("/organizations/{organization}/imap-connections/");
        self.call("GET", path, NO_BODY)
    }

    fn create_imap_connection<'a>(
        &'a self,
        organization: OrganizationId,
        connection: &'a NewImapConnection,
    ) -> BoxFuture<'a, Result<ImapConnection, ApiError>> {
        let path = format!("/organizations/{organization}/imap-connections/");
        self.call("POST", path, Some(connection))
    }
}
