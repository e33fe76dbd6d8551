use futures::{FutureExt as _, future::BoxFuture};
use log::{debug, trace};
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{CONTENT_TYPE, COOKIE},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    api::{
        Api, ApiError, Course, CourseId, CourseUpdate, DeleteOutcome, ImapConnection,
        NewCourse, NewImapConnection, NewOrganization, Organization, OrganizationId,
        SessionUpdate, course::CourseList, imap_connection::ImapConnectionList,
        organization::OrganizationList,
    },
    context::AppContext,
};

const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// [`Api`] over HTTP, authenticated with the session cookie and the CSRF
/// token it carries.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    context: AppContext,
}

impl HttpApi {
    pub fn new(context: AppContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            context,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.context.endpoint(path);
        debug!("{method} {url}");
        let cookies = self.context.cookies();
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, cookies.csrf_token().unwrap_or_default());
        if !cookies.header().is_empty() {
            request = request.header(COOKIE, cookies.header());
        }
        request
    }

    async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        trace!("{status}: {}", String::from_utf8_lossy(&body));
        Ok((status, body))
    }

    fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
        let error = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error);
        ApiError::Status {
            status: status.as_u16(),
            error,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = Self::read_body(request.send().await?).await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Api for HttpApi {
    fn organizations(&self) -> BoxFuture<'_, Result<Vec<Organization>, ApiError>> {
        async move {
            let list: OrganizationList =
                Self::send(self.request(Method::GET, "/organizations/")).await?;
            Ok(list.organizations)
        }
        .boxed()
    }

    fn create_organization<'a>(
        &'a self,
        organization: &'a NewOrganization,
    ) -> BoxFuture<'a, Result<Organization, ApiError>> {
        Self::send(
            self.request(Method::POST, "/organizations/")
                .json(organization),
        )
        .boxed()
    }

    fn update_session(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<SessionUpdate, ApiError>> {
        Self::send(
            self.request(Method::POST, "/session")
                .json(&SessionUpdate {
                    active_organization_id: organization,
                }),
        )
        .boxed()
    }

    fn courses<'a>(
        &'a self,
        organization: OrganizationId,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Course>, ApiError>> {
        async move {
            let path = format!("/organizations/{organization}/courses{query}");
            let list: CourseList = Self::send(self.request(Method::GET, &path)).await?;
            Ok(list.courses)
        }
        .boxed()
    }

    fn course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        Self::send(self.request(Method::GET, &path)).boxed()
    }

    fn create_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: &'a NewCourse,
    ) -> BoxFuture<'a, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/");
        Self::send(self.request(Method::POST, &path).json(course)).boxed()
    }

    fn update_course<'a>(
        &'a self,
        organization: OrganizationId,
        course: CourseId,
        update: &'a CourseUpdate,
    ) -> BoxFuture<'a, Result<Course, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        Self::send(self.request(Method::POST, &path).json(update)).boxed()
    }

    fn delete_course(
        &self,
        organization: OrganizationId,
        course: CourseId,
    ) -> BoxFuture<'_, Result<DeleteOutcome, ApiError>> {
        let path = format!("/organizations/{organization}/courses/{course}/");
        let request = self.request(Method::DELETE, &path);
        async move {
            let (status, body) = Self::read_body(request.send().await?).await?;
            match status {
                StatusCode::OK | StatusCode::CONFLICT => Ok(serde_json::from_slice(&body)?),
                _ => Err(Self::status_error(status, &body)),
            }
        }
        .boxed()
    }

    fn imap_connections(
        &self,
        organization: OrganizationId,
    ) -> BoxFuture<'_, Result<Vec<ImapConnection>, ApiError>> {
        let path = format!("/organizations/{organization}/imap-connections/");
        let request = self.request(Method::GET, &path);
        async move {
            let list: ImapConnectionList = Self::send(request).await?;
            Ok(list.imap_connections)
        }
        .boxed()
    }

    fn create_imap_connection<'a>(
        &'a self,
        organization: OrganizationId,
        connection: &'a NewImapConnection,
    ) -> BoxFuture<'a, Result<ImapConnection, ApiError>> {
        let path = format!("/organizations/{organization}/imap-connections/");
        Self::send(self.request(Method::POST, &path).json(connection)).boxed()
    }
}
