use serde::{Deserialize, Serialize};

use crate::api::{CourseId, ImapConnectionId, OrganizationId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub imap_connection_id: Option<ImapConnectionId>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCourse {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub imap_connection_id: Option<ImapConnectionId>,
}

/// Body of `POST /organizations/{org}/courses/{id}/`.
///
/// The endpoint accepts either a bare state switch or a field update; the slug
/// is never part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CourseUpdate {
    State {
        enabled: bool,
    },
    Fields {
        title: String,
        description: String,
        imap_connection_id: Option<ImapConnectionId>,
        reset_imap_connection: bool,
    },
}

/// Body returned by a delete that the server considers handled (200 or 409).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteOutcome {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct CourseList {
    pub courses: Vec<Course>,
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_course_tolerates_missing_optional_fields() {
        let course: Course = assert_ok!(serde_json::from_value(json!({
            "id": 3,
            "title": "Rust",
            "slug": "rust",
        })));
        assert!(!course.enabled);
        assert_none!(course.imap_connection_id);
        assert_eq!("", course.description);
    }

    #[rstest]
    fn test_state_update_only_carries_enabled() {
        let body = assert_ok!(serde_json::to_value(CourseUpdate::State { enabled: true }));
        assert_eq!(json!({ "enabled": true }), body);
    }

    #[rstest]
    fn test_field_update_never_carries_slug() {
        let body = assert_ok!(serde_json::to_value(CourseUpdate::Fields {
            title: "Rust".to_owned(),
            description: "Ownership".to_owned(),
            imap_connection_id: None,
            reset_imap_connection: true,
        }));
        assert_eq!(
            json!({
                "title": "Rust",
                "description": "Ownership",
                "imap_connection_id": null,
                "reset_imap_connection": true,
            }),
            body
        );
    }
}
