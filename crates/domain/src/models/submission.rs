//! Public form submissions: applications and contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// What a visitor submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Startup,
    Speaker,
    Sponsor,
    Investor,
    Contact,
}

impl SubmissionKind {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Startup => "startup",
            SubmissionKind::Speaker => "speaker",
            SubmissionKind::Sponsor => "sponsor",
            SubmissionKind::Investor => "investor",
            SubmissionKind::Contact => "contact",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "startup" => Some(SubmissionKind::Startup),
            "speaker" => Some(SubmissionKind::Speaker),
            "sponsor" => Some(SubmissionKind::Sponsor),
            "investor" => Some(SubmissionKind::Investor),
            "contact" => Some(SubmissionKind::Contact),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Reviewed,
    Accepted,
    Rejected,
    Archived,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(SubmissionStatus::New),
            "reviewed" => Some(SubmissionStatus::Reviewed),
            "accepted" => Some(SubmissionStatus::Accepted),
            "rejected" => Some(SubmissionStatus::Rejected),
            "archived" => Some(SubmissionStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Submission {
    pub id: Uuid,
    pub kind: SubmissionKind,
    pub status: SubmissionStatus,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub message: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for a public submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 200, message = "Organization must be at most 200 characters"))]
    pub organization: Option<String>,

    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    pub message: Option<String>,

    /// Kind-specific answers (pitch deck link, talk title, ...), stored as-is.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Request payload for changing a submission's review status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSubmissionStatusRequest {
    pub status: SubmissionStatus,
}

/// Query parameters for listing submissions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListSubmissionsQuery {
    pub kind: Option<SubmissionKind>,
    pub status: Option<SubmissionStatus>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Response for the submission list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListSubmissionsResponse {
    pub data: Vec<Submission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Response returned to the visitor after submitting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub kind: SubmissionKind,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[test]
    fn test_kind_round_trip_through_db_strings() {
        for kind in [
            SubmissionKind::Startup,
            SubmissionKind::Speaker,
            SubmissionKind::Sponsor,
            SubmissionKind::Investor,
            SubmissionKind::Contact,
        ] {
            assert_eq!(SubmissionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SubmissionKind::parse("volunteer"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(SubmissionStatus::parse("accepted"), Some(SubmissionStatus::Accepted));
        assert_eq!(SubmissionStatus::parse("ACCEPTED"), None);
    }

    #[test]
    fn test_create_request_validation() {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let request = CreateSubmissionRequest {
            name,
            email,
            organization: Some("Acme Robotics".into()),
            message: Some("We'd love to pitch.".into()),
            details: None,
        };
        assert!(request.validate().is_ok());

        let bad_email = CreateSubmissionRequest {
            email: "not-an-email".into(),
            ..request.clone()
        };
        assert!(bad_email.validate().is_err());

        let no_name = CreateSubmissionRequest {
            name: String::new(),
            ..request
        };
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_list_query_deserializes_enums() {
        let query: ListSubmissionsQuery =
            serde_json::from_str(r#"{"kind":"speaker","status":"new","limit":10}"#).unwrap();
        assert_eq!(query.kind, Some(SubmissionKind::Speaker));
        assert_eq!(query.status, Some(SubmissionStatus::New));
        assert_eq!(query.limit, Some(10));
    }
}
