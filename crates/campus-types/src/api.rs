use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Achievement, Channel, Committee, FeedbackTarget, Task, User};

// -- Outcomes --

/// Result of an operation that can be refused by a business rule.
/// Refusals are values, not errors: callers branch on `success` and show
/// `message` to the user as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    pub fn accepted(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// [`Outcome`] of a login, signup or profile update, with the account under
/// `user` where the portal pages read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl From<Outcome<User>> for AccountOutcome {
    fn from(outcome: Outcome<User>) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            user: outcome.data,
        }
    }
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSignup {
    pub full_name: String,
    pub sap_id: String,
    pub branch: String,
    pub year: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySignup {
    pub full_name: String,
    pub branch: String,
    pub phone: String,
    pub designation: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeSignup {
    pub name: String,
    pub branch: String,
    pub description: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    pub password: String,
}

// -- Tasks & applications --

/// A task joined with the display name of whoever posted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListing {
    #[serde(flatten)]
    pub task: Task,
    pub posted_by_name: String,
    /// Only set by the explorer view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub student_id: String,
    pub task_id: String,
    pub motivation: String,
    #[serde(default)]
    pub use_profile_resume: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveRequest {
    pub student_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

// -- Achievements --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementListing {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub student_name: String,
    pub student_branch: String,
}

// -- Feedback --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTargets {
    pub committees: Vec<Committee>,
    pub faculty: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub student_id: String,
    pub target_id: String,
    pub target_type: FeedbackTarget,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

// -- Chat --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatData {
    pub channels: Vec<Channel>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Faculty;
    use serde_json::json;

    #[test]
    fn account_outcome_carries_the_user_under_user() {
        let user = User::Faculty(Faculty {
            id: "faculty-x".to_string(),
            email: "x@campus.edu".to_string(),
            password: "pw".to_string(),
            full_name: "Dr. X".to_string(),
            branch: String::new(),
            phone: String::new(),
            designation: String::new(),
            extra: Default::default(),
        });

        let body = serde_json::to_value(AccountOutcome::from(Outcome::accepted("ok", user)))
            .unwrap();
        assert_eq!(body["user"]["id"], json!("faculty-x"));
        assert!(body.get("data").is_none());

        let refused = AccountOutcome::from(Outcome::<User>::refused("no"));
        let refused = serde_json::to_value(refused).unwrap();
        assert!(refused.get("user").is_none());
    }
}
