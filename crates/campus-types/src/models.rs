//! Records are stored exactly as the portal frontend reads them: camelCase
//! JSON, one array per collection. Unknown user fields survive a load/save
//! cycle through the `extra` maps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// -- Users --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum User {
    Student(Student),
    Faculty(Faculty),
    Committee(CommitteeAccount),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub email: String,
    pub password: String,
    /// Older records carry `name` instead.
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub sap_id: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub phone: String,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,
    pub email: String,
    pub password: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub designation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Login account of a committee. Distinct from the [`Committee`] catalog
/// entry, which carries the public listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeAccount {
    pub id: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Committee,
}

impl User {
    pub fn id(&self) -> &str {
        match self {
            Self::Student(s) => &s.id,
            Self::Faculty(f) => &f.id,
            Self::Committee(c) => &c.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Student(s) => &s.email,
            Self::Faculty(f) => &f.email,
            Self::Committee(c) => &c.email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            Self::Student(s) => &s.password,
            Self::Faculty(f) => &f.password,
            Self::Committee(c) => &c.password,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Faculty(_) => Role::Faculty,
            Self::Committee(_) => Role::Committee,
        }
    }

    /// Name shown next to anything this user posted or wrote.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Student(s) => &s.full_name,
            Self::Faculty(f) => &f.full_name,
            Self::Committee(c) => &c.name,
        }
    }

    pub fn branch(&self) -> &str {
        match self {
            Self::Student(s) => &s.branch,
            Self::Faculty(f) => &f.branch,
            Self::Committee(c) => &c.branch,
        }
    }

    /// Only students carry a SAP id.
    pub fn sap_id(&self) -> Option<&str> {
        match self {
            Self::Student(s) => Some(&s.sap_id),
            _ => None,
        }
    }
}

// -- Committees --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Committee {
    pub id: String,
    pub name: String,
    pub branch: String,
    pub description: String,
    #[serde(default)]
    pub core_members: Vec<CoreMember>,
    pub faculty_coordinator_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMember {
    pub name: String,
    pub role: String,
}

// -- Tasks --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// A user id or a committee id; nothing in the record says which.
    pub posted_by: String,
    pub task_type: String,
    pub slots: u32,
    pub eligibility: Eligibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(default)]
    pub years: Vec<String>,
    #[serde(default)]
    pub min_cgpa: f64,
}

// -- Applications & sick leave --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    Profile,
    ManualUpload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub student_id: String,
    pub task_id: String,
    pub motivation: String,
    pub resume_source: ResumeSource,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ReviewStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub id: String,
    pub student_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub proof_url: String,
    #[serde(default)]
    pub status: ReviewStatus,
    pub faculty_approver_id: String,
}

// -- Events --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: DateTime<Utc>,
    pub category: String,
    pub venue: String,
    pub slots: u32,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub committee_id: String,
    #[serde(default)]
    pub featured: bool,
}

// -- Chat --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Channel {
    Public(GroupChannel),
    Committee(GroupChannel),
    Dm(DirectChannel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectChannel {
    pub id: String,
    pub members: Vec<String>,
}

impl Channel {
    pub fn id(&self) -> &str {
        match self {
            Self::Public(c) | Self::Committee(c) => &c.id,
            Self::Dm(c) => &c.id,
        }
    }

    pub fn members(&self) -> &[String] {
        match self {
            Self::Public(c) | Self::Committee(c) => &c.members,
            Self::Dm(c) => &c.members,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// -- Achievements & feedback --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub student_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub approved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTarget {
    Committee,
    Faculty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub student_id: String,
    pub target_id: String,
    pub target_type: FeedbackTarget,
    pub rating: u8,
    pub comment: String,
    pub is_anonymous: bool,
    pub submitted_at: DateTime<Utc>,
}
