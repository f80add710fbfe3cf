use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::Profile;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    pub teacher_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Membership role. Exactly one teacher per classroom: the creator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Teacher,
    Student,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Membership {
    pub classroom_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// A membership row joined with its classroom, as returned when listing the
/// caller's classrooms.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MembershipWithClassroom {
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    pub classroom: Classroom,
}

/// A membership row joined with the member's profile, as returned when
/// listing a classroom's members.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemberRecord {
    pub user_id: Uuid,
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    pub profile: Option<Profile>,
}
