use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "join_request_status", rename_all = "lowercase")]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    /// Approved and Rejected have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JoinRequestStatus::Pending)
    }

    pub fn can_transition_to(self, next: JoinRequestStatus) -> bool {
        self == JoinRequestStatus::Pending && next.is_terminal()
    }
}

impl std::fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinRequestStatus::Pending => write!(f, "pending"),
            JoinRequestStatus::Approved => write!(f, "approved"),
            JoinRequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
