use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub open_positions: i32,
    pub popularity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Capacity view of a project: its team and the current open-position count.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct ProjectSlot {
    pub project_id: Uuid,
    pub team_id: Uuid,
    pub open_positions: i32,
}

impl ProjectSlot {
    pub fn has_capacity(&self) -> bool {
        self.open_positions > 0
    }
}
