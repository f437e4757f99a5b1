use sqlx::PgConnection;
use uuid::Uuid;

use crate::db;
use crate::db::team_members::TEAM_USER_UNIQUE;
use crate::error::AppError;
use crate::models::{MemberRole, TeamMember};

// No authorization here: callers decide who may reach these.

pub async fn add_member(
    conn: &mut PgConnection,
    team_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<TeamMember, AppError> {
    if db::teams::find_by_id(&mut *conn, team_id).await?.is_none() {
        return Err(AppError::not_found("Team"));
    }
    if !db::users::exists(&mut *conn, user_id).await? {
        return Err(AppError::not_found("User"));
    }
    if db::team_members::exists(&mut *conn, team_id, user_id).await? {
        return Err(AppError::AlreadyMember);
    }

    // A concurrent insert can still win between the check and here; the
    // unique constraint turns that into the same typed error.
    db::team_members::insert(&mut *conn, team_id, user_id, role)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e, TEAM_USER_UNIQUE) {
                AppError::AlreadyMember
            } else if db::is_foreign_key_violation(&e) {
                AppError::NotFound("Team or user not found".to_string())
            } else {
                AppError::Database(e)
            }
        })
}

pub async fn remove_member(
    conn: &mut PgConnection,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    match db::team_members::delete(&mut *conn, team_id, user_id).await? {
        0 => Err(AppError::not_found("Team member")),
        _ => Ok(()),
    }
}

pub async fn update_role(
    conn: &mut PgConnection,
    team_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<TeamMember, AppError> {
    db::team_members::update_role(&mut *conn, team_id, user_id, role)
        .await?
        .ok_or_else(|| AppError::not_found("Team member"))
}
