use sqlx::PgExecutor;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;

/// Whether `user_id` owns `project_id`. A non-matching (or missing) mapping is
/// `Ok(false)`; only storage failures are errors.
pub async fn is_owner<'e, E: PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<bool, AppError> {
    Ok(db::project_owners::is_owner(executor, project_id, user_id).await?)
}

pub async fn require_owner<'e, E: PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    if is_owner(executor, project_id, user_id).await? {
        Ok(())
    } else {
        tracing::debug!("User {user_id} denied: not the owner of project {project_id}");
        Err(AppError::Unauthorized(
            "Only the project owner can perform this action".to_string(),
        ))
    }
}
