use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::ProjectSlot;

/// Read the project's open positions and team, taking a row lock on the
/// project for the rest of the transaction. Does not mutate anything.
///
/// `None` means the project (or its team) does not exist; a slot with
/// `open_positions <= 0` means capacity is exhausted.
pub async fn try_consume_open_position<'e, E: PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<Option<ProjectSlot>, AppError> {
    Ok(db::projects::lock_slot(executor, project_id).await?)
}

/// Lock the project and require at least one open position.
pub async fn reserve(conn: &mut PgConnection, project_id: Uuid) -> Result<ProjectSlot, AppError> {
    let slot = try_consume_open_position(&mut *conn, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project"))?;

    if !slot.has_capacity() {
        tracing::debug!("Project {project_id} has no open positions");
        return Err(AppError::NoOpenPositions);
    }
    Ok(slot)
}

/// Decrement-if-positive. Must run in the same transaction as the membership
/// insert it pays for.
pub async fn decrement_open_position<'e, E: PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<(), AppError> {
    match db::projects::decrement_open_position(executor, project_id).await? {
        0 => Err(AppError::NoOpenPositions),
        _ => Ok(()),
    }
}

/// Apply a popularity delta; downward moves clamp at zero.
pub async fn adjust_popularity<'e, E: PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    delta: i32,
) -> Result<i32, AppError> {
    db::projects::adjust_popularity(executor, project_id, delta)
        .await?
        .ok_or_else(|| AppError::not_found("Project"))
}
