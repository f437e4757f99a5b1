use uuid::Uuid;

use crate::models::{JoinRequest, JoinRequestStatus};

pub const PROJECT_USER_UNIQUE: &str = "join_requests_project_user_key";

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<JoinRequest, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>(
        "INSERT INTO join_requests (project_id, user_id, status)
         VALUES ($1, $2, 'pending') RETURNING *",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<JoinRequest>, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>("SELECT * FROM join_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Same as `find_by_id` but holds a row lock until the transaction ends, so two
/// concurrent resolutions of one request serialize.
pub async fn find_by_id_for_update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<JoinRequest>, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>("SELECT * FROM join_requests WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_project_and_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Option<JoinRequest>, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>(
        "SELECT * FROM join_requests WHERE project_id = $1 AND user_id = $2",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists_for<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM join_requests WHERE project_id = $1 AND user_id = $2)",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn list_by_project<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<Vec<JoinRequest>, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>(
        "SELECT * FROM join_requests WHERE project_id = $1 ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(executor)
    .await
}

pub async fn set_status<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: JoinRequestStatus,
) -> Result<JoinRequest, sqlx::Error> {
    sqlx::query_as::<_, JoinRequest>(
        "UPDATE join_requests SET status = $2, resolved_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(executor)
    .await
}
