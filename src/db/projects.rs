use uuid::Uuid;

use crate::models::{Project, ProjectSlot, ProjectStatus};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    title: &str,
    description: &str,
    open_positions: i32,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, open_positions)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(open_positions)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}

/// Projects owned by `user_id`, newest first.
pub async fn list_by_owner<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT p.* FROM projects p
         JOIN project_owners po ON po.project_id = p.id
         WHERE po.user_id = $1
         ORDER BY p.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn update_status<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: ProjectStatus,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(executor)
    .await
}

/// Read the project's team and open-position count, locking the project row
/// until the surrounding transaction ends.
pub async fn lock_slot<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<ProjectSlot>, sqlx::Error> {
    sqlx::query_as::<_, ProjectSlot>(
        "SELECT p.id AS project_id, t.id AS team_id, p.open_positions
         FROM projects p
         JOIN teams t ON t.project_id = p.id
         WHERE p.id = $1
         FOR UPDATE OF p",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Conditional decrement. Returns the number of rows changed (0 or 1).
pub async fn decrement_open_position<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE projects SET open_positions = open_positions - 1, updated_at = now()
         WHERE id = $1 AND open_positions > 0",
    )
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Add `delta` to popularity, clamped to `0..=i32::MAX`. `None` if the project is absent.
pub async fn adjust_popularity<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    delta: i32,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "UPDATE projects
         SET popularity = LEAST(GREATEST(popularity::bigint + $2, 0), 2147483647)::integer,
                updated_at = now()
         WHERE id = $1 RETURNING popularity",
    )
    .bind(id)
    .bind(i64::from(delta))
    .fetch_optional(executor)
    .await
}
