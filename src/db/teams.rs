use uuid::Uuid;

use crate::models::Team;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    name: &str,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>("INSERT INTO teams (project_id, name) VALUES ($1, $2) RETURNING *")
        .bind(project_id)
        .bind(name)
        .fetch_one(executor)
        .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_project<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE project_id = $1")
        .bind(project_id)
        .fetch_optional(executor)
        .await
}
