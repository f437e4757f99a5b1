use uuid::Uuid;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO project_owners (project_id, user_id) VALUES ($1, $2)")
        .bind(project_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn is_owner<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM project_owners WHERE project_id = $1 AND user_id = $2)",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn find_owner<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM project_owners WHERE project_id = $1")
        .bind(project_id)
        .fetch_optional(executor)
        .await
}
