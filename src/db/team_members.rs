use uuid::Uuid;

use crate::models::{MemberRole, TeamMember, TeamMemberDetail};

pub const TEAM_USER_UNIQUE: &str = "team_members_team_user_key";

pub async fn insert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<TeamMember, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        "INSERT INTO team_members (team_id, user_id, role, joined_at)
         VALUES ($1, $2, $3, now()) RETURNING *",
    )
    .bind(team_id)
    .bind(user_id)
    .bind(role)
    .fetch_one(executor)
    .await
}

pub async fn find<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        "SELECT * FROM team_members WHERE team_id = $1 AND user_id = $2",
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)",
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn update_role<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        "UPDATE team_members SET role = $3
         WHERE team_id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(team_id)
    .bind(user_id)
    .bind(role)
    .fetch_optional(executor)
    .await
}

/// Returns the number of rows deleted (0 or 1).
pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
        .bind(team_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_by_team<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
) -> Result<Vec<TeamMemberDetail>, sqlx::Error> {
    sqlx::query_as::<_, TeamMemberDetail>(
        "SELECT tm.id, tm.team_id, tm.user_id, u.username, tm.role, tm.joined_at
         FROM team_members tm
         JOIN users u ON u.id = tm.user_id
         WHERE tm.team_id = $1
         ORDER BY tm.joined_at ASC",
    )
    .bind(team_id)
    .fetch_all(executor)
    .await
}

pub async fn list_by_project<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<Vec<TeamMemberDetail>, sqlx::Error> {
    sqlx::query_as::<_, TeamMemberDetail>(
        "SELECT tm.id, tm.team_id, tm.user_id, u.username, tm.role, tm.joined_at
         FROM team_members tm
         JOIN teams t ON t.id = tm.team_id
         JOIN users u ON u.id = tm.user_id
         WHERE t.project_id = $1
         ORDER BY tm.joined_at ASC",
    )
    .bind(project_id)
    .fetch_all(executor)
    .await
}
