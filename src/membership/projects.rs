use uuid::Uuid;

use crate::db::{self, MembershipStore};
use crate::error::AppError;
use crate::membership::{authz, capacity};
use crate::models::{MemberRole, Project, ProjectStatus, Team, TeamMemberDetail};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub open_positions: i32,
}

/// Project row plus the team it owns.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectWithTeam {
    #[serde(flatten)]
    pub project: Project,
    pub team_id: Uuid,
    pub owner_id: Uuid,
}

/// Create a project, its ownership mapping, its team, and the owner's `Owner`
/// membership row in one transaction.
pub async fn create_project(
    store: &MembershipStore,
    owner_id: Uuid,
    input: NewProject,
) -> Result<ProjectWithTeam, AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    if input.open_positions < 0 {
        return Err(AppError::BadRequest(
            "open_positions must not be negative".to_string(),
        ));
    }

    let created = store
        .transaction(move |conn| {
            Box::pin(async move {
                if !db::users::exists(&mut *conn, owner_id).await? {
                    return Err(AppError::not_found("User"));
                }

                let project = db::projects::create(
                    &mut *conn,
                    &input.title,
                    &input.description,
                    input.open_positions,
                )
                .await?;
                db::project_owners::create(&mut *conn, project.id, owner_id).await?;

                let team_name = format!("{} Team", project.title);
                let team: Team = db::teams::create(&mut *conn, project.id, &team_name).await?;
                db::team_members::insert(&mut *conn, team.id, owner_id, MemberRole::Owner).await?;

                Ok(ProjectWithTeam {
                    project,
                    team_id: team.id,
                    owner_id,
                })
            })
        })
        .await?;

    tracing::info!(
        "Project {} created by {owner_id} with {} open positions",
        created.project.id,
        created.project.open_positions
    );
    Ok(created)
}

pub async fn get_project(store: &MembershipStore, id: Uuid) -> Result<ProjectWithTeam, AppError> {
    let pool = store.pool();
    store
        .with_deadline(async {
            let project = db::projects::find_by_id(pool, id)
                .await?
                .ok_or_else(|| AppError::not_found("Project"))?;
            let team = db::teams::find_by_project(pool, id)
                .await?
                .ok_or_else(|| AppError::not_found("Team"))?;
            let owner_id = db::project_owners::find_owner(pool, id)
                .await?
                .ok_or_else(|| AppError::not_found("Project owner"))?;
            Ok(ProjectWithTeam {
                project,
                team_id: team.id,
                owner_id,
            })
        })
        .await
}

pub async fn list_owned_projects(
    store: &MembershipStore,
    owner_id: Uuid,
) -> Result<Vec<Project>, AppError> {
    store
        .with_deadline(async { Ok(db::projects::list_by_owner(store.pool(), owner_id).await?) })
        .await
}

/// Move a project to `status`. Owner only.
pub async fn update_status(
    store: &MembershipStore,
    project_id: Uuid,
    actor_id: Uuid,
    status: ProjectStatus,
) -> Result<Project, AppError> {
    let project = store
        .transaction(move |conn| {
            Box::pin(async move {
                if !db::projects::exists(&mut *conn, project_id).await? {
                    return Err(AppError::not_found("Project"));
                }
                authz::require_owner(&mut *conn, project_id, actor_id).await?;
                db::projects::update_status(&mut *conn, project_id, status)
                    .await?
                    .ok_or_else(|| AppError::not_found("Project"))
            })
        })
        .await?;

    tracing::info!("Project {project_id} status set to {status:?} by {actor_id}");
    Ok(project)
}

pub async fn list_project_members(
    store: &MembershipStore,
    project_id: Uuid,
) -> Result<Vec<TeamMemberDetail>, AppError> {
    let pool = store.pool();
    store
        .with_deadline(async {
            if !db::projects::exists(pool, project_id).await? {
                return Err(AppError::not_found("Project"));
            }
            Ok(db::team_members::list_by_project(pool, project_id).await?)
        })
        .await
}

pub async fn list_team_members(
    store: &MembershipStore,
    team_id: Uuid,
) -> Result<Vec<TeamMemberDetail>, AppError> {
    let pool = store.pool();
    store
        .with_deadline(async {
            if db::teams::find_by_id(pool, team_id).await?.is_none() {
                return Err(AppError::not_found("Team"));
            }
            Ok(db::team_members::list_by_team(pool, team_id).await?)
        })
        .await
}

pub async fn adjust_popularity(
    store: &MembershipStore,
    project_id: Uuid,
    delta: i32,
) -> Result<i32, AppError> {
    let popularity = store
        .with_deadline(capacity::adjust_popularity(store.pool(), project_id, delta))
        .await?;
    tracing::debug!("Project {project_id} popularity now {popularity}");
    Ok(popularity)
}
