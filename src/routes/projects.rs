use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::membership::authz;
use crate::membership::projects::{self, NewProject, ProjectWithTeam};
use crate::middleware::audit;
use crate::models::{AuditEvent, Project, ProjectStatus, TeamMember, TeamMemberDetail};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub open_positions: i32,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: ProjectStatus,
}

#[derive(Deserialize)]
pub struct AdjustPopularity {
    pub delta: i32,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<Json<ProjectWithTeam>, AppError> {
    let created = projects::create_project(
        &state.store,
        auth.user_id,
        NewProject {
            title: req.title,
            description: req.description,
            open_positions: req.open_positions,
        },
    )
    .await?;

    audit::log_event(
        state.store.pool(),
        Some(created.project.id),
        auth.user_id,
        "project.created",
        "project",
        Some(created.project.id),
        None,
    )
    .await;

    Ok(Json(created))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectWithTeam>, AppError> {
    let project = projects::get_project(&state.store, id).await?;
    Ok(Json(project))
}

/// Projects owned by the caller.
pub async fn mine(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = projects::list_owned_projects(&state.store, auth.user_id).await?;
    Ok(Json(projects))
}

pub async fn update_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatus>,
) -> Result<Json<Project>, AppError> {
    let project = projects::update_status(&state.store, id, auth.user_id, req.status).await?;

    audit::log_event(
        state.store.pool(),
        Some(id),
        auth.user_id,
        "project.status_updated",
        "project",
        Some(id),
        Some(serde_json::json!({ "status": project.status })),
    )
    .await;

    Ok(Json(project))
}

pub async fn members(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TeamMemberDetail>>, AppError> {
    let members = projects::list_project_members(&state.store, id).await?;
    Ok(Json(members))
}

pub async fn join(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, AppError> {
    let member = state.direct_join.join(id, auth.user_id).await?;

    audit::log_event(
        state.store.pool(),
        Some(id),
        auth.user_id,
        "member.joined",
        "team_member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(member))
}

pub async fn adjust_popularity(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustPopularity>,
) -> Result<Json<serde_json::Value>, AppError> {
    let popularity = projects::adjust_popularity(&state.store, id, req.delta).await?;
    Ok(Json(serde_json::json!({ "popularity": popularity })))
}

/// Recent audit trail for a project. Owner only.
pub async fn activity(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditEvent>>, AppError> {
    let pool = state.store.pool();
    let events = state
        .store
        .with_deadline(async {
            if !db::projects::exists(pool, id).await? {
                return Err(AppError::NotFound("Project not found".to_string()));
            }
            authz::require_owner(pool, id, auth.user_id).await?;
            Ok(db::audit::list_by_project(pool, id, 100).await?)
        })
        .await?;
    Ok(Json(events))
}
