use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::membership::projects;
use crate::middleware::audit;
use crate::models::{MemberRole, TeamMember, TeamMemberDetail};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AddMember {
    pub user_id: Uuid,
    pub role: Option<MemberRole>,
}

#[derive(Deserialize)]
pub struct UpdateMemberRole {
    pub role: MemberRole,
}

pub async fn list_members(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<TeamMemberDetail>>, AppError> {
    let members = projects::list_team_members(&state.store, team_id).await?;
    Ok(Json(members))
}

pub async fn add_member(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<AddMember>,
) -> Result<Json<TeamMember>, AppError> {
    let role = req.role.unwrap_or(MemberRole::Member);
    let member = state
        .members
        .add_member(auth.user_id, team_id, req.user_id, role)
        .await?;

    audit::log_event(
        state.store.pool(),
        project_of(&state, team_id).await,
        auth.user_id,
        "member.added",
        "team_member",
        Some(member.id),
        Some(serde_json::json!({ "user_id": member.user_id, "role": role })),
    )
    .await;

    Ok(Json(member))
}

pub async fn update_member_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateMemberRole>,
) -> Result<Json<TeamMember>, AppError> {
    let member = state
        .members
        .update_role(auth.user_id, team_id, user_id, req.role)
        .await?;

    audit::log_event(
        state.store.pool(),
        project_of(&state, team_id).await,
        auth.user_id,
        "member.role_updated",
        "team_member",
        Some(member.id),
        Some(serde_json::json!({ "user_id": user_id, "new_role": req.role })),
    )
    .await;

    Ok(Json(member))
}

pub async fn remove_member(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .members
        .remove_member(auth.user_id, team_id, user_id)
        .await?;

    audit::log_event(
        state.store.pool(),
        project_of(&state, team_id).await,
        auth.user_id,
        "member.removed",
        "team_member",
        None,
        Some(serde_json::json!({ "user_id": user_id })),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Removed" })))
}

async fn project_of(state: &SharedState, team_id: Uuid) -> Option<Uuid> {
    match db::teams::find_by_id(state.store.pool(), team_id).await {
        Ok(team) => team.map(|t| t.project_id),
        Err(e) => {
            tracing::warn!("Could not resolve project for team {team_id}: {e}");
            None
        }
    }
}
