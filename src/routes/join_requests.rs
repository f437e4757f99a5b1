use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::JoinRequest;
use crate::state::SharedState;

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<Uuid>,
) -> Result<(StatusCode, Json<JoinRequest>), AppError> {
    let request = state.join_requests.create(project_id, auth.user_id).await?;

    audit::log_event(
        state.store.pool(),
        Some(project_id),
        auth.user_id,
        "join_request.created",
        "join_request",
        Some(request.id),
        None,
    )
    .await;

    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_by_project(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<JoinRequest>>, AppError> {
    let requests = state
        .join_requests
        .list_for_project(project_id, auth.user_id)
        .await?;
    Ok(Json(requests))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JoinRequest>, AppError> {
    let request = state.join_requests.get(id).await?;
    Ok(Json(request))
}

pub async fn approve(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JoinRequest>, AppError> {
    let request = state.join_requests.approve(id, auth.user_id).await?;

    audit::log_event(
        state.store.pool(),
        Some(request.project_id),
        auth.user_id,
        "join_request.approved",
        "join_request",
        Some(request.id),
        Some(serde_json::json!({ "user_id": request.user_id })),
    )
    .await;

    Ok(Json(request))
}

pub async fn deny(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JoinRequest>, AppError> {
    let request = state.join_requests.deny(id, auth.user_id).await?;

    audit::log_event(
        state.store.pool(),
        Some(request.project_id),
        auth.user_id,
        "join_request.rejected",
        "join_request",
        Some(request.id),
        Some(serde_json::json!({ "user_id": request.user_id })),
    )
    .await;

    Ok(Json(request))
}
