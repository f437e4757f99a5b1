pub mod join_requests;
pub mod projects;
pub mod teams;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Projects
        .route("/api/v1/projects", post(projects::create))
        .route("/api/v1/projects/mine", get(projects::mine))
        .route("/api/v1/projects/{id}", get(projects::get))
        .route("/api/v1/projects/{id}/status", put(projects::update_status))
        .route("/api/v1/projects/{id}/members", get(projects::members))
        .route("/api/v1/projects/{id}/join", post(projects::join))
        .route(
            "/api/v1/projects/{id}/popularity",
            post(projects::adjust_popularity),
        )
        .route("/api/v1/projects/{id}/activity", get(projects::activity))
        // Join requests
        .route(
            "/api/v1/projects/{id}/join-requests",
            get(join_requests::list_by_project).post(join_requests::create),
        )
        .route("/api/v1/join-requests/{id}", get(join_requests::get))
        .route(
            "/api/v1/join-requests/{id}/approve",
            post(join_requests::approve),
        )
        .route("/api/v1/join-requests/{id}/deny", post(join_requests::deny))
        // Team members
        .route(
            "/api/v1/teams/{id}/members",
            get(teams::list_members).post(teams::add_member),
        )
        .route(
            "/api/v1/teams/{id}/members/{user_id}",
            put(teams::update_member_role).delete(teams::remove_member),
        )
}
