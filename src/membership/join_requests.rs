use sqlx::PgConnection;
use uuid::Uuid;

use crate::config::ApprovalCapacity;
use crate::db::join_requests::PROJECT_USER_UNIQUE;
use crate::db::{self, MembershipStore};
use crate::error::AppError;
use crate::membership::mutator::{MembershipMutator, MutationPolicy};
use crate::membership::{capacity, team_members};
use crate::models::{JoinRequest, JoinRequestStatus, MemberRole};

/// Deferred membership: a user asks, the project owner approves or denies.
///
/// `Pending` is the only non-terminal state. Resolving an already resolved
/// request fails with [`AppError::RequestAlreadyResolved`] and changes nothing.
#[derive(Clone)]
pub struct JoinRequestWorkflow {
    store: MembershipStore,
    gate: MembershipMutator,
    approval_capacity: ApprovalCapacity,
}

impl JoinRequestWorkflow {
    pub fn new(store: MembershipStore, approval_capacity: ApprovalCapacity) -> Self {
        let gate = MembershipMutator::new(store.clone(), MutationPolicy::OwnerOnly);
        Self {
            store,
            gate,
            approval_capacity,
        }
    }

    /// Open a `Pending` request. Capacity is not consulted here.
    pub async fn create(&self, project_id: Uuid, user_id: Uuid) -> Result<JoinRequest, AppError> {
        let request = self
            .store
            .transaction(move |conn| {
                Box::pin(async move {
                    if !db::projects::exists(&mut *conn, project_id).await? {
                        return Err(AppError::not_found("Project"));
                    }
                    if !db::users::exists(&mut *conn, user_id).await? {
                        return Err(AppError::not_found("User"));
                    }
                    // Any earlier request blocks a new one, whatever its status.
                    if db::join_requests::exists_for(&mut *conn, project_id, user_id).await? {
                        return Err(AppError::DuplicateRequest);
                    }

                    db::join_requests::create(&mut *conn, project_id, user_id)
                        .await
                        .map_err(|e| {
                            if db::is_unique_violation(&e, PROJECT_USER_UNIQUE) {
                                AppError::DuplicateRequest
                            } else if db::is_foreign_key_violation(&e) {
                                AppError::NotFound("Project or user not found".to_string())
                            } else {
                                AppError::Database(e)
                            }
                        })
                })
            })
            .await?;

        tracing::info!(
            "Join request {} created for user {user_id} on project {project_id}",
            request.id
        );
        Ok(request)
    }

    pub async fn approve(&self, request_id: Uuid, actor_id: Uuid) -> Result<JoinRequest, AppError> {
        self.resolve(request_id, actor_id, JoinRequestStatus::Approved)
            .await
    }

    pub async fn deny(&self, request_id: Uuid, actor_id: Uuid) -> Result<JoinRequest, AppError> {
        self.resolve(request_id, actor_id, JoinRequestStatus::Rejected)
            .await
    }

    async fn resolve(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        next: JoinRequestStatus,
    ) -> Result<JoinRequest, AppError> {
        let gate = self.gate.clone();
        let approval_capacity = self.approval_capacity;

        self.store
            .transaction(move |conn| {
                Box::pin(async move {
                    let request = db::join_requests::find_by_id_for_update(&mut *conn, request_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Join request"))?;

                    gate.authorize_project(conn, request.project_id, actor_id)
                        .await?;

                    if !request.status.can_transition_to(next) {
                        tracing::debug!(
                            "Join request {request_id} is already {}, refusing {next}",
                            request.status
                        );
                        return Err(AppError::RequestAlreadyResolved);
                    }

                    db::join_requests::set_status(&mut *conn, request_id, next).await?;

                    if next == JoinRequestStatus::Approved {
                        admit(conn, &request, approval_capacity).await?;
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::info!("Join request {request_id} {next} by {actor_id}");

        self.get(request_id).await
    }

    pub async fn get(&self, request_id: Uuid) -> Result<JoinRequest, AppError> {
        self.store
            .with_deadline(async {
                db::join_requests::find_by_id(self.store.pool(), request_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Join request"))
            })
            .await
    }

    pub async fn get_for(&self, project_id: Uuid, user_id: Uuid) -> Result<JoinRequest, AppError> {
        self.store
            .with_deadline(async {
                db::join_requests::find_by_project_and_user(self.store.pool(), project_id, user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Join request"))
            })
            .await
    }

    /// All requests for a project, newest first. Owner only.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Vec<JoinRequest>, AppError> {
        let pool = self.store.pool();
        self.store
            .with_deadline(async {
                if !db::projects::exists(pool, project_id).await? {
                    return Err(AppError::not_found("Project"));
                }
                crate::membership::authz::require_owner(pool, project_id, actor_id).await?;
                Ok(db::join_requests::list_by_project(pool, project_id).await?)
            })
            .await
    }
}

/// Insert the requester into the project's team, consuming a slot when the
/// approval policy says so.
async fn admit(
    conn: &mut PgConnection,
    request: &JoinRequest,
    approval_capacity: ApprovalCapacity,
) -> Result<(), AppError> {
    let team_id = match approval_capacity {
        ApprovalCapacity::Consume => capacity::reserve(&mut *conn, request.project_id).await?.team_id,
        ApprovalCapacity::Untouched => {
            db::teams::find_by_project(&mut *conn, request.project_id)
                .await?
                .ok_or_else(|| AppError::not_found("Team"))?
                .id
        }
    };

    team_members::add_member(&mut *conn, team_id, request.user_id, MemberRole::Member).await?;

    if approval_capacity == ApprovalCapacity::Consume {
        capacity::decrement_open_position(&mut *conn, request.project_id).await?;
    }
    Ok(())
}
