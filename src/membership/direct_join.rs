use uuid::Uuid;

use crate::db::MembershipStore;
use crate::error::AppError;
use crate::membership::{capacity, team_members};
use crate::models::{MemberRole, TeamMember};

/// Immediate self-join, gated only by the project's open positions.
#[derive(Clone)]
pub struct DirectJoinPath {
    store: MembershipStore,
}

impl DirectJoinPath {
    pub fn new(store: MembershipStore) -> Self {
        Self { store }
    }

    /// Check capacity, insert the member row and decrement `open_positions`,
    /// all in one transaction. The project row stays locked from the capacity
    /// read to commit, so concurrent joins for the same project serialize and
    /// the last slot is handed out once.
    pub async fn join(&self, project_id: Uuid, user_id: Uuid) -> Result<TeamMember, AppError> {
        let member = self
            .store
            .transaction(move |conn| {
                Box::pin(async move {
                    let slot = capacity::reserve(&mut *conn, project_id).await?;

                    // Fails with AlreadyMember before anything is written.
                    let member =
                        team_members::add_member(&mut *conn, slot.team_id, user_id, MemberRole::Member)
                            .await?;
                    capacity::decrement_open_position(&mut *conn, project_id).await?;
                    Ok::<_, AppError>(member)
                })
            })
            .await?;

        tracing::info!("User {user_id} joined project {project_id} directly");
        Ok(member)
    }
}
