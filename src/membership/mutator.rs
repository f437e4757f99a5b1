use sqlx::PgConnection;
use uuid::Uuid;

use crate::db::{self, MembershipStore};
use crate::error::AppError;
use crate::membership::{authz, team_members};
use crate::models::{MemberRole, TeamMember};

/// Who may mutate a team's membership through a given entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPolicy {
    /// Any authenticated actor.
    Unrestricted,
    /// Only the owner of the team's project.
    OwnerOnly,
}

impl std::str::FromStr for MutationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unrestricted" => Ok(MutationPolicy::Unrestricted),
            "owner_only" => Ok(MutationPolicy::OwnerOnly),
            other => Err(format!(
                "Invalid TEAMROSTER_MEMBER_MUTATION '{other}': expected 'unrestricted' or 'owner_only'"
            )),
        }
    }
}

/// The single gate every membership mutation goes through. Each call site
/// constructs it with an explicit policy.
#[derive(Clone)]
pub struct MembershipMutator {
    store: MembershipStore,
    policy: MutationPolicy,
}

impl MembershipMutator {
    pub fn new(store: MembershipStore, policy: MutationPolicy) -> Self {
        Self { store, policy }
    }

    /// Enforce the policy for a project-scoped mutation inside the caller's
    /// transaction.
    pub async fn authorize_project(
        &self,
        conn: &mut PgConnection,
        project_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), AppError> {
        authorize(self.policy, conn, project_id, actor_id).await
    }

    pub async fn add_member(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<TeamMember, AppError> {
        let policy = self.policy;
        let member = self
            .store
            .transaction(move |conn| {
                Box::pin(async move {
                    authorize_team(policy, conn, team_id, actor_id).await?;
                    team_members::add_member(conn, team_id, user_id, role).await
                })
            })
            .await?;

        tracing::info!("User {user_id} added to team {team_id} as {role} by {actor_id}");
        Ok(member)
    }

    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let policy = self.policy;
        self.store
            .transaction(move |conn| {
                Box::pin(async move {
                    authorize_team(policy, conn, team_id, actor_id).await?;
                    team_members::remove_member(conn, team_id, user_id).await
                })
            })
            .await?;

        tracing::info!("User {user_id} removed from team {team_id} by {actor_id}");
        Ok(())
    }

    pub async fn update_role(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<TeamMember, AppError> {
        let policy = self.policy;
        let member = self
            .store
            .transaction(move |conn| {
                Box::pin(async move {
                    authorize_team(policy, conn, team_id, actor_id).await?;
                    team_members::update_role(conn, team_id, user_id, role).await
                })
            })
            .await?;

        tracing::info!("User {user_id} in team {team_id} now {role}, changed by {actor_id}");
        Ok(member)
    }
}

async fn authorize(
    policy: MutationPolicy,
    conn: &mut PgConnection,
    project_id: Uuid,
    actor_id: Uuid,
) -> Result<(), AppError> {
    match policy {
        MutationPolicy::Unrestricted => Ok(()),
        MutationPolicy::OwnerOnly => authz::require_owner(conn, project_id, actor_id).await,
    }
}

async fn authorize_team(
    policy: MutationPolicy,
    conn: &mut PgConnection,
    team_id: Uuid,
    actor_id: Uuid,
) -> Result<(), AppError> {
    if policy == MutationPolicy::Unrestricted {
        return Ok(());
    }
    let team = db::teams::find_by_id(&mut *conn, team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team"))?;
    authorize(policy, conn, team.project_id, actor_id).await
}
