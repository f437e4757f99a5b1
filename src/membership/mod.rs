//! Membership lifecycle: direct capacity-gated joins, the owner-approved join
//! request workflow, and the team-member mutation surface.
//!
//! Every multi-row change runs in exactly one [`MembershipStore`] transaction.
//! The leaf modules (`authz`, `capacity`, `team_members`) take a bare
//! `&mut PgConnection` so they compose inside a caller's transaction.
//!
//! [`MembershipStore`]: crate::db::MembershipStore

pub mod authz;
pub mod capacity;
pub mod direct_join;
pub mod join_requests;
pub mod mutator;
pub mod projects;
pub mod team_members;

pub use direct_join::DirectJoinPath;
pub use join_requests::JoinRequestWorkflow;
pub use mutator::{MembershipMutator, MutationPolicy};
