use std::sync::Arc;

use crate::config::Config;
use crate::db::MembershipStore;
use crate::membership::{DirectJoinPath, JoinRequestWorkflow, MembershipMutator};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: MembershipStore,
    pub config: Config,
    pub direct_join: DirectJoinPath,
    pub join_requests: JoinRequestWorkflow,
    pub members: MembershipMutator,
}

impl AppState {
    pub fn new(store: MembershipStore, config: Config) -> Self {
        Self {
            direct_join: DirectJoinPath::new(store.clone()),
            join_requests: JoinRequestWorkflow::new(store.clone(), config.approval_capacity),
            members: MembershipMutator::new(store.clone(), config.member_mutation),
            store,
            config,
        }
    }
}
