pub mod join_request;
pub mod project;
pub mod team;
pub mod team_member;
pub mod user;
pub mod audit_event;

pub use audit_event::AuditEvent;
pub use join_request::{JoinRequest, JoinRequestStatus};
pub use project::{Project, ProjectStatus, ProjectSlot};
pub use team::Team;
pub use team_member::{MemberRole, TeamMember, TeamMemberDetail};
pub use user::User;
