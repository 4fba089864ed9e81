//! UseCase 層
//!
//! アプリケーションのビジネスロジック。各 UseCase はドメイン層の trait
//! （Registry / Repository / MessagePusher）に依存し、Infrastructure 層の
//! 具体的な実装には依存しません。

mod error;
mod get_groups;
mod join_group;
mod leave_group;
mod reap_stale_sessions;
mod update_location;

pub use error::UpdateLocationError;
pub use get_groups::GetGroupsUseCase;
pub use join_group::JoinGroupUseCase;
pub use leave_group::LeaveGroupUseCase;
pub use reap_stale_sessions::ReapStaleSessionsUseCase;
pub use update_location::{GroupSnapshot, UpdateLocationUseCase};
