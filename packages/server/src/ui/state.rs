//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    GetGroupsUseCase, JoinGroupUseCase, LeaveGroupUseCase, UpdateLocationUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinGroupUseCase（グループ参加のユースケース）
    pub join_group_usecase: Arc<JoinGroupUseCase>,
    /// UpdateLocationUseCase（位置更新のユースケース）
    pub update_location_usecase: Arc<UpdateLocationUseCase>,
    /// LeaveGroupUseCase（グループ離脱のユースケース）
    pub leave_group_usecase: Arc<LeaveGroupUseCase>,
    /// GetGroupsUseCase（グループ一覧取得のユースケース）
    pub get_groups_usecase: Arc<GetGroupsUseCase>,
}
