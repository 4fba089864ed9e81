//! UseCase: グループ一覧取得処理

use std::sync::Arc;

use crate::domain::{GroupId, GroupRegistry};

/// グループ一覧取得のユースケース
pub struct GetGroupsUseCase {
    /// Registry（グループメンバーシップの抽象化）
    registry: Arc<dyn GroupRegistry>,
}

impl GetGroupsUseCase {
    /// 新しい GetGroupsUseCase を作成
    pub fn new(registry: Arc<dyn GroupRegistry>) -> Self {
        Self { registry }
    }

    /// 存在する全グループの (GroupId, メンバー数) 一覧を取得
    pub async fn execute(&self) -> Vec<(GroupId, usize)> {
        self.registry.group_summaries().await
    }
}
