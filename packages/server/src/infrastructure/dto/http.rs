//! HTTP API レスポンスの DTO

use serde::Serialize;

/// グループ一覧のサマリ
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummaryDto {
    pub id: String,
    pub member_count: usize,
}
