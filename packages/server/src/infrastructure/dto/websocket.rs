//! WebSocket メッセージの DTO
//!
//! ## ワイヤフォーマット
//!
//! 受信（クライアント → サーバー）: 1 フレームにつき 1 つの JSON オブジェクト
//!
//! ```json
//! { "name": "alice", "latitude": 35.6812, "longitude": 139.7671 }
//! ```
//!
//! 送信（サーバー → グループ全メンバー）: JSON 配列。位置が既知のメンバー
//! だけが含まれ、未報告のメンバーは省略されます。
//!
//! ```json
//! [ { "name": "alice", "latitude": 35.6812, "longitude": 139.7671 } ]
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// 受信する位置報告メッセージ
#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdateDto {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// 送信するスナップショットの1エントリ
#[derive(Debug, Clone, Serialize)]
pub struct LocationEntryDto {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for LocationEntryDto {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name().to_string(),
            latitude: location.latitude(),
            longitude: location.longitude(),
        }
    }
}
