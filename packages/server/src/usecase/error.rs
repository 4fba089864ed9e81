//! UseCase 層のエラー定義

use thiserror::Error;

/// 位置更新処理のエラー
#[derive(Debug, Error, PartialEq)]
pub enum UpdateLocationError {
    /// 接続がセッションとして登録されていない
    /// （Reaper に先にクローズされた直後など）
    #[error("connection '{0}' has no active session")]
    SessionNotFound(String),
}
