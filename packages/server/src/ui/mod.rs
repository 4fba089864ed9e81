//! UI 層
//!
//! axum による外部インターフェース（WebSocket / HTTP）とサーバーの
//! 実行ロジックを提供します。

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
