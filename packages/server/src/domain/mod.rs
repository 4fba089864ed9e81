//! ドメイン層
//!
//! 位置共有サーバーの値オブジェクト・エンティティと、
//! Infrastructure 層が実装するインターフェース（trait）を定義します。

mod connection;
mod group;
mod location;
mod pusher;
mod registry;
mod repository;
mod timestamp;

pub use connection::{ConnectionId, Session, SessionError};
pub use group::{GroupId, GroupIdError};
pub use location::{Location, LocationError};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::GroupRegistry;
pub use repository::SessionRepository;
pub use timestamp::Timestamp;

#[cfg(test)]
pub use pusher::MockMessagePusher;
