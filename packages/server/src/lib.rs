//! Live location sharing server library.
//!
//! Participants open a WebSocket connection tagged with a group identifier,
//! periodically report their position, and receive the latest known positions
//! of every other participant in the same group.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
