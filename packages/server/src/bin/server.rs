//! Live location sharing server.
//!
//! Participants connect over WebSocket with a group id, report their
//! position as JSON, and receive the latest known positions of every
//! member of the same group. Idle connections are closed by a periodic
//! background reaper.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin caravan-server
//! cargo run --bin caravan-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin caravan-server -- --cleanup-interval-secs 30 --idle-timeout-secs 120
//! ```

use std::{sync::Arc, time::Duration};

use caravan_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryGroupRegistry,
        repository::InMemorySessionRepository,
    },
    ui::Server,
    usecase::{
        GetGroupsUseCase, JoinGroupUseCase, LeaveGroupUseCase, ReapStaleSessionsUseCase,
        UpdateLocationUseCase,
    },
};
use caravan_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Live location sharing server with group broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds between idle-connection cleanup cycles
    #[arg(long, default_value = "30")]
    cleanup_interval_secs: u64,

    /// Seconds of inactivity after which a connection is closed
    /// (expected to exceed the cleanup interval)
    #[arg(long, default_value = "120")]
    idle_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry / Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Registry and Repository (in-memory)
    let registry = Arc::new(InMemoryGroupRegistry::new());
    let sessions = Arc::new(InMemorySessionRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // Clock for activity timestamps
    let clock = Arc::new(SystemClock);

    // 3. Create UseCases
    let join_group_usecase = Arc::new(JoinGroupUseCase::new(
        registry.clone(),
        sessions.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let update_location_usecase = Arc::new(UpdateLocationUseCase::new(
        registry.clone(),
        sessions.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let leave_group_usecase = Arc::new(LeaveGroupUseCase::new(
        registry.clone(),
        sessions.clone(),
        message_pusher.clone(),
    ));
    let get_groups_usecase = Arc::new(GetGroupsUseCase::new(registry.clone()));
    let reap_stale_sessions_usecase = Arc::new(ReapStaleSessionsUseCase::new(
        sessions.clone(),
        message_pusher.clone(),
        clock.clone(),
        Duration::from_secs(args.idle_timeout_secs),
    ));

    // 4. Create and run the server
    let server = Server::new(
        join_group_usecase,
        update_location_usecase,
        leave_group_usecase,
        get_groups_usecase,
        reap_stale_sessions_usecase,
        Duration::from_secs(args.cleanup_interval_secs),
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
