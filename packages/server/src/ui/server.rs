//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    GetGroupsUseCase, JoinGroupUseCase, LeaveGroupUseCase, ReapStaleSessionsUseCase,
    UpdateLocationUseCase,
};

use super::{
    handler::{
        http::{get_groups, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Live location sharing server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_group_usecase,
///     update_location_usecase,
///     leave_group_usecase,
///     get_groups_usecase,
///     reap_stale_sessions_usecase,
///     Duration::from_secs(30),
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinGroupUseCase（グループ参加のユースケース）
    join_group_usecase: Arc<JoinGroupUseCase>,
    /// UpdateLocationUseCase（位置更新のユースケース）
    update_location_usecase: Arc<UpdateLocationUseCase>,
    /// LeaveGroupUseCase（グループ離脱のユースケース）
    leave_group_usecase: Arc<LeaveGroupUseCase>,
    /// GetGroupsUseCase（グループ一覧取得のユースケース）
    get_groups_usecase: Arc<GetGroupsUseCase>,
    /// ReapStaleSessionsUseCase（アイドル接続回収のユースケース）
    reap_stale_sessions_usecase: Arc<ReapStaleSessionsUseCase>,
    /// Reaper の実行間隔
    cleanup_interval: Duration,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_group_usecase` - UseCase for joining a group
    /// * `update_location_usecase` - UseCase for location updates
    /// * `leave_group_usecase` - UseCase for leaving a group
    /// * `get_groups_usecase` - UseCase for listing groups
    /// * `reap_stale_sessions_usecase` - UseCase for one reaper cycle
    /// * `cleanup_interval` - Period between reaper cycles
    pub fn new(
        join_group_usecase: Arc<JoinGroupUseCase>,
        update_location_usecase: Arc<UpdateLocationUseCase>,
        leave_group_usecase: Arc<LeaveGroupUseCase>,
        get_groups_usecase: Arc<GetGroupsUseCase>,
        reap_stale_sessions_usecase: Arc<ReapStaleSessionsUseCase>,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            join_group_usecase,
            update_location_usecase,
            leave_group_usecase,
            get_groups_usecase,
            reap_stale_sessions_usecase,
            cleanup_interval,
        }
    }

    /// Run the location sharing server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_group_usecase: self.join_group_usecase,
            update_location_usecase: self.update_location_usecase,
            leave_group_usecase: self.leave_group_usecase,
            get_groups_usecase: self.get_groups_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/groups", get(get_groups))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Start the periodic idle reaper
        let reaper_handle = spawn_reaper(self.reap_stale_sessions_usecase, self.cleanup_interval);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Location sharing server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws?groupId=<group>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Stop the reaper so the interval timer is not leaked
        reaper_handle.abort();

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Spawns the periodic idle reaper task.
///
/// Each tick runs one reap cycle. The task runs until aborted by
/// `Server::run` on shutdown.
fn spawn_reaper(
    usecase: Arc<ReapStaleSessionsUseCase>,
    cleanup_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cleanup_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; skip it so
        // the first real cycle happens one full interval after startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let reaped = usecase.execute().await;
            if !reaped.is_empty() {
                tracing::info!("Reaped {} idle connection(s)", reaped.len());
            }
        }
    })
}
