//! Directory Service Library
//!
//! This crate provides user directory management via gRPC: uniqueness-checked
//! create, lookups by login/email/id, full scan, full-replace update and
//! idempotent removal.

pub mod client;
pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tonic::transport::server::TcpIncoming;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::DirectoryServiceConfig;
use crate::grpc::DirectoryGrpcService;
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};
use crate::service::DirectoryManager;

/// Error type of the bootstrap entry points.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Run the directory service, binding to `config.service.host:port`.
pub async fn run_server(config: DirectoryServiceConfig) -> Result<(), BoxError> {
    let listener =
        TcpListener::bind((config.service.host.as_str(), config.service.port)).await?;
    run_server_on(listener, config).await
}

/// Run the directory service on an already-bound listener.
pub async fn run_server_on(
    listener: TcpListener,
    config: DirectoryServiceConfig,
) -> Result<(), BoxError> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    let user_repo = Arc::new(UserStore::new(db.get_connection()));

    info!(
        "{} listening on {}",
        config.service.service_name,
        listener.local_addr()?
    );
    let incoming = TcpIncoming::from_listener(listener, true, None)?;

    serve_incoming(incoming, user_repo).await?;
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DirectoryServiceConfig,
    action: MigrateAction,
) -> Result<(), BoxError> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the gRPC service on top of a persistence collaborator.
pub fn directory_server(
    repo: Arc<dyn UserRepository>,
) -> proto::UserDirectoryServer<DirectoryGrpcService> {
    let directory = Arc::new(DirectoryManager::new(repo));
    proto::UserDirectoryServer::new(DirectoryGrpcService::new(directory))
}

/// Serve the directory on an already-bound listener.
pub async fn serve_incoming(
    incoming: TcpIncoming,
    repo: Arc<dyn UserRepository>,
) -> Result<(), tonic::transport::Error> {
    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(directory_server(repo))
        .serve_with_incoming(incoming)
        .await
}
