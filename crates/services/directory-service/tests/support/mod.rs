//! Shared fixtures for directory integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use tonic::transport::server::TcpIncoming;

use common::DatabaseConfig;
use directory_service_lib::client::DirectoryClient;
use directory_service_lib::infra::Database;
use directory_service_lib::repository::UserStore;
use domain::{Role, User, ROLE_ADMIN, ROLE_ADMIN_ID};

/// Fresh, migrated in-memory store. Each call is an isolated database.
pub async fn memory_store() -> Arc<UserStore> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = Database::connect(&config).await.expect("in-memory database");
    Arc::new(UserStore::new(db.get_connection()))
}

/// The default user every remote scenario starts from.
pub fn default_user() -> User {
    User::new(
        "testLogin",
        "Q!q1q1",
        "testEmail@mail.ru",
        "First Name",
        "Last Name",
        NaiveDate::from_ymd_opt(1988, 11, 2).unwrap(),
        Role::new(ROLE_ADMIN_ID, ROLE_ADMIN),
    )
}

/// A user with a login and email nobody else has.
pub fn distinct_user() -> User {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let mut user = default_user();
    user.login = format!("login_{}", tag);
    user.email = format!("{}@mail.ru", tag);
    user
}

/// Start a directory server on an ephemeral port backed by a fresh store,
/// returning its `http://` endpoint.
pub async fn spawn_directory_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let incoming = TcpIncoming::from_listener(listener, true, None).expect("incoming");

    let store = memory_store().await;
    tokio::spawn(directory_service_lib::serve_incoming(incoming, store));

    format!("http://{}", addr)
}

/// Start a directory server and connect a client to it.
pub async fn spawn_directory() -> DirectoryClient {
    let endpoint = spawn_directory_endpoint().await;
    DirectoryClient::connect(&endpoint)
        .await
        .expect("connect to directory")
}
