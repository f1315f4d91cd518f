//! gRPC client for remote callers of the directory.

mod directory_client;

pub use directory_client::DirectoryClient;
