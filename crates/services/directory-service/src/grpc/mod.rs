//! gRPC boundary: server implementation and wire conversions.

pub mod convert;
mod directory_grpc;

pub use directory_grpc::DirectoryGrpcService;
