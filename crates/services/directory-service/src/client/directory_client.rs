//! gRPC client for directory-service.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::User;
use proto::directory::{
    user_directory_client::UserDirectoryClient as ProtoDirectoryClient, CreateUserRequest,
    FindAllUsersRequest, FindUserByEmailRequest, FindUserByIdRequest, FindUserByLoginRequest,
    FindUserResponse, RemoveUserRequest, UpdateUserRequest,
};

use crate::grpc::convert::{proto_to_user, user_to_proto};

/// gRPC client wrapper for directory-service.
///
/// Service faults come back as the matching `AppError` variant
/// (`Conflict`, `NotFound`, `Validation`, `Internal`).
#[derive(Clone)]
pub struct DirectoryClient {
    client: ProtoDirectoryClient<Channel>,
}

impl DirectoryClient {
    /// Connect to directory-service.
    pub async fn connect(endpoint: &str) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to directory-service at {}", endpoint);
        let client = ProtoDirectoryClient::connect(endpoint.to_string()).await?;
        Ok(Self { client })
    }

    /// Connect with explicit connect and request timeouts.
    pub async fn connect_with_config(config: &GrpcClientConfig) -> AppResult<Self> {
        debug!("Connecting to directory-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| AppError::service_unavailable(format!("directory-service ({})", e)))?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect()
            .await
            .map_err(|e| AppError::service_unavailable(format!("directory-service ({})", e)))?;

        Ok(Self {
            client: ProtoDirectoryClient::new(channel),
        })
    }

    /// Create user. The assigned id is not returned; look the user up by login.
    pub async fn create(&self, user: &User) -> AppResult<()> {
        let request = tonic::Request::new(CreateUserRequest {
            user: Some(user_to_proto(user)),
        });

        let mut client = self.client.clone();
        client.create_user(request).await.map_err(AppError::from)?;
        Ok(())
    }

    /// Find user by login.
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let request = tonic::Request::new(FindUserByLoginRequest {
            login: login.to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .find_user_by_login(request)
            .await
            .map_err(AppError::from)?;
        found(response.into_inner())
    }

    /// Find user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let request = tonic::Request::new(FindUserByEmailRequest {
            email: email.to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .find_user_by_email(request)
            .await
            .map_err(AppError::from)?;
        found(response.into_inner())
    }

    /// Find user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let request = tonic::Request::new(FindUserByIdRequest { id });

        let mut client = self.client.clone();
        let response = client
            .find_user_by_id(request)
            .await
            .map_err(AppError::from)?;
        found(response.into_inner())
    }

    /// List all users.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        let request = tonic::Request::new(FindAllUsersRequest {});

        let mut client = self.client.clone();
        let response = client.find_all_users(request).await.map_err(AppError::from)?;

        response
            .into_inner()
            .users
            .into_iter()
            .map(proto_to_user)
            .collect()
    }

    /// Replace every field of an existing user.
    pub async fn update(&self, user: &User) -> AppResult<()> {
        let request = tonic::Request::new(UpdateUserRequest {
            user: Some(user_to_proto(user)),
        });

        let mut client = self.client.clone();
        client.update_user(request).await.map_err(AppError::from)?;
        Ok(())
    }

    /// Remove user.
    pub async fn remove(&self, user: &User) -> AppResult<()> {
        let request = tonic::Request::new(RemoveUserRequest {
            user: Some(user_to_proto(user)),
        });

        let mut client = self.client.clone();
        client.remove_user(request).await.map_err(AppError::from)?;
        Ok(())
    }
}

fn found(response: FindUserResponse) -> AppResult<Option<User>> {
    response.user.map(proto_to_user).transpose()
}
