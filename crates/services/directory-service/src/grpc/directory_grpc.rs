//! gRPC implementation for the UserDirectory service.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{removal_id, required_user, user_to_proto};
use crate::service::UserDirectory;
use proto::directory::{
    user_directory_server::UserDirectory as UserDirectoryProto, CreateUserRequest,
    CreateUserResponse, FindAllUsersRequest, FindAllUsersResponse, FindUserByEmailRequest,
    FindUserByIdRequest, FindUserByLoginRequest, FindUserResponse, RemoveUserRequest,
    RemoveUserResponse, UpdateUserRequest, UpdateUserResponse,
};

/// gRPC service wrapper for UserDirectory.
pub struct DirectoryGrpcService {
    service: Arc<dyn UserDirectory>,
}

impl DirectoryGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserDirectory>) -> Self {
        Self { service }
    }
}

fn found(user: Option<domain::User>) -> Response<FindUserResponse> {
    Response::new(FindUserResponse {
        user: user.as_ref().map(user_to_proto),
    })
}

/// Saturate a row count into the `int32` wire field.
fn wire_total(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[tonic::async_trait]
impl UserDirectoryProto for DirectoryGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let user = required_user(request.into_inner().user)?;

        // The caller re-fetches by login to learn the assigned id
        self.service.create(user).await.map_err(Status::from)?;
        Ok(Response::new(CreateUserResponse {}))
    }

    async fn find_user_by_login(
        &self,
        request: Request<FindUserByLoginRequest>,
    ) -> Result<Response<FindUserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .find_by_login(&req.login)
            .await
            .map_err(Status::from)?;
        Ok(found(user))
    }

    async fn find_user_by_email(
        &self,
        request: Request<FindUserByEmailRequest>,
    ) -> Result<Response<FindUserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .find_by_email(&req.email)
            .await
            .map_err(Status::from)?;
        Ok(found(user))
    }

    async fn find_user_by_id(
        &self,
        request: Request<FindUserByIdRequest>,
    ) -> Result<Response<FindUserResponse>, Status> {
        let req = request.into_inner();

        let user = self.service.find_by_id(req.id).await.map_err(Status::from)?;
        Ok(found(user))
    }

    async fn find_all_users(
        &self,
        _request: Request<FindAllUsersRequest>,
    ) -> Result<Response<FindAllUsersResponse>, Status> {
        let users = self.service.find_all().await.map_err(Status::from)?;
        let total = wire_total(users.len());
        let users = users.iter().map(user_to_proto).collect();

        Ok(Response::new(FindAllUsersResponse { users, total }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let user = required_user(request.into_inner().user)?;

        self.service.update(user).await.map_err(Status::from)?;
        Ok(Response::new(UpdateUserResponse {}))
    }

    async fn remove_user(
        &self,
        request: Request<RemoveUserRequest>,
    ) -> Result<Response<RemoveUserResponse>, Status> {
        let id = removal_id(request.into_inner().user)?;

        self.service.remove(id).await.map_err(Status::from)?;
        Ok(Response::new(RemoveUserResponse {}))
    }
}
