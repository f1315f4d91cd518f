//! End-to-end tests: a real gRPC server driven through DirectoryClient.

mod support;

use chrono::NaiveDate;

use common::{AppError, GrpcClientConfig};
use directory_service_lib::client::DirectoryClient;
use domain::{Role, User, ROLE_ADMIN_ID, ROLE_USER, ROLE_USER_ID};
use proto::directory as pb;

use support::{default_user, distinct_user, spawn_directory, spawn_directory_endpoint};

/// Create the default user and return it with its assigned id.
async fn create_default(client: &DirectoryClient) -> User {
    let mut user = default_user();
    client.create(&user).await.unwrap();

    let stored = client
        .find_by_login(&user.login)
        .await
        .unwrap()
        .expect("user must exist after create");
    user.id = stored.id;
    user
}

#[tokio::test]
async fn test_create() {
    let client = spawn_directory().await;
    let mut user = default_user();

    client.create(&user).await.unwrap();

    let actual = client.find_by_login(&user.login).await.unwrap();
    let actual = actual.expect("user must exist in store");
    assert!(actual.id.is_some());

    user.id = actual.id;
    assert_eq!(user, actual);
}

#[tokio::test]
async fn test_create_login_duplicate() {
    let client = spawn_directory().await;
    let mut user = create_default(&client).await;
    let before = client.find_all().await.unwrap().len();

    user.id = None;
    user.email = "new_email@mail.ru".to_string();
    let result = client.create(&user).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(client.find_all().await.unwrap().len(), before);
    assert!(client
        .find_by_email("new_email@mail.ru")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_email_duplicate() {
    let client = spawn_directory().await;
    let mut user = create_default(&client).await;

    user.id = None;
    user.login = "newTestLogin".to_string();
    let result = client.create(&user).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(client.find_by_login("newTestLogin").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_with_id_is_rejected() {
    let client = spawn_directory().await;
    let mut user = default_user();
    user.id = Some(5);

    assert!(matches!(
        client.create(&user).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_with_mismatched_role_name_is_rejected() {
    let client = spawn_directory().await;
    let mut user = default_user();
    user.role = Role::new(ROLE_ADMIN_ID, ROLE_USER);

    assert!(matches!(
        client.create(&user).await,
        Err(AppError::Validation(_))
    ));
    assert!(client.find_by_login(&user.login).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update() {
    let client = spawn_directory().await;
    let mut user = create_default(&client).await;

    user.password = format!("{}12erph6", user.password);
    user.email = "new_test_email@mail.ru".to_string();
    user.first_name = "updated first name".to_string();
    user.last_name = "updated last name".to_string();
    user.birth_day = NaiveDate::from_ymd_opt(2010, 7, 30).unwrap();
    user.role = Role::new(ROLE_USER_ID, ROLE_USER);

    client.update(&user).await.unwrap();

    let extracted = client.find_by_id(user.id.unwrap()).await.unwrap();
    assert_eq!(extracted, Some(user));
    assert!(client
        .find_by_email("testEmail@mail.ru")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_with_unchanged_login_and_email() {
    let client = spawn_directory().await;
    let mut user = create_default(&client).await;

    user.last_name = "Only This Changed".to_string();
    client.update(&user).await.unwrap();

    let stored = client.find_by_login(&user.login).await.unwrap();
    assert_eq!(stored, Some(user));
}

#[tokio::test]
async fn test_update_unknown_id() {
    let client = spawn_directory().await;
    let mut user = default_user();
    user.id = Some(-1);

    assert!(matches!(client.update(&user).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_onto_other_users_email() {
    let client = spawn_directory().await;
    let first = create_default(&client).await;

    let other = distinct_user();
    client.create(&other).await.unwrap();
    let mut other = client.find_by_login(&other.login).await.unwrap().unwrap();

    other.email = first.email.clone();
    assert!(matches!(
        client.update(&other).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_update_onto_other_users_login() {
    let client = spawn_directory().await;
    let first = create_default(&client).await;

    let other = distinct_user();
    client.create(&other).await.unwrap();
    let mut other = client.find_by_login(&other.login).await.unwrap().unwrap();
    let original = other.clone();

    other.login = first.login.clone();
    assert!(matches!(
        client.update(&other).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(client.find_by_id(original.id.unwrap()).await.unwrap(), Some(original));
}

#[tokio::test]
async fn test_remove_then_find() {
    let client = spawn_directory().await;
    let user = create_default(&client).await;

    client.remove(&user).await.unwrap();

    assert!(client.find_by_id(user.id.unwrap()).await.unwrap().is_none());
    assert!(client.find_by_login(&user.login).await.unwrap().is_none());
}

#[tokio::test]
async fn test_remove_unknown_is_noop() {
    let client = spawn_directory().await;
    let user = create_default(&client).await;

    client.remove(&user).await.unwrap();
    client.remove(&user).await.unwrap();
}

#[tokio::test]
async fn test_remove_with_only_id_set() {
    let endpoint = spawn_directory_endpoint().await;
    let client = DirectoryClient::connect(&endpoint).await.unwrap();
    let user = create_default(&client).await;

    let mut raw = proto::UserDirectoryClient::connect(endpoint).await.unwrap();
    raw.remove_user(pb::RemoveUserRequest {
        user: Some(pb::User {
            id: user.id,
            ..Default::default()
        }),
    })
    .await
    .unwrap();

    assert!(client.find_by_id(user.id.unwrap()).await.unwrap().is_none());

    let status = raw
        .remove_user(pb::RemoveUserRequest {
            user: Some(pb::User::default()),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
}

#[tokio::test]
async fn test_find_by_email_returns_stored_user() {
    let client = spawn_directory().await;
    let user = create_default(&client).await;

    let found = client.find_by_email(&user.email).await.unwrap();
    assert_eq!(found, Some(user));
}

#[tokio::test]
async fn test_find_all_grows_by_created_count() {
    let client = spawn_directory().await;
    create_default(&client).await;
    let before = client.find_all().await.unwrap().len();

    let created: Vec<User> = (0..3).map(|_| distinct_user()).collect();
    for user in &created {
        client.create(user).await.unwrap();
    }

    let all = client.find_all().await.unwrap();
    assert_eq!(all.len(), before + created.len());
    for user in &created {
        assert!(all.iter().any(|u| u.login == user.login && u.id.is_some()));
    }
}

#[tokio::test]
async fn test_lookups_of_missing_users_are_absent() {
    let client = spawn_directory().await;

    assert!(client.find_by_login("nobody").await.unwrap().is_none());
    assert!(client.find_by_email("nobody@mail.ru").await.unwrap().is_none());
    assert!(client.find_by_id(12345).await.unwrap().is_none());
    assert!(client.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_service_unavailable() {
    let config = GrpcClientConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        connect_timeout_ms: 200,
        request_timeout_ms: 200,
    };

    let result = DirectoryClient::connect_with_config(&config).await;
    assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
}
