//! Integration tests for the Users domain against a real MongoDB

use chrono::Utc;
use domain_users::*;
use test_utils::{TestDataBuilder, TestMongo};

fn user(username: &str, email: &str, role: Role) -> User {
    User {
        id: None,
        username: username.to_string(),
        email: email.to_string(),
        hashed_password: "$argon2id$placeholder".to_string(),
        role,
        is_active: true,
        created_at: Utc::now(),
    }
}

async fn repository(mongo: &TestMongo, builder: &TestDataBuilder) -> MongoUserRepository {
    let repo = MongoUserRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
async fn test_create_and_lookup() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("users_create_lookup");
    let repo = repository(&mongo, &builder).await;

    let created = repo
        .create(user("ada", "ada@example.com", Role::User))
        .await
        .unwrap();
    assert!(created.id.is_some());

    let found = repo.get_by_username("ada").await.unwrap().unwrap();
    assert_eq!(found.email, "ada@example.com");
    assert!(repo.get_by_username("Ada").await.unwrap().is_none());
    assert!(repo.email_exists("ada@example.com").await.unwrap());
    assert!(!repo.admin_exists().await.unwrap());
}

#[tokio::test]
async fn test_unique_indexes_tell_username_from_email() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("users_unique");
    let repo = repository(&mongo, &builder).await;

    repo.create(user("ada", "ada@example.com", Role::Admin))
        .await
        .unwrap();

    let err = repo
        .create(user("ada", "other@example.com", Role::User))
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateUsername(name) if name == "ada"));

    let err = repo
        .create(user("grace", "ada@example.com", Role::User))
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));

    assert!(repo.admin_exists().await.unwrap());
}

#[tokio::test]
async fn test_login_flow_end_to_end() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("users_login_flow");
    let repo = repository(&mongo, &builder).await;

    let jwt = axum_helpers::JwtAuth::new(
        &axum_helpers::JwtConfig::new("users-integration-secret-32-chars!!").unwrap(),
    );
    let service = UserService::new(repo, jwt.clone());

    assert!(
        service
            .ensure_default_admin("root", "root@example.com", "change-me-now")
            .await
            .unwrap()
    );
    assert!(
        !service
            .ensure_default_admin("root2", "root2@example.com", "change-me-now")
            .await
            .unwrap()
    );

    let token = service.login("root", "change-me-now").await.unwrap();
    let claims = jwt.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, "root");
    assert!(claims.is_admin());

    assert!(matches!(
        service.login("root", "wrong").await,
        Err(UserError::InvalidCredentials)
    ));
}
