//! Integration tests for the user service using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use taskhive_core::error::TaskhiveError;
use taskhive_core::models::user::{CreateUser, UpdateUserProfile};
use taskhive_db::repository::SurrealUserRepository;
use taskhive_service::UserService;

async fn setup() -> UserService<SurrealUserRepository<surrealdb::engine::local::Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();
    UserService::new(SurrealUserRepository::new(db))
}

fn registration(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.into(),
        email: email.into(),
        password: "SuperSecret123!".into(),
        first_name: None,
        last_name: None,
        phone: None,
        roles: Vec::new(),
    }
}

#[tokio::test]
async fn register_hashes_password_and_applies_default_role() {
    let service = setup().await;

    let user = service
        .register(registration("alice", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.roles, vec!["ROLE_USER".to_string()]);
    assert_eq!(user.created_at, user.updated_at);

    // Password is hashed, never stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    assert!(service.verify_credential(&user, "SuperSecret123!").unwrap());
    assert!(!service.verify_credential(&user, "wrong").unwrap());
}

#[tokio::test]
async fn register_keeps_explicit_roles() {
    let service = setup().await;

    let mut input = registration("root", "root@example.com");
    input.roles = vec!["ROLE_ADMIN".into()];
    let user = service.register(input).await.unwrap();

    assert_eq!(user.roles, vec!["ROLE_ADMIN".to_string()]);
}

#[tokio::test]
async fn lookups_and_existence_checks() {
    let service = setup().await;
    let user = service
        .register(registration("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(service.find_by_id(user.id).await.unwrap().username, "bob");
    assert_eq!(service.find_by_username("bob").await.unwrap().id, user.id);
    assert!(service.exists_by_username("bob").await.unwrap());
    assert!(!service.exists_by_username("nobody").await.unwrap());
    assert!(service.exists_by_email("bob@example.com").await.unwrap());

    let err = service
        .find_by_id(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskhiveError::NotFound { .. }));
}

#[tokio::test]
async fn profile_update_is_a_sparse_overlay() {
    let service = setup().await;
    let user = service
        .register(registration("carol", "carol@example.com"))
        .await
        .unwrap();

    let updated = service
        .update_profile(
            user.id,
            UpdateUserProfile {
                first_name: Some("Carol".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Only the patched field changed.
    assert_eq!(updated.first_name.as_deref(), Some("Carol"));
    assert_eq!(updated.last_name, None);
    assert_eq!(updated.email, "carol@example.com");
    assert_eq!(updated.phone, None);
    assert!(updated.updated_at > user.updated_at);
}

#[tokio::test]
async fn email_conflict_aborts_without_writing() {
    let service = setup().await;
    service
        .register(registration("dave", "dave@example.com"))
        .await
        .unwrap();
    let erin = service
        .register(registration("erin", "erin@example.com"))
        .await
        .unwrap();

    let err = service
        .update_profile(
            erin.id,
            UpdateUserProfile {
                first_name: Some("Erin".into()),
                email: Some("dave@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TaskhiveError::AlreadyExists { .. }));

    // The aborted update left the profile untouched.
    let fetched = service.find_by_id(erin.id).await.unwrap();
    assert_eq!(fetched.email, "erin@example.com");
    assert_eq!(fetched.first_name, None);
    assert_eq!(fetched.updated_at, erin.updated_at);
}

#[tokio::test]
async fn restating_the_current_email_is_not_a_conflict() {
    let service = setup().await;
    let user = service
        .register(registration("frank", "frank@example.com"))
        .await
        .unwrap();

    let updated = service
        .update_profile(
            user.id,
            UpdateUserProfile {
                email: Some("frank@example.com".into()),
                phone: Some("555-0199".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.email, "frank@example.com");
    assert_eq!(updated.phone.as_deref(), Some("555-0199"));
}
