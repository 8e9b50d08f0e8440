//! Integration tests for the project service using in-memory
//! SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use taskhive_core::error::TaskhiveError;
use taskhive_core::models::project::{CreateProject, UpdateProject};
use taskhive_core::models::user::CreateUser;
use taskhive_db::repository::{SurrealProjectRepository, SurrealUserRepository};
use taskhive_service::{ProjectService, UserService};
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// Helper: spin up an in-memory DB, run migrations, register two
/// users (creator + teammate).
async fn setup() -> (
    ProjectService<SurrealProjectRepository<Db>, SurrealUserRepository<Db>>,
    Uuid, // creator
    Uuid, // teammate
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();

    let users = UserService::new(SurrealUserRepository::new(db.clone()));
    let creator = users
        .register(CreateUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "SuperSecret123!".into(),
            first_name: None,
            last_name: None,
            phone: None,
            roles: Vec::new(),
        })
        .await
        .unwrap();
    let teammate = users
        .register(CreateUser {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "SuperSecret123!".into(),
            first_name: None,
            last_name: None,
            phone: None,
            roles: Vec::new(),
        })
        .await
        .unwrap();

    let service = ProjectService::new(
        SurrealProjectRepository::new(db.clone()),
        SurrealUserRepository::new(db),
    );
    (service, creator.id, teammate.id)
}

fn new_project(name: &str, members: Vec<Uuid>) -> CreateProject {
    CreateProject {
        name: name.into(),
        description: None,
        members,
    }
}

#[tokio::test]
async fn create_merges_creator_into_members() {
    let (service, creator, teammate) = setup().await;

    let project = service
        .create(new_project("Relaunch", vec![teammate]), creator)
        .await
        .unwrap();

    assert_eq!(project.created_by, creator);
    assert!(project.members.contains(&creator));
    assert!(project.members.contains(&teammate));
    assert!(project.active);
    assert_eq!(project.created_at, project.updated_at);

    // Listing the creator as a member does not duplicate it.
    let project = service
        .create(new_project("Second", vec![creator]), creator)
        .await
        .unwrap();
    assert_eq!(project.members, vec![creator]);
}

#[tokio::test]
async fn update_is_a_sparse_overlay() {
    let (service, creator, _) = setup().await;
    let project = service
        .create(
            CreateProject {
                name: "Old name".into(),
                description: Some("Original description".into()),
                members: Vec::new(),
            },
            creator,
        )
        .await
        .unwrap();

    let updated = service
        .update(
            project.id,
            UpdateProject {
                name: Some("New name".into()),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "New name");
    assert_eq!(
        updated.description.as_deref(),
        Some("Original description")
    );
    assert_eq!(updated.members, project.members);
    assert!(updated.updated_at > project.updated_at);

    let err = service
        .update(Uuid::new_v4(), UpdateProject::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskhiveError::NotFound { .. }));
}

#[tokio::test]
async fn add_member_is_idempotent() {
    let (service, creator, teammate) = setup().await;
    let project = service
        .create(new_project("Relaunch", Vec::new()), creator)
        .await
        .unwrap();

    let after_add = service.add_member(project.id, teammate).await.unwrap();
    assert_eq!(after_add.members.len(), 2);
    assert!(after_add.updated_at > project.updated_at);

    // Second add: same member set, no updated_at bump, no write.
    let after_readd = service.add_member(project.id, teammate).await.unwrap();
    assert_eq!(after_readd.members.len(), 2);
    assert_eq!(after_readd.updated_at, after_add.updated_at);

    let fetched = service.get(project.id).await.unwrap();
    assert_eq!(fetched.updated_at, after_add.updated_at);
}

#[tokio::test]
async fn add_member_requires_existing_project_and_user() {
    let (service, creator, teammate) = setup().await;
    let project = service
        .create(new_project("Relaunch", Vec::new()), creator)
        .await
        .unwrap();

    let err = service
        .add_member(Uuid::new_v4(), teammate)
        .await
        .unwrap_err();
    assert!(matches!(err, TaskhiveError::NotFound { entity, .. } if entity == "project"));

    let err = service
        .add_member(project.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskhiveError::NotFound { entity, .. } if entity == "user"));

    // The failed add wrote nothing.
    let fetched = service.get(project.id).await.unwrap();
    assert_eq!(fetched.members, project.members);
    assert_eq!(fetched.updated_at, project.updated_at);
}

#[tokio::test]
async fn remove_member_always_stamps_updated_at() {
    let (service, creator, teammate) = setup().await;
    let project = service
        .create(new_project("Relaunch", vec![teammate]), creator)
        .await
        .unwrap();

    let after_remove = service.remove_member(project.id, teammate).await.unwrap();
    assert!(!after_remove.members.contains(&teammate));
    assert!(after_remove.updated_at > project.updated_at);

    // Removing a non-member leaves the set unchanged but still bumps
    // the timestamp.
    let after_noop = service.remove_member(project.id, teammate).await.unwrap();
    assert_eq!(after_noop.members, after_remove.members);
    assert!(after_noop.updated_at > after_remove.updated_at);
}

#[tokio::test]
async fn remove_member_does_not_protect_the_creator() {
    let (service, creator, _) = setup().await;
    let project = service
        .create(new_project("Relaunch", Vec::new()), creator)
        .await
        .unwrap();

    let after = service.remove_member(project.id, creator).await.unwrap();
    assert!(after.members.is_empty());
}

#[tokio::test]
async fn lists_and_delete() {
    let (service, creator, teammate) = setup().await;
    let mine = service
        .create(new_project("Mine", Vec::new()), creator)
        .await
        .unwrap();
    service
        .create(new_project("Theirs", Vec::new()), teammate)
        .await
        .unwrap();

    assert_eq!(service.list_all().await.unwrap().len(), 2);
    assert_eq!(service.list_by_creator(creator).await.unwrap().len(), 1);
    assert_eq!(service.list_by_member(creator).await.unwrap().len(), 1);

    service.delete(mine.id).await.unwrap();
    assert!(service.get(mine.id).await.is_err());
    assert_eq!(service.list_by_creator(creator).await.unwrap().len(), 0);
}
