//! Integration tests for the Project repository using in-memory
//! SurrealDB.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use taskhive_core::error::TaskhiveError;
use taskhive_core::models::project::Project;
use taskhive_core::repository::ProjectRepository;
use taskhive_db::repository::SurrealProjectRepository;
use uuid::Uuid;

async fn setup() -> SurrealProjectRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();
    SurrealProjectRepository::new(db)
}

fn sample_project(created_by: Uuid, members: Vec<Uuid>) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        name: "Website relaunch".into(),
        description: Some("Q3 marketing site".into()),
        created_by,
        members,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn save_and_get_roundtrip() {
    let repo = setup().await;
    let creator = Uuid::new_v4();
    let member = Uuid::new_v4();
    let project = sample_project(creator, vec![creator, member]);

    repo.save(project.clone()).await.unwrap();

    let fetched = repo.get(project.id).await.unwrap();
    assert_eq!(fetched.name, "Website relaunch");
    assert_eq!(fetched.created_by, creator);
    assert_eq!(fetched.members, vec![creator, member]);
    assert!(fetched.active);
}

#[tokio::test]
async fn get_missing_project_is_not_found() {
    let repo = setup().await;

    let err = repo.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TaskhiveError::NotFound { entity, .. } if entity == "project"));
}

#[tokio::test]
async fn list_all_and_by_creator() {
    let repo = setup().await;
    let creator_a = Uuid::new_v4();
    let creator_b = Uuid::new_v4();

    repo.save(sample_project(creator_a, vec![creator_a]))
        .await
        .unwrap();
    repo.save(sample_project(creator_a, vec![creator_a]))
        .await
        .unwrap();
    repo.save(sample_project(creator_b, vec![creator_b]))
        .await
        .unwrap();

    assert_eq!(repo.list_all().await.unwrap().len(), 3);
    assert_eq!(repo.list_by_creator(creator_a).await.unwrap().len(), 2);
    assert_eq!(repo.list_by_creator(creator_b).await.unwrap().len(), 1);
    assert_eq!(
        repo.list_by_creator(Uuid::new_v4()).await.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn list_by_member_uses_containment() {
    let repo = setup().await;
    let creator = Uuid::new_v4();
    let member = Uuid::new_v4();

    let with_member = sample_project(creator, vec![creator, member]);
    repo.save(with_member.clone()).await.unwrap();
    repo.save(sample_project(creator, vec![creator])).await.unwrap();

    let found = repo.list_by_member(member).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, with_member.id);

    // The creator appears in both.
    assert_eq!(repo.list_by_member(creator).await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_removes_from_queries() {
    let repo = setup().await;
    let creator = Uuid::new_v4();
    let project = sample_project(creator, vec![creator]);
    repo.save(project.clone()).await.unwrap();

    repo.delete(project.id).await.unwrap();

    assert!(repo.get(project.id).await.is_err());
    assert_eq!(repo.list_by_creator(creator).await.unwrap().len(), 0);
}
