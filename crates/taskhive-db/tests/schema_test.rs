//! Migration runner tests using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn migrations_apply_on_fresh_database() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    taskhive_db::run_migrations(&db).await.unwrap();

    // The three collections should accept inserts after migration.
    db.query("CREATE user:`11111111-1111-1111-1111-111111111111` SET \
              username = 'alice', email = 'alice@example.com', \
              password_hash = 'x', roles = []")
        .await
        .unwrap()
        .check()
        .unwrap();
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    taskhive_db::run_migrations(&db).await.unwrap();
    // A second run must not attempt to re-apply version 1.
    taskhive_db::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn schema_rejects_unknown_task_status() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE task:`22222222-2222-2222-2222-222222222222` SET \
             title = 't', status = 'Bogus', priority = 'Medium', \
             created_by = 'u'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "status ASSERT should reject 'Bogus'");
}
