//! SurrealDB implementation of [`ProjectRepository`].
//!
//! Member UUIDs are stored as an array of strings on the project
//! document; `list_by_member` is an array-containment query.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::project::Project;
use taskhive_core::repository::ProjectRepository;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ProjectRow {
    name: String,
    description: Option<String>,
    created_by: String,
    members: Vec<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProjectRowWithId {
    record_id: String,
    name: String,
    description: Option<String>,
    created_by: String,
    members: Vec<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_members(members: Vec<String>) -> Result<Vec<Uuid>, DbError> {
    members
        .into_iter()
        .map(|m| {
            Uuid::parse_str(&m).map_err(|e| DbError::Query(format!("invalid member UUID: {e}")))
        })
        .collect()
}

impl ProjectRow {
    fn try_into_project(self, id: Uuid) -> Result<Project, DbError> {
        let created_by = Uuid::parse_str(&self.created_by)
            .map_err(|e| DbError::Query(format!("invalid creator UUID: {e}")))?;
        Ok(Project {
            id,
            name: self.name,
            description: self.description,
            created_by,
            members: parse_members(self.members)?,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProjectRowWithId {
    fn try_into_project(self) -> Result<Project, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        let created_by = Uuid::parse_str(&self.created_by)
            .map_err(|e| DbError::Query(format!("invalid creator UUID: {e}")))?;
        Ok(Project {
            id,
            name: self.name,
            description: self.description,
            created_by,
            members: parse_members(self.members)?,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        name: project.name.clone(),
        description: project.description.clone(),
        created_by: project.created_by.to_string(),
        members: project.members.iter().map(Uuid::to_string).collect(),
        active: project.active,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }
}

/// SurrealDB implementation of the Project repository.
#[derive(Clone)]
pub struct SurrealProjectRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProjectRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(
        &self,
        condition: &str,
        bind: Option<(&'static str, String)>,
    ) -> TaskhiveResult<Vec<Project>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM project{condition}"
        );

        let mut builder = self.db.query(query);
        if let Some((name, value)) = bind {
            builder = builder.bind((name, value));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<ProjectRowWithId> = result.take(0).map_err(DbError::from)?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            projects.push(row.try_into_project()?);
        }
        Ok(projects)
    }
}

impl<C: Connection> ProjectRepository for SurrealProjectRepository<C> {
    async fn get(&self, id: Uuid) -> TaskhiveResult<Project> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('project', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "project".into(),
            id: id_str,
        })?;

        Ok(row.try_into_project(id)?)
    }

    async fn save(&self, project: Project) -> TaskhiveResult<Project> {
        let id_str = project.id.to_string();
        let row = to_row(&project);

        let result = self
            .db
            .query("UPSERT type::record('project', $id) CONTENT $data")
            .bind(("id", id_str))
            .bind(("data", row))
            .await
            .map_err(DbError::from)?;

        result.check().map_err(|e| DbError::Query(e.to_string()))?;

        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> TaskhiveResult<()> {
        let id_str = id.to_string();

        self.db
            .query("DELETE type::record('project', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list_all(&self) -> TaskhiveResult<Vec<Project>> {
        self.list_where("", None).await
    }

    async fn list_by_creator(&self, user_id: Uuid) -> TaskhiveResult<Vec<Project>> {
        self.list_where(
            " WHERE created_by = $user_id",
            Some(("user_id", user_id.to_string())),
        )
        .await
    }

    async fn list_by_member(&self, user_id: Uuid) -> TaskhiveResult<Vec<Project>> {
        self.list_where(
            " WHERE members CONTAINS $user_id",
            Some(("user_id", user_id.to_string())),
        )
        .await
    }
}
