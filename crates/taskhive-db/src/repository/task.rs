//! SurrealDB implementation of [`TaskRepository`].
//!
//! The task document is an aggregate root: comments and attachments
//! are embedded arrays and travel with every save/delete. Status and
//! priority are stored as strings constrained by schema ASSERTs.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::task::{Attachment, Comment, Task, TaskPriority, TaskStatus};
use taskhive_core::repository::TaskRepository;
use uuid::Uuid;

use crate::error::DbError;

fn parse_status(s: &str) -> Result<TaskStatus, DbError> {
    match s {
        "Open" => Ok(TaskStatus::Open),
        "InProgress" => Ok(TaskStatus::InProgress),
        "Completed" => Ok(TaskStatus::Completed),
        "Cancelled" => Ok(TaskStatus::Cancelled),
        other => Err(DbError::Query(format!("unknown task status: {other}"))),
    }
}

fn status_to_string(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Open => "Open",
        TaskStatus::InProgress => "InProgress",
        TaskStatus::Completed => "Completed",
        TaskStatus::Cancelled => "Cancelled",
    }
}

fn parse_priority(s: &str) -> Result<TaskPriority, DbError> {
    match s {
        "Low" => Ok(TaskPriority::Low),
        "Medium" => Ok(TaskPriority::Medium),
        "High" => Ok(TaskPriority::High),
        "Urgent" => Ok(TaskPriority::Urgent),
        other => Err(DbError::Query(format!("unknown task priority: {other}"))),
    }
}

fn priority_to_string(p: TaskPriority) -> &'static str {
    match p {
        TaskPriority::Low => "Low",
        TaskPriority::Medium => "Medium",
        TaskPriority::High => "High",
        TaskPriority::Urgent => "Urgent",
    }
}

/// Embedded comment object.
#[derive(Debug, SurrealValue)]
struct CommentRow {
    id: String,
    content: String,
    author_id: String,
    author_name: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn try_into_comment(self) -> Result<Comment, DbError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::Query(format!("invalid comment UUID: {e}")))?;
        let author_id = Uuid::parse_str(&self.author_id)
            .map_err(|e| DbError::Query(format!("invalid author UUID: {e}")))?;
        Ok(Comment {
            id,
            content: self.content,
            author_id,
            author_name: self.author_name,
            created_at: self.created_at,
        })
    }
}

fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id.to_string(),
        content: comment.content.clone(),
        author_id: comment.author_id.to_string(),
        author_name: comment.author_name.clone(),
        created_at: comment.created_at,
    }
}

/// Embedded attachment object.
#[derive(Debug, SurrealValue)]
struct AttachmentRow {
    id: String,
    file_name: String,
    content_type: String,
    location: String,
    size: u64,
    uploaded_by: String,
    uploaded_at: DateTime<Utc>,
}

impl AttachmentRow {
    fn try_into_attachment(self) -> Result<Attachment, DbError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::Query(format!("invalid attachment UUID: {e}")))?;
        let uploaded_by = Uuid::parse_str(&self.uploaded_by)
            .map_err(|e| DbError::Query(format!("invalid uploader UUID: {e}")))?;
        Ok(Attachment {
            id,
            file_name: self.file_name,
            content_type: self.content_type,
            location: self.location,
            size: self.size,
            uploaded_by,
            uploaded_at: self.uploaded_at,
        })
    }
}

fn attachment_to_row(attachment: &Attachment) -> AttachmentRow {
    AttachmentRow {
        id: attachment.id.to_string(),
        file_name: attachment.file_name.clone(),
        content_type: attachment.content_type.clone(),
        location: attachment.location.clone(),
        size: attachment.size,
        uploaded_by: attachment.uploaded_by.to_string(),
        uploaded_at: attachment.uploaded_at,
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TaskRow {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: String,
    priority: String,
    created_by: String,
    assigned_to: Option<String>,
    project_id: Option<String>,
    comments: Vec<CommentRow>,
    attachments: Vec<AttachmentRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TaskRowWithId {
    record_id: String,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: String,
    priority: String,
    created_by: String,
    assigned_to: Option<String>,
    project_id: Option<String>,
    comments: Vec<CommentRow>,
    attachments: Vec<AttachmentRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

fn parse_opt_uuid(value: Option<String>, what: &str) -> Result<Option<Uuid>, DbError> {
    value
        .map(|v| Uuid::parse_str(&v).map_err(|e| DbError::Query(format!("invalid {what}: {e}"))))
        .transpose()
}

impl TaskRow {
    fn try_into_task(self, id: Uuid) -> Result<Task, DbError> {
        let created_by = Uuid::parse_str(&self.created_by)
            .map_err(|e| DbError::Query(format!("invalid creator UUID: {e}")))?;

        let mut comments = Vec::with_capacity(self.comments.len());
        for row in self.comments {
            comments.push(row.try_into_comment()?);
        }
        let mut attachments = Vec::with_capacity(self.attachments.len());
        for row in self.attachments {
            attachments.push(row.try_into_attachment()?);
        }

        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            created_by,
            assigned_to: parse_opt_uuid(self.assigned_to, "assignee UUID")?,
            project_id: parse_opt_uuid(self.project_id, "project UUID")?,
            comments,
            attachments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        })
    }
}

impl TaskRowWithId {
    fn try_into_task(self) -> Result<Task, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        let row = TaskRow {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: self.status,
            priority: self.priority,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            project_id: self.project_id,
            comments: self.comments,
            attachments: self.attachments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        };
        row.try_into_task(id)
    }
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        title: task.title.clone(),
        description: task.description.clone(),
        due_date: task.due_date,
        status: status_to_string(task.status).to_string(),
        priority: priority_to_string(task.priority).to_string(),
        created_by: task.created_by.to_string(),
        assigned_to: task.assigned_to.map(|u| u.to_string()),
        project_id: task.project_id.map(|u| u.to_string()),
        comments: task.comments.iter().map(comment_to_row).collect(),
        attachments: task.attachments.iter().map(attachment_to_row).collect(),
        created_at: task.created_at,
        updated_at: task.updated_at,
        completed_at: task.completed_at,
    }
}

/// SurrealDB implementation of the Task repository.
#[derive(Clone)]
pub struct SurrealTaskRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTaskRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(
        &self,
        condition: &str,
        binds: Vec<(&'static str, String)>,
    ) -> TaskhiveResult<Vec<Task>> {
        let query = format!("SELECT meta::id(id) AS record_id, * FROM task{condition}");

        let mut builder = self.db.query(query);
        for (name, value) in binds {
            builder = builder.bind((name, value));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<TaskRowWithId> = result.take(0).map_err(DbError::from)?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(row.try_into_task()?);
        }
        Ok(tasks)
    }
}

impl<C: Connection> TaskRepository for SurrealTaskRepository<C> {
    async fn get(&self, id: Uuid) -> TaskhiveResult<Task> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('task', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TaskRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "task".into(),
            id: id_str,
        })?;

        Ok(row.try_into_task(id)?)
    }

    async fn save(&self, task: Task) -> TaskhiveResult<Task> {
        let id_str = task.id.to_string();
        let row = to_row(&task);

        let result = self
            .db
            .query("UPSERT type::record('task', $id) CONTENT $data")
            .bind(("id", id_str))
            .bind(("data", row))
            .await
            .map_err(DbError::from)?;

        result.check().map_err(|e| DbError::Query(e.to_string()))?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> TaskhiveResult<()> {
        let id_str = id.to_string();

        // Embedded comments/attachments go with the document.
        self.db
            .query("DELETE type::record('task', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list_all(&self) -> TaskhiveResult<Vec<Task>> {
        self.list_where("", Vec::new()).await
    }

    async fn list_by_creator(&self, user_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.list_where(
            " WHERE created_by = $user_id",
            vec![("user_id", user_id.to_string())],
        )
        .await
    }

    async fn list_by_assignee(&self, user_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.list_where(
            " WHERE assigned_to = $user_id",
            vec![("user_id", user_id.to_string())],
        )
        .await
    }

    async fn list_by_project(&self, project_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.list_where(
            " WHERE project_id = $project_id",
            vec![("project_id", project_id.to_string())],
        )
        .await
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskhiveResult<Vec<Task>> {
        self.list_where(
            " WHERE status = $status",
            vec![("status", status_to_string(status).to_string())],
        )
        .await
    }

    async fn list_by_assignee_and_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
    ) -> TaskhiveResult<Vec<Task>> {
        self.list_where(
            " WHERE assigned_to = $user_id AND status = $status",
            vec![
                ("user_id", user_id.to_string()),
                ("status", status_to_string(status).to_string()),
            ],
        )
        .await
    }

    async fn search(&self, keyword: &str) -> TaskhiveResult<Vec<Task>> {
        // Empty keyword matches everything: contains(s, "") is true.
        let lowered = keyword.to_lowercase();
        self.list_where(
            " WHERE string::contains(string::lowercase(title), $keyword) \
             OR string::contains(string::lowercase(description ?? ''), $keyword)",
            vec![("keyword", lowered)],
        )
        .await
    }
}
