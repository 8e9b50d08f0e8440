//! Task domain model — the aggregate root owning comments and
//! attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Comment embedded in a task. Append-only: never edited or removed
/// except when the parent task is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    /// Username captured at append time. Not kept in sync with later
    /// profile changes.
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Attachment metadata embedded in a task. The file bytes live in an
/// external store; only the location reference is recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub location: String,
    pub size: u64,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamped on every transition into `Completed`, including repeated
    /// ones.
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// Defaults to `Open` when absent.
    pub status: Option<TaskStatus>,
    /// Defaults to `Medium` when absent.
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// Sparse patch: `Some` overwrites, `None` leaves the stored value
/// untouched. A field that is already set cannot be cleared back to
/// none through this patch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// Attachment metadata recorded after the external file store has
/// accepted the bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttachment {
    pub file_name: String,
    pub content_type: String,
    pub location: String,
    pub size: u64,
    pub uploaded_by: Uuid,
}
