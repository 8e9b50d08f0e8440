//! Project domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Immutable after creation.
    pub created_by: Uuid,
    /// Set-like member list. The creator is merged in at creation time.
    pub members: Vec<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    /// Initial members. The creator is appended if absent.
    pub members: Vec<Uuid>,
}

/// Sparse patch over {name, description}.
///
/// Membership and the active flag cannot be mutated through this patch;
/// membership changes go through `add_member` / `remove_member`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}
