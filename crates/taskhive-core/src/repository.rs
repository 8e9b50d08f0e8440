//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and single-document. `save` is a
//! full-document replace with last-write-wins semantics: there is no
//! version check, and a later save silently overwrites concurrent
//! writes to the same id. Services do read-modify-write against these
//! traits; the patch/timestamp logic lives in the service layer, not
//! here.

use uuid::Uuid;

use crate::error::TaskhiveResult;
use crate::models::{
    project::Project,
    task::{Task, TaskStatus},
    user::User,
};

pub trait UserRepository: Send + Sync {
    /// Fails with `NotFound` if the id does not exist.
    fn get(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<User>> + Send;
    /// Insert if the id is new, otherwise full replace.
    fn save(&self, user: User) -> impl Future<Output = TaskhiveResult<User>> + Send;
    /// Idempotent: deleting a missing id is a no-op.
    fn delete(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<()>> + Send;
    fn get_by_username(&self, username: &str)
    -> impl Future<Output = TaskhiveResult<User>> + Send;
    fn exists_by_username(&self, username: &str)
    -> impl Future<Output = TaskhiveResult<bool>> + Send;
    fn exists_by_email(&self, email: &str) -> impl Future<Output = TaskhiveResult<bool>> + Send;
}

pub trait ProjectRepository: Send + Sync {
    fn get(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<Project>> + Send;
    fn save(&self, project: Project) -> impl Future<Output = TaskhiveResult<Project>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<()>> + Send;
    fn list_all(&self) -> impl Future<Output = TaskhiveResult<Vec<Project>>> + Send;
    fn list_by_creator(&self, user_id: Uuid)
    -> impl Future<Output = TaskhiveResult<Vec<Project>>> + Send;
    /// Array-containment query over the member list.
    fn list_by_member(&self, user_id: Uuid)
    -> impl Future<Output = TaskhiveResult<Vec<Project>>> + Send;
}

pub trait TaskRepository: Send + Sync {
    fn get(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<Task>> + Send;
    fn save(&self, task: Task) -> impl Future<Output = TaskhiveResult<Task>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<()>> + Send;
    fn list_all(&self) -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    fn list_by_creator(&self, user_id: Uuid)
    -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    fn list_by_assignee(&self, user_id: Uuid)
    -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    fn list_by_project(&self, project_id: Uuid)
    -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    fn list_by_status(&self, status: TaskStatus)
    -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    fn list_by_assignee_and_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
    ) -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
    /// Case-insensitive substring match over title OR description. The
    /// empty keyword matches everything.
    fn search(&self, keyword: &str) -> impl Future<Output = TaskhiveResult<Vec<Task>>> + Send;
}
