//! Task service — lifecycle, assignment, comments, attachments, and
//! filter/search queries.

use chrono::Utc;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::task::{
    Attachment, Comment, CreateTask, NewAttachment, Task, TaskPriority, TaskStatus, UpdateTask,
};
use taskhive_core::repository::{TaskRepository, UserRepository};
use uuid::Uuid;

/// Task lifecycle over the aggregate root. Comments and attachments
/// are only ever created through the append operations here and only
/// ever destroyed with their parent task.
///
/// Status transitions are deliberately unenforced: any status may be
/// set from any other via `update` or `mark_completed`, matching the
/// permissive behavior of the rest of the system.
pub struct TaskService<T: TaskRepository, U: UserRepository> {
    tasks: T,
    users: U,
}

impl<T: TaskRepository, U: UserRepository> TaskService<T, U> {
    pub fn new(tasks: T, users: U) -> Self {
        Self { tasks, users }
    }

    /// Create a task. Status defaults to `Open` and priority to
    /// `Medium` when unspecified.
    pub async fn create(&self, input: CreateTask, created_by: Uuid) -> TaskhiveResult<Task> {
        let now = Utc::now();

        let task = Task {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status.unwrap_or(TaskStatus::Open),
            priority: input.priority.unwrap_or(TaskPriority::Medium),
            created_by,
            assigned_to: input.assigned_to,
            project_id: input.project_id,
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.tasks.save(task).await
    }

    /// Sparse update. Patching status to `Completed` stamps
    /// `completed_at` with the current time regardless of the prior
    /// status, so repeating the patch refreshes the stamp.
    pub async fn update(&self, task_id: Uuid, patch: UpdateTask) -> TaskhiveResult<Task> {
        let mut task = self.tasks.get(task_id).await?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            task.status = status;
            if status == TaskStatus::Completed {
                task.completed_at = Some(Utc::now());
            }
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            task.assigned_to = Some(assigned_to);
        }
        if let Some(project_id) = patch.project_id {
            task.project_id = Some(project_id);
        }

        task.updated_at = Utc::now();
        self.tasks.save(task).await
    }

    /// Delete by id. Embedded comments and attachments are removed
    /// with the document.
    pub async fn delete(&self, task_id: Uuid) -> TaskhiveResult<()> {
        self.tasks.delete(task_id).await
    }

    pub async fn get(&self, task_id: Uuid) -> TaskhiveResult<Task> {
        self.tasks.get(task_id).await
    }

    pub async fn list_all(&self) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_all().await
    }

    pub async fn list_by_assignee(&self, user_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_by_assignee(user_id).await
    }

    pub async fn list_by_creator(&self, user_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_by_creator(user_id).await
    }

    pub async fn list_by_project(&self, project_id: Uuid) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_by_project(project_id).await
    }

    pub async fn list_by_status(&self, status: TaskStatus) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_by_status(status).await
    }

    pub async fn list_by_assignee_and_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
    ) -> TaskhiveResult<Vec<Task>> {
        self.tasks.list_by_assignee_and_status(user_id, status).await
    }

    /// Case-insensitive substring match over title OR description. An
    /// empty keyword matches every task.
    pub async fn search(&self, keyword: &str) -> TaskhiveResult<Vec<Task>> {
        self.tasks.search(keyword).await
    }

    /// Assign a task. Fails with `NotFound` if the task or the user is
    /// absent. Does not change the task's status.
    pub async fn assign(&self, task_id: Uuid, user_id: Uuid) -> TaskhiveResult<Task> {
        let mut task = self.tasks.get(task_id).await?;

        // Verify the user exists.
        self.users.get(user_id).await?;

        task.assigned_to = Some(user_id);
        task.updated_at = Utc::now();
        self.tasks.save(task).await
    }

    /// Unconditionally set status to `Completed` and stamp
    /// `completed_at`, whatever the current status.
    pub async fn mark_completed(&self, task_id: Uuid) -> TaskhiveResult<Task> {
        let mut task = self.tasks.get(task_id).await?;

        let now = Utc::now();
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
        task.updated_at = now;
        self.tasks.save(task).await
    }

    /// Append a comment, capturing the author's current username. The
    /// captured name is not kept in sync with later profile changes.
    pub async fn add_comment(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> TaskhiveResult<Task> {
        let mut task = self.tasks.get(task_id).await?;

        let user = self.users.get(user_id).await?;

        let comment = Comment {
            id: Uuid::new_v4(),
            content,
            author_id: user.id,
            author_name: user.username,
            created_at: Utc::now(),
        };

        task.comments.push(comment);
        task.updated_at = Utc::now();
        self.tasks.save(task).await
    }

    /// Record attachment metadata. The file bytes were already handed
    /// to the external file store at the boundary; only the location
    /// reference is kept here.
    pub async fn add_attachment(
        &self,
        task_id: Uuid,
        metadata: NewAttachment,
    ) -> TaskhiveResult<Task> {
        let mut task = self.tasks.get(task_id).await?;

        let attachment = Attachment {
            id: Uuid::new_v4(),
            file_name: metadata.file_name,
            content_type: metadata.content_type,
            location: metadata.location,
            size: metadata.size,
            uploaded_by: metadata.uploaded_by,
            uploaded_at: Utc::now(),
        };

        task.attachments.push(attachment);
        task.updated_at = Utc::now();
        self.tasks.save(task).await
    }
}
