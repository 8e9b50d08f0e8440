//! Project service — lifecycle and membership management.

use chrono::Utc;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::project::{CreateProject, Project, UpdateProject};
use taskhive_core::repository::{ProjectRepository, UserRepository};
use uuid::Uuid;

/// Project lifecycle and membership.
///
/// The user repository is only consulted for existence checks when
/// adding members; projects otherwise reference users by bare id.
pub struct ProjectService<P: ProjectRepository, U: UserRepository> {
    projects: P,
    users: U,
}

impl<P: ProjectRepository, U: UserRepository> ProjectService<P, U> {
    pub fn new(projects: P, users: U) -> Self {
        Self { projects, users }
    }

    /// Create a project. The creator is merged into the member list if
    /// the caller did not include it.
    pub async fn create(&self, input: CreateProject, created_by: Uuid) -> TaskhiveResult<Project> {
        let now = Utc::now();

        let mut members = input.members;
        if !members.contains(&created_by) {
            members.push(created_by);
        }

        let project = Project {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            created_by,
            members,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.projects.save(project).await
    }

    /// Sparse update over {name, description}. Membership and the
    /// active flag are not mutable through this path.
    pub async fn update(&self, project_id: Uuid, patch: UpdateProject) -> TaskhiveResult<Project> {
        let mut project = self.projects.get(project_id).await?;

        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = Some(description);
        }

        project.updated_at = Utc::now();
        self.projects.save(project).await
    }

    /// Delete by id. Tasks referencing the project are left with a
    /// dangling `project_id`.
    pub async fn delete(&self, project_id: Uuid) -> TaskhiveResult<()> {
        self.projects.delete(project_id).await
    }

    pub async fn get(&self, project_id: Uuid) -> TaskhiveResult<Project> {
        self.projects.get(project_id).await
    }

    pub async fn list_all(&self) -> TaskhiveResult<Vec<Project>> {
        self.projects.list_all().await
    }

    pub async fn list_by_creator(&self, user_id: Uuid) -> TaskhiveResult<Vec<Project>> {
        self.projects.list_by_creator(user_id).await
    }

    pub async fn list_by_member(&self, user_id: Uuid) -> TaskhiveResult<Vec<Project>> {
        self.projects.list_by_member(user_id).await
    }

    /// Add a member. Fails with `NotFound` if the project or the user
    /// is absent. Idempotent: re-adding an existing member returns the
    /// project unchanged without a write or an `updated_at` bump.
    pub async fn add_member(&self, project_id: Uuid, user_id: Uuid) -> TaskhiveResult<Project> {
        let mut project = self.projects.get(project_id).await?;

        // Verify the user exists.
        self.users.get(user_id).await?;

        if project.members.contains(&user_id) {
            return Ok(project);
        }

        project.members.push(user_id);
        project.updated_at = Utc::now();
        self.projects.save(project).await
    }

    /// Set-like removal: removing a non-member is a silent no-op on
    /// the member list, but `updated_at` is stamped and the document
    /// saved either way. Removing the creator is not prevented.
    pub async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> TaskhiveResult<Project> {
        let mut project = self.projects.get(project_id).await?;

        project.members.retain(|m| *m != user_id);
        project.updated_at = Utc::now();
        self.projects.save(project).await
    }
}
