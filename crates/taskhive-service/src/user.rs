//! User service — registration, identity lookup, and profile updates.

use chrono::Utc;
use taskhive_core::error::{TaskhiveError, TaskhiveResult};
use taskhive_core::models::user::{CreateUser, DEFAULT_ROLE, UpdateUserProfile, User};
use taskhive_core::repository::UserRepository;
use uuid::Uuid;

use crate::password;

/// User registration and identity lookup.
///
/// Generic over the repository implementation so that this layer has
/// no dependency on the database crate. Input validation (non-empty
/// username, well-formed email) happens at the boundary; the service
/// assumes validated input.
pub struct UserService<U: UserRepository> {
    users: U,
    pepper: Option<String>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: U) -> Self {
        Self {
            users,
            pepper: None,
        }
    }

    /// Construct with a server-side pepper applied before Argon2id
    /// hashing.
    pub fn with_pepper(users: U, pepper: String) -> Self {
        Self {
            users,
            pepper: Some(pepper),
        }
    }

    /// Register a new account. The raw password is hashed before it
    /// ever reaches the store; an empty role list defaults to
    /// [`DEFAULT_ROLE`].
    pub async fn register(&self, input: CreateUser) -> TaskhiveResult<User> {
        let now = Utc::now();

        let password_hash = password::hash_password(&input.password, self.pepper.as_deref())?;

        let roles = if input.roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            input.roles
        };

        let user = User {
            id: Uuid::new_v4(),
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            roles,
            created_at: now,
            updated_at: now,
        };

        self.users.save(user).await
    }

    /// Verify a login credential against the stored hash. The caller
    /// resolves the account first; this never touches the store.
    pub fn verify_credential(&self, user: &User, raw_password: &str) -> TaskhiveResult<bool> {
        password::verify_password(raw_password, &user.password_hash, self.pepper.as_deref())
    }

    pub async fn find_by_id(&self, id: Uuid) -> TaskhiveResult<User> {
        self.users.get(id).await
    }

    pub async fn find_by_username(&self, username: &str) -> TaskhiveResult<User> {
        self.users.get_by_username(username).await
    }

    pub async fn exists_by_username(&self, username: &str) -> TaskhiveResult<bool> {
        self.users.exists_by_username(username).await
    }

    pub async fn exists_by_email(&self, email: &str) -> TaskhiveResult<bool> {
        self.users.exists_by_email(email).await
    }

    /// Sparse profile update. Changing the email to one already owned
    /// by another account fails with `AlreadyExists` and writes
    /// nothing; re-stating the current email is not a conflict.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: UpdateUserProfile,
    ) -> TaskhiveResult<User> {
        let mut user = self.users.get(user_id).await?;

        if let Some(first_name) = patch.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(email) = patch.email {
            if email != user.email {
                if self.users.exists_by_email(&email).await? {
                    return Err(TaskhiveError::AlreadyExists {
                        entity: "email".into(),
                    });
                }
                user.email = email;
            }
        }
        if let Some(phone) = patch.phone {
            user.phone = Some(phone);
        }

        user.updated_at = Utc::now();
        self.users.save(user).await
    }
}
