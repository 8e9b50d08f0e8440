//! TaskHive Services — user registration and identity lookup, project
//! lifecycle and membership, task lifecycle with embedded comments and
//! attachments.
//!
//! Every service is generic over the `taskhive-core` repository traits
//! so the layer has no dependency on the database crate. All mutations
//! are read-modify-write against the store: the service loads the
//! current document, applies a sparse patch in memory, stamps
//! `updated_at`, and saves the full document back (last-write-wins).

pub mod password;
pub mod project;
pub mod task;
pub mod user;

pub use project::ProjectService;
pub use task::TaskService;
pub use user::UserService;
