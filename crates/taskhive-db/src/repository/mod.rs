//! SurrealDB repository implementations.

mod project;
mod task;
mod user;

pub use project::SurrealProjectRepository;
pub use task::SurrealTaskRepository;
pub use user::SurrealUserRepository;
