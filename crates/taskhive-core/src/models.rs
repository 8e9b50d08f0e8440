//! Domain models for TaskHive.
//!
//! These are the core types shared across all crates. Tasks own their
//! comments and attachments as embedded documents; the store never
//! addresses a comment or attachment independently of its parent task.

pub mod project;
pub mod task;
pub mod user;
