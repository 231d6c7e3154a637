pub mod task;

// Re-exports
pub use task::{Task, TaskInput, TaskStatus, DEFAULT_DESCRIPTION};
