// Infrastructure module - Background task tracking and backoff timing
pub mod task_manager;
pub mod timer;

pub use task_manager::TaskManager;
pub use timer::{Timer, reconnect_delay};
