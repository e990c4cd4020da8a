pub mod config;
pub mod error;
pub mod repository;
pub mod storage;
pub mod task;

pub use crate::config::Config;
pub use crate::error::{StoreError, TaskError};
pub use crate::repository::TaskRepository;
pub use crate::task::{Status, Task};
