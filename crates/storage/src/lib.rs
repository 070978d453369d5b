#![forbid(unsafe_code)]

pub mod catalog;
pub mod repository;

pub use catalog::{builtin_lessons, CatalogError};
pub use repository::{InMemoryRepository, LessonRepository, ProgressRepository, StorageError};
