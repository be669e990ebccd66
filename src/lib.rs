pub mod config;
pub mod error;
pub mod observability;
pub mod page;
pub mod source;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::page::{LoadGeneration, ProjectsPage, SchedulePage};
pub use crate::source::JsonFileSource;
