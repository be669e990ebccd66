mod generation;
mod projects;
mod schedule;

pub use generation::{LoadGeneration, LoadStamp};
pub use projects::ProjectsPage;
pub use schedule::SchedulePage;
