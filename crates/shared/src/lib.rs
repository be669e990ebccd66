mod date;
pub mod row;
pub mod schedule;
mod source;
pub mod team;

pub use date::*;
pub use row::{FieldValue, Row, TableSummary};
pub use schedule::{Assignment, Crew, SchedulePayload};
pub use source::*;
pub use team::ProjectManager;
