use std::path::PathBuf;

use thiserror::Error;
use time::Date;

use crate::{Crew, ProjectManager, Row, SchedulePayload, TableSummary};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Fetches the row set behind a table page.
///
/// `rows_key` names the array inside an enveloped response
/// (`{"projects": [...]}`).
#[async_trait::async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, endpoint: &str, rows_key: &str) -> Result<Vec<Row>, SourceError>;

    /// The `summary` object served with the rows, if any.
    async fn fetch_summary(&self, _endpoint: &str) -> Result<Option<TableSummary>, SourceError> {
        Ok(None)
    }
}

/// Fetches crews and assignments for the week starting at `week_start`.
#[async_trait::async_trait]
pub trait AssignmentSource: Send + Sync {
    async fn fetch_schedule(&self, week_start: Date) -> Result<SchedulePayload, SourceError>;
}

#[async_trait::async_trait]
pub trait TeamSource: Send + Sync {
    async fn fetch_project_managers(&self) -> Result<Vec<ProjectManager>, SourceError>;

    async fn fetch_work_crews(&self) -> Result<Vec<Crew>, SourceError>;
}
