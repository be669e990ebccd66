use std::path::{Path, PathBuf};

use async_trait::async_trait;
use crewdesk_shared::{
    AssignmentSource, Crew, ProjectManager, Row, RowSource, SchedulePayload, SourceError,
    TableSummary, TeamSource, format_ymd,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use time::Date;

/// Serves page data from JSON files in one directory.
///
/// - `{endpoint}.json`: rows, either a bare array or `{"<rows_key>": [...]}`,
///   with an optional `summary` object beside the rows
/// - `schedule-YYYY-MM-DD.json` or `schedule.json`: `{crews, assignments}`
/// - `project-managers.json`, `work-crews.json`: bare or enveloped arrays
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_value(&self, path: &Path) -> Result<Value, SourceError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn read_listing<T: DeserializeOwned>(
        &self,
        file_name: &str,
        key: &str,
    ) -> Result<Vec<T>, SourceError> {
        let path = self.dir.join(file_name);
        let value = self.read_value(&path).await?;

        let items = match value {
            Value::Object(mut envelope) => envelope.remove(key).unwrap_or_else(|| {
                tracing::debug!(path = %path.display(), key, "envelope has no rows");
                Value::Array(Vec::new())
            }),
            other => other,
        };

        decode(&path, items)
    }

    /// The week-specific file wins over the shared one.
    async fn schedule_path(&self, week_start: Date) -> PathBuf {
        let dated = self
            .dir
            .join(format!("schedule-{}.json", format_ymd(week_start)));

        match tokio::fs::try_exists(&dated).await {
            Ok(true) => dated,
            _ => self.dir.join("schedule.json"),
        }
    }
}

fn decode<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, SourceError> {
    serde_json::from_value(value).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl RowSource for JsonFileSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_rows(&self, endpoint: &str, rows_key: &str) -> Result<Vec<Row>, SourceError> {
        self.read_listing(&format!("{endpoint}.json"), rows_key)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_summary(&self, endpoint: &str) -> Result<Option<TableSummary>, SourceError> {
        let path = self.dir.join(format!("{endpoint}.json"));

        match self.read_value(&path).await? {
            Value::Object(mut envelope) => match envelope.remove("summary") {
                Some(Value::Object(summary)) => decode(&path, Value::Object(summary)).map(Some),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl AssignmentSource for JsonFileSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_schedule(&self, week_start: Date) -> Result<SchedulePayload, SourceError> {
        let path = self.schedule_path(week_start).await;
        let value = self.read_value(&path).await?;

        decode(&path, value)
    }
}

#[async_trait]
impl TeamSource for JsonFileSource {
    async fn fetch_project_managers(&self) -> Result<Vec<ProjectManager>, SourceError> {
        self.read_listing("project-managers.json", "project_managers")
            .await
    }

    async fn fetch_work_crews(&self) -> Result<Vec<Crew>, SourceError> {
        self.read_listing("work-crews.json", "work_crews").await
    }
}
