use crewdesk_shared::{Row, RowSource, TableSummary};
use crewdesk_table::{BucketFilter, TableSpec, TableView, ViewState, derive_view};

use crate::error::AppError;
use crate::page::LoadGeneration;

/// A table page: rows loaded once, then filtered and sorted in memory.
#[derive(Debug)]
pub struct ProjectsPage {
    spec: TableSpec,
    state: ViewState,
    rows: Vec<Row>,
    summary: Option<TableSummary>,
    generation: LoadGeneration,
}

impl ProjectsPage {
    pub fn new(spec: TableSpec) -> Self {
        Self {
            state: spec.default_state(),
            spec,
            rows: Vec::new(),
            summary: None,
            generation: LoadGeneration::new(),
        }
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn summary(&self) -> Option<&TableSummary> {
        self.summary.as_ref()
    }

    /// Handle for starting loads elsewhere; any newer load makes an
    /// in-flight one stale.
    pub fn generation(&self) -> LoadGeneration {
        self.generation.clone()
    }

    /// Fetches the rows, plus the summary for tables that have one, and
    /// resets the view state to its defaults.
    #[tracing::instrument(skip_all, fields(endpoint = %self.spec.endpoint))]
    pub async fn load(&mut self, source: &dyn RowSource) -> Result<usize, AppError> {
        let stamp = self.generation.begin();
        let spec = &self.spec;

        let summary = async {
            if spec.summary {
                source.fetch_summary(&spec.endpoint).await
            } else {
                Ok(None)
            }
        };
        let (rows, summary) =
            futures::try_join!(source.fetch_rows(&spec.endpoint, &spec.rows_key), summary)?;
        self.generation.check(stamp)?;

        self.rows = rows;
        self.summary = summary;
        self.state = self.spec.default_state();

        tracing::info!(rows = self.rows.len(), "loaded table rows");

        Ok(self.rows.len())
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    pub fn click_sort(&mut self, key: &str) {
        self.state.click_sort(key);
    }

    pub fn click_kpi(&mut self, filter: BucketFilter) {
        self.state.click_bucket(filter);
    }

    pub fn view(&self) -> TableView<'_> {
        derive_view(&self.rows, &self.spec, &self.state)
    }
}
