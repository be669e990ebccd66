use std::collections::BTreeMap;

use crewdesk_shared::Row;
use serde::Serialize;

use crate::{Bucket, BucketFilter, Classifier, ViewState, project_status_label, sort_rows};

/// A column the search box looks at.
#[derive(Debug, Clone)]
pub enum SearchField {
    Field(String),
    /// Text computed from the whole row, e.g. a status label.
    Derived(fn(&Row) -> String),
}

impl SearchField {
    fn text(&self, row: &Row) -> String {
        match self {
            SearchField::Field(field) => row.text(field),
            SearchField::Derived(derive) => derive(row),
        }
    }
}

/// Static description of one table: where its rows come from, what the
/// search box matches and how rows are bucketed for KPI tiles.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub endpoint: String,
    pub rows_key: String,
    pub default_sort: String,
    pub search: Vec<SearchField>,
    pub classifier: Option<Classifier>,
    /// Whether the source serves a summary (average age) with the rows.
    pub summary: bool,
}

impl TableSpec {
    pub fn projects() -> Self {
        Self {
            endpoint: "projects".to_owned(),
            rows_key: "projects".to_owned(),
            default_sort: "project_name".to_owned(),
            search: vec![
                SearchField::Field("project_name".to_owned()),
                SearchField::Field("project_qbo_id".to_owned()),
                SearchField::Derived(project_status_label),
                SearchField::Field("primary_project_manager".to_owned()),
                SearchField::Field("primary_work_crew".to_owned()),
            ],
            classifier: Some(Classifier::projects()),
            summary: false,
        }
    }

    pub fn dashboard() -> Self {
        Self {
            endpoint: "dashboard".to_owned(),
            rows_key: "projects".to_owned(),
            default_sort: "project_name".to_owned(),
            search: vec![
                SearchField::Field("project_name".to_owned()),
                SearchField::Field("project_qbo_id".to_owned()),
            ],
            classifier: None,
            summary: true,
        }
    }

    pub fn default_state(&self) -> ViewState {
        ViewState::sorted_by(self.default_sort.as_str())
    }

    /// `needle` must already be lowercased.
    fn matches_query(&self, row: &Row, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search
                .iter()
                .any(|field| field.text(row).to_lowercase().contains(needle))
    }

    fn matches_bucket(&self, row: &Row, filter: BucketFilter) -> bool {
        match (filter, &self.classifier) {
            (BucketFilter::All, _) => true,
            (BucketFilter::Only(bucket), Some(classifier)) => classifier.classify(row) == bucket,
            (BucketFilter::Only(_), None) => false,
        }
    }
}

/// Bucket totals over the full row set plus the filtered count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCounts {
    pub buckets: BTreeMap<Bucket, usize>,
    pub total: usize,
    pub showing: usize,
}

impl KpiCounts {
    pub fn count(rows: &[Row], classifier: Option<&Classifier>, showing: usize) -> Self {
        let mut buckets = BTreeMap::new();

        if let Some(classifier) = classifier {
            for bucket in classifier.buckets() {
                buckets.insert(bucket, 0);
            }

            for row in rows {
                *buckets.entry(classifier.classify(row)).or_insert(0) += 1;
            }
        }

        Self {
            buckets,
            total: rows.len(),
            showing,
        }
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        self.buckets.get(&bucket).copied().unwrap_or(0)
    }

    /// Tiles in display order: one per bucket, then Total and Showing.
    pub fn tiles(&self, filter: BucketFilter) -> Vec<KpiTile> {
        let mut tiles: Vec<KpiTile> = self
            .buckets
            .iter()
            .map(|(bucket, value)| KpiTile {
                key: bucket.to_string(),
                label: bucket.label(),
                value: *value,
                selected: filter == BucketFilter::Only(*bucket),
                clickable: true,
            })
            .collect();

        tiles.push(KpiTile {
            key: BucketFilter::All.to_string(),
            label: "Total",
            value: self.total,
            selected: filter == BucketFilter::All,
            clickable: true,
        });

        tiles.push(KpiTile {
            key: "showing".to_owned(),
            label: "Showing",
            value: self.showing,
            selected: false,
            clickable: false,
        });

        tiles
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTile {
    pub key: String,
    pub label: &'static str,
    pub value: usize,
    pub selected: bool,
    pub clickable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Row>,
    pub kpis: KpiCounts,
}

/// Filters, sorts and counts `rows` for rendering.
///
/// The visible rows borrow from `rows`; KPI bucket counts are taken over
/// every row regardless of the active filter.
pub fn derive_view<'a>(rows: &'a [Row], spec: &TableSpec, state: &ViewState) -> TableView<'a> {
    let needle = state.query.to_lowercase();

    let mut visible: Vec<&Row> = rows
        .iter()
        .filter(|row| spec.matches_bucket(row, state.bucket_filter))
        .filter(|row| spec.matches_query(row, &needle))
        .collect();

    sort_rows(&mut visible, &state.sort_key, state.sort_direction);

    let kpis = KpiCounts::count(rows, spec.classifier.as_ref(), visible.len());

    tracing::debug!(
        endpoint = %spec.endpoint,
        total = kpis.total,
        showing = kpis.showing,
        "derived table view"
    );

    TableView {
        rows: visible,
        kpis,
    }
}
