use anyhow::Result;
use crewdesk::{Config, JsonFileSource, ProjectsPage};
use crewdesk_shared::{Row, TableSummary};
use crewdesk_table::format::{format_date_only, format_money, format_percent};
use crewdesk_table::{BucketFilter, KpiTile, SortDirection, project_status_label};
use serde::Serialize;

use super::{OutputFormat, TableKind};

pub struct ProjectsOptions {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub bucket: Option<BucketFilter>,
    pub table: TableKind,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ProjectsOutput<'a> {
    table: &'a str,
    query: &'a str,
    sort_key: &'a str,
    descending: bool,
    bucket: String,
    tiles: Vec<KpiTile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a TableSummary>,
    rows: Vec<&'a Row>,
}

#[tracing::instrument(skip_all, fields(table = ?options.table))]
pub async fn run(config: Config, options: ProjectsOptions) -> Result<()> {
    let source = JsonFileSource::new(&config.data.dir);
    let mut page = ProjectsPage::new(options.table.spec());
    page.load(&source).await?;

    if let Some(query) = options.query {
        page.search(query);
    }
    if let Some(sort) = options.sort.as_deref() {
        if sort != page.state().sort_key {
            page.click_sort(sort);
        }
    }
    if options.desc {
        let key = page.state().sort_key.clone();
        page.click_sort(&key);
    }
    if let Some(bucket) = options.bucket {
        if bucket != page.state().bucket_filter {
            page.click_kpi(bucket);
        }
    }

    let view = page.view();
    let state = page.state();
    let tiles = view.kpis.tiles(state.bucket_filter);

    match options.format {
        OutputFormat::Json => {
            let output = ProjectsOutput {
                table: &page.spec().endpoint,
                query: &state.query,
                sort_key: &state.sort_key,
                descending: state.sort_direction == SortDirection::Descending,
                bucket: state.bucket_filter.to_string(),
                tiles,
                summary: page.summary(),
                rows: view.rows,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", tiles_line(&tiles));
            if page.spec().summary {
                println!("{}", avg_age_line(page.summary()));
            }
            println!();

            let columns = columns(options.table);
            println!(
                "{}",
                columns
                    .iter()
                    .map(|column| column.header)
                    .collect::<Vec<_>>()
                    .join("\t")
            );
            for row in &view.rows {
                println!(
                    "{}",
                    columns
                        .iter()
                        .map(|column| column.render(row))
                        .collect::<Vec<_>>()
                        .join("\t")
                );
            }

            if view.rows.is_empty() {
                println!("No projects match these filters.");
            }
        }
    }

    Ok(())
}

fn tiles_line(tiles: &[KpiTile]) -> String {
    tiles
        .iter()
        .map(|tile| {
            let marker = if tile.selected { "*" } else { "" };
            format!("{marker}{}: {}", tile.label, tile.value)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn avg_age_line(summary: Option<&TableSummary>) -> String {
    match summary.and_then(|summary| summary.avg_age_days) {
        Some(days) => format!("Avg age: {days:.1} days"),
        None => "Avg age: - days".to_owned(),
    }
}

#[derive(Clone, Copy)]
enum CellKind {
    Text,
    Status,
    Date,
    Money,
    Percent,
}

struct Column {
    field: &'static str,
    header: &'static str,
    kind: CellKind,
}

impl Column {
    const fn new(field: &'static str, header: &'static str, kind: CellKind) -> Self {
        Self {
            field,
            header,
            kind,
        }
    }

    fn render(&self, row: &Row) -> String {
        let value = row.get(self.field);
        match self.kind {
            CellKind::Text => row.text(self.field),
            CellKind::Status => project_status_label(row),
            CellKind::Date => format_date_only(value),
            CellKind::Money => format_money(value),
            CellKind::Percent => format_percent(value),
        }
    }
}

const PROJECT_COLUMNS: &[Column] = &[
    Column::new("project_name", "Project", CellKind::Text),
    Column::new("project_status", "Status", CellKind::Status),
    Column::new("start_date", "Start", CellKind::Date),
    Column::new("end_date", "End", CellKind::Date),
    Column::new("primary_project_manager", "Project Manager", CellKind::Text),
    Column::new("primary_work_crew", "Work Crew", CellKind::Text),
    Column::new("project_balance", "Balance", CellKind::Money),
    Column::new("total_profit", "Profit", CellKind::Money),
    Column::new("profit_margin", "Margin", CellKind::Percent),
];

const DASHBOARD_COLUMNS: &[Column] = &[
    Column::new("project_name", "Project", CellKind::Text),
    Column::new("project_balance", "Balance", CellKind::Money),
    Column::new("total_income", "Income", CellKind::Money),
    Column::new("total_cost", "Cost", CellKind::Money),
    Column::new("total_profit", "Profit", CellKind::Money),
    Column::new("profit_margin", "Margin", CellKind::Percent),
    Column::new("project_create_dttm", "Created", CellKind::Date),
    Column::new("total_transaction_ct", "Txns", CellKind::Text),
];

fn columns(table: TableKind) -> &'static [Column] {
    match table {
        TableKind::Projects => PROJECT_COLUMNS,
        TableKind::Dashboard => DASHBOARD_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_age_line() {
        let summary = TableSummary {
            avg_age_days: Some(12.34),
        };

        assert_eq!(avg_age_line(Some(&summary)), "Avg age: 12.3 days");
        assert_eq!(avg_age_line(Some(&TableSummary::default())), "Avg age: - days");
        assert_eq!(avg_age_line(None), "Avg age: - days");
    }
}
