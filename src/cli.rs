use clap::ValueEnum;
use crewdesk_table::TableSpec;

pub mod projects;
pub mod schedule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Projects,
    Dashboard,
}

impl TableKind {
    pub fn spec(self) -> TableSpec {
        match self {
            TableKind::Projects => TableSpec::projects(),
            TableKind::Dashboard => TableSpec::dashboard(),
        }
    }
}
