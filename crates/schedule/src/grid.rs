use std::collections::{BTreeMap, HashMap, HashSet};

use crewdesk_shared::{Assignment, Crew, format_ymd, parse_ymd};
use serde::Serialize;
use time::Date;

use crate::{WeekWindow, crew_display_order, day_header};

/// One assignment as shown in a single crew/day cell.
///
/// Carries the whole assignment context, not just the day slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridItem {
    pub project_id: i64,
    pub project_name: String,
    pub project_status: String,
    pub start_date: String,
    pub end_date: String,
    pub crews: Vec<String>,
    pub pms: Vec<String>,
}

/// Assignments spread over the `(crew code, date)` cells of one week.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    cells: HashMap<String, BTreeMap<Date, Vec<GridItem>>>,
    first_seen: Vec<String>,
    skipped: usize,
}

impl Expansion {
    pub fn items(&self, crew_code: &str, date: Date) -> &[GridItem] {
        self.cells
            .get(crew_code)
            .and_then(|days| days.get(&date))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_activity(&self, crew_code: &str) -> bool {
        self.cells
            .get(crew_code)
            .is_some_and(|days| days.values().any(|items| !items.is_empty()))
    }

    /// Crew codes that received at least one item, in first-seen order.
    pub fn crew_codes(&self) -> &[String] {
        &self.first_seen
    }

    pub fn item_count(&self) -> usize {
        self.cells
            .values()
            .flat_map(|days| days.values())
            .map(Vec::len)
            .sum()
    }

    /// Assignments left out because a date did not parse.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn push(&mut self, crew_code: &str, date: Date, item: GridItem) {
        if !self.cells.contains_key(crew_code) {
            self.first_seen.push(crew_code.to_owned());
        }

        self.cells
            .entry(crew_code.to_owned())
            .or_default()
            .entry(date)
            .or_default()
            .push(item);
    }
}

/// Expands every assignment into one item per covered day of `week` and per
/// crew code.
///
/// The covered days are the overlap of the assignment's inclusive
/// `[start_date, end_date]` with the week. Assignments without crew codes
/// produce nothing; assignments with an unparseable date are skipped and
/// counted.
pub fn expand_assignments(assignments: &[Assignment], week: WeekWindow) -> Expansion {
    let mut expansion = Expansion::default();

    for assignment in assignments {
        let crew_codes = assignment.crew_codes();
        if crew_codes.is_empty() {
            continue;
        }

        let start = assignment.start_date.as_deref().and_then(parse_ymd);
        let end = assignment.end_date.as_deref().and_then(parse_ymd);
        let (Some(start), Some(end)) = (start, end) else {
            tracing::warn!(
                project_id = assignment.project_id,
                start_date = ?assignment.start_date,
                end_date = ?assignment.end_date,
                "skipping assignment with unparseable dates"
            );
            expansion.skipped += 1;
            continue;
        };

        let from = start.max(week.start());
        let to = end.min(week.end());
        if from > to {
            continue;
        }

        let item = GridItem {
            project_id: assignment.project_id,
            project_name: assignment.project_name.clone().unwrap_or_default(),
            project_status: assignment.project_status.clone().unwrap_or_default(),
            start_date: assignment.start_date.clone().unwrap_or_default(),
            end_date: assignment.end_date.clone().unwrap_or_default(),
            crews: crew_codes.clone(),
            pms: assignment.normalized_pm_initials(),
        };

        for date in week.days().into_iter().filter(|day| from <= *day && *day <= to) {
            for crew_code in &crew_codes {
                expansion.push(crew_code, date, item.clone());
            }
        }
    }

    expansion
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDay {
    pub date: String,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub date: String,
    pub items: Vec<GridItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewRow {
    pub code: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub cells: Vec<GridCell>,
}

/// Presentation model of the weekly schedule: seven day columns and one row
/// per crew with activity this week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    pub week_start: String,
    pub week_end: String,
    pub range_label: String,
    pub days: Vec<GridDay>,
    pub rows: Vec<CrewRow>,
    pub skipped_assignments: usize,
}

/// Builds the weekly grid for `week`.
///
/// Rows follow [`crew_display_order`]; codes that only appear in assignments
/// are appended in first-seen order. Crews without any item this week get
/// no row.
pub fn derive_grid(assignments: &[Assignment], crews: &[Crew], week: WeekWindow) -> WeekGrid {
    let expansion = expand_assignments(assignments, week);
    let days = week.days();

    let mut seen = HashSet::new();
    let listed = crew_display_order(crews)
        .into_iter()
        .map(|crew| (crew.code.as_str(), Some(crew)));
    let unlisted = expansion.crew_codes().iter().map(|code| (code.as_str(), None));

    let mut rows = Vec::new();
    for (code, crew) in listed.chain(unlisted) {
        if !seen.insert(code) || !expansion.has_activity(code) {
            continue;
        }

        rows.push(CrewRow {
            code: code.to_owned(),
            name: crew.and_then(|crew: &Crew| crew.name.clone()),
            color: crew.and_then(|crew: &Crew| crew.color.clone()),
            cells: days
                .iter()
                .map(|date| GridCell {
                    date: format_ymd(*date),
                    items: expansion.items(code, *date).to_vec(),
                })
                .collect(),
        });
    }

    tracing::debug!(
        week = %week.range_label(),
        rows = rows.len(),
        items = expansion.item_count(),
        skipped = expansion.skipped(),
        "derived schedule grid"
    );

    WeekGrid {
        week_start: format_ymd(week.start()),
        week_end: format_ymd(week.end()),
        range_label: week.range_label(),
        days: days
            .iter()
            .map(|date| GridDay {
                date: format_ymd(*date),
                header: day_header(*date),
            })
            .collect(),
        rows,
        skipped_assignments: expansion.skipped(),
    }
}
