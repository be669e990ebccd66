use crewdesk::{AppError, JsonFileSource, LoadGeneration, ProjectsPage, SchedulePage};
use crewdesk_shared::{
    AssignmentSource, Crew, ProjectManager, Row, RowSource, SchedulePayload, SourceError,
    TeamSource,
};
use crewdesk_table::{Bucket, BucketFilter, SortDirection, TableSpec};
use temp_dir::TempDir;
use time::{Date, macros::date};

fn write(dir: &TempDir, name: &str, contents: &str) {
    std::fs::write(dir.child(name), contents).unwrap();
}

fn project_data() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "projects.json",
        r#"{"projects": [
            {"id": 1, "project_name": "Acme", "project_status": "completed", "project_balance": 100},
            {"id": 2, "project_name": "Beta", "project_status": "not_started", "project_balance": 50},
            {"id": 3, "project_name": "Cobalt", "project_status": "in_progress", "needs_assignment": true}
        ]}"#,
    );
    dir
}

fn schedule_data() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "schedule.json",
        r#"{
            "crews": [{"id": 1, "code": "A", "name": "Alpha"}, {"id": 2, "code": "B", "name": "Bravo"}],
            "assignments": [
                {"project_id": 7, "project_name": "Kitchen", "start_date": "2024-01-03", "end_date": "2024-01-10", "work_crew_codes": ["A"], "pm_initials": ["jd"]}
            ]
        }"#,
    );
    write(
        &dir,
        "schedule-2024-01-08.json",
        r#"{"crews": [{"id": 2, "code": "B"}], "assignments": [
            {"project_id": 8, "start_date": "2024-01-08", "end_date": "2024-01-08", "work_crew_codes": ["B"]}
        ]}"#,
    );
    write(
        &dir,
        "project-managers.json",
        r##"[{"id": 1, "first_name": "Jane", "last_name": "Doe", "color": "#123456"}]"##,
    );
    write(
        &dir,
        "work-crews.json",
        r##"{"work_crews": [{"id": 1, "code": "A", "name": "Alpha", "color": "#ffffff"}]}"##,
    );
    dir
}

fn names(page: &ProjectsPage) -> Vec<String> {
    page.view()
        .rows
        .iter()
        .map(|row| row.text("project_name"))
        .collect()
}

#[tokio::test]
async fn test_projects_page_interaction() {
    let dir = project_data();
    let source = JsonFileSource::new(dir.path());
    let mut page = ProjectsPage::new(TableSpec::projects());

    assert_eq!(page.load(&source).await.unwrap(), 3);
    assert_eq!(names(&page), vec!["Acme", "Beta", "Cobalt"]);

    page.click_sort("project_name");
    assert_eq!(page.state().sort_direction, SortDirection::Descending);
    assert_eq!(names(&page), vec!["Cobalt", "Beta", "Acme"]);

    page.click_kpi(BucketFilter::Only(Bucket::Completed));
    let view = page.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.kpis.get(Bucket::Completed), 1);
    assert_eq!(view.kpis.get(Bucket::NotStarted), 1);
    assert_eq!(view.kpis.get(Bucket::NeedsAssignment), 1);
    assert_eq!(view.kpis.total, 3);

    page.click_kpi(BucketFilter::Only(Bucket::Completed));
    page.search("be");
    assert_eq!(names(&page), vec!["Beta"]);
}

#[tokio::test]
async fn test_reload_resets_view_state() {
    let dir = project_data();
    let source = JsonFileSource::new(dir.path());
    let mut page = ProjectsPage::new(TableSpec::projects());
    page.load(&source).await.unwrap();

    page.search("acme");
    page.click_sort("project_balance");
    page.load(&source).await.unwrap();

    assert_eq!(page.state(), &TableSpec::projects().default_state());
}

#[tokio::test]
async fn test_projects_page_load_failure() {
    let dir = TempDir::new().unwrap();
    let source = JsonFileSource::new(dir.path());
    let mut page = ProjectsPage::new(TableSpec::projects());

    let err = page.load(&source).await.unwrap_err();

    assert!(matches!(err, AppError::Source(SourceError::Io { .. })));
    assert!(page.rows().is_empty());
}

#[tokio::test]
async fn test_dashboard_page_loads_summary() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "dashboard.json",
        r#"{"projects": [{"id": 1, "project_name": "Acme"}], "summary": {"avg_age_days": 30.5}}"#,
    );
    let source = JsonFileSource::new(dir.path());

    let mut dashboard = ProjectsPage::new(TableSpec::dashboard());
    assert_eq!(dashboard.load(&source).await.unwrap(), 1);
    assert_eq!(dashboard.summary().unwrap().avg_age_days, Some(30.5));

    let dir = project_data();
    let source = JsonFileSource::new(dir.path());
    let mut projects = ProjectsPage::new(TableSpec::projects());
    projects.load(&source).await.unwrap();
    assert!(projects.summary().is_none());
}

/// Starts a newer load on the page while its own fetch is in flight.
struct NavigatingSource {
    generation: LoadGeneration,
    rows: Vec<Row>,
}

#[async_trait::async_trait]
impl RowSource for NavigatingSource {
    async fn fetch_rows(&self, _endpoint: &str, _rows_key: &str) -> Result<Vec<Row>, SourceError> {
        self.generation.begin();
        Ok(self.rows.clone())
    }
}

#[tokio::test]
async fn test_stale_projects_load_is_discarded() {
    let mut page = ProjectsPage::new(TableSpec::projects());
    let source = NavigatingSource {
        generation: page.generation(),
        rows: vec![Row::new().with("project_name", "Late")],
    };

    let err = page.load(&source).await.unwrap_err();

    assert!(err.is_stale());
    assert!(page.rows().is_empty());
}

#[tokio::test]
async fn test_schedule_page_loads_and_navigates() {
    let dir = schedule_data();
    let source = JsonFileSource::new(dir.path());
    let mut page = SchedulePage::new(date!(2024 - 01 - 04), "America/Denver");

    let grid = page.load(&source, &source).await.unwrap();
    assert_eq!(grid.week_start, "2024-01-01");
    assert_eq!(grid.rows.len(), 1);
    assert_eq!(grid.rows[0].code, "A");
    assert_eq!(grid.rows[0].name.as_deref(), Some("Alpha"));
    assert_eq!(
        grid.rows[0]
            .cells
            .iter()
            .filter(|cell| !cell.items.is_empty())
            .count(),
        5
    );

    let colors = page.colors().unwrap();
    assert_eq!(colors.pm_color_by_initials("JD"), Some("#123456"));
    assert_eq!(colors.crew_color("alpha"), Some("#ffffff"));

    let next = page.next_week(&source, &source).await.unwrap();
    assert_eq!(next.week_start, "2024-01-08");
    assert_eq!(next.rows.len(), 1);
    assert_eq!(next.rows[0].code, "B");
    assert_eq!(next.rows[0].cells[0].items[0].project_id, 8);

    let previous = page.previous_week(&source, &source).await.unwrap();
    assert_eq!(previous.week_start, "2024-01-01");
    assert_eq!(previous.rows[0].code, "A");
}

#[tokio::test]
async fn test_failed_navigation_keeps_current_week() {
    let dir = schedule_data();
    write(&dir, "schedule-2024-01-08.json", "{not json");
    let source = JsonFileSource::new(dir.path());
    let mut page = SchedulePage::new(date!(2024 - 01 - 04), "America/Denver");
    page.load(&source, &source).await.unwrap();

    let err = page.next_week(&source, &source).await.unwrap_err();

    assert!(matches!(err, AppError::Source(SourceError::Decode { .. })));
    assert_eq!(page.week().start(), date!(2024 - 01 - 01));
    assert_eq!(page.grid().unwrap().week_start, "2024-01-01");

    let previous = page.previous_week(&source, &source).await.unwrap();
    assert_eq!(previous.week_start, "2023-12-25");
}

#[tokio::test]
async fn test_this_week_navigation_lands_on_monday() {
    let dir = TempDir::new().unwrap();
    write(&dir, "schedule.json", "{}");
    write(&dir, "project-managers.json", "[]");
    write(&dir, "work-crews.json", "[]");
    let source = JsonFileSource::new(dir.path());
    let mut page = SchedulePage::new(date!(2020 - 06 - 10), "America/Denver");

    let grid = page.this_week(&source, &source).await.unwrap();

    assert!(grid.rows.is_empty());
    assert_eq!(page.week().start().weekday(), time::Weekday::Monday);
    assert!(page.week().start() > date!(2020 - 06 - 10));
}

struct NavigatingSchedule {
    generation: LoadGeneration,
}

#[async_trait::async_trait]
impl AssignmentSource for NavigatingSchedule {
    async fn fetch_schedule(&self, _week_start: Date) -> Result<SchedulePayload, SourceError> {
        self.generation.begin();
        Ok(SchedulePayload::default())
    }
}

struct EmptyTeam;

#[async_trait::async_trait]
impl TeamSource for EmptyTeam {
    async fn fetch_project_managers(&self) -> Result<Vec<ProjectManager>, SourceError> {
        Ok(Vec::new())
    }

    async fn fetch_work_crews(&self) -> Result<Vec<Crew>, SourceError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_stale_schedule_load_is_discarded() {
    let mut page = SchedulePage::new(date!(2024 - 01 - 01), "UTC");
    let schedule = NavigatingSchedule {
        generation: page.generation(),
    };

    let result = page.load(&schedule, &EmptyTeam).await;

    assert!(matches!(result, Err(AppError::StaleLoad { .. })));
    assert!(page.grid().is_none());

    let result = page.next_week(&schedule, &EmptyTeam).await;
    assert!(result.unwrap_err().is_stale());
    assert_eq!(page.week().start(), date!(2024 - 01 - 01));
}
