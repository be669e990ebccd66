use crewdesk_schedule::{WeekGrid, WeekWindow, derive_grid};
use crewdesk_shared::{AssignmentSource, TeamSource};
use crewdesk_team::{TeamColorCache, TeamColors};
use time::Date;

use crate::error::AppError;
use crate::page::LoadGeneration;

/// The weekly schedule page: one week in view, reloaded on navigation.
#[derive(Debug)]
pub struct SchedulePage {
    week: WeekWindow,
    timezone: String,
    grid: Option<WeekGrid>,
    colors: TeamColorCache,
    generation: LoadGeneration,
}

impl SchedulePage {
    /// A page showing the week that contains `date`.
    pub fn new(date: Date, timezone: impl Into<String>) -> Self {
        Self::with_week(WeekWindow::containing(date), timezone.into())
    }

    /// A page showing the current week in `timezone`.
    pub fn current(timezone: impl Into<String>) -> Self {
        let timezone = timezone.into();
        Self::with_week(WeekWindow::this_week(timezone.as_str()), timezone)
    }

    fn with_week(week: WeekWindow, timezone: String) -> Self {
        Self {
            week,
            timezone,
            grid: None,
            colors: TeamColorCache::new(),
            generation: LoadGeneration::new(),
        }
    }

    pub fn week(&self) -> WeekWindow {
        self.week
    }

    pub fn grid(&self) -> Option<&WeekGrid> {
        self.grid.as_ref()
    }

    pub fn colors(&self) -> Option<&TeamColors> {
        self.colors.get()
    }

    pub fn generation(&self) -> LoadGeneration {
        self.generation.clone()
    }

    /// Fetches the week's assignments and the team colors concurrently, then
    /// derives the grid. Team colors are fetched once per page.
    pub async fn load(
        &mut self,
        schedule: &dyn AssignmentSource,
        team: &dyn TeamSource,
    ) -> Result<&WeekGrid, AppError> {
        self.load_week(self.week, schedule, team).await
    }

    pub async fn previous_week(
        &mut self,
        schedule: &dyn AssignmentSource,
        team: &dyn TeamSource,
    ) -> Result<&WeekGrid, AppError> {
        self.load_week(self.week.previous(), schedule, team).await
    }

    pub async fn next_week(
        &mut self,
        schedule: &dyn AssignmentSource,
        team: &dyn TeamSource,
    ) -> Result<&WeekGrid, AppError> {
        self.load_week(self.week.next(), schedule, team).await
    }

    pub async fn this_week(
        &mut self,
        schedule: &dyn AssignmentSource,
        team: &dyn TeamSource,
    ) -> Result<&WeekGrid, AppError> {
        let week = WeekWindow::this_week(self.timezone.as_str());
        self.load_week(week, schedule, team).await
    }

    /// The page moves to `week` only once its grid is derived; a failed or
    /// stale load leaves both week and grid as they were.
    #[tracing::instrument(skip_all, fields(week = %week.range_label()))]
    async fn load_week(
        &mut self,
        week: WeekWindow,
        schedule: &dyn AssignmentSource,
        team: &dyn TeamSource,
    ) -> Result<&WeekGrid, AppError> {
        let stamp = self.generation.begin();

        let (payload, _) = futures::try_join!(
            schedule.fetch_schedule(week.start()),
            self.colors.get_or_load(team)
        )?;
        self.generation.check(stamp)?;

        let grid = derive_grid(&payload.assignments, &payload.crews, week);

        tracing::info!(
            crews = payload.crews.len(),
            assignments = payload.assignments.len(),
            rows = grid.rows.len(),
            "loaded schedule"
        );

        self.week = week;
        Ok(self.grid.insert(grid))
    }
}
