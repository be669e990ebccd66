use crewdesk_shared::{SourceError, TeamSource};

use crate::TeamColors;

/// Lazily loaded PM and crew colors for one page session.
#[derive(Debug, Default)]
pub struct TeamColorCache {
    colors: Option<TeamColors>,
}

impl TeamColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.colors.is_some()
    }

    /// The cached colors, or `None` before the first successful load.
    pub fn get(&self) -> Option<&TeamColors> {
        self.colors.as_ref()
    }

    /// Returns the cached colors, fetching them on first use.
    pub async fn get_or_load(
        &mut self,
        source: &dyn TeamSource,
    ) -> Result<&TeamColors, SourceError> {
        let colors = match self.colors.take() {
            Some(colors) => colors,
            None => fetch(source).await?,
        };

        Ok(self.colors.insert(colors))
    }

    pub fn invalidate(&mut self) {
        self.colors = None;
    }

    /// Fetches fresh colors. The previous snapshot is kept if the fetch fails.
    pub async fn reload(&mut self, source: &dyn TeamSource) -> Result<&TeamColors, SourceError> {
        let colors = fetch(source).await?;
        Ok(self.colors.insert(colors))
    }
}

#[tracing::instrument(skip_all)]
async fn fetch(source: &dyn TeamSource) -> Result<TeamColors, SourceError> {
    let (project_managers, crews) = futures::try_join!(
        source.fetch_project_managers(),
        source.fetch_work_crews()
    )?;

    tracing::debug!(
        project_managers = project_managers.len(),
        crews = crews.len(),
        "loaded team colors"
    );

    Ok(TeamColors::new(&project_managers, &crews))
}
