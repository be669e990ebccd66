use anyhow::Result;
use crewdesk::{AppError, Config, JsonFileSource, SchedulePage};
use crewdesk_schedule::{GridItem, WeekGrid};
use crewdesk_shared::parse_ymd;
use crewdesk_team::{TeamColors, badge_text_color, pill_text_color};

use super::OutputFormat;

#[tracing::instrument(skip(config))]
pub async fn run(config: Config, week: Option<String>, format: OutputFormat) -> Result<()> {
    let mut page = match week.as_deref() {
        Some(value) => {
            let date = parse_ymd(value).ok_or_else(|| {
                AppError::ValidationError(format!("--week must be YYYY-MM-DD, got {value:?}"))
            })?;
            SchedulePage::new(date, config.schedule.timezone.as_str())
        }
        None => SchedulePage::current(config.schedule.timezone.as_str()),
    };

    let source = JsonFileSource::new(&config.data.dir);
    page.load(&source, &source).await?;

    let Some(grid) = page.grid() else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(grid)?),
        OutputFormat::Text => print_grid(grid, page.colors()),
    }

    Ok(())
}

fn print_grid(grid: &WeekGrid, colors: Option<&TeamColors>) {
    println!("Week {}", grid.range_label);

    if grid.rows.is_empty() {
        println!("No crew assignments this week.");
    }

    for row in &grid.rows {
        let badge = row
            .color
            .as_deref()
            .map(|color| format!(" [{color} on {}]", badge_text_color(color)))
            .unwrap_or_default();
        let name = row.name.as_deref().unwrap_or(&row.code);
        println!();
        println!("{} {name}{badge}", row.code);

        for (day, cell) in grid.days.iter().zip(&row.cells) {
            for item in &cell.items {
                println!("  {:<10} {}", day.header, item_line(item, colors));
            }
        }
    }

    if grid.skipped_assignments > 0 {
        println!();
        println!(
            "{} assignment(s) skipped: unreadable dates",
            grid.skipped_assignments
        );
    }
}

fn item_line(item: &GridItem, colors: Option<&TeamColors>) -> String {
    let pms = item
        .pms
        .iter()
        .map(|initials| {
            match colors.and_then(|colors| colors.pm_color_by_initials(initials)) {
                Some(color) => format!("{initials}({color}/{})", pill_text_color(color)),
                None => initials.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "#{} {} [{}] {}..{} {}",
        item.project_id,
        item.project_name,
        item.project_status,
        item.start_date,
        item.end_date,
        pms
    )
    .trim_end()
    .to_string()
}
