use std::collections::HashMap;

use crewdesk_shared::{Crew, ProjectManager};
use serde::Serialize;

const PILL_DARK_TEXT: &str = "#111827";
const PILL_LIGHT_TEXT: &str = "#ffffff";
const BADGE_DARK_TEXT: &str = "#111";
const BADGE_LIGHT_TEXT: &str = "#fff";

/// Color lookups for project managers and work crews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamColors {
    pm_by_name: HashMap<String, String>,
    pm_by_initials: HashMap<String, String>,
    crew_by_name: HashMap<String, String>,
}

impl TeamColors {
    /// Builds the lookups, skipping entries without a color. When two PMs share
    /// initials the first one keeps them.
    pub fn new(project_managers: &[ProjectManager], crews: &[Crew]) -> Self {
        let mut colors = Self::default();

        for pm in project_managers {
            let Some(color) = non_blank(pm.color.as_deref()) else {
                continue;
            };

            let name = pm.full_name();
            if !name.is_empty() {
                colors
                    .pm_by_name
                    .entry(name.to_lowercase())
                    .or_insert_with(|| color.to_owned());
            }

            if let Some(initials) = pm.initials() {
                colors
                    .pm_by_initials
                    .entry(initials)
                    .or_insert_with(|| color.to_owned());
            }
        }

        for crew in crews {
            let Some(color) = non_blank(crew.color.as_deref()) else {
                continue;
            };

            let name = crew.name.as_deref().unwrap_or(&crew.code).trim();
            if !name.is_empty() {
                colors
                    .crew_by_name
                    .entry(name.to_lowercase())
                    .or_insert_with(|| color.to_owned());
            }
        }

        colors
    }

    pub fn pm_color(&self, full_name: &str) -> Option<&str> {
        self.pm_by_name
            .get(&full_name.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn pm_color_by_initials(&self, initials: &str) -> Option<&str> {
        self.pm_by_initials
            .get(&initials.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn crew_color(&self, name: &str) -> Option<&str> {
        self.crew_by_name
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pm_by_name.is_empty() && self.pm_by_initials.is_empty() && self.crew_by_name.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses `#rrggbb` or `#rgb` (leading `#` optional) into channels in `0..=1`.
fn parse_hex(color: &str) -> Option<[f64; 3]> {
    let hex = color.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok().map(|v| f64::from(v) / 255.0);

    match hex.len() {
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        3 => {
            let expand = |i: usize| hex[i..=i].repeat(2);
            Some([
                channel(expand(0).as_str())?,
                channel(expand(1).as_str())?,
                channel(expand(2).as_str())?,
            ])
        }
        _ => None,
    }
}

/// Text color for a PM/crew pill drawn on `background`.
pub fn pill_text_color(background: &str) -> &'static str {
    let Some([r, g, b]) = parse_hex(background) else {
        return PILL_DARK_TEXT;
    };

    if 0.299 * r + 0.587 * g + 0.114 * b <= 0.6 {
        PILL_LIGHT_TEXT
    } else {
        PILL_DARK_TEXT
    }
}

/// Text color for a crew badge drawn on `background`.
pub fn badge_text_color(background: &str) -> &'static str {
    let Some([r, g, b]) = parse_hex(background) else {
        return BADGE_DARK_TEXT;
    };

    if 0.2126 * r + 0.7152 * g + 0.0722 * b < 0.55 {
        BADGE_LIGHT_TEXT
    } else {
        BADGE_DARK_TEXT
    }
}
