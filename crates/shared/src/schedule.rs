use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A PM/crew claim on a project over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub project_id: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_crew_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pm_initials: Vec<String>,
}

impl Assignment {
    /// Crew codes with blank entries dropped.
    pub fn crew_codes(&self) -> Vec<String> {
        self.work_crew_codes
            .iter()
            .filter(|code| !code.trim().is_empty())
            .cloned()
            .collect()
    }

    /// PM initials, trimmed and upper-cased, blank entries dropped.
    pub fn normalized_pm_initials(&self) -> Vec<String> {
        self.pm_initials
            .iter()
            .map(|initials| initials.trim().to_uppercase())
            .filter(|initials| !initials.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Crew {
    pub fn is_parent(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Display ordering key: `sort_order` (missing counts as 0), then id.
    pub fn sort_key(&self) -> (i64, i64) {
        (self.sort_order.unwrap_or(0), self.id)
    }
}

/// Response of the weekly schedule query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub crews: Vec<Crew>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignments: Vec<Assignment>,
}
