use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectManager {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ProjectManager {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_owned()
    }

    /// Upper-cased first letters of the first and last name.
    pub fn initials(&self) -> Option<String> {
        let first_letter = |name: &Option<String>| {
            name.as_deref()
                .and_then(|name| name.trim().chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default()
        };

        let initials = first_letter(&self.first_name) + &first_letter(&self.last_name);

        (!initials.is_empty()).then_some(initials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm(first: Option<&str>, last: Option<&str>) -> ProjectManager {
        ProjectManager {
            id: 1,
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
            email: None,
            color: None,
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(pm(Some("jane"), Some("doe")).initials().as_deref(), Some("JD"));
        assert_eq!(pm(Some(" al "), None).initials().as_deref(), Some("A"));
        assert_eq!(pm(None, Some("")).initials(), None);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(pm(Some("Jane"), Some("Doe")).full_name(), "Jane Doe");
        assert_eq!(pm(None, Some("Doe")).full_name(), "Doe");
        assert_eq!(pm(None, None).full_name(), "");
    }
}
