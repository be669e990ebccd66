use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A primitive JSON value as delivered by the backend for a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric reading of the value, if it has a finite one.
    ///
    /// Booleans read as 1/0. Text reads as a number only when its trimmed
    /// form is non-empty and parses to a finite float.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            FieldValue::Null => return None,
            FieldValue::Bool(value) => f64::from(u8::from(*value)),
            FieldValue::Number(value) => *value,
            FieldValue::Text(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                value.parse::<f64>().ok()?
            }
        };

        number.is_finite().then_some(number)
    }

    /// Backend flags arrive as `true`, `1` or `"1"`.
    pub fn is_flag_set(&self) -> bool {
        self.as_number() == Some(1.0)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A flat record (project, user, PM, crew) keyed by field name.
///
/// Absent fields and `null` fields are both treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, FieldValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field).filter(|value| !value.is_null())
    }

    /// String form of a field; missing fields read as `""`.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    pub fn id(&self) -> Option<&FieldValue> {
        self.get("id")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Aggregates a backend sends alongside a table's rows
/// (`{"projects": [...], "summary": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Only a JSON number counts; anything else reads as missing.
    #[serde(default, deserialize_with = "number_only")]
    pub avg_age_days: Option<f64>,
}

fn number_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}
