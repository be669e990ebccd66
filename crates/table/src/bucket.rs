use crewdesk_shared::{FieldValue, Row};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

pub const NEEDS_ASSIGNMENT_FIELD: &str = "needs_assignment";
pub const PROJECT_STATUS_FIELD: &str = "project_status";

/// KPI bucket a project row is counted under.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    NeedsAssignment,
    NotStarted,
    InProgress,
    Completed,
}

impl Bucket {
    pub fn label(self) -> &'static str {
        match self {
            Bucket::NeedsAssignment => "Needs Attention",
            Bucket::NotStarted => "Not Started",
            Bucket::InProgress => "In Progress",
            Bucket::Completed => "Completed",
        }
    }
}

/// Predicate half of a classification rule.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketRule {
    /// The field holds a set backend flag (`true`, `1`, `"1"`).
    FlagSet { field: String },
    /// The lowercased field equals `status`.
    StatusEquals { field: String, status: String },
}

impl BucketRule {
    pub fn flag_set(field: impl Into<String>) -> Self {
        BucketRule::FlagSet {
            field: field.into(),
        }
    }

    pub fn status_equals(field: impl Into<String>, status: impl Into<String>) -> Self {
        BucketRule::StatusEquals {
            field: field.into(),
            status: status.into().to_lowercase(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            BucketRule::FlagSet { field } => row.get(field).is_some_and(FieldValue::is_flag_set),
            BucketRule::StatusEquals { field, status } => row.text(field).to_lowercase() == *status,
        }
    }
}

/// Ordered `(rule, bucket)` pairs; the first matching rule wins and rows
/// matching none land in the fallback bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    rules: Vec<(BucketRule, Bucket)>,
    fallback: Bucket,
}

impl Classifier {
    pub fn new(fallback: Bucket) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn rule(mut self, rule: BucketRule, bucket: Bucket) -> Self {
        self.rules.push((rule, bucket));
        self
    }

    /// Projects table: unassigned projects first, then the status buckets.
    pub fn projects() -> Self {
        Self::new(Bucket::NotStarted)
            .rule(BucketRule::flag_set(NEEDS_ASSIGNMENT_FIELD), Bucket::NeedsAssignment)
            .rule(
                BucketRule::status_equals(PROJECT_STATUS_FIELD, "not_started"),
                Bucket::NotStarted,
            )
            .rule(
                BucketRule::status_equals(PROJECT_STATUS_FIELD, "in_progress"),
                Bucket::InProgress,
            )
            .rule(
                BucketRule::status_equals(PROJECT_STATUS_FIELD, "completed"),
                Bucket::Completed,
            )
    }

    pub fn classify(&self, row: &Row) -> Bucket {
        self.rules
            .iter()
            .find(|(rule, _)| rule.matches(row))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(self.fallback)
    }

    /// Every bucket this classifier can produce, in bucket order.
    pub fn buckets(&self) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = self
            .rules
            .iter()
            .map(|(_, bucket)| *bucket)
            .chain(std::iter::once(self.fallback))
            .collect();
        buckets.sort();
        buckets.dedup();
        buckets
    }
}

/// Human label for a project's status column.
///
/// Unrecognized statuses are shown as their lowercased raw value rather than
/// folded into "Not Started".
pub fn project_status_label(row: &Row) -> String {
    if BucketRule::flag_set(NEEDS_ASSIGNMENT_FIELD).matches(row) {
        return Bucket::NeedsAssignment.label().to_owned();
    }

    let status = row.text(PROJECT_STATUS_FIELD).to_lowercase();
    match status.parse::<Bucket>() {
        Ok(bucket) if bucket != Bucket::NeedsAssignment => bucket.label().to_owned(),
        _ => status,
    }
}
