use std::{fmt::Display, str::FromStr};

use crate::Bucket;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Bucket restriction applied on top of the text filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketFilter {
    #[default]
    All,
    Only(Bucket),
}

impl BucketFilter {
    pub fn key(&self) -> &'static str {
        match self {
            BucketFilter::All => "all",
            BucketFilter::Only(bucket) => (*bucket).into(),
        }
    }
}

impl Display for BucketFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BucketFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(BucketFilter::All),
            other => other.parse().map(BucketFilter::Only),
        }
    }
}

/// Interaction state of one table: search text, sort column and KPI filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub sort_key: String,
    pub sort_direction: SortDirection,
    pub bucket_filter: BucketFilter,
}

impl ViewState {
    pub fn sorted_by(sort_key: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            sort_key: sort_key.into(),
            sort_direction: SortDirection::Ascending,
            bucket_filter: BucketFilter::All,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Column header click: the active column flips direction, any other
    /// column becomes the key in ascending order.
    pub fn click_sort(&mut self, key: &str) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = key.to_owned();
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// KPI tile click: clicking the active bucket clears the restriction.
    pub fn click_bucket(&mut self, filter: BucketFilter) {
        self.bucket_filter = if self.bucket_filter == filter {
            BucketFilter::All
        } else {
            filter
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_sort_toggles_active_column() {
        let mut state = ViewState::sorted_by("project_name");

        state.click_sort("project_name");
        assert_eq!(state.sort_direction, SortDirection::Descending);

        state.click_sort("project_name");
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_click_sort_new_column_resets_direction() {
        let mut state = ViewState::sorted_by("project_name");
        state.click_sort("project_name");

        state.click_sort("total_profit");
        assert_eq!(state.sort_key, "total_profit");
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_click_bucket_toggles_back_to_all() {
        let mut state = ViewState::sorted_by("project_name");

        state.click_bucket(BucketFilter::Only(Bucket::Completed));
        assert_eq!(state.bucket_filter, BucketFilter::Only(Bucket::Completed));

        state.click_bucket(BucketFilter::Only(Bucket::InProgress));
        assert_eq!(state.bucket_filter, BucketFilter::Only(Bucket::InProgress));

        state.click_bucket(BucketFilter::Only(Bucket::InProgress));
        assert_eq!(state.bucket_filter, BucketFilter::All);

        state.click_bucket(BucketFilter::All);
        assert_eq!(state.bucket_filter, BucketFilter::All);
    }

    #[test]
    fn test_bucket_filter_keys() {
        assert_eq!("all".parse::<BucketFilter>(), Ok(BucketFilter::All));
        assert_eq!(
            "needs_assignment".parse::<BucketFilter>(),
            Ok(BucketFilter::Only(Bucket::NeedsAssignment))
        );
        assert!("showing".parse::<BucketFilter>().is_err());
        assert_eq!(BucketFilter::Only(Bucket::NotStarted).to_string(), "not_started");
    }
}
