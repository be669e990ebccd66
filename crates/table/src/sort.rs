use std::cmp::Ordering;
use std::sync::LazyLock;

use crewdesk_shared::{FieldValue, Row};
use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};

use crate::SortDirection;

/// Compares two cell values for a column sort.
///
/// Missing values always sort after present ones, whatever the direction.
/// Two numeric values compare numerically, two textual values with
/// [`collate`]. In a mixed column numbers come before text so the order
/// stays total. Blank text reads as zero in this comparison.
pub fn compare_values(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    direction: SortDirection,
) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let ordering = match (sort_number(a), sort_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collate(&a.to_string(), &b.to_string()),
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

fn sort_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Text(text) if text.trim().is_empty() => Some(0.0),
        value => value.as_number(),
    }
}

static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|err| tracing::warn!(error = %err, "root collator unavailable"))
        .ok()
});

/// Locale-aware string ordering using the root collation: accents and case
/// are secondary to the base letter, and lowercase sorts before uppercase.
/// Strings the collator deems equal fall back to code point order.
///
/// `"apple" < "Apple" < "banana"`, `"Ångström" < "Bob"`
pub fn collate(a: &str, b: &str) -> Ordering {
    let ordering = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    ordering.then_with(|| a.cmp(b))
}

/// Stable sort of `rows` on the field `key`.
pub fn sort_rows(rows: &mut [&Row], key: &str, direction: SortDirection) {
    rows.sort_by(|a, b| compare_values(a.get(key), b.get(key), direction));
}
