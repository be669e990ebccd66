use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const YMD: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a calendar date from `YYYY-MM-DD`.
///
/// A trailing time part separated by `T` or a space is accepted and ignored,
/// so backend timestamps like `2024-01-03T08:00:00` resolve to their date.
pub fn parse_ymd(value: &str) -> Option<Date> {
    let value = value.trim();
    let date_part = value.get(..10)?;

    if value.len() > 10 && !matches!(value.as_bytes()[10], b'T' | b' ') {
        return None;
    }

    Date::parse(date_part, YMD).ok()
}

pub fn format_ymd(date: Date) -> String {
    date.format(YMD).unwrap_or_default()
}
