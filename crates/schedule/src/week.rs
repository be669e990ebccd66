use time::{Date, Duration, OffsetDateTime, Weekday};
use time_tz::{OffsetDateTimeExt, timezones};

use crewdesk_shared::format_ymd;

/// Current calendar date in the IANA time zone `tz`, or in UTC when the
/// zone is unknown.
pub fn today(tz: impl Into<String>) -> Date {
    let tz = tz.into();
    let mut now = OffsetDateTime::now_utc();

    if let Some(tz) = timezones::get_by_name(&tz) {
        now = now.to_timezone(tz);
    }

    now.date()
}

/// A Monday-to-Sunday calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    start: Date,
}

impl WeekWindow {
    /// The week containing `date`, starting on its Monday.
    pub fn containing(date: Date) -> Self {
        let days_since_monday = date.weekday().number_days_from_monday();

        Self {
            start: date - Duration::days(days_since_monday.into()),
        }
    }

    pub fn this_week(tz: impl Into<String>) -> Self {
        Self::containing(today(tz))
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.start + Duration::days(6)
    }

    pub fn days(&self) -> [Date; 7] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end()
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Duration::weeks(1),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::weeks(1),
        }
    }

    /// `2024-01-01 → 2024-01-07`
    pub fn range_label(&self) -> String {
        format!("{} → {}", format_ymd(self.start), format_ymd(self.end()))
    }
}

/// Column header for a day, e.g. `Mon 1/5`.
pub fn day_header(date: Date) -> String {
    let weekday = match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    };

    format!("{weekday} {}/{}", u8::from(date.month()), date.day())
}
