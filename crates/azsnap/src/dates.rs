use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Inclusive UTC window used to filter snapshots by `timeCreated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// ISO-8601 start bound with an explicit `+00:00` offset, as the
    /// JMESPath filter expects.
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }

    /// Date portion of the start bound, used as a prompt default.
    pub fn start_day(&self) -> String {
        self.start.format(DAY_FORMAT).to_string()
    }

    pub fn end_day(&self) -> String {
        self.end.format(DAY_FORMAT).to_string()
    }
}

/// First calendar day 00:00:00 through last calendar day 23:59:59 of
/// `now`'s UTC month.
pub fn current_month_range(now: DateTime<Utc>) -> DateRange {
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    DateRange {
        start: month_start(year, month),
        end: month_start(next_year, next_month) - Duration::seconds(1),
    }
}

/// Resolve user-entered day strings into a full range. Both inputs must
/// parse as `YYYY-MM-DD`; if either fails, both are discarded and the
/// current-month default is returned with the fallback flag set.
pub fn resolve_range(
    start_input: &str,
    end_input: &str,
    now: DateTime<Utc>,
) -> (DateRange, bool) {
    match (parse_day(start_input), parse_day(end_input)) {
        (Some(start_day), Some(end_day)) => {
            let range = DateRange {
                start: day_instant(start_day, 0, 0, 0),
                end: day_instant(end_day, 23, 59, 59),
            };
            (range, false)
        }
        _ => (current_month_range(now), true),
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT).ok()
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    // Day 1 of a valid month always exists.
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|day| day_instant(day, 0, 0, 0))
        .unwrap_or_default()
}

fn day_instant(day: NaiveDate, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    day.and_hms_opt(hour, minute, second)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}
