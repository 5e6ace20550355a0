use chrono::{DateTime, Local, NaiveDate, TimeDelta, Weekday};

/// One Monday-to-Monday week: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn start_string(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_string(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Computes the week window `week_offset` whole weeks away from the week
/// containing `now`. The anchor is the Monday of the current week under
/// Monday-first numbering; `-1` yields the most recently completed week.
/// The calculation stays in the local calendar of `now` rather than UTC.
pub fn compute_window(now: DateTime<Local>, week_offset: i32) -> DateWindow {
    let anchor_monday = now.date_naive().week(Weekday::Mon).first_day();

    DateWindow {
        start: shift_days(anchor_monday, 7 * i64::from(week_offset)),
        end: shift_days(anchor_monday, 7 * (i64::from(week_offset) + 1)),
    }
}

// Shifts that leave the supported date range collapse to the anchor
// Monday, keeping the window computation total.
fn shift_days(anchor_monday: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| anchor_monday.checked_add_signed(delta))
        .unwrap_or(anchor_monday)
}
