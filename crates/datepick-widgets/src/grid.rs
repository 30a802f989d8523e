//! Month grid derivation.
//!
//! Weeks start on Monday. The first week carries leading blanks for the
//! weekdays before the 1st; the last week simply ends after the last day.

use chrono::{Datelike, Months, NaiveDate};

use crate::range::Bounds;

/// Number of cells in a full week row.
pub const DAYS_PER_WEEK: usize = 7;

/// One day cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The day this cell stands for.
    pub date: NaiveDate,
    /// A committed selection exists and is this day.
    pub is_selected: bool,
    /// The navigation cursor sits on this day.
    pub is_preselected: bool,
    /// The day lies outside the valid range.
    pub is_blocked: bool,
}

/// A row of up to seven cells; `None` is a leading blank.
pub type Week = Vec<Option<CalendarDay>>;

/// All weeks of one month.
pub type MonthView = Vec<Week>;

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Count of blank cells before the 1st in a Monday-first week.
pub fn first_weekday_offset(date: NaiveDate) -> usize {
    first_of_month(date).weekday().num_days_from_monday() as usize
}

/// Build the grid for the month containing `view_date`.
pub fn build_month_view(
    view_date: NaiveDate,
    selected: Option<NaiveDate>,
    preselected: NaiveDate,
    bounds: &Bounds,
) -> MonthView {
    let first = first_of_month(view_date);
    let offset = first_weekday_offset(first);

    let cells = std::iter::repeat_n(None, offset).chain(
        first
            .iter_days()
            .take(days_in_month(first) as usize)
            .map(|date| {
                Some(CalendarDay {
                    date,
                    is_selected: selected == Some(date),
                    is_preselected: date == preselected,
                    is_blocked: bounds.is_outside(date),
                })
            }),
    );

    let mut weeks: MonthView = Vec::new();
    for (index, cell) in cells.enumerate() {
        if index % DAYS_PER_WEEK == 0 {
            weeks.push(Vec::with_capacity(DAYS_PER_WEEK));
        }
        if let Some(week) = weeks.last_mut() {
            week.push(cell);
        }
    }
    weeks
}
