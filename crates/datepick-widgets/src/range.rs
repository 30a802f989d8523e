//! Inclusive valid-date window shared by the grid, the store, and the
//! navigation buttons.

use chrono::NaiveDate;

/// Optional inclusive bounds on selectable dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Earliest selectable day, if any.
    pub min_date: Option<NaiveDate>,
    /// Latest selectable day, if any.
    pub max_date: Option<NaiveDate>,
}

impl Bounds {
    /// No restriction in either direction.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bounds with both ends given.
    pub fn between(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        Self {
            min_date: Some(min_date),
            max_date: Some(max_date),
        }
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min_date: NaiveDate) -> Self {
        self.min_date = Some(min_date);
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max_date: NaiveDate) -> Self {
        self.max_date = Some(max_date);
        self
    }

    /// Whether `date` falls outside the window. Both bounds are inclusive.
    pub fn is_outside(&self, date: NaiveDate) -> bool {
        is_outside_range(date, self)
    }

    /// Move `date` onto the nearest bound when it lies outside the window.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        match (self.min_date, self.max_date) {
            (Some(min), _) if date < min => min,
            (_, Some(max)) if date > max => max,
            _ => date,
        }
    }
}

/// Whether `date` is blocked by `bounds`.
///
/// A day equal to either bound is allowed; with no bounds nothing is blocked.
pub fn is_outside_range(date: NaiveDate, bounds: &Bounds) -> bool {
    let before_min = bounds.min_date.is_some_and(|min| date < min);
    let after_max = bounds.max_date.is_some_and(|max| date > max);
    before_min || after_max
}
