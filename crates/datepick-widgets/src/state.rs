//! The interaction state store.
//!
//! Every date transition goes through a range-aware setter: a date outside
//! the bounds is silently rejected so that navigation at the edges of the
//! valid window simply stops.

use chrono::NaiveDate;
use tracing::trace;

use crate::range::Bounds;

/// Snapshot of everything the picker tracks between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    /// Whether the calendar dialog is shown.
    pub is_open: bool,
    /// Committed selection, `None` until the user chooses a date.
    pub selected_date: Option<NaiveDate>,
    /// Navigation cursor within the grid; never empty.
    pub preselected_date: NaiveDate,
    /// In-progress text of the date field; overrides the formatted selection.
    pub draft_input_text: Option<String>,
}

/// Owner of [`InteractionState`] plus the bounds it enforces.
#[derive(Debug, Clone)]
pub struct Store {
    state: InteractionState,
    bounds: Bounds,
}

impl Store {
    /// Create a closed store. The cursor starts on `selected` when given,
    /// otherwise on `today`, pulled inside the bounds either way.
    pub fn new(bounds: Bounds, selected: Option<NaiveDate>, today: NaiveDate) -> Self {
        let selected = selected.filter(|date| !bounds.is_outside(*date));
        Self {
            state: InteractionState {
                is_open: false,
                selected_date: selected,
                preselected_date: bounds.clamp(selected.unwrap_or(today)),
                draft_input_text: None,
            },
            bounds,
        }
    }

    /// Current state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Configured bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date
    }

    pub fn preselected_date(&self) -> NaiveDate {
        self.state.preselected_date
    }

    pub fn draft(&self) -> Option<&str> {
        self.state.draft_input_text.as_deref()
    }

    pub fn open(&mut self) {
        self.state.is_open = true;
    }

    pub fn close(&mut self) {
        self.state.is_open = false;
    }

    pub fn toggle_open(&mut self) {
        self.state.is_open = !self.state.is_open;
    }

    /// Commit `date` as the selection. Returns `false` when the bounds reject it.
    pub fn set_selected_date(&mut self, date: NaiveDate) -> bool {
        if self.bounds.is_outside(date) {
            trace!(%date, "selection outside bounds ignored");
            return false;
        }
        self.state.selected_date = Some(date);
        true
    }

    /// Move the cursor to `date`. Returns `false` when the bounds reject it.
    pub fn set_preselected_date(&mut self, date: NaiveDate) -> bool {
        if self.bounds.is_outside(date) {
            trace!(%date, "cursor move outside bounds absorbed");
            return false;
        }
        self.state.preselected_date = date;
        true
    }

    /// Store the raw field text; always accepted.
    pub fn set_draft_input_text(&mut self, text: impl Into<String>) {
        self.state.draft_input_text = Some(text.into());
    }

    pub fn clear_draft(&mut self) {
        self.state.draft_input_text = None;
    }

    /// Text the date field should show: the draft if any, else the formatted
    /// selection, else nothing.
    pub fn display_text(&self, format: &str) -> String {
        match (&self.state.draft_input_text, self.state.selected_date) {
            (Some(draft), _) => draft.clone(),
            (None, Some(date)) => date.format(format).to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn starts_closed_with_cursor_on_today() {
        let store = Store::new(Bounds::default(), None, d(2024, 5, 15));
        assert!(!store.is_open());
        assert_eq!(store.selected_date(), None);
        assert_eq!(store.preselected_date(), d(2024, 5, 15));
        assert_eq!(store.draft(), None);
    }

    #[test]
    fn initial_selection_seeds_cursor() {
        let store = Store::new(Bounds::default(), Some(d(2020, 1, 2)), d(2024, 5, 15));
        assert_eq!(store.selected_date(), Some(d(2020, 1, 2)));
        assert_eq!(store.preselected_date(), d(2020, 1, 2));
    }

    #[test]
    fn today_outside_bounds_is_clamped() {
        let bounds = Bounds::between(d(2030, 1, 1), d(2030, 12, 31));
        let store = Store::new(bounds, None, d(2024, 5, 15));
        assert_eq!(store.preselected_date(), d(2030, 1, 1));
    }

    #[test]
    fn toggle_does_not_touch_dates() {
        let mut store = Store::new(Bounds::default(), Some(d(2024, 5, 1)), d(2024, 5, 15));
        store.toggle_open();
        assert!(store.is_open());
        store.toggle_open();
        assert!(!store.is_open());
        assert_eq!(store.selected_date(), Some(d(2024, 5, 1)));
        assert_eq!(store.preselected_date(), d(2024, 5, 1));
    }

    #[test]
    fn out_of_range_setters_are_noops() {
        let bounds = Bounds::between(d(2024, 5, 10), d(2024, 5, 20));
        let mut store = Store::new(bounds, None, d(2024, 5, 15));
        assert!(!store.set_preselected_date(d(2024, 5, 9)));
        assert!(!store.set_selected_date(d(2024, 5, 21)));
        assert_eq!(store.preselected_date(), d(2024, 5, 15));
        assert_eq!(store.selected_date(), None);
    }

    #[test]
    fn repeated_preselect_is_idempotent() {
        let mut once = Store::new(Bounds::default(), None, d(2024, 5, 15));
        let mut twice = once.clone();
        once.set_preselected_date(d(2024, 6, 1));
        twice.set_preselected_date(d(2024, 6, 1));
        twice.set_preselected_date(d(2024, 6, 1));
        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn display_text_precedence() {
        let mut store = Store::new(Bounds::default(), None, d(2024, 5, 15));
        assert_eq!(store.display_text("%d/%m/%Y"), "");

        store.set_selected_date(d(2024, 5, 3));
        assert_eq!(store.display_text("%d/%m/%Y"), "03/05/2024");

        store.set_draft_input_text("3/5/20");
        assert_eq!(store.display_text("%d/%m/%Y"), "3/5/20");

        store.clear_draft();
        assert_eq!(store.display_text("%d/%m/%Y"), "03/05/2024");
    }
}
