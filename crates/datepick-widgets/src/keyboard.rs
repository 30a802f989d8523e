//! Key bindings for day cells and the cursor moves they produce.

use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// A human-readable description of the action this binding performs.
    pub description: String,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code (e.g. a character, arrow key, or function key).
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a new binding for a single key combination with the given description.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Create a new binding for multiple key combinations with the given description.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Return whether the given key event matches any of this binding's key
    /// combinations exactly. Always `false` when the binding is disabled.
    ///
    /// Modifiers must match exactly so that `PageDown` and `Shift+PageDown`
    /// stay distinct.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers == k.modifiers)
    }

    /// Set whether this binding is enabled. Disabled bindings never match key events.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create a key combination with the Shift modifier.
    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    /// Create a key combination with an explicit set of modifier keys.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

/// Trait for types that define key bindings, so a help line can list them.
pub trait KeyMap {
    /// Return a flat list of the most important bindings for the short help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// Return bindings grouped by category for the full help overlay.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// What a key press on a day cell asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAction {
    /// Move the cursor.
    Navigate(Navigation),
    /// Commit the cursor as the selection.
    Commit,
    /// Close the dialog without committing.
    Dismiss,
}

/// A cursor movement relative to the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// One day forward.
    NextDay,
    /// One day back.
    PrevDay,
    /// Seven days forward.
    NextWeek,
    /// Seven days back.
    PrevWeek,
    /// Monday of the current week.
    WeekStart,
    /// Sunday of the current week.
    WeekEnd,
    /// Same day next month.
    NextMonth,
    /// Same day previous month.
    PrevMonth,
    /// Same day next year.
    NextYear,
    /// Same day previous year.
    PrevYear,
}

impl Navigation {
    /// Where this move lands from `from`, or `None` if it leaves the calendar.
    ///
    /// Month and year moves keep the day of month, pulled back to the last
    /// day when the target month is shorter (January 31st plus one month is
    /// the last day of February).
    pub fn apply(self, from: NaiveDate) -> Option<NaiveDate> {
        let weekday = u64::from(from.weekday().num_days_from_monday());
        match self {
            Navigation::NextDay => from.checked_add_days(Days::new(1)),
            Navigation::PrevDay => from.checked_sub_days(Days::new(1)),
            Navigation::NextWeek => from.checked_add_days(Days::new(7)),
            Navigation::PrevWeek => from.checked_sub_days(Days::new(7)),
            Navigation::WeekStart => from.checked_sub_days(Days::new(weekday)),
            Navigation::WeekEnd => from.checked_add_days(Days::new(6 - weekday)),
            Navigation::NextMonth => from.checked_add_months(Months::new(1)),
            Navigation::PrevMonth => from.checked_sub_months(Months::new(1)),
            Navigation::NextYear => from.checked_add_months(Months::new(12)),
            Navigation::PrevYear => from.checked_sub_months(Months::new(12)),
        }
    }
}

/// Bindings for keys pressed while a day cell has focus.
#[derive(Debug, Clone)]
pub struct DayKeyMap {
    /// Move the cursor one day forward.
    pub next_day: Binding,
    /// Move the cursor one day back.
    pub prev_day: Binding,
    /// Move the cursor one week forward.
    pub next_week: Binding,
    /// Move the cursor one week back.
    pub prev_week: Binding,
    /// Move the cursor to Monday of its week.
    pub week_start: Binding,
    /// Move the cursor to Sunday of its week.
    pub week_end: Binding,
    /// Same day of the next month.
    pub next_month: Binding,
    /// Same day of the previous month.
    pub prev_month: Binding,
    /// Same day of the next year.
    pub next_year: Binding,
    /// Same day of the previous year.
    pub prev_year: Binding,
    /// Commit the cursor as the selection.
    pub commit: Binding,
    /// Close the dialog without committing.
    pub dismiss: Binding,
}

impl Default for DayKeyMap {
    fn default() -> Self {
        Self {
            next_day: Binding::new(KeyCombination::new(KeyCode::Right), "next day"),
            prev_day: Binding::new(KeyCombination::new(KeyCode::Left), "previous day"),
            next_week: Binding::new(KeyCombination::new(KeyCode::Down), "next week"),
            prev_week: Binding::new(KeyCombination::new(KeyCode::Up), "previous week"),
            week_start: Binding::new(KeyCombination::new(KeyCode::Home), "start of week"),
            week_end: Binding::new(KeyCombination::new(KeyCode::End), "end of week"),
            next_month: Binding::new(KeyCombination::new(KeyCode::PageDown), "next month"),
            prev_month: Binding::new(KeyCombination::new(KeyCode::PageUp), "previous month"),
            next_year: Binding::new(KeyCombination::shift(KeyCode::PageDown), "next year"),
            prev_year: Binding::new(KeyCombination::shift(KeyCode::PageUp), "previous year"),
            commit: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "choose date",
            ),
            dismiss: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
        }
    }
}

impl DayKeyMap {
    /// Resolve a key event to the action it triggers, if any.
    pub fn resolve(&self, event: &KeyEvent) -> Option<DayAction> {
        let navigation = [
            (&self.next_day, Navigation::NextDay),
            (&self.prev_day, Navigation::PrevDay),
            (&self.next_week, Navigation::NextWeek),
            (&self.prev_week, Navigation::PrevWeek),
            (&self.week_start, Navigation::WeekStart),
            (&self.week_end, Navigation::WeekEnd),
            (&self.next_month, Navigation::NextMonth),
            (&self.prev_month, Navigation::PrevMonth),
            (&self.next_year, Navigation::NextYear),
            (&self.prev_year, Navigation::PrevYear),
        ];
        if let Some((_, nav)) = navigation.iter().find(|(binding, _)| binding.matches(event)) {
            return Some(DayAction::Navigate(*nav));
        }
        if self.commit.matches(event) {
            Some(DayAction::Commit)
        } else if self.dismiss.matches(event) {
            Some(DayAction::Dismiss)
        } else {
            None
        }
    }
}

impl KeyMap for DayKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_day, &self.next_month, &self.commit, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.next_day,
                &self.prev_day,
                &self.next_week,
                &self.prev_week,
                &self.week_start,
                &self.week_end,
            ],
            vec![
                &self.next_month,
                &self.prev_month,
                &self.next_year,
                &self.prev_year,
            ],
            vec![&self.commit, &self.dismiss],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_map_resolves_every_key() {
        let map = DayKeyMap::default();
        let none = KeyModifiers::NONE;
        let cases = [
            (KeyCode::Right, none, DayAction::Navigate(Navigation::NextDay)),
            (KeyCode::Left, none, DayAction::Navigate(Navigation::PrevDay)),
            (KeyCode::Up, none, DayAction::Navigate(Navigation::PrevWeek)),
            (KeyCode::Down, none, DayAction::Navigate(Navigation::NextWeek)),
            (KeyCode::Home, none, DayAction::Navigate(Navigation::WeekStart)),
            (KeyCode::End, none, DayAction::Navigate(Navigation::WeekEnd)),
            (KeyCode::PageUp, none, DayAction::Navigate(Navigation::PrevMonth)),
            (KeyCode::PageDown, none, DayAction::Navigate(Navigation::NextMonth)),
            (KeyCode::PageUp, KeyModifiers::SHIFT, DayAction::Navigate(Navigation::PrevYear)),
            (KeyCode::PageDown, KeyModifiers::SHIFT, DayAction::Navigate(Navigation::NextYear)),
            (KeyCode::Enter, none, DayAction::Commit),
            (KeyCode::Char(' '), none, DayAction::Commit),
            (KeyCode::Esc, none, DayAction::Dismiss),
        ];
        for (code, modifiers, expected) in cases {
            assert_eq!(map.resolve(&key(code, modifiers)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        let map = DayKeyMap::default();
        assert_eq!(map.resolve(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(map.resolve(&key(KeyCode::Right, KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn disabled_binding_never_matches() {
        let mut map = DayKeyMap::default();
        map.dismiss = map.dismiss.enabled(false);
        assert_eq!(map.resolve(&key(KeyCode::Esc, KeyModifiers::NONE)), None);
    }

    #[test]
    fn week_bounds_start_on_monday() {
        // 2024-03-13 is a Wednesday
        assert_eq!(Navigation::WeekStart.apply(d(2024, 3, 13)), Some(d(2024, 3, 11)));
        assert_eq!(Navigation::WeekEnd.apply(d(2024, 3, 13)), Some(d(2024, 3, 17)));
        assert_eq!(Navigation::WeekStart.apply(d(2024, 3, 11)), Some(d(2024, 3, 11)));
        assert_eq!(Navigation::WeekEnd.apply(d(2024, 3, 17)), Some(d(2024, 3, 17)));
    }

    #[test]
    fn month_moves_clamp_to_month_end() {
        assert_eq!(Navigation::NextMonth.apply(d(2024, 1, 31)), Some(d(2024, 2, 29)));
        assert_eq!(Navigation::PrevMonth.apply(d(2024, 3, 31)), Some(d(2024, 2, 29)));
        assert_eq!(Navigation::NextYear.apply(d(2024, 2, 29)), Some(d(2025, 2, 28)));
    }

    #[test]
    fn day_and_week_moves_cross_months() {
        assert_eq!(Navigation::NextDay.apply(d(2024, 1, 31)), Some(d(2024, 2, 1)));
        assert_eq!(Navigation::PrevWeek.apply(d(2024, 3, 3)), Some(d(2024, 2, 25)));
    }

    #[test]
    fn custom_bindings_with_modifiers() {
        let map = DayKeyMap {
            next_month: Binding::new(
                KeyCombination::with_modifiers(KeyCode::Right, KeyModifiers::CONTROL),
                "next month",
            ),
            next_year: Binding::new(
                KeyCombination::with_modifiers(
                    KeyCode::Right,
                    KeyModifiers::CONTROL | KeyModifiers::SHIFT,
                ),
                "next year",
            ),
            ..DayKeyMap::default()
        };
        assert_eq!(
            map.resolve(&key(KeyCode::Right, KeyModifiers::CONTROL)),
            Some(DayAction::Navigate(Navigation::NextMonth))
        );
        assert_eq!(
            map.resolve(&key(KeyCode::Right, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(DayAction::Navigate(Navigation::NextYear))
        );
        assert_eq!(
            map.resolve(&key(KeyCode::Right, KeyModifiers::NONE)),
            Some(DayAction::Navigate(Navigation::NextDay))
        );
        assert_eq!(map.resolve(&key(KeyCode::PageDown, KeyModifiers::NONE)), None);
    }

    #[test]
    fn help_lists_all_bindings() {
        let map = DayKeyMap::default();
        let total: usize = map.full_help().iter().map(Vec::len).sum();
        assert_eq!(total, 12);
        assert_eq!(map.short_help().len(), 4);
    }
}
