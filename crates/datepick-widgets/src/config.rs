//! Construction-time configuration for [`DatePicker`](crate::date_picker::DatePicker).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::date_picker::Message;
use crate::focus::TrapOptions;
use crate::keyboard::DayKeyMap;
use crate::range::Bounds;
use crate::state::InteractionState;
use crate::text_entry::{BlurOutcome, DEFAULT_FORMAT};

/// Source of "today".
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Receives a [`DebugEvent`] after every processed message.
pub type DebugHook = Arc<dyn Fn(&DebugEvent<'_>) + Send + Sync>;

/// What the debug hook sees once a message has settled.
#[derive(Debug)]
pub struct DebugEvent<'a> {
    /// The message that was just processed.
    pub message: &'a Message,
    /// State after the message.
    pub state: &'a InteractionState,
    /// Whether a focus trap is active after the message.
    pub trap_active: bool,
    /// How the draft was resolved, for `InputBlurred` with a draft.
    pub blur_outcome: Option<BlurOutcome>,
}

/// Errors reported by [`DatePickerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The lower bound lies after the upper bound.
    #[error("min date {min} is after max date {max}")]
    InvertedBounds { min: NaiveDate, max: NaiveDate },
    /// The date format contains an unknown specifier.
    #[error("invalid date format {0:?}")]
    InvalidFormat(String),
    /// Formatting then parsing a date does not give the same date back.
    #[error("date format {0:?} cannot be parsed back into a full date")]
    LossyFormat(String),
    /// The initial selection is outside the bounds.
    #[error("initial date {0} is outside the allowed range")]
    InitialDateOutOfRange(NaiveDate),
}

/// Accessible names used by the prop bags.
///
/// `open_with_selection` may contain a `{{date}}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Name of the calendar dialog.
    pub dialog: String,
    /// Name of the date field.
    pub date_input: String,
    /// Open button name while nothing is selected.
    pub open_without_selection: String,
    /// Open button name once a date is selected.
    pub open_with_selection: String,
    /// Next-month button name.
    pub next_month: String,
    /// Previous-month button name.
    pub prev_month: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            dialog: "Choose date".to_string(),
            date_input: "Date".to_string(),
            open_without_selection: "Choose date".to_string(),
            open_with_selection: "Change date, {{date}}".to_string(),
            next_month: "Next month".to_string(),
            prev_month: "Prev month".to_string(),
        }
    }
}

/// Replace every `{{key}}` in `template` with its value.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{{{key}}}}}"), value)
    })
}

/// Everything a picker needs at construction.
///
/// | Field | Default |
/// |-------|---------|
/// | `bounds` | unbounded |
/// | `initial_date` | none (nothing selected) |
/// | `is_closed_on_select` | `true` |
/// | `select_on_navigate` | `false` |
/// | `date_format` | `%d/%m/%Y` |
/// | `labels` | English, see [`Labels`] |
/// | `key_map` | [`DayKeyMap::default`] |
/// | `trap_options` | click outside deactivates |
/// | `live_region_id` | unique per picker |
/// | `clock` | local date |
/// | `debug_hook` | none |
#[derive(Clone)]
pub struct DatePickerConfig {
    /// Valid date range.
    pub bounds: Bounds,
    /// Selection at construction.
    pub initial_date: Option<NaiveDate>,
    /// Committing a day closes the dialog.
    pub is_closed_on_select: bool,
    /// Every accepted keyboard move also commits the cursor as the selection.
    pub select_on_navigate: bool,
    /// `chrono` strftime layout of the text field.
    pub date_format: String,
    /// Accessible names.
    pub labels: Labels,
    /// Day cell key bindings.
    pub key_map: DayKeyMap,
    /// Options for the focus trap.
    pub trap_options: TrapOptions,
    /// Id linking the grid to its month heading.
    pub live_region_id: String,
    /// Source of "today".
    pub clock: Clock,
    /// Called after every processed message.
    pub debug_hook: Option<DebugHook>,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            initial_date: None,
            is_closed_on_select: true,
            select_on_navigate: false,
            date_format: DEFAULT_FORMAT.to_string(),
            labels: Labels::default(),
            key_map: DayKeyMap::default(),
            trap_options: TrapOptions::default(),
            live_region_id: next_live_region_id(),
            clock: Arc::new(|| chrono::Local::now().date_naive()),
            debug_hook: None,
        }
    }
}

impl DatePickerConfig {
    /// Configuration with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both bounds at once.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Earliest selectable day, inclusive.
    pub fn with_min_date(mut self, min: NaiveDate) -> Self {
        self.bounds.min_date = Some(min);
        self
    }

    /// Latest selectable day, inclusive.
    pub fn with_max_date(mut self, max: NaiveDate) -> Self {
        self.bounds.max_date = Some(max);
        self
    }

    /// Start with `date` selected and under the cursor.
    pub fn with_initial_date(mut self, date: NaiveDate) -> Self {
        self.initial_date = Some(date);
        self
    }

    /// Whether committing a day closes the dialog.
    pub fn with_closed_on_select(mut self, closed: bool) -> Self {
        self.is_closed_on_select = closed;
        self
    }

    /// Whether keyboard moves also commit the selection.
    pub fn with_select_on_navigate(mut self, select: bool) -> Self {
        self.select_on_navigate = select;
        self
    }

    /// Set the strftime layout of the text field.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Replace the accessible names.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Replace the day cell key bindings.
    pub fn with_key_map(mut self, key_map: DayKeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// Options passed to every focus trap.
    pub fn with_trap_options(mut self, options: TrapOptions) -> Self {
        self.trap_options = options;
        self
    }

    /// Fix the id of the month live region.
    pub fn with_live_region_id(mut self, id: impl Into<String>) -> Self {
        self.live_region_id = id.into();
        self
    }

    /// Use a fixed "today", mostly for tests.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.clock = Arc::new(move || today);
        self
    }

    /// Source "today" from `clock`.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Call `hook` after every processed message.
    pub fn with_debug_hook(
        mut self,
        hook: impl Fn(&DebugEvent<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.debug_hook = Some(Arc::new(hook));
        self
    }

    /// Check the configuration once, before a picker is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.bounds.min_date, self.bounds.max_date) {
            if min > max {
                return Err(ConfigError::InvertedBounds { min, max });
            }
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidFormat(self.date_format.clone()));
        }
        // 2004-11-23: distinct day, month and two-digit year so any field the
        // format drops shows up in the round trip.
        let sample = NaiveDate::from_ymd_opt(2004, 11, 23).unwrap_or_default();
        let formatted = sample.format(&self.date_format).to_string();
        if NaiveDate::parse_from_str(&formatted, &self.date_format) != Ok(sample) {
            return Err(ConfigError::LossyFormat(self.date_format.clone()));
        }

        if let Some(date) = self.initial_date {
            if self.bounds.is_outside(date) {
                return Err(ConfigError::InitialDateOutOfRange(date));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DatePickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerConfig")
            .field("bounds", &self.bounds)
            .field("initial_date", &self.initial_date)
            .field("is_closed_on_select", &self.is_closed_on_select)
            .field("select_on_navigate", &self.select_on_navigate)
            .field("date_format", &self.date_format)
            .field("labels", &self.labels)
            .field("live_region_id", &self.live_region_id)
            .field("debug_hook", &self.debug_hook.is_some())
            .finish_non_exhaustive()
    }
}

fn next_live_region_id() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    format!("datepick-month-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}
