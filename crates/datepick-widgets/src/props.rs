//! Attribute and handler bags for the elements a presentation layer renders.
//!
//! Each bag carries the ARIA attributes to apply verbatim and handler
//! methods that return the [`Message`] to dispatch back into the picker.

use chrono::NaiveDate;
use crossterm::event::KeyEvent;

use crate::date_picker::Message;
use crate::focus::FocusHandle;

/// Accessible name layout for a day, e.g. `Tue Mar 05 2024`.
pub const DAY_LABEL_FORMAT: &str = "%a %b %d %Y";

/// Flatten a bag into `(attribute, value)` pairs.
pub trait Attributes {
    fn attributes(&self) -> Vec<(&'static str, String)>;
}

/// The calendar dialog container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootProps {
    pub role: &'static str,
    pub aria_modal: bool,
    pub aria_label: String,
}

impl RootProps {
    /// Message for the element ref: `Some` on mount, `None` on unmount.
    pub fn on_ref(&self, handle: Option<FocusHandle>) -> Message {
        match handle {
            Some(handle) => Message::RootMounted(handle),
            None => Message::RootUnmounted,
        }
    }
}

impl Attributes for RootProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", self.role.to_string()),
            ("aria-modal", self.aria_modal.to_string()),
            ("aria-label", self.aria_label.clone()),
        ]
    }
}

/// The free-text date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputProps {
    pub input_type: &'static str,
    pub aria_label: String,
    pub value: String,
}

impl DateInputProps {
    /// Message for a text change.
    pub fn on_change(&self, text: impl Into<String>) -> Message {
        Message::InputChanged(text.into())
    }

    /// Message for losing focus.
    pub fn on_blur(&self) -> Message {
        Message::InputBlurred
    }
}

impl Attributes for DateInputProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.input_type.to_string()),
            ("aria-label", self.aria_label.clone()),
            ("value", self.value.clone()),
        ]
    }
}

/// The button that opens and closes the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenButtonProps {
    pub aria_label: String,
    pub aria_haspopup: &'static str,
    pub aria_expanded: bool,
}

impl OpenButtonProps {
    /// Message for activation.
    pub fn on_click(&self) -> Message {
        Message::ToggleOpen
    }

    /// Message for the element ref: `Some` on mount, `None` on unmount.
    pub fn on_ref(&self, handle: Option<FocusHandle>) -> Message {
        Message::OpenButtonMounted(handle)
    }
}

impl Attributes for OpenButtonProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("aria-label", self.aria_label.clone()),
            ("aria-haspopup", self.aria_haspopup.to_string()),
            ("aria-expanded", self.aria_expanded.to_string()),
        ]
    }
}

/// Direction of a month navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Prev,
    Next,
}

/// Previous/next month buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthButtonProps {
    pub step: MonthStep,
    pub aria_label: String,
    /// The same day in the target month is outside the bounds.
    pub disabled: bool,
}

impl MonthButtonProps {
    /// Message for activation.
    pub fn on_click(&self) -> Message {
        match self.step {
            MonthStep::Prev => Message::PrevMonth,
            MonthStep::Next => Message::NextMonth,
        }
    }
}

impl Attributes for MonthButtonProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("aria-label", self.aria_label.clone())];
        if self.disabled {
            attrs.push(("disabled", "true".to_string()));
        }
        attrs
    }
}

/// The element announcing the visible month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRegionProps {
    pub id: String,
    pub aria_live: &'static str,
}

impl Attributes for LiveRegionProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone()), ("aria-live", self.aria_live.to_string())]
    }
}

/// The month grid container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridProps {
    pub role: &'static str,
    pub aria_labelledby: String,
}

impl Attributes for GridProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", self.role.to_string()),
            ("aria-labelledby", self.aria_labelledby.clone()),
        ]
    }
}

/// One grid cell, blank or holding a day button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItemProps {
    pub role: &'static str,
    /// `None` for blank cells.
    pub aria_selected: Option<bool>,
}

impl Attributes for GridItemProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("role", self.role.to_string())];
        if let Some(selected) = self.aria_selected {
            attrs.push(("aria-selected", selected.to_string()));
        }
        attrs
    }
}

/// The focusable button inside a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayButtonProps {
    pub date: NaiveDate,
    pub aria_label: String,
    pub aria_selected: bool,
    /// `0` on the cursor day (roving tab stop), `-1` elsewhere.
    pub tab_index: i32,
    pub disabled: bool,
}

impl DayButtonProps {
    /// Message for activation.
    pub fn on_click(&self) -> Message {
        Message::DayClicked(self.date)
    }

    /// Message for a key press while the button has focus.
    pub fn on_key_down(&self, key: KeyEvent) -> Message {
        Message::DayKeyDown(key)
    }

    /// Message for the element ref: `Some` on mount, `None` on unmount.
    pub fn on_ref(&self, handle: Option<FocusHandle>) -> Message {
        Message::DayMounted {
            date: self.date,
            handle,
        }
    }
}

impl Attributes for DayButtonProps {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("aria-label", self.aria_label.clone()),
            ("aria-selected", self.aria_selected.to_string()),
            ("tabindex", self.tab_index.to_string()),
        ];
        if self.disabled {
            attrs.push(("disabled", "true".to_string()));
        }
        attrs
    }
}
