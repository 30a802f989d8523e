//! **datepick** -- an accessible date picker for [`ratatui`] applications.
//!
//! This is the umbrella crate that re-exports everything needed to embed a
//! picker from a single dependency:
//!
//! * All public items from [`datepick_core`] are available at the crate root
//!   ([`Component`], [`Command`], [`testing`]).
//! * The [`widgets`] module re-exports everything from [`datepick_widgets`].
//! * [`chrono`], [`crossterm`], and [`ratatui`] are re-exported so downstream
//!   crates use the same versions.
//!
//! # Quick start
//!
//! ```ignore
//! use datepick::widgets::config::DatePickerConfig;
//! use datepick::widgets::date_picker::{DatePicker, Message};
//! use datepick::widgets::focus::NoopFocusHost;
//! use datepick::Component;
//!
//! let mut picker = DatePicker::new(DatePickerConfig::new(), NoopFocusHost)?;
//! picker.update(Message::Open);
//! for week in picker.weeks() {
//!     for day in week.iter().flatten() {
//!         let props = picker.day_button_props(day);
//!         // render a button with props.aria_label and props.tab_index
//!     }
//! }
//! ```

pub use datepick_core::*;

/// Re-export of all date picker modules.
pub mod widgets {
    pub use datepick_widgets::*;
}

pub use chrono;
pub use crossterm;
pub use ratatui;
