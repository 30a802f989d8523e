//! The **datepick** date picker engine.
//!
//! [`DatePicker`](date_picker::DatePicker) implements
//! [`datepick_core::Component`] and owns everything behind an accessible
//! date picker: the month grid, keyboard navigation, free-text entry and the
//! focus trap around the open dialog. A presentation layer renders elements
//! from the prop bags and feeds their handler messages back in.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`date_picker`] | The picker component, its messages and prop getters |
//! | [`config`] | Construction-time options, labels and validation |
//! | [`props`] | Attribute and handler bags for each rendered element |
//! | [`grid`] | Month grid builder |
//! | [`state`] | Interaction state store with range-aware setters |
//! | [`range`] | Min/max date bounds |
//! | [`text_entry`] | Strict and lenient date text parsing |
//! | [`keyboard`] | Key bindings and cursor movements |
//! | [`focus`] | Focus trap lifecycle and day focus tracking |

pub mod config;
pub mod date_picker;
pub mod focus;
pub mod grid;
pub mod keyboard;
pub mod props;
pub mod range;
pub mod state;
pub mod text_entry;
