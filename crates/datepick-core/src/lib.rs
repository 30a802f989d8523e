//! Core building blocks for **datepick**.
//!
//! `datepick-core` holds the pieces every datepick component is built on.
//! The design follows the [Elm Architecture]: a component is a state owner
//! with a pure-ish **update -> view** cycle, and side effects are pushed to
//! the edges as [`Command`]s that the host executes.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Reusable state owner that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes a side effect (follow-up message, async task, next-tick delivery) |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Component`] |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod testing;

pub use command::Command;
pub use component::Component;
