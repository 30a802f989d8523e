use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable piece of interactive state that renders into a given [`Rect`].
///
/// A component owns its state, reacts to its own `Message` type in
/// [`update`](Component::update), and pushes side effects out through the
/// returned [`Command`]. Hosts decide *where* a component renders by passing
/// it a sub-region of the frame.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// use datepick_core::{Command, Component};
/// use datepick_widgets::date_picker::{self, DatePicker};
///
/// enum AppMsg { Picker(date_picker::Message) }
///
/// fn update(picker: &mut DatePicker, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Picker(m) => picker.update(m).map(AppMsg::Picker),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// All state derived from the component (for example prop bags) must
    /// reflect the settled state as soon as this returns.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently captures input.
    ///
    /// This is a hint for input routing.  A parent can query `focused()` to
    /// decide which child should receive keyboard events.  The default
    /// implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
