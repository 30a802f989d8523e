//! Focus containment for the open calendar dialog.
//!
//! The presentation layer owns real elements and the trap primitive; the
//! engine only sees opaque [`FocusHandle`]s and talks to them through
//! [`FocusHost`]. [`FocusCoordinator`] is a two-state machine: `Inactive`
//! (no trap) and `Active` (exactly one trap over the root region).

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

/// Opaque reference to a focusable element owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusHandle(pub u64);

/// Options passed when a trap is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapOptions {
    /// Clicking outside the root region deactivates the trap. The host
    /// reports that by dispatching `Message::Dismiss`.
    pub click_outside_deactivates: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            click_outside_deactivates: true,
        }
    }
}

/// A focus trap over one region, created by [`FocusHost::create_trap`].
pub trait FocusTrap: Send {
    /// Start containing focus inside the region.
    fn activate(&mut self);
    /// Stop containing focus.
    fn deactivate(&mut self);
}

/// The presentation layer's focus services.
pub trait FocusHost: Send {
    /// Create an inactive trap over the region behind `root`.
    fn create_trap(&mut self, root: FocusHandle, options: TrapOptions) -> Box<dyn FocusTrap>;
    /// Move focus to the element behind `target`.
    fn focus(&mut self, target: FocusHandle);
}

/// A host for presentations without a focus model of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFocusHost;

struct NoopTrap;

impl FocusTrap for NoopTrap {
    fn activate(&mut self) {}
    fn deactivate(&mut self) {}
}

impl FocusHost for NoopFocusHost {
    fn create_trap(&mut self, _root: FocusHandle, _options: TrapOptions) -> Box<dyn FocusTrap> {
        Box::new(NoopTrap)
    }

    fn focus(&mut self, _target: FocusHandle) {}
}

enum TrapState {
    Inactive,
    Active(Box<dyn FocusTrap>),
}

/// Owns the trap lifecycle and the registry of focusable elements.
pub struct FocusCoordinator {
    host: Box<dyn FocusHost>,
    options: TrapOptions,
    trap: TrapState,
    root: Option<FocusHandle>,
    open_button: Option<FocusHandle>,
    days: HashMap<NaiveDate, FocusHandle>,
    /// Day to focus as soon as its cell is mounted.
    pending_day: Option<NaiveDate>,
    /// The last cursor move came from the keyboard, so focus follows it.
    follow_cursor: bool,
}

impl FocusCoordinator {
    pub fn new(host: Box<dyn FocusHost>, options: TrapOptions) -> Self {
        Self {
            host,
            options,
            trap: TrapState::Inactive,
            root: None,
            open_button: None,
            days: HashMap::new(),
            pending_day: None,
            follow_cursor: true,
        }
    }

    /// Whether a trap currently contains focus.
    pub fn is_active(&self) -> bool {
        matches!(self.trap, TrapState::Active(_))
    }

    /// Whether the root region is mounted.
    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    /// Day cell waiting to be mounted before it can take focus.
    pub fn pending_day(&self) -> Option<NaiveDate> {
        self.pending_day
    }

    /// Remember the mounted root region.
    pub fn attach_root(&mut self, root: FocusHandle) {
        self.root = Some(root);
    }

    /// Forget the root region. An active trap is torn down without closing
    /// the picker.
    pub fn detach_root(&mut self) {
        self.root = None;
        if let TrapState::Active(mut trap) = std::mem::replace(&mut self.trap, TrapState::Inactive) {
            debug!("root detached while trap active");
            trap.deactivate();
        }
        self.pending_day = None;
    }

    /// Create and activate a trap over the root, then focus `initial`.
    ///
    /// Does nothing while a trap already exists or the root is not mounted.
    /// Returns whether a trap was activated.
    pub fn activate(&mut self, initial: NaiveDate) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if self.is_active() {
            return false;
        }
        let mut trap = self.host.create_trap(root, self.options);
        trap.activate();
        self.trap = TrapState::Active(trap);
        debug!(%initial, "focus trap activated");
        self.focus_day(initial);
        true
    }

    /// Deactivate and drop the trap. Returns whether one was active.
    pub fn deactivate(&mut self) -> bool {
        self.pending_day = None;
        match std::mem::replace(&mut self.trap, TrapState::Inactive) {
            TrapState::Active(mut trap) => {
                trap.deactivate();
                debug!("focus trap deactivated");
                true
            }
            TrapState::Inactive => false,
        }
    }

    /// Record whether the next cursor moves should drag focus along.
    pub fn set_follow_cursor(&mut self, follow: bool) {
        self.follow_cursor = follow;
        if !follow {
            self.pending_day = None;
        }
    }

    /// React to a settled cursor position.
    pub fn cursor_moved(&mut self, date: NaiveDate) {
        if self.follow_cursor {
            self.focus_day(date);
        }
    }

    /// Register (`Some`) or forget (`None`) the element of a day cell.
    pub fn register_day(&mut self, date: NaiveDate, handle: Option<FocusHandle>) {
        match handle {
            Some(handle) => {
                self.days.insert(date, handle);
                if self.pending_day == Some(date) {
                    self.pending_day = None;
                    self.host.focus(handle);
                }
            }
            None => {
                self.days.remove(&date);
            }
        }
    }

    /// Register (`Some`) or forget (`None`) the open button.
    pub fn register_open_button(&mut self, handle: Option<FocusHandle>) {
        self.open_button = handle;
    }

    /// Return focus to the open button, if mounted.
    pub fn restore_focus(&mut self) {
        match self.open_button {
            Some(button) => self.host.focus(button),
            None => debug!("open button not mounted, focus not restored"),
        }
    }

    fn focus_day(&mut self, date: NaiveDate) {
        match self.days.get(&date) {
            Some(&handle) => {
                self.pending_day = None;
                self.host.focus(handle);
            }
            None => {
                debug!(%date, "day cell not mounted, focus deferred");
                self.pending_day = Some(date);
            }
        }
    }
}

impl fmt::Debug for FocusCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusCoordinator")
            .field("active", &self.is_active())
            .field("root", &self.root)
            .field("open_button", &self.open_button)
            .field("mounted_days", &self.days.len())
            .field("pending_day", &self.pending_day)
            .field("follow_cursor", &self.follow_cursor)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{HostEvent, RecordingHost};
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn coordinator() -> (FocusCoordinator, RecordingHost) {
        let host = RecordingHost::default();
        (
            FocusCoordinator::new(Box::new(host.clone()), TrapOptions::default()),
            host,
        )
    }

    #[test]
    fn activation_needs_root() {
        let (mut focus, host) = coordinator();
        assert!(!focus.activate(d(1)));
        assert!(!focus.is_active());
        assert!(host.events().is_empty());
    }

    #[test]
    fn activation_creates_single_trap_and_focuses_day() {
        let (mut focus, host) = coordinator();
        focus.register_day(d(3), Some(FocusHandle(3)));
        focus.attach_root(FocusHandle(100));

        assert!(focus.activate(d(3)));
        assert!(!focus.activate(d(3)));
        assert_eq!(
            host.events(),
            vec![
                HostEvent::TrapCreated(FocusHandle(100)),
                HostEvent::TrapActivated,
                HostEvent::Focused(FocusHandle(3)),
            ]
        );
    }

    #[test]
    fn unmounted_day_is_focused_once_mounted() {
        let (mut focus, host) = coordinator();
        focus.attach_root(FocusHandle(100));
        focus.activate(d(9));
        assert_eq!(focus.pending_day(), Some(d(9)));
        assert_eq!(host.last_focus(), None);

        focus.register_day(d(8), Some(FocusHandle(8)));
        assert_eq!(host.last_focus(), None);
        focus.register_day(d(9), Some(FocusHandle(9)));
        assert_eq!(host.last_focus(), Some(FocusHandle(9)));
        assert_eq!(focus.pending_day(), None);
    }

    #[test]
    fn deactivate_drops_trap_and_pending_focus() {
        let (mut focus, host) = coordinator();
        focus.attach_root(FocusHandle(100));
        focus.activate(d(9));
        assert!(focus.deactivate());
        assert!(!focus.deactivate());
        assert_eq!(focus.pending_day(), None);
        assert_eq!(host.events().last(), Some(&HostEvent::TrapDeactivated));

        // a fresh trap can be created afterwards
        assert!(focus.activate(d(9)));
    }

    #[test]
    fn cursor_follow_can_be_suspended() {
        let (mut focus, host) = coordinator();
        focus.register_day(d(4), Some(FocusHandle(4)));
        focus.set_follow_cursor(false);
        focus.cursor_moved(d(4));
        assert_eq!(host.last_focus(), None);

        focus.set_follow_cursor(true);
        focus.cursor_moved(d(4));
        assert_eq!(host.last_focus(), Some(FocusHandle(4)));
    }

    #[test]
    fn unregistered_day_is_forgotten() {
        let (mut focus, host) = coordinator();
        focus.register_day(d(4), Some(FocusHandle(4)));
        focus.register_day(d(4), None);
        focus.cursor_moved(d(4));
        assert_eq!(host.last_focus(), None);
        assert_eq!(focus.pending_day(), Some(d(4)));
    }

    #[test]
    fn restore_focus_targets_open_button() {
        let (mut focus, host) = coordinator();
        focus.restore_focus();
        assert!(host.events().is_empty());

        focus.register_open_button(Some(FocusHandle(7)));
        focus.restore_focus();
        assert_eq!(host.last_focus(), Some(FocusHandle(7)));
    }

    #[test]
    fn detach_root_tears_down_trap() {
        let (mut focus, host) = coordinator();
        focus.attach_root(FocusHandle(100));
        focus.activate(d(1));
        host.clear();
        focus.detach_root();
        assert!(!focus.is_active());
        assert!(!focus.has_root());
        assert_eq!(host.events(), vec![HostEvent::TrapDeactivated]);
    }
}
