use crate::command::{Command, CommandInner};
use crate::component::Component;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Component`] without a real terminal.
///
/// Synchronous commands (e.g. [`Command::message`]) are queued and flushed
/// with [`drain_messages`](TestProgram::drain_messages). Async commands,
/// including [`Command::next_tick`], are parked until
/// [`settle`](TestProgram::settle) awaits them, which lets a test observe the
/// state *between* an update and its deferred follow-up.
///
/// # Example
///
/// ```rust,ignore
/// use datepick_core::testing::TestProgram;
///
/// let mut prog = TestProgram::new(picker);
/// prog.send(Message::ToggleOpen);
/// prog.send(Message::Dismiss);
/// assert!(!prog.component().is_open());
/// prog.settle().await; // deferred focus restoration runs here
/// ```
pub struct TestProgram<C: Component> {
    component: C,
    pending_messages: Vec<C::Message>,
    pending_commands: Vec<Command<C::Message>>,
}

impl<C: Component> TestProgram<C> {
    /// Wrap an already-constructed component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending_messages: Vec::new(),
            pending_commands: Vec::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Synchronous commands returned by `update` are enqueued; call
    /// [`drain_messages`](TestProgram::drain_messages) to flush them.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.collect(cmd);
    }

    /// Process all pending synchronous messages produced by [`Command::message`].
    ///
    /// Repeatedly drains the pending queue until no new synchronous messages
    /// are generated.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.component.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Await every parked async command and feed its messages back in, until
    /// neither async commands nor synchronous messages remain.
    pub async fn settle(&mut self) {
        self.drain_messages();
        while !self.pending_commands.is_empty() {
            let commands: Vec<_> = self.pending_commands.drain(..).collect();
            for cmd in commands {
                for msg in cmd.resolve().await {
                    let next = self.component.update(msg);
                    self.collect(next);
                }
            }
            self.drain_messages();
        }
    }

    /// Number of async commands waiting for [`settle`](TestProgram::settle).
    pub fn pending_async(&self) -> usize {
        self.pending_commands.len()
    }

    /// Get a shared reference to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Render the component to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                self.component.view(frame, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain string.
    ///
    /// Rows are separated by newlines; trailing whitespace within each row is
    /// preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &buf[(x, y)];
                output.push_str(cell.symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Batch(cmds) | CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
            CommandInner::Future(fut) => self.pending_commands.push(Command {
                inner: CommandInner::Future(fut),
            }),
        }
    }
}
