//! # Date Picker Example
//!
//! Hosts a [`DatePicker`] in a plain crossterm event loop:
//! - key presses become picker messages
//! - the loop plays the presentation layer, mounting the dialog root and the
//!   visible day cells after every update
//! - returned commands are resolved and their messages fed back in, which is
//!   how the deferred `RestoreFocus` reaches the picker after it closes
//!
//! Closed: type a date, `Tab` to commit the text, `Enter` to open.
//! Open: arrows, `Home`/`End`, `PgUp`/`PgDn` (with `Shift` for years),
//! `<`/`>` for the month buttons, `Enter` to choose, `Esc` to close.
//! `Ctrl+C` quits.
//!
//! Run with: `cargo run --example date_picker`

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use datepick::chrono::{Datelike, NaiveDate};
use datepick::crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use datepick::ratatui::layout::{Constraint, Layout};
use datepick::ratatui::style::{Color, Style};
use datepick::ratatui::text::{Line, Span};
use datepick::ratatui::widgets::Paragraph;
use datepick::ratatui::Frame;
use datepick::widgets::config::DatePickerConfig;
use datepick::widgets::date_picker::{DatePicker, Message};
use datepick::widgets::focus::{FocusHandle, FocusHost, FocusTrap, TrapOptions};
use datepick::Component;
use futures::StreamExt;

const ROOT: FocusHandle = FocusHandle(1);
const OPEN_BUTTON: FocusHandle = FocusHandle(2);

fn day_handle(date: NaiveDate) -> FocusHandle {
    FocusHandle(100 + u64::from(date.num_days_from_ce().unsigned_abs()))
}

/// Remembers which element holds focus so the status line can show it.
#[derive(Clone, Default)]
struct TerminalFocus {
    focused: Arc<Mutex<Option<FocusHandle>>>,
}

impl TerminalFocus {
    fn current(&self) -> Option<FocusHandle> {
        self.focused.lock().ok().and_then(|focused| *focused)
    }
}

// Input routing below already keeps keys inside the open dialog.
struct KeyboardTrap;

impl FocusTrap for KeyboardTrap {
    fn activate(&mut self) {}
    fn deactivate(&mut self) {}
}

impl FocusHost for TerminalFocus {
    fn create_trap(&mut self, _root: FocusHandle, _options: TrapOptions) -> Box<dyn FocusTrap> {
        Box::new(KeyboardTrap)
    }

    fn focus(&mut self, target: FocusHandle) {
        if let Ok(mut focused) = self.focused.lock() {
            *focused = Some(target);
        }
    }
}

struct App {
    picker: DatePicker,
    focus: TerminalFocus,
    mounted_days: Vec<NaiveDate>,
    root_mounted: bool,
}

impl App {
    /// Run `msg` and everything its commands produce.
    async fn dispatch(&mut self, msg: Message) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let cmd = self.picker.update(msg);
            queue.extend(cmd.resolve().await);
        }
    }

    /// Element refs that changed since the last frame.
    fn mount_messages(&mut self) -> Vec<Message> {
        let open = self.picker.is_open();
        let mut messages = Vec::new();
        if open != self.root_mounted {
            messages.push(self.picker.root_props().on_ref(open.then_some(ROOT)));
            self.root_mounted = open;
        }

        let visible: Vec<NaiveDate> = if open {
            self.picker
                .weeks()
                .iter()
                .flatten()
                .flatten()
                .map(|day| day.date)
                .collect()
        } else {
            Vec::new()
        };
        for date in std::mem::take(&mut self.mounted_days) {
            if !visible.contains(&date) {
                messages.push(Message::DayMounted { date, handle: None });
            }
        }
        messages.extend(visible.iter().map(|&date| Message::DayMounted {
            date,
            handle: Some(day_handle(date)),
        }));
        self.mounted_days = visible;
        messages
    }

    async fn sync(&mut self) {
        for msg in self.mount_messages() {
            self.dispatch(msg).await;
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [picker_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        self.picker.view(frame, picker_area);

        let focused = match self.focus.current() {
            Some(OPEN_BUTTON) => "open button".to_string(),
            Some(_) if self.picker.is_open() => self.picker.preselected_date().to_string(),
            _ => "date field".to_string(),
        };
        let status = Line::from(vec![
            Span::styled("focus: ", Style::default().fg(Color::DarkGray)),
            Span::raw(focused),
            Span::styled("  ctrl+c quit", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(status), status_area);
    }

    /// Translate a key press into a picker message, or `None` to ignore it.
    fn route_key(&self, key: datepick::crossterm::event::KeyEvent) -> Option<Message> {
        if self.picker.is_open() {
            return match key.code {
                KeyCode::Char('<') => Some(self.picker.prev_month_button_props().on_click()),
                KeyCode::Char('>') => Some(self.picker.next_month_button_props().on_click()),
                _ => {
                    let cursor = self.picker.preselected_date();
                    self.picker
                        .weeks()
                        .iter()
                        .flatten()
                        .flatten()
                        .find(|day| day.date == cursor)
                        .map(|day| self.picker.day_button_props(day).on_key_down(key))
                }
            };
        }

        let input = self.picker.date_input_props();
        let mut text = input.value.clone();
        match key.code {
            KeyCode::Enter => Some(self.picker.open_button_props().on_click()),
            KeyCode::Tab => Some(input.on_blur()),
            KeyCode::Backspace => {
                text.pop();
                Some(input.on_change(text))
            }
            KeyCode::Char(c) => {
                text.push(c);
                Some(input.on_change(text))
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let focus = TerminalFocus::default();
    let picker = DatePicker::new(DatePickerConfig::new(), focus.clone()).map_err(io::Error::other)?;
    let mut app = App {
        picker,
        focus,
        mounted_days: Vec::new(),
        root_mounted: false,
    };
    app.dispatch(Message::OpenButtonMounted(Some(OPEN_BUTTON))).await;

    let mut terminal = datepick::ratatui::init();
    let mut events = EventStream::new();
    let result = loop {
        if let Err(err) = terminal.draw(|frame| app.view(frame)) {
            break Err(err);
        }
        let key = match events.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
            Some(Ok(_)) => continue,
            Some(Err(err)) => break Err(err),
            None => break Ok(()),
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break Ok(());
        }
        if let Some(msg) = app.route_key(key) {
            app.dispatch(msg).await;
        }
        app.sync().await;
    };
    datepick::ratatui::restore();
    result
}
