//! Accessible date picker: a text field, an open button, and a modal month
//! grid driven entirely from the keyboard or pointer.
//!
//! [`DatePicker`] owns the interaction state and the focus trap. The
//! presentation layer renders elements from the prop bags
//! ([`root_props`](DatePicker::root_props), [`day_button_props`](DatePicker::day_button_props),
//! ...) and dispatches the [`Message`]s their handler methods return.
//! [`Component::view`] is a terminal rendering built from those same bags.
//!
//! Interaction follows the WAI-ARIA dialog datepicker pattern:
//! <https://www.w3.org/WAI/ARIA/apg/patterns/dialog-modal/examples/datepicker-dialog/>

use chrono::NaiveDate;
use crossterm::event::{KeyEvent, KeyEventKind};
use datepick_core::command::Command;
use datepick_core::component::Component;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use crate::config::{
    interpolate, Clock, ConfigError, DatePickerConfig, DebugEvent, DebugHook, Labels,
};
use crate::focus::{FocusCoordinator, FocusHandle, FocusHost};
use crate::grid::{build_month_view, CalendarDay, MonthView};
use crate::keyboard::{DayAction, DayKeyMap, Navigation};
use crate::props::{
    DateInputProps, DayButtonProps, GridItemProps, GridProps, LiveRegionProps, MonthButtonProps,
    MonthStep, OpenButtonProps, RootProps, DAY_LABEL_FORMAT,
};
use crate::state::{InteractionState, Store};
use crate::text_entry::{parse_strict, resolve_blur, BlurOutcome};

/// Messages for the date picker component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The open button was activated.
    ToggleOpen,
    /// Open the dialog if it is closed.
    Open,
    /// Close the dialog if it is open.
    Close,
    /// The trap saw Escape or a click outside the dialog.
    Dismiss,
    /// The previous-month button was activated.
    PrevMonth,
    /// The next-month button was activated.
    NextMonth,
    /// The date field's text changed.
    InputChanged(String),
    /// The date field lost focus.
    InputBlurred,
    /// A key was pressed while a day button had focus.
    DayKeyDown(KeyEvent),
    /// A day button was activated.
    DayClicked(NaiveDate),
    /// The dialog root element was mounted.
    RootMounted(FocusHandle),
    /// The dialog root element was unmounted.
    RootUnmounted,
    /// The open button was mounted (`Some`) or unmounted (`None`).
    OpenButtonMounted(Option<FocusHandle>),
    /// A day button was mounted (`Some`) or unmounted (`None`).
    DayMounted {
        date: NaiveDate,
        handle: Option<FocusHandle>,
    },
    /// Deferred: return focus to the open button after the dialog closed.
    RestoreFocus,
}

/// Style configuration for the terminal rendering.
#[derive(Debug, Clone)]
pub struct DatePickerStyle {
    /// Border of the calendar dialog.
    pub border: Style,
    /// Month and year heading.
    pub title: Style,
    /// Weekday header row.
    pub weekday: Style,
    /// Ordinary day.
    pub day: Style,
    /// The cursor day.
    pub preselected: Style,
    /// The committed selection.
    pub selected: Style,
    /// Days outside the valid range.
    pub blocked: Style,
    /// Month navigation arrows when disabled.
    pub disabled_button: Style,
    /// The text field.
    pub input: Style,
}

impl Default for DatePickerStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            weekday: Style::default().fg(Color::DarkGray),
            day: Style::default(),
            preselected: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            blocked: Style::default().fg(Color::DarkGray),
            disabled_button: Style::default().fg(Color::DarkGray),
            input: Style::default(),
        }
    }
}

const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// The date picker controller.
///
/// # Example
///
/// ```ignore
/// use datepick_widgets::config::DatePickerConfig;
/// use datepick_widgets::date_picker::DatePicker;
/// use datepick_widgets::focus::NoopFocusHost;
///
/// let mut picker = DatePicker::new(
///     DatePickerConfig::new().with_min_date(today),
///     NoopFocusHost,
/// )?;
///
/// // Bind the open button:
/// let open = picker.open_button_props();
/// let cmd = picker.update(open.on_click());
/// ```
pub struct DatePicker {
    store: Store,
    focus: FocusCoordinator,
    key_map: DayKeyMap,
    labels: Labels,
    date_format: String,
    live_region_id: String,
    is_closed_on_select: bool,
    select_on_navigate: bool,
    clock: Clock,
    debug_hook: Option<DebugHook>,
    last_blur: Option<BlurOutcome>,
    style: DatePickerStyle,
}

impl DatePicker {
    /// Validate `config` and build a closed picker that reports focus
    /// changes to `host`.
    pub fn new(config: DatePickerConfig, host: impl FocusHost + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        let today = (config.clock)();
        Ok(Self {
            store: Store::new(config.bounds, config.initial_date, today),
            focus: FocusCoordinator::new(Box::new(host), config.trap_options),
            key_map: config.key_map,
            labels: config.labels,
            date_format: config.date_format,
            live_region_id: config.live_region_id,
            is_closed_on_select: config.is_closed_on_select,
            select_on_navigate: config.select_on_navigate,
            clock: config.clock,
            debug_hook: config.debug_hook,
            last_blur: None,
            style: DatePickerStyle::default(),
        })
    }

    /// Set the style used by the terminal rendering.
    pub fn with_style(mut self, style: DatePickerStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the calendar dialog is shown.
    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    /// The committed selection, if any.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.store.selected_date()
    }

    /// The navigation cursor.
    pub fn preselected_date(&self) -> NaiveDate {
        self.store.preselected_date()
    }

    /// Full interaction state.
    pub fn state(&self) -> &InteractionState {
        self.store.state()
    }

    /// Whether the focus trap is currently active.
    pub fn is_trap_active(&self) -> bool {
        self.focus.is_active()
    }

    /// Key bindings used on day cells, for help display.
    pub fn key_map(&self) -> &DayKeyMap {
        &self.key_map
    }

    /// Text the date field shows.
    pub fn display_text(&self) -> String {
        self.store.display_text(&self.date_format)
    }

    /// Grid for the month containing the cursor.
    pub fn weeks(&self) -> MonthView {
        let cursor = self.store.preselected_date();
        build_month_view(cursor, self.store.selected_date(), cursor, self.store.bounds())
    }

    // --- Prop bags ---

    /// Props for the dialog container.
    pub fn root_props(&self) -> RootProps {
        RootProps {
            role: "dialog",
            aria_modal: true,
            aria_label: self.labels.dialog.clone(),
        }
    }

    /// Props for the free-text date field.
    pub fn date_input_props(&self) -> DateInputProps {
        DateInputProps {
            input_type: "text",
            aria_label: self.labels.date_input.clone(),
            value: self.display_text(),
        }
    }

    /// Props for the button that opens and closes the dialog.
    pub fn open_button_props(&self) -> OpenButtonProps {
        let aria_label = match self.store.selected_date() {
            Some(date) => interpolate(
                &self.labels.open_with_selection,
                &[("date", &date.format(DAY_LABEL_FORMAT).to_string())],
            ),
            None => self.labels.open_without_selection.clone(),
        };
        OpenButtonProps {
            aria_label,
            aria_haspopup: "dialog",
            aria_expanded: self.store.is_open(),
        }
    }

    /// Props for the previous-month button.
    pub fn prev_month_button_props(&self) -> MonthButtonProps {
        MonthButtonProps {
            step: MonthStep::Prev,
            aria_label: self.labels.prev_month.clone(),
            disabled: !self.can_navigate(Navigation::PrevMonth),
        }
    }

    /// Props for the next-month button.
    pub fn next_month_button_props(&self) -> MonthButtonProps {
        MonthButtonProps {
            step: MonthStep::Next,
            aria_label: self.labels.next_month.clone(),
            disabled: !self.can_navigate(Navigation::NextMonth),
        }
    }

    /// Props for the element announcing the visible month.
    pub fn current_month_live_region_props(&self) -> LiveRegionProps {
        LiveRegionProps {
            id: self.live_region_id.clone(),
            aria_live: "polite",
        }
    }

    /// Props for the month grid container.
    pub fn grid_props(&self) -> GridProps {
        GridProps {
            role: "grid",
            aria_labelledby: self.live_region_id.clone(),
        }
    }

    /// Props for a grid cell; pass `None` for a leading blank.
    pub fn grid_item_props(&self, day: Option<&CalendarDay>) -> GridItemProps {
        GridItemProps {
            role: "gridcell",
            aria_selected: day.map(|day| day.is_selected),
        }
    }

    /// Props for the focusable button inside a day cell.
    pub fn day_button_props(&self, day: &CalendarDay) -> DayButtonProps {
        DayButtonProps {
            date: day.date,
            aria_label: day.date.format(DAY_LABEL_FORMAT).to_string(),
            aria_selected: day.is_selected,
            tab_index: if day.is_preselected { 0 } else { -1 },
            disabled: day.is_blocked,
        }
    }

    // --- Transitions ---

    fn can_navigate(&self, nav: Navigation) -> bool {
        nav.apply(self.store.preselected_date())
            .is_some_and(|date| !self.store.bounds().is_outside(date))
    }

    fn open_dialog(&mut self) -> Command<Message> {
        self.store.open();
        self.focus.set_follow_cursor(true);
        self.focus.activate(self.initial_focus());
        Command::none()
    }

    /// Day that takes focus when the trap activates: the selection, else
    /// the cursor.
    fn initial_focus(&self) -> NaiveDate {
        self.store
            .selected_date()
            .unwrap_or_else(|| self.store.preselected_date())
    }

    fn close_dialog(&mut self) -> Command<Message> {
        self.store.close();
        if self.focus.deactivate() {
            Command::next_tick(Message::RestoreFocus)
        } else {
            Command::none()
        }
    }

    fn step_month(&mut self, nav: Navigation) -> Command<Message> {
        if !self.store.is_open() {
            return Command::none();
        }
        self.focus.set_follow_cursor(false);
        if let Some(target) = nav.apply(self.store.preselected_date()) {
            self.store.set_preselected_date(target);
        }
        Command::none()
    }

    fn change_input(&mut self, text: &str) -> Command<Message> {
        self.store.set_draft_input_text(text);
        if let Some(date) = parse_strict(text, &self.date_format) {
            self.store.set_selected_date(date);
        }
        Command::none()
    }

    fn blur_input(&mut self) -> Command<Message> {
        let Some(draft) = self.store.draft().map(str::to_owned) else {
            return Command::none();
        };
        let outcome = resolve_blur(&draft, &self.date_format, (self.clock)());
        debug!(?outcome, draft = %draft, "date field committed");
        let date = outcome.date();
        self.store.set_selected_date(date);
        self.store.set_preselected_date(date);
        self.store.clear_draft();
        self.last_blur = Some(outcome);
        Command::none()
    }

    fn day_key_down(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.store.is_open() || key.kind == KeyEventKind::Release {
            return Command::none();
        }
        match self.key_map.resolve(&key) {
            Some(DayAction::Navigate(nav)) => {
                self.focus.set_follow_cursor(true);
                let moved = nav
                    .apply(self.store.preselected_date())
                    .filter(|target| self.store.set_preselected_date(*target));
                if let Some(target) = moved {
                    if self.select_on_navigate && self.store.set_selected_date(target) {
                        self.store.clear_draft();
                    }
                    self.focus.cursor_moved(target);
                }
                Command::none()
            }
            Some(DayAction::Commit) => self.commit(self.store.preselected_date()),
            Some(DayAction::Dismiss) => self.close_dialog(),
            None => Command::none(),
        }
    }

    fn click_day(&mut self, date: NaiveDate) -> Command<Message> {
        if !self.store.is_open() || self.store.bounds().is_outside(date) {
            return Command::none();
        }
        self.commit(date)
    }

    fn commit(&mut self, date: NaiveDate) -> Command<Message> {
        self.store.set_selected_date(date);
        self.store.set_preselected_date(date);
        self.store.clear_draft();
        debug!(%date, "date committed");
        if self.is_closed_on_select {
            self.close_dialog()
        } else {
            Command::none()
        }
    }

    fn mount_root(&mut self, root: FocusHandle) -> Command<Message> {
        self.focus.attach_root(root);
        if self.store.is_open() {
            self.focus.activate(self.initial_focus());
        }
        Command::none()
    }

    fn restore_focus(&mut self) -> Command<Message> {
        // reopened before the tick: the trap owns focus again
        if !self.store.is_open() {
            self.focus.restore_focus();
        }
        Command::none()
    }

    fn report(&mut self, msg: &Message) {
        let blur_outcome = self.last_blur.take();
        if let Some(hook) = &self.debug_hook {
            hook(&DebugEvent {
                message: msg,
                state: self.store.state(),
                trap_active: self.focus.is_active(),
                blur_outcome,
            });
        }
    }

    // --- Rendering ---

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let input = self.date_input_props();
        let button = self.open_button_props();
        let marker = if button.aria_expanded { "▴" } else { "▾" };
        let line = Line::from(vec![
            Span::styled(format!("{}: ", input.aria_label), self.style.weekday),
            Span::styled(input.value, self.style.input),
            Span::raw(" "),
            Span::styled(format!("[{marker}]"), self.style.border),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_calendar(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(self.root_props().aria_label)
            .borders(Borders::ALL)
            .border_style(self.style.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        // Heading: ‹ Month Year ›
        let heading = self.preselected_date().format("%B %Y").to_string();
        let arrow_style = |props: &MonthButtonProps| {
            if props.disabled {
                self.style.disabled_button
            } else {
                self.style.border
            }
        };
        let prev = self.prev_month_button_props();
        let next = self.next_month_button_props();
        let grid_width = WEEKDAY_HEADER.len() * 3;
        let gap = grid_width.saturating_sub(heading.width() + 2) / 2;
        let title = Line::from(vec![
            Span::styled("‹", arrow_style(&prev)),
            Span::raw(" ".repeat(gap)),
            Span::styled(heading, self.style.title),
            Span::raw(" ".repeat(gap)),
            Span::styled("›", arrow_style(&next)),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let header = WEEKDAY_HEADER.join(" ");
        frame.render_widget(
            Paragraph::new(Span::styled(header, self.style.weekday)),
            chunks[1],
        );

        let rows: Vec<Line> = self
            .weeks()
            .iter()
            .map(|week| {
                let cells = week.iter().flat_map(|cell| {
                    let span = match cell {
                        Some(day) => Span::styled(
                            format!("{:>2}", day.date.format("%-d")),
                            self.day_style(day),
                        ),
                        None => Span::raw("  "),
                    };
                    [span, Span::raw(" ")]
                });
                Line::from(cells.collect::<Vec<_>>())
            })
            .collect();
        frame.render_widget(
            Paragraph::new(rows).alignment(Alignment::Left),
            chunks[2],
        );
    }

    fn day_style(&self, day: &CalendarDay) -> Style {
        let base = if day.is_blocked {
            self.style.blocked
        } else if day.is_selected {
            self.style.selected
        } else {
            self.style.day
        };
        if day.is_preselected {
            base.patch(self.style.preselected)
        } else {
            base
        }
    }
}

impl Component for DatePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        trace!(?msg, "date picker update");
        let cmd = match &msg {
            Message::ToggleOpen if self.store.is_open() => self.close_dialog(),
            Message::ToggleOpen => self.open_dialog(),
            Message::Open if !self.store.is_open() => self.open_dialog(),
            Message::Close | Message::Dismiss if self.store.is_open() => self.close_dialog(),
            Message::Open | Message::Close | Message::Dismiss => Command::none(),
            Message::PrevMonth => self.step_month(Navigation::PrevMonth),
            Message::NextMonth => self.step_month(Navigation::NextMonth),
            Message::InputChanged(text) => self.change_input(text),
            Message::InputBlurred => self.blur_input(),
            Message::DayKeyDown(key) => self.day_key_down(*key),
            Message::DayClicked(date) => self.click_day(*date),
            Message::RootMounted(root) => self.mount_root(*root),
            Message::RootUnmounted => {
                self.focus.detach_root();
                Command::none()
            }
            Message::OpenButtonMounted(handle) => {
                self.focus.register_open_button(*handle);
                Command::none()
            }
            Message::DayMounted { date, handle } => {
                self.focus.register_day(*date, *handle);
                Command::none()
            }
            Message::RestoreFocus => self.restore_focus(),
        };
        self.report(&msg);
        cmd
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        self.render_input(frame, chunks[0]);

        if self.is_open() {
            // 7 columns of 3 cells plus borders; heading, weekdays, up to 6 weeks
            let width = (WEEKDAY_HEADER.len() as u16 * 3 + 2).min(chunks[1].width);
            let height = (2 + 6 + 2).min(chunks[1].height);
            let dialog = Rect {
                width,
                height,
                ..chunks[1]
            };
            self.render_calendar(frame, dialog);
        }
    }

    fn focused(&self) -> bool {
        self.is_open()
    }
}
