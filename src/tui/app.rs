//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the planning session,
//! handles user input, renders the interface, and coordinates between the
//! welcome screen, the dashboard, the notes editor and dialogs.
//!
//! Every loop iteration redraws the whole screen from the session, so any
//! change to the task list is visible on the next frame.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::analyzer::TaskAnalyzer;
use crate::error::Error;
use crate::fields::{format_priority, Priority};
use crate::store::Session;
use crate::summary::summarize;
use crate::tui::{
    colors::{priority_color, DARK_GREEN, DARK_RED, GOLD, INDIGO, PINK, SLATE, VIOLET},
    enums::{AppState, ConfirmAction, StatusKind},
    input::{InputField, TextArea},
    utils::centered_rect,
};

/// Placeholder shown while the notes are empty.
const EXAMPLE_NOTES: &str =
    "fix login bug, update README, write tests for payment service, explore docker basics, refactor user service";

const COMPLETION_BANNER: &str = "🎉 All tasks completed! Amazing job, keep shining! ✨";

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    session: Session,
    analyzer: TaskAnalyzer,
    boost_urgent: bool,
    name_input: InputField,
    notes: TextArea,
    task_list_state: TableState,
    /// Rows marked for the next batch delete, keyed by index.
    marked: BTreeSet<usize>,
    status_message: String,
    status_kind: StatusKind,
    confirm_action: Option<ConfirmAction>,
    pending_generate: bool,
}

impl App {
    /// Create a new App. A preset `username` skips the welcome screen.
    pub fn new(analyzer: TaskAnalyzer, boost_urgent: bool, username: Option<&str>) -> Self {
        let mut session = Session::new();
        let state = match username {
            Some(name) if session.set_username(name) => AppState::Dashboard,
            _ => AppState::Welcome,
        };

        App {
            state,
            session,
            analyzer,
            boost_urgent,
            name_input: InputField::new(),
            notes: TextArea::new(),
            task_list_state: TableState::default(),
            marked: BTreeSet::new(),
            status_message: String::new(),
            status_kind: StatusKind::Info,
            confirm_action: None,
            pending_generate: false,
        }
    }

    /// Set a status message to display in the status bar.
    fn set_status(&mut self, kind: StatusKind, msg: impl Into<String>) {
        self.status_kind = kind;
        self.status_message = msg.into();
    }

    /// Clear the current status message.
    fn clear_status_message(&mut self) {
        self.status_message.clear();
        self.status_kind = StatusKind::Info;
    }

    fn selected(&self) -> Option<usize> {
        self.task_list_state
            .selected()
            .filter(|&i| i < self.session.tasks.len())
    }

    /// Keep the table selection on a valid row after the list changed.
    fn clamp_selection(&mut self) {
        let len = self.session.tasks.len();
        let selection = match self.task_list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.task_list_state.select(selection);
    }

    /// Drop all per-index UI state (delete marks, selection).
    fn clear_ui_keys(&mut self) {
        self.marked.clear();
        self.task_list_state.select(None);
        self.clamp_selection();
    }

    /// Queue plan generation for after the next frame, so the user sees the
    /// "analyzing" message while the classifier runs.
    fn request_generate(&mut self) {
        if self.notes.is_blank() {
            self.set_status(StatusKind::Warning, "Please enter at least one task.");
            return;
        }
        self.pending_generate = true;
        self.set_status(StatusKind::Info, "Analyzing your tasks with AI...");
    }

    /// Run a queued plan generation. Returns true if one ran.
    pub fn process_pending(&mut self) -> bool {
        if !self.pending_generate {
            return false;
        }
        self.pending_generate = false;
        self.generate_plan();
        true
    }

    fn generate_plan(&mut self) {
        let raw = self.notes.value();
        match self.session.generate_plan(&self.analyzer, &raw, self.boost_urgent) {
            Ok(count) => {
                self.clear_ui_keys();
                self.set_status(StatusKind::Success, format!("Plan updated with AI ✨ ({count} tasks)"));
            }
            Err(Error::InputEmpty) => {
                self.set_status(StatusKind::Warning, "No tasks found in your notes.");
            }
            Err(Error::ClassificationUnavailable(e)) => {
                warn!(error = %e, "plan generation failed");
                let hint = if e.is_transient() {
                    " (the model may still be loading, try again shortly)"
                } else {
                    ""
                };
                self.set_status(StatusKind::Error, format!("Classification failed: {e}{hint}"));
            }
            Err(e) => {
                warn!(error = %e, "plan generation failed");
                self.set_status(StatusKind::Error, format!("Error: {e}"));
            }
        }
    }

    fn toggle_done_selected(&mut self) {
        let Some(idx) = self.selected() else {
            return;
        };
        if let Some(done) = self.session.tasks.toggle_done(idx) {
            if self.session.tasks.is_all_done() {
                info!("all tasks completed");
                self.set_status(StatusKind::Success, COMPLETION_BANNER);
            } else if done {
                self.set_status(StatusKind::Info, "Marked done");
            } else {
                self.set_status(StatusKind::Info, "Marked not done");
            }
        }
    }

    fn set_priority_selected(&mut self, priority: Priority) {
        if let Some(idx) = self.selected() {
            if self.session.tasks.set_priority(idx, priority) {
                self.set_status(
                    StatusKind::Info,
                    format!("Priority set to {}", format_priority(priority)),
                );
            }
        }
    }

    fn cycle_priority_selected(&mut self) {
        let next = self
            .selected()
            .and_then(|idx| self.session.tasks.get(idx))
            .map(|t| t.priority.next());
        if let Some(p) = next {
            self.set_priority_selected(p);
        }
    }

    fn toggle_mark_selected(&mut self) {
        if let Some(idx) = self.selected() {
            if !self.marked.remove(&idx) {
                self.marked.insert(idx);
            }
            self.set_status(
                StatusKind::Info,
                format!("{} task(s) marked for deletion, press d to delete", self.marked.len()),
            );
        }
    }

    /// Delete the marked tasks, or the selected one if nothing is marked.
    fn delete_tasks(&mut self) {
        let indices: Vec<usize> = if self.marked.is_empty() {
            self.selected().into_iter().collect()
        } else {
            self.marked.iter().copied().collect()
        };
        if indices.is_empty() {
            self.set_status(StatusKind::Warning, "No task selected");
            return;
        }

        let removed = self.session.tasks.delete(&indices);
        // marks are index keys and are stale once rows shift
        self.marked.clear();
        self.clamp_selection();
        self.set_status(StatusKind::Info, format!("Deleted {removed} task(s)"));
    }

    fn reset_tasks(&mut self) {
        self.session.reset_tasks();
        self.clear_ui_keys();
        self.set_status(StatusKind::Info, "Tasks cleared");
    }

    fn full_reset(&mut self) {
        self.session.full_reset();
        self.clear_ui_keys();
        self.notes.clear();
        self.name_input.clear();
        self.state = AppState::Welcome;
        info!("session fully reset");
    }

    /// Handle a key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.clear_status_message();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.state {
            AppState::Welcome => self.handle_welcome_input(key.code),
            AppState::Dashboard => self.handle_dashboard_input(key.code),
            AppState::EditNotes => self.handle_notes_input(key.code, key.modifiers),
            AppState::Help => self.handle_help_input(key.code),
            AppState::Confirm => self.handle_confirm_input(key.code),
        }
    }

    /// Handle pasted text (bracketed paste).
    pub fn handle_paste(&mut self, text: &str) {
        match self.state {
            AppState::Welcome => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.name_input.handle_char(c);
                }
            }
            AppState::Dashboard | AppState::EditNotes => {
                self.state = AppState::EditNotes;
                self.notes.insert_str(text);
            }
            AppState::Help | AppState::Confirm => {}
        }
    }

    /// Handle keyboard input on the welcome screen.
    fn handle_welcome_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => return true,
            KeyCode::Enter => {
                let name = self.name_input.value.clone();
                if self.session.set_username(&name) {
                    self.state = AppState::Dashboard;
                    let greeting = format!("Welcome, {}! Press i to paste your tasks.", name.trim());
                    self.set_status(StatusKind::Success, greeting);
                } else {
                    self.set_status(StatusKind::Warning, "Please tell me what to call you.");
                }
            }
            KeyCode::Backspace => self.name_input.handle_backspace(),
            KeyCode::Delete => self.name_input.handle_delete(),
            KeyCode::Left => self.name_input.move_cursor_left(),
            KeyCode::Right => self.name_input.move_cursor_right(),
            KeyCode::Char(c) => self.name_input.handle_char(c),
            _ => {}
        }
        false
    }

    /// Handle keyboard input on the dashboard.
    fn handle_dashboard_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else {
                    self.clamp_selection();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.session.tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else {
                    self.clamp_selection();
                }
            }
            KeyCode::Char('i') | KeyCode::Char('e') => {
                self.state = AppState::EditNotes;
            }
            KeyCode::Char('g') => self.request_generate(),
            KeyCode::Char('b') => {
                self.boost_urgent = !self.boost_urgent;
                self.set_status(
                    StatusKind::Info,
                    if self.boost_urgent {
                        "Boosting urgent tasks (applies to the next plan)"
                    } else {
                        "Not boosting urgent tasks (applies to the next plan)"
                    },
                );
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_done_selected(),
            KeyCode::Char('p') => self.cycle_priority_selected(),
            KeyCode::Char('1') => self.set_priority_selected(Priority::High),
            KeyCode::Char('2') => self.set_priority_selected(Priority::Medium),
            KeyCode::Char('3') => self.set_priority_selected(Priority::Low),
            KeyCode::Char('x') => self.toggle_mark_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_tasks(),
            KeyCode::Char('r') => self.reset_tasks(),
            KeyCode::Char('R') => {
                self.confirm_action = Some(ConfirmAction::FullReset);
                self.state = AppState::Confirm;
            }
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the fullscreen notes editor.
    fn handle_notes_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match key {
            KeyCode::Esc => {
                self.state = AppState::Dashboard;
            }
            KeyCode::Char('g') if ctrl => {
                self.state = AppState::Dashboard;
                self.request_generate();
            }
            KeyCode::Backspace | KeyCode::Delete if ctrl => {
                // Ctrl+Backspace/Delete: Clear everything
                self.notes.clear();
            }
            KeyCode::Char(c) if !ctrl => self.notes.insert_char(c),
            KeyCode::Tab => self.notes.insert_str("    "),
            KeyCode::Enter => self.notes.newline(),
            KeyCode::Backspace => self.notes.backspace(),
            KeyCode::Delete => self.notes.delete(),
            KeyCode::Left => self.notes.move_left(),
            KeyCode::Right => self.notes.move_right(),
            KeyCode::Up => self.notes.move_up(),
            KeyCode::Down => self.notes.move_down(),
            KeyCode::Home => self.notes.move_home(),
            KeyCode::End => self.notes.move_end(),
            _ => {}
        }
        false
    }

    /// Any key leaves the help screen.
    fn handle_help_input(&mut self, _key: KeyCode) -> bool {
        self.state = AppState::Dashboard;
        false
    }

    /// Handle keyboard input in the confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.confirm_action.take() {
                    Some(ConfirmAction::FullReset) => self.full_reset(),
                    None => self.state = AppState::Dashboard,
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::Dashboard;
                self.confirm_action = None;
            }
            _ => {}
        }
        false
    }

    /// Poll for and handle terminal events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(self.handle_key(key)),
                Event::Paste(text) => self.handle_paste(&text),
                _ => {}
            }
        }
        Ok(false)
    }

    /// Render the welcome card asking for a name.
    fn render_welcome(&mut self, f: &mut Frame, area: Rect) {
        let card = centered_rect(50, 50, area);
        f.render_widget(Clear, card);

        let block = Block::default()
            .title(" AI Day Assistant ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(VIOLET))
            .style(Style::default().bg(SLATE));
        let inner = block.inner(card);
        f.render_widget(block, card);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let intro = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "🤖 Hi! I'm your AI Day Assistant",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("What should I call you?"),
        ])
        .alignment(Alignment::Center);
        f.render_widget(intro, chunks[0]);

        let input_block = Block::default().borders(Borders::ALL).title("Your name");
        let field = input_block.inner(chunks[1]);
        let field_width = field.width as usize;
        // long names scroll so the cursor stays inside the box
        let offset = (self.name_input.cursor + 1).saturating_sub(field_width);
        let input = if self.name_input.value.is_empty() {
            Paragraph::new(Span::styled("Aastha", Style::default().fg(Color::DarkGray)))
        } else {
            Paragraph::new(self.name_input.value.chars().skip(offset).collect::<String>())
        };
        f.render_widget(input.block(input_block), chunks[1]);

        let cursor_col = self.name_input.cursor.saturating_sub(offset);
        if cursor_col < field_width {
            f.set_cursor_position((field.x + cursor_col as u16, field.y));
        }

        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Press Enter to start planning, Esc to quit"),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        f.render_widget(hint, chunks[2]);
    }

    /// Render the header, notes panel, summary card and task table.
    fn render_dashboard(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let name = self.session.username().unwrap_or("friend");
        let header_text = vec![Line::from(vec![
            Span::styled("AI DAY ASSISTANT", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Hey {name}, let's plan your day with AI 💻"),
                Style::default().fg(PINK),
            ),
            Span::raw("  "),
            Span::styled(
                Local::now().format("%A, %d %B %Y").to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(INDIGO)))
            .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_notes_panel(f, columns[0]);
        self.render_results(f, columns[1]);
    }

    fn render_notes_panel(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let notes: Vec<Line> = if self.notes.is_blank() {
            vec![Line::from(Span::styled(
                EXAMPLE_NOTES,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))]
        } else {
            self.notes.lines().iter().map(|l| Line::from(l.as_str())).collect()
        };
        let panel = Paragraph::new(notes)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("📝 Enter your tasks (i to edit, g to generate)"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(panel, chunks[0]);

        let checkbox = if self.boost_urgent { "[x]" } else { "[ ]" };
        let options = Paragraph::new(format!("{checkbox} Boost urgent tasks (b)"))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(options, chunks[1]);
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect) {
        let summary_block = Block::default()
            .borders(Borders::ALL)
            .title("🤖 AI Summary")
            .border_style(Style::default().fg(VIOLET));

        let Some(summary) = summarize(self.session.tasks.tasks()) else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(area);
            let placeholder = Paragraph::new(
                "No tasks yet. Paste your tasks on the left and press g to generate your plan.",
            )
            .block(summary_block)
            .wrap(Wrap { trim: true });
            f.render_widget(placeholder, chunks[0]);
            return;
        };

        let all_done = self.session.tasks.is_all_done();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(3),
                Constraint::Length(if all_done { 3 } else { 0 }),
            ])
            .split(area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let summary_text = vec![
            Line::from(vec![Span::styled("Mood: ", bold), Span::raw(summary.mood.message())]),
            Line::from(vec![Span::styled("Total tasks: ", bold), Span::raw(summary.total.to_string())]),
            Line::from(vec![
                Span::styled("High priority: ", bold),
                Span::raw(summary.high_count.to_string()),
                Span::raw("  |  "),
                Span::styled("Low priority: ", bold),
                Span::raw(summary.low_count.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Start with: ", bold),
                Span::styled(summary.start_task, Style::default().add_modifier(Modifier::ITALIC)),
            ]),
        ];
        f.render_widget(Paragraph::new(summary_text).block(summary_block), chunks[0]);

        let header = Row::new(["", "", "Task", "Type • Estimate", "Priority"].map(|h| Cell::from(h).style(bold)))
            .style(Style::default().bg(INDIGO).fg(Color::White))
            .height(1);

        let done_count = self.session.tasks.tasks().iter().filter(|t| t.done).count();
        let rows: Vec<Row> = self
            .session
            .tasks
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let style = if self.marked.contains(&i) {
                    Style::default().fg(DARK_RED)
                } else if t.done {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from(if t.done { "[x]" } else { "[ ]" }),
                    Cell::from(if self.marked.contains(&i) { "🗑" } else { "" }),
                    Cell::from(t.text().to_string()),
                    Cell::from(format!("{} • {}", t.category().label(), t.estimate())),
                    Cell::from(format_priority(t.priority)).style(Style::default().fg(priority_color(t.priority))),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),  // Done
            Constraint::Length(2),  // Marked
            Constraint::Min(20),    // Task
            Constraint::Length(32), // Type • Estimate
            Constraint::Length(8),  // Priority
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "📋 Today's Tasks ({}/{} done) - Press 'h' for help",
                done_count,
                self.session.tasks.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);

        if all_done {
            let banner = Paragraph::new(Span::styled(COMPLETION_BANNER, bold))
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().bg(PINK).fg(Color::White))
                .alignment(Alignment::Center);
            f.render_widget(banner, chunks[2]);
        }
    }

    /// Render the fullscreen notes editor.
    fn render_notes_editor(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let block = Block::default()
            .title("📝 Paste your tasks - Fullscreen Editor")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White).bg(SLATE));
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        let visible_height = inner.height as usize;
        let visible_width = inner.width as usize;
        self.notes.adjust_scroll(visible_width, visible_height);

        let scroll_x = self.notes.scroll_x;
        let visible_lines: Vec<Line> = self
            .notes
            .lines()
            .iter()
            .skip(self.notes.scroll_y)
            .take(visible_height)
            .map(|line| Line::from(line.chars().skip(scroll_x).take(visible_width).collect::<String>()))
            .collect();
        f.render_widget(Paragraph::new(visible_lines), inner);

        let instructions = Paragraph::new(
            "Separate tasks with commas, semicolons or new lines  Ctrl+G to generate  Ctrl+Backspace to clear  Esc to return",
        )
        .block(Block::default().borders(Borders::ALL).title("Instructions"))
        .alignment(Alignment::Center);
        f.render_widget(instructions, chunks[1]);

        let (cursor_x, cursor_y) = self.notes.cursor();
        let cursor_y_visible = cursor_y.saturating_sub(self.notes.scroll_y);
        let cursor_x_visible = cursor_x.saturating_sub(scroll_x);
        if cursor_y_visible < visible_height && cursor_x_visible < visible_width {
            f.set_cursor_position((inner.x + cursor_x_visible as u16, inner.y + cursor_y_visible as u16));
        }
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let heading = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("AI Day Assistant Help", heading)),
            Line::from(""),
            Line::from(Span::styled("Planning:", heading)),
            Line::from("  i/e          Edit your notes (paste works too)"),
            Line::from("  g            Generate the plan from your notes"),
            Line::from("  b            Toggle boosting of urgent tasks"),
            Line::from(""),
            Line::from(Span::styled("Task List:", heading)),
            Line::from("  ↑/↓, k/j     Select task"),
            Line::from("  Space/c      Toggle done"),
            Line::from("  p            Cycle priority (High → Medium → Low)"),
            Line::from("  1/2/3        Set priority High/Medium/Low"),
            Line::from("  x            Mark/unmark for deletion"),
            Line::from("  d/Del        Delete marked tasks (or the selected one)"),
            Line::from("  r            Reset tasks only"),
            Line::from("  R            Full reset (name + tasks)"),
            Line::from("  h/?/F1       Show this help"),
            Line::from("  q/Esc/Ctrl+C Quit"),
            Line::from(""),
            Line::from(Span::styled("Notes Editor:", heading)),
            Line::from("  Ctrl+G       Generate the plan"),
            Line::from("  Ctrl+Backspace  Clear all notes"),
            Line::from("  Esc          Back to the dashboard"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    /// Render a confirmation dialog for destructive actions.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.confirm_action.map(|a| a.describe()).unwrap_or("")),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Welcome => "Welcome".to_string(),
                AppState::Dashboard => {
                    format!("Tasks: {} | Press 'h' for help", self.session.tasks.len())
                }
                AppState::EditNotes => "Notes Editor (Esc to return, Ctrl+G to generate)".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };

        let (bg, fg) = match self.status_kind {
            StatusKind::Info => (INDIGO, Color::White),
            StatusKind::Success => (DARK_GREEN, Color::White),
            StatusKind::Warning => (GOLD, Color::Rgb(20, 20, 20)),
            StatusKind::Error => (DARK_RED, Color::White),
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(bg).fg(fg))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::Welcome => self.render_welcome(f, chunks[0]),
            AppState::Dashboard => self.render_dashboard(f, chunks[0]),
            AppState::EditNotes => self.render_notes_editor(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_dashboard(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.process_pending() {
                continue;
            }

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
