//! Text input and form components.
//!
//! `TextInput` is a single-line editor with an optional password mask.
//! `Form` stacks labelled inputs and choice selectors, moves focus with
//! Tab / Shift+Tab and reports Enter and Esc to its owner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// A single-line text input.
///
/// The cursor is a character index, so multi-byte input edits correctly.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new masked input (for passwords).
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    /// Create a new input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// The trimmed value, or `None` when blank.
    pub fn optional(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the display value (masked if needed).
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input. Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let len = self.value.chars().count();
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = len;
                false
            }
            _ => false,
        }
    }

    fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.value.replace_range(from..to, "");
        self.cursor = start;
        true
    }

    /// Render the input in a bordered box titled with `label`.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let border_style = if focused {
            theme::focused_border()
        } else {
            theme::border()
        };

        let input = Paragraph::new(self.display_value()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(label.to_string()),
        );
        frame.render_widget(input, area);

        if focused {
            let cursor_x = area.x + 1 + self.cursor as u16;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}

/// A fixed set of options, one selected.
#[derive(Debug, Clone, Default)]
pub struct Choice {
    /// `(value, label)` pairs.
    options: Vec<(String, String)>,
    selected: usize,
}

impl Choice {
    pub fn new(options: Vec<(String, String)>) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    /// Select the option with `value`, if present.
    pub fn select_value(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|(v, _)| v == value) {
            self.selected = index;
        }
    }

    /// The selected value, if there are any options.
    pub fn value(&self) -> Option<&str> {
        self.options.get(self.selected).map(|(v, _)| v.as_str())
    }

    pub fn label(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|(_, l)| l.as_str())
            .unwrap_or("-")
    }

    fn cycle(&mut self, forward: bool) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }
}

/// The editor behind a form field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text(TextInput),
    Choice(Choice),
}

/// A labelled form field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text(TextInput::new()),
        }
    }

    pub fn password(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text(TextInput::masked()),
        }
    }

    /// A text field prefilled with `value`.
    pub fn prefilled(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            kind: FieldKind::Text(TextInput::with_value(value)),
        }
    }

    pub fn choice(label: &'static str, choice: Choice) -> Self {
        Self {
            label,
            kind: FieldKind::Choice(choice),
        }
    }
}

/// What a key press meant to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Enter was pressed.
    Submit,
    /// Esc was pressed.
    Cancel,
    /// The key was consumed (editing or focus change).
    Handled,
}

/// A vertical stack of fields with one focused.
#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The raw text of field `index`; empty for choices and missing fields.
    pub fn text(&self, index: usize) -> &str {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Text(input)) => input.value(),
            _ => "",
        }
    }

    /// The trimmed text of field `index`, or `None` when blank.
    pub fn optional(&self, index: usize) -> Option<String> {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Text(input)) => input.optional(),
            _ => None,
        }
    }

    /// The selected value of choice field `index`.
    pub fn choice(&self, index: usize) -> Option<&str> {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Choice(choice)) => choice.value(),
            _ => None,
        }
    }

    /// Replace the text of field `index`.
    pub fn set_text(&mut self, index: usize, value: impl Into<String>) {
        if let Some(FieldKind::Text(input)) = self.fields.get_mut(index).map(|f| &mut f.kind) {
            input.set_value(value);
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Clear every text field and move focus to the first field.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            if let FieldKind::Text(input) = &mut field.kind {
                input.clear();
            }
        }
        self.focus = 0;
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormEvent::Handled;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return FormEvent::Handled;
            }
            _ => {}
        }

        if let Some(field) = self.fields.get_mut(self.focus) {
            match &mut field.kind {
                FieldKind::Text(input) => {
                    if input.handle_input(key) {
                        self.error = None;
                    }
                }
                FieldKind::Choice(choice) => match key.code {
                    KeyCode::Left => choice.cycle(false),
                    KeyCode::Right | KeyCode::Char(' ') => choice.cycle(true),
                    _ => {}
                },
            }
        }
        FormEvent::Handled
    }

    /// Rows needed to render the form, including its border.
    pub fn height(&self) -> u16 {
        self.fields.len() as u16 * 3 + 4
    }

    /// Render the form inside a titled block.
    pub fn render(&self, frame: &mut Frame, area: Rect, submitting: bool) {
        let title = if submitting {
            format!(" {} (saving...) ", self.title)
        } else {
            format!(" {} ", self.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::focused_border())
            .title(Span::styled(title, theme::heading()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (index, field) in self.fields.iter().enumerate() {
            let focused = index == self.focus && !submitting;
            match &field.kind {
                FieldKind::Text(input) => input.render(frame, rows[index], field.label, focused),
                FieldKind::Choice(choice) => {
                    let border_style = if focused {
                        theme::focused_border()
                    } else {
                        theme::border()
                    };
                    let line = Line::from(vec![
                        Span::styled("‹ ", theme::muted()),
                        Span::styled(
                            choice.label().to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" ›", theme::muted()),
                    ]);
                    let widget = Paragraph::new(line).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border_style)
                            .title(field.label),
                    );
                    frame.render_widget(widget, rows[index]);
                }
            }
        }

        let status_row = rows[self.fields.len()];
        let status = match &self.error {
            Some(error) => Line::styled(
                error.clone(),
                Style::default().fg(ratatui::style::Color::Red),
            ),
            None => Line::styled(
                "Tab next field · ←/→ change option · Enter submit · Esc cancel",
                theme::muted(),
            ),
        };
        frame.render_widget(Paragraph::new(status), status_row);
    }
}
