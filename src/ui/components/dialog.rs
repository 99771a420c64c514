//! Modal dialogs: the critical-error dialog and yes/no confirmation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::AppError;
use crate::ui::theme;

/// A rectangle of `percent_x` by `height` centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Dialog shown for critical errors until dismissed.
#[derive(Debug, Clone, Default)]
pub struct ErrorDialog {
    visible: bool,
    title: String,
    message: String,
    action: Option<String>,
}

impl ErrorDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `error` using its dialog title, message and suggested action.
    pub fn show(&mut self, error: &AppError) {
        self.visible = true;
        self.title = error.title().to_string();
        self.message = error.user_message();
        self.action = error.suggested_action().map(str::to_string);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Enter or Esc dismisses the dialog. Returns true if it was dismissed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.hide();
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let mut lines = vec![Line::from(""), Line::from(self.message.clone()), Line::from("")];
        if let Some(action) = &self.action {
            lines.push(Line::styled(action.clone(), theme::muted()));
            lines.push(Line::from(""));
        }
        lines.push(Line::styled("[Enter] OK", theme::heading()));

        let dialog_area = centered_rect(60, 10, area);
        frame.render_widget(Clear, dialog_area);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(
                        format!(" {} ", self.title),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(paragraph, dialog_area);
    }
}

/// The answer to a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

/// A yes/no confirmation guarding a destructive action.
///
/// Carries the value the action applies to, usually an id.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
    prompt: String,
    target: T,
}

impl<T> ConfirmDialog<T> {
    pub fn new(prompt: impl Into<String>, target: T) -> Self {
        Self {
            prompt: prompt.into(),
            target,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// `y` or Enter confirms; `n` or Esc declines. Other keys are ignored.
    pub fn handle_input(&self, key: KeyEvent) -> Option<Confirmation> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Confirmation::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Confirmation::No),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_area = centered_rect(50, 7, area);
        frame.render_widget(Clear, dialog_area);
        let lines = vec![
            Line::from(""),
            Line::from(self.prompt.clone()),
            Line::from(""),
            Line::styled("[y] Yes   [n] No", theme::heading()),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Confirm "),
            );
        frame.render_widget(paragraph, dialog_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_error_dialog_show_and_dismiss() {
        let mut dialog = ErrorDialog::new();
        dialog.show(&AppError::other("Something broke"));
        assert!(dialog.is_visible());
        assert_eq!(dialog.message(), "Something broke");

        assert!(!dialog.handle_input(key(KeyCode::Char('x'))));
        assert!(dialog.is_visible());
        assert!(dialog.handle_input(key(KeyCode::Enter)));
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_confirm_dialog_answers() {
        let dialog = ConfirmDialog::new("Delete project?", "p1".to_string());
        assert_eq!(dialog.handle_input(key(KeyCode::Char('y'))), Some(Confirmation::Yes));
        assert_eq!(dialog.handle_input(key(KeyCode::Esc)), Some(Confirmation::No));
        assert_eq!(dialog.handle_input(key(KeyCode::Char('q'))), None);
        assert_eq!(dialog.into_target(), "p1");
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.width, 50);
        assert!(rect.y > 0);
    }
}
