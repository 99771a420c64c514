//! Sign-in screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::ViewAction;
use crate::api::types::LoginCredentials;
use crate::routes::Route;
use crate::tasks::ApiRequest;
use crate::ui::components::{centered_rect, render_hints, Form, FormEvent, FormField};
use crate::ui::theme;

const USERNAME: usize = 0;
const PASSWORD: usize = 1;

/// The sign-in form.
#[derive(Debug)]
pub struct LoginView {
    form: Form,
    submitting: bool,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            form: Form::new(
                "Sign In",
                vec![FormField::text("Username"), FormField::password("Password")],
            ),
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.form.error()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            return Some(ViewAction::Navigate(Route::Register));
        }
        if self.submitting {
            return None;
        }

        match self.form.handle_input(key) {
            FormEvent::Submit => self.submit(),
            FormEvent::Cancel | FormEvent::Handled => None,
        }
    }

    fn submit(&mut self) -> Option<ViewAction> {
        let username = self.form.text(USERNAME).trim().to_string();
        let password = self.form.text(PASSWORD).to_string();
        if username.is_empty() || password.is_empty() {
            self.form.set_error("Username and password are required");
            return None;
        }

        self.submitting = true;
        self.form.clear_error();
        Some(ApiRequest::Login(LoginCredentials { username, password }).into())
    }

    /// The login request failed with `message`.
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.form.set_text(PASSWORD, "");
        self.form.set_error(message);
    }

    /// Forget everything typed so far.
    pub fn reset(&mut self) {
        self.form.reset();
        self.submitting = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let form_area = centered_rect(50, self.form.height() + 4, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(self.form.height()),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(form_area);

        frame.render_widget(
            Paragraph::new(Line::styled("taskdeck", theme::heading()))
                .alignment(ratatui::layout::Alignment::Center),
            chunks[0],
        );
        self.form.render(frame, chunks[1], self.submitting);
        render_hints(frame, chunks[3], "[Enter] sign in  [Ctrl+R] register  [Ctrl+C] quit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut LoginView, text: &str) {
        for c in text.chars() {
            view.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut view = LoginView::new();
        type_text(&mut view, "alice");
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
        assert_eq!(view.error(), Some("Username and password are required"));
    }

    #[test]
    fn test_submit_issues_login_once() {
        let mut view = LoginView::new();
        type_text(&mut view, "alice");
        view.handle_input(key(KeyCode::Tab));
        type_text(&mut view, "secret");

        match view.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::Login(credentials))) => {
                assert_eq!(credentials.username, "alice");
                assert_eq!(credentials.password, "secret");
            }
            other => panic!("Expected login request, got {:?}", other),
        }
        assert!(view.is_submitting());
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_fail_reenables_form() {
        let mut view = LoginView::new();
        view.submitting = true;
        view.fail("Invalid credentials".to_string());
        assert!(!view.is_submitting());
        assert_eq!(view.error(), Some("Invalid credentials"));
    }

    #[test]
    fn test_ctrl_r_opens_register() {
        let mut view = LoginView::new();
        let action = view.handle_input(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(matches!(action, Some(ViewAction::Navigate(Route::Register))));
    }
}
