//! Company registration screen.

use crossterm::event::{KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::ViewAction;
use crate::api::types::{CompanyRegistration, CompanyType};
use crate::routes::Route;
use crate::tasks::ApiRequest;
use crate::ui::components::{centered_rect, render_hints, Choice, Form, FormEvent, FormField};

const NAME: usize = 0;
const TYPE: usize = 1;
const COMPANY_EMAIL: usize = 2;
const USERNAME: usize = 3;
const OWNER_EMAIL: usize = 4;
const PASSWORD: usize = 5;
const CONFIRM: usize = 6;
const FIRST_NAME: usize = 7;
const LAST_NAME: usize = 8;

fn registration_form() -> Form {
    let types = Choice::new(
        [CompanyType::Company, CompanyType::Freelancer]
            .iter()
            .map(|t| (type_value(*t).to_string(), t.label().to_string()))
            .collect(),
    );
    Form::new(
        "Register your company",
        vec![
            FormField::text("Company name"),
            FormField::choice("Type", types),
            FormField::text("Company email"),
            FormField::text("Owner username"),
            FormField::text("Owner email"),
            FormField::password("Password"),
            FormField::password("Confirm password"),
            FormField::text("First name"),
            FormField::text("Last name"),
        ],
    )
}

fn type_value(company_type: CompanyType) -> &'static str {
    match company_type {
        CompanyType::Company => "company",
        CompanyType::Freelancer => "freelancer",
    }
}

/// Company plus owner-account registration.
#[derive(Debug)]
pub struct RegisterView {
    form: Form,
    submitting: bool,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterView {
    pub fn new() -> Self {
        Self {
            form: registration_form(),
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
        if self.submitting && !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match self.form.handle_input(key) {
            FormEvent::Submit => self.submit(),
            FormEvent::Cancel => Some(ViewAction::Navigate(Route::Login)),
            FormEvent::Handled => None,
        }
    }

    fn submit(&mut self) -> Option<ViewAction> {
        let required = [NAME, COMPANY_EMAIL, USERNAME, OWNER_EMAIL, PASSWORD];
        if required.iter().any(|&i| self.form.text(i).trim().is_empty()) {
            self.form
                .set_error("Company name, emails, username and password are required");
            return None;
        }
        if self.form.text(PASSWORD) != self.form.text(CONFIRM) {
            self.form.set_error("Passwords do not match");
            return None;
        }

        let company_type = match self.form.choice(TYPE) {
            Some("freelancer") => CompanyType::Freelancer,
            _ => CompanyType::Company,
        };
        let registration = CompanyRegistration {
            name: self.form.text(NAME).trim().to_string(),
            company_type,
            email: self.form.text(COMPANY_EMAIL).trim().to_string(),
            owner_username: self.form.text(USERNAME).trim().to_string(),
            owner_email: self.form.text(OWNER_EMAIL).trim().to_string(),
            owner_password: self.form.text(PASSWORD).to_string(),
            owner_password_confirm: self.form.text(CONFIRM).to_string(),
            owner_first_name: self.form.optional(FIRST_NAME),
            owner_last_name: self.form.optional(LAST_NAME),
            ..Default::default()
        };

        self.submitting = true;
        self.form.clear_error();
        Some(ApiRequest::Register(registration).into())
    }

    /// The registration request failed with `message`.
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.form.set_error(message);
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.submitting = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let form_area = centered_rect(60, self.form.height() + 1, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(form_area);
        self.form.render(frame, chunks[0], self.submitting);
        render_hints(frame, chunks[1], "[Enter] register  [Esc] back to sign in");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn fill(view: &mut RegisterView, values: &[(usize, &str)]) {
        for (index, value) in values {
            view.form.set_text(*index, *value);
        }
    }

    fn valid(view: &mut RegisterView) {
        fill(
            view,
            &[
                (NAME, "Acme"),
                (COMPANY_EMAIL, "hello@acme.test"),
                (USERNAME, "owner"),
                (OWNER_EMAIL, "owner@acme.test"),
                (PASSWORD, "hunter22"),
                (CONFIRM, "hunter22"),
            ],
        );
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_password_mismatch_blocks_submit() {
        let mut view = RegisterView::new();
        valid(&mut view);
        view.form.set_text(CONFIRM, "hunter23");

        assert!(view.handle_input(enter()).is_none());
        assert_eq!(view.error(), Some("Passwords do not match"));
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_valid_registration_request() {
        let mut view = RegisterView::new();
        valid(&mut view);
        match view.handle_input(enter()) {
            Some(ViewAction::Request(ApiRequest::Register(registration))) => {
                assert_eq!(registration.name, "Acme");
                assert_eq!(registration.company_type, CompanyType::Company);
                assert_eq!(registration.owner_username, "owner");
                assert_eq!(registration.owner_first_name, None);
            }
            other => panic!("Expected register request, got {:?}", other),
        }
        assert!(view.is_submitting());
    }

    #[test]
    fn test_missing_fields() {
        let mut view = RegisterView::new();
        assert!(view.handle_input(enter()).is_none());
        assert!(view.error().is_some());
    }

    #[test]
    fn test_escape_returns_to_login() {
        let mut view = RegisterView::new();
        let action = view.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(action, Some(ViewAction::Navigate(Route::Login))));
    }
}
