//! Admin company tab.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::{failure, ViewAction};
use crate::api::types::{Company, CompanyUpdate};
use crate::api::Result;
use crate::tasks::ApiRequest;
use crate::ui::components::{centered_rect, Form, FormEvent, FormField, Loadable, Spinner, Toast};
use crate::ui::theme;

fn company_form(company: &Company) -> Form {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    Form::new(
        "Edit company",
        vec![
            FormField::prefilled("Name", company.name.clone()),
            FormField::prefilled("Description", text(&company.description)),
            FormField::prefilled("Email", company.email.clone()),
            FormField::prefilled("Phone", text(&company.phone)),
            FormField::prefilled("Address", text(&company.address)),
            FormField::prefilled("Website", text(&company.website)),
        ],
    )
}

fn company_update(form: &Form, company: &Company) -> CompanyUpdate {
    let changed = |index: usize, current: &str| {
        let value = form.text(index).trim();
        (value != current).then(|| value.to_string())
    };
    CompanyUpdate {
        name: changed(0, &company.name),
        description: changed(1, company.description.as_deref().unwrap_or("")),
        email: changed(2, &company.email),
        phone: changed(3, company.phone.as_deref().unwrap_or("")),
        address: changed(4, company.address.as_deref().unwrap_or("")),
        website: changed(5, company.website.as_deref().unwrap_or("")),
    }
}

#[derive(Debug, Default)]
pub struct CompanyTab {
    company: Loadable<Company>,
    form: Option<Form>,
    submitting: bool,
}

impl CompanyTab {
    pub fn company(&self) -> &Loadable<Company> {
        &self.company
    }

    pub fn reload(&mut self) -> ApiRequest {
        self.company.start();
        ApiRequest::LoadCompany
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let Some(form) = &mut self.form else {
            return match key.code {
                KeyCode::Char('e') => {
                    self.form = Some(company_form(self.company.get()?));
                    None
                }
                KeyCode::Char('r') => Some(self.reload().into()),
                _ => None,
            };
        };

        if self.submitting {
            return None;
        }
        match form.handle_input(key) {
            FormEvent::Submit => {
                if form.optional(0).is_none() {
                    form.set_error("Name is required");
                    return None;
                }
                let update = company_update(form, self.company.get()?);
                if update == CompanyUpdate::default() {
                    self.form = None;
                    return Some(Toast::info("Nothing to update").into());
                }
                self.submitting = true;
                Some(ApiRequest::UpdateCompany(update).into())
            }
            FormEvent::Cancel => {
                self.form = None;
                None
            }
            FormEvent::Handled => None,
        }
    }

    pub fn on_company_loaded(&mut self, result: Result<Company>) {
        self.company
            .finish(result, |e| e.display_message("Failed to load company"));
    }

    /// The company was saved. The caller records it in the session.
    pub fn on_company_updated(&mut self, result: &Result<Company>) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(company) => {
                self.company = Loadable::Loaded(company.clone());
                self.form = None;
                vec![Toast::success("Company updated").into()]
            }
            Err(e) => vec![failure("Failed to update company", e, "Please try again.")],
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        match &self.company {
            Loadable::Loaded(company) => {
                let field = |label: &'static str, value: String| {
                    Line::from(vec![
                        Span::styled(format!("{:<14}", label), theme::muted()),
                        Span::raw(value),
                    ])
                };
                let optional =
                    |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
                let lines = vec![
                    Line::styled(company.name.clone(), theme::heading()),
                    Line::from(""),
                    field("Type", company.company_type.label().to_string()),
                    field("Email", company.email.clone()),
                    field("Phone", optional(&company.phone)),
                    field("Address", optional(&company.address)),
                    field("Website", optional(&company.website)),
                    field("Users", company.users_count.to_string()),
                    Line::from(""),
                    Line::from(optional(&company.description)),
                ];
                frame.render_widget(Paragraph::new(lines), area);
            }
            Loadable::Failed(message) => frame.render_widget(
                Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
                area,
            ),
            Loadable::Loading | Loadable::NotLoaded => spinner.render(frame, area, "Loading..."),
        }

        if let Some(form) = &self.form {
            form.render(
                frame,
                centered_rect(60, form.height(), frame.area()),
                self.submitting,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_sends_changed_fields() {
        let mut tab = CompanyTab::default();
        tab.on_company_loaded(Ok(fixtures::company()));
        tab.handle_input(key(KeyCode::Char('e')));
        tab.form.as_mut().unwrap().set_text(5, "https://acme.test");

        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::UpdateCompany(update))) => {
                assert_eq!(update.website.as_deref(), Some("https://acme.test"));
                assert_eq!(update.name, None);
            }
            other => panic!("Expected update request, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_needs_loaded_company() {
        let mut tab = CompanyTab::default();
        assert!(tab.handle_input(key(KeyCode::Char('e'))).is_none());
        assert!(!tab.captures_input());
    }
}
