//! Account settings: profile, password and team memberships.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{failure, ViewAction};
use crate::api::types::{
    Company, MessageResponse, PasswordChange, ProfileUpdate, TeamMembership, TeamRole, User,
};
use crate::api::Result;
use crate::tasks::ApiRequest;
use crate::ui::components::{
    centered_rect, render_hints, render_state, Form, FormEvent, FormField, Loadable, Spinner,
    Toast,
};
use crate::ui::theme;

/// The dialog open over the settings page.
#[derive(Debug)]
enum Editing {
    Profile(Form),
    Password(Form),
}

fn profile_form(user: &User) -> Form {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    Form::new(
        "Edit profile",
        vec![
            FormField::prefilled("Email", user.email.clone()),
            FormField::prefilled("First name", user.first_name.clone()),
            FormField::prefilled("Last name", user.last_name.clone()),
            FormField::prefilled("Phone", text(&user.phone)),
            FormField::prefilled("Position", text(&user.position)),
            FormField::prefilled("Department", text(&user.department)),
        ],
    )
}

/// Only the fields that differ from `user` are sent.
fn profile_update(form: &Form, user: &User) -> ProfileUpdate {
    let changed = |index: usize, current: &str| {
        let value = form.text(index).trim();
        (value != current).then(|| value.to_string())
    };
    ProfileUpdate {
        email: changed(0, &user.email),
        first_name: changed(1, &user.first_name),
        last_name: changed(2, &user.last_name),
        phone: changed(3, user.phone.as_deref().unwrap_or("")),
        position: changed(4, user.position.as_deref().unwrap_or("")),
        department: changed(5, user.department.as_deref().unwrap_or("")),
    }
}

fn password_form() -> Form {
    Form::new(
        "Change password",
        vec![
            FormField::password("Current password"),
            FormField::password("New password"),
            FormField::password("Confirm new password"),
        ],
    )
}

#[derive(Debug, Default)]
pub struct SettingsView {
    user: Option<User>,
    company: Option<Company>,
    teams: Loadable<Vec<TeamMembership>>,
    editing: Option<Editing>,
    submitting: bool,
}

impl SettingsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the session's user and company, and fetch team memberships.
    pub fn on_enter(&mut self, user: Option<&User>, company: Option<&Company>) -> Vec<ApiRequest> {
        self.user = user.cloned();
        self.company = company.cloned();
        self.teams.start();
        vec![ApiRequest::LoadMyTeams]
    }

    pub fn captures_input(&self) -> bool {
        self.editing.is_some()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.editing.is_some() {
            return self.handle_form_input(key);
        }

        match key.code {
            KeyCode::Char('e') => {
                let form = profile_form(self.user.as_ref()?);
                self.editing = Some(Editing::Profile(form));
                None
            }
            KeyCode::Char('p') => {
                self.editing = Some(Editing::Password(password_form()));
                None
            }
            KeyCode::Char('r') => {
                self.teams.start();
                Some(ApiRequest::LoadMyTeams.into())
            }
            _ => None,
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.submitting {
            return None;
        }
        let form = match self.editing.as_mut()? {
            Editing::Profile(form) | Editing::Password(form) => form,
        };
        match form.handle_input(key) {
            FormEvent::Cancel => {
                self.editing = None;
                None
            }
            FormEvent::Handled => None,
            FormEvent::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> Option<ViewAction> {
        let request = match self.editing.as_mut()? {
            Editing::Profile(form) => {
                let update = profile_update(form, self.user.as_ref()?);
                if update == ProfileUpdate::default() {
                    self.editing = None;
                    return Some(Toast::info("Nothing to update").into());
                }
                ApiRequest::UpdateProfile(update)
            }
            Editing::Password(form) => {
                if form.text(0).is_empty() || form.text(1).is_empty() {
                    form.set_error("Current and new password are required");
                    return None;
                }
                if form.text(1) != form.text(2) {
                    form.set_error("Passwords do not match");
                    return None;
                }
                ApiRequest::ChangePassword(PasswordChange {
                    old_password: form.text(0).to_string(),
                    new_password: form.text(1).to_string(),
                    new_password_confirm: form.text(2).to_string(),
                })
            }
        };
        self.submitting = true;
        Some(request.into())
    }

    pub fn on_my_teams_loaded(&mut self, result: Result<Vec<TeamMembership>>) {
        self.teams
            .finish(result, |e| e.display_message("Failed to load your teams"));
    }

    /// The profile was saved. The caller records the user in the session.
    pub fn on_profile_updated(&mut self, result: &Result<User>) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(user) => {
                self.user = Some(user.clone());
                self.editing = None;
                vec![Toast::success("Profile updated").into()]
            }
            Err(e) => vec![failure("Failed to update profile", e, "Please try again.")],
        }
    }

    pub fn on_password_changed(&mut self, result: Result<MessageResponse>) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(response) => {
                self.editing = None;
                let toast = Toast::success("Password changed");
                if response.message.is_empty() {
                    vec![toast.into()]
                } else {
                    vec![toast.with_description(response.message).into()]
                }
            }
            Err(e) => vec![failure("Failed to change password", &e, "Please try again.")],
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let account = match &self.user {
            Some(user) => {
                let field = |label: &'static str, value: String| {
                    Line::from(vec![
                        Span::styled(format!("{:<12}", label), theme::muted()),
                        Span::raw(value),
                    ])
                };
                let optional =
                    |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
                vec![
                    field("Name", user.display_name().to_string()),
                    field("Username", user.username.clone()),
                    field("Email", user.email.clone()),
                    Line::from(vec![
                        Span::styled(format!("{:<12}", "Role"), theme::muted()),
                        Span::styled(user.role.label(), theme::role(user.role)),
                    ]),
                    field(
                        "Company",
                        self.company
                            .as_ref()
                            .map(|c| c.name.clone())
                            .or_else(|| user.company_name.clone())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    field("Phone", optional(&user.phone)),
                    field("Position", optional(&user.position)),
                    field("Department", optional(&user.department)),
                ]
            }
            None => vec![Line::styled("Loading account...", theme::muted())],
        };
        frame.render_widget(
            Paragraph::new(account).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border())
                    .title(Span::styled(" Account ", theme::heading())),
            ),
            chunks[0],
        );

        let teams_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(Span::styled(" My team memberships ", theme::heading()));
        let teams_area = teams_block.inner(chunks[1]);
        frame.render_widget(teams_block, chunks[1]);
        if let Some(memberships) = render_state(
            frame,
            teams_area,
            &self.teams,
            spinner,
            "You are not a member of any team.",
        ) {
            let lines: Vec<Line> = memberships
                .iter()
                .map(|m| {
                    let role = match m.role {
                        TeamRole::Lead => "Lead",
                        TeamRole::Member => "Member",
                    };
                    Line::from(vec![
                        Span::styled(format!("{:<8}", role), theme::heading()),
                        Span::styled(
                            format!("joined {}", m.joined_at.as_deref().unwrap_or("-")),
                            theme::muted(),
                        ),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), teams_area);
        }

        render_hints(frame, chunks[2], "[e] edit profile  [p] change password  [r] refresh");

        if let Some(Editing::Profile(form) | Editing::Password(form)) = &self.editing {
            form.render(frame, centered_rect(60, form.height(), area), self.submitting);
        }
    }
}
