//! Admin users tab: create, edit, (de)activate and delete accounts.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Cell, Row, Table},
    Frame,
};

use super::super::{failure, ViewAction};
use crate::api::types::{Role, User, UserCreate, UserUpdate};
use crate::api::Result;
use crate::tasks::ApiRequest;
use crate::ui::components::{
    centered_rect, render_state, Choice, ConfirmDialog, Confirmation, Form, FormEvent, FormField,
    Loadable, Selection, Spinner, Toast,
};
use crate::ui::theme;

fn role_value(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Manager => "manager",
        Role::Member => "member",
        Role::Viewer => "viewer",
    }
}

fn parse_role(value: Option<&str>) -> Role {
    Role::ALL
        .into_iter()
        .find(|r| Some(role_value(*r)) == value)
        .unwrap_or_default()
}

fn role_choice(selected: Role) -> Choice {
    let mut choice = Choice::new(
        Role::ALL
            .iter()
            .map(|r| (role_value(*r).to_string(), r.label().to_string()))
            .collect(),
    );
    choice.select_value(role_value(selected));
    choice
}

mod create {
    pub const USERNAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const PASSWORD: usize = 2;
    pub const CONFIRM: usize = 3;
    pub const FIRST_NAME: usize = 4;
    pub const LAST_NAME: usize = 5;
    pub const ROLE: usize = 6;
    pub const POSITION: usize = 7;
    pub const DEPARTMENT: usize = 8;
}

mod edit {
    pub const EMAIL: usize = 0;
    pub const FIRST_NAME: usize = 1;
    pub const LAST_NAME: usize = 2;
    pub const ROLE: usize = 3;
    pub const POSITION: usize = 4;
    pub const DEPARTMENT: usize = 5;
}

fn create_form() -> Form {
    Form::new(
        "New user",
        vec![
            FormField::text("Username"),
            FormField::text("Email"),
            FormField::password("Password"),
            FormField::password("Confirm password"),
            FormField::text("First name"),
            FormField::text("Last name"),
            FormField::choice("Role", role_choice(Role::Member)),
            FormField::text("Position"),
            FormField::text("Department"),
        ],
    )
}

fn edit_form(user: &User) -> Form {
    Form::new(
        format!("Edit {}", user.username),
        vec![
            FormField::prefilled("Email", user.email.clone()),
            FormField::prefilled("First name", user.first_name.clone()),
            FormField::prefilled("Last name", user.last_name.clone()),
            FormField::choice("Role", role_choice(user.role)),
            FormField::prefilled("Position", user.position.clone().unwrap_or_default()),
            FormField::prefilled("Department", user.department.clone().unwrap_or_default()),
        ],
    )
}

/// Validate the create form. Errors are toasts; nothing is sent.
fn user_create(form: &Form) -> std::result::Result<UserCreate, &'static str> {
    use create::*;
    let username = form.optional(USERNAME).ok_or("Username is required")?;
    let email = form.optional(EMAIL).ok_or("Email is required")?;
    if form.text(PASSWORD).is_empty() {
        return Err("Password is required");
    }
    if form.text(PASSWORD) != form.text(CONFIRM) {
        return Err("Passwords do not match");
    }
    Ok(UserCreate {
        username,
        email,
        password: form.text(PASSWORD).to_string(),
        password_confirm: form.text(CONFIRM).to_string(),
        first_name: form.optional(FIRST_NAME),
        last_name: form.optional(LAST_NAME),
        role: parse_role(form.choice(ROLE)),
        position: form.optional(POSITION),
        department: form.optional(DEPARTMENT),
        ..Default::default()
    })
}

fn user_update(form: &Form, user: &User) -> UserUpdate {
    use edit::*;
    let changed = |index: usize, current: &str| {
        let value = form.text(index).trim();
        (value != current).then(|| value.to_string())
    };
    let role = parse_role(form.choice(ROLE));
    UserUpdate {
        email: changed(EMAIL, &user.email),
        first_name: changed(FIRST_NAME, &user.first_name),
        last_name: changed(LAST_NAME, &user.last_name),
        role: (role != user.role).then_some(role),
        position: changed(POSITION, user.position.as_deref().unwrap_or("")),
        department: changed(DEPARTMENT, user.department.as_deref().unwrap_or("")),
        ..Default::default()
    }
}

#[derive(Debug)]
enum UserForm {
    Create(Form),
    Edit { user: User, form: Form },
}

#[derive(Debug, Default)]
pub struct UsersTab {
    users: Loadable<Vec<User>>,
    selection: Selection,
    form: Option<UserForm>,
    submitting: bool,
    confirm: Option<ConfirmDialog<String>>,
}

impl UsersTab {
    pub fn users(&self) -> &Loadable<Vec<User>> {
        &self.users
    }

    pub fn reload(&mut self) -> ApiRequest {
        self.users.start();
        ApiRequest::LoadUsers
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some() || self.confirm.is_some()
    }

    fn selected(&self) -> Option<&User> {
        self.users.get().and_then(|users| self.selection.selected(users))
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if let Some(confirm) = &self.confirm {
            return match confirm.handle_input(key)? {
                Confirmation::Yes => self
                    .confirm
                    .take()
                    .map(|c| ApiRequest::DeleteUser(c.into_target()).into()),
                Confirmation::No => {
                    self.confirm = None;
                    None
                }
            };
        }

        if self.form.is_some() {
            return self.handle_form_input(key);
        }

        if self.selection.handle_input(key, self.users.len()) {
            return None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.form = Some(UserForm::Create(create_form()));
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let user = self.selected()?.clone();
                let form = edit_form(&user);
                self.form = Some(UserForm::Edit { user, form });
                None
            }
            KeyCode::Char('a') => {
                let user = self.selected()?;
                Some(
                    ApiRequest::SetUserActive {
                        id: user.id.clone(),
                        active: !user.is_active,
                    }
                    .into(),
                )
            }
            KeyCode::Char('d') => {
                let (id, name) = self
                    .selected()
                    .map(|u| (u.id.clone(), u.display_name().to_string()))?;
                self.confirm = Some(ConfirmDialog::new(format!("Delete user {}?", name), id));
                None
            }
            KeyCode::Char('r') => Some(self.reload().into()),
            _ => None,
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.submitting {
            return None;
        }
        let event = match self.form.as_mut()? {
            UserForm::Create(form) | UserForm::Edit { form, .. } => form.handle_input(key),
        };
        match event {
            FormEvent::Handled => None,
            FormEvent::Cancel => {
                self.form = None;
                None
            }
            FormEvent::Submit => self.submit(),
        }
    }

    fn submit(&mut self) -> Option<ViewAction> {
        let request = match self.form.as_ref()? {
            UserForm::Create(form) => match user_create(form) {
                Ok(payload) => ApiRequest::CreateUser(payload),
                Err(message) => return Some(Toast::error(message).into()),
            },
            UserForm::Edit { user, form } => {
                let update = user_update(form, user);
                if update == UserUpdate::default() {
                    self.form = None;
                    return Some(Toast::info("Nothing to update").into());
                }
                ApiRequest::UpdateUser {
                    id: user.id.clone(),
                    update,
                }
            }
        };
        self.submitting = true;
        Some(request.into())
    }

    pub fn on_users_loaded(&mut self, result: Result<Vec<User>>) {
        self.users
            .finish(result, |e| e.display_message("Failed to load users"));
        self.selection.sync(self.users.len());
    }

    /// Result of a create or edit submitted from the form.
    pub fn on_user_saved(&mut self, result: Result<User>, created: bool) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(user) => {
                self.form = None;
                let title = if created { "User created" } else { "User updated" };
                vec![
                    Toast::success(title).with_description(user.username).into(),
                    self.reload().into(),
                ]
            }
            Err(e) if created => vec![failure("Failed to create user", &e, "Please try again.")],
            Err(e) => vec![failure("Failed to update user", &e, "Please try again.")],
        }
    }

    pub fn on_user_status_changed(
        &mut self,
        active: bool,
        result: Result<User>,
    ) -> Vec<ViewAction> {
        match result {
            Ok(user) => {
                let title = if active { "User activated" } else { "User deactivated" };
                vec![
                    Toast::success(title).with_description(user.username).into(),
                    self.reload().into(),
                ]
            }
            Err(e) => vec![failure("Failed to update user status", &e, "Please try again.")],
        }
    }

    pub fn on_user_deleted(&mut self, result: Result<()>) -> Vec<ViewAction> {
        match result {
            Ok(()) => vec![Toast::success("User deleted").into(), self.reload().into()],
            Err(e) => vec![failure("Failed to delete user", &e, "Please try again.")],
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        if let Some(users) = render_state(frame, area, &self.users, spinner, "No users yet.") {
            let rows: Vec<Row> = users
                .iter()
                .map(|u| {
                    let status = if u.is_active {
                        Cell::from("active").style(Style::default().fg(Color::Green))
                    } else {
                        Cell::from("inactive").style(theme::muted())
                    };
                    Row::new(vec![
                        Cell::from(u.display_name().to_string()),
                        Cell::from(u.username.clone()),
                        Cell::from(u.email.clone()),
                        Cell::from(u.role.label()).style(theme::role(u.role)),
                        Cell::from(u.position.clone().unwrap_or_default()),
                        status,
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Min(18),
                    Constraint::Length(16),
                    Constraint::Min(24),
                    Constraint::Length(9),
                    Constraint::Length(16),
                    Constraint::Length(9),
                ],
            )
            .header(
                Row::new(vec!["Name", "Username", "Email", "Role", "Position", "Status"])
                    .style(theme::heading()),
            )
            .highlight_style(theme::selected());
            frame.render_stateful_widget(table, area, self.selection.state_mut());
        }

        let full = frame.area();
        if let Some(UserForm::Create(form) | UserForm::Edit { form, .. }) = &self.form {
            form.render(frame, centered_rect(60, form.height(), full), self.submitting);
        }
        if let Some(confirm) = &self.confirm {
            confirm.render(frame, full);
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

    fn tab_with_create_form(values: &[(usize, &str)]) -> UsersTab {
        let mut tab = UsersTab::default();
        tab.handle_input(key(KeyCode::Char('n')));
        if let Some(UserForm::Create(form)) = &mut tab.form {
            for (index, value) in values {
                form.set_text(*index, *value);
            }
        }
        tab
    }

    #[test]
    fn test_password_mismatch_shows_toast_without_request() {
        let mut tab = tab_with_create_form(&[
            (create::USERNAME, "bob"),
            (create::EMAIL, "bob@acme.test"),
            (create::PASSWORD, "secret-1"),
            (create::CONFIRM, "secret-2"),
        ]);

        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Toast(toast)) => assert_eq!(toast.title, "Passwords do not match"),
            other => panic!("Expected error toast, got {:?}", other),
        }
        assert!(!tab.submitting);
        assert!(tab.captures_input());
    }

    #[test]
    fn test_create_user_request() {
        let mut tab = tab_with_create_form(&[
            (create::USERNAME, "bob"),
            (create::EMAIL, "bob@acme.test"),
            (create::PASSWORD, "secret-1"),
            (create::CONFIRM, "secret-1"),
        ]);
        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::CreateUser(payload))) => {
                assert_eq!(payload.username, "bob");
                assert_eq!(payload.role, Role::Member);
                assert_eq!(payload.first_name, None);
            }
            other => panic!("Expected create request, got {:?}", other),
        }
        assert!(tab.submitting);
    }

    #[test]
    fn test_toggle_active() {
        let mut tab = UsersTab::default();
        tab.on_users_loaded(Ok(vec![fixtures::user("7", Role::Member)]));
        match tab.handle_input(key(KeyCode::Char('a'))) {
            Some(ViewAction::Request(ApiRequest::SetUserActive { id, active })) => {
                assert_eq!(id, "7");
                assert!(!active);
            }
            other => panic!("Expected status request, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_sends_changed_role_only() {
        let mut tab = UsersTab::default();
        tab.on_users_loaded(Ok(vec![fixtures::user("7", Role::Member)]));
        tab.handle_input(key(KeyCode::Char('e')));
        for _ in 0..edit::ROLE {
            tab.handle_input(key(KeyCode::Tab));
        }
        tab.handle_input(key(KeyCode::Left));

        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::UpdateUser { id, update })) => {
                assert_eq!(id, "7");
                assert_eq!(update.role, Some(Role::Manager));
                assert_eq!(update.email, None);
            }
            other => panic!("Expected update request, got {:?}", other),
        }
    }

    #[test]
    fn test_mutations_reload_list() {
        let mut tab = UsersTab::default();
        let actions = tab.on_user_deleted(Ok(()));
        assert!(actions
            .iter()
            .any(|a| matches!(a, ViewAction::Request(ApiRequest::LoadUsers))));

        let actions = tab.on_user_status_changed(true, Ok(fixtures::user("7", Role::Member)));
        assert!(matches!(&actions[0], ViewAction::Toast(t) if t.title == "User activated"));
    }
}
