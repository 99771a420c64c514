//! Admin teams tab: teams, their leads and members.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use super::super::{failure, ViewAction};
use crate::api::types::{Team, TeamInput, TeamMembership, TeamRole, User};
use crate::api::Result;
use crate::tasks::ApiRequest;
use crate::ui::components::{
    centered_rect, render_state, Choice, ConfirmDialog, Confirmation, Form, FormEvent, FormField,
    Loadable, Selection, Spinner, Toast,
};
use crate::ui::theme;

const NAME: usize = 0;
const DESCRIPTION: usize = 1;
const LEAD: usize = 2;

/// `(id, name)` pairs of users offered in choices.
type UserOptions = Vec<(String, String)>;

fn team_form(title: String, team: Option<&Team>, users: &UserOptions) -> Form {
    let mut leads = vec![(String::new(), "No lead".to_string())];
    leads.extend(users.iter().cloned());
    let mut lead = Choice::new(leads);
    if let Some(id) = team.and_then(|t| t.lead.as_deref()) {
        lead.select_value(id);
    }
    Form::new(
        title,
        vec![
            FormField::prefilled("Name", team.map(|t| t.name.clone()).unwrap_or_default()),
            FormField::prefilled(
                "Description",
                team.and_then(|t| t.description.clone()).unwrap_or_default(),
            ),
            FormField::choice("Lead", lead),
        ],
    )
}

fn team_input(form: &Form) -> std::result::Result<TeamInput, &'static str> {
    let name = form.optional(NAME).ok_or("Name is required")?;
    Ok(TeamInput {
        name: Some(name),
        description: form.optional(DESCRIPTION),
        lead: form
            .choice(LEAD)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        ..Default::default()
    })
}

#[derive(Debug)]
enum TeamForm {
    Create(Form),
    Edit { id: String, form: Form },
}

/// A pending destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Removal {
    Team(String),
    Member { team_id: String, user_id: String },
}

/// Members of the open team.
#[derive(Debug)]
struct MembersPanel {
    team_id: String,
    team_name: String,
    members: Loadable<Vec<TeamMembership>>,
    selection: Selection,
    /// Present while picking a user to add.
    adding: Option<Form>,
}

#[derive(Debug, Default)]
pub struct TeamsTab {
    teams: Loadable<Vec<Team>>,
    selection: Selection,
    users: UserOptions,
    form: Option<TeamForm>,
    submitting: bool,
    confirm: Option<ConfirmDialog<Removal>>,
    members: Option<MembersPanel>,
}

impl TeamsTab {
    pub fn teams(&self) -> &Loadable<Vec<Team>> {
        &self.teams
    }

    pub fn reload(&mut self) -> ApiRequest {
        self.teams.start();
        ApiRequest::LoadTeams
    }

    /// Remember the users offered as leads and new members.
    pub fn set_users(&mut self, users: &[User]) {
        self.users = users
            .iter()
            .filter(|u| u.is_active)
            .map(|u| (u.id.clone(), u.display_name().to_string()))
            .collect();
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
            || self.confirm.is_some()
            || self.members.as_ref().is_some_and(|m| m.adding.is_some())
    }

    fn selected(&self) -> Option<&Team> {
        self.teams.get().and_then(|teams| self.selection.selected(teams))
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if let Some(confirm) = &self.confirm {
            return match confirm.handle_input(key)? {
                Confirmation::Yes => {
                    let request = match self.confirm.take()?.into_target() {
                        Removal::Team(id) => ApiRequest::DeleteTeam(id),
                        Removal::Member { team_id, user_id } => {
                            ApiRequest::RemoveTeamMember { team_id, user_id }
                        }
                    };
                    Some(request.into())
                }
                Confirmation::No => {
                    self.confirm = None;
                    None
                }
            };
        }

        if self.form.is_some() {
            return self.handle_form_input(key);
        }

        if self.members.is_some() {
            return self.handle_members_input(key);
        }

        if self.selection.handle_input(key, self.teams.len()) {
            return None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.form = Some(TeamForm::Create(team_form(
                    "New team".to_string(),
                    None,
                    &self.users,
                )));
                None
            }
            KeyCode::Char('e') => {
                let team = self.selected()?;
                let form = team_form(format!("Edit {}", team.name), Some(team), &self.users);
                let id = team.id.clone();
                self.form = Some(TeamForm::Edit { id, form });
                None
            }
            KeyCode::Char('d') => {
                let (id, name) = self.selected().map(|t| (t.id.clone(), t.name.clone()))?;
                self.confirm = Some(ConfirmDialog::new(
                    format!("Delete team \"{}\"?", name),
                    Removal::Team(id),
                ));
                None
            }
            KeyCode::Enter => {
                let (id, name) = self.selected().map(|t| (t.id.clone(), t.name.clone()))?;
                self.members = Some(MembersPanel {
                    team_id: id.clone(),
                    team_name: name,
                    members: Loadable::Loading,
                    selection: Selection::new(),
                    adding: None,
                });
                Some(ApiRequest::LoadTeamMembers(id).into())
            }
            KeyCode::Char('r') => Some(self.reload().into()),
            _ => None,
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.submitting {
            return None;
        }
        let form = match self.form.as_mut()? {
            TeamForm::Create(form) | TeamForm::Edit { form, .. } => form,
        };
        match form.handle_input(key) {
            FormEvent::Handled => None,
            FormEvent::Cancel => {
                self.form = None;
                None
            }
            FormEvent::Submit => {
                let input = match team_input(form) {
                    Ok(input) => input,
                    Err(message) => {
                        form.set_error(message);
                        return None;
                    }
                };
                let request = match self.form.as_ref()? {
                    TeamForm::Create(_) => ApiRequest::CreateTeam(input),
                    TeamForm::Edit { id, .. } => ApiRequest::UpdateTeam {
                        id: id.clone(),
                        input,
                    },
                };
                self.submitting = true;
                Some(request.into())
            }
        }
    }

    fn handle_members_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let panel = self.members.as_mut()?;

        if let Some(form) = &mut panel.adding {
            return match form.handle_input(key) {
                FormEvent::Handled => None,
                FormEvent::Cancel => {
                    panel.adding = None;
                    None
                }
                FormEvent::Submit => {
                    let Some(user_id) = form.choice(0).map(str::to_string) else {
                        form.set_error("No users to add");
                        return None;
                    };
                    panel.adding = None;
                    Some(
                        ApiRequest::AddTeamMember {
                            team_id: panel.team_id.clone(),
                            user_id,
                        }
                        .into(),
                    )
                }
            };
        }

        let len = panel.members.len();
        if panel.selection.handle_input(key, len) {
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.members = None;
                None
            }
            KeyCode::Char('a') => {
                let current: Vec<&str> = panel
                    .members
                    .get()
                    .map(|members| members.iter().map(|m| m.user.id.as_str()).collect())
                    .unwrap_or_default();
                let candidates: UserOptions = self
                    .users
                    .iter()
                    .filter(|(id, _)| !current.contains(&id.as_str()))
                    .cloned()
                    .collect();
                panel.adding = Some(Form::new(
                    format!("Add member to {}", panel.team_name),
                    vec![FormField::choice("User", Choice::new(candidates))],
                ));
                None
            }
            KeyCode::Char('x') => {
                let member = panel
                    .members
                    .get()
                    .and_then(|members| panel.selection.selected(members))?;
                let prompt = format!(
                    "Remove {} from {}?",
                    member.user.display_name(),
                    panel.team_name
                );
                let removal = Removal::Member {
                    team_id: panel.team_id.clone(),
                    user_id: member.user.id.clone(),
                };
                self.confirm = Some(ConfirmDialog::new(prompt, removal));
                None
            }
            _ => None,
        }
    }

    pub fn on_teams_loaded(&mut self, result: Result<Vec<Team>>) {
        self.teams
            .finish(result, |e| e.display_message("Failed to load teams"));
        self.selection.sync(self.teams.len());
    }

    /// Result of a create or edit submitted from the form.
    pub fn on_team_saved(&mut self, result: Result<Team>, created: bool) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(team) => {
                self.form = None;
                let title = if created { "Team created" } else { "Team updated" };
                vec![
                    Toast::success(title).with_description(team.name).into(),
                    self.reload().into(),
                ]
            }
            Err(e) if created => vec![failure("Failed to create team", &e, "Please try again.")],
            Err(e) => vec![failure("Failed to update team", &e, "Please try again.")],
        }
    }

    pub fn on_team_deleted(&mut self, result: Result<()>) -> Vec<ViewAction> {
        match result {
            Ok(()) => vec![Toast::success("Team deleted").into(), self.reload().into()],
            Err(e) => vec![failure("Failed to delete team", &e, "Please try again.")],
        }
    }

    pub fn on_members_loaded(&mut self, team_id: &str, result: Result<Vec<TeamMembership>>) {
        if let Some(panel) = self.members.as_mut().filter(|p| p.team_id == team_id) {
            panel
                .members
                .finish(result, |e| e.display_message("Failed to load members"));
            panel.selection.sync(panel.members.len());
        }
    }

    /// A member was added or removed; refresh the panel and the counts.
    pub fn on_membership_changed(
        &mut self,
        team_id: &str,
        result: Result<()>,
        added: bool,
    ) -> Vec<ViewAction> {
        match result {
            Ok(()) => {
                let title = if added { "Member added" } else { "Member removed" };
                let mut actions = vec![Toast::success(title).into(), self.reload().into()];
                if let Some(panel) = self.members.as_mut().filter(|p| p.team_id == team_id) {
                    panel.members.start();
                    actions.push(ApiRequest::LoadTeamMembers(team_id.to_string()).into());
                }
                actions
            }
            Err(e) if added => vec![failure("Failed to add member", &e, "Please try again.")],
            Err(e) => vec![failure("Failed to remove member", &e, "Please try again.")],
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let body = if self.members.is_some() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area)
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(area)
        };

        if let Some(teams) = render_state(frame, body[0], &self.teams, spinner, "No teams yet.") {
            let rows: Vec<Row> = teams
                .iter()
                .map(|t| {
                    Row::new(vec![
                        Cell::from(t.name.clone()),
                        Cell::from(t.lead_name.clone().unwrap_or_else(|| "-".to_string())),
                        Cell::from(t.members_count.to_string()),
                        Cell::from(t.description.clone().unwrap_or_default()).style(theme::muted()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Min(16),
                    Constraint::Length(18),
                    Constraint::Length(8),
                    Constraint::Min(20),
                ],
            )
            .header(
                Row::new(vec!["Team", "Lead", "Members", "Description"]).style(theme::heading()),
            )
            .highlight_style(theme::selected());
            frame.render_stateful_widget(table, body[0], self.selection.state_mut());
        }

        if let Some(panel) = &mut self.members {
            render_members(frame, body[1], panel, spinner);
        }

        let full = frame.area();
        if let Some(TeamForm::Create(form) | TeamForm::Edit { form, .. }) = &self.form {
            form.render(frame, centered_rect(60, form.height(), full), self.submitting);
        }
        if let Some(form) = self.members.as_ref().and_then(|p| p.adding.as_ref()) {
            form.render(frame, centered_rect(50, form.height(), full), false);
        }
        if let Some(confirm) = &self.confirm {
            confirm.render(frame, full);
        }
    }
}

fn render_members(frame: &mut Frame, area: Rect, panel: &mut MembersPanel, spinner: &Spinner) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::focused_border())
        .title(Span::styled(
            format!(" {} members ", panel.team_name),
            theme::heading(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(members) = render_state(frame, inner, &panel.members, spinner, "No members yet.")
    else {
        return;
    };
    let rows: Vec<Row> = members
        .iter()
        .map(|m| {
            let role = match m.role {
                TeamRole::Lead => "Lead",
                TeamRole::Member => "Member",
            };
            Row::new(vec![
                Cell::from(m.user.display_name().to_string()),
                Cell::from(role),
                Cell::from(m.joined_at.clone().unwrap_or_default()).style(theme::muted()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .highlight_style(theme::selected());
    frame.render_stateful_widget(table, inner, panel.selection.state_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{fixtures, Role};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tab() -> TeamsTab {
        let mut tab = TeamsTab::default();
        tab.set_users(&[fixtures::user("u1", Role::Member), fixtures::user("u2", Role::Manager)]);
        tab.on_teams_loaded(Ok(vec![fixtures::team("t1", "Core", 1)]));
        tab
    }

    fn membership(user_id: &str) -> TeamMembership {
        TeamMembership {
            id: format!("m-{}", user_id),
            user: fixtures::user(user_id, Role::Member),
            role: TeamRole::Member,
            joined_at: None,
            is_active: true,
        }
    }

    #[test]
    fn test_create_team_with_lead() {
        let mut tab = tab();
        tab.handle_input(key(KeyCode::Char('n')));
        if let Some(TeamForm::Create(form)) = &mut tab.form {
            form.set_text(NAME, "Platform");
        }
        tab.handle_input(key(KeyCode::Tab));
        tab.handle_input(key(KeyCode::Tab));
        tab.handle_input(key(KeyCode::Right));

        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::CreateTeam(input))) => {
                assert_eq!(input.name.as_deref(), Some("Platform"));
                assert_eq!(input.lead.as_deref(), Some("u1"));
                assert_eq!(input.description, None);
            }
            other => panic!("Expected create request, got {:?}", other),
        }
    }

    #[test]
    fn test_add_member_offers_non_members() {
        let mut tab = tab();
        tab.handle_input(key(KeyCode::Enter));
        tab.on_members_loaded("t1", Ok(vec![membership("u1")]));

        tab.handle_input(key(KeyCode::Char('a')));
        assert!(tab.captures_input());
        match tab.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::AddTeamMember { team_id, user_id })) => {
                assert_eq!(team_id, "t1");
                assert_eq!(user_id, "u2");
            }
            other => panic!("Expected add member request, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_member_confirms() {
        let mut tab = tab();
        tab.handle_input(key(KeyCode::Enter));
        tab.on_members_loaded("t1", Ok(vec![membership("u1")]));

        assert!(tab.handle_input(key(KeyCode::Char('x'))).is_none());
        match tab.handle_input(key(KeyCode::Char('y'))) {
            Some(ViewAction::Request(ApiRequest::RemoveTeamMember { team_id, user_id })) => {
                assert_eq!(team_id, "t1");
                assert_eq!(user_id, "u1");
            }
            other => panic!("Expected remove member request, got {:?}", other),
        }
    }

    #[test]
    fn test_membership_change_reloads_panel() {
        let mut tab = tab();
        tab.handle_input(key(KeyCode::Enter));
        let actions = tab.on_membership_changed("t1", Ok(()), true);
        assert!(actions.iter().any(|a| matches!(
            a,
            ViewAction::Request(ApiRequest::LoadTeamMembers(id)) if id == "t1"
        )));
        assert!(actions
            .iter()
            .any(|a| matches!(a, ViewAction::Request(ApiRequest::LoadTeams))));
    }
}
