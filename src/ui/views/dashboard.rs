//! Dashboard: the project list.
//!
//! Lists all projects (or only the user's own), creates and deletes
//! projects, and shows the tasks of the selected project.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{failure, ViewAction};
use crate::api::types::{Priority, Project, ProjectInput, ProjectStatus, Task};
use crate::api::Result;
use crate::schedule::parse_date;
use crate::tasks::ApiRequest;
use crate::ui::components::{
    centered_rect, render_hints, render_state, ConfirmDialog, Confirmation, Form, FormEvent,
    FormField, Loadable, Selection, Spinner, Toast,
};
use crate::ui::theme;

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const DUE_DATE: usize = 2;

fn project_form() -> Form {
    Form::new(
        "New project",
        vec![
            FormField::text("Title"),
            FormField::text("Description"),
            FormField::text("Due date (YYYY-MM-DD)"),
        ],
    )
}

/// Build the create payload from the form, or the error to show.
///
/// New projects start active with medium priority.
fn project_input(form: &Form) -> std::result::Result<ProjectInput, &'static str> {
    let title = form.optional(TITLE).ok_or("Title is required")?;
    let due_date = match form.optional(DUE_DATE) {
        Some(date) if parse_date(&date).is_none() => return Err("Due date must be YYYY-MM-DD"),
        other => other,
    };
    Ok(ProjectInput {
        title: Some(title),
        description: form.optional(DESCRIPTION),
        status: Some(ProjectStatus::Active),
        priority: Some(Priority::Medium),
        due_date,
        ..Default::default()
    })
}

/// Tasks of one project, shown beside the list.
#[derive(Debug)]
struct ProjectTasks {
    project_id: String,
    title: String,
    tasks: Loadable<Vec<Task>>,
}

/// The dashboard view.
#[derive(Debug, Default)]
pub struct DashboardView {
    projects: Loadable<Vec<Project>>,
    mine: bool,
    selection: Selection,
    form: Option<Form>,
    submitting: bool,
    confirm: Option<ConfirmDialog<String>>,
    detail: Option<ProjectTasks>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests to issue when the view is shown.
    pub fn on_enter(&mut self) -> Vec<ApiRequest> {
        vec![self.reload()]
    }

    fn reload(&mut self) -> ApiRequest {
        self.projects.start();
        ApiRequest::LoadProjects { mine: self.mine }
    }

    pub fn projects(&self) -> &Loadable<Vec<Project>> {
        &self.projects
    }

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    /// Whether key presses belong to a text field or dialog.
    pub fn captures_input(&self) -> bool {
        self.form.is_some() || self.confirm.is_some()
    }

    fn selected(&self) -> Option<&Project> {
        self.projects
            .get()
            .and_then(|projects| self.selection.selected(projects))
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if let Some(confirm) = &self.confirm {
            return match confirm.handle_input(key)? {
                Confirmation::Yes => self
                    .confirm
                    .take()
                    .map(|c| ApiRequest::DeleteProject(c.into_target()).into()),
                Confirmation::No => {
                    self.confirm = None;
                    None
                }
            };
        }

        if let Some(form) = &mut self.form {
            if self.submitting {
                return None;
            }
            return match form.handle_input(key) {
                FormEvent::Submit => match project_input(form) {
                    Ok(input) => {
                        self.submitting = true;
                        Some(ApiRequest::CreateProject(input).into())
                    }
                    Err(message) => {
                        form.set_error(message);
                        None
                    }
                },
                FormEvent::Cancel => {
                    self.form = None;
                    None
                }
                FormEvent::Handled => None,
            };
        }

        if self.selection.handle_input(key, self.projects.len()) {
            return None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.form = Some(project_form());
                None
            }
            KeyCode::Char('m') => {
                self.mine = !self.mine;
                self.projects = Loadable::Loading;
                self.detail = None;
                Some(ApiRequest::LoadProjects { mine: self.mine }.into())
            }
            KeyCode::Char('r') => Some(self.reload().into()),
            KeyCode::Char('d') => {
                let (id, title) = self.selected().map(|p| (p.id.clone(), p.title.clone()))?;
                let prompt = format!("Delete project \"{}\"?", title);
                self.confirm = Some(ConfirmDialog::new(prompt, id));
                None
            }
            KeyCode::Enter => {
                let (id, title) = self.selected().map(|p| (p.id.clone(), p.title.clone()))?;
                self.detail = Some(ProjectTasks {
                    project_id: id.clone(),
                    title,
                    tasks: Loadable::Loading,
                });
                Some(ApiRequest::LoadProjectTasks(id).into())
            }
            KeyCode::Esc if self.detail.is_some() => {
                self.detail = None;
                None
            }
            _ => None,
        }
    }

    /// A project list arrived. Lists for the other scope are stale and
    /// dropped.
    pub fn on_projects_loaded(&mut self, mine: bool, result: Result<Vec<Project>>) {
        if mine != self.mine {
            return;
        }
        self.projects
            .finish(result, |e| e.display_message("Failed to load projects"));
        self.selection.sync(self.projects.len());
    }

    pub fn on_project_created(&mut self, result: Result<Project>) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(project) => {
                let toast =
                    Toast::success("Project created").with_description(project.title.clone());
                // The create reply carries no id; refetch so the row can be acted on.
                let needs_refresh = project.id.is_empty();
                match self.projects.get_mut() {
                    Some(projects) => projects.insert(0, project),
                    None => self.projects = Loadable::Loaded(vec![project]),
                }
                self.selection.reset(self.projects.len());
                self.form = None;
                let mut actions = vec![toast.into()];
                if needs_refresh {
                    actions.push(self.reload().into());
                }
                actions
            }
            Err(e) => vec![failure("Failed to create project", &e, "Please try again.")],
        }
    }

    pub fn on_project_deleted(&mut self, result: Result<()>) -> Vec<ViewAction> {
        match result {
            Ok(()) => {
                self.detail = None;
                vec![
                    Toast::success("Project deleted").into(),
                    self.reload().into(),
                ]
            }
            Err(e) => vec![failure("Failed to delete project", &e, "Please try again.")],
        }
    }

    pub fn on_project_tasks_loaded(&mut self, project_id: &str, result: Result<Vec<Task>>) {
        if let Some(detail) = self
            .detail
            .as_mut()
            .filter(|d| d.project_id == project_id)
        {
            detail
                .tasks
                .finish(result, |e| e.display_message("Failed to load tasks"));
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let body = if self.detail.is_some() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[0])
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(chunks[0])
        };

        self.render_projects(frame, body[0], spinner);
        if let Some(detail) = &self.detail {
            render_project_tasks(frame, body[1], detail, spinner);
        }

        render_hints(
            frame,
            chunks[1],
            "[j/k] move  [Enter] tasks  [n] new  [d] delete  [m] mine/all  [r] refresh",
        );

        if let Some(form) = &self.form {
            form.render(frame, centered_rect(60, form.height(), area), self.submitting);
        }
        if let Some(confirm) = &self.confirm {
            confirm.render(frame, area);
        }
    }

    fn render_projects(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let title = if self.mine { " My projects " } else { " All projects " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(Span::styled(title, theme::heading()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(projects) = render_state(
            frame,
            inner,
            &self.projects,
            spinner,
            "No projects yet. Press n to create one.",
        ) else {
            return;
        };

        let rows: Vec<Row> = projects
            .iter()
            .map(|p| {
                Row::new(vec![
                    Cell::from(p.title.clone()),
                    Cell::from(p.status.label()).style(theme::project_status(p.status)),
                    Cell::from(p.priority.label()).style(theme::priority(p.priority)),
                    Cell::from(p.due_date.clone().unwrap_or_else(|| "-".to_string())),
                    Cell::from(format!(
                        "{} {:>3.0}%",
                        theme::progress_bar(p.completion_percentage, 10),
                        p.completion_percentage
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(11),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(16),
            ],
        )
        .header(
            Row::new(vec!["Title", "Status", "Priority", "Due", "Progress"])
                .style(theme::heading()),
        )
        .highlight_style(theme::selected());

        frame.render_stateful_widget(table, inner, self.selection.state_mut());
    }
}

fn render_project_tasks(frame: &mut Frame, area: Rect, detail: &ProjectTasks, spinner: &Spinner) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::focused_border())
        .title(format!(" {} ", detail.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let empty = "No tasks in this project.";
    let Some(tasks) = render_state(frame, inner, &detail.tasks, spinner, empty) else {
        return;
    };

    let lines: Vec<Line> = tasks
        .iter()
        .map(|t| {
            Line::from(vec![
                Span::styled(format!("{:<12}", t.status.label()), theme::task_status(t.status)),
                Span::raw(t.title.clone()),
                Span::styled(format!("  {}", t.assignee_name()), theme::muted()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures;
    use crate::api::ApiError;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded(view: &mut DashboardView, projects: Vec<Project>) {
        view.on_projects_loaded(false, Ok(projects));
    }

    fn open_form_with(view: &mut DashboardView, title: &str, description: &str, due: &str) {
        view.handle_input(key(KeyCode::Char('n')));
        let form = view.form.as_mut().unwrap();
        form.set_text(TITLE, title);
        form.set_text(DESCRIPTION, description);
        form.set_text(DUE_DATE, due);
    }

    #[test]
    fn test_create_project_defaults() {
        let mut view = DashboardView::new();
        open_form_with(&mut view, "Launch", "", "2024-08-15");

        match view.handle_input(key(KeyCode::Enter)) {
            Some(ViewAction::Request(ApiRequest::CreateProject(input))) => {
                assert_eq!(input.title.as_deref(), Some("Launch"));
                assert_eq!(input.description, None);
                assert_eq!(input.due_date.as_deref(), Some("2024-08-15"));
                assert_eq!(input.status, Some(ProjectStatus::Active));
                assert_eq!(input.priority, Some(Priority::Medium));
            }
            other => panic!("Expected create request, got {:?}", other),
        }
        assert!(view.submitting);
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_create_project_requires_title() {
        let mut view = DashboardView::new();
        open_form_with(&mut view, "  ", "", "");
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
        assert_eq!(view.form.as_ref().unwrap().error(), Some("Title is required"));
    }

    #[test]
    fn test_create_project_rejects_bad_date() {
        let mut view = DashboardView::new();
        open_form_with(&mut view, "Launch", "", "next week");
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
        assert_eq!(
            view.form.as_ref().unwrap().error(),
            Some("Due date must be YYYY-MM-DD")
        );
    }

    #[test]
    fn test_created_project_is_prepended() {
        let mut view = DashboardView::new();
        loaded(&mut view, vec![fixtures::project("p1", "Website")]);
        view.form = Some(project_form());
        view.submitting = true;

        let actions = view.on_project_created(Ok(fixtures::project("p2", "Launch")));

        let titles: Vec<&str> = view
            .projects()
            .get()
            .unwrap()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Launch", "Website"]);
        assert!(!view.is_form_open());
        assert!(!view.submitting);
        assert!(matches!(
            actions.as_slice(),
            [ViewAction::Toast(toast)] if toast.title == "Project created"
        ));
    }

    #[test]
    fn test_created_project_without_id_is_shown_then_refetched() {
        let mut view = DashboardView::new();
        loaded(&mut view, vec![fixtures::project("p1", "Website")]);
        view.form = Some(project_form());
        view.submitting = true;

        let actions = view.on_project_created(Ok(fixtures::project("", "Launch")));

        let projects = view.projects().get().unwrap();
        assert_eq!(projects[0].title, "Launch");
        assert_eq!(projects.len(), 2);
        assert!(!view.is_form_open());
        assert!(matches!(
            actions.as_slice(),
            [
                ViewAction::Toast(_),
                ViewAction::Request(ApiRequest::LoadProjects { mine: false })
            ]
        ));
    }

    #[test]
    fn test_create_failure_keeps_form() {
        let mut view = DashboardView::new();
        view.form = Some(project_form());
        view.submitting = true;
        let actions = view.on_project_created(Err(ApiError::InvalidResponse("x".to_string())));
        assert!(view.is_form_open());
        assert!(!view.submitting);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_mine_toggle_reloads_and_drops_stale() {
        let mut view = DashboardView::new();
        let action = view.handle_input(key(KeyCode::Char('m')));
        assert!(matches!(
            action,
            Some(ViewAction::Request(ApiRequest::LoadProjects { mine: true }))
        ));

        view.on_projects_loaded(false, Ok(vec![fixtures::project("p1", "Old")]));
        assert!(view.projects().is_loading());

        view.on_projects_loaded(true, Ok(vec![fixtures::project("p2", "Mine")]));
        assert_eq!(view.projects().len(), 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut view = DashboardView::new();
        loaded(&mut view, vec![fixtures::project("p1", "Website")]);

        assert!(view.handle_input(key(KeyCode::Char('d'))).is_none());
        assert!(view.captures_input());
        let action = view.handle_input(key(KeyCode::Char('y')));
        assert!(matches!(
            action,
            Some(ViewAction::Request(ApiRequest::DeleteProject(ref id))) if id == "p1"
        ));
        assert!(!view.captures_input());
    }

    #[test]
    fn test_deleted_project_triggers_reload() {
        let mut view = DashboardView::new();
        let actions = view.on_project_deleted(Ok(()));
        assert!(actions.iter().any(|a| matches!(
            a,
            ViewAction::Request(ApiRequest::LoadProjects { mine: false })
        )));
    }

    #[test]
    fn test_enter_loads_project_tasks() {
        let mut view = DashboardView::new();
        loaded(&mut view, vec![fixtures::project("p1", "Website")]);
        let action = view.handle_input(key(KeyCode::Enter));
        assert!(matches!(
            action,
            Some(ViewAction::Request(ApiRequest::LoadProjectTasks(ref id))) if id == "p1"
        ));

        view.on_project_tasks_loaded("p1", Ok(vec![]));
        let detail = view.detail.as_ref().unwrap();
        assert_eq!(detail.tasks, Loadable::Loaded(vec![]));
    }
}
