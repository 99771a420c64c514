//! Task list with status filter tabs, task detail and comments.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use super::{failure, ViewAction};
use crate::api::types::{Priority, Project, Task, TaskComment, TaskInput, TaskStatus};
use crate::api::Result;
use crate::schedule::parse_date;
use crate::tasks::ApiRequest;
use crate::ui::components::{
    centered_rect, render_hints, render_state, Choice, ConfirmDialog, Confirmation, Form,
    FormEvent, FormField, Loadable, Selection, Spinner, TextInput, Toast,
};
use crate::ui::theme;

/// Which tasks the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// The filter tabs in display order.
    pub const TABS: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Only(TaskStatus::Todo),
        StatusFilter::Only(TaskStatus::InProgress),
        StatusFilter::Only(TaskStatus::Review),
        StatusFilter::Only(TaskStatus::Completed),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }

    fn index(&self) -> usize {
        Self::TABS.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::TABS[(self.index() + 1) % Self::TABS.len()]
    }
}

/// The status a task moves to when cycled.
fn next_status(status: TaskStatus) -> TaskStatus {
    match status {
        TaskStatus::Todo => TaskStatus::InProgress,
        TaskStatus::InProgress => TaskStatus::Review,
        TaskStatus::Review => TaskStatus::Completed,
        TaskStatus::Completed | TaskStatus::Cancelled => TaskStatus::Todo,
    }
}

const TITLE: usize = 0;
const PROJECT: usize = 1;
const DESCRIPTION: usize = 2;
const PRIORITY: usize = 3;
const DUE_DATE: usize = 4;

fn priority_value(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
        Priority::Urgent => "urgent",
    }
}

fn task_form(projects: &[(String, String)]) -> Form {
    let mut priorities = Choice::new(
        [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent]
            .iter()
            .map(|p| (priority_value(*p).to_string(), p.label().to_string()))
            .collect(),
    );
    priorities.select_value("medium");
    Form::new(
        "New task",
        vec![
            FormField::text("Title"),
            FormField::choice("Project", Choice::new(projects.to_vec())),
            FormField::text("Description"),
            FormField::choice("Priority", priorities),
            FormField::text("Due date (YYYY-MM-DD)"),
        ],
    )
}

fn task_input(form: &Form) -> std::result::Result<TaskInput, &'static str> {
    let title = form.optional(TITLE).ok_or("Title is required")?;
    let project = form.choice(PROJECT).ok_or("Create a project first")?;
    let due_date = match form.optional(DUE_DATE) {
        Some(date) if parse_date(&date).is_none() => return Err("Due date must be YYYY-MM-DD"),
        other => other,
    };
    let priority = match form.choice(PRIORITY) {
        Some("low") => Priority::Low,
        Some("high") => Priority::High,
        Some("urgent") => Priority::Urgent,
        _ => Priority::Medium,
    };
    Ok(TaskInput {
        title: Some(title),
        project: Some(project.to_string()),
        description: form.optional(DESCRIPTION),
        status: Some(TaskStatus::Todo),
        priority: Some(priority),
        due_date,
        ..Default::default()
    })
}

/// The open task with its comments.
#[derive(Debug)]
struct TaskDetail {
    task: Task,
    comments: Loadable<Vec<TaskComment>>,
    /// Present while a comment is being written.
    draft: Option<TextInput>,
    posting: bool,
}

/// The tasks view.
#[derive(Debug, Default)]
pub struct TasksView {
    tasks: Loadable<Vec<Task>>,
    mine: bool,
    filter: StatusFilter,
    selection: Selection,
    /// `(id, title)` of projects tasks can be created in.
    projects: Vec<(String, String)>,
    form: Option<Form>,
    submitting: bool,
    confirm: Option<ConfirmDialog<String>>,
    detail: Option<TaskDetail>,
}

impl TasksView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self) -> Vec<ApiRequest> {
        vec![self.reload(), ApiRequest::LoadProjects { mine: false }]
    }

    fn reload(&mut self) -> ApiRequest {
        self.tasks.start();
        ApiRequest::LoadTasks { mine: self.mine }
    }

    pub fn tasks(&self) -> &Loadable<Vec<Task>> {
        &self.tasks
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
            || self.confirm.is_some()
            || self.detail.as_ref().is_some_and(|d| d.draft.is_some())
    }

    /// Tasks passing the current filter.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .get()
            .map(|tasks| tasks.iter().filter(|t| self.filter.matches(t)).collect())
            .unwrap_or_default()
    }

    fn selected(&self) -> Option<Task> {
        let index = self.selection.index()?;
        self.visible().get(index).map(|t| (*t).clone())
    }

    /// Remember the projects offered by the create form.
    pub fn set_projects(&mut self, projects: &[Project]) {
        self.projects = projects
            .iter()
            .map(|p| (p.id.clone(), p.title.clone()))
            .collect();
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if let Some(confirm) = &self.confirm {
            return match confirm.handle_input(key)? {
                Confirmation::Yes => self
                    .confirm
                    .take()
                    .map(|c| ApiRequest::DeleteTask(c.into_target()).into()),
                Confirmation::No => {
                    self.confirm = None;
                    None
                }
            };
        }

        if self.form.is_some() {
            return self.handle_form_input(key);
        }

        if self.detail.is_some() {
            return self.handle_detail_input(key);
        }

        let len = self.visible().len();
        if self.selection.handle_input(key, len) {
            return None;
        }

        match key.code {
            KeyCode::Tab => {
                self.filter = self.filter.next();
                self.selection.reset(self.visible().len());
                None
            }
            KeyCode::Char('m') => {
                self.mine = !self.mine;
                self.tasks = Loadable::Loading;
                Some(ApiRequest::LoadTasks { mine: self.mine }.into())
            }
            KeyCode::Char('r') => Some(self.reload().into()),
            KeyCode::Char('n') => {
                self.form = Some(task_form(&self.projects));
                None
            }
            KeyCode::Char('s') => {
                let task = self.selected()?;
                let input = TaskInput {
                    status: Some(next_status(task.status)),
                    ..Default::default()
                };
                Some(ApiRequest::UpdateTask { id: task.id, input }.into())
            }
            KeyCode::Char('x') => {
                let task = self.selected()?;
                self.confirm = Some(ConfirmDialog::new(
                    format!("Delete task \"{}\"?", task.title),
                    task.id,
                ));
                None
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                let task = self.selected()?;
                let id = task.id.clone();
                self.detail = Some(TaskDetail {
                    task,
                    comments: Loadable::Loading,
                    draft: (key.code == KeyCode::Char('c')).then(TextInput::new),
                    posting: false,
                });
                Some(ApiRequest::LoadComments(id).into())
            }
            _ => None,
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.submitting {
            return None;
        }
        let form = self.form.as_mut()?;
        match form.handle_input(key) {
            FormEvent::Submit => match task_input(form) {
                Ok(input) => {
                    self.submitting = true;
                    Some(ApiRequest::CreateTask(input).into())
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
        }
    }

    fn handle_detail_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let detail = self.detail.as_mut()?;

        if let Some(draft) = &mut detail.draft {
            match key.code {
                KeyCode::Esc => detail.draft = None,
                KeyCode::Enter if !detail.posting => {
                    let content = draft.optional()?;
                    detail.posting = true;
                    return Some(
                        ApiRequest::AddComment {
                            task_id: detail.task.id.clone(),
                            content,
                        }
                        .into(),
                    );
                }
                _ => {
                    draft.handle_input(key);
                }
            }
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.detail = None,
            KeyCode::Char('c') => detail.draft = Some(TextInput::new()),
            KeyCode::Char('r') => {
                detail.comments.start();
                return Some(ApiRequest::LoadComments(detail.task.id.clone()).into());
            }
            _ => {}
        }
        None
    }

    pub fn on_tasks_loaded(&mut self, mine: bool, result: Result<Vec<Task>>) {
        if mine != self.mine {
            return;
        }
        self.tasks
            .finish(result, |e| e.display_message("Failed to load tasks"));
        if let (Some(detail), Some(tasks)) = (self.detail.as_mut(), self.tasks.get()) {
            if let Some(fresh) = tasks.iter().find(|t| t.id == detail.task.id) {
                detail.task = fresh.clone();
            }
        }
        self.selection.sync(self.visible().len());
    }

    pub fn on_task_created(&mut self, result: Result<Task>) -> Vec<ViewAction> {
        self.submitting = false;
        match result {
            Ok(task) => {
                self.form = None;
                vec![
                    Toast::success("Task created").with_description(task.title).into(),
                    self.reload().into(),
                ]
            }
            Err(e) => vec![failure("Failed to create task", &e, "Please try again.")],
        }
    }

    pub fn on_task_updated(&mut self, result: Result<Task>) -> Vec<ViewAction> {
        match result {
            Ok(task) => vec![
                Toast::success("Task updated")
                    .with_description(format!("{} is now {}", task.title, task.status))
                    .into(),
                self.reload().into(),
            ],
            Err(e) => vec![failure("Failed to update task", &e, "Please try again.")],
        }
    }

    pub fn on_task_deleted(&mut self, result: Result<()>) -> Vec<ViewAction> {
        match result {
            Ok(()) => {
                self.detail = None;
                vec![Toast::success("Task deleted").into(), self.reload().into()]
            }
            Err(e) => vec![failure("Failed to delete task", &e, "Please try again.")],
        }
    }

    pub fn on_comments_loaded(&mut self, task_id: &str, result: Result<Vec<TaskComment>>) {
        if let Some(detail) = self.detail.as_mut().filter(|d| d.task.id == task_id) {
            detail
                .comments
                .finish(result, |e| e.display_message("Failed to load comments"));
        }
    }

    pub fn on_comment_added(
        &mut self,
        task_id: &str,
        result: Result<TaskComment>,
    ) -> Vec<ViewAction> {
        let Some(detail) = self.detail.as_mut().filter(|d| d.task.id == task_id) else {
            return Vec::new();
        };
        detail.posting = false;
        match result {
            Ok(_) => {
                detail.draft = None;
                detail.comments.start();
                vec![
                    Toast::success("Comment added").into(),
                    ApiRequest::LoadComments(task_id.to_string()).into(),
                ]
            }
            Err(e) => vec![failure("Failed to add comment", &e, "Please try again.")],
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let counts: Vec<String> = StatusFilter::TABS
            .iter()
            .map(|f| {
                let count = self
                    .tasks
                    .get()
                    .map_or(0, |tasks| tasks.iter().filter(|t| f.matches(t)).count());
                format!("{} ({})", f.label(), count)
            })
            .collect();
        let scope = if self.mine { " My tasks " } else { " All tasks " };
        let tabs = Tabs::new(counts)
            .select(self.filter.index())
            .highlight_style(theme::selected())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border())
                    .title(Span::styled(scope, theme::heading())),
            );
        frame.render_widget(tabs, chunks[0]);

        let body = if self.detail.is_some() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1])
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(chunks[1])
        };

        self.render_list(frame, body[0], spinner);
        if let Some(detail) = &self.detail {
            render_detail(frame, body[1], detail, spinner);
        }

        let hints = match &self.detail {
            Some(d) if d.draft.is_some() => "[Enter] post comment  [Esc] cancel",
            Some(_) => "[c] comment  [r] refresh comments  [Esc] close",
            None => {
                "[Tab] filter  [j/k] move  [Enter] open  [s] next status  [n] new  [x] delete  [m] mine"
            }
        };
        render_hints(frame, chunks[2], hints);

        if let Some(form) = &self.form {
            form.render(frame, centered_rect(60, form.height(), area), self.submitting);
        }
        if let Some(confirm) = &self.confirm {
            confirm.render(frame, area);
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if render_state(frame, inner, &self.tasks, spinner, "No tasks yet. Press n to create one.")
            .is_none()
        {
            return;
        }

        let visible = self.visible();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(format!("No tasks with status {}.", self.filter.label()))
                    .style(theme::muted()),
                inner,
            );
            return;
        }

        let rows: Vec<Row> = visible
            .iter()
            .map(|t| {
                Row::new(vec![
                    Cell::from(t.title.clone()),
                    Cell::from(t.project_title.clone()),
                    Cell::from(t.status.label()).style(theme::task_status(t.status)),
                    Cell::from(t.priority.label()).style(theme::priority(t.priority)),
                    Cell::from(t.assignee_name().to_string()),
                    Cell::from(t.due_date.clone().unwrap_or_else(|| "-".to_string())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(16),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["Title", "Project", "Status", "Priority", "Assignee", "Due"])
                .style(theme::heading()),
        )
        .highlight_style(theme::selected());

        frame.render_stateful_widget(table, inner, self.selection.state_mut());
    }
}

fn render_detail(frame: &mut Frame, area: Rect, detail: &TaskDetail, spinner: &Spinner) {
    let task = &detail.task;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::focused_border())
        .title(Span::styled(format!(" {} ", task.title), theme::heading()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft_height = if detail.draft.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(draft_height),
        ])
        .split(inner);

    let info = vec![
        Line::from(vec![
            Span::styled("Status:   ", theme::muted()),
            Span::styled(task.status.label(), theme::task_status(task.status)),
            Span::styled("   Priority: ", theme::muted()),
            Span::styled(task.priority.label(), theme::priority(task.priority)),
        ]),
        Line::from(vec![
            Span::styled("Project:  ", theme::muted()),
            Span::raw(task.project_title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Assignee: ", theme::muted()),
            Span::raw(task.assignee_name().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Due:      ", theme::muted()),
            Span::raw(task.due_date.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(task.description.clone().unwrap_or_default()),
    ];
    frame.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), chunks[0]);

    let comments_block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::border())
        .title(" Comments ");
    let comments_area = comments_block.inner(chunks[1]);
    frame.render_widget(comments_block, chunks[1]);
    if let Some(comments) = render_state(
        frame,
        comments_area,
        &detail.comments,
        spinner,
        "No comments yet.",
    ) {
        let lines: Vec<Line> = comments
            .iter()
            .flat_map(|c| {
                [
                    Line::from(vec![
                        Span::styled(c.user_name.clone(), theme::heading()),
                        Span::styled(
                            format!("  {}", c.created_at.as_deref().unwrap_or("")),
                            theme::muted(),
                        ),
                    ]),
                    Line::from(c.content.clone()),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), comments_area);
    }

    if let Some(draft) = &detail.draft {
        let label = if detail.posting { "Posting..." } else { "New comment" };
        draft.render(frame, chunks[2], label, !detail.posting);
    }
}
