//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. Views describe the requests
//! they need; the main loop spawns them and feeds each result back through
//! `App::handle_api_message`.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::api::types::AuthResponse;
use crate::api::Result;
use crate::error::AppError;
use crate::events::Event;
use crate::routes::{self, AuthState, Route};
use crate::session::Session;
use crate::tasks::{ApiMessage, ApiRequest};
use crate::ui::components::{ErrorDialog, Spinner, Toast, Toasts};
use crate::ui::theme;
use crate::ui::views::{
    AdminView, CalendarView, DashboardView, LoginView, RegisterView, ReportsView, SettingsView,
    TasksView, ViewAction,
};

/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 22;

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The session: API client, current user and company.
    session: Session,
    /// The route being shown.
    route: Route,
    /// A navigation waiting for the current user to be fetched.
    pending_route: Option<Route>,
    /// Whether the application should quit.
    should_quit: bool,
    /// The configuration profile in use.
    profile_name: String,
    login: LoginView,
    register: RegisterView,
    dashboard: DashboardView,
    tasks: TasksView,
    calendar: CalendarView,
    reports: ReportsView,
    settings: SettingsView,
    admin: AdminView,
    /// Transient notifications.
    toasts: Toasts,
    /// Error dialog for critical errors.
    error_dialog: ErrorDialog,
    /// Shared loading animation.
    spinner: Spinner,
    /// Requests waiting to be spawned by the main loop.
    requests: Vec<ApiRequest>,
}

impl App {
    /// Create the application around a session.
    ///
    /// With a stored token the current user is fetched first; otherwise
    /// the login screen is shown.
    pub fn new(session: Session, profile_name: impl Into<String>) -> Self {
        let mut app = Self {
            session,
            route: Route::Login,
            pending_route: None,
            should_quit: false,
            profile_name: profile_name.into(),
            login: LoginView::new(),
            register: RegisterView::new(),
            dashboard: DashboardView::new(),
            tasks: TasksView::new(),
            calendar: CalendarView::new(),
            reports: ReportsView::new(),
            settings: SettingsView::new(),
            admin: AdminView::new(),
            toasts: Toasts::new(),
            error_dialog: ErrorDialog::new(),
            spinner: Spinner::new(),
            requests: Vec::new(),
        };
        if app.session.is_resolving() {
            debug!("Stored token found, fetching current user");
            app.requests.push(ApiRequest::LoadCurrentUser);
        }
        app.navigate(Route::Dashboard);
        app
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn dashboard(&self) -> &DashboardView {
        &self.dashboard
    }

    pub fn login(&self) -> &LoginView {
        &self.login
    }

    /// Whether navigation is waiting for the current user.
    pub fn is_resolving(&self) -> bool {
        self.pending_route.is_some()
    }

    /// Show a critical error until the user dismisses it.
    pub fn show_error(&mut self, error: &AppError) {
        warn!(error = %error, "Showing error dialog");
        self.error_dialog.show(error);
    }

    /// Drain the requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.requests)
    }

    fn auth_state(&self) -> AuthState {
        if !self.session.is_authenticated() {
            AuthState::Anonymous
        } else if self.session.is_resolving() {
            AuthState::Resolving
        } else {
            AuthState::Authenticated {
                is_admin: self.session.is_admin(),
            }
        }
    }

    /// Navigate to `route`, following guard redirects.
    pub fn navigate(&mut self, route: Route) {
        let Some(target) = routes::resolve(route, self.auth_state()) else {
            debug!(route = %route, "Navigation deferred until user is known");
            self.pending_route = Some(route);
            return;
        };
        if target != route {
            debug!(from = %route, to = %target, "Navigation redirected");
        }
        self.pending_route = None;
        self.route = target;
        let requests = self.enter(target);
        self.requests.extend(requests);
    }

    /// Requests a route needs when it is shown.
    fn enter(&mut self, route: Route) -> Vec<ApiRequest> {
        match route {
            Route::Login | Route::Register => Vec::new(),
            Route::Dashboard => self.dashboard.on_enter(),
            Route::Tasks => self.tasks.on_enter(),
            Route::Calendar => self.calendar.on_enter(),
            Route::Reports => self.reports.on_enter(),
            Route::Settings => self
                .settings
                .on_enter(self.session.user(), self.session.company()),
            Route::Admin => self.admin.on_enter(),
        }
    }

    fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Request(request) => self.requests.push(request),
            ViewAction::Navigate(route) => self.navigate(route),
            ViewAction::Toast(toast) => self.toasts.push(toast),
        }
    }

    fn apply_all(&mut self, actions: Vec<ViewAction>) {
        for action in actions {
            self.apply(action);
        }
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.tick(),
        }
    }

    /// Advance animations and expire toasts.
    pub fn tick(&mut self) {
        self.spinner.tick();
        self.toasts.tick();
    }

    fn captures_input(&self) -> bool {
        match self.route {
            Route::Login | Route::Register => true,
            Route::Dashboard => self.dashboard.captures_input(),
            Route::Tasks => self.tasks.captures_input(),
            Route::Settings => self.settings.captures_input(),
            Route::Admin => self.admin.captures_input(),
            Route::Calendar | Route::Reports => false,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The error dialog blocks all other input
        if self.error_dialog.is_visible() {
            self.error_dialog.handle_input(key);
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        if self.is_resolving() {
            return;
        }

        let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if plain && !self.captures_input() {
            match key.code {
                KeyCode::Char('q') => {
                    info!("Quit requested");
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('L') => {
                    info!("Logging out");
                    self.requests.push(ApiRequest::Logout);
                    return;
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if let Some(route) = routes::sidebar(self.session.is_admin()).get(index) {
                        self.navigate(*route);
                    }
                    return;
                }
                _ => {}
            }
        }
        let action = match self.route {
            Route::Login => self.login.handle_input(key),
            Route::Register => self.register.handle_input(key),
            Route::Dashboard => self.dashboard.handle_input(key),
            Route::Tasks => self.tasks.handle_input(key),
            Route::Calendar => self.calendar.handle_input(key),
            Route::Reports => self.reports.handle_input(key),
            Route::Settings => self.settings.handle_input(key),
            Route::Admin => self.admin.handle_input(key),
        };
        if let Some(action) = action {
            self.apply(action);
        }
    }

    /// Feed the result of a finished request to the views that wait for it.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::LoggedIn(result) => self.on_authenticated(result, false),
            ApiMessage::Registered(result) => self.on_authenticated(result, true),
            ApiMessage::LoggedOut(result) => self.on_logged_out(result),
            ApiMessage::CurrentUserLoaded(result) => match result {
                Ok(user) => {
                    debug!(user = %user.username, "Current user loaded");
                    self.session.set_user(user);
                    let target = self.pending_route.take().unwrap_or(Route::Dashboard);
                    self.navigate(target);
                }
                Err(e) => {
                    warn!(error = %e, "Could not restore session");
                    if let Err(e) = self.session.client().tokens().clear() {
                        warn!(error = %e, "Failed to clear stored tokens");
                    }
                    self.session.sign_out();
                    self.pending_route = None;
                    self.show_error(&AppError::from(e));
                    self.navigate(Route::Login);
                }
            },
            ApiMessage::ProfileUpdated(result) => {
                let actions = self.settings.on_profile_updated(&result);
                if let Ok(user) = result {
                    self.session.set_user(user);
                }
                self.apply_all(actions);
            }
            ApiMessage::PasswordChanged(result) => {
                let actions = self.settings.on_password_changed(result);
                self.apply_all(actions);
            }

            ApiMessage::CompanyLoaded(result) => {
                if let Ok(company) = &result {
                    self.session.set_company(company.clone());
                }
                self.admin.company.on_company_loaded(result);
            }
            ApiMessage::CompanyUpdated(result) => {
                let actions = self.admin.company.on_company_updated(&result);
                if let Ok(company) = result {
                    self.session.set_company(company);
                }
                self.apply_all(actions);
            }

            ApiMessage::UsersLoaded(result) => {
                if let Ok(users) = &result {
                    self.admin.teams.set_users(users);
                }
                self.admin.users.on_users_loaded(result);
            }
            ApiMessage::UserCreated(result) => {
                let actions = self.admin.users.on_user_saved(result, true);
                self.apply_all(actions);
            }
            ApiMessage::UserUpdated(result) => {
                if let Ok(user) = &result {
                    if self.session.user().is_some_and(|me| me.id == user.id) {
                        self.session.set_user(user.clone());
                    }
                }
                let actions = self.admin.users.on_user_saved(result, false);
                self.apply_all(actions);
            }
            ApiMessage::UserStatusChanged { active, result } => {
                let actions = self.admin.users.on_user_status_changed(active, result);
                self.apply_all(actions);
            }
            ApiMessage::UserDeleted(result) => {
                let actions = self.admin.users.on_user_deleted(result);
                self.apply_all(actions);
            }

            ApiMessage::TeamsLoaded(result) => self.admin.teams.on_teams_loaded(result),
            ApiMessage::MyTeamsLoaded(result) => self.settings.on_my_teams_loaded(result),
            ApiMessage::TeamCreated(result) => {
                let actions = self.admin.teams.on_team_saved(result, true);
                self.apply_all(actions);
            }
            ApiMessage::TeamUpdated(result) => {
                let actions = self.admin.teams.on_team_saved(result, false);
                self.apply_all(actions);
            }
            ApiMessage::TeamDeleted(result) => {
                let actions = self.admin.teams.on_team_deleted(result);
                self.apply_all(actions);
            }
            ApiMessage::TeamMembersLoaded { team_id, result } => {
                self.admin.teams.on_members_loaded(&team_id, result);
            }
            ApiMessage::TeamMemberAdded { team_id, result } => {
                let actions = self
                    .admin
                    .teams
                    .on_membership_changed(&team_id, result.map(|_| ()), true);
                self.apply_all(actions);
            }
            ApiMessage::TeamMemberRemoved { team_id, result } => {
                let actions = self.admin.teams.on_membership_changed(&team_id, result, false);
                self.apply_all(actions);
            }

            ApiMessage::ProjectsLoaded { mine, result } => {
                // The task form offers every project, not just the user's
                if let (false, Ok(projects)) = (mine, &result) {
                    self.tasks.set_projects(projects);
                }
                self.dashboard.on_projects_loaded(mine, result);
            }
            ApiMessage::ProjectCreated(result) => {
                let actions = self.dashboard.on_project_created(result);
                self.apply_all(actions);
            }
            ApiMessage::ProjectDeleted(result) => {
                let actions = self.dashboard.on_project_deleted(result);
                self.apply_all(actions);
            }
            ApiMessage::ProjectTasksLoaded { project_id, result } => {
                self.dashboard.on_project_tasks_loaded(&project_id, result);
            }

            ApiMessage::TasksLoaded { mine, result } => self.tasks.on_tasks_loaded(mine, result),
            ApiMessage::TaskCreated(result) => {
                let actions = self.tasks.on_task_created(result);
                self.apply_all(actions);
            }
            ApiMessage::TaskUpdated(result) => {
                let actions = self.tasks.on_task_updated(result);
                self.apply_all(actions);
            }
            ApiMessage::TaskDeleted(result) => {
                let actions = self.tasks.on_task_deleted(result);
                self.apply_all(actions);
            }
            ApiMessage::CommentsLoaded { task_id, result } => {
                self.tasks.on_comments_loaded(&task_id, result);
            }
            ApiMessage::CommentAdded { task_id, result } => {
                let actions = self.tasks.on_comment_added(&task_id, result);
                self.apply_all(actions);
            }

            ApiMessage::WorkloadLoaded(result) => {
                let today = Local::now().date_naive();
                match &result {
                    Ok(workload) => {
                        self.calendar.on_workload_loaded(Ok(workload), today);
                        self.reports.on_workload_loaded(Ok(workload), today);
                    }
                    Err(e) => {
                        let message = e.display_message("Failed to load projects and tasks");
                        self.calendar.on_workload_loaded(Err(message.clone()), today);
                        self.reports.on_workload_loaded(Err(message), today);
                    }
                }
            }
        }
    }

    fn on_authenticated(&mut self, result: Result<AuthResponse>, registered: bool) {
        match result {
            Ok(response) => {
                let name = self.session.establish(response).display_name().to_string();
                self.login.reset();
                self.register.reset();
                let title = if registered {
                    "Registration complete"
                } else {
                    "Signed in"
                };
                self.toasts
                    .push(Toast::success(title).with_description(format!("Welcome, {}", name)));
                self.navigate(Route::Dashboard);
            }
            Err(e) => {
                let (title, fallback) = if registered {
                    ("Registration failed", "Could not register. Please try again.")
                } else {
                    ("Login failed", "Invalid username or password.")
                };
                let message = e.display_message(fallback);
                warn!(error = %e, "{}", title);
                if registered {
                    self.register.fail(message.clone());
                } else {
                    self.login.fail(message.clone());
                }
                self.toasts
                    .push(Toast::error(title).with_description(message));
            }
        }
    }

    fn on_logged_out(&mut self, result: Result<()>) {
        info!("Logged out");
        self.session.sign_out();
        self.dashboard = DashboardView::new();
        self.tasks = TasksView::new();
        self.calendar = CalendarView::new();
        self.reports = ReportsView::new();
        self.settings = SettingsView::new();
        self.admin = AdminView::new();
        self.login.reset();
        self.register.reset();
        self.pending_route = None;
        self.toasts.push(Toast::info("Signed out"));
        if let Err(e) = result {
            warn!(error = %e, "Stored tokens were not removed");
            self.show_error(&AppError::from(e));
        }
        self.navigate(Route::Login);
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.is_resolving() {
            self.spinner.render(frame, area, "Restoring session...");
        } else {
            match self.route {
                Route::Login => self.login.render(frame, area),
                Route::Register => self.register.render(frame, area),
                _ => self.render_shell(frame, area),
            }
        }

        // Toasts above the views, the error dialog above everything
        self.toasts.render(frame, area);
        self.error_dialog.render(frame, area);
    }

    /// Sidebar, header and the current protected view.
    fn render_shell(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[1]);

        self.render_sidebar(frame, columns[0]);
        self.render_header(frame, rows[0]);

        let content = rows[1];
        match self.route {
            Route::Dashboard => self.dashboard.render(frame, content, &self.spinner),
            Route::Tasks => self.tasks.render(frame, content, &self.spinner),
            Route::Calendar => self.calendar.render(frame, content, &self.spinner),
            Route::Reports => self.reports.render(frame, content, &self.spinner),
            Route::Settings => self.settings.render(frame, content, &self.spinner),
            Route::Admin => self.admin.render(frame, content, &self.spinner),
            Route::Login | Route::Register => {}
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::styled(" taskdeck", theme::heading()),
            Line::from(""),
        ];
        for (i, route) in routes::sidebar(self.session.is_admin()).iter().enumerate() {
            let style = if *route == self.route {
                theme::selected()
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), theme::muted()),
                Span::styled(route.title(), style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(" [L] sign out", theme::muted()));
        lines.push(Line::styled(" [q] quit", theme::muted()));

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(theme::border()),
            ),
            area,
        );
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());

        frame.render_widget(
            Paragraph::new(Line::styled(self.route.title(), theme::heading())).block(block.clone()),
            halves[0],
        );

        let mut who = Vec::new();
        if let Some(user) = self.session.user() {
            who.push(Span::raw(user.display_name().to_string()));
            who.push(Span::raw(" "));
            who.push(Span::styled(format!("({})", user.role.label()), theme::role(user.role)));
        }
        if let Some(company) = self.session.company() {
            who.push(Span::styled(format!(" @ {}", company.name), theme::muted()));
        }
        who.push(Span::styled(format!("  [{}] ", self.profile_name), theme::muted()));
        frame.render_widget(
            Paragraph::new(Line::from(who))
                .alignment(Alignment::Right)
                .block(block),
            halves[1],
        );
    }
}
