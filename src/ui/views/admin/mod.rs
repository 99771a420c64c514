//! Company administration: company details, users and teams.

mod company;
mod teams;
mod users;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub use company::CompanyTab;
pub use teams::TeamsTab;
pub use users::UsersTab;

use super::ViewAction;
use crate::tasks::ApiRequest;
use crate::ui::components::{render_hints, Spinner};
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Company,
    Users,
    Teams,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Company, AdminTab::Users, AdminTab::Teams];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Company => "Company",
            AdminTab::Users => "Users",
            AdminTab::Teams => "Teams",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> AdminTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn hints(&self) -> &'static str {
        match self {
            AdminTab::Company => "[Tab] switch  [e] edit  [r] refresh",
            AdminTab::Users => {
                "[Tab] switch  [n] new  [e] edit  [a] activate/deactivate  [d] delete  [r] refresh"
            }
            AdminTab::Teams => {
                "[Tab] switch  [n] new  [e] edit  [d] delete  [Enter] members  [a] add  [x] remove"
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminView {
    tab: AdminTab,
    pub company: CompanyTab,
    pub users: UsersTab,
    pub teams: TeamsTab,
}

impl AdminView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn on_enter(&mut self) -> Vec<ApiRequest> {
        vec![
            self.company.reload(),
            self.users.reload(),
            self.teams.reload(),
        ]
    }

    pub fn captures_input(&self) -> bool {
        match self.tab {
            AdminTab::Company => self.company.captures_input(),
            AdminTab::Users => self.users.captures_input(),
            AdminTab::Teams => self.teams.captures_input(),
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if key.code == KeyCode::Tab && !self.captures_input() {
            self.tab = self.tab.next();
            return None;
        }
        match self.tab {
            AdminTab::Company => self.company.handle_input(key),
            AdminTab::Users => self.users.handle_input(key),
            AdminTab::Teams => self.teams.handle_input(key),
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

        let titles: Vec<Line> = AdminTab::ALL.iter().map(|t| Line::from(t.label())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border()),
            )
            .highlight_style(theme::selected());
        frame.render_widget(tabs, chunks[0]);

        match self.tab {
            AdminTab::Company => self.company.render(frame, chunks[1], spinner),
            AdminTab::Users => self.users.render(frame, chunks[1], spinner),
            AdminTab::Teams => self.teams.render(frame, chunks[1], spinner),
        }
        render_hints(frame, chunks[2], self.tab.hints());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_loads_every_tab() {
        let mut view = AdminView::new();
        let requests = view.on_enter();
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::LoadCompany, ApiRequest::LoadUsers, ApiRequest::LoadTeams]
        ));
    }

    #[test]
    fn test_tab_cycles() {
        let mut view = AdminView::new();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        view.handle_input(tab);
        assert_eq!(view.tab(), AdminTab::Users);
        view.handle_input(tab);
        view.handle_input(tab);
        assert_eq!(view.tab(), AdminTab::Company);
    }
}
