//! Calendar: projects and tasks grouped by due date.

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::ViewAction;
use crate::reports::Workload;
use crate::schedule::{build_agenda, first_upcoming, AgendaDay, EntryKind};
use crate::tasks::ApiRequest;
use crate::ui::components::{render_hints, render_state, Loadable, Spinner};
use crate::ui::theme;

/// The calendar view.
#[derive(Debug, Default)]
pub struct CalendarView {
    agenda: Loadable<Vec<AgendaDay>>,
    /// Index of the day scrolled to the top.
    offset: usize,
}

impl CalendarView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self) -> Vec<ApiRequest> {
        self.agenda.start();
        vec![ApiRequest::LoadWorkload]
    }

    pub fn agenda(&self) -> &Loadable<Vec<AgendaDay>> {
        &self.agenda
    }

    /// Build the agenda and scroll to the first day on or after `today`.
    pub fn on_workload_loaded(&mut self, result: Result<&Workload, String>, today: NaiveDate) {
        match result {
            Ok(workload) => {
                let agenda = build_agenda(&workload.projects, &workload.tasks);
                self.offset = first_upcoming(&agenda, today).unwrap_or(0);
                self.agenda = Loadable::Loaded(agenda);
            }
            Err(message) => self.agenda = Loadable::Failed(message),
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let len = self.agenda.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.offset = (self.offset + 1).min(len.saturating_sub(1));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.offset = self.offset.saturating_sub(1);
                None
            }
            KeyCode::Char('t') => {
                let today = Local::now().date_naive();
                self.offset = self
                    .agenda
                    .get()
                    .and_then(|agenda| first_upcoming(agenda, today))
                    .unwrap_or(0);
                None
            }
            KeyCode::Char('r') => {
                self.agenda.start();
                Some(ApiRequest::LoadWorkload.into())
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(Span::styled(" Due dates ", theme::heading()));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        render_hints(frame, chunks[1], "[j/k] scroll  [t] today  [r] refresh");

        let Some(agenda) = render_state(
            frame,
            inner,
            &self.agenda,
            spinner,
            "Nothing is due. Projects and tasks with due dates show up here.",
        ) else {
            return;
        };

        let today = Local::now().date_naive();
        let items: Vec<ListItem> = agenda
            .iter()
            .skip(self.offset)
            .map(|day| day_item(day, today))
            .collect();
        let mut state = ListState::default();
        frame.render_stateful_widget(List::new(items), inner, &mut state);
    }
}

fn day_item(day: &AgendaDay, today: NaiveDate) -> ListItem<'static> {
    let heading_style = if day.date < today {
        theme::muted()
    } else if day.date == today {
        theme::heading().add_modifier(Modifier::UNDERLINED)
    } else {
        theme::heading()
    };

    let mut lines = vec![Line::styled(
        day.date.format("%a %d %b %Y").to_string(),
        heading_style,
    )];
    for entry in &day.entries {
        let marker = match entry.kind {
            EntryKind::Project => "▣ ",
            EntryKind::Task if entry.closed => "✓ ",
            EntryKind::Task => "□ ",
        };
        let title_style = if entry.closed {
            theme::muted().add_modifier(Modifier::CROSSED_OUT)
        } else {
            ratatui::style::Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::raw(marker),
            Span::styled(entry.title.clone(), title_style),
            Span::styled(format!("  {}", entry.context), theme::muted()),
            Span::styled(format!("  {}", entry.priority), theme::priority(entry.priority)),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}
