//! Reports: totals and per-project progress.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ViewAction;
use crate::reports::{Report, Workload};
use crate::tasks::ApiRequest;
use crate::ui::components::{render_hints, Loadable, Spinner};
use crate::ui::theme;

#[derive(Debug, Default)]
pub struct ReportsView {
    report: Loadable<Report>,
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self) -> Vec<ApiRequest> {
        self.report.start();
        vec![ApiRequest::LoadWorkload]
    }

    pub fn report(&self) -> &Loadable<Report> {
        &self.report
    }

    pub fn on_workload_loaded(&mut self, result: Result<&Workload, String>, today: NaiveDate) {
        self.report = match result {
            Ok(workload) => Loadable::Loaded(Report::compute(workload, today)),
            Err(message) => Loadable::Failed(message),
        };
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ViewAction> {
        match key.code {
            KeyCode::Char('r') => {
                self.report.start();
                Some(ApiRequest::LoadWorkload.into())
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        render_hints(frame, chunks[2], "[r] refresh");

        let report = match &self.report {
            Loadable::Loaded(report) => report,
            Loadable::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
                    chunks[0],
                );
                return;
            }
            Loadable::Loading | Loadable::NotLoaded => {
                spinner.render(frame, chunks[0], "Computing reports...");
                return;
            }
        };

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        let totals = vec![
            stat("Projects", report.total_projects.to_string()),
            stat(
                "  active / completed",
                format!("{} / {}", report.active_projects, report.completed_projects),
            ),
            stat("Tasks", report.total_tasks.to_string()),
            stat(
                "  completed",
                format!("{} ({:.0}%)", report.completed_tasks, report.success_rate()),
            ),
            stat("  overdue", report.overdue_tasks.to_string()),
            stat("Team members", report.team_members.to_string()),
        ];
        frame.render_widget(
            Paragraph::new(totals).block(section(" Overview ")),
            top[0],
        );

        let by_status: Vec<Line> = report
            .tasks_by_status
            .iter()
            .map(|(status, count)| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", status.label()), theme::task_status(*status)),
                    Span::raw(count.to_string()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(by_status).block(section(" Tasks by status ")),
            top[1],
        );

        let mut progress = vec![Line::from(vec![
            Span::styled("Average completion  ", theme::muted()),
            Span::raw(format!(
                "{} {:.0}%",
                theme::progress_bar(report.average_completion, 20),
                report.average_completion
            )),
        ])];
        progress.push(Line::from(""));
        if report.projects.is_empty() {
            progress.push(Line::styled("No projects yet.", theme::muted()));
        }
        for project in &report.projects {
            progress.push(Line::from(vec![
                Span::raw(format!("{:<28.28}", project.title)),
                Span::styled(
                    format!("{:<11}", project.status.label()),
                    theme::project_status(project.status),
                ),
                Span::raw(format!(
                    "{} {:>3.0}%  ",
                    theme::progress_bar(project.completion_percentage, 20),
                    project.completion_percentage
                )),
                Span::styled(
                    format!("{}/{} tasks", project.completed_tasks, project.task_count),
                    theme::muted(),
                ),
            ]));
        }
        frame.render_widget(
            Paragraph::new(progress).block(section(" Project progress ")),
            chunks[1],
        );
    }
}

fn section(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border())
        .title(Span::styled(title, theme::heading()))
}

fn stat(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), theme::muted()),
        Span::raw(value),
    ])
}
