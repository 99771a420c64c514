//! Due-date agenda for the calendar view.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::api::types::{Priority, Project, Task};

/// Parse a backend date: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// What an agenda entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Project,
    Task,
}

/// One dated item.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub kind: EntryKind,
    pub id: String,
    pub title: String,
    /// Owning project title for tasks, status label for projects.
    pub context: String,
    pub priority: Priority,
    pub closed: bool,
}

/// All items due on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

/// Group projects and tasks by due date, earliest first.
///
/// Items without a parseable due date are left out. Within a day, projects
/// come before tasks and each keeps its fetched order.
pub fn build_agenda(projects: &[Project], tasks: &[Task]) -> Vec<AgendaDay> {
    let mut days: BTreeMap<NaiveDate, Vec<AgendaEntry>> = BTreeMap::new();

    for project in projects {
        if let Some(date) = project.due_date.as_deref().and_then(parse_date) {
            days.entry(date).or_default().push(AgendaEntry {
                kind: EntryKind::Project,
                id: project.id.clone(),
                title: project.title.clone(),
                context: project.status.label().to_string(),
                priority: project.priority,
                closed: false,
            });
        }
    }

    for task in tasks {
        if let Some(date) = task.due_date.as_deref().and_then(parse_date) {
            days.entry(date).or_default().push(AgendaEntry {
                kind: EntryKind::Task,
                id: task.id.clone(),
                title: task.title.clone(),
                context: task.project_title.clone(),
                priority: task.priority,
                closed: task.status.is_closed(),
            });
        }
    }

    days.into_iter()
        .map(|(date, entries)| AgendaDay { date, entries })
        .collect()
}

/// Index of the first day on or after `today`, if any.
pub fn first_upcoming(agenda: &[AgendaDay], today: NaiveDate) -> Option<usize> {
    agenda.iter().position(|day| day.date >= today)
}
