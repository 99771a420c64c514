//! Summary figures for the reports view.
//!
//! Everything here is computed client-side from freshly fetched lists;
//! nothing is cached between visits.

use chrono::NaiveDate;

use crate::api::types::{Project, ProjectStatus, Task, TaskStatus, Team};
use crate::schedule::parse_date;

/// The records a report is computed from.
#[derive(Debug, Clone, Default)]
pub struct Workload {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub teams: Vec<Team>,
}

/// Progress of one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress {
    pub title: String,
    pub status: ProjectStatus,
    pub completed_tasks: u32,
    pub task_count: u32,
    pub completion_percentage: f64,
}

/// Aggregate figures over a workload.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Tasks past their due date that are neither completed nor cancelled.
    pub overdue_tasks: usize,
    /// Sum of member counts over all teams.
    pub team_members: u32,
    /// Mean of the projects' completion percentages.
    pub average_completion: f64,
    /// Task counts in workflow order.
    pub tasks_by_status: Vec<(TaskStatus, usize)>,
    /// Per-project progress, most complete first.
    pub projects: Vec<ProjectProgress>,
}

impl Report {
    /// Compute a report as of `today`.
    pub fn compute(workload: &Workload, today: NaiveDate) -> Self {
        let projects = &workload.projects;
        let tasks = &workload.tasks;

        let count_projects =
            |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

        let tasks_by_status = TaskStatus::ALL
            .iter()
            .map(|status| (*status, tasks.iter().filter(|t| t.status == *status).count()))
            .collect();

        let overdue_tasks = tasks
            .iter()
            .filter(|t| !t.status.is_closed())
            .filter_map(|t| t.due_date.as_deref().and_then(parse_date))
            .filter(|due| *due < today)
            .count();

        let average_completion = if projects.is_empty() {
            0.0
        } else {
            projects.iter().map(|p| p.completion_percentage).sum::<f64>() / projects.len() as f64
        };

        let mut progress: Vec<ProjectProgress> = projects
            .iter()
            .map(|p| ProjectProgress {
                title: p.title.clone(),
                status: p.status,
                completed_tasks: p.completed_tasks,
                task_count: p.task_count,
                completion_percentage: p.completion_percentage,
            })
            .collect();
        progress.sort_by(|a, b| b.completion_percentage.total_cmp(&a.completion_percentage));

        Self {
            total_projects: projects.len(),
            active_projects: count_projects(ProjectStatus::Active),
            completed_projects: count_projects(ProjectStatus::Completed),
            total_tasks: tasks.len(),
            completed_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            overdue_tasks,
            team_members: workload.teams.iter().map(|t| t.members_count).sum(),
            average_completion,
            tasks_by_status,
            projects: progress,
        }
    }

    /// Percentage of tasks completed, 0 when there are no tasks.
    pub fn success_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f64 * 100.0 / self.total_tasks as f64
        }
    }
}
