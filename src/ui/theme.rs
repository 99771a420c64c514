//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::api::types::{Priority, ProjectStatus, Role, TaskStatus};

/// Accent color for focus and selection.
pub const ACCENT: Color = Color::Cyan;

/// Color of secondary text and inactive borders.
pub const MUTED: Color = Color::DarkGray;

/// Style of the selected row in lists and tables.
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Style of a focused border.
pub fn focused_border() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Style of an unfocused border.
pub fn border() -> Style {
    Style::default().fg(MUTED)
}

/// Style of secondary text.
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Style of section titles.
pub fn heading() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn task_status(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Todo => Color::Gray,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Review => Color::Magenta,
        TaskStatus::Completed => Color::Green,
        TaskStatus::Cancelled => Color::DarkGray,
    };
    Style::default().fg(color)
}

pub fn project_status(status: ProjectStatus) -> Style {
    let color = match status {
        ProjectStatus::Planning => Color::Blue,
        ProjectStatus::Active => Color::Green,
        ProjectStatus::OnHold => Color::Yellow,
        ProjectStatus::Completed => Color::Cyan,
        ProjectStatus::Cancelled => Color::DarkGray,
    };
    Style::default().fg(color)
}

pub fn priority(priority: Priority) -> Style {
    match priority {
        Priority::Low => Style::default().fg(Color::Gray),
        Priority::Medium => Style::default().fg(Color::Blue),
        Priority::High => Style::default().fg(Color::Yellow),
        Priority::Urgent => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

pub fn role(role: Role) -> Style {
    let color = match role {
        Role::Admin => Color::Red,
        Role::Manager => Color::Yellow,
        Role::Member => Color::Blue,
        Role::Viewer => Color::Gray,
    };
    Style::default().fg(color)
}

/// A text progress bar of `width` cells.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
