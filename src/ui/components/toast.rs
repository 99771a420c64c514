//! Transient toast notifications.
//!
//! Toasts stack in the bottom-right corner and expire on their own. Each
//! carries a title and an optional description, like "Project created" /
//! "Launch".

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The kind of toast, which determines its color and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ",
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::Blue,
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        }
    }

    /// Errors stay up longer than confirmations.
    fn duration(&self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_secs(5),
            ToastKind::Info | ToastKind::Success => Duration::from_secs(3),
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl PartialEq for Toast {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.kind == other.kind
    }
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            created_at: Instant::now(),
            duration: kind.duration(),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    /// Attach a description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// The text shown in the toast body.
    fn text(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {}", self.title, description),
            None => self.title.clone(),
        }
    }
}

/// The visible toast stack.
#[derive(Debug)]
pub struct Toasts {
    toasts: VecDeque<Toast>,
    max_visible: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            max_visible: 3,
        }
    }

    /// Add a toast, dropping the oldest past the visible limit.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    /// Remove expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// The most recent toast.
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Render the stack in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        // Borders plus the icon prefix.
        let inner_width = width.saturating_sub(4) as usize;

        let heights: Vec<u16> = self
            .toasts
            .iter()
            .map(|t| {
                let len = t.text().chars().count() + 2;
                let lines = if inner_width > 0 {
                    len.div_ceil(inner_width) as u16
                } else {
                    1
                };
                lines + 2
            })
            .collect();

        let total_height = heights.iter().sum::<u16>().min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);
        let stack_area = Rect::new(x, y, width, total_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(stack_area);

        for (toast, chunk) in self.toasts.iter().zip(chunks.iter()) {
            render_toast(toast, frame, *chunk);
        }
    }
}

fn render_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(toast.kind.color());
    let mut spans = vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.title.clone(), style.add_modifier(Modifier::BOLD)),
    ];
    if let Some(description) = &toast.description {
        spans.push(Span::styled(format!(": {}", description), style));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_durations() {
        assert_eq!(Toast::success("ok").duration, Duration::from_secs(3));
        assert_eq!(Toast::error("bad").duration, Duration::from_secs(5));
    }

    #[test]
    fn test_toast_text_with_description() {
        let toast = Toast::success("Project created").with_description("Launch");
        assert_eq!(toast.text(), "Project created: Launch");
        assert_eq!(Toast::info("Hi").text(), "Hi");
    }

    #[test]
    fn test_toasts_keep_most_recent() {
        let mut toasts = Toasts::new();
        for i in 0..5 {
            toasts.push(Toast::info(format!("t{}", i)));
        }
        assert_eq!(toasts.len(), 3);
        assert_eq!(toasts.iter().next().map(|t| t.title.as_str()), Some("t2"));
        assert_eq!(toasts.last().map(|t| t.title.as_str()), Some("t4"));
    }

    #[test]
    fn test_tick_removes_expired() {
        let mut toasts = Toasts::new();
        let mut toast = Toast::info("gone");
        toast.duration = Duration::ZERO;
        toasts.push(toast);
        std::thread::sleep(Duration::from_millis(2));
        toasts.push(Toast::info("stays"));
        toasts.tick();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.last().map(|t| t.title.as_str()), Some("stays"));
    }
}
