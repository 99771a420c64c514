//! Loading state and spinner.
//!
//! Every view keeps its remote data in a `Loadable<T>` and renders the
//! loading, error and empty states from it.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Remote data as seen by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    /// The fetch failed; holds the message to show.
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::NotLoaded
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    /// The loaded value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Mark as loading. Already-loaded data is kept visible while it
    /// refreshes.
    pub fn start(&mut self) {
        if !matches!(self, Loadable::Loaded(_)) {
            *self = Loadable::Loading;
        }
    }

    /// Store a fetch result, mapping errors to their display message.
    pub fn finish<E>(&mut self, result: Result<T, E>, message: impl FnOnce(&E) -> String) {
        *self = match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(message(&e)),
        };
    }
}

impl<T> Loadable<Vec<T>> {
    /// Number of loaded items; zero unless loaded.
    pub fn len(&self) -> usize {
        self.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An animated spinner advanced on every tick.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// Render `message` with the spinner, centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, message: &str) {
        let paragraph = Paragraph::new(format!("{} {}", self.frame(), message))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

/// Render the placeholder for a `Loadable` that has nothing to show.
///
/// Returns the loaded value when there is something to render, so views
/// can write `let Some(items) = render_state(...) else { return };`.
pub fn render_state<'a, T>(
    frame: &mut Frame,
    area: Rect,
    data: &'a Loadable<Vec<T>>,
    spinner: &Spinner,
    empty_message: &str,
) -> Option<&'a Vec<T>> {
    let message = match data {
        Loadable::NotLoaded => return None,
        Loadable::Loading => {
            spinner.render(frame, area, "Loading...");
            return None;
        }
        Loadable::Failed(error) => Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true }),
        Loadable::Loaded(items) if items.is_empty() => {
            Paragraph::new(empty_message).style(theme::muted())
        }
        Loadable::Loaded(items) => return Some(items),
    };
    frame.render_widget(message.alignment(Alignment::Center), area);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_keeps_loaded_data() {
        let mut data = Loadable::Loaded(vec![1, 2]);
        data.start();
        assert_eq!(data.len(), 2);

        let mut empty: Loadable<Vec<i32>> = Loadable::NotLoaded;
        empty.start();
        assert!(empty.is_loading());
    }

    #[test]
    fn test_finish_maps_error() {
        let mut data: Loadable<Vec<i32>> = Loadable::Loading;
        data.finish(Err::<Vec<i32>, &str>("boom"), |e| format!("failed: {}", e));
        assert_eq!(data, Loadable::Failed("failed: boom".to_string()));

        data.finish(Ok::<_, &str>(vec![3]), |_| String::new());
        assert_eq!(data.get(), Some(&vec![3]));
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::new();
        for _ in 0..SPINNER_FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.frame(), SPINNER_FRAMES[0]);
    }
}
