//! Row selection for list and table views.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;

/// Selection within a list of `len` rows.
///
/// Wraps ratatui's `TableState` so the selected index stays in range as
/// the underlying data is reloaded.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    state: TableState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected index, if any row is selected.
    pub fn index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Get the state for rendering.
    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    /// Clamp the selection after the row count changed.
    pub fn sync(&mut self, len: usize) {
        let selected = match (self.state.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.state.select(selected);
    }

    /// Select the first row.
    pub fn reset(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    /// Handle j/k, arrows, g/G, Home/End. Returns true if the key moved the
    /// selection.
    pub fn handle_input(&mut self, key: KeyEvent, len: usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.next(len),
            KeyCode::Char('k') | KeyCode::Up => self.previous(len),
            KeyCode::Char('g') | KeyCode::Home => self.reset(len),
            KeyCode::Char('G') | KeyCode::End if len > 0 => self.state.select(Some(len - 1)),
            _ => return false,
        }
        true
    }

    /// The selected element of `items`.
    pub fn selected<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.index().and_then(|i| items.get(i))
    }
}
