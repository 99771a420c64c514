//! Terminal events for the application loop.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// An event the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick rate elapsed without input.
    Tick,
}
