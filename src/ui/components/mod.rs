//! Reusable UI components.

mod dialog;
mod help_bar;
mod input;
mod loading;
mod table;
mod toast;

pub use dialog::{centered_rect, ConfirmDialog, Confirmation, ErrorDialog};
pub use help_bar::render_hints;
pub use input::{Choice, FieldKind, Form, FormEvent, FormField, TextInput};
pub use loading::{render_state, Loadable, Spinner};
pub use table::Selection;
pub use toast::{Toast, ToastKind, Toasts};
