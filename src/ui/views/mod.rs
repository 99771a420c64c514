//! Application views (screens).
//!
//! Views own their data and form state but never touch the network. Key
//! handlers and result handlers return `ViewAction`s that the `App`
//! carries out: spawning requests, navigating, or showing toasts.

mod admin;
mod calendar;
mod dashboard;
mod login;
mod register;
mod reports;
mod settings;
mod tasks;

pub use admin::{AdminTab, AdminView};
pub use calendar::CalendarView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use register::RegisterView;
pub use reports::ReportsView;
pub use settings::SettingsView;
pub use tasks::{StatusFilter, TasksView};

use crate::api::ApiError;
use crate::routes::Route;
use crate::tasks::ApiRequest;
use crate::ui::components::Toast;

/// Something a view asks the application to do.
#[derive(Debug, Clone)]
pub enum ViewAction {
    Request(ApiRequest),
    Navigate(Route),
    Toast(Toast),
}

impl From<ApiRequest> for ViewAction {
    fn from(request: ApiRequest) -> Self {
        ViewAction::Request(request)
    }
}

impl From<Toast> for ViewAction {
    fn from(toast: Toast) -> Self {
        ViewAction::Toast(toast)
    }
}

/// An error toast for a failed operation.
///
/// The description is the backend's message, or `fallback`.
pub(crate) fn failure(title: &str, error: &ApiError, fallback: &str) -> ViewAction {
    ViewAction::Toast(Toast::error(title).with_description(error.display_message(fallback)))
}
