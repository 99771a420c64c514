//! Navigation routes and their access guards.

use std::fmt;

/// Who may visit a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only visitors without a session (login, register).
    PublicOnly,
    /// Any authenticated user.
    Protected,
    /// Authenticated admins only.
    AdminOnly,
}

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Tasks,
    Calendar,
    Reports,
    Settings,
    Admin,
}

impl Route {
    /// Every route.
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Tasks,
        Route::Calendar,
        Route::Reports,
        Route::Settings,
        Route::Admin,
    ];

    /// The route's path.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::Tasks => "/tasks",
            Route::Calendar => "/calendar",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
            Route::Admin => "/admin",
        }
    }

    /// Look up a route by path.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// The title shown in the sidebar and header.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Tasks => "Tasks",
            Route::Calendar => "Calendar",
            Route::Reports => "Reports",
            Route::Settings => "Settings",
            Route::Admin => "Admin",
        }
    }

    /// Who may visit this route.
    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Register => Access::PublicOnly,
            Route::Admin => Access::AdminOnly,
            _ => Access::Protected,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the navigator knows about the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No access token.
    Anonymous,
    /// A token exists but the current user is still being fetched.
    Resolving,
    /// A token exists and the user is known.
    Authenticated {
        /// Whether the user holds the admin role.
        is_admin: bool,
    },
}

/// The outcome of guarding a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Show the requested route.
    Allow,
    /// Show another route instead.
    Redirect(Route),
    /// Show a loading screen until the user is known.
    Wait,
}

/// Decide whether `route` may be shown in `state`.
pub fn guard(route: Route, state: AuthState) -> Guard {
    match (route.access(), state) {
        (_, AuthState::Resolving) => Guard::Wait,
        (Access::PublicOnly, AuthState::Anonymous) => Guard::Allow,
        (Access::PublicOnly, AuthState::Authenticated { .. }) => Guard::Redirect(Route::Dashboard),
        (Access::Protected | Access::AdminOnly, AuthState::Anonymous) => {
            Guard::Redirect(Route::Login)
        }
        (Access::Protected, AuthState::Authenticated { .. }) => Guard::Allow,
        (Access::AdminOnly, AuthState::Authenticated { is_admin: true }) => Guard::Allow,
        (Access::AdminOnly, AuthState::Authenticated { is_admin: false }) => {
            Guard::Redirect(Route::Dashboard)
        }
    }
}

/// Resolve a navigation to the route that will actually be shown.
///
/// Redirects are followed until a route is allowed. Returns `None` while
/// the user is still being resolved.
pub fn resolve(route: Route, state: AuthState) -> Option<Route> {
    let mut current = route;
    // Each redirect moves toward Login or Dashboard, both terminal.
    for _ in 0..Route::ALL.len() {
        match guard(current, state) {
            Guard::Allow => return Some(current),
            Guard::Wait => return None,
            Guard::Redirect(next) => current = next,
        }
    }
    Some(current)
}

/// The sidebar entries for a user.
pub fn sidebar(is_admin: bool) -> Vec<Route> {
    let mut routes = vec![
        Route::Dashboard,
        Route::Tasks,
        Route::Calendar,
        Route::Reports,
        Route::Settings,
    ];
    if is_admin {
        routes.push(Route::Admin);
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER: AuthState = AuthState::Authenticated { is_admin: false };
    const ADMIN: AuthState = AuthState::Authenticated { is_admin: true };

    #[test]
    fn test_non_admin_redirected_from_admin_to_root() {
        assert_eq!(guard(Route::Admin, MEMBER), Guard::Redirect(Route::Dashboard));
        assert_eq!(Route::Dashboard.path(), "/");
    }

    #[test]
    fn test_admin_sees_admin_panel() {
        assert_eq!(guard(Route::Admin, ADMIN), Guard::Allow);
    }

    #[test]
    fn test_anonymous_redirected_to_login() {
        for route in [Route::Dashboard, Route::Tasks, Route::Settings, Route::Admin] {
            assert_eq!(guard(route, AuthState::Anonymous), Guard::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_public_routes_redirect_authenticated_users() {
        assert_eq!(guard(Route::Login, MEMBER), Guard::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::Register, ADMIN), Guard::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::Register, AuthState::Anonymous), Guard::Allow);
    }

    #[test]
    fn test_resolving_waits() {
        assert_eq!(guard(Route::Tasks, AuthState::Resolving), Guard::Wait);
        assert_eq!(resolve(Route::Admin, AuthState::Resolving), None);
    }

    #[test]
    fn test_resolve_follows_redirects() {
        assert_eq!(resolve(Route::Admin, AuthState::Anonymous), Some(Route::Login));
        assert_eq!(resolve(Route::Login, MEMBER), Some(Route::Dashboard));
        assert_eq!(resolve(Route::Admin, MEMBER), Some(Route::Dashboard));
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_sidebar_admin_entry() {
        assert!(!sidebar(false).contains(&Route::Admin));
        assert_eq!(sidebar(true).last(), Some(&Route::Admin));
    }
}
