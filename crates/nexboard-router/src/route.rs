//! Route definitions: which paths exist, what they show, who may open them.

use std::fmt;

use nexboard_model::Role;
use serde::{Deserialize, Serialize};

use crate::RouterError;

/// The site root. Never a page of its own: it redirects.
pub const ROOT_PATH: &str = "/";

/// Where anonymous users are sent.
pub const LOGIN_PATH: &str = "/login";

/// The sign-up form.
pub const REGISTER_PATH: &str = "/register";

/// Where logged-in users land.
pub const DASHBOARD_PATH: &str = "/dashboard";

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The views the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Analytics,
    DataTable,
    Profile,
    Settings,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Register => write!(f, "Register"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Analytics => write!(f, "Analytics"),
            Self::DataTable => write!(f, "DataTable"),
            Self::Profile => write!(f, "Profile"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

/// Who may open a route.
///
/// This is the only place role checks live; pages don't repeat them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    /// Only for logged-out users (login, register). Logged-in users are
    /// sent to the dashboard instead.
    Public,

    /// Any logged-in user.
    Authenticated,

    /// Logged-in users holding exactly this role.
    Role(Role),
}

impl Access {
    /// The role this rule demands, if any.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Role(role) => Some(*role),
            Self::Public | Self::Authenticated => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Label and blurb shown for a route in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub description: String,
}

/// One path the dashboard knows how to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Normalized absolute path, e.g. `/data-table`.
    pub path: String,

    /// The view rendered when access is granted.
    pub page: Page,

    /// Who may open it.
    pub access: Access,

    /// Sidebar entry; `None` keeps the route out of the menu.
    pub menu: Option<MenuEntry>,
}

impl Route {
    /// A route only logged-out users see.
    pub fn public(path: impl Into<String>, page: Page) -> Self {
        Self::new(path, page, Access::Public)
    }

    /// A route any logged-in user may open.
    pub fn authenticated(path: impl Into<String>, page: Page) -> Self {
        Self::new(path, page, Access::Authenticated)
    }

    /// A route restricted to one role.
    pub fn restricted(path: impl Into<String>, page: Page, role: Role) -> Self {
        Self::new(path, page, Access::Role(role))
    }

    /// Adds a sidebar entry for this route.
    pub fn in_menu(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.menu = Some(MenuEntry {
            label: label.into(),
            description: description.into(),
        });
        self
    }

    fn new(path: impl Into<String>, page: Page, access: Access) -> Self {
        Self {
            path: path.into(),
            page,
            access,
            menu: None,
        }
    }
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// Every route, in sidebar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates a table with no routes. See [`dashboard`](Self::dashboard)
    /// (also the `Default`) for the dashboard's own routes.
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// The dashboard's routes.
    ///
    /// Settings is admin-only; every other page is open to any logged-in
    /// user.
    pub fn dashboard() -> Self {
        Self {
            routes: vec![
                Route::public(LOGIN_PATH, Page::Login),
                Route::public(REGISTER_PATH, Page::Register),
                Route::authenticated(DASHBOARD_PATH, Page::Dashboard)
                    .in_menu("Dashboard", "Overview and key metrics"),
                Route::authenticated("/analytics", Page::Analytics)
                    .in_menu("Analytics", "Data insights and reports"),
                Route::authenticated("/data-table", Page::DataTable)
                    .in_menu("Data Table", "Manage and view data"),
                Route::authenticated("/profile", Page::Profile)
                    .in_menu("Profile", "Your account settings"),
                Route::restricted("/settings", Page::Settings, Role::Admin)
                    .in_menu("Settings", "System configuration"),
            ],
        }
    }

    /// Adds a route.
    ///
    /// # Errors
    /// - [`RouterError::InvalidPath`] if the path isn't already in
    ///   normalized form, or is the root (which always redirects)
    /// - [`RouterError::DuplicatePath`] if the path is taken
    pub fn with_route(mut self, route: Route) -> Result<Self, RouterError> {
        if route.path == ROOT_PATH
            || !route.path.starts_with('/')
            || normalize_path(&route.path) != route.path
        {
            return Err(RouterError::InvalidPath(route.path));
        }
        if self.find(&route.path).is_some() {
            return Err(RouterError::DuplicatePath(route.path));
        }
        self.routes.push(route);
        Ok(self)
    }

    /// Looks up a normalized path.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// All routes in sidebar order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Reduces a requested location to the form routes are matched against.
///
/// Drops the query string and fragment, adds a missing leading slash, and
/// strips trailing slashes (the root stays `/`). Case is preserved:
/// `/Settings` is not `/settings`.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_strips_query_fragment_and_slash() {
        assert_eq!(normalize_path("/settings/"), "/settings");
        assert_eq!(normalize_path("/settings?tab=security"), "/settings");
        assert_eq!(normalize_path("/data-table#page-2"), "/data-table");
        assert_eq!(normalize_path("/profile//"), "/profile");
    }

    #[test]
    fn test_normalize_path_root_variants() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/?next=/settings"), "/");
    }

    #[test]
    fn test_normalize_path_adds_leading_slash_and_keeps_case() {
        assert_eq!(normalize_path("dashboard"), "/dashboard");
        assert_eq!(normalize_path("/Settings"), "/Settings");
    }

    #[test]
    fn test_dashboard_table_settings_admin_only() {
        let table = RouteTable::dashboard();

        let settings = table.find("/settings").unwrap();

        assert_eq!(settings.access, Access::Role(Role::Admin));
        assert_eq!(settings.access.required_role(), Some(Role::Admin));
    }

    #[test]
    fn test_dashboard_table_auth_pages_not_in_menu() {
        let table = RouteTable::dashboard();

        assert!(table.find(LOGIN_PATH).unwrap().menu.is_none());
        assert!(table.find(REGISTER_PATH).unwrap().menu.is_none());
        assert_eq!(table.routes().iter().filter(|r| r.menu.is_some()).count(), 5);
    }

    #[test]
    fn test_empty_has_no_routes_default_is_dashboard() {
        assert!(RouteTable::empty().routes().is_empty());
        assert_eq!(RouteTable::default(), RouteTable::dashboard());
    }

    #[test]
    fn test_with_route_appends() {
        let table = RouteTable::empty()
            .with_route(Route::authenticated("/reports", Page::Analytics))
            .unwrap();

        assert_eq!(table.find("/reports").map(|r| r.page), Some(Page::Analytics));
    }

    #[test]
    fn test_with_route_rejects_duplicate() {
        let result =
            RouteTable::dashboard().with_route(Route::authenticated("/profile", Page::Profile));

        assert_eq!(result, Err(RouterError::DuplicatePath("/profile".into())));
    }

    #[test]
    fn test_with_route_rejects_unnormalized_and_root() {
        for path in ["reports", "/reports/", "/reports?x=1", "/"] {
            let result =
                RouteTable::empty().with_route(Route::authenticated(path, Page::Analytics));
            assert!(
                matches!(result, Err(RouterError::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_page_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Page::DataTable).unwrap(), "\"data-table\"");
    }

    #[test]
    fn test_page_display() {
        assert_eq!(Page::DataTable.to_string(), "DataTable");
    }
}
