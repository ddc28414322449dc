//! The route guard: decides what a navigation actually shows.

use std::fmt;

use nexboard_model::{Codec, Identity};
use nexboard_session::{Authenticator, SessionManager};
use serde::{Deserialize, Serialize};

use crate::NavItem;
use crate::route::{Access, DASHBOARD_PATH, LOGIN_PATH, Page, ROOT_PATH, RouteTable, normalize_path};

/// The outcome of checking a navigation.
///
/// `Unauthorized` and `RedirectToLogin` are different outcomes: the first
/// means "you are logged in but lack the role", the second "log in
/// first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDecision {
    /// Render this page.
    Allowed(Page),

    /// Not logged in; go to the login screen.
    RedirectToLogin,

    /// Already logged in (or at the root); go to the dashboard.
    RedirectToDashboard,

    /// Logged in without the role this route requires.
    Unauthorized,

    /// Logged in, but no such route.
    NotFound,
}

impl RouteDecision {
    /// Returns `true` if the requested page may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// The path to navigate to instead, for the two redirect outcomes.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToDashboard => Some(DASHBOARD_PATH),
            Self::Allowed(_) | Self::Unauthorized | Self::NotFound => None,
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed(page) => write!(f, "Allowed({page})"),
            Self::RedirectToLogin => write!(f, "RedirectToLogin"),
            Self::RedirectToDashboard => write!(f, "RedirectToDashboard"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "NotFound"),
        }
    }
}

/// Checks navigations against a [`RouteTable`].
///
/// The guard is the enforcement point. The sidebar filtering offered by
/// [`visible_menu`](Self::visible_menu) only hides links; it doesn't stop
/// anyone typing the URL.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    /// Creates a guard over `table`.
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// The table this guard enforces.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Checks a navigation against a live session.
    ///
    /// Taking the manager (rather than a bare identity) means the stored
    /// session has already been restored by the time any route is checked.
    pub fn check<A: Authenticator, C: Codec>(
        &self,
        session: &SessionManager<A, C>,
        path: &str,
    ) -> RouteDecision {
        self.decide(session.current_identity(), path)
    }

    /// Checks a navigation for `identity` (`None` = logged out).
    pub fn decide(&self, identity: Option<&Identity>, path: &str) -> RouteDecision {
        let path = normalize_path(path);
        let route = self.table.find(&path);

        let decision = match identity {
            None => match route {
                Some(route) if route.access == Access::Public => RouteDecision::Allowed(route.page),
                _ => RouteDecision::RedirectToLogin,
            },
            Some(_) if path == ROOT_PATH => RouteDecision::RedirectToDashboard,
            Some(identity) => match route.map(|route| (route.page, route.access)) {
                None => RouteDecision::NotFound,
                Some((_, Access::Public)) => RouteDecision::RedirectToDashboard,
                Some((page, Access::Authenticated)) => RouteDecision::Allowed(page),
                Some((page, Access::Role(required))) if identity.role == required => {
                    RouteDecision::Allowed(page)
                }
                Some((_, Access::Role(_))) => RouteDecision::Unauthorized,
            },
        };

        tracing::debug!(
            path = %path,
            user = identity.map(|i| i.username.as_str()).unwrap_or("-"),
            %decision,
            "route checked"
        );
        decision
    }

    /// Sidebar entries `identity` may see, in table order.
    ///
    /// Logged-out users get an empty menu.
    pub fn visible_menu(&self, identity: Option<&Identity>) -> Vec<NavItem<'_>> {
        let Some(identity) = identity else {
            return Vec::new();
        };

        self.table
            .routes()
            .iter()
            .filter(|route| {
                route
                    .access
                    .required_role()
                    .is_none_or(|role| role == identity.role)
            })
            .filter_map(NavItem::from_route)
            .collect()
    }
}

/// Checks `path` against the dashboard's routes.
pub fn is_route_allowed(path: &str, identity: Option<&Identity>) -> RouteDecision {
    RouteGuard::default().decide(identity, path)
}
