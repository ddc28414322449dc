//! Route access control for NexBoard.
//!
//! Every navigation is checked here before a page renders. The guard reads
//! the session and answers one of: render the page, send the user to the
//! login screen, send them to the dashboard, show "unauthorized", or show
//! "not found".
//!
//! # Key types
//!
//! - [`RouteTable`] — which paths exist and who may open them
//! - [`RouteGuard`] — turns `(session, path)` into a [`RouteDecision`]
//! - [`NavItem`] — a sidebar entry, filtered by role
//! - [`Access`] — the per-route rule (public, any login, specific role)

mod error;
mod guard;
mod nav;
mod route;

pub use error::RouterError;
pub use guard::{RouteDecision, RouteGuard, is_route_allowed};
pub use nav::NavItem;
pub use route::{
    Access, DASHBOARD_PATH, LOGIN_PATH, MenuEntry, Page, REGISTER_PATH, ROOT_PATH, Route,
    RouteTable, normalize_path,
};
