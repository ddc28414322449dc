//! Sidebar navigation entries.

use serde::Serialize;

use crate::route::{Route, normalize_path};

/// One link in the sidebar.
///
/// Borrowed from the [`RouteTable`](crate::RouteTable) it came from, so
/// building a menu per render allocates only the `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem<'a> {
    pub label: &'a str,
    pub path: &'a str,
    pub description: &'a str,
}

impl<'a> NavItem<'a> {
    /// The sidebar entry for `route`, if it has one.
    pub fn from_route(route: &'a Route) -> Option<Self> {
        route.menu.as_ref().map(|menu| Self {
            label: &menu.label,
            path: &route.path,
            description: &menu.description,
        })
    }

    /// Whether this link should be highlighted at `current_path`.
    pub fn is_active(&self, current_path: &str) -> bool {
        normalize_path(current_path) == self.path
    }
}
