//! Integration tests for the route guard against a live session.

use std::sync::Arc;

use nexboard_model::Role;
use nexboard_router::{Page, RouteDecision, RouteGuard};
use nexboard_session::{SessionConfig, SessionManager};
use nexboard_storage::MemoryStorage;

// =========================================================================
// Helpers
// =========================================================================

fn open(durable: &MemoryStorage) -> SessionManager {
    SessionManager::open(
        Arc::new(durable.handle()),
        Arc::new(MemoryStorage::new()),
        &SessionConfig::default(),
    )
}

// =========================================================================
// check()
// =========================================================================

#[test]
fn test_settings_admin_allowed_user_unauthorized_anonymous_redirected() {
    let durable = MemoryStorage::new();
    let guard = RouteGuard::default();
    let mut session = open(&durable);

    assert_eq!(guard.check(&session, "/settings"), RouteDecision::RedirectToLogin);

    session.login("admin", "admin123");
    assert_eq!(guard.check(&session, "/settings"), RouteDecision::Allowed(Page::Settings));

    session.logout();
    session.login("user", "user123");
    assert_eq!(guard.check(&session, "/settings"), RouteDecision::Unauthorized);
    assert_eq!(guard.check(&session, "/analytics"), RouteDecision::Allowed(Page::Analytics));
}

#[test]
fn test_remembered_session_passes_guard_right_after_restart() {
    let durable = MemoryStorage::new();
    let guard = RouteGuard::default();
    open(&durable).login("user", "user123");

    let restarted = open(&durable);

    assert_eq!(guard.check(&restarted, "/dashboard"), RouteDecision::Allowed(Page::Dashboard));
    assert_eq!(guard.check(&restarted, "/login"), RouteDecision::RedirectToDashboard);
}

#[test]
fn test_registered_admin_reaches_settings() {
    let durable = MemoryStorage::new();
    let guard = RouteGuard::default();
    let mut session = open(&durable);
    session.register("newadmin", "s3cret!", Role::Admin).unwrap();

    session.login("newadmin", "s3cret!");

    assert!(guard.check(&session, "/settings/").is_allowed());
}

#[test]
fn test_logout_then_protected_route_redirects() {
    let durable = MemoryStorage::new();
    let guard = RouteGuard::default();
    let mut session = open(&durable);
    session.login("admin", "admin123");

    session.logout();

    assert_eq!(guard.check(&session, "/profile"), RouteDecision::RedirectToLogin);
    assert_eq!(guard.check(&session, "/register"), RouteDecision::Allowed(Page::Register));
}

// =========================================================================
// visible_menu()
// =========================================================================

#[test]
fn test_menu_follows_session_role() {
    let durable = MemoryStorage::new();
    let guard = RouteGuard::default();
    let mut session = open(&durable);

    assert!(guard.visible_menu(session.current_identity()).is_empty());

    session.login("user", "user123");
    let user_menu = guard.visible_menu(session.current_identity());
    assert!(user_menu.iter().all(|item| item.path != "/settings"));

    session.login("admin", "admin123");
    let admin_menu = guard.visible_menu(session.current_identity());
    assert_eq!(admin_menu.len(), user_menu.len() + 1);
    assert_eq!(admin_menu.last().map(|item| item.label), Some("Settings"));
}
