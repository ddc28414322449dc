//! Integration tests for the `NexboardApp` facade: restarts, tabs, and the
//! full login → navigate → logout flow.

use std::sync::Arc;

use nexboard::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

/// Opens the app over `dir`, the way a fresh process would.
fn open_dir(dir: &std::path::Path) -> NexboardApp {
    NexboardApp::builder().storage_dir(dir).build().unwrap()
}

// =========================================================================
// Full flow
// =========================================================================

#[test]
fn test_admin_and_user_settings_scenario() {
    let mut app = NexboardApp::builder().build().unwrap();

    app.login("admin", "admin123").unwrap();
    assert_eq!(app.navigate("/settings"), RouteDecision::Allowed(Page::Settings));
    assert_eq!(app.visible_menu().len(), 5);

    app.logout();
    app.login("user", "user123").unwrap();
    assert_eq!(app.navigate("/settings"), RouteDecision::Unauthorized);
    assert_eq!(app.visible_menu().len(), 4);
}

#[test]
fn test_register_then_login_then_navigate() {
    let mut app = NexboardApp::builder().build().unwrap();

    app.register("newuser", "123456", Role::User).unwrap();
    assert!(app.current_identity().is_none());

    let identity = app.login("newuser", "123456").unwrap();

    assert_eq!(identity, Identity::new("newuser", Role::User));
    assert_eq!(app.navigate("/login"), RouteDecision::RedirectToDashboard);
    assert_eq!(app.navigate("/nowhere"), RouteDecision::NotFound);
}

// =========================================================================
// Restarts
// =========================================================================

#[test]
fn test_remembered_login_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    open_dir(dir.path()).login("admin", "admin123").unwrap();

    let restarted = open_dir(dir.path());

    assert_eq!(restarted.current_identity(), Some(&Identity::new("admin", Role::Admin)));
    assert!(restarted.navigate("/settings").is_allowed());
}

#[test]
fn test_not_remembered_login_gone_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open_dir(dir.path());
    app.set_persistence_preference(false);
    app.login("admin", "admin123").unwrap();
    drop(app);

    let restarted = open_dir(dir.path());

    assert!(restarted.current_identity().is_none());
    assert!(!restarted.persistence_preference());
    assert_eq!(restarted.navigate("/dashboard"), RouteDecision::RedirectToLogin);
}

#[test]
fn test_registered_account_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    open_dir(dir.path())
        .register("newadmin", "s3cret!", Role::Admin)
        .unwrap();

    let mut restarted = open_dir(dir.path());

    assert_eq!(restarted.login("newadmin", "s3cret!").unwrap().role, Role::Admin);
}

#[test]
fn test_storage_dir_that_is_a_file_fails_to_build() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let result = NexboardApp::builder().storage_dir(file.path()).build();

    assert!(matches!(result, Err(NexboardError::Storage(_))));
}

// =========================================================================
// Tabs
// =========================================================================

#[test]
fn test_second_tab_follows_logout() {
    let shared = MemoryStorage::new();
    let open_tab = || {
        NexboardApp::builder()
            .durable_storage(Arc::new(shared.handle()))
            .build()
            .unwrap()
    };
    let mut tab_a = open_tab();
    tab_a.login("user", "user123").unwrap();
    let mut tab_b = open_tab();
    assert!(tab_b.current_identity().is_some());

    tab_a.logout();

    assert!(tab_b.sync());
    assert_eq!(tab_b.navigate("/profile"), RouteDecision::RedirectToLogin);
}

#[test]
fn test_ephemeral_storage_override_is_used() {
    let ephemeral = MemoryStorage::new();
    let mut app = NexboardApp::builder()
        .session_config(SessionConfig {
            remember_by_default: false,
            ..SessionConfig::default()
        })
        .ephemeral_storage(Arc::new(ephemeral.clone()))
        .build()
        .unwrap();

    app.login("user", "user123").unwrap();

    assert!(!ephemeral.is_empty());
}
