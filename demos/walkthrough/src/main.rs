//! Walks through a typical dashboard session: sign-up, login, role-gated
//! navigation, remember-me across a restart, and logout.
//!
//! Run with `RUST_LOG=debug` to also see every route decision.

use nexboard::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn show(app: &NexboardApp, path: &str) {
    let who = app
        .current_identity()
        .map_or_else(|| "anonymous".to_string(), ToString::to_string);
    println!("  {who:<20} {path:<12} -> {}", app.navigate(path));
}

fn show_menu(app: &NexboardApp) {
    let labels: Vec<&str> = app.visible_menu().iter().map(|item| item.label).collect();
    println!("  menu: {}", labels.join(" | "));
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    nexboard::telemetry::init("info");

    // A scratch directory plays the part of the browser's long-lived storage.
    let dir = tempfile::tempdir()?;
    let open = || NexboardApp::builder().storage_dir(dir.path()).build();

    println!("== first visit");
    let mut app = open()?;
    show(&app, "/settings");

    if let Err(e) = app.register("ab", "123456", Role::User) {
        println!("  sign-up refused: {e}");
    }
    app.register("newuser", "123456", Role::User)?;
    app.login("newuser", "123456")?;
    show(&app, "/dashboard");
    show(&app, "/settings");
    show_menu(&app);

    println!("== admin logs in on the same tab");
    app.login("admin", "admin123")?;
    show(&app, "/settings");
    show(&app, "/login");
    show_menu(&app);
    drop(app);

    println!("== restart (remember me is on)");
    let mut app = open()?;
    show(&app, "/");
    app.set_persistence_preference(false);
    drop(app);

    println!("== restart (remember me is off)");
    let mut app = open()?;
    show(&app, "/dashboard");
    match app.login("newuser", "wrong-password") {
        Ok(_) => println!("  unexpected login"),
        Err(e) => println!("  login refused: {e}"),
    }
    app.login("newuser", "123456")?;
    show(&app, "/profile");
    app.logout();
    show(&app, "/profile");

    tracing::info!("walkthrough finished");
    Ok(())
}
