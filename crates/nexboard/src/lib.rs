//! # NexBoard
//!
//! Session and access-control core for the NexBoard admin dashboard.
//!
//! NexBoard keeps track of who is logged in, remembers them across restarts
//! when asked to, and decides for every navigation whether the page may
//! render. Page rendering lives elsewhere; it talks to this crate through
//! [`NexboardApp`].
//!
//! ## Quick Start
//!
//! ```rust
//! use nexboard::prelude::*;
//!
//! let mut app = NexboardApp::builder().build()?;
//!
//! assert_eq!(app.navigate("/settings"), RouteDecision::RedirectToLogin);
//!
//! app.login("admin", "admin123")?;
//! assert_eq!(app.navigate("/settings"), RouteDecision::Allowed(Page::Settings));
//! # Ok::<(), NexboardError>(())
//! ```

mod app;
mod error;
pub mod telemetry;

pub use app::{NexboardApp, NexboardAppBuilder, NexboardConfig};
pub use error::NexboardError;

/// Everything a dashboard front end usually needs, in one import.
pub mod prelude {
    pub use crate::{NexboardApp, NexboardConfig, NexboardError};

    pub use nexboard_model::{Identity, Role};
    pub use nexboard_router::{NavItem, Page, RouteDecision, RouteGuard, RouteTable};
    pub use nexboard_session::{
        Authenticator, RegistrationError, SessionConfig, SessionError, SessionState,
    };
    pub use nexboard_storage::{MemoryStorage, SharedStorage, Storage};
}
