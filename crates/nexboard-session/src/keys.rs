//! Storage keys written by the session layer.
//!
//! These strings end up as file names and browser storage keys, so they
//! must never change between releases.

/// The identity snapshot. Lives in whichever store the preference selects.
pub const IDENTITY: &str = "identity";

/// The "remember me" flag. Always in long-lived storage.
pub const PERSISTENCE_PREFERENCE: &str = "persistence-preference";

/// Every registered account. Always in long-lived storage.
pub const CREDENTIAL_RECORDS: &str = "credential-records";
