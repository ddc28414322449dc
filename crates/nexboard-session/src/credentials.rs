//! The credential registry: which username/password pairs may log in.

use nexboard_model::{Codec, CredentialRecord, Identity, JsonCodec, Role};
use nexboard_storage::SharedStorage;

use crate::{Authenticator, RegistrationError, SessionConfig, SessionError, keys};

/// Every account that can log in, seeded with the demo accounts and
/// extended by registration.
///
/// Records are only ever appended. After each append the whole list is
/// written to long-lived storage under [`keys::CREDENTIAL_RECORDS`], which
/// is independent of the session keys: accounts survive a restart whatever
/// the "remember me" flag says.
pub struct CredentialStore<C: Codec = JsonCodec> {
    /// Seeds first, then registrations in the order they happened.
    records: Vec<CredentialRecord>,

    /// Long-lived store the record list is saved to.
    storage: SharedStorage,

    codec: C,
    min_username_len: usize,
    min_password_len: usize,
}

impl CredentialStore<JsonCodec> {
    /// Loads the registry from `storage` using JSON snapshots.
    pub fn load(storage: SharedStorage, config: &SessionConfig) -> Self {
        Self::load_with_codec(storage, config, JsonCodec)
    }
}

impl<C: Codec> CredentialStore<C> {
    /// Loads the registry from `storage` with a specific codec.
    ///
    /// Seed accounts always come first. Stored records are appended after
    /// them, skipping any username that is already present. A record list
    /// that can't be read or decoded is logged and ignored; the seeds
    /// still work.
    pub fn load_with_codec(storage: SharedStorage, config: &SessionConfig, codec: C) -> Self {
        let mut store = Self {
            records: Vec::new(),
            storage,
            codec,
            min_username_len: config.min_username_len,
            min_password_len: config.min_password_len,
        };

        for seed in &config.seed_credentials {
            store.push_unique(seed.clone());
        }

        for record in store.read_saved() {
            store.push_unique(record);
        }

        tracing::debug!(accounts = store.records.len(), "credential store loaded");
        store
    }

    /// Finds the record matching both fields exactly.
    ///
    /// Returns `None` on any mismatch, without saying which field was wrong.
    pub fn lookup(&self, username: &str, password: &str) -> Option<&CredentialRecord> {
        self.records
            .iter()
            .find(|record| record.matches(username, password))
    }

    /// Returns `true` if an account with this exact username exists.
    pub fn exists(&self, username: &str) -> bool {
        self.records.iter().any(|record| record.username == username)
    }

    /// Checks the length rules registration enforces before [`add`](Self::add).
    ///
    /// Lengths count characters, not bytes, so `"ñoño"` is four long.
    ///
    /// # Errors
    /// [`RegistrationError::UsernameTooShort`] is reported before
    /// [`RegistrationError::PasswordTooShort`].
    pub fn validate(&self, username: &str, password: &str) -> Result<(), RegistrationError> {
        if username.chars().count() < self.min_username_len {
            return Err(RegistrationError::UsernameTooShort {
                min: self.min_username_len,
            });
        }
        if password.chars().count() < self.min_password_len {
            return Err(RegistrationError::PasswordTooShort {
                min: self.min_password_len,
            });
        }
        Ok(())
    }

    /// Appends a new account and saves the full list.
    ///
    /// A failed save is logged; the account still exists for the rest of
    /// this process.
    ///
    /// # Errors
    /// [`RegistrationError::DuplicateUsername`] if the username is taken.
    pub fn add(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), RegistrationError> {
        if self.exists(username) {
            return Err(RegistrationError::DuplicateUsername(username.to_string()));
        }

        self.records.push(CredentialRecord::new(username, password, role));
        self.save();

        tracing::info!(username, %role, "account registered");
        Ok(())
    }

    /// All accounts, seeds first.
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no accounts at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push_unique(&mut self, record: CredentialRecord) {
        if !self.exists(&record.username) {
            self.records.push(record);
        }
    }

    fn read_saved(&self) -> Vec<CredentialRecord> {
        let bytes = match self.storage.get(keys::CREDENTIAL_RECORDS) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = keys::CREDENTIAL_RECORDS,
                    "could not read saved accounts"
                );
                return Vec::new();
            }
        };

        match self.codec.decode(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = keys::CREDENTIAL_RECORDS,
                    "saved accounts are corrupt, ignoring"
                );
                Vec::new()
            }
        }
    }

    fn save(&self) {
        let result = self
            .codec
            .encode(&self.records)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                self.storage
                    .set(keys::CREDENTIAL_RECORDS, &bytes)
                    .map_err(|e| e.to_string())
            });

        if let Err(error) = result {
            tracing::warn!(%error, key = keys::CREDENTIAL_RECORDS, "could not save accounts");
        }
    }
}

impl<C: Codec> Authenticator for CredentialStore<C> {
    fn authenticate(&self, username: &str, password: &str) -> Result<Identity, SessionError> {
        self.lookup(username, password)
            .map(CredentialRecord::identity)
            .ok_or(SessionError::InvalidCredentials)
    }

    fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), RegistrationError> {
        self.validate(username, password)?;
        self.add(username, password, role)
    }
}

impl<C: Codec> std::fmt::Debug for CredentialStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("records", &self.records)
            .field("storage", &self.storage.handle_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for `CredentialStore`.
    //!
    //! Naming follows `test_{function}_{scenario}_{expected}`.

    use std::sync::Arc;

    use nexboard_storage::{MemoryStorage, Storage};

    use super::*;
    use crate::testing::FailingStorage;

    // -- Helpers ----------------------------------------------------------

    fn fresh_store() -> (MemoryStorage, CredentialStore) {
        let storage = MemoryStorage::new();
        let store = CredentialStore::load(Arc::new(storage.clone()), &SessionConfig::default());
        (storage, store)
    }

    // =====================================================================
    // load()
    // =====================================================================

    #[test]
    fn test_load_empty_storage_has_only_seeds() {
        let (_, store) = fresh_store();

        let names: Vec<&str> = store.records().iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "user"]);
    }

    #[test]
    fn test_load_appends_saved_accounts_after_seeds() {
        let (storage, mut store) = fresh_store();
        store.register("newuser", "123456", Role::User).unwrap();

        let reloaded = CredentialStore::load(Arc::new(storage), &SessionConfig::default());

        assert_eq!(reloaded.len(), 3);
        assert!(reloaded.lookup("newuser", "123456").is_some());
    }

    #[test]
    fn test_load_saved_record_cannot_shadow_seed() {
        // A hand-edited file claiming "admin" with another password must
        // not replace the seed account.
        let storage = MemoryStorage::new();
        let forged = vec![CredentialRecord::new("admin", "hijacked", Role::User)];
        storage
            .set(keys::CREDENTIAL_RECORDS, &JsonCodec.encode(&forged).unwrap())
            .unwrap();

        let store = CredentialStore::load(Arc::new(storage), &SessionConfig::default());

        assert_eq!(store.len(), 2);
        assert!(store.lookup("admin", "admin123").is_some());
        assert!(store.lookup("admin", "hijacked").is_none());
    }

    #[test]
    fn test_load_corrupt_records_falls_back_to_seeds() {
        let storage = MemoryStorage::new();
        storage.set(keys::CREDENTIAL_RECORDS, b"[{not json").unwrap();

        let store = CredentialStore::load(Arc::new(storage), &SessionConfig::default());

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_unreadable_storage_falls_back_to_seeds() {
        let store =
            CredentialStore::load(Arc::new(FailingStorage::new()), &SessionConfig::default());

        assert_eq!(store.len(), 2);
    }

    // =====================================================================
    // lookup() / exists()
    // =====================================================================

    #[test]
    fn test_lookup_exact_match_returns_record() {
        let (_, store) = fresh_store();

        let record = store.lookup("admin", "admin123").expect("seed should match");

        assert_eq!(record.role, Role::Admin);
    }

    #[test]
    fn test_lookup_wrong_password_returns_none() {
        let (_, store) = fresh_store();

        assert!(store.lookup("admin", "wrong").is_none());
        assert!(store.lookup("admin", "user123").is_none(), "passwords are per account");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let (_, store) = fresh_store();

        assert!(store.lookup("ADMIN", "admin123").is_none());
    }

    #[test]
    fn test_exists_reports_known_usernames_only() {
        let (_, store) = fresh_store();

        assert!(store.exists("user"));
        assert!(!store.exists("User"));
        assert!(!store.exists("ghost"));
    }

    // =====================================================================
    // validate()
    // =====================================================================

    #[test]
    fn test_validate_short_username_reported_first() {
        let (_, store) = fresh_store();

        assert_eq!(
            store.validate("ab", "1"),
            Err(RegistrationError::UsernameTooShort { min: 3 })
        );
    }

    #[test]
    fn test_validate_short_password() {
        let (_, store) = fresh_store();

        assert_eq!(
            store.validate("newuser", "12345"),
            Err(RegistrationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_validate_exact_minimums_pass() {
        let (_, store) = fresh_store();

        assert_eq!(store.validate("abc", "123456"), Ok(()));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        let (_, store) = fresh_store();

        // Two characters, four bytes.
        assert_eq!(
            store.validate("éé", "123456"),
            Err(RegistrationError::UsernameTooShort { min: 3 })
        );
        assert_eq!(store.validate("ñoño", "contraseña"), Ok(()));
    }

    #[test]
    fn test_validate_uses_configured_minimums() {
        let config = SessionConfig {
            min_username_len: 5,
            min_password_len: 10,
            ..SessionConfig::default()
        };
        let store = CredentialStore::load(Arc::new(MemoryStorage::new()), &config);

        assert_eq!(
            store.validate("abcd", "0123456789"),
            Err(RegistrationError::UsernameTooShort { min: 5 })
        );
        assert_eq!(
            store.validate("abcde", "012345678"),
            Err(RegistrationError::PasswordTooShort { min: 10 })
        );
    }

    // =====================================================================
    // add() / register()
    // =====================================================================

    #[test]
    fn test_add_duplicate_username_rejected_for_any_role() {
        let (_, mut store) = fresh_store();

        for role in [Role::Admin, Role::User] {
            assert_eq!(
                store.add("admin", "whatever1", role),
                Err(RegistrationError::DuplicateUsername("admin".into()))
            );
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_persists_full_record_set() {
        let (storage, mut store) = fresh_store();

        store.add("newuser", "123456", Role::User).unwrap();

        let bytes = storage.get(keys::CREDENTIAL_RECORDS).unwrap().unwrap();
        let saved: Vec<CredentialRecord> = JsonCodec.decode(&bytes).unwrap();
        let names: Vec<&str> = saved.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "user", "newuser"]);
    }

    #[test]
    fn test_add_save_failure_keeps_account_in_memory() {
        let mut store =
            CredentialStore::load(Arc::new(FailingStorage::new()), &SessionConfig::default());

        store.add("newuser", "123456", Role::User).expect("save failures are swallowed");

        assert!(store.lookup("newuser", "123456").is_some());
    }

    #[test]
    fn test_register_validates_before_duplicate_check() {
        let (_, mut store) = fresh_store();

        // "user" exists, but the password rule fails first.
        assert_eq!(
            Authenticator::register(&mut store, "user", "123", Role::User),
            Err(RegistrationError::PasswordTooShort { min: 6 })
        );
    }

    // =====================================================================
    // authenticate()
    // =====================================================================

    #[test]
    fn test_authenticate_returns_identity_with_role() {
        let (_, store) = fresh_store();

        let identity = store.authenticate("user", "user123").unwrap();

        assert_eq!(identity, Identity::new("user", Role::User));
    }

    #[test]
    fn test_authenticate_unknown_and_wrong_password_look_identical() {
        let (_, store) = fresh_store();

        let unknown = store.authenticate("ghost", "admin123");
        let wrong = store.authenticate("admin", "nope");

        assert_eq!(unknown, Err(SessionError::InvalidCredentials));
        assert_eq!(wrong, unknown);
    }

    #[test]
    fn test_debug_does_not_print_passwords() {
        let (_, store) = fresh_store();

        let printed = format!("{store:?}");

        assert!(!printed.contains("admin123"));
        assert!(!printed.contains("user123"));
    }
}
