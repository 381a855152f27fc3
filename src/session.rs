// 🔐 Session Store - Mock authentication state
// Two states: logged out, logged in. Login is the only way in, logout the
// only way out. No token, no expiry, plaintext password comparison.

use crate::empresa::{Empresa, EmpresaRegistry};
use crate::storage::{self, keys, StorageBackend};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// SESSION STATE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,

    #[serde(default)]
    pub empresa: Option<Empresa>,
}

impl SessionState {
    pub fn logged_out() -> Self {
        SessionState::default()
    }
}

/// Persistence envelope for the "auth-storage" key.
///
/// Matches the versioned snapshot layout the dashboard writes; the version
/// field is carried opaquely and rewritten as-is.
#[derive(Debug, Serialize, Deserialize)]
struct AuthEnvelope {
    state: SessionState,
    version: u32,
}

const AUTH_ENVELOPE_VERSION: u32 = 0;

// ============================================================================
// SESSION STORE
// ============================================================================

/// Authentication state plus the company profile of whoever logged in.
///
/// Holds its storage handle explicitly rather than reaching for a global;
/// every state change is written through to "auth-storage".
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
    state: SessionState,
}

impl SessionStore {
    /// Fresh store, logged out. Call `initialize_session` to restore a
    /// persisted session.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        SessionStore {
            storage,
            state: SessionState::logged_out(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn empresa(&self) -> Option<&Empresa> {
        self.state.empresa.as_ref()
    }

    /// Authenticate against the persisted company list.
    ///
    /// Email matches ignoring case, password must match exactly. A missing
    /// or unparseable list means no match. On failure the session is left
    /// untouched and `false` comes back; there is no reason code.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let registry = EmpresaRegistry::new(Arc::clone(&self.storage));

        let matched = registry
            .all()
            .into_iter()
            .find(|e| e.matches_email(email) && e.password.as_deref() == Some(password));

        match matched {
            Some(empresa) => {
                self.state.is_authenticated = true;
                self.state.empresa = Some(empresa);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear the session unconditionally.
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::logged_out();
        self.persist()
    }

    /// Overwrite the stored profile without validation.
    pub fn set_profile(&mut self, empresa: Empresa) -> Result<()> {
        self.state.empresa = Some(empresa);
        self.persist()
    }

    /// Restore session state from storage.
    ///
    /// If the restored snapshot says authenticated but carries no profile,
    /// backfill from the first persisted company. With several registered
    /// companies the first one is an arbitrary pick.
    pub fn initialize_session(&mut self) -> Result<()> {
        if let Some(envelope) =
            storage::get_json::<AuthEnvelope>(self.storage.as_ref(), keys::AUTH_STORAGE)
        {
            self.state = envelope.state;
        }

        if self.state.is_authenticated && self.state.empresa.is_none() {
            let registry = EmpresaRegistry::new(Arc::clone(&self.storage));
            if let Some(primera) = registry.first() {
                self.state.empresa = Some(primera);
                self.persist()?;
            }
        }

        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let envelope = AuthEnvelope {
            state: self.state.clone(),
            version: AUTH_ENVELOPE_VERSION,
        };
        storage::set_json(self.storage.as_ref(), keys::AUTH_STORAGE, &envelope)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::empresa::tests::create_test_empresa;
    use crate::storage::MemoryStorage;

    fn setup_with_empresas(empresas: &[(&str, &str)]) -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        let registry = EmpresaRegistry::new(storage.clone() as Arc<dyn StorageBackend>);

        for (email, password) in empresas {
            registry
                .register(create_test_empresa(email, password))
                .unwrap();
        }

        storage
    }

    #[test]
    fn test_login_success_sets_profile() {
        let storage = setup_with_empresas(&[("laura@atlas.mx", "secreto")]);
        let mut session = SessionStore::new(storage);

        assert!(session.login("laura@atlas.mx", "secreto").unwrap());
        assert!(session.is_authenticated());
        assert_eq!(session.empresa().unwrap().email, "laura@atlas.mx");
    }

    #[test]
    fn test_login_email_case_insensitive() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);
        let mut session = SessionStore::new(storage);

        assert!(session.login("A@B.com", "x").unwrap());
        assert!(session.is_authenticated());
        assert_eq!(session.empresa().unwrap().email, "a@b.com");
    }

    #[test]
    fn test_login_wrong_password_unchanged() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);
        let mut session = SessionStore::new(storage);

        assert!(!session.login("a@b.com", "X").unwrap());
        assert!(!session.login("a@b.com", "").unwrap());
        assert!(!session.login("a@b.com", "xx").unwrap());

        assert_eq!(*session.state(), SessionState::logged_out());
    }

    #[test]
    fn test_login_unknown_email_unchanged() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);
        let mut session = SessionStore::new(storage);

        assert!(!session.login("nadie@b.com", "x").unwrap());
        assert_eq!(*session.state(), SessionState::logged_out());
    }

    #[test]
    fn test_login_empty_registry_fails_open() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionStore::new(storage);

        assert!(!session.login("a@b.com", "x").unwrap());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_malformed_registry_fails_open() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::REGISTROS_EMPRESAS, "not json").unwrap();

        let mut session = SessionStore::new(storage);
        assert!(!session.login("a@b.com", "x").unwrap());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_always_clears() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);
        let mut session = SessionStore::new(storage);

        session.login("a@b.com", "x").unwrap();
        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(session.empresa().is_none());

        // Logging out while logged out is a no-op with the same result
        session.logout().unwrap();
        assert_eq!(*session.state(), SessionState::logged_out());
    }

    #[test]
    fn test_set_profile_overwrites() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);
        let mut session = SessionStore::new(storage);
        session.login("a@b.com", "x").unwrap();

        let otra = create_test_empresa("otra@b.com", "y");
        session.set_profile(otra.clone()).unwrap();

        assert_eq!(session.empresa(), Some(&otra));
    }

    #[test]
    fn test_session_survives_restart() {
        let storage = setup_with_empresas(&[("a@b.com", "x")]);

        let mut session = SessionStore::new(storage.clone());
        session.login("a@b.com", "x").unwrap();

        // Fresh store over the same storage, as after a page reload
        let mut restored = SessionStore::new(storage);
        restored.initialize_session().unwrap();

        assert!(restored.is_authenticated());
        assert_eq!(restored.empresa().unwrap().email, "a@b.com");
    }

    #[test]
    fn test_initialize_backfills_missing_profile() {
        let storage = setup_with_empresas(&[("primera@x.mx", "1"), ("segunda@x.mx", "2")]);

        // Authenticated snapshot with no profile attached
        storage
            .set(
                keys::AUTH_STORAGE,
                r#"{"state":{"isAuthenticated":true},"version":0}"#,
            )
            .unwrap();

        let mut session = SessionStore::new(storage);
        session.initialize_session().unwrap();

        assert!(session.is_authenticated());
        // Takes the first persisted company, whatever it is
        assert_eq!(session.empresa().unwrap().email, "primera@x.mx");
    }

    #[test]
    fn test_initialize_without_snapshot_stays_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionStore::new(storage);

        session.initialize_session().unwrap();
        assert_eq!(*session.state(), SessionState::logged_out());
    }

    #[test]
    fn test_initialize_malformed_snapshot_stays_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::AUTH_STORAGE, "{{{{").unwrap();

        let mut session = SessionStore::new(storage);
        session.initialize_session().unwrap();

        assert!(!session.is_authenticated());
    }
}
