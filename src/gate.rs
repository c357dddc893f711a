//! Access gate - the main public API.
//!
//! The `AccessGate` decides whether the protected application may render:
//! - Startup check of the persisted access flag
//! - Code verification against the memoized access code digest
//! - Revocation

use crate::config::GateConfig;
use crate::crypto::digest::{Hasher, Sha256Hasher};
use crate::crypto::secret::SecretDigest;
use crate::routes::{GateView, Page};
use crate::state::{AccessCodeState, GateStatus, VerifyOutcome};
use crate::storage::file::FileStore;
use crate::storage::{FlagStore, PersistedFlag};
use crate::GateError;
use std::sync::Arc;
use tokio::sync::{watch, OnceCell};
use tracing::{debug, error, info, warn};

/// Access gate in front of the protected application.
///
/// Create one instance per process and share it; all methods take `&self`.
pub struct AccessGate {
    config: GateConfig,
    hasher: Arc<dyn Hasher>,
    secret: SecretDigest,
    flag: PersistedFlag,
    state: watch::Sender<AccessCodeState>,
    startup: OnceCell<()>,
}

impl AccessGate {
    /// Create a gate backed by SHA-256 and durable file storage under the
    /// configured namespace.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The storage directory cannot be created
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        let store = FileStore::new(config.storage_namespace)?;
        Self::from_parts(config, Arc::new(Sha256Hasher), Arc::new(store))
    }

    /// Create a gate from explicit collaborators.
    pub fn from_parts(
        config: GateConfig,
        hasher: Arc<dyn Hasher>,
        store: Arc<dyn FlagStore>,
    ) -> Result<Self, GateError> {
        config.validate()?;
        let (state, _) = watch::channel(AccessCodeState::default());

        Ok(Self {
            secret: SecretDigest::new(config.access_code),
            flag: PersistedFlag::new(config.access_key, store),
            config,
            hasher,
            state,
            startup: OnceCell::new(),
        })
    }

    /// Run the startup flag check.
    ///
    /// The check runs once per gate; later or concurrent calls wait for that
    /// same check. `is_loading` is false once this returns.
    pub async fn initialize(&self) {
        self.startup
            .get_or_init(|| self.check_persisted_access())
            .await;
    }

    async fn check_persisted_access(&self) {
        tokio::time::sleep(self.config.startup_delay).await;

        let granted = match self.flag.is_granted() {
            Ok(granted) => granted,
            Err(e) => {
                // Fail closed.
                error!(app = self.config.app_name, error = %e, "access flag check failed");
                false
            }
        };
        debug!(app = self.config.app_name, granted, "access flag checked");

        self.state.send_modify(|state| {
            if granted {
                state.has_access = true;
            }
            state.is_loading = false;
        });
    }

    /// Verify a candidate access code.
    ///
    /// Always resolves to an outcome; failures are reported through
    /// `VerifyOutcome::error` with a localized message. Overlapping calls are
    /// neither queued nor cancelled.
    pub async fn verify_code(&self, candidate: &str) -> VerifyOutcome {
        tokio::time::sleep(self.config.verify_delay).await;

        match self.check_code(candidate) {
            Ok(()) => {
                info!(app = self.config.app_name, "access granted");
                VerifyOutcome::granted()
            }
            Err(GateError::InvalidCode) => {
                warn!(app = self.config.app_name, "invalid access code");
                VerifyOutcome::denied(self.config.messages.invalid_code)
            }
            Err(e) => {
                error!(app = self.config.app_name, error = %e, "access code verification failed");
                VerifyOutcome::denied(e.user_message(&self.config.messages))
            }
        }
    }

    fn check_code(&self, candidate: &str) -> Result<(), GateError> {
        let input = self.hasher.hash(candidate)?;
        let expected = self.secret.get_or_compute(self.hasher.as_ref())?;

        // Plain string equality, not constant time.
        if input != *expected {
            return Err(GateError::InvalidCode);
        }

        self.flag.grant().map_err(|e| {
            GateError::VerificationEnvironment(format!("failed to record access: {}", e))
        })?;
        self.state.send_modify(|state| state.has_access = true);
        Ok(())
    }

    /// Revoke access and forget the persisted flag.
    ///
    /// Storage removal is best effort; the in-memory state is always locked
    /// afterwards.
    pub fn revoke_access(&self) {
        if let Err(e) = self.flag.clear() {
            warn!(app = self.config.app_name, error = %e, "failed to remove access flag");
        }

        let revoked = self.state.send_if_modified(|state| {
            let had_access = state.has_access;
            state.has_access = false;
            had_access
        });
        if revoked {
            info!(app = self.config.app_name, "access revoked");
        }
    }

    /// Current access state.
    pub fn state(&self) -> AccessCodeState {
        *self.state.borrow()
    }

    /// Whether the protected tree may be shown.
    pub fn has_access(&self) -> bool {
        self.state().has_access
    }

    /// Whether the startup check is still pending.
    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Current state machine position.
    pub fn status(&self) -> GateStatus {
        self.state().status()
    }

    /// Watch state changes (for re-rendering).
    pub fn subscribe(&self) -> watch::Receiver<AccessCodeState> {
        self.state.subscribe()
    }

    /// What to render for `path` in the current state.
    pub fn view(&self, path: &str) -> GateView {
        match self.status() {
            GateStatus::Loading => GateView::Waiting,
            GateStatus::Locked => GateView::CodeEntry,
            GateStatus::Unlocked => GateView::Protected(Page::resolve(path)),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("app_name", &self.config.app_name)
            .field("state", &self.state())
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROGRESSVAULT_ACCESS_CODE;
    use crate::storage::memory::MemoryStore;
    use crate::testing::{CountingHasher, FailingStore, UnavailableHasher};
    use std::time::Duration;
    use tokio::time::Instant;

    const KEY: &str = "progressvault_access_granted";

    fn gate_over(store: Arc<dyn FlagStore>) -> AccessGate {
        AccessGate::from_parts(GateConfig::progressvault(), Arc::new(Sha256Hasher), store).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GateConfig {
            access_key: "",
            ..GateConfig::progressvault()
        };
        let result =
            AccessGate::from_parts(config, Arc::new(Sha256Hasher), Arc::new(MemoryStore::new()));
        assert!(matches!(result, Err(GateError::ConfigError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_loading() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        assert!(gate.is_loading());
        assert!(!gate.has_access());
        assert_eq!(gate.view("/"), GateView::Waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_storage_locks_after_delay() {
        let gate = gate_over(Arc::new(MemoryStore::new()));

        let start = Instant::now();
        gate.initialize().await;

        assert!(start.elapsed() >= Duration::from_millis(200));
        assert!(!gate.is_loading());
        assert!(!gate.has_access());
        assert_eq!(gate.status(), GateStatus::Locked);
        assert_eq!(gate.view("/guida"), GateView::CodeEntry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_persisted_flag_unlocks_without_hashing() {
        let hasher = Arc::new(CountingHasher::new());
        let gate = AccessGate::from_parts(
            GateConfig::progressvault(),
            hasher.clone(),
            Arc::new(MemoryStore::with_entry(KEY, "true")),
        )
        .unwrap();

        gate.initialize().await;

        assert!(gate.has_access());
        assert!(!gate.is_loading());
        assert_eq!(hasher.calls(), 0);
        assert_eq!(gate.view("/guida"), GateView::Protected(Page::Guide));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_sentinel_flag_stays_locked() {
        let gate = gate_over(Arc::new(MemoryStore::with_entry(KEY, "yes")));
        gate.initialize().await;
        assert_eq!(gate.status(), GateStatus::Locked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_read_failure_fails_closed() {
        let gate = gate_over(Arc::new(FailingStore::broken()));
        gate.initialize().await;
        assert!(!gate.is_loading());
        assert!(!gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_runs_once() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());

        let start = Instant::now();
        tokio::join!(gate.initialize(), gate.initialize());
        assert!(start.elapsed() < Duration::from_millis(400));

        // A flag written after startup is not re-read.
        store.set(KEY, "true").unwrap();
        gate.initialize().await;
        assert!(!gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_code_rejected() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());
        gate.initialize().await;

        let start = Instant::now();
        let outcome = gate.verify_code("wrong").await;

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(outcome, VerifyOutcome::denied("Codice non valido"));
        assert!(!gate.has_access());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_code_grants_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());
        gate.initialize().await;

        let outcome = gate.verify_code(PROGRESSVAULT_ACCESS_CODE).await;

        assert_eq!(outcome, VerifyOutcome::granted());
        assert!(gate.has_access());
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(gate.view("/auth"), GateView::Protected(Page::Auth));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_after_grant() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());
        gate.initialize().await;
        assert!(gate.verify_code(PROGRESSVAULT_ACCESS_CODE).await.success);

        gate.revoke_access();

        assert!(!gate.has_access());
        assert_eq!(store.get(KEY).unwrap(), None);
        assert_eq!(gate.view("/"), GateView::CodeEntry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_when_locked_is_noop() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        gate.initialize().await;
        let rx = gate.subscribe();
        let before = gate.state();

        gate.revoke_access();

        assert_eq!(gate.state(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_survives_storage_failure() {
        let gate = AccessGate::from_parts(
            GateConfig::progressvault(),
            Arc::new(Sha256Hasher),
            Arc::new(FailingStore::broken()),
        )
        .unwrap();
        gate.state.send_modify(|s| s.has_access = true);

        gate.revoke_access();
        assert!(!gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_candidates_rejected() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        gate.initialize().await;

        let long = "x".repeat(1 << 20);
        for candidate in ["", long.as_str()] {
            let outcome = gate.verify_code(candidate).await;
            assert!(!outcome.success);
            assert_eq!(outcome.error, Some("Codice non valido"));
        }
        assert!(!gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_primitive_reports_generic_error() {
        let store = Arc::new(MemoryStore::new());
        let gate = AccessGate::from_parts(
            GateConfig::progressvault(),
            Arc::new(UnavailableHasher),
            store.clone(),
        )
        .unwrap();
        gate.initialize().await;

        let outcome = gate.verify_code(PROGRESSVAULT_ACCESS_CODE).await;

        assert_eq!(outcome, VerifyOutcome::denied("Errore durante la verifica"));
        assert!(!gate.has_access());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_grant_write_failure_reports_generic_error() {
        let gate = gate_over(Arc::new(FailingStore::read_only()));
        gate.initialize().await;

        let outcome = gate.verify_code(PROGRESSVAULT_ACCESS_CODE).await;

        assert_eq!(outcome.error, Some("Errore durante la verifica"));
        assert!(!gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_secret_digest_computed_once() {
        let hasher = Arc::new(CountingHasher::new());
        let gate = AccessGate::from_parts(
            GateConfig::progressvault(),
            hasher.clone(),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();
        gate.initialize().await;

        gate.verify_code("a").await;
        gate.verify_code("b").await;

        // One hash per candidate plus one for the access code.
        assert_eq!(hasher.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_verifications_run_independently() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        gate.initialize().await;

        let (good, bad) = tokio::join!(
            gate.verify_code(PROGRESSVAULT_ACCESS_CODE),
            gate.verify_code("wrong")
        );

        assert!(good.success);
        assert!(!bad.success);
        assert!(gate.has_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_verifications_wrong_first() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());
        gate.initialize().await;

        let (bad, good) = tokio::join!(
            gate.verify_code("wrong"),
            gate.verify_code(PROGRESSVAULT_ACCESS_CODE)
        );

        assert_eq!(bad, VerifyOutcome::denied("Codice non valido"));
        assert_eq!(good, VerifyOutcome::granted());
        assert!(gate.has_access());
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("true"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_success_overrides_earlier_revoke() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate_over(store.clone());
        gate.initialize().await;

        // The revoke lands while the verification is still in its delay.
        let (outcome, ()) = tokio::join!(gate.verify_code(PROGRESSVAULT_ACCESS_CODE), async {
            gate.revoke_access();
        });

        assert!(outcome.success);
        assert!(gate.has_access());
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("true"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_unlock() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        let mut rx = gate.subscribe();

        gate.initialize().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status(), GateStatus::Locked);

        gate.verify_code(PROGRESSVAULT_ACCESS_CODE).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status(), GateStatus::Unlocked);
    }

    #[test]
    fn test_config_accessor() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        assert_eq!(gate.config().app_name, "progressvault");
    }

    #[test]
    fn test_debug_hides_access_code() {
        let gate = gate_over(Arc::new(MemoryStore::new()));
        let rendered = format!("{:?}", gate);
        assert!(!rendered.contains(PROGRESSVAULT_ACCESS_CODE));
    }
}
