//! Gate configuration.

use std::time::Duration;

/// Access code guarding the ProgressVault application.
///
/// Only its digest is ever compared or kept around; the plaintext is never
/// written to storage.
pub const PROGRESSVAULT_ACCESS_CODE: &str =
    "gT6@Qp!R1Z$uN9e#X^cD2sL%hY&vJm*W+K7B~A=F4q-Uo_rP)k8S]3C0{I?E";

/// Storage key holding the persisted access flag.
pub const ACCESS_KEY: &str = "progressvault_access_granted";

/// Localized messages returned by a failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateMessages {
    /// Shown when the code does not match.
    pub invalid_code: &'static str,

    /// Shown for any other verification failure.
    pub verification_error: &'static str,
}

impl Default for GateMessages {
    fn default() -> Self {
        Self {
            invalid_code: "Codice non valido",
            verification_error: "Errore durante la verifica",
        }
    }
}

/// Configuration for an access gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Application name (used in log output).
    pub app_name: &'static str,

    /// Namespace for durable storage under the platform data directory.
    pub storage_namespace: &'static str,

    /// Key of the persisted access flag.
    pub access_key: &'static str,

    /// The shared access code.
    /// SECURITY: hard-code this in the binary, never read it from the environment.
    pub access_code: &'static str,

    /// Pause before the startup flag check resolves.
    /// Cosmetic only: avoids a flash of the code-entry screen.
    pub startup_delay: Duration,

    /// Pause before a candidate is compared.
    /// Cosmetic only: this is not attempt throttling.
    pub verify_delay: Duration,

    /// Messages returned to the code-entry surface.
    pub messages: GateMessages,
}

impl GateConfig {
    /// Production configuration for ProgressVault.
    pub fn progressvault() -> Self {
        Self {
            app_name: "progressvault",
            storage_namespace: "progressvault",
            access_key: ACCESS_KEY,
            access_code: PROGRESSVAULT_ACCESS_CODE,
            startup_delay: Duration::from_millis(200),
            verify_delay: Duration::from_millis(500),
            messages: GateMessages::default(),
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::GateError> {
        if self.access_key.is_empty() {
            return Err(crate::GateError::ConfigError(
                "access_key cannot be empty".to_string(),
            ));
        }
        if self.storage_namespace.is_empty() {
            return Err(crate::GateError::ConfigError(
                "storage_namespace cannot be empty".to_string(),
            ));
        }
        if self.access_code.is_empty() {
            return Err(crate::GateError::ConfigError(
                "access_code cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::progressvault()
    }
}
