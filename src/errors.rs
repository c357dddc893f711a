//! Access gate error types.

use crate::config::GateMessages;
use thiserror::Error;

/// Errors that can occur while checking or granting access.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Candidate digest does not match the access code digest.
    #[error("Invalid access code")]
    InvalidCode,

    /// The hash primitive cannot run in this environment.
    #[error("Hash primitive unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// Any other failure while hashing, comparing or recording a grant.
    #[error("Verification failed: {0}")]
    VerificationEnvironment(String),

    /// Reading persisted storage failed.
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Writing or removing persisted storage failed.
    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl GateError {
    /// Localized text shown to the person entering the code.
    ///
    /// Only a wrong code gets its own message; every other failure is
    /// reported with the generic verification error.
    pub fn user_message(&self, messages: &GateMessages) -> &'static str {
        match self {
            GateError::InvalidCode => messages.invalid_code,
            _ => messages.verification_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_code_has_specific_message() {
        let messages = GateMessages::default();
        assert_eq!(
            GateError::InvalidCode.user_message(&messages),
            "Codice non valido"
        );
    }

    #[test]
    fn other_failures_share_generic_message() {
        let messages = GateMessages::default();
        for err in [
            GateError::EnvironmentUnavailable("no sha".into()),
            GateError::VerificationEnvironment("boom".into()),
            GateError::StorageWrite("disk full".into()),
        ] {
            assert_eq!(err.user_message(&messages), "Errore durante la verifica");
        }
    }
}
