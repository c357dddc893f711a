//! Actions run against an initialized gate.

use crate::gate::AccessGate;
use anyhow::Result;
use std::io::Write;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print `locked` or `unlocked`.
    Status,
    /// Verify a code.
    Unlock {
        /// Candidate access code.
        code: String,
    },
    /// Revoke access.
    Revoke,
    /// Print the render decision for a path.
    Open {
        /// Application path.
        path: String,
    },
}

/// Handle an action.
///
/// Returns `false` when the action was refused (wrong code), which the
/// binary turns into a failing exit status. Denial messages go to `err`.
pub async fn handle<O: Write, E: Write>(
    action: Action,
    gate: &AccessGate,
    out: &mut O,
    err: &mut E,
) -> Result<bool> {
    gate.initialize().await;

    match action {
        Action::Status => {
            writeln!(out, "{}", gate.status())?;
        }
        Action::Unlock { code } => {
            if gate.has_access() {
                writeln!(out, "already unlocked")?;
                return Ok(true);
            }

            let outcome = gate.verify_code(&code).await;
            if let Some(message) = outcome.error {
                writeln!(err, "{}", message)?;
                return Ok(false);
            }
            writeln!(out, "{}", gate.status())?;
        }
        Action::Revoke => {
            gate.revoke_access();
            writeln!(out, "{}", gate.status())?;
        }
        Action::Open { path } => {
            writeln!(out, "{}", gate.view(&path))?;
        }
    }

    Ok(true)
}
