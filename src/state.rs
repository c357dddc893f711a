//! In-memory gate state.

use std::fmt;

/// Per-session access state observed by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessCodeState {
    /// Whether the protected tree may be shown.
    pub has_access: bool,

    /// True until the startup flag check has completed.
    pub is_loading: bool,
}

impl Default for AccessCodeState {
    fn default() -> Self {
        Self {
            has_access: false,
            is_loading: true,
        }
    }
}

impl AccessCodeState {
    /// State machine position derived from the two flags.
    pub fn status(&self) -> GateStatus {
        if self.is_loading {
            GateStatus::Loading
        } else if self.has_access {
            GateStatus::Unlocked
        } else {
            GateStatus::Locked
        }
    }
}

/// Gate state machine positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Startup check still running.
    Loading,
    /// Code entry required.
    Locked,
    /// Protected tree visible.
    Unlocked,
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateStatus::Loading => "loading",
            GateStatus::Locked => "locked",
            GateStatus::Unlocked => "unlocked",
        };
        f.write_str(s)
    }
}

/// Result of a code verification.
///
/// Every failure is folded into this shape; verification never returns an
/// error to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Whether access was granted.
    pub success: bool,

    /// Localized message when `success` is false.
    pub error: Option<&'static str>,
}

impl VerifyOutcome {
    /// A successful verification.
    pub fn granted() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed verification carrying `message`.
    pub fn denied(message: &'static str) -> Self {
        Self {
            success: false,
            error: Some(message),
        }
    }
}
