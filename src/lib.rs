//! # ProgressVault gate
//!
//! **Shared access-code gate in front of the ProgressVault application.**
//!
//! Before anything else renders, the gate decides whether this installation
//! already entered the access code. If not, the caller shows a code-entry
//! screen and hands the candidate to [`AccessGate::verify_code`]. A correct
//! code is remembered in durable storage until [`AccessGate::revoke_access`].
//!
//! ## Features
//!
//! - **SHA-256 comparison** - only digests are compared; the code is never stored
//! - **Persisted flag** - `progressvault_access_granted = "true"` survives restarts
//! - **Fail-closed** - storage or hashing failures never unlock the gate
//! - **Render contract** - [`AccessGate::view`] maps state and path to what to show
//!
//! ## Quickstart
//!
//! ```no_run
//! use progressvault_gate::{AccessGate, GateConfig, GateView};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), progressvault_gate::GateError> {
//!     let gate = AccessGate::new(GateConfig::progressvault())?;
//!     gate.initialize().await;
//!
//!     if gate.view("/") == GateView::CodeEntry {
//!         let outcome = gate.verify_code("candidate").await;
//!         if let Some(message) = outcome.error {
//!             eprintln!("{}", message);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! This is a single shared passphrase, not an authentication system. The
//! digest comparison is not constant time, the delays are cosmetic and do
//! not throttle guesses, and anyone who can write the storage file can set
//! the flag themselves.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;
pub mod state;

// Crypto layer
pub mod crypto;

// Storage layer
pub mod storage;

// Routing contract
pub mod routes;

// Gate (main public API)
pub mod gate;

// Command-line front end
pub mod cli;

#[cfg(any(test, feature = "test-seams"))]
pub mod testing;

// Re-exports for public API
pub use config::{GateConfig, GateMessages};
pub use crypto::digest::{Digest, Hasher, Sha256Hasher};
pub use errors::GateError;
pub use gate::AccessGate;
pub use routes::{GateView, Page};
pub use state::{AccessCodeState, GateStatus, VerifyOutcome};
pub use storage::{file::FileStore, memory::MemoryStore, FlagStore, PersistedFlag};
