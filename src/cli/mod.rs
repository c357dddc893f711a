//! Command-line front end.

pub mod actions;
pub mod commands;
pub mod dispatch;

use crate::config::GateConfig;
use crate::crypto::digest::Sha256Hasher;
use crate::gate::AccessGate;
use crate::storage::file::FileStore;
use actions::Action;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Parsed invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Action to run.
    pub action: Action,
    /// Storage directory override.
    pub data_dir: Option<PathBuf>,
}

/// Parse arguments, install logging and resolve the action.
pub fn start() -> Result<Invocation> {
    let matches = commands::new().get_matches();

    let verbosity_level = match matches.get_one::<u8>("verbosity").map_or(0, |&v| v) {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Invocation {
        action: dispatch::handler(&matches)?,
        data_dir: matches.get_one::<PathBuf>("data-dir").cloned(),
    })
}

/// Build the production gate, optionally over an explicit storage directory.
pub fn build_gate(data_dir: Option<PathBuf>) -> Result<AccessGate> {
    let config = GateConfig::progressvault();
    let gate = match data_dir {
        Some(dir) => {
            AccessGate::from_parts(config, Arc::new(Sha256Hasher), Arc::new(FileStore::at(dir)?))?
        }
        None => AccessGate::new(config)?,
    };
    Ok(gate)
}
