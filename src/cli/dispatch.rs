//! Map parsed arguments to an [`Action`].

use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};

/// Turn matches into the action to run.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("status", _)) => Ok(Action::Status),
        Some(("unlock", sub_m)) => Ok(Action::Unlock {
            code: sub_m
                .get_one::<String>("code")
                .cloned()
                .context("missing required argument: CODE")?,
        }),
        Some(("revoke", _)) => Ok(Action::Revoke),
        Some(("open", sub_m)) => Ok(Action::Open {
            path: sub_m
                .get_one::<String>("path")
                .cloned()
                .unwrap_or_else(|| "/".to_string()),
        }),
        Some((other, _)) => Err(anyhow!("unknown command: {}", other)),
        None => Err(anyhow!("no command given")),
    }
}
