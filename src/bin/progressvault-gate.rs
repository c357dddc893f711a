use anyhow::Result;
use progressvault_gate::cli::{actions, build_gate, start};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let invocation = start()?;
    let gate = build_gate(invocation.data_dir)?;

    let ok = actions::handle(
        invocation.action,
        &gate,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
