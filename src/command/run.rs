//! Orchestrator for a single action run.
use log::*;

use crate::{
    changeset,
    cli,
    config::ActionConfig,
    error::ActionError,
    exec,
    forge::config::Remote,
    outputs::RunOutputs,
    repo::GitCli,
    result::Result,
    setup,
    tool::NpxChangesetCli,
    command::{publish, version},
};

/// Execute one run end to end and emit the CI outputs for its terminal
/// state.
pub async fn execute(args: &cli::Args) -> Result<()> {
    let remote = args.get_remote()?;
    let config =
        ActionConfig::from_args(args, remote.config().token.clone())?;

    let outputs = run(&config, &remote).await?;
    outputs.emit()?;

    Ok(())
}

/// Linear pipeline: check changeset state, validate remaining inputs, write
/// credentials, version, optionally prepare, publish. Required inputs are
/// validated before any filesystem or git mutation; reading changeset state
/// is the only step allowed to run before that.
async fn run(config: &ActionConfig, remote: &Remote) -> Result<RunOutputs> {
    let state = changeset::read_changeset_state(config.cwd()).await?;

    if !state.has_changesets() {
        info!("no changesets found");
        return Ok(RunOutputs::unpublished(false));
    }

    info!("found {} pending changesets", state.changesets.len());

    // tag is required once changesets exist: validate before mutating
    config.require_tag()?;

    setup::configure_environment(config).await?;

    let forge = remote.get_forge()?;
    let tool = NpxChangesetCli::new(config.cwd.clone());
    let git = GitCli::new(config.cwd.clone());

    let outcome =
        version::execute(config, forge.as_ref(), &tool, &git).await?;

    if let Some(script) = &config.prepare_script {
        run_prepare_script(script, config).await?;
    }

    let result = publish::execute(
        config,
        forge.as_ref(),
        &tool,
        &git,
        &outcome.snapshot,
    )
    .await?;

    info!(
        "publish result: published={}, packages={}",
        result.published,
        result.published_packages.len()
    );

    RunOutputs::from_publish_result(&result)
}

/// Run the user-supplied prepare command, failing the whole run on a
/// non-zero exit.
async fn run_prepare_script(
    script: &str,
    config: &ActionConfig,
) -> Result<()> {
    info!("running prepare script: {script}");

    let (program, args) = exec::split_command(script)?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output =
        exec::exec_with_output(&program, &args, config.cwd()).await?;

    if !output.success() {
        error!(
            "prepare script failed: code={}, stderr={}, stdout={}",
            output.code, output.stderr, output.stdout
        );
        return Err(ActionError::CommandFailed {
            program,
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        }
        .into());
    }

    info!("{}", output.stdout);

    Ok(())
}
