use clap::Parser;
use spindle_engine::ExitOutcome;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod prompt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let outcome = match run().await {
        Ok(outcome) => outcome,
        Err(error) => ExitOutcome::Failure(format!("{error:#}")),
    };
    match &outcome {
        ExitOutcome::Success => {}
        ExitOutcome::UserAborted => eprintln!("git-bucket: aborted"),
        ExitOutcome::Failure(reason) => eprintln!("git-bucket error: {reason}"),
    }
    std::process::exit(outcome.exit_code());
}

async fn run() -> anyhow::Result<ExitOutcome> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    commands::dispatch(cli.command, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SPINDLE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
