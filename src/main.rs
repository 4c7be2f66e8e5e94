// This is the primary entry point for the imgprep binary.
// The lib.rs file serves only as a public API for external consumers.

use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use imgprep::processing::{ShellTools, TerminalPrompt};
use imgprep::{Args, Pipeline, PrepError, PrepResult};

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{err}");
        if matches!(err, PrepError::Usage(_)) {
            eprintln!("{}", Args::command().render_usage());
        }
        std::process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr; stdout is reserved for the stylesheet.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(args: Args) -> PrepResult<()> {
    let config = args.resolve()?;
    let mut pipeline = Pipeline::new(ShellTools, TerminalPrompt, config);
    let report = pipeline.run().await?;
    print!("{}", report.stylesheet);
    Ok(())
}
