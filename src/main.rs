use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --quiet / --verbose pick the level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let results = match cli.to_builder().run() {
        Ok(results) => results,
        Err(e) => {
            // Configuration errors are reported even with --quiet.
            match std::error::Error::source(&e) {
                Some(cause) => eprintln!("Error: {e}: {cause}"),
                None => eprintln!("Error: {e}"),
            }
            return ExitCode::FAILURE;
        }
    };

    if let Some(err) = &results.root_error {
        warn!(path = %cli.path.display(), error = %err, "nothing scanned");
    }
    if !results.errors.is_empty() {
        debug!(skipped = results.errors.len(), "some entries could not be scanned");
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in &results.paths {
        // Reader went away (e.g. `| head`); stop quietly.
        if writeln!(out, "{}", path.display()).is_err() {
            return ExitCode::SUCCESS;
        }
    }
    let _ = out.flush();

    ExitCode::SUCCESS
}
