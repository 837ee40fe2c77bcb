mod cli;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tickboard_core::{Dashboard, InputContext, PolygonProvider, ProviderConfig};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{outcome_exit_code, CliError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format)?;

    let config = ProviderConfig::default()
        .with_base_url(cli.base_url.as_str())
        .with_timeout_ms(cli.timeout_ms);
    debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "provider configured");

    let dashboard = Dashboard::new(PolygonProvider::new(config));
    let inputs = InputContext::new(cli.command.symbol(), cli.api_key.as_str());
    let report = dashboard.run(cli.command.action(), &inputs).await;

    output::render(&report, cli.format, cli.pretty)?;
    Ok(ExitCode::from(outcome_exit_code(&report.outcome)))
}
