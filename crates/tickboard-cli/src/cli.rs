//! CLI argument definitions for tickboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `details` | Company details and latest financial statements |
//! | `quote` | Previous trading day's OHLCV bar |
//! | `history` | Five years of daily bars with 50/200-day averages |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$POLYGON_API_KEY` | Polygon API key |
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | `https://api.polygon.io` | Provider base URL |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `-v` | warn | Log verbosity, repeatable |
//! | `--log-format` | `text` | Log line format on stderr |
//!
//! # Examples
//!
//! ```bash
//! export POLYGON_API_KEY=...
//! tickboard details AAPL
//! tickboard history MSFT --format json --pretty
//! ```

use std::fmt::{Debug, Formatter};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tickboard_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use tickboard_core::Action;

/// Default symbol offered in the input field.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Terminal financial dashboard backed by Polygon.io.
#[derive(Parser)]
#[command(
    name = "tickboard",
    author,
    version,
    about = "Terminal financial dashboard backed by Polygon.io"
)]
pub struct Cli {
    /// Polygon API key. Used for this run only and never written anywhere.
    #[arg(
        long,
        global = true,
        env = "POLYGON_API_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub api_key: String,

    /// Output format for the report.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Provider base URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Debug for Cli {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("api_key", &"<redacted>")
            .field("format", &self.format)
            .field("pretty", &self.pretty)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("verbose", &self.verbose)
            .field("log_format", &self.log_format)
            .field("command", &self.command)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections, tables and charts.
    Text,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Company details and latest financial statements.
    Details(SymbolArgs),
    /// Previous close for a symbol.
    Quote(SymbolArgs),
    /// Five-year daily history with 50/200-day moving averages.
    History(SymbolArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SymbolArgs {
    /// Ticker symbol, e.g. AAPL.
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: String,
}

impl Command {
    pub const fn action(&self) -> Action {
        match self {
            Self::Details(_) => Action::Details,
            Self::Quote(_) => Action::Quote,
            Self::History(_) => Action::History,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Details(args) | Self::Quote(args) | Self::History(args) => &args.symbol,
        }
    }
}
