//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── service: ServiceConfig   # Object store credentials, default buckets
//! ├── log_format: LogFormat    # Human-readable or JSON logs
//! └── command: Command         # preview | asset | thumbnail | exists
//! ```
//!
//! All service options can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod command;

use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lectern_server::service::ServiceConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "lectern")]
#[command(about = "Fetch and transform assets stored in an S3-compatible bucket")]
#[command(version)]
pub struct Cli {
    /// Object store credentials and default buckets.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Log output format.
    #[arg(long, env = "LECTERN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap picks its values up as
    /// environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr, stdout is reserved for response bodies.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        match self.log_format {
            LogFormat::Text => registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init(),
        }
    }

    /// Validates all configuration values before any request is made.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.service
            .credentials()
            .validate()
            .context("invalid object store configuration")?;
        Ok(())
    }

    /// Logs configuration (no secrets).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            command = self.command.name(),
            account_id = self.service.account_id.as_deref(),
            endpoint = self.service.endpoint.as_deref(),
            region = %self.service.region,
            documents_bucket = %self.service.documents_bucket,
            assets_bucket = %self.service.assets_bucket,
            thumbnails_bucket = %self.service.thumbnails_bucket,
            "Object store configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preview_subcommand() {
        let cli = Cli::try_parse_from([
            "lectern",
            "--account-id",
            "abc",
            "preview",
            "lesson1.pdf",
            "--pages",
            "2",
            "-o",
            "out.pdf",
        ])
        .unwrap();

        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.key, "lesson1.pdf");
        assert_eq!(args.pages, Some(2));
        assert_eq!(args.output.output.as_deref(), Some(std::path::Path::new("out.pdf")));
        assert_eq!(cli.service.account_id.as_deref(), Some("abc"));
    }

    #[test]
    fn parses_thumbnail_subcommand() {
        let cli =
            Cli::try_parse_from(["lectern", "thumbnail", "--file", "worksheet.pdf"]).unwrap();
        let Command::Thumbnail(args) = cli.command else {
            panic!("expected thumbnail");
        };
        assert_eq!(args.key, None);
        assert_eq!(args.file.as_deref(), Some("worksheet.pdf"));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn incomplete_credentials_fail_validation() {
        let mut cli = Cli::try_parse_from(["lectern", "exists", "cover.png"]).unwrap();
        cli.service.account_id = None;
        cli.service.endpoint = None;
        assert!(cli.validate().is_err());
    }
}
