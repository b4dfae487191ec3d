#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod output;

use std::process;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use lectern_server::handler::{check_asset, fetch_asset, fetch_thumbnail, preview_document};
use lectern_server::service::ServiceState;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "lectern_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "lectern_cli::config";
pub const TRACING_TARGET_OUTPUT: &str = "lectern_cli::output";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "command terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    cli.init_tracing();
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;

    let output = cli.command.output().cloned();
    let response = dispatch(state, cli.command).await;
    let status = output::write_response(response, output.as_deref()).await?;

    if !status.is_success() {
        anyhow::bail!("request failed with status {status}");
    }

    Ok(())
}

/// Runs the handler behind `command`.
async fn dispatch(state: ServiceState, command: Command) -> Response {
    let ServiceState {
        object_client,
        buckets,
    } = state;

    match command {
        Command::Preview(args) => {
            preview_document(State(object_client), State(buckets), Query(args.into()))
                .await
                .into_response()
        }
        Command::Asset(args) => {
            fetch_asset(State(object_client), State(buckets), Query(args.into()))
                .await
                .into_response()
        }
        Command::Thumbnail(args) => {
            fetch_thumbnail(State(object_client), State(buckets), Query(args.into()))
                .await
                .into_response()
        }
        Command::Exists(args) => {
            check_asset(State(object_client), State(buckets), Query(args.into()))
                .await
                .into_response()
        }
    }
}
