// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the grit binary.
//!
//! The CLI exposes subcommands for serving the boundary HTTP endpoint and for
//! invoking the fetch and summarization pipeline directly from a terminal.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use grit::{
    AppConfig, Error, RepositoriesResponse, build_client, fetch_repositories, load_config,
    run_server, summarize, validate_username,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command line interface for fetching and summarizing repository timelines.
#[derive(Debug, Parser,)]
#[command(name = "grit", version, about = "Fetch and summarize GitHub repository timelines")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Run the boundary HTTP server.
    Serve(ServeArgs,),
    /// Fetch the normalized repository list for an account.
    Fetch(FetchArgs,),
    /// Fetch repositories and print per-year creation statistics.
    Summarize(SummarizeArgs,),
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `serve` subcommand.
struct ServeArgs
{
    /// Path to the YAML configuration file. Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Personal token attached to outbound GitHub API calls.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,
}

#[derive(Debug, Args,)]
/// Arguments shared by the `fetch` and `summarize` subcommands.
struct FetchArgs
{
    /// GitHub account identifier to fetch repositories for.
    #[arg(long = "username", value_name = "NAME")]
    username: String,

    /// Path to the YAML configuration file. Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// Personal token attached to outbound GitHub API calls.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `summarize` subcommand.
struct SummarizeArgs
{
    #[command(flatten)]
    fetch: FetchArgs,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[actix_web::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "grit=info".into(),),)
        .with(tracing_subscriber::fmt::layer(),)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading, validation, and
/// the fetch pipeline.
async fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args,) => run_serve(args,).await,
        Command::Fetch(args,) => run_fetch(args,).await,
        Command::Summarize(args,) => run_summarize(args,).await,
    }
}

/// Resolves the effective configuration for a subcommand invocation.
///
/// A token supplied on the command line or through the environment overrides
/// the configuration file value.
fn resolve_config(path: Option<&PathBuf,>, token: Option<String,>,) -> Result<AppConfig, Error,>
{
    let mut config = match path {
        Some(path,) => load_config(path,)?,
        None => AppConfig::default(),
    };

    if token.is_some() {
        config.github_token = token;
    }

    Ok(config,)
}

async fn run_serve(args: ServeArgs,) -> Result<(), Error,>
{
    let config = resolve_config(args.config.as_ref(), args.token,)?;
    run_server(config,).await
}

async fn run_fetch(args: FetchArgs,) -> Result<(), Error,>
{
    let response = fetch_response(&args,).await?;
    write_json(&response, args.pretty,)
}

async fn run_summarize(args: SummarizeArgs,) -> Result<(), Error,>
{
    let response = fetch_response(&args.fetch,).await?;
    let summary = summarize(&response.repositories,);
    write_json(&summary, args.fetch.pretty,)
}

/// Validates the identifier, fetches, and normalizes in one pass.
async fn fetch_response(args: &FetchArgs,) -> Result<RepositoriesResponse, Error,>
{
    let config = resolve_config(args.config.as_ref(), args.token.clone(),)?;
    let username = validate_username(&args.username,)?;
    let octocrab = build_client(&config,)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
            .expect("valid template",),
    );
    pb.set_message(format!("Fetching repositories for {username}..."),);

    let result = fetch_repositories(&octocrab, &username, config.call_timeout(),).await;
    pb.finish_and_clear();

    let repositories = result?;
    Ok(RepositoriesResponse {
        repositories,
    },)
}

fn write_json<T: Serialize,>(value: &T, pretty: bool,) -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if pretty {
        serde_json::to_writer_pretty(&mut handle, value,)?;
    } else {
        serde_json::to_writer(&mut handle, value,)?;
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use clap::Parser;

    use super::{Cli, Command, resolve_config};

    #[test]
    fn cli_parses_serve_with_config_path()
    {
        let cli = Cli::try_parse_from(["grit", "serve", "--config", "config.yaml",],)
            .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Serve(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("config.yaml")));
    }

    #[test]
    fn cli_parses_fetch_with_pretty_flag()
    {
        let cli = Cli::try_parse_from(["grit", "fetch", "--username", "octocat", "--pretty",],)
            .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Fetch(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        assert_eq!(args.username, "octocat");
        assert!(args.pretty);
    }

    #[test]
    fn cli_requires_username_for_summarize()
    {
        let result = Cli::try_parse_from(["grit", "summarize",],);
        assert!(result.is_err());
    }

    #[test]
    fn cli_token_overrides_configuration()
    {
        let config = resolve_config(None, Some("ghp_override".to_owned(),),)
            .expect("expected configuration",);
        assert_eq!(config.github_token.as_deref(), Some("ghp_override"));
    }

    #[test]
    fn missing_config_path_falls_back_to_defaults()
    {
        let config = resolve_config(None, None,).expect("expected configuration",);
        assert_eq!(config, grit::AppConfig::default());
    }
}
