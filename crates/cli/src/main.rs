// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw - bash script wizard CLI

mod commands;
mod config;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{artifacts, generate, init, parse, validate};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "bw",
    version,
    about = "Generate and recover parameter-parsing bash scripts"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a script from a JSON document
    Generate(generate::GenerateArgs),
    /// Recover the JSON document from a generated script
    Parse(parse::ParseArgs),
    /// Check a script or JSON document for consistency errors
    Validate(validate::ValidateArgs),
    /// Print the bashdb launch configuration for a script
    DebugConfig(artifacts::ArtifactArgs),
    /// Print the input-values JSON for a script
    InputJson(artifacts::ArtifactArgs),
    /// Start a new script with built-in parameters
    Init(init::InitArgs),
}

fn main() {
    setup_logging();
    if let Err(e) = run() {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(env::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// When the top-level message already contains every cause, the "Caused by"
/// chain is skipped.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        // No subcommand: print help and exit 0
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Generate(args) => generate::handle(args, format),
        Commands::Parse(args) => parse::handle(args, format),
        Commands::Validate(args) => validate::handle(args, format),
        Commands::DebugConfig(args) => artifacts::debug_config(args, format),
        Commands::InputJson(args) => artifacts::input_json(args, format),
        Commands::Init(args) => init::handle(args, format),
    }
}

#[cfg(test)]
fn cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
