//
//  confluence-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confluence_client::api::{ApiError, ClientErrorKind};
use confluence_client::cli::{Cli, Commands};
use confluence_client::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("CFL_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps a failure to one of the documented exit codes.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Construction(_)) => exit_codes::USAGE,
        Some(ApiError::Client { kind, .. }) => match kind {
            ClientErrorKind::Unauthorized | ClientErrorKind::Forbidden => exit_codes::AUTH_ERROR,
            ClientErrorKind::NotFound => exit_codes::NOT_FOUND,
            ClientErrorKind::TooManyRequests => exit_codes::RATE_LIMIT,
            _ => exit_codes::ERROR,
        },
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Get(args) => args.run(&cli.global).await,
        Commands::Find(args) => args.run(&cli.global).await,
        Commands::Children(args) => args.run(&cli.global, false).await,
        Commands::Descendants(args) => args.run(&cli.global, true).await,
        Commands::History(args) => args.run(&cli.global).await,
        Commands::Convert(args) => args.run(&cli.global).await,
        Commands::Delete(args) => args.run(&cli.global).await,
        Commands::Attachments(args) => args.run(&cli.global).await,
        Commands::Attach(args) => args.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("cfl version {}", confluence_client::VERSION);
            Ok(())
        }
    }
}
