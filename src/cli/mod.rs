//
//  confluence-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command-Line Interface
//!
//! The `cfl` command tree, defined with clap's derive API.
//!
//! ## Command Structure
//!
//! ```text
//! cfl
//! ├── get <id> [--version N]
//! ├── find [--title] [--space] [--type] [--limit] [--start]
//! ├── children <id> [--type]
//! ├── descendants <id> [--type]
//! ├── history <id>
//! ├── convert <file|-> --to <repr> [--context <id>]
//! ├── delete <id>
//! ├── attachments <id>
//! ├── attach <id> <file>
//! ├── auth (login, logout, status)
//! ├── config (get, set, path)
//! └── version
//! ```
//!
//! ## Global Options
//!
//! - `--url`: Confluence instance URL
//! - `--user`: Username for Basic authentication
//! - `--token`: Bearer token
//! - `--json`: JSON output instead of tables

mod auth;
mod config;
mod content;

pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use content::{
    AttachArgs, AttachmentsArgs, ConvertArgs, DeleteArgs, FindArgs, GetArgs, HistoryArgs,
    RelationArgs,
};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};
use crate::ConfluenceClient;

/// Work with Confluence content from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "cfl",
    version,
    about = "Work with Confluence from the command line",
    after_help = "Use 'cfl <command> --help' for more information about a command."
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Confluence URL, e.g. https://example.atlassian.net/wiki
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Username (or email) for Basic authentication; the password comes
    /// from CONFLUENCE_PASSWORD, the config file or the keyring
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Bearer token (personal access token)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Effective configuration: file, then environment, then flags.
    pub fn config(&self) -> Result<Config> {
        Ok(self.apply(Config::load()?.with_env()))
    }

    /// Applies the flags on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.url = Some(url.clone());
        }
        if let Some(user) = &self.user {
            config.username = Some(user.clone());
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        config
    }

    /// Authenticated client for the effective configuration.
    pub fn connect(&self) -> Result<(ConfluenceClient, Config)> {
        let config = self.config()?;
        let client = config.connect()?;
        Ok((client, config))
    }

    /// Writer for the selected output format.
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a page or comment
    Get(GetArgs),

    /// Search content by title, space and type
    #[command(visible_alias = "search")]
    Find(FindArgs),

    /// List direct children of a content item
    Children(RelationArgs),

    /// List all descendants of a content item
    Descendants(RelationArgs),

    /// Show creation and update history
    History(HistoryArgs),

    /// Convert a storage-format body to another representation
    Convert(ConvertArgs),

    /// Delete a content item
    Delete(DeleteArgs),

    /// List the attachments of a content item
    Attachments(AttachmentsArgs),

    /// Upload a file as an attachment
    #[command(visible_alias = "upload")]
    Attach(AttachArgs),

    /// Manage stored credentials
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Read and write the configuration file
    Config(ConfigCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag_stays_top_level() {
        let err = Cli::try_parse_from(["cfl", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let cli = Cli::try_parse_from(["cfl", "get", "7", "--version", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Get(GetArgs {
                id: 7,
                version: Some(2)
            })
        ));
    }

    #[test]
    fn test_global_flags_anywhere() {
        let args = ["cfl", "get", "42", "--json", "--url", "example.com"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.url.as_deref(), Some("example.com"));
        assert!(matches!(cli.command, Commands::Get(GetArgs { id: 42, .. })));
    }

    #[test]
    fn test_flags_override_config() {
        let global = GlobalOptions {
            url: Some("https://flag.example.com".to_string()),
            token: Some("flag-token".to_string()),
            ..GlobalOptions::default()
        };
        let config = global.apply(Config {
            url: Some("https://file.example.com".to_string()),
            username: Some("file-user".to_string()),
            ..Config::default()
        });
        assert_eq!(config.url.as_deref(), Some("https://flag.example.com"));
        assert_eq!(config.username.as_deref(), Some("file-user"));
        assert_eq!(config.token.as_deref(), Some("flag-token"));
    }
}
