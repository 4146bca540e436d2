//
//  confluence-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands: reading and writing the non-secret settings in
//! `config.toml`. Secrets go through `cfl auth login` instead.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::Config;

use super::GlobalOptions;

/// Keys that can be read and written.
const VALID_KEYS: &[&str] = &["url", "username", "default_space", "expand"];

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if !VALID_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            VALID_KEYS.join(", ")
        );
    }
    Ok(())
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;
    let value = Config::load()?.get(&args.key);

    if global.json {
        let result = serde_json::json!({
            "key": args.key,
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;

    let mut config = Config::load()?;
    config.set(&args.key, args.value.clone());
    config.save()?;

    if global.json {
        let result = serde_json::json!({
            "success": true,
            "key": args.key,
            "value": args.value,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Set {} = {}",
            style("✓").green(),
            style(&args.key).cyan(),
            args.value
        );
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        let values: serde_json::Map<String, serde_json::Value> = VALID_KEYS
            .iter()
            .map(|key| (key.to_string(), serde_json::json!(config.get(key))))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    for key in VALID_KEYS {
        if let Some(value) = config.get(key) {
            println!("{}={}", style(key).cyan(), value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("default_space").is_ok());
        let err = check_key("password").unwrap_err().to_string();
        assert!(err.contains("Valid keys: url, username, default_space, expand"));
    }
}
