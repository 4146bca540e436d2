//
//  confluence-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `cfl auth login` stores a credential for one Confluence host in the
//! system keyring and records the URL (and username, for Basic auth) in
//! the config file. With `--user` the secret is a password or API token
//! used for Basic auth; without it, a bearer token.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::{style, Term};

use crate::api::{ApiError, ClientErrorKind};
use crate::auth::{read_token_from_stdin, validate_token, AuthCredential, KeyringStore};
use crate::config::Config;
use crate::http::{DefaultUriFactory, UriFactory};
use crate::ConfluenceClient;

use super::GlobalOptions;

/// Authenticate with Confluence.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a credential for a Confluence host
    Login(LoginArgs),

    /// Remove the stored credential for a Confluence host
    Logout,

    /// View authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token or password from standard input
    #[arg(long)]
    pub with_token: bool,

    /// Store the credential without checking it against the server
    #[arg(long)]
    pub no_verify: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status => status(global),
        }
    }
}

/// Keyring key for a URL: its host name.
fn host_key(url: &str) -> Result<String> {
    Ok(DefaultUriFactory.create_uri(url)?.host().to_string())
}

fn configured_url(config: &Config) -> Result<String> {
    config
        .url
        .clone()
        .context("No Confluence URL given. Use --url or set CONFLUENCE_URL")
}

/// Reads the secret from stdin or prompts for it without echo.
fn read_secret(args: &LoginArgs, basic: bool) -> Result<String> {
    let label = if basic { "Password or API token" } else { "Personal access token" };
    let secret = if args.with_token {
        read_token_from_stdin()?
    } else {
        eprint!("{}: ", label);
        Term::stderr().read_secure_line()?.trim().to_string()
    };

    check_secret(&secret, basic, label)?;
    Ok(secret)
}

/// Bearer tokens must be a single word. Basic passwords may contain spaces.
fn check_secret(secret: &str, basic: bool, label: &str) -> Result<()> {
    let valid = if basic {
        !secret.is_empty()
    } else {
        validate_token(secret)
    };
    if !valid {
        bail!("Invalid {} format", label.to_lowercase());
    }
    Ok(())
}

/// Issues a one-result search to check the credential.
async fn verify(url: &str, credential: &AuthCredential) -> Result<()> {
    let mut client = ConfluenceClient::new(url)?;
    client.with_credential(credential)?;

    match client.content().find(&[], Some(1), None).await {
        Ok(_) => Ok(()),
        Err(ApiError::Client {
            kind: ClientErrorKind::Unauthorized | ClientErrorKind::Forbidden,
            ..
        }) => {
            bail!("Credential was rejected by {}", url)
        }
        Err(e) => Err(e).context("Could not verify credential"),
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let url = configured_url(&config)?;
    let host = host_key(&url)?;

    let credential = match global.user.as_deref().or(config.username.as_deref()) {
        Some(user) => AuthCredential::basic(user, read_secret(args, true)?),
        None => match &global.token {
            Some(token) => AuthCredential::token(token),
            None => AuthCredential::token(read_secret(args, false)?),
        },
    };

    if !args.no_verify {
        eprintln!("Validating credential...");
        verify(&url, &credential).await?;
    }

    KeyringStore::new().store(&host, &credential)?;

    // Re-read the file so env and flag values other than url/username are not persisted.
    let mut stored = Config::load()?;
    stored.url = Some(url);
    if let AuthCredential::Basic { username, .. } = &credential {
        stored.username = Some(username.clone());
    }
    stored.save()?;

    global
        .output()
        .write_success(&format!("Logged in to {} ({} auth)", host, credential.kind()));
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let host = host_key(&configured_url(&config)?)?;

    KeyringStore::new().delete(&host)?;
    global
        .output()
        .write_success(&format!("Logged out of {}", host));
    Ok(())
}

fn status(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    let Some(url) = config.url.clone() else {
        println!("No Confluence URL configured");
        println!();
        println!("Run 'cfl auth login --url <url>' to authenticate");
        return Ok(());
    };
    let host = host_key(&url)?;

    let (source, credential) = match config.credential() {
        Some(credential) => ("environment or config", Some(credential)),
        None => ("keyring", KeyringStore::new().get(&host)?),
    };

    if global.json {
        let result = serde_json::json!({
            "url": url,
            "host": host,
            "authenticated": credential.is_some(),
            "method": credential.as_ref().map(AuthCredential::kind),
            "source": credential.as_ref().map(|_| source),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", style(&host).bold());
    println!("  URL: {}", url);
    match credential {
        Some(AuthCredential::Basic { username, .. }) => {
            println!("  Logged in as: {} (basic, from {})", username, source);
        }
        Some(AuthCredential::Token { .. }) => {
            println!("  Logged in with a token (from {})", source);
        }
        None => println!("  Status: {}", style("Not logged in").yellow()),
    }
    Ok(())
}
