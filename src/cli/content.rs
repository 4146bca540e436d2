//
//  confluence-client
//  cli/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content commands: `get`, `find`, `children`, `descendants`, `history`,
//! `convert`, `delete`, `attachments` and `attach`.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::GlobalOptions;
use crate::api::Content;
use crate::config::Config;
use crate::entity::{ContentItem, ContentType, Representation};
use crate::ConfluenceClient;

/// Content handle honouring the configured expansion.
fn content<'a>(client: &'a ConfluenceClient, config: &Config) -> Content<'a> {
    match &config.expand {
        Some(expand) => client.content().with_expand(expand),
        None => client.content(),
    }
}

/// Parses `--type`. Listings only distinguish pages and comments.
fn listable_type(value: &str) -> Result<ContentType, String> {
    match value.parse::<ContentType>() {
        Ok(content_type @ (ContentType::Page | ContentType::Comment)) => Ok(content_type),
        _ => Err(format!("expected 'page' or 'comment', got '{value}'")),
    }
}

/// A saved item known only by id.
fn by_id(id: u64) -> ContentItem {
    ContentItem {
        id: Some(id),
        ..ContentItem::default()
    }
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Content id
    pub id: u64,

    /// Show a historical version
    #[arg(long)]
    pub version: Option<u64>,
}

impl GetArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.connect()?;
        let item = content(&client, &config).get(self.id, self.version).await?;
        global.output().write(&item)
    }
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Exact title
    #[arg(long)]
    pub title: Option<String>,

    /// Space key (defaults to default_space from the config)
    #[arg(long, short = 's')]
    pub space: Option<String>,

    /// Content type: page or comment
    #[arg(long = "type", short = 't', value_parser = listable_type)]
    pub content_type: Option<ContentType>,

    /// Maximum number of results
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,

    /// Offset of the first result
    #[arg(long)]
    pub start: Option<u64>,
}

impl FindArgs {
    /// Search filters, falling back to `default_space` for the space.
    fn filters(&self, config: &Config) -> Vec<(&'static str, String)> {
        let mut filters = Vec::new();
        if let Some(title) = &self.title {
            filters.push(("title", title.clone()));
        }
        if let Some(space) = self.space.as_ref().or(config.default_space.as_ref()) {
            filters.push(("spaceKey", space.clone()));
        }
        if let Some(content_type) = self.content_type {
            filters.push(("type", content_type.to_string()));
        }
        filters
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, config) = global.connect()?;
        let filters = self.filters(&config);
        let filters: Vec<(&str, &str)> = filters.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let results = content(&client, &config)
            .find(&filters, self.limit, self.start)
            .await?;
        global.output().write(&results)
    }
}

/// Arguments shared by `children` and `descendants`.
#[derive(Args, Debug)]
pub struct RelationArgs {
    /// Content id
    pub id: u64,

    /// Only list items of this type: page or comment
    #[arg(long = "type", short = 't', value_parser = listable_type)]
    pub content_type: Option<ContentType>,
}

impl RelationArgs {
    pub async fn run(&self, global: &GlobalOptions, all_levels: bool) -> Result<()> {
        let (client, config) = global.connect()?;
        let parent = by_id(self.id);
        let api = content(&client, &config);

        let results = if all_levels {
            api.descendants(&parent, self.content_type).await?
        } else {
            api.children(&parent, self.content_type).await?
        };
        global.output().write(&results)
    }
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Content id
    pub id: u64,
}

impl HistoryArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, _) = global.connect()?;
        let history = client.content().history(self.id).await?;
        global.output().write(&history)
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File holding a storage-format body, or - for stdin
    pub input: PathBuf,

    /// Target representation: storage, editor, view, export_view, styled_view or wiki
    #[arg(long)]
    pub to: String,

    /// Id of the item providing space and page context for macros and links
    #[arg(long)]
    pub context: Option<u64>,
}

impl ConvertArgs {
    fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read body from stdin")?;
            return Ok(body);
        }
        std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let to: Representation = self.to.parse()?;
        let body = self.read_input()?;

        let (client, config) = global.connect()?;
        let api = content(&client, &config);
        let context = match self.context {
            Some(id) => Some(api.get(id, None).await?),
            None => None,
        };

        let converted = api.convert(&body, to.as_str(), context.as_ref()).await?;
        global.output().write(&converted)
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Content id
    pub id: u64,
}

impl DeleteArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, _) = global.connect()?;
        client.content().delete(&by_id(self.id)).await?;
        global
            .output()
            .write_success(&format!("Deleted content {}", self.id));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AttachmentsArgs {
    /// Content id
    pub id: u64,
}

impl AttachmentsArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, _) = global.connect()?;
        let attachments = client.content().attachments(&by_id(self.id)).await?;
        global.output().write(&attachments)
    }
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Content id
    pub id: u64,

    /// File to upload
    pub file: PathBuf,
}

impl AttachArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, _) = global.connect()?;
        client
            .content()
            .upload_attachment(&by_id(self.id), &self.file)
            .await?;
        global.output().write_success(&format!(
            "Attached {} to content {}",
            self.file.display(),
            self.id
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_find_falls_back_to_default_space() {
        let args = FindArgs {
            title: Some("Home".to_string()),
            space: None,
            content_type: Some(ContentType::Page),
            limit: None,
            start: None,
        };
        let config = Config {
            default_space: Some("DOCS".to_string()),
            ..Config::default()
        };
        assert_eq!(
            args.filters(&config),
            vec![
                ("title", "Home".to_string()),
                ("spaceKey", "DOCS".to_string()),
                ("type", "page".to_string()),
            ]
        );
    }

    #[test]
    fn test_explicit_space_wins() {
        let cli = Cli::try_parse_from(["cfl", "find", "--space", "ENG"]).unwrap();
        let Commands::Find(args) = cli.command else {
            panic!("expected find");
        };
        let config = Config {
            default_space: Some("DOCS".to_string()),
            ..Config::default()
        };
        assert_eq!(args.filters(&config), vec![("spaceKey", "ENG".to_string())]);
    }

    #[test]
    fn test_type_flag_parses_content_type() {
        let cli = Cli::try_parse_from(["cfl", "children", "7", "--type", "comment"]).unwrap();
        let Commands::Children(args) = cli.command else {
            panic!("expected children");
        };
        assert_eq!(args.content_type, Some(ContentType::Comment));
        assert!(Cli::try_parse_from(["cfl", "children", "7", "--type", "blog"]).is_err());
    }

    #[test]
    fn test_type_flag_only_lists_pages_and_comments() {
        for command in ["find", "children", "descendants"] {
            for rejected in ["attachment", "global"] {
                let mut args = vec!["cfl", command];
                if command != "find" {
                    args.push("7");
                }
                args.extend(["--type", rejected]);
                let result = Cli::try_parse_from(args.iter().copied());
                assert!(result.is_err(), "{command} --type {rejected}");
            }
        }

        let cli = Cli::try_parse_from(["cfl", "find", "-t", "page"]).unwrap();
        let Commands::Find(args) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(args.content_type, Some(ContentType::Page));
    }

    #[test]
    fn test_get_accepts_version_flag() {
        let cli = Cli::try_parse_from(["cfl", "get", "42", "--version", "3"]).unwrap();
        let Commands::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.version, Some(3));
    }

    #[test]
    fn test_attach_takes_id_and_file() {
        let cli = Cli::try_parse_from(["cfl", "attach", "42", "diagram.png"]).unwrap();
        let Commands::Attach(args) = cli.command else {
            panic!("expected attach");
        };
        assert_eq!(args.id, 42);
        assert_eq!(args.file, PathBuf::from("diagram.png"));
    }

    #[tokio::test]
    async fn test_convert_rejects_unknown_representation_first() {
        let args = ConvertArgs {
            input: PathBuf::from("/nonexistent/body.xml"),
            to: "pdf".to_string(),
            context: None,
        };
        let err = args.run(&GlobalOptions::default()).await.unwrap_err();
        assert!(err.to_string().contains("unsupported representation: pdf"));
    }
}
