//
//  confluence-client
//  output/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table renderers for the content entities.

use super::{
    format_bool, format_content_type, format_size, print_field, truncate, TableBuilder,
    TableOutput,
};
use crate::entity::{AttachmentList, ContentBody, ContentHistory, ContentItem, ContentSearchResult};

const TITLE_WIDTH: usize = 60;

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TableOutput for ContentItem {
    fn print_table(&self, color: bool) {
        print_field("ID", &or_dash(self.id.map(|id| id.to_string()).as_deref()), color);
        print_field("Type", &format_content_type(self.content_type, color), color);
        print_field("Title", &or_dash(self.title.as_deref()), color);
        print_field("Space", &or_dash(self.space.as_deref()), color);
        print_field("Version", &self.version.to_string(), color);
        if let Some(parent) = self.parent_id() {
            print_field("Parent", &parent.to_string(), color);
        }
        if let Some(container) = self.container {
            let container = format!("{} {}", container.content_type, container.id);
            print_field("Container", &container, color);
        }
        print_field("URL", &or_dash(self.url.as_deref()), color);
        if let Some(body) = &self.body {
            println!();
            println!("{}", body);
        }
    }
}

impl TableOutput for ContentSearchResult {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No content found");
            return;
        }

        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "TYPE", "SPACE", "VERSION", "TITLE"]);
        for item in self {
            table = table.row([
                or_dash(item.id.map(|id| id.to_string()).as_deref()),
                format_content_type(item.content_type, color),
                or_dash(item.space.as_deref()),
                item.version.to_string(),
                truncate(item.title.as_deref().unwrap_or_default(), TITLE_WIDTH),
            ]);
        }
        table.print();

        if !self.is_last_page() {
            let next_start = self.start().unwrap_or(0) + self.size();
            println!("More results available, use --start {}", next_start);
        }
    }
}

impl TableOutput for AttachmentList {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No attachments");
            return;
        }

        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "VERSION", "SIZE", "MEDIA TYPE", "TITLE"]);
        for attachment in self {
            table = table.row([
                attachment.id.clone(),
                attachment.version.to_string(),
                attachment.file_size.map_or_else(|| "-".to_string(), format_size),
                or_dash(attachment.media_type.as_deref()),
                truncate(&attachment.title, TITLE_WIDTH),
            ]);
        }
        table.print();

        if !self.is_last_page() {
            println!("More attachments available");
        }
    }
}

impl TableOutput for ContentHistory {
    fn print_table(&self, color: bool) {
        print_field("Created", &self.created_date.to_rfc3339(), color);
        print_field("Created by", &self.created_by.display_name, color);
        print_field("Updated", &self.updated_date.to_rfc3339(), color);
        print_field("Updated by", &self.updated_by.display_name, color);
        print_field("Version", &self.last_version_number.to_string(), color);
        print_field("Latest", &format_bool(self.latest, color), color);
    }
}

impl TableOutput for ContentBody {
    fn print_table(&self, _color: bool) {
        println!("{}", self.value);
    }
}
