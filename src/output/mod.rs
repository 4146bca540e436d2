//
//  confluence-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Renders entities for the terminal, either as human-readable tables or
//! as pretty-printed JSON (`--json`).
//!
//! Colors follow [`console::colors_enabled`], which honours `NO_COLOR` and
//! non-TTY output.

mod content;
mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tables and key/value listings.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Writes values and status messages in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer; color is auto-detected.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Whether ANSI colors are used.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// The selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes an error line to stderr.
    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a success line to stdout. Suppressed for JSON output.
    pub fn write_success(&self, msg: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that know how to print themselves as a table.
pub trait TableOutput {
    /// Prints the value to stdout.
    fn print_table(&self, color: bool);
}

/// Prints a `key: value` line with a dimmed key.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
