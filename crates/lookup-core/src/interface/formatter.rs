//! Response formatting utilities

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::bot::Command;
use crate::catalog::CatalogEntry;
use crate::error::LookupError;
use crate::profile::CompanyProfile;
use crate::segments::Segment;

/// How responses are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Label/value lines
    #[default]
    Plain,
    /// Box-drawn tables
    Table,
}

impl FromStr for OutputStyle {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "table" => Ok(Self::Table),
            other => Err(LookupError::ConfigError(format!("Unknown output format: {other}"))),
        }
    }
}

pub trait Formatter: Send + Sync {
    fn style(&self) -> OutputStyle;
    fn format_profile(&self, profile: &CompanyProfile, segments: &[Segment]) -> String;
    fn format_suggestions(&self, entries: &[CatalogEntry]) -> String;
    fn format_error(&self, error: &str) -> String;
    fn format_help(&self) -> String;
}

const NO_SUGGESTIONS: &str = "No matching symbols.";

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn style(&self) -> OutputStyle {
        OutputStyle::Plain
    }

    fn format_profile(&self, profile: &CompanyProfile, segments: &[Segment]) -> String {
        let mut output = format!(
            "Company Name\n{}\n\nStock Price\n{}\n\nMarket Cap\n{}",
            profile.display_name(),
            profile.display_price(),
            profile.display_market_cap(),
        );
        if !segments.is_empty() {
            output.push_str("\n\nBusiness Segments");
            for segment in segments {
                output.push_str(&format!("\n- {}: {}", segment.name, segment.description));
            }
        }
        output
    }

    fn format_suggestions(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return NO_SUGGESTIONS.to_string();
        }
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {}", i + 1, entry.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {error}")
    }

    fn format_help(&self) -> String {
        Command::help_text().trim().to_string()
    }
}

pub struct TableFormatter;

impl TableFormatter {
    fn table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Formatter for TableFormatter {
    fn style(&self) -> OutputStyle {
        OutputStyle::Table
    }

    fn format_profile(&self, profile: &CompanyProfile, segments: &[Segment]) -> String {
        let mut table = Self::table();
        table.set_header(vec!["Field", "Value"]);
        table.add_row(vec!["Symbol".to_string(), profile.symbol.clone()]);
        table.add_row(vec!["Company Name".to_string(), profile.display_name().to_string()]);
        table.add_row(vec!["Stock Price".to_string(), profile.display_price()]);
        table.add_row(vec!["Market Cap".to_string(), profile.display_market_cap()]);
        if let Some(exchange) = &profile.exchange {
            table.add_row(vec!["Exchange".to_string(), exchange.clone()]);
        }
        if let Some(industry) = &profile.industry {
            table.add_row(vec!["Industry".to_string(), industry.clone()]);
        }

        let mut output = table.to_string();
        if !segments.is_empty() {
            let mut segment_table = Self::table();
            segment_table.set_header(vec!["Segment", "Description"]);
            for segment in segments {
                segment_table.add_row(vec![segment.name.clone(), segment.description.clone()]);
            }
            output.push('\n');
            output.push_str(&segment_table.to_string());
        }
        output
    }

    fn format_suggestions(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return NO_SUGGESTIONS.to_string();
        }
        let mut table = Self::table();
        table.set_header(vec!["#", "Symbol", "Name"]);
        for (i, entry) in entries.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), entry.symbol.clone(), entry.name.clone()]);
        }
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {error}")
    }

    fn format_help(&self) -> String {
        Command::help_text().trim().to_string()
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(style: OutputStyle) -> Box<dyn Formatter> {
        match style {
            OutputStyle::Plain => Box::new(PlainFormatter),
            OutputStyle::Table => Box::new(TableFormatter),
        }
    }
}
