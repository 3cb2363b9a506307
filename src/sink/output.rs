use anyhow::{bail, Context, Result};
use std::str::FromStr;

use crate::sink::{MemoryDocument, Paragraph};

/// Points of left indent per column of text output.
pub const POINTS_PER_COLUMN: u32 = 10;

/// Export format for a rendered [`MemoryDocument`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("Unknown output format '{}', expected 'text' or 'json'", other),
        }
    }
}

pub fn export(document: &MemoryDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(document)),
        OutputFormat::Json => to_json(document),
    }
}

/// Plain-text preview of the document body.
///
/// One line per paragraph, indented by `left_indent / POINTS_PER_COLUMN`
/// spaces, bold runs wrapped in `**`. Lines of multi-line runs keep the
/// paragraph's indent.
pub fn to_text(document: &MemoryDocument) -> String {
    let mut output = String::new();
    for paragraph in document.body() {
        output.push_str(&paragraph_to_text(paragraph));
    }
    output
}

fn paragraph_to_text(paragraph: &Paragraph) -> String {
    let columns = (paragraph.format.left_indent.0 / POINTS_PER_COLUMN) as usize;
    let indent = " ".repeat(columns);

    let mut content = String::new();
    for run in &paragraph.runs {
        if run.bold && !run.text.is_empty() {
            content.push_str(&format!("**{}**", run.text));
        } else {
            content.push_str(&run.text);
        }
    }

    let mut output = String::new();
    for line in content.split('\n') {
        if line.is_empty() {
            output.push('\n');
        } else {
            output.push_str(&format!("{}{}\n", indent, line));
        }
    }
    output
}

pub fn to_json(document: &MemoryDocument) -> Result<String> {
    serde_json::to_string_pretty(&document.body())
        .context("Failed to serialize rendered document")
}
