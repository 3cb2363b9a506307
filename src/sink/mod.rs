//! The document back-end seen by the renderer.
//!
//! The renderer only ever appends: it creates paragraphs in a [`Location`],
//! sets their formatting and adds runs. It never reads content back.

pub mod memory;
pub mod output;

pub use memory::*;
pub use output::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// A length in typographic points.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(pub u32);

impl Points {
    pub const ZERO: Points = Points(0);

    /// `count` repetitions of this length.
    pub fn times(self, count: usize) -> Points {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        Points(self.0.saturating_mul(count))
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
}

/// Per-paragraph formatting. Unset spacing means "back-end default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    pub left_indent: Points,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_before: Option<Points>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_after: Option<Points>,
    pub alignment: Alignment,
}

impl ParagraphFormat {
    pub fn indented(left_indent: Points) -> Self {
        Self {
            left_indent,
            ..Self::default()
        }
    }

    pub fn space_before(mut self, space: Points) -> Self {
        self.space_before = Some(space);
        self
    }

    pub fn space_after(mut self, space: Points) -> Self {
        self.space_after = Some(space);
        self
    }
}

/// A styled span of text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParagraphId(pub usize);

impl fmt::Display for ParagraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub usize);

/// Container that new paragraphs are appended to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Body,
    /// A nested container such as a table cell.
    Container(ContainerId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Body => f.write_str("document body"),
            Location::Container(ContainerId(id)) => write!(f, "container #{}", id),
        }
    }
}

/// Sink operations, named in errors so a failed render says what broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOperation {
    AddParagraph,
    SetFormat,
    AddRun,
}

impl fmt::Display for SinkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SinkOperation::AddParagraph => "add_paragraph",
            SinkOperation::SetFormat => "set_format",
            SinkOperation::AddRun => "add_run",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("unknown location: {0}")]
    UnknownLocation(Location),

    #[error("unknown paragraph {0}")]
    UnknownParagraph(ParagraphId),

    #[error("back-end failure: {0}")]
    Backend(String),
}

/// Paragraph/run stream consumed by the writers.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSink {
    /// Create an empty paragraph at the end of `location`.
    fn add_paragraph(&mut self, location: Location) -> Result<ParagraphId, SinkError>;

    fn set_format(&mut self, paragraph: ParagraphId, format: ParagraphFormat)
        -> Result<(), SinkError>;

    fn add_run(&mut self, paragraph: ParagraphId, run: Run) -> Result<(), SinkError>;
}
