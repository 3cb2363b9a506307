use serde::Serialize;

use crate::sink::{
    ContainerId, DocumentSink, Location, ParagraphFormat, ParagraphId, Run, SinkError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Text of all runs, ignoring styling.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// In-memory [`DocumentSink`]: a document body plus any number of nested
/// containers, each an ordered list of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    paragraphs: Vec<Paragraph>,
    body: Vec<ParagraphId>,
    containers: Vec<Vec<ParagraphId>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty container and return its location.
    pub fn add_container(&mut self) -> Location {
        self.containers.push(Vec::new());
        Location::Container(ContainerId(self.containers.len() - 1))
    }

    pub fn paragraph(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.get(id.0)
    }

    /// Paragraphs of `location` in append order; empty for unknown containers.
    pub fn paragraphs_in(&self, location: Location) -> Vec<&Paragraph> {
        let ids = match location {
            Location::Body => Some(&self.body),
            Location::Container(ContainerId(index)) => self.containers.get(index),
        };
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.paragraph(*id))
            .collect()
    }

    pub fn body(&self) -> Vec<&Paragraph> {
        self.paragraphs_in(Location::Body)
    }

    /// Total number of paragraphs across all locations.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    fn paragraph_mut(&mut self, id: ParagraphId) -> Result<&mut Paragraph, SinkError> {
        self.paragraphs
            .get_mut(id.0)
            .ok_or(SinkError::UnknownParagraph(id))
    }
}

impl DocumentSink for MemoryDocument {
    fn add_paragraph(&mut self, location: Location) -> Result<ParagraphId, SinkError> {
        let id = ParagraphId(self.paragraphs.len());
        let target = match location {
            Location::Body => &mut self.body,
            Location::Container(ContainerId(index)) => self
                .containers
                .get_mut(index)
                .ok_or(SinkError::UnknownLocation(location))?,
        };
        target.push(id);
        self.paragraphs.push(Paragraph::default());
        Ok(id)
    }

    fn set_format(
        &mut self,
        paragraph: ParagraphId,
        format: ParagraphFormat,
    ) -> Result<(), SinkError> {
        self.paragraph_mut(paragraph)?.format = format;
        Ok(())
    }

    fn add_run(&mut self, paragraph: ParagraphId, run: Run) -> Result<(), SinkError> {
        self.paragraph_mut(paragraph)?.runs.push(run);
        Ok(())
    }
}
