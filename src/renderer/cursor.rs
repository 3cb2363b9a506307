use tracing::debug;

use crate::error::RenderError;
use crate::sink::{
    DocumentSink, Location, ParagraphFormat, ParagraphId, Points, Run, SinkOperation,
};

/// Where an appended run goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Start a fresh paragraph with this formatting.
    NewParagraph(ParagraphFormat),
    /// Append to the cursor's current paragraph.
    ContinueCurrent,
}

/// Shared state of one render: the sink, the container paragraphs go into
/// and the paragraph most recently started.
///
/// `current_indent` is the indent a Writer inherits when its caller gives
/// none. Writers reset it to their base indent when they finish, so siblings
/// start from the same baseline however deep the previous subtree went.
pub struct RenderCursor<'s, S: DocumentSink + ?Sized> {
    sink: &'s mut S,
    location: Location,
    current: Option<ParagraphId>,
    current_indent: Points,
    depth: usize,
}

impl<'s, S: DocumentSink + ?Sized> RenderCursor<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self::at(sink, Location::Body)
    }

    pub fn at(sink: &'s mut S, location: Location) -> Self {
        Self {
            sink,
            location,
            current: None,
            current_indent: Points::ZERO,
            depth: 0,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Redirect subsequent paragraphs. The current paragraph is kept as the
    /// continuation target.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn current_paragraph(&self) -> Option<ParagraphId> {
        self.current
    }

    pub fn current_indent(&self) -> Points {
        self.current_indent
    }

    pub fn reset_indent(&mut self, indent: Points) {
        self.current_indent = indent;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Append `run` according to `placement` and return the paragraph it
    /// landed in.
    ///
    /// Continuing with no current paragraph starts one at the current indent.
    pub fn append(&mut self, run: Run, placement: Placement) -> Result<ParagraphId, RenderError> {
        let paragraph = match (placement, self.current) {
            (Placement::ContinueCurrent, Some(current)) => current,
            (Placement::ContinueCurrent, None) => {
                debug!("no current paragraph to continue, starting a new one");
                self.start_paragraph(ParagraphFormat::indented(self.current_indent))?
            }
            (Placement::NewParagraph(format), _) => self.start_paragraph(format)?,
        };

        self.sink
            .add_run(paragraph, run)
            .map_err(RenderError::sink(SinkOperation::AddRun))?;
        Ok(paragraph)
    }

    fn start_paragraph(&mut self, format: ParagraphFormat) -> Result<ParagraphId, RenderError> {
        let paragraph = self
            .sink
            .add_paragraph(self.location)
            .map_err(RenderError::sink(SinkOperation::AddParagraph))?;
        self.sink
            .set_format(paragraph, format)
            .map_err(RenderError::sink(SinkOperation::SetFormat))?;

        self.current = Some(paragraph);
        self.current_indent = format.left_indent;
        Ok(paragraph)
    }

    pub(crate) fn enter(&mut self, limit: usize) -> Result<(), RenderError> {
        if self.depth >= limit {
            return Err(RenderError::DepthExceeded {
                depth: self.depth + 1,
                limit,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
