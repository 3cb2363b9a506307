use crate::error::RenderError;
use crate::parser::ParsedDesc;
use crate::renderer::cursor::{Placement, RenderCursor};
use crate::renderer::renderer::WriterEngine;
use crate::renderer::renders::ContentRenderer;
use crate::sink::{DocumentSink, ParagraphFormat, Points, Run};

/// Indentation inherited by a Writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentContext {
    pub base_indent: Points,
    pub nesting_level: usize,
    pub step: Points,
}

impl IndentContext {
    pub fn new(base_indent: Points, step: Points) -> Self {
        Self {
            base_indent,
            nesting_level: 0,
            step,
        }
    }

    pub fn with_level(&self, nesting_level: usize) -> Self {
        Self {
            nesting_level,
            ..*self
        }
    }

    /// Context for a description nested inside this one.
    pub fn nested(&self) -> Self {
        self.with_level(self.nesting_level + 1)
    }

    /// `base_indent + nesting_level * step`
    pub fn effective(&self) -> Points {
        self.base_indent + self.step.times(self.nesting_level)
    }

    /// The effective indent pushed `steps` levels further in.
    pub fn deeper(&self, steps: usize) -> Points {
        self.effective() + self.step.times(steps)
    }
}

/// One member of the Writer family.
///
/// Variants differ in how the heading is phrased and how the body attaches
/// to it; the lifecycle (signature, body, indent reset) is driven by
/// [`WriterEngine::render`].
pub trait DescWriter {
    fn signature_text(&self, desc: &ParsedDesc<'_>) -> String;

    /// Write the heading as a new bold paragraph at the effective indent.
    fn write_signature<S: DocumentSink + ?Sized>(
        &self,
        engine: &WriterEngine,
        desc: &ParsedDesc<'_>,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        let format = ParagraphFormat::indented(context.effective())
            .space_before(Points::ZERO)
            .space_after(engine.config().title_spacing);
        cursor.append(
            Run::bold(self.signature_text(desc)),
            Placement::NewParagraph(format),
        )?;
        Ok(())
    }

    fn write_content<S: DocumentSink + ?Sized>(
        &self,
        engine: &WriterEngine,
        desc: &ParsedDesc<'_>,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        let content = ContentRenderer::new(engine);
        for child in desc.content_children() {
            content.render_child(child, cursor, context)?;
        }
        Ok(())
    }
}
