use tracing::trace;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::parser::{DescParser, DocNode};
use crate::renderer::cursor::{Placement, RenderCursor};
use crate::renderer::traits::IndentContext;
use crate::sink::{DocumentSink, ParagraphFormat, Points, Run};

/// Helpers for normalizing source text before it becomes a run
pub struct TextNormalizer;

impl TextNormalizer {
    /// Prose paragraphs are reflowed by the back-end: every line break
    /// becomes a single space.
    pub fn join_lines(&self, text: &str) -> String {
        text.replace("\r\n", "\n").replace('\n', " ")
    }

    /// Drop blank lines, keeping single line breaks.
    pub fn collapse_blank_lines(&self, text: &str) -> String {
        text.replace("\r\n", "\n")
            .split('\n')
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders `field_list` nodes: bold name one step in, body two steps in.
pub struct FieldListRenderer<'c> {
    config: &'c RenderConfig,
}

impl<'c> FieldListRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    pub fn render<S: DocumentSink + ?Sized>(
        &self,
        field_list: &DocNode,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        let normalizer = TextNormalizer;
        let fields = DescParser.parse_field_list(field_list);
        trace!(fields = fields.len(), indent = context.effective().0, "field list");

        for field in fields {
            let name_format = ParagraphFormat::indented(context.deeper(1))
                .space_after(self.config.title_spacing);
            cursor.append(Run::bold(field.name), Placement::NewParagraph(name_format))?;

            let body_format =
                ParagraphFormat::indented(context.deeper(2)).space_before(Points::ZERO);
            cursor.append(
                Run::plain(normalizer.collapse_blank_lines(&field.body)),
                Placement::NewParagraph(body_format),
            )?;
        }
        Ok(())
    }
}

/// Renders `definition_list` nodes as a `term : classifier` line followed by
/// the definition one step further in.
pub struct DefinitionListRenderer<'c> {
    config: &'c RenderConfig,
}

impl<'c> DefinitionListRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    pub fn render<S: DocumentSink + ?Sized>(
        &self,
        definition_list: &DocNode,
        cursor: &mut RenderCursor<'_, S>,
        indent: Points,
    ) -> Result<(), RenderError> {
        let items = DescParser.parse_definition_list(definition_list);
        trace!(items = items.len(), indent = indent.0, "definition list");

        for item in items {
            let term_format =
                ParagraphFormat::indented(indent).space_after(self.config.title_spacing);
            cursor.append(
                Run::plain(format!("{} : {}", item.term, item.classifier)),
                Placement::NewParagraph(term_format),
            )?;

            let definition_format = ParagraphFormat::indented(indent + self.config.indent_step)
                .space_before(Points::ZERO);
            cursor.append(
                Run::plain(item.definition),
                Placement::NewParagraph(definition_format),
            )?;
        }
        Ok(())
    }
}
