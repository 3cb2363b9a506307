use tracing::debug;

use crate::error::RenderError;
use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::cursor::{Placement, RenderCursor};
use crate::renderer::renderer::WriterEngine;
use crate::renderer::traits::*;
use crate::sink::{DocumentSink, ParagraphFormat, Points, Run};

/// Dispatches the children of a `desc_content` node by tag.
pub struct ContentRenderer<'e> {
    engine: &'e WriterEngine,
}

impl<'e> ContentRenderer<'e> {
    pub fn new(engine: &'e WriterEngine) -> Self {
        Self { engine }
    }

    pub fn render_child<S: DocumentSink + ?Sized>(
        &self,
        child: &DocNode,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        let config = self.engine.config();
        match child.tag {
            NodeTag::Paragraph => {
                let format =
                    ParagraphFormat::indented(context.deeper(1)).space_before(Points::ZERO);
                cursor.append(
                    Run::plain(TextNormalizer.join_lines(&child.astext())),
                    Placement::NewParagraph(format),
                )?;
            }
            NodeTag::FieldList => {
                FieldListRenderer::new(config).render(child, cursor, context)?;
            }
            NodeTag::DefinitionList => {
                DefinitionListRenderer::new(config).render(child, cursor, context.deeper(1))?;
            }
            NodeTag::Desc => {
                let nested = context.nested();
                self.engine.render(
                    child,
                    cursor,
                    Some(nested.base_indent),
                    nested.nesting_level,
                )?;
            }
            other => {
                debug!(tag = %other, "skipping unsupported content node");
            }
        }
        Ok(())
    }
}

/// Classes, functions and methods: `{objtype} {fullname}(params)` followed
/// by free content.
pub struct SignatureWriter;

impl DescWriter for SignatureWriter {
    fn signature_text(&self, desc: &ParsedDesc<'_>) -> String {
        let sig = &desc.signature;
        let mut signature = String::new();

        if let Some(label) = desc.objtype.label() {
            signature.push_str(label);
            signature.push(' ');
        }
        signature.push_str(&sig.fullname);

        signature.push('(');
        signature.push_str(&sig.parameters.join(", "));
        signature.push(')');
        signature
    }
}

/// Attributes: the bare name, with the description continuing on the same
/// line.
pub struct InlineValueWriter;

impl DescWriter for InlineValueWriter {
    fn signature_text(&self, desc: &ParsedDesc<'_>) -> String {
        desc.signature.fullname.clone()
    }

    fn write_content<S: DocumentSink + ?Sized>(
        &self,
        engine: &WriterEngine,
        desc: &ParsedDesc<'_>,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        let (paragraphs, rest): (Vec<&DocNode>, Vec<&DocNode>) = desc
            .content_children()
            .iter()
            .partition(|child| child.tag == NodeTag::Paragraph);

        // Must run right after the signature so the continuation lands on it.
        let description = paragraphs
            .iter()
            .map(|paragraph| TextNormalizer.join_lines(&paragraph.astext()))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !description.is_empty() {
            cursor.append(
                Run::plain(format!(" {}", description)),
                Placement::ContinueCurrent,
            )?;
        }

        let content = ContentRenderer::new(engine);
        for child in rest {
            content.render_child(child, cursor, context)?;
        }
        Ok(())
    }
}

/// Fallback for unknown or missing object types: `{objtype} {fullname}`
/// without a parameter list.
pub struct GenericWriter;

impl DescWriter for GenericWriter {
    fn signature_text(&self, desc: &ParsedDesc<'_>) -> String {
        let sig = &desc.signature;
        let label = desc
            .objtype
            .label()
            .map(str::to_string)
            .or_else(|| sig.annotation.as_deref().map(str::trim).map(str::to_string))
            .filter(|label| !label.is_empty());

        match label {
            Some(label) if sig.fullname.is_empty() => label,
            Some(label) => format!("{} {}", label, sig.fullname),
            None => sig.fullname.clone(),
        }
    }
}
