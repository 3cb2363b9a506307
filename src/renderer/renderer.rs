use tracing::{debug, debug_span, trace};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::parser::*;
use crate::renderer::cursor::RenderCursor;
use crate::renderer::renders::*;
use crate::renderer::traits::*;
use crate::sink::{DocumentSink, MemoryDocument, Points};

/// The Writer variants, selected by object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writer {
    Signature,
    InlineValue,
    Generic,
}

impl Writer {
    pub fn for_objtype(objtype: &ObjType) -> Self {
        match objtype {
            ObjType::Class | ObjType::Function | ObjType::Method => Writer::Signature,
            ObjType::Attribute => Writer::InlineValue,
            ObjType::Generic(_) => Writer::Generic,
        }
    }

    fn write_signature<S: DocumentSink + ?Sized>(
        self,
        engine: &WriterEngine,
        desc: &ParsedDesc<'_>,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        match self {
            Writer::Signature => SignatureWriter.write_signature(engine, desc, cursor, context),
            Writer::InlineValue => {
                InlineValueWriter.write_signature(engine, desc, cursor, context)
            }
            Writer::Generic => GenericWriter.write_signature(engine, desc, cursor, context),
        }
    }

    fn write_content<S: DocumentSink + ?Sized>(
        self,
        engine: &WriterEngine,
        desc: &ParsedDesc<'_>,
        cursor: &mut RenderCursor<'_, S>,
        context: &IndentContext,
    ) -> Result<(), RenderError> {
        match self {
            Writer::Signature => SignatureWriter.write_content(engine, desc, cursor, context),
            Writer::InlineValue => InlineValueWriter.write_content(engine, desc, cursor, context),
            Writer::Generic => GenericWriter.write_content(engine, desc, cursor, context),
        }
    }
}

/// Entry point of the recursive walk. Holds only configuration, so one
/// engine can render any number of documents.
#[derive(Debug, Clone, Default)]
pub struct WriterEngine {
    config: RenderConfig,
}

impl WriterEngine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one description node and its subtree.
    ///
    /// Without `base_indent` the cursor's current indent is inherited. The
    /// node is written at `base_indent + nesting_level * indent_step`, and on
    /// success the cursor's current indent is back at `base_indent`.
    pub fn render<S: DocumentSink + ?Sized>(
        &self,
        node: &DocNode,
        cursor: &mut RenderCursor<'_, S>,
        base_indent: Option<Points>,
        nesting_level: usize,
    ) -> Result<(), RenderError> {
        let base_indent = base_indent.unwrap_or_else(|| cursor.current_indent());
        let context =
            IndentContext::new(base_indent, self.config.indent_step).with_level(nesting_level);

        cursor.enter(self.config.max_depth)?;

        if node.tag != NodeTag::Desc {
            debug!(tag = %node.tag, "rendering a non-description node as a description");
        }
        let desc = DescParser.parse_desc(node);
        let writer = Writer::for_objtype(&desc.objtype);

        let span = debug_span!(
            "desc",
            kind = desc.objtype.name(),
            indent = context.effective().0,
            level = nesting_level,
        );
        let _enter = span.enter();
        trace!(fullname = %desc.signature.fullname, ?writer, "writing description");

        writer.write_signature(self, &desc, cursor, &context)?;
        writer.write_content(self, &desc, cursor, &context)?;

        cursor.reset_indent(base_indent);
        cursor.leave();
        Ok(())
    }

    /// Render every root into `sink`'s body, each from the same baseline.
    ///
    /// Wrapper roots that are not descriptions themselves (sections, whole
    /// documents) are searched for description nodes, which are rendered at
    /// the top level.
    pub fn render_document<S: DocumentSink + ?Sized>(
        &self,
        roots: &[DocNode],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let mut cursor = RenderCursor::new(sink);
        for root in roots {
            self.render_root(root, &mut cursor)?;
        }
        Ok(())
    }

    fn render_root<S: DocumentSink + ?Sized>(
        &self,
        node: &DocNode,
        cursor: &mut RenderCursor<'_, S>,
    ) -> Result<(), RenderError> {
        if node.tag == NodeTag::Desc {
            return self.render(node, cursor, None, 0);
        }

        debug!(tag = %node.tag, "searching wrapper node for descriptions");
        cursor.enter(self.config.max_depth)?;
        for child in &node.children {
            self.render_root(child, cursor)?;
        }
        cursor.leave();
        Ok(())
    }

    pub fn render_to_memory(&self, roots: &[DocNode]) -> Result<MemoryDocument, RenderError> {
        let mut document = MemoryDocument::new();
        self.render_document(roots, &mut document)?;
        Ok(document)
    }
}
