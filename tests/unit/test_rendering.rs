use descwriter::{
    DocNode, DocumentSink, Location, NodeTag, ParagraphFormat, ParagraphId, Points, RenderCursor,
    Run, SinkError, WriterEngine,
};

/// Records every call the engine makes, in order.
#[derive(Debug, Default)]
struct RecordingSink {
    calls: Vec<Call>,
    next: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    AddParagraph(Location),
    SetFormat(ParagraphId, ParagraphFormat),
    AddRun(ParagraphId, Run),
}

impl DocumentSink for RecordingSink {
    fn add_paragraph(&mut self, location: Location) -> Result<ParagraphId, SinkError> {
        self.calls.push(Call::AddParagraph(location));
        self.next += 1;
        Ok(ParagraphId(self.next - 1))
    }

    fn set_format(
        &mut self,
        paragraph: ParagraphId,
        format: ParagraphFormat,
    ) -> Result<(), SinkError> {
        self.calls.push(Call::SetFormat(paragraph, format));
        Ok(())
    }

    fn add_run(&mut self, paragraph: ParagraphId, run: Run) -> Result<(), SinkError> {
        self.calls.push(Call::AddRun(paragraph, run));
        Ok(())
    }
}

fn attribute(name: &str, description: &str) -> DocNode {
    DocNode::new(NodeTag::Desc)
        .attr("objtype", "attribute")
        .attr("fullname", name)
        .child(DocNode::new(NodeTag::DescSignature))
        .child(
            DocNode::new(NodeTag::DescContent)
                .child(DocNode::with_text(NodeTag::Paragraph, description)),
        )
}

#[test]
fn test_attribute_call_sequence() {
    let mut sink = RecordingSink::default();
    WriterEngine::default()
        .render_document(&[attribute("timeout", "Seconds to wait.")], &mut sink)
        .unwrap();

    assert_eq!(
        sink.calls,
        vec![
            Call::AddParagraph(Location::Body),
            Call::SetFormat(
                ParagraphId(0),
                ParagraphFormat::indented(Points::ZERO)
                    .space_before(Points::ZERO)
                    .space_after(Points(4)),
            ),
            Call::AddRun(ParagraphId(0), Run::bold("timeout")),
            Call::AddRun(ParagraphId(0), Run::plain(" Seconds to wait.")),
        ]
    );
}

#[test]
fn test_continuation_targets_latest_paragraph_after_relocation() {
    let mut sink = RecordingSink::default();
    let cell = Location::Container(descwriter::ContainerId(0));
    let mut cursor = RenderCursor::new(&mut sink);

    WriterEngine::default()
        .render(&attribute("a", "first"), &mut cursor, None, 0)
        .unwrap();
    cursor.set_location(cell);
    assert_eq!(cursor.location(), cell);
    WriterEngine::default()
        .render(&attribute("b", "second"), &mut cursor, None, 0)
        .unwrap();
    assert_eq!(cursor.current_paragraph(), Some(ParagraphId(1)));

    assert_eq!(sink.calls[4], Call::AddParagraph(cell));
    assert_eq!(sink.calls[7], Call::AddRun(ParagraphId(1), Run::plain(" second")));
}

#[test]
fn test_separate_documents_do_not_share_state() {
    let engine = WriterEngine::default();
    let roots = [attribute("x", "one"), attribute("y", "two")];

    let mut first = RecordingSink::default();
    let mut second = RecordingSink::default();
    engine.render_document(&roots, &mut first).unwrap();
    engine.render_document(&roots, &mut second).unwrap();

    assert_eq!(first.calls, second.calls);
    assert_eq!(first.calls.len(), 8);
}
