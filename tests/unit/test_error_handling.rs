use descwriter::{
    DocNode, DocumentSink, Location, MemoryDocument, NodeTag, ParagraphFormat, ParagraphId,
    RenderError, Run, SinkError, SinkOperation, WriterEngine,
};

/// Accepts a fixed number of operations, then reports the back-end as gone.
struct FlakySink {
    inner: MemoryDocument,
    remaining: usize,
}

impl FlakySink {
    fn new(budget: usize) -> Self {
        Self {
            inner: MemoryDocument::new(),
            remaining: budget,
        }
    }

    fn spend(&mut self) -> Result<(), SinkError> {
        if self.remaining == 0 {
            return Err(SinkError::Backend("storage unavailable".to_string()));
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl DocumentSink for FlakySink {
    fn add_paragraph(&mut self, location: Location) -> Result<ParagraphId, SinkError> {
        self.spend()?;
        self.inner.add_paragraph(location)
    }

    fn set_format(
        &mut self,
        paragraph: ParagraphId,
        format: ParagraphFormat,
    ) -> Result<(), SinkError> {
        self.spend()?;
        self.inner.set_format(paragraph, format)
    }

    fn add_run(&mut self, paragraph: ParagraphId, run: Run) -> Result<(), SinkError> {
        self.spend()?;
        self.inner.add_run(paragraph, run)
    }
}

fn function_with_prose() -> DocNode {
    DocNode::new(NodeTag::Desc)
        .attr("objtype", "function")
        .attr("fullname", "f")
        .child(DocNode::new(NodeTag::DescSignature))
        .child(
            DocNode::new(NodeTag::DescContent)
                .child(DocNode::with_text(NodeTag::Paragraph, "prose")),
        )
}

#[test]
fn test_failure_on_each_operation_is_reported() {
    let cases = [
        (0, SinkOperation::AddParagraph),
        (1, SinkOperation::SetFormat),
        (2, SinkOperation::AddRun),
        (3, SinkOperation::AddParagraph),
    ];

    for (budget, expected) in cases {
        let mut sink = FlakySink::new(budget);
        let result = WriterEngine::default().render_document(&[function_with_prose()], &mut sink);

        match result {
            Err(RenderError::Sink { operation, source }) => {
                assert_eq!(operation, expected, "budget {}", budget);
                assert_eq!(source, SinkError::Backend("storage unavailable".to_string()));
            }
            other => panic!("budget {}: expected sink error, got {:?}", budget, other),
        }
    }
}

#[test]
fn test_enough_budget_renders_everything() {
    let mut sink = FlakySink::new(6);
    WriterEngine::default()
        .render_document(&[function_with_prose()], &mut sink)
        .unwrap();

    let texts: Vec<String> = sink.inner.body().iter().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["function f()", "prose"]);
}

#[test]
fn test_error_message_names_operation() {
    let mut sink = FlakySink::new(1);
    let err = WriterEngine::default()
        .render_document(&[function_with_prose()], &mut sink)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "document sink failed during set_format: back-end failure: storage unavailable"
    );
}

#[test]
fn test_malformed_subtrees_do_not_abort_the_document() {
    let broken_field = DocNode::new(NodeTag::FieldList).child(DocNode::new(NodeTag::Field));
    let broken_definition = DocNode::new(NodeTag::DefinitionList)
        .child(DocNode::new(NodeTag::DefinitionListItem).child(DocNode::with_text(NodeTag::Term, "t")));
    let bare = DocNode::new(NodeTag::Desc);
    let node = DocNode::new(NodeTag::Desc)
        .attr("objtype", "class")
        .attr("fullname", "C")
        .child(
            DocNode::new(NodeTag::DescContent)
                .child(broken_field)
                .child(broken_definition)
                .child(bare),
        );

    let document = WriterEngine::default().render_to_memory(&[node]).unwrap();
    let texts: Vec<String> = document.body().iter().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["class C()", "", "", "t : ", "", ""]);
}
