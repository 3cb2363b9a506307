use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::parser::types::*;

#[derive(Deserialize)]
#[serde(untagged)]
enum DocTreeInput {
    Many(Vec<DocNode>),
    One(DocNode),
}

impl From<DocTreeInput> for Vec<DocNode> {
    fn from(input: DocTreeInput) -> Self {
        match input {
            DocTreeInput::Many(nodes) => nodes,
            DocTreeInput::One(node) => vec![node],
        }
    }
}

/// Loads a serialized documentation tree.
///
/// The input is either a single root node or an array of roots.
pub struct DocTreeParser;

impl DocTreeParser {
    pub fn parse_str(&self, json: &str) -> Result<Vec<DocNode>> {
        let input: DocTreeInput =
            serde_json::from_str(json).context("Failed to parse documentation tree JSON")?;
        Ok(input.into())
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<DocNode>> {
        let input: DocTreeInput = serde_json::from_reader(reader)
            .context("Failed to parse documentation tree JSON")?;
        Ok(input.into())
    }

    pub fn parse_path(&self, path: &Path) -> Result<Vec<DocNode>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open documentation tree {}", path.display()))?;
        let roots = self
            .parse_reader(BufReader::new(file))
            .with_context(|| format!("Invalid documentation tree in {}", path.display()))?;
        debug!(path = %path.display(), roots = roots.len(), "loaded documentation tree");
        Ok(roots)
    }
}

// Extracts typed views from raw description nodes. Shape problems are
// repaired with empty text and reported, never raised.
pub struct DescParser;

impl DescParser {
    pub fn parse_desc<'a>(&self, node: &'a DocNode) -> ParsedDesc<'a> {
        let objtype = ObjType::from_attribute(node.attribute("objtype"));
        let signature_node = node.first_child(NodeTag::DescSignature);
        if signature_node.is_none() {
            warn!(objtype = objtype.name(), "description has no signature, rendering it empty");
        }

        let mut signature = signature_node
            .map(|sig| self.parse_signature(sig))
            .unwrap_or_default();

        // The description's own fullname wins over whatever the signature carries.
        if let Some(fullname) = node.attribute("fullname") {
            signature.fullname = fullname.to_string();
        }

        ParsedDesc {
            objtype,
            signature,
            content: node.first_child(NodeTag::DescContent),
        }
    }

    fn parse_signature(&self, signature: &DocNode) -> ParsedSignature {
        let mut annotation = None;
        let mut module = String::new();
        let mut name = String::new();
        let mut parameters = Vec::new();

        for child in &signature.children {
            match child.tag {
                NodeTag::DescAnnotation => annotation = Some(child.astext()),
                NodeTag::DescAddname => module = child.astext(),
                NodeTag::DescName => name = child.astext(),
                NodeTag::DescParameterlist => {
                    parameters = child.children.iter().map(DocNode::astext).collect();
                }
                _ => {}
            }
        }

        let fullname = match signature.attribute("fullname") {
            Some(fullname) => fullname.to_string(),
            None => format!("{}{}", module, name),
        };

        ParsedSignature {
            fullname,
            annotation,
            parameters,
        }
    }

    pub fn parse_field_list(&self, field_list: &DocNode) -> Vec<ParsedField> {
        field_list
            .children
            .iter()
            .filter(|child| {
                let is_field = child.tag == NodeTag::Field;
                if !is_field {
                    debug!(tag = %child.tag, "skipping non-field child of field list");
                }
                is_field
            })
            .map(|field| {
                if field.children.len() < 2 {
                    warn!(
                        children = field.children.len(),
                        "field is missing its name or body, using empty text"
                    );
                }
                ParsedField {
                    name: field.children.first().map(DocNode::astext).unwrap_or_default(),
                    body: field.children.get(1).map(DocNode::astext).unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn parse_definition_list(&self, definition_list: &DocNode) -> Vec<ParsedDefinition> {
        definition_list
            .children_with_tag(NodeTag::DefinitionListItem)
            .map(|item| {
                let text_of = |tag: NodeTag| match item.first_child(tag) {
                    Some(node) => node.astext(),
                    None => {
                        warn!(missing = %tag, "definition list item is incomplete, using empty text");
                        String::new()
                    }
                };
                ParsedDefinition {
                    term: text_of(NodeTag::Term),
                    classifier: text_of(NodeTag::Classifier),
                    definition: text_of(NodeTag::Definition),
                }
            })
            .collect()
    }
}
