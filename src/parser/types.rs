use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Tag of a documentation tree node.
///
/// Tags the renderer does not know about are kept as [`NodeTag::Other`] so a
/// newer producer never breaks loading; the writers skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    Desc,
    DescSignature,
    DescContent,
    DescAnnotation,
    DescAddname,
    DescName,
    DescParameterlist,
    DescParameter,
    Paragraph,
    FieldList,
    Field,
    FieldName,
    FieldBody,
    DefinitionList,
    DefinitionListItem,
    Term,
    Classifier,
    Definition,
    #[serde(rename = "#text")]
    Text,
    #[serde(other)]
    Other,
}

impl NodeTag {
    /// Text elements concatenate their children directly; structural
    /// elements separate child text with a blank line.
    pub fn child_text_separator(self) -> &'static str {
        match self {
            NodeTag::Desc
            | NodeTag::DescContent
            | NodeTag::FieldList
            | NodeTag::Field
            | NodeTag::FieldBody
            | NodeTag::DefinitionList
            | NodeTag::DefinitionListItem
            | NodeTag::Definition => "\n\n",
            NodeTag::DescParameterlist => ", ",
            _ => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeTag::Desc => "desc",
            NodeTag::DescSignature => "desc_signature",
            NodeTag::DescContent => "desc_content",
            NodeTag::DescAnnotation => "desc_annotation",
            NodeTag::DescAddname => "desc_addname",
            NodeTag::DescName => "desc_name",
            NodeTag::DescParameterlist => "desc_parameterlist",
            NodeTag::DescParameter => "desc_parameter",
            NodeTag::Paragraph => "paragraph",
            NodeTag::FieldList => "field_list",
            NodeTag::Field => "field",
            NodeTag::FieldName => "field_name",
            NodeTag::FieldBody => "field_body",
            NodeTag::DefinitionList => "definition_list",
            NodeTag::DefinitionListItem => "definition_list_item",
            NodeTag::Term => "term",
            NodeTag::Classifier => "classifier",
            NodeTag::Definition => "definition",
            NodeTag::Text => "#text",
            NodeTag::Other => "other",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of the documentation tree.
///
/// Built once by the producer and only ever read by the renderer. In JSON a
/// bare string stands for a `#text` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode")]
pub struct DocNode {
    pub tag: NodeTag,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Text(String),
    Element {
        tag: NodeTag,
        #[serde(default)]
        attributes: BTreeMap<String, Value>,
        #[serde(default)]
        children: Vec<DocNode>,
        #[serde(default)]
        text: Option<String>,
    },
}

impl From<RawNode> for DocNode {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Text(text) => DocNode::text_node(text),
            RawNode::Element {
                tag,
                attributes,
                children,
                text,
            } => DocNode {
                tag,
                attributes,
                children,
                text,
            },
        }
    }
}

impl DocNode {
    pub fn new(tag: NodeTag) -> Self {
        Self {
            tag,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeTag::Text)
        }
    }

    /// Shorthand for an element holding a single text child, e.g. a
    /// `paragraph` or a `term`.
    pub fn with_text(tag: NodeTag, text: impl Into<String>) -> Self {
        Self::new(tag).child(Self::text_node(text))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DocNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// String value of an attribute; non-string values are ignored.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// First direct child carrying `tag`.
    pub fn first_child(&self, tag: NodeTag) -> Option<&DocNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    pub fn children_with_tag(&self, tag: NodeTag) -> impl Iterator<Item = &DocNode> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Flattened text of the subtree: own text, then the children's text
    /// joined by this node's separator.
    pub fn astext(&self) -> String {
        let mut output = self.text.clone().unwrap_or_default();
        let separator = self.tag.child_text_separator();
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                output.push_str(separator);
            }
            output.push_str(&child.astext());
        }
        output
    }
}

/// Kind of documented object, taken from the `objtype` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjType {
    Class,
    Function,
    Method,
    Attribute,
    /// Anything else; keeps the raw label when one was given.
    Generic(Option<String>),
}

impl ObjType {
    pub fn from_attribute(objtype: Option<&str>) -> Self {
        match objtype.map(str::trim) {
            Some("class") => ObjType::Class,
            Some("function") => ObjType::Function,
            Some("method") => ObjType::Method,
            Some("attribute") => ObjType::Attribute,
            Some("") | None => ObjType::Generic(None),
            Some(other) => ObjType::Generic(Some(other.to_string())),
        }
    }

    /// Label used as the heading prefix.
    pub fn label(&self) -> Option<&str> {
        match self {
            ObjType::Class => Some("class"),
            ObjType::Function => Some("function"),
            ObjType::Method => Some("method"),
            ObjType::Attribute => Some("attribute"),
            ObjType::Generic(label) => label.as_deref(),
        }
    }

    /// Stable name for trace output.
    pub fn name(&self) -> &str {
        self.label().unwrap_or("generic")
    }
}

// Typed views over the raw tree, extracted by `DescParser`.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSignature {
    pub fullname: String,
    pub annotation: Option<String>,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParsedDesc<'a> {
    pub objtype: ObjType,
    pub signature: ParsedSignature,
    pub content: Option<&'a DocNode>,
}

impl<'a> ParsedDesc<'a> {
    /// Content children in document order; empty when `desc_content` is absent.
    pub fn content_children(&self) -> &'a [DocNode] {
        self.content.map(|node| node.children.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    pub name: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDefinition {
    pub term: String,
    pub classifier: String,
    pub definition: String,
}
