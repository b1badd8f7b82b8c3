//! Record model for the flattened tree
//!
//! Key design principles:
//! 1. One record per chain position, addressed by a 4-byte index
//! 2. Elements are two records: the start record and its boundary marker
//! 3. Chain links are crate-private; callers only ever see `NodeId`
//! 4. A closed enum discriminates record kinds, every consumer matches on it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a record in a `DomArena`.
///
/// Handles are only minted by the arena. A handle from one arena means
/// nothing in another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type matching the DOM `nodeType` numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    Document = 9,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            9 => Some(NodeType::Document),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Element => "Element",
            NodeType::Attribute => "Attribute",
            NodeType::Text => "Text",
            NodeType::Document => "Document",
        };
        f.write_str(name)
    }
}

/// Attribute value: any scalar, stringified on output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Null,
}

impl AttrValue {
    /// Falsy values serialize as a bare name on emptiable attributes
    pub fn is_falsy(&self) -> bool {
        match self {
            AttrValue::Str(s) => s.is_empty(),
            AttrValue::Bool(b) => !b,
            AttrValue::Int(i) => *i == 0,
            AttrValue::Float(f) => *f == 0.0 || f.is_nan(),
            AttrValue::Null => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

/// Payload of a chain record
#[derive(Debug, Clone)]
pub(crate) enum RecordKind {
    /// Start record of an element; `end` is its boundary marker
    Element { name: String, end: NodeId },
    /// Start record of the document; renders no tag of its own
    Document { end: NodeId },
    Attribute { name: String, value: AttrValue },
    Text { data: String },
    /// End of an element's span; `start` is the owning start record
    Boundary { start: NodeId },
}

/// One position in the chain
///
/// Layout:
/// - `kind` discriminates every traversal and serialization decision
/// - `parent` is `Some` iff the record is attached
/// - `prev`/`next` are the only chain links
#[derive(Debug, Clone)]
pub(crate) struct Record {
    pub(crate) kind: RecordKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Record {
    pub(crate) fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            parent: None,
            prev: None,
            next: None,
        }
    }

    /// Public node type; `None` for boundary markers
    pub(crate) fn node_type(&self) -> Option<NodeType> {
        match self.kind {
            RecordKind::Element { .. } => Some(NodeType::Element),
            RecordKind::Document { .. } => Some(NodeType::Document),
            RecordKind::Attribute { .. } => Some(NodeType::Attribute),
            RecordKind::Text { .. } => Some(NodeType::Text),
            RecordKind::Boundary { .. } => None,
        }
    }

    /// Boundary marker of a container record
    pub(crate) fn end(&self) -> Option<NodeId> {
        match self.kind {
            RecordKind::Element { end, .. } | RecordKind::Document { end } => Some(end),
            _ => None,
        }
    }

    pub(crate) fn is_attribute(&self) -> bool {
        matches!(self.kind, RecordKind::Attribute { .. })
    }

    pub(crate) fn is_boundary(&self) -> bool {
        matches!(self.kind, RecordKind::Boundary { .. })
    }

    /// Human-readable kind for error messages
    pub(crate) fn kind_label(&self) -> &'static str {
        match self.kind {
            RecordKind::Element { .. } => "Element",
            RecordKind::Document { .. } => "Document",
            RecordKind::Attribute { .. } => "Attribute",
            RecordKind::Text { .. } => "Text",
            RecordKind::Boundary { .. } => "Boundary",
        }
    }
}

/// Serializable view of a subtree, for inspection and debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node_type: NodeType,
    pub node_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<(String, AttrValue)>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeSnapshot>,
}

/// Elements that never have content or a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
    "meta", "param", "source", "track", "wbr",
];

/// Boolean-style attributes rendered as a bare name when falsy
pub const EMPTIABLE_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "allowpaymentrequest",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "class",
    "contenteditable",
    "controls",
    "default",
    "defer",
    "disabled",
    "draggable",
    "formnovalidate",
    "hidden",
    "id",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
    "style",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

pub fn is_emptiable_attribute(name: &str) -> bool {
    EMPTIABLE_ATTRIBUTES
        .iter()
        .any(|a| a.eq_ignore_ascii_case(name))
}
