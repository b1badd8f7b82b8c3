//! Markup serializer
//!
//! This module handles:
//! - Walking a node's span front to back (no recursion, the chain is already
//!   in document order)
//! - Attribute formatting, including bare boolean-style attributes
//! - Text escaping in a single pass
//! - Void elements, which never get content or a closing tag

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use std::fmt;

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Serializer configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Prefix document output with `<!DOCTYPE html>`
    pub emit_doctype: bool,
    /// Leave out attributes whose name starts with `on`
    pub drop_event_handlers: bool,
}

/// Markup serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a node including its own tag (`outerHTML`)
    pub fn outer_html(&self, arena: &DomArena, id: NodeId) -> Result<String> {
        let record = arena.node(id)?;
        let mut output = String::with_capacity(256);

        if let RecordKind::Document { .. } = record.kind {
            if self.config.emit_doctype {
                output.push_str(DOCTYPE);
            }
            self.write_children(arena, id, &mut output);
        } else {
            self.write_span(arena, id, arena.span_end(id), &mut output);
        }

        Ok(output)
    }

    /// Serialize only the children of a node (`innerHTML`)
    pub fn inner_html(&self, arena: &DomArena, id: NodeId) -> Result<String> {
        arena.node(id)?;
        let mut output = String::with_capacity(256);
        self.write_children(arena, id, &mut output);
        Ok(output)
    }

    fn write_children(&self, arena: &DomArena, id: NodeId, output: &mut String) {
        for child in arena.iter_child_nodes(id) {
            self.write_span(arena, child, arena.span_end(child), output);
        }
    }

    /// Emit every record from `first` through `last` in chain order
    fn write_span(&self, arena: &DomArena, first: NodeId, last: NodeId, output: &mut String) {
        let mut cursor = Some(first);

        while let Some(id) = cursor {
            let record = arena.rec(id);

            match &record.kind {
                RecordKind::Element { name, end } => {
                    output.push('<');
                    output.push_str(&name.to_lowercase());

                    // The attribute run directly follows the start record
                    cursor = record.next;
                    while let Some(attr) = cursor.filter(|&a| arena.rec(a).is_attribute()) {
                        self.write_attribute(arena, attr, output);
                        cursor = arena.rec(attr).next;
                    }
                    output.push('>');

                    if is_void_element(name) {
                        if *end == last {
                            break;
                        }
                        cursor = arena.rec(*end).next;
                    }
                    continue;
                }
                RecordKind::Boundary { start } => {
                    if let RecordKind::Element { name, .. } = &arena.rec(*start).kind {
                        output.push_str("</");
                        output.push_str(&name.to_lowercase());
                        output.push('>');
                    }
                }
                RecordKind::Attribute { .. } => self.write_attribute(arena, id, output),
                RecordKind::Text { data } => escape_text(data, output),
                // A nested document renders nothing of its own
                RecordKind::Document { .. } => {}
            }

            if id == last {
                break;
            }
            cursor = record.next;
        }
    }

    fn write_attribute(&self, arena: &DomArena, id: NodeId, output: &mut String) {
        let RecordKind::Attribute { name, value } = &arena.rec(id).kind else {
            return;
        };

        if self.config.drop_event_handlers && is_event_handler(name) {
            return;
        }

        output.push(' ');
        output.push_str(name);
        if is_emptiable_attribute(name) && value.is_falsy() {
            return;
        }
        output.push_str("=\"");
        output.push_str(&value.to_string().replace('"', "&quot;"));
        output.push('"');
    }
}

fn is_event_handler(name: &str) -> bool {
    name.get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

/// Escape `<`, `>`, `&` and U+00A0 in one pass
pub fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// `Display` adapter returned by [`DomArena::display`]
pub struct NodeDisplay<'a> {
    arena: &'a DomArena,
    id: NodeId,
    serializer: DomSerializer,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markup = self
            .serializer
            .outer_html(self.arena, self.id)
            .map_err(|_| fmt::Error)?;
        f.write_str(&markup)
    }
}

impl DomArena {
    /// Full serialization of a node with the default configuration
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        DomSerializer::new().outer_html(self, id)
    }

    /// Serialization of a node's children with the default configuration
    pub fn inner_html(&self, id: NodeId) -> Result<String> {
        DomSerializer::new().inner_html(self, id)
    }

    /// `to_string()`-able view of a node
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        self.display_with(id, DomSerializer::new())
    }

    pub fn display_with(&self, id: NodeId, serializer: DomSerializer) -> NodeDisplay<'_> {
        NodeDisplay {
            arena: self,
            id,
            serializer,
        }
    }
}
