//! Read-only views derived from the chain
//!
//! Nothing here is cached: every view walks the links at call time, filtering
//! by record kind. Views are total. Asking for the sibling of a detached node
//! or the children of a text node yields `None` / an empty list, not an error.
//!
//! The lazy iterators follow live links. They borrow the arena, so the tree
//! cannot change while one is in use.

use crate::arena::DomArena;
use crate::types::{AttrValue, NodeId, NodeType, RecordKind};
use smallvec::SmallVec;

impl DomArena {
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.node(id).ok()?.node_type()
    }

    /// `DIV` for elements, `#text`, `#document`, or the attribute name
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            RecordKind::Element { name, .. } | RecordKind::Attribute { name, .. } => {
                Some(name.as_str())
            }
            RecordKind::Text { .. } => Some("#text"),
            RecordKind::Document { .. } => Some("#document"),
            RecordKind::Boundary { .. } => None,
        }
    }

    /// Text node value
    pub fn data(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).ok()?.kind {
            RecordKind::Text { data } => Some(data.as_str()),
            _ => None,
        }
    }

    /// Value of an attribute node
    pub fn attribute_value(&self, id: NodeId) -> Option<&AttrValue> {
        match &self.node(id).ok()?.kind {
            RecordKind::Attribute { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    /// The record after this node's span, unless that is the parent's end
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).ok()?.kind {
            RecordKind::Element { .. } | RecordKind::Text { .. } => {}
            _ => return None,
        }
        let next = self.rec(self.span_end(id)).next?;
        if self.rec(next).is_boundary() {
            None
        } else {
            Some(next)
        }
    }

    /// The record before this node, stepping back over a sibling's span
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).ok()?.kind {
            RecordKind::Element { .. } | RecordKind::Text { .. } => {}
            _ => return None,
        }
        let prev = self.rec(id).prev?;
        match self.rec(prev).kind {
            RecordKind::Boundary { start } => Some(start),
            RecordKind::Text { .. } => Some(prev),
            // the parent's start record or its last attribute
            _ => None,
        }
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        let end = self.node(id).ok()?.end()?;
        let mut next = self.rec(id).next?;
        while self.rec(next).is_attribute() {
            next = self.rec(next).next?;
        }
        if next == end {
            None
        } else {
            Some(next)
        }
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        let end = self.node(id).ok()?.end()?;
        let prev = self.rec(end).prev?;
        match self.rec(prev).kind {
            RecordKind::Boundary { start } => Some(start),
            RecordKind::Attribute { .. } => None,
            _ if prev == id => None,
            _ => Some(prev),
        }
    }

    /// Lazy walk over child nodes, attributes excluded
    pub fn iter_child_nodes(&self, id: NodeId) -> ChildNodes<'_> {
        ChildNodes {
            arena: self,
            next: self.first_child(id),
        }
    }

    /// Child nodes as of now
    pub fn child_nodes(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        self.iter_child_nodes(id).collect()
    }

    /// Element children only
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        self.iter_child_nodes(id)
            .filter(|&child| self.node_type(child) == Some(NodeType::Element))
            .collect()
    }

    /// Lazy walk over the attribute run right after the start record
    pub fn iter_attributes(&self, id: NodeId) -> Attributes<'_> {
        let next = match self.node(id) {
            Ok(record) if matches!(record.kind, RecordKind::Element { .. }) => record.next,
            _ => None,
        };
        Attributes { arena: self, next }
    }

    pub fn attributes(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        self.iter_attributes(id).collect()
    }

    pub fn has_attributes(&self, id: NodeId) -> bool {
        self.iter_attributes(id).next().is_some()
    }

    pub fn get_attribute_names(&self, id: NodeId) -> Vec<&str> {
        self.iter_attributes(id)
            .filter_map(|attr| self.node_name(attr))
            .collect()
    }

    /// Attribute value by exact name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.attribute_value(self.find_attribute(id, name)?)
    }

    /// Whether `node` is `ancestor` or lies inside its span
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_node(id);
        }
        false
    }
}

/// Iterator over the children of a node.
pub struct ChildNodes<'a> {
    arena: &'a DomArena,
    next: Option<NodeId>,
}

impl Iterator for ChildNodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.next_sibling(current);
        Some(current)
    }
}

/// Iterator over the attribute records of an element.
pub struct Attributes<'a> {
    arena: &'a DomArena,
    next: Option<NodeId>,
}

impl Iterator for Attributes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let record = self.arena.rec(current);
        if !record.is_attribute() {
            self.next = None;
            return None;
        }
        self.next = record.next;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// div > [@id, text "a", span > [text "inner"], text "b", em]
    fn sample() -> (DomArena, [NodeId; 6]) {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        let a = arena.create_text_node("a");
        let span = arena.create_element("span");
        let inner = arena.create_text_node("inner");
        let b = arena.create_text_node("b");
        let em = arena.create_element("em");

        arena.set_attribute(div, "id", "root").unwrap();
        arena.append_child(div, a).unwrap();
        arena.append_child(div, span).unwrap();
        arena.append_child(span, inner).unwrap();
        arena.append_child(div, b).unwrap();
        arena.append_child(div, em).unwrap();

        (arena, [div, a, span, inner, b, em])
    }

    #[test]
    fn test_siblings() {
        let (arena, [div, a, span, inner, b, em]) = sample();

        assert_eq!(arena.next_sibling(a), Some(span));
        assert_eq!(arena.next_sibling(span), Some(b));
        assert_eq!(arena.next_sibling(em), None);
        assert_eq!(arena.next_sibling(inner), None);

        assert_eq!(arena.previous_sibling(a), None);
        assert_eq!(arena.previous_sibling(b), Some(span));
        assert_eq!(arena.previous_sibling(span), Some(a));
        assert_eq!(arena.previous_sibling(inner), None);
        assert_eq!(arena.next_sibling(div), None);
    }

    #[test]
    fn test_first_last_child() {
        let (arena, [div, a, span, inner, _, em]) = sample();

        assert_eq!(arena.first_child(div), Some(a));
        assert_eq!(arena.last_child(div), Some(em));
        assert_eq!(arena.first_child(span), Some(inner));
        assert_eq!(arena.last_child(span), Some(inner));
        assert_eq!(arena.first_child(em), None);
        assert_eq!(arena.last_child(em), None);
        assert_eq!(arena.first_child(a), None);
    }

    #[test]
    fn test_last_child_with_only_attributes() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        arena.set_attribute(div, "hidden", true).unwrap();

        assert_eq!(arena.first_child(div), None);
        assert_eq!(arena.last_child(div), None);
        assert!(arena.child_nodes(div).is_empty());
    }

    #[test]
    fn test_child_nodes_and_children_exclude_attributes() {
        let (arena, [div, a, span, _, b, em]) = sample();

        assert_eq!(arena.child_nodes(div).as_slice(), &[a, span, b, em]);
        assert_eq!(arena.children(div).as_slice(), &[span, em]);
        for attr in arena.attributes(div) {
            assert!(!arena.child_nodes(div).contains(&attr));
        }
    }

    #[test]
    fn test_iteration_is_restartable() {
        let (arena, [div, ..]) = sample();
        let first: Vec<_> = arena.iter_child_nodes(div).collect();
        let second: Vec<_> = arena.iter_child_nodes(div).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attributes_view() {
        let (mut arena, [div, a, ..]) = sample();
        arena.set_attribute(div, "class", "x").unwrap();

        let attrs = arena.attributes(div);
        assert_eq!(attrs.len(), 2);
        assert_eq!(arena.node_type(attrs[0]), Some(NodeType::Attribute));
        assert_eq!(arena.node_name(attrs[1]), Some("class"));
        assert_eq!(arena.attribute_value(attrs[1]), Some(&AttrValue::from("x")));
        assert_eq!(arena.parent_node(attrs[0]), Some(div));
        assert!(arena.has_attributes(div));
        assert!(!arena.has_attributes(a));
        assert_eq!(arena.next_sibling(attrs[0]), None);
        assert_eq!(arena.previous_sibling(attrs[1]), None);
    }

    #[test]
    fn test_node_names_and_types() {
        let (arena, [div, a, ..]) = sample();
        assert_eq!(arena.node_type(div), Some(NodeType::Element));
        assert_eq!(arena.node_name(div), Some("DIV"));
        assert_eq!(arena.node_type(a), Some(NodeType::Text));
        assert_eq!(arena.node_name(a), Some("#text"));
        assert_eq!(arena.data(a), Some("a"));
        assert_eq!(arena.data(div), None);
    }

    #[test]
    fn test_boundary_records_are_hidden() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div");
        // the boundary marker sits right after the start record
        let boundary = NodeId::from_index(div.index() + 1);

        assert_eq!(arena.node_type(boundary), None);
        assert_eq!(arena.node_name(boundary), None);
        assert!(arena.child_nodes(boundary).is_empty());
    }

    #[test]
    fn test_contains() {
        let (arena, [div, a, span, inner, ..]) = sample();
        assert!(arena.contains(div, inner));
        assert!(arena.contains(span, inner));
        assert!(arena.contains(div, div));
        assert!(!arena.contains(span, a));
        assert!(!arena.contains(inner, div));
    }
}
