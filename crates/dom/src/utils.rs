//! Utility functions over a node's span

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{AttrValue, NodeId, NodeSnapshot, RecordKind};

/// Depth-first walk over everything inside a node's span.
///
/// The chain is already in document order, so this is a straight scan from
/// the start record to the boundary, skipping attributes and end markers.
pub fn descendants(arena: &DomArena, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let end = arena.node(id).ok().and_then(|record| record.end());
    let mut cursor = end.and_then(|_| arena.rec(id).next);

    std::iter::from_fn(move || loop {
        let current = cursor.filter(|&c| Some(c) != end)?;
        let record = arena.rec(current);
        cursor = record.next;
        if !record.is_attribute() && !record.is_boundary() {
            return Some(current);
        }
    })
}

/// Concatenated text of all descendant text nodes, in document order
pub fn get_text_content(arena: &DomArena, id: NodeId) -> String {
    if let Some(data) = arena.data(id) {
        return data.to_string();
    }

    let mut text = String::new();
    for node in descendants(arena, id) {
        if let Some(data) = arena.data(node) {
            text.push_str(data);
        }
    }
    text
}

/// Find all descendant elements by tag name (case-insensitive)
pub fn find_by_tag(arena: &DomArena, id: NodeId, tag: &str) -> Vec<NodeId> {
    descendants(arena, id)
        .filter(|&node| {
            matches!(&arena.rec(node).kind, RecordKind::Element { name, .. } if name.eq_ignore_ascii_case(tag))
        })
        .collect()
}

/// Find the first descendant element whose `id` attribute matches
pub fn find_by_id(arena: &DomArena, id: NodeId, element_id: &str) -> Option<NodeId> {
    descendants(arena, id).find(|&node| {
        arena
            .get_attribute(node, "id")
            .and_then(AttrValue::as_str)
            == Some(element_id)
    })
}

/// Build a serializable copy of a subtree
pub fn snapshot(arena: &DomArena, id: NodeId) -> Option<NodeSnapshot> {
    let node_type = arena.node_type(id)?;
    let attributes = arena
        .iter_attributes(id)
        .filter_map(|attr| {
            let name = arena.node_name(attr)?.to_string();
            let value = arena.attribute_value(attr)?.clone();
            Some((name, value))
        })
        .collect();
    let children = arena
        .iter_child_nodes(id)
        .filter_map(|child| snapshot(arena, child))
        .collect();

    Some(NodeSnapshot {
        node_type,
        node_name: arena.node_name(id)?.to_string(),
        data: arena
            .data(id)
            .map(str::to_string)
            .or_else(|| arena.attribute_value(id).map(ToString::to_string)),
        attributes,
        children,
    })
}

/// Subtree snapshot as pretty-printed JSON
pub fn to_json(arena: &DomArena, id: NodeId) -> Result<String> {
    let snapshot = snapshot(arena, id).ok_or(DomError::NodeNotFound(id))?;
    Ok(serde_json::to_string_pretty(&snapshot)?)
}
