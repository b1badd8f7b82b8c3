//! Arena-backed record chain and the adjacency engine
//!
//! Every record of a tree lives in one `Vec<Record>` and the tree itself is
//! a single doubly-linked chain threaded through it, in document order:
//!
//! ```text
//! <div id="a"><span></span>text</div>
//!
//! [DIV] <-> [@id] <-> [SPAN] <-> [/SPAN] <-> [#text] <-> [/DIV]
//!   ^ start   ^ attribute run     ^ child span          ^ boundary
//! ```
//!
//! An element and everything it contains is the contiguous span from its
//! start record to its boundary marker. Moving or removing an element is
//! splicing that span, so every structural change is O(1) apart from the
//! hierarchy check, which walks the parent's ancestors.

use crate::error::{DomError, Result};
use crate::types::{AttrValue, NodeId, Record, RecordKind};

/// Storage and chain surgery for one tree
///
/// Design:
/// - Single Vec<Record>, records are never moved or freed
/// - `link_adjacent` is the only place `prev`/`next` get joined
/// - Every public mutation validates fully before touching a link
#[derive(Debug, Clone)]
pub struct DomArena {
    records: Vec<Record>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create arena with specific capacity (in records)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Total number of records, boundary markers included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // --- Record access ---

    fn push(&mut self, record: Record) -> NodeId {
        let id = NodeId::from_index(self.records.len());
        self.records.push(record);
        id
    }

    /// Record behind an id taken from a chain link (always valid)
    pub(crate) fn rec(&self, id: NodeId) -> &Record {
        &self.records[id.index()]
    }

    pub(crate) fn rec_mut(&mut self, id: NodeId) -> &mut Record {
        &mut self.records[id.index()]
    }

    /// Record behind a caller-supplied id; boundary markers are invisible
    pub(crate) fn node(&self, id: NodeId) -> Result<&Record> {
        match self.records.get(id.index()) {
            Some(record) if !record.is_boundary() => Ok(record),
            _ => Err(DomError::NodeNotFound(id)),
        }
    }

    /// Boundary marker of an Element or Document
    fn container_end(&self, id: NodeId) -> Result<NodeId> {
        let record = self.node(id)?;
        record
            .end()
            .ok_or_else(|| DomError::invalid_type("Element or Document", record.kind_label()))
    }

    fn expect_element(&self, id: NodeId) -> Result<()> {
        match &self.node(id)?.kind {
            RecordKind::Element { .. } => Ok(()),
            _ => Err(DomError::invalid_type("Element", self.rec(id).kind_label())),
        }
    }

    /// Last record of a node's span: its boundary for containers, else itself
    pub(crate) fn span_end(&self, id: NodeId) -> NodeId {
        self.rec(id).end().unwrap_or(id)
    }

    // --- Factory ---

    /// Allocate a start record and its boundary marker as one detached span
    fn alloc_container(&mut self, kind: impl FnOnce(NodeId) -> RecordKind) -> NodeId {
        let start = NodeId::from_index(self.records.len());
        let end = NodeId::from_index(self.records.len() + 1);
        self.push(Record::new(kind(end)));
        self.push(Record::new(RecordKind::Boundary { start }));
        self.link_adjacent(Some(start), Some(end));
        start
    }

    /// Create a detached element. The node name is stored upper-cased.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let name = tag_name.to_uppercase();
        self.alloc_container(|end| RecordKind::Element { name, end })
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, data: impl Into<String>) -> NodeId {
        self.push(Record::new(RecordKind::Text { data: data.into() }))
    }

    pub(crate) fn create_document(&mut self) -> NodeId {
        self.alloc_container(|end| RecordKind::Document { end })
    }

    // --- Adjacency primitives ---

    /// Join two chain positions. Sole mutator of `prev`/`next` pairs.
    pub(crate) fn link_adjacent(&mut self, prev: Option<NodeId>, next: Option<NodeId>) {
        if let Some(p) = prev {
            self.rec_mut(p).next = next;
        }
        if let Some(n) = next {
            self.rec_mut(n).prev = prev;
        }
    }

    /// Splice a single record between `prev` and `next`
    pub(crate) fn link_as_siblings(
        &mut self,
        prev: Option<NodeId>,
        node: NodeId,
        next: Option<NodeId>,
    ) {
        self.link_adjacent(prev, Some(node));
        self.link_adjacent(Some(node), next);
    }

    /// Splice a whole span `node..=boundary` between `prev` and `next`
    pub(crate) fn link_subtree_boundaries(
        &mut self,
        prev: Option<NodeId>,
        node: NodeId,
        next: Option<NodeId>,
    ) {
        let end = self.span_end(node);
        self.link_adjacent(prev, Some(node));
        self.link_adjacent(Some(end), next);
    }

    /// Cut a node's span out of its chain and close the gap
    pub(crate) fn detach(&mut self, node: NodeId) {
        let end = self.span_end(node);
        let prev = self.rec(node).prev;
        let after = self.rec(end).next;
        tracing::trace!(node = %node, "detach");

        self.link_adjacent(prev, after);

        let record = self.rec_mut(node);
        record.parent = None;
        record.prev = None;
        self.rec_mut(end).next = None;
    }

    // --- Mutation ---

    /// Check that `child` may become a child of `parent`
    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.container_end(parent)?;

        let record = self.node(child)?;
        match record.kind {
            RecordKind::Element { .. } | RecordKind::Text { .. } => {}
            RecordKind::Document { .. } => return Err(DomError::HierarchyRequest),
            _ => {
                return Err(DomError::invalid_type(
                    "Element or Text",
                    record.kind_label(),
                ))
            }
        }

        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        Ok(())
    }

    /// Whether `node` is a direct child of `parent` (attributes never are)
    fn is_child_of(&self, node: NodeId, parent: NodeId) -> bool {
        match self.node(node) {
            Ok(record) => !record.is_attribute() && record.parent == Some(parent),
            Err(_) => false,
        }
    }

    /// Insert `child` into `parent` before `reference`, or at the end.
    ///
    /// An attached `child` is moved: it is detached from its current
    /// position first. Inserting a node before itself is a no-op.
    ///
    /// # Errors
    ///
    /// - `HierarchyRequest` if `child` is `parent` or one of its ancestors
    /// - `NotFound` if `reference` is not a child of `parent`
    /// - `InvalidNodeType` if `parent` cannot hold children or `child`
    ///   is not an Element or Text
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        if reference == Some(child) {
            return Ok(child);
        }

        self.check_insertable(parent, child)?;

        let next = match reference {
            Some(r) if self.is_child_of(r, parent) => r,
            Some(_) => return Err(DomError::NotFound),
            None => self.span_end(parent),
        };

        self.detach(child);

        // Read after detaching: `child` may have been right before `next`
        let prev = self.rec(next).prev;
        if matches!(self.rec(child).kind, RecordKind::Element { .. }) {
            self.link_subtree_boundaries(prev, child, Some(next));
        } else {
            self.link_as_siblings(prev, child, Some(next));
        }
        self.rec_mut(child).parent = Some(parent);

        tracing::debug!(parent = %parent, child = %child, "inserted node");
        Ok(child)
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Detach a direct child of `parent` and return it
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        self.node(child)?;
        if !self.is_child_of(child, parent) {
            return Err(DomError::NotFound);
        }

        self.detach(child);
        tracing::debug!(parent = %parent, child = %child, "removed node");
        Ok(child)
    }

    /// Remove every child of `parent`, then append `nodes` in order.
    ///
    /// All of `nodes` are validated up front, a failure leaves the
    /// existing children in place.
    pub fn replace_children(&mut self, parent: NodeId, nodes: &[NodeId]) -> Result<()> {
        self.container_end(parent)?;
        for &node in nodes {
            self.check_insertable(parent, node)?;
        }

        let mut cursor = self.first_child(parent);
        while let Some(child) = cursor {
            cursor = self.next_sibling(child);
            self.detach(child);
        }

        for &node in nodes {
            self.insert_before(parent, node, None)?;
        }

        tracing::debug!(parent = %parent, count = nodes.len(), "replaced children");
        Ok(())
    }

    /// Find the attribute record named `name` on `element`
    pub(crate) fn find_attribute(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.iter_attributes(element).find(|&attr| {
            matches!(&self.rec(attr).kind, RecordKind::Attribute { name: n, .. } if n == name)
        })
    }

    /// Set an attribute, updating in place when the name already exists.
    /// New attributes go to the end of the attribute run.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<()> {
        self.expect_element(element)?;
        let value = value.into();

        if let Some(attr) = self.find_attribute(element, name) {
            if let RecordKind::Attribute { value: slot, .. } = &mut self.rec_mut(attr).kind {
                *slot = value;
            }
            return Ok(());
        }

        let after = self.iter_attributes(element).last().unwrap_or(element);
        let next = self.rec(after).next;
        let attr = self.push(Record::new(RecordKind::Attribute {
            name: name.to_string(),
            value,
        }));
        self.link_as_siblings(Some(after), attr, next);
        self.rec_mut(attr).parent = Some(element);

        tracing::debug!(element = %element, name, "added attribute");
        Ok(())
    }

    /// Remove an attribute by name; a missing name is not an error
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<()> {
        self.expect_element(element)?;
        if let Some(attr) = self.find_attribute(element, name) {
            self.detach(attr);
            tracing::debug!(element = %element, name, "removed attribute");
        }
        Ok(())
    }

    /// Replace the value of a text node
    pub fn set_data(&mut self, text: NodeId, data: impl Into<String>) -> Result<()> {
        let label = self.node(text)?.kind_label();
        match &mut self.rec_mut(text).kind {
            RecordKind::Text { data: slot } => {
                *slot = data.into();
                Ok(())
            }
            _ => Err(DomError::invalid_type("Text", label)),
        }
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
