//! Document - owner of a tree and its node factory
//!
//! A `Document` owns the arena every node of the tree lives in, plus the
//! document record at the top of the chain. All `DomArena` operations are
//! available on it directly.
//!
//! Wiring up a default `html`/`head`/`body` shape is left to the embedding
//! application; the slots below only remember what it chose.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::serializer::{DomSerializer, SerializerConfig};
use crate::types::{NodeId, NodeSnapshot, NodeType};
use crate::utils;
use std::fmt;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone)]
pub struct Document {
    arena: DomArena,
    root: NodeId,
    serializer: DomSerializer,

    document_element: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
}

impl Document {
    /// Create an empty document with the default serializer configuration
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        let mut arena = DomArena::new();
        let root = arena.create_document();
        Self {
            arena,
            root,
            serializer: DomSerializer::with_config(config),
            document_element: None,
            head: None,
            body: None,
        }
    }

    /// The document node itself
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }

    pub fn config(&self) -> &SerializerConfig {
        self.serializer.config()
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.document_element
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    pub fn set_document_element(&mut self, element: NodeId) -> Result<()> {
        self.document_element = Some(self.expect_element(element)?);
        Ok(())
    }

    pub fn set_head(&mut self, element: NodeId) -> Result<()> {
        self.head = Some(self.expect_element(element)?);
        Ok(())
    }

    pub fn set_body(&mut self, element: NodeId) -> Result<()> {
        self.body = Some(self.expect_element(element)?);
        Ok(())
    }

    fn expect_element(&self, id: NodeId) -> Result<NodeId> {
        match self.arena.node_type(id) {
            Some(NodeType::Element) => Ok(id),
            Some(other) => Err(DomError::invalid_type("Element", other)),
            None => Err(DomError::NodeNotFound(id)),
        }
    }

    /// Full serialization of a node using this document's configuration
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        self.serializer.outer_html(&self.arena, id)
    }

    /// Serialization of a node's children using this document's configuration
    pub fn inner_html(&self, id: NodeId) -> Result<String> {
        self.serializer.inner_html(&self.arena, id)
    }

    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        utils::snapshot(&self.arena, id)
    }

    pub fn to_json(&self, id: NodeId) -> Result<String> {
        utils::to_json(&self.arena, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Document {
    type Target = DomArena;

    fn deref(&self) -> &DomArena {
        &self.arena
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }
}

/// Whole-document serialization
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markup = self.outer_html(self.root).map_err(|_| fmt::Error)?;
        f.write_str(&markup)
    }
}
