//! Flat-chain document tree
//!
//! Build element trees through a small subset of the DOM API and serialize
//! them back to markup, without a browser engine.
//!
//! ## Core Design
//!
//! The tree is not stored as a tree. Each document is one doubly-linked
//! chain of records in document order: an element is a start record plus a
//! boundary marker, attributes and text are single records. Parent/child and
//! sibling relations are read off the chain; moving a subtree is one splice.
//!
//! ```text
//! Document::create_element → DomArena (records + chain links)
//!                                 ↓
//!                   append_child / insert_before (splices)
//!                                 ↓
//!            traversal views ← chain → DomSerializer → markup
//! ```
//!
//! ```
//! use chaindom::Document;
//!
//! let mut doc = Document::new();
//! let div = doc.create_element("div");
//! let span = doc.create_element("span");
//! doc.set_attribute(span, "id", "foo").unwrap();
//! doc.append_child(div, span).unwrap();
//! let bar = doc.create_text_node("bar");
//! doc.append_child(div, bar).unwrap();
//!
//! assert_eq!(doc.outer_html(div).unwrap(), r#"<div><span id="foo"></span>bar</div>"#);
//! ```

pub mod arena;
pub mod document;
pub mod error;
pub mod serializer;
pub mod traversal;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use document::Document;
pub use error::{DomError, Result};
pub use serializer::{DomSerializer, SerializerConfig};
pub use types::*;
