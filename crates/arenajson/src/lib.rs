//! An arena-backed JSON document model.
//!
//! [`Document::parse`] builds an ordered, mutable tree of tagged nodes in
//! a single pass over a byte slice. Every node lives in the document's own
//! arena and is addressed by the opaque [`NodeId`] handle; nothing is
//! individually freed until the whole `Document` is dropped.
//!
//! Object lookup is served by two on-demand indexes that are built lazily
//! and kept mutually exclusive: a sorted-array snapshot for
//! [`Document::object_get_node`] and a balanced tree for
//! [`Document::object_find_node`]. Each rebuilds the other away the first
//! time it is used after a mutation that could have made it stale; see
//! `DESIGN.md` for the exact crossover rule.
//!
//! String escaping/unescaping ([`codec`]) and serialization
//! ([`Document::to_compact`]/[`Document::to_pretty`]) are both lazy:
//! nothing is decoded or re-encoded until it is asked for.
//!
//! # Examples
//!
//! ```
//! use arenajson::Document;
//!
//! let doc = Document::parse(br#"{"a": [1, 2, 3]}"#);
//! assert!(!doc.is_error());
//! let root = doc.root();
//! assert!(doc.is_object(root));
//! ```
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod accessors;
mod arena;
mod builder;
mod codec;
mod container;
mod document;
mod error;
mod node;
mod object_index;
mod parser;
mod path;
mod serialize;

pub use accessors::{FromNodeView, Lookup};
pub use container::{ChildId, EntryId};
pub use document::Document;
pub use error::{ErrorSource, ParseError, SyntaxError};
pub use node::{NodeId, Tag};
pub use serialize::SerializeOptions;

pub mod codecs {
    //! Stand-alone escape/unescape and UTF-8-filtering functions, exposed
    //! for callers that want to process JSON string bytes outside of a
    //! [`crate::Document`].
    pub use crate::codec::{copy_valid_utf8, decode, encode, strip_invalid_utf8};
}
