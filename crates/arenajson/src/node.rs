//! Node identities and the closed tag set.

use alloc::boxed::Box;

use crate::arena::ByteSpan;
use crate::container::{ArrayData, ObjectData};
use crate::error::ParseError;

/// A handle to a node stored in a [`crate::Document`]'s arena.
///
/// `NodeId` is a plain index, not a pointer: it is only meaningful paired
/// with the document that produced it, and stays valid for the whole
/// lifetime of that document, since nodes are never individually freed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of node kinds.
///
/// Discriminant values are load-bearing: every tag `>= Tag::String` carries
/// a printable raw byte view (see [`crate::Document::raw_view`]),
/// [`Tag::Zero`], [`Tag::Number`], and [`Tag::Decimal`] are exactly the
/// numeric-like tags, and [`Tag::True`]/[`Tag::False`] are exactly the
/// boolean-like tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// A failed parse. Carries a [`ParseError`].
    Error = 0,
    /// A JSON object.
    Object = 1,
    /// A JSON array.
    Array = 2,
    /// The JSON `null` literal.
    Null = 4,
    /// A JSON string, stored in its still-escaped (encoded) form.
    String = 5,
    /// The JSON `false` literal.
    False = 6,
    /// The literal digit `0`, distinguished from [`Tag::Number`] so callers
    /// can special-case the single most common numeric literal.
    Zero = 7,
    /// An integer literal other than a bare `0` (no `.`, `e`, or `E`).
    Number = 8,
    /// A number literal with a fractional part and/or exponent.
    Decimal = 9,
    /// The JSON `true` literal.
    True = 10,
}

impl Tag {
    /// Whether nodes of this tag carry a printable raw byte view via
    /// [`crate::Document::raw_view`].
    #[must_use]
    pub fn has_raw_view(self) -> bool {
        (self as u8) >= (Tag::String as u8)
    }

    /// Whether this tag is one of the two boolean literals.
    #[must_use]
    pub fn is_bool(self) -> bool {
        matches!(self, Tag::True | Tag::False)
    }

    /// Whether this tag is one of the three numeric-like literals.
    #[must_use]
    pub fn is_number(self) -> bool {
        matches!(self, Tag::Zero | Tag::Number | Tag::Decimal)
    }
}

#[derive(Debug)]
pub(crate) enum NodeData {
    Scalar(ByteSpan),
    Array(ArrayData),
    Object(ObjectData),
    Error(Box<ParseError>),
}

#[derive(Debug)]
pub(crate) struct NodeSlot {
    pub(crate) tag: Tag,
    pub(crate) parent: Option<NodeId>,
    pub(crate) data: NodeData,
}
