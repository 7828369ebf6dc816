//! Node constructors for building documents programmatically.

use crate::codec;
use crate::container::{ArrayData, ObjectData};
use crate::document::Document;
use crate::node::{NodeData, NodeId, Tag};

impl Document {
    /// Creates a fresh document whose (otherwise unused) root is the
    /// `null` literal. Useful as a scratch arena when the caller is going
    /// to build a tree via [`Document::new_object`]/[`Document::new_array`]
    /// and track the real root themselves.
    #[must_use]
    pub fn new_null_document() -> Self {
        Self::empty_with_root(NodeData::Scalar(crate::arena::ByteSpan::EMPTY), Tag::Null)
    }

    /// Creates a fresh, empty document whose root is an empty object.
    #[must_use]
    pub fn new_object_document() -> Self {
        Self::empty_with_root(NodeData::Object(ObjectData::default()), Tag::Object)
    }

    /// Creates a fresh, empty document whose root is an empty array.
    #[must_use]
    pub fn new_array_document() -> Self {
        Self::empty_with_root(NodeData::Array(ArrayData::default()), Tag::Array)
    }

    /// Allocates a new, empty object node. The caller is responsible for
    /// linking it into a parent array or object.
    pub fn new_object(&mut self) -> NodeId {
        self.alloc_node(Tag::Object, None, NodeData::Object(ObjectData::default()))
    }

    /// Allocates a new, empty array node. The caller is responsible for
    /// linking it into a parent array or object.
    pub fn new_array(&mut self) -> NodeId {
        self.alloc_node(Tag::Array, None, NodeData::Array(ArrayData::default()))
    }

    /// Allocates a string node from bytes that are already in their
    /// escaped (JSON-ready) form.
    pub fn new_string(&mut self, already_encoded: &[u8]) -> NodeId {
        let span = self.bytes.push(already_encoded);
        self.alloc_node(Tag::String, None, NodeData::Scalar(span))
    }

    /// Allocates a string node from raw bytes, escaping them first.
    pub fn new_string_encode(&mut self, raw: &[u8]) -> NodeId {
        let encoded = codec::encode(raw);
        let span = self.bytes.push(&encoded);
        self.alloc_node(Tag::String, None, NodeData::Scalar(span))
    }

    /// Allocates a `true` or `false` literal node.
    pub fn new_bool(&mut self, value: bool) -> NodeId {
        let (tag, bytes) = if value {
            (Tag::True, b"true".as_slice())
        } else {
            (Tag::False, b"false".as_slice())
        };
        let cached = if value {
            self.well_known.r#true
        } else {
            self.well_known.r#false
        };
        let span = if let Some(span) = cached {
            span
        } else {
            let span = self.bytes.push(bytes);
            if value {
                self.well_known.r#true = Some(span);
            } else {
                self.well_known.r#false = Some(span);
            }
            span
        };
        self.alloc_node(tag, None, NodeData::Scalar(span))
    }

    /// Allocates a `null` literal node.
    pub fn new_null(&mut self) -> NodeId {
        let span = if let Some(span) = self.well_known.null {
            span
        } else {
            let span = self.bytes.push(b"null");
            self.well_known.null = Some(span);
            span
        };
        self.alloc_node(Tag::Null, None, NodeData::Scalar(span))
    }

    /// Allocates the literal `0` node.
    pub fn new_zero(&mut self) -> NodeId {
        let span = if let Some(span) = self.well_known.zero {
            span
        } else {
            let span = self.bytes.push(b"0");
            self.well_known.zero = Some(span);
            span
        };
        self.alloc_node(Tag::Zero, None, NodeData::Scalar(span))
    }

    /// Allocates a number node from a signed integer.
    pub fn new_number_i64(&mut self, n: i64) -> NodeId {
        if n == 0 {
            return self.new_zero();
        }
        let mut buf = itoa_buf();
        let s = format_i64(n, &mut buf);
        let span = self.bytes.push(s);
        self.alloc_node(Tag::Number, None, NodeData::Scalar(span))
    }

    /// Allocates a number node from an existing integer-literal string
    /// (the caller is responsible for the grammar: optional `-`, then a
    /// lone `0` or a nonzero digit followed by digits).
    pub fn new_number_string(&mut self, s: &str) -> NodeId {
        let tag = if s == "0" { Tag::Zero } else { Tag::Number };
        let span = self.bytes.push(s.as_bytes());
        self.alloc_node(tag, None, NodeData::Scalar(span))
    }

    /// Allocates a decimal/exponent number node from an existing literal
    /// string.
    pub fn new_decimal_string(&mut self, s: &str) -> NodeId {
        let span = self.bytes.push(s.as_bytes());
        self.alloc_node(Tag::Decimal, None, NodeData::Scalar(span))
    }
}

fn itoa_buf() -> [u8; 20] {
    [0u8; 20]
}

fn format_i64<'a>(n: i64, buf: &'a mut [u8; 20]) -> &'a [u8] {
    let neg = n < 0;
    let mut v = if neg { (n as i128).unsigned_abs() } else { n as u128 };
    let mut i = buf.len();
    if v == 0 {
        i -= 1;
        buf[i] = b'0';
    }
    while v > 0 {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
    }
    if neg {
        i -= 1;
        buf[i] = b'-';
    }
    &buf[i..]
}
