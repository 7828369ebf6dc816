//! The dual-pass (estimate, then fill) compact and pretty serializer.
//!
//! Every string *value* is copied through the valid-UTF-8 filter
//! ([`crate::codec::copy_valid_utf8`]); keys are written verbatim,
//! unescaped and unfiltered, since they may contain arbitrary bytes (no
//! UTF-8 validation is performed at parse time). Output is therefore a
//! byte buffer rather than a `String`: because the filter can only shrink
//! its input, a byte-exact estimate computed up front is always a safe
//! upper bound for the fill pass that follows it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::codec;
use crate::document::Document;
use crate::node::{NodeId, Tag};

/// Pretty-printing knobs.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct SerializeOptions {
    /// Spaces per indent level. `0` is treated as `2`, matching the
    /// reference implementation's default.
    pub indent_step: u32,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { indent_step: 2 }
    }
}

impl SerializeOptions {
    fn step(self) -> usize {
        if self.indent_step == 0 {
            2
        } else {
            self.indent_step as usize
        }
    }
}

impl Document {
    /// A conservative upper bound, in bytes, on the compact serialization
    /// of `id`.
    #[must_use]
    pub fn estimate_compact(&self, id: NodeId) -> usize {
        match self.tag(id) {
            Tag::Object => {
                // `"` + key + `"` + `:` + value, plus a leading `,` for
                // every entry but the first.
                2 + self
                    .object_scan(id)
                    .map(|(k, v)| k.len() + 4 + self.estimate_compact(v))
                    .sum::<usize>()
            }
            Tag::Array => {
                2 + self
                    .array_scan(id)
                    .map(|v| 1 + self.estimate_compact(v))
                    .sum::<usize>()
            }
            Tag::String => self.raw_view(id).map_or(2, |v| v.len() + 2),
            _ => self.raw_view(id).map_or(4, <[u8]>::len),
        }
    }

    /// Appends the compact serialization of `id` to `out`.
    pub fn append_compact(&self, id: NodeId, out: &mut Vec<u8>) {
        match self.tag(id) {
            Tag::Object => {
                out.push(b'{');
                let mut first = true;
                for (k, v) in self.object_scan(id) {
                    if !first {
                        out.push(b',');
                    }
                    first = false;
                    out.push(b'"');
                    out.extend_from_slice(k);
                    out.extend_from_slice(b"\":");
                    self.append_compact(v, out);
                }
                out.push(b'}');
            }
            Tag::Array => {
                out.push(b'[');
                let mut first = true;
                for v in self.array_scan(id) {
                    if !first {
                        out.push(b',');
                    }
                    first = false;
                    self.append_compact(v, out);
                }
                out.push(b']');
            }
            Tag::String => {
                out.push(b'"');
                if let Some(raw) = self.raw_view(id) {
                    codec::copy_valid_utf8(raw, out);
                }
                out.push(b'"');
            }
            _ => {
                if let Some(raw) = self.raw_view(id) {
                    out.extend_from_slice(raw);
                } else {
                    out.extend_from_slice(b"null");
                }
            }
        }
    }

    /// Serializes `id` compactly into a fresh buffer, pre-sized with
    /// [`Document::estimate_compact`].
    #[must_use]
    pub fn to_compact(&self, id: NodeId) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.estimate_compact(id));
        self.append_compact(id, &mut out);
        out
    }

    /// As [`Document::to_compact`], lossily decoded to UTF-8 for
    /// display/logging convenience.
    #[must_use]
    pub fn to_string_compact(&self, id: NodeId) -> String {
        String::from_utf8_lossy(&self.to_compact(id)).into_owned()
    }

    /// A conservative upper bound, in bytes, on the pretty serialization
    /// of `id` with `options`.
    #[must_use]
    pub fn estimate_pretty(&self, id: NodeId, options: SerializeOptions) -> usize {
        self.estimate_pretty_at(id, options, 0)
    }

    fn estimate_pretty_at(&self, id: NodeId, options: SerializeOptions, depth: usize) -> usize {
        let step = options.step();
        match self.tag(id) {
            Tag::Object => {
                let entries: Vec<_> = self.object_scan(id).collect();
                if entries.is_empty() {
                    return 2;
                }
                let mut total = 1;
                for (i, (k, v)) in entries.iter().enumerate() {
                    total += 1 + (depth + 1) * step + k.len() + 2 + 2;
                    total += self.estimate_pretty_at(*v, options, depth + 1);
                    if i + 1 < entries.len() {
                        total += 1;
                    }
                }
                total += 1 + depth * step + 1;
                total
            }
            Tag::Array => {
                let elems: Vec<_> = self.array_scan(id).collect();
                if elems.is_empty() {
                    return 2;
                }
                let mut total = 1;
                for (i, v) in elems.iter().enumerate() {
                    total += 1 + (depth + 1) * step;
                    total += self.estimate_pretty_at(*v, options, depth + 1);
                    if i + 1 < elems.len() {
                        total += 1;
                    }
                }
                total += 1 + depth * step + 1;
                total
            }
            _ => self.estimate_compact(id),
        }
    }

    /// Appends the pretty serialization of `id` to `out`.
    pub fn append_pretty(&self, id: NodeId, options: SerializeOptions, out: &mut Vec<u8>) {
        self.append_pretty_at(id, options, 0, out);
    }

    fn append_pretty_at(&self, id: NodeId, options: SerializeOptions, depth: usize, out: &mut Vec<u8>) {
        let step = options.step();
        match self.tag(id) {
            Tag::Object => {
                let entries: Vec<_> = self.object_scan(id).collect();
                if entries.is_empty() {
                    out.extend_from_slice(b"{}");
                    return;
                }
                out.push(b'{');
                for (i, (k, v)) in entries.iter().enumerate() {
                    out.push(b'\n');
                    indent(out, (depth + 1) * step);
                    out.push(b'"');
                    out.extend_from_slice(k);
                    out.extend_from_slice(b"\": ");
                    self.append_pretty_at(*v, options, depth + 1, out);
                    if i + 1 < entries.len() {
                        out.push(b',');
                    }
                }
                out.push(b'\n');
                indent(out, depth * step);
                out.push(b'}');
            }
            Tag::Array => {
                let elems: Vec<_> = self.array_scan(id).collect();
                if elems.is_empty() {
                    out.extend_from_slice(b"[]");
                    return;
                }
                out.push(b'[');
                for (i, v) in elems.iter().enumerate() {
                    out.push(b'\n');
                    indent(out, (depth + 1) * step);
                    self.append_pretty_at(*v, options, depth + 1, out);
                    if i + 1 < elems.len() {
                        out.push(b',');
                    }
                }
                out.push(b'\n');
                indent(out, depth * step);
                out.push(b']');
            }
            _ => self.append_compact(id, out),
        }
    }

    /// Serializes `id` with pretty-printed indentation into a fresh
    /// buffer, pre-sized with [`Document::estimate_pretty`].
    #[must_use]
    pub fn to_pretty(&self, id: NodeId, options: SerializeOptions) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.estimate_pretty(id, options));
        self.append_pretty(id, options, &mut out);
        out
    }

    /// As [`Document::to_pretty`], lossily decoded to UTF-8 for
    /// display/logging convenience.
    #[must_use]
    pub fn to_string_pretty(&self, id: NodeId, options: SerializeOptions) -> String {
        String::from_utf8_lossy(&self.to_pretty(id, options)).into_owned()
    }
}

fn indent(out: &mut Vec<u8>, n: usize) {
    out.resize(out.len() + n, b' ');
}

#[cfg(feature = "io")]
impl Document {
    /// Writes the compact serialization of `id` to an `std::io::Write`
    /// sink.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `sink`.
    pub fn write_compact(&self, id: NodeId, sink: &mut impl std::io::Write) -> std::io::Result<()> {
        sink.write_all(&self.to_compact(id))
    }

    /// Writes the pretty serialization of `id` to an `std::io::Write`
    /// sink.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `sink`.
    pub fn write_pretty(
        &self,
        id: NodeId,
        options: SerializeOptions,
        sink: &mut impl std::io::Write,
    ) -> std::io::Result<()> {
        sink.write_all(&self.to_pretty(id, options))
    }
}
