//! The dotted/filter path evaluator.
//!
//! A path is a `.`-separated sequence of segments (`\.` escapes a literal
//! dot inside a segment). At an array node, a segment containing an
//! unescaped `=` is a `key=value` filter selecting the first array
//! element that is an object whose scanned key matches `value`
//! byte-for-byte; a segment of plain digits is a 0-based index (a
//! non-numeric segment is a miss, never index `0`). At an object or
//! scalar node, a segment is a plain key lookup via linear scan. Any miss
//! at any step short-circuits the whole path to `None`.

use alloc::vec::Vec;

use crate::document::Document;
use crate::node::NodeId;

fn split_segments(path: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < path.len() {
        match path[i] {
            b'\\' if i + 1 < path.len() => {
                i += 2;
            }
            b'.' => {
                segments.push(&path[start..i]);
                i += 1;
                start = i;
            }
            _ => {
                i += 1;
            }
        }
    }
    segments.push(&path[start..]);
    segments
}

fn unescape_dots(segment: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(segment.len());
    let mut i = 0;
    while i < segment.len() {
        if segment[i] == b'\\' && i + 1 < segment.len() {
            out.push(segment[i + 1]);
            i += 2;
        } else {
            out.push(segment[i]);
            i += 1;
        }
    }
    out
}

fn parse_index(segment: &[u8]) -> Option<usize> {
    if segment.is_empty() || !segment.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut n = 0usize;
    for &b in segment {
        n = n.checked_mul(10)?.checked_add((b - b'0') as usize)?;
    }
    Some(n)
}

fn find_filter_eq(segment: &[u8]) -> Option<usize> {
    segment.iter().position(|&b| b == b'=')
}

impl Document {
    fn path_step(&mut self, current: NodeId, segment: &[u8]) -> Option<NodeId> {
        if self.is_array(current) {
            if let Some(eq) = find_filter_eq(segment) {
                let key = unescape_dots(&segment[..eq]);
                let value = unescape_dots(&segment[eq + 1..]);
                return self.array_scan(current).find(|&elem| {
                    self.is_object(elem)
                        && self.object_scan(elem).any(|(k, v)| {
                            k == key.as_slice() && self.raw_view(v) == Some(value.as_slice())
                        })
                });
            }
            let idx = parse_index(segment)?;
            return self.array_nth(current, idx);
        }
        let key = unescape_dots(segment);
        self.object_scan_get(current, &key)
    }

    /// Evaluates a dotted path starting at `root`, returning the raw
    /// (still-encoded) node it resolves to, if any.
    #[must_use]
    pub fn path_raw(&mut self, root: NodeId, path: &[u8]) -> Option<NodeId> {
        let segments = split_segments(path);
        let mut current = root;
        for segment in segments {
            current = self.path_step(current, segment)?;
        }
        Some(current)
    }

    /// Evaluates a dotted path starting at `root`, returning the decoded
    /// byte view of the resolved node (see [`Document::decoded_view`]), if
    /// the path resolves and the target carries a raw view.
    #[must_use]
    pub fn path_decoded(&mut self, root: NodeId, path: &[u8]) -> Option<alloc::borrow::Cow<'_, [u8]>> {
        let id = self.path_raw(root, path)?;
        self.decoded_view(id)
    }
}
