//! The arena-backed document: node storage plus navigation and mutation.

use alloc::vec::Vec;

use crate::arena::{ByteArena, ByteSpan};
use crate::codec;
use crate::container::{ArrayChild, ArrayData, ChildId, EntryId, ObjectData, ObjectEntry};
use crate::error::ParseError;
use crate::node::{NodeData, NodeId, NodeSlot, Tag};
use crate::object_index;

#[derive(Default)]
pub(crate) struct WellKnown {
    pub(crate) null: Option<ByteSpan>,
    pub(crate) r#true: Option<ByteSpan>,
    pub(crate) r#false: Option<ByteSpan>,
    pub(crate) zero: Option<ByteSpan>,
}

/// An arena-backed, mutable JSON document.
///
/// A `Document` owns every node it contains: nodes are appended to an
/// internal arena and are never individually freed. Dropping the
/// `Document` releases everything at once. All navigation and mutation
/// goes through [`NodeId`] handles rather than references, so a
/// `Document` can be freely restructured without fighting the borrow
/// checker.
pub struct Document {
    pub(crate) nodes: Vec<NodeSlot>,
    pub(crate) bytes: ByteArena,
    pub(crate) children: Vec<ArrayChild>,
    pub(crate) entries: Vec<ObjectEntry>,
    pub(crate) root: NodeId,
    pub(crate) well_known: WellKnown,
}

impl Document {
    pub(crate) fn empty_with_root(root_data: NodeData, tag: Tag) -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            bytes: ByteArena::new(),
            children: Vec::new(),
            entries: Vec::new(),
            root: NodeId(0),
            well_known: WellKnown::default(),
        };
        let root = doc.alloc_node(tag, None, root_data);
        doc.root = root;
        doc
    }

    pub(crate) fn alloc_node(&mut self, tag: Tag, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeSlot { tag, parent, data });
        id
    }

    fn slot(&self, id: NodeId) -> &NodeSlot {
        &self.nodes[id.index()]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut NodeSlot {
        &mut self.nodes[id.index()]
    }

    /// The document's root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The tag of a node.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Tag {
        self.slot(id).tag
    }

    /// The parent of a node, or `None` for the root (or a node that has
    /// since been erased from its former parent).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).parent
    }

    /// Whether the root node is a parse-error placeholder.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.tag(self.root) == Tag::Error
    }

    /// The parse error, if parsing failed.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match &self.slot(self.root).data {
            NodeData::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if `id` names an object node.
    #[must_use]
    pub fn is_object(&self, id: NodeId) -> bool {
        self.tag(id) == Tag::Object
    }

    /// Returns `true` if `id` names an array node.
    #[must_use]
    pub fn is_array(&self, id: NodeId) -> bool {
        self.tag(id) == Tag::Array
    }

    /// Returns `true` if `id` names the `null` literal.
    #[must_use]
    pub fn is_null(&self, id: NodeId) -> bool {
        self.tag(id) == Tag::Null
    }

    /// Returns `true` if `id` names `true` or `false`.
    #[must_use]
    pub fn is_bool(&self, id: NodeId) -> bool {
        self.tag(id).is_bool()
    }

    /// Returns `true` if `id` names a string node.
    #[must_use]
    pub fn is_string(&self, id: NodeId) -> bool {
        self.tag(id) == Tag::String
    }

    /// Returns `true` if `id` names a numeric literal (`0`, an integer, or
    /// a decimal/exponent form).
    #[must_use]
    pub fn is_number(&self, id: NodeId) -> bool {
        self.tag(id).is_number()
    }

    /// The raw (still-encoded for strings) byte view of a node, or `None`
    /// for container/null/error nodes, matching [`Tag::has_raw_view`].
    #[must_use]
    pub fn raw_view(&self, id: NodeId) -> Option<&[u8]> {
        let slot = self.slot(id);
        if !slot.tag.has_raw_view() {
            return None;
        }
        match &slot.data {
            NodeData::Scalar(span) => Some(self.bytes.get(*span)),
            _ => None,
        }
    }

    /// The decoded byte view of a node: for a string this unescapes it,
    /// for any other tag `>= Tag::String` it is identical to
    /// [`Document::raw_view`], and for everything else it is `None`.
    #[must_use]
    pub fn decoded_view(&self, id: NodeId) -> Option<alloc::borrow::Cow<'_, [u8]>> {
        let raw = self.raw_view(id)?;
        if self.tag(id) == Tag::String {
            Some(codec::decode(raw))
        } else {
            Some(alloc::borrow::Cow::Borrowed(raw))
        }
    }

    /// Returns `true` if `b` is one of the four JSON whitespace bytes.
    pub(crate) fn is_json_whitespace(b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'\n' | b'\r')
    }

    // --- Arrays ---------------------------------------------------------

    fn array_data(&self, id: NodeId) -> &ArrayData {
        match &self.slot(id).data {
            NodeData::Array(a) => a,
            _ => panic!("node is not an array"),
        }
    }

    fn array_data_mut(&mut self, id: NodeId) -> &mut ArrayData {
        match &mut self.slot_mut(id).data {
            NodeData::Array(a) => a,
            _ => panic!("node is not an array"),
        }
    }

    /// The number of elements in an array.
    #[must_use]
    pub fn array_len(&self, id: NodeId) -> usize {
        self.array_data(id).count as usize
    }

    /// The first element of an array, if non-empty.
    #[must_use]
    pub fn array_first(&self, id: NodeId) -> Option<NodeId> {
        let data = self.array_data(id);
        data.head.map(|c| self.children[c.index()].value)
    }

    /// The last element of an array, if non-empty.
    #[must_use]
    pub fn array_last(&self, id: NodeId) -> Option<NodeId> {
        let data = self.array_data(id);
        data.tail.map(|c| self.children[c.index()].value)
    }

    /// Iterates an array's elements in order.
    pub fn array_scan(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.array_data(id).head;
        core::iter::from_fn(move || {
            let c = cur?;
            let child = &self.children[c.index()];
            cur = child.next;
            Some(child.value)
        })
    }

    /// Iterates an array's elements in reverse order.
    pub fn array_scan_reverse(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.array_data(id).tail;
        core::iter::from_fn(move || {
            let c = cur?;
            let child = &self.children[c.index()];
            cur = child.prev;
            Some(child.value)
        })
    }

    /// Returns the `n`th element (0-based), building (or reusing) the
    /// array's random-access snapshot.
    pub fn array_nth(&mut self, id: NodeId, n: usize) -> Option<NodeId> {
        let data = self.array_data_mut(id);
        if data.snapshot.is_none() {
            let mut v = Vec::with_capacity(data.count as usize);
            let mut cur = data.head;
            while let Some(c) = cur {
                v.push(self.children[c.index()].value);
                cur = self.children[c.index()].next;
            }
            self.array_data_mut(id).snapshot = Some(v);
        }
        self.array_data(id).snapshot.as_ref().and_then(|v| v.get(n).copied())
    }

    /// Appends `value` to the end of an array.
    pub fn array_append(&mut self, array: NodeId, value: NodeId) {
        let child_id = ChildId(self.children.len() as u32);
        let tail = self.array_data(array).tail;
        self.children.push(ArrayChild {
            value,
            next: None,
            prev: tail,
        });
        if let Some(t) = tail {
            self.children[t.index()].next = Some(child_id);
        }
        let data = self.array_data_mut(array);
        data.tail = Some(child_id);
        if data.head.is_none() {
            data.head = Some(child_id);
        }
        data.count += 1;
        data.snapshot = None;
        self.slot_mut(value).parent = Some(array);
    }

    /// Iterates the raw child handles of an array, in order.
    fn array_child_ids(&self, array: NodeId) -> impl Iterator<Item = ChildId> + '_ {
        let mut cur = self.array_data(array).head;
        core::iter::from_fn(move || {
            let c = cur?;
            cur = self.children[c.index()].next;
            Some(c)
        })
    }

    /// Removes `value` from `array` if it is currently one of its direct
    /// children, orphaning its parent pointer. Returns whether anything
    /// was removed.
    pub fn array_erase(&mut self, array: NodeId, value: NodeId) -> bool {
        let Some(child_id) = self
            .array_child_ids(array)
            .find(|&c| self.children[c.index()].value == value)
        else {
            return false;
        };
        let (prev, next) = {
            let child = &self.children[child_id.index()];
            (child.prev, child.next)
        };
        match prev {
            Some(p) => self.children[p.index()].next = next,
            None => self.array_data_mut(array).head = next,
        }
        match next {
            Some(n) => self.children[n.index()].prev = prev,
            None => self.array_data_mut(array).tail = prev,
        }
        let data = self.array_data_mut(array);
        data.count -= 1;
        data.snapshot = None;
        self.slot_mut(value).parent = None;
        true
    }

    /// Unlinks every child from an array, orphaning each child's parent
    /// pointer. Arena memory for the removed children is not reclaimed.
    pub fn array_clear(&mut self, array: NodeId) {
        let values: Vec<NodeId> = self.array_scan(array).collect();
        for v in values {
            self.slot_mut(v).parent = None;
        }
        let data = self.array_data_mut(array);
        data.head = None;
        data.tail = None;
        data.count = 0;
        data.snapshot = None;
    }

    // --- Objects ----------------------------------------------------------

    fn object_data(&self, id: NodeId) -> &ObjectData {
        match &self.slot(id).data {
            NodeData::Object(o) => o,
            _ => panic!("node is not an object"),
        }
    }

    fn object_data_mut(&mut self, id: NodeId) -> &mut ObjectData {
        match &mut self.slot_mut(id).data {
            NodeData::Object(o) => o,
            _ => panic!("node is not an object"),
        }
    }

    /// The number of entries in an object.
    #[must_use]
    pub fn object_len(&self, id: NodeId) -> usize {
        self.object_data(id).count as usize
    }

    /// Iterates the raw entry handles of an object, in insertion order.
    fn object_entry_ids(&self, id: NodeId) -> impl Iterator<Item = EntryId> + '_ {
        let mut cur = self.object_data(id).head;
        core::iter::from_fn(move || {
            let e = cur?;
            cur = self.entries[e.index()].next;
            Some(e)
        })
    }

    /// Iterates an object's entries as `(key bytes, value)` pairs, in
    /// insertion order.
    pub fn object_scan(&self, id: NodeId) -> impl Iterator<Item = (&[u8], NodeId)> + '_ {
        let mut cur = self.object_data(id).head;
        core::iter::from_fn(move || {
            let e = cur?;
            let entry = &self.entries[e.index()];
            cur = entry.next;
            Some((self.bytes.get(entry.key), entry.value))
        })
    }

    /// Iterates an object's entries in reverse insertion order.
    pub fn object_scan_reverse(&self, id: NodeId) -> impl Iterator<Item = (&[u8], NodeId)> + '_ {
        let mut cur = self.object_data(id).tail;
        core::iter::from_fn(move || {
            let e = cur?;
            let entry = &self.entries[e.index()];
            cur = entry.prev;
            Some((self.bytes.get(entry.key), entry.value))
        })
    }

    /// Appends a new `key: value` entry unconditionally, without touching
    /// either lookup index. Duplicate keys are legal: first-occurrence
    /// lookup policy only takes effect when an index is (re)built.
    pub fn object_append(&mut self, object: NodeId, key: &[u8], value: NodeId) {
        let key_span = self.bytes.push(key);
        self.object_append_span(object, key_span, value);
    }

    fn object_append_span(&mut self, object: NodeId, key_span: ByteSpan, value: NodeId) {
        let entry_id = EntryId(self.entries.len() as u32);
        let tail = self.object_data(object).tail;
        self.entries.push(ObjectEntry {
            key: key_span,
            value,
            next: None,
            prev: tail,
        });
        if let Some(t) = tail {
            self.entries[t.index()].next = Some(entry_id);
        }
        let data = self.object_data_mut(object);
        data.tail = Some(entry_id);
        if data.head.is_none() {
            data.head = Some(entry_id);
        }
        data.count += 1;
        self.slot_mut(value).parent = Some(object);
    }

    /// Linear-scan lookup by key, returning the first match.
    #[must_use]
    pub fn object_scan_get(&self, id: NodeId, key: &[u8]) -> Option<NodeId> {
        self.object_scan(id).find(|&(k, _)| k == key).map(|(_, v)| v)
    }

    /// Sorted-snapshot lookup by key (builds/rebuilds the snapshot per the
    /// crossover rule).
    pub fn object_get_node(&mut self, id: NodeId, key: &[u8]) -> Option<NodeId> {
        let entry = {
            let data = self.object_data_mut(id);
            object_index::get(data, &self.entries, &self.bytes, key)
        };
        entry.map(|e| self.entries[e.index()].value)
    }

    /// Tree lookup by key (builds/rebuilds the tree per the crossover
    /// rule).
    pub fn object_find_node(&mut self, id: NodeId, key: &[u8]) -> Option<NodeId> {
        let entry = {
            let data = self.object_data_mut(id);
            object_index::find(data, &self.entries, &self.bytes, key)
        };
        entry.map(|e| self.entries[e.index()].value)
    }

    /// Upserts `key: value` by linear scan: replaces the value in place if
    /// the key is already present (leaving whichever index is active
    /// untouched), otherwise appends and performs narrow index upkeep
    /// without ever building a new index kind from scratch.
    pub fn object_set(&mut self, object: NodeId, key: &[u8], value: NodeId) {
        let existing = self
            .object_entry_ids(object)
            .find(|&e| self.bytes.get(self.entries[e.index()].key) == key);
        if let Some(entry_id) = existing {
            let old_value = self.entries[entry_id.index()].value;
            self.slot_mut(old_value).parent = None;
            self.entries[entry_id.index()].value = value;
            self.slot_mut(value).parent = Some(object);
            return;
        }
        let key_span = self.bytes.push(key);
        self.object_append_span(object, key_span, value);
        let entry_id = self.object_data(object).tail.expect("just appended");
        let data = self.object_data_mut(object);
        object_index::on_set_append(data, key, entry_id);
    }

    /// Finds-then-upserts `key: value`: uses [`Document::object_find_node`]
    /// (which may rebuild the tree), replacing the value in place if
    /// found, or appending and ensuring the tree contains the new entry
    /// otherwise.
    pub fn object_insert(&mut self, object: NodeId, key: &[u8], value: NodeId) {
        if let Some(existing) = self.object_find_node(object, key) {
            self.slot_mut(existing).parent = None;
            let entry_id = {
                let data = self.object_data_mut(object);
                object_index::find(data, &self.entries, &self.bytes, key)
                    .expect("object_find_node just returned Some")
            };
            self.entries[entry_id.index()].value = value;
            self.slot_mut(value).parent = Some(object);
            return;
        }
        let key_span = self.bytes.push(key);
        self.object_append_span(object, key_span, value);
        let entry_id = self.object_data(object).tail.expect("just appended");
        let data = self.object_data_mut(object);
        object_index::on_insert_append(data, key, entry_id);
    }

    /// Removes the first entry matching `key`, if any, orphaning its
    /// value's parent pointer. Returns whether anything was removed.
    pub fn object_remove(&mut self, object: NodeId, key: &[u8]) -> bool {
        let Some((_, value)) = self.object_scan(object).find(|&(k, _)| k == key) else {
            return false;
        };
        self.object_erase(object, value)
    }

    /// Removes the entry whose value is `value` from `object`, orphaning
    /// its parent pointer and performing the narrow index-invalidation
    /// rule (drop a sorted snapshot entirely; remove only the exact entry
    /// from a tree). Returns whether anything was removed.
    pub fn object_erase(&mut self, object: NodeId, value: NodeId) -> bool {
        let Some(entry_id) = self
            .object_entry_ids(object)
            .find(|&e| self.entries[e.index()].value == value)
        else {
            return false;
        };
        let key = self.bytes.get(self.entries[entry_id.index()].key).to_vec();
        let (prev, next) = {
            let entry = &self.entries[entry_id.index()];
            (entry.prev, entry.next)
        };
        match prev {
            Some(p) => self.entries[p.index()].next = next,
            None => self.object_data_mut(object).head = next,
        }
        match next {
            Some(n) => self.entries[n.index()].prev = prev,
            None => self.object_data_mut(object).tail = prev,
        }
        let data = self.object_data_mut(object);
        data.count -= 1;
        object_index::on_erase(data, &key, entry_id);
        self.slot_mut(value).parent = None;
        true
    }
}

/// Node ids are opaque; exposing `Debug` only shows the arena index, which
/// is still useful when diagnosing test failures.
impl core::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
