//! The dual on-demand lookup index over an object's entries.
//!
//! An object carries at most one of a sorted-array snapshot (built for
//! [`crate::Document::object_get_node`]) or a balanced tree (built for
//! [`crate::Document::object_find_node`]); the two are mutually exclusive, and each
//! lookup family rebuilds the other away if it finds itself stale. See
//! `DESIGN.md` for the crossover rule traced from the reference
//! implementation this crate's behavior is pinned to.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::arena::ByteArena;
use crate::container::{EntryId, ObjectData, ObjectEntry};

/// The current state of an object's lookup index.
#[derive(Debug)]
pub(crate) enum ObjectIndex {
    /// No index has been built, or the last mutation invalidated it.
    None,
    /// A sorted snapshot of entry ids, built for `get`.
    ///
    /// Never constructed empty: an object with zero entries is
    /// represented as `ObjectIndex::None`, matching the upstream
    /// invariant that a nonzero sorted count always accompanies a
    /// non-null snapshot.
    Sorted(Vec<EntryId>),
    /// A key-ordered tree, built for `find`.
    Tree(BTreeMap<Box<[u8]>, EntryId>),
}

impl Default for ObjectIndex {
    fn default() -> Self {
        ObjectIndex::None
    }
}

fn linked_ids(data: &ObjectData, entries: &[ObjectEntry]) -> Vec<EntryId> {
    let mut ids = Vec::with_capacity(data.count as usize);
    let mut cur = data.head;
    while let Some(id) = cur {
        ids.push(id);
        cur = entries[id.index()].next;
    }
    ids
}

pub(crate) fn ensure_sorted(data: &mut ObjectData, entries: &[ObjectEntry], bytes: &ByteArena) {
    let needs_rebuild = match &data.index {
        ObjectIndex::Tree(_) => true,
        ObjectIndex::None => data.head.is_some(),
        ObjectIndex::Sorted(_) => false,
    };
    if !needs_rebuild {
        return;
    }
    let mut ids = linked_ids(data, entries);
    ids.sort_by(|&a, &b| {
        bytes
            .get(entries[a.index()].key)
            .cmp(bytes.get(entries[b.index()].key))
    });
    data.index = if ids.is_empty() {
        ObjectIndex::None
    } else {
        ObjectIndex::Sorted(ids)
    };
}

pub(crate) fn ensure_tree(data: &mut ObjectData, entries: &[ObjectEntry], bytes: &ByteArena) {
    let needs_rebuild = match &data.index {
        ObjectIndex::Sorted(_) => true,
        ObjectIndex::None => data.head.is_some(),
        ObjectIndex::Tree(_) => false,
    };
    if !needs_rebuild {
        return;
    }
    let mut map = BTreeMap::new();
    let mut cur = data.head;
    while let Some(id) = cur {
        let key: Box<[u8]> = bytes.get(entries[id.index()].key).into();
        map.entry(key).or_insert(id);
        cur = entries[id.index()].next;
    }
    data.index = ObjectIndex::Tree(map);
}

/// The sorted-snapshot lookup backing [`crate::Document::object_get_node`].
pub(crate) fn get(
    data: &mut ObjectData,
    entries: &[ObjectEntry],
    bytes: &ByteArena,
    key: &[u8],
) -> Option<EntryId> {
    ensure_sorted(data, entries, bytes);
    if let ObjectIndex::Sorted(ids) = &data.index {
        let pos = ids.partition_point(|&id| bytes.get(entries[id.index()].key) < key);
        if let Some(&id) = ids.get(pos) {
            if bytes.get(entries[id.index()].key) == key {
                return Some(id);
            }
        }
    }
    None
}

/// The tree lookup backing [`crate::Document::object_find_node`].
pub(crate) fn find(
    data: &mut ObjectData,
    entries: &[ObjectEntry],
    bytes: &ByteArena,
    key: &[u8],
) -> Option<EntryId> {
    ensure_tree(data, entries, bytes);
    if let ObjectIndex::Tree(map) = &data.index {
        map.get(key).copied()
    } else {
        None
    }
}

/// Index maintenance after `ajsono_erase`-equivalent removal.
pub(crate) fn on_erase(data: &mut ObjectData, key: &[u8], erased: EntryId) {
    match &mut data.index {
        ObjectIndex::Sorted(_) => data.index = ObjectIndex::None,
        ObjectIndex::Tree(map) => {
            if map.get(key) == Some(&erased) {
                map.remove(key);
            }
        }
        ObjectIndex::None => {}
    }
}

/// Index maintenance after a `set`-style append (no rebuild to a new kind,
/// only upkeep of whichever index already happens to be active).
pub(crate) fn on_set_append(data: &mut ObjectData, key: &[u8], id: EntryId) {
    match &mut data.index {
        ObjectIndex::Sorted(_) => data.index = ObjectIndex::None,
        ObjectIndex::Tree(map) => {
            let key: Box<[u8]> = key.into();
            map.insert(key, id);
        }
        ObjectIndex::None => {}
    }
}

/// Index maintenance after an `insert`-style append, which (unlike `set`)
/// always leaves the tree containing the freshly appended entry, building
/// one from scratch if no index existed yet.
pub(crate) fn on_insert_append(data: &mut ObjectData, key: &[u8], id: EntryId) {
    let key: Box<[u8]> = key.into();
    match &mut data.index {
        ObjectIndex::Tree(map) => {
            map.insert(key, id);
        }
        ObjectIndex::Sorted(_) | ObjectIndex::None => {
            let mut map = BTreeMap::new();
            map.insert(key, id);
            data.index = ObjectIndex::Tree(map);
        }
    }
}
