//! Intrusive child-list storage for arrays and objects.

use alloc::vec::Vec;

use crate::arena::ByteSpan;
use crate::node::NodeId;
use crate::object_index::ObjectIndex;

/// A handle to an array element link, stored in a document-owned side arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildId(pub(crate) u32);

impl ChildId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A handle to an object entry link, stored in a document-owned side arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) u32);

impl EntryId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) struct ArrayChild {
    pub(crate) value: NodeId,
    pub(crate) next: Option<ChildId>,
    pub(crate) prev: Option<ChildId>,
}

/// An array's child count, intrusive list endpoints, and lazily built
/// random-access snapshot.
///
/// The snapshot is a distinct optimization layer from the linked list: it
/// is invalidated (set to `None`) on every structural mutation and rebuilt
/// lazily the next time indexed access is requested.
#[derive(Debug, Default)]
pub(crate) struct ArrayData {
    pub(crate) count: u32,
    pub(crate) head: Option<ChildId>,
    pub(crate) tail: Option<ChildId>,
    pub(crate) snapshot: Option<Vec<NodeId>>,
}

#[derive(Debug)]
pub(crate) struct ObjectEntry {
    pub(crate) key: ByteSpan,
    pub(crate) value: NodeId,
    pub(crate) next: Option<EntryId>,
    pub(crate) prev: Option<EntryId>,
}

/// An object's entry count, intrusive list endpoints, and current lookup
/// index (see [`ObjectIndex`]).
#[derive(Debug, Default)]
pub(crate) struct ObjectData {
    pub(crate) count: u32,
    pub(crate) head: Option<EntryId>,
    pub(crate) tail: Option<EntryId>,
    pub(crate) index: ObjectIndex,
}
