//! Stable slot identifiers for metadata graph nodes.
//!
//! Every node of a [`crate::metadata::graph::MetadataGraph`] lives in an arena slot and is
//! addressed by a [`NodeId`]. Identity of graph entities is identity of slots: two nodes are
//! "the same" only if they share a `NodeId`, regardless of their structural content. Rewrite
//! caches are keyed on these identifiers.
//!
//! # Reserved Identifiers
//!
//! Slot `0` is reserved for the sentinel ("dummy") node, see [`NodeId::DUMMY`]. Every
//! graph allocates it on construction, so an absent or unresolved slot never needs an
//! `Option` and every rewrite rule can treat "absent" uniformly.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::node_id::NodeId;
//!
//! let id = NodeId::new(7);
//! assert_eq!(id.index(), 7);
//! assert!(!id.is_dummy());
//! assert!(NodeId::DUMMY.is_dummy());
//! ```

use std::fmt;

/// Index of a node within a metadata graph arena.
///
/// `NodeId` is a plain 32-bit slot index. It is `Copy`, cheap to hash, and totally ordered
/// by allocation order. The default value is [`NodeId::DUMMY`].
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The sentinel node that stands in for absent or unresolved slots.
    pub const DUMMY: NodeId = NodeId(0);

    /// Creates a new `NodeId` from a raw slot index.
    ///
    /// ## Arguments
    /// * `index` - The arena slot index
    #[must_use]
    pub fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the slot index as `usize`, for direct arena indexing.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the sentinel node.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dummy() {
            write!(f, "NodeId(dummy)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
