//! Arena storage for metadata graph nodes.
//!
//! [`MetadataGraph`] owns every node in a vector of slots addressed by [`NodeId`]. Each slot
//! is either **frozen** (read-only, possibly shared between many containers) or **mutable**
//! (exclusively owned by the rewrite pass that created it). Mutable access to a frozen slot is
//! refused with [`Error::FrozenNode`], so shared inputs can never be changed in place.
//!
//! Slot `0` always holds the frozen sentinel node.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::{graph::MetadataGraph, nodes::{Node, types::VectorTypeReference}};
//!
//! let mut graph = MetadataGraph::new();
//! let vector = graph.add_frozen(Node::VectorTypeReference(VectorTypeReference::default()));
//!
//! assert!(graph.is_frozen(vector)?);
//! assert!(graph.get_mut::<VectorTypeReference>(vector).is_err());
//!
//! let copy = graph.copy_node(vector)?;
//! assert!(!graph.is_frozen(copy)?);
//! # Ok::<(), dotrewrite::Error>(())
//! ```

use std::collections::HashMap;

use crate::{
    metadata::{
        host::{InternedKey, PlatformType},
        kinds::NodeKind,
        node_id::NodeId,
        nodes::{Node, NodeData},
    },
    Error, Result,
};

/// A single arena slot.
#[derive(Clone, Debug)]
struct Slot {
    node: Node,
    frozen: bool,
    interned: Option<InternedKey>,
}

/// Arena of metadata graph nodes.
#[derive(Clone, Debug)]
pub struct MetadataGraph {
    slots: Vec<Option<Slot>>,
    free: Vec<NodeId>,
    platform_types: HashMap<PlatformType, NodeId>,
}

impl MetadataGraph {
    /// Creates an empty graph holding only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        MetadataGraph {
            slots: vec![Some(Slot {
                node: Node::Dummy,
                frozen: true,
                interned: None,
            })],
            free: Vec::new(),
            platform_types: HashMap::new(),
        }
    }

    fn insert(&mut self, node: Node, frozen: bool) -> NodeId {
        let slot = Slot {
            node,
            frozen,
            interned: None,
        };

        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(slot);
            return id;
        }

        let id = NodeId::new(self.slots.len() as u32);
        self.slots.push(Some(slot));
        id
    }

    /// Adds a mutable node and returns its identifier.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.insert(node, false)
    }

    /// Adds a frozen node and returns its identifier.
    pub fn add_frozen(&mut self, node: Node) -> NodeId {
        self.insert(node, true)
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(Error::NodeNotFound(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(Error::NodeNotFound(id))
    }

    /// Returns `true` if `id` addresses a live slot.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_ok()
    }

    /// Borrows the node stored at `id`.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        Ok(&self.slot(id)?.node)
    }

    /// Mutably borrows the node stored at `id`.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live, [`Error::FrozenNode`] if it is
    /// frozen.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let slot = self.slot_mut(id)?;
        if slot.frozen {
            return Err(Error::FrozenNode(id));
        }
        Ok(&mut slot.node)
    }

    /// Returns the kind of the node stored at `id`.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        Ok(self.node(id)?.kind())
    }

    /// Borrows the payload of type `T` stored at `id`.
    ///
    /// # Errors
    /// Returns [`Error::KindMismatch`] if the node does not carry a `T`.
    pub fn get<T: NodeData>(&self, id: NodeId) -> Result<&T> {
        let node = self.node(id)?;
        T::from_node(node).ok_or(Error::KindMismatch {
            node: id,
            expected: T::NAME,
            found: node.kind(),
        })
    }

    /// Mutably borrows the payload of type `T` stored at `id`.
    ///
    /// # Errors
    /// Returns [`Error::FrozenNode`] for frozen slots and [`Error::KindMismatch`] if the node
    /// does not carry a `T`.
    pub fn get_mut<T: NodeData>(&mut self, id: NodeId) -> Result<&mut T> {
        let node = self.node_mut(id)?;
        let found = node.kind();
        T::from_node_mut(node).ok_or(Error::KindMismatch {
            node: id,
            expected: T::NAME,
            found,
        })
    }

    /// Returns `true` if the node at `id` is frozen.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn is_frozen(&self, id: NodeId) -> Result<bool> {
        Ok(self.slot(id)?.frozen)
    }

    /// Freezes a single node.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn freeze(&mut self, id: NodeId) -> Result<()> {
        self.slot_mut(id)?.frozen = true;
        Ok(())
    }

    /// Freezes every node of the graph, the state a loader hands over.
    pub fn freeze_all(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.frozen = true;
        }
    }

    /// Copies the node at `id` into a fresh mutable slot.
    ///
    /// The copy is shallow: it holds the same child identifiers as the original.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn copy_node(&mut self, id: NodeId) -> Result<NodeId> {
        let node = self.node(id)?.clone();
        Ok(self.add(node))
    }

    /// Releases a mutable slot so that later allocations can reuse it.
    ///
    /// # Errors
    /// Returns [`Error::FrozenNode`] for frozen slots (including the sentinel).
    pub fn release(&mut self, id: NodeId) -> Result<()> {
        if self.slot(id)?.frozen {
            return Err(Error::FrozenNode(id));
        }
        self.slots[id.index()] = None;
        self.free.push(id);
        Ok(())
    }

    /// Returns the interned key recorded for `id`, if any.
    #[must_use]
    pub fn interned_key(&self, id: NodeId) -> Option<InternedKey> {
        self.slot(id).ok().and_then(|slot| slot.interned)
    }

    /// Records the interned key of `id`.
    ///
    /// Interning does not change structure, so frozen nodes accept keys too.
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] if the slot is not live.
    pub fn set_interned_key(&mut self, id: NodeId, key: InternedKey) -> Result<()> {
        self.slot_mut(id)?.interned = Some(key);
        Ok(())
    }

    /// Returns the memoized node of a platform type, if it was materialized before.
    #[must_use]
    pub fn platform_type(&self, kind: PlatformType) -> Option<NodeId> {
        self.platform_types.get(&kind).copied()
    }

    /// Memoizes the node of a platform type.
    pub fn set_platform_type(&mut self, kind: PlatformType, id: NodeId) {
        self.platform_types.insert(kind, id);
    }

    /// Number of live slots, including the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if the graph holds nothing but the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Iterates over the identifiers of all live slots, sentinel excluded.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId::new(index as u32))
    }
}

impl Default for MetadataGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::nodes::{
        members::{FieldDefinition, MemberCore},
        types::{PointerTypeReference, VectorTypeReference},
    };

    #[test]
    fn test_new_graph_has_sentinel() {
        let graph = MetadataGraph::new();
        assert_eq!(graph.kind(NodeId::DUMMY).unwrap(), NodeKind::Dummy);
        assert!(graph.is_frozen(NodeId::DUMMY).unwrap());
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_add_and_get() {
        let mut graph = MetadataGraph::new();
        let id = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: NodeId::DUMMY,
        }));

        assert_eq!(id, NodeId(1));
        assert_eq!(graph.kind(id).unwrap(), NodeKind::VectorTypeReference);
        assert!(graph.get::<VectorTypeReference>(id).is_ok());
        assert!(matches!(
            graph.get::<PointerTypeReference>(id),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_frozen_rejects_mutation() {
        let mut graph = MetadataGraph::new();
        let id = graph.add_frozen(Node::FieldDefinition(FieldDefinition::default()));

        assert!(matches!(graph.node_mut(id), Err(Error::FrozenNode(_))));
        assert!(matches!(
            graph.get_mut::<MemberCore>(id),
            Err(Error::FrozenNode(_))
        ));
        assert!(graph.get::<MemberCore>(id).is_ok());
    }

    #[test]
    fn test_freeze_all() {
        let mut graph = MetadataGraph::new();
        let a = graph.add(Node::FieldDefinition(FieldDefinition::default()));
        let b = graph.add(Node::FieldDefinition(FieldDefinition::default()));
        assert!(!graph.is_frozen(a).unwrap());

        graph.freeze_all();
        assert!(graph.is_frozen(a).unwrap());
        assert!(graph.is_frozen(b).unwrap());
    }

    #[test]
    fn test_copy_node_is_mutable_and_shallow() {
        let mut graph = MetadataGraph::new();
        let element = graph.add_frozen(Node::PointerTypeReference(PointerTypeReference::default()));
        let vector = graph.add_frozen(Node::VectorTypeReference(VectorTypeReference {
            element_type: element,
        }));

        let copy = graph.copy_node(vector).unwrap();
        assert_ne!(copy, vector);
        assert!(!graph.is_frozen(copy).unwrap());
        assert_eq!(
            graph.get::<VectorTypeReference>(copy).unwrap().element_type,
            element
        );
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut graph = MetadataGraph::new();
        let first = graph.add(Node::FieldDefinition(FieldDefinition::default()));
        let second = graph.add(Node::FieldDefinition(FieldDefinition::default()));

        graph.release(first).unwrap();
        assert!(!graph.contains(first));
        assert!(matches!(graph.node(first), Err(Error::NodeNotFound(_))));
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec![second]);

        let third = graph.add(Node::FieldDefinition(FieldDefinition::default()));
        assert_eq!(third, first);
    }

    #[test]
    fn test_release_refuses_frozen() {
        let mut graph = MetadataGraph::new();
        assert!(matches!(
            graph.release(NodeId::DUMMY),
            Err(Error::FrozenNode(_))
        ));
    }

    #[test]
    fn test_missing_node() {
        let graph = MetadataGraph::new();
        assert!(matches!(
            graph.node(NodeId(99)),
            Err(Error::NodeNotFound(NodeId(99)))
        ));
        assert!(graph.interned_key(NodeId(99)).is_none());
    }
}
