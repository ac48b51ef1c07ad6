//! Structural hashing of reference nodes.
//!
//! References are interned by structure: two distinct `VectorTypeReference` nodes over the
//! same element type describe the same type and must receive the same interned key. This
//! module computes a stable 64-bit digest of a node's structure for that purpose.
//!
//! # Hashing Rules
//!
//! - Reference kinds hash their kind, their scalar label and, recursively, their children.
//! - Definition kinds are nominal: they hash their kind and slot identity only. A definition
//!   is never structurally equal to another definition.
//! - The sentinel hashes to a fixed value.
//! - A child that is already being hashed higher up (a back-link such as a parameter's
//!   containing signature) contributes only its distance on the stack.
//! - Recursion is capped at [`MAX_HASH_DEPTH`]; deeper children hash by identity.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::hash::StructuralHash;
//!
//! let a = StructuralHash::new().add_component(&"VectorTypeReference").add_component(&7u32);
//! let b = StructuralHash::new().add_component(&"VectorTypeReference").add_component(&7u32);
//! assert_eq!(a.finalize(), b.finalize());
//! ```

use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
};

use crate::{
    metadata::{graph::MetadataGraph, node_id::NodeId},
    Result,
};

/// Maximum reference nesting followed when hashing.
pub const MAX_HASH_DEPTH: usize = 64;

/// Incremental FNV-1a based structural digest.
///
/// Components are mixed in order, so the digest is order sensitive.
pub struct StructuralHash {
    state: u64,
}

impl StructuralHash {
    /// Creates a new digest seeded with the FNV-1a offset basis.
    #[must_use]
    pub fn new() -> Self {
        StructuralHash {
            state: 0xcbf2_9ce4_8422_2325_u64, // FNV-1a 64-bit offset basis
        }
    }

    fn mix(&mut self, value: u64) {
        self.state ^= value;
        self.state = self.state.wrapping_mul(0x0100_0000_01b3_u64); // FNV-1a 64-bit prime

        self.state ^= self.state >> 33;
        self.state = self.state.wrapping_mul(0xff51_afd7_ed55_8ccd_u64);
        self.state ^= self.state >> 33;
    }

    /// Mixes any hashable component into the digest.
    #[must_use]
    pub fn add_component<T: Hash + ?Sized>(mut self, component: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        component.hash(&mut hasher);
        self.mix(hasher.finish());
        self
    }

    /// Mixes an already computed child digest into the digest.
    #[must_use]
    pub fn add_digest(mut self, digest: u64) -> Self {
        self.mix(digest);
        self
    }

    /// Returns the digest.
    #[must_use]
    pub fn finalize(self) -> u64 {
        self.state
    }
}

impl Default for StructuralHash {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the structural digest of the node at `id`.
///
/// # Errors
/// Returns [`crate::Error::NodeNotFound`] if `id` or one of its followed children is not live.
pub fn structural_hash(graph: &MetadataGraph, id: NodeId) -> Result<u64> {
    let mut walk = HashWalk {
        graph,
        in_progress: Vec::new(),
        finished: HashMap::new(),
    };
    Ok(walk.hash_node(id)?.digest)
}

/// Digest of one child plus the shallowest in-progress node its subtree links back to.
struct Visit {
    digest: u64,
    back_to: usize,
}

/// State of one `structural_hash` call.
///
/// Back-links (a parameter's containing signature, a nested reference's container reached
/// again through its own members) hash as their distance on the in-progress stack. A digest
/// is memoized only once its subtree no longer links above itself, so each node is hashed
/// once per enclosing cycle instead of once per path.
struct HashWalk<'a> {
    graph: &'a MetadataGraph,
    in_progress: Vec<NodeId>,
    finished: HashMap<NodeId, u64>,
}

impl HashWalk<'_> {
    fn hash_node(&mut self, id: NodeId) -> Result<Visit> {
        let level = self.in_progress.len();
        if id.is_dummy() {
            return Ok(self.closed(StructuralHash::new().add_component(&"dummy").finalize()));
        }
        if let Some(&digest) = self.finished.get(&id) {
            return Ok(self.closed(digest));
        }
        if let Some(position) = self.in_progress.iter().rposition(|&open| open == id) {
            return Ok(Visit {
                digest: StructuralHash::new()
                    .add_component(&"cycle")
                    .add_component(&(level - position))
                    .finalize(),
                back_to: position,
            });
        }

        let graph = self.graph;
        let node = graph.node(id)?;
        let kind = node.kind();
        if !kind.is_reference() || level >= MAX_HASH_DEPTH {
            return Ok(self.closed(
                StructuralHash::new()
                    .add_component(kind.name())
                    .add_component(&id.value())
                    .finalize(),
            ));
        }

        let mut digest = StructuralHash::new()
            .add_component(kind.name())
            .add_component(&node.label());
        let mut back_to = usize::MAX;
        self.in_progress.push(id);
        for child in node.children() {
            let visit = match self.hash_node(child) {
                Ok(visit) => visit,
                Err(error) => {
                    self.in_progress.pop();
                    return Err(error);
                }
            };
            digest = digest.add_digest(visit.digest);
            back_to = back_to.min(visit.back_to);
        }
        self.in_progress.pop();

        let digest = digest.finalize();
        if back_to >= level {
            self.finished.insert(id, digest);
            back_to = usize::MAX;
        }
        Ok(Visit { digest, back_to })
    }

    fn closed(&self, digest: u64) -> Visit {
        Visit {
            digest,
            back_to: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::nodes::{
        members::{MethodReference, ParameterTypeInformation},
        types::{
            FunctionPointerTypeReference, NamespaceTypeDefinition, PointerTypeReference,
            VectorTypeReference,
        },
        Node,
    };

    /// Adds parameters of type `ty` that link back to `signature`.
    fn parameters(graph: &mut MetadataGraph, signature: NodeId, ty: NodeId, count: u16) -> Vec<NodeId> {
        (0..count)
            .map(|index| {
                graph.add(Node::ParameterTypeInformation(ParameterTypeInformation {
                    index,
                    containing_signature: signature,
                    parameter_type: ty,
                    ..ParameterTypeInformation::default()
                }))
            })
            .collect()
    }

    fn method_reference(graph: &mut MetadataGraph, owner: NodeId, ty: NodeId, count: u16) -> NodeId {
        let reference = graph.add(Node::MethodReference(MethodReference {
            name: "Add".to_string(),
            containing_type: owner,
            return_type: ty,
            ..MethodReference::default()
        }));
        let parameters = parameters(graph, reference, ty, count);
        graph.get_mut::<MethodReference>(reference).unwrap().parameters = parameters;
        reference
    }

    #[test]
    fn test_hash_deterministic() {
        let first = StructuralHash::new()
            .add_component("NamespaceTypeReference")
            .add_component("String")
            .finalize();
        let second = StructuralHash::new()
            .add_component("NamespaceTypeReference")
            .add_component("String")
            .finalize();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_order_sensitive() {
        let first = StructuralHash::new()
            .add_component(&"first")
            .add_component(&"second")
            .finalize();
        let second = StructuralHash::new()
            .add_component(&"second")
            .add_component(&"first")
            .finalize();
        assert_ne!(first, second);
    }

    #[test]
    fn test_structurally_equal_references() {
        let mut graph = MetadataGraph::new();
        let element = graph.add(Node::NamespaceTypeDefinition(
            NamespaceTypeDefinition::default(),
        ));
        let first = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: element,
        }));
        let second = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: element,
        }));
        let pointer = graph.add(Node::PointerTypeReference(PointerTypeReference {
            target_type: element,
        }));

        let first_hash = structural_hash(&graph, first).unwrap();
        assert_eq!(first_hash, structural_hash(&graph, second).unwrap());
        assert_ne!(first_hash, structural_hash(&graph, pointer).unwrap());
    }

    #[test]
    fn test_definitions_are_nominal() {
        let mut graph = MetadataGraph::new();
        let first = graph.add(Node::NamespaceTypeDefinition(
            NamespaceTypeDefinition::default(),
        ));
        let second = graph.add(Node::NamespaceTypeDefinition(
            NamespaceTypeDefinition::default(),
        ));

        assert_ne!(
            structural_hash(&graph, first).unwrap(),
            structural_hash(&graph, second).unwrap()
        );
    }

    #[test]
    fn test_self_referential_chain_terminates() {
        let mut graph = MetadataGraph::new();
        let pointer = graph.add(Node::PointerTypeReference(PointerTypeReference::default()));
        graph
            .get_mut::<PointerTypeReference>(pointer)
            .unwrap()
            .target_type = pointer;

        assert!(structural_hash(&graph, pointer).is_ok());
    }

    #[test]
    fn test_signature_back_links_hash_once() {
        let mut graph = MetadataGraph::new();
        let owner = graph.add(Node::NamespaceTypeDefinition(NamespaceTypeDefinition::default()));
        let first = method_reference(&mut graph, owner, owner, 12);
        let second = method_reference(&mut graph, owner, owner, 12);
        let shorter = method_reference(&mut graph, owner, owner, 11);

        let digest = structural_hash(&graph, first).unwrap();
        assert_eq!(digest, structural_hash(&graph, second).unwrap());
        assert_ne!(digest, structural_hash(&graph, shorter).unwrap());

        // Entering through a parameter follows the signature and comes back around.
        let parameter = graph.get::<MethodReference>(first).unwrap().parameters[3];
        let twin = graph.get::<MethodReference>(second).unwrap().parameters[3];
        assert_eq!(
            structural_hash(&graph, parameter).unwrap(),
            structural_hash(&graph, twin).unwrap()
        );
    }

    #[test]
    fn test_function_pointer_with_many_parameters() {
        let mut graph = MetadataGraph::new();
        let element = graph.add(Node::NamespaceTypeDefinition(NamespaceTypeDefinition::default()));
        let pointer = graph.add(Node::FunctionPointerTypeReference(
            FunctionPointerTypeReference {
                return_type: element,
                ..FunctionPointerTypeReference::default()
            },
        ));
        let parameters = parameters(&mut graph, pointer, element, 16);
        graph
            .get_mut::<FunctionPointerTypeReference>(pointer)
            .unwrap()
            .parameters = parameters;
        let vector = graph.add(Node::VectorTypeReference(VectorTypeReference {
            element_type: pointer,
        }));

        assert!(structural_hash(&graph, pointer).is_ok());
        assert!(structural_hash(&graph, vector).is_ok());
    }
}
