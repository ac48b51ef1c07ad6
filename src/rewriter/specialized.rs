//! Threading rewrites through specialized nodes to their generic originals.
//!
//! A specialized node is a generic original seen under a type-argument substitution. Its own
//! slots are rewritten like those of any node of its family; afterwards the original behind
//! `unspecialized_version` is rewritten through the regular dispatcher and the result is
//! stored on the specialized node.
//!
//! The original goes through the cache like every other node. A specialized node reached
//! again while its original is being rewritten resolves to its recorded working copy, so the
//! two never recurse into each other.

use tracing::trace;

use crate::{
    metadata::{
        diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity},
        node_id::NodeId,
        nodes::{
            members::{
                SpecializedEventDefinition, SpecializedFieldDefinition, SpecializedFieldReference,
                SpecializedMethodDefinition, SpecializedMethodReference,
                SpecializedPropertyDefinition,
            },
            types::SpecializedNestedTypeReference,
            NodeData,
        },
    },
    rewriter::Rewriter,
    Result,
};

/// A node that carries a back-link to its generic original.
pub trait Specialized: NodeData {
    /// The generic original.
    fn unspecialized_version(&self) -> NodeId;

    /// Replaces the back-link to the generic original.
    fn set_unspecialized_version(&mut self, id: NodeId);

    /// Rewrites the generic original through the dispatcher of its family.
    ///
    /// # Errors
    /// Propagates the errors of the selected operation.
    fn rewrite_unspecialized<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId>;
}

macro_rules! specialized {
    ($ty:ty, |$rw:ident, $id:ident| $rewrite:expr) => {
        impl Specialized for $ty {
            fn unspecialized_version(&self) -> NodeId {
                self.unspecialized_version
            }

            fn set_unspecialized_version(&mut self, id: NodeId) {
                self.unspecialized_version = id;
            }

            fn rewrite_unspecialized<R: Rewriter + ?Sized>($rw: &mut R, $id: NodeId) -> Result<NodeId> {
                $rewrite
            }
        }
    };
}

specialized!(SpecializedNestedTypeReference, |rw, id| rw.rewrite_type_reference(id));
specialized!(SpecializedFieldDefinition, |rw, id| rw.rewrite_field_reference(id));
specialized!(SpecializedFieldReference, |rw, id| rw.rewrite_field_reference(id));
specialized!(SpecializedMethodDefinition, |rw, id| rw.rewrite_method_reference(id));
specialized!(SpecializedMethodReference, |rw, id| rw.rewrite_method_reference(id));
specialized!(SpecializedPropertyDefinition, |rw, id| unspecialized_member(rw, id));
specialized!(SpecializedEventDefinition, |rw, id| unspecialized_member(rw, id));

// Properties and events have no reference form; a nested specialization is a full member.
fn unspecialized_member<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    if id.is_dummy() {
        return Ok(id);
    }
    if rw.context().graph().kind(id)?.is_specialized() {
        rw.rewrite_type_member(id)
    } else {
        rw.rewrite_definition_reference(id)
    }
}

/// Rewrites the generic original of the specialized node `copy` and stores the result.
///
/// `copy` is the working copy whose own slots were already rewritten.
///
/// # Errors
/// Returns [`crate::Error::KindMismatch`] if `copy` does not carry a `T`, and propagates the
/// errors of rewriting the original.
pub fn resolve<T, R>(rw: &mut R, copy: NodeId) -> Result<()>
where
    T: Specialized,
    R: Rewriter + ?Sized,
{
    let original = rw.context().graph().get::<T>(copy)?.unspecialized_version();
    if original.is_dummy() {
        let context = rw.context();
        if context.config().record_diagnostics {
            let kind = context.graph().kind(copy)?;
            context.diagnostics().push(
                Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Specialization,
                    "specialized node without a generic original",
                )
                .with_node(copy, kind),
            );
        }
        return Ok(());
    }

    let rewritten = T::rewrite_unspecialized(rw, original)?;
    if rewritten != original {
        trace!(node = %copy, original = %original, rewritten = %rewritten, "rethreaded generic original");
    }
    rw.context_mut()
        .graph_mut()
        .get_mut::<T>(copy)?
        .set_unspecialized_version(rewritten);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            graph::MetadataGraph,
            nodes::{
                members::{FieldDefinition, FieldReference},
                Node,
            },
        },
        rewriter::{MetadataRewriter, RewriterConfig},
    };

    #[test]
    fn test_missing_original_is_reported() {
        let mut graph = MetadataGraph::new();
        let field = graph.add(Node::SpecializedFieldReference(
            SpecializedFieldReference::default(),
        ));
        let mut rewriter = MetadataRewriter::new(graph);

        resolve::<SpecializedFieldReference, _>(&mut rewriter, field).unwrap();
        let diagnostics = rewriter.context().diagnostics();
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Specialization).len(), 1);
    }

    #[test]
    fn test_original_is_rethreaded() {
        let mut graph = MetadataGraph::new();
        let generic = graph.add_frozen(Node::FieldReference(FieldReference::default()));
        let field = graph.add(Node::SpecializedFieldReference(SpecializedFieldReference {
            unspecialized_version: generic,
            ..Default::default()
        }));
        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());

        resolve::<SpecializedFieldReference, _>(&mut rewriter, field).unwrap();
        let rewritten = rewriter
            .context()
            .graph()
            .get::<SpecializedFieldReference>(field)
            .unwrap()
            .unspecialized_version;
        assert_ne!(rewritten, generic);
        assert_eq!(
            rewriter.context().graph().kind(rewritten).unwrap(),
            crate::metadata::kinds::NodeKind::FieldReference
        );
    }

    #[test]
    fn test_definition_original_is_not_walked() {
        let mut graph = MetadataGraph::new();
        let generic = graph.add(Node::FieldDefinition(FieldDefinition::default()));
        let field = graph.add(Node::SpecializedFieldDefinition(SpecializedFieldDefinition {
            unspecialized_version: generic,
            ..Default::default()
        }));
        let mut rewriter = MetadataRewriter::new(graph);

        resolve::<SpecializedFieldDefinition, _>(&mut rewriter, field).unwrap();
        assert_eq!(
            rewriter
                .context()
                .graph()
                .get::<SpecializedFieldDefinition>(field)
                .unwrap()
                .unspecialized_version,
            generic
        );
    }
}
