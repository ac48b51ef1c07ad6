//! Per-kind rewrite rules.
//!
//! Every `walk_*` function is the default body of the matching [`Rewriter`] method. A walk
//! obtains the working copy of its node through [`visit`] (or [`visit_pure`] for nodes that
//! are fully determined by their children), then rewrites each child slot in a fixed order
//! and writes the result back before moving to the next slot.
//!
//! Overrides call these functions to keep the default traversal and post-process the result:
//!
//! ```rust
//! use dotrewrite::prelude::*;
//! use dotrewrite::rewriter::rules;
//!
//! struct Renamer {
//!     context: RewriteContext,
//! }
//!
//! impl Rewriter for Renamer {
//!     fn context(&self) -> &RewriteContext {
//!         &self.context
//!     }
//!
//!     fn context_mut(&mut self) -> &mut RewriteContext {
//!         &mut self.context
//!     }
//!
//!     fn rewrite_namespace_type_definition(&mut self, id: NodeId) -> Result<NodeId> {
//!         let rewritten = rules::types::walk_namespace_type_definition(self, id)?;
//!         if let Ok(definition) = self.context_mut().graph_mut().get_mut::<TypeDefinitionCore>(rewritten) {
//!             definition.name = definition.name.to_uppercase();
//!         }
//!         Ok(rewritten)
//!     }
//! }
//! ```

pub mod attributes;
pub mod body;
pub mod expressions;
pub mod members;
pub mod namespaces;
pub mod types;
pub mod units;

use crate::{
    metadata::{kinds::NodeKind, node_id::NodeId},
    rewriter::{
        cache::CacheTable,
        context::WorkingCopy,
        Rewriter,
    },
    Result,
};

fn begin<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<WorkingCopy> {
    let context = rw.context_mut();
    if id.is_dummy() || context.is_stopped() {
        return Ok(WorkingCopy::Done(id));
    }

    let table = CacheTable::for_kind(context.graph().kind(id)?);
    context.working_copy(table, id)
}

fn walk_children<R, F>(rw: &mut R, copy: NodeId, walk: F) -> Result<()>
where
    R: Rewriter + ?Sized,
    F: FnOnce(&mut R, NodeId) -> Result<()>,
{
    rw.context_mut().enter(copy)?;
    let walked = walk(rw, copy);
    rw.context_mut().leave();
    walked
}

/// Rewrites the node `id` with `walk` at most once per pass.
///
/// The working copy is recorded before `walk` runs, so a cycle reaching `id` again resolves
/// to the copy. Returns the cached result when `id` was visited before, and `id` itself for
/// the sentinel, a stopped pass or a frozen node that is not copied.
///
/// # Errors
/// Propagates errors of `walk` and returns [`crate::Error::RecursionLimit`] when the pass is
/// nested deeper than configured.
pub fn visit<R, F>(rw: &mut R, id: NodeId, walk: F) -> Result<NodeId>
where
    R: Rewriter + ?Sized,
    F: FnOnce(&mut R, NodeId) -> Result<()>,
{
    let copy = match begin(rw, id)? {
        WorkingCopy::Fresh(copy) => copy,
        WorkingCopy::Done(rewritten) => return Ok(rewritten),
    };

    walk_children(rw, copy, walk)?;
    if copy != id {
        rw.context_mut().finish_copy(copy)?;
    }
    Ok(copy)
}

/// Like [`visit`], for nodes that are fully determined by their children.
///
/// A copy whose children all came back unchanged is discarded and `id` is returned, unless
/// the copy was already handed out through the cache.
///
/// # Errors
/// Same as [`visit`].
pub fn visit_pure<R, F>(rw: &mut R, id: NodeId, walk: F) -> Result<NodeId>
where
    R: Rewriter + ?Sized,
    F: FnOnce(&mut R, NodeId) -> Result<()>,
{
    let copy = match begin(rw, id)? {
        WorkingCopy::Fresh(copy) => copy,
        WorkingCopy::Done(rewritten) => return Ok(rewritten),
    };

    walk_children(rw, copy, walk)?;
    rw.context_mut().settle_pure(id, copy)
}

/// Rewrites every entry of `items` with `rewrite`, keeping the order.
///
/// # Errors
/// Returns the first error produced by `rewrite`.
pub fn map_list<R, F>(rw: &mut R, items: &[NodeId], mut rewrite: F) -> Result<Vec<NodeId>>
where
    R: Rewriter + ?Sized,
    F: FnMut(&mut R, NodeId) -> Result<NodeId>,
{
    items.iter().map(|&item| rewrite(rw, item)).collect()
}

/// Fails unless `id` is the sentinel or a node whose kind `accepts`.
///
/// Used for slots that only ever hold definitions of one family, where any other kind means
/// the graph is malformed.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] naming `slot` for any other kind.
pub fn require<R>(rw: &R, id: NodeId, accepts: fn(NodeKind) -> bool, slot: &str) -> Result<()>
where
    R: Rewriter + ?Sized,
{
    if id.is_dummy() {
        return Ok(());
    }

    let kind = rw.context().graph().kind(id)?;
    if accepts(kind) {
        Ok(())
    } else {
        Err(precondition_error!("{} can not hold {} {}", slot, kind, id))
    }
}

/// Rewrites a definition list whose entries must all satisfy `accepts`.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for the first entry of another kind, and the first
/// error produced by `rewrite`.
pub fn map_required<R, F>(
    rw: &mut R,
    items: &[NodeId],
    accepts: fn(NodeKind) -> bool,
    slot: &str,
    mut rewrite: F,
) -> Result<Vec<NodeId>>
where
    R: Rewriter + ?Sized,
    F: FnMut(&mut R, NodeId) -> Result<NodeId>,
{
    items
        .iter()
        .map(|&item| {
            require(rw, item, accepts, slot)?;
            rewrite(rw, item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            graph::MetadataGraph,
            nodes::{
                types::{GenericTypeInstanceReference, PointerTypeReference, VectorTypeReference},
                Node,
            },
        },
        rewriter::{MetadataRewriter, RewriterConfig},
        Error,
    };

    #[test]
    fn test_visit_records_before_walking() {
        let mut graph = MetadataGraph::new();
        let pointer = graph.add(Node::PointerTypeReference(PointerTypeReference::default()));
        let mut rewriter = MetadataRewriter::new(graph);

        let result = visit(&mut rewriter, pointer, |rw, copy| {
            let again = visit(rw, pointer, |_, _| panic!("walked twice"))?;
            assert_eq!(again, copy);
            Ok(())
        })
        .unwrap();
        assert_eq!(result, pointer);
    }

    #[test]
    fn test_visit_skips_sentinel_and_stopped() {
        let mut graph = MetadataGraph::new();
        let pointer = graph.add(Node::PointerTypeReference(PointerTypeReference::default()));
        let mut rewriter = MetadataRewriter::new(graph);

        assert_eq!(
            visit(&mut rewriter, NodeId::DUMMY, |_, _| panic!("sentinel walked")).unwrap(),
            NodeId::DUMMY
        );

        rewriter.stop_traversal();
        assert_eq!(
            visit(&mut rewriter, pointer, |_, _| panic!("walked after stop")).unwrap(),
            pointer
        );
    }

    #[test]
    fn test_visit_pure_keeps_original_when_unchanged() {
        let mut graph = MetadataGraph::new();
        let instance = graph.add_frozen(Node::GenericTypeInstanceReference(
            GenericTypeInstanceReference::default(),
        ));
        let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());

        let result = visit_pure(&mut rewriter, instance, |_, _| Ok(())).unwrap();
        assert_eq!(result, instance);
        assert_eq!(rewriter.context().cache().stats().retracted, 1);
    }

    #[test]
    fn test_require() {
        let mut graph = MetadataGraph::new();
        let vector = graph.add(Node::VectorTypeReference(VectorTypeReference::default()));
        let rewriter = MetadataRewriter::new(graph);

        assert!(require(&rewriter, NodeId::DUMMY, NodeKind::is_type_definition, "nested types").is_ok());
        assert!(matches!(
            require(&rewriter, vector, NodeKind::is_type_definition, "nested types"),
            Err(Error::Precondition { .. })
        ));
    }
}
