//! State of a single rewrite pass.
//!
//! [`RewriteContext`] owns the graph being rewritten together with everything that lives
//! exactly as long as one pass: the memo tables, the stack of nodes currently being rewritten,
//! the flat list of type definitions visited in the current unit, the cancellation flag and
//! the diagnostics sink. A context is never shared between passes running concurrently; the
//! host services it holds may be.

use std::{
    collections::HashSet,
    mem,
    sync::Arc,
};

use tracing::{trace, warn};

use crate::{
    metadata::{
        diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
        graph::MetadataGraph,
        host::{DefaultHost, MetadataHost},
        kinds::NodeKind,
        node_id::NodeId,
    },
    rewriter::{
        cache::{CacheTable, RewriteCache},
        config::RewriterConfig,
    },
    Error, Result,
};

/// Outcome of asking for a node's working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkingCopy {
    /// A writable node whose children still have to be visited
    Fresh(NodeId),
    /// The final result; nothing left to visit
    Done(NodeId),
}

/// Type definitions visited while rewriting one unit, in visiting order.
#[derive(Debug, Default)]
pub(crate) struct FlatTypes {
    pub(crate) entries: Vec<(NodeId, NodeId)>,
    seen: HashSet<NodeId>,
}

impl FlatTypes {
    fn push(&mut self, original: NodeId, rewritten: NodeId) {
        if self.seen.insert(original) {
            self.entries.push((original, rewritten));
        }
    }
}

/// The graph and all per-pass state of a rewriter.
pub struct RewriteContext {
    graph: MetadataGraph,
    host: Arc<dyn MetadataHost>,
    config: RewriterConfig,
    cache: RewriteCache,
    path: Vec<NodeId>,
    flat_types: FlatTypes,
    stopped: bool,
    diagnostics: Arc<Diagnostics>,
}

impl RewriteContext {
    /// Creates a context over `graph` served by a [`DefaultHost`].
    #[must_use]
    pub fn new(graph: MetadataGraph, config: RewriterConfig) -> Self {
        Self::with_host(graph, config, Arc::new(DefaultHost::default()))
    }

    /// Creates a context over `graph` served by `host`.
    #[must_use]
    pub fn with_host(
        graph: MetadataGraph,
        config: RewriterConfig,
        host: Arc<dyn MetadataHost>,
    ) -> Self {
        RewriteContext {
            graph,
            host,
            config,
            cache: RewriteCache::new(),
            path: Vec::new(),
            flat_types: FlatTypes::default(),
            stopped: false,
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    /// The graph being rewritten.
    #[must_use]
    pub fn graph(&self) -> &MetadataGraph {
        &self.graph
    }

    /// Mutable access to the graph being rewritten.
    pub fn graph_mut(&mut self) -> &mut MetadataGraph {
        &mut self.graph
    }

    /// Gives up the context and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> MetadataGraph {
        self.graph
    }

    /// The host services of this pass.
    #[must_use]
    pub fn host(&self) -> &Arc<dyn MetadataHost> {
        &self.host
    }

    /// The configuration of this pass.
    #[must_use]
    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// The memo tables of this pass.
    #[must_use]
    pub fn cache(&self) -> &RewriteCache {
        &self.cache
    }

    /// Mutable access to the memo tables.
    pub fn cache_mut(&mut self) -> &mut RewriteCache {
        &mut self.cache
    }

    /// Findings recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// Returns `true` once traversal was stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stops the traversal; every later rewrite operation returns its input unchanged.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if self.config.record_diagnostics {
            self.diagnostics.info(
                DiagnosticCategory::Cancellation,
                format!("traversal stopped at depth {}", self.path.len()),
            );
        }
    }

    /// The working copies currently being rewritten, outermost first.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub(crate) fn enter(&mut self, id: NodeId) -> Result<()> {
        if self.path.len() >= self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }
        self.path.push(id);
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    fn nearest(&self, predicate: impl Fn(NodeKind) -> bool) -> NodeId {
        self.path
            .iter()
            .rev()
            .copied()
            .find(|&id| self.graph.kind(id).map(&predicate).unwrap_or(false))
            .unwrap_or(NodeId::DUMMY)
    }

    /// The innermost method definition being rewritten, or the sentinel.
    #[must_use]
    pub fn current_method(&self) -> NodeId {
        self.nearest(NodeKind::is_method_definition)
    }

    /// The innermost type definition being rewritten, or the sentinel.
    #[must_use]
    pub fn current_type(&self) -> NodeId {
        self.nearest(NodeKind::is_type_definition)
    }

    /// The innermost namespace being rewritten, or the sentinel.
    #[must_use]
    pub fn current_namespace(&self) -> NodeId {
        self.nearest(NodeKind::is_namespace)
    }

    /// The unit being rewritten, or the sentinel.
    #[must_use]
    pub fn current_unit(&self) -> NodeId {
        self.nearest(NodeKind::is_unit)
    }

    /// The innermost signature (method, method reference, property or function pointer)
    /// being rewritten, or the sentinel.
    #[must_use]
    pub fn current_signature(&self) -> NodeId {
        self.nearest(|kind| kind.as_signature().is_some())
    }

    fn copy(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = self.host.shallow_copy(&mut self.graph, id)?;
        self.cache.note_copy();
        trace!(original = %id, copy = %copy, "materialized working copy");
        Ok(copy)
    }

    /// Obtains the node that a rewrite of `id` operates on and records it before any child
    /// is visited.
    pub(crate) fn working_copy(&mut self, table: CacheTable, id: NodeId) -> Result<WorkingCopy> {
        if let Some(reserved) = self.cache.claim(table, id) {
            return Ok(WorkingCopy::Fresh(reserved));
        }
        if let Some(rewritten) = self.cache.lookup(table, id) {
            return Ok(WorkingCopy::Done(rewritten));
        }

        if !self.graph.is_frozen(id)? {
            self.cache.record(table, id, id);
            return Ok(WorkingCopy::Fresh(id));
        }

        if self.config.copy_and_rewrite_immutable_references {
            let copy = self.copy(id)?;
            self.cache.record(table, id, copy);
            return Ok(WorkingCopy::Fresh(copy));
        }

        self.cache.record(table, id, id);
        Ok(WorkingCopy::Done(id))
    }

    /// Resolves a definition reached through a reference slot to its working copy without
    /// visiting its children.
    pub(crate) fn resolve_definition(&mut self, id: NodeId) -> Result<NodeId> {
        if id.is_dummy() || self.stopped {
            return Ok(id);
        }
        if let Some(rewritten) = self.cache.lookup(CacheTable::Definitions, id) {
            return Ok(rewritten);
        }

        if !self.graph.is_frozen(id)? {
            self.cache.reserve(CacheTable::Definitions, id, id);
            return Ok(id);
        }

        if self.config.copy_and_rewrite_immutable_references {
            let copy = self.copy(id)?;
            self.cache.reserve(CacheTable::Definitions, id, copy);
            return Ok(copy);
        }

        self.cache.record(CacheTable::Definitions, id, id);
        Ok(id)
    }

    /// The rewrite of `id` if one was recorded in either table, `id` otherwise.
    pub(crate) fn cached_or_unchanged(&mut self, id: NodeId) -> NodeId {
        if id.is_dummy() {
            return id;
        }
        self.cache
            .lookup(CacheTable::Definitions, id)
            .or_else(|| self.cache.lookup(CacheTable::References, id))
            .unwrap_or(id)
    }

    /// Interns a freshly materialized reference.
    pub(crate) fn finish_copy(&mut self, copy: NodeId) -> Result<()> {
        if self.graph.kind(copy)?.is_reference() {
            let key = self.host.intern(&self.graph, copy)?;
            self.graph.set_interned_key(copy, key)?;
            trace!(copy = %copy, key = %key, "interned reference");
        }
        Ok(())
    }

    /// Keeps the copy of a pure node only if one of its children changed or the copy was
    /// handed out through the cache while its children were visited.
    pub(crate) fn settle_pure(&mut self, original: NodeId, copy: NodeId) -> Result<NodeId> {
        if original == copy {
            return Ok(copy);
        }

        let unchanged = self.graph.node(original)?.children() == self.graph.node(copy)?.children();
        if unchanged && !self.cache.was_observed(copy) {
            self.cache
                .retract(CacheTable::References, original, copy);
            self.graph.release(copy)?;
            trace!(original = %original, copy = %copy, "retracted unchanged pure copy");
            return Ok(original);
        }

        self.finish_copy(copy)?;
        Ok(copy)
    }

    /// Handles a node whose kind is not valid for the slot it was found in.
    pub(crate) fn unrecognized(&mut self, id: NodeId, expected: &'static str) -> Result<NodeId> {
        let kind = self.graph.kind(id)?;
        if self.config.strict_dispatch {
            return Err(Error::UnexpectedKind {
                node: id,
                kind,
                expected,
            });
        }

        warn!(node = %id, kind = %kind, expected, "passing through node of unrecognized kind");
        if self.config.record_diagnostics {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Dispatch,
                    format!("{kind} is not a valid {expected}"),
                )
                .with_node(id, kind),
            );
        }
        Ok(id)
    }

    pub(crate) fn note_type(&mut self, original: NodeId, rewritten: NodeId) {
        self.flat_types.push(original, rewritten);
    }

    pub(crate) fn flat_type_entries(&self) -> &[(NodeId, NodeId)] {
        &self.flat_types.entries
    }

    pub(crate) fn take_flat_types(&mut self) -> FlatTypes {
        mem::take(&mut self.flat_types)
    }

    pub(crate) fn restore_flat_types(&mut self, outer: FlatTypes) -> FlatTypes {
        mem::replace(&mut self.flat_types, outer)
    }
}
