//! Per-pass memo tables from original nodes to their rewritten counterparts.
//!
//! The cache is what makes a pass identity preserving and cycle safe:
//!
//! - A node is recorded *before* its children are visited, so a child that points back at an
//!   ancestor resolves to the ancestor's working copy instead of recursing forever.
//! - Recording `original -> rewritten` also records `rewritten -> rewritten`. A working copy
//!   that is later reached as if it were an original is recognized as final.
//! - Definitions and references live in separate tables. A type definition reached through
//!   its namespace and the same definition reached through a field's type slot are two
//!   different questions.
//!
//! # Reservations
//!
//! A definition may be reached through a reference slot before its container visits it. The
//! engine then *reserves* a working copy: the reference resolves to the copy immediately, but
//! the copy's children are only visited when the container reaches the definition and
//! [`RewriteCache::claim`]s the reservation.
//!
//! # Retraction
//!
//! Pure reference nodes are copied eagerly and recorded before their children are visited.
//! If no child changed and nobody observed the copy through the cache, the copy is
//! [`RewriteCache::retract`]ed and the original stays in use.

use std::collections::{HashMap, HashSet};

use crate::metadata::{kinds::NodeKind, node_id::NodeId};

/// Which memo table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTable {
    /// Nodes visited as definitions
    Definitions,
    /// Everything else
    References,
}

impl CacheTable {
    /// Table used for nodes of `kind` visited through their own rewrite operation.
    #[must_use]
    pub fn for_kind(kind: NodeKind) -> Self {
        if kind.is_definition() {
            CacheTable::Definitions
        } else {
            CacheTable::References
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    rewritten: NodeId,
    reserved: bool,
}

/// Counters describing the work of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that found nothing
    pub misses: usize,
    /// Working copies created through the shallow-copy service
    pub copies: usize,
    /// Pure copies discarded because nothing changed
    pub retracted: usize,
}

/// The two memo tables of a pass.
#[derive(Debug, Default)]
pub struct RewriteCache {
    definitions: HashMap<NodeId, Entry>,
    references: HashMap<NodeId, Entry>,
    observed: HashSet<NodeId>,
    stats: CacheStats,
}

impl RewriteCache {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, table: CacheTable) -> &HashMap<NodeId, Entry> {
        match table {
            CacheTable::Definitions => &self.definitions,
            CacheTable::References => &self.references,
        }
    }

    fn table_mut(&mut self, table: CacheTable) -> &mut HashMap<NodeId, Entry> {
        match table {
            CacheTable::Definitions => &mut self.definitions,
            CacheTable::References => &mut self.references,
        }
    }

    /// Returns the rewritten counterpart of `original` and marks it as observed.
    pub fn lookup(&mut self, table: CacheTable, original: NodeId) -> Option<NodeId> {
        match self.table(table).get(&original).map(|entry| entry.rewritten) {
            Some(rewritten) => {
                self.stats.hits += 1;
                self.observed.insert(rewritten);
                Some(rewritten)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Returns the rewritten counterpart of `original` without any bookkeeping.
    #[must_use]
    pub fn peek(&self, table: CacheTable, original: NodeId) -> Option<NodeId> {
        self.table(table).get(&original).map(|entry| entry.rewritten)
    }

    /// Returns `true` if `original` has an entry in `table`.
    #[must_use]
    pub fn contains(&self, table: CacheTable, original: NodeId) -> bool {
        self.table(table).contains_key(&original)
    }

    fn insert(&mut self, table: CacheTable, original: NodeId, rewritten: NodeId, reserved: bool) {
        let entries = self.table_mut(table);
        entries.insert(
            original,
            Entry {
                rewritten,
                reserved,
            },
        );
        if original != rewritten {
            entries.insert(
                rewritten,
                Entry {
                    rewritten,
                    reserved,
                },
            );
        }
    }

    /// Records `original -> rewritten` together with `rewritten -> rewritten`.
    pub fn record(&mut self, table: CacheTable, original: NodeId, rewritten: NodeId) {
        self.insert(table, original, rewritten, false);
    }

    /// Records a working copy whose children have not been visited yet.
    pub fn reserve(&mut self, table: CacheTable, original: NodeId, rewritten: NodeId) {
        self.insert(table, original, rewritten, true);
    }

    /// Takes over a reservation so that the caller visits the working copy's children.
    ///
    /// Returns `None` if `original` has no entry or the entry was already claimed.
    pub fn claim(&mut self, table: CacheTable, original: NodeId) -> Option<NodeId> {
        let entries = self.table_mut(table);
        let entry = entries.get_mut(&original)?;
        if !entry.reserved {
            return None;
        }
        entry.reserved = false;
        let rewritten = entry.rewritten;
        if let Some(own) = entries.get_mut(&rewritten) {
            own.reserved = false;
        }
        Some(rewritten)
    }

    /// Returns `true` if a lookup ever answered with `rewritten`.
    #[must_use]
    pub fn was_observed(&self, rewritten: NodeId) -> bool {
        self.observed.contains(&rewritten)
    }

    /// Forgets the working copy of `original`; the original becomes its own rewrite.
    pub fn retract(&mut self, table: CacheTable, original: NodeId, copy: NodeId) {
        let entries = self.table_mut(table);
        entries.remove(&copy);
        entries.insert(
            original,
            Entry {
                rewritten: original,
                reserved: false,
            },
        );
        self.observed.remove(&copy);
        self.stats.retracted += 1;
    }

    /// Counts a working copy produced by the shallow-copy service.
    pub fn note_copy(&mut self) {
        self.stats.copies += 1;
    }

    /// Number of entries in `table`.
    #[must_use]
    pub fn len(&self, table: CacheTable) -> usize {
        self.table(table).len()
    }

    /// Returns `true` if neither table has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.references.is_empty()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_adds_self_mapping() {
        let mut cache = RewriteCache::new();
        cache.record(CacheTable::References, NodeId(3), NodeId(9));

        assert_eq!(cache.lookup(CacheTable::References, NodeId(3)), Some(NodeId(9)));
        assert_eq!(cache.lookup(CacheTable::References, NodeId(9)), Some(NodeId(9)));
        assert_eq!(cache.len(CacheTable::References), 2);
    }

    #[test]
    fn test_tables_are_separate() {
        let mut cache = RewriteCache::new();
        cache.record(CacheTable::Definitions, NodeId(3), NodeId(3));

        assert_eq!(cache.lookup(CacheTable::Definitions, NodeId(3)), Some(NodeId(3)));
        assert_eq!(cache.lookup(CacheTable::References, NodeId(3)), None);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_lookup_marks_observed() {
        let mut cache = RewriteCache::new();
        cache.record(CacheTable::References, NodeId(3), NodeId(9));
        assert!(!cache.was_observed(NodeId(9)));
        assert_eq!(cache.peek(CacheTable::References, NodeId(3)), Some(NodeId(9)));
        assert!(!cache.was_observed(NodeId(9)));

        cache.lookup(CacheTable::References, NodeId(3));
        assert!(cache.was_observed(NodeId(9)));
    }

    #[test]
    fn test_reserve_and_claim() {
        let mut cache = RewriteCache::new();
        cache.reserve(CacheTable::Definitions, NodeId(4), NodeId(10));

        assert_eq!(cache.peek(CacheTable::Definitions, NodeId(4)), Some(NodeId(10)));
        assert_eq!(cache.claim(CacheTable::Definitions, NodeId(4)), Some(NodeId(10)));
        assert_eq!(cache.claim(CacheTable::Definitions, NodeId(4)), None);
        assert_eq!(cache.claim(CacheTable::Definitions, NodeId(10)), None);
    }

    #[test]
    fn test_claim_of_recorded_entry() {
        let mut cache = RewriteCache::new();
        cache.record(CacheTable::Definitions, NodeId(4), NodeId(4));
        assert_eq!(cache.claim(CacheTable::Definitions, NodeId(4)), None);
        assert_eq!(cache.claim(CacheTable::Definitions, NodeId(5)), None);
    }

    #[test]
    fn test_retract() {
        let mut cache = RewriteCache::new();
        cache.record(CacheTable::References, NodeId(3), NodeId(9));
        cache.retract(CacheTable::References, NodeId(3), NodeId(9));

        assert_eq!(cache.peek(CacheTable::References, NodeId(3)), Some(NodeId(3)));
        assert!(!cache.contains(CacheTable::References, NodeId(9)));
        assert_eq!(cache.stats().retracted, 1);
    }

    #[test]
    fn test_table_for_kind() {
        assert_eq!(
            CacheTable::for_kind(NodeKind::NamespaceTypeDefinition),
            CacheTable::Definitions
        );
        assert_eq!(
            CacheTable::for_kind(NodeKind::VectorTypeReference),
            CacheTable::References
        );
        assert_eq!(
            CacheTable::for_kind(NodeKind::CustomAttribute),
            CacheTable::References
        );
    }
}
