//! Findings recorded by a rewrite pass.
//!
//! Lenient dispatch never aborts on a node of an unexpected kind; it hands the node back
//! unchanged and leaves a note here instead. Cancellation and unresolvable specialized
//! members are reported the same way. After a pass, the log tells a caller which parts of
//! the graph were left untouched and whether a strict rerun is worth it.
//!
//! The log only grows. Entries live in a `boxcar::Vec` and per-severity tallies are atomic,
//! so an `Arc<Diagnostics>` can be read by an observer while the pass is still appending.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::diagnostics::{Diagnostics, DiagnosticCategory};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(DiagnosticCategory::Dispatch, "LocalDefinition is not a type reference");
//!
//! assert!(diagnostics.has_warnings());
//! assert_eq!(diagnostics.count(), 1);
//! ```

use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::metadata::{kinds::NodeKind, node_id::NodeId};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
pub enum DiagnosticSeverity {
    /// The pass behaved as asked, e.g. it was cancelled
    #[strum(to_string = "INFO")]
    Info,
    /// A node was passed through instead of rewritten
    #[strum(to_string = "WARN")]
    Warning,
    /// The rewritten graph is known to be incomplete
    #[strum(to_string = "ERROR")]
    Error,
}

impl DiagnosticSeverity {
    fn slot(self) -> usize {
        self as usize
    }
}

/// Engine component a finding comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DiagnosticCategory {
    /// Category dispatchers
    Dispatch,
    /// Slot and list layout of a node
    Structure,
    /// Resolution of specialized members to their generic originals
    Specialization,
    /// Rewrite cache
    Cache,
    /// Early termination
    Cancellation,
    /// Caller-supplied findings
    General,
}

/// One finding, optionally pinned to the node it concerns.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious it is
    pub severity: DiagnosticSeverity,
    /// Which component reported it
    pub category: DiagnosticCategory,
    /// What happened
    pub message: String,
    /// Node concerned, if any
    pub node: Option<NodeId>,
    /// Kind of `node` at the time of the finding
    pub kind: Option<NodeKind>,
}

impl Diagnostic {
    /// Creates a finding that is not tied to a node.
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity,
            category,
            message: message.into(),
            node: None,
            kind: None,
        }
    }

    /// Pins the finding to `node` of the given kind.
    #[must_use]
    pub fn with_node(self, node: NodeId, kind: NodeKind) -> Self {
        Diagnostic {
            node: Some(node),
            kind: Some(kind),
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;
        match (self.node, self.kind) {
            (Some(node), Some(kind)) => write!(f, " (node: {node}, kind: {kind})"),
            (Some(node), None) => write!(f, " (node: {node})"),
            _ => Ok(()),
        }
    }
}

/// Append-only log of findings, shareable across threads.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
    tallies: [AtomicUsize; DiagnosticSeverity::COUNT],
}

impl Diagnostics {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.tallies[diagnostic.severity.slot()].fetch_add(1, Ordering::Relaxed);
        self.entries.push(diagnostic);
    }

    /// Appends an [`Info`](DiagnosticSeverity::Info) entry.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Appends a [`Warning`](DiagnosticSeverity::Warning) entry.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Warning, category, message));
    }

    /// Appends an [`Error`](DiagnosticSeverity::Error) entry.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Error, category, message));
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Number of entries of one severity.
    pub fn count_of(&self, severity: DiagnosticSeverity) -> usize {
        self.tallies[severity.slot()].load(Ordering::Relaxed)
    }

    /// `true` once anything was logged.
    pub fn has_any(&self) -> bool {
        self.count() > 0
    }

    /// `true` if an error was logged.
    pub fn has_errors(&self) -> bool {
        self.count_of(DiagnosticSeverity::Error) > 0
    }

    /// `true` if a warning was logged.
    pub fn has_warnings(&self) -> bool {
        self.count_of(DiagnosticSeverity::Warning) > 0
    }

    /// Entries in the order they were appended.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Entries from one component.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|entry| entry.category == category).collect()
    }

    /// Entries pinned to `node`.
    pub fn for_node(&self, node: NodeId) -> Vec<&Diagnostic> {
        self.iter().filter(|entry| entry.node == Some(node)).collect()
    }

    /// Nodes that lenient dispatch handed back unchanged, in encounter order.
    pub fn passed_through(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|entry| entry.category == DiagnosticCategory::Dispatch)
            .filter_map(|entry| entry.node)
            .collect()
    }

    /// Report with a tally line followed by the entries of each component that logged any.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tally: Vec<String> = DiagnosticSeverity::iter()
            .rev()
            .map(|severity| format!("{} {severity}", self.count_of(severity)))
            .collect();
        writeln!(f, "{} finding(s): {}", self.count(), tally.join(", "))?;

        for category in DiagnosticCategory::iter() {
            let entries = self.by_category(category);
            if entries.is_empty() {
                continue;
            }
            writeln!(f, "{category}:")?;
            for entry in entries {
                writeln!(f, "  {entry}")?;
            }
        }
        Ok(())
    }
}
