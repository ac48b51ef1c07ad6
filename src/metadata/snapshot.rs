//! Structural snapshots and DOT rendering of metadata graphs.
//!
//! A [`Snapshot`] records the shape of everything reachable from a root: every node's scalar
//! label and its outgoing edges, with node identity replaced by the order in which a
//! depth-first walk first reached it. Two snapshots compare equal exactly when the two graphs
//! are structurally equal *including* sharing: if the original has one node referenced from
//! two places, the other graph must too.
//!
//! Snapshots taken before and after a rewrite are how a caller verifies that a pass left its
//! input untouched, or that a no-op pass reproduced the input.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::metadata::{builder::GraphBuilder, snapshot::Snapshot};
//!
//! let mut builder = GraphBuilder::new();
//! let assembly = builder.assembly("Sample")?;
//! let graph = builder.build();
//!
//! let before = Snapshot::capture(&graph, assembly)?;
//! let after = Snapshot::capture(&graph, assembly)?;
//! assert_eq!(before, after);
//! # Ok::<(), dotrewrite::Error>(())
//! ```

use std::{
    collections::HashMap,
    fmt::{self, Write},
};

use crate::{
    metadata::{graph::MetadataGraph, node_id::NodeId},
    Result,
};

/// One captured node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Scalar content of the node
    pub label: String,
    /// Outgoing edges as ordinals into [`Snapshot::entries`]; `None` marks the sentinel
    pub children: Vec<Option<usize>>,
}

/// The structure reachable from a root, independent of slot numbering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Captures everything reachable from `root`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NodeNotFound`] if a reachable edge points at a released slot.
    pub fn capture(graph: &MetadataGraph, root: NodeId) -> Result<Self> {
        let (order, ordinals) = discover(graph, root)?;

        let mut entries = Vec::with_capacity(order.len());
        for id in order {
            let node = graph.node(id)?;
            entries.push(SnapshotEntry {
                label: node.label(),
                children: node
                    .children()
                    .into_iter()
                    .map(|child| ordinals.get(&child).copied())
                    .collect(),
            });
        }

        Ok(Snapshot { entries })
    }

    /// Captured nodes in discovery order; the root is first.
    #[must_use]
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Number of distinct nodes reachable from the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the root was the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ordinal, entry) in self.entries.iter().enumerate() {
            write!(f, "{ordinal:>4}: {}", entry.label)?;
            if !entry.children.is_empty() {
                let children: Vec<String> = entry
                    .children
                    .iter()
                    .map(|child| match child {
                        Some(index) => index.to_string(),
                        None => "-".to_string(),
                    })
                    .collect();
                write!(f, " -> [{}]", children.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Iterative pre-order walk; the sentinel never receives an ordinal.
fn discover(graph: &MetadataGraph, root: NodeId) -> Result<(Vec<NodeId>, HashMap<NodeId, usize>)> {
    let mut order = Vec::new();
    let mut ordinals = HashMap::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if id.is_dummy() || ordinals.contains_key(&id) {
            continue;
        }
        ordinals.insert(id, order.len());
        order.push(id);

        let children = graph.node(id)?.children();
        stack.extend(children.into_iter().rev());
    }

    Ok((order, ordinals))
}

/// Escapes a string for use inside a quoted DOT label.
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('<', "\\<")
        .replace('>', "\\>")
}

/// Renders everything reachable from `root` in Graphviz DOT format.
///
/// Node names are the slot identifiers, so rendering the input and output of a pass side by
/// side shows which slots were copied.
///
/// # Errors
/// Returns [`crate::Error::NodeNotFound`] if a reachable edge points at a released slot.
pub fn to_dot(graph: &MetadataGraph, root: NodeId) -> Result<String> {
    let (order, _) = discover(graph, root)?;
    let mut output = String::from("digraph metadata {\n    node [shape=box, fontname=\"monospace\"];\n");

    for id in &order {
        let node = graph.node(*id)?;
        let style = if graph.is_frozen(*id)? {
            ", style=filled, fillcolor=\"#e0e0e0\""
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "    n{} [label=\"{}\\n{}\"{style}];",
            id.value(),
            id,
            escape_dot(&node.label())
        );
    }

    for id in &order {
        for (slot, child) in graph.node(*id)?.children().into_iter().enumerate() {
            if child.is_dummy() {
                continue;
            }
            let _ = writeln!(
                output,
                "    n{} -> n{} [label=\"{slot}\"];",
                id.value(),
                child.value()
            );
        }
    }

    output.push_str("}\n");
    Ok(output)
}
