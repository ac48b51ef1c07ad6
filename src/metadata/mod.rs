//! The in-memory metadata graph.
//!
//! This module defines everything a rewrite pass operates on:
//!
//! - [`node_id`] - stable slot identifiers and the sentinel
//! - [`kinds`] - the closed catalog of node kinds and their category classifiers
//! - [`nodes`] - node payloads, grouped by family
//! - [`graph`] - the arena that owns every node and enforces frozen/mutable access
//! - [`host`] - the services a pass consumes: interning, platform types, shallow copies
//! - [`hash`] - structural hashing used by the default interning table
//! - [`builder`] - fluent construction of graphs for hosts and tests
//! - [`snapshot`] - structural snapshots and DOT output for verification
//! - [`diagnostics`] - non-fatal findings recorded during a pass

pub mod builder;
pub mod diagnostics;
pub mod graph;
pub mod hash;
pub mod host;
pub mod kinds;
pub mod node_id;
pub mod nodes;
pub mod snapshot;
