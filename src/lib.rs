// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotrewrite
//!
//! An identity-preserving rewriting engine for .NET metadata object graphs.
//!
//! `dotrewrite` holds assemblies, modules, namespaces, types, members, signatures, method
//! bodies and custom attributes as nodes of an in-memory [`metadata::graph::MetadataGraph`].
//! A rewrite pass walks the graph from a root and gives every reachable node a chance to be
//! replaced, while keeping the properties that make such passes safe to compose:
//!
//! - **Identity** - a node reachable along several paths is rewritten once and the result is
//!   shared by every container that referenced it.
//! - **Cycles** - working copies are recorded before their children are visited, so
//!   self-referential generics and parent back-links terminate.
//! - **Immutability** - frozen nodes are never mutated. They are passed through, or copied
//!   first when copying is enabled.
//! - **Order** - every list keeps its order, including a module's flat list of types.
//!
//! ## Quick Start
//!
//! ```rust
//! use dotrewrite::metadata::builder::GraphBuilder;
//! use dotrewrite::prelude::*;
//!
//! # fn main() -> dotrewrite::Result<()> {
//! let mut builder = GraphBuilder::new();
//! let assembly = builder.assembly("Sample")?;
//! let root = builder.root_namespace(assembly)?;
//! let program = builder.class(root, "Program")?;
//! let graph = builder.build_frozen();
//!
//! // The identity pass over a frozen graph with copying enabled produces a private copy
//! let mut rewriter = MetadataRewriter::with_config(graph, RewriterConfig::copying());
//! let copy = rewriter.rewrite(assembly)?;
//! assert_ne!(copy, assembly);
//!
//! let graph = rewriter.into_graph();
//! let types = &graph.get::<ModuleCore>(copy)?.all_types;
//! assert_ne!(types[0], program);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Re-exports of the commonly used types and traits
//! - [`metadata`] - The node catalog, the graph arena, a builder and the host services
//!   (interning, platform types, shallow copies)
//! - [`rewriter`] - The [`rewriter::Rewriter`] trait, its per-kind rules, the dispatchers,
//!   the rewrite cache and the specialization resolver
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Writing a transformation
//!
//! Implement [`rewriter::Rewriter`] on a type that owns a [`rewriter::RewriteContext`] and
//! override the operations of the node kinds you want to change. Each default body lives
//! in [`rewriter::rules`], so an override can keep the default traversal and post-process
//! the node it returns.
//!
//! ## Logging
//!
//! The engine logs through [`tracing`]. Pass boundaries are reported at `debug`, copies,
//! retractions and interning at `trace`, and nodes passed through by lenient dispatch at
//! `warn`. Install any `tracing` subscriber to see them.

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use dotrewrite::prelude::*;
///
/// let rewriter = MetadataRewriter::new(MetadataGraph::new());
/// assert!(rewriter.context().path().is_empty());
/// ```
pub mod prelude;

/// The metadata graph: node kinds and payloads, the arena, and host services.
pub mod metadata;

/// The rewriting engine.
pub mod rewriter;

/// `dotrewrite` Result type.
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
///
/// # Examples
///
/// ```rust
/// use dotrewrite::{metadata::graph::MetadataGraph, Result};
///
/// fn node_count(graph: &MetadataGraph) -> Result<usize> {
///     Ok(graph.len())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotrewrite` Error type.
///
/// The main error type for all operations in this crate.
pub use error::Error;
