//! # dotrewrite Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotrewrite library. Import it to get quick access to everything a rewrite pass
//! and its overrides usually touch.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotrewrite operations
pub use crate::Error;

/// The result type used throughout dotrewrite
pub use crate::Result;

// ================================================================================================
// Metadata Graph
// ================================================================================================

/// The arena and its handles
pub use crate::metadata::{graph::MetadataGraph, node_id::NodeId};

/// Node payloads, their kinds and typed access
pub use crate::metadata::{
    kinds::NodeKind,
    nodes::{Node, NodeData},
};

/// Programmatic graph construction
pub use crate::metadata::builder::GraphBuilder;

/// Shared payload cores used by overrides to edit names and member lists
pub use crate::metadata::nodes::{
    members::MemberCore,
    namespaces::{AliasCore, NamespaceCore},
    types::{GenericParameterCore, TypeDefinitionCore},
    units::ModuleCore,
};

// ================================================================================================
// Host Services
// ================================================================================================

/// Interning, platform types and shallow copies
pub use crate::metadata::host::{
    CoreLibrary, DefaultHost, InternFactory, InternedKey, MetadataHost, PlatformType,
    PlatformTypeProvider, ShallowCopy,
};

/// Diagnostics collected by lenient dispatch and cancellation
pub use crate::metadata::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics,
};

// ================================================================================================
// Rewriting Engine
// ================================================================================================

/// The transformation trait and its identity implementation
pub use crate::rewriter::{MetadataRewriter, Rewriter};

/// Per-pass state and configuration
pub use crate::rewriter::{CacheStats, CacheTable, RewriteCache, RewriteContext, RewriterConfig};
