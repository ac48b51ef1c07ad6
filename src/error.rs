use thiserror::Error;

use crate::metadata::{kinds::NodeKind, node_id::NodeId};

macro_rules! precondition_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Precondition {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Precondition {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// A rewrite pass is a deterministic function of its input graph and configuration, so none of
/// these errors are meant to be retried. They signal either a malformed input graph, a defect in
/// a caller-supplied override, or a configured limit that was hit.
///
/// # Error Categories
///
/// ## Contract Errors
/// - [`Error::Precondition`] - A slot holds a kind that can never appear there
/// - [`Error::KindMismatch`] - Typed access to a node of a different kind
/// - [`Error::NodeNotFound`] - A [`NodeId`] that does not address a live slot
/// - [`Error::FrozenNode`] - Attempted mutation of a frozen node
///
/// ## Dispatch Errors
/// - [`Error::UnexpectedKind`] - Unrecognized kind reached the dispatcher in strict mode
///
/// ## Resource Errors
/// - [`Error::RecursionLimit`] - Maximum traversal depth exceeded
///
/// # Examples
///
/// ```rust
/// use dotrewrite::{Error, metadata::graph::MetadataGraph, metadata::node_id::NodeId};
///
/// let graph = MetadataGraph::new();
/// match graph.node(NodeId::new(42)) {
///     Err(Error::NodeNotFound(id)) => println!("no slot {}", id),
///     Err(e) => println!("other error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A structural precondition of the graph was violated.
    ///
    /// Raised when a slot that may only hold a specific family of kinds holds something else,
    /// e.g. a local variable in a type's field list. The error includes the source location
    /// where the violation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated precondition
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Precondition - {file}:{line}: {message}")]
    Precondition {
        /// The message to be printed for the Precondition error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A node of an unrecognized kind reached a dispatcher while strict dispatch is enabled.
    ///
    /// In lenient mode the same situation is reported as a diagnostic and the node is passed
    /// through unchanged.
    #[error("Node {node} of kind {kind} is not a valid {expected}")]
    UnexpectedKind {
        /// The offending node
        node: NodeId,
        /// Its actual kind
        kind: NodeKind,
        /// The broad category the dispatcher expected
        expected: &'static str,
    },

    /// Typed access to a node whose payload is of another kind.
    #[error("Node {node} is a {found}, expected {expected}")]
    KindMismatch {
        /// The accessed node
        node: NodeId,
        /// The payload type that was requested
        expected: &'static str,
        /// The kind actually stored in the slot
        found: NodeKind,
    },

    /// The identifier does not address a live slot of the graph.
    #[error("Node {0} does not exist")]
    NodeNotFound(NodeId),

    /// Attempted to obtain mutable access to a frozen node.
    ///
    /// Frozen nodes may be shared between many containers and must be copied before they
    /// are changed.
    #[error("Node {0} is frozen and can not be mutated")]
    FrozenNode(NodeId),

    /// Reached the maximum traversal depth.
    ///
    /// Pathologically deep generic instantiation chains are stopped here instead of
    /// exhausting the native stack.
    #[error("Reached the maximum traversal depth allowed - {0}")]
    RecursionLimit(usize),
}
