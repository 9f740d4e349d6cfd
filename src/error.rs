//! Error types for tree operations and path configuration.

use crate::id::NodeId;

/// Errors reported by [`DataTree`](crate::DataTree) operations.
///
/// Expected absence is never an error: a path that does not exist resolves to
/// `Ok(None)` and removing a missing node reports `Ok(false)`. These variants
/// describe calls that break the caller's side of the contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// The path asked a node to remove itself through the self-reference token.
    ///
    /// A node is removed through its parent, never through a relative path
    /// on the node itself.
    #[error("can not remove self (path `{path}`)")]
    RemoveSelf { path: String },
    /// The node has been destroyed and can not be used for resolution anymore.
    #[error("node {0:?} has been destroyed")]
    Destroyed(NodeId),
    /// The id does not name a live node of this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),
}

/// Errors reported when building a [`PathConfig`](crate::PathConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("the self-reference token `{token}` contains the path separator `{separator}`")]
    TokenContainsSeparator { token: String, separator: char },
}
