#![deny(missing_docs)]
//! # `NodeId`s
//!
//! [`NodeId`]s are unique identifiers for nodes of a [`DataTree`](crate::DataTree).
//! They are keys into the tree's node storage, so holding one never keeps a
//! node alive.

use slotmap::new_key_type;

new_key_type! {
    /// A small unique identifier for a node of a [`DataTree`](crate::DataTree).
    ///
    /// Ids are versioned: once a node is detached and its slot is freed, the old
    /// id stays invalid even when the slot is reused for a new node.
    pub struct NodeId;

    /// Identifies a destroy listener registered with
    /// [`DataTree::on_destroy`](crate::DataTree::on_destroy).
    pub struct ListenerId;
}
