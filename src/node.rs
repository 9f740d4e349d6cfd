//! Nodes stored in a [`DataTree`](crate::DataTree).

use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{id::NodeId, resolver::NodeTypeInfo, resolver::TypeHandle};

bitflags! {
    #[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Someone observes this node's value directly.
        const MONITORED = 1;
        /// Teardown has run; the node can not be used for resolution anymore.
        const DESTROYED = 1 << 1;
    }
}

/// Whether a node owns children. Chosen once, when the node is created, from
/// [`NodeTypeInfo::can_have_children`].
#[derive(Debug)]
pub enum NodeKind {
    Branch(BranchNode),
    /// Terminal node. Reading and writing the bound value happens outside the tree.
    Leaf,
}

/// Children of a branch, keyed by name, in the order they were first resolved.
#[derive(Debug, Default)]
pub struct BranchNode {
    pub(crate) children: IndexMap<String, NodeId, FxBuildHasher>,
}

impl BranchNode {
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node of a data tree: the name it was resolved under, its parent and the
/// declared type of the value it stands for.
#[derive(Debug)]
pub struct DataNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) type_info: NodeTypeInfo,
    pub(crate) flags: NodeFlags,
    pub(crate) kind: NodeKind,
}

impl DataNode {
    pub(crate) fn new(type_info: NodeTypeInfo, parent: Option<NodeId>, name: String) -> Self {
        let kind = if type_info.can_have_children {
            NodeKind::Branch(BranchNode::default())
        } else {
            NodeKind::Leaf
        };
        Self {
            name,
            parent,
            type_info,
            flags: NodeFlags::empty(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent node; `None` for the root and for destroyed nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn type_info(&self) -> NodeTypeInfo {
        self.type_info
    }

    pub fn data_type(&self) -> TypeHandle {
        self.type_info.data_type
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    pub fn is_destroyed(&self) -> bool {
        self.flags.contains(NodeFlags::DESTROYED)
    }

    /// A branch counts as monitored as soon as it has any child, observed or
    /// not. The check does not descend.
    pub fn is_monitored(&self) -> bool {
        let monitored = self.flags.contains(NodeFlags::MONITORED);
        match &self.kind {
            NodeKind::Branch(branch) => monitored || !branch.is_empty(),
            NodeKind::Leaf => monitored,
        }
    }

    /// The already materialized child called `name`.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Branch(branch) => branch.get(name),
            NodeKind::Leaf => None,
        }
    }

    /// Materialized children in first-resolution order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.kind {
            NodeKind::Branch(branch) => Some(branch.children.values().copied()),
            NodeKind::Leaf => None,
        };
        children.into_iter().flatten()
    }

    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Branch(branch) => branch.len(),
            NodeKind::Leaf => 0,
        }
    }
}
