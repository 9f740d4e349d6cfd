//! The node arena and the path operations on it.

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    error::NodeError,
    id::{ListenerId, NodeId},
    node::{DataNode, NodeFlags, NodeKind},
    path::PathConfig,
    registry::TypeRegistry,
    resolver::{NodeTypeInfo, TypeResolver},
};

type DestroyListener = Box<dyn FnMut(NodeId, &str)>;

/// A tree of [`DataNode`]s mirroring the shape of some typed data.
///
/// Only the root exists up front. Every other node is created the first time a
/// path through it is resolved and is cached until it is removed, so resolving
/// the same path twice yields the same [`NodeId`].
///
/// ```rust,ignore
/// let mut registry = TypeRegistry::new();
/// registry.register::<AppState>();
/// let mut tree = DataTree::new(NodeTypeInfo::branch(AppState::type_handle()), registry);
///
/// let name = tree.find("user.profile.name")?.expect("field exists");
/// assert_eq!(tree.find("user.profile.name")?, Some(name));
/// assert_eq!(tree.path_of(name).as_deref(), Some("user.profile.name"));
///
/// assert!(tree.remove("user")?);
/// assert!(!tree.contains(name));
/// ```
#[derive(educe::Educe)]
#[educe(Debug)]
pub struct DataTree<R = TypeRegistry> {
    config: PathConfig,
    #[educe(Debug(ignore))]
    resolver: R,
    nodes: SlotMap<NodeId, DataNode>,
    root: NodeId,
    #[educe(Debug(ignore))]
    destroy_listeners: SlotMap<ListenerId, DestroyListener>,
}

impl<R: TypeResolver> DataTree<R> {
    /// Create a tree whose root has the given type, using the default path syntax.
    pub fn new(root_type: NodeTypeInfo, resolver: R) -> Self {
        Self::with_config(root_type, resolver, PathConfig::default())
    }

    pub fn with_config(root_type: NodeTypeInfo, resolver: R, config: PathConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(DataNode::new(root_type, None, String::new()));
        Self {
            config,
            resolver,
            nodes,
            root,
            destroy_listeners: SlotMap::with_key(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn node(&self, id: NodeId) -> Option<&DataNode> {
        self.nodes.get(id)
    }

    /// Whether `id` names a node that is still stored in this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of stored nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root is stored for the whole life of the tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(DataNode::parent)
    }

    /// Materialized children of `id`, in first-resolution order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.get(id).into_iter().flat_map(|node| node.children())
    }

    /// The path from the root to `id`, joined with the configured separator.
    /// The root's own path is empty.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names: SmallVec<[&str; 8]> = SmallVec::new();
        let mut current = self.nodes.get(id)?;
        while let Some(parent) = current.parent {
            names.push(&current.name);
            current = self.nodes.get(parent)?;
        }
        Some(self.config.join(names.into_iter().rev()))
    }

    /// Resolve `path` starting at the root. See [`find_descendant`](Self::find_descendant).
    pub fn find(&mut self, path: &str) -> Result<Option<NodeId>, NodeError> {
        self.find_descendant(self.root, path)
    }

    /// Remove the node at `path` below the root. See [`remove_descendant`](Self::remove_descendant).
    pub fn remove(&mut self, path: &str) -> Result<bool, NodeError> {
        self.remove_descendant(self.root, path)
    }

    /// Resolve `path` relative to `id`, creating every missing node on the way.
    ///
    /// Returns `Ok(None)` when a segment does not name a field of its parent's
    /// type; nothing is created for that segment or anything after it. A
    /// leading self-reference token resolves to `id` itself and the rest of the
    /// path is ignored. The self-reference answers even on a destroyed node;
    /// any other path on a destroyed node is [`NodeError::Destroyed`].
    pub fn find_descendant(&mut self, id: NodeId, path: &str) -> Result<Option<NodeId>, NodeError> {
        let (segment, rest) = self.config.split(path);
        if self.config.is_self(segment) {
            self.stored_node(id)?;
            return Ok(Some(id));
        }
        let is_branch = self.live_node(id)?.is_branch();
        if !is_branch {
            tracing::trace!(?id, segment, "leaf has no children");
            return Ok(None);
        }

        let Some(child) = self.get_or_create_child(id, segment) else {
            return Ok(None);
        };
        match rest {
            None => Ok(Some(child)),
            Some(rest) => self.find_descendant(child, rest),
        }
    }

    /// Destroy and detach the node at `path` relative to `id`.
    ///
    /// Nothing is created while looking the node up. Returns `Ok(false)` when
    /// there is no such node, and [`NodeError::RemoveSelf`] when the leading
    /// segment is the self-reference token.
    pub fn remove_descendant(&mut self, id: NodeId, path: &str) -> Result<bool, NodeError> {
        let (segment, rest) = self.config.split(path);
        if self.config.is_self(segment) {
            self.stored_node(id)?;
            tracing::error!(?id, path, "can not remove self");
            return Err(NodeError::RemoveSelf {
                path: path.to_owned(),
            });
        }
        let is_branch = self.live_node(id)?.is_branch();
        if !is_branch {
            return Ok(false);
        }

        let Some(child) = self.child(id, segment) else {
            return Ok(false);
        };
        match rest {
            Some(rest) => self.remove_descendant(child, rest),
            None => {
                self.destroy_subtree(child);
                let removed = self.detach(id, segment);
                tracing::debug!(?id, ?child, name = segment, removed, "removed child");
                Ok(removed)
            }
        }
    }

    /// Destroy `id` and everything below it.
    ///
    /// A non-root node is also detached from its parent, which frees its id.
    /// The root stays in the tree, without children and flagged destroyed.
    /// Destroying a node twice does nothing.
    pub fn destroy(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let attachment = node.parent.map(|parent| (parent, node.name.clone()));
        self.destroy_subtree(id);
        if let Some((parent, name)) = attachment {
            self.detach(parent, &name);
        }
    }

    /// Whether `id` is observed directly or, for a branch, has any child.
    /// Unknown ids are not monitored.
    pub fn is_monitored(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(DataNode::is_monitored)
    }

    /// Set or clear the direct monitoring flag of `id`.
    pub fn set_monitored(&mut self, id: NodeId, monitored: bool) -> Result<(), NodeError> {
        self.live_node(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.flags.set(NodeFlags::MONITORED, monitored);
        }
        Ok(())
    }

    /// Call `listener` with the id and name of every node as it is destroyed.
    /// Children are reported before their parent.
    ///
    /// The listener stays registered until it is passed to
    /// [`remove_destroy_listener`](Self::remove_destroy_listener) or the tree
    /// is dropped.
    pub fn on_destroy(&mut self, listener: impl FnMut(NodeId, &str) + 'static) -> ListenerId {
        self.destroy_listeners.insert(Box::new(listener))
    }

    /// Unregister a listener added with [`on_destroy`](Self::on_destroy).
    /// Returns `false` if it was already removed.
    pub fn remove_destroy_listener(&mut self, listener: ListenerId) -> bool {
        self.destroy_listeners.remove(listener).is_some()
    }

    fn stored_node(&self, id: NodeId) -> Result<&DataNode, NodeError> {
        self.nodes.get(id).ok_or(NodeError::UnknownNode(id))
    }

    fn live_node(&self, id: NodeId) -> Result<&DataNode, NodeError> {
        let node = self.stored_node(id)?;
        if node.is_destroyed() {
            return Err(NodeError::Destroyed(id));
        }
        Ok(node)
    }

    fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(parent)?.child(name)
    }

    fn get_or_create_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if let Some(child) = self.child(parent, name) {
            tracing::trace!(?parent, ?child, name, "cached child");
            return Some(child);
        }
        self.create_child(parent, name)
    }

    fn create_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let parent_node = self.nodes.get(parent)?;
        if !parent_node.is_branch() {
            return None;
        }
        let parent_type = parent_node.data_type();
        let Some(type_info) = self.resolver.resolve(&parent_type, name) else {
            tracing::debug!(?parent, ?parent_type, name, "no such field");
            return None;
        };

        let child = self
            .nodes
            .insert(DataNode::new(type_info, Some(parent), name.to_owned()));
        if let Some(NodeKind::Branch(branch)) = self.nodes.get_mut(parent).map(|node| &mut node.kind) {
            branch.children.insert(name.to_owned(), child);
        }
        tracing::debug!(?parent, ?child, name, ?type_info, "created child");
        Some(child)
    }

    /// Destroy the children of `id` depth first, free them, then tear `id` down.
    fn destroy_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.is_destroyed() {
            return;
        }

        let children: SmallVec<[NodeId; 8]> = node.children().collect();
        for child in &children {
            self.destroy_subtree(*child);
        }
        if let Some(NodeKind::Branch(branch)) = self.nodes.get_mut(id).map(|node| &mut node.kind) {
            branch.children.clear();
        }
        for child in children {
            self.nodes.remove(child);
        }

        self.teardown(id);
    }

    fn teardown(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.flags.remove(NodeFlags::MONITORED);
        node.flags.insert(NodeFlags::DESTROYED);
        node.parent = None;
        tracing::debug!(?id, name = node.name.as_str(), "destroyed node");
        for listener in self.destroy_listeners.values_mut() {
            listener(id, &node.name);
        }
    }

    /// Remove the child called `name` from `parent` and free its slot.
    fn detach(&mut self, parent: NodeId, name: &str) -> bool {
        let removed = match self.nodes.get_mut(parent).map(|node| &mut node.kind) {
            Some(NodeKind::Branch(branch)) => branch.children.shift_remove(name),
            _ => None,
        };
        match removed {
            Some(child) => {
                self.nodes.remove(child);
                true
            }
            None => false,
        }
    }
}
