//! # Floem Databind
//!
//! Lazily materialized node trees for path based data binding.
//!
//! A [`DataTree`] mirrors the shape of some typed data without building all of
//! it. Consumers address fields with dotted paths like `user.profile.name`;
//! resolving a path creates the nodes along it the first time and returns the
//! cached nodes afterwards. Whether a node becomes a branch (it may own
//! children) or a leaf is decided from type metadata supplied by a
//! [`TypeResolver`], usually a [`TypeRegistry`] filled from
//! `#[derive(DataType)]` structs.
//!
//! ## Example
//!
//! ```rust
//! use floem_databind::{DataTree, DataType, NodeTypeInfo, TypeRegistry};
//!
//! #[derive(DataType)]
//! struct AppState {
//!     count: i32,
//!     #[nested]
//!     user: User,
//! }
//!
//! #[derive(DataType)]
//! struct User {
//!     name: String,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<AppState>();
//! let mut tree = DataTree::new(NodeTypeInfo::branch(AppState::type_handle()), registry);
//!
//! let name = tree.find("user.name").unwrap().unwrap();
//! assert_eq!(tree.find("user.name").unwrap(), Some(name));
//! assert_eq!(tree.find("user.email").unwrap(), None);
//!
//! // `#` refers to the node the path is resolved on.
//! let user = tree.find("user").unwrap().unwrap();
//! assert_eq!(tree.find_descendant(user, "#").unwrap(), Some(user));
//!
//! assert!(tree.remove("user").unwrap());
//! assert!(!tree.contains(name));
//! ```
//!
//! ## Lifecycle
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Removing or destroying a node destroys its whole subtree, children first,
//! and invalidates the ids of every detached node. Re-resolving a removed path
//! creates a new node with a new id.
//!
//! ## Monitoring
//!
//! [`DataTree::is_monitored`] reports whether anyone is interested in a node:
//! a leaf when its monitoring flag is set, a branch when its flag is set or it
//! has at least one materialized child.

mod error;
mod id;
mod node;
mod path;
mod registry;
mod resolver;
mod tree;


pub use error::{ConfigError, NodeError};
pub use floem_databind_derive::DataType;
pub use id::{ListenerId, NodeId};
pub use node::{BranchNode, DataNode, NodeFlags, NodeKind};
pub use path::{DEFAULT_SELF_TOKEN, DEFAULT_SEPARATOR, PathConfig};
pub use registry::TypeRegistry;
pub use resolver::{DataType, NodeTypeInfo, TypeHandle, TypeResolver};
pub use tree::DataTree;
