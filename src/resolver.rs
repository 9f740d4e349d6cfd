//! Type metadata consulted when a branch materializes a child.
//!
//! A [`DataTree`](crate::DataTree) never looks at the backing data itself. To
//! decide whether `user.profile` exists, and whether it becomes a branch or a
//! leaf, it asks a [`TypeResolver`] about the declared type of `user`.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::registry::TypeRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum TypeKey {
    Rust(TypeId),
    Named(&'static str),
}

/// Identifies the declared type of a node's value.
///
/// Handles created with [`TypeHandle::of`] compare by Rust type identity.
/// Handles created with [`TypeHandle::named`] describe schema-only types that
/// have no Rust counterpart and compare by name.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    key: TypeKey,
    name: &'static str,
}

impl TypeHandle {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::Rust(TypeId::of::<T>()),
            name: std::any::type_name::<T>(),
        }
    }

    pub const fn named(name: &'static str) -> Self {
        Self {
            key: TypeKey::Named(name),
            name,
        }
    }

    /// Human readable type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name).finish()
    }
}

/// What a resolver knows about a field: its declared type and whether the
/// node created for it may own children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeTypeInfo {
    pub data_type: TypeHandle,
    pub can_have_children: bool,
}

impl NodeTypeInfo {
    /// A field whose node owns children.
    pub const fn branch(data_type: TypeHandle) -> Self {
        Self {
            data_type,
            can_have_children: true,
        }
    }

    /// A terminal field.
    pub const fn leaf(data_type: TypeHandle) -> Self {
        Self {
            data_type,
            can_have_children: false,
        }
    }
}

/// Maps `(container type, child name)` to the child's type metadata.
///
/// `None` means the container type has no field of that name. A field whose
/// value is currently unset still resolves to `Some`. Implementations must be
/// pure queries over static metadata.
pub trait TypeResolver {
    fn resolve(&self, container: &TypeHandle, child: &str) -> Option<NodeTypeInfo>;
}

impl<F> TypeResolver for F
where
    F: Fn(&TypeHandle, &str) -> Option<NodeTypeInfo>,
{
    fn resolve(&self, container: &TypeHandle, child: &str) -> Option<NodeTypeInfo> {
        self(container, child)
    }
}

/// Compile-time field metadata for a struct.
///
/// Use `#[derive(DataType)]` to implement this. Fields marked `#[nested]` are
/// reported as branches and their types are registered along with the struct.
///
/// ```rust,ignore
/// use floem_databind::DataType;
///
/// #[derive(DataType)]
/// struct User {
///     name: String,
///     #[nested]
///     profile: Profile,
/// }
///
/// #[derive(DataType)]
/// struct Profile {
///     age: u32,
/// }
///
/// assert!(User::field_info("profile").unwrap().can_have_children);
/// assert!(User::field_info("missing").is_none());
/// ```
pub trait DataType: 'static {
    fn type_handle() -> TypeHandle {
        TypeHandle::of::<Self>()
    }

    /// Metadata for the field called `name`, or `None` if there is no such field.
    fn field_info(name: &str) -> Option<NodeTypeInfo>;

    /// All field names in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Register the types of `#[nested]` fields.
    fn register_nested(_registry: &mut TypeRegistry) {}
}
