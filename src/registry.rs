//! A [`TypeResolver`] backed by registered type metadata.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::resolver::{DataType, NodeTypeInfo, TypeHandle, TypeResolver};

#[derive(educe::Educe)]
#[educe(Debug)]
enum TypeEntry {
    /// A struct implementing [`DataType`].
    Struct(#[educe(Debug(ignore))] fn(&str) -> Option<NodeTypeInfo>),
    /// A `Vec<T>`: every canonical index (`0`, `1`, ...) is a child.
    Sequence(NodeTypeInfo),
    /// Fields listed by hand for a schema-only type.
    Fields(IndexMap<String, NodeTypeInfo, FxBuildHasher>),
}

/// Type metadata for every type a [`DataTree`](crate::DataTree) may reach.
///
/// ```rust,ignore
/// let mut registry = TypeRegistry::new();
/// registry.register::<AppState>();
/// let tree = DataTree::new(NodeTypeInfo::branch(AppState::type_handle()), registry);
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: FxHashMap<TypeHandle, TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` and, through [`DataType::register_nested`], the types of
    /// its nested fields. Registering a type twice is a no-op, which also
    /// stops recursive types from looping.
    pub fn register<T: DataType>(&mut self) -> &mut Self {
        let handle = T::type_handle();
        if self.types.contains_key(&handle) {
            return self;
        }
        self.types.insert(handle, TypeEntry::Struct(T::field_info));
        T::register_nested(self);
        self
    }

    /// Register `Vec<T>` as a branch whose children are its elements, named by
    /// index, plus `T` itself.
    pub fn register_sequence<T: DataType>(&mut self) -> &mut Self {
        self.types
            .entry(TypeHandle::of::<Vec<T>>())
            .or_insert_with(|| TypeEntry::Sequence(NodeTypeInfo::branch(T::type_handle())));
        self.register::<T>()
    }

    /// Describe a type by listing its fields. Fields already registered for
    /// `handle` this way are kept; later entries with the same name win.
    ///
    /// Types registered through [`register`](Self::register) are replaced.
    pub fn register_fields<'a>(
        &mut self,
        handle: TypeHandle,
        fields: impl IntoIterator<Item = (&'a str, NodeTypeInfo)>,
    ) -> &mut Self {
        let entry = self
            .types
            .entry(handle)
            .or_insert_with(|| TypeEntry::Fields(IndexMap::default()));
        if !matches!(entry, TypeEntry::Fields(_)) {
            *entry = TypeEntry::Fields(IndexMap::default());
        }
        if let TypeEntry::Fields(known) = entry {
            known.extend(fields.into_iter().map(|(name, info)| (name.to_owned(), info)));
        }
        self
    }

    pub fn contains(&self, handle: &TypeHandle) -> bool {
        self.types.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, container: &TypeHandle, child: &str) -> Option<NodeTypeInfo> {
        match self.types.get(container)? {
            TypeEntry::Struct(field_info) => field_info(child),
            TypeEntry::Sequence(element) => is_index(child).then_some(*element),
            TypeEntry::Fields(fields) => fields.get(child).copied(),
        }
    }
}

/// `0`, `1`, `42`, but not `01`, `-1` or the empty string, so every element has
/// exactly one name.
fn is_index(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && (name == "0" || !name.starts_with('0'))
}
