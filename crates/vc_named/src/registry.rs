use alloc::boxed::Box;
use core::any::TypeId;
use core::ptr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::Equivalent;

use crate::error::SchemaError;
use crate::hash::{FixedHashMap, FixedHashState, TypeIdMap};
use crate::info::{TypeInfo, Typed};
use crate::link::write_paths;
use crate::schema::Schema;

// -----------------------------------------------------------------------------
// Keys

#[derive(PartialEq, Eq, Hash)]
struct TagKey {
    type_id: TypeId,
    tag_key: Box<str>,
}

// Borrowed form of `TagKey`, hashes identically.
#[derive(Hash)]
struct TagKeyRef<'a> {
    type_id: TypeId,
    tag_key: &'a str,
}

impl Equivalent<TagKey> for TagKeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &TagKey) -> bool {
        self.type_id == key.type_id && self.tag_key == &*key.tag_key
    }
}

// Prefixes are compared by content, the caller owns their storage.
#[derive(PartialEq, Eq, Hash)]
struct PrefixKey {
    schema: usize,
    prefix: &'static [&'static str],
}

#[inline]
fn schema_addr(schema: &'static Schema) -> usize {
    ptr::from_ref(schema).addr()
}

// -----------------------------------------------------------------------------
// NameRegistry

struct SchemaTable {
    by_tag: FixedHashMap<TagKey, &'static Schema>,
    bound: TypeIdMap<&'static Schema>,
}

type PrefixTable = FixedHashMap<PrefixKey, &'static Schema>;

/// A cache of [`Schema`]s and the entry point for linking instances.
///
/// Schemas are keyed by `(type, tag key)`, built on first request and never
/// removed. [`register`](Self::register) additionally binds a schema as the
/// one [`link`](Self::link) uses for its type.
///
/// Lookups take a read lock. A missing schema is built outside the lock and
/// inserted only if no other thread inserted one first, so concurrent first
/// use always yields a single shared schema.
///
/// Most code uses the [`global`](Self::global) registry through the
/// [crate-level shortcuts](crate::link()). Independent registries can be
/// created with [`new`](Self::new).
///
/// # Examples
///
/// ```
/// use vc_named::{Field, NameRegistry, derive::Named};
///
/// #[derive(Named, Default)]
/// struct Filter {
///     #[named(json = "min_age", db = "age_lo")]
///     pub min_age: Field<u8>,
/// }
///
/// let registry = NameRegistry::new();
///
/// let mut filter = Filter::default();
/// assert!(!registry.link(&mut filter));
///
/// registry.register::<Filter>("db").unwrap();
/// assert!(registry.link(&mut filter));
/// assert_eq!(filter.min_age.name(), "age_lo");
///
/// assert!(registry.register::<Filter>("json").is_err());
/// ```
pub struct NameRegistry {
    schemas: RwLock<SchemaTable>,
    prefixed: RwLock<PrefixTable>,
}

impl NameRegistry {
    /// Creates an empty registry.
    ///
    /// Schemas are leaked to hand out `&'static` references, so the schemas
    /// a registry builds outlive it.
    #[inline]
    pub const fn new() -> Self {
        Self {
            schemas: RwLock::new(SchemaTable {
                by_tag: FixedHashMap::with_hasher(FixedHashState),
                bound: TypeIdMap::new(),
            }),
            prefixed: RwLock::new(FixedHashMap::with_hasher(FixedHashState)),
        }
    }

    /// Returns the process-wide registry.
    #[inline]
    pub fn global() -> &'static Self {
        static GLOBAL: NameRegistry = NameRegistry::new();
        &GLOBAL
    }

    /// Returns the schema of `T` for `tag_key`, building and caching it on
    /// first request. Does not bind it.
    #[inline]
    pub fn get_or_build<T: Typed>(&self, tag_key: &str) -> Result<&'static Schema, SchemaError> {
        self.get_or_build_by_info(T::type_info(), tag_key)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_build_by_info(
        &self,
        info: &'static TypeInfo,
        tag_key: &str,
    ) -> Result<&'static Schema, SchemaError> {
        let type_id = info.type_id();
        let key = TagKeyRef { type_id, tag_key };

        if let Some(&schema) = self.read_schemas().by_tag.get(&key) {
            return Ok(schema);
        }

        let schema = Schema::build(info, tag_key)?;

        let mut table = self.write_schemas();
        if let Some(&winner) = table.by_tag.get(&key) {
            return Ok(winner);
        }
        let schema: &'static Schema = Box::leak(Box::new(schema));
        table.by_tag.insert(
            TagKey {
                type_id,
                tag_key: tag_key.into(),
            },
            schema,
        );
        Ok(schema)
    }

    /// Builds or fetches the schema of `T` for `tag_key` and binds it as the
    /// schema [`link`](Self::link) uses for `T`.
    ///
    /// Registering the bound key again is cheap and returns the same schema.
    /// Binding `T` to a different key returns [`SchemaError::TagKeyConflict`]
    /// and keeps the existing binding.
    pub fn register<T: Typed>(&self, tag_key: &str) -> Result<&'static Schema, SchemaError> {
        let schema = self.get_or_build::<T>(tag_key)?;
        self.bind(schema)
    }

    #[inline(never)]
    fn bind(&self, schema: &'static Schema) -> Result<&'static Schema, SchemaError> {
        let mut table = self.write_schemas();
        let bound = *table.bound.get_or_insert(schema.type_id(), || schema);

        if ptr::eq(bound, schema) {
            log::debug!(
                "bound `{}` to tag key `{}`",
                schema.type_name(),
                schema.tag_key(),
            );
            Ok(schema)
        } else {
            let err = SchemaError::TagKeyConflict {
                type_name: schema.type_name(),
                bound: bound.tag_key().into(),
                requested: schema.tag_key().into(),
            };
            log::warn!("{err}");
            Err(err)
        }
    }

    /// Returns the schema bound to `T`.
    #[inline]
    pub fn schema<T: Typed>(&self) -> Option<&'static Schema> {
        self.read_schemas().bound.get(&TypeId::of::<T>()).copied()
    }

    /// Returns `true` if a schema is bound to `T`.
    #[inline]
    pub fn contains<T: Typed>(&self) -> bool {
        self.read_schemas().bound.contains(&TypeId::of::<T>())
    }

    /// Returns the number of cached `(type, tag key)` schemas.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_schemas().by_tag.len()
    }

    /// Returns the number of types with a bound schema.
    #[inline]
    pub fn bound_len(&self) -> usize {
        self.read_schemas().bound.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bound schema of `T`, registering the type lazily with its
    /// default tag key if it declares one.
    fn resolve<T: Typed>(&self) -> Option<&'static Schema> {
        if let Some(schema) = self.schema::<T>() {
            return Some(schema);
        }

        let tag_key = T::type_info().as_struct()?.default_tag()?;
        match self.register::<T>(tag_key) {
            Ok(schema) => Some(schema),
            // Another thread bound a different key in between.
            Err(_) => self.schema::<T>(),
        }
    }

    /// Links every [`Field<_>`](crate::Field) of `instance` with the schema
    /// bound to `T`.
    ///
    /// A type that is not registered is registered lazily with the tag key
    /// given by `#[named(tag = "...")]`. Without a default tag key the
    /// instance is left unlinked and `false` is returned.
    ///
    /// Linking only writes precomputed paths at precomputed offsets; it does
    /// not allocate. Linking again is idempotent.
    pub fn link<T: Typed>(&self, instance: &mut T) -> bool {
        match self.resolve::<T>() {
            Some(schema) => {
                write_paths(instance, schema);
                true
            }
            None => {
                log::trace!("`{}` is not registered", core::any::type_name::<T>());
                false
            }
        }
    }

    /// Links `instance` with the schema of `T` for `tag_key`, building it if
    /// needed. Does not bind the schema.
    pub fn link_tagged<T: Typed>(&self, instance: &mut T, tag_key: &str) -> Result<(), SchemaError> {
        let schema = self.get_or_build::<T>(tag_key)?;
        write_paths(instance, schema);
        Ok(())
    }

    /// Links `instance` like [`link`](Self::link), with every path prefixed
    /// by `prefix`.
    ///
    /// The prefixed schema is derived once per `(schema, prefix)` and cached,
    /// so repeated calls do not allocate. An empty prefix is the same as
    /// [`link`](Self::link).
    ///
    /// Cached prefixed schemas are never removed. Prefixes are expected to be
    /// a small set of static paths; a prefix built per instance, such as an
    /// element index, adds one schema per distinct value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_named::{Field, NameRegistry, derive::Named};
    ///
    /// #[derive(Named, Default)]
    /// #[named(tag = "json")]
    /// struct Item {
    ///     pub sku: Field<String>,
    /// }
    ///
    /// let registry = NameRegistry::new();
    /// let mut item = Item::default();
    ///
    /// assert!(registry.link_with_prefix(&mut item, &["order", "items"]));
    /// assert_eq!(item.sku.full_name("."), "order.items.sku");
    /// assert_eq!(item.sku.name(), "sku");
    /// ```
    pub fn link_with_prefix<T: Typed>(
        &self,
        instance: &mut T,
        prefix: &'static [&'static str],
    ) -> bool {
        if prefix.is_empty() {
            return self.link(instance);
        }

        let Some(schema) = self.resolve::<T>() else {
            log::trace!("`{}` is not registered", core::any::type_name::<T>());
            return false;
        };

        write_paths(instance, self.prefixed(schema, prefix));
        true
    }

    #[inline(never)]
    fn prefixed(
        &self,
        schema: &'static Schema,
        prefix: &'static [&'static str],
    ) -> &'static Schema {
        let key = PrefixKey {
            schema: schema_addr(schema),
            prefix,
        };

        if let Some(&prefixed) = self.read_prefixed().get(&key) {
            return prefixed;
        }

        let mut table = self.write_prefixed();
        if let Some(&prefixed) = table.get(&key) {
            return prefixed;
        }

        let prefixed: &'static Schema = Box::leak(Box::new(schema.with_prefix(prefix)));
        log::debug!(
            "derived naming schema of `{}` with prefix {prefix:?}",
            schema.type_name(),
        );

        table.insert(key, prefixed);
        prefixed
    }

    /// Returns the number of cached prefixed schemas.
    #[inline]
    pub fn prefixed_len(&self) -> usize {
        self.read_prefixed().len()
    }

    /// Registers every type declared with `#[named(tag = "...", auto_register)]`.
    ///
    /// Returns `true` if automatic registration is available. Types that fail
    /// to register, e.g. because they are already bound to another key, are
    /// logged and skipped.
    ///
    /// Requires the `auto_register` feature, otherwise does nothing and
    /// returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_named::{Field, NameRegistry, derive::Named};
    ///
    /// #[derive(Named)]
    /// #[named(tag = "db", auto_register)]
    /// struct Account {
    ///     #[named(db = "account_id")]
    ///     pub id: Field<u64>,
    /// }
    ///
    /// let registry = NameRegistry::new();
    /// assert!(registry.auto_register());
    /// assert_eq!(registry.schema::<Account>().unwrap().tag_key(), "db");
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register::AutoRegistration;

            for registration in inventory::iter::<AutoRegistration> {
                if let Err(err) = registration.register(self) {
                    log::warn!("auto registration skipped: {err}");
                }
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    fn read_schemas(&self) -> RwLockReadGuard<'_, SchemaTable> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_schemas(&self) -> RwLockWriteGuard<'_, SchemaTable> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn read_prefixed(&self) -> RwLockReadGuard<'_, PrefixTable> {
        self.prefixed.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_prefixed(&self) -> RwLockWriteGuard<'_, PrefixTable> {
        self.prefixed.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NameRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::NameRegistry;
    use crate::{Field, SchemaError, derive::Named};
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::ptr;

    #[derive(Named, Default)]
    struct Deep {
        #[named(json = "deep")]
        pub value: Field<i32>,
    }

    #[derive(Named, Default)]
    struct Mid {
        #[named(json = "mid")]
        pub deep: Field<Deep>,
    }

    #[derive(Named, Default)]
    #[named(tag = "json")]
    struct Top {
        #[named(json = "top")]
        pub mid: Field<Mid>,
    }

    #[derive(Named, Default)]
    struct Mixed {
        #[named(json = "a,omitempty")]
        pub a: Field<i32>,
        #[named(json = "b")]
        pub b: Field<String>,
        pub c: Field<bool>,
        #[named(json = "-")]
        pub d: Field<i32>,
        #[named(json = "-,")]
        pub e: Field<i32>,
        f: Field<i32>,
        #[named(skip)]
        pub g: Field<i32>,
        pub raw: i32,
    }

    #[test]
    fn named_and_excluded_counts() {
        let registry = NameRegistry::new();
        registry.register::<Mixed>("json").unwrap();

        let mut mixed = Mixed::default();
        assert!(registry.link(&mut mixed));

        assert_eq!(mixed.a.name(), "a");
        assert_eq!(mixed.b.name(), "b");
        assert_eq!(mixed.c.name(), "c");
        for excluded in [&mixed.d, &mixed.e, &mixed.f, &mixed.g] {
            assert!(excluded.no_name());
        }
        assert_eq!(registry.schema::<Mixed>().unwrap().len(), 3);
    }

    #[test]
    fn three_levels() {
        let registry = NameRegistry::new();
        let mut top = Top::default();
        assert!(registry.link(&mut top));

        let deep = &top.mid.deep.value.value;
        assert_eq!(deep.full_name("."), "top.mid.deep");
        assert_eq!(deep.full_name(""), "top.mid.deep");
        assert_eq!(deep.full_name("/"), "top/mid/deep");
        assert_eq!(deep.path(), Some(&["top", "mid", "deep"][..]));
        assert_eq!(top.mid.deep.path().map(<[_]>::len), Some(2));
        assert_eq!(top.mid.path().map(<[_]>::len), Some(1));
    }

    #[test]
    fn relink_is_idempotent() {
        let registry = NameRegistry::new();
        let mut top = Top::default();
        assert!(registry.link(&mut top));
        let first = top.mid.deep.value.value.field_path().unwrap();

        top.mid.deep.value.value.value = 7;
        assert!(registry.link(&mut top));
        let second = top.mid.deep.value.value.field_path().unwrap();

        assert!(ptr::eq(first, second));
        assert_eq!(top.mid.deep.value.value.value, 7);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn instances_share_paths() {
        let registry = NameRegistry::new();
        let mut a = Top::default();
        let mut b = Top::default();
        registry.link(&mut a);
        registry.link(&mut b);
        assert!(ptr::eq(
            a.mid.field_path().unwrap(),
            b.mid.field_path().unwrap()
        ));
    }

    #[test]
    fn unregistered_without_default_tag() {
        let registry = NameRegistry::new();
        let mut mixed = Mixed::default();
        assert!(!registry.link(&mut mixed));
        assert!(mixed.a.no_name());
        assert!(!registry.contains::<Mixed>());
        assert!(registry.is_empty());
    }

    #[test]
    fn non_struct_registration() {
        let registry = NameRegistry::new();
        let err = registry.register::<u64>("json").unwrap_err();
        assert!(matches!(err, SchemaError::NotAStruct { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn tag_key_conflict_keeps_binding() {
        let registry = NameRegistry::new();
        let json = registry.register::<Mixed>("json").unwrap();
        assert!(ptr::eq(registry.register::<Mixed>("json").unwrap(), json));

        let err = registry.register::<Mixed>("db").unwrap_err();
        assert_eq!(
            err,
            SchemaError::TagKeyConflict {
                type_name: core::any::type_name::<Mixed>(),
                bound: "json".into(),
                requested: "db".into(),
            }
        );
        assert!(ptr::eq(registry.schema::<Mixed>().unwrap(), json));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.bound_len(), 1);
    }

    #[test]
    fn link_tagged_does_not_bind() {
        let registry = NameRegistry::new();
        let mut mixed = Mixed::default();
        registry.link_tagged(&mut mixed, "db").unwrap();

        assert_eq!(mixed.a.name(), "a");
        assert_eq!(mixed.d.name(), "d");
        assert!(!registry.contains::<Mixed>());
    }

    #[derive(Named, Default)]
    #[named(tag = "json")]
    struct Pair(
        pub Field<i32>,
        #[named(json = "second")] pub Field<Deep>,
        Field<u8>,
    );

    #[test]
    fn tuple_fields_use_their_index() {
        let registry = NameRegistry::new();
        let mut pair = Pair::default();
        assert!(registry.link(&mut pair));

        assert_eq!(pair.0.name(), "0");
        assert_eq!(pair.1.name(), "second");
        assert_eq!(pair.1.value.value.full_name("."), "second.deep");
        assert!(pair.2.no_name());
        assert_eq!(registry.schema::<Pair>().unwrap().len(), 3);
    }

    #[derive(Named, Default)]
    struct LayoutA {
        #[named(json = "left")]
        pub x: Field<u32>,
    }

    #[derive(Named, Default)]
    struct LayoutB {
        #[named(json = "right")]
        pub x: Field<u32>,
    }

    #[test]
    fn same_layout_types_are_independent() {
        let registry = NameRegistry::new();
        registry.register::<LayoutA>("json").unwrap();
        registry.register::<LayoutB>("json").unwrap();

        let mut a = LayoutA::default();
        let mut b = LayoutB::default();
        registry.link(&mut a);
        registry.link(&mut b);

        assert_eq!(a.x.name(), "left");
        assert_eq!(b.x.name(), "right");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn prefixed_schemas_are_cached() {
        let registry = NameRegistry::new();
        let mut top = Top::default();

        assert!(registry.link_with_prefix(&mut top, &["req"]));
        assert_eq!(top.mid.deep.value.value.full_name("."), "req.top.mid.deep");
        let first = top.mid.field_path().unwrap();
        assert_eq!(registry.prefixed_len(), 1);

        // Equal contents from another static share the cached schema.
        static REQ: [&str; 1] = ["req"];
        let mut other = Top::default();
        assert!(registry.link_with_prefix(&mut other, &REQ));
        assert!(ptr::eq(first, other.mid.field_path().unwrap()));
        assert_eq!(registry.prefixed_len(), 1);

        assert!(registry.link_with_prefix(&mut other, &["resp"]));
        assert_eq!(other.mid.full_name("."), "resp.top");
        assert_eq!(registry.prefixed_len(), 2);

        assert!(registry.link_with_prefix(&mut other, &[]));
        assert_eq!(other.mid.full_name("."), "top");
        assert_eq!(registry.prefixed_len(), 2);

        let mut mixed = Mixed::default();
        assert!(!registry.link_with_prefix(&mut mixed, &["req"]));
        assert_eq!(registry.prefixed_len(), 2);
    }

    #[test]
    fn concurrent_first_use() {
        let registry = NameRegistry::new();

        let schemas: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let mut top = Top::default();
                        assert!(registry.link(&mut top));
                        assert_eq!(top.mid.deep.value.value.full_name("."), "top.mid.deep");
                        ptr::from_ref(registry.schema::<Top>().unwrap()).addr()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(schemas.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(registry.len(), 1);
    }
}
