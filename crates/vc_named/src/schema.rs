use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use core::ptr;

use crate::error::SchemaError;
use crate::info::{StructInfo, Type, TypeInfo, Typed};
use crate::path::FieldPath;

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One [`Field<_>`](crate::Field) reachable from a schema's root type.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    path: FieldPath,
    offset: usize,
}

impl FieldDescriptor {
    /// Returns the path from the struct root.
    #[inline]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the byte offset of the `Field<_>` from the start of the root
    /// instance, accumulated through every nesting level.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the leaf name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.path.name()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.path, self.offset)
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The immutable naming descriptor of one struct type under one tag key.
///
/// A schema lists every [`Field<_>`](crate::Field) of the type, nested ones
/// included, in depth-first declaration order. It is built once by walking
/// the type's [`TypeInfo`] and is then shared by every linked instance.
///
/// Building rules, per field:
///
/// - non-`pub` fields and fields marked `#[named(skip)]` are ignored;
/// - a tag value whose name is `-` excludes the field, and its payload is
///   not scanned;
/// - the name is the tag value's name, or the declared name if it is empty
///   or the field has no tag for the key;
/// - only `Field<_>` members are listed; a `Field<T>` whose `T` derives
///   `Named` is followed by the fields of `T`.
///
/// # Examples
///
/// ```
/// use vc_named::{Field, Schema, derive::Named};
///
/// #[derive(Named)]
/// struct Inner {
///     #[named(db = "deep_col")]
///     pub deep: Field<i32>,
/// }
///
/// #[derive(Named)]
/// struct Outer {
///     #[named(db = "mid_col")]
///     pub mid: Field<Inner>,
///     #[named(db = "-")]
///     pub ignored: Field<Inner>,
///     pub plain: i32,
/// }
///
/// let schema = Schema::of::<Outer>("db").unwrap();
/// let paths: Vec<_> = schema.iter_paths().map(|p| p.dotted()).collect();
///
/// assert_eq!(paths, ["mid_col", "mid_col.deep_col"]);
/// assert_eq!(schema.tag_key(), "db");
/// ```
pub struct Schema {
    // The info the schema was built from. Offsets are only trusted for the
    // type whose `Typed::type_info` returns this exact reference.
    info: &'static TypeInfo,
    tag_key: Box<str>,
    fields: Box<[FieldDescriptor]>,
}

impl Schema {
    /// Builds the schema of the struct described by `info` for `tag_key`.
    ///
    /// Returns [`SchemaError::NotAStruct`] if `info` is not a struct. A struct
    /// without matching fields yields an empty schema.
    ///
    /// A schema built from any `info` other than the one returned by
    /// [`Typed::type_info`] can be inspected but not linked.
    pub fn build(info: &'static TypeInfo, tag_key: &str) -> Result<Self, SchemaError> {
        let Some(struct_info) = info.as_struct() else {
            return Err(SchemaError::NotAStruct {
                type_name: info.type_name(),
            });
        };

        let mut fields = Vec::new();
        collect(struct_info, tag_key, &[], 0, &mut fields);

        log::debug!(
            "built naming schema of `{}` for tag key `{tag_key}` ({} fields)",
            info.type_name(),
            fields.len(),
        );

        Ok(Self {
            info,
            tag_key: tag_key.into(),
            fields: fields.into_boxed_slice(),
        })
    }

    /// Builds the schema of `T` for `tag_key`, see [`build`](Self::build).
    #[inline]
    pub fn of<T: Typed>(tag_key: &str) -> Result<Self, SchemaError> {
        Self::build(T::type_info(), tag_key)
    }

    /// Derives a schema with every path prefixed by `prefix`.
    pub(crate) fn with_prefix(&self, prefix: &[&'static str]) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|desc| FieldDescriptor {
                path: desc.path.with_prefix(prefix),
                offset: desc.offset,
            })
            .collect();

        Self {
            info: self.info,
            tag_key: self.tag_key.clone(),
            fields,
        }
    }

    /// Returns the descriptors in depth-first declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[inline]
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.type_id()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.info.type_name()
    }

    /// Returns `true` if the schema was built from `T`'s own type info, the
    /// only case in which its offsets may be written into a `T`.
    #[inline]
    pub(crate) fn is_built_for<T: Typed>(&self) -> bool {
        ptr::eq(self.info, T::type_info())
    }

    /// Returns the number of descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the descriptor whose path equals `segments`.
    pub fn field_by_path(&self, segments: &[&str]) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|desc| desc.path.is(segments))
    }

    /// Iterates the descriptor paths in order.
    pub fn iter_paths(&self) -> impl ExactSizeIterator<Item = &FieldPath> {
        self.fields.iter().map(FieldDescriptor::path)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type", self.info.ty())
            .field("tag_key", &self.tag_key)
            .field("fields", &self.fields)
            .finish()
    }
}

fn collect(
    info: &StructInfo,
    tag_key: &str,
    parent: &[&'static str],
    base: usize,
    out: &mut Vec<FieldDescriptor>,
) {
    for field in info.fields() {
        if !field.is_public() || field.tags().is_skip_all() {
            continue;
        }

        let name = match field.tags().lookup(tag_key) {
            Some(value) if value.is_skip() => continue,
            Some(value) if !value.name().is_empty() => value.name(),
            _ => field.name(),
        };

        let Some(wrapper) = field.type_info().as_wrapper() else {
            continue;
        };

        let path = FieldPath::child(parent, name);
        let offset = base + field.offset();
        log::trace!("`{}`: {path} @ {offset}", info.ty().name());

        match wrapper.payload().as_struct() {
            Some(nested) => {
                let segments = path.segments().to_vec();
                out.push(FieldDescriptor { path, offset });
                let base = offset + wrapper.value_offset();
                collect(nested, tag_key, &segments, base, out);
            }
            None => out.push(FieldDescriptor { path, offset }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
#[expect(unsafe_code, reason = "hand-written `Typed` impls")]
mod tests {
    use super::Schema;
    use crate::info::{FieldInfo, NonGenericTypeInfoCell, StructInfo, TypeInfo, Typed};
    use crate::tag::StructTag;
    use crate::{Field, SchemaError};
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::mem::offset_of;

    #[repr(C)]
    struct Leaf {
        a: Field<u8>,
        b: Field<String>,
    }

    unsafe impl Typed for Leaf {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::Struct(StructInfo::new::<Self>(&[
                    FieldInfo::new("a", offset_of!(Self, a), <Field<u8>>::type_info)
                        .with_public(true)
                        .with_tags(StructTag::new(&[("json", "alpha,omitempty")])),
                    FieldInfo::new("b", offset_of!(Self, b), <Field<String>>::type_info)
                        .with_public(true),
                ]))
            })
        }
    }

    struct Root {
        count: u32,
        leaf: Field<Leaf>,
        hidden: Field<Leaf>,
        skipped: Field<Leaf>,
    }

    unsafe impl Typed for Root {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::Struct(StructInfo::new::<Self>(&[
                    FieldInfo::new("count", offset_of!(Self, count), u32::type_info)
                        .with_public(true),
                    FieldInfo::new("leaf", offset_of!(Self, leaf), <Field<Leaf>>::type_info)
                        .with_public(true)
                        .with_tags(StructTag::new(&[("json", "l")])),
                    FieldInfo::new("hidden", offset_of!(Self, hidden), <Field<Leaf>>::type_info),
                    FieldInfo::new("skipped", offset_of!(Self, skipped), <Field<Leaf>>::type_info)
                        .with_public(true)
                        .with_tags(StructTag::EMPTY.with_skip_all()),
                ]))
            })
        }
    }

    #[test]
    fn depth_first_with_offsets() {
        let schema = Schema::of::<Root>("json").unwrap();
        let paths: Vec<_> = schema.iter_paths().map(|p| p.dotted()).collect();
        assert_eq!(paths, ["l", "l.alpha", "l.b"]);

        let leaf = offset_of!(Root, leaf);
        let value = leaf + Field::<Leaf>::VALUE_OFFSET;
        assert_eq!(schema.fields()[0].offset(), leaf);
        assert_eq!(schema.fields()[1].offset(), value + offset_of!(Leaf, a));
        assert_eq!(schema.fields()[2].offset(), value + offset_of!(Leaf, b));
    }

    #[test]
    fn other_tag_key_uses_declared_names() {
        let schema = Schema::of::<Root>("db").unwrap();
        assert!(schema.field_by_path(&["leaf", "a"]).is_some());
        assert!(schema.field_by_path(&["l", "alpha"]).is_none());
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn opaque_is_not_a_struct() {
        let err = Schema::of::<u32>("json").unwrap_err();
        assert_eq!(err, SchemaError::NotAStruct { type_name: "u32" });

        let err = Schema::of::<Field<Leaf>>("json").unwrap_err();
        assert!(matches!(err, SchemaError::NotAStruct { .. }));
    }

    #[test]
    fn prefixed_copy() {
        let schema = Schema::of::<Leaf>("json").unwrap();
        let prefixed = schema.with_prefix(&["req", "body"]);
        assert_eq!(prefixed.fields()[0].path().dotted(), "req.body.alpha");
        assert_eq!(prefixed.fields()[0].offset(), schema.fields()[0].offset());
        assert_eq!(prefixed.type_id(), schema.type_id());
    }
}
