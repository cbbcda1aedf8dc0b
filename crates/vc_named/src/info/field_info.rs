use crate::info::TypeInfo;
use crate::tag::StructTag;

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a struct field.
///
/// Tuple struct fields are named by their index (`"0"`, `"1"`, ...).
///
/// # Examples
///
/// ```
/// use vc_named::{Field, derive::Named, info::Typed};
///
/// #[derive(Named)]
/// struct Foo {
///     #[named(json = "a,omitempty")]
///     pub field_a: Field<f32>,
///     field_b: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field_a = info.field_at(0).unwrap();
///
/// assert_eq!(field_a.name(), "field_a");
/// assert!(field_a.is_public());
/// assert_eq!(field_a.tags().get("json"), Some("a,omitempty"));
/// assert!(!info.field_at(1).unwrap().is_public());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    offset: usize,
    is_public: bool,
    tags: StructTag,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
}

impl FieldInfo {
    /// Creates a private, untagged field at byte `offset`.
    #[inline]
    pub const fn new(
        name: &'static str,
        offset: usize,
        type_info: fn() -> &'static TypeInfo,
    ) -> Self {
        Self {
            name,
            offset,
            is_public: false,
            tags: StructTag::EMPTY,
            type_info,
        }
    }

    #[inline]
    pub const fn with_public(self, is_public: bool) -> Self {
        Self { is_public, ..self }
    }

    #[inline]
    pub const fn with_tags(self, tags: StructTag) -> Self {
        Self { tags, ..self }
    }

    /// Returns the declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the byte offset of the field inside its struct.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` for `pub` fields.
    #[inline]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    #[inline]
    pub const fn tags(&self) -> &StructTag {
        &self.tags
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}
