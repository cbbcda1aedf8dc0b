use alloc::boxed::Box;
use core::any::Any;

use crate::info::{FieldInfo, Type};

/// A container for compile-time named struct info.
///
/// # Examples
///
/// ```rust
/// use vc_named::{Field, derive::Named, info::Typed};
///
/// #[derive(Named)]
/// #[named(tag = "json")]
/// struct A {
///     pub val: Field<f32>,
/// }
///
/// let info = A::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.default_tag(), Some("json"));
/// assert!(info.ty().is::<A>());
/// ```
#[derive(Debug, Clone)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    default_tag: Option<&'static str>,
}

impl StructInfo {
    /// Create a new [`StructInfo`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    pub fn new<T: Any>(fields: &[FieldInfo]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            default_tag: None,
        }
    }

    /// Sets the tag key used when an unregistered instance is linked.
    #[inline]
    pub fn with_default_tag(self, tag_key: &'static str) -> Self {
        Self {
            default_tag: Some(tag_key),
            ..self
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the default tag key declared with `#[named(tag = "...")]`.
    #[inline]
    pub const fn default_tag(&self) -> Option<&'static str> {
        self.default_tag
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the [`FieldInfo`] with the given declared `name`.
    ///
    /// This is O(N) complexity.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`FieldInfo`] at the given index.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
