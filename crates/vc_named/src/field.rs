use alloc::borrow::Cow;
use core::fmt;
use core::mem::offset_of;
use core::ops::{Deref, DerefMut};
use core::str::FromStr;

use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::path::FieldPath;

// -----------------------------------------------------------------------------
// FieldHeader

/// The leading part of every [`Field<T>`], independent of `T`.
///
/// Both types are `#[repr(C)]` with the path slot first, so the linker can
/// write the path of any `Field<_>` through a `FieldHeader` view at the
/// field's offset.
#[repr(C)]
pub struct FieldHeader {
    pub(crate) path: Option<&'static FieldPath>,
}

impl FieldHeader {
    /// Returns the linked path.
    #[inline]
    pub fn path(&self) -> Option<&'static FieldPath> {
        self.path
    }
}

const _: () = assert!(offset_of!(FieldHeader, path) == 0);

// -----------------------------------------------------------------------------
// Field

/// A struct field that knows its serialization name once linked.
///
/// `Field<T>` stores the user value next to a reference to a [`FieldPath`]
/// owned by a cached [`Schema`](crate::Schema). Until the owning instance is
/// linked, the field has no name.
///
/// Equality, hashing of values, `Display`, `FromStr` and serde all look at the
/// value only; the path is never compared or serialized.
///
/// # Examples
///
/// ```
/// use vc_named::{Field, derive::Named};
///
/// #[derive(Named, Default, serde::Serialize)]
/// #[named(tag = "json")]
/// struct Query {
///     #[named(json = "f1,omitempty")]
///     #[serde(rename = "f1", skip_serializing_if = "Field::is_zero")]
///     pub f1: Field<i32>,
///     #[named(json = "f2")]
///     #[serde(rename = "f2")]
///     pub f2: Field<String>,
/// }
///
/// let mut query = Query::default();
/// query.f2.value = "test".into();
/// vc_named::link(&mut query);
///
/// assert_eq!(query.f2.name(), "f2");
/// assert!(query.f1.no_value());
/// assert_eq!(serde_json::to_string(&query).unwrap(), r#"{"f2":"test"}"#);
/// ```
#[repr(C)]
pub struct Field<T> {
    path: Option<&'static FieldPath>,
    /// The wrapped value.
    pub value: T,
}

const _: () = assert!(offset_of!(Field<u8>, path) == offset_of!(FieldHeader, path));
const _: () = assert!(offset_of!(Field<[u64; 4]>, path) == 0);

impl<T> Field<T> {
    /// Byte offset of [`value`](Self::value) inside `Field<T>`.
    pub const VALUE_OFFSET: usize = offset_of!(Self, value);

    /// Creates an unlinked field.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { path: None, value }
    }

    /// Consumes the field, returning the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns the last path segment, or `""` if unlinked.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self.path {
            Some(path) => path.name(),
            None => "",
        }
    }

    /// Returns the path segments joined by `separator`, or `""` if unlinked.
    ///
    /// An empty separator means [`DEFAULT_SEPARATOR`](crate::DEFAULT_SEPARATOR),
    /// which is precomputed and returned without allocating.
    pub fn full_name(&self, separator: &str) -> Cow<'static, str> {
        match self.path {
            Some(path) => path.join(separator),
            None => Cow::Borrowed(""),
        }
    }

    /// Returns the path segments from the struct root, `None` if unlinked.
    #[inline]
    pub fn path(&self) -> Option<&'static [&'static str]> {
        self.path.map(FieldPath::segments)
    }

    /// Returns the linked [`FieldPath`].
    #[inline]
    pub fn field_path(&self) -> Option<&'static FieldPath> {
        self.path
    }

    /// Returns `true` if the field is unlinked or linked to an empty path.
    #[inline]
    pub fn no_name(&self) -> bool {
        self.path.is_none_or(FieldPath::is_empty)
    }
}

impl<T: Default + PartialEq> Field<T> {
    /// Returns `true` if the value equals `T::default()`.
    #[inline]
    pub fn no_value(&self) -> bool {
        self.value == T::default()
    }

    /// Same as [`no_value`](Self::no_value), shaped for
    /// `#[serde(skip_serializing_if = "Field::is_zero")]`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.no_value()
    }
}

impl<T> Deref for Field<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Field<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T> From<T> for Field<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Default> Default for Field<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Clone for Field<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            path: self.path,
            value: self.value.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Field<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Field<T> {}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.full_name(""))
            .field("value", &self.value)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: FromStr> FromStr for Field<T> {
    type Err = T::Err;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        T::from_str(s).map(Self::new)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Field;
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};

    #[derive(Default, PartialEq, Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn unlinked_field() {
        let field = Field::new(3_u8);
        assert_eq!(field.name(), "");
        assert_eq!(field.full_name("."), "");
        assert!(field.path().is_none());
        assert!(field.no_name());
    }

    #[test]
    fn no_value() {
        assert!(Field::<i64>::default().no_value());
        assert!(!Field::new(-1_i64).no_value());

        assert!(Field::<String>::default().no_value());
        assert!(!Field::new(String::from("x")).no_value());

        assert!(Field::new(false).no_value());
        assert!(!Field::new(true).no_value());

        assert!(Field::<Option<Box<u32>>>::default().no_value());
        assert!(!Field::new(Some(Box::new(0_u32))).no_value());

        assert!(Field::new(Point::default()).is_zero());
        assert!(!Field::new(Point { x: 0, y: 1 }).is_zero());
    }

    #[test]
    fn value_passthrough() {
        let mut field: Field<i32> = "42".parse().unwrap();
        assert_eq!(*field, 42);
        *field += 1;
        assert_eq!(field.to_string(), "43");
        assert_eq!(field, Field::from(43));
        assert_eq!(field.into_inner(), 43);
    }

    #[test]
    fn serde_is_transparent() {
        let field = Field::new(String::from("test"));
        assert_eq!(serde_json::to_string(&field).unwrap(), r#""test""#);

        let back: Field<String> = serde_json::from_str(r#""test""#).unwrap();
        assert_eq!(back.value, "test");
        assert!(back.no_name());

        let ron_text = ron::to_string(&Field::new(Some(7_u16))).unwrap();
        assert_eq!(ron_text, "Some(7)");
        let back: Field<Option<u16>> = ron::from_str(&ron_text).unwrap();
        assert_eq!(back.value, Some(7));
    }

    #[test]
    fn value_offset() {
        assert_eq!(Field::<u8>::VALUE_OFFSET, size_of::<usize>());
        assert_eq!(Field::<u64>::VALUE_OFFSET, size_of::<usize>());
    }
}
