use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{OpaqueInfo, StructInfo, WrapperInfo};

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and its name.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: fn() -> &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub const fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>,
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name, as given by [`core::any::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a type, as far as naming is concerned.
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    Wrapper(WrapperInfo),
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Wrapper(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_wrapper(&self) -> Option<&WrapperInfo> {
        match self {
            Self::Wrapper(info) => Some(info),
            _ => None,
        }
    }

    /// Returns `true` if the type is a [`Field<_>`](crate::Field).
    #[inline]
    pub const fn is_wrapper(&self) -> bool {
        matches!(self, Self::Wrapper(_))
    }

    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}
