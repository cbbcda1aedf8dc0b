use core::any::Any;

use crate::info::Type;

/// Metadata for types the schema builder does not look into,
/// e.g. `u64`, `String` or a struct without `#[derive(Named)]`.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    /// Create a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: Any + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}
