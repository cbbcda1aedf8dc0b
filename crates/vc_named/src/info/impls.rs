#![expect(unsafe_code, reason = "`Typed` is an unsafe trait.")]

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Field;
use crate::info::{GenericTypeInfoCell, NonGenericTypeInfoCell};
use crate::info::{OpaqueInfo, TypeInfo, Typed, WrapperInfo};

// -----------------------------------------------------------------------------
// Opaque

macro_rules! impl_typed_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: opaque infos expose no offsets.
            unsafe impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
                }
            }
        )*
    };
}

impl_typed_opaque!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, &'static str,
);

macro_rules! impl_typed_opaque_generic {
    ($($ty:ident),* $(,)?) => {
        $(
            // SAFETY: opaque infos expose no offsets.
            unsafe impl<T: 'static> Typed for $ty<T> {
                fn type_info() -> &'static TypeInfo {
                    static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                    CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
                }
            }
        )*
    };
}

impl_typed_opaque_generic!(Option, Vec, Box);

// -----------------------------------------------------------------------------
// Field

// SAFETY: `WrapperInfo::new::<P>` describes `Field<P>` itself.
unsafe impl<P: Typed> Typed for Field<P> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Wrapper(WrapperInfo::new::<P>(P::type_info)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Field;
    use crate::info::Typed;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn primitives_are_opaque() {
        assert!(!u8::type_info().is_wrapper());
        assert!(!String::type_info().is_struct());
        assert!(<Option<u8>>::type_info().ty().is::<Option<u8>>());
        assert!(<Vec<u8>>::type_info().ty().is::<Vec<u8>>());
        assert!(<Vec<u16>>::type_info().ty().is::<Vec<u16>>());
    }

    #[test]
    fn field_is_wrapper() {
        let info = <Field<String>>::type_info();
        assert!(info.ty().is::<Field<String>>());
        let wrapper = info.as_wrapper().unwrap();
        assert!(wrapper.payload().ty().is::<String>());

        // Each instantiation keeps its own entry in the shared cell.
        let other = <Field<u32>>::type_info().as_wrapper().unwrap();
        assert!(other.payload().ty().is::<u32>());
        assert!(core::ptr::eq(info, <Field<String>>::type_info()));
    }
}
