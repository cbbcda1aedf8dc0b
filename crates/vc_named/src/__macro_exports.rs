//! Items used by the code generated from `#[derive(Named)]`.

// -----------------------------------------------------------------------------
// probe

/// Finds the [`TypeInfo`](crate::info::TypeInfo) accessor of a field type
/// without requiring the type to implement anything.
///
/// Called as `(&&&Probe::<Ty>::new()).type_info_fn()` with all three traits
/// in scope; method resolution picks the first applicable level:
///
/// 1. `Ty: Typed` uses `Ty::type_info`;
/// 2. `Ty = Field<P>` for any `P` is a wrapper with an opaque payload;
/// 3. anything else is opaque.
pub mod probe {
    use core::marker::PhantomData;

    use crate::Field;
    use crate::info::{GenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed, WrapperInfo};

    pub struct Probe<T>(PhantomData<fn() -> T>);

    impl<T> Probe<T> {
        #[inline(always)]
        pub const fn new() -> Self {
            Self(PhantomData)
        }
    }

    pub trait ProbeTyped {
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo;
    }

    impl<T: Typed> ProbeTyped for &&Probe<T> {
        #[inline(always)]
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
            T::type_info
        }
    }

    pub trait ProbeField {
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo;
    }

    impl<P: 'static> ProbeField for &Probe<Field<P>> {
        #[inline(always)]
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
            opaque_wrapper::<P>
        }
    }

    pub trait ProbeOpaque {
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo;
    }

    impl<T: 'static> ProbeOpaque for Probe<T> {
        #[inline(always)]
        fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
            opaque::<T>
        }
    }

    fn opaque<T: 'static>() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<T>(|| TypeInfo::Opaque(OpaqueInfo::new::<T>()))
    }

    fn opaque_wrapper<P: 'static>() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Field<P>>(|| TypeInfo::Wrapper(WrapperInfo::new::<P>(opaque::<P>)))
    }

    #[cfg(test)]
    mod tests {
        use super::{Probe, ProbeField as _, ProbeOpaque as _, ProbeTyped as _};
        use crate::Field;

        struct Plain;

        #[test]
        fn resolution_order() {
            let typed = (&&&Probe::<Field<u8>>::new()).type_info_fn()();
            assert!(typed.as_wrapper().unwrap().payload().ty().is::<u8>());

            let field = (&&&Probe::<Field<Plain>>::new()).type_info_fn()();
            let wrapper = field.as_wrapper().unwrap();
            assert!(wrapper.ty().is::<Field<Plain>>());
            assert!(!wrapper.payload().is_struct());

            let plain = (&&&Probe::<Plain>::new()).type_info_fn()();
            assert!(plain.ty().is::<Plain>());
            assert!(!plain.is_wrapper());
        }
    }
}

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::Typed;
    use crate::{NameRegistry, Schema, SchemaError};

    type RegisterFn = fn(&NameRegistry, &str) -> Result<&'static Schema, SchemaError>;

    /// A type and tag key collected for [`NameRegistry::auto_register`].
    pub struct AutoRegistration {
        tag_key: &'static str,
        register: RegisterFn,
    }

    impl AutoRegistration {
        #[inline]
        pub const fn new<T: Typed>(tag_key: &'static str) -> Self {
            Self {
                tag_key,
                register: NameRegistry::register::<T>,
            }
        }

        #[inline]
        pub(crate) fn register(
            &self,
            registry: &NameRegistry,
        ) -> Result<&'static Schema, SchemaError> {
            (self.register)(registry, self.tag_key)
        }
    }

    inventory::collect!(AutoRegistration);
}
