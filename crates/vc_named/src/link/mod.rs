//! The hot path: writing schema paths into an instance.

mod ptr;

use crate::Schema;
use crate::info::Typed;
use ptr::InstancePtr;

/// Links `instance` with an explicit `schema`.
///
/// Returns `false`, leaving `instance` untouched, if `schema` was not built
/// from `T`'s own [`TypeInfo`](crate::info::TypeInfo), whether it describes
/// another type or hand-assembled info claiming to be `T`.
///
/// # Examples
///
/// ```
/// use vc_named::{Field, NameRegistry, derive::Named};
///
/// #[derive(Named, Default)]
/// struct Row {
///     #[named(db = "row_id")]
///     pub id: Field<i64>,
/// }
///
/// #[derive(Named, Default)]
/// struct Other {
///     pub id: Field<i64>,
/// }
///
/// let registry = NameRegistry::new();
/// let schema = registry.get_or_build::<Row>("db").unwrap();
///
/// let mut row = Row::default();
/// assert!(vc_named::link_with_schema(&mut row, schema));
/// assert_eq!(row.id.name(), "row_id");
///
/// let mut other = Other::default();
/// assert!(!vc_named::link_with_schema(&mut other, schema));
/// assert!(other.id.no_name());
/// ```
pub fn link_with_schema<T: Typed>(instance: &mut T, schema: &'static Schema) -> bool {
    if !schema.is_built_for::<T>() {
        log::trace!(
            "schema of `{}` cannot link `{}`",
            schema.type_name(),
            core::any::type_name::<T>(),
        );
        return false;
    }
    write_paths(instance, schema);
    true
}

/// Writes every descriptor path of `schema` into `instance`.
///
/// `schema` must have been built from `T::type_info()`.
#[expect(unsafe_code, reason = "offsets come from the `Typed` contract")]
pub(crate) fn write_paths<T: Typed>(instance: &mut T, schema: &'static Schema) {
    debug_assert!(schema.is_built_for::<T>());

    let mut base = InstancePtr::new(instance);
    for desc in schema.fields() {
        // SAFETY: `schema` was built from `T::type_info()`, and `T: Typed`
        // guarantees its offsets address `Field<_>` members inside `T`.
        unsafe {
            base.byte_add(desc.offset()).write_path(desc.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use core::mem::offset_of;

    use super::link_with_schema;
    use crate::info::{FieldInfo, StructInfo, TypeInfo, Typed};
    use crate::{Field, Schema, derive::Named};

    #[derive(Named)]
    struct Account {
        pub balance: u64,
        pub owner: Field<u8>,
    }

    #[test]
    fn hand_built_info_is_not_linked() {
        // Claims `balance` is a `Field<u8>`.
        let info: &'static TypeInfo = Box::leak(Box::new(TypeInfo::Struct(
            StructInfo::new::<Account>(&[FieldInfo::new(
                "balance",
                offset_of!(Account, balance),
                <Field<u8>>::type_info,
            )
            .with_public(true)]),
        )));
        let schema: &'static Schema = Box::leak(Box::new(Schema::build(info, "json").unwrap()));
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.type_id(), Account::type_info().type_id());

        let mut account = Account {
            balance: 42,
            owner: Field::new(1),
        };
        assert!(!link_with_schema(&mut account, schema));
        assert_eq!(account.balance, 42);
        assert!(account.owner.no_name());

        let derived: &'static Schema = Box::leak(Box::new(Schema::of::<Account>("json").unwrap()));
        assert!(link_with_schema(&mut account, derived));
        assert_eq!(account.balance, 42);
        assert_eq!(account.owner.name(), "owner");
    }
}
