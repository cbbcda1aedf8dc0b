//! Compile-time struct metadata consumed by the schema builder.
//!
//! ## Menu
//!
//! - [`Typed`]: a static accessor to a type's [`TypeInfo`], implemented by
//!   `#[derive(Named)]`.
//! - [`Type`]: the `TypeId` and name of a type.
//! - [`TypeInfo`]: one of the following:
//!     - [`StructInfo`]: a named struct, its [`FieldInfo`]s and its default tag key.
//!     - [`WrapperInfo`]: a [`Field<T>`](crate::Field), the unit the linker writes into.
//!     - [`OpaqueInfo`]: anything the builder does not look into.
//! - [`NonGenericTypeInfoCell`] and [`GenericTypeInfoCell`]: static storage
//!   used to implement [`Typed`].

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod field_info;
mod impls;
mod opaque_info;
mod struct_info;
mod type_info;
mod typed;
mod wrapper_info;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use field_info::FieldInfo;
pub use opaque_info::OpaqueInfo;
pub use struct_info::StructInfo;
pub use type_info::{Type, TypeInfo};
pub use typed::Typed;
pub use wrapper_info::WrapperInfo;
