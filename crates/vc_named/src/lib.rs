//! Cheap access to the serialization names of struct fields.
//!
//! A struct derives [`Named`](derive::Named) and wraps the fields it wants to
//! refer to in [`Field<T>`]. The first time a type is registered, its
//! reflection metadata is walked once into a [`Schema`]: the tag-derived path
//! of every wrapper field and its byte offset inside the struct. Linking an
//! instance afterwards is a flat list of offset writes, without reflection and
//! without allocation.
//!
//! ```
//! use vc_named::{Field, derive::Named};
//!
//! #[derive(Named, Default)]
//! struct Address {
//!     #[named(json = "zip_code")]
//!     pub zip: Field<String>,
//! }
//!
//! #[derive(Named, Default)]
//! #[named(tag = "json")]
//! struct User {
//!     #[named(json = "user_id,omitempty")]
//!     pub id: Field<u64>,
//!     pub address: Field<Address>,
//!     #[named(json = "-")]
//!     pub secret: Field<String>,
//! }
//!
//! let mut user = User::default();
//! assert!(vc_named::link(&mut user));
//!
//! assert_eq!(user.id.name(), "user_id");
//! assert_eq!(user.address.name(), "address");
//! assert_eq!(user.address.zip.full_name("."), "address.zip_code");
//! assert!(user.secret.no_name());
//! ```
//!
//! ## Menu
//!
//! - [`Field`]: the wrapper carrying a value and its linked [`FieldPath`].
//! - [`info`]: compile-time struct metadata produced by `#[derive(Named)]`.
//! - [`tag`]: tag tables and the `name,option` tag value syntax.
//! - [`Schema`]: the immutable per-(type, tag key) descriptor list.
//! - [`NameRegistry`]: the schema cache and the link entry points.

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vc_named` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vc_named` can be used as an alias for `crate`.
extern crate self as vc_named;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod field;
mod hash;
mod link;
mod path;
mod registry;
mod schema;

pub mod info;
pub mod tag;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::SchemaError;
pub use field::{Field, FieldHeader};
pub use link::link_with_schema;
pub use path::{DEFAULT_SEPARATOR, FieldPath};
pub use registry::NameRegistry;
pub use schema::{FieldDescriptor, Schema};
pub use vc_named_derive as derive;

use info::Typed;

// -----------------------------------------------------------------------------
// Global shortcuts

/// Builds, caches and binds the schema of `T` for `tag_key` in the
/// [global registry](NameRegistry::global).
///
/// See [`NameRegistry::register`].
#[inline]
pub fn register<T: Typed>(tag_key: &str) -> Result<&'static Schema, SchemaError> {
    NameRegistry::global().register::<T>(tag_key)
}

/// Links every wrapper field of `instance` through the
/// [global registry](NameRegistry::global).
///
/// See [`NameRegistry::link`].
#[inline]
pub fn link<T: Typed>(instance: &mut T) -> bool {
    NameRegistry::global().link(instance)
}

/// Links `instance` with every path prefixed by `prefix`.
///
/// See [`NameRegistry::link_with_prefix`].
#[inline]
pub fn link_with_prefix<T: Typed>(instance: &mut T, prefix: &'static [&'static str]) -> bool {
    NameRegistry::global().link_with_prefix(instance, prefix)
}

/// Links `instance` with the schema built for an explicit `tag_key`.
///
/// See [`NameRegistry::link_tagged`].
#[inline]
pub fn link_tagged<T: Typed>(instance: &mut T, tag_key: &str) -> Result<(), SchemaError> {
    NameRegistry::global().link_tagged(instance, tag_key)
}
