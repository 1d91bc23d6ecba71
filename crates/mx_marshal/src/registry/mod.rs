//! Registration of concrete and abstract types.
//!
//! ## Menu
//!
//! - [`Subtypes`]: An abstract type with a closed, ordered list of subtypes.
//! - [`Variant`]: One candidate subtype, with its attribute table and codec functions.
//! - [`impl_subtypes!`]: Implements [`Subtypes`] for an enum of [`Marshal`] types.
//! - [`AdapterFactory`]: The resolving codec of one abstract type.
//! - [`MarshalRegistry`]: A container of signatures and factories, and the
//!   entry point for decoding and encoding.
//! - `install` / `global`: The process-wide registry (`std` only).
//!
//! ## Attribute-level subtypes
//!
//! [`MarshalRegistry::register_attribute_subtypes`] attaches a candidate list
//! to a single attribute of an owner type. Reading or writing that attribute
//! with `polymorphic` uses this list before the one registered for the
//! abstract type itself.
//!
//! [`impl_subtypes!`]: crate::impl_subtypes
//! [`Marshal`]: crate::codec::Marshal

// -----------------------------------------------------------------------------
// Modules

mod factory;
mod marshal_registry;
mod subtypes;

#[cfg(feature = "std")]
mod global;

// -----------------------------------------------------------------------------
// Exports

pub use factory::AdapterFactory;
pub use marshal_registry::MarshalRegistry;
pub use subtypes::{Subtypes, Variant};

#[cfg(feature = "std")]
pub use global::{global, install};
