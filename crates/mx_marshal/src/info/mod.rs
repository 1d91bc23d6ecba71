//! Static descriptions of marshaled types.
//!
//! ## Menu
//!
//! - [`TypeTag`]: identifier of a Rust type, `TypeId` plus type path.
//! - [`Presence`]: whether an attribute must appear in the input.
//! - [`AttributeDef`]: one declared attribute, with its name override and ignore flag.
//! - [`Attribute`]: an attribute as it appears on the wire.
//! - [`AttributeSignature`]: the settable attributes of one concrete type.

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod signature;
mod type_tag;

// -----------------------------------------------------------------------------
// Exports

pub use attribute::{Attribute, AttributeDef, Presence};
pub use signature::AttributeSignature;
pub use type_tag::{TypeTag, TypeTags};
