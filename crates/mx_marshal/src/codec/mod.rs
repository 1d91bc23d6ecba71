//! Conversion between concrete types and trees.
//!
//! Trees are [`serde_json::Value`]s. A concrete type implements [`Marshal`]:
//! a `const` table of [`AttributeDef`](crate::info::AttributeDef)s plus an
//! `encode` through [`ObjectWriter`] and a `decode` through [`ObjectReader`].
//! Reader and writer take field names and apply the wire-name overrides,
//! the ignore flags and the null policy on the caller's behalf.
//!
//! [`TypeAdapter`] is the per-type entry point handed out by
//! [`MarshalRegistry::adapter`](crate::registry::MarshalRegistry::adapter).

// -----------------------------------------------------------------------------
// Modules

mod marshal;
mod reader;
mod tree;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use marshal::{Marshal, TypeAdapter};
pub use reader::ObjectReader;
pub use tree::{NodeKind, expect_object};
pub use writer::ObjectWriter;

pub use serde_json::{Map, Value};
