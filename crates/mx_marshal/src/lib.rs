//! Marshaling between domain types and JSON-like trees, with structural
//! subtype resolution for abstract types.
//!
//! # Overview
//!
//! - [`info`]: attribute declarations ([`AttributeDef`](info::AttributeDef))
//!   and the per-type [`AttributeSignature`](info::AttributeSignature).
//! - [`resolve`]: the [`SubtypeCatalog`](resolve::SubtypeCatalog) of an abstract
//!   type and the [`StructuralResolver`](resolve::StructuralResolver) choosing
//!   a candidate from the keys present in an object.
//! - [`codec`]: the [`Marshal`](codec::Marshal) trait, object readers and
//!   writers, and [`TypeAdapter`](codec::TypeAdapter).
//! - [`registry`]: [`Subtypes`](registry::Subtypes), the per-abstract-type
//!   [`AdapterFactory`](registry::AdapterFactory) and the
//!   [`MarshalRegistry`](registry::MarshalRegistry) tying everything together.
//!
//! # Example
//!
//! ```
//! use mx_marshal::codec::{Marshal, ObjectReader, ObjectWriter};
//! use mx_marshal::error::{DecodeError, EncodeError};
//! use mx_marshal::info::AttributeDef;
//! use mx_marshal::registry::MarshalRegistry;
//! use mx_marshal::impl_subtypes;
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Circle { radius: f64 }
//!
//! #[derive(Debug, PartialEq)]
//! struct Rectangle { width: f64, height: f64 }
//!
//! impl Marshal for Circle {
//!     const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("radius")];
//!
//!     fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
//!         out.attribute("radius", &self.radius)
//!     }
//!
//!     fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
//!         Ok(Self { radius: input.required("radius")? })
//!     }
//! }
//!
//! impl Marshal for Rectangle {
//!     const ATTRIBUTES: &'static [AttributeDef] = &[
//!         AttributeDef::required("width"),
//!         AttributeDef::required("height"),
//!     ];
//!
//!     fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
//!         out.attribute("width", &self.width)?;
//!         out.attribute("height", &self.height)
//!     }
//!
//!     fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
//!         Ok(Self { width: input.required("width")?, height: input.required("height")? })
//!     }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum Shape {
//!     Circle(Circle),
//!     Rectangle(Rectangle),
//! }
//!
//! impl_subtypes!(Shape { Circle(Circle), Rectangle(Rectangle) });
//!
//! let mut registry = MarshalRegistry::new();
//! registry.register_subtypes::<Shape>().unwrap();
//!
//! let shape: Shape = registry.decode_polymorphic(&json!({ "radius": 2.0 })).unwrap();
//! assert_eq!(shape, Shape::Circle(Circle { radius: 2.0 }));
//!
//! let tree = registry.encode_polymorphic(&shape).unwrap();
//! assert_eq!(tree, json!({ "radius": 2.0 }));
//!
//! // Both candidates are satisfied and neither is more specific.
//! let err = registry
//!     .decode_polymorphic::<Shape>(&json!({ "radius": 2, "width": 3, "height": 4 }))
//!     .unwrap_err();
//! assert!(matches!(err, DecodeError::AmbiguousSubtype { .. }));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod codec;
pub mod config;
pub mod error;
pub mod info;
pub mod registry;
pub mod resolve;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::vec::Vec;
}

pub use config::{MarshalConfig, MatchPolicy};
