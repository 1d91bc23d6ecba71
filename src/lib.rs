//! Structural subtype marshaling between domain types and JSON-like trees.
//!
//! See [`marshal`] for the registry, the resolver and the codec surface.
//!
//! ```
//! use mx_core::marshal::MarshalConfig;
//! use mx_core::marshal::registry::MarshalRegistry;
//!
//! let registry = MarshalRegistry::with_config(MarshalConfig::new().with_serialize_nulls(true));
//! assert!(registry.config().serialize_nulls);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use mx_marshal as marshal;
pub use mx_utils as utils;
