//! Shared containers for the `mx` crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed, so that
//!   iteration order only depends on the inserted keys.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
