//! Structural subtype resolution.
//!
//! An abstract type declares a closed, ordered list of candidate subtypes.
//! Registration freezes their signatures into a [`SubtypeCatalog`]; each
//! decode then hands the keys present in the incoming object
//! ([`PresentKeys`]) to the [`StructuralResolver`], which answers with a
//! [`Resolution`].
//!
//! ## Rules
//!
//! - A candidate matches when all of its required attributes are present.
//!   Unknown keys are tolerated unless [`MatchPolicy::Exact`] is used.
//! - Among the matches, a candidate whose attribute set is a strict subset
//!   of another's is more specific and wins over it.
//! - Several matches without a single most specific one are
//!   [`Resolution::Ambiguous`]; declaration order never breaks ties.
//!
//! [`MatchPolicy::Exact`]: crate::MatchPolicy::Exact

// -----------------------------------------------------------------------------
// Modules

mod catalog;
mod keys;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use catalog::SubtypeCatalog;
pub use keys::PresentKeys;
pub use resolver::{Resolution, StructuralResolver};

pub(crate) use resolver::Selection;
