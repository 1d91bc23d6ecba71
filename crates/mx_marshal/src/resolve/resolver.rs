use alloc::vec::Vec;

use crate::config::MatchPolicy;
use crate::info::{AttributeSignature, TypeTag};
use crate::resolve::{PresentKeys, SubtypeCatalog};

// -----------------------------------------------------------------------------
// Resolution

/// Outcome of [`StructuralResolver::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one most specific candidate matches.
    Resolved(TypeTag),
    /// Several candidates match and none is more specific than the others.
    /// Listed in declaration order.
    Ambiguous(Vec<TypeTag>),
    /// No candidate has all of its required attributes present.
    NoMatch,
}

impl Resolution {
    /// Returns the resolved candidate, if any.
    #[inline]
    pub fn resolved(&self) -> Option<TypeTag> {
        match self {
            Self::Resolved(tag) => Some(*tag),
            _ => None,
        }
    }
}

/// [`Resolution`] by catalog index.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Selection {
    Unique(usize),
    Tied(Vec<usize>),
    Empty,
}

// -----------------------------------------------------------------------------
// StructuralResolver

/// Picks the subtype an object represents from the keys it contains.
///
/// The resolver is a pure function of the catalog, the keys and its
/// [`MatchPolicy`]; the same inputs always give the same [`Resolution`].
///
/// # Examples
///
/// ```
/// use mx_marshal::info::{AttributeDef, AttributeSignature, TypeTag};
/// use mx_marshal::resolve::{PresentKeys, Resolution, StructuralResolver, SubtypeCatalog};
///
/// struct Shape;
/// struct Circle;
/// struct Rectangle;
///
/// let catalog = SubtypeCatalog::new(
///     TypeTag::of::<Shape>(),
///     [
///         AttributeSignature::new(TypeTag::of::<Circle>(), &[AttributeDef::required("radius")]),
///         AttributeSignature::new(
///             TypeTag::of::<Rectangle>(),
///             &[AttributeDef::required("width"), AttributeDef::required("height")],
///         ),
///     ],
/// )
/// .unwrap();
///
/// let resolver = StructuralResolver::new();
///
/// let keys = PresentKeys::from_iter(["width", "height"]);
/// assert_eq!(resolver.resolve(&catalog, &keys), Resolution::Resolved(TypeTag::of::<Rectangle>()));
///
/// let keys = PresentKeys::from_iter(["radius", "width", "height"]);
/// assert_eq!(
///     resolver.resolve(&catalog, &keys),
///     Resolution::Ambiguous(vec![TypeTag::of::<Circle>(), TypeTag::of::<Rectangle>()]),
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StructuralResolver {
    policy: MatchPolicy,
}

impl StructuralResolver {
    /// A resolver tolerating unknown keys.
    #[inline]
    pub const fn new() -> Self {
        Self {
            policy: MatchPolicy::Open,
        }
    }

    #[inline]
    pub const fn with_policy(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    #[inline(always)]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns `true` if `candidate` accepts an object with these keys.
    pub fn matches(&self, candidate: &AttributeSignature, keys: &PresentKeys<'_>) -> bool {
        let satisfied = candidate
            .required()
            .all(|attribute| keys.contains(attribute.wire_name()));

        match self.policy {
            MatchPolicy::Open => satisfied,
            MatchPolicy::Exact => {
                satisfied && keys.iter().all(|key| candidate.contains_wire_name(key))
            }
        }
    }

    /// Resolves `keys` against the candidates of `catalog`.
    pub fn resolve(&self, catalog: &SubtypeCatalog, keys: &PresentKeys<'_>) -> Resolution {
        let resolution = match self.select(catalog, keys) {
            Selection::Unique(index) => Resolution::Resolved(catalog[index].owner()),
            Selection::Tied(indices) => {
                Resolution::Ambiguous(indices.into_iter().map(|i| catalog[i].owner()).collect())
            }
            Selection::Empty => Resolution::NoMatch,
        };

        log::trace!(
            "resolved `{}` from {} key(s): {resolution:?}",
            catalog.abstract_type(),
            keys.len(),
        );

        resolution
    }

    pub(crate) fn select(&self, catalog: &SubtypeCatalog, keys: &PresentKeys<'_>) -> Selection {
        let matched: Vec<usize> = (0..catalog.len())
            .filter(|&index| self.matches(&catalog[index], keys))
            .collect();

        match matched.as_slice() {
            [] => return Selection::Empty,
            [only] => return Selection::Unique(*only),
            _ => {}
        }

        // Keep the matches that no other match is strictly more specific than.
        let winners: Vec<usize> = matched
            .iter()
            .copied()
            .filter(|&candidate| {
                !matched
                    .iter()
                    .any(|&other| catalog[other].is_strict_subset_of(&catalog[candidate]))
            })
            .collect();

        match winners.as_slice() {
            [only] => Selection::Unique(*only),
            _ => Selection::Tied(winners),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
