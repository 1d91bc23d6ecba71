use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::ops::Index;

use crate::error::ConfigurationError;
use crate::info::{AttributeSignature, TypeTag};

// -----------------------------------------------------------------------------
// SubtypeCatalog

/// The candidate subtypes of one abstract type.
///
/// Candidates keep their declaration order, which is only used for stable
/// iteration and diagnostics, never to break ties. A catalog is frozen at
/// construction and can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use mx_marshal::info::{AttributeDef, AttributeSignature, TypeTag};
/// use mx_marshal::resolve::SubtypeCatalog;
///
/// struct Shape;
/// struct Circle;
/// struct Square;
///
/// let catalog = SubtypeCatalog::new(
///     TypeTag::of::<Shape>(),
///     [
///         AttributeSignature::new(TypeTag::of::<Circle>(), &[AttributeDef::required("radius")]),
///         AttributeSignature::new(TypeTag::of::<Square>(), &[AttributeDef::required("side")]),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog[1].owner(), TypeTag::of::<Square>());
/// ```
#[derive(Clone, Debug)]
pub struct SubtypeCatalog {
    abstract_type: TypeTag,
    candidates: Arc<[Arc<AttributeSignature>]>,
}

impl SubtypeCatalog {
    /// Validates and freezes a candidate list.
    ///
    /// Each item is the outcome of introspecting one candidate. Fails if the
    /// list is empty, a candidate could not be introspected, a candidate is
    /// listed twice, or two candidates are structurally identical.
    pub fn new<I, S>(abstract_type: TypeTag, candidates: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Result<S, ConfigurationError>>,
        S: Into<Arc<AttributeSignature>>,
    {
        Self::build(abstract_type, candidates, true)
    }

    /// Like [`SubtypeCatalog::new`], but accepts structurally identical
    /// candidates.
    ///
    /// Such candidates then surface as [`Resolution::Ambiguous`] for every
    /// input that satisfies them.
    ///
    /// [`Resolution::Ambiguous`]: crate::resolve::Resolution::Ambiguous
    pub fn new_lazy<I, S>(abstract_type: TypeTag, candidates: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Result<S, ConfigurationError>>,
        S: Into<Arc<AttributeSignature>>,
    {
        Self::build(abstract_type, candidates, false)
    }

    fn build<I, S>(
        abstract_type: TypeTag,
        candidates: I,
        reject_identical: bool,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Result<S, ConfigurationError>>,
        S: Into<Arc<AttributeSignature>>,
    {
        let mut signatures: Vec<Arc<AttributeSignature>> = Vec::new();

        for candidate in candidates {
            let signature: Arc<AttributeSignature> = match candidate {
                Ok(signature) => signature.into(),
                Err(reason) => {
                    return Err(ConfigurationError::Unintrospectable {
                        abstract_type,
                        candidate: introspected_owner(&reason).unwrap_or(abstract_type),
                        reason: Box::new(reason),
                    });
                }
            };

            for existing in &signatures {
                if existing.owner() == signature.owner() {
                    return Err(ConfigurationError::DuplicateCandidate {
                        abstract_type,
                        candidate: signature.owner(),
                    });
                }
                if reject_identical && existing.is_structurally_identical(&signature) {
                    return Err(ConfigurationError::IdenticalCandidates {
                        abstract_type,
                        first: existing.owner(),
                        second: signature.owner(),
                    });
                }
            }

            signatures.push(signature);
        }

        if signatures.is_empty() {
            return Err(ConfigurationError::EmptyCandidates { abstract_type });
        }

        Ok(Self {
            abstract_type,
            candidates: signatures.into(),
        })
    }

    /// Returns the abstract type being resolved.
    #[inline(always)]
    pub const fn abstract_type(&self) -> TypeTag {
        self.abstract_type
    }

    /// Returns the candidates in declaration order.
    #[inline(always)]
    pub fn candidates(&self) -> &[Arc<AttributeSignature>] {
        &self.candidates
    }

    /// Returns the number of candidates, never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the candidate at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AttributeSignature> {
        self.candidates.get(index).map(|s| &**s)
    }

    /// Returns the declaration index of the candidate with the given [`TypeId`].
    pub fn position(&self, type_id: TypeId) -> Option<usize> {
        self.candidates.iter().position(|s| s.owner().id() == type_id)
    }

    /// Iterates over the candidates in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &AttributeSignature> {
        self.candidates.iter().map(|s| &**s)
    }
}

impl Index<usize> for SubtypeCatalog {
    type Output = AttributeSignature;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.candidates[index]
    }
}

fn introspected_owner(reason: &ConfigurationError) -> Option<TypeTag> {
    match reason {
        ConfigurationError::IgnoredRequired { owner, .. }
        | ConfigurationError::DuplicateWireName { owner, .. }
        | ConfigurationError::DuplicateAttribute { owner, .. } => Some(*owner),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests
