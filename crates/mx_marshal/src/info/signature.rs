use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::codec::Marshal;
use crate::error::ConfigurationError;
use crate::info::{Attribute, AttributeDef, TypeTag};

// -----------------------------------------------------------------------------
// AttributeSignature

/// The settable attributes of one concrete type, as seen on the wire.
///
/// Built from the type's [`AttributeDef`] table: wire names already carry
/// their overrides and ignored attributes are filtered out. Wire names are
/// unique within one signature.
///
/// # Examples
///
/// ```
/// use mx_marshal::info::{AttributeDef, AttributeSignature, TypeTag};
///
/// struct Circle;
///
/// let signature = AttributeSignature::new(
///     TypeTag::of::<Circle>(),
///     &[
///         AttributeDef::required("radius").rename("r"),
///         AttributeDef::optional("label"),
///         AttributeDef::optional("cache").ignore(),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(signature.len(), 2);
/// assert_eq!(signature.wire_name("radius"), Some("r"));
/// assert!(signature.is_ignored("cache"));
/// assert_eq!(signature.required().count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct AttributeSignature {
    owner: TypeTag,
    attributes: Box<[Attribute]>,
    ignored: Box<[&'static str]>,
}

impl AttributeSignature {
    /// Builds the signature of `owner` from its declaration table.
    ///
    /// Fails if a required attribute is ignored, a field is declared twice,
    /// or two attributes share a wire name.
    pub fn new(owner: TypeTag, defs: &[AttributeDef]) -> Result<Self, ConfigurationError> {
        let mut attributes: Vec<Attribute> = Vec::with_capacity(defs.len());
        let mut ignored: Vec<&'static str> = Vec::new();

        for def in defs {
            let declared = attributes.iter().any(|a| a.name() == def.name())
                || ignored.contains(&def.name());
            if declared {
                return Err(ConfigurationError::DuplicateAttribute {
                    owner,
                    attribute: def.name(),
                });
            }

            if def.is_ignored() {
                if def.is_required() {
                    return Err(ConfigurationError::IgnoredRequired {
                        owner,
                        attribute: def.name(),
                    });
                }
                ignored.push(def.name());
                continue;
            }

            if attributes.iter().any(|a| a.wire_name() == def.wire_name()) {
                return Err(ConfigurationError::DuplicateWireName {
                    owner,
                    wire_name: def.wire_name(),
                });
            }
            attributes.push(Attribute::from_def(def));
        }

        Ok(Self {
            owner,
            attributes: attributes.into_boxed_slice(),
            ignored: ignored.into_boxed_slice(),
        })
    }

    /// Builds the signature of `T` from [`Marshal::ATTRIBUTES`].
    #[inline]
    pub fn of<T: Marshal>() -> Result<Self, ConfigurationError> {
        Self::new(TypeTag::of::<T>(), T::ATTRIBUTES)
    }

    /// Returns the concrete type described by this signature.
    #[inline(always)]
    pub const fn owner(&self) -> TypeTag {
        self.owner
    }

    /// Returns the attributes in declaration order.
    #[inline(always)]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the number of (non-ignored) attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the required attributes in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_required())
    }

    /// Returns the attribute with the given field name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Returns the wire name of the given field.
    #[inline]
    pub fn wire_name(&self, name: &str) -> Option<&'static str> {
        self.attribute(name).map(Attribute::wire_name)
    }

    /// Returns `true` if the field was declared with [`AttributeDef::ignore`].
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|ignored| *ignored == name)
    }

    /// Returns `true` if some attribute uses `wire_name`.
    pub fn contains_wire_name(&self, wire_name: &str) -> bool {
        self.attributes.iter().any(|a| a.wire_name() == wire_name)
    }

    /// Returns `true` if every wire name of `self` is also used by `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.attributes
            .iter()
            .all(|a| other.contains_wire_name(a.wire_name()))
    }

    /// Returns `true` if `self`'s wire names form a strict subset of `other`'s.
    ///
    /// Wire names are unique, so a subset with fewer entries is strict.
    #[inline]
    pub fn is_strict_subset_of(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset_of(other)
    }

    /// Returns `true` if both signatures declare the same wire names with
    /// the same required flags, whatever their order.
    pub fn is_structurally_identical(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.attributes.iter().all(|a| {
                other
                    .attributes
                    .iter()
                    .any(|b| b.wire_name() == a.wire_name() && b.is_required() == a.is_required())
            })
    }
}

// -----------------------------------------------------------------------------
// Tests
