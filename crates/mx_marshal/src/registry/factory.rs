use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use serde_json::Value;

use crate::codec::{ObjectReader, ObjectWriter, expect_object};
use crate::error::{ConfigurationError, DecodeError, EncodeError};
use crate::info::TypeTag;
use crate::registry::{MarshalRegistry, Subtypes, Variant};
use crate::resolve::{PresentKeys, Resolution, Selection, StructuralResolver, SubtypeCatalog};

// -----------------------------------------------------------------------------
// AdapterFactory

/// The codec of one abstract type.
///
/// Holds the frozen [`SubtypeCatalog`] of `A` next to the [`Variant`]s it
/// was built from, so that a resolved catalog index directly selects the
/// function pointers of the winning candidate.
///
/// Decoding inspects the keys of the incoming object, resolves them and
/// delegates to the winner. Encoding dispatches on the runtime subtype and
/// adds no discriminator.
pub struct AdapterFactory<A> {
    catalog: SubtypeCatalog,
    resolver: StructuralResolver,
    variants: Box<[Variant<A>]>,
}

impl<A: Subtypes> AdapterFactory<A> {
    /// Builds a factory from an explicit candidate list.
    ///
    /// Fails for the same reasons as [`SubtypeCatalog::new`].
    pub fn new(
        resolver: StructuralResolver,
        variants: Vec<Variant<A>>,
    ) -> Result<Self, ConfigurationError> {
        let catalog = SubtypeCatalog::new(
            TypeTag::of::<A>(),
            variants.iter().map(Variant::signature),
        )?;

        Ok(Self {
            catalog,
            resolver,
            variants: variants.into_boxed_slice(),
        })
    }

    /// Builds a factory from [`Subtypes::subtypes`].
    #[inline]
    pub fn of(resolver: StructuralResolver) -> Result<Self, ConfigurationError> {
        Self::new(resolver, A::subtypes())
    }

    #[inline(always)]
    pub fn catalog(&self) -> &SubtypeCatalog {
        &self.catalog
    }

    #[inline(always)]
    pub fn resolver(&self) -> StructuralResolver {
        self.resolver
    }

    /// Resolves the subtype an object node stands for without decoding it.
    pub fn resolve(&self, value: &Value) -> Result<Resolution, DecodeError> {
        let object = expect_object(value, self.catalog.abstract_type())?;
        Ok(self.resolver.resolve(&self.catalog, &PresentKeys::of(object)))
    }

    /// Decodes an object node into the resolved subtype.
    pub fn decode(&self, value: &Value, registry: &MarshalRegistry) -> Result<A, DecodeError> {
        let abstract_type = self.catalog.abstract_type();
        let object = expect_object(value, abstract_type)?;
        let keys = PresentKeys::of(object);

        match self.resolver.select(&self.catalog, &keys) {
            Selection::Unique(index) => {
                let signature = &self.catalog[index];
                log::trace!("decoding `{abstract_type}` as `{}`", signature.owner());

                let input = ObjectReader::new(object, signature, registry);
                self.variants[index].decode(&input)
            }
            Selection::Empty => Err(DecodeError::NoMatchingSubtype {
                abstract_type,
                keys: keys.sorted(),
            }),
            Selection::Tied(indices) => {
                let candidates: Vec<TypeTag> =
                    indices.into_iter().map(|i| self.catalog[i].owner()).collect();
                log::warn!(
                    "rejected ambiguous `{abstract_type}` object with keys {:?}",
                    keys.sorted(),
                );
                Err(DecodeError::AmbiguousSubtype {
                    abstract_type,
                    candidates,
                })
            }
        }
    }

    /// Encodes `value` with the attributes of its runtime subtype.
    pub fn encode(&self, value: &A, registry: &MarshalRegistry) -> Result<Value, EncodeError> {
        let concrete = value.variant();
        let index = self.catalog.position(concrete.type_id()).ok_or(
            EncodeError::UnknownSubtype {
                abstract_type: self.catalog.abstract_type(),
            },
        )?;

        let mut out = ObjectWriter::new(&self.catalog[index], registry);
        self.variants[index].encode(concrete, &mut out)?;
        Ok(out.finish())
    }
}

impl<A> fmt::Debug for AdapterFactory<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterFactory")
            .field("catalog", &self.catalog)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
