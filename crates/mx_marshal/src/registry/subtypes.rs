use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::codec::{Marshal, ObjectReader, ObjectWriter};
use crate::error::{ConfigurationError, DecodeError, EncodeError};
use crate::info::{AttributeDef, AttributeSignature, TypeTag};

// -----------------------------------------------------------------------------
// Subtypes

/// An abstract type with a closed list of concrete subtypes.
///
/// The order of [`Subtypes::subtypes`] is the declaration order of the
/// catalog. It is kept for diagnostics and never breaks ties.
///
/// Usually implemented for an enum with [`impl_subtypes!`](crate::impl_subtypes).
pub trait Subtypes: Sized + 'static {
    /// The candidate subtypes, in declaration order.
    fn subtypes() -> Vec<Variant<Self>>;

    /// The concrete value behind `self`.
    fn variant(&self) -> &dyn Any;
}

// -----------------------------------------------------------------------------
// Variant

/// One candidate subtype of `A`.
///
/// Stores the candidate's attribute table and two function pointers that
/// decode it into an `A` and encode it from the value returned by
/// [`Subtypes::variant`].
pub struct Variant<A> {
    ty: TypeTag,
    attributes: &'static [AttributeDef],
    decode: fn(&ObjectReader<'_>) -> Result<A, DecodeError>,
    encode: fn(&dyn Any, &mut ObjectWriter<'_>) -> Result<(), EncodeError>,
}

impl<A: 'static> Variant<A> {
    /// Describes the concrete type `C` as a subtype of `A`.
    pub fn of<C: Marshal + Into<A>>() -> Self {
        Self {
            ty: TypeTag::of::<C>(),
            attributes: C::ATTRIBUTES,
            decode: |input| C::decode(input).map(Into::into),
            encode: |value, out| match value.downcast_ref::<C>() {
                Some(value) => value.encode(out),
                None => Err(EncodeError::UnknownSubtype {
                    abstract_type: TypeTag::of::<A>(),
                }),
            },
        }
    }

    /// Returns the concrete type.
    #[inline(always)]
    pub const fn ty(&self) -> TypeTag {
        self.ty
    }

    #[inline(always)]
    pub const fn attributes(&self) -> &'static [AttributeDef] {
        self.attributes
    }

    /// Introspects the attribute table of the concrete type.
    #[inline]
    pub fn signature(&self) -> Result<AttributeSignature, ConfigurationError> {
        AttributeSignature::new(self.ty, self.attributes)
    }

    #[inline]
    pub(crate) fn decode(&self, input: &ObjectReader<'_>) -> Result<A, DecodeError> {
        (self.decode)(input)
    }

    #[inline]
    pub(crate) fn encode(
        &self,
        value: &dyn Any,
        out: &mut ObjectWriter<'_>,
    ) -> Result<(), EncodeError> {
        (self.encode)(value, out)
    }
}

impl<A> Clone for Variant<A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Variant<A> {}

impl<A> fmt::Debug for Variant<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("ty", &self.ty)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// impl_subtypes

/// Implements [`Subtypes`] for an enum whose variants each wrap one
/// [`Marshal`] type, plus `From` for every wrapped type.
///
/// Variants are listed in declaration order.
///
/// ```ignore
/// impl_subtypes!(Shape { Circle(Circle), Rectangle(Rectangle) });
/// ```
///
/// See the [crate-level documentation](crate) for a full example.
#[macro_export]
macro_rules! impl_subtypes {
    ($abstract:ty { $($variant:ident($concrete:ty)),+ $(,)? }) => {
        $(
            impl ::core::convert::From<$concrete> for $abstract {
                #[inline]
                fn from(value: $concrete) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl $crate::registry::Subtypes for $abstract {
            fn subtypes() -> $crate::__macro_exports::Vec<$crate::registry::Variant<Self>> {
                $crate::__macro_exports::Vec::from([
                    $($crate::registry::Variant::of::<$concrete>(),)+
                ])
            }

            fn variant(&self) -> &dyn ::core::any::Any {
                match self {
                    $(Self::$variant(value) => value as &dyn ::core::any::Any,)+
                }
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests
