use core::fmt;
use core::marker::PhantomData;

use serde_json::Value;

use crate::codec::{ObjectReader, ObjectWriter, expect_object};
use crate::error::{DecodeError, EncodeError};
use crate::info::{AttributeDef, AttributeSignature};
use crate::registry::MarshalRegistry;

// -----------------------------------------------------------------------------
// Marshal

/// A concrete type that can be written to and read from an object node.
///
/// `ATTRIBUTES` lists every settable attribute; it is what the structural
/// resolver matches against when the type is a subtype candidate. `encode`
/// and `decode` must only use attributes from that table.
///
/// # Examples
///
/// ```
/// use mx_marshal::codec::{Marshal, ObjectReader, ObjectWriter};
/// use mx_marshal::error::{DecodeError, EncodeError};
/// use mx_marshal::info::AttributeDef;
/// use mx_marshal::registry::MarshalRegistry;
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct Account {
///     id: String,
///     nickname: Option<String>,
///     roles: Vec<String>,
/// }
///
/// impl Marshal for Account {
///     const ATTRIBUTES: &'static [AttributeDef] = &[
///         AttributeDef::required("id").rename("_id"),
///         AttributeDef::optional("nickname"),
///         AttributeDef::defaulted("roles"),
///     ];
///
///     fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
///         out.attribute("id", &self.id)?;
///         out.attribute("nickname", &self.nickname)?;
///         out.attribute("roles", &self.roles)
///     }
///
///     fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
///         Ok(Self {
///             id: input.required("id")?,
///             nickname: input.optional("nickname")?,
///             roles: input.or_default("roles")?,
///         })
///     }
/// }
///
/// let mut registry = MarshalRegistry::new();
/// registry.register::<Account>().unwrap();
///
/// let account = Account { id: "a1".into(), nickname: None, roles: vec![] };
/// let tree = registry.encode(&account).unwrap();
/// assert_eq!(tree, json!({ "_id": "a1" }));
/// assert_eq!(registry.decode::<Account>(&tree).unwrap(), account);
/// ```
pub trait Marshal: Sized + 'static {
    /// Declared attributes, in declaration order.
    const ATTRIBUTES: &'static [AttributeDef];

    /// Writes the attributes of `self`.
    fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError>;

    /// Reads a value from an object node.
    fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError>;
}

// -----------------------------------------------------------------------------
// TypeAdapter

/// Codec for one registered concrete type.
///
/// Borrowed from a [`MarshalRegistry`], which supplies the cached
/// signature, the configuration and the adapters of nested types.
pub struct TypeAdapter<'r, T> {
    signature: &'r AttributeSignature,
    registry: &'r MarshalRegistry,
    _marker: PhantomData<fn() -> T>,
}

impl<'r, T: Marshal> TypeAdapter<'r, T> {
    #[inline]
    pub(crate) fn new(signature: &'r AttributeSignature, registry: &'r MarshalRegistry) -> Self {
        Self {
            signature,
            registry,
            _marker: PhantomData,
        }
    }

    /// Returns the signature of `T`.
    #[inline(always)]
    pub fn signature(&self) -> &'r AttributeSignature {
        self.signature
    }

    /// Decodes a `T` from an object node.
    pub fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        let object = expect_object(value, self.signature.owner())?;
        T::decode(&ObjectReader::new(object, self.signature, self.registry))
    }

    /// Encodes `value` into an object node.
    pub fn encode(&self, value: &T) -> Result<Value, EncodeError> {
        let mut out = ObjectWriter::new(self.signature, self.registry);
        value.encode(&mut out)?;
        Ok(out.finish())
    }
}

impl<T> Clone for TypeAdapter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeAdapter<'_, T> {}

impl<T> fmt::Debug for TypeAdapter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAdapter")
            .field("signature", self.signature)
            .finish_non_exhaustive()
    }
}
