use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

use crate::codec::{Marshal, NodeKind};
use crate::error::DecodeError;
use crate::info::{AttributeSignature, TypeTag};
use crate::registry::{MarshalRegistry, Subtypes};
use crate::resolve::PresentKeys;

// -----------------------------------------------------------------------------
// ObjectReader

/// Read access to one object node on behalf of a concrete type.
///
/// Every accessor takes the *field* name declared in
/// [`Marshal::ATTRIBUTES`]; the reader looks the value up under its wire
/// name. Ignored attributes always read as absent.
///
/// - `required`: absent is [`DecodeError::MissingAttribute`].
/// - `optional`: absent or `null` is `None`.
/// - `or_default`: absent or `null` is `T::default()`.
///
/// Scalar and collection values are decoded with `serde`. Nested
/// [`Marshal`] values and abstract [`Subtypes`] values go through the
/// registry, and their errors are returned as they are.
pub struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    signature: &'a AttributeSignature,
    registry: &'a MarshalRegistry,
}

impl<'a> ObjectReader<'a> {
    #[inline]
    pub(crate) fn new(
        object: &'a Map<String, Value>,
        signature: &'a AttributeSignature,
        registry: &'a MarshalRegistry,
    ) -> Self {
        Self {
            object,
            signature,
            registry,
        }
    }

    /// Returns the concrete type being decoded.
    #[inline]
    pub fn owner(&self) -> TypeTag {
        self.signature.owner()
    }

    #[inline(always)]
    pub fn signature(&self) -> &'a AttributeSignature {
        self.signature
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a MarshalRegistry {
        self.registry
    }

    /// Returns the keys of the underlying object.
    #[inline]
    pub fn keys(&self) -> PresentKeys<'a> {
        PresentKeys::of(self.object)
    }

    /// Returns the raw node of a declared attribute, `None` when absent or ignored.
    pub fn value(&self, name: &'static str) -> Result<Option<&'a Value>, DecodeError> {
        match self.signature.wire_name(name) {
            Some(wire_name) => Ok(self.object.get(wire_name)),
            None if self.signature.is_ignored(name) => Ok(None),
            None => Err(DecodeError::UndeclaredAttribute {
                owner: self.owner(),
                attribute: name,
            }),
        }
    }

    /// Returns `true` if the attribute is present and not `null`.
    ///
    /// Like the other accessors, fails for a name that is not declared.
    pub fn contains(&self, name: &'static str) -> Result<bool, DecodeError> {
        Ok(self.present(name)?.is_some())
    }

    /// Decodes a required attribute.
    pub fn required<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, DecodeError> {
        let node = self.require(name)?;
        self.convert(name, node)
    }

    /// Decodes a nullable attribute.
    pub fn optional<T: DeserializeOwned>(
        &self,
        name: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        match self.present(name)? {
            Some(node) => self.convert(name, node).map(Some),
            None => Ok(None),
        }
    }

    /// Decodes an attribute that falls back to `T::default()`.
    pub fn or_default<T: DeserializeOwned + Default>(
        &self,
        name: &'static str,
    ) -> Result<T, DecodeError> {
        self.optional(name).map(Option::unwrap_or_default)
    }

    /// Decodes a required attribute holding another [`Marshal`] type.
    pub fn nested<T: Marshal>(&self, name: &'static str) -> Result<T, DecodeError> {
        let node = self.require(name)?;
        self.registry.decode::<T>(node)
    }

    /// Decodes a nullable attribute holding another [`Marshal`] type.
    pub fn nested_optional<T: Marshal>(
        &self,
        name: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        match self.present(name)? {
            Some(node) => self.registry.decode::<T>(node).map(Some),
            None => Ok(None),
        }
    }

    /// Decodes an array of [`Marshal`] values; absent or `null` is empty.
    pub fn nested_list<T: Marshal>(&self, name: &'static str) -> Result<Vec<T>, DecodeError> {
        self.items(name)?
            .iter()
            .map(|node| self.registry.decode::<T>(node))
            .collect()
    }

    /// Decodes a required attribute of an abstract type.
    ///
    /// A candidate list registered for this attribute takes precedence over
    /// the one registered for `A`.
    pub fn polymorphic<A: Subtypes>(&self, name: &'static str) -> Result<A, DecodeError> {
        let node = self.require(name)?;
        self.registry
            .attribute_factory::<A>(self.owner().id(), name)
            .ok_or_else(Self::unregistered::<A>)?
            .decode(node, self.registry)
    }

    /// Decodes a nullable attribute of an abstract type.
    pub fn polymorphic_optional<A: Subtypes>(
        &self,
        name: &'static str,
    ) -> Result<Option<A>, DecodeError> {
        match self.present(name)? {
            Some(node) => self
                .registry
                .attribute_factory::<A>(self.owner().id(), name)
                .ok_or_else(Self::unregistered::<A>)?
                .decode(node, self.registry)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Decodes an array of abstract values; absent or `null` is empty.
    pub fn polymorphic_list<A: Subtypes>(&self, name: &'static str) -> Result<Vec<A>, DecodeError> {
        let items = self.items(name)?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let factory = self
            .registry
            .attribute_factory::<A>(self.owner().id(), name)
            .ok_or_else(Self::unregistered::<A>)?;

        items
            .iter()
            .map(|node| factory.decode(node, self.registry))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal

    fn wire_name(&self, name: &'static str) -> &'static str {
        self.signature.wire_name(name).unwrap_or(name)
    }

    fn require(&self, name: &'static str) -> Result<&'a Value, DecodeError> {
        self.value(name)?
            .ok_or_else(|| DecodeError::MissingAttribute {
                owner: self.owner(),
                wire_name: self.wire_name(name),
            })
    }

    fn present(&self, name: &'static str) -> Result<Option<&'a Value>, DecodeError> {
        Ok(self.value(name)?.filter(|node| !node.is_null()))
    }

    fn items(&self, name: &'static str) -> Result<&'a [Value], DecodeError> {
        match self.present(name)? {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(self.invalid(
                name,
                serde_json::Error::custom(Expected("an array", NodeKind::of(other))),
            )),
        }
    }

    fn convert<T: DeserializeOwned>(
        &self,
        name: &'static str,
        node: &'a Value,
    ) -> Result<T, DecodeError> {
        T::deserialize(node).map_err(|source| self.invalid(name, source))
    }

    fn invalid(&self, name: &'static str, source: serde_json::Error) -> DecodeError {
        DecodeError::InvalidAttribute {
            owner: self.owner(),
            wire_name: self.wire_name(name),
            source,
        }
    }

    fn unregistered<A: 'static>() -> DecodeError {
        DecodeError::Unregistered {
            type_tag: TypeTag::of::<A>(),
        }
    }
}

impl fmt::Debug for ObjectReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectReader")
            .field("owner", &self.owner())
            .field("object", self.object)
            .finish_non_exhaustive()
    }
}

struct Expected(&'static str, NodeKind);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.0, self.1)
    }
}
