use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::Marshal;
use crate::codec::tree::is_omissible;
use crate::error::EncodeError;
use crate::info::{Attribute, AttributeSignature, TypeTag};
use crate::registry::{AdapterFactory, MarshalRegistry, Subtypes};

// -----------------------------------------------------------------------------
// ObjectWriter

/// Builds one object node on behalf of a concrete type.
///
/// Accessors take the *field* name declared in [`Marshal::ATTRIBUTES`] and
/// write under its wire name. Ignored attributes are skipped silently.
///
/// Unless [`MarshalConfig::serialize_nulls`] is set, optional attributes
/// whose value is `null` or an empty array are left out of the object.
/// Required attributes are always written, so the object still matches the
/// signature it was encoded with.
///
/// [`MarshalConfig::serialize_nulls`]: crate::MarshalConfig::serialize_nulls
pub struct ObjectWriter<'a> {
    object: Map<String, Value>,
    signature: &'a AttributeSignature,
    registry: &'a MarshalRegistry,
}

impl<'a> ObjectWriter<'a> {
    #[inline]
    pub(crate) fn new(signature: &'a AttributeSignature, registry: &'a MarshalRegistry) -> Self {
        Self {
            object: Map::new(),
            signature,
            registry,
        }
    }

    /// Returns the concrete type being encoded.
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

    /// Writes a value through its `serde` implementation.
    pub fn attribute<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        let Some(attribute) = self.target(name)? else {
            return Ok(());
        };

        let node = serde_json::to_value(value).map_err(|source| EncodeError::InvalidAttribute {
            owner: self.owner(),
            wire_name: attribute.wire_name(),
            source,
        })?;
        self.put(attribute, node);
        Ok(())
    }

    /// Writes another [`Marshal`] value as a nested object.
    pub fn nested<T: Marshal>(&mut self, name: &'static str, value: &T) -> Result<(), EncodeError> {
        let Some(attribute) = self.target(name)? else {
            return Ok(());
        };

        let node = self.registry.encode(value)?;
        self.put(attribute, node);
        Ok(())
    }

    /// Writes an optional [`Marshal`] value, `None` being `null`.
    pub fn nested_optional<T: Marshal>(
        &mut self,
        name: &'static str,
        value: Option<&T>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.nested(name, value),
            None => self.null(name),
        }
    }

    /// Writes a sequence of [`Marshal`] values as an array.
    pub fn nested_list<T: Marshal>(
        &mut self,
        name: &'static str,
        values: &[T],
    ) -> Result<(), EncodeError> {
        let Some(attribute) = self.target(name)? else {
            return Ok(());
        };

        let items = values
            .iter()
            .map(|value| self.registry.encode(value))
            .collect::<Result<_, _>>()?;
        self.put(attribute, Value::Array(items));
        Ok(())
    }

    /// Writes a value of an abstract type with the attributes of its
    /// runtime subtype.
    pub fn polymorphic<A: Subtypes>(
        &mut self,
        name: &'static str,
        value: &A,
    ) -> Result<(), EncodeError> {
        let Some(attribute) = self.target(name)? else {
            return Ok(());
        };

        let node = self.factory::<A>(name)?.encode(value, self.registry)?;
        self.put(attribute, node);
        Ok(())
    }

    /// Writes an optional abstract value, `None` being `null`.
    pub fn polymorphic_optional<A: Subtypes>(
        &mut self,
        name: &'static str,
        value: Option<&A>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.polymorphic(name, value),
            None => self.null(name),
        }
    }

    /// Writes a sequence of abstract values as an array.
    pub fn polymorphic_list<A: Subtypes>(
        &mut self,
        name: &'static str,
        values: &[A],
    ) -> Result<(), EncodeError> {
        let Some(attribute) = self.target(name)? else {
            return Ok(());
        };

        let items = if values.is_empty() {
            Vec::new()
        } else {
            let factory = self.factory::<A>(name)?;
            values
                .iter()
                .map(|value| factory.encode(value, self.registry))
                .collect::<Result<_, _>>()?
        };
        self.put(attribute, Value::Array(items));
        Ok(())
    }

    #[inline]
    pub(crate) fn finish(self) -> Value {
        Value::Object(self.object)
    }

    // -------------------------------------------------------------------------
    // Internal

    /// The declared attribute, `None` if it is ignored.
    fn target(&self, name: &'static str) -> Result<Option<&'a Attribute>, EncodeError> {
        match self.signature.attribute(name) {
            Some(attribute) => Ok(Some(attribute)),
            None if self.signature.is_ignored(name) => Ok(None),
            None => Err(EncodeError::UndeclaredAttribute {
                owner: self.owner(),
                attribute: name,
            }),
        }
    }

    fn null(&mut self, name: &'static str) -> Result<(), EncodeError> {
        if let Some(attribute) = self.target(name)? {
            self.put(attribute, Value::Null);
        }
        Ok(())
    }

    fn put(&mut self, attribute: &Attribute, node: Value) {
        let keep = attribute.is_required() || self.registry.config().serialize_nulls;
        if keep || !is_omissible(&node) {
            self.object.insert(attribute.wire_name().to_string(), node);
        }
    }

    fn factory<A: Subtypes>(
        &self,
        name: &'static str,
    ) -> Result<&'a AdapterFactory<A>, EncodeError> {
        self.registry
            .attribute_factory::<A>(self.owner().id(), name)
            .ok_or_else(|| EncodeError::Unregistered {
                type_tag: TypeTag::of::<A>(),
            })
    }
}

impl fmt::Debug for ObjectWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectWriter")
            .field("owner", &self.owner())
            .field("object", &self.object)
            .finish_non_exhaustive()
    }
}
