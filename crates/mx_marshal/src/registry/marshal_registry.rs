use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use mx_utils::TypeIdMap;
use mx_utils::hash::HashMap;
use serde_json::Value;

use crate::MarshalConfig;
use crate::codec::{Marshal, TypeAdapter};
use crate::error::{ConfigurationError, DecodeError, EncodeError};
use crate::info::{AttributeSignature, TypeTag};
use crate::registry::{AdapterFactory, Subtypes, Variant};
use crate::resolve::StructuralResolver;

type ErasedFactory = Box<dyn Any + Send + Sync>;

/// Owner type, field name and abstract type of an attribute-level list.
type AttributeKey = (TypeId, &'static str, TypeId);

// -----------------------------------------------------------------------------
// MarshalRegistry

/// The central store of signatures and subtype factories.
///
/// Concrete types are registered with [`register`], abstract types with
/// [`register_subtypes`]. Registration validates everything up front: a
/// rejected call returns a [`ConfigurationError`] and leaves the registry
/// untouched.
///
/// Once built, a registry is only read. It is `Send + Sync`, so it can be
/// shared between threads behind an `Arc` or installed as the process-wide
/// registry.
///
/// # Example
///
/// ```
/// use mx_marshal::codec::{Marshal, ObjectReader, ObjectWriter};
/// use mx_marshal::error::{ConfigurationError, DecodeError, EncodeError};
/// use mx_marshal::info::{AttributeDef, TypeTag};
/// use mx_marshal::registry::MarshalRegistry;
/// use mx_marshal::{MarshalConfig, impl_subtypes};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct Click { x: i32, y: i32 }
///
/// #[derive(Debug, PartialEq)]
/// struct Key { code: u32, repeat: bool }
///
/// impl Marshal for Click {
///     const ATTRIBUTES: &'static [AttributeDef] =
///         &[AttributeDef::required("x"), AttributeDef::required("y")];
///
///     fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
///         out.attribute("x", &self.x)?;
///         out.attribute("y", &self.y)
///     }
///
///     fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
///         Ok(Self { x: input.required("x")?, y: input.required("y")? })
///     }
/// }
///
/// impl Marshal for Key {
///     const ATTRIBUTES: &'static [AttributeDef] =
///         &[AttributeDef::required("code"), AttributeDef::defaulted("repeat")];
///
///     fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
///         out.attribute("code", &self.code)?;
///         out.attribute("repeat", &self.repeat)
///     }
///
///     fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
///         Ok(Self { code: input.required("code")?, repeat: input.or_default("repeat")? })
///     }
/// }
///
/// #[derive(Debug, PartialEq)]
/// enum Event { Click(Click), Key(Key) }
///
/// impl_subtypes!(Event { Click(Click), Key(Key) });
///
/// let mut registry = MarshalRegistry::with_config(MarshalConfig::new());
/// registry.register_subtypes::<Event>().unwrap();
///
/// // Candidate types are registered along with the abstract type.
/// assert!(registry.signature(TypeTag::of::<Key>().id()).is_some());
///
/// let event: Event = registry.decode_polymorphic(&json!({ "code": 13 })).unwrap();
/// assert_eq!(event, Event::Key(Key { code: 13, repeat: false }));
///
/// let err = registry.register_subtypes::<Event>().unwrap_err();
/// assert!(matches!(err, ConfigurationError::DuplicateRegistration { .. }));
/// ```
///
/// [`register`]: MarshalRegistry::register
/// [`register_subtypes`]: MarshalRegistry::register_subtypes
pub struct MarshalRegistry {
    config: MarshalConfig,
    resolver: StructuralResolver,
    signatures: TypeIdMap<Arc<AttributeSignature>>,
    factories: TypeIdMap<ErasedFactory>,
    attribute_factories: HashMap<AttributeKey, ErasedFactory>,
}

impl Default for MarshalRegistry {
    /// See [`MarshalRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MarshalRegistry {
    /// Creates an empty registry with the default [`MarshalConfig`].
    #[inline]
    pub fn new() -> Self {
        Self::with_config(MarshalConfig::new())
    }

    /// Creates an empty registry; its resolver uses `config.match_policy`.
    pub fn with_config(config: MarshalConfig) -> Self {
        Self {
            config,
            resolver: StructuralResolver::with_policy(config.match_policy),
            signatures: TypeIdMap::new(),
            factories: TypeIdMap::new(),
            attribute_factories: HashMap::default(),
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &MarshalConfig {
        &self.config
    }

    #[inline(always)]
    pub fn resolver(&self) -> StructuralResolver {
        self.resolver
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Registers the concrete type `T`.
    ///
    /// Returns `Ok(false)` if `T` was already registered. Fails if the
    /// attribute table of `T` is invalid.
    pub fn register<T: Marshal>(&mut self) -> Result<bool, ConfigurationError> {
        if self.signatures.contains_type::<T>() {
            return Ok(false);
        }

        let signature = AttributeSignature::of::<T>()?;
        log::debug!(
            "registered `{}` with {} attribute(s)",
            signature.owner(),
            signature.len(),
        );
        self.signatures.insert(TypeId::of::<T>(), Arc::new(signature));
        Ok(true)
    }

    /// Registers the abstract type `A` with the candidates of
    /// [`Subtypes::subtypes`].
    ///
    /// See [`register_subtypes_with`](Self::register_subtypes_with).
    #[inline]
    pub fn register_subtypes<A: Subtypes>(&mut self) -> Result<(), ConfigurationError> {
        self.register_subtypes_with(A::subtypes())
    }

    /// Registers the abstract type `A` with an explicit candidate list.
    ///
    /// Every candidate is also registered as a concrete type. Fails with
    /// [`ConfigurationError::DuplicateRegistration`] if `A` is already
    /// registered, or if the catalog is rejected.
    pub fn register_subtypes_with<A: Subtypes>(
        &mut self,
        variants: Vec<Variant<A>>,
    ) -> Result<(), ConfigurationError> {
        if self.factories.contains_type::<A>() {
            return Err(ConfigurationError::DuplicateRegistration {
                type_tag: TypeTag::of::<A>(),
            });
        }

        let factory = AdapterFactory::new(self.resolver, variants)?;
        self.add_candidates(&factory);

        log::debug!(
            "registered `{}` with {} subtype(s)",
            factory.catalog().abstract_type(),
            factory.catalog().len(),
        );
        self.factories.insert(TypeId::of::<A>(), Box::new(factory));
        Ok(())
    }

    /// Registers a candidate list for one attribute of `O`.
    ///
    /// When `O` reads or writes that attribute as an `A`, this list is used
    /// instead of the one registered for `A`. `attribute` is a field name of
    /// `O`, which is registered as well.
    pub fn register_attribute_subtypes<O: Marshal, A: Subtypes>(
        &mut self,
        attribute: &'static str,
        variants: Vec<Variant<A>>,
    ) -> Result<(), ConfigurationError> {
        let owner = AttributeSignature::of::<O>()?;
        if owner.attribute(attribute).is_none() {
            return Err(ConfigurationError::UnknownAttribute {
                owner: owner.owner(),
                attribute,
            });
        }

        let key = (TypeId::of::<O>(), attribute, TypeId::of::<A>());
        if self.attribute_factories.contains_key(&key) {
            return Err(ConfigurationError::DuplicateRegistration {
                type_tag: TypeTag::of::<A>(),
            });
        }

        let factory = AdapterFactory::new(self.resolver, variants)?;
        self.add_candidates(&factory);
        self.signatures
            .try_insert(TypeId::of::<O>(), || Arc::new(owner));

        log::debug!(
            "registered `{}` with {} subtype(s) for `{}.{attribute}`",
            factory.catalog().abstract_type(),
            factory.catalog().len(),
            TypeTag::of::<O>().name(),
        );
        self.attribute_factories.insert(key, Box::new(factory));
        Ok(())
    }

    fn add_candidates<A: Subtypes>(&mut self, factory: &AdapterFactory<A>) {
        for signature in factory.catalog().candidates() {
            self.signatures
                .try_insert(signature.owner().id(), || Arc::clone(signature));
        }
    }

    // -------------------------------------------------------------------------
    // Lookup

    /// Returns `true` if a concrete or abstract type is registered under `type_id`.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.signatures.contains(&type_id) || self.factories.contains(&type_id)
    }

    /// Returns the signature of a registered concrete type.
    #[inline]
    pub fn signature(&self, type_id: TypeId) -> Option<&AttributeSignature> {
        self.signatures.get(&type_id).map(|s| &**s)
    }

    /// Returns the adapter of the registered concrete type `T`.
    #[inline]
    pub fn adapter<T: Marshal>(&self) -> Option<TypeAdapter<'_, T>> {
        self.signatures
            .get_type::<T>()
            .map(|signature| TypeAdapter::new(signature, self))
    }

    /// Returns the factory of the registered abstract type `A`.
    #[inline]
    pub fn factory<A: Subtypes>(&self) -> Option<&AdapterFactory<A>> {
        self.factories.get_type::<A>()?.downcast_ref()
    }

    /// The factory for attribute `name` of `owner`, falling back to the one of `A`.
    ///
    /// Only a list registered for that attribute *as an `A`* replaces the
    /// type-level list.
    pub(crate) fn attribute_factory<A: Subtypes>(
        &self,
        owner: TypeId,
        name: &'static str,
    ) -> Option<&AdapterFactory<A>> {
        match self.attribute_factories.get(&(owner, name, TypeId::of::<A>())) {
            Some(factory) => factory.downcast_ref(),
            None => self.factory::<A>(),
        }
    }

    // -------------------------------------------------------------------------
    // Entry points

    /// Decodes a registered concrete type.
    pub fn decode<T: Marshal>(&self, value: &Value) -> Result<T, DecodeError> {
        self.adapter::<T>()
            .ok_or(DecodeError::Unregistered {
                type_tag: TypeTag::of::<T>(),
            })?
            .decode(value)
    }

    /// Encodes a registered concrete type.
    pub fn encode<T: Marshal>(&self, value: &T) -> Result<Value, EncodeError> {
        self.adapter::<T>()
            .ok_or(EncodeError::Unregistered {
                type_tag: TypeTag::of::<T>(),
            })?
            .encode(value)
    }

    /// Decodes a registered abstract type, resolving the subtype from the
    /// keys of the object.
    pub fn decode_polymorphic<A: Subtypes>(&self, value: &Value) -> Result<A, DecodeError> {
        self.factory::<A>()
            .ok_or(DecodeError::Unregistered {
                type_tag: TypeTag::of::<A>(),
            })?
            .decode(value, self)
    }

    /// Encodes a registered abstract type with the attributes of its
    /// runtime subtype.
    pub fn encode_polymorphic<A: Subtypes>(&self, value: &A) -> Result<Value, EncodeError> {
        self.factory::<A>()
            .ok_or(EncodeError::Unregistered {
                type_tag: TypeTag::of::<A>(),
            })?
            .encode(value, self)
    }
}

impl fmt::Debug for MarshalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarshalRegistry")
            .field("config", &self.config)
            .field("signatures", &self.signatures.len())
            .field("factories", &self.factories.len())
            .field("attribute_factories", &self.attribute_factories.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use serde_json::json;

    use super::MarshalRegistry;
    use crate::codec::{Marshal, NodeKind, ObjectReader, ObjectWriter};
    use crate::error::{ConfigurationError, DecodeError, EncodeError};
    use crate::impl_subtypes;
    use crate::info::{AttributeDef, TypeTag};
    use crate::registry::{AdapterFactory, Variant};
    use crate::{MarshalConfig, MatchPolicy};

    #[derive(Debug, PartialEq)]
    struct Circle {
        radius: f64,
    }

    #[derive(Debug, PartialEq)]
    struct Rectangle {
        width: f64,
        height: f64,
    }

    #[derive(Debug, PartialEq)]
    struct Disk {
        radius: f64,
    }

    #[derive(Debug, PartialEq)]
    struct Frame {
        margin: u32,
    }

    #[derive(Debug, PartialEq)]
    struct Drawing {
        title: String,
        shape: Shape,
        frame: Option<Frame>,
        layers: Vec<Shape>,
        tags: Vec<String>,
        note: Option<String>,
        cache: Option<u64>,
    }

    #[derive(Debug, PartialEq)]
    struct Batch {
        items: Vec<u32>,
    }

    #[derive(Debug, PartialEq)]
    struct Named {
        name: String,
    }

    #[derive(Debug, PartialEq)]
    struct Toggle {
        on: bool,
    }

    #[derive(Debug)]
    struct Sloppy;

    impl Marshal for Circle {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("radius")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("radius", &self.radius)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                radius: input.required("radius")?,
            })
        }
    }

    impl Marshal for Rectangle {
        const ATTRIBUTES: &'static [AttributeDef] = &[
            AttributeDef::required("width"),
            AttributeDef::required("height"),
        ];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("width", &self.width)?;
            out.attribute("height", &self.height)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                width: input.required("width")?,
                height: input.required("height")?,
            })
        }
    }

    impl Marshal for Disk {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("radius")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("radius", &self.radius)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                radius: input.required("radius")?,
            })
        }
    }

    impl Marshal for Frame {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("margin")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("margin", &self.margin)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                margin: input.required("margin")?,
            })
        }
    }

    impl Marshal for Drawing {
        const ATTRIBUTES: &'static [AttributeDef] = &[
            AttributeDef::required("title").rename("name"),
            AttributeDef::required("shape"),
            AttributeDef::optional("frame"),
            AttributeDef::defaulted("layers"),
            AttributeDef::defaulted("tags"),
            AttributeDef::optional("note"),
            AttributeDef::optional("cache").ignore(),
        ];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("title", &self.title)?;
            out.polymorphic("shape", &self.shape)?;
            out.nested_optional("frame", self.frame.as_ref())?;
            out.polymorphic_list("layers", &self.layers)?;
            out.attribute("tags", &self.tags)?;
            out.attribute("note", &self.note)?;
            out.attribute("cache", &self.cache)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                title: input.required("title")?,
                shape: input.polymorphic("shape")?,
                frame: input.nested_optional("frame")?,
                layers: input.polymorphic_list("layers")?,
                tags: input.or_default("tags")?,
                note: input.optional("note")?,
                cache: input.optional("cache")?,
            })
        }
    }

    impl Marshal for Sloppy {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::optional("a")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("b", &1)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            if input.contains("a")? {
                input.optional::<u8>("b")?;
            } else {
                input.contains("b")?;
            }
            Ok(Self)
        }
    }

    impl Marshal for Batch {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("items")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("items", &self.items)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                items: input.required("items")?,
            })
        }
    }

    impl Marshal for Named {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::required("name")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("name", &self.name)
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                name: input.required("name")?,
            })
        }
    }

    impl Marshal for Toggle {
        const ATTRIBUTES: &'static [AttributeDef] = &[AttributeDef::optional("value")];

        fn encode(&self, out: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
            out.attribute("value", &self.on.then_some(1))
        }

        fn decode(input: &ObjectReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                on: input.contains("value")?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(Circle),
        Rectangle(Rectangle),
    }

    impl_subtypes!(Shape {
        Circle(Circle),
        Rectangle(Rectangle),
    });

    #[derive(Debug, PartialEq)]
    enum Round {
        Circle(Circle),
        Disk(Disk),
    }

    impl_subtypes!(Round {
        Circle(Circle),
        Disk(Disk),
    });

    #[derive(Debug, PartialEq)]
    enum Job {
        Batch(Batch),
        Named(Named),
    }

    impl_subtypes!(Job {
        Batch(Batch),
        Named(Named),
    });

    fn registry(config: MarshalConfig) -> MarshalRegistry {
        let mut registry = MarshalRegistry::with_config(config);
        registry.register_subtypes::<Shape>().unwrap();
        registry.register::<Frame>().unwrap();
        registry.register::<Drawing>().unwrap();
        registry
    }

    fn drawing() -> Drawing {
        Drawing {
            title: "sketch".into(),
            shape: Shape::Circle(Circle { radius: 1.0 }),
            frame: None,
            layers: vec![Shape::Rectangle(Rectangle {
                width: 2.0,
                height: 3.0,
            })],
            tags: Vec::new(),
            note: None,
            cache: Some(7),
        }
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarshalRegistry>();
        assert_send_sync::<AdapterFactory<Shape>>();
    }

    #[test]
    fn shape_scenario() {
        let registry = registry(MarshalConfig::new());

        let shape: Shape = registry
            .decode_polymorphic(&json!({ "radius": 1.5 }))
            .unwrap();
        assert_eq!(shape, Shape::Circle(Circle { radius: 1.5 }));

        let shape: Shape = registry
            .decode_polymorphic(&json!({ "width": 2.0, "height": 3.0 }))
            .unwrap();
        assert_eq!(
            shape,
            Shape::Rectangle(Rectangle {
                width: 2.0,
                height: 3.0
            })
        );

        let err = registry
            .decode_polymorphic::<Shape>(&json!({ "radius": 1.0, "width": 2.0, "height": 3.0 }))
            .unwrap_err();
        match err {
            DecodeError::AmbiguousSubtype {
                abstract_type,
                candidates,
            } => {
                assert_eq!(abstract_type, TypeTag::of::<Shape>());
                assert_eq!(
                    candidates,
                    [TypeTag::of::<Circle>(), TypeTag::of::<Rectangle>()]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_match_carries_keys() {
        let registry = registry(MarshalConfig::new());

        let err = registry
            .decode_polymorphic::<Shape>(&json!({ "width": 2.0, "color": "red" }))
            .unwrap_err();
        match err {
            DecodeError::NoMatchingSubtype { keys, .. } => assert_eq!(keys, ["color", "width"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = registry.decode_polymorphic::<Shape>(&json!({})).unwrap_err();
        assert!(matches!(err, DecodeError::NoMatchingSubtype { keys, .. } if keys.is_empty()));
    }

    #[test]
    fn null_value_counts_as_present() {
        let registry = registry(MarshalConfig::new());
        let err = registry
            .decode_polymorphic::<Shape>(&json!({ "radius": null }))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidAttribute {
                wire_name: "radius",
                ..
            }
        ));
    }

    #[test]
    fn exact_policy_from_config() {
        let registry = registry(MarshalConfig::new().with_match_policy(MatchPolicy::Exact));
        assert_eq!(registry.resolver().policy(), MatchPolicy::Exact);

        let err = registry
            .decode_polymorphic::<Shape>(&json!({ "radius": 1.0, "color": "red" }))
            .unwrap_err();
        assert!(matches!(err, DecodeError::NoMatchingSubtype { .. }));

        let shape: Shape = registry
            .decode_polymorphic(&json!({ "radius": 1.0 }))
            .unwrap();
        assert_eq!(shape, Shape::Circle(Circle { radius: 1.0 }));
    }

    #[test]
    fn nested_round_trip_omits_nulls() {
        let registry = registry(MarshalConfig::new());

        let tree = registry.encode(&drawing()).unwrap();
        assert_eq!(
            tree,
            json!({
                "name": "sketch",
                "shape": { "radius": 1.0 },
                "layers": [{ "width": 2.0, "height": 3.0 }]
            })
        );

        let decoded: Drawing = registry.decode(&tree).unwrap();
        assert_eq!(
            decoded,
            Drawing {
                cache: None,
                ..drawing()
            }
        );
    }

    #[test]
    fn serialize_nulls_keeps_empty_values() {
        let registry = registry(MarshalConfig::new().with_serialize_nulls(true));

        let tree = registry.encode(&drawing()).unwrap();
        assert_eq!(
            tree,
            json!({
                "name": "sketch",
                "shape": { "radius": 1.0 },
                "frame": null,
                "layers": [{ "width": 2.0, "height": 3.0 }],
                "tags": [],
                "note": null
            })
        );
    }

    #[test]
    fn required_empty_array_is_kept() {
        let mut registry = MarshalRegistry::new();
        registry.register_subtypes::<Job>().unwrap();

        let job = Job::Batch(Batch { items: Vec::new() });
        let tree = registry.encode_polymorphic(&job).unwrap();
        assert_eq!(tree, json!({ "items": [] }));

        let decoded: Job = registry.decode_polymorphic(&tree).unwrap();
        assert_eq!(decoded, job);
    }

    #[test]
    fn contains_reads_presence() {
        let mut registry = MarshalRegistry::new();
        registry.register::<Toggle>().unwrap();

        let decode = |tree: serde_json::Value| registry.decode::<Toggle>(&tree).unwrap();
        assert_eq!(decode(json!({ "value": 1 })), Toggle { on: true });
        assert_eq!(decode(json!({ "value": null })), Toggle { on: false });
        assert_eq!(decode(json!({})), Toggle { on: false });

        let tree = registry.encode(&Toggle { on: false }).unwrap();
        assert_eq!(tree, json!({}));
    }

    #[test]
    fn nested_errors_propagate() {
        let registry = registry(MarshalConfig::new());

        let err = registry
            .decode::<Drawing>(&json!({
                "name": "sketch",
                "shape": { "radius": 1.0, "width": 2.0, "height": 3.0 }
            }))
            .unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousSubtype { .. }));

        let err = registry
            .decode::<Drawing>(&json!({
                "name": "sketch",
                "shape": { "radius": 1.0 },
                "frame": {}
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingAttribute {
                wire_name: "margin",
                ..
            }
        ));

        let err = registry
            .decode::<Drawing>(&json!({ "title": "sketch", "shape": { "radius": 1.0 } }))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingAttribute {
                wire_name: "name",
                ..
            }
        ));

        let err = registry
            .decode::<Drawing>(&json!({ "name": "sketch", "shape": 3 }))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch {
                found: NodeKind::Number,
                ..
            }
        ));

        let err = registry
            .decode::<Drawing>(&json!({
                "name": "sketch",
                "shape": { "radius": 1.0 },
                "layers": { "radius": 1.0 }
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidAttribute {
                wire_name: "layers",
                ..
            }
        ));
    }

    #[test]
    fn attribute_subtypes_take_precedence() {
        let mut registry = registry(MarshalConfig::new());
        registry
            .register_attribute_subtypes::<Drawing, Shape>("shape", vec![Variant::of::<Circle>()])
            .unwrap();

        let tree = json!({
            "name": "sketch",
            "shape": { "radius": 1.0, "width": 2.0, "height": 3.0 }
        });
        let decoded: Drawing = registry.decode(&tree).unwrap();
        assert_eq!(decoded.shape, Shape::Circle(Circle { radius: 1.0 }));

        // Other attributes keep the list of the abstract type.
        let tree = json!({
            "name": "sketch",
            "shape": { "radius": 1.0 },
            "layers": [{ "radius": 1.0, "width": 2.0, "height": 3.0 }]
        });
        let err = registry.decode::<Drawing>(&tree).unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousSubtype { .. }));

        // Values outside the attribute list cannot be written there.
        let drawing = Drawing {
            shape: Shape::Rectangle(Rectangle {
                width: 1.0,
                height: 1.0,
            }),
            ..drawing()
        };
        let err = registry.encode(&drawing).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownSubtype { .. }));
    }

    #[test]
    fn attribute_subtypes_are_validated() {
        let mut registry = registry(MarshalConfig::new());

        let err = registry
            .register_attribute_subtypes::<Drawing, Shape>("outline", vec![Variant::of::<Circle>()])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownAttribute {
                owner: TypeTag::of::<Drawing>(),
                attribute: "outline",
            }
        );

        let err = registry
            .register_attribute_subtypes::<Drawing, Shape>("cache", vec![Variant::of::<Circle>()])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownAttribute { .. }));

        registry
            .register_attribute_subtypes::<Drawing, Shape>("shape", vec![Variant::of::<Circle>()])
            .unwrap();
        let err = registry
            .register_attribute_subtypes::<Drawing, Shape>("shape", vec![Variant::of::<Circle>()])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateRegistration { .. }));
    }

    #[test]
    fn attribute_subtypes_are_keyed_by_abstract_type() {
        let mut registry = registry(MarshalConfig::new());
        registry
            .register_attribute_subtypes::<Drawing, Round>("shape", vec![Variant::of::<Disk>()])
            .unwrap();

        // `Drawing` reads `shape` as a `Shape`, so the `Round` list is not used.
        let tree = json!({
            "name": "sketch",
            "shape": { "radius": 1.0, "width": 2.0, "height": 3.0 }
        });
        let err = registry.decode::<Drawing>(&tree).unwrap_err();
        match err {
            DecodeError::AmbiguousSubtype { abstract_type, .. } => {
                assert_eq!(abstract_type, TypeTag::of::<Shape>());
            }
            other => panic!("unexpected error: {other}"),
        }

        // A `Shape` list for the same attribute is a separate registration.
        registry
            .register_attribute_subtypes::<Drawing, Shape>("shape", vec![Variant::of::<Circle>()])
            .unwrap();
        let decoded: Drawing = registry.decode(&tree).unwrap();
        assert_eq!(decoded.shape, Shape::Circle(Circle { radius: 1.0 }));
    }

    #[test]
    fn registration_rules() {
        let mut registry = MarshalRegistry::new();

        assert!(registry.register::<Frame>().unwrap());
        assert!(!registry.register::<Frame>().unwrap());

        registry.register_subtypes::<Shape>().unwrap();
        assert!(registry.contains(TypeId::of::<Shape>()));
        assert!(registry.contains(TypeId::of::<Rectangle>()));
        assert_eq!(registry.factory::<Shape>().unwrap().catalog().len(), 2);

        let err = registry.register_subtypes::<Shape>().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateRegistration {
                type_tag: TypeTag::of::<Shape>()
            }
        );

        let adapter = registry.adapter::<Circle>().unwrap();
        assert_eq!(adapter.signature().owner(), TypeTag::of::<Circle>());
        assert_eq!(
            adapter.decode(&json!({ "radius": 4.0 })).unwrap(),
            Circle { radius: 4.0 }
        );
    }

    #[test]
    fn rejected_registration_leaves_registry_unchanged() {
        let mut registry = MarshalRegistry::new();

        let err = registry.register_subtypes::<Round>().unwrap_err();
        assert!(matches!(err, ConfigurationError::IdenticalCandidates { .. }));
        assert!(registry.factory::<Round>().is_none());
        assert!(!registry.contains(TypeId::of::<Circle>()));
        assert!(!registry.contains(TypeId::of::<Round>()));

        // A valid list for the same abstract type still registers.
        registry
            .register_subtypes_with::<Round>(vec![Variant::of::<Circle>()])
            .unwrap();
        assert!(registry.contains(TypeId::of::<Circle>()));
    }

    #[test]
    fn unregistered_types_are_reported() {
        let registry = MarshalRegistry::new();

        let err = registry.decode::<Frame>(&json!({ "margin": 1 })).unwrap_err();
        assert!(matches!(err, DecodeError::Unregistered { .. }));

        let err = registry
            .encode_polymorphic(&Shape::Circle(Circle { radius: 1.0 }))
            .unwrap_err();
        assert!(matches!(err, EncodeError::Unregistered { .. }));

        let mut registry = MarshalRegistry::new();
        registry.register::<Drawing>().unwrap();
        let err = registry
            .decode::<Drawing>(&json!({ "name": "sketch", "shape": { "radius": 1.0 } }))
            .unwrap_err();
        match err {
            DecodeError::Unregistered { type_tag } => assert_eq!(type_tag, TypeTag::of::<Shape>()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_is_a_type_mismatch() {
        let registry = registry(MarshalConfig::new());

        let err = registry.decode::<Frame>(&json!([1])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch {
                found: NodeKind::Array,
                ..
            }
        ));
    }

    #[test]
    fn undeclared_attributes_are_rejected() {
        let mut registry = MarshalRegistry::new();
        registry.register::<Sloppy>().unwrap();

        let err = registry.decode::<Sloppy>(&json!({ "a": 1 })).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UndeclaredAttribute { attribute: "b", .. }
        ));

        // `contains` reports a misspelled name instead of answering `false`.
        let err = registry.decode::<Sloppy>(&json!({ "b": 1 })).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UndeclaredAttribute { attribute: "b", .. }
        ));

        let err = registry.encode(&Sloppy).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UndeclaredAttribute { attribute: "b", .. }
        ));
    }
}
