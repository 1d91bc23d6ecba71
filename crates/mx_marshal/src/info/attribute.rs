use core::fmt;

// -----------------------------------------------------------------------------
// Presence

/// Whether an attribute has to appear in a decoded object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presence {
    /// No default value and not nullable.
    Required,
    /// Nullable; absent and `null` both decode to `None`.
    Optional,
    /// Falls back to a default value when absent.
    Defaulted,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.pad("required"),
            Self::Optional => f.pad("optional"),
            Self::Defaulted => f.pad("defaulted"),
        }
    }
}

// -----------------------------------------------------------------------------
// AttributeDef

/// Declaration of one attribute of a concrete type.
///
/// `AttributeDef` tables are written by hand next to the type and are
/// `const`, so a whole table lives in static memory.
///
/// # Examples
///
/// ```
/// use mx_marshal::info::{AttributeDef, Presence};
///
/// const ATTRIBUTES: &[AttributeDef] = &[
///     AttributeDef::required("id").rename("_id"),
///     AttributeDef::optional("note").ignore(),
///     AttributeDef::defaulted("tags"),
/// ];
///
/// assert_eq!(ATTRIBUTES[0].wire_name(), "_id");
/// assert!(ATTRIBUTES[1].is_ignored());
/// assert_eq!(ATTRIBUTES[2].presence(), Presence::Defaulted);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeDef {
    name: &'static str,
    presence: Presence,
    rename: Option<&'static str>,
    ignore: bool,
}

impl AttributeDef {
    #[inline]
    pub const fn new(name: &'static str, presence: Presence) -> Self {
        Self {
            name,
            presence,
            rename: None,
            ignore: false,
        }
    }

    /// A [`Presence::Required`] attribute.
    #[inline]
    pub const fn required(name: &'static str) -> Self {
        Self::new(name, Presence::Required)
    }

    /// A [`Presence::Optional`] attribute.
    #[inline]
    pub const fn optional(name: &'static str) -> Self {
        Self::new(name, Presence::Optional)
    }

    /// A [`Presence::Defaulted`] attribute.
    #[inline]
    pub const fn defaulted(name: &'static str) -> Self {
        Self::new(name, Presence::Defaulted)
    }

    /// Uses `wire_name` instead of the field name in the tree.
    #[inline]
    pub const fn rename(mut self, wire_name: &'static str) -> Self {
        self.rename = Some(wire_name);
        self
    }

    /// Skips the attribute when marshaling.
    ///
    /// Only valid on non-required attributes, a signature containing an
    /// ignored required attribute is rejected.
    #[inline]
    pub const fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Returns the field name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the name used in the tree.
    #[inline]
    pub const fn wire_name(&self) -> &'static str {
        match self.rename {
            Some(wire_name) => wire_name,
            None => self.name,
        }
    }

    #[inline(always)]
    pub const fn presence(&self) -> Presence {
        self.presence
    }

    #[inline]
    pub const fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    #[inline(always)]
    pub const fn is_ignored(&self) -> bool {
        self.ignore
    }
}

// -----------------------------------------------------------------------------
// Attribute

/// An attribute of an [`AttributeSignature`](crate::info::AttributeSignature),
/// after name overrides and ignore filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: &'static str,
    wire_name: &'static str,
    required: bool,
}

impl Attribute {
    #[inline]
    pub(crate) const fn from_def(def: &AttributeDef) -> Self {
        Self {
            name: def.name(),
            wire_name: def.wire_name(),
            required: def.is_required(),
        }
    }

    /// Returns the field name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the name used in the tree.
    #[inline(always)]
    pub const fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    #[inline(always)]
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

// -----------------------------------------------------------------------------
// Tests
