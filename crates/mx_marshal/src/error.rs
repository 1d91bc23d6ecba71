//! Errors raised while registering, decoding and encoding.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::codec::NodeKind;
use crate::info::{TypeTag, TypeTags};

// -----------------------------------------------------------------------------
// ConfigurationError

/// A registration was rejected.
///
/// Returned before any decode is attempted, the rejected entry is never
/// stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("abstract type `{abstract_type}` declares no subtypes")]
    EmptyCandidates { abstract_type: TypeTag },

    #[error("subtype `{candidate}` of `{abstract_type}` has no usable signature: {reason}")]
    Unintrospectable {
        abstract_type: TypeTag,
        candidate: TypeTag,
        reason: Box<ConfigurationError>,
    },

    #[error(
        "subtypes `{first}` and `{second}` of `{abstract_type}` declare the same attributes and can never be told apart"
    )]
    IdenticalCandidates {
        abstract_type: TypeTag,
        first: TypeTag,
        second: TypeTag,
    },

    #[error("subtype `{candidate}` is declared more than once for `{abstract_type}`")]
    DuplicateCandidate {
        abstract_type: TypeTag,
        candidate: TypeTag,
    },

    #[error("`{type_tag}` is already registered")]
    DuplicateRegistration { type_tag: TypeTag },

    #[error("attribute `{attribute}` of `{owner}` is required and cannot be ignored")]
    IgnoredRequired {
        owner: TypeTag,
        attribute: &'static str,
    },

    #[error("wire name `{wire_name}` is used by more than one attribute of `{owner}`")]
    DuplicateWireName {
        owner: TypeTag,
        wire_name: &'static str,
    },

    #[error("attribute `{attribute}` is declared more than once on `{owner}`")]
    DuplicateAttribute {
        owner: TypeTag,
        attribute: &'static str,
    },

    #[error("`{owner}` has no attribute `{attribute}`")]
    UnknownAttribute {
        owner: TypeTag,
        attribute: &'static str,
    },

    #[error("a global marshal registry is already installed")]
    AlreadyInstalled,
}

// -----------------------------------------------------------------------------
// DecodeError

/// A tree could not be turned into a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("expected an object for `{expected}`, found {found}")]
    TypeMismatch { expected: TypeTag, found: NodeKind },

    #[error("no subtype of `{abstract_type}` matches the keys {keys:?}")]
    NoMatchingSubtype {
        abstract_type: TypeTag,
        keys: Vec<String>,
    },

    #[error("ambiguous subtype of `{abstract_type}`: {} all match", TypeTags(.candidates))]
    AmbiguousSubtype {
        abstract_type: TypeTag,
        candidates: Vec<TypeTag>,
    },

    #[error("missing required attribute `{wire_name}` of `{owner}`")]
    MissingAttribute {
        owner: TypeTag,
        wire_name: &'static str,
    },

    #[error("invalid value for attribute `{wire_name}` of `{owner}`: {source}")]
    InvalidAttribute {
        owner: TypeTag,
        wire_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{owner}` does not declare the attribute `{attribute}`")]
    UndeclaredAttribute {
        owner: TypeTag,
        attribute: &'static str,
    },

    #[error("`{type_tag}` is not registered")]
    Unregistered { type_tag: TypeTag },
}

// -----------------------------------------------------------------------------
// EncodeError

/// A value could not be turned into a tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("cannot encode attribute `{wire_name}` of `{owner}`: {source}")]
    InvalidAttribute {
        owner: TypeTag,
        wire_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{owner}` does not declare the attribute `{attribute}`")]
    UndeclaredAttribute {
        owner: TypeTag,
        attribute: &'static str,
    },

    #[error("value is not a declared subtype of `{abstract_type}`")]
    UnknownSubtype { abstract_type: TypeTag },

    #[error("`{type_tag}` is not registered")]
    Unregistered { type_tag: TypeTag },
}

// -----------------------------------------------------------------------------
// Tests
