use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypeTag

/// Identifier of a Rust type: its [`TypeId`] and its type path.
///
/// Equality and hashing only look at the [`TypeId`]; the path is kept
/// for diagnostics.
///
/// # Examples
///
/// ```
/// use mx_marshal::info::TypeTag;
///
/// mod shapes {
///     pub struct Circle;
/// }
///
/// let tag = TypeTag::of::<shapes::Circle>();
/// assert!(tag.is::<shapes::Circle>());
/// assert_eq!(tag.name(), "Circle");
/// assert!(tag.path().ends_with("shapes::Circle"));
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    path: &'static str,
}

impl TypeTag {
    /// Creates the tag of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the path without its module prefix.
    ///
    /// Generic arguments are kept as written.
    pub fn name(&self) -> &'static str {
        let path = self.path;
        let end = path.find('<').unwrap_or(path.len());
        match path[..end].rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

// -----------------------------------------------------------------------------
// TypeTags

/// Displays a list of tags as `` `A`, `B` ``.
pub struct TypeTags<'a>(pub &'a [TypeTag]);

impl fmt::Display for TypeTags<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tag) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{tag}`")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
