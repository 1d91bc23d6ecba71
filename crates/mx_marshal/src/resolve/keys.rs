use alloc::string::{String, ToString};
use alloc::vec::Vec;

use mx_utils::hash::HashSet;
use serde_json::{Map, Value};

// -----------------------------------------------------------------------------
// PresentKeys

/// The keys of one incoming object, borrowed from it.
///
/// A key counts as present even when its value is `null`.
///
/// # Examples
///
/// ```
/// use mx_marshal::resolve::PresentKeys;
/// use serde_json::json;
///
/// let value = json!({ "width": 3, "height": null });
/// let keys = PresentKeys::of(value.as_object().unwrap());
///
/// assert!(keys.contains("height"));
/// assert!(!keys.contains("radius"));
/// assert_eq!(keys.sorted(), ["height", "width"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PresentKeys<'a> {
    keys: HashSet<&'a str>,
}

impl<'a> PresentKeys<'a> {
    /// Collects the keys of an object node.
    pub fn of(object: &'a Map<String, Value>) -> Self {
        object.keys().map(String::as_str).collect()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over the keys in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.keys.iter().copied()
    }

    /// Returns owned keys in lexical order, for diagnostics.
    pub fn sorted(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        keys.sort_unstable();
        keys
    }
}

impl<'a> FromIterator<&'a str> for PresentKeys<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
