use std::sync::OnceLock;

use crate::error::ConfigurationError;
use crate::registry::MarshalRegistry;

static GLOBAL: OnceLock<MarshalRegistry> = OnceLock::new();

/// Installs `registry` as the process-wide registry.
///
/// Registration happens before installation; the installed registry is
/// never mutated again. Fails with [`ConfigurationError::AlreadyInstalled`]
/// on every call after the first successful one.
///
/// # Examples
///
/// ```
/// use mx_marshal::registry::{self, MarshalRegistry};
///
/// let registry = registry::install(MarshalRegistry::new()).unwrap();
/// assert!(core::ptr::eq(registry, registry::global().unwrap()));
/// assert!(registry::install(MarshalRegistry::new()).is_err());
/// ```
pub fn install(registry: MarshalRegistry) -> Result<&'static MarshalRegistry, ConfigurationError> {
    let mut fresh = Some(registry);
    let installed = GLOBAL.get_or_init(|| {
        log::debug!("installed the global marshal registry");
        fresh.take().unwrap_or_default()
    });

    match fresh {
        None => Ok(installed),
        Some(_) => Err(ConfigurationError::AlreadyInstalled),
    }
}

/// Returns the process-wide registry, if one was installed.
#[inline]
pub fn global() -> Option<&'static MarshalRegistry> {
    GLOBAL.get()
}

// -----------------------------------------------------------------------------
// Tests
