//! # Registry
//!
//! A name-keyed store of [`Dispatcher`]s.
//!
//! Registering an object builds its catalog first, then stores the binding under the given
//! name. A configuration error or a name collision leaves the registry untouched.
//!
//! A process-wide instance is available through [`platform`], together with the
//! [`register`], [`unregister`] and [`is_registered`] shortcuts. It starts empty on first
//! use and [`shutdown`] clears it.
use crate::builder::{self, ConfigurationError};
use crate::dispatcher::Dispatcher;
use crate::object::ManagedObject;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("A managed object is already registered as '{0}'")]
    DuplicateRegistration(String),

    #[error("Cannot build the managed object catalog: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// A name-keyed registry of managed object bindings.
#[derive(Debug, Default)]
pub struct Registry {
    bindings: Mutex<HashMap<String, Arc<Dispatcher>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog of `target` and registers the resulting binding as `name`.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Dispatcher>)` - The registered binding.
    /// * `Err(RegistryError)` - If the name is empty or taken, or the target's declaration
    ///   is invalid.
    pub fn register(
        &self,
        name: &str,
        target: Arc<dyn ManagedObject>,
    ) -> Result<Arc<Dispatcher>, RegistryError> {
        check_name(name)?;

        let catalog = builder::build(target.as_ref())?;
        self.register_binding(name, Dispatcher::new(catalog, target))
    }

    /// Registers an already built binding as `name`.
    pub fn register_binding(
        &self,
        name: &str,
        dispatcher: Dispatcher,
    ) -> Result<Arc<Dispatcher>, RegistryError> {
        check_name(name)?;

        let dispatcher = Arc::new(dispatcher);
        let mut bindings = self.bindings.lock();

        if bindings.contains_key(name) {
            return Err(RegistryError::DuplicateRegistration(name.to_string()));
        }
        bindings.insert(name.to_string(), Arc::clone(&dispatcher));
        drop(bindings);

        tracing::info!(
            name,
            class = dispatcher.describe().class_name(),
            "registered managed object"
        );

        Ok(dispatcher)
    }

    /// Removes the binding registered as `name`, if any.
    ///
    /// Returns the removed binding. Unregistering an unknown name is not an error.
    pub fn unregister(&self, name: &str) -> Result<Option<Arc<Dispatcher>>, RegistryError> {
        check_name(name)?;

        let removed = self.bindings.lock().remove(name);
        if removed.is_some() {
            tracing::info!(name, "unregistered managed object");
        }

        Ok(removed)
    }

    /// Returns whether a binding is registered as `name`. An empty name is invalid input,
    /// as for [`Registry::register`].
    pub fn is_registered(&self, name: &str) -> Result<bool, RegistryError> {
        check_name(name)?;
        Ok(self.bindings.lock().contains_key(name))
    }

    pub fn get(&self, name: &str) -> Option<Arc<Dispatcher>> {
        self.bindings.lock().get(name).cloned()
    }

    /// The registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.bindings.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.lock().is_empty()
    }

    /// Removes every binding.
    pub fn clear(&self) {
        let mut bindings = self.bindings.lock();
        let count = bindings.len();
        bindings.clear();
        drop(bindings);

        tracing::info!(count, "cleared managed object registry");
    }
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::InvalidInput("no name specified"));
    }
    Ok(())
}

static PLATFORM: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry.
pub fn platform() -> &'static Registry {
    &PLATFORM
}

/// Registers `target` as `name` in the process-wide registry.
pub fn register(
    name: &str,
    target: Arc<dyn ManagedObject>,
) -> Result<Arc<Dispatcher>, RegistryError> {
    platform().register(name, target)
}

/// Unregisters `name` from the process-wide registry.
pub fn unregister(name: &str) -> Result<Option<Arc<Dispatcher>>, RegistryError> {
    platform().unregister(name)
}

pub fn is_registered(name: &str) -> Result<bool, RegistryError> {
    platform().is_registered(name)
}

/// Clears the process-wide registry.
pub fn shutdown() {
    platform().clear();
}
