//! # Managed Objects
//!
//! [`ManagedObject`] is the capability a type implements to be exposed: it publishes the
//! [`ClassDecl`] of its public method set and executes calls to those methods.
//!
//! Targets are shared between the registry and any number of concurrent callers, so every
//! method receives `&self`. A target that mutates state from its setters or operations
//! owns the synchronization of that state (atomics, a mutex around its fields, ...).
use crate::BoxError;
use crate::declaration::{ClassDecl, MethodDecl};
use crate::value::{Value, ValueError};

pub trait ManagedObject: Send + Sync {
    /// The declaration of this object's runtime type.
    ///
    /// It is read once when the catalog is built, and again on every dispatched request to
    /// resolve the method being called.
    fn class(&self) -> &ClassDecl;

    /// Executes `method`, one of the methods listed in [`ManagedObject::class`].
    ///
    /// Arguments have already been checked against the method's parameter types. Any error
    /// returned here reaches the caller wrapped as a dispatch failure.
    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError>;
}

/// Error returned by [`Arguments::get`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("Missing argument at position {0}")]
    Missing(usize),
    #[error("Invalid argument at position {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ValueError,
    },
}

/// The positional arguments of a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the argument at `index` into `T`.
    pub fn get<T>(&self, index: usize) -> Result<T, ArgumentError>
    where
        T: TryFrom<Value, Error = ValueError>,
    {
        let value = self
            .0
            .get(index)
            .cloned()
            .ok_or(ArgumentError::Missing(index))?;

        T::try_from(value).map_err(|source| ArgumentError::Invalid { index, source })
    }

    /// Borrows the raw argument at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// Returned by a [`ManagedObject::call`] implementation that does not handle a method it
/// declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Method '{method}' is declared by {class} but not implemented")]
pub struct NotImplemented {
    pub class: String,
    pub method: String,
}

impl NotImplemented {
    pub fn new<O: ManagedObject + ?Sized>(object: &O, method: &MethodDecl) -> Self {
        Self {
            class: object.class().name().to_string(),
            method: method.to_string(),
        }
    }
}
