//! # Dispatcher
//!
//! A [`Dispatcher`] binds a [`ManagedObjectCatalog`] to the live [`ManagedObject`] it was
//! built from and answers management requests against it:
//!
//! * **Reads** go through the attribute's getter (`get<Name>` or `is<Name>`).
//! * **Writes** are type-checked against the declared attribute type, then go through
//!   `set<Name>`.
//! * **Invocations** select the first catalog operation whose name matches and whose
//!   declared signature accepts the caller's signature.
//!
//! The catalog decides *what* may be accessed. The method that actually runs is resolved
//! on every request against [`ManagedObject::class`], the target's current runtime
//! declaration.
//!
//! The dispatcher holds no mutable state and takes no locks: each request is one method
//! resolution followed by one call, and concurrent requests reach the target
//! concurrently.
use crate::BoxError;
use crate::declaration::{MethodDecl, signature as render_signature};
use crate::descriptor::{AttributeDescriptor, ManagedObjectCatalog};
use crate::naming;
use crate::object::{Arguments, ManagedObject};
use crate::value::{TypeTag, Value};
use std::fmt;
use std::sync::Arc;

/// Errors returned by the dispatcher's request methods.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid input for {class}: {reason}")]
    InvalidInput { class: String, reason: String },

    #[error("Cannot find attribute '{attribute}' in {class}: {reason}")]
    UnknownAttribute {
        class: String,
        attribute: String,
        reason: &'static str,
    },

    #[error("Cannot find operation '{operation}' with the specified signature in {class}")]
    UnknownOperation { class: String, operation: String },

    #[error("Type mismatch for '{member}' of {class}: {expected} expected, got {actual}")]
    TypeMismatch {
        class: String,
        member: String,
        expected: TypeTag,
        actual: String,
    },

    #[error("Call to '{method}' on {class} failed: {source}")]
    Failure {
        class: String,
        method: String,
        #[source]
        source: BoxError,
    },
}

/// A catalog bound to its live target.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<ManagedObjectCatalog>,
    target: Arc<dyn ManagedObject>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("class", &self.catalog.class_name())
            .field("attributes", &self.catalog.attributes().len())
            .field("operations", &self.catalog.operations().len())
            .finish()
    }
}

impl Dispatcher {
    /// Binds an already built catalog to `target`.
    pub fn new(catalog: ManagedObjectCatalog, target: Arc<dyn ManagedObject>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            target,
        }
    }

    /// Builds the catalog of `target` and binds it.
    pub fn from_object(
        target: Arc<dyn ManagedObject>,
    ) -> Result<Self, crate::builder::ConfigurationError> {
        let catalog = crate::builder::build(target.as_ref())?;
        Ok(Self::new(catalog, target))
    }

    /// The catalog this dispatcher serves.
    pub fn describe(&self) -> &ManagedObjectCatalog {
        &self.catalog
    }

    /// The bound target.
    pub fn target(&self) -> &Arc<dyn ManagedObject> {
        &self.target
    }

    /// Reads an attribute through its getter.
    pub fn get_attribute(&self, name: &str) -> Result<Value, DispatchError> {
        tracing::trace!(class = self.class_name(), attribute = name, "get attribute");

        if name.is_empty() {
            return Err(self.invalid_input("attribute name cannot be empty"));
        }

        let attribute = self
            .catalog
            .attribute(name)
            .ok_or_else(|| self.unknown_attribute(name, "no such attribute"))?;

        if !attribute.is_readable() {
            return Err(self.unknown_attribute(name, "attribute is not readable"));
        }

        let getter = self
            .resolve_getter(attribute)
            .ok_or_else(|| self.unknown_attribute(name, "no equivalent getter"))?;

        self.call(getter, Arguments::default())
    }

    /// Reads several attributes. Each entry carries its own outcome; a failing name does
    /// not prevent the others from being read.
    pub fn get_attributes<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Vec<(String, Result<Value, DispatchError>)> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), self.get_attribute(name))
            })
            .collect()
    }

    /// Writes an attribute through its setter.
    ///
    /// The value is checked against the declared type before the setter is resolved, so a
    /// mismatching value never reaches the target.
    pub fn set_attribute(&self, name: &str, value: Value) -> Result<(), DispatchError> {
        tracing::trace!(class = self.class_name(), attribute = name, "set attribute");

        if name.is_empty() {
            return Err(self.invalid_input("attribute name cannot be empty"));
        }
        if value.is_null() {
            return Err(self.invalid_input(format!("cannot set attribute '{name}' to null")));
        }

        let attribute = self
            .catalog
            .attribute(name)
            .ok_or_else(|| self.unknown_attribute(name, "no such attribute"))?;

        if !attribute.is_writable() {
            return Err(self.unknown_attribute(name, "attribute is not writable"));
        }

        self.check_assignable(name, attribute.ty(), &value)?;

        let setter = naming::find_setter(self.target.class(), name, attribute.ty())
            .ok_or_else(|| self.unknown_attribute(name, "no equivalent setter"))?;

        self.call(setter, Arguments::new(vec![value]))?;
        Ok(())
    }

    /// Writes several attributes in order and reports, for each, the value read back after
    /// the write.
    ///
    /// The first failing entry, on write or on read back, aborts the rest of the batch.
    /// Entries before it have already been applied.
    pub fn set_attributes(
        &self,
        entries: Vec<(String, Value)>,
    ) -> Result<Vec<(String, Value)>, DispatchError> {
        let mut results = Vec::with_capacity(entries.len());

        for (name, value) in entries {
            self.set_attribute(&name, value)?;
            let observed = self.get_attribute(&name)?;
            results.push((name, observed));
        }

        Ok(results)
    }

    /// Invokes an operation.
    ///
    /// `signature` lists the caller's parameter types and selects the overload: the first
    /// operation, in catalog order, whose declared parameter types accept it wins.
    pub fn invoke(
        &self,
        operation: &str,
        args: Vec<Value>,
        signature: &[TypeTag],
    ) -> Result<Value, DispatchError> {
        tracing::trace!(class = self.class_name(), operation, "invoke");

        if operation.is_empty() {
            return Err(self.invalid_input("operation name cannot be empty"));
        }

        let descriptor = self
            .catalog
            .operation(operation, signature)
            .ok_or_else(|| DispatchError::UnknownOperation {
                class: self.class_name().to_string(),
                operation: format!("{operation}({})", render_signature(signature)),
            })?;

        if args.len() != descriptor.signature().len() {
            return Err(self.invalid_input(format!(
                "operation '{}' expects {} argument(s), got {}",
                descriptor.display_signature(),
                descriptor.signature().len(),
                args.len()
            )));
        }

        for (index, (declared, value)) in descriptor.signature().iter().zip(&args).enumerate() {
            let member = format!("{} argument {index}", descriptor.display_signature());
            if value.is_null() {
                if declared.is_primitive() {
                    return Err(DispatchError::TypeMismatch {
                        class: self.class_name().to_string(),
                        member,
                        expected: declared.clone(),
                        actual: value.type_name(),
                    });
                }
                continue;
            }
            self.check_assignable(&member, declared, value)?;
        }

        let method = self
            .target
            .class()
            .find_method(descriptor.name(), descriptor.signature())
            .ok_or_else(|| DispatchError::UnknownOperation {
                class: self.class_name().to_string(),
                operation: descriptor.display_signature(),
            })?;

        self.call(method, Arguments::new(args))
    }

    fn resolve_getter(&self, attribute: &AttributeDescriptor) -> Option<&MethodDecl> {
        let prefix = if attribute.is_is() {
            naming::IS
        } else {
            naming::GET
        };
        naming::find_getter_with_prefix(self.target.class(), attribute.name(), prefix)
    }

    fn check_assignable(
        &self,
        member: &str,
        declared: &TypeTag,
        value: &Value,
    ) -> Result<(), DispatchError> {
        let assignable = value
            .type_tag()
            .is_some_and(|actual| declared.is_assignable_from(&actual));

        if assignable {
            Ok(())
        } else {
            Err(DispatchError::TypeMismatch {
                class: self.class_name().to_string(),
                member: member.to_string(),
                expected: declared.clone(),
                actual: value.type_name(),
            })
        }
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, DispatchError> {
        self.target.call(method, args).map_err(|source| {
            tracing::debug!(
                class = self.class_name(),
                method = %method,
                error = %source,
                "managed object call failed"
            );
            DispatchError::Failure {
                class: self.class_name().to_string(),
                method: method.to_string(),
                source,
            }
        })
    }

    fn class_name(&self) -> &str {
        self.catalog.class_name()
    }

    fn invalid_input(&self, reason: impl Into<String>) -> DispatchError {
        DispatchError::InvalidInput {
            class: self.class_name().to_string(),
            reason: reason.into(),
        }
    }

    fn unknown_attribute(&self, attribute: &str, reason: &'static str) -> DispatchError {
        DispatchError::UnknownAttribute {
            class: self.class_name().to_string(),
            attribute: attribute.to_string(),
            reason,
        }
    }
}
