//! # Catalog Builder
//!
//! Turns a [`ClassDecl`] into an immutable [`ManagedObjectCatalog`].
//!
//! Every method of the declaration is scanned in order:
//!
//! 1. A method marked both as attribute and as operation is rejected.
//! 2. An attribute marker must sit on an accessor-shaped method (see [`crate::naming`]).
//!    The attribute name comes from the accessor name and its type from the setter
//!    parameter or the getter return type.
//! 3. The other half of the accessor pair is looked up by naming convention, marked or
//!    not, so a single marker is enough to expose a read/write attribute.
//! 4. The attribute is readable if the marker allows it and a getter exists, writable if
//!    the marker allows it and a setter exists. An attribute that ends up neither is left
//!    out of the catalog.
//! 5. An operation marker records the method as is.
//!
//! Any violation aborts the whole build.
use crate::declaration::{AttributeMarker, ClassDecl, MethodDecl, OperationMarker};
use crate::descriptor::{AttributeDescriptor, ManagedObjectCatalog, OperationDescriptor};
use crate::naming::{self, Accessor};
use crate::object::ManagedObject;

/// Errors raised while building a catalog. They always describe a declaration mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Method '{method}' of {class} cannot be both a managed attribute and a managed operation")]
    AttributeAndOperation { class: String, method: String },

    #[error("Method '{method}' of {class} is marked as a managed attribute but is not a valid getter or setter")]
    NotAnAccessor { class: String, method: String },

    #[error("Attribute '{attribute}' of {class} is marked more than once (on both its getter and its setter?). Please remove one of the markers")]
    DuplicateAttribute { class: String, attribute: String },

    #[error("Operation '{operation}' of {class} is declared more than once")]
    DuplicateOperation { class: String, operation: String },
}

/// Builds the catalog of a live target from its runtime class declaration.
pub fn build(target: &dyn ManagedObject) -> Result<ManagedObjectCatalog, ConfigurationError> {
    CatalogBuilder::new(target.class()).build()
}

/// Scans one [`ClassDecl`] and collects its attribute and operation descriptors.
pub struct CatalogBuilder<'a> {
    class: &'a ClassDecl,
    attributes: Vec<AttributeDescriptor>,
    operations: Vec<OperationDescriptor>,
    // Attribute names introduced so far, including the ones dropped as neither
    // readable nor writable.
    seen_attributes: Vec<String>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(class: &'a ClassDecl) -> Self {
        Self {
            class,
            attributes: Vec::new(),
            operations: Vec::new(),
            seen_attributes: Vec::new(),
        }
    }

    pub fn build(mut self) -> Result<ManagedObjectCatalog, ConfigurationError> {
        for method in self.class.methods() {
            self.handle_method(method)?;
        }

        tracing::debug!(
            class = self.class.name(),
            attributes = self.attributes.len(),
            operations = self.operations.len(),
            "built managed object catalog"
        );

        Ok(ManagedObjectCatalog::new(
            self.class.name().to_string(),
            self.class.description().to_string(),
            self.attributes,
            self.operations,
        ))
    }

    fn handle_method(&mut self, method: &MethodDecl) -> Result<(), ConfigurationError> {
        match (method.attribute_marker(), method.operation_marker()) {
            (Some(_), Some(_)) => Err(ConfigurationError::AttributeAndOperation {
                class: self.class.name().to_string(),
                method: method.name().to_string(),
            }),
            (Some(marker), None) => self.handle_attribute(method, marker),
            (None, Some(marker)) => self.handle_operation(method, marker),
            (None, None) => Ok(()),
        }
    }

    fn handle_attribute(
        &mut self,
        method: &MethodDecl,
        marker: &AttributeMarker,
    ) -> Result<(), ConfigurationError> {
        let kind =
            naming::accessor_kind(method).ok_or_else(|| ConfigurationError::NotAnAccessor {
                class: self.class.name().to_string(),
                method: method.name().to_string(),
            })?;

        let name = naming::attribute_name(method.name());

        let (ty, getter, setter) = match kind {
            Accessor::Getter => {
                let ty = method.return_type().clone();
                let setter = naming::find_setter(self.class, &name, &ty);
                (ty, Some(method), setter)
            }
            Accessor::Setter => {
                let ty = method.params()[0].clone();
                let getter = naming::find_getter(self.class, &name);
                (ty, getter, Some(method))
            }
        };

        if self.seen_attributes.contains(&name) {
            return Err(ConfigurationError::DuplicateAttribute {
                class: self.class.name().to_string(),
                attribute: name,
            });
        }
        self.seen_attributes.push(name.clone());

        let readable = marker.readable && getter.is_some();
        let writable = marker.writable && setter.is_some();

        if !readable && !writable {
            tracing::debug!(
                class = self.class.name(),
                attribute = name.as_str(),
                "attribute is neither readable nor writable, leaving it out"
            );
            return Ok(());
        }

        let is_getter = getter.is_some_and(|g| g.name().starts_with(naming::IS));

        self.attributes.push(AttributeDescriptor::new(
            name,
            ty,
            readable,
            writable,
            is_getter,
            marker.description.clone(),
        ));

        Ok(())
    }

    fn handle_operation(
        &mut self,
        method: &MethodDecl,
        marker: &OperationMarker,
    ) -> Result<(), ConfigurationError> {
        let duplicate = self
            .operations
            .iter()
            .any(|op| op.name() == method.name() && op.signature() == method.params());

        if duplicate {
            return Err(ConfigurationError::DuplicateOperation {
                class: self.class.name().to_string(),
                operation: method.to_string(),
            });
        }

        self.operations.push(OperationDescriptor::new(
            method.name().to_string(),
            method.return_type().clone(),
            method.params().to_vec(),
            marker.description.clone(),
            marker.impact,
        ));

        Ok(())
    }
}
