//! # Descriptors
//!
//! Immutable metadata produced by the [`crate::CatalogBuilder`]: one [`AttributeDescriptor`]
//! per exposed attribute, one [`OperationDescriptor`] per exposed operation, bundled in a
//! [`ManagedObjectCatalog`].
//!
//! Descriptors carry no reference to the object they were built from. The dispatcher pairs
//! a catalog with its target and resolves methods on every request.
use crate::declaration::{Impact, signature};
use crate::value::TypeTag;
use serde::{Deserialize, Serialize};

/// A named, typed property exposed for reading and/or writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    name: String,
    #[serde(rename = "type")]
    ty: TypeTag,
    readable: bool,
    writable: bool,
    /// The getter uses the `is` prefix.
    is_getter: bool,
    description: String,
}

impl AttributeDescriptor {
    pub(crate) fn new(
        name: String,
        ty: TypeTag,
        readable: bool,
        writable: bool,
        is_getter: bool,
        description: String,
    ) -> Self {
        Self {
            name,
            ty,
            readable,
            writable,
            is_getter,
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type (setter parameter, or getter return type).
    pub fn ty(&self) -> &TypeTag {
        &self.ty
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Returns `true` if the getter is named `is<Name>` rather than `get<Name>`.
    pub fn is_is(&self) -> bool {
        self.is_getter
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A named invocable action with a fixed parameter signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    name: String,
    return_type: TypeTag,
    signature: Vec<TypeTag>,
    description: String,
    impact: Impact,
}

impl OperationDescriptor {
    pub(crate) fn new(
        name: String,
        return_type: TypeTag,
        signature: Vec<TypeTag>,
        description: String,
        impact: Impact,
    ) -> Self {
        Self {
            name,
            return_type,
            signature,
            description,
            impact,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &TypeTag {
        &self.return_type
    }

    /// The ordered parameter types.
    pub fn signature(&self) -> &[TypeTag] {
        &self.signature
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn impact(&self) -> Impact {
        self.impact
    }

    /// Whether a caller-supplied signature can invoke this operation.
    ///
    /// Lengths must be equal and each declared parameter type must be assignable from the
    /// supplied type at the same position.
    pub fn accepts(&self, supplied: &[TypeTag]) -> bool {
        self.signature.len() == supplied.len()
            && self
                .signature
                .iter()
                .zip(supplied)
                .all(|(declared, supplied)| declared.is_assignable_from(supplied))
    }

    /// `name(int, String)`.
    pub fn display_signature(&self) -> String {
        format!("{}({})", self.name, signature(&self.signature))
    }
}

/// The immutable set of descriptors built for one managed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedObjectCatalog {
    class_name: String,
    description: String,
    attributes: Vec<AttributeDescriptor>,
    operations: Vec<OperationDescriptor>,
}

impl ManagedObjectCatalog {
    pub(crate) fn new(
        class_name: String,
        description: String,
        attributes: Vec<AttributeDescriptor>,
        operations: Vec<OperationDescriptor>,
    ) -> Self {
        Self {
            class_name,
            description,
            attributes,
            operations,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attributes in discovery order.
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Operations in discovery order.
    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns the first operation, in catalog order, named `name` that accepts `signature`.
    ///
    /// No further overload disambiguation is attempted.
    pub fn operation(&self, name: &str, signature: &[TypeTag]) -> Option<&OperationDescriptor> {
        self.operations
            .iter()
            .find(|op| op.name == name && op.accepts(signature))
    }
}
