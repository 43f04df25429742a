//! # Class Declarations
//!
//! A [`ClassDecl`] is the explicit description of a managed type: its name, an optional
//! type-level description and the public methods it offers, each optionally tagged with
//! one of the two markers that select what gets exposed:
//!
//! * [`AttributeMarker`] on a getter (`getX()` / `isX()`) or a setter (`setX(T)`).
//! * [`OperationMarker`] on any other method.
//!
//! Unmarked methods are still part of the declaration. The catalog builder uses them to
//! find the missing half of an attribute, and the dispatcher resolves every call through
//! them.
//!
//! Declarations are `serde` compatible, so they can also be authored as JSON:
//!
//! ```json
//! {
//!   "name": "Counter",
//!   "description": "A simple counter",
//!   "methods": [
//!     { "name": "getCount", "returns": "int", "attribute": {} },
//!     { "name": "setCount", "params": ["int"] },
//!     { "name": "reset", "operation": { "impact": "action" } }
//!   ]
//! }
//! ```
use crate::value::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares whether invoking an operation is expected to change the target's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    /// Modifies state.
    Action,
    /// Read-only, returns information.
    Info,
    /// Both modifies state and returns information.
    ActionInfo,
    #[default]
    Unknown,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Impact::Action => "action",
            Impact::Info => "info",
            Impact::ActionInfo => "action-info",
            Impact::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

fn default_true() -> bool {
    true
}

/// Marks a getter or setter as the declaration point of a managed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMarker {
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default = "default_true")]
    pub writable: bool,
    #[serde(default)]
    pub description: String,
}

impl Default for AttributeMarker {
    fn default() -> Self {
        Self {
            readable: true,
            writable: true,
            description: String::new(),
        }
    }
}

impl AttributeMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Marks a method as a managed operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMarker {
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub description: String,
}

impl OperationMarker {
    pub fn new(impact: Impact) -> Self {
        Self {
            impact,
            description: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn is_void(tag: &TypeTag) -> bool {
    tag.is_void()
}

fn void() -> TypeTag {
    TypeTag::Void
}

/// One public method of a managed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<TypeTag>,
    #[serde(default = "void", skip_serializing_if = "is_void")]
    returns: TypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<AttributeMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operation: Option<OperationMarker>,
}

impl MethodDecl {
    /// Creates an unmarked method without parameters returning `void`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: TypeTag::Void,
            attribute: None,
            operation: None,
        }
    }

    /// Shorthand for a method with no parameters returning `ty`.
    pub fn getter(name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(name).returns(ty)
    }

    /// Shorthand for a method taking a single `ty` parameter and returning `void`.
    pub fn setter(name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(name).param(ty)
    }

    /// Appends a parameter to the signature.
    pub fn param(mut self, ty: TypeTag) -> Self {
        self.params.push(ty);
        self
    }

    pub fn returns(mut self, ty: TypeTag) -> Self {
        self.returns = ty;
        self
    }

    pub fn attribute(mut self, marker: AttributeMarker) -> Self {
        self.attribute = Some(marker);
        self
    }

    /// Marks the method as a managed attribute with the default marker (readable, writable).
    pub fn managed_attribute(self) -> Self {
        self.attribute(AttributeMarker::default())
    }

    pub fn operation(mut self, marker: OperationMarker) -> Self {
        self.operation = Some(marker);
        self
    }

    /// Marks the method as a managed operation with the given impact.
    pub fn managed_operation(self, impact: Impact) -> Self {
        self.operation(OperationMarker::new(impact))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    pub fn return_type(&self) -> &TypeTag {
        &self.returns
    }

    pub fn attribute_marker(&self) -> Option<&AttributeMarker> {
        self.attribute.as_ref()
    }

    pub fn operation_marker(&self) -> Option<&OperationMarker> {
        self.operation.as_ref()
    }

    /// Whether this method has exactly the given name and parameter list.
    pub fn matches(&self, name: &str, params: &[TypeTag]) -> bool {
        self.name == name && self.params == params
    }

    fn same_signature(&self, other: &MethodDecl) -> bool {
        self.matches(&other.name, &other.params)
    }
}

impl fmt::Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, signature(&self.params))
    }
}

/// Renders a parameter list as `int, String`.
pub(crate) fn signature(params: &[TypeTag]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The public shape of a managed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default)]
    methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn builder(name: impl Into<String>) -> ClassDeclBuilder {
        ClassDeclBuilder {
            name: name.into(),
            description: String::new(),
            methods: Vec::new(),
            inherited: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type-level description, empty when the type carries none.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every public method, own methods first, then the inherited ones.
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// Looks up a method by its exact name and parameter list.
    pub fn find_method(&self, name: &str, params: &[TypeTag]) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.matches(name, params))
    }
}

/// Builder for [`ClassDecl`].
#[derive(Debug, Clone)]
pub struct ClassDeclBuilder {
    name: String,
    description: String,
    methods: Vec<MethodDecl>,
    inherited: Vec<MethodDecl>,
}

impl ClassDeclBuilder {
    /// Sets the type-level description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodDecl>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Inherits the public methods of `parent`.
    ///
    /// A parent method is overridden, and dropped, when this type declares a method with
    /// the same name and parameter list. Parents added later are searched after earlier
    /// ones.
    pub fn inherit(mut self, parent: &ClassDecl) -> Self {
        self.inherited.extend(parent.methods.iter().cloned());
        self
    }

    pub fn build(self) -> ClassDecl {
        let mut methods = self.methods;

        for method in self.inherited {
            if !methods.iter().any(|m| m.same_signature(&method)) {
                methods.push(method);
            }
        }

        ClassDecl {
            name: self.name,
            description: self.description,
            methods,
        }
    }
}
