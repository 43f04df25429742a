//! # mxkit Core
//!
//! `mxkit-core` exposes selected members of arbitrary Rust objects as *managed objects*:
//! named sets of readable/writable attributes and invokable operations that a management
//! client can inspect and drive by name, without compile-time knowledge of the target type.
//!
//! ## Key Components
//!
//! * **[`ClassDecl`]:** The explicit description of a managed type's public method set,
//!   with the attribute and operation markers that select what gets exposed.
//! * **[`ManagedObject`]:** The capability trait a target implements: it publishes its
//!   [`ClassDecl`] and answers calls to its declared methods.
//! * **[`CatalogBuilder`]:** Scans a declaration once, applies the getter/setter naming
//!   conventions and produces an immutable [`ManagedObjectCatalog`].
//! * **[`Dispatcher`]:** Binds a catalog to its live target and answers attribute reads,
//!   attribute writes and operation invocations by name.
//! * **[`Registry`]:** A name-keyed store of dispatchers, with a process-wide instance
//!   available through [`registry::platform`].
//!
//! ## Example
//!
//! ```rust
//! use mxkit_core::{
//!     Arguments, BoxError, ClassDecl, Impact, ManagedObject, MethodDecl, Registry, TypeTag,
//!     Value,
//! };
//! use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
//!
//! struct Counter {
//!     class: ClassDecl,
//!     value: AtomicI32,
//! }
//!
//! impl ManagedObject for Counter {
//!     fn class(&self) -> &ClassDecl {
//!         &self.class
//!     }
//!
//!     fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
//!         match method.name() {
//!             "getValue" => Ok(self.value.load(Ordering::SeqCst).into()),
//!             "setValue" => {
//!                 self.value.store(args.get(0)?, Ordering::SeqCst);
//!                 Ok(Value::Null)
//!             }
//!             "reset" => {
//!                 self.value.store(0, Ordering::SeqCst);
//!                 Ok(Value::Null)
//!             }
//!             _ => Err(mxkit_core::NotImplemented::new(self, method).into()),
//!         }
//!     }
//! }
//!
//! let class = ClassDecl::builder("Counter")
//!     .method(MethodDecl::getter("getValue", TypeTag::INT).managed_attribute())
//!     .method(MethodDecl::setter("setValue", TypeTag::INT))
//!     .method(MethodDecl::new("reset").managed_operation(Impact::Action))
//!     .build();
//!
//! let registry = Registry::new();
//! let counter = registry
//!     .register("app:type=Counter", Arc::new(Counter { class, value: AtomicI32::new(0) }))
//!     .unwrap();
//!
//! counter.set_attribute("value", Value::Int(7)).unwrap();
//! assert_eq!(counter.get_attribute("value").unwrap(), Value::Int(7));
//! ```
pub mod builder;
pub mod declaration;
pub mod descriptor;
pub mod dispatcher;
pub mod naming;
pub mod object;
pub mod registry;
pub mod value;

pub use builder::{CatalogBuilder, ConfigurationError, build};
pub use declaration::{
    AttributeMarker, ClassDecl, ClassDeclBuilder, Impact, MethodDecl, OperationMarker,
};
pub use descriptor::{AttributeDescriptor, ManagedObjectCatalog, OperationDescriptor};
pub use dispatcher::{DispatchError, Dispatcher};
pub use object::{ArgumentError, Arguments, ManagedObject, NotImplemented};
pub use registry::{Registry, RegistryError};
pub use value::{Primitive, TypeTag, Value, ValueError};

/// Type alias for the boxed error a managed object returns from a failing call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
