// Managed objects shared by the integration tests.
#![allow(dead_code)]

use mxkit_core::{
    Arguments, AttributeMarker, BoxError, ClassDecl, Impact, ManagedObject, MethodDecl,
    NotImplemented, OperationMarker, TypeTag, Value,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

/// `getCounter` is marked, `setCounter` is not; two action operations.
pub struct AnnotatedCounter {
    counter: AtomicI32,
}

static ANNOTATED_COUNTER: Lazy<ClassDecl> = Lazy::new(|| {
    ClassDecl::builder("AnnotatedCounter")
        .description("Annotated")
        .method(MethodDecl::new("resetCounter").managed_operation(Impact::Action))
        .method(
            MethodDecl::new("addCounter")
                .param(TypeTag::INT)
                .returns(TypeTag::BOOLEAN)
                .managed_operation(Impact::Action),
        )
        .method(MethodDecl::getter("getCounter", TypeTag::INT).managed_attribute())
        .method(MethodDecl::setter("setCounter", TypeTag::INT))
        .build()
});

impl AnnotatedCounter {
    pub fn new() -> Self {
        Self {
            counter: AtomicI32::new(0),
        }
    }

    pub fn value(&self) -> i32 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl ManagedObject for AnnotatedCounter {
    fn class(&self) -> &ClassDecl {
        &ANNOTATED_COUNTER
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
        match method.name() {
            "resetCounter" => {
                self.counter.store(0, Ordering::SeqCst);
                Ok(Value::Null)
            }
            "addCounter" => {
                self.counter.fetch_add(args.get(0)?, Ordering::SeqCst);
                Ok(Value::Boolean(true))
            }
            "getCounter" => Ok(self.value().into()),
            "setCounter" => {
                self.counter.store(args.get(0)?, Ordering::SeqCst);
                Ok(Value::Null)
            }
            _ => Err(NotImplemented::new(self, method).into()),
        }
    }
}

/// An enum attribute whose initial value is null.
pub struct EnumAnnotatedCounter {
    state: Mutex<Option<String>>,
}

pub const STATE: &str = "State";

static ENUM_ANNOTATED_COUNTER: Lazy<ClassDecl> = Lazy::new(|| {
    ClassDecl::builder("EnumAnnotatedCounter")
        .method(MethodDecl::getter("getState", TypeTag::enumeration(STATE)).managed_attribute())
        .method(MethodDecl::setter("setState", TypeTag::enumeration(STATE)))
        .build()
});

impl EnumAnnotatedCounter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }
}

impl ManagedObject for EnumAnnotatedCounter {
    fn class(&self) -> &ClassDecl {
        &ENUM_ANNOTATED_COUNTER
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
        match method.name() {
            "getState" => Ok(self
                .state
                .lock()
                .clone()
                .map(|variant| Value::enumeration(STATE, variant))
                .unwrap_or(Value::Null)),
            "setState" => match args.value(0) {
                Some(Value::Enum { variant, .. }) => {
                    *self.state.lock() = Some(variant.clone());
                    Ok(Value::Null)
                }
                _ => Err("expected a State value".into()),
            },
            _ => Err(NotImplemented::new(self, method).into()),
        }
    }
}

/// A target described by an arbitrary declaration, answering every call with `null`.
pub struct Declared {
    class: ClassDecl,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, Vec<Value>)>>,
}

impl Declared {
    pub fn new(class: ClassDecl) -> Self {
        Self {
            class,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The last method called, as `name(params)`, with its arguments.
    pub fn last_call(&self) -> Option<(String, Vec<Value>)> {
        self.last_call.lock().clone()
    }
}

impl ManagedObject for Declared {
    fn class(&self) -> &ClassDecl {
        &self.class
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock() = Some((method.to_string(), args.into_inner()));
        Ok(Value::Null)
    }
}

/// A method carrying both markers.
pub fn wrong_annotated_counter() -> Declared {
    Declared::new(
        ClassDecl::builder("WrongAnnotatedCounter")
            .method(
                MethodDecl::getter("getCounter", TypeTag::INT)
                    .managed_attribute()
                    .managed_operation(Impact::Unknown),
            )
            .build(),
    )
}

/// A lone getter marked as not readable.
pub fn annotated_counter_no_attributes() -> Declared {
    Declared::new(
        ClassDecl::builder("AnnotatedCounterNoAttributes")
            .method(
                MethodDecl::getter("getCounter", TypeTag::INT)
                    .attribute(AttributeMarker::new().readable(false)),
            )
            .build(),
    )
}

/// Getter and setter both marked for the same attribute.
pub fn doubly_annotated_counter() -> Declared {
    Declared::new(
        ClassDecl::builder("DoublyAnnotatedCounter")
            .method(MethodDecl::getter("getCounter", TypeTag::INT).managed_attribute())
            .method(MethodDecl::setter("setCounter", TypeTag::INT).managed_attribute())
            .build(),
    )
}

/// Identity accessors for every kind of value, plus a setter that clamps.
pub struct Settings {
    name: Mutex<String>,
    ratio: Mutex<f64>,
    enabled: Mutex<bool>,
    tags: Mutex<Vec<Value>>,
    level: AtomicI32,
    setter_calls: AtomicUsize,
}

pub const MAX_LEVEL: i32 = 10;

static SETTINGS: Lazy<ClassDecl> = Lazy::new(|| {
    ClassDecl::builder("Settings")
        .method(MethodDecl::getter("getName", TypeTag::String).managed_attribute())
        .method(MethodDecl::setter("setName", TypeTag::String))
        .method(MethodDecl::getter("getRatio", TypeTag::DOUBLE))
        .method(
            MethodDecl::setter("setRatio", TypeTag::DOUBLE)
                .attribute(AttributeMarker::new().description("scaling ratio")),
        )
        .method(MethodDecl::getter("isEnabled", TypeTag::BOOLEAN).managed_attribute())
        .method(MethodDecl::setter("setEnabled", TypeTag::BOOLEAN))
        .method(MethodDecl::getter("getTags", TypeTag::List).managed_attribute())
        .method(MethodDecl::setter("setTags", TypeTag::List))
        .method(MethodDecl::getter("getLevel", TypeTag::INT).managed_attribute())
        .method(MethodDecl::setter("setLevel", TypeTag::INT))
        .method(
            MethodDecl::getter("getVersion", TypeTag::String)
                .attribute(AttributeMarker::new().description("build version")),
        )
        .method(MethodDecl::setter("setSecret", TypeTag::String).managed_attribute())
        .build()
});

impl Settings {
    pub fn new() -> Self {
        Self {
            name: Mutex::new(String::new()),
            ratio: Mutex::new(1.0),
            enabled: Mutex::new(false),
            tags: Mutex::new(Vec::new()),
            level: AtomicI32::new(0),
            setter_calls: AtomicUsize::new(0),
        }
    }

    pub fn setter_calls(&self) -> usize {
        self.setter_calls.load(Ordering::SeqCst)
    }
}

impl ManagedObject for Settings {
    fn class(&self) -> &ClassDecl {
        &SETTINGS
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
        if method.name().starts_with("set") {
            self.setter_calls.fetch_add(1, Ordering::SeqCst);
        }

        match method.name() {
            "getName" => Ok(self.name.lock().clone().into()),
            "setName" => {
                *self.name.lock() = args.get(0)?;
                Ok(Value::Null)
            }
            "getRatio" => Ok((*self.ratio.lock()).into()),
            "setRatio" => {
                *self.ratio.lock() = args.get(0)?;
                Ok(Value::Null)
            }
            "isEnabled" => Ok((*self.enabled.lock()).into()),
            "setEnabled" => {
                *self.enabled.lock() = args.get(0)?;
                Ok(Value::Null)
            }
            "getTags" => Ok(Value::List(self.tags.lock().clone())),
            "setTags" => {
                *self.tags.lock() = args.get(0)?;
                Ok(Value::Null)
            }
            "getLevel" => Ok(self.level.load(Ordering::SeqCst).into()),
            "setLevel" => {
                let level: i32 = args.get(0)?;
                self.level.store(level.clamp(0, MAX_LEVEL), Ordering::SeqCst);
                Ok(Value::Null)
            }
            "getVersion" => Ok("1.0.0".into()),
            "setSecret" => Ok(Value::Null),
            _ => Err(NotImplemented::new(self, method).into()),
        }
    }
}

/// Overloaded operations and calls that fail.
pub struct Calculator;

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
pub struct DivisionByZero;

static CALCULATOR: Lazy<ClassDecl> = Lazy::new(|| {
    ClassDecl::builder("Calculator")
        .method(
            MethodDecl::new("describe")
                .param(TypeTag::Object)
                .returns(TypeTag::String)
                .managed_operation(Impact::Info),
        )
        .method(
            MethodDecl::new("describe")
                .param(TypeTag::INT)
                .returns(TypeTag::String)
                .managed_operation(Impact::Info),
        )
        .method(
            MethodDecl::new("divide")
                .param(TypeTag::LONG)
                .param(TypeTag::LONG)
                .returns(TypeTag::LONG)
                .operation(OperationMarker::new(Impact::Info).description("integer division")),
        )
        .method(
            MethodDecl::new("join")
                .param(TypeTag::String)
                .param(TypeTag::String)
                .returns(TypeTag::String)
                .managed_operation(Impact::Info),
        )
        .method(MethodDecl::getter("getBroken", TypeTag::INT).managed_attribute())
        .build()
});

impl ManagedObject for Calculator {
    fn class(&self) -> &ClassDecl {
        &CALCULATOR
    }

    fn call(&self, method: &MethodDecl, args: Arguments) -> Result<Value, BoxError> {
        match (method.name(), method.params()) {
            ("describe", [TypeTag::Object]) => Ok("object".into()),
            ("describe", [TypeTag::Primitive(_)]) => Ok("int".into()),
            ("divide", _) => {
                let dividend: i64 = args.get(0)?;
                let divisor: i64 = args.get(1)?;
                if divisor == 0 {
                    return Err(DivisionByZero.into());
                }
                Ok(Value::Long(dividend / divisor))
            }
            ("join", _) => {
                let parts: Vec<String> = (0..args.len())
                    .map(|i| match args.value(i) {
                        Some(Value::String(s)) => s.clone(),
                        _ => "null".to_string(),
                    })
                    .collect();
                Ok(parts.join("").into())
            }
            ("getBroken", _) => Err(DivisionByZero.into()),
            _ => Err(NotImplemented::new(self, method).into()),
        }
    }
}
