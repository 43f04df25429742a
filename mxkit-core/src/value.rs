//! # Types & Values
//!
//! The semantic type tags used in declarations and descriptors, and the dynamic [`Value`]s
//! that flow through the dispatcher.
//!
//! Primitive types have a boxed counterpart (`int` / `Integer`, `boolean` / `Boolean`, ...).
//! The two are interchangeable for every assignability check: a declared `int` attribute
//! accepts an `Integer` value and an operation declared with a `long` parameter matches a
//! caller signature of `Long`.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The primitive types a [`TypeTag`] can carry, either unboxed or boxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl Primitive {
    const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Char,
    ];

    /// The unboxed name (e.g. `int`).
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
        }
    }

    /// The boxed name (e.g. `Integer`).
    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Char => "Character",
        }
    }
}

/// A semantic type tag: the declared type of an attribute, parameter or return value.
///
/// Tags display as, and parse from, their conventional names: `void`, the primitive names
/// (`int`, `boolean`, ...), the boxed names (`Integer`, `Boolean`, ...), `String`, `List`,
/// `Object`. Any other identifier names an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeTag {
    Void,
    Primitive(Primitive),
    Boxed(Primitive),
    String,
    List,
    /// The top type: accepts any non-void value.
    Object,
    /// A named enumeration; values are [`Value::Enum`] with the same `type_name`.
    Enum(String),
}

impl TypeTag {
    pub const BOOLEAN: TypeTag = TypeTag::Primitive(Primitive::Boolean);
    pub const BYTE: TypeTag = TypeTag::Primitive(Primitive::Byte);
    pub const SHORT: TypeTag = TypeTag::Primitive(Primitive::Short);
    pub const INT: TypeTag = TypeTag::Primitive(Primitive::Int);
    pub const LONG: TypeTag = TypeTag::Primitive(Primitive::Long);
    pub const FLOAT: TypeTag = TypeTag::Primitive(Primitive::Float);
    pub const DOUBLE: TypeTag = TypeTag::Primitive(Primitive::Double);
    pub const CHAR: TypeTag = TypeTag::Primitive(Primitive::Char);

    /// Creates an enum type tag.
    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeTag::Enum(name.into())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeTag::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeTag::Primitive(_))
    }

    /// Maps a primitive type to its boxed counterpart; every other tag is returned as is.
    pub fn boxed(&self) -> TypeTag {
        match self {
            TypeTag::Primitive(p) => TypeTag::Boxed(*p),
            other => other.clone(),
        }
    }

    /// Returns `true` if a value of type `from` can be used where `self` is expected.
    ///
    /// Primitive and boxed forms are normalized before comparing, `Object` accepts every
    /// non-void type and `void` is only assignable from `void`.
    pub fn is_assignable_from(&self, from: &TypeTag) -> bool {
        let to = self.boxed();
        let from = from.boxed();

        match (&to, &from) {
            (TypeTag::Void, TypeTag::Void) => true,
            (_, TypeTag::Void) | (TypeTag::Void, _) => false,
            (TypeTag::Object, _) => true,
            _ => to == from,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Void => f.write_str("void"),
            TypeTag::Primitive(p) => f.write_str(p.name()),
            TypeTag::Boxed(p) => f.write_str(p.boxed_name()),
            TypeTag::String => f.write_str("String"),
            TypeTag::List => f.write_str("List"),
            TypeTag::Object => f.write_str("Object"),
            TypeTag::Enum(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid type name '{0}'")]
pub struct ParseTypeTagError(String);

impl FromStr for TypeTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        match name {
            "void" => return Ok(TypeTag::Void),
            "String" => return Ok(TypeTag::String),
            "List" => return Ok(TypeTag::List),
            "Object" => return Ok(TypeTag::Object),
            _ => {}
        }

        for p in Primitive::ALL {
            if name == p.name() {
                return Ok(TypeTag::Primitive(p));
            }
            if name == p.boxed_name() {
                return Ok(TypeTag::Boxed(p));
            }
        }

        let valid_identifier = name
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '$');

        if valid_identifier {
            Ok(TypeTag::Enum(name.to_string()))
        } else {
            Err(ParseTypeTagError(s.to_string()))
        }
    }
}

impl TryFrom<String> for TypeTag {
    type Error = ParseTypeTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}

/// A dynamic value read from, or written to, a managed object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    List(Vec<Value>),
    Enum { type_name: String, variant: String },
}

impl Value {
    /// Creates an enum value.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The dynamic type of this value, or `None` for [`Value::Null`].
    ///
    /// Scalars report their boxed type.
    pub fn type_tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Null => return None,
            Value::Boolean(_) => TypeTag::Boxed(Primitive::Boolean),
            Value::Byte(_) => TypeTag::Boxed(Primitive::Byte),
            Value::Short(_) => TypeTag::Boxed(Primitive::Short),
            Value::Int(_) => TypeTag::Boxed(Primitive::Int),
            Value::Long(_) => TypeTag::Boxed(Primitive::Long),
            Value::Float(_) => TypeTag::Boxed(Primitive::Float),
            Value::Double(_) => TypeTag::Boxed(Primitive::Double),
            Value::Char(_) => TypeTag::Boxed(Primitive::Char),
            Value::String(_) => TypeTag::String,
            Value::List(_) => TypeTag::List,
            Value::Enum { type_name, .. } => TypeTag::Enum(type_name.clone()),
        };
        Some(tag)
    }

    /// A short description of the dynamic type, used in error messages.
    pub fn type_name(&self) -> String {
        self.type_tag()
            .map(|tag| tag.to_string())
            .unwrap_or_else(|| "null".to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Enum { type_name, variant } => write!(f, "{type_name}.{variant}"),
        }
    }
}

/// Error returned when a [`Value`] cannot be converted into the requested Rust type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Expected a value of type {expected}, got {actual}")]
pub struct ValueError {
    pub expected: &'static str,
    pub actual: String,
}

macro_rules! scalar_conversions {
    ($($variant:ident => $ty:ty, $expected:literal;)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = ValueError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ValueError {
                            expected: $expected,
                            actual: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    Boolean => bool, "Boolean";
    Byte => i8, "Byte";
    Short => i16, "Short";
    Int => i32, "Integer";
    Long => i64, "Long";
    Float => f32, "Float";
    Double => f64, "Double";
    Char => char, "Character";
    String => String, "String";
    List => Vec<Value>, "List";
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
