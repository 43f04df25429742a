//! Accessor naming conventions shared by the catalog builder and the dispatcher.
//!
//! A getter is named `get<Name>` or `is<Name>`, takes no parameters and returns a value.
//! A setter is named `set<Name>`, takes exactly one parameter and returns `void`.
//! The attribute exposed by either is `<Name>` with its first letter lower-cased.
use crate::declaration::{ClassDecl, MethodDecl};
use crate::value::TypeTag;

pub const GET: &str = "get";
pub const IS: &str = "is";
pub const SET: &str = "set";

/// The accessor role a method's shape allows it to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Getter,
    Setter,
}

/// Classifies a method by its name and shape, or `None` if it is not accessor-shaped.
pub fn accessor_kind(method: &MethodDecl) -> Option<Accessor> {
    if is_getter(method) {
        Some(Accessor::Getter)
    } else if is_setter(method) {
        Some(Accessor::Setter)
    } else {
        None
    }
}

pub fn is_getter(method: &MethodDecl) -> bool {
    (has_prefix(method.name(), GET) || has_prefix(method.name(), IS))
        && method.params().is_empty()
        && !method.return_type().is_void()
}

pub fn is_setter(method: &MethodDecl) -> bool {
    has_prefix(method.name(), SET) && method.params().len() == 1 && method.return_type().is_void()
}

// The prefix must be followed by at least one character.
fn has_prefix(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len() && name.starts_with(prefix)
}

/// Derives the attribute name from an accessor name: `getMaxSize` -> `maxSize`.
pub fn attribute_name(method_name: &str) -> String {
    let stripped = if method_name.starts_with(IS) {
        &method_name[IS.len()..]
    } else {
        method_name.get(GET.len()..).unwrap_or_default()
    };
    decapitalize(stripped)
}

/// Upper-cases the first letter. Only ASCII letters change, so `decapitalize` undoes it.
pub fn capitalize(name: &str) -> String {
    map_first(name, char::to_ascii_uppercase)
}

/// Lower-cases the first letter. Only ASCII letters change, so `capitalize` undoes it.
pub fn decapitalize(name: &str) -> String {
    map_first(name, char::to_ascii_lowercase)
}

fn map_first(name: &str, map: fn(&char) -> char) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => std::iter::once(map(&first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Finds the getter of `attribute`, trying `get<Name>` before `is<Name>`.
pub fn find_getter<'a>(class: &'a ClassDecl, attribute: &str) -> Option<&'a MethodDecl> {
    [GET, IS]
        .iter()
        .find_map(|prefix| find_getter_with_prefix(class, attribute, prefix))
}

/// Finds the getter of `attribute` using one specific prefix.
pub fn find_getter_with_prefix<'a>(
    class: &'a ClassDecl,
    attribute: &str,
    prefix: &str,
) -> Option<&'a MethodDecl> {
    class
        .find_method(&format!("{prefix}{}", capitalize(attribute)), &[])
        .filter(|method| !method.return_type().is_void())
}

/// Finds `set<Name>(ty)`.
pub fn find_setter<'a>(
    class: &'a ClassDecl,
    attribute: &str,
    ty: &TypeTag,
) -> Option<&'a MethodDecl> {
    class.find_method(
        &format!("{SET}{}", capitalize(attribute)),
        std::slice::from_ref(ty),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_attribute_names() {
        assert_eq!(attribute_name("getCounter"), "counter");
        assert_eq!(attribute_name("isRunning"), "running");
        assert_eq!(attribute_name("setMaxSize"), "maxSize");
    }

    #[test]
    fn non_ascii_initials_are_kept() {
        assert_eq!(attribute_name("getİd"), "İd");
        assert_eq!(attribute_name("getÉtat"), "État");
        assert_eq!(capitalize("état"), "état");

        for name in ["counter", "maxSize", "İd", "État", "x"] {
            assert_eq!(decapitalize(&capitalize(name)), decapitalize(name));
        }
    }

    #[test]
    fn classifies_accessor_shapes() {
        let getter = MethodDecl::getter("getCounter", TypeTag::INT);
        let predicate = MethodDecl::getter("isEnabled", TypeTag::BOOLEAN);
        let setter = MethodDecl::setter("setCounter", TypeTag::INT);

        assert_eq!(accessor_kind(&getter), Some(Accessor::Getter));
        assert_eq!(accessor_kind(&predicate), Some(Accessor::Getter));
        assert_eq!(accessor_kind(&setter), Some(Accessor::Setter));
    }

    #[test]
    fn rejects_non_accessor_shapes() {
        // void getter
        assert_eq!(accessor_kind(&MethodDecl::new("getNothing")), None);
        // setter returning a value
        let fluent = MethodDecl::setter("setValue", TypeTag::INT).returns(TypeTag::INT);
        assert_eq!(accessor_kind(&fluent), None);
        // getter with a parameter
        let indexed = MethodDecl::getter("getItem", TypeTag::String).param(TypeTag::INT);
        assert_eq!(accessor_kind(&indexed), None);
        // bare prefixes
        assert_eq!(accessor_kind(&MethodDecl::getter("get", TypeTag::INT)), None);
        assert_eq!(accessor_kind(&MethodDecl::setter("set", TypeTag::INT)), None);
        // wrong prefix
        assert_eq!(accessor_kind(&MethodDecl::getter("counter", TypeTag::INT)), None);
    }

    #[test]
    fn finds_counterparts_by_convention() {
        let class = ClassDecl::builder("Service")
            .method(MethodDecl::getter("isRunning", TypeTag::BOOLEAN))
            .method(MethodDecl::setter("setRunning", TypeTag::BOOLEAN))
            .method(MethodDecl::getter("getName", TypeTag::String))
            .build();

        assert_eq!(
            find_getter(&class, "running").map(MethodDecl::name),
            Some("isRunning")
        );
        assert!(find_setter(&class, "running", &TypeTag::BOOLEAN).is_some());
        assert!(find_setter(&class, "running", &TypeTag::INT).is_none());
        assert!(find_setter(&class, "name", &TypeTag::String).is_none());
        assert!(find_getter_with_prefix(&class, "name", GET).is_some());
        assert!(find_getter_with_prefix(&class, "name", IS).is_none());
    }
}
