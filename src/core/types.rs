// semantic types, import directives and the rendered type tree
use std::fmt;

use serde::{Deserialize, Serialize};

pub const NAMESPACE_SEPARATOR: char = '.';
pub const NESTED_TYPE_MARKER: char = '$';
pub const IMPLICIT_ROOT_NAMESPACE: &str = "java.lang";

pub const PRIMITIVE_TYPES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Resolved type of an expression, as described by the type oracle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    Primitive(String),
    Array(Box<SemanticType>),
    Reference {
        qualified_name: String,
        type_arguments: Vec<SemanticType>,
    },
    Wildcard(Box<SemanticType>),
    TypeVariable(String),
    Other(String),
}

impl SemanticType {
    pub fn primitive(name: impl Into<String>) -> Self {
        SemanticType::Primitive(name.into())
    }

    pub fn array(component: SemanticType) -> Self {
        SemanticType::Array(Box::new(component))
    }

    pub fn reference(qualified_name: impl Into<String>) -> Self {
        SemanticType::Reference {
            qualified_name: qualified_name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(qualified_name: impl Into<String>, type_arguments: Vec<SemanticType>) -> Self {
        SemanticType::Reference {
            qualified_name: qualified_name.into(),
            type_arguments,
        }
    }

    pub fn wildcard(bound: SemanticType) -> Self {
        SemanticType::Wildcard(Box::new(bound))
    }

    pub fn type_variable(name: impl Into<String>) -> Self {
        SemanticType::TypeVariable(name.into())
    }
}

/// One `import` line of a compilation unit.
///
/// For a wildcard directive `name` is the namespace (`java.util` for
/// `import java.util.*;`), otherwise it is a qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDirective {
    pub name: String,
    pub is_wildcard: bool,
}

impl ImportDirective {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_wildcard: false,
        }
    }

    pub fn wildcard(namespace: impl Into<String>) -> Self {
        Self {
            name: namespace.into(),
            is_wildcard: true,
        }
    }

    /// Simple name this directive brings into scope; `None` for wildcards.
    pub fn bound_name(&self) -> Option<&str> {
        if self.is_wildcard {
            None
        } else {
            Some(short_name(&self.name))
        }
    }
}

impl fmt::Display for ImportDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard {
            write!(f, "import {}.*;", self.name)
        } else {
            write!(f, "import {};", self.name)
        }
    }
}

/// How a reference node is spelled in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    Short(String),
    Qualified(String),
    /// `outer` is the simple name of an imported enclosing type, `inner` the
    /// (possibly dotted) path below it.
    NestedQualified { outer: String, inner: String },
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendering::Short(name) | Rendering::Qualified(name) => f.write_str(name),
            Rendering::NestedQualified { outer, inner } => write!(f, "{outer}.{inner}"),
        }
    }
}

/// Structured output of the synthesizer, serialized once through `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    Primitive(String),
    Array(Box<TypeExpression>),
    Reference {
        qualified_name: String,
        rendering: Rendering,
        arguments: Vec<TypeExpression>,
    },
    Wildcard(Box<TypeExpression>),
    TypeVariable(String),
    Other(String),
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpression::Primitive(name)
            | TypeExpression::TypeVariable(name)
            | TypeExpression::Other(name) => f.write_str(name),
            TypeExpression::Array(component) => write!(f, "{component}[]"),
            TypeExpression::Wildcard(bound) => write!(f, "? extends {bound}"),
            TypeExpression::Reference {
                rendering,
                arguments,
                ..
            } => {
                write!(f, "{rendering}")?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

//last segment after the final separator
pub fn short_name(qualified_name: &str) -> &str {
    match qualified_name.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => &qualified_name[idx + 1..],
        None => qualified_name,
    }
}

//everything before the final separator; None in the default package
pub fn namespace_of(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rfind(NAMESPACE_SEPARATOR)
        .map(|idx| &qualified_name[..idx])
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

pub fn in_implicit_root_namespace(qualified_name: &str) -> bool {
    namespace_of(qualified_name) == Some(IMPLICIT_ROOT_NAMESPACE)
}

pub fn has_nested_type_marker(qualified_name: &str) -> bool {
    qualified_name.contains(NESTED_TYPE_MARKER)
}

/// True when the enclosing segment of `qualified_name` names a type rather
/// than a package, going by the capitalized-type naming convention
/// (`java.util.Map.Entry`).
pub fn is_dotted_nested(qualified_name: &str) -> bool {
    namespace_of(qualified_name)
        .map(short_name)
        .and_then(|enclosing| enclosing.chars().next())
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_and_namespace_split_on_last_separator() {
        assert_eq!(short_name("java.util.Map.Entry"), "Entry");
        assert_eq!(namespace_of("java.util.Map.Entry"), Some("java.util.Map"));
        assert_eq!(short_name("Local"), "Local");
        assert_eq!(namespace_of("Local"), None);
    }

    #[test]
    fn implicit_root_namespace_excludes_subpackages() {
        assert!(in_implicit_root_namespace("java.lang.String"));
        assert!(!in_implicit_root_namespace("java.lang.reflect.Method"));
        assert!(!in_implicit_root_namespace("String"));
    }

    #[test]
    fn dotted_nested_follows_enclosing_segment_case() {
        assert!(is_dotted_nested("java.util.Map.Entry"));
        assert!(!is_dotted_nested("java.util.List"));
        assert!(!is_dotted_nested("List"));
    }

    #[test]
    fn display_renders_generic_arrays_and_wildcards() {
        let expr = TypeExpression::Array(Box::new(TypeExpression::Reference {
            qualified_name: "java.util.Map".into(),
            rendering: Rendering::Short("Map".into()),
            arguments: vec![
                TypeExpression::Reference {
                    qualified_name: "java.lang.String".into(),
                    rendering: Rendering::Short("String".into()),
                    arguments: vec![],
                },
                TypeExpression::Wildcard(Box::new(TypeExpression::Reference {
                    qualified_name: "java.util.Map.Entry".into(),
                    rendering: Rendering::NestedQualified {
                        outer: "Map".into(),
                        inner: "Entry".into(),
                    },
                    arguments: vec![TypeExpression::TypeVariable("K".into())],
                })),
            ],
        }));

        assert_eq!(expr.to_string(), "Map<String, ? extends Map.Entry<K>>[]");
    }

    #[test]
    fn wildcard_directive_binds_no_name() {
        assert_eq!(ImportDirective::wildcard("java.util").bound_name(), None);
        assert_eq!(ImportDirective::single("java.util.List").bound_name(), Some("List"));
        assert_eq!(ImportDirective::wildcard("java.util").to_string(), "import java.util.*;");
    }
}
