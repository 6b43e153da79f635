// short-name safety for one reference node
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::core::context::CompilationContext;
use crate::core::types::{
    has_nested_type_marker, in_implicit_root_namespace, is_dotted_nested, namespace_of, short_name,
};

/// Simple names visible in every unit without an import.
static IMPLICIT_ROOT_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // core
        "Object", "String", "Class", "ClassLoader", "Enum", "Record", "Void", "System",
        "Runtime", "Math", "StrictMath", "Thread", "ThreadGroup", "ThreadLocal",
        "InheritableThreadLocal", "Process", "ProcessBuilder", "ProcessHandle", "Package",
        "Module", "ModuleLayer", "SecurityManager", "StackTraceElement", "StackWalker",
        "ScopedValue", "StringTemplate", "Compiler",
        // boxes and text
        "Boolean", "Byte", "Character", "Short", "Integer", "Long", "Float", "Double",
        "Number", "StringBuilder", "StringBuffer", "CharSequence",
        // interfaces
        "Appendable", "AutoCloseable", "Cloneable", "Comparable", "Iterable", "Readable",
        "Runnable",
        // annotations
        "Deprecated", "FunctionalInterface", "Override", "SafeVarargs", "SuppressWarnings",
        // throwables
        "Throwable", "Exception", "Error", "RuntimeException", "ArithmeticException",
        "ArrayIndexOutOfBoundsException", "ArrayStoreException", "ClassCastException",
        "ClassNotFoundException", "CloneNotSupportedException",
        "EnumConstantNotPresentException", "IllegalAccessException",
        "IllegalArgumentException", "IllegalCallerException", "IllegalMonitorStateException",
        "IllegalStateException", "IllegalThreadStateException", "IndexOutOfBoundsException",
        "InstantiationException", "InterruptedException", "LayerInstantiationException",
        "NegativeArraySizeException", "NoSuchFieldException", "NoSuchMethodException",
        "NullPointerException", "NumberFormatException", "ReflectiveOperationException",
        "SecurityException", "StringIndexOutOfBoundsException", "TypeNotPresentException",
        "UnsupportedOperationException", "WrongThreadException", "MatchException",
        "AbstractMethodError", "AssertionError", "BootstrapMethodError",
        "ClassCircularityError", "ClassFormatError", "ExceptionInInitializerError",
        "IllegalAccessError", "IncompatibleClassChangeError", "InstantiationError",
        "InternalError", "LinkageError", "NoClassDefFoundError", "NoSuchFieldError",
        "NoSuchMethodError", "OutOfMemoryError", "StackOverflowError", "ThreadDeath",
        "UnknownError", "UnsatisfiedLinkError", "UnsupportedClassVersionError", "VerifyError",
        "VirtualMachineError",
    ]
    .into_iter()
    .collect()
});

pub fn is_implicit_root_name(short: &str) -> bool {
    IMPLICIT_ROOT_NAMES.contains(short)
}

/// Whether `short` can stand for `qualified_name` under `ctx` without
/// ambiguity. Pure: reads the context, never changes it.
///
/// A wildcard import of an unrelated namespace is never treated as a
/// conflict, even though it may export a type with the same simple name.
/// Likewise a `java.lang` type stays short next to a single-type import of
/// a foreign type with the same simple name.
pub fn can_use_short(short: &str, qualified_name: &str, ctx: &CompilationContext) -> bool {
    if in_implicit_root_namespace(qualified_name) {
        return true;
    }

    //binary nested names are always spelled out
    if has_nested_type_marker(qualified_name) {
        return false;
    }

    if ctx.has_direct_import(qualified_name) {
        return true;
    }

    if let Some(namespace) = namespace_of(qualified_name) {
        if ctx.has_wildcard_import(namespace) {
            return true;
        }
    }

    // a nested type is only used short when it is already in scope
    if is_dotted_nested(qualified_name) {
        return false;
    }

    let clashes_with_import = ctx.imports().any(|imp| {
        !imp.is_wildcard && imp.name != qualified_name && short_name(&imp.name) == short
    });
    if clashes_with_import {
        return false;
    }

    // own-package types shadow java.lang, but not single-type imports
    if namespace_of(qualified_name).is_some_and(|namespace| ctx.package() == Some(namespace)) {
        return true;
    }

    !is_implicit_root_name(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ImportDirective;

    fn mk_ctx(imports: Vec<ImportDirective>) -> CompilationContext {
        CompilationContext::new(1, Some("com.acme.app"), imports)
    }

    #[test]
    fn implicit_root_namespace_is_always_short() {
        let ctx = mk_ctx(vec![]);
        assert!(can_use_short("String", "java.lang.String", &ctx));
        assert!(can_use_short("Integer", "java.lang.Integer", &ctx));
    }

    #[test]
    fn binary_nested_names_are_never_short() {
        let ctx = mk_ctx(vec![ImportDirective::single("a.b.Outer$Inner")]);
        assert!(!can_use_short("Outer$Inner", "a.b.Outer$Inner", &ctx));
    }

    #[test]
    fn exact_and_wildcard_imports_allow_short() {
        let ctx = mk_ctx(vec![
            ImportDirective::single("java.util.List"),
            ImportDirective::wildcard("java.time"),
        ]);
        assert!(can_use_short("List", "java.util.List", &ctx));
        assert!(can_use_short("Instant", "java.time.Instant", &ctx));
    }

    #[test]
    fn same_package_types_are_short() {
        let ctx = mk_ctx(vec![ImportDirective::single("java.util.List")]);
        assert!(can_use_short("Widget", "com.acme.app.Widget", &ctx));
        assert!(can_use_short("String", "com.acme.app.String", &ctx));
    }

    #[test]
    fn single_type_import_shadows_same_package_type() {
        let ctx = mk_ctx(vec![ImportDirective::single("x.y.Widget")]);
        assert!(!can_use_short("Widget", "com.acme.app.Widget", &ctx));
        assert!(can_use_short("Widget", "x.y.Widget", &ctx));
    }

    #[test]
    fn imported_foreign_type_does_not_demote_root_type() {
        // accepted false negative: `String` here resolves to org.acme.String
        let ctx = mk_ctx(vec![ImportDirective::single("org.acme.String")]);
        assert!(can_use_short("String", "java.lang.String", &ctx));
    }

    #[test]
    fn conflicting_direct_import_forces_qualified() {
        let ctx = mk_ctx(vec![ImportDirective::single("c.d.List")]);
        assert!(!can_use_short("List", "a.b.List", &ctx));
    }

    #[test]
    fn implicit_root_names_conflict_with_foreign_types() {
        let ctx = mk_ctx(vec![]);
        assert!(!can_use_short("String", "org.acme.String", &ctx));
        assert!(!can_use_short("Override", "com.other.Override", &ctx));
    }

    #[test]
    fn subpackage_of_root_namespace_is_not_implicit() {
        let ctx = mk_ctx(vec![]);
        // no clash and no import yet: short is fine, the import is added separately
        assert!(can_use_short("Method", "java.lang.reflect.Method", &ctx));
    }

    #[test]
    fn dotted_nested_types_need_to_be_in_scope() {
        assert!(!can_use_short("Entry", "java.util.Map.Entry", &mk_ctx(vec![])));
        assert!(can_use_short(
            "Entry",
            "java.util.Map.Entry",
            &mk_ctx(vec![ImportDirective::single("java.util.Map.Entry")])
        ));
        assert!(can_use_short(
            "Entry",
            "java.util.Map.Entry",
            &mk_ctx(vec![ImportDirective::wildcard("java.util.Map")])
        ));
    }

    #[test]
    fn unrelated_wildcard_import_is_accepted_false_negative() {
        // java.awt.* also exports List, yet the short name is judged safe
        let ctx = mk_ctx(vec![ImportDirective::wildcard("java.awt")]);
        assert!(can_use_short("List", "java.util.List", &ctx));
    }

    #[test]
    fn unknown_type_without_clash_is_short() {
        let ctx = mk_ctx(vec![ImportDirective::single("java.util.Map")]);
        assert!(can_use_short("Optional", "java.util.Optional", &ctx));
    }

    #[test]
    fn decision_is_stable_for_identical_inputs() {
        let ctx = mk_ctx(vec![ImportDirective::single("c.d.List")]);
        let first = can_use_short("List", "a.b.List", &ctx);
        let second = can_use_short("List", "a.b.List", &ctx);
        assert_eq!(first, second);
        assert!(ctx.staged().is_empty());
    }
}
