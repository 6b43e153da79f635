// staged import additions
use crate::core::context::CompilationContext;
use crate::core::types::{IMPLICIT_ROOT_NAMESPACE, ImportDirective, namespace_of, short_name};

/// Make `qualified_name` usable by its short name, staging a single-type
/// import in `ctx` when nothing in scope already provides it.
///
/// Idempotent. Never stages a second import for a short name that some
/// import already binds, even to a different type.
pub fn ensure_import(qualified_name: &str, ctx: &mut CompilationContext) {
    //default package: nothing to import
    let Some(namespace) = namespace_of(qualified_name) else {
        return;
    };
    if namespace == IMPLICIT_ROOT_NAMESPACE || ctx.package() == Some(namespace) {
        return;
    }

    let short = short_name(qualified_name);
    let already_provided = ctx.imports().any(|imp| {
        if imp.is_wildcard {
            imp.name == namespace
        } else {
            imp.name == qualified_name || short_name(&imp.name) == short
        }
    });
    if already_provided {
        return;
    }

    if ctx.stage(ImportDirective::single(qualified_name)) {
        tracing::trace!(target: "explicit_types", site = ctx.site(), import = qualified_name, "staged import");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_ctx(imports: Vec<ImportDirective>) -> CompilationContext {
        CompilationContext::new(1, Some("com.acme"), imports)
    }

    #[test]
    fn stages_missing_import_once() {
        let mut ctx = mk_ctx(vec![]);
        ensure_import("java.util.List", &mut ctx);
        ensure_import("java.util.List", &mut ctx);

        assert_eq!(ctx.staged(), &[ImportDirective::single("java.util.List")]);
    }

    #[test]
    fn covered_names_stage_nothing() {
        let mut ctx = mk_ctx(vec![
            ImportDirective::single("java.util.Map"),
            ImportDirective::wildcard("java.time"),
            ImportDirective::single("org.other.List"),
        ]);

        ensure_import("java.util.Map", &mut ctx); // exact
        ensure_import("java.time.Instant", &mut ctx); // wildcard
        ensure_import("java.util.List", &mut ctx); // short name already bound elsewhere
        ensure_import("java.lang.String", &mut ctx); // implicit root namespace
        ensure_import("com.acme.Widget", &mut ctx); // own package
        ensure_import("Local", &mut ctx); // default package

        assert!(ctx.staged().is_empty());
    }

    #[test]
    fn root_subpackages_still_need_an_import() {
        let mut ctx = mk_ctx(vec![]);
        ensure_import("java.lang.reflect.Method", &mut ctx);
        assert_eq!(ctx.staged(), &[ImportDirective::single("java.lang.reflect.Method")]);
    }

    #[test]
    fn staged_import_covers_later_requests() {
        let mut ctx = mk_ctx(vec![]);
        ensure_import("a.b.List", &mut ctx);
        ensure_import("c.d.List", &mut ctx);

        assert_eq!(ctx.staged(), &[ImportDirective::single("a.b.List")]);
    }
}
