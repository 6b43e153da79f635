// build the explicit declaration, replace, then commit imports
use crate::ast::{DeclaredType, LocalDeclaration, VariableDeclarator};
use crate::core::context::CompilationContext;
use crate::core::error::RewriteError;
use crate::core::filter::Candidate;
use crate::core::types::TypeExpression;
use crate::host::{CompilationUnit, MutationEngine};

/// Replacement for the candidate's declaration: same id, modifiers,
/// annotations, name and initializer, with `explicit` as declared type.
pub fn explicit_declaration(candidate: &Candidate<'_>, explicit: &TypeExpression) -> LocalDeclaration {
    let original = candidate.declaration;
    LocalDeclaration {
        id: original.id,
        modifiers: original.modifiers.clone(),
        annotations: original.annotations.clone(),
        variables: vec![VariableDeclarator::new(
            candidate.variable_name,
            DeclaredType::Explicit(explicit.to_string()),
            Some(candidate.initializer.clone()),
        )],
    }
}

/// Submit the replacement; staged imports reach `unit` only once the
/// engine has accepted it. No retry on rejection.
pub fn rewrite_declaration(
    candidate: Candidate<'_>,
    explicit: &TypeExpression,
    ctx: CompilationContext,
    unit: &mut impl CompilationUnit,
    engine: &mut impl MutationEngine,
) -> Result<LocalDeclaration, RewriteError> {
    let site = candidate.declaration_site();
    let replacement = explicit_declaration(&candidate, explicit);

    if !engine.replace(site, replacement.clone()) {
        return Err(RewriteError::MutationRejected(site));
    }

    for directive in ctx.into_staged() {
        unit.add_import(&directive.name);
    }
    Ok(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;
    use crate::core::filter::filter_candidate;
    use crate::core::synthesize::Synthesizer;
    use crate::core::types::{ImportDirective, SemanticType};
    use crate::host::{MemoryEngine, SourceUnit};

    fn mk_decl() -> LocalDeclaration {
        let mut decl = LocalDeclaration::inferred(
            11,
            "names",
            Expression::Other("List.of(\"a\")".into()),
        );
        decl.modifiers.push("final".into());
        decl.annotations.push("@Nonnull".into());
        decl
    }

    fn mk_list_of_string() -> SemanticType {
        SemanticType::generic("java.util.List", vec![SemanticType::reference("java.lang.String")])
    }

    #[test]
    fn replacement_keeps_modifiers_annotations_and_initializer() {
        let decl = mk_decl();
        let mut engine = MemoryEngine::new();
        engine.insert(decl.clone());
        let mut unit = SourceUnit::new(None);

        let candidate = filter_candidate(&decl).unwrap();
        let mut ctx = CompilationContext::from_unit(decl.id, &unit);
        let explicit = Synthesizer::default().synthesize(&mk_list_of_string(), &mut ctx).unwrap();

        let replaced = rewrite_declaration(candidate, &explicit, ctx, &mut unit, &mut engine).unwrap();

        assert_eq!(replaced.to_string(), "@Nonnull final List<String> names = List.of(\"a\")");
        assert_eq!(engine.get(11), Some(&replaced));
        assert_eq!(unit.imports(), &[ImportDirective::single("java.util.List")]);
    }

    #[test]
    fn rejected_replacement_commits_no_import() {
        let decl = mk_decl();
        let mut engine = MemoryEngine::new(); // node never registered
        let mut unit = SourceUnit::new(None);

        let candidate = filter_candidate(&decl).unwrap();
        let mut ctx = CompilationContext::from_unit(decl.id, &unit);
        let explicit = Synthesizer::default().synthesize(&mk_list_of_string(), &mut ctx).unwrap();
        assert_eq!(ctx.staged().len(), 1);

        let err = rewrite_declaration(candidate, &explicit, ctx, &mut unit, &mut engine).unwrap_err();

        assert_eq!(err, RewriteError::MutationRejected(11));
        assert!(unit.imports().is_empty());
    }
}
