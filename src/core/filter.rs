// which declarations may be rewritten
use crate::ast::{Expression, LocalDeclaration, NodeId};
use crate::core::error::{Ineligible, UnsupportedInitializer};

/// A declaration accepted for rewriting. Borrowed from the host node and
/// consumed once, by the rewriter or by abstaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub declaration: &'a LocalDeclaration,
    pub variable_name: &'a str,
    pub initializer: &'a Expression,
}

impl Candidate<'_> {
    pub fn declaration_site(&self) -> NodeId {
        self.declaration.id
    }
}

pub fn filter_candidate(decl: &LocalDeclaration) -> Result<Candidate<'_>, Ineligible> {
    let [variable] = decl.variables.as_slice() else {
        return Err(Ineligible::MultipleVariables(decl.variables.len()));
    };

    if !variable.declared_type.is_inferred() {
        return Err(Ineligible::ExplicitType);
    }

    let initializer = variable
        .initializer
        .as_ref()
        .ok_or(Ineligible::MissingInitializer)?;
    check_initializer(initializer)?;

    Ok(Candidate {
        declaration: decl,
        variable_name: &variable.name,
        initializer,
    })
}

//lambdas and method references need a target type; `var` gives them none
fn check_initializer(initializer: &Expression) -> Result<(), UnsupportedInitializer> {
    match initializer {
        Expression::Lambda(_) => Err(UnsupportedInitializer::Lambda),
        Expression::MethodReference(_) => Err(UnsupportedInitializer::MethodReference),
        // the oracle's type for `new T<>() { .. }` is not reliable
        Expression::ObjectCreation(creation) if creation.is_anonymous() && creation.uses_diamond() => {
            Err(UnsupportedInitializer::DiamondAnonymousClass)
        }
        _ => Ok(()),
    }
}
