use thiserror::Error;

use crate::ast::NodeId;

/// Initializers that inferred-type target typing cannot be replaced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnsupportedInitializer {
    #[error("lambda initializer")]
    Lambda,
    #[error("method reference initializer")]
    MethodReference,
    #[error("anonymous class created with a diamond type-argument list")]
    DiamondAnonymousClass,
}

/// Why the candidate filter rejected a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligible {
    #[error("declares {0} variables instead of exactly one")]
    MultipleVariables(usize),
    #[error("declared type is already explicit")]
    ExplicitType,
    #[error("declaration has no initializer")]
    MissingInitializer,
    #[error(transparent)]
    Unsupported(#[from] UnsupportedInitializer),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisFailure {
    #[error("type nesting exceeds the depth cap of {max_depth}")]
    DepthExceeded { max_depth: usize },
    #[error("malformed type descriptor `{0}`")]
    Malformed(String),
    #[error("unknown primitive type `{0}`")]
    UnknownPrimitive(String),
    #[error("primitive type `{0}` cannot be a type argument or wildcard bound")]
    PrimitiveArgument(String),
    #[error("wildcard outside of a type-argument position")]
    MisplacedWildcard,
}

/// Every way a single candidate can end without a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("not a candidate: {0}")]
    NotCandidate(Ineligible),
    #[error("unsupported initializer: {0}")]
    UnsupportedInitializer(UnsupportedInitializer),
    #[error("type oracle could not resolve `{0}`")]
    ResolutionFailure(String),
    #[error("type synthesis failed: {0}")]
    Synthesis(#[from] SynthesisFailure),
    #[error("mutation engine rejected the replacement of node {0}")]
    MutationRejected(NodeId),
    #[error("unexpected fault: {0}")]
    UnexpectedFault(String),
}

impl From<Ineligible> for RewriteError {
    fn from(reason: Ineligible) -> Self {
        match reason {
            Ineligible::Unsupported(kind) => RewriteError::UnsupportedInitializer(kind),
            other => RewriteError::NotCandidate(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_initializers_keep_their_own_error_kind() {
        let err: RewriteError = Ineligible::from(UnsupportedInitializer::Lambda).into();
        assert_eq!(err, RewriteError::UnsupportedInitializer(UnsupportedInitializer::Lambda));

        let err: RewriteError = Ineligible::ExplicitType.into();
        assert!(matches!(err, RewriteError::NotCandidate(Ineligible::ExplicitType)));
    }

    #[test]
    fn messages_name_the_failure() {
        let err = RewriteError::from(SynthesisFailure::DepthExceeded { max_depth: 4 });
        assert_eq!(err.to_string(), "type synthesis failed: type nesting exceeds the depth cap of 4");
    }
}
