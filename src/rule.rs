// the rule as the host engine sees it
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::ast::LocalDeclaration;
use crate::config::{RuleConfig, RuleMetadata, USE_EXPLICIT_TYPES};
use crate::core::context::CompilationContext;
use crate::core::error::RewriteError;
use crate::core::filter::filter_candidate;
use crate::core::rewrite::rewrite_declaration;
use crate::core::synthesize::Synthesizer;
use crate::host::{CompilationUnit, MutationEngine, TypeOracle};

/// Non-terminal stages of one candidate. Abstaining is possible from each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filtered,
    Resolving,
    Synthesizing,
    Rewriting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Filtered => "filtered",
            Stage::Resolving => "resolving",
            Stage::Synthesizing => "synthesizing",
            Stage::Rewriting => "rewriting",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(LocalDeclaration),
    Abstained { stage: Stage, reason: RewriteError },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Turns `var i = 10;` into `int i = 10;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseExplicitTypes {
    config: RuleConfig,
    synthesizer: Synthesizer,
}

impl UseExplicitTypes {
    pub fn new(config: RuleConfig) -> Self {
        let synthesizer = config.synthesizer();
        Self { config, synthesizer }
    }

    pub fn metadata(&self) -> &'static RuleMetadata {
        &USE_EXPLICIT_TYPES
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn is_eligible(&self, decl: &LocalDeclaration) -> bool {
        filter_candidate(decl).is_ok()
    }

    /// True only when the replacement was committed.
    pub fn apply(
        &self,
        decl: &LocalDeclaration,
        unit: &mut impl CompilationUnit,
        oracle: &impl TypeOracle,
        engine: &mut impl MutationEngine,
    ) -> bool {
        self.process(decl, unit, oracle, engine).is_applied()
    }

    pub fn try_apply(
        &self,
        decl: &LocalDeclaration,
        unit: &mut impl CompilationUnit,
        oracle: &impl TypeOracle,
        engine: &mut impl MutationEngine,
    ) -> Result<LocalDeclaration, RewriteError> {
        match self.process(decl, unit, oracle, engine) {
            Outcome::Applied(replacement) => Ok(replacement),
            Outcome::Abstained { reason, .. } => Err(reason),
        }
    }

    /// Run the whole pipeline for one declaration. Never panics: faults
    /// raised anywhere below, host callbacks included, end as
    /// `UnexpectedFault`.
    pub fn process(
        &self,
        decl: &LocalDeclaration,
        unit: &mut impl CompilationUnit,
        oracle: &impl TypeOracle,
        engine: &mut impl MutationEngine,
    ) -> Outcome {
        let mut stage = Stage::Filtered;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run(decl, unit, oracle, engine, &mut stage)
        }));

        let outcome = match result {
            Ok(Ok(replacement)) => Outcome::Applied(replacement),
            Ok(Err(reason)) => Outcome::Abstained { stage, reason },
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(target: "explicit_types", node = decl.id, %stage, %message, "fault while rewriting");
                Outcome::Abstained {
                    stage,
                    reason: RewriteError::UnexpectedFault(message),
                }
            }
        };

        match &outcome {
            Outcome::Applied(replacement) => {
                tracing::debug!(target: "explicit_types", node = decl.id, declaration = %replacement, "applied");
            }
            Outcome::Abstained { stage, reason } => {
                tracing::debug!(target: "explicit_types", node = decl.id, %stage, %reason, "abstained");
            }
        }
        outcome
    }

    fn run(
        &self,
        decl: &LocalDeclaration,
        unit: &mut impl CompilationUnit,
        oracle: &impl TypeOracle,
        engine: &mut impl MutationEngine,
        stage: &mut Stage,
    ) -> Result<LocalDeclaration, RewriteError> {
        *stage = Stage::Filtered;
        let candidate = filter_candidate(decl)?;

        *stage = Stage::Resolving;
        let resolved = oracle
            .resolve(candidate.initializer)
            .ok_or_else(|| RewriteError::ResolutionFailure(candidate.initializer.source()))?;

        *stage = Stage::Synthesizing;
        let mut ctx = CompilationContext::from_unit(candidate.declaration_site(), &*unit);
        let explicit = self.synthesizer.synthesize(&resolved, &mut ctx)?;

        *stage = Stage::Rewriting;
        rewrite_declaration(candidate, &explicit, ctx, unit, engine)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
