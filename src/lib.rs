//! Rewrites `var` local declarations into declarations with an explicit,
//! fully elaborated type, choosing short or qualified type names so the
//! result still compiles and extending the unit's imports to match.

pub mod ast;
pub mod config;
pub mod core;
pub mod host;
pub mod rule;

pub use crate::config::{ConfigError, RuleConfig, RuleMetadata};
pub use crate::core::error::{Ineligible, RewriteError, SynthesisFailure, UnsupportedInitializer};
pub use crate::core::types::{ImportDirective, SemanticType, TypeExpression};
pub use crate::rule::{Outcome, Stage, UseExplicitTypes};
