/*
Seams to the hosting engine:

    TypeOracle       resolve an initializer to a SemanticType (may fail)

    MutationEngine   atomic, identity-keyed node replacement

    CompilationUnit  package + ordered import directives, add_import

The in-memory implementations back embedding hosts and the tests.
*/
use std::collections::{BTreeMap, HashMap};

use crate::ast::{Expression, LocalDeclaration, NodeId};
use crate::core::types::{ImportDirective, SemanticType};

pub trait TypeOracle {
    fn resolve(&self, expression: &Expression) -> Option<SemanticType>;
}

pub trait MutationEngine {
    /// Replace the node identified by `old` with `replacement`. Returns false
    /// if the engine declines (node gone, structural conflict).
    fn replace(&mut self, old: NodeId, replacement: LocalDeclaration) -> bool;
}

pub trait CompilationUnit {
    fn package(&self) -> Option<&str>;
    /// Import directives in declared order.
    fn imports(&self) -> &[ImportDirective];
    fn add_import(&mut self, qualified_name: &str);
}

/// Oracle answering from a table keyed by initializer source text.
#[derive(Debug, Clone, Default)]
pub struct MapOracle {
    types: HashMap<String, SemanticType>,
}

impl MapOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, ty: SemanticType) -> Option<SemanticType> {
        self.types.insert(source.into(), ty)
    }

    pub fn with(mut self, source: impl Into<String>, ty: SemanticType) -> Self {
        self.insert(source, ty);
        self
    }
}

impl TypeOracle for MapOracle {
    fn resolve(&self, expression: &Expression) -> Option<SemanticType> {
        self.types.get(&expression.source()).cloned()
    }
}

/// Live declarations keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    nodes: BTreeMap<NodeId, LocalDeclaration>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, decl: LocalDeclaration) -> Option<LocalDeclaration> {
        self.nodes.insert(decl.id, decl)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<LocalDeclaration> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&LocalDeclaration> {
        self.nodes.get(&id)
    }
}

impl MutationEngine for MemoryEngine {
    fn replace(&mut self, old: NodeId, replacement: LocalDeclaration) -> bool {
        match self.nodes.get_mut(&old) {
            Some(slot) if replacement.id == old => {
                *slot = replacement;
                true
            }
            _ => false,
        }
    }
}

/// Package and imports of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    package: Option<String>,
    imports: Vec<ImportDirective>,
}

impl SourceUnit {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.map(str::to_string),
            imports: Vec::new(),
        }
    }

    pub fn with_import(mut self, directive: ImportDirective) -> Self {
        self.push_import(directive);
        self
    }

    //set semantics on (name, is_wildcard)
    pub fn push_import(&mut self, directive: ImportDirective) {
        if !self.imports.contains(&directive) {
            self.imports.push(directive);
        }
    }
}

impl CompilationUnit for SourceUnit {
    fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    fn imports(&self) -> &[ImportDirective] {
        &self.imports
    }

    fn add_import(&mut self, qualified_name: &str) {
        self.push_import(ImportDirective::single(qualified_name));
    }
}
