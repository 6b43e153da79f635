// per-candidate import context
use crate::ast::NodeId;
use crate::core::types::ImportDirective;
use crate::host::CompilationUnit;

/// Import view of one candidate: the unit's declared imports followed by the
/// imports staged while synthesizing its type.
///
/// Built fresh for each candidate and dropped with it. Staged imports reach
/// the compilation unit only through the rewriter, after the replacement is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationContext {
    site: NodeId,
    package: Option<String>,
    declared: Vec<ImportDirective>,
    staged: Vec<ImportDirective>,
}

impl CompilationContext {
    pub fn new(site: NodeId, package: Option<&str>, imports: impl IntoIterator<Item = ImportDirective>) -> Self {
        let mut declared: Vec<ImportDirective> = Vec::new();
        for directive in imports {
            if !declared.contains(&directive) {
                declared.push(directive);
            }
        }
        Self {
            site,
            package: package.map(str::to_string),
            declared,
            staged: Vec::new(),
        }
    }

    pub fn from_unit(site: NodeId, unit: &impl CompilationUnit) -> Self {
        Self::new(site, unit.package(), unit.imports().iter().cloned())
    }

    pub fn site(&self) -> NodeId {
        self.site
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Declared then staged imports, in order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDirective> + '_ {
        self.declared.iter().chain(self.staged.iter())
    }

    pub fn staged(&self) -> &[ImportDirective] {
        &self.staged
    }

    pub fn has_direct_import(&self, qualified_name: &str) -> bool {
        self.imports()
            .any(|imp| !imp.is_wildcard && imp.name == qualified_name)
    }

    pub fn has_wildcard_import(&self, namespace: &str) -> bool {
        self.imports()
            .any(|imp| imp.is_wildcard && imp.name == namespace)
    }

    //returns false if the directive is already present
    pub(crate) fn stage(&mut self, directive: ImportDirective) -> bool {
        if self.imports().any(|imp| imp == &directive) {
            return false;
        }
        self.staged.push(directive);
        true
    }

    pub fn into_staged(self) -> Vec<ImportDirective> {
        self.staged
    }
}
