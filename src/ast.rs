// host view of a local variable declaration
use std::fmt;

pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// the `var` marker
    Inferred,
    Explicit(String),
}

impl DeclaredType {
    pub fn is_inferred(&self) -> bool {
        matches!(self, DeclaredType::Inferred)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Inferred => f.write_str("var"),
            DeclaredType::Explicit(text) => f.write_str(text),
        }
    }
}

/// `new T<..>(..) { .. }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreation {
    pub type_name: String,
    /// `None` when no type-argument list is written, `Some(vec![])` for `<>`.
    pub type_arguments: Option<Vec<String>>,
    pub arguments: Vec<String>,
    pub anonymous_body: Option<String>,
}

impl ObjectCreation {
    pub fn uses_diamond(&self) -> bool {
        self.type_arguments.as_ref().is_some_and(Vec::is_empty)
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous_body.is_some()
    }
}

impl fmt::Display for ObjectCreation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new {}", self.type_name)?;
        if let Some(args) = &self.type_arguments {
            write!(f, "<{}>", args.join(", "))?;
        }
        write!(f, "({})", self.arguments.join(", "))?;
        if let Some(body) = &self.anonymous_body {
            write!(f, " {{ {body} }}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Literal(String),
    Lambda(String),
    MethodReference(String),
    ObjectCreation(ObjectCreation),
    Other(String),
}

impl Expression {
    /// Source text, as the oracle and the rewritten declaration see it.
    pub fn source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(text)
            | Expression::Lambda(text)
            | Expression::MethodReference(text)
            | Expression::Other(text) => f.write_str(text),
            Expression::ObjectCreation(creation) => write!(f, "{creation}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarator {
    pub name: String,
    pub declared_type: DeclaredType,
    pub initializer: Option<Expression>,
}

impl VariableDeclarator {
    pub fn new(name: impl Into<String>, declared_type: DeclaredType, initializer: Option<Expression>) -> Self {
        Self {
            name: name.into(),
            declared_type,
            initializer,
        }
    }

    pub fn inferred(name: impl Into<String>, initializer: Expression) -> Self {
        Self::new(name, DeclaredType::Inferred, Some(initializer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDeclaration {
    pub id: NodeId,
    pub modifiers: Vec<String>,
    pub annotations: Vec<String>,
    pub variables: Vec<VariableDeclarator>,
}

impl LocalDeclaration {
    pub fn new(id: NodeId, variables: Vec<VariableDeclarator>) -> Self {
        Self {
            id,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            variables,
        }
    }

    /// `var name = initializer`
    pub fn inferred(id: NodeId, name: impl Into<String>, initializer: Expression) -> Self {
        Self::new(id, vec![VariableDeclarator::inferred(name, initializer)])
    }
}

impl fmt::Display for LocalDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        for modifier in &self.modifiers {
            write!(f, "{modifier} ")?;
        }
        // all declarators of one declaration share the leading type
        if let Some(first) = self.variables.first() {
            write!(f, "{} ", first.declared_type)?;
        }
        for (i, var) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&var.name)?;
            if let Some(init) = &var.initializer {
                write!(f, " = {init}")?;
            }
        }
        Ok(())
    }
}
