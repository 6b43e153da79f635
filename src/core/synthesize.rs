// SemanticType -> TypeExpression
use crate::core::context::CompilationContext;
use crate::core::disambiguate::can_use_short;
use crate::core::error::SynthesisFailure;
use crate::core::imports::ensure_import;
use crate::core::types::{
    NAMESPACE_SEPARATOR, Rendering, SemanticType, TypeExpression, has_nested_type_marker,
    is_primitive, short_name,
};

pub const DEFAULT_MAX_DEPTH: usize = 32;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Where a type appears; decides which variants are legal there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Declaration,
    ArrayComponent,
    TypeArgument,
    WildcardBound,
}

/// Renders resolved types into type syntax, picking short or qualified
/// names per reference and staging the imports short names need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthesizer {
    max_depth: usize,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Synthesizer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the explicit type for a declaration of type `ty`.
    ///
    /// Imports needed by short names are staged in `ctx`; on failure the
    /// caller drops the context and nothing leaks out.
    pub fn synthesize(
        &self,
        ty: &SemanticType,
        ctx: &mut CompilationContext,
    ) -> Result<TypeExpression, SynthesisFailure> {
        self.synthesize_at(ty, ctx, Position::Declaration, 0)
    }

    fn synthesize_at(
        &self,
        ty: &SemanticType,
        ctx: &mut CompilationContext,
        position: Position,
        depth: usize,
    ) -> Result<TypeExpression, SynthesisFailure> {
        if depth > self.max_depth {
            return Err(SynthesisFailure::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        match ty {
            SemanticType::Primitive(name) => {
                if !is_primitive(name) {
                    return Err(SynthesisFailure::UnknownPrimitive(name.clone()));
                }
                if matches!(position, Position::TypeArgument | Position::WildcardBound) {
                    return Err(SynthesisFailure::PrimitiveArgument(name.clone()));
                }
                Ok(TypeExpression::Primitive(name.clone()))
            }
            SemanticType::Array(component) => {
                let component = self.synthesize_at(component, ctx, Position::ArrayComponent, depth + 1)?;
                Ok(TypeExpression::Array(Box::new(component)))
            }
            SemanticType::Wildcard(bound) => {
                if position != Position::TypeArgument {
                    return Err(SynthesisFailure::MisplacedWildcard);
                }
                let bound = self.synthesize_at(bound, ctx, Position::WildcardBound, depth + 1)?;
                Ok(TypeExpression::Wildcard(Box::new(bound)))
            }
            SemanticType::TypeVariable(name) => {
                if !is_identifier(name) {
                    return Err(SynthesisFailure::Malformed(name.clone()));
                }
                Ok(TypeExpression::TypeVariable(name.clone()))
            }
            SemanticType::Other(raw) => {
                if !is_type_syntax(raw, self.max_depth.saturating_sub(depth)) {
                    return Err(SynthesisFailure::Malformed(raw.clone()));
                }
                Ok(TypeExpression::Other(raw.trim().to_string()))
            }
            SemanticType::Reference {
                qualified_name,
                type_arguments,
            } => {
                if !is_qualified_name(qualified_name) {
                    return Err(SynthesisFailure::Malformed(qualified_name.clone()));
                }

                let rendering = choose_rendering(qualified_name, ctx);
                tracing::trace!(
                    target: "explicit_types",
                    site = ctx.site(),
                    qualified = %qualified_name,
                    rendering = %rendering,
                    "chose rendering"
                );

                let arguments = type_arguments
                    .iter()
                    .map(|arg| self.synthesize_at(arg, ctx, Position::TypeArgument, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(TypeExpression::Reference {
                    qualified_name: qualified_name.clone(),
                    rendering,
                    arguments,
                })
            }
        }
    }
}

/// Rendering for one reference. Stages an import when a short name is
/// adopted that is not yet in scope.
pub fn choose_rendering(qualified_name: &str, ctx: &mut CompilationContext) -> Rendering {
    //compiler-synthesized nesting: ownership of the boundary is unknown
    if has_nested_type_marker(qualified_name) {
        return Rendering::Qualified(qualified_name.to_string());
    }

    // longest directly imported enclosing type wins: `Map.Entry`
    let mut separators = qualified_name.rmatch_indices(NAMESPACE_SEPARATOR);
    if let Some((idx, _)) = separators.find(|&(idx, _)| ctx.has_direct_import(&qualified_name[..idx])) {
        return Rendering::NestedQualified {
            outer: short_name(&qualified_name[..idx]).to_string(),
            inner: qualified_name[idx + 1..].to_string(),
        };
    }

    let short = short_name(qualified_name);
    if can_use_short(short, qualified_name, ctx) {
        ensure_import(qualified_name, ctx);
        Rendering::Short(short.to_string())
    } else {
        Rendering::Qualified(qualified_name.to_string())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !KEYWORDS.contains(&name)
}

fn is_qualified_name(name: &str) -> bool {
    name.split(NAMESPACE_SEPARATOR).all(is_identifier)
}

/// Whether raw text parses as a type: a primitive or a dotted class type,
/// each segment optionally parameterized, followed by `[]` pairs. Wildcards
/// appear only as type arguments. Intersections and anything statement-like
/// are rejected, as is nesting deeper than `max_depth`.
fn is_type_syntax(raw: &str, max_depth: usize) -> bool {
    let Some(tokens) = tokenize(raw) else {
        return false;
    };
    let mut parser = TypeParser {
        tokens,
        pos: 0,
        max_depth,
    };
    parser.parse_type(0).is_some() && parser.pos == parser.tokens.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Punct(char),
}

fn tokenize(raw: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    for (i, c) in raw.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            if word_start.is_none() {
                word_start = Some(i);
            }
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(Token::Word(&raw[start..i]));
        }
        match c {
            '<' | '>' | '[' | ']' | '.' | ',' | '?' => tokens.push(Token::Punct(c)),
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&raw[start..]));
    }
    Some(tokens)
}

struct TypeParser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    max_depth: usize,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, punct: char) -> bool {
        if self.peek() == Some(Token::Punct(punct)) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn word(&mut self) -> Option<&'a str> {
        match self.peek()? {
            Token::Word(word) => {
                self.pos += 1;
                Some(word)
            }
            Token::Punct(_) => None,
        }
    }

    /// Parses one type; `Some(true)` when it was a primitive without dimensions.
    fn parse_type(&mut self, depth: usize) -> Option<bool> {
        if depth > self.max_depth {
            return None;
        }

        let head = self.word()?;
        let mut bare_primitive = is_primitive(head);
        if !bare_primitive {
            if !is_identifier(head) {
                return None;
            }
            self.parse_arguments(depth)?;
            while self.eat('.') {
                if !is_identifier(self.word()?) {
                    return None;
                }
                self.parse_arguments(depth)?;
            }
        }

        while self.eat('[') {
            if !self.eat(']') {
                return None;
            }
            bare_primitive = false;
        }
        Some(bare_primitive)
    }

    fn parse_arguments(&mut self, depth: usize) -> Option<()> {
        if !self.eat('<') {
            return Some(());
        }
        loop {
            self.parse_argument(depth + 1)?;
            if self.eat('>') {
                return Some(());
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    fn parse_argument(&mut self, depth: usize) -> Option<()> {
        if self.eat('?') {
            if matches!(self.peek(), Some(Token::Word("extends" | "super"))) {
                self.pos += 1;
                return self.parse_reference_type(depth + 1);
            }
            return Some(());
        }
        self.parse_reference_type(depth)
    }

    //primitives are only legal as arguments with dimensions
    fn parse_reference_type(&mut self, depth: usize) -> Option<()> {
        if self.parse_type(depth)? { None } else { Some(()) }
    }
}
