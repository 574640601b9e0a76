use crate::numeric::Decimal;
use std::fmt::{Display, Formatter};

/// 1-based line and column of a token in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl Pos {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub structures: Vec<Structure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Attribute(Attribute),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub expr: Expression,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub identifier: String,
    pub labels: Vec<String>,
    pub body: Body,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Null,
    Bool(bool),
    Number(Decimal),
    String(String),
    /// Quoted string containing `${` or `%{`; holds the text as written.
    Template(String),
    Array(Vec<Expression>),
    Object(Vec<(String, Expression)>),
    Traversal(Vec<String>),
    FunctionCall { name: String, args: Vec<Expression> },
}

impl Expression {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Expression::Array(_) | Expression::Object(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Null => "null",
            Expression::Bool(_) => "bool",
            Expression::Number(_) => "number",
            Expression::String(_) | Expression::Template(_) => "string",
            Expression::Array(_) => "tuple",
            Expression::Object(_) => "object",
            Expression::Traversal(_) => "variable",
            Expression::FunctionCall { .. } => "function call",
        }
    }
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.structures.iter().filter_map(|structure| match structure {
            Structure::Attribute(attribute) => Some(attribute),
            Structure::Block(_) => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.structures.iter().filter_map(|structure| match structure {
            Structure::Block(block) => Some(block),
            Structure::Attribute(_) => None,
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes().find(|attribute| attribute.key == key)
    }

    pub fn push_attribute(&mut self, key: impl Into<String>, expr: Expression) {
        self.structures.push(Structure::Attribute(Attribute {
            key: key.into(),
            expr,
            pos: Pos::default(),
        }));
    }

    pub fn push_block(&mut self, block: Block) {
        self.structures.push(Structure::Block(block));
    }
}

impl Block {
    pub fn new(identifier: impl Into<String>, labels: Vec<String>, body: Body) -> Self {
        Self {
            identifier: identifier.into(),
            labels,
            body,
            pos: Pos::default(),
        }
    }
}
