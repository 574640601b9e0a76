//! Block-structured configuration syntax: attributes, labelled blocks and
//! literal expressions, plus conversion of literal expressions to and from
//! `serde_json::Value`.

pub mod ast;
pub mod escape;
pub mod lexer;
pub mod numeric;
pub mod parser;
pub mod value;
pub mod writer;

pub use ast::{Attribute, Block, Body, Expression, Pos, Structure};
pub use escape::{escape_string, unescape_string, unescape_template_markers, EscapeError};
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use numeric::{Decimal, NumericError};
pub use parser::{parse_body, parse_expression, ParseError, Parser};
pub use value::{decimal_to_value, expression_to_value, number_to_decimal, value_to_expression, EvalError};
pub use writer::{is_identifier, write_body, write_expression};
