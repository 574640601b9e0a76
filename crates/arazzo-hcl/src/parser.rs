use crate::ast::{Attribute, Block, Body, Expression, Pos, Structure};
use crate::lexer::{tokenize, LexError, Token, TokenKind};
use crate::numeric::{Decimal, NumericError};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token at {pos}: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: Pos,
    },
    #[error("invalid number literal at {pos}: {literal}")]
    InvalidNumber { literal: String, pos: Pos },
    #[error("number literal at {pos} is out of range: {literal}")]
    NumberOutOfRange { literal: String, pos: Pos },
    #[error("nesting deeper than {limit} levels at {pos}")]
    NestingTooDeep { limit: usize, pos: Pos },
    #[error("attribute \"{key}\" redefined at {pos}")]
    DuplicateAttribute { key: String, pos: Pos },
    #[error("unary minus at {pos} must be followed by a number")]
    InvalidNegation { pos: Pos },
}

/// Deepest combined nesting of blocks, tuples, objects, calls and parentheses.
pub const MAX_NESTING: usize = 128;

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

pub fn parse_body(input: &str) -> Result<Body, ParseError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse()
}

pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    parser.skip_newlines();
    let expression = parser.parse_expression()?;
    parser.skip_newlines();
    parser.expect(TokenKind::Eof)?;
    Ok(expression)
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Body, ParseError> {
        let body = self.parse_body_until(TokenKind::Eof)?;
        self.expect(TokenKind::Eof)?;
        Ok(body)
    }

    fn parse_body_until(&mut self, end: TokenKind) -> Result<Body, ParseError> {
        let mut body = Body::new();
        let mut seen_attributes = HashSet::new();

        loop {
            self.skip_newlines();
            if self.check(end.clone()) {
                break;
            }

            let name = self.expect(TokenKind::Identifier)?;
            if self.match_kind(TokenKind::Equals) {
                let expr = self.parse_expression()?;
                if !seen_attributes.insert(name.lexeme.clone()) {
                    return Err(ParseError::DuplicateAttribute {
                        key: name.lexeme,
                        pos: name.pos,
                    });
                }
                body.structures.push(Structure::Attribute(Attribute {
                    key: name.lexeme,
                    expr,
                    pos: name.pos,
                }));
            } else {
                let mut labels = Vec::new();
                while self.check(TokenKind::String) || self.check(TokenKind::Identifier) {
                    labels.push(self.advance().lexeme);
                }
                self.expect(TokenKind::LBrace)?;
                let inner =
                    self.nested(name.pos, |parser| parser.parse_body_until(TokenKind::RBrace))?;
                self.expect(TokenKind::RBrace)?;
                body.structures.push(Structure::Block(Block {
                    identifier: name.lexeme,
                    labels,
                    body: inner,
                    pos: name.pos,
                }));
            }
            self.end_of_statement(&end)?;
        }

        Ok(body)
    }

    fn end_of_statement(&mut self, end: &TokenKind) -> Result<(), ParseError> {
        if self.match_kind(TokenKind::Newline) || self.check(end.clone()) {
            return Ok(());
        }
        let token = self.peek();
        Err(ParseError::UnexpectedToken {
            expected: "newline".to_string(),
            found: format!("{:?}", token.kind),
            pos: token.pos,
        })
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Minus => {
                let number = self.advance();
                if number.kind != TokenKind::Number {
                    return Err(ParseError::InvalidNegation { pos: token.pos });
                }
                Ok(Expression::Number(parse_number(&number)?.neg()))
            }
            TokenKind::Number => Ok(Expression::Number(parse_number(&token)?)),
            TokenKind::String => Ok(Expression::String(token.lexeme)),
            TokenKind::Template => Ok(Expression::Template(token.lexeme)),
            TokenKind::Identifier => match token.lexeme.as_str() {
                "true" => Ok(Expression::Bool(true)),
                "false" => Ok(Expression::Bool(false)),
                "null" => Ok(Expression::Null),
                _ if self.check(TokenKind::LParen) => {
                    self.nested(token.pos, |parser| parser.parse_call(token.lexeme))
                }
                _ => self.parse_traversal(token.lexeme),
            },
            TokenKind::LBracket => self.nested(token.pos, Self::parse_array),
            TokenKind::LBrace => self.nested(token.pos, Self::parse_object),
            TokenKind::LParen => self.nested(token.pos, |parser| {
                parser.skip_newlines();
                let expr = parser.parse_expression()?;
                parser.skip_newlines();
                parser.expect(TokenKind::RParen)?;
                Ok(expr)
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: format!("{:?}", token.kind),
                pos: token.pos,
            }),
        }
    }

    fn parse_traversal(&mut self, root: String) -> Result<Expression, ParseError> {
        let mut parts = vec![root];
        while self.match_kind(TokenKind::Dot) {
            let token = self.advance();
            match token.kind {
                TokenKind::Identifier | TokenKind::Number => parts.push(token.lexeme),
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "attribute name".to_string(),
                        found: format!("{:?}", token.kind),
                        pos: token.pos,
                    })
                }
            }
        }
        Ok(Expression::Traversal(parts))
    }

    fn parse_call(&mut self, name: String) -> Result<Expression, ParseError> {
        self.expect(TokenKind::LParen)?;
        let args = self.parse_sequence(TokenKind::RParen)?;
        Ok(Expression::FunctionCall { name, args })
    }

    fn parse_array(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Array(self.parse_sequence(TokenKind::RBracket)?))
    }

    fn parse_sequence(&mut self, close: TokenKind) -> Result<Vec<Expression>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            if self.match_kind(close.clone()) {
                break;
            }
            items.push(self.parse_expression()?);
            self.skip_newlines();
            if self.match_kind(TokenKind::Comma) {
                continue;
            }
            self.expect(close)?;
            break;
        }
        Ok(items)
    }

    fn parse_object(&mut self) -> Result<Expression, ParseError> {
        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            if self.match_kind(TokenKind::RBrace) {
                break;
            }

            let key = self.advance();
            if key.kind != TokenKind::Identifier && key.kind != TokenKind::String {
                return Err(ParseError::UnexpectedToken {
                    expected: "object key".to_string(),
                    found: format!("{:?}", key.kind),
                    pos: key.pos,
                });
            }
            if !self.match_kind(TokenKind::Equals) {
                self.expect(TokenKind::Colon)?;
            }
            let value = self.parse_expression()?;
            entries.push((key.lexeme, value));

            if self.match_kind(TokenKind::Comma) || self.match_kind(TokenKind::Newline) {
                continue;
            }
            self.expect(TokenKind::RBrace)?;
            break;
        }
        Ok(Expression::Object(entries))
    }

    fn nested<T>(
        &mut self,
        pos: Pos,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                pos,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{:?}", kind),
                found: format!("{:?}", token.kind),
                pos: token.pos,
            })
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }
}

fn parse_number(token: &Token) -> Result<Decimal, ParseError> {
    Decimal::parse(&token.lexeme).map_err(|err| match err {
        NumericError::OutOfRange(_) => ParseError::NumberOutOfRange {
            literal: token.lexeme.clone(),
            pos: token.pos,
        },
        _ => ParseError::InvalidNumber {
            literal: token.lexeme.clone(),
            pos: token.pos,
        },
    })
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
