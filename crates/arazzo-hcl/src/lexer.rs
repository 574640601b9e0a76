use crate::ast::Pos;
use crate::escape::{
    contains_template_markers, unescape_string, unescape_template_markers, EscapeError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    Template,
    Newline,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Equals,
    Colon,
    Dot,
    Minus,
    Eof,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: Pos },
    #[error("unterminated string at {pos}")]
    UnterminatedString { pos: Pos },
    #[error("unterminated comment at {pos}")]
    UnterminatedComment { pos: Pos },
    #[error("unterminated heredoc at {pos}")]
    UnterminatedHeredoc { pos: Pos },
    #[error("invalid string at {pos}: {source}")]
    InvalidString { pos: Pos, source: EscapeError },
}

struct Cursor {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
        }
    }

    fn pos(&self) -> Pos {
        Pos::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, ch)| self.peek_at(offset) == Some(ch))
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(input);
    let mut tokens = Vec::new();

    while let Some(ch) = cursor.peek() {
        let pos = cursor.pos();
        if ch == '\n' {
            cursor.bump();
            tokens.push(token(TokenKind::Newline, "\n", pos));
            continue;
        }
        if ch.is_whitespace() {
            cursor.bump();
            continue;
        }
        if ch == '#' || cursor.starts_with("//") {
            skip_line_comment(&mut cursor);
            continue;
        }
        if cursor.starts_with("/*") {
            skip_block_comment(&mut cursor, pos)?;
            continue;
        }
        if cursor.starts_with("<<") {
            tokens.push(consume_heredoc(&mut cursor, pos)?);
            continue;
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            tokens.push(consume_identifier(&mut cursor, pos));
            continue;
        }
        if ch.is_ascii_digit() {
            tokens.push(consume_number(&mut cursor, pos));
            continue;
        }
        if ch == '"' {
            tokens.push(consume_string(&mut cursor, pos)?);
            continue;
        }

        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            _ => return Err(LexError::UnexpectedCharacter { ch, pos }),
        };
        cursor.bump();
        tokens.push(token(kind, &ch.to_string(), pos));
    }

    tokens.push(token(TokenKind::Eof, "", cursor.pos()));
    Ok(tokens)
}

fn token(kind: TokenKind, lexeme: &str, pos: Pos) -> Token {
    Token {
        kind,
        lexeme: lexeme.to_string(),
        pos,
    }
}

fn skip_line_comment(cursor: &mut Cursor) {
    // The newline itself still terminates the statement.
    while let Some(ch) = cursor.peek() {
        if ch == '\n' {
            break;
        }
        cursor.bump();
    }
}

fn skip_block_comment(cursor: &mut Cursor, pos: Pos) -> Result<(), LexError> {
    cursor.bump();
    cursor.bump();
    while cursor.peek().is_some() {
        if cursor.starts_with("*/") {
            cursor.bump();
            cursor.bump();
            return Ok(());
        }
        cursor.bump();
    }
    Err(LexError::UnterminatedComment { pos })
}

fn consume_identifier(cursor: &mut Cursor, pos: Pos) -> Token {
    let mut lexeme = String::new();
    while let Some(ch) = cursor.peek() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            lexeme.push(ch);
            cursor.bump();
            continue;
        }
        break;
    }
    Token {
        kind: TokenKind::Identifier,
        lexeme,
        pos,
    }
}

fn consume_number(cursor: &mut Cursor, pos: Pos) -> Token {
    let mut lexeme = String::new();
    consume_digits(cursor, &mut lexeme);

    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|ch| ch.is_ascii_digit()) {
        lexeme.push('.');
        cursor.bump();
        consume_digits(cursor, &mut lexeme);
    }

    if matches!(cursor.peek(), Some('e' | 'E')) {
        let signed = matches!(cursor.peek_at(1), Some('+' | '-'));
        let digit_offset = if signed { 2 } else { 1 };
        if cursor.peek_at(digit_offset).is_some_and(|ch| ch.is_ascii_digit()) {
            for _ in 0..digit_offset {
                if let Some(ch) = cursor.bump() {
                    lexeme.push(ch);
                }
            }
            consume_digits(cursor, &mut lexeme);
        }
    }

    Token {
        kind: TokenKind::Number,
        lexeme,
        pos,
    }
}

fn consume_digits(cursor: &mut Cursor, out: &mut String) {
    while let Some(ch) = cursor.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        out.push(ch);
        cursor.bump();
    }
}

fn consume_string(cursor: &mut Cursor, pos: Pos) -> Result<Token, LexError> {
    cursor.bump();
    let mut raw = String::new();
    let mut terminated = false;

    while let Some(ch) = cursor.peek() {
        match ch {
            '"' => {
                cursor.bump();
                terminated = true;
                break;
            }
            '\n' => break,
            '\\' => {
                raw.push(ch);
                cursor.bump();
                match cursor.peek() {
                    Some(next) if next != '\n' => {
                        raw.push(next);
                        cursor.bump();
                    }
                    _ => break,
                }
            }
            _ => {
                raw.push(ch);
                cursor.bump();
            }
        }
    }

    if !terminated {
        return Err(LexError::UnterminatedString { pos });
    }

    if contains_template_markers(&raw) {
        return Ok(Token {
            kind: TokenKind::Template,
            lexeme: raw,
            pos,
        });
    }

    let lexeme = unescape_string(&raw).map_err(|source| LexError::InvalidString { pos, source })?;
    Ok(Token {
        kind: TokenKind::String,
        lexeme,
        pos,
    })
}

fn consume_heredoc(cursor: &mut Cursor, pos: Pos) -> Result<Token, LexError> {
    cursor.bump();
    cursor.bump();
    let indented = cursor.peek() == Some('-');
    if indented {
        cursor.bump();
    }

    let mut marker = String::new();
    while let Some(ch) = cursor.peek() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            marker.push(ch);
            cursor.bump();
            continue;
        }
        break;
    }
    if marker.is_empty() || cursor.peek() != Some('\n') {
        return Err(LexError::UnexpectedCharacter { ch: '<', pos });
    }
    cursor.bump();

    let mut lines: Vec<String> = Vec::new();
    loop {
        if cursor.peek().is_none() {
            return Err(LexError::UnterminatedHeredoc { pos });
        }
        let mut line = String::new();
        while let Some(ch) = cursor.peek() {
            if ch == '\n' {
                break;
            }
            line.push(ch);
            cursor.bump();
        }
        if line.trim() == marker {
            break;
        }
        if cursor.bump().is_none() {
            return Err(LexError::UnterminatedHeredoc { pos });
        }
        lines.push(line);
    }

    if indented {
        let strip = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);
        for line in &mut lines {
            *line = line.chars().skip(strip).collect();
        }
    }

    let mut lexeme = String::new();
    for line in lines {
        lexeme.push_str(&line);
        lexeme.push('\n');
    }
    if contains_template_markers(&lexeme) {
        return Ok(Token {
            kind: TokenKind::Template,
            lexeme,
            pos,
        });
    }
    Ok(Token {
        kind: TokenKind::String,
        lexeme: unescape_template_markers(&lexeme),
        pos,
    })
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
