use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field inside a document, rendered as `workflows[0].steps[1].stepId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<FieldPathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<FieldPathSegment>) -> Self {
        Self { segments }
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(FieldPathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(FieldPathSegment::Index(index));
    }

    pub fn with_key(&self, key: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.push_key(key);
        out
    }

    pub fn with_index(&self, index: usize) -> Self {
        let mut out = self.clone();
        out.push_index(index);
        out
    }

    pub fn segments(&self) -> &[FieldPathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(FieldPathSegment::Key(key)) => Some(key.as_str()),
            _ => None,
        }
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

impl From<&str> for FieldPath {
    fn from(key: &str) -> Self {
        Self::from_segments(vec![FieldPathSegment::Key(key.to_string())])
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldPathParseError {
    #[error("field path must start with '$' or an identifier")]
    InvalidStart,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("invalid index segment")]
    InvalidIndex,
    #[error("expected '.' before key segment")]
    MissingDot,
    #[error("invalid key segment")]
    InvalidKey,
    #[error("unterminated quoted key")]
    UnterminatedKey,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(FieldPathParseError::InvalidStart);
        }

        let chars: Vec<char> = input.chars().collect();
        let mut position = 0;
        if chars[0] == '$' {
            position += 1;
            if position == chars.len() {
                return Ok(FieldPath::root());
            }
            if chars[position] != '.' && chars[position] != '[' {
                return Err(FieldPathParseError::UnexpectedChar(chars[position]));
            }
        }

        let mut segments = Vec::new();
        let mut expect_key_or_index = position == 0;

        while position < chars.len() {
            match chars[position] {
                '.' => {
                    position += 1;
                    if position >= chars.len() {
                        return Err(FieldPathParseError::UnexpectedEnd);
                    }
                    let key = consume_plain_key(&chars, &mut position);
                    if key.is_empty() {
                        return Err(FieldPathParseError::InvalidKey);
                    }
                    segments.push(FieldPathSegment::Key(key));
                    expect_key_or_index = false;
                }
                '[' => {
                    position += 1;
                    if position < chars.len() && chars[position] == '"' {
                        let key = consume_quoted_key(&chars, &mut position)?;
                        if position >= chars.len() || chars[position] != ']' {
                            return Err(FieldPathParseError::InvalidKey);
                        }
                        position += 1;
                        segments.push(FieldPathSegment::Key(key));
                        expect_key_or_index = false;
                        continue;
                    }
                    let start = position;
                    while position < chars.len() && chars[position].is_ascii_digit() {
                        position += 1;
                    }
                    if start == position || position >= chars.len() || chars[position] != ']' {
                        return Err(FieldPathParseError::InvalidIndex);
                    }
                    let index = chars[start..position]
                        .iter()
                        .collect::<String>()
                        .parse::<usize>()
                        .map_err(|_| FieldPathParseError::InvalidIndex)?;
                    position += 1;
                    segments.push(FieldPathSegment::Index(index));
                    expect_key_or_index = false;
                }
                _ => {
                    if !expect_key_or_index {
                        return Err(FieldPathParseError::MissingDot);
                    }
                    let key = consume_plain_key(&chars, &mut position);
                    if key.is_empty() {
                        return Err(FieldPathParseError::InvalidStart);
                    }
                    segments.push(FieldPathSegment::Key(key));
                    expect_key_or_index = false;
                }
            }
        }

        Ok(FieldPath::from_segments(segments))
    }
}

fn is_plain_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_plain_key_char)
}

fn consume_plain_key(chars: &[char], position: &mut usize) -> String {
    let start = *position;
    while *position < chars.len() && is_plain_key_char(chars[*position]) {
        *position += 1;
    }
    chars[start..*position].iter().collect()
}

fn consume_quoted_key(chars: &[char], position: &mut usize) -> Result<String, FieldPathParseError> {
    // Opening quote.
    *position += 1;
    let mut out = String::new();
    while *position < chars.len() {
        match chars[*position] {
            '"' => {
                *position += 1;
                return Ok(out);
            }
            '\\' => {
                *position += 1;
                let Some(escaped) = chars.get(*position) else {
                    return Err(FieldPathParseError::UnterminatedKey);
                };
                out.push(*escaped);
                *position += 1;
            }
            other => {
                out.push(other);
                *position += 1;
            }
        }
    }
    Err(FieldPathParseError::UnterminatedKey)
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                FieldPathSegment::Key(key) if is_plain_key(key) => {
                    if position > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                FieldPathSegment::Key(key) => {
                    let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
                    write!(f, "[\"{escaped}\"]")?;
                }
                FieldPathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "field_path_test.rs"]
mod tests;
