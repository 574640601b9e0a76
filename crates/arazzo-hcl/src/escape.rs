//! Quoted-string escaping.
//!
//! Both directions make a single left-to-right pass, so a backslash that is
//! already part of the content is escaped exactly once and decoded exactly once.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EscapeError {
    #[error("invalid escape sequence '\\{ch}' at offset {offset}")]
    InvalidEscape { ch: char, offset: usize },
    #[error("invalid unicode escape at offset {offset}")]
    InvalidUnicode { offset: usize },
    #[error("dangling backslash at end of string")]
    DanglingBackslash,
}

pub fn escape_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(ch);
                out.push(ch);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Collapses `$${` and `%%{` back to literal markers, leaving backslashes
/// alone. Heredoc bodies only go through this step.
pub fn unescape_template_markers(input: &str) -> String {
    input.replace("$${", "${").replace("%%{", "%{")
}

pub fn unescape_string(input: &str) -> Result<String, EscapeError> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        if (ch == '$' || ch == '%')
            && chars.get(index + 1) == Some(&ch)
            && chars.get(index + 2) == Some(&'{')
        {
            out.push(ch);
            out.push('{');
            index += 3;
            continue;
        }
        if ch != '\\' {
            out.push(ch);
            index += 1;
            continue;
        }

        let Some(&escaped) = chars.get(index + 1) else {
            return Err(EscapeError::DanglingBackslash);
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'u' | 'U' => {
                let width = if escaped == 'u' { 4 } else { 8 };
                let digits: String = chars.iter().skip(index + 2).take(width).collect();
                if digits.chars().count() != width {
                    return Err(EscapeError::InvalidUnicode { offset: index });
                }
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(EscapeError::InvalidUnicode { offset: index })?;
                out.push(decoded);
                index += 2 + width;
                continue;
            }
            other => {
                return Err(EscapeError::InvalidEscape {
                    ch: other,
                    offset: index,
                })
            }
        }
        index += 2;
    }
    Ok(out)
}

/// Returns true when the quoted text (as written, still escaped) contains an
/// interpolation or directive opener.
pub fn contains_template_markers(raw: &str) -> bool {
    let chars: Vec<char> = raw.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            ch @ ('$' | '%') => {
                if chars.get(index + 1) == Some(&ch) && chars.get(index + 2) == Some(&'{') {
                    index += 3;
                } else if chars.get(index + 1) == Some(&'{') {
                    return true;
                } else {
                    index += 1;
                }
            }
            _ => index += 1,
        }
    }
    false
}

#[cfg(test)]
#[path = "escape_test.rs"]
mod tests;
