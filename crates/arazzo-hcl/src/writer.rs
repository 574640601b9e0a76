use crate::ast::{Body, Expression, Structure};
use crate::escape::escape_string;

const INDENT: &str = "  ";
const KEYWORDS: [&str; 3] = ["true", "false", "null"];

/// Identifier as accepted by the lexer: ASCII letter or `_`, then letters,
/// digits, `_` or `-`.
pub fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Renders a body as configuration text. Attribute keys and block identifiers
/// are written verbatim and must satisfy [`is_identifier`].
pub fn write_body(body: &Body) -> String {
    let mut out = String::new();
    write_structures(&mut out, body, 0);
    out
}

pub fn write_expression(expr: &Expression) -> String {
    let mut out = String::new();
    format_expression(&mut out, expr, 0);
    out
}

fn write_structures(out: &mut String, body: &Body, depth: usize) {
    let indent = INDENT.repeat(depth);
    for (position, structure) in body.structures.iter().enumerate() {
        match structure {
            Structure::Attribute(attribute) => {
                out.push_str(&indent);
                out.push_str(&attribute.key);
                out.push_str(" = ");
                format_expression(out, &attribute.expr, depth);
                out.push('\n');
            }
            Structure::Block(block) => {
                if position > 0 {
                    out.push('\n');
                }
                out.push_str(&indent);
                out.push_str(&block.identifier);
                for label in &block.labels {
                    out.push_str(" \"");
                    out.push_str(&escape_string(label));
                    out.push('"');
                }
                out.push_str(" {\n");
                write_structures(out, &block.body, depth + 1);
                out.push_str(&indent);
                out.push_str("}\n");
            }
        }
    }
}

fn format_expression(out: &mut String, expr: &Expression, depth: usize) {
    match expr {
        Expression::Null => out.push_str("null"),
        Expression::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        Expression::Number(value) => out.push_str(&value.to_string()),
        Expression::String(value) => {
            out.push('"');
            out.push_str(&escape_string(value));
            out.push('"');
        }
        Expression::Template(raw) => {
            out.push('"');
            out.push_str(raw);
            out.push('"');
        }
        Expression::Traversal(parts) => out.push_str(&parts.join(".")),
        Expression::FunctionCall { name, args } => {
            out.push_str(name);
            out.push('(');
            for (position, arg) in args.iter().enumerate() {
                if position > 0 {
                    out.push_str(", ");
                }
                format_expression(out, arg, depth);
            }
            out.push(')');
        }
        Expression::Array(items) if items.is_empty() => out.push_str("[]"),
        Expression::Array(items) if items.iter().all(Expression::is_scalar) => {
            out.push('[');
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    out.push_str(", ");
                }
                format_expression(out, item, depth);
            }
            out.push(']');
        }
        Expression::Array(items) => {
            let inner = INDENT.repeat(depth + 1);
            out.push_str("[\n");
            for item in items {
                out.push_str(&inner);
                format_expression(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
        Expression::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Expression::Object(entries) => {
            let inner = INDENT.repeat(depth + 1);
            out.push_str("{\n");
            for (key, value) in entries {
                out.push_str(&inner);
                out.push_str(&object_key(key));
                out.push_str(" = ");
                format_expression(out, value, depth + 1);
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

fn object_key(key: &str) -> String {
    if is_identifier(key) && !KEYWORDS.contains(&key) {
        key.to_string()
    } else {
        format!("\"{}\"", escape_string(key))
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
