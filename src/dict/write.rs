use std::fmt::{self, Write as _};

use super::{Dict, Value};

const INDENT: &str = "    ";
const KEY_WIDTH: usize = 16;
const FOOTER: &str =
    "// ************************************************************************* //";

/// The `FoamFile` header that precedes every dictionary on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictHeader {
    /// OpenFOAM class name, such as `dictionary` or `volScalarField`.
    pub class: String,

    /// Directory of the file relative to the case root.
    pub location: Option<String>,

    /// File name of the dictionary.
    pub object: String,
}

impl DictHeader {
    /// Renders this header followed by `body` as a complete file.
    #[must_use]
    pub fn render_file(&self, body: &Dict) -> String {
        let mut header = Dict::new()
            .with("version", Value::word("2.0"))
            .with("format", "ascii")
            .with("class", self.class.as_str());
        if let Some(location) = &self.location {
            header.insert("location", Value::string(location.as_str()));
        }
        header.insert("object", self.object.as_str());

        let mut out = String::new();
        write_entry(&mut out, "FoamFile", &Value::Dict(header), 0);
        out.push('\n');
        write_entries(&mut out, body, 0);
        out.push('\n');
        out.push_str(FOOTER);
        out.push('\n');
        out
    }
}

/// Renders the value as it appears after a key, without the trailing `;`.
///
/// Dictionaries and lists containing dictionaries span several lines.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_block(self) {
            let mut out = String::new();
            write_item(&mut out, self, 0);
            f.write_str(out.trim_end())
        } else {
            f.write_str(&inline(self))
        }
    }
}

pub(super) fn write_entries(out: &mut String, dict: &Dict, depth: usize) {
    for (key, value) in dict.iter() {
        write_entry(out, key, value, depth);
    }
}

fn write_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);

    if key.starts_with('#') {
        let _ = writeln!(out, "{indent}{key} {}", inline(value));
        return;
    }

    match value {
        Value::Dict(dict) => {
            let _ = writeln!(out, "{indent}{key}");
            write_braced(out, dict, depth);
        }
        value if is_block(value) => {
            let _ = writeln!(out, "{indent}{key}");
            write_item(out, value, depth);
            terminate(out);
        }
        value => {
            let text = inline(value);
            if text.is_empty() {
                let _ = writeln!(out, "{indent}{key};");
            } else if key.len() < KEY_WIDTH {
                let _ = writeln!(out, "{indent}{key:<width$}{text};", width = KEY_WIDTH);
            } else {
                let _ = writeln!(out, "{indent}{key} {text};");
            }
        }
    }
}

fn write_braced(out: &mut String, dict: &Dict, depth: usize) {
    let indent = INDENT.repeat(depth);
    let _ = writeln!(out, "{indent}{{");
    write_entries(out, dict, depth + 1);
    let _ = writeln!(out, "{indent}}}");
}

/// Writes a value that spans several lines, starting on a fresh line.
fn write_item(out: &mut String, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Dict(dict) => write_braced(out, dict, depth),
        Value::List(items) if is_block(value) => {
            let _ = writeln!(out, "{indent}(");
            for item in items {
                write_item(out, item, depth + 1);
            }
            let _ = writeln!(out, "{indent})");
        }
        Value::Tuple(items) if is_block(value) => {
            let mut pending = Vec::new();
            for item in items {
                if is_block(item) {
                    if !pending.is_empty() {
                        let _ = writeln!(out, "{indent}{}", pending.join(" "));
                        pending.clear();
                    }
                    write_item(out, item, depth);
                } else {
                    pending.push(inline(item));
                }
            }
            if !pending.is_empty() {
                let _ = writeln!(out, "{indent}{}", pending.join(" "));
            }
        }
        value => {
            let _ = writeln!(out, "{indent}{}", inline(value));
        }
    }
}

/// Replaces the final newline with the `;` that closes a non-dictionary entry.
fn terminate(out: &mut String) {
    if out.ends_with('\n') {
        out.pop();
    }
    out.push_str(";\n");
}

fn is_block(value: &Value) -> bool {
    match value {
        Value::Dict(_) => true,
        Value::List(items) | Value::Tuple(items) => items.iter().any(is_block),
        _ => false,
    }
}

/// Renders a value on a single line. Only valid when `is_block` is false.
fn inline(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => format_float(*x),
        Value::Word(text) => text.trim().to_string(),
        Value::Str(text) => quote(text),
        Value::List(items) => {
            let inner: Vec<_> = items.iter().map(inline).collect();
            format!("({})", inner.join(" "))
        }
        Value::Tuple(items) => {
            let inner: Vec<_> = items.iter().map(inline).collect();
            inner.join(" ")
        }
        Value::Dimension(dimension) => dimension.to_string(),
        Value::Dict(dict) => {
            let mut out = String::new();
            write_braced(&mut out, dict, 0);
            out
        }
    }
}

/// Wraps `text` in double quotes.
///
/// `"` is always escaped. `\` is escaped only where the parser would otherwise
/// read it as an escape: before `\`, before `"`, or at the end. Other
/// backslashes, as in the regex key `"U\.*"`, are written unchanged.
pub(super) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let escape = match c {
            '"' => true,
            '\\' => matches!(chars.peek(), None | Some(&('\\' | '"'))),
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Formats a float the way OpenFOAM reads it back.
///
/// Values in a readable range use plain decimal notation (`28.96`, `2544000`),
/// everything else uses exponent notation (`1e-9`).
fn format_float(x: f64) -> String {
    let magnitude = x.abs();
    if x == 0.0 || !x.is_finite() || (1e-4..1e15).contains(&magnitude) {
        if x == 0.0 {
            "0".to_string()
        } else {
            x.to_string()
        }
    } else {
        format!("{x:e}")
    }
}
