//! Java `.properties` reader
//!
//! Only reading is supported. Writing goes through [`crate::rewriter`], which
//! substitutes whole lines instead of serializing a parsed model.

use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// 1-indexed line where the offending logical line starts
    pub line: usize,
    pub message: String,
}

/// Parses a properties document into its key/value pairs, in file order.
///
/// Later duplicates overwrite earlier values but keep the first position.
pub fn parse(content: &str) -> Result<IndexMap<String, String>, PropertiesError> {
    let mut result = IndexMap::new();
    let mut logical = String::new();
    let mut start_line = 0;
    let mut continuing = false;

    for (index, line) in content.lines().enumerate() {
        let line = if continuing {
            line.trim_start_matches(is_whitespace)
        } else {
            if line.trim().is_empty() || is_comment(line) {
                continue;
            }
            start_line = index + 1;
            line
        };

        continuing = ends_with_continuation(line);
        if continuing {
            logical.push_str(&line[..line.len() - 1]);
            continue;
        }
        logical.push_str(line);

        let (key, value) = split_pair(&logical).map_err(|message| PropertiesError {
            line: start_line,
            message,
        })?;
        result.insert(key, value);
        logical.clear();
    }

    if continuing {
        let (key, value) = split_pair(&logical).map_err(|message| PropertiesError {
            line: start_line,
            message,
        })?;
        result.insert(key, value);
    }

    Ok(result)
}

/// Parses one physical line as a standalone property.
///
/// Returns `None` for blank lines, comments, lines that continue onto the
/// next line and lines with malformed escapes.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    if line.trim().is_empty() || is_comment(line) || ends_with_continuation(line) {
        return None;
    }
    split_pair(line).ok()
}

/// Escapes a value so that [`parse`] reads it back unchanged
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            // leading whitespace would be skipped as part of the separator
            ' ' if i == 0 => out.push_str("\\ "),
            c => out.push(c),
        }
    }
    out
}

/// True when the line ends with an odd number of backslashes
pub fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// True for `#` and `!` comment lines
pub fn is_comment(line: &str) -> bool {
    matches!(
        line.trim_start_matches(is_whitespace).chars().next(),
        Some('#' | '!')
    )
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn split_pair(logical: &str) -> Result<(String, String), String> {
    let s = logical.trim_start_matches(is_whitespace);

    let mut key_end = s.len();
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_whitespace(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let raw_key = &s[..key_end];
    let mut rest = s[key_end..].trim_start_matches(is_whitespace);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_whitespace);
    }

    Ok((unescape(raw_key)?, unescape(rest)?))
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape \\u{}", hex))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
