//! Parser for Java-style `.properties` message files.
//!
//! Supports `#`/`!` comments, `=`/`:`/whitespace separators, backslash line
//! continuations and the `\t \n \r \f \uXXXX` escapes.

use std::str::Chars;

use thiserror::Error;

const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

/// A malformed line in a properties file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct PropertiesError {
    pub line: usize,
    pub reason: String,
}

/// Parse properties content into `(key, value)` pairs in file order.
///
/// Duplicate keys are returned as-is; callers decide which one wins.
pub fn parse(content: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();
    let mut lines = content.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let first = raw.trim_start_matches(WHITESPACE);
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }
        let line_no = idx + 1;

        let mut logical = String::new();
        let mut current = first;
        loop {
            if !ends_with_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(WHITESPACE),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical, line_no)?;
        if key.is_empty() {
            continue;
        }
        entries.push((key, value));
    }

    Ok(entries)
}

/// An odd number of trailing backslashes joins the next line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str, line_no: usize) -> Result<(String, String), PropertiesError> {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            ' ' | '\t' | '\u{c}' => {
                key_end = i;
                let rest = &line[i..];
                let after_ws = rest.trim_start_matches(WHITESPACE);
                let offset = i + (rest.len() - after_ws.len());
                value_start = if after_ws.starts_with(['=', ':']) {
                    offset + 1
                } else {
                    offset
                };
                break;
            }
            _ => {}
        }
    }

    let key = unescape(&line[..key_end], line_no)?;
    let value = unescape(line[value_start..].trim_start_matches(WHITESPACE), line_no)?;
    Ok((key, value))
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let code = read_hex4(&mut chars).ok_or_else(|| PropertiesError {
                    line,
                    reason: "malformed \\uXXXX escape".into(),
                })?;
                let ch = if (0xD800..=0xDBFF).contains(&code) {
                    // High surrogate: Java writes astral chars as two escapes.
                    let mut ahead = chars.clone();
                    let low = match (ahead.next(), ahead.next()) {
                        (Some('\\'), Some('u')) => read_hex4(&mut ahead),
                        _ => None,
                    };
                    match low {
                        Some(low) if (0xDC00..=0xDFFF).contains(&low) => {
                            chars = ahead;
                            char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                        }
                        _ => None,
                    }
                } else {
                    char::from_u32(code)
                };
                out.push(ch.ok_or_else(|| PropertiesError {
                    line,
                    reason: format!("invalid code point \\u{code:04X}"),
                })?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        u32::from_str_radix(&hex, 16).ok()
    } else {
        None
    }
}
