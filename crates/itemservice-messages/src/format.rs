//! Positional template formatting (`{0}`, `{1}`, ...).
//!
//! Quoting follows the usual message-format rules: `''` is a literal quote and
//! text between single quotes is copied verbatim, braces included. A
//! placeholder without a matching argument is left in the output as written.

use std::fmt::{Display, Write};

/// Substitute `args` into `template`.
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
            } else {
                in_quote = !in_quote;
                i += 1;
            }
            continue;
        }

        if in_quote || c != '{' {
            out.push(c);
            i += 1;
            continue;
        }

        let Some(len) = chars[i + 1..].iter().position(|&ch| ch == '}') else {
            // Unclosed brace: the rest is literal.
            out.extend(&chars[i..]);
            break;
        };
        let inner: String = chars[i + 1..i + 1 + len].iter().collect();
        let index = inner.split(',').next().unwrap_or_default().trim();

        match index.parse::<usize>().ok().and_then(|n| args.get(n)) {
            Some(arg) => {
                let _ = write!(out, "{arg}");
            }
            None => {
                out.push('{');
                out.push_str(&inner);
                out.push('}');
            }
        }
        i += len + 2;
    }

    out
}
