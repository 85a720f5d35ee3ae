//! Decoding of bundled JavaScript string modules.
//!
//! VitePress ships its local search index as a tiny ES module whose default
//! export is the serialized index, e.g. `const e='{"documentCount":…}';export{e as default};`.
//! The bundler picks whichever quote style needs the fewest escapes, so the
//! literal may use single, double or backtick quotes.

use crate::error::{Error, Result};
use regex::Regex;

/// Strip the module wrapper around the exported literal
pub fn strip_module(source: &str) -> Result<&str> {
    let prefix = Regex::new(r"^\s*(?:const\s+\w+\s*=|export\s+default\s+)")?;
    let suffix = Regex::new(r";?\s*export\s*\{\s*\w+\s+as\s+default\s*\}\s*;?\s*$|;\s*$")?;

    let start = prefix.find(source).map_or(0, |m| m.end());
    let rest = &source[start..];
    let end = suffix.find(rest).map_or(rest.len(), |m| m.start());
    Ok(rest[..end].trim())
}

/// Decode a JavaScript string literal, quotes included
pub fn decode_string_literal(literal: &str) -> Result<String> {
    let mut chars = literal.chars();
    let quote = match chars.next() {
        Some(q @ ('\'' | '"' | '`')) => q,
        _ => return Err(Error::js_literal("expected a quoted string")),
    };

    let mut out = String::with_capacity(literal.len());
    let mut pending_high: Option<u16> = None;

    loop {
        let c = chars
            .next()
            .ok_or_else(|| Error::js_literal("unterminated string"))?;

        if c != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            if c == quote {
                break;
            }
            if quote == '`' && c == '$' && chars.as_str().starts_with('{') {
                return Err(Error::js_literal("template interpolation is not supported"));
            }
            out.push(c);
            continue;
        }

        let escape = chars
            .next()
            .ok_or_else(|| Error::js_literal("unterminated escape"))?;
        match escape {
            'u' => {
                let unit = read_unicode_escape(&mut chars)?;
                push_code_unit(&mut out, &mut pending_high, unit);
                continue;
            }
            _ => flush_surrogate(&mut out, &mut pending_high),
        }

        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.as_str().starts_with(|c: char| c.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = read_hex(&mut chars, 2)?;
                let c = char::from_u32(code).ok_or_else(|| Error::js_literal("bad \\x escape"))?;
                out.push(c);
            }
            // Line continuation
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if chars.as_str().starts_with('\n') {
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }

    if !chars.as_str().trim().is_empty() {
        return Err(Error::js_literal("trailing characters after string"));
    }

    Ok(out)
}

/// Read the code point of a `\u` escape, either `XXXX` or `{X…}`
fn read_unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<u32> {
    if chars.as_str().starts_with('{') {
        chars.next();
        let digits: String = chars.by_ref().take_while(|&c| c != '}').collect();
        if digits.is_empty() || digits.len() > 6 {
            return Err(Error::js_literal("bad \\u{} escape"));
        }
        u32::from_str_radix(&digits, 16).map_err(|_| Error::js_literal("bad \\u{} escape"))
    } else {
        read_hex(chars, 4)
    }
}

fn read_hex(chars: &mut std::str::Chars<'_>, len: usize) -> Result<u32> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return Err(Error::js_literal("truncated hex escape"));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| Error::js_literal(format!("bad hex digits {digits:?}")))
}

/// Push a UTF-16 code unit (or a full code point), pairing surrogates
fn push_code_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u32) {
    match unit {
        0xD800..=0xDBFF => {
            flush_surrogate(out, pending_high);
            *pending_high = Some(unit as u16);
        }
        0xDC00..=0xDFFF => match pending_high.take() {
            Some(high) => {
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (unit - 0xDC00);
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            None => out.push(char::REPLACEMENT_CHARACTER),
        },
        _ => {
            flush_surrogate(out, pending_high);
            out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }
}

/// A lone high surrogate becomes U+FFFD
fn flush_surrogate(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}
