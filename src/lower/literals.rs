// Literal evaluation: numbers, string prefixes and backslash escapes
//
// Pure functions over literal text. Failures return `None` or a message and
// the caller turns that into a syntax error at the literal's position.

use crate::ast::Constant;
use num_bigint::BigUint;

/// Evaluate an integer, float or imaginary literal
pub(super) fn parse_number(literal: &str) -> Option<Constant> {
    let cleaned: String = literal.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    if let Some(imaginary) = lower.strip_suffix('j') {
        let value: f64 = imaginary.parse().ok()?;
        return Some(Constant::Complex(format!("{}j", float_repr(value))));
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return Some(match i64::from_str_radix(digits, radix) {
                Ok(value) => Constant::Int(value),
                Err(_) => Constant::BigInt(BigUint::parse_bytes(digits.as_bytes(), radix)?.to_string()),
            });
        }
    }

    if lower.contains(['.', 'e']) {
        return lower.parse::<f64>().ok().map(Constant::Float);
    }

    if !lower.chars().all(|c| c.is_ascii_digit()) || lower.is_empty() {
        return None;
    }
    // "007" is a syntax error in Python 3, "000" is fine
    if lower.len() > 1 && lower.starts_with('0') && lower.chars().any(|c| c != '0') {
        return None;
    }
    Some(match lower.parse::<i64>() {
        Ok(value) => Constant::Int(value),
        Err(_) => Constant::BigInt(lower),
    })
}

/// Python's repr of a float as it appears in an imaginary literal: shortest
/// round-trip digits, no `.0` on whole numbers, exponent form outside
/// `1e-4 <= |x| < 1e16`
fn float_repr(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{}", value);
    }
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..16).contains(&exponent) {
        format!("{}", value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Flags carried by a string literal prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub format: bool,
    pub unicode: bool,
}

/// A string literal split into prefix, quote and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct StringParts {
    pub prefix: StringPrefix,
    /// Byte offset of the body within the literal
    pub body_start: usize,
    /// Byte offset one past the body within the literal
    pub body_end: usize,
}

/// Split a complete string literal such as `rb'''x'''`
pub(super) fn split_string(literal: &str) -> Option<StringParts> {
    let prefix_len = literal
        .find(|c: char| c == '\'' || c == '"')
        .filter(|len| literal[..*len].chars().all(|c| c.is_ascii_alphabetic()))?;

    let mut prefix = StringPrefix::default();
    for c in literal[..prefix_len].chars() {
        match c.to_ascii_lowercase() {
            'r' => prefix.raw = true,
            'b' => prefix.bytes = true,
            'f' => prefix.format = true,
            'u' => prefix.unicode = true,
            _ => return None,
        }
    }

    let rest = &literal[prefix_len..];
    let quote_len = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
        3
    } else {
        1
    };
    let body_start = prefix_len + quote_len;
    let body_end = literal.len().checked_sub(quote_len)?;
    if body_end < body_start {
        return None;
    }

    Some(StringParts {
        prefix,
        body_start,
        body_end,
    })
}

/// Evaluate the backslash escapes of a `str` literal body
///
/// Unknown escapes such as `\d` stay as written. Malformed `\x`, `\u`,
/// `\U` and `\N{...}` escapes are errors. Lone surrogates, which a Rust
/// string cannot hold, decode to U+FFFD.
pub(super) fn decode_str(body: &str, raw: bool) -> Result<String, &'static str> {
    if raw {
        return Ok(body.to_string());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let value = take_octal(escape, &mut chars);
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            'x' | 'u' | 'U' => {
                let (width, truncated) = match escape {
                    'x' => (2, "truncated \\xXX escape"),
                    'u' => (4, "truncated \\uXXXX escape"),
                    _ => (8, "truncated \\UXXXXXXXX escape"),
                };
                let value = take_hex(&mut chars, width).ok_or(truncated)?;
                if value > 0x10ffff {
                    return Err("illegal Unicode character");
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            'N' => out.push(take_named(&mut chars)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}

/// Evaluate the escapes in a `bytes` literal body
pub(super) fn decode_bytes(body: &str, raw: bool) -> Result<Vec<u8>, &'static str> {
    if !body.is_ascii() {
        return Err("bytes can only contain ASCII literal characters");
    }
    if raw {
        return Ok(body.as_bytes().to_vec());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c as u8);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push(b'\\');
            break;
        };
        match escape {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push(b'\\'),
            '\'' => out.push(b'\''),
            '"' => out.push(b'"'),
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '0'..='7' => out.push((take_octal(escape, &mut chars) & 0xff) as u8),
            'x' => {
                let value = take_hex(&mut chars, 2).ok_or("invalid \\x escape")?;
                out.push(value as u8);
            }
            other => {
                out.push(b'\\');
                out.push(other as u8);
            }
        }
    }
    Ok(out)
}

/// Collapse the doubled braces of an f-string literal segment
pub(super) fn unescape_braces(segment: &str) -> String {
    segment.replace("{{", "{").replace("}}", "}")
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Up to three octal digits, the first already consumed
fn take_octal(first: char, chars: &mut Chars<'_>) -> u32 {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.peek().and_then(|d| d.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                chars.next();
            }
            None => break,
        }
    }
    value
}

/// `{NAME}` of a `\N` escape, looked up in the Unicode name table
fn take_named(chars: &mut Chars<'_>) -> Result<char, &'static str> {
    const MALFORMED: &str = "malformed \\N character escape";
    if chars.next() != Some('{') {
        return Err(MALFORMED);
    }
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) => name.push(c),
            None => return Err(MALFORMED),
        }
    }
    if name.is_empty() {
        return Err(MALFORMED);
    }
    unicode_names2::character(&name.to_ascii_uppercase()).ok_or("unknown Unicode character name")
}

fn take_hex(chars: &mut Chars<'_>, width: usize) -> Option<u32> {
    let mut digits = String::with_capacity(width);
    for _ in 0..width {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => return None,
        }
    }
    u32::from_str_radix(&digits, 16).ok()
}
