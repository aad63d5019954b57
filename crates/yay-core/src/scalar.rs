//! Phase 3a: single-line values.
//!
//! Everything that fits on one `Text` token is parsed here: keywords,
//! numbers (big integers and floats), quoted strings, and the inline
//! containers `[...]`, `{...}`, and `<...>`. Inline arrays and objects run
//! through a dedicated left-to-right whitespace validator before parsing so
//! that the many spacing rules produce diagnostics at the offending column
//! rather than wherever the recursive parse happens to fail.
//!
//! Columns are byte offsets added to the caller's base column, which keeps
//! reported positions aligned with byte positions in the source line.

use crate::error::{ParseError, Result};
use crate::value::Value;

/// Parse a complete single-line scalar, stripping any inline comment first.
pub(crate) fn parse_scalar(text: &str, line: usize, col: usize) -> Result<Value> {
    classify(strip_inline_comment(text), line, col)
}

/// Drop a `#` comment (and the spaces preceding it) unless the `#` sits
/// inside a quoted region. A backslash escapes the following character even
/// outside quotes.
fn strip_inline_comment(text: &str) -> &str {
    let mut in_double = false;
    let mut in_single = false;
    let mut escape = false;
    for (i, &b) in text.as_bytes().iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        match b {
            b'\\' => escape = true,
            b'"' if !in_single => in_double = !in_double,
            b'\'' if !in_double => in_single = !in_single,
            b'#' if !in_double && !in_single => {
                return text[..i].trim_end_matches(' ');
            }
            _ => {}
        }
    }
    text
}

fn classify(s: &str, line: usize, col: usize) -> Result<Value> {
    match s {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "nan" => return Ok(Value::Float(f64::NAN)),
        "infinity" => return Ok(Value::Float(f64::INFINITY)),
        "-infinity" => return Ok(Value::Float(f64::NEG_INFINITY)),
        _ => {}
    }

    if is_float_text(s) || is_integer_text(s) {
        return parse_number(s, line, col);
    }

    match s.as_bytes().first() {
        Some(b'"') => {
            check_terminated(s, b'"', line, col)?;
            Ok(Value::String(parse_double_quoted(s, line, col)?))
        }
        Some(b'\'') => {
            check_terminated(s, b'\'', line, col)?;
            Ok(Value::String(single_quoted_payload(s).to_owned()))
        }
        Some(b'[') => {
            if !s.contains(']') {
                return Err(ParseError::at("Unexpected newline in inline array", line, col));
            }
            parse_inline_container(s, line, col)
        }
        Some(b'{') => {
            if !s.contains('}') {
                return Err(ParseError::at("Unexpected newline in inline object", line, col));
            }
            parse_inline_container(s, line, col)
        }
        Some(b'<') => parse_angle_bytes(s, line, col),
        _ => Err(unexpected_character(s, line, col)),
    }
}

fn unexpected_character(s: &str, line: usize, col: usize) -> ParseError {
    let ch = s.chars().next().unwrap_or('?');
    ParseError::at(format!("Unexpected character \"{ch}\""), line, col)
}

// ============================================================================
// Numbers
// ============================================================================

/// Float shape: at least one digit plus a `.` or an exponent. Interior
/// spaces are tolerated here (the scanner already bans trailing ones) and
/// removed before conversion.
pub(crate) fn is_float_text(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut has_dot = false;
    let mut has_exp = false;
    let mut has_digit = false;
    let mut i = usize::from(bytes.first() == Some(&b'-'));
    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                if has_dot || has_exp {
                    return false;
                }
                has_dot = true;
            }
            b'e' | b'E' => {
                if has_exp || !has_digit {
                    return false;
                }
                has_exp = true;
                if matches!(bytes.get(i + 1), Some(b'+') | Some(b'-')) {
                    i += 1;
                }
            }
            b'0'..=b'9' => has_digit = true,
            b' ' => {}
            _ => return false,
        }
        i += 1;
    }
    (has_dot || has_exp) && has_digit
}

/// Integer shape: optional sign, then digits (interior spaces tolerated).
pub(crate) fn is_integer_text(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    !rest.is_empty() && rest.bytes().all(|b| b == b' ' || b.is_ascii_digit())
}

/// Convert a classified number, enforcing the lowercase-exponent rule and
/// rejecting a space adjacent to the decimal point.
pub(crate) fn parse_number(s: &str, line: usize, col: usize) -> Result<Value> {
    if let Some(pos) = s.find('E') {
        return Err(ParseError::at(
            "Uppercase exponent (use lowercase 'e')",
            line,
            col + pos,
        ));
    }
    if let Some(dot) = s.find('.') {
        if dot > 0 && s.as_bytes()[dot - 1] == b' ' {
            return Err(ParseError::at("Unexpected space in number", line, col + dot - 1));
        }
        if s.as_bytes().get(dot + 1) == Some(&b' ') {
            return Err(ParseError::at("Unexpected space in number", line, col + dot + 1));
        }
    }

    let compact: String = s.chars().filter(|&c| c != ' ').collect();
    if compact.contains('.') || compact.contains('e') {
        return Ok(Value::Float(parse_f64_prefix(&compact)));
    }

    let negative = compact.starts_with('-');
    let digits = compact.strip_prefix('-').unwrap_or(&compact);
    Ok(Value::int_from_digits(digits, negative))
}

/// Longest-prefix float conversion. The classifier admits a few forms that
/// `f64::from_str` rejects outright (a bare trailing exponent such as `1e`);
/// those convert from their longest parseable prefix.
fn parse_f64_prefix(s: &str) -> f64 {
    (0..=s.len())
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

// ============================================================================
// Quoted strings
// ============================================================================

/// Reject a quoted token that does not close on the same line.
pub(crate) fn check_terminated(s: &str, quote: u8, line: usize, col: usize) -> Result<()> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != quote {
        return Err(ParseError::at(
            "Unterminated string",
            line,
            col + s.len().saturating_sub(1),
        ));
    }
    Ok(())
}

/// Decode the body of a well-formed double-quoted token (quotes included in
/// `s`). Honors `\" \\ \/ \b \f \n \r \t` and `\u{1-6 hex}`; the braceless
/// JSON `\uXXXX` form is rejected.
pub(crate) fn parse_double_quoted(s: &str, line: usize, col: usize) -> Result<String> {
    let bytes = s.as_bytes();
    let inner_end = bytes.len() - 1;
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 1;

    while i < inner_end {
        let b = bytes[i];
        if b == b'\\' {
            if i + 1 >= inner_end {
                return Err(ParseError::at("Bad escaped character", line, col + i + 1));
            }
            i += 1;
            match bytes[i] {
                b'"' => out.push(b'"'),
                b'\\' => out.push(b'\\'),
                b'/' => out.push(b'/'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'u' => {
                    if bytes.get(i + 1) != Some(&b'{') {
                        return Err(ParseError::at("Bad escaped character", line, col + i));
                    }
                    let brace_col = col + i + 1;
                    let hex_start = i + 2;
                    let mut end = hex_start;
                    while end < inner_end && bytes[end] != b'}' {
                        end += 1;
                    }
                    if end >= inner_end {
                        return Err(ParseError::at("Bad Unicode escape", line, brace_col));
                    }
                    let hex = &s[hex_start..end];
                    if hex.is_empty() || hex.len() > 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit())
                    {
                        return Err(ParseError::at("Bad Unicode escape", line, brace_col));
                    }
                    let code = u32::from_str_radix(hex, 16)
                        .map_err(|_| ParseError::at("Bad Unicode escape", line, brace_col))?;
                    if (0xD800..=0xDFFF).contains(&code) {
                        return Err(ParseError::at("Illegal surrogate", line, brace_col));
                    }
                    let ch = char::from_u32(code).ok_or_else(|| {
                        ParseError::at("Unicode code point out of range", line, brace_col)
                    })?;
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                    i = end;
                }
                _ => return Err(ParseError::at("Bad escaped character", line, col + i)),
            }
        } else if b < 0x20 {
            return Err(ParseError::at("Bad character in string", line, col + i));
        } else {
            out.push(b);
        }
        i += 1;
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Body of a well-formed single-quoted token, taken verbatim.
pub(crate) fn single_quoted_payload(s: &str) -> &str {
    &s[1..s.len() - 1]
}

// ============================================================================
// Inline container whitespace validation
// ============================================================================

/// Left-to-right whitespace check over a full inline-container line, skipping
/// quoted regions. Each rule reports at the offending column.
fn validate_inline(s: &str, line: usize, col: usize) -> Result<()> {
    let bytes = s.as_bytes();
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escape = false;
    let mut depth_bracket = 0i32;
    let mut depth_brace = 0i32;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            if b == b'\\' {
                escape = true;
            } else if b == delim {
                in_string = false;
                delim = 0;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => {
                in_string = true;
                delim = b;
            }
            b'\n' => {
                if depth_bracket > 0 {
                    return Err(ParseError::at("Unexpected newline in inline array", line, col));
                }
                if depth_brace > 0 {
                    return Err(ParseError::at("Unexpected newline in inline object", line, col));
                }
            }
            b'[' => {
                depth_bracket += 1;
                if bytes.get(i + 1) == Some(&b' ') {
                    return Err(ParseError::at("Unexpected space after \"[\"", line, col + i + 1));
                }
            }
            b']' => {
                if i > 0 && bytes[i - 1] == b' ' {
                    return Err(ParseError::at("Unexpected space before \"]\"", line, col + i - 1));
                }
                depth_bracket -= 1;
            }
            b'{' => {
                depth_brace += 1;
                if bytes.get(i + 1) == Some(&b' ') {
                    return Err(ParseError::at("Unexpected space after \"{\"", line, col + i + 1));
                }
            }
            b'}' => {
                if i > 0 && bytes[i - 1] == b' ' {
                    return Err(ParseError::at("Unexpected space before \"}\"", line, col + i - 1));
                }
                depth_brace -= 1;
            }
            b'<' => {
                if bytes.get(i + 1) == Some(&b' ') {
                    return Err(ParseError::at("Unexpected space after \"<\"", line, col + i + 1));
                }
            }
            b'>' => {
                if i > 0 && bytes[i - 1] == b' ' {
                    return Err(ParseError::at("Unexpected space before \">\"", line, col + i - 1));
                }
            }
            b',' => {
                if i > 0 && bytes[i - 1] == b' ' {
                    return Err(ParseError::at("Unexpected space before \",\"", line, col + i - 1));
                }
                if let Some(&next) = bytes.get(i + 1) {
                    if next != b' '
                        && next != b']'
                        && next != b'}'
                        && !close_with_space_follows(bytes, i + 1, depth_bracket + depth_brace)
                    {
                        return Err(ParseError::at("Expected space after \",\"", line, col + i));
                    }
                }
                if bytes.get(i + 1) == Some(&b' ') && bytes.get(i + 2) == Some(&b' ') {
                    return Err(ParseError::at("Unexpected space after \",\"", line, col + i + 2));
                }
            }
            b':' if depth_brace > 0 => {
                if i > 0 && bytes[i - 1] == b' ' {
                    return Err(ParseError::at("Unexpected space before \":\"", line, col + i - 1));
                }
                if bytes.get(i + 1) != Some(&b' ') {
                    return Err(ParseError::at("Expected space after \":\"", line, col + i));
                }
                if bytes.get(i + 2) == Some(&b' ') {
                    return Err(ParseError::at("Unexpected space after \":\"", line, col + i + 2));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Lookahead for the one suppression rule: a missing space after `,` yields
/// to a space-before-close violation on the matching bracket at the same
/// depth, so equivalent mistakes always get the same diagnostic.
fn close_with_space_follows(bytes: &[u8], start: usize, depth: i32) -> bool {
    let mut la_depth = depth;
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escape = false;

    for j in start..bytes.len() {
        let b = bytes[j];
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            if b == b'\\' {
                escape = true;
            } else if b == delim {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => {
                in_string = true;
                delim = b;
            }
            b'[' | b'{' => la_depth += 1,
            b']' | b'}' => {
                if la_depth == depth {
                    return j > 0 && bytes[j - 1] == b' ';
                }
                la_depth -= 1;
            }
            b',' if la_depth == depth => return false,
            _ => {}
        }
    }
    false
}

// ============================================================================
// Inline containers
// ============================================================================

/// Validate and parse a top-level inline `[...]` or `{...}` line.
pub(crate) fn parse_inline_container(s: &str, line: usize, col: usize) -> Result<Value> {
    validate_inline(s, line, col)?;
    let (value, _) = parse_inline_value(s, line, col)?;
    Ok(value)
}

/// Parse one inline value starting at `s`, returning it plus the number of
/// bytes consumed. Dispatch order matches the scalar path: containers,
/// bytes, strings, keywords, then numbers.
fn parse_inline_value(s: &str, line: usize, col: usize) -> Result<(Value, usize)> {
    match s.as_bytes().first() {
        Some(b'[') => parse_inline_array(s, line, col),
        Some(b'{') => parse_inline_object(s, line, col),
        Some(b'<') => parse_inline_bytes(s, line, col),
        Some(b'"') | Some(b'\'') => {
            let (payload, used) = parse_inline_string(s, line, col)?;
            Ok((Value::String(payload), used))
        }
        _ => {
            for keyword in ["true", "false", "null", "nan", "infinity", "-infinity"] {
                if let Some(used) = match_keyword(s, keyword) {
                    let value = match keyword {
                        "true" => Value::Bool(true),
                        "false" => Value::Bool(false),
                        "null" => Value::Null,
                        "nan" => Value::Float(f64::NAN),
                        "infinity" => Value::Float(f64::INFINITY),
                        _ => Value::Float(f64::NEG_INFINITY),
                    };
                    return Ok((value, used));
                }
            }
            parse_inline_number(s, line, col)
        }
    }
}

fn match_keyword(s: &str, keyword: &str) -> Option<usize> {
    let boundary = !s
        .as_bytes()
        .get(keyword.len())
        .is_some_and(u8::is_ascii_alphanumeric);
    (s.starts_with(keyword) && boundary).then(|| keyword.len())
}

fn parse_inline_array(s: &str, line: usize, col: usize) -> Result<(Value, usize)> {
    let end = find_matching(s, b'[', b']')
        .ok_or_else(|| ParseError::at("Unexpected newline in inline array", line, col))?;
    let bytes = s.as_bytes();
    let mut items = Vec::new();
    let mut pos = 1;

    while pos < bytes.len() && bytes[pos] != b']' {
        while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b',') {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b']' {
            break;
        }
        let (item, used) = parse_inline_value(&s[pos..], line, col + pos)?;
        items.push(item);
        pos += used;
    }

    Ok((Value::Array(items), end + 1))
}

fn parse_inline_object(s: &str, line: usize, col: usize) -> Result<(Value, usize)> {
    let end = find_matching(s, b'{', b'}')
        .ok_or_else(|| ParseError::at("Unexpected newline in inline object", line, col))?;
    let bytes = s.as_bytes();
    let mut obj = Value::Object(Vec::new());
    let mut pos = 1;

    while pos < bytes.len() && bytes[pos] != b'}' {
        while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b',') {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b'}' {
            break;
        }

        let key = if bytes[pos] == b'"' || bytes[pos] == b'\'' {
            let (payload, used) = parse_inline_string(&s[pos..], line, col + pos)?;
            pos += used;
            payload
        } else {
            if !(bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                return Err(ParseError::at("Invalid key", line, col));
            }
            let start = pos;
            while pos < bytes.len()
                && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_' || bytes[pos] == b'-')
            {
                pos += 1;
            }
            s[start..pos].to_owned()
        };

        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b':') {
            return Err(ParseError::at("Expected colon after key", line, col));
        }
        pos += 1;
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }

        let (value, used) = parse_inline_value(&s[pos..], line, col + pos)?;
        obj.set(&key, value);
        pos += used;
    }

    Ok((obj, end + 1))
}

/// Inline-path quoted string. Unlike the full scalar path, this form honors
/// the braceless four-digit `\uXXXX` escape, passes unknown escapes through
/// verbatim, and unescapes only `\'` and `\\` inside single quotes.
fn parse_inline_string(s: &str, line: usize, col: usize) -> Result<(String, usize)> {
    let bytes = s.as_bytes();
    let quote = bytes[0];
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 1;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i += 1;
            if i >= bytes.len() {
                break;
            }
            let esc = bytes[i];
            if quote == b'"' {
                match esc {
                    b'"' => out.push(b'"'),
                    b'\\' => out.push(b'\\'),
                    b'/' => out.push(b'/'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'u' => {
                        let hex = s
                            .get(i + 1..i + 5)
                            .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
                            .ok_or_else(|| ParseError::at("Bad Unicode escape", line, col + i))?;
                        let code = u32::from_str_radix(hex, 16)
                            .map_err(|_| ParseError::at("Bad Unicode escape", line, col + i))?;
                        let ch = char::from_u32(code)
                            .ok_or_else(|| ParseError::at("Illegal surrogate", line, col + i))?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        i += 4;
                    }
                    other => out.push(other),
                }
            } else if esc == b'\'' || esc == b'\\' {
                out.push(esc);
            } else {
                out.push(b'\\');
                out.push(esc);
            }
            i += 1;
            continue;
        }
        if b == quote {
            return Ok((String::from_utf8_lossy(&out).into_owned(), i + 1));
        }
        out.push(b);
        i += 1;
    }

    Err(ParseError::at("Unterminated string", line, col))
}

fn parse_inline_number(s: &str, line: usize, col: usize) -> Result<(Value, usize)> {
    let bytes = s.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));
    let mut has_decimal = false;

    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        if bytes[i] == b'.' {
            has_decimal = true;
        }
        i += 1;
    }
    if i == 0 || (i == 1 && bytes[0] == b'-') {
        return Err(unexpected_character(s, line, col));
    }

    let text = &s[..i];
    if has_decimal {
        Ok((Value::Float(parse_f64_prefix(text)), i))
    } else {
        let negative = text.starts_with('-');
        Ok((
            Value::int_from_digits(text.strip_prefix('-').unwrap_or(text), negative),
            i,
        ))
    }
}

/// Inline `<...>` item inside a container: uppercase hex folds silently
/// here, unlike the standalone scalar path.
fn parse_inline_bytes(s: &str, line: usize, col: usize) -> Result<(Value, usize)> {
    let bytes = s.as_bytes();
    let close = s[1..]
        .find('>')
        .map(|p| p + 1)
        .ok_or_else(|| ParseError::at("Unmatched angle bracket", line, col))?;

    if bytes.get(1) == Some(&b' ') {
        return Err(ParseError::at("Unexpected space after \"<\"", line, col + 1));
    }
    if close > 1 && bytes[close - 1] == b' ' {
        return Err(ParseError::at("Unexpected space before \">\"", line, col + close - 1));
    }

    let mut hex = String::new();
    for &b in &bytes[1..close] {
        if b == b' ' {
            continue;
        }
        if !b.is_ascii_hexdigit() {
            return Err(ParseError::at("Invalid hex digit", line, col));
        }
        hex.push(b.to_ascii_lowercase() as char);
    }
    if hex.len() % 2 != 0 {
        return Err(ParseError::at("Odd number of hex digits in byte literal", line, col));
    }

    Ok((Value::Bytes(decode_hex(&hex)), close + 1))
}

/// Standalone `<...>` byte literal. `<>` is the empty byte sequence;
/// uppercase hex is rejected in this path.
pub(crate) fn parse_angle_bytes(s: &str, line: usize, col: usize) -> Result<Value> {
    if s == "<>" {
        return Ok(Value::Bytes(Vec::new()));
    }
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != b'>' {
        return Err(ParseError::at("Unmatched angle bracket", line, col));
    }
    if bytes.get(1) == Some(&b' ') {
        return Err(ParseError::at("Unexpected space after \"<\"", line, col + 1));
    }
    if bytes.len() > 2 && bytes[bytes.len() - 2] == b' ' {
        return Err(ParseError::at(
            "Unexpected space before \">\"",
            line,
            col + bytes.len() - 2,
        ));
    }

    let mut hex = String::new();
    for (j, &b) in bytes.iter().enumerate().take(bytes.len() - 1).skip(1) {
        if b == b' ' {
            continue;
        }
        if (b'A'..=b'F').contains(&b) {
            return Err(ParseError::at("Uppercase hex digit (use lowercase)", line, col + j));
        }
        if !(b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
            return Err(ParseError::at("Invalid hex digit", line, col));
        }
        hex.push(b as char);
    }
    if hex.len() % 2 != 0 {
        return Err(ParseError::at("Odd number of hex digits in byte literal", line, col));
    }

    Ok(Value::Bytes(decode_hex(&hex)))
}

/// Decode validated lowercase hex pairs into bytes.
pub(crate) fn decode_hex(hex: &str) -> Vec<u8> {
    hex.as_bytes()
        .chunks_exact(2)
        .filter_map(|pair| {
            let hi = hex_nibble(pair[0])?;
            let lo = hex_nibble(pair[1])?;
            Some((hi << 4) | lo)
        })
        .collect()
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Position of the matching close bracket, honoring quoted regions.
fn find_matching(s: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escape = false;

    for (i, &b) in s.as_bytes().iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        if b == b'\\' && in_string {
            escape = true;
            continue;
        }
        if (b == b'"' || b == b'\'') && (!in_string || b == delim) {
            if in_string {
                in_string = false;
                delim = 0;
            } else {
                in_string = true;
                delim = b;
            }
            continue;
        }
        if in_string {
            continue;
        }
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}
