//! Phase 3b: value construction from the token stream.
//!
//! A lookahead cursor over the flat token array drives recursive descent.
//! There is no backtracking: the shape of a property value (inline scalar,
//! nested object, multi-line array, block scalar, concatenated strings) is
//! decided from the first significant token that follows it.
//!
//! # Key decisions
//!
//! - **Cursor struct, not free functions**: the token slice and index travel
//!   through every production, so they live in a `Builder` with `&mut self`
//!   methods.
//! - **`Text` tokens carry the line's indent as their column**: positions in
//!   diagnostics are anchored to the start of the content, which for list
//!   items understates by the two leader bytes. All column arithmetic below
//!   is relative to that anchor.
//! - **Named arrays get a minimum indent**: a property's array value stops
//!   at the first list item shallower than its first item, so a later
//!   shallower list belongs to an outer level. Free arrays have no minimum.

use crate::error::{ParseError, Result};
use crate::outline::Token;
use crate::scalar;
use crate::value::Value;

/// Build the document value from the token stream.
pub(crate) fn build(tokens: &[Token]) -> Result<Value> {
    Builder { tokens, pos: 0 }.parse_root()
}

struct Builder<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Builder<'a> {
    fn get(&self, i: usize) -> Option<&'a Token> {
        self.tokens.get(i)
    }

    fn skip_breaks(&mut self) {
        while matches!(self.get(self.pos), Some(Token::Break)) {
            self.pos += 1;
        }
    }

    fn skip_stops(&mut self) {
        while matches!(self.get(self.pos), Some(Token::Stop)) {
            self.pos += 1;
        }
    }

    fn skip_breaks_and_stops(&mut self) {
        while matches!(self.get(self.pos), Some(Token::Stop | Token::Break)) {
            self.pos += 1;
        }
    }

    /// Index of the next significant token at or after `i`, without moving
    /// the cursor.
    fn next_significant(&self, mut i: usize) -> usize {
        while matches!(self.get(i), Some(Token::Stop | Token::Break)) {
            i += 1;
        }
        i
    }

    // ------------------------------------------------------------------
    // Root dispatch
    // ------------------------------------------------------------------

    fn parse_root(&mut self) -> Result<Value> {
        self.skip_breaks_and_stops();
        let Some(first) = self.get(self.pos) else {
            return Err(ParseError::at("No value found in document", 0, 0));
        };

        if let Token::Text { text, indent, line, .. } = first {
            if *indent > 0 {
                return Err(ParseError::at("Unexpected indent", *line, 0));
            }
            if !text.starts_with('{') && find_colon_outside_quotes(text).is_some() {
                // Root object: an indent-0 property list. Its loop consumes
                // the remainder of the stream, stray lines included.
                return self.parse_root_object();
            }
        }

        let value = self.parse_value()?;
        self.skip_breaks_and_stops();
        if let Some(extra) = self.get(self.pos) {
            let (line, col) = extra.position();
            return Err(ParseError::at("Unexpected extra content", line, col));
        }
        Ok(value)
    }

    fn parse_root_object(&mut self) -> Result<Value> {
        let mut obj = Value::Object(Vec::new());

        while self.pos < self.tokens.len() {
            let Some(Token::Text { text, indent, line, col }) = self.get(self.pos) else {
                self.pos += 1;
                continue;
            };
            if *indent != 0 {
                self.pos += 1;
                continue;
            }
            let Some(colon) = find_colon_outside_quotes(text) else {
                self.pos += 1;
                continue;
            };

            validate_property(text, colon, *line, *col)?;
            let key = parse_key_name(&text[..colon], *line, *col)?;
            let value = self.parse_property_value(text, colon, *indent, *line, *col)?;
            obj.set(&key, value);
        }

        Ok(obj)
    }

    // ------------------------------------------------------------------
    // General values
    // ------------------------------------------------------------------

    fn parse_value(&mut self) -> Result<Value> {
        let Some(token) = self.get(self.pos) else {
            return Ok(Value::Null);
        };
        match token {
            Token::Start { .. } => self.parse_array(None),
            Token::Text { text, indent, line, col } => {
                self.parse_text_value(text, *indent, *line, *col)
            }
            Token::Stop | Token::Break => {
                self.pos += 1;
                Ok(Value::Null)
            }
        }
    }

    fn parse_text_value(
        &mut self,
        text: &'a str,
        indent: usize,
        line: usize,
        col: usize,
    ) -> Result<Value> {
        if text.starts_with(' ') {
            return Err(ParseError::at("Unexpected leading space", line, col));
        }

        match text {
            "null" => {
                self.pos += 1;
                return Ok(Value::Null);
            }
            "true" => {
                self.pos += 1;
                return Ok(Value::Bool(true));
            }
            "false" => {
                self.pos += 1;
                return Ok(Value::Bool(false));
            }
            "nan" => {
                self.pos += 1;
                return Ok(Value::Float(f64::NAN));
            }
            "infinity" => {
                self.pos += 1;
                return Ok(Value::Float(f64::INFINITY));
            }
            "-infinity" => {
                self.pos += 1;
                return Ok(Value::Float(f64::NEG_INFINITY));
            }
            _ => {}
        }

        if scalar::is_float_text(text) || scalar::is_integer_text(text) {
            let value = scalar::parse_number(text, line, col)?;
            self.pos += 1;
            return Ok(value);
        }

        if is_block_string_leader(text) {
            return self.parse_block_string(block_leader_inline_text(text), None, line, col);
        }
        if text.starts_with('>') && !text.contains('<') {
            return self.parse_block_bytes(text, indent, line, col);
        }

        let bytes = text.as_bytes();
        if bytes[0] == b'"' && text.len() > 1 {
            scalar::check_terminated(text, b'"', line, col)?;
            self.pos += 1;
            return Ok(Value::String(scalar::parse_double_quoted(text, line, col)?));
        }
        if bytes[0] == b'\'' && text.len() > 1 {
            scalar::check_terminated(text, b'\'', line, col)?;
            self.pos += 1;
            return Ok(Value::String(scalar::single_quoted_payload(text).to_owned()));
        }
        if bytes[0] == b'[' {
            if !text.contains(']') {
                return Err(ParseError::at("Unexpected newline in inline array", line, col));
            }
            self.pos += 1;
            return scalar::parse_inline_container(text, line, col);
        }
        if bytes[0] == b'{' {
            if !text.contains('}') {
                return Err(ParseError::at("Unexpected newline in inline object", line, col));
            }
            self.pos += 1;
            return scalar::parse_inline_container(text, line, col);
        }
        if bytes[0] == b'<' {
            self.pos += 1;
            return scalar::parse_angle_bytes(text, line, col);
        }

        if let Some(colon) = find_colon_outside_quotes(text) {
            // A lone property outside an object context wraps itself in a
            // single-pair object.
            let key = parse_key_name(&text[..colon], line, col)?;
            let value = self.parse_property_value(text, colon, indent, line, col)?;
            let mut obj = Value::Object(Vec::new());
            obj.set(&key, value);
            return Ok(obj);
        }

        self.pos += 1;
        scalar::parse_scalar(text, line, col)
    }

    // ------------------------------------------------------------------
    // Properties and block objects
    // ------------------------------------------------------------------

    /// Parse the value of `key: V`, where `text` is the full property line
    /// and `colon` the byte offset of its separating colon.
    fn parse_property_value(
        &mut self,
        text: &'a str,
        colon: usize,
        indent: usize,
        line: usize,
        col: usize,
    ) -> Result<Value> {
        let after = &text[colon + 1..];
        let skip = after.len() - after.trim_start_matches(' ').len();
        let v_part = &after[skip..];
        let v_col = col + colon + 1 + skip;

        if v_part == "{}" {
            self.pos += 1;
            return Ok(Value::Object(Vec::new()));
        }

        // Block leaders in property position must not carry content on the
        // key's line (a trailing comment is fine for bytes).
        if v_part.starts_with('`') {
            if v_part.len() > 1 {
                return Err(ParseError::at(
                    "Expected newline after block leader in property",
                    line,
                    col,
                ));
            }
            return self.parse_block_string("", Some(indent), line, col);
        }
        if v_part.starts_with('>') && !v_part.contains('<') {
            if v_part.len() > 1 {
                let after_leader = v_part[1..].trim_start_matches(' ');
                if !after_leader.is_empty() && !after_leader.starts_with('#') {
                    return Err(ParseError::at(
                        "Expected newline after block leader in property",
                        line,
                        col,
                    ));
                }
            }
            return self.parse_property_block_bytes(v_part, indent, line, col);
        }

        if !v_part.is_empty() {
            self.pos += 1;
            return scalar::parse_scalar(v_part, line, v_col);
        }

        // Empty V: the value is the following indented block.
        self.pos += 1;
        let j = self.next_significant(self.pos);
        let Some(next) = self.get(j) else {
            return Err(ParseError::at("Expected value after property", line, col + colon + 1));
        };

        if let Token::Start { indent: item_indent, .. } = next {
            self.pos = j;
            return self.parse_array(Some(*item_indent));
        }

        if let Token::Text { text: next_text, indent: next_indent, line: next_line, .. } = next {
            // A block leader belongs on the key's line, never on its own.
            if next_text == "`" {
                return Err(ParseError::at("Unexpected indent", *next_line, 0));
            }
            if next_text.starts_with('>') && !next_text.contains('<') {
                return Err(ParseError::at("Unexpected indent", *next_line, 0));
            }

            if *next_indent > indent {
                let trimmed = next_text.trim_start_matches(' ');
                if matches!(trimmed.as_bytes().first(), Some(b'[') | Some(b'{') | Some(b'<'))
                    || starts_with_number(trimmed.as_bytes())
                {
                    return Err(ParseError::at("Unexpected indent", *next_line, 0));
                }
                if is_quoted_line(trimmed) {
                    self.pos = j;
                    if let Some(value) = self.parse_concatenated_strings(*next_indent)? {
                        return Ok(value);
                    }
                    // One quoted string alone on its own line must use the
                    // inline form.
                    return Err(ParseError::at("Unexpected indent", *next_line, 0));
                }
                self.pos = j;
                return self.parse_nested_object(*next_indent);
            }
        }

        Err(ParseError::at("Expected value after property", line, col + colon + 1))
    }

    fn parse_nested_object(&mut self, base_indent: usize) -> Result<Value> {
        let mut obj = Value::Object(Vec::new());

        while let Some(token) = self.get(self.pos) {
            match token {
                Token::Stop | Token::Break => {
                    self.pos += 1;
                }
                Token::Text { text, indent, line, col } => {
                    let Some(colon) = find_colon_outside_quotes(text) else { break };
                    if *indent < base_indent {
                        break;
                    }
                    validate_property(text, colon, *line, *col)?;
                    let key = parse_key_name(&text[..colon], *line, *col)?;
                    if key.is_empty() {
                        self.pos += 1;
                        continue;
                    }
                    let value = self.parse_property_value(text, colon, *indent, *line, *col)?;
                    obj.set(&key, value);
                }
                Token::Start { .. } => break,
            }
        }

        Ok(obj)
    }

    // ------------------------------------------------------------------
    // Multi-line arrays
    // ------------------------------------------------------------------

    /// Parse a run of sibling list items. `min_indent` is set for arrays in
    /// property position; an item shallower than it ends the array.
    fn parse_array(&mut self, min_indent: Option<usize>) -> Result<Value> {
        let mut items = Vec::new();

        while let Some(Token::Start { indent, .. }) = self.get(self.pos) {
            let list_indent = *indent;
            if min_indent.is_some_and(|min| list_indent < min) {
                break;
            }
            self.pos += 1;
            self.skip_breaks();
            let Some(next) = self.get(self.pos) else { break };

            match next {
                Token::Start { .. } => {
                    items.push(self.parse_array(None)?);
                }
                Token::Text { text, .. } if is_inline_bullet(text) => {
                    items.push(self.parse_compact_bullets(list_indent)?);
                }
                Token::Text { text, .. } if find_colon_outside_quotes(text).is_some() => {
                    // The item is an object; its sibling properties sit at
                    // any indent deeper than the list marker.
                    items.push(self.parse_nested_object(list_indent)?);
                }
                Token::Text { text, line, col, .. } if is_block_string_leader(text) => {
                    let first_line = block_leader_inline_text(text);
                    items.push(self.parse_block_string(
                        first_line,
                        Some(list_indent),
                        *line,
                        *col,
                    )?);
                }
                Token::Text { .. } => {
                    items.push(self.parse_value()?);
                }
                Token::Stop | Token::Break => {
                    self.pos += 1;
                }
            }

            self.skip_stops();
            self.skip_breaks();
        }

        Ok(Value::Array(items))
    }

    /// One or more `- value` lines written compactly after a list marker,
    /// forming a nested array. The value may itself begin with `- ` to any
    /// depth; each level wraps a single-element array.
    fn parse_compact_bullets(&mut self, list_indent: usize) -> Result<Value> {
        let mut nested = Vec::new();

        while let Some(Token::Text { text, line, col, .. }) = self.get(self.pos) {
            if !is_inline_bullet(text) {
                break;
            }
            validate_inline_bullet(text, *line, *col)?;
            nested.push(parse_nested_bullet(inline_bullet_value(text), *line, *col + 2)?);
            self.pos += 1;
        }

        // Deeper `- ` lines continue the same nested array.
        while let Some(Token::Start { indent, .. }) = self.get(self.pos) {
            if *indent <= list_indent {
                break;
            }
            self.pos += 1;
            self.skip_breaks();
            if self.pos >= self.tokens.len() {
                break;
            }
            nested.push(self.parse_value()?);
            self.skip_stops();
        }

        Ok(Value::Array(nested))
    }

    // ------------------------------------------------------------------
    // Block scalars
    // ------------------------------------------------------------------

    /// Multi-line string introduced by a backtick. `base_indent` is set in
    /// property and list-item position, where the body is every following
    /// line strictly deeper than the introducer; in free position the body
    /// runs to the next structural token regardless of indent.
    ///
    /// The least-indented body line sets the margin; other lines keep their
    /// relative indentation. All-empty lines are trimmed from both ends, a
    /// single newline is appended, and a leading newline is prepended when a
    /// free-standing leader had no inline content.
    fn parse_block_string(
        &mut self,
        first_line: &'a str,
        base_indent: Option<usize>,
        line: usize,
        col: usize,
    ) -> Result<Value> {
        self.pos += 1;

        let mut body: Vec<(Option<usize>, &'a str)> = Vec::new();
        if !first_line.is_empty() {
            // The introducer's inline content never participates in the
            // margin computation.
            body.push((None, first_line));
        }

        while let Some(token) = self.get(self.pos) {
            match token {
                Token::Text { text, indent, .. } => {
                    if base_indent.is_some_and(|base| *indent <= base) {
                        break;
                    }
                    body.push((Some(*indent), text.as_str()));
                }
                Token::Break => body.push((None, "")),
                Token::Start { .. } | Token::Stop => break,
            }
            self.pos += 1;
        }

        let min_indent = body.iter().filter_map(|(ind, _)| *ind).min().unwrap_or(0);

        let start = if first_line.is_empty() {
            body.iter().position(|(_, t)| !t.is_empty()).unwrap_or(body.len())
        } else {
            0
        };
        let end = body
            .iter()
            .rposition(|(_, t)| !t.is_empty())
            .map_or(start, |p| p + 1)
            .max(start);

        let leading_newline = first_line.is_empty() && !body.is_empty() && base_indent.is_none();

        let mut result = String::new();
        if leading_newline && end > start {
            result.push('\n');
        }
        for (i, (ind, text)) in body[start..end].iter().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            if let Some(ind) = ind {
                for _ in 0..(ind - min_indent) {
                    result.push(' ');
                }
            }
            result.push_str(text);
        }
        if end > start {
            result.push('\n');
        }

        if result.is_empty() {
            return Err(ParseError::at(
                "Empty block string not allowed (use \"\" or \"\\n\" explicitly)",
                line,
                col,
            ));
        }
        Ok(Value::String(result))
    }

    /// Free-standing `>` hex block: hex (or a comment) may follow the leader
    /// on its own line, continuation lines are strictly deeper, and
    /// uppercase digits are rejected.
    fn parse_block_bytes(
        &mut self,
        text: &'a str,
        indent: usize,
        line: usize,
        col: usize,
    ) -> Result<Value> {
        let (first, offset) = match text.as_bytes().get(1) {
            Some(b' ') => (&text[2..], 2),
            _ => (&text[1..], 1),
        };
        let (first_hex, had_comment) = strip_hash_comment(first);
        if first_hex.trim_matches(' ').is_empty() && !had_comment {
            return Err(ParseError::at("Expected hex or comment in hex block", line, col));
        }

        let mut hex = String::new();
        collect_hex_strict(first_hex, line, col + offset, &mut hex)?;
        self.pos += 1;

        while let Some(Token::Text { text: body, indent: body_indent, line: body_line, col: body_col }) =
            self.get(self.pos)
        {
            if *body_indent <= indent {
                break;
            }
            let (stripped, _) = strip_hash_comment(body);
            collect_hex_strict(stripped, *body_line, *body_col, &mut hex)?;
            self.pos += 1;
        }

        if hex.len() % 2 != 0 {
            return Err(ParseError::at("Odd number of hex digits in byte literal", line, col));
        }
        Ok(Value::Bytes(scalar::decode_hex(&hex)))
    }

    /// `key: >` hex block. Unlike the free-standing form, uppercase digits
    /// fold to lowercase silently here.
    fn parse_property_block_bytes(
        &mut self,
        v_part: &str,
        indent: usize,
        line: usize,
        col: usize,
    ) -> Result<Value> {
        let first = v_part[1..].strip_prefix(' ').unwrap_or(&v_part[1..]);
        let (first_hex, _) = strip_hash_comment(first);

        let mut hex = String::new();
        collect_hex_folded(first_hex, line, col, &mut hex)?;
        self.pos += 1;

        while let Some(Token::Text { text: body, indent: body_indent, line: body_line, col: body_col }) =
            self.get(self.pos)
        {
            if *body_indent <= indent {
                break;
            }
            let (stripped, _) = strip_hash_comment(body);
            collect_hex_folded(stripped, *body_line, *body_col, &mut hex)?;
            self.pos += 1;
        }

        if hex.len() % 2 != 0 {
            return Err(ParseError::at("Odd number of hex digits in byte literal", line, col));
        }
        Ok(Value::Bytes(scalar::decode_hex(&hex)))
    }

    // ------------------------------------------------------------------
    // Concatenated strings
    // ------------------------------------------------------------------

    /// Two or more successive quoted-string lines at or deeper than
    /// `base_indent`, concatenated without separators. Returns `None` when
    /// only one string is found (the caller rejects that shape).
    fn parse_concatenated_strings(&mut self, base_indent: usize) -> Result<Option<Value>> {
        let mut joined = String::new();
        let mut count = 0usize;

        while let Some(token) = self.get(self.pos) {
            match token {
                Token::Break | Token::Stop => {
                    self.pos += 1;
                }
                Token::Text { text, indent, line, col } => {
                    if *indent < base_indent {
                        break;
                    }
                    let trimmed = text.trim_start_matches(' ');
                    if !is_quoted_line(trimmed) {
                        break;
                    }
                    if trimmed.starts_with('"') {
                        joined.push_str(&scalar::parse_double_quoted(trimmed, *line, *col)?);
                    } else {
                        joined.push_str(scalar::single_quoted_payload(trimmed));
                    }
                    count += 1;
                    self.pos += 1;
                }
                Token::Start { .. } => break,
            }
        }

        if count < 2 {
            return Ok(None);
        }
        Ok(Some(Value::String(joined)))
    }
}

// ============================================================================
// Line-shape helpers
// ============================================================================

/// Byte offset of the first colon outside any quoted substring.
fn find_colon_outside_quotes(s: &str) -> Option<usize> {
    let mut in_double = false;
    let mut in_single = false;
    let mut escape = false;
    for (i, &b) in s.as_bytes().iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        match b {
            b'\\' if in_double || in_single => escape = true,
            b'"' if !in_single => in_double = !in_double,
            b'\'' if !in_double => in_single = !in_single,
            b':' if !in_double && !in_single => return Some(i),
            _ => {}
        }
    }
    None
}

/// Whitespace discipline around the key and colon of a property line.
fn validate_property(text: &str, colon: usize, line: usize, col: usize) -> Result<()> {
    let bytes = text.as_bytes();
    if colon > 0 && bytes[colon - 1] == b' ' {
        return Err(ParseError::at("Unexpected space before \":\"", line, col + colon - 1));
    }
    match bytes.get(colon + 1) {
        // Colon at end of line: a block value follows.
        None => {}
        Some(&b' ') => {
            if bytes.get(colon + 2) == Some(&b' ') {
                return Err(ParseError::at("Unexpected space after \":\"", line, col + colon + 2));
            }
        }
        Some(_) => {
            return Err(ParseError::at("Expected space after \":\"", line, col + colon));
        }
    }
    if !matches!(bytes.first(), Some(b'"') | Some(b'\'')) {
        for (i, &b) in bytes[..colon].iter().enumerate() {
            if !(b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
                return Err(ParseError::at("Invalid key character", line, col + i));
            }
        }
    }
    Ok(())
}

/// Unquote a property key. Double-quoted keys run through the double-quoted
/// escape rules; single-quoted keys are taken verbatim; anything else is the
/// raw text.
fn parse_key_name(raw: &str, line: usize, col: usize) -> Result<String> {
    let s = raw.trim_start_matches(' ');
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        return scalar::parse_double_quoted(s, line, col);
    }
    if bytes.len() >= 2 && bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'' {
        return Ok(scalar::single_quoted_payload(s).to_owned());
    }
    Ok(s.trim_end_matches(' ').to_owned())
}

/// `- ` at the start of a line's content (after optional spaces): a compact
/// nested bullet.
fn is_inline_bullet(text: &str) -> bool {
    let t = text.trim_start_matches(' ').as_bytes();
    t.first() == Some(&b'-') && t.get(1) == Some(&b' ')
}

fn inline_bullet_value(text: &str) -> &str {
    let trimmed = text.trim_start_matches(' ');
    trimmed.strip_prefix("- ").unwrap_or(trimmed)
}

fn validate_inline_bullet(text: &str, line: usize, col: usize) -> Result<()> {
    let spaces = text.len() - text.trim_start_matches(' ').len();
    let bytes = text.as_bytes();
    if bytes.get(spaces) == Some(&b'-')
        && bytes.get(spaces + 1) == Some(&b' ')
        && bytes.get(spaces + 2) == Some(&b' ')
    {
        return Err(ParseError::at("Unexpected space after \"-\"", line, col + spaces + 2));
    }
    Ok(())
}

/// `- - 1` nests one single-element array per extra bullet.
fn parse_nested_bullet(text: &str, line: usize, col: usize) -> Result<Value> {
    if is_inline_bullet(text) {
        let inner = parse_nested_bullet(inline_bullet_value(text), line, col + 2)?;
        return Ok(Value::Array(vec![inner]));
    }
    scalar::parse_scalar(text, line, col)
}

fn is_block_string_leader(text: &str) -> bool {
    text == "`" || (text.len() >= 2 && text.starts_with('`') && text.as_bytes()[1] == b' ')
}

fn block_leader_inline_text(text: &str) -> &str {
    if text.len() > 2 {
        &text[2..]
    } else {
        ""
    }
}

/// Entirely a quoted string (either kind), possibly after leading spaces.
fn is_quoted_line(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2
        && ((b[0] == b'"' && b[b.len() - 1] == b'"') || (b[0] == b'\'' && b[b.len() - 1] == b'\''))
}

fn starts_with_number(b: &[u8]) -> bool {
    match b.first() {
        Some(d) if d.is_ascii_digit() => true,
        Some(b'-') | Some(b'.') => b.get(1).is_some_and(u8::is_ascii_digit),
        _ => false,
    }
}

/// Split a hex-block line at its `#` comment, if any.
fn strip_hash_comment(s: &str) -> (&str, bool) {
    match s.find('#') {
        Some(p) => (&s[..p], true),
        None => (s, false),
    }
}

/// Gather hex digits from a block-bytes line, rejecting uppercase.
fn collect_hex_strict(part: &str, line: usize, col: usize, hex: &mut String) -> Result<()> {
    for (i, &b) in part.as_bytes().iter().enumerate() {
        if b == b' ' {
            continue;
        }
        if (b'A'..=b'F').contains(&b) {
            return Err(ParseError::at("Uppercase hex digit (use lowercase)", line, col + i));
        }
        if !(b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
            return Err(ParseError::at("Invalid hex digit", line, col + i));
        }
        hex.push(b as char);
    }
    Ok(())
}

/// Gather hex digits from a property block-bytes line, folding uppercase.
fn collect_hex_folded(part: &str, line: usize, col: usize, hex: &mut String) -> Result<()> {
    for (i, &b) in part.as_bytes().iter().enumerate() {
        if b == b' ' {
            continue;
        }
        if !b.is_ascii_hexdigit() {
            return Err(ParseError::at("Invalid hex digit", line, col + i));
        }
        hex.push(b.to_ascii_lowercase() as char);
    }
    Ok(())
}
