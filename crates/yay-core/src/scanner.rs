//! Phase 1: source validation and decomposition into scan lines.
//!
//! The scanner owns every byte-level concern so later phases can work on
//! clean per-line strings: UTF-8 decoding, the permitted code-point set,
//! BOM/tab/surrogate rejection, newline splitting, trailing-space rejection,
//! indent and `"- "` leader extraction, and top-level comment discard.

use crate::error::{ParseError, Result};

/// One logical source line after indent and leader extraction.
#[derive(Debug, Clone)]
pub(crate) struct ScanLine {
    /// Content after the indent and any list leader.
    pub text: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// True when the line carried a `"- "` list leader.
    pub leader: bool,
    /// 0-based source line number.
    pub line: usize,
}

/// Validate the raw source and split it into scan lines in source order.
pub(crate) fn scan(source: &[u8]) -> Result<Vec<ScanLine>> {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Err(ParseError::at("Illegal BOM", 0, 0));
    }
    let text = decode_source(source)?;
    validate_code_points(text)?;
    split_lines(text)
}

/// Decode the source as UTF-8, reporting the position of the first malformed
/// sequence. A CESU-8-style surrogate encoding (`ED A0..BF`) is called out
/// as such; any other malformed sequence is reported as a forbidden code
/// point naming the lead byte.
fn decode_source(source: &[u8]) -> Result<&str> {
    std::str::from_utf8(source).map_err(|err| {
        let offset = err.valid_up_to();
        let (line, col) = position_of(&source[..offset]);
        let lead = source[offset];
        if lead == 0xED && matches!(source.get(offset + 1), Some(0xA0..=0xBF)) {
            ParseError::at("Illegal surrogate", line, col)
        } else {
            ParseError::at(format!("Forbidden code point U+{:04X}", lead as u32), line, col)
        }
    })
}

/// Line/column (0-based, column in code points) at the end of a valid prefix.
fn position_of(prefix: &[u8]) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in String::from_utf8_lossy(prefix).chars() {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn validate_code_points(text: &str) -> Result<()> {
    let mut line = 0;
    let mut col = 0;
    for ch in text.chars() {
        if !is_permitted(ch as u32) {
            if ch == '\t' {
                return Err(ParseError::at("Tab not allowed (use spaces)", line, col));
            }
            return Err(ParseError::at(
                format!("Forbidden code point U+{:04X}", ch as u32),
                line,
                col,
            ));
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    Ok(())
}

/// The permitted set: newline, printable ASCII, and the non-control Unicode
/// ranges minus the noncharacters (U+FDD0..U+FDEF and every U+xxFFFE/FFFF).
fn is_permitted(cp: u32) -> bool {
    cp == 0x000A
        || (0x0020..=0x007E).contains(&cp)
        || (0x00A0..=0xD7FF).contains(&cp)
        || ((0xE000..=0xFFFD).contains(&cp) && !(0xFDD0..=0xFDEF).contains(&cp))
        || ((0x10000..=0x10FFFF).contains(&cp) && (cp & 0xFFFF) < 0xFFFE)
}

fn split_lines(text: &str) -> Result<Vec<ScanLine>> {
    let mut lines = Vec::new();

    for (line_num, raw) in text.split('\n').enumerate() {
        if raw.ends_with(' ') {
            return Err(ParseError::at(
                "Unexpected trailing space",
                line_num,
                raw.len() - 1,
            ));
        }

        let indent = raw.len() - raw.trim_start_matches(' ').len();
        let rest = &raw[indent..];

        // Top-level comments vanish entirely; indented `#` lines are kept and
        // handled as inline comments by the value phase.
        if indent == 0 && rest.starts_with('#') {
            continue;
        }

        let (leader, content) = split_leader(rest, line_num, indent)?;
        lines.push(ScanLine {
            text: content.to_owned(),
            indent,
            leader,
            line: line_num,
        });
    }

    Ok(lines)
}

/// Split a `"- "` list leader off the front of a line's content.
///
/// A bare `-` is a leader with empty content. `-` followed by a digit, `.`,
/// or the word `infinity` is a negative number, not a leader.
fn split_leader(rest: &str, line: usize, indent: usize) -> Result<(bool, &str)> {
    let bytes = rest.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'-' && bytes[1] == b' ' {
        return Ok((true, &rest[2..]));
    }
    if rest == "-" {
        return Ok((true, ""));
    }
    if bytes.len() >= 2
        && bytes[0] == b'-'
        && bytes[1] != b' '
        && bytes[1] != b'.'
        && !bytes[1].is_ascii_digit()
        && !rest.starts_with("-infinity")
    {
        return Err(ParseError::at("Expected space after \"-\"", line, indent + 1));
    }
    if bytes.first() == Some(&b'*') && (bytes.len() == 1 || bytes[1] == b' ') {
        return Err(ParseError::at("Unexpected character \"*\"", line, indent));
    }
    Ok((false, rest))
}
