//! # yay-core
//!
//! Parser for **YAY**, a strict, indentation-sensitive, human-editable data
//! serialization format (a stricter YAML-like). Given a UTF-8 document it
//! produces either a single typed [`Value`] tree or a [`ParseError`] naming
//! the line, column, and cause of the first rejection.
//!
//! Parsing is a pure function of `(source, filename)` and runs as a
//! three-phase pipeline, each phase consuming the previous one's output:
//!
//! 1. **Scanner** — validates the raw bytes (UTF-8, permitted code points,
//!    no tabs, no trailing spaces) and splits them into scan lines with
//!    indent and list-leader information.
//! 2. **Outline lexer** — turns the indent structure into an explicit block
//!    stream of `Start`/`Stop`/`Text`/`Break` tokens.
//! 3. **Value builder** — recursive descent over the token stream into the
//!    value tree: objects, arrays, scalars, block strings, and byte
//!    literals.
//!
//! ## Quick start
//!
//! ```rust
//! use yay_core::{parse, Value};
//!
//! let doc = b"name: \"YAY\"\nversion: 4\n";
//! let value = parse(doc, None).unwrap();
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("YAY"));
//! assert_eq!(value.get("version"), Some(&Value::int(4)));
//!
//! let err = parse(b"tabs:\tnever\n", Some("demo.yay")).unwrap_err();
//! assert_eq!(err.to_string(), "Tab not allowed (use spaces) at 1:6 of <demo.yay>");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the [`Value`] tree: constructors, accessors, structural
//!   equality (NaN == NaN, object pair order ignored)
//! - [`error`] — [`ParseError`] with 1-based line/column

mod builder;
mod outline;
mod scalar;
mod scanner;

pub mod error;
pub mod value;

pub use error::{ParseError, Result};
pub use value::{BigInt, Value};

/// Parse a YAY document into a [`Value`] tree.
///
/// `source` is the raw UTF-8 document. `filename`, when given, is woven into
/// the error's `Display` rendering as ` at <line>:<column> of <filename>`;
/// the structured `line`/`column` fields are populated either way.
///
/// The returned tree is owned by the caller; all intermediate buffers are
/// released before this function returns, on success and failure alike.
pub fn parse(source: &[u8], filename: Option<&str>) -> Result<Value> {
    parse_document(source).map_err(|err| err.with_filename(filename))
}

fn parse_document(source: &[u8]) -> Result<Value> {
    let tokens = {
        let lines = scanner::scan(source)?;
        outline::tokenize(&lines)
    };
    builder::build(&tokens)
}
