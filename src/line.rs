//! Line tokenizer — splits `name -> type(args), options` into its parts.
//!
//! A line without `->` is either one of the implicit auto-columns (`id`,
//! `timestamps`, ...) or noise that is silently dropped.

use crate::error::AttributeError;
use regex::Regex;
use std::sync::LazyLock;

/// Separates the attribute name from its type expression.
pub const SEPARATOR: &str = "->";

/// A line holding only this ends an input session.
pub const INPUT_TERMINATOR: &str = ":q";

// word, optional parenthesized arguments, optional comma-separated options
static RE_TYPE_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\s*\((.+)\))?(?:\s*,\s*(.*))?").unwrap()
});

/// Auto-column keys: accepted spellings, record name (`None` keeps the
/// typed key) and canonical type.
const IMPLICIT_COLUMNS: &[(&[&str], Option<&str>, &str)] = &[
    (&["id"], None, "bigincrements"),
    (&["uuid"], None, "uuid"),
    (&["timestamps"], Some("timestamps"), "timestamps"),
    (&["timestampstz"], None, "timestampstz"),
    (&["nullabletimestamps"], None, "nullabletimestamps"),
    (&["softdelete", "softdeletes", "delete"], Some("softdeletes"), "softdeletes"),
    (&["softdeletetz", "softdeletestz", "deletetz"], None, "softdeletestz"),
    (&["remember", "token", "remembertoken"], None, "remembertoken"),
];

/// Tokens of a line with an explicit type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedLine {
    pub key: String,
    /// Raw type word, not yet normalized.
    pub type_token: String,
    pub arguments: Vec<String>,
    pub options: Vec<String>,
}

/// Outcome of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Typed(TypedLine),
    /// Auto-column resolved to its fixed name and type.
    Implicit { name: String, type_name: &'static str },
    /// Blank line or an unknown bare name.
    Skipped,
}

impl ParsedLine {
    /// Normalized key of the line, if it produced one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Typed(typed) => Some(&typed.key),
            Self::Implicit { name, .. } => Some(name),
            Self::Skipped => None,
        }
    }
}

/// Lowercase and strip every hyphen, so `Created-At` and `createdat`
/// collapse onto one key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace('-', "")
}

/// Tokenize one raw input line.
pub fn parse_line(line: &str) -> Result<ParsedLine, AttributeError> {
    let mut parts = line.splitn(2, SEPARATOR).map(str::trim);
    let key = normalize_name(parts.next().unwrap_or_default());

    let Some(expr) = parts.next() else {
        return Ok(implicit_column(&key));
    };
    if key.is_empty() {
        return Ok(ParsedLine::Skipped);
    }

    let caps = RE_TYPE_EXPR
        .captures(expr)
        .ok_or_else(|| AttributeError::MalformedLine {
            line: line.trim().to_string(),
        })?;

    Ok(ParsedLine::Typed(TypedLine {
        key,
        type_token: caps[1].to_string(),
        arguments: caps
            .get(2)
            .map(|m| split_list(m.as_str(), true))
            .unwrap_or_default(),
        options: caps
            .get(3)
            .map(|m| split_list(m.as_str(), false))
            .unwrap_or_default(),
    }))
}

fn implicit_column(key: &str) -> ParsedLine {
    IMPLICIT_COLUMNS
        .iter()
        .find(|(spellings, _, _)| spellings.contains(&key))
        .map(|(_, name, type_name)| ParsedLine::Implicit {
            name: name.unwrap_or(key).to_string(),
            type_name: *type_name,
        })
        .unwrap_or(ParsedLine::Skipped)
}

/// Split on `,` and trim. Positional arguments keep empty slots; empty
/// option tokens carry nothing and are dropped.
fn split_list(raw: &str, keep_empty: bool) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| keep_empty || !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split editor input into attribute lines, stopping at the session
/// terminator.
pub fn input_lines(text: &str) -> Vec<&str> {
    text.lines()
        .take_while(|line| line.trim() != INPUT_TERMINATOR)
        .collect()
}
