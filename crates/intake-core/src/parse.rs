//! Multi-format input parsing.
//!
//! Raw operator submissions arrive as object-notation text (JSON), markup
//! text (XML), or an already-structured value. Detection is content-based
//! on the leading delimiter; there is no filename to sniff. Everything
//! converges on the canonical [`Value`] model, and anything that cannot be
//! unambiguously interpreted fails with a [`ParseError`]. Embedded content
//! is never evaluated: a `<script>` child in markup comes back as the plain
//! text value of its element name.

use crate::value::{Mapping, Value};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors for malformed or unrecognized input. Always surfaced to the
/// caller; the parser never silently drops an item.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(String),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("Unrecognized string format: {0}")]
    UnrecognizedFormat(String),
    #[error("Unsupported data type: {0}")]
    UnsupportedType(String),
}

/// Raw pipeline input: text in one of the accepted encodings, or a value
/// that was already structured by the caller.
#[derive(Debug, Clone)]
pub enum RawInput {
    Text(String),
    Structured(Value),
}

/// Parse one raw input into a canonical value.
///
/// `None` models the absent/null input of the intake contract and fails as
/// an unsupported type. Structured mappings pass through unchanged. No
/// schema checking happens here; arbitrary nested shapes are accepted and
/// left for record validation.
pub fn parse(input: Option<RawInput>) -> Result<Value, ParseError> {
    match input {
        None => Err(ParseError::UnsupportedType("absent".to_string())),
        Some(RawInput::Structured(value)) => match value {
            Value::Map(_) => Ok(value),
            other => Err(ParseError::UnsupportedType(type_name(&other).to_string())),
        },
        Some(RawInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                parse_json(trimmed)
            } else if trimmed.starts_with('<') {
                parse_xml(trimmed)
            } else {
                Err(ParseError::UnrecognizedFormat(truncate(trimmed, 50)))
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Str(_) => "string",
        Value::Num(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Map(_) => "mapping",
        Value::Seq(_) => "sequence",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_chars).collect();
        format!("{}...", prefix)
    }
}

/// Full round-trip JSON parse; nested objects and sequences are preserved.
fn parse_json(text: &str) -> Result<Value, ParseError> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
    Ok(Value::from(parsed))
}

/// Parse markup into a flat mapping of depth-1 child element name to text
/// content. Attributes are ignored; nested structure below depth 1 only
/// contributes its text, preserved verbatim (no whitespace trimming).
/// Mismatched or unterminated tags fail, as does anything after the
/// document root: exactly one root element, nothing but whitespace around
/// it.
fn parse_xml(text: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(text);

    let mut out = Mapping::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    // Name and accumulated text of the depth-1 child currently open.
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 && saw_root {
                    return Err(ParseError::Xml("junk after document element".to_string()));
                }
                depth += 1;
                if depth == 1 {
                    saw_root = true;
                } else if depth == 2 {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    current = Some((name, String::new()));
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    if saw_root {
                        return Err(ParseError::Xml("junk after document element".to_string()));
                    }
                    saw_root = true;
                } else if depth == 1 {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    out.insert(name, Value::Str(String::new()));
                }
            }
            Ok(Event::Text(t)) => {
                let unescaped = t.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&unescaped);
                } else if depth == 0 && !unescaped.trim().is_empty() {
                    // Non-whitespace text outside the root element.
                    return Err(ParseError::Xml("junk after document element".to_string()));
                }
            }
            Ok(Event::CData(t)) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&t.into_inner()));
                } else if depth == 0 {
                    return Err(ParseError::Xml("junk after document element".to_string()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some((name, text)) = current.take() {
                        out.insert(name, Value::Str(text));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => {
                if depth != 0 || !saw_root {
                    return Err(ParseError::Xml("unterminated element".to_string()));
                }
                break;
            }
            // Declarations, comments, and processing instructions carry no
            // record data.
            Ok(_) => {}
            Err(e) => return Err(ParseError::Xml(e.to_string())),
        }
    }

    Ok(Value::Map(out))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
