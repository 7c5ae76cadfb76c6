//! Syntax loading: raw file → parsed document

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FlowError;

/// Deepest array/object nesting accepted before parsing
pub const MAX_DEPTH: usize = 1000;

/// Read a file as UTF-8 and parse it as JSON
pub fn load_document(path: &Path) -> Result<Value, FlowError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        debug!(path = %path.display(), error = %source, "cannot read file");
        FlowError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!(path = %path.display(), bytes = text.len(), "read file");
    parse_document(&text)
}

/// Parse JSON text into a document.
///
/// serde_json's own recursion limit (128) is lifted; nesting is bounded by
/// [`MAX_DEPTH`] instead, checked on the raw text before the parser recurses.
pub fn parse_document(text: &str) -> Result<Value, FlowError> {
    if let Some(line) = first_line_beyond(text, MAX_DEPTH) {
        debug!(line, limit = MAX_DEPTH, "JSON nesting too deep");
        return Err(FlowError::TooDeep {
            line,
            limit: MAX_DEPTH,
        });
    }

    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();

    Value::deserialize(&mut de)
        .and_then(|doc| de.end().map(|()| doc))
        .map_err(|e| {
            debug!(line = e.line(), column = e.column(), "JSON syntax error");
            FlowError::from_parse(&e)
        })
}

/// Line (1-based) where bracket nesting first exceeds `limit`.
///
/// Brackets inside string literals are ignored. Malformed input is scanned
/// the same way; the parser reports its syntax errors afterwards.
fn first_line_beyond(text: &str, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if byte == b'\n' {
            line += 1;
        }

        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return Some(line);
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    None
}
