//! Screen source reading
//!
//! A screen description is plain JSON. Inside a project, screen files wrap
//! that JSON in a small header:
//!
//! ```text
//! #|
//! $JSON
//! {"authURL": [...], "Properties": {...}}
//! |#
//! ```

use serde_json::Value;

use crate::error::SourceError;

const BLOCK_OPEN: &str = "#|";
const BLOCK_CLOSE: &str = "|#";
const JSON_MARKER: &str = "$JSON";

/// Decode a screen description from plain JSON or a framed screen file
pub fn parse_screen_source(text: &str) -> Result<Value, SourceError> {
    let (body, base) = json_section(text)?;
    serde_json::from_str(body).map_err(|err| SourceError::from_json(err, body, base))
}

/// Locate the JSON body and its byte offset in `text`
fn json_section(text: &str) -> Result<(&str, usize), SourceError> {
    if !text.trim_start().starts_with(BLOCK_OPEN) {
        return Ok((text, 0));
    }

    let mut offset = 0;
    let mut body_start = None;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        match body_start {
            None if trimmed == JSON_MARKER => body_start = Some(offset + line.len()),
            Some(start) if trimmed == BLOCK_CLOSE => return Ok((&text[start..offset], start)),
            _ => {}
        }
        offset += line.len();
    }

    match body_start {
        Some(start) => Ok((&text[start..], start)),
        None => Err(SourceError::MissingJsonSection),
    }
}
