//! Tolerant parsing of model-generated JSON.
//!
//! Completion models asked for JSON sometimes emit scripting-language
//! literals (`True`, `False`, `None`) in place of the JSON ones. The parser
//! normalizes those tokens before handing the text to strict JSON parsing.
//! Substitution only applies outside double-quoted string spans, so a
//! generated value like `"He said True"` survives untouched.

use crate::error::{FrontfillError, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn literal_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:True|False|None)\b").unwrap())
}

fn substitute_literals(segment: &str) -> String {
    literal_token_re()
        .replace_all(segment, |caps: &regex::Captures<'_>| match &caps[0] {
            "True" => "true",
            "False" => "false",
            _ => "null",
        })
        .into_owned()
}

/// Replace whole-word `True`/`False`/`None` tokens with JSON literals,
/// leaving quoted string spans verbatim.
pub fn normalize_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
                out.push_str(&text[segment_start..=i]);
                segment_start = i + 1;
            }
        } else if byte == b'"' {
            out.push_str(&substitute_literals(&text[segment_start..i]));
            in_string = true;
            segment_start = i;
        }
    }

    // Trailing segment: an unterminated string is copied verbatim
    if in_string {
        out.push_str(&text[segment_start..]);
    } else {
        out.push_str(&substitute_literals(&text[segment_start..]));
    }

    out
}

/// Parse model output text into a JSON object after literal normalization.
///
/// A parse failure or a non-object top level surfaces the post-substitution
/// text alongside the error detail; no partial mapping is ever returned.
pub fn parse_model_output(text: &str) -> Result<Map<String, Value>> {
    let normalized = normalize_literals(text);

    let value: Value = serde_json::from_str(&normalized).map_err(|e| {
        FrontfillError::MalformedModelOutput {
            message: e.to_string(),
            text: normalized.clone(),
        }
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(FrontfillError::MalformedModelOutput {
            message: format!("expected a JSON object, got {other}"),
            text: normalized,
        }),
    }
}
