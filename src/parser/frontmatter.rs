//! YAML frontmatter parsing and serialization.

use crate::error::{FrontfillError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
}

/// Split text into frontmatter and body.
///
/// The frontmatter must start at the very beginning with `---` and close
/// with `---` on its own line. Text without a valid block is all body.
pub fn split_frontmatter(text: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: text,
    };

    let Some(after_open) = text.strip_prefix("---") else {
        return no_frontmatter;
    };

    // A newline must follow the opening delimiter
    let yaml_start = if after_open.starts_with('\n') {
        4
    } else if after_open.starts_with("\r\n") {
        5
    } else {
        return no_frontmatter;
    };

    let tail = &text[yaml_start..];

    // Closing delimiter on its own line, or at end of file
    let closing = tail
        .find("\n---\n")
        .map(|pos| (pos, pos + 5))
        .or_else(|| tail.find("\n---\r\n").map(|pos| (pos, pos + 6)))
        .or_else(|| {
            if tail.ends_with("\n---") {
                Some((tail.len() - 4, tail.len()))
            } else {
                None
            }
        });

    match closing {
        Some((yaml_end, body_start)) => FrontmatterSplit {
            yaml: Some(&tail[..yaml_end]),
            body: &tail[body_start..],
        },
        None => no_frontmatter,
    }
}

/// Parse a raw YAML frontmatter string into a mapping.
///
/// An empty block yields an empty mapping; a non-mapping document is an error.
pub fn parse_mapping(yaml: &str, path: &Path) -> Result<Mapping> {
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontfillError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(FrontfillError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: "frontmatter is not a mapping".to_string(),
        }),
    }
}

/// Serialize a metadata mapping to a delimited frontmatter block.
pub fn serialize_mapping(metadata: &Mapping) -> Result<String> {
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("---\n{}---\n", yaml))
}
