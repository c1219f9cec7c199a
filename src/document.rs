//! Markdown document representation: frontmatter metadata plus body text.

use crate::error::Result;
use crate::parser::{parse_mapping, serialize_mapping, split_frontmatter};
use serde_yaml::Mapping;
use std::path::Path;

/// A markdown document with its frontmatter decoded.
///
/// `metadata` preserves the key order of the source block; `body` is the
/// text after the closing delimiter, byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Frontmatter key-value mapping (empty when the file has none).
    pub metadata: Mapping,

    /// Content below the frontmatter.
    pub body: String,
}

impl Document {
    /// Create a document from parts.
    pub fn new(metadata: Mapping, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Decode document text. `path` is used for error context only.
    pub fn decode(text: &str, path: &Path) -> Result<Self> {
        let split = split_frontmatter(text);
        let metadata = match split.yaml {
            Some(yaml) => parse_mapping(yaml, path)?,
            None => Mapping::new(),
        };
        Ok(Self {
            metadata,
            body: split.body.to_string(),
        })
    }

    /// Encode the document back to its two-part text form.
    ///
    /// A document with empty metadata encodes to the bare body, so an
    /// unprocessed file round-trips unchanged.
    pub fn encode(&self) -> Result<String> {
        if self.metadata.is_empty() {
            Ok(self.body.clone())
        } else {
            Ok(format!("{}{}", serialize_mapping(&self.metadata)?, self.body))
        }
    }

    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::decode(&text, path)
    }

    /// Encode and write the document to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }
}
