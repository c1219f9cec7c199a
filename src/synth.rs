//! Frontmatter synthesis: render a prompt, invoke the model, parse the
//! reply, merge it into the document's metadata.

use crate::completion::CompletionClient;
use crate::document::Document;
use crate::error::{FrontfillError, Result};
use crate::parser::parse_model_output;
use crate::prompt::{self, INDEX_TEMPLATE, POST_TEMPLATE};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value as YamlValue};

/// Author injected into `params` when a post has none.
pub const DEFAULT_AUTHOR: &str = "Shane Zhang";

/// Inclusive window for the random default `date` field.
pub const DATE_RANGE_START: &str = "2024-01-01";
pub const DATE_RANGE_END: &str = "2024-10-30";

/// Synthesizes missing frontmatter through a completion client.
///
/// Each entry point issues exactly one outbound request; there is no retry
/// and no caching, so processing the same document twice makes two calls.
pub struct Synthesizer<'a> {
    client: &'a dyn CompletionClient,
}

impl<'a> Synthesizer<'a> {
    pub fn new(client: &'a dyn CompletionClient) -> Self {
        Self { client }
    }

    /// Synthesize frontmatter for a single post from its body text.
    ///
    /// Merges the model's fields into the metadata (same-name keys are
    /// overwritten, everything else is untouched), then injects the
    /// post-only defaults: a random `date` and `params.author`.
    pub fn synthesize_post(&self, document: &mut Document) -> Result<()> {
        let fields = self.generate(POST_TEMPLATE, &document.body, &document.metadata)?;
        merge_fields(&mut document.metadata, fields)?;
        apply_post_defaults(&mut document.metadata)
    }

    /// Synthesize frontmatter for a folder index from its child file names.
    pub fn synthesize_index(&self, document: &mut Document, child_names: &[String]) -> Result<()> {
        let content = child_names.join(", ");
        let fields = self.generate(INDEX_TEMPLATE, &content, &document.metadata)?;
        merge_fields(&mut document.metadata, fields)
    }

    fn generate(
        &self,
        template: &str,
        content: &str,
        metadata: &Mapping,
    ) -> Result<serde_json::Map<String, JsonValue>> {
        let frontmatter = stringify_metadata(metadata)?;
        let rendered = prompt::render(template, content, &frontmatter)?;
        let reply = self.client.invoke(&rendered)?;
        parse_model_output(&reply)
    }
}

/// Merge synthesized fields on top of existing metadata.
///
/// An existing key keeps its position in the mapping; keys the model did
/// not supply are left untouched.
fn merge_fields(
    metadata: &mut Mapping,
    fields: serde_json::Map<String, JsonValue>,
) -> Result<()> {
    for (key, value) in fields {
        let yaml = serde_yaml::to_value(&value)?;
        metadata.insert(YamlValue::String(key), yaml);
    }
    Ok(())
}

/// Inject the post-only derived defaults.
fn apply_post_defaults(metadata: &mut Mapping) -> Result<()> {
    if !metadata.contains_key("date") {
        metadata.insert(
            YamlValue::String("date".to_string()),
            YamlValue::String(random_date(DATE_RANGE_START, DATE_RANGE_END)?),
        );
    }

    if !metadata.contains_key("params") {
        metadata.insert(
            YamlValue::String("params".to_string()),
            YamlValue::Mapping(Mapping::new()),
        );
    }
    if let Some(YamlValue::Mapping(params)) = metadata.get_mut("params") {
        if !params.contains_key("author") {
            params.insert(
                YamlValue::String("author".to_string()),
                YamlValue::String(DEFAULT_AUTHOR.to_string()),
            );
        }
    }

    Ok(())
}

/// Pick a uniformly random date in `[start, end]`, formatted `YYYY-MM-DD`.
pub fn random_date(start: &str, end: &str) -> Result<String> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let days = (end - start).num_days();
    if days < 0 {
        return Err(FrontfillError::Configuration(format!(
            "date range ends before it starts: {start}..{end}"
        )));
    }

    let offset = rand::rng().random_range(0..=days);
    Ok((start + Duration::days(offset)).format("%Y-%m-%d").to_string())
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| FrontfillError::Configuration(format!("invalid date {text:?}: {e}")))
}

/// One-way textual summary of metadata for prompt embedding: a flat JSON
/// object with every value rendered as a string. Not meant to be parsed
/// back.
pub fn stringify_metadata(metadata: &Mapping) -> Result<String> {
    let mut summary = serde_json::Map::new();
    for (key, value) in metadata {
        let name = match key {
            YamlValue::String(s) => s.clone(),
            other => value_string(other)?,
        };
        summary.insert(name, JsonValue::String(value_string(value)?));
    }
    Ok(serde_json::to_string(&summary)?)
}

/// Render a YAML value in its string form. Dates arrive from the decoder
/// as `YYYY-MM-DD` strings and pass through unchanged; compound values
/// render as compact JSON text.
fn value_string(value: &YamlValue) -> Result<String> {
    Ok(match value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::String(s) => s.clone(),
        other => serde_json::to_string(other)?,
    })
}
