//! Prompt templates and the placeholder renderer.
//!
//! Templates carry two named placeholders, `{frontmatter}` and `{content}`.
//! Literal braces are escaped by doubling, so the embedded JSON examples
//! render with single braces.

use crate::error::{FrontfillError, Result};

/// Template for synthesizing a single post's frontmatter.
pub const POST_TEMPLATE: &str = r#"Given the following partial frontmatter:

{frontmatter}

And the following content of a blog post written in markdown:

{content}

Generate the full frontmatter for the blog post in JSON format.
Make sure the original frontmatter is included in the new frontmatter.
Return only the JSON object, with no other text before or after it.
Every field must be present, even if the value is an empty string or an empty list.
Boolean and null values must be written as the JSON literals true, false and null.

Example output with valid JSON format:

{{
    "title": "Title of the post (summarize based on the content of the post)",
    "description": "A description of the post within 100 words (summarize based on the content of the post)",
    "categories": ["List of categories, use simple words, and as short as possible"],
    "tags": ["List of tags, use simple words, and as short as possible"],
    "math": true or false (true if the content contains any LaTeX),
    "draft": true or false (true if the post is very rough and needs polishing)
}}
"#;

/// Template for synthesizing a folder index's frontmatter from its file names.
pub const INDEX_TEMPLATE: &str = r#"Given the following partial frontmatter (if the frontmatter is empty, create all fields):

{frontmatter}

And the following blog post names:

{content}

Generate the full frontmatter for the folder index in JSON format.
Make sure the original frontmatter is included in the new frontmatter.
Return only the JSON object, with no other text before or after it.
Every field must be present, even if the value is an empty string or an empty list.
Boolean and null values must be written as the JSON literals true, false and null.

Example output with valid JSON format:

{{
    "title": "Title of the folder (summarize based on the post names)",
    "summary": "A summary of the posts inside this folder",
    "description": "A description of what this folder is about"
}}
"#;

/// Substitute `{content}` and `{frontmatter}` into a template.
///
/// `{{` and `}}` escape to literal single braces; any other placeholder
/// name is an error.
pub fn render(template: &str, content: &str, frontmatter: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len() + content.len() + frontmatter.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(FrontfillError::UnknownPlaceholder(name)),
                    }
                }
                match name.as_str() {
                    "content" => out.push_str(content),
                    "frontmatter" => out.push_str(frontmatter),
                    _ => return Err(FrontfillError::UnknownPlaceholder(name)),
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_both_placeholders() {
        let rendered = render("fm: {frontmatter}; body: {content}", "BODY", "FM").unwrap();
        assert_eq!(rendered, "fm: FM; body: BODY");
    }

    #[test]
    fn test_doubled_braces_become_single() {
        let rendered = render("a {{literal}} brace", "c", "f").unwrap();
        assert_eq!(rendered, "a {literal} brace");
    }

    #[test]
    fn test_unknown_placeholder_is_error() {
        let err = render("hello {world}", "c", "f").unwrap_err();
        match err {
            FrontfillError::UnknownPlaceholder(name) => assert_eq!(name, "world"),
            other => panic!("expected UnknownPlaceholder, got: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_placeholder_is_error() {
        assert!(render("broken {conten", "c", "f").is_err());
    }

    #[test]
    fn test_post_template_renders_json_example() {
        let rendered = render(POST_TEMPLATE, "# Hello", "{}").unwrap();
        assert!(rendered.contains("# Hello"));
        assert!(rendered.contains("{\n    \"title\""));
        assert!(rendered.contains("}\n"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_index_template_renders_file_listing() {
        let rendered = render(INDEX_TEMPLATE, "a.md, b.md", "{}").unwrap();
        assert!(rendered.contains("a.md, b.md"));
        assert!(rendered.contains("\"summary\""));
        assert!(!rendered.contains("{{"));
    }
}
