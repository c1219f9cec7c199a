//! Frontfill - batch-generate missing frontmatter for markdown blog trees.
//!
//! # Overview
//!
//! Frontfill walks a directory tree of markdown blog posts, asks a
//! text-completion model to synthesize missing frontmatter (title,
//! description, tags, categories, flags) for each post and each folder
//! `_index.md` file, and writes the augmented files to a mirrored output
//! tree. Non-markdown assets are copied untouched.
//!
//! # Example
//!
//! ```no_run
//! use frontfill::cli::Output;
//! use frontfill::completion::OpenAiCompletions;
//! use frontfill::config::{CompletionConfig, WalkOptions};
//! use frontfill::walker::TreeWalker;
//! use std::path::Path;
//!
//! let config = CompletionConfig::from_env("gpt-3.5-turbo-instruct").unwrap();
//! let client = OpenAiCompletions::new(config).unwrap();
//! let output = Output::new(false);
//!
//! let walker = TreeWalker::new(Some(&client), WalkOptions::default(), &output);
//! let stats = walker.mirror(Path::new("content"), Path::new("public")).unwrap();
//! eprintln!("{} posts synthesized", stats.posts);
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod synth;
pub mod walker;

// Re-export main types at crate root
pub use completion::CompletionClient;
pub use config::{CompletionConfig, WalkOptions};
pub use document::Document;
pub use error::{FrontfillError, Result};
pub use synth::Synthesizer;
pub use walker::{TreeWalker, WalkStats};
