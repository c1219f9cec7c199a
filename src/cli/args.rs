//! CLI argument definitions using clap.

use crate::config::{self, WalkOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "frontfill")]
#[command(author, version, about = "Generate missing frontmatter for a markdown blog tree", long_about = None)]
pub struct Cli {
    /// Source folder containing markdown files
    pub src: PathBuf,

    /// Destination folder for the processed tree
    pub dest: PathBuf,

    /// Completion model name
    #[arg(default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// Mirror-copy posts instead of synthesizing their frontmatter
    #[arg(long)]
    pub skip_posts: bool,

    /// Mirror-copy _index.md files instead of synthesizing them
    #[arg(long)]
    pub skip_index: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            process_posts: !self.skip_posts,
            process_index: !self.skip_index,
        }
    }
}
