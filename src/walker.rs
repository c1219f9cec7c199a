//! Recursive mirror of a source tree into a destination tree.

use crate::cli::output::Output;
use crate::completion::CompletionClient;
use crate::config::WalkOptions;
use crate::document::Document;
use crate::error::{FrontfillError, Result};
use crate::synth::Synthesizer;
use std::fs;
use std::path::Path;

/// File name marking a folder index document.
pub const INDEX_FILE: &str = "_index.md";

/// Counts of work done during a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    /// Posts that went through synthesis.
    pub posts: usize,
    /// Index files that went through synthesis.
    pub indexes: usize,
    /// Files copied byte-for-byte.
    pub copied: usize,
}

/// Walks a source tree depth-first and mirrors it into a destination.
///
/// Markdown posts and `_index.md` files get their frontmatter synthesized
/// when the corresponding option is enabled; everything else is copied
/// byte-for-byte with its modification time preserved. Any failure aborts
/// the whole walk, leaving the destination partially populated.
pub struct TreeWalker<'a> {
    synthesizer: Option<Synthesizer<'a>>,
    options: WalkOptions,
    output: &'a Output,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker. `client` may be `None` only when both processing
    /// options are disabled (a pure mirror run).
    pub fn new(
        client: Option<&'a dyn CompletionClient>,
        options: WalkOptions,
        output: &'a Output,
    ) -> Self {
        Self {
            synthesizer: client.map(Synthesizer::new),
            options,
            output,
        }
    }

    /// Mirror `src` into `dst`, returning work counts.
    pub fn mirror(&self, src: &Path, dst: &Path) -> Result<WalkStats> {
        if !src.is_dir() {
            return Err(FrontfillError::SourceNotFound(src.to_path_buf()));
        }
        let mut stats = WalkStats::default();
        self.walk_dir(src, dst, &mut stats)?;
        Ok(stats)
    }

    fn synthesizer(&self) -> Result<&Synthesizer<'a>> {
        self.synthesizer.as_ref().ok_or_else(|| {
            FrontfillError::Configuration(
                "synthesis is enabled but no completion client was provided".to_string(),
            )
        })
    }

    fn walk_dir(&self, src: &Path, dst: &Path, stats: &mut WalkStats) -> Result<()> {
        fs::create_dir_all(dst)?;

        let mut entries: Vec<fs::DirEntry> =
            fs::read_dir(src)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let child_names: Vec<String> = entries
            .iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();

        // The folder index is synthesized from the full entry listing of
        // its own directory, before the per-entry pass.
        if self.options.process_index && child_names.iter().any(|name| name == INDEX_FILE) {
            let index_src = src.join(INDEX_FILE);
            self.output
                .info(&format!("index  {}", index_src.display()));
            let mut document = Document::load(&index_src)?;
            self.synthesizer()?
                .synthesize_index(&mut document, &child_names)?;
            document.save(&dst.join(INDEX_FILE))?;
            stats.indexes += 1;
        }

        for entry in entries {
            let path = entry.path();
            let dest = dst.join(entry.file_name());

            if entry.file_type()?.is_dir() {
                self.walk_dir(&path, &dest, stats)?;
            } else if entry.file_name() == INDEX_FILE {
                // Already written above when index processing is on
                if !self.options.process_index {
                    copy_with_times(&path, &dest)?;
                    stats.copied += 1;
                }
            } else if self.options.process_posts && is_markdown(&path) {
                self.output.info(&format!("post   {}", path.display()));
                let mut document = Document::load(&path)?;
                self.synthesizer()?.synthesize_post(&mut document)?;
                document.save(&dest)?;
                stats.posts += 1;
            } else {
                copy_with_times(&path, &dest)?;
                stats.copied += 1;
            }
        }

        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

/// Copy a file byte-for-byte, carrying over its timestamps.
fn copy_with_times(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)?;

    let metadata = fs::metadata(src)?;
    let mut times = fs::FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let dest = fs::OpenOptions::new().write(true).open(dst)?;
    dest.set_times(times)?;
    Ok(())
}
