//! End-to-end tree walk tests against temporary directory trees.

use frontfill::cli::Output;
use frontfill::completion::CompletionClient;
use frontfill::config::WalkOptions;
use frontfill::document::Document;
use frontfill::error::FrontfillError;
use frontfill::walker::TreeWalker;
use pretty_assertions::assert_eq;
use serde_yaml::Value;
use std::fs;
use std::sync::Mutex;

/// Stub completion client returning a canned reply and recording prompts.
struct StubClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubClient {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionClient for StubClient {
    fn invoke(&self, prompt: &str) -> frontfill::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

const POST_REPLY: &str = r#"{"title": "Hello", "description": "", "categories": [], "tags": [], "math": False, "draft": False}"#;

const INDEX_REPLY: &str = r#"{"title": "Blog", "summary": "Posts", "description": "A folder of posts"}"#;

const COPY_ONLY: WalkOptions = WalkOptions {
    process_posts: false,
    process_index: false,
};

fn quiet() -> Output {
    Output::new(true)
}

#[test]
fn post_is_synthesized_into_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    let dest = dir.path().join("out");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("post.md"), "# Hello").unwrap();

    let client = StubClient::new(POST_REPLY);
    let output = quiet();
    let walker = TreeWalker::new(Some(&client), WalkOptions::default(), &output);
    let stats = walker.mirror(&src, &dest).unwrap();

    assert_eq!(stats.posts, 1);
    assert_eq!(stats.copied, 0);

    let document = Document::load(&dest.join("post.md")).unwrap();
    assert_eq!(document.body.trim_end(), "# Hello");
    assert_eq!(
        document.metadata.get("title").and_then(Value::as_str),
        Some("Hello")
    );
    assert_eq!(document.metadata.get("math"), Some(&Value::Bool(false)));

    // Derived defaults: random date in window, fixed author
    let date = document
        .metadata
        .get("date")
        .and_then(Value::as_str)
        .unwrap();
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    assert!(parsed >= chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert!(parsed <= chrono::NaiveDate::from_ymd_opt(2024, 10, 30).unwrap());

    let params = document
        .metadata
        .get("params")
        .and_then(Value::as_mapping)
        .unwrap();
    assert_eq!(
        params.get("author").and_then(Value::as_str),
        Some("Shane Zhang")
    );
}

#[test]
fn non_markdown_files_are_copied_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    fs::create_dir(&src).unwrap();
    let bytes: Vec<u8> = (0u8..=255).collect();
    fs::write(src.join("image.png"), &bytes).unwrap();

    // Identical regardless of whether processing is enabled
    for (label, options, client) in [
        ("enabled", WalkOptions::default(), Some(StubClient::new(POST_REPLY))),
        ("disabled", COPY_ONLY, None),
    ] {
        let dest = dir.path().join(format!("out-{label}"));
        let output = quiet();
        let client_ref = client.as_ref().map(|c| c as &dyn CompletionClient);
        let walker = TreeWalker::new(client_ref, options, &output);
        let stats = walker.mirror(&src, &dest).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(fs::read(dest.join("image.png")).unwrap(), bytes);

        let src_mtime = fs::metadata(src.join("image.png")).unwrap().modified().unwrap();
        let dst_mtime = fs::metadata(dest.join("image.png")).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dst_mtime);
    }
}

#[test]
fn index_file_is_synthesized_from_sibling_listing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    let blog = src.join("blog");
    fs::create_dir_all(&blog).unwrap();
    fs::write(blog.join("_index.md"), "").unwrap();
    fs::write(blog.join("a.md"), "# A").unwrap();
    fs::write(blog.join("b.md"), "# B").unwrap();

    let client = StubClient::new(INDEX_REPLY);
    let output = quiet();
    let options = WalkOptions {
        process_posts: false,
        process_index: true,
    };
    let walker = TreeWalker::new(Some(&client), options, &output);
    let dest = dir.path().join("out");
    let stats = walker.mirror(&src, &dest).unwrap();

    assert_eq!(stats.indexes, 1);
    // a.md and b.md fall through to plain copy with posts disabled
    assert_eq!(stats.copied, 2);

    // The prompt carries the full sibling listing of the folder
    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("_index.md, a.md, b.md"));

    let document = Document::load(&dest.join("blog/_index.md")).unwrap();
    assert_eq!(
        document.metadata.get("title").and_then(Value::as_str),
        Some("Blog")
    );
    // Post-only defaults are not injected into index files
    assert!(!document.metadata.contains_key("date"));
    assert!(!document.metadata.contains_key("params"));

    assert_eq!(fs::read_to_string(dest.join("blog/a.md")).unwrap(), "# A");
    assert_eq!(fs::read_to_string(dest.join("blog/b.md")).unwrap(), "# B");
}

#[test]
fn copy_only_run_leaves_markdown_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    fs::create_dir(&src).unwrap();
    let original = "---\ntitle: Keep Me\n---\n\nBody stays the same.\n";
    fs::write(src.join("post.md"), original).unwrap();
    fs::write(src.join("_index.md"), "index body").unwrap();

    let output = quiet();
    let walker = TreeWalker::new(None, COPY_ONLY, &output);
    let dest = dir.path().join("out");
    let stats = walker.mirror(&src, &dest).unwrap();

    assert_eq!(stats.posts, 0);
    assert_eq!(stats.indexes, 0);
    assert_eq!(stats.copied, 2);
    assert_eq!(fs::read_to_string(dest.join("post.md")).unwrap(), original);
    assert_eq!(
        fs::read_to_string(dest.join("_index.md")).unwrap(),
        "index body"
    );
}

#[test]
fn nested_tree_is_mirrored() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    fs::create_dir_all(src.join("a/b/c")).unwrap();
    fs::write(src.join("a/post.md"), "# One").unwrap();
    fs::write(src.join("a/b/post.md"), "# Two").unwrap();
    fs::write(src.join("a/b/c/data.json"), "{}").unwrap();

    let client = StubClient::new(POST_REPLY);
    let output = quiet();
    let walker = TreeWalker::new(Some(&client), WalkOptions::default(), &output);
    let dest = dir.path().join("out");
    let stats = walker.mirror(&src, &dest).unwrap();

    assert_eq!(stats.posts, 2);
    assert_eq!(stats.copied, 1);
    assert!(dest.join("a/post.md").is_file());
    assert!(dest.join("a/b/post.md").is_file());
    assert!(dest.join("a/b/c/data.json").is_file());
}

#[test]
fn malformed_model_output_aborts_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("post.md"), "# Hello").unwrap();

    let client = StubClient::new("not json at all");
    let output = quiet();
    let walker = TreeWalker::new(Some(&client), WalkOptions::default(), &output);
    let result = walker.mirror(&src, &dir.path().join("out"));

    assert!(matches!(
        result,
        Err(FrontfillError::MalformedModelOutput { .. })
    ));
}

#[test]
fn existing_frontmatter_survives_the_merge() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    fs::create_dir(&src).unwrap();
    fs::write(
        src.join("post.md"),
        "---\nweight: 9\ndate: 2024-02-02\n---\n# Hello",
    )
    .unwrap();

    let client = StubClient::new(POST_REPLY);
    let output = quiet();
    let walker = TreeWalker::new(Some(&client), WalkOptions::default(), &output);
    let dest = dir.path().join("out");
    walker.mirror(&src, &dest).unwrap();

    let document = Document::load(&dest.join("post.md")).unwrap();
    // Key absent from the reply is untouched; existing date wins over the default
    assert_eq!(
        document.metadata.get("weight").and_then(Value::as_i64),
        Some(9)
    );
    assert_eq!(
        document.metadata.get("date").and_then(Value::as_str),
        Some("2024-02-02")
    );
}

#[test]
fn mirror_into_existing_destination_directory() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("root");
    let dest = dir.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();
    fs::write(src.join("notes.txt"), "plain").unwrap();

    let output = quiet();
    let walker = TreeWalker::new(None, COPY_ONLY, &output);
    let stats = walker.mirror(&src, &dest).unwrap();

    assert_eq!(stats.copied, 1);
    assert_eq!(fs::read_to_string(dest.join("notes.txt")).unwrap(), "plain");
}
