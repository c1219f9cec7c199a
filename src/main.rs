//! Frontfill CLI entry point.

use clap::Parser;
use frontfill::cli::{Cli, Output};
use frontfill::completion::{CompletionClient, OpenAiCompletions};
use frontfill::config::CompletionConfig;
use frontfill::error::FrontfillError;
use frontfill::walker::TreeWalker;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), FrontfillError> {
    let options = cli.walk_options();
    let output = Output::new(cli.quiet);

    // Credentials are only read when some synthesis is enabled, so a
    // mirror-only run works without an API key.
    let client = if options.needs_client() {
        let config = CompletionConfig::from_env(cli.model.clone())?;
        Some(OpenAiCompletions::new(config)?)
    } else {
        None
    };
    let client_ref = client.as_ref().map(|c| c as &dyn CompletionClient);

    let walker = TreeWalker::new(client_ref, options, &output);
    let stats = walker.mirror(&cli.src, &cli.dest)?;

    output.info(&format!(
        "Done: {} posts synthesized, {} index files synthesized, {} files copied",
        stats.posts, stats.indexes, stats.copied
    ));
    Ok(())
}
