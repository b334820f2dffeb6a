use clap::Parser;
use tracing_subscriber::EnvFilter;

use relnotes::{render, Config, GitHubClient, GitHubRepo, PipelineConfig, ReleaseNotesPipeline};

/// Generate the release notes automatically from GitHub pull requests.
///
/// Redirect the output to keep it, e.g. `relnotes v0.14.0 main --version 0.15.0 > notes.rst`.
#[derive(Parser, Debug)]
#[command(name = "relnotes")]
#[command(about = "Draft napari release notes from merged GitHub pull requests")]
#[command(disable_version_flag = true)]
struct Args {
    /// The starting tag
    from_commit: String,

    /// The head branch
    to_commit: String,

    /// Version you're about to release
    #[arg(long, default_value = "0.2.0")]
    version: String,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("relnotes=info,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Fails on a missing GH_TOKEN before anything touches the network
    let config = Config::from_env()?;

    let github = GitHubClient::from_config(&config)?;
    let repo = GitHubRepo::open(github, &config.repo_owner, &config.repo_name).await?;

    let pipeline = ReleaseNotesPipeline::new(
        repo,
        PipelineConfig {
            show_progress: !args.quiet,
        },
    );

    let notes = pipeline
        .run(&args.from_commit, &args.to_commit, &args.version)
        .await?;

    print!("{}", render(&notes));

    Ok(())
}
