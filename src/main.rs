use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use depwatch::config::Config;
use depwatch::freshness::FreshnessResolver;

#[derive(Parser)]
#[command(name = "depwatch")]
#[command(version, about = "Tracks outdated dependencies in hosted repositories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a repository URL and report its dependency freshness
    Check {
        /// Repository URL (github.com or gitlab.com)
        url: String,

        /// Print the full package-status list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { url, json } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(check(&url, json)),
    }
}

async fn check(url: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::default();
    let resolver = FreshnessResolver::new(&config);
    let statuses = resolver.resolve(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in &statuses {
        let latest = status.latest_version.as_deref().unwrap_or("unknown");
        let marker = if status.is_outdated { "outdated" } else { "ok" };
        println!(
            "{:<10} {} {} -> {} ({})",
            marker, status.name, status.current_version, latest, status.source_file
        );
    }

    Ok(())
}
