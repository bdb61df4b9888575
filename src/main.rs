use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mc_version_bump::config::{self, Config};
use mc_version_bump::github::GitHubClient;
use mc_version_bump::manifest::ManifestClient;
use mc_version_bump::mappings::YarnMetaClient;
use mc_version_bump::update::{self, Outcome};

#[derive(Parser)]
#[command(name = "mc-version-bump")]
#[command(version, about = "Bumps Minecraft version markers once Fabric mappings are published")]
struct Cli {
    /// Path of the properties file, both locally and in the target repository
    #[arg(long, default_value = config::DEFAULT_PROPERTIES_PATH)]
    properties: String,

    /// Branch to commit to and dispatch the workflow on
    #[arg(long)]
    branch: Option<String>,

    /// Workflow file to dispatch after a successful commit
    #[arg(long)]
    workflow: Option<String>,

    /// Log the patched file instead of committing and dispatching
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    config.properties_path = cli.properties;
    if let Some(branch) = cli.branch {
        config.branch = branch;
    }
    if let Some(workflow) = cli.workflow {
        config.workflow = workflow;
    }
    config.dry_run = cli.dry_run;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let manifest = ManifestClient::default();
    let github = GitHubClient::with_token(&config.token);
    let yarn = YarnMetaClient::default();

    match update::run(&config, &manifest, &github, &yarn).await? {
        Outcome::UpToDate => info!("Versions already up to date"),
        Outcome::AwaitingMappings { version } => warn!(
            "New version {} detected but mappings are not published yet, waiting for the next run",
            version
        ),
        Outcome::Updated { release, snapshot } => info!(
            "Updated markers to release {}, snapshot {}",
            release, snapshot
        ),
    }

    Ok(())
}
