//! Command-line entry point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glmirror::config::{Config, ConfigFile};
use glmirror::services::{GitLabClient, SyncService};

/// Mirror every repository and CI/CD variable of a GitLab instance to
/// local disk
#[derive(Debug, Parser)]
#[command(name = "glmirror", version)]
struct Arguments {
    /// Base URL of the GitLab instance, e.g. https://gitlab.example.com
    #[arg(long)]
    host: Option<String>,

    /// Access token with read access to every project and group; falls
    /// back to $GITLAB_TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Directory mirrors are created under
    #[arg(long)]
    target_dir: Option<PathBuf>,

    /// JSON config file providing any of the above
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glmirror=info,git2=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Arguments::parse();

    let file = match &args.config {
        Some(path) => match ConfigFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("Failed to read config file {}: {}", path.display(), e);
                return;
            }
        },
        None => ConfigFile::default(),
    };

    let config = match Config::resolve(args.host, args.token, args.target_dir, file) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    tracing::info!(
        "Mirroring {} into {}",
        config.host,
        config.target_dir.display()
    );

    let client = GitLabClient::new(&config.host, &config.token);
    let mut service = SyncService::new(&config, client);
    service.run().await;
}
