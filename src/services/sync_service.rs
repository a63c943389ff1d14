//! Mirror run orchestration
//!
//! One run enumerates every project, then processes each start-to-finish:
//! repository mirror, project-scope variables, group-scope variables. The
//! loop is fully sequential and never aborts; individual failures are
//! logged and counted.

use crate::config::Config;
use crate::services::gitlab_service::{ProjectSource, VariableSource};
use crate::services::ledger::MirrorLedger;
use crate::services::mirror_service::{MirrorSynchronizer, SyncOutcome};
use crate::services::variable_service::VariableHarvester;
use crate::services::variable_store::JsonVariableStore;

/// Counts reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub projects: usize,
    pub mirrored: usize,
    pub skipped: usize,
    pub partial: usize,
    pub failed: usize,
}

/// Drives one full mirror run, one project at a time
pub struct SyncService<C> {
    client: C,
    synchronizer: MirrorSynchronizer,
    store: JsonVariableStore,
    ledger: MirrorLedger,
}

impl<C: ProjectSource + VariableSource> SyncService<C> {
    pub fn new(config: &Config, client: C) -> Self {
        Self {
            synchronizer: MirrorSynchronizer::new(&config.target_dir, &config.token),
            store: JsonVariableStore::new(&config.target_dir),
            ledger: MirrorLedger::load(&config.target_dir),
            client,
        }
    }

    /// Mirror every project and harvest its variables.
    ///
    /// The run always completes; a failed clone or fetch ends processing
    /// for that one project only. Variables are harvested whatever the
    /// mirror outcome, matching the independence of the two concerns.
    pub async fn run(&mut self) -> SyncSummary {
        let projects = self.client.all_projects().await.into_items_lossy();
        let mut summary = SyncSummary {
            projects: projects.len(),
            ..Default::default()
        };

        for project in &projects {
            tracing::info!("Processing: {}", project.web_url);

            match self.synchronizer.synchronize(project, &self.ledger) {
                Ok(SyncOutcome::Mirrored) => {
                    summary.mirrored += 1;
                    if let Err(e) = self.ledger.record(&project.path_with_namespace) {
                        tracing::warn!(
                            "Failed to update mirror ledger for {}: {}",
                            project.path_with_namespace,
                            e
                        );
                    }
                }
                Ok(SyncOutcome::Skipped) => summary.skipped += 1,
                Ok(SyncOutcome::Partial) => summary.partial += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Error mirroring {}: {}", project.web_url, e);
                }
            }

            VariableHarvester::new(&self.client, &self.store)
                .harvest(project)
                .await;
        }

        tracing::info!(
            "Run complete: {} projects, {} mirrored, {} skipped, {} partial, {} failed",
            summary.projects,
            summary.mirrored,
            summary.skipped,
            summary.partial,
            summary.failed
        );

        summary
    }
}
