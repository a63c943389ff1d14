//! Service layer for glmirror
//!
//! This module contains the components one mirror run is assembled from:
//! the GitLab client, the repository synchronizer, the variable harvester
//! and the orchestration loop that drives them.

pub mod credentials_service;
pub mod gitlab_service;
pub mod ledger;
pub mod mirror_service;
pub mod pagination;
pub mod sync_service;
pub mod variable_service;
pub mod variable_store;

pub use credentials_service::CredentialsHelper;
pub use gitlab_service::{GitLabClient, ProjectSource, VariableSource};
pub use ledger::MirrorLedger;
pub use mirror_service::{MirrorSynchronizer, SyncOutcome};
pub use sync_service::{SyncService, SyncSummary};
pub use variable_service::VariableHarvester;
pub use variable_store::{JsonVariableStore, VariableScope, VariableSink};
