//! Mirror completion ledger
//!
//! The directory-existence check is what prevents re-cloning; the ledger
//! only tells a known-good mirror apart from a directory left behind by an
//! interrupted run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the ledger inside the target root
const LEDGER_FILE: &str = ".mirror-ledger.json";

/// Record of one completed mirror
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub mirrored_at: DateTime<Utc>,
}

/// Persistent record of which project paths have completed a full mirror
#[derive(Debug)]
pub struct MirrorLedger {
    path: PathBuf,
    entries: BTreeMap<String, LedgerEntry>,
}

impl MirrorLedger {
    /// Load the ledger from the target root, starting empty if absent or
    /// unreadable
    pub fn load(target_dir: &Path) -> Self {
        let path = target_dir.join(LEDGER_FILE);
        let entries = match std::fs::read(&path) {
            Ok(data) => match serde_json::from_slice(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable mirror ledger {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self { path, entries }
    }

    pub fn contains(&self, project_path: &str) -> bool {
        self.entries.contains_key(project_path)
    }

    /// Record a completed mirror and persist the ledger
    pub fn record(&mut self, project_path: &str) -> Result<()> {
        self.entries.insert(
            project_path.to_string(),
            LedgerEntry {
                mirrored_at: Utc::now(),
            },
        );
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.entries)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}
