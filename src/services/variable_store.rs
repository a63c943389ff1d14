//! Variable persistence
//!
//! Harvested variables land as one JSON file per scope inside the
//! project's mirror directory, unconditionally replacing any previous
//! contents.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Variable;

/// Which collection a variable list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    Project,
    Group,
}

impl VariableScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableScope::Project => "project",
            VariableScope::Group => "group",
        }
    }
}

/// Destination for harvested variable lists
pub trait VariableSink {
    /// Persist one scope's variables for a project path, replacing any
    /// previous contents
    fn write(
        &self,
        project_path: &str,
        scope: VariableScope,
        variables: &[Variable],
    ) -> Result<()>;
}

/// Writes `variables_<scope>.json` files under the mirror directory
pub struct JsonVariableStore {
    target_dir: PathBuf,
}

impl JsonVariableStore {
    pub fn new(target_dir: &Path) -> Self {
        Self {
            target_dir: target_dir.to_path_buf(),
        }
    }

    fn file_path(&self, project_path: &str, scope: VariableScope) -> PathBuf {
        let mut path = self.target_dir.clone();
        path.extend(project_path.split('/'));
        path.join(format!("variables_{}.json", scope.as_str()))
    }
}

impl VariableSink for JsonVariableStore {
    fn write(
        &self,
        project_path: &str,
        scope: VariableScope,
        variables: &[Variable],
    ) -> Result<()> {
        let path = self.file_path(project_path, scope);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(&variables)?;
        std::fs::write(&path, data)?;

        tracing::debug!(
            "Wrote {} {} variables to {}",
            variables.len(),
            scope.as_str(),
            path.display()
        );
        Ok(())
    }
}
