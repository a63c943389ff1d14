//! CI/CD variable harvesting
//!
//! Pulls the project-scope and group-scope variable collections for one
//! project and hands each to the persistence sink. The two scopes are
//! independent: a failure or emptiness in one never keeps the other from
//! being fetched and written.

use crate::models::{Project, Variable};
use crate::services::gitlab_service::VariableSource;
use crate::services::variable_store::{VariableScope, VariableSink};

/// Fetches both variable scopes of a project and persists them
pub struct VariableHarvester<'a, S, W> {
    source: &'a S,
    sink: &'a W,
}

impl<'a, S: VariableSource, W: VariableSink> VariableHarvester<'a, S, W> {
    pub fn new(source: &'a S, sink: &'a W) -> Self {
        Self { source, sink }
    }

    /// Harvest both scopes for one project.
    ///
    /// Fetch truncations degrade to the items collected so far; sink
    /// failures are logged and swallowed. Nothing here ends the run.
    pub async fn harvest(&self, project: &Project) {
        let variables = self
            .source
            .project_variables(project.id)
            .await
            .into_items_lossy();
        self.persist(project, VariableScope::Project, &variables);

        let variables = self
            .source
            .group_variables(&project.namespace.name)
            .await
            .into_items_lossy();
        self.persist(project, VariableScope::Group, &variables);
    }

    fn persist(&self, project: &Project, scope: VariableScope, variables: &[Variable]) {
        if let Err(e) = self
            .sink
            .write(&project.path_with_namespace, scope, variables)
        {
            tracing::error!(
                "Failed to write {} variables for {}: {}",
                scope.as_str(),
                project.path_with_namespace,
                e
            );
        }
    }
}
