//! Project models

use serde::{Deserialize, Serialize};

/// A GitLab project as returned by the projects list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    pub web_url: String,
    pub namespace: Namespace,
}

/// The owning group of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
}

impl Project {
    /// Remote clone URL, the web URL with a `.git` suffix
    pub fn clone_url(&self) -> String {
        format!("{}.git", self.web_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_project() {
        let json = r#"{
            "id": 42,
            "name": "widget",
            "path_with_namespace": "tools/widget",
            "web_url": "https://gitlab.example.com/tools/widget",
            "namespace": { "name": "tools" },
            "default_branch": "main"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 42);
        assert_eq!(project.path_with_namespace, "tools/widget");
        assert_eq!(project.namespace.name, "tools");
        assert_eq!(
            project.clone_url(),
            "https://gitlab.example.com/tools/widget.git"
        );
    }
}
