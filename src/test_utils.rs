//! Test utilities for creating temporary git repositories

#![cfg(test)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary git repository for testing
pub struct TestRepo {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Create a new empty git repository named `name` inside a fresh temp
    /// directory
    pub fn named(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join(name);

        let repo = git2::Repository::init(&path).expect("Failed to init repo");

        // Pin the unborn branch name so fixtures do not depend on the
        // machine's init.defaultBranch setting
        repo.set_head("refs/heads/master")
            .expect("Failed to set HEAD");

        let mut config = repo.config().expect("Failed to get config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");

        Self { dir, path }
    }

    /// Create a clone source: an initial commit on master plus one commit
    /// on each named branch, HEAD left on master.
    ///
    /// Mirror code derives the clone path by appending `.git` to a
    /// project's web URL, so fixtures are conventionally named `<x>.git`.
    pub fn remote_fixture(name: &str, branches: &[&str]) -> Self {
        let repo = Self::named(name);
        repo.create_commit("Initial commit", &[("README.md", "# fixture")]);

        for branch in branches {
            repo.checkout_branch("master");
            repo.create_branch(branch);
            repo.checkout_branch(branch);
            repo.create_commit(
                &format!("Work on {}", branch),
                &[(&format!("{}.txt", branch), *branch)],
            );
        }

        repo.checkout_branch("master");
        repo
    }

    /// Get the git2 repository
    pub fn repo(&self) -> git2::Repository {
        git2::Repository::open(&self.path).expect("Failed to open repo")
    }

    /// Create a file with content
    pub fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Stage a file
    pub fn stage_file(&self, name: &str) {
        let repo = self.repo();
        let mut index = repo.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new(name))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
    }

    /// Create a commit with the given files
    pub fn create_commit(&self, message: &str, files: &[(&str, &str)]) -> git2::Oid {
        let repo = self.repo();

        for (name, content) in files {
            self.create_file(name, content);
            self.stage_file(name);
        }

        let mut index = repo.index().expect("Failed to get index");
        let tree_oid = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_oid).expect("Failed to find tree");
        let sig = repo.signature().expect("Failed to get signature");

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.as_ref().into_iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch at the current HEAD
    pub fn create_branch(&self, name: &str) -> git2::Oid {
        let repo = self.repo();
        let head = repo.head().expect("Failed to get HEAD");
        let commit = head.peel_to_commit().expect("Failed to get commit");
        repo.branch(name, &commit, false)
            .expect("Failed to create branch");
        commit.id()
    }

    /// Checkout a branch
    pub fn checkout_branch(&self, name: &str) {
        let repo = self.repo();
        let branch = repo
            .find_branch(name, git2::BranchType::Local)
            .expect("Failed to find branch");
        let obj = branch
            .get()
            .peel(git2::ObjectType::Commit)
            .expect("Failed to peel");
        repo.checkout_tree(&obj, None).expect("Failed to checkout");
        repo.set_head(branch.get().name().unwrap())
            .expect("Failed to set HEAD");
    }

    /// Create an annotated tag at the current HEAD
    pub fn create_tag(&self, name: &str) -> git2::Oid {
        let repo = self.repo();
        let head = repo.head().expect("Failed to get HEAD");
        let commit = head.peel_to_commit().expect("Failed to get commit");
        let sig = repo.signature().expect("Failed to get signature");
        repo.tag(
            name,
            commit.as_object(),
            &sig,
            &format!("Tag {}", name),
            false,
        )
        .expect("Failed to create tag")
    }
}
