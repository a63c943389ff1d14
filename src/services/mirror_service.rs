//! Repository mirroring
//!
//! Brings `<target>/<path_with_namespace>` into existence as a full local
//! mirror of a remote repository: default checkout, every branch
//! materialized as a local branch and every tag fetched. Directory
//! existence is the idempotency gate; a present directory is never touched
//! again, whatever its contents.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Project;
use crate::services::credentials_service::CredentialsHelper;
use crate::services::ledger::MirrorLedger;

/// Refspecs mapping every remote branch and tag into the local repository
const MIRROR_REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

/// What one synchronization call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh mirror created with all branches and tags
    Mirrored,
    /// Target directory already present and recorded as a completed mirror
    Skipped,
    /// Target directory present but never recorded as complete, likely left
    /// behind by an interrupted run; left as-is
    Partial,
}

/// Creates local mirrors, one project at a time
pub struct MirrorSynchronizer {
    target_dir: PathBuf,
    credentials: CredentialsHelper,
}

impl MirrorSynchronizer {
    pub fn new(target_dir: &Path, token: &str) -> Self {
        Self {
            target_dir: target_dir.to_path_buf(),
            credentials: CredentialsHelper::new(token),
        }
    }

    /// Local mirror directory for a project, its slash-qualified path
    /// nested under the target root
    pub fn local_path(&self, project: &Project) -> PathBuf {
        let mut path = self.target_dir.clone();
        path.extend(project.path_with_namespace.split('/'));
        path
    }

    /// Mirror one project.
    ///
    /// Runs clone, fetch-all-refs and the branch checkout loop in order;
    /// any failure ends processing for this project and is reported to the
    /// caller. The mirror left behind by a failed run is not deleted.
    pub fn synchronize(&self, project: &Project, ledger: &MirrorLedger) -> Result<SyncOutcome> {
        let path = self.local_path(project);

        if path.exists() {
            if ledger.contains(&project.path_with_namespace) {
                tracing::info!("Directory exists, skipping clone: {}", path.display());
                return Ok(SyncOutcome::Skipped);
            }
            tracing::warn!(
                "Directory exists but is not recorded as a completed mirror, skipping: {}",
                path.display()
            );
            return Ok(SyncOutcome::Partial);
        }

        std::fs::create_dir_all(&path)?;

        let repo = self.clone_repository(project, &path)?;
        self.fetch_all_refs(&repo)?;
        let branches = remote_branches(&repo)?;

        // Checkouts mutate the one shared working tree, so the branch loop
        // owns it exclusively and runs strictly one branch at a time.
        let mut worktree = WorktreeHandle::new(repo);
        for name in &branches {
            worktree.materialize_branch(name)?;
        }

        Ok(SyncOutcome::Mirrored)
    }

    fn clone_repository(&self, project: &Project, path: &Path) -> Result<git2::Repository> {
        let url = project.clone_url();

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(self.credentials.get_fetch_options());

        let repo = builder.clone(&url, path)?;
        Ok(repo)
    }

    /// Fetch every remote branch and tag into the local repository.
    ///
    /// A fetch with nothing new to transfer succeeds; only transport and
    /// ref-update failures surface as errors.
    fn fetch_all_refs(&self, repo: &git2::Repository) -> Result<()> {
        let mut remote = repo.find_remote("origin")?;
        let mut fetch_opts = self.credentials.get_fetch_options();
        remote.fetch(&MIRROR_REFSPECS, Some(&mut fetch_opts), None)?;
        Ok(())
    }
}

/// Short names of all remote-tracking branches of origin
fn remote_branches(repo: &git2::Repository) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for branch_result in repo.branches(Some(git2::BranchType::Remote))? {
        let (branch, _) = branch_result?;
        let Some(name) = branch.name()? else { continue };
        // origin/HEAD is a symref to the default branch, not a branch
        if name == "origin/HEAD" {
            continue;
        }
        if let Some(short) = name.strip_prefix("origin/") {
            names.push(short.to_string());
        }
    }

    Ok(names)
}

/// Owned handle over the one working tree a mirror has.
///
/// Branch materialization goes through `&mut self`, so two branches can
/// never be checked out concurrently.
struct WorktreeHandle {
    repo: git2::Repository,
}

impl WorktreeHandle {
    fn new(repo: git2::Repository) -> Self {
        Self { repo }
    }

    /// Create and force-checkout a local branch for `name` unless one
    /// already resolves.
    fn materialize_branch(&mut self, name: &str) -> Result<()> {
        if self.repo.find_branch(name, git2::BranchType::Local).is_ok() {
            tracing::debug!("Branch {} already exists, skipping", name);
            return Ok(());
        }

        tracing::info!("Processing branch: {}", name);

        let remote_ref = self
            .repo
            .find_reference(&format!("refs/remotes/origin/{}", name))?;
        let commit = remote_ref.peel_to_commit()?;
        self.repo.branch(name, &commit, false)?;

        let refname = format!("refs/heads/{}", name);
        let obj = self.repo.revparse_single(&refname)?;

        let mut checkout_opts = git2::build::CheckoutBuilder::new();
        checkout_opts.force();
        self.repo.checkout_tree(&obj, Some(&mut checkout_opts))?;
        self.repo.set_head(&refname)?;

        Ok(())
    }
}
