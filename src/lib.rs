//! glmirror - GitLab backup mirroring
//!
//! Mirrors every repository of a GitLab instance to local disk, including
//! all branches and tags, together with the CI/CD variables of each
//! project and its owning group.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_utils;
