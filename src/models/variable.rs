//! CI/CD variable model

use serde::{Deserialize, Serialize};

/// One CI/CD configuration entry.
///
/// Variables form an unordered collection; keys are not deduplicated
/// across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}
