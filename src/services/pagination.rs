//! Draining of page-numbered list endpoints
//!
//! GitLab list endpoints are offset-paginated: the consumer asks for page
//! 1, 2, ... of a fixed size until a page comes back empty. The empty page
//! is the only terminator the protocol has, so one request past the last
//! item is always issued.

use std::future::Future;

use crate::error::{MirrorError, Result};

/// Items requested per page
pub const PAGE_SIZE: u32 = 100;

/// Outcome of draining a paginated collection
#[derive(Debug)]
pub enum PagedResult<T> {
    /// Every page was retrieved down to the terminating empty page
    Complete(Vec<T>),
    /// A page request failed; items collected before the failure are kept
    Truncated {
        items: Vec<T>,
        reason: MirrorError,
    },
}

impl<T> PagedResult<T> {
    /// Collapse the outcome into its items, logging a truncation as a
    /// warning.
    ///
    /// Through this policy an empty first page and a failed first page both
    /// come out as an empty list; callers that need to tell them apart must
    /// match on the variants instead.
    pub fn into_items_lossy(self) -> Vec<T> {
        match self {
            PagedResult::Complete(items) => items,
            PagedResult::Truncated { items, reason } => {
                tracing::warn!(
                    "Paginated fetch stopped early after {} items: {}",
                    items.len(),
                    reason
                );
                items
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PagedResult::Complete(_))
    }
}

/// Drain a page-numbered collection into one list.
///
/// Requests pages 1, 2, ... until a page comes back empty or fails,
/// concatenating the non-empty pages in order. No request is issued past
/// the page that terminated the loop.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> PagedResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        match fetch_page(page).await {
            Ok(batch) if batch.is_empty() => return PagedResult::Complete(items),
            Ok(batch) => {
                items.extend(batch);
                page += 1;
            }
            Err(reason) => return PagedResult::Truncated { items, reason },
        }
    }
}
