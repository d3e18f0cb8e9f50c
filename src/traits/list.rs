//! List trait for cursor-paginated collections.

use async_trait::async_trait;

use crate::client::SoracomClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::query::ListFilter;

/// Maximum pages to fetch in `list_all` (safety limit).
const MAX_PAGES: u32 = 1000;

/// A filter that can carry a pagination cursor between requests.
///
/// The server mints an opaque `last_evaluated_key` cursor on each page;
/// [`List::list_all`] threads it back into the filter to request the next
/// page. The rest of the filter must stay unchanged while following
/// cursors: a cursor is only meaningful against the query that minted it.
pub trait CursorFilter: Clone {
    /// The same filter, resuming after the given cursor.
    #[must_use]
    fn resume_after(self, last_evaluated_key: String) -> Self;
}

impl CursorFilter for ListFilter {
    fn resume_after(self, last_evaluated_key: String) -> Self {
        self.last_evaluated_key(last_evaluated_key)
    }
}

/// List resources with cursor-based pagination.
///
/// # Example
///
/// ```ignore
/// use soracom::{List, ListFilter, Subscriber};
///
/// // Fetch a single page
/// let page = Subscriber::list_page(&client, &ListFilter::default().limit(50)).await?;
///
/// // Fetch everything, following cursors
/// let all = Subscriber::list_all(&client, &ListFilter::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Filter parameters for this listing.
    type Filter: CursorFilter + Default + Send + Sync;

    /// List resources matching the filter (single page).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(client: &SoracomClient, filter: &Self::Filter) -> Result<Page<Self>>;

    /// List all resources matching the filter, following `next` cursors
    /// until the server stops advertising one.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &SoracomClient, filter: &Self::Filter) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut filter = filter.clone();
        let mut pages = 0u32;

        loop {
            let page = Self::list_page(client, &filter).await?;
            let next = page.pagination.next.clone();
            all_items.extend(page.items);

            match next {
                Some(key) => filter = filter.resume_after(key),
                None => break,
            }

            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {MAX_PAGES} pages, stopping");
                break;
            }
        }

        Ok(all_items)
    }
}
