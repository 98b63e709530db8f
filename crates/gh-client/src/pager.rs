//! Pagination over GitHub collection endpoints
//!
//! GitHub list endpoints are drained page by page, starting at page 1,
//! until a page comes back empty. Pages are requested strictly one after
//! another so items keep the order the API returns them in.

use crate::client::Page;
use anyhow::Context;
use log::debug;
use std::future::Future;

/// Fetch every page of a collection and concatenate the items in order
///
/// `fetch_page` is called with page 1, 2, ... until it returns an empty
/// page. Any failure aborts the whole pagination; no partial result is
/// returned. Each call starts again from the first page.
///
/// # Example
///
/// ```rust,ignore
/// let pulls = pager::fetch_all(|page| client.fetch_pull_requests_page("owner", "repo", page)).await?;
/// ```
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> anyhow::Result<Vec<T>>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = Page::first();

    loop {
        let batch = fetch_page(page)
            .await
            .with_context(|| format!("Failed to fetch page {}", page.number))?;

        if batch.is_empty() {
            debug!(
                "Page {} is empty, collected {} items",
                page.number,
                items.len()
            );
            break;
        }

        debug!("Page {} returned {} items", page.number, batch.len());
        items.extend(batch);
        page = page.next();
    }

    Ok(items)
}
