use anyhow::Result;

/// Page size used for every paginated request.
pub const PER_PAGE: u32 = 100;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of matches, when the endpoint reports one.
    pub total_count: Option<u64>,
    /// Page number to request next, `None` on the last page.
    pub next_page: Option<u32>,
}

/// Something that can be asked for a numbered page.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Item;

    async fn fetch(&self, page: u32, per_page: u32) -> Result<Page<Self::Item>>;
}

/// Finite lazy sequence of pages, starting at page 1.
///
/// Each call to [`Pages::next_page`] issues at most one request. The sequence
/// ends after a page without a continuation, after the first error, or when a
/// continuation does not move forward. It cannot be resumed; build a new one
/// to start over.
pub struct Pages<S> {
    source: S,
    per_page: u32,
    next: Option<u32>,
}

impl<S: PageSource> Pages<S> {
    pub fn new(source: S, per_page: u32) -> Self {
        Pages {
            source,
            per_page,
            next: Some(1),
        }
    }

    pub async fn next_page(&mut self) -> Option<Result<Page<S::Item>>> {
        let current = self.next.take()?;
        let page = match self.source.fetch(current, self.per_page).await {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        self.next = match page.next_page {
            Some(next) if next > current => Some(next),
            Some(next) => {
                tracing::warn!(current, next, "continuation does not advance, stopping");
                None
            }
            None => None,
        };
        tracing::debug!(page = current, items = page.items.len(), "fetched page");
        Some(Ok(page))
    }

    /// Drains every page. Any error discards what was fetched so far.
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>> {
        let mut all_items = Vec::new();
        while let Some(page) = self.next_page().await {
            all_items.extend(page?.items);
        }
        Ok(all_items)
    }
}
