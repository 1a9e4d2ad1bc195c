//! Offset pagination for post listings.

/// Number of posts shown on every listing page.
pub const POSTS_PER_PAGE: u32 = 10;

/// Raw `?page=` query parameter, kept as text so that garbage never rejects the request.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Picks `page` out of the decoded query pairs; a repeated parameter keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let page = pairs
            .into_iter()
            .filter(|(key, _)| key == "page")
            .map(|(_, value)| value)
            .last();

        Self { page }
    }

    /// Requested page number; missing, non-numeric or non-positive values mean page 1.
    pub fn number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|number| *number >= 1)
            .unwrap_or(1)
    }
}

/// Splits a result set of known size into fixed-size pages.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: u32,
}

impl Paginator {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// SQL `LIMIT` for any page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL `OFFSET` for the given 1-based page number.
    pub fn offset(&self, number: u32) -> i64 {
        i64::from(number.max(1) - 1) * i64::from(self.per_page)
    }

    /// Total number of pages; an empty collection still has one (empty) page.
    pub fn num_pages(&self, count: i64) -> u32 {
        if count <= 0 {
            return 1;
        }
        let per_page = i64::from(self.per_page);
        let pages = (count + per_page - 1) / per_page;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Wrap an already-sliced set of items into a page.
    pub fn page<T>(&self, items: Vec<T>, number: u32, count: i64) -> Page<T> {
        Page {
            items,
            number: number.max(1),
            per_page: self.per_page,
            count: count.max(0),
            num_pages: self.num_pages(count),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(POSTS_PER_PAGE)
    }
}

/// One page of a listing, handed to the templates.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub per_page: u32,
    /// Size of the whole collection, not of this page
    pub count: i64,
    pub num_pages: u32,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_other_pages(&self) -> bool {
        self.has_previous() || self.has_next()
    }

    pub fn previous_page_number(&self) -> u32 {
        self.number.saturating_sub(1).max(1)
    }

    pub fn next_page_number(&self) -> u32 {
        self.number.saturating_add(1)
    }

    pub fn page_range(&self) -> Vec<PageLink> {
        (1..=self.num_pages)
            .map(|number| PageLink {
                number,
                current: number == self.number,
            })
            .collect()
    }
}

/// Entry of the rendered paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub current: bool,
}
