//! Load-more pagination accumulated across requests.

use serde::Serialize;

use crate::models::Paginated;

/// Page size of every list endpoint of the backend.
pub const PAGE_SIZE: usize = 20;

/// Items accumulated so far for one filtered list.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: i64,
    pub page: u32,
    pub has_more: bool,
    /// Page to request when the visitor asks for more
    pub next_page: Option<u32>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            page: 0,
            has_more: false,
            next_page: None,
        }
    }
}

impl<T> Listing<T> {
    /// Merge a fetched page. Page 1 replaces whatever was there, later pages append.
    pub fn absorb(&mut self, page: u32, fetched: Paginated<T>) {
        let fetched_len = fetched.results.len();
        if page <= 1 {
            self.items = fetched.results;
        } else {
            self.items.extend(fetched.results);
        }
        self.count = fetched.count;
        self.page = page.max(1);
        self.has_more = has_more(fetched_len, fetched.count, self.page);
        self.next_page = self.has_more.then_some(self.page + 1);
    }

    /// Same listing with every item converted.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            has_more: self.has_more,
            next_page: self.next_page,
        }
    }
}

/// A full page that does not reach the total means another page exists.
pub fn has_more(last_page_len: usize, count: i64, page: u32) -> bool {
    last_page_len == PAGE_SIZE && count > i64::from(page) * PAGE_SIZE as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(start: i64, len: usize, count: i64) -> Paginated<i64> {
        Paginated {
            count,
            next: None,
            previous: None,
            results: (start..start + len as i64).collect(),
        }
    }

    #[test]
    fn test_load_more_appends() {
        let mut listing = Listing::default();
        listing.absorb(1, page_of(0, 20, 45));
        assert!(listing.has_more);
        assert_eq!(listing.next_page, Some(2));

        listing.absorb(2, page_of(20, 20, 45));
        assert_eq!(listing.items.len(), 40);
        assert!(listing.has_more);

        listing.absorb(3, page_of(40, 5, 45));
        assert_eq!(listing.items.len(), 45);
        assert!(!listing.has_more);
        assert_eq!(listing.next_page, None);
    }

    #[test]
    fn test_first_page_replaces() {
        let mut listing = Listing::default();
        listing.absorb(1, page_of(0, 20, 60));
        listing.absorb(2, page_of(20, 20, 60));
        listing.absorb(1, page_of(100, 3, 3));
        assert_eq!(listing.items, vec![100, 101, 102]);
        assert_eq!(listing.page, 1);
        assert!(!listing.has_more);
    }

    #[test]
    fn test_exact_multiple_has_no_more() {
        assert!(!has_more(20, 40, 2));
        assert!(has_more(20, 41, 2));
        assert!(!has_more(19, 100, 1));
    }
}
