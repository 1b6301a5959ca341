/// Response header carrying the total number of pages
pub const PAGE_COUNT_HEADER: &str = "X-Pagination-Page-Count";

/// Page bookkeeping for one paginated fetch.
///
/// Starts at page 1. The total page count is taken from the first response
/// only; counts reported by later pages are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: u32,
    total: Option<u32>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            current: 1,
            total: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    /// Total page count, once discovered. `Some(0)` means the header was
    /// absent or zero, i.e. the list is empty.
    pub fn total(&self) -> Option<u32> {
        self.total
    }

    pub fn record_page_count(&mut self, page_count: Option<u32>) {
        if self.total.is_none() {
            self.total = Some(page_count.unwrap_or(0));
        }
    }

    /// Move to the next page. Returns `false` when there is none.
    pub fn advance(&mut self) -> bool {
        match self.total {
            Some(total) if self.current < total => {
                self.current += 1;
                true
            }
            _ => false,
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_visits_every_page_once() {
        let mut cursor = PageCursor::new();
        let mut visited = vec![cursor.current()];
        cursor.record_page_count(Some(3));
        while cursor.advance() {
            visited.push(cursor.current());
            cursor.record_page_count(Some(3));
        }
        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_stops_on_missing_or_zero_count() {
        let mut cursor = PageCursor::new();
        cursor.record_page_count(None);
        assert_eq!(cursor.total(), Some(0));
        assert!(!cursor.advance());

        let mut cursor = PageCursor::new();
        cursor.record_page_count(Some(0));
        assert!(!cursor.advance());
    }

    #[test]
    fn test_cursor_ignores_later_counts() {
        let mut cursor = PageCursor::new();
        cursor.record_page_count(Some(2));
        assert!(cursor.advance());
        cursor.record_page_count(Some(50));
        assert_eq!(cursor.total(), Some(2));
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn test_cursor_single_page() {
        let mut cursor = PageCursor::new();
        assert!(cursor.is_first());
        cursor.record_page_count(Some(1));
        assert!(!cursor.advance());
    }
}
