//! Client-side pagination over a cached list.

use crate::core::error::DomainError;

/// Rows per page of the high-risk patient table.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pages through a list held in memory.
///
/// Pages are 1-based. Replacing the list resets the cursor to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

impl<T> Paginator<T> {
    pub fn new(page_size: usize) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidPageSize);
        }
        Ok(Self {
            items: Vec::new(),
            page_size,
            current_page: 1,
        })
    }

    /// Replace the cached list and return to the first page.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(len / page_size)`; zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Items on the current page.
    pub fn page_items(&self) -> &[T] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        let total = self.total_pages();
        total != 0 && self.current_page < total
    }

    /// Step back one page. Returns false at the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Step forward one page. Returns false at the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// `Page <p> of <n> (<len> total)`, where an empty list still shows one page.
    pub fn page_info(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.current_page,
            self.total_pages().max(1),
            self.items.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(n: usize) -> Paginator<usize> {
        let mut p = Paginator::new(DEFAULT_PAGE_SIZE).unwrap();
        p.replace((0..n).collect());
        p
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(
            Paginator::<u8>::new(0).unwrap_err(),
            DomainError::InvalidPageSize
        );
    }

    #[test]
    fn test_page_count_and_last_page_len() {
        for n in [1usize, 19, 20, 21, 45, 60, 100] {
            let mut p = paginator(n);
            let expected_pages = n.div_ceil(20);
            assert_eq!(p.total_pages(), expected_pages, "n = {}", n);

            while p.next() {}
            assert_eq!(p.current_page(), expected_pages);
            let expected_last = if n % 20 == 0 { 20 } else { n % 20 };
            assert_eq!(p.page_items().len(), expected_last, "n = {}", n);
        }
    }

    #[test]
    fn test_boundary_controls() {
        let mut p = paginator(45);
        assert!(!p.has_prev());
        assert!(p.has_next());
        assert!(!p.prev());

        assert!(p.next());
        assert!(p.has_prev());
        assert!(p.has_next());

        assert!(p.next());
        assert!(!p.has_next());
        assert!(!p.next());
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.page_items(), &[40, 41, 42, 43, 44]);
    }

    #[test]
    fn test_empty_list() {
        let p = paginator(0);
        assert_eq!(p.total_pages(), 0);
        assert!(!p.has_prev());
        assert!(!p.has_next());
        assert!(p.page_items().is_empty());
        assert_eq!(p.page_info(), "Page 1 of 1 (0 total)");
    }

    #[test]
    fn test_page_info() {
        let mut p = paginator(45);
        p.next();
        assert_eq!(p.page_info(), "Page 2 of 3 (45 total)");
    }

    #[test]
    fn test_replace_resets_to_first_page() {
        let mut p = paginator(45);
        p.next();
        p.next();
        p.replace((0..5).collect());
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_items().len(), 5);
    }

    #[test]
    fn test_single_full_page() {
        let p = paginator(20);
        assert_eq!(p.total_pages(), 1);
        assert!(!p.has_next());
        assert_eq!(p.page_items().len(), 20);
    }
}
