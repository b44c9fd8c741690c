//! Page-number pagination primitives shared by admin-data services.
//!
//! Every paginated list endpoint in the admin panels speaks the same shape:
//! the caller names a one-based page and a page size, the service filters
//! first and slices second, and the response carries the page rows alongside
//! the post-filter `total` and the derived page count. This crate owns that
//! arithmetic so the local and remote adapters cannot drift apart.
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let rows: Vec<u32> = (0..12).collect();
//! let page = Page::slice(rows, &PageRequest::new(2, 10));
//!
//! assert_eq!(page.rows(), &[10, 11]);
//! assert_eq!(page.total(), 12);
//! assert_eq!(page.pages(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// One-based page selector with a page size.
///
/// Construction clamps both values to at least one, so a `PageRequest` can
/// always be sliced against without range errors. Out-of-range pages are not
/// an error either; they simply yield an empty row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WirePageRequest")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

/// Unclamped wire shape; deserialisation routes through [`PageRequest::new`]
/// so a decoded request upholds the same bounds as a constructed one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePageRequest {
    page: u32,
    page_size: u32,
}

impl From<WirePageRequest> for PageRequest {
    fn from(wire: WirePageRequest) -> Self {
        Self::new(wire.page, wire.page_size)
    }
}

impl PageRequest {
    /// Page size applied when a list view does not choose its own.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Build a request, clamping `page` and `page_size` up to one.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// The first page at the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }

    /// Same page size, different page.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self::new(page, self.page_size)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page - 1) * u64::from(self.page_size);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of an already filtered, already ordered result set.
///
/// `total` counts rows after filtering and before slicing; `pages` is
/// derived as `max(1, ceil(total / page_size))`, so an empty result set
/// still reports one (empty) page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    rows: Vec<T>,
    total: u64,
    page: u32,
    pages: u32,
}

impl<T> Page<T> {
    /// Slice one page out of a filtered result set.
    ///
    /// The input order is preserved; callers are expected to have applied
    /// any sort before slicing.
    #[must_use]
    pub fn slice(rows: Vec<T>, request: &PageRequest) -> Self {
        let total = u64::try_from(rows.len()).unwrap_or(u64::MAX);
        let pages = Self::page_count(total, request.page_size());
        let sliced = rows
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self {
            rows: sliced,
            total,
            page: request.page(),
            pages,
        }
    }

    /// Assemble a page from parts already computed elsewhere (remote mode).
    #[must_use]
    pub const fn from_parts(rows: Vec<T>, total: u64, page: u32, pages: u32) -> Self {
        Self {
            rows,
            total,
            page,
            pages,
        }
    }

    /// Derive the page count for a result set size.
    #[must_use]
    pub fn page_count(total: u64, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Rows on this page, in service order.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Consume the page, keeping only its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Count of matching rows before slicing.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// One-based page number this slice represents.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total number of pages at the requested page size.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Transform every row while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn numbered(count: u32) -> Vec<u32> {
        (0..count).collect()
    }

    #[rstest]
    #[case::exact_fit(20, 10, 2)]
    #[case::remainder(12, 10, 2)]
    #[case::single_partial(3, 10, 1)]
    #[case::empty_still_one_page(0, 10, 1)]
    #[case::size_one(5, 1, 5)]
    fn page_count_matches_ceiling(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(Page::<u32>::page_count(total, size), expected);
    }

    #[test]
    fn slices_first_page_of_twelve() {
        let page = Page::slice(numbered(12), &PageRequest::new(1, 10));

        assert_eq!(page.rows().len(), 10);
        assert_eq!(page.total(), 12);
        assert_eq!(page.pages(), 2);
        assert_eq!(page.page(), 1);
    }

    #[test]
    fn slices_trailing_partial_page() {
        let page = Page::slice(numbered(12), &PageRequest::new(2, 10));

        assert_eq!(page.rows(), &[10, 11]);
        assert_eq!(page.total(), 12);
        assert_eq!(page.pages(), 2);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let page = Page::slice(numbered(12), &PageRequest::new(9, 10));

        assert!(page.rows().is_empty());
        assert_eq!(page.total(), 12);
        assert_eq!(page.pages(), 2);
    }

    #[test]
    fn preserves_input_order() {
        let page = Page::slice(vec![30, 10, 20], &PageRequest::new(1, 10));

        assert_eq!(page.rows(), &[30, 10, 20]);
    }

    #[rstest]
    #[case::zero_page(0, 5, 1, 5)]
    #[case::zero_size(3, 0, 3, 1)]
    fn request_clamps_to_one(
        #[case] page: u32,
        #[case] size: u32,
        #[case] expected_page: u32,
        #[case] expected_size: u32,
    ) {
        let request = PageRequest::new(page, size);

        assert_eq!(request.page(), expected_page);
        assert_eq!(request.page_size(), expected_size);
    }

    #[test]
    fn deserialised_zero_page_is_clamped_before_slicing() {
        let request: PageRequest =
            serde_json::from_str(r#"{"page":0,"pageSize":10}"#).expect("request deserialises");

        assert_eq!(request.page(), 1);
        assert_eq!(request.offset(), 0);

        let page = Page::slice(numbered(12), &request);
        assert_eq!(page.rows().len(), 10);
        assert_eq!(page.total(), 12);
    }

    #[test]
    fn deserialised_zero_page_size_is_clamped() {
        let request: PageRequest =
            serde_json::from_str(r#"{"page":2,"pageSize":0}"#).expect("request deserialises");

        assert_eq!(request.page_size(), 1);
        assert_eq!(Page::slice(numbered(3), &request).rows(), &[1]);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let page = Page::slice(numbered(2), &PageRequest::new(1, 10));
        let value = serde_json::to_value(&page).expect("page serialises");

        assert_eq!(value.get("total"), Some(&serde_json::json!(2)));
        assert_eq!(value.get("pages"), Some(&serde_json::json!(1)));
        assert!(value.get("rows").is_some(), "rows key present");

        let request = serde_json::to_value(PageRequest::new(2, 25)).expect("request serialises");
        assert_eq!(request.get("pageSize"), Some(&serde_json::json!(25)));
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::slice(numbered(12), &PageRequest::new(2, 10)).map(|n| n * 2);

        assert_eq!(page.rows(), &[20, 22]);
        assert_eq!(page.total(), 12);
        assert_eq!(page.pages(), 2);
    }
}
