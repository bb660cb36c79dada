//! Pagination traversal and page-boundary invariants.
//!
//! A paged endpoint returns [`Page`] envelopes. The [`PaginationWalker`]
//! drives one request per page through a caller-supplied fetch function and
//! validates, per page, that the response echoes the requested page number
//! and size and that the data length follows the division rule:
//!
//! * `last_page = total / size`, plus one when `total % size != 0`
//! * every page before the last holds exactly `size` elements
//! * the last page holds `total % size` elements, or `size` when the
//!   total divides evenly
//! * pages past the last are empty
//!
//! Across pages, data sets must be pairwise disjoint. The walker checks
//! disjointness rather than a stable global ordering: the service is not
//! assumed to sort identically on every request.

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};
use crate::verify::VerifyReport;

/// One page of a paged collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The page number, 1-based.
    pub page: usize,
    /// The page size the server applied.
    pub size: usize,
    /// The total number of entities across all pages.
    pub total: usize,
    /// The entities on this page.
    pub data: Vec<T>,
}

/// The 1-based number of the last non-empty page.
///
/// Zero when the collection is empty.
pub fn last_page(total: usize, size: usize) -> usize {
    total / size + usize::from(total % size != 0)
}

/// The data length a correct service returns for a page.
pub fn expected_len(page: usize, total: usize, size: usize) -> usize {
    let last = last_page(total, size);
    if page < last {
        size
    } else if page == last {
        match total % size {
            0 => size,
            remainder => remainder,
        }
    } else {
        0
    }
}

/// Drives paged requests and validates page-boundary invariants.
///
/// The walker itself never talks to the network; the caller supplies a
/// fetch function `(page, size) -> Page<T>` and keeps transport concerns
/// (and per-response header checks) on its side of the seam.
#[derive(Debug, Clone, Copy)]
pub struct PaginationWalker {
    size: usize,
}

impl PaginationWalker {
    /// Creates a walker for the given page size.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// The page size this walker requests.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fetches the given pages in order and validates every invariant.
    ///
    /// Fetch errors propagate immediately; invariant violations across all
    /// fetched pages are aggregated into one assertion failure.
    pub fn walk<T, F>(&self, pages: &[usize], mut fetch: F) -> ContractResult<Vec<Page<T>>>
    where
        T: PartialEq + std::fmt::Debug,
        F: FnMut(usize, usize) -> ContractResult<Page<T>>,
    {
        self.validate_request(pages)?;

        let mut fetched = Vec::with_capacity(pages.len());
        for &number in pages {
            fetched.push((number, fetch(number, self.size)?));
        }
        self.validate_fetched(&fetched)?;

        Ok(fetched.into_iter().map(|(_, page)| page).collect())
    }

    /// Fetches page 1, derives the last page from its `total`, and walks
    /// every page through the end of the collection.
    pub fn walk_all<T, F>(&self, mut fetch: F) -> ContractResult<Vec<Page<T>>>
    where
        T: PartialEq + std::fmt::Debug,
        F: FnMut(usize, usize) -> ContractResult<Page<T>>,
    {
        self.validate_request(&[1])?;

        let first = fetch(1, self.size)?;
        let last = last_page(first.total, self.size);

        let mut fetched = vec![(1, first)];
        for number in 2..=last {
            fetched.push((number, fetch(number, self.size)?));
        }
        self.validate_fetched(&fetched)?;

        Ok(fetched.into_iter().map(|(_, page)| page).collect())
    }

    fn validate_request(&self, pages: &[usize]) -> ContractResult<()> {
        if self.size == 0 {
            return Err(ContractError::construction("page size must be positive"));
        }
        if pages.contains(&0) {
            return Err(ContractError::construction(
                "page numbers are 1-based; page 0 does not exist",
            ));
        }
        Ok(())
    }

    fn validate_fetched<T>(&self, fetched: &[(usize, Page<T>)]) -> ContractResult<()>
    where
        T: PartialEq + std::fmt::Debug,
    {
        let mut report = VerifyReport::new();

        let total = match fetched.first() {
            Some((_, first)) => first.total,
            None => return Ok(()),
        };

        for (requested, page) in fetched {
            if page.page != *requested {
                report.fail(format!(
                    "requested page {}, response says page {}",
                    requested, page.page
                ));
            }
            if page.size != self.size {
                report.fail(format!(
                    "requested size {}, response says size {}",
                    self.size, page.size
                ));
            }
            if page.total != total {
                report.fail(format!(
                    "total changed between pages: {} then {} on page {}",
                    total, page.total, requested
                ));
            }
            let expected = expected_len(*requested, total, self.size);
            if page.data.len() != expected {
                report.fail(format!(
                    "page {} of {} total (size {}) must hold {} element(s), got {}",
                    requested,
                    total,
                    self.size,
                    expected,
                    page.data.len()
                ));
            }
        }

        for (i, (number_a, page_a)) in fetched.iter().enumerate() {
            for (number_b, page_b) in &fetched[i + 1..] {
                for item in &page_a.data {
                    if page_b.data.contains(item) {
                        report.fail(format!(
                            "pages {} and {} are not disjoint: {:?} appears in both",
                            number_a, number_b, item
                        ));
                    }
                }
            }
        }

        report.into_result()
    }
}
