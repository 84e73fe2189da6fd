use serde::{Deserialize, Serialize};

/// Position of a page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    /// Number of pages.
    pub out_of: usize,
    /// Number of items matching the query, across all pages.
    pub total: usize,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub entities: Vec<T>,
    pub page: PageInfo,
}

impl<T> Page<T> {
    /// A page with no entities and no matches.
    pub fn empty() -> Self {
        Self {
            entities: Vec::new(),
            page: calculate_page_info(0, 0, 0),
        }
    }
}

/// Computes the page number and page count for `total` items.
///
/// A `limit` of 0 means every item fits on a single page.
pub fn calculate_page_info(limit: usize, offset: usize, total: usize) -> PageInfo {
    let out_of = match (total, limit) {
        (0, _) => 0,
        (_, 0) => 1,
        (total, limit) => total.div_ceil(limit),
    };
    let number = if limit == 0 { 1 } else { offset / limit + 1 };

    PageInfo {
        number,
        out_of,
        total,
    }
}

/// Applies `offset` then `limit` to `items`. An offset past the end yields
/// an empty page; a `limit` of 0 keeps everything after the offset.
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
    let iter = items.into_iter().skip(offset);
    if limit == 0 {
        iter.collect()
    } else {
        iter.take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_page_info_fixtures() {
        let cases = [
            ((9, 0, 25), (1, 3, 25)),
            ((9, 9, 25), (2, 3, 25)),
            ((9, 18, 25), (3, 3, 25)),
            ((9, 0, 18), (1, 2, 18)),
            ((9, 0, 19), (1, 3, 19)),
            ((0, 0, 25), (1, 1, 25)),
            ((9, 0, 0), (1, 0, 0)),
        ];

        for ((limit, offset, total), (number, out_of, expected_total)) in cases {
            assert_eq!(
                calculate_page_info(limit, offset, total),
                PageInfo {
                    number,
                    out_of,
                    total: expected_total,
                },
                "limit={limit} offset={offset} total={total}"
            );
        }
    }

    #[test]
    fn test_paginate_slices_offset_then_limit() {
        assert_eq!(paginate(vec![0, 1, 2], 2, 1), vec![1, 2]);
        assert_eq!(paginate(vec![0, 1, 2, 3, 4], 2, 2), vec![2, 3]);
    }

    #[test]
    fn test_paginate_without_limit_keeps_the_rest() {
        assert_eq!(paginate(vec![0, 1, 2], 0, 1), vec![1, 2]);
        assert_eq!(paginate(vec![0, 1, 2], 0, 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_paginate_offset_past_end_is_empty() {
        assert!(paginate(vec![0, 1, 2], 2, 3).is_empty());
        assert!(paginate(vec![0, 1, 2], 0, 10).is_empty());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u8> = Page::empty();
        assert!(page.entities.is_empty());
        assert_eq!(
            page.page,
            PageInfo {
                number: 1,
                out_of: 0,
                total: 0,
            }
        );
    }
}
