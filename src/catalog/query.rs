//! Search and pagination over an item snapshot.
//!
//! Pure functions: the same snapshot and query always produce the same page.

use serde::Serialize;

use crate::models::Item;

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 10;

// == List Query ==
/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Non-blank search term, if any
    pub search: Option<String>,
    /// 1-based page number
    pub page: usize,
    /// Items per page, always positive
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// == Pagination ==
/// Paging metadata for a filtered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Computes paging metadata for `total_items` filtered items.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: page_size,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// One page of a query result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

// == Query ==
/// Filters `items` by the search term and slices out the requested page.
///
/// A page past the end is empty, not an error. Zero page or page size
/// values are treated as 1.
pub fn query(items: &[Item], params: &ListQuery) -> Page {
    let needle = params.search.as_deref().map(str::to_lowercase);
    let filtered: Vec<&Item> = match needle.as_deref() {
        Some(needle) => items.iter().filter(|item| item.matches(needle)).collect(),
        None => items.iter().collect(),
    };

    let page = params.page.max(1);
    let page_size = params.page_size.max(1);
    let pagination = Pagination::new(page, page_size, filtered.len());
    let offset = (page - 1).saturating_mul(page_size);

    let items = filtered
        .into_iter()
        .skip(offset)
        .take(page_size)
        .cloned()
        .collect();

    Page { items, pagination }
}

/// Looks up a single item by id.
pub fn find(items: &[Item], id: u64) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: u64, name: &str, category: Option<&str>) -> Item {
        Item {
            id,
            name: name.to_string(),
            category: category.map(str::to_string),
            price: 10.0,
        }
    }

    fn numbered(count: u64) -> Vec<Item> {
        (1..=count).map(|i| item(i, &format!("Item {}", i), None)).collect()
    }

    fn page_query(page: usize, page_size: usize) -> ListQuery {
        ListQuery {
            search: None,
            page,
            page_size,
        }
    }

    #[test]
    fn test_third_page_of_twenty_five() {
        let page = query(&numbered(25), &page_query(3, 10));

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, 21);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_items, 25);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn test_first_page_defaults() {
        let page = query(&numbered(2), &ListQuery::default());

        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.pagination,
            Pagination {
                current_page: 1,
                total_pages: 1,
                total_items: 2,
                items_per_page: 10,
                has_next_page: false,
                has_prev_page: false,
            }
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![
            item(1, "Laptop Pro", Some("Electronics")),
            item(2, "Headphones", Some("Electronics")),
        ];
        let params = ListQuery {
            search: Some("laptop".to_string()),
            ..Default::default()
        };

        let page = query(&items, &params);
        assert_eq!(page.items, vec![items[0].clone()]);
        assert_eq!(page.pagination.total_items, 1);
    }

    #[test]
    fn test_search_matches_category() {
        let items = vec![
            item(1, "Desk", Some("Furniture")),
            item(2, "Chair", Some("Furniture")),
            item(3, "Mouse", None),
        ];
        let params = ListQuery {
            search: Some("FURN".to_string()),
            ..Default::default()
        };

        assert_eq!(query(&items, &params).items.len(), 2);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let page = query(&[], &ListQuery::default());

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next_page);
        assert!(!page.pagination.has_prev_page);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let page = query(&numbered(5), &page_query(4, 2));

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn test_find() {
        let items = numbered(3);
        assert_eq!(find(&items, 2).map(|i| i.id), Some(2));
        assert!(find(&items, 99).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Walking every page visits each filtered item exactly once, in order.
        #[test]
        fn prop_pages_partition_items(count in 0u64..60, page_size in 1usize..15) {
            let items = numbered(count);
            let first = query(&items, &page_query(1, page_size));
            let mut seen = Vec::new();

            for page in 1..=first.pagination.total_pages {
                let result = query(&items, &page_query(page, page_size));
                prop_assert!(result.items.len() <= page_size);
                prop_assert_eq!(result.pagination.has_next_page, page < first.pagination.total_pages);
                seen.extend(result.items.into_iter().map(|i| i.id));
            }

            let expected: Vec<u64> = items.iter().map(|i| i.id).collect();
            prop_assert_eq!(seen, expected);
        }
    }
}
