use std::cmp::{Ordering, Reverse};
use std::ops::Range;

use crate::domain::catalog::{CatalogFilters, INFINITE_SCROLL_BATCH_SIZE};
use crate::domain::clock::Clock;
use crate::domain::product::Product;
use crate::domain::types::{ItemsPerPage, NavigationMode, ProductPrice, SortCriterion};
use crate::dto::catalog::{CatalogResult, InfiniteScrollInfo, PaginationInfo, ProductListItem};
use crate::repository::ProductReader;

use super::{ServiceError, ServiceResult};

/// Core business logic for the catalog listing.
///
/// Reads every active product, orders it by the requested criterion and slices
/// one page (pagination) or one batch (infinite scroll). Filter values are
/// already validated; out-of-range pages and offsets are clamped rather than
/// rejected. `is_new` is always derived from the clock, never stored.
pub fn show_catalog<R, C>(
    filters: &CatalogFilters,
    catalog_title: &str,
    repo: &R,
    clock: &C,
) -> ServiceResult<CatalogResult>
where
    R: ProductReader,
    C: Clock + ?Sized,
{
    let mut products = match repo.list_products() {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let now = clock.now();
    let total = products.len();

    sort_products(&mut products, filters.sort);

    let (window, pagination, infinite_scroll) = match filters.navigation {
        NavigationMode::Pagination => {
            let (window, info) = page_window(total, filters.page, filters.items_per_page);
            (window, Some(info), None)
        }
        NavigationMode::InfiniteScroll => {
            let (window, info) = scroll_window(total, filters.loaded_items_count);
            (window, None, Some(info))
        }
    };

    let products = products[window]
        .iter()
        .map(|product| ProductListItem::from_product(product, now))
        .collect();

    Ok(CatalogResult {
        catalog_title: catalog_title.to_string(),
        layout: filters.layout,
        total_products_count: total,
        products,
        pagination,
        infinite_scroll,
    })
}

/// Stable sort by `criterion`; ties keep store order. Missing prices sort last
/// in both price directions.
pub fn sort_products(products: &mut [Product], criterion: SortCriterion) {
    match criterion {
        SortCriterion::NameAsc => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortCriterion::NameDesc => {
            products.sort_by_cached_key(|p| Reverse(p.name.to_lowercase()))
        }
        SortCriterion::PriceAsc => products.sort_by(|a, b| compare_prices(a.price, b.price, false)),
        SortCriterion::PriceDesc => products.sort_by(|a, b| compare_prices(a.price, b.price, true)),
        SortCriterion::DateNewest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortCriterion::DateOldest => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortCriterion::Popularity => {
            products.sort_by(|a, b| b.popularity_score.cmp(&a.popularity_score))
        }
    }
}

fn compare_prices(a: Option<ProductPrice>, b: Option<ProductPrice>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.get().total_cmp(&b.get());
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Slice bounds for `page`, clamped into `1..=total_pages`.
pub fn page_window(
    total: usize,
    page: usize,
    items_per_page: ItemsPerPage,
) -> (Range<usize>, PaginationInfo) {
    let per_page = items_per_page.get();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * per_page).min(total);
    let end = (page * per_page).min(total);

    let info = PaginationInfo {
        current_page: page,
        total_pages,
        items_per_page: per_page,
        has_previous: page > 1,
        has_next: page < total_pages,
    };
    (start..end, info)
}

/// Slice bounds for the next infinite-scroll batch after `loaded` items.
pub fn scroll_window(total: usize, loaded: usize) -> (Range<usize>, InfiniteScrollInfo) {
    let requested_end = loaded.saturating_add(INFINITE_SCROLL_BATCH_SIZE);
    let start = loaded.min(total);
    let end = requested_end.min(total);

    let info = InfiniteScrollInfo {
        loaded_items_count: end,
        batch_size: INFINITE_SCROLL_BATCH_SIZE,
        has_more_items: requested_end < total,
    };
    (start..end, info)
}
