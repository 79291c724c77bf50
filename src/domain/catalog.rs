use serde::{Deserialize, Serialize};

use crate::domain::types::{ItemsPerPage, LayoutType, NavigationMode, SortCriterion};

/// Number of products appended per infinite-scroll request.
pub const INFINITE_SCROLL_BATCH_SIZE: usize = 24;

/// Already-validated catalog retrieval parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogFilters {
    pub layout: LayoutType,
    pub sort: SortCriterion,
    pub navigation: NavigationMode,
    /// One-based page, pagination mode only.
    pub page: usize,
    pub items_per_page: ItemsPerPage,
    /// Items already shown, infinite-scroll mode only.
    pub loaded_items_count: usize,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self {
            layout: LayoutType::default(),
            sort: SortCriterion::default(),
            navigation: NavigationMode::default(),
            page: 1,
            items_per_page: ItemsPerPage::default(),
            loaded_items_count: 0,
        }
    }
}

impl CatalogFilters {
    pub fn sort(mut self, sort: SortCriterion) -> Self {
        self.sort = sort;
        self
    }
    pub fn layout(mut self, layout: LayoutType) -> Self {
        self.layout = layout;
        self
    }
    pub fn paginate(mut self, page: usize, items_per_page: ItemsPerPage) -> Self {
        self.navigation = NavigationMode::Pagination;
        self.page = page;
        self.items_per_page = items_per_page;
        self
    }
    pub fn infinite_scroll(mut self, loaded_items_count: usize) -> Self {
        self.navigation = NavigationMode::InfiniteScroll;
        self.loaded_items_count = loaded_items_count;
        self
    }
}
