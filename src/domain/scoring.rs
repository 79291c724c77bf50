//! Pure calculators deriving popularity, freshness and lazy-load rank.

use chrono::{DateTime, Utc};

use crate::domain::types::{ImageCategory, LazyLoadPriority};

pub const VIEW_WEIGHT: u64 = 1;
pub const CLICK_WEIGHT: u64 = 3;
pub const INTERACTION_WEIGHT: u64 = 2;

/// Products younger than this many whole days are flagged as new.
pub const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Weighted sum of the three interaction counters.
pub fn popularity_score(views: u64, clicks: u64, interactions: u64) -> u64 {
    views
        .saturating_mul(VIEW_WEIGHT)
        .saturating_add(clicks.saturating_mul(CLICK_WEIGHT))
        .saturating_add(interactions.saturating_mul(INTERACTION_WEIGHT))
}

pub fn lazy_load_priority(category: ImageCategory) -> LazyLoadPriority {
    let rank = match category {
        ImageCategory::Frontal => 1,
        ImageCategory::Lateral => 2,
        ImageCategory::Detalle => 3,
        ImageCategory::Contexto => 4,
        ImageCategory::Perspectiva => 5,
    };
    LazyLoadPriority::new(rank).unwrap_or(LazyLoadPriority::LOWEST)
}

/// Priority for a raw category name. Names outside the taxonomy load last
/// instead of failing.
pub fn lazy_load_priority_for(category: &str) -> LazyLoadPriority {
    ImageCategory::try_from(category)
        .map(lazy_load_priority)
        .unwrap_or(LazyLoadPriority::LOWEST)
}

/// `true` while fewer than 31 whole days have elapsed since creation.
pub fn is_new(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - created_at).num_days() <= NEW_PRODUCT_WINDOW_DAYS
}
