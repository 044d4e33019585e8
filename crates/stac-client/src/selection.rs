//! Scene selection.

use std::cmp::Ordering;

use crate::item::StacItem;

/// Pick the scene with the lowest cloud cover.
///
/// Equal cloud cover is broken by the lexicographically smallest item id, so
/// the result does not depend on the order the catalog returned items in.
/// Items without a cloud-cover value rank after all items that have one.
pub fn select_least_cloudy(items: Vec<StacItem>) -> Option<StacItem> {
    items.into_iter().min_by(compare_candidates)
}

/// Ordering used by [`select_least_cloudy`]; `Less` means "preferred".
pub fn compare_candidates(a: &StacItem, b: &StacItem) -> Ordering {
    let cc_a = a.cloud_cover().unwrap_or(f64::INFINITY);
    let cc_b = b.cloud_cover().unwrap_or(f64::INFINITY);
    cc_a.total_cmp(&cc_b).then_with(|| a.id.cmp(&b.id))
}
