//! Posting-set intersection.

use roaring::RoaringBitmap;

/// Intersect posting sets (AND operation).
///
/// Returns the empty set for empty input; the running intersection exits
/// early once it drains.
pub fn intersect(lists: &[&RoaringBitmap]) -> RoaringBitmap {
    let Some((first, rest)) = lists.split_first() else {
        return RoaringBitmap::new();
    };

    let mut result = (*first).clone();
    for list in rest {
        result &= *list;
        if result.is_empty() {
            break;
        }
    }

    result
}
