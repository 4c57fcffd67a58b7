//! Display helpers for catalog listings.

use crate::domain::Category;

/// Display label for a category key; unknown keys come back unchanged
pub fn category_label(key: &str) -> String {
    Category::new(key).label().to_string()
}

/// Human viewer count: `999`, `1.5K`, `2.3M`.
///
/// One decimal, with ties rounded up (`1_250` is `1.3K`).
pub fn format_viewers(viewers: u64) -> String {
    if viewers >= 1_000_000 {
        with_tenths(viewers, 1_000_000, 'M')
    } else if viewers >= 1_000 {
        with_tenths(viewers, 1_000, 'K')
    } else {
        viewers.to_string()
    }
}

fn with_tenths(viewers: u64, unit: u64, suffix: char) -> String {
    let step = unit / 10;
    let tenths = (viewers + step / 2) / step;
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}
