//! Ordering and filtering rules for directory listings.
//!
//! Chapter directories and page files are ordered the way a reader expects:
//! digit runs compare by numeric value (`2` before `10`) and letters compare
//! without regard to case. Names that are equal under those rules fall back
//! to plain byte order so a listing is always deterministic.

use std::cmp::Ordering;

/// Extensions (lowercase) that count as a page or cover image.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// True when `name` ends in one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_image(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Numeric-aware, case-insensitive comparison.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natord::compare_ignore_case(a, b).then_with(|| a.cmp(b))
}

/// Sort `names` in place with [`natural_cmp`].
pub fn natural_sort(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}
