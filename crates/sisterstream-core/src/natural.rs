//! Natural ordering for file and folder names.

use std::cmp::Ordering;

/// Case-insensitive comparison with embedded digit runs compared by value,
/// so "Episode 2" sorts before "Episode 10".
///
/// Names equal under that rule fall back to a plain comparison, keeping the
/// order independent of directory listing order.
pub fn compare(a: &str, b: &str) -> Ordering {
    natord::compare_ignore_case(a, b).then_with(|| a.cmp(b))
}

/// Sort items in place by a name key.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare(name(a), name(b)));
}
