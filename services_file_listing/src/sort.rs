//! Sort projection over raw listing entries

use crate::state::{SortKey, SortOrder};
use fs_view::FileEntry;
use std::cmp::Ordering;

/// Compares lowercased code points; there is no locale collation
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn compare_entries(a: &FileEntry, b: &FileEntry, key: SortKey, order: SortOrder) -> Ordering {
    // `..` leads regardless of key or order
    match (a.is_parent_link(), b.is_parent_link()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (true, true) => return Ordering::Equal,
        (false, false) => {}
    }

    if key != SortKey::Type && a.is_dir != b.is_dir {
        return if a.is_dir {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let primary = match key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Type => compare_text(&a.type_label, &b.type_label),
        SortKey::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
        SortKey::Modified => a.modified.unwrap_or(0).cmp(&b.modified.unwrap_or(0)),
    };

    match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    }
}

/// Returns `files` ordered by `key` and `order`
///
/// The result is always a permutation of the input:
/// 1. the `..` entry comes first,
/// 2. directories precede files unless sorting by type,
/// 3. the primary key compares names and labels by lowercased Unicode code
///    point (not locale collation, so `é` sorts after `z`) and sizes and
///    times numerically (missing values count as 0),
/// 4. `Desc` reverses only the primary comparison.
///
/// Ties keep their input order.
pub fn sort_entries(files: &[FileEntry], key: SortKey, order: SortOrder) -> Vec<FileEntry> {
    let mut sorted = files.to_vec();
    sorted.sort_by(|a, b| compare_entries(a, b, key, order));
    sorted
}
