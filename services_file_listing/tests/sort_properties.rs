//! Property tests for the sort projection

use fs_view::FileEntry;
use proptest::prelude::*;
use services_file_listing::{sort_entries, SortKey, SortOrder};

fn entry_strategy() -> impl Strategy<Value = FileEntry> {
    (
        "[a-zA-Z]{1,6}",
        any::<bool>(),
        prop::option::of(0u64..1000),
        prop::option::of(0u64..1000),
        prop::sample::select(vec!["folder", "file", "other", "rs"]),
    )
        .prop_map(|(name, is_dir, size, modified, label)| {
            let mut entry = FileEntry::new(name.clone(), format!("/d/{name}"), is_dir, label);
            entry.size = size;
            entry.modified = modified;
            entry
        })
}

fn listing_strategy() -> impl Strategy<Value = Vec<FileEntry>> {
    (
        prop::collection::vec(entry_strategy(), 0..24),
        any::<bool>(),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(mut files, with_parent, at)| {
            if with_parent {
                let index = at.index(files.len() + 1);
                files.insert(index, FileEntry::parent_link("/"));
            }
            files
        })
}

fn key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Name),
        Just(SortKey::Type),
        Just(SortKey::Size),
        Just(SortKey::Modified),
    ]
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

fn sorted_paths(files: &[FileEntry]) -> Vec<(String, String)> {
    let mut keys: Vec<_> = files
        .iter()
        .map(|f| (f.name.clone(), f.path.clone()))
        .collect();
    keys.sort();
    keys
}

proptest! {
    #[test]
    fn test_sort_is_permutation(files in listing_strategy(), key in key_strategy(), order in order_strategy()) {
        let sorted = sort_entries(&files, key, order);
        prop_assert_eq!(sorted.len(), files.len());
        prop_assert_eq!(sorted_paths(&sorted), sorted_paths(&files));
    }

    #[test]
    fn test_parent_entry_always_first(files in listing_strategy(), key in key_strategy(), order in order_strategy()) {
        let sorted = sort_entries(&files, key, order);
        if files.iter().any(FileEntry::is_parent_link) {
            prop_assert!(sorted[0].is_parent_link());
        }
    }

    #[test]
    fn test_directories_precede_files(files in listing_strategy(), key in key_strategy(), order in order_strategy()) {
        prop_assume!(key != SortKey::Type);
        let sorted = sort_entries(&files, key, order);
        let body: Vec<_> = sorted.iter().filter(|f| !f.is_parent_link()).collect();
        let first_file = body.iter().position(|f| !f.is_dir).unwrap_or(body.len());
        prop_assert!(body[first_file..].iter().all(|f| !f.is_dir));
    }

    #[test]
    fn test_sort_is_idempotent(files in listing_strategy(), key in key_strategy(), order in order_strategy()) {
        let once = sort_entries(&files, key, order);
        let twice = sort_entries(&once, key, order);
        prop_assert_eq!(once, twice);
    }
}
