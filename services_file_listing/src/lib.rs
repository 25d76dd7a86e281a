//! # File Listing Service
//!
//! Caches one directory listing per `(panel, tab)` pair.
//!
//! ## Philosophy
//!
//! - **Raw entries are stored, order is derived**: Sorting is a pure projection
//!   over the stored entries ([`sort_entries`]); changing the sort key never
//!   rewrites the cache
//! - **Absence is visible**: [`FileListingCache::get`] returns `Option`;
//!   [`FileListingCache::state`] falls back to the default state explicitly
//! - **Loads replace, never diff**: Every successful load swaps the whole entry
//!   list and resets selection and sort
//! - **Stale loads are discarded**: Each load carries a [`LoadTicket`]; results
//!   for an evicted key or a superseded load are dropped

pub mod cache;
pub mod sort;
pub mod state;

pub use cache::{FileListingCache, ListingError, LoadOutcome, LoadTicket};
pub use sort::sort_entries;
pub use state::{FileListingState, FileStatePatch, ListingKey, SortKey, SortOrder};
