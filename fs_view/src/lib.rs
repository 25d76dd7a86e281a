//! # Filesystem View
//!
//! The boundary between the layout core and the native file system.
//!
//! ## Philosophy
//!
//! - **Paths are strings at the boundary**: The bridge speaks absolute path strings
//!   with either `/` or `\` separators; the core never assumes one platform
//! - **Access is a trait**: The core calls [`DirectoryAccess`] and never touches
//!   `std::fs` directly
//! - **Failures are values**: Unreadable directories surface as [`DirectoryError`]
//!
//! ## Implementations
//!
//! - [`LocalDirectoryAccess`]: reads the host file system
//! - [`FakeDirectoryAccess`]: in-memory tree for tests and demos

pub mod access;
pub mod entry;
pub mod fake;
pub mod local;
pub mod path;

pub use access::{DirectoryAccess, DirectoryError};
pub use entry::{FileEntry, FOLDER_LABEL, PARENT_ENTRY_NAME};
pub use fake::FakeDirectoryAccess;
pub use local::LocalDirectoryAccess;
pub use path::{is_root, join, lexical_parent, platform_default_root, title_from_path};
