//! Path string helpers
//!
//! Paths arrive from the bridge as strings that may use `/` or `\`.
//! These helpers are purely lexical; they never touch the file system.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Returns the platform default root directory
///
/// Used when a panel or tab is opened without a path.
pub fn platform_default_root() -> &'static str {
    if cfg!(windows) {
        "C:\\"
    } else {
        "/"
    }
}

/// Returns true for filesystem roots (`/`, `\`, `C:`, `C:\`, `C:/`)
pub fn is_root(path: &str) -> bool {
    if path == "/" || path == "\\" {
        return true;
    }
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    match bytes.len() {
        2 => drive,
        3 => drive && (bytes[2] == b'/' || bytes[2] == b'\\'),
        _ => false,
    }
}

/// Derives a tab title from a path
///
/// The title is the final separator-delimited segment. When that
/// segment is empty (roots, trailing separators) the whole path is used.
///
/// # Examples
///
/// ```
/// use fs_view::title_from_path;
///
/// assert_eq!(title_from_path("C:\\test\\path"), "path");
/// assert_eq!(title_from_path("/home/user"), "user");
/// assert_eq!(title_from_path("C:\\"), "C:\\");
/// ```
pub fn title_from_path(path: &str) -> String {
    match path.rsplit(is_separator).next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => path.to_string(),
    }
}

/// Computes the lexical parent of an absolute path
///
/// Returns `None` for roots and for paths without any separator.
///
/// # Examples
///
/// ```
/// use fs_view::lexical_parent;
///
/// assert_eq!(lexical_parent("/home/user").as_deref(), Some("/home"));
/// assert_eq!(lexical_parent("/home").as_deref(), Some("/"));
/// assert_eq!(lexical_parent("C:\\test").as_deref(), Some("C:\\"));
/// assert_eq!(lexical_parent("/"), None);
/// ```
pub fn lexical_parent(path: &str) -> Option<String> {
    if path.is_empty() || is_root(path) {
        return None;
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return None;
    }
    let idx = trimmed.rfind(is_separator)?;
    let separator = &trimmed[idx..idx + 1];
    let parent = &trimmed[..idx];
    if parent.is_empty() {
        return Some(separator.to_string());
    }
    if is_root(parent) {
        // "C:" needs its separator back to stay a root
        return Some(format!("{}{}", parent.trim_end_matches(is_separator), separator));
    }
    Some(parent.to_string())
}

/// Joins a directory and an entry name with the directory's separator style
pub fn join(dir: &str, name: &str) -> String {
    let separator = if dir.contains('\\') && !dir.contains('/') {
        '\\'
    } else {
        '/'
    };
    if dir.ends_with(is_separator) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, separator, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roots() {
        assert!(is_root("/"));
        assert!(is_root("\\"));
        assert!(is_root("C:"));
        assert!(is_root("C:\\"));
        assert!(is_root("d:/"));
        assert!(!is_root("C:\\test"));
        assert!(!is_root("/home"));
        assert!(!is_root(""));
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("C:\\test\\path"), "path");
        assert_eq!(title_from_path("/home/user/docs"), "docs");
        assert_eq!(title_from_path("/"), "/");
        assert_eq!(title_from_path("C:\\"), "C:\\");
        assert_eq!(title_from_path("plain"), "plain");
    }

    #[test]
    fn test_title_trailing_separator_uses_full_path() {
        assert_eq!(title_from_path("/home/user/"), "/home/user/");
    }

    #[test]
    fn test_lexical_parent_unix() {
        assert_eq!(lexical_parent("/home/user").as_deref(), Some("/home"));
        assert_eq!(lexical_parent("/home/user/").as_deref(), Some("/home"));
        assert_eq!(lexical_parent("/home").as_deref(), Some("/"));
        assert_eq!(lexical_parent("/"), None);
    }

    #[test]
    fn test_lexical_parent_windows() {
        assert_eq!(lexical_parent("C:\\test\\sub").as_deref(), Some("C:\\test"));
        assert_eq!(lexical_parent("C:\\test").as_deref(), Some("C:\\"));
        assert_eq!(lexical_parent("C:\\"), None);
    }

    #[test]
    fn test_lexical_parent_relative() {
        assert_eq!(lexical_parent("docs"), None);
        assert_eq!(lexical_parent(""), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/home", "user"), "/home/user");
        assert_eq!(join("/", "etc"), "/etc");
        assert_eq!(join("C:\\test", "a.txt"), "C:\\test\\a.txt");
        assert_eq!(join("C:\\", "Users"), "C:\\Users");
    }

    #[test]
    fn test_default_root_is_root() {
        assert!(is_root(platform_default_root()));
    }
}
