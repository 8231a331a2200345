use std::fmt;
use std::path::{Path, PathBuf};

/// Prefixes a fresh session starts with. The empty prefix is the current directory.
pub const DEFAULT_PREFIXES: [&str; 3] = ["", "/bin/", "/usr/bin/"];

/// Ordered list of path prefixes used to resolve bare program names.
///
/// Entries are only ever appended during a session; lookup tries them in
/// insertion order and the first existing candidate wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchList {
    prefixes: Vec<String>,
}

impl SearchList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one prefix after all existing ones.
    pub fn push(&mut self, prefix: impl Into<String>) {
        self.prefixes.push(prefix.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Resolve a program name to the first existing `prefix + name` candidate.
    ///
    /// Behavior:
    /// - Empty name: returns `None`.
    /// - Otherwise every prefix is tried in order; a separator is inserted when a
    ///   non-empty prefix does not already end with one.
    ///
    /// Only existence is checked. A file that exists but cannot be executed is
    /// still returned and fails later, when the process is spawned.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        self.iter()
            .map(|prefix| candidate(prefix, name))
            .find(|path| find_by_path(path).is_some())
    }
}

impl Default for SearchList {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES)
    }
}

impl fmt::Display for SearchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefixes.join(":"))
    }
}

fn candidate(prefix: &str, name: &str) -> PathBuf {
    if prefix.is_empty() || prefix.ends_with('/') {
        PathBuf::from(format!("{prefix}{name}"))
    } else {
        PathBuf::from(format!("{prefix}/{name}"))
    }
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_default_list_order() {
        let list = SearchList::default();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["", "/bin/", "/usr/bin/"]);
        assert_eq!(list.to_string(), ":/bin/:/usr/bin/");
    }

    #[test]
    fn test_candidate_inserts_separator_only_when_missing() {
        assert_eq!(candidate("", "ls"), PathBuf::from("ls"));
        assert_eq!(candidate("/bin/", "ls"), PathBuf::from("/bin/ls"));
        assert_eq!(candidate("/opt/bin", "ls"), PathBuf::from("/opt/bin/ls"));
    }

    #[test]
    fn test_first_existing_prefix_wins() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        let third = tempfile::tempdir().expect("tempdir");
        File::create(second.path().join("tool")).expect("touch");
        File::create(third.path().join("tool")).expect("touch");

        let list = SearchList::new([
            first.path().to_string_lossy().into_owned(),
            second.path().to_string_lossy().into_owned(),
            third.path().to_string_lossy().into_owned(),
        ]);

        let found = list.resolve("tool").expect("tool should resolve");
        assert_eq!(found, second.path().join("tool"));
    }

    #[test]
    fn test_name_only_under_last_prefix() {
        let empty = tempfile::tempdir().expect("tempdir");
        let bin = tempfile::tempdir().expect("tempdir");
        let usr_bin = tempfile::tempdir().expect("tempdir");
        fs::write(usr_bin.path().join("only-here"), b"").expect("write");

        let list = SearchList::new([
            format!("{}/", empty.path().display()),
            format!("{}/", bin.path().display()),
            format!("{}/", usr_bin.path().display()),
        ]);
        assert_eq!(
            list.resolve("only-here"),
            Some(PathBuf::from(format!("{}/only-here", usr_bin.path().display())))
        );
        assert_eq!(list.resolve("only-here"), list.resolve("only-here"));
    }

    #[test]
    fn test_not_found_when_list_exhausted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let list = SearchList::new([dir.path().to_string_lossy().into_owned()]);
        assert_eq!(list.resolve("nonexisting"), None);
        assert_eq!(SearchList::new(Vec::<String>::new()).resolve("sh"), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_name_through_empty_prefix() {
        let list = SearchList::default();
        assert_eq!(list.resolve("/bin/sh"), Some(PathBuf::from("/bin/sh")));
    }

    #[test]
    fn test_empty_name_is_none() {
        assert_eq!(SearchList::default().resolve(""), None);
    }

    #[test]
    fn test_existing_but_not_executable_is_still_returned() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("data.txt"), b"plain text").expect("write");
        let list = SearchList::new([format!("{}/", dir.path().display())]);
        assert!(list.resolve("data.txt").is_some());
    }

    #[test]
    fn test_push_appends_after_existing_entries() {
        let mut list = SearchList::default();
        list.push("/opt/bin");
        assert_eq!(list.len(), 4);
        assert_eq!(list.to_string(), ":/bin/:/usr/bin/:/opt/bin");
    }
}
