//! File-backed store.
//!
//! Each origin gets its own JSON object on disk, so two origins never see
//! each other's keys. The file is re-read on every access: another process
//! toggling the theme is visible to the next read.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PreferenceStore, StorageError};

const APP_DIR: &str = "themeswitch";

/// A [`PreferenceStore`] persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses the file at `path`. It need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the default location for `origin`:
    /// `<config_dir>/themeswitch/<origin-slug>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the platform has no
    /// configuration directory.
    pub fn for_origin(origin: &str) -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or_else(|| {
            StorageError::Unavailable("no configuration directory on this platform".to_string())
        })?;
        Ok(Self::in_dir(base.join(APP_DIR), origin))
    }

    /// Uses `<dir>/<origin-slug>.json`.
    pub fn in_dir(dir: impl AsRef<Path>, origin: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", origin_slug(origin))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write forever.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Format { .. }) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)
    }
}

/// Turns an origin into a file-name-safe slug.
///
/// Origins compare without regard to ASCII case, so the origin is lowercased
/// first. Lowercase letters, digits, `-` and `.` are kept; every other byte
/// becomes `%XX`, so distinct origins always get distinct slugs. A leading
/// `.` is escaped too, which keeps `..` and hidden files out. The empty
/// origin maps to `_`, which no escaped origin can produce.
///
/// # Example
///
/// ```rust
/// use themeswitch::storage::origin_slug;
///
/// assert_eq!(origin_slug("https://example.com:8080"), "https%3A%2F%2Fexample.com%3A8080");
/// assert_ne!(origin_slug("a:b"), origin_slug("a_b"));
/// assert_eq!(origin_slug(""), "_");
/// ```
pub fn origin_slug(origin: &str) -> String {
    if origin.is_empty() {
        return "_".to_string();
    }
    let mut slug = String::with_capacity(origin.len());
    for (i, b) in origin.to_ascii_lowercase().bytes().enumerate() {
        let keep = b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || (b == b'.' && i > 0);
        if keep {
            slug.push(char::from(b));
        } else {
            slug.push_str(&format!("%{:02X}", b));
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/deeper/store.json"));
        store.set("theme", "dark").unwrap();
        assert!(store.path().exists());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        FileStore::new(&path).set("theme", "light").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("store.json"));
        store.set("theme", "dark").unwrap();
        store.set("other", "value").unwrap();
        store.remove("theme").unwrap();

        assert_eq!(store.get("theme").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_corrupt_file_is_format_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("theme"), Err(StorageError::Format { .. })));
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();

        let mut store = FileStore::new(&path);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_origins_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = FileStore::in_dir(dir.path(), "https://a.example");
        let b = FileStore::in_dir(dir.path(), "https://b.example");

        a.set("theme", "dark").unwrap();
        assert_eq!(b.get("theme").unwrap(), None);
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_origin_slug() {
        assert_eq!(origin_slug("http://localhost:3000"), "http%3A%2F%2Flocalhost%3A3000");
        assert_eq!(origin_slug("Example.COM"), "example.com");
        assert_eq!(origin_slug("../../etc"), "%2E.%2F..%2Fetc");
        assert_eq!(origin_slug("///"), "%2F%2F%2F");
        assert_eq!(origin_slug("50%"), "50%25");
    }

    #[test]
    fn test_origin_slug_keeps_separators_distinct() {
        let slugs = ["a:b", "a/b", "a_b", "a%3Ab", "a b", "", "_", "%"].map(origin_slug);
        for (i, a) in slugs.iter().enumerate() {
            for b in &slugs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_similar_origins_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut colon = FileStore::in_dir(dir.path(), "a:b");
        let underscore = FileStore::in_dir(dir.path(), "a_b");

        colon.set("theme", "dark").unwrap();
        assert_eq!(underscore.get("theme").unwrap(), None);
    }
}
