//! File-backed key-value store: one JSON document per key.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::{KeyValueStore, Result};
use crate::core::utils::{app_data_dir, ensure_dir};
use crate::errors::LedgerError;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<root>/<key>.json`, written atomically by staging to
/// a temporary file and renaming over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path).map_err(LedgerError::Io)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    #[test]
    fn put_then_get_round_trips() {
        let (store, _guard) = store_with_temp_dir();
        store.put("username", "\"zehra\"").expect("put");
        let value = store.get("username").expect("get");
        assert_eq!(value.as_deref(), Some("\"zehra\""));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("expenses").expect("get").is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let (store, _guard) = store_with_temp_dir();
        store.put("monthly_limit", "100").expect("put");
        store.remove("monthly_limit").expect("first remove");
        store.remove("monthly_limit").expect("second remove");
        assert!(store.get("monthly_limit").expect("get").is_none());
    }

    #[test]
    fn keys_are_sanitized_to_safe_file_names() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.value_path("Some Key!");
        assert!(path.ends_with("some_key_.json"));
    }
}
