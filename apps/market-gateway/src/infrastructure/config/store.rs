//! JSON-file config store.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::application::ports::ConfigStore;

/// Read-only key/value store backed by a JSON object file.
///
/// String values are kept as-is; numbers and booleans are kept as their text.
/// A missing, unreadable or malformed file yields an empty store.
#[derive(Default)]
pub struct JsonFileConfigStore {
    entries: HashMap<String, String>,
}

impl JsonFileConfigStore {
    /// Load the store from `path`.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Config store not readable");
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, Value>>(&content) {
            Ok(raw) => {
                let entries: HashMap<String, String> = raw
                    .into_iter()
                    .filter_map(|(key, value)| match value {
                        Value::String(s) => Some((key, s)),
                        Value::Number(n) => Some((key, n.to_string())),
                        Value::Bool(b) => Some((key, b.to_string())),
                        _ => None,
                    })
                    .collect();
                tracing::info!(path = %path.display(), keys = entries.len(), "Config store loaded");
                Self { entries }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Config store is not a JSON object"
                );
                Self::default()
            }
        }
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl std::fmt::Debug for JsonFileConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("JsonFileConfigStore")
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_string_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pump_fun_cookie": "a=1; b=2", "retries": 3, "nested": {{"x": 1}}}}"#
        )
        .unwrap();

        let store = JsonFileConfigStore::load(file.path());
        assert_eq!(store.get("pump_fun_cookie").as_deref(), Some("a=1; b=2"));
        assert_eq!(store.get("retries").as_deref(), Some("3"));
        assert_eq!(store.get("nested"), None);
        assert_eq!(store.get("xueqiu_cookie"), None);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileConfigStore::load(&dir.path().join("absent.json"));
        assert_eq!(store.get("pump_fun_cookie"), None);
    }

    #[test]
    fn malformed_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert_eq!(JsonFileConfigStore::load(file.path()).get("0"), None);
    }

    #[test]
    fn debug_lists_keys_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"xueqiu_cookie": "secret=1"}}"#).unwrap();
        let rendered = format!("{:?}", JsonFileConfigStore::load(file.path()));
        assert!(rendered.contains("xueqiu_cookie"));
        assert!(!rendered.contains("secret"));
    }
}
