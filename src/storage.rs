use crate::models::PanelDoc;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Store key the widget writes its momentum payload under.
pub const PRIMARY_KEY: &str = "primary";
/// Older builds used this key; still honored when `primary` is absent.
pub const LEGACY_KEY: &str = "momentum";

/// Load the key-value store file: a JSON object mapping string keys to raw
/// JSON payload text. `None` means the store is structurally absent, which
/// the reader treats differently from a store full of zeros.
pub async fn load_store(path: &Path) -> Option<BTreeMap<String, String>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            error!("failed to read store file: {err}");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(store) => Some(store),
        Err(err) => {
            error!("failed to parse store file: {err}");
            None
        }
    }
}

/// Pick the momentum payload out of the store, preferring the primary key.
pub fn store_payload(store: &BTreeMap<String, String>) -> Option<&str> {
    store
        .get(PRIMARY_KEY)
        .or_else(|| store.get(LEGACY_KEY))
        .map(String::as_str)
}

/// Load the structured panel document (the page-content source). Absent or
/// unparseable files both mean "no data from this source".
pub async fn load_panel(path: &Path) -> Option<PanelDoc> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            error!("failed to read panel file: {err}");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(doc) => Some(doc),
        Err(err) => {
            error!("failed to parse panel file: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_prefers_primary_over_legacy() {
        let mut store = BTreeMap::new();
        store.insert(LEGACY_KEY.to_string(), "{\"a\":[1]}".to_string());
        assert_eq!(store_payload(&store), Some("{\"a\":[1]}"));

        store.insert(PRIMARY_KEY.to_string(), "{\"b\":[2]}".to_string());
        assert_eq!(store_payload(&store), Some("{\"b\":[2]}"));
    }

    #[test]
    fn payload_empty_store_is_none() {
        let store = BTreeMap::new();
        assert_eq!(store_payload(&store), None);
    }
}
