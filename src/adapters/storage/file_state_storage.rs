//! File-based State Store Adapter
//!
//! Stores one YAML file per contact under a base directory. Handy for
//! single-instance deployments and for inspecting state while debugging.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::EnhancedState;
use crate::domain::foundation::ContactId;
use crate::ports::{StateStore, StateStoreError};

/// File-based storage for conversation state
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStateStore::new("./data/state");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the state file path for a contact.
    ///
    /// Bytes outside `[A-Za-z0-9_-]` are percent-encoded, so the mapping is
    /// injective and a contact id can never escape the base directory.
    fn state_file_path(&self, contact: &ContactId) -> PathBuf {
        let mut file_stem = String::with_capacity(contact.as_str().len());
        for byte in contact.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file_stem.push(char::from(byte));
            } else {
                file_stem.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_path.join(format!("{}.yaml", file_stem))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, contact: &ContactId) -> Result<Option<EnhancedState>, StateStoreError> {
        let file_path = self.state_file_path(contact);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateStoreError::IoError(e.to_string())),
        };

        let state = serde_yaml::from_str(&yaml)
            .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(state))
    }

    async fn set(&self, contact: &ContactId, state: &EnhancedState) -> Result<(), StateStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StateStoreError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.state_file_path(contact), yaml)
            .await
            .map_err(|e| StateStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::in_memory_state_storage::test_support::sample_state;
    use super::*;
    use tempfile::TempDir;

    fn contact(id: &str) -> ContactId {
        ContactId::new(id).unwrap()
    }

    #[tokio::test]
    async fn save_and_load_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());
        let state = sample_state();

        store.set(&contact("5511999990000"), &state).await.unwrap();
        let loaded = store.get(&contact("5511999990000")).await.unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        assert!(store.get(&contact("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn creates_base_directory_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path().join("nested").join("state"));

        store.set(&contact("5511"), &sample_state()).await.unwrap();

        assert!(temp_dir.path().join("nested/state/5511.yaml").exists());
    }

    #[tokio::test]
    async fn contact_ids_cannot_escape_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        let path = store.state_file_path(&contact("../../etc/passwd"));

        assert_eq!(path.parent(), Some(temp_dir.path()));
        assert_eq!(path.file_name().unwrap(), "%2E%2E%2F%2E%2E%2Fetc%2Fpasswd.yaml");
    }

    #[tokio::test]
    async fn similar_contact_ids_do_not_share_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());
        let state = sample_state();

        store.set(&contact("ana.silva"), &state).await.unwrap();

        assert!(store.get(&contact("ana_silva")).await.unwrap().is_none());
        assert!(store.get(&contact("ana%2Esilva")).await.unwrap().is_none());
        assert_eq!(store.get(&contact("ana.silva")).await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("5511.yaml"), "stage: [not a stage").unwrap();

        let result = store.get(&contact("5511")).await;
        assert!(matches!(result, Err(StateStoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn stored_yaml_uses_persisted_field_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());
        store.set(&contact("5511"), &sample_state()).await.unwrap();

        let yaml = std::fs::read_to_string(temp_dir.path().join("5511.yaml")).unwrap();
        assert!(yaml.contains("qualificationScore:"));
        assert!(yaml.contains("bantInfo:"));
    }
}
