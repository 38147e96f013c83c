use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::KeyValueStore;
use crate::errors::StorageError;

/// One `<key>.json` file per key under a session directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .map_err(|source| StorageError::Io { key: directory.display().to_string(), source })?;
        Ok(Self { directory })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.path_for(key);
        let staging = self.directory.join(format!("{key}.json.tmp"));
        let io_error = |source| StorageError::Io { key: key.to_owned(), source };

        fs::write(&staging, value).map_err(io_error)?;
        fs::rename(&staging, &target).map_err(io_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileKeyValueStore;
    use crate::store::KeyValueStore;

    #[test]
    fn values_persist_across_handles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = dir.path().join("session-a");

        FileKeyValueStore::open(&session).expect("open").set("answers", "{}").expect("set");
        let reopened = FileKeyValueStore::open(&session).expect("reopen");

        assert_eq!(reopened.get("answers").expect("get").as_deref(), Some("{}"));
        assert!(session.join("answers.json").exists());
        assert!(!session.join("answers.json.tmp").exists());
    }

    #[test]
    fn missing_keys_read_as_none_and_remove_cleanly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileKeyValueStore::open(dir.path()).expect("open");

        assert_eq!(store.get("nothing").expect("get"), None);
        store.remove("nothing").expect("remove missing");
    }
}
