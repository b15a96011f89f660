/*
[INPUT]:  Session records and a storage location
[OUTPUT]: Session persisted across process restarts
[POS]:    Auth layer - persistent storage for the session token
[UPDATE]: When session file format or location conventions change
*/

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::auth::Session;
use crate::http::Result;

/// Storage slot holding at most one session
///
/// Implement this for any backing store (file, keyring, memory).
#[async_trait]
pub trait TokenStore: Send + Sync + Debug {
    /// Read the stored session, `None` when nothing is stored
    async fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session; succeeds when nothing is stored
    async fn clear(&self) -> Result<()>;
}

/// JSON session file, written owner-only on unix
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // An unreadable slot behaves like an empty one, the next login overwrites it.
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let encoded = serde_json::to_string_pretty(session)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await?;

        // mode() only applies on creation; tighten a file left by an older run.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let perms = file.metadata().await?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
            }
        }

        file.write_all(encoded.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Session>> {
        let guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("cloudtask-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let dir = temp_dir();
        let store = FileTokenStore::new(dir.join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let session = Session::new("opaque-token", "a@b.c");
        store.save(&session).await.unwrap();

        let loaded = store.load().await.unwrap().expect("session should load");
        assert_eq!(loaded, session);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(store.path()).unwrap();
            assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        }

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // clearing twice is fine
        store.clear().await.unwrap();

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        let path = dir.join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save(&Session::new("opaque-token", "a@b.c")).await.unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap().unwrap().token, "opaque-token");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_file_store_unwritable_parent_is_storage_error() {
        let dir = temp_dir();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let store = FileTokenStore::new(blocker.join("session.json"));
        let err = store.save(&Session::new("t", "a@b.c")).await.unwrap_err();
        assert!(matches!(err, crate::http::CloudTaskError::Storage(_)));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_reads_as_empty() {
        let dir = temp_dir();
        let path = dir.join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.load().await.unwrap().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.save(&Session::new("t", "a@b.c")).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().token, "t");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
