//! Key-value media the ticket collection is persisted to.

use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

/// Durable key-value storage holding whole serialized values.
#[async_trait]
pub trait Medium: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> io::Result<()>;
}

#[async_trait]
impl<M: Medium + ?Sized> Medium for Arc<M> {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> io::Result<()> {
        (**self).set(key, value).await
    }
}

/// Process-local medium, cleared when the process exits.
#[derive(Debug, Default)]
pub struct Memory(Mutex<HashMap<String, String>>);

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Medium for Memory {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.0.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> io::Result<()> {
        self.0.lock().await.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Medium keeping each key in its own `<key>.json` file inside a directory.
///
/// Values are written to a temporary sibling first and then renamed over the
/// target, so a reader sees either the previous value or the new one.
#[derive(Clone, Debug)]
pub struct File {
    dir: PathBuf,
}

impl File {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Medium for File {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: String) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, self.path(key)).await
    }
}
