//! Document stores for contact messages
//!
//! A store hands out one [`Connection`] per request. The handler inserts a
//! single document through it and closes it before responding.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use super::message::{ContactMessage, NewMessage};
use super::DataApiStore;
use crate::config::StoreBackend;
use crate::Folio;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store rejected the request with {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("store is misconfigured: {0}")]
    Config(String),

    #[error("connection is closed")]
    Closed,
}

/// A document database the contact endpoint can write to
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a connection for the duration of one request
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError>;
}

/// An open connection to a [`DocumentStore`]
#[async_trait]
pub trait Connection: Send {
    /// Insert one document into `collection`, returning the assigned id
    ///
    /// [`StoreError::Unreachable`] means nothing reached the store.
    async fn insert_one(
        &mut self,
        collection: &str,
        message: &NewMessage,
    ) -> Result<String, StoreError>;

    /// Release the connection
    async fn close(self: Box<Self>) -> Result<(), StoreError>;
}

/// Build the store selected by `contact.backend`
pub fn open_store(folio: &Folio) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let contact = &folio.config.contact;
    let store: Arc<dyn DocumentStore> = match contact.backend {
        StoreBackend::File => Arc::new(FileStore::new(folio.base_dir.join(&contact.data_dir))),
        StoreBackend::DataApi => Arc::new(DataApiStore::new(contact.data_api.clone())?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!("Contact messages go to the {:?} store", contact.backend);
    Ok(store)
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    documents: Mutex<Vec<(String, ContactMessage)>>,
    open: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents stored in `collection`, in insertion order
    pub fn documents(&self, collection: &str) -> Vec<ContactMessage> {
        self.inner
            .documents
            .lock()
            .map(|docs| {
                docs.iter()
                    .filter(|(c, _)| c == collection)
                    .map(|(_, m)| m.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Connections handed out and not yet closed
    pub fn open_connections(&self) -> usize {
        self.inner.open.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        self.inner.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryConnection {
            inner: Some(self.inner.clone()),
        }))
    }
}

struct MemoryConnection {
    inner: Option<Arc<MemoryInner>>,
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn insert_one(
        &mut self,
        collection: &str,
        message: &NewMessage,
    ) -> Result<String, StoreError> {
        let inner = self.inner.as_ref().ok_or(StoreError::Closed)?;
        let id = format!("{:024x}", inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut docs = inner
            .documents
            .lock()
            .map_err(|_| StoreError::Config("memory store lock poisoned".to_string()))?;
        docs.push((collection.to_string(), message.clone().with_id(id.clone())));
        Ok(id)
    }

    async fn close(mut self: Box<Self>) -> Result<(), StoreError> {
        if let Some(inner) = self.inner.take() {
            inner.open.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// JSON-lines files, one per collection, under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the file backing `collection`
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.jsonl", collection))
    }

    /// Read back every document in `collection`
    pub async fn documents(&self, collection: &str) -> Result<Vec<ContactMessage>, StoreError> {
        let path = self.collection_path(collection);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.data_dir.clone(),
                source,
            })?;

        Ok(Box::new(FileConnection {
            store: Some(self.clone()),
        }))
    }
}

struct FileConnection {
    store: Option<FileStore>,
}

#[async_trait]
impl Connection for FileConnection {
    async fn insert_one(
        &mut self,
        collection: &str,
        message: &NewMessage,
    ) -> Result<String, StoreError> {
        let store = self.store.as_ref().ok_or(StoreError::Closed)?;
        let path = store.collection_path(collection);

        let id = uuid::Uuid::new_v4().to_string();
        let mut line = serde_json::to_string(&message.clone().with_id(id.clone()))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        file.sync_data()
            .await
            .map_err(|source| StoreError::Io { path, source })?;

        Ok(id)
    }

    async fn close(mut self: Box<Self>) -> Result<(), StoreError> {
        self.store.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn message() -> NewMessage {
        NewMessage {
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            message: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_tracks_connections() {
        let store = MemoryStore::new();

        let mut conn = store.connect().await.unwrap();
        assert_eq!(store.open_connections(), 1);

        let id = conn.insert_one("messages", &message()).await.unwrap();
        conn.close().await.unwrap();
        assert_eq!(store.open_connections(), 0);

        let docs = store.documents("messages");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].email, "a@b.com");
        assert!(store.documents("other").is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_keeps_duplicates() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            let mut conn = store.connect().await.unwrap();
            conn.insert_one("messages", &message()).await.unwrap();
            conn.close().await.unwrap();
        }
        let docs = store.documents("messages");
        assert_eq!(docs.len(), 2);
        assert_ne!(docs[0].id, docs[1].id);
    }

    #[tokio::test]
    async fn test_file_store_appends_json_lines() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        let mut conn = store.connect().await.unwrap();
        let first = conn.insert_one("messages", &message()).await.unwrap();
        let second = conn.insert_one("messages", &message()).await.unwrap();
        conn.close().await.unwrap();

        let docs = store.documents("messages").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[1].id, second);
        assert_eq!(docs[1].message, "hi");
        assert!(uuid::Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn test_file_store_missing_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.documents("messages").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_connect_fails_when_data_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::new(&blocker);
        assert!(store.connect().await.is_err());
    }

    #[test]
    fn test_open_store_uses_configured_backend() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.contact.backend = StoreBackend::Memory;
        let folio = Folio::with_config(dir.path(), config);
        assert!(open_store(&folio).is_ok());

        let mut config = SiteConfig::default();
        config.contact.backend = StoreBackend::DataApi;
        let folio = Folio::with_config(dir.path(), config);
        assert!(matches!(open_store(&folio), Err(StoreError::Config(_))));
    }
}
