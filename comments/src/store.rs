use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("could not reach the comment store: {0}")]
    Transport(String),

    #[error("comment store answered with status {0}")]
    Status(u16),

    #[error("unexpected response from the comment store: {0}")]
    Decode(String),
}

impl From<ureq::Error> for StoreError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => StoreError::Status(code),
            ureq::Error::Json(err) => StoreError::Decode(err.to_string()),
            other => StoreError::Transport(other.to_string())
        }
    }
}

/// A comment document as read from a store.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StoredComments {
    pub exists: bool,
    pub comments: Vec<String>
}

/// Keyed storage of one comment list per document id.
///
/// Calls block; callers keep them off the UI thread.
pub trait CommentStore: Send + Sync {
    fn get(&self, doc_id: &str) -> Result<StoredComments, StoreError>;

    /// Creates the document when absent, otherwise replaces its list.
    fn put(&self, doc_id: &str, comments: &[String]) -> Result<(), StoreError>;
}

/// Process-local store, used when no remote store is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Vec<String>>>,
    failing: AtomicBool
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// While set, every call fails with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store offline".to_string()));
        }
        Ok(())
    }
}

impl CommentStore for MemoryStore {
    fn get(&self, doc_id: &str) -> Result<StoredComments, StoreError> {
        self.check()?;
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(match documents.get(doc_id) {
            Some(comments) => StoredComments { exists: true, comments: comments.clone() },
            None => StoredComments::default()
        })
    }

    fn put(&self, doc_id: &str, comments: &[String]) -> Result<(), StoreError> {
        self.check()?;
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        documents.insert(doc_id.to_string(), comments.to_vec());
        Ok(())
    }
}
