mod store;
mod firestore;
mod panel;

pub use store::{CommentStore, MemoryStore, StoreError, StoredComments};
pub use firestore::{Document, FirestoreConfig, FirestoreStore, DEFAULT_COLLECTION, DEFAULT_ENDPOINT};
pub use panel::{slug, CommentsPanel, Outcome, PanelStatus, Request, Ticket};
