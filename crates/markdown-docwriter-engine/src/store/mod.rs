//! # Document Stores
//!
//! The seam between the conversion engine and the remote document it edits.
//!
//! The engine never applies operations itself. It reads snapshots and end
//! offsets from a [`DocumentStore`] and submits batches to it, one blocking
//! call at a time, because every call depends on offsets produced by the
//! previous one.
//!
//! ## Modules
//!
//! - **`memory`**: `MemoryStore`, an in-process store following the remote
//!   index model, used for dry runs and tests

pub mod memory;

use thiserror::Error;

use crate::document::Document;
use crate::ops::EditOperation;

pub use memory::{MemoryDocument, MemoryStore, StoreCall};

/// Base URL of the editor a document id is opened in.
pub const DOCUMENT_URL_BASE: &str = "https://docs.google.com/document/d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document not found: {document_id}")]
    NotFound { document_id: String },

    #[error("Permission denied for document: {document_id}")]
    PermissionDenied { document_id: String },

    #[error("Batch rejected: {reason}")]
    Rejected { reason: String },

    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Operations the engine needs from a remote rich-document store.
pub trait DocumentStore {
    /// Reads the structural tree of the document.
    ///
    /// # Errors
    /// `NotFound` or `PermissionDenied` from the store.
    fn snapshot(&mut self, document_id: &str) -> Result<Document, StoreError>;

    /// Current end of content, excluding the trailing terminator.
    ///
    /// # Errors
    /// Same as [`snapshot`](DocumentStore::snapshot).
    fn end_offset(&mut self, document_id: &str) -> Result<usize, StoreError> {
        Ok(self.snapshot(document_id)?.end_offset())
    }

    /// Removes all content. A no-op on an empty document.
    ///
    /// # Errors
    /// `NotFound` or `PermissionDenied` from the store.
    fn clear_all(&mut self, document_id: &str) -> Result<(), StoreError>;

    /// Applies `operations` in order as one atomic batch.
    ///
    /// # Errors
    /// `Rejected` when any operation is invalid; nothing is applied then.
    fn apply_operations(
        &mut self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), StoreError>;

    /// Inserts an empty `rows` x `cols` table at `index`.
    ///
    /// # Errors
    /// `Rejected` when `index` is not a valid insertion point.
    fn insert_table(
        &mut self,
        document_id: &str,
        rows: usize,
        cols: usize,
        index: usize,
    ) -> Result<(), StoreError>;

    /// Browser URL of the document. Pure formatting.
    fn document_url(&self, document_id: &str) -> String {
        format!("{DOCUMENT_URL_BASE}/{document_id}/edit")
    }
}
