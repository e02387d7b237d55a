//! # Markdown Writer
//!
//! Orchestrates a full write: clear the document, split the Markdown into
//! blocks, then convert and submit each block in source order.
//!
//! ## Offset Discipline
//!
//! The document's end offset is re-read from the store before every block.
//! Offsets computed for one block are never reused for the next, because the
//! store shifts them as each batch is applied.
//!
//! ## Failure Model
//!
//! The first failing call aborts the write. Blocks applied before it stay
//! applied; a safe retry restarts the whole write, which clears first.

use serde::Serialize;
use thiserror::Error;

use crate::ops::EditOperation;
use crate::parsing::{Converter, ConverterOptions, TypedBlock, split_blocks};
use crate::store::{DocumentStore, StoreError};
use crate::tables::{PlanError, TablePlacement, locate_and_fill};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Document not found: {document_id}")]
    NotFound { document_id: String },

    #[error("No write access to document: {document_id}")]
    PermissionDenied { document_id: String },

    #[error("Invalid markdown: {0}")]
    InvalidMarkdown(String),

    #[error("Document {document_id} rejected the batch for block {block}: {source}")]
    RemoteApplyFailed {
        document_id: String,
        block: usize,
        #[source]
        source: StoreError,
    },

    #[error("Inserted table not found near offset {anchor}")]
    TableNotFound {
        anchor: usize,
        #[source]
        source: PlanError,
    },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for WriteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { document_id } => WriteError::NotFound { document_id },
            StoreError::PermissionDenied { document_id } => {
                WriteError::PermissionDenied { document_id }
            }
            other => WriteError::Store(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Written,
}

/// Result of a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub document_id: String,
    pub document_url: String,
    pub status: WriteStatus,
    pub message: String,
    pub blocks_written: usize,
    pub blocks_skipped: usize,
}

/// Basic facts about a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub document_id: String,
    pub title: String,
    pub document_url: String,
}

/// Why a block produced no submission. Skips are logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockOutcome {
    Written,
    NoApplicableContent,
}

/// Writes Markdown into documents held by a [`DocumentStore`].
pub struct MarkdownWriter<'s, S: DocumentStore + ?Sized> {
    store: &'s mut S,
    converter: Converter,
}

impl<'s, S: DocumentStore + ?Sized> MarkdownWriter<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self::with_options(store, ConverterOptions::default())
    }

    pub fn with_options(store: &'s mut S, options: ConverterOptions) -> Self {
        Self {
            store,
            converter: Converter::new(options),
        }
    }

    /// Replaces the content of `document_id` with `markdown`.
    ///
    /// Assumes `markdown` is non-empty and `document_id` well formed.
    ///
    /// # Errors
    /// `NotFound`/`PermissionDenied` from the store, `RemoteApplyFailed` when
    /// a batch is rejected, `TableNotFound` when an inserted table cannot be
    /// located again, `Store` for any other store failure.
    pub fn write_markdown(
        &mut self,
        document_id: &str,
        markdown: &str,
    ) -> Result<WriteOutcome, WriteError> {
        self.store.clear_all(document_id)?;
        log::info!("Cleared document {document_id}");

        let blocks = split_blocks(markdown);
        log::info!("Writing {} blocks to document {document_id}", blocks.len());

        let mut blocks_written = 0;
        let mut blocks_skipped = 0;
        for (i, block) in blocks.iter().enumerate() {
            match self.write_block(document_id, i, block)? {
                BlockOutcome::Written => blocks_written += 1,
                BlockOutcome::NoApplicableContent => {
                    log::debug!("Block {i} has no applicable content, skipping");
                    blocks_skipped += 1;
                }
            }
        }

        Ok(WriteOutcome {
            document_id: document_id.to_string(),
            document_url: self.store.document_url(document_id),
            status: WriteStatus::Written,
            message: "Content written to the document".to_string(),
            blocks_written,
            blocks_skipped,
        })
    }

    fn write_block(
        &mut self,
        document_id: &str,
        block_no: usize,
        block: &TypedBlock,
    ) -> Result<BlockOutcome, WriteError> {
        let end = self.store.end_offset(document_id)?;

        match block {
            TypedBlock::Text { .. } => {
                if block.is_blank_text() {
                    return Ok(BlockOutcome::NoApplicableContent);
                }
                let text = block.text().unwrap_or_default();
                let ops = self.converter.convert(&text, end);
                self.submit(document_id, block_no, ops)
            }
            TypedBlock::Table { rows } => {
                let Some((row_count, cols)) = block.table_shape().filter(|&(r, c)| r > 0 && c > 0)
                else {
                    return Ok(BlockOutcome::NoApplicableContent);
                };
                log::info!("Inserting {row_count}x{cols} table at offset {end}");
                self.store
                    .insert_table(document_id, row_count, cols, end)
                    .map_err(|err| rejected_as_apply_failure(document_id, block_no, err))?;

                let snapshot = self.store.snapshot(document_id)?;
                let fills = locate_and_fill(&snapshot, rows, TablePlacement::NearAnchor(end))
                    .map_err(|source| WriteError::TableNotFound {
                        anchor: end,
                        source,
                    })?;
                self.submit(document_id, block_no, fills)?;
                Ok(BlockOutcome::Written)
            }
        }
    }

    /// Sends one batch after dropping zero-length inserts.
    fn submit(
        &mut self,
        document_id: &str,
        block_no: usize,
        ops: Vec<EditOperation>,
    ) -> Result<BlockOutcome, WriteError> {
        let ops = sanitize(ops);
        if ops.is_empty() {
            log::warn!("No valid operations for block {block_no} of {document_id}, skipping batch");
            return Ok(BlockOutcome::NoApplicableContent);
        }

        self.store
            .apply_operations(document_id, &ops)
            .map_err(|err| rejected_as_apply_failure(document_id, block_no, err))?;
        log::info!(
            "Wrote block {block_no} to {document_id} with {} operations",
            ops.len()
        );
        Ok(BlockOutcome::Written)
    }
}

/// A rejected mutation aborts the write as `RemoteApplyFailed`; anything else
/// is classified as usual.
fn rejected_as_apply_failure(document_id: &str, block_no: usize, err: StoreError) -> WriteError {
    match err {
        StoreError::Rejected { .. } => WriteError::RemoteApplyFailed {
            document_id: document_id.to_string(),
            block: block_no,
            source: err,
        },
        other => WriteError::from(other),
    }
}

/// Drops any `InsertText` with empty text, logging its position.
fn sanitize(ops: Vec<EditOperation>) -> Vec<EditOperation> {
    let before = ops.len();
    let kept: Vec<EditOperation> = ops
        .into_iter()
        .enumerate()
        .filter_map(|(i, op)| {
            if op.is_empty_insert() {
                log::warn!("Dropping empty insert at requests[{i}]: {op:?}");
                None
            } else {
                Some(op)
            }
        })
        .collect();
    if kept.len() != before {
        log::info!(
            "Prepared {} operations, dropped {} empty inserts",
            kept.len(),
            before - kept.len()
        );
    }
    kept
}

/// Replaces the content of `document_id` with `markdown` using default
/// converter options. See [`MarkdownWriter::write_markdown`].
///
/// # Errors
/// See [`MarkdownWriter::write_markdown`].
pub fn write_markdown<S: DocumentStore + ?Sized>(
    store: &mut S,
    document_id: &str,
    markdown: &str,
) -> Result<WriteOutcome, WriteError> {
    MarkdownWriter::new(store).write_markdown(document_id, markdown)
}

/// Reads the title and URL of `document_id`.
///
/// # Errors
/// `NotFound`/`PermissionDenied` from the store.
pub fn document_info<S: DocumentStore + ?Sized>(
    store: &mut S,
    document_id: &str,
) -> Result<DocumentInfo, WriteError> {
    let snapshot = store.snapshot(document_id)?;
    Ok(DocumentInfo {
        document_id: document_id.to_string(),
        title: snapshot.title.unwrap_or_else(|| "Untitled".to_string()),
        document_url: store.document_url(document_id),
    })
}
