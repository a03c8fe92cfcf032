//! The transaction builder.
//!
//! A [`Transaction`] accumulates operations relative to a running cursor
//! that starts at the lower end of the document selection.  Every mutating
//! method first runs the delete-or-retain prefix:
//! - a non-collapsed selection is deleted first (and the builder's local
//!   selection copy collapses, so the deletion happens once per transaction);
//! - an explicit `*_at` position resets the cursor to 0 when the target is
//!   at or before it, then retains forward, so emitted positions are always
//!   relative to the starting delta, never to intermediate states.
//!
//! Nothing touches the document until the builder function returns cleanly;
//! commit and event emission live on [`Document`].

use thiserror::Error;

use scribe_core::apply::process_operations;
use scribe_core::{utf16, Attributes, BlockType, Delta, Op, Payload, Selection};

use crate::document::Document;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has 0 operations")]
    Empty,
}

pub struct Transaction<'a> {
    doc: &'a Document,
    selection: Selection,
    cursor: usize,
    ops: Vec<Op>,
    has_block_at_front: bool,
    format_attributes: Attributes,
}

#[derive(Debug)]
pub(crate) struct TransactionOutcome {
    pub ops: Vec<Op>,
    pub has_block_at_front: bool,
    pub format_attributes: Attributes,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        let selection = doc.selection();
        Self {
            doc,
            selection,
            cursor: selection.from_x(),
            ops: Vec::new(),
            has_block_at_front: false,
            format_attributes: Attributes::new(),
        }
    }

    pub(crate) fn into_outcome(self) -> TransactionOutcome {
        TransactionOutcome {
            ops: self.ops,
            has_block_at_front: self.has_block_at_front,
            format_attributes: self.format_attributes,
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // ── Cursor plumbing ───────────────────────────────────────────────────

    /// Position the op stream at `at`: reset to 0 when the target is at or
    /// before the cursor, then retain forward.
    fn retain_to(&mut self, at: usize) {
        if at <= self.cursor {
            self.cursor = 0;
        }
        let n = at - self.cursor;
        if n > 0 {
            self.ops.push(Op::retain(n));
        }
        self.cursor = at;
    }

    /// The delete-or-retain prefix shared by the mutating methods.
    fn prefix(&mut self, at: Option<usize>) {
        if !self.selection.is_collapsed() {
            let from = self.selection.from_x();
            let n = self.selection.distance_x();
            self.retain_to(from);
            self.ops.push(Op::delete(n));
            self.selection = Selection::caret(from);
        } else if let Some(at) = at {
            self.retain_to(at);
        } else if self.ops.is_empty() && self.cursor > 0 {
            // First emission: materialize the starting caret.
            let at = self.cursor;
            self.cursor = 0;
            self.ops.push(Op::retain(at));
            self.cursor = at;
        }
    }

    // ── Inserts ───────────────────────────────────────────────────────────

    pub fn insert(
        &mut self,
        text: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(None);
        self.push_text_insert(text.into(), attributes)
    }

    pub fn insert_at(
        &mut self,
        at: usize,
        text: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(Some(at));
        self.push_text_insert(text.into(), attributes)
    }

    fn push_text_insert(&mut self, text: String, attributes: Option<Attributes>) -> &mut Self {
        let len = utf16::len(&text);
        self.ops.push(Op::insert(Delta::text_with(
            text,
            attributes.unwrap_or_default(),
        )));
        self.cursor += len;
        self
    }

    pub fn block(&mut self, block: BlockType, attributes: Option<Attributes>) -> &mut Self {
        self.prefix(None);
        self.push_block_insert(block, attributes)
    }

    pub fn block_at(
        &mut self,
        at: usize,
        block: BlockType,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(Some(at));
        self.push_block_insert(block, attributes)
    }

    fn push_block_insert(&mut self, block: BlockType, attributes: Option<Attributes>) -> &mut Self {
        self.ops.push(Op::insert(Delta::block_with(
            block,
            attributes.unwrap_or_default(),
        )));
        self.cursor += 1;
        self
    }

    // ── Swaps ─────────────────────────────────────────────────────────────

    /// Replace the unit at the cursor with a block marker.
    pub fn convert(&mut self, block: BlockType, attributes: Option<Attributes>) -> &mut Self {
        self.prefix(None);
        self.push_swap(Delta::block_with(block, attributes.unwrap_or_default()))
    }

    pub fn convert_at(
        &mut self,
        at: usize,
        block: BlockType,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(Some(at));
        self.push_swap(Delta::block_with(block, attributes.unwrap_or_default()))
    }

    /// Replace the unit at the cursor with a text run.
    pub fn replace(
        &mut self,
        text: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(None);
        self.push_swap(Delta::text_with(text.into(), attributes.unwrap_or_default()))
    }

    pub fn replace_at(
        &mut self,
        at: usize,
        text: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> &mut Self {
        self.prefix(Some(at));
        self.push_swap(Delta::text_with(text.into(), attributes.unwrap_or_default()))
    }

    fn push_swap(&mut self, entry: Delta) -> &mut Self {
        let len = entry.length();
        self.ops.push(Op::swap(entry));
        self.cursor += len;
        self
    }

    // ── Formatting ────────────────────────────────────────────────────────

    /// Overlay `attributes` onto the selected span, and stage them as
    /// document-level attributes for the commit.
    pub fn format(&mut self, attributes: Attributes) -> &mut Self {
        let from = self.selection.from_x();
        let n = self.selection.distance_x();
        self.retain_to(from);
        self.ops.push(Op::retain_with(n, attributes.clone()));
        self.format_attributes.merge(&attributes);
        self
    }

    /// Overlay `attributes` onto `n` units starting at `at`.
    pub fn format_at(&mut self, at: usize, n: usize, attributes: Attributes) -> &mut Self {
        self.prefix(Some(at));
        self.ops.push(Op::retain_with(n, attributes));
        self
    }

    // ── Deletes ───────────────────────────────────────────────────────────

    /// Delete backward from the cursor, or delete the selection when one is
    /// open.  `delete(1)` is grapheme-aware: when the unit before the cursor
    /// belongs to a multi-unit cluster, the whole cluster goes.  Larger `n`
    /// deletes exactly `n` code units.
    pub fn delete(&mut self, n: usize) -> &mut Self {
        if !self.selection.is_collapsed() {
            self.prefix(None);
            return self;
        }
        let mut n = n;
        if n == 1 {
            let before = self
                .cursor
                .checked_sub(1)
                .and_then(|pos| self.doc.fetch_at(pos));
            if let Some(Payload::Text(cluster)) = before {
                let units = utf16::len(&cluster);
                if units > 1 {
                    n = units;
                }
            }
        }
        let n = n.min(self.cursor);
        if n == 0 {
            return self;
        }
        let target = self.cursor - n;
        self.retain_to(target);
        self.ops.push(Op::delete(n));
        self
    }

    /// Delete `n` units forward from `at`.
    pub fn delete_at(&mut self, at: usize, n: usize) -> &mut Self {
        self.prefix(Some(at));
        if n > 0 {
            self.ops.push(Op::delete(n));
        }
        self
    }

    /// Advance the cursor past `n` units without touching them.
    pub fn retain(&mut self, n: usize) -> &mut Self {
        if n > 0 {
            self.ops.push(Op::retain(n));
            self.cursor += n;
        }
        self
    }

    /// Delete the whole document.
    pub fn clear(&mut self) -> &mut Self {
        let len = self.doc.length();
        if len > 0 {
            self.ops.push(Op::delete(len));
        }
        self
    }

    // ── Structure helpers ─────────────────────────────────────────────────

    /// Guarantee the committed document starts with a block marker: when the
    /// pending ops leave a text run (or nothing) at the front, a paragraph
    /// insert is unshifted onto the op list.  Returns whether it was needed.
    ///
    /// Positions remapped to 0 after a commit that prepended a block are
    /// nudged to 1, so the caret lands after the synthetic paragraph.
    pub fn ensure_block_at_front(&mut self) -> bool {
        self.has_block_at_front = true;
        let mut preview = self.doc.delta().to_vec();
        process_operations(&mut preview, &self.ops);
        let needed = match preview.first() {
            None => true,
            Some(entry) => entry.payload.is_text(),
        };
        if needed {
            self.ops
                .insert(0, Op::insert(Delta::block(BlockType::Paragraph)));
            self.cursor += 1;
        }
        needed
    }

    /// Convert the block just before the cursor to `block`, or insert a new
    /// one when there is nothing to convert.  Returns whether a conversion
    /// happened.
    pub fn convert_if_needed(&mut self, block: BlockType) -> bool {
        if self.cursor > 0 {
            if let Some(Payload::Block(existing)) = self.doc.fetch_at(self.cursor - 1) {
                if existing != block {
                    self.convert_at(self.cursor - 1, block, None);
                    return true;
                }
            }
        }
        self.block(block, None);
        false
    }
}

/// A built transaction whose commit the host has deferred to a later tick.
#[derive(Debug)]
pub struct PendingCommit {
    outcome: TransactionOutcome,
}

impl PendingCommit {
    pub(crate) fn new(outcome: TransactionOutcome) -> Self {
        Self { outcome }
    }

    pub fn ops(&self) -> &[Op] {
        &self.outcome.ops
    }

    /// Apply the deferred operations, firing the usual transaction events.
    pub fn commit(self, doc: &mut Document) {
        doc.commit(self.outcome, true);
    }
}
