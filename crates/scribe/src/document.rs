//! The document facade.
//!
//! A [`Document`] owns the delta sequence, the current selection and the
//! document-level attributes, and is mutated exclusively through operation
//! lists: either raw ones via [`apply`](Document::apply) or builder-emitted
//! ones via the `transact*` family.  After every application the selection
//! is remapped into post-commit coordinates and clamped to the new length.
//!
//! The document is a local, non-shared structure; concurrent writers must be
//! serialized by the embedder.

use std::collections::BTreeMap;

use scribe_core::apply::{process_operations, remap_position};
use scribe_core::delta::delta_length;
use scribe_core::{Attributes, Delta, Op, Payload, Selection};

use crate::events::DocumentEvent;
use crate::transaction::{PendingCommit, Transaction, TransactionError, TransactionOutcome};

type Listener = Box<dyn FnMut(&DocumentEvent) + Send + Sync>;

pub struct Document {
    delta: Vec<Delta>,
    selection: Selection,
    attributes: Attributes,
    listeners: BTreeMap<u64, Listener>,
    next_listener_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_parts(Attributes::new(), Vec::new())
    }

    pub fn with_parts(attributes: Attributes, delta: Vec<Delta>) -> Self {
        Self {
            delta,
            selection: Selection::default(),
            attributes,
            listeners: BTreeMap::new(),
            next_listener_id: 1,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Total unit length of the document.
    pub fn length(&self) -> usize {
        delta_length(&self.delta)
    }

    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    pub fn delta(&self) -> &[Delta] {
        &self.delta
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection; both endpoints are clamped to the document length.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.length();
        self.selection = Selection::new(
            selection.start.x.min(len),
            selection.end.x.min(len),
        );
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Plain-text view: the concatenation of all text runs.
    pub fn text(&self) -> String {
        self.delta
            .iter()
            .filter_map(|e| e.payload.as_text())
            .collect()
    }

    /// The entry covering unit position `pos`.
    pub fn delta_at(&self, pos: usize) -> Option<&Delta> {
        let mut start = 0usize;
        for entry in &self.delta {
            let len = entry.length();
            if pos < start + len {
                return Some(entry);
            }
            start += len;
        }
        None
    }

    /// The unit at `pos`: the grapheme cluster covering it (which may span
    /// several code units) or the block marker sitting there.
    pub fn fetch_at(&self, pos: usize) -> Option<Payload> {
        let mut start = 0usize;
        for entry in &self.delta {
            let len = entry.length();
            if pos < start + len {
                return match &entry.payload {
                    Payload::Block(b) => Some(Payload::Block(*b)),
                    Payload::Text(s) => scribe_core::utf16::grapheme_at(s, pos - start)
                        .map(|g| Payload::Text(g.to_string())),
                };
            }
            start += len;
        }
        None
    }

    // ── Listeners ─────────────────────────────────────────────────────────

    pub fn on_event<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(&DocumentEvent) + Send + Sync + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub fn off_event(&mut self, listener_id: u64) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    fn emit(&mut self, event: DocumentEvent) {
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Apply a raw operation list.
    pub fn apply(&mut self, ops: &[Op]) {
        self.apply_inner(ops, false);
    }

    fn apply_inner(&mut self, ops: &[Op], has_block_at_front: bool) {
        self.emit(DocumentEvent::BeforeApply { ops: ops.to_vec() });
        process_operations(&mut self.delta, ops);
        let len = self.length();
        self.selection = Selection::new(
            remap_position(ops, self.selection.start.x, has_block_at_front).min(len),
            remap_position(ops, self.selection.end.x, has_block_at_front).min(len),
        );
        self.emit(DocumentEvent::AfterApply { ops: ops.to_vec() });
    }

    fn run_builder<F>(&self, f: F) -> Option<TransactionOutcome>
    where
        F: FnOnce(&mut Transaction) -> bool,
    {
        let mut tr = Transaction::new(self);
        let cancel = f(&mut tr);
        let outcome = tr.into_outcome();
        if cancel || outcome.ops.is_empty() {
            None
        } else {
            Some(outcome)
        }
    }

    pub(crate) fn commit(&mut self, outcome: TransactionOutcome, transaction_events: bool) {
        if transaction_events {
            self.emit(DocumentEvent::BeforeTransaction {
                ops: outcome.ops.clone(),
            });
        }
        self.apply_inner(&outcome.ops, outcome.has_block_at_front);
        if !outcome.format_attributes.is_empty() {
            self.attributes.merge(&outcome.format_attributes);
        }
        if transaction_events {
            self.emit(DocumentEvent::AfterTransaction { ops: outcome.ops });
        }
    }

    /// Run a builder function and commit what it emitted.
    ///
    /// The function cancels the transaction by returning `true`; a cancelled
    /// or empty transaction is discarded without firing events.  Returns
    /// whether a commit happened.
    pub fn transact<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Transaction) -> bool,
    {
        match self.run_builder(f) {
            Some(outcome) => {
                self.commit(outcome, true);
                true
            }
            None => false,
        }
    }

    /// Like [`transact`](Self::transact), but suppresses the transaction
    /// events and invokes `cb` with the committed op list instead.
    pub fn transact_with<F, C>(&mut self, f: F, cb: C) -> bool
    where
        F: FnOnce(&mut Transaction) -> bool,
        C: FnOnce(&mut Document, &[Op]),
    {
        match self.run_builder(f) {
            Some(outcome) => {
                let ops = outcome.ops.clone();
                self.commit(outcome, false);
                cb(self, &ops);
                true
            }
            None => false,
        }
    }

    /// Run a transaction against a deep clone and return it; the original
    /// document is untouched and no events fire.  Listeners are not cloned.
    pub fn transact_simulate<F>(&self, f: F) -> Document
    where
        F: FnOnce(&mut Transaction) -> bool,
    {
        let mut clone = Document::with_parts(self.attributes.clone(), self.delta.clone());
        clone.selection = self.selection;
        clone.transact(f);
        clone
    }

    /// Build now, commit later: the returned [`PendingCommit`] is applied on
    /// whatever tick the host scheduler chooses.  A cancelled or empty
    /// transaction is an error here rather than a silent discard.
    pub fn transact_deferred<F>(&self, f: F) -> Result<PendingCommit, TransactionError>
    where
        F: FnOnce(&mut Transaction) -> bool,
    {
        self.run_builder(f)
            .map(PendingCommit::new)
            .ok_or(TransactionError::Empty)
    }
}
