//! Commit lifecycle events.
//!
//! Transaction events wrap apply events: a committed transaction emits
//! `BeforeTransaction`, `BeforeApply`, `AfterApply`, `AfterTransaction` in
//! that order.  A cancelled or empty transaction emits nothing.

use scribe_core::Op;

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    BeforeTransaction { ops: Vec<Op> },
    AfterTransaction { ops: Vec<Op> },
    BeforeApply { ops: Vec<Op> },
    AfterApply { ops: Vec<Op> },
}

impl DocumentEvent {
    /// The operation list this event is about.
    pub fn ops(&self) -> &[Op] {
        match self {
            DocumentEvent::BeforeTransaction { ops }
            | DocumentEvent::AfterTransaction { ops }
            | DocumentEvent::BeforeApply { ops }
            | DocumentEvent::AfterApply { ops } => ops,
        }
    }
}
