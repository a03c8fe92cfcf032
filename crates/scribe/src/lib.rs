//! scribe — a rich-text document engine built on an operational delta model.
//!
//! A [`Document`] is a flat sequence of delta entries (text runs and block
//! markers with attributes).  All mutation flows through operation lists:
//! open a transaction, let the builder emit retain/delete/insert/swap
//! operations relative to its cursor, and commit atomically.
//!
//! ```
//! use scribe::{attrs, Document};
//!
//! let mut doc = Document::new();
//! doc.transact(|tr| {
//!     tr.insert("Hello World", Some(attrs! { "bold" => true }));
//!     tr.ensure_block_at_front();
//!     false
//! });
//! assert_eq!(doc.text(), "Hello World");
//! assert_eq!(doc.length(), 12); // paragraph marker + 11 code units
//! ```

pub mod document;
pub mod events;
pub mod transaction;

pub use document::Document;
pub use events::DocumentEvent;
pub use transaction::{PendingCommit, Transaction, TransactionError};

pub use scribe_core::{
    attrs, minimize_delta, process_operations, remap_position, Align, Attributes, BlockType,
    Caret, Delta, LineDecoration, LineStyle, Op, Payload, Selection, VerticalAlign,
};
