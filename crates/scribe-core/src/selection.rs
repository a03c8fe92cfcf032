//! One-dimensional selection primitives.
//!
//! A selection is an anchor/focus pair of unit positions.  `start` is where
//! the selection was anchored and `end` where the focus sits, so a backwards
//! drag is represented with `start.x > end.x`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caret {
    pub x: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Caret,
    pub end: Caret,
}

impl Selection {
    pub fn new(start_x: usize, end_x: usize) -> Self {
        Self {
            start: Caret { x: start_x },
            end: Caret { x: end_x },
        }
    }

    /// A collapsed selection at `x`.
    pub fn caret(x: usize) -> Self {
        Self::new(x, x)
    }

    pub fn is_backwards(&self) -> bool {
        self.start.x > self.end.x
    }

    pub fn is_collapsed(&self) -> bool {
        self.start.x == self.end.x
    }

    /// The lower of the two endpoints.
    pub fn from_x(&self) -> usize {
        self.start.x.min(self.end.x)
    }

    /// The higher of the two endpoints.
    pub fn to_x(&self) -> usize {
        self.start.x.max(self.end.x)
    }

    pub fn distance_x(&self) -> usize {
        self.to_x() - self.from_x()
    }

    /// Collapse onto the anchored endpoint: `end <- start` by default,
    /// `start <- end` when `to_end` is set.
    pub fn collapse_x(&mut self, to_end: bool) {
        if to_end {
            self.start = self.end;
        } else {
            self.end = self.start;
        }
    }
}
