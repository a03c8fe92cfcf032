//! Seeded pseudo-random invariants for the applier and the remapper.
//!
//! Op lists are generated the way the transaction builder emits them: a
//! strictly forward walk of retain/insert/delete steps over the starting
//! sequence, which keeps deletes in bounds so length accounting is exact.

use scribe_core::apply::{process_operations, remap_position};
use scribe_core::attrs;
use scribe_core::delta::{delta_length, BlockType, Delta, Payload};
use scribe_core::op::Op;
use scribe_core::utf16;

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn range(&mut self, n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            self.next_u64() % n
        }
    }
}

const SAMPLES: &[&str] = &["a", "xyz", "Hello", "𝄞", "👨‍👨‍👧‍👧", " World", "née"];

fn random_text(rng: &mut Lcg) -> String {
    SAMPLES[rng.range(SAMPLES.len() as u64) as usize].to_string()
}

fn random_block(rng: &mut Lcg) -> BlockType {
    match rng.range(6) {
        0 => BlockType::Paragraph,
        1 => BlockType::Blockquote,
        2 => BlockType::UnorderedList,
        3 => BlockType::Unordered,
        4 => BlockType::OrderedList,
        _ => BlockType::Ordered,
    }
}

fn random_delta(rng: &mut Lcg) -> Vec<Delta> {
    let entries = rng.range(8) as usize;
    let mut delta = Vec::with_capacity(entries);
    for _ in 0..entries {
        if rng.range(4) == 0 {
            delta.push(Delta::block(random_block(rng)));
        } else if rng.range(3) == 0 {
            delta.push(Delta::text_with(random_text(rng), attrs! { "bold" => true }));
        } else {
            delta.push(Delta::text(random_text(rng)));
        }
    }
    delta
}

/// A forward op walk over a document of `len` units, without swaps.  A
/// format overlay is only ever emitted as the final op, the way the
/// transaction builder emits it.
fn random_ops(rng: &mut Lcg, len: usize) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut remaining = len;
    for _ in 0..rng.range(6) {
        let skip = rng.range(remaining as u64 + 1) as usize;
        if skip > 0 {
            ops.push(Op::retain(skip));
            remaining -= skip;
        }
        match rng.range(3) {
            0 => ops.push(Op::insert(Delta::text(random_text(rng)))),
            1 => {
                let n = rng.range(remaining as u64 + 1) as usize;
                if n > 0 {
                    ops.push(Op::delete(n));
                    remaining -= n;
                }
            }
            _ => {
                let n = rng.range(remaining as u64 + 1) as usize;
                ops.push(Op::retain_with(n, attrs! { "italic" => true }));
                break;
            }
        }
    }
    ops
}

fn inserted(ops: &[Op]) -> usize {
    ops.iter().map(Op::insert_length).sum()
}

fn deleted(ops: &[Op]) -> usize {
    ops.iter()
        .map(|op| match op {
            Op::Delete(n) => *n,
            _ => 0,
        })
        .sum()
}

#[test]
fn applied_entries_keep_the_length_rule() {
    let mut rng = Lcg::new(0x5eed_c0de);
    for _ in 0..500 {
        let mut delta = random_delta(&mut rng);
        let ops = random_ops(&mut rng, delta_length(&delta));
        process_operations(&mut delta, &ops);
        for entry in &delta {
            match &entry.payload {
                Payload::Text(s) => {
                    assert!(!s.is_empty(), "applier must not leave empty runs");
                    assert_eq!(entry.length(), utf16::len(s));
                }
                Payload::Block(_) => assert_eq!(entry.length(), 1),
            }
        }
    }
}

#[test]
fn length_accounting_matches_op_sums() {
    let mut rng = Lcg::new(0x0123_4567_89ab_cdef);
    for case in 0..500u64 {
        let mut delta = random_delta(&mut rng);
        let pre = delta_length(&delta);
        let ops = random_ops(&mut rng, pre);
        let ins = inserted(&ops);
        let del = deleted(&ops);
        process_operations(&mut delta, &ops);
        assert_eq!(
            delta_length(&delta),
            pre + ins - del,
            "length accounting broke (case={case})"
        );
    }
}

#[test]
fn remap_is_monotonic() {
    let mut rng = Lcg::new(0x00c0_ffee);
    for _ in 0..500 {
        let delta = random_delta(&mut rng);
        let len = delta_length(&delta);
        let ops = random_ops(&mut rng, len);
        let mut last = 0usize;
        for pos in 0..=len {
            let mapped = remap_position(&ops, pos, false);
            assert!(
                mapped >= last,
                "remap not monotonic at {pos}: {mapped} < {last} (ops={ops:?})"
            );
            last = mapped;
        }
    }
}

#[test]
fn empty_commit_is_identity() {
    let mut rng = Lcg::new(1);
    for _ in 0..100 {
        let mut delta = random_delta(&mut rng);
        let before = delta.clone();
        process_operations(&mut delta, &[]);
        assert_eq!(delta, before);
    }
}
