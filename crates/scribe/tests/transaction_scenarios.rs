//! End-to-end commit scenarios driven through the public `Document` API.

use scribe::{attrs, Attributes, BlockType, Delta, Document, Op, Selection};

fn text(s: &str) -> Delta {
    Delta::text(s)
}

fn text_with(s: &str, a: Attributes) -> Delta {
    Delta::text_with(s, a)
}

#[test]
fn insert_then_insert_at() {
    let mut doc = Document::new();
    doc.transact(|tr| {
        tr.insert("Hello World", None);
        false
    });
    assert_eq!(doc.delta(), &[text("Hello World")]);

    doc.transact(|tr| {
        tr.insert_at(5, " Today", None);
        false
    });
    assert_eq!(
        doc.delta(),
        &[text("Hello"), text(" Today"), text(" World")]
    );
}

#[test]
fn multi_unit_backward_delete() {
    let mut doc = Document::with_parts(
        Attributes::new(),
        vec![text("Hello 👨‍👨‍👧‍👧 World")],
    );
    doc.set_selection(Selection::caret(20));

    let mut emitted: Vec<Op> = Vec::new();
    doc.transact_with(
        |tr| {
            tr.delete(15);
            false
        },
        |_, ops| emitted = ops.to_vec(),
    );
    assert_eq!(emitted, vec![Op::retain(5), Op::delete(15)]);
    assert_eq!(doc.delta(), &[text("Hello"), text("rld")]);
    assert_eq!(doc.selection(), Selection::caret(5));
}

#[test]
fn single_backspace_removes_a_whole_emoji_cluster() {
    let mut doc = Document::with_parts(Attributes::new(), vec![text("Hello 👨‍👨‍👧‍👧")]);
    doc.set_selection(Selection::caret(17));
    doc.transact(|tr| {
        tr.delete(1);
        false
    });
    assert_eq!(doc.delta(), &[text("Hello ")]);
    assert_eq!(doc.selection(), Selection::caret(6));
}

#[test]
fn format_overlays_a_span_across_runs() {
    let bold = attrs! { "bold" => true };
    let mut doc = Document::with_parts(
        Attributes::new(),
        vec![
            Delta::block(BlockType::Paragraph),
            text("Hello"),
            text_with(" W", bold.clone()),
            text_with("o", attrs! { "bold" => true, "underline" => true }),
            text_with("rld", bold.clone()),
        ],
    );
    doc.set_selection(Selection::new(2, 9));
    doc.transact(|tr| {
        tr.format(attrs! { "bold" => false });
        false
    });
    assert_eq!(
        doc.delta(),
        &[
            Delta::block(BlockType::Paragraph),
            text("H"),
            text_with("ello", attrs! { "bold" => false }),
            text_with(" W", attrs! { "bold" => false }),
            text_with("o", attrs! { "bold" => false, "underline" => true }),
            text_with("rld", bold),
        ]
    );
    // format() also stages the attributes at document level.
    assert_eq!(doc.attributes(), &attrs! { "bold" => false });
}

#[test]
fn replace_at_swaps_one_unit_mid_text() {
    let mut doc = Document::with_parts(
        Attributes::new(),
        vec![
            Delta::block(BlockType::Blockquote),
            Delta::block(BlockType::Unordered),
            text("ello"),
            Delta::block(BlockType::Ordered),
        ],
    );

    let mut emitted: Vec<Op> = Vec::new();
    doc.transact_with(
        |tr| {
            tr.replace_at(2, "blah", None);
            false
        },
        |_, ops| emitted = ops.to_vec(),
    );
    assert_eq!(emitted, vec![Op::retain(2), Op::swap(Delta::text("blah"))]);
    assert_eq!(
        doc.delta(),
        &[
            Delta::block(BlockType::Blockquote),
            Delta::block(BlockType::Unordered),
            text("blah"),
            text("llo"),
            Delta::block(BlockType::Ordered),
        ]
    );
}

#[test]
fn ensure_block_at_front_bumps_the_selection() {
    let mut doc = Document::new();
    doc.transact(|tr| {
        tr.insert("Hello World", None);
        assert!(tr.ensure_block_at_front());
        assert_eq!(tr.cursor(), 12);
        false
    });
    assert_eq!(
        doc.delta(),
        &[Delta::block(BlockType::Paragraph), text("Hello World")]
    );
    // The selection started at 0 and is nudged past the synthetic block.
    assert_eq!(doc.selection(), Selection::caret(1));
}

#[test]
fn convert_if_needed_swaps_the_leading_block() {
    let mut doc = Document::with_parts(
        Attributes::new(),
        vec![Delta::block(BlockType::Blockquote)],
    );
    doc.set_selection(Selection::caret(1));
    doc.transact(|tr| {
        assert!(tr.convert_if_needed(BlockType::Unordered));
        false
    });
    assert_eq!(doc.delta(), &[Delta::block(BlockType::Unordered)]);
}

#[test]
fn insert_at_round_trips_against_raw_ops() {
    let pieces = ["One", "Two", "Three"];

    let mut built = Document::new();
    for piece in pieces {
        let at = built.length();
        built.transact(|tr| {
            tr.insert_at(at, piece, None);
            false
        });
    }

    let mut raw = Document::new();
    for piece in pieces {
        let at = raw.length();
        let mut ops = Vec::new();
        if at > 0 {
            ops.push(Op::retain(at));
        }
        ops.push(Op::insert(Delta::text(piece)));
        raw.apply(&ops);
    }

    assert_eq!(built.delta(), raw.delta());
    assert_eq!(built.delta(), &[text("One"), text("Two"), text("Three")]);
}

#[test]
fn delete_of_an_open_selection_before_typing() {
    let mut doc = Document::with_parts(Attributes::new(), vec![text("Hello World")]);
    doc.set_selection(Selection::new(5, 11));
    doc.transact(|tr| {
        tr.insert("!", None);
        false
    });
    assert_eq!(doc.delta(), &[text("Hello"), text("!")]);
    assert_eq!(doc.selection(), Selection::caret(6));
}

#[test]
fn out_of_range_positions_commit_without_visible_mutation() {
    let mut doc = Document::with_parts(Attributes::new(), vec![text("Hi")]);
    let committed = doc.transact(|tr| {
        tr.delete_at(10, 4);
        false
    });
    assert!(committed);
    assert_eq!(doc.delta(), &[text("Hi")]);
}

#[test]
fn fetch_at_and_delta_at() {
    let doc = Document::with_parts(
        Attributes::new(),
        vec![
            Delta::block(BlockType::Paragraph),
            text("Hi 👨‍👨‍👧‍👧"),
        ],
    );
    assert_eq!(
        doc.fetch_at(0),
        Some(scribe::Payload::Block(BlockType::Paragraph))
    );
    assert_eq!(doc.fetch_at(1), Some(scribe::Payload::Text("H".into())));
    // Any unit inside the cluster resolves to the whole cluster.
    assert_eq!(
        doc.fetch_at(8),
        Some(scribe::Payload::Text("👨‍👨‍👧‍👧".into()))
    );
    assert_eq!(doc.fetch_at(99), None);

    assert_eq!(doc.delta_at(0), Some(&Delta::block(BlockType::Paragraph)));
    assert_eq!(doc.delta_at(5), Some(&text("Hi 👨‍👨‍👧‍👧")));
    assert_eq!(doc.delta_at(15), None);
}
