//! Property-based tests for SWC parsing and indexing.
//!
//! Run with: cargo test -p swc-io -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use swc_io::{TreeIndex, parse_swc};

// =============================================================================
// Strategies
// =============================================================================

/// One record body: (type code, x, y, z, radius, parent choice).
///
/// The parent choice is resolved against the record's id when the text is
/// rendered: `None` makes a root, `Some(k)` picks an earlier id.
fn arb_record() -> impl Strategy<Value = (u8, [f64; 3], f64, Option<u32>)> {
    (
        1u8..=7,
        prop::array::uniform3(-500.0..500.0f64),
        0.0..10.0f64,
        prop::option::weighted(0.9, any::<u32>()),
    )
}

/// A valid forward-referencing SWC file as text, with its record count.
fn arb_swc_text() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(arb_record(), 1..60).prop_map(|records| {
        let mut text = String::from("# generated\n");
        for (i, (code, [x, y, z], radius, parent)) in records.iter().enumerate() {
            let id = i + 1;
            let parent = match parent {
                Some(k) if id > 1 => (*k as usize % (id - 1) + 1).to_string(),
                _ => "-1".to_string(),
            };
            text.push_str(&format!("{id} {code} {x} {y} {z} {radius} {parent}\n"));
        }
        (text, records.len())
    })
}

proptest! {
    #[test]
    fn proptest_every_record_is_parsed((text, count) in arb_swc_text()) {
        let doc = parse_swc(&text).unwrap();
        prop_assert_eq!(doc.len(), count);
        prop_assert_eq!(doc.soma_samples().len() + doc.neurite_samples().len(), count);
    }

    #[test]
    fn proptest_generated_forests_index_cleanly((text, count) in arb_swc_text()) {
        let doc = parse_swc(&text).unwrap();
        let index = TreeIndex::build(doc.samples()).unwrap();
        prop_assert_eq!(index.len(), count);

        let linked: usize = doc.samples().iter().map(|s| index.children(s.id).len()).sum();
        prop_assert_eq!(linked + index.roots().len(), count);
    }

    #[test]
    fn proptest_parsing_is_deterministic((text, _count) in arb_swc_text()) {
        prop_assert_eq!(parse_swc(&text).unwrap(), parse_swc(&text).unwrap());
    }
}
