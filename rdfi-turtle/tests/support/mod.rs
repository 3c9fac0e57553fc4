//! Shared helpers for rdfi-turtle integration tests.

// Not every test crate uses every helper.
#![allow(dead_code)]

pub mod span_capture;

use rdfi_graph::{Graph, NodeFactory, Triple};
use rdfi_profile::Profile;
use rdfi_turtle::{ParseTarget, TurtleReader};

/// Parse `input` with default settings.
pub fn read(input: &str) -> (Graph, Profile) {
    TurtleReader::default()
        .parse(input, ParseTarget::new())
        .expect("fixture should parse")
}

/// The fixture graph used across reader and writer tests:
/// `_:b1 <n1> "l1"`, `<b1> <n1> "1"^^xsd:integer`, `_:b1 <n2> <n1>`.
pub fn fixture_graph(f: &NodeFactory) -> Graph {
    let b1 = f.blank_node(Some("b1"));
    let n1 = f.named_node("n1").unwrap();
    let n2 = f.named_node("n2").unwrap();
    let triples: [Triple; 4] = [
        f.triple(b1.clone(), n1.clone(), f.string_literal("l1")),
        f.triple(
            f.named_node("b1").unwrap(),
            n1.clone(),
            f.literal("1", None, Some(rdfi_vocab::xsd::INTEGER)).unwrap(),
        ),
        // duplicate of the first
        f.triple(b1.clone(), n1.clone(), f.string_literal("l1")),
        f.triple(b1, n2, n1),
    ];
    triples.into_iter().collect()
}

/// Same triples, compared by N-Triples text with blank labels erased.
pub fn shape(graph: &Graph) -> Vec<String> {
    let mut lines: Vec<String> = graph
        .iter()
        .map(|t| {
            t.nodes()
                .iter()
                .map(|n| if n.is_blank() { "_:".to_string() } else { n.to_nt() })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    lines.sort();
    lines
}
