//! Writing a graph and reading it back yields an equivalent graph.

mod support;

use rdfi_graph::{Graph, NodeFactory};
use rdfi_profile::Profile;
use rdfi_turtle::{TurtleWriter, WriterConfig};

#[test]
fn fixture_graph_serializes_to_a_string() {
    let f = NodeFactory::default();
    let graph = support::fixture_graph(&f);
    assert_eq!(graph.len(), 3);

    let text = TurtleWriter::default().serialize(&graph, None);
    assert!(!text.is_empty());
    assert!(text.contains("_:b1"));
}

#[test]
fn fixture_graph_round_trips() {
    let f = NodeFactory::default();
    let graph = support::fixture_graph(&f);

    let text = TurtleWriter::default().serialize(&graph, None);
    let (back, _) = support::read(&text);

    assert_eq!(back.len(), graph.len());
    assert!(graph.every(|t| back.has_triple(t)));
}

#[test]
fn prefixed_document_round_trips() {
    let doc = r#"
        @prefix ex: <http://example.org/> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        ex:alice a ex:Person ;
            ex:name "Alice \"Al\" Smith"@en , "Alice" ;
            ex:age 042 ;
            ex:ratio 1.50 ;
            ex:knows [ ex:name "Bob" ] ;
            ex:likes ( ex:tea ex:cake ) .
    "#;
    let (graph, profile) = support::read(doc);
    let text = TurtleWriter::default().serialize(&graph, Some(&profile));

    assert!(text.contains("ex:alice a ex:Person"));
    assert!(text.contains(r#""042"^^xsd:integer"#));

    let (back, back_profile) = support::read(&text);
    assert_eq!(support::shape(&back), support::shape(&graph));
    assert_eq!(back_profile.prefixes().namespace("ex"), Some("http://example.org/"));
}

#[test]
fn base_namespace_round_trips_through_empty_prefix() {
    let (graph, profile) = support::read(
        r#"
        @base <http://example.org/> .
        <alice> <knows> <bob> .
    "#,
    );
    let text = TurtleWriter::default().serialize(&graph, Some(&profile));
    assert!(text.starts_with("@prefix : <http://example.org/> ."));
    assert!(text.contains(":alice :knows :bob"));

    let (back, _) = support::read(&text);
    assert!(graph.every(|t| back.has_triple(t)));
}

#[test]
fn writer_respects_indent_and_prefix_settings() {
    let (graph, profile) = support::read(
        r#"
        @prefix ex: <http://example.org/> .
        @prefix unused: <http://unused.org/> .
        ex:a ex:p 1 ; ex:q 2 .
    "#,
    );

    let config: WriterConfig =
        serde_json::from_str(r#"{"indent": 2, "onlyUsedPrefixes": false}"#).unwrap();
    let text = TurtleWriter::new(config).serialize(&graph, Some(&profile));
    assert!(text.contains("@prefix unused: <http://unused.org/> ."));
    assert!(text.contains(" ;\n  ex:"));

    let no_shrink = WriterConfig {
        shrink_iris: false,
        ..WriterConfig::default()
    };
    let text = TurtleWriter::new(no_shrink).serialize(&graph, Some(&profile));
    assert!(!text.contains("@prefix"));
    assert!(text.contains("<http://example.org/a>"));
}

#[test]
fn profile_terms_do_not_affect_output() {
    let (graph, mut profile) = support::read("@prefix ex: <http://example.org/> . ex:a ex:p ex:b .");
    let plain = TurtleWriter::default().serialize(&graph, Some(&profile));
    profile.set_term("thing", "http://example.org/b");
    assert_eq!(TurtleWriter::default().serialize(&graph, Some(&profile)), plain);
}

#[test]
fn iris_with_reserved_characters_round_trip() {
    let f = NodeFactory::default();
    let p = f.named_node("http://example.org/p").unwrap();
    let mut graph = Graph::new();
    graph
        .add(f.triple(
            f.named_node("http://example.org/a b").unwrap(),
            p.clone(),
            f.named_node("http://example.org/{x}|^`<y>\"z\"\\w").unwrap(),
        ))
        .add(f.triple(
            f.named_node("http://example.org/with space/s").unwrap(),
            p.clone(),
            f.named_node("http://example.org/caf\u{e9}\tend").unwrap(),
        ))
        .add(f.triple(f.blank_node(None), p, f.blank_node(Some("b1"))));

    let mut profile = Profile::default();
    profile.set_prefix("sp", "http://example.org/with space/");

    for text in [
        TurtleWriter::default().serialize(&graph, None),
        TurtleWriter::default().serialize(&graph, Some(&profile)),
    ] {
        let (back, _) = support::read(&text);
        assert_eq!(support::shape(&back), support::shape(&graph), "{text}");
    }
}
