//! Reader and writer spans and their recorded fields.

mod support;

use support::span_capture::init_test_tracing;

use rdfi_turtle::{ParseTarget, TurtleReader, TurtleWriter};

const DOC: &str = r#"@prefix ex: <http://example.org/> . ex:a ex:p "x" , "y" ."#;

#[tokio::test(flavor = "current_thread")]
async fn parse_span_records_counts() {
    let (store, _guard) = init_test_tracing();

    TurtleReader::default().parse(DOC, ParseTarget::new()).unwrap();

    let span = store.find_span("turtle_parse").expect("turtle_parse span");
    assert_eq!(span.level, tracing::Level::DEBUG);
    assert_eq!(span.fields["input_len"], DOC.len().to_string());
    assert_eq!(span.fields["triples"], "2");
    // @prefix ex: <..> . ex:a ex:p "x" , "y" . <eof>
    assert_eq!(span.fields["tokens"], "11");
}

#[tokio::test(flavor = "current_thread")]
async fn serialize_span_carries_triple_count() {
    let (store, _guard) = init_test_tracing();

    let (graph, profile) = TurtleReader::default().parse(DOC, ParseTarget::new()).unwrap();
    TurtleWriter::default().serialize(&graph, Some(&profile));

    let span = store.find_span("turtle_serialize").expect("turtle_serialize span");
    assert_eq!(span.fields["triples"], "2");
    assert_eq!(store.span_names(), vec!["turtle_parse", "turtle_serialize"]);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_parse_leaves_triples_unrecorded() {
    let (store, _guard) = init_test_tracing();

    assert!(TurtleReader::default()
        .parse("this is not valid", ParseTarget::new())
        .is_err());

    let span = store.find_span("turtle_parse").unwrap();
    assert!(!span.fields.contains_key("tokens"));
    assert!(!span.fields.contains_key("triples"));
}
