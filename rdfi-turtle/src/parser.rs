//! Recursive-descent Turtle parser.
//!
//! Works on the token stream from [`crate::lex`], builds nodes through a
//! [`NodeFactory`] and hands each triple to a [`TripleSink`] as soon as its
//! object is complete.

use std::collections::HashMap;

use rdfi_graph::{Node, NodeFactory};
use rdfi_vocab::{rdf, xsd};
use tracing::trace;

use crate::config::ReaderConfig;
use crate::error::{Result, TurtleError};
use crate::iri;
use crate::lex::{Token, TokenKind};
use crate::sink::TripleSink;

/// Turtle parser state.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    sink: &'a mut S,
    factory: NodeFactory,
    /// Document prefixes. Kept apart from the sink's profile, where rebinding
    /// a namespace under a second prefix evicts the first.
    prefixes: HashMap<String, String>,
    base: Option<String>,
    strict_iris: bool,
    emitted: usize,
}

impl<'a, S: TripleSink> Parser<'a, S> {
    pub fn new(tokens: Vec<Token>, sink: &'a mut S, factory: NodeFactory, config: &ReaderConfig) -> Self {
        Self {
            tokens,
            pos: 0,
            sink,
            factory,
            prefixes: HashMap::new(),
            base: config.base.clone(),
            strict_iris: config.strict_iris,
            emitted: 0,
        }
    }

    /// Parse the whole document. Returns the number of triples emitted.
    pub fn parse(mut self) -> Result<usize> {
        while !self.is_at_end() {
            self.parse_statement()?;
        }
        Ok(self.emitted)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.tokens[self.pos].is_eof()
    }

    fn current(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(0, |t| t.start)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn error(&self, expected: &str) -> TurtleError {
        TurtleError::parse(
            self.position(),
            format!("expected {}, found {}", expected, self.current()),
        )
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if std::mem::discriminant(self.current()) == std::mem::discriminant(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&kind.to_string()))
        }
    }

    fn emit(&mut self, subject: &Node, predicate: &Node, object: Node) {
        let triple = self.factory.triple(subject.clone(), predicate.clone(), object);
        self.emitted += 1;
        self.sink.emit_triple(triple);
    }

    // =========================================================================
    // Directives
    // =========================================================================

    fn parse_statement(&mut self) -> Result<()> {
        match self.current() {
            TokenKind::KwPrefix | TokenKind::KwSparqlPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase | TokenKind::KwSparqlBase => self.parse_base_directive(),
            _ => self.parse_triples(),
        }
    }

    /// `@prefix p: <iri> .` or `PREFIX p: <iri>`
    fn parse_prefix_directive(&mut self) -> Result<()> {
        let sparql_style = matches!(self.current(), TokenKind::KwSparqlPrefix);
        self.advance();

        let prefix = match self.current() {
            TokenKind::PrefixedNameNs(p) => p.to_string(),
            _ => return Err(self.error("prefix declaration 'name:'")),
        };
        self.advance();

        let namespace = match self.current() {
            TokenKind::Iri(reference) => self.resolve_iri(reference)?,
            _ => return Err(self.error("namespace IRI")),
        };
        self.advance();

        if !sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        trace!(prefix = %prefix, namespace = %namespace, "prefix");
        self.sink.on_prefix(&prefix, &namespace);
        self.prefixes.insert(prefix, namespace);
        Ok(())
    }

    /// `@base <iri> .` or `BASE <iri>`. A relative base resolves against the
    /// one already in scope.
    fn parse_base_directive(&mut self) -> Result<()> {
        let sparql_style = matches!(self.current(), TokenKind::KwSparqlBase);
        self.advance();

        let base = match self.current() {
            TokenKind::Iri(reference) => match &self.base {
                Some(current) => iri::resolve(current, reference),
                None => reference.to_string(),
            },
            _ => return Err(self.error("base IRI")),
        };
        self.advance();

        if !sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        trace!(base = %base, "base");
        self.sink.on_base(&base);
        self.base = Some(base);
        Ok(())
    }

    // =========================================================================
    // Triples
    // =========================================================================

    fn parse_triples(&mut self) -> Result<()> {
        let bracketed = matches!(self.current(), TokenKind::LBracket);
        let subject = self.parse_subject()?;

        // `[ :p :o ] .` is a complete statement on its own
        if !(bracketed && matches!(self.current(), TokenKind::Dot)) {
            self.parse_predicate_object_list(&subject)?;
        }

        self.expect(&TokenKind::Dot)
    }

    fn parse_subject(&mut self) -> Result<Node> {
        if let Some(iri) = self.take_iri()? {
            return Ok(self.factory.named_node(iri)?);
        }
        match self.current() {
            TokenKind::BlankNodeLabel(label) => {
                let node = self.factory.blank_node(Some(label));
                self.advance();
                Ok(node)
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.fresh_blank())
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen | TokenKind::Nil => self.parse_collection(),
            _ => Err(self.error("subject")),
        }
    }

    fn parse_predicate_object_list(&mut self, subject: &Node) -> Result<()> {
        loop {
            let predicate = self.parse_predicate()?;
            self.parse_object_list(subject, &predicate)?;

            if !matches!(self.current(), TokenKind::Semicolon) {
                return Ok(());
            }
            while matches!(self.current(), TokenKind::Semicolon) {
                self.advance();
            }
            // trailing `;`
            if matches!(
                self.current(),
                TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
            ) {
                return Ok(());
            }
        }
    }

    fn parse_predicate(&mut self) -> Result<Node> {
        if matches!(self.current(), TokenKind::KwA) {
            self.advance();
            return Ok(self.factory.named_node(rdf::TYPE)?);
        }
        match self.take_iri()? {
            Some(iri) => Ok(self.factory.named_node(iri)?),
            None => Err(self.error("predicate")),
        }
    }

    fn parse_object_list(&mut self, subject: &Node, predicate: &Node) -> Result<()> {
        loop {
            let object = self.parse_object()?;
            self.emit(subject, predicate, object);

            if !matches!(self.current(), TokenKind::Comma) {
                return Ok(());
            }
            self.advance();
        }
    }

    fn parse_object(&mut self) -> Result<Node> {
        match self.current() {
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::KwTrue
            | TokenKind::KwFalse => self.parse_literal(),
            TokenKind::Iri(_)
            | TokenKind::PrefixedName { .. }
            | TokenKind::PrefixedNameNs(_)
            | TokenKind::BlankNodeLabel(_)
            | TokenKind::Anon
            | TokenKind::LBracket
            | TokenKind::LParen
            | TokenKind::Nil => self.parse_subject(),
            _ => Err(self.error("object")),
        }
    }

    fn parse_literal(&mut self) -> Result<Node> {
        let (lexical, datatype) = match self.current() {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                return self.parse_string_suffix(&value);
            }
            TokenKind::Integer(lex) => (lex.to_string(), xsd::INTEGER),
            TokenKind::Decimal(lex) => (lex.to_string(), xsd::DECIMAL),
            TokenKind::Double(lex) => (lex.to_string(), xsd::DOUBLE),
            TokenKind::KwTrue => ("true".to_string(), xsd::BOOLEAN),
            TokenKind::KwFalse => ("false".to_string(), xsd::BOOLEAN),
            _ => return Err(self.error("literal")),
        };
        self.advance();
        Ok(self.factory.literal(lexical, None, Some(datatype))?)
    }

    /// Optional `@lang` or `^^datatype` after a string.
    fn parse_string_suffix(&mut self, value: &str) -> Result<Node> {
        match self.current() {
            TokenKind::LangTag(lang) => {
                let lang = lang.clone();
                self.advance();
                Ok(self.factory.literal(value, Some(&lang), None)?)
            }
            TokenKind::DoubleCaret => {
                self.advance();
                match self.take_iri()? {
                    Some(datatype) => Ok(self.factory.literal(value, None, Some(&datatype))?),
                    None => Err(self.error("datatype IRI")),
                }
            }
            _ => Ok(self.factory.literal(value, None, None)?),
        }
    }

    /// `[ predicateObjectList ]`
    fn parse_blank_node_property_list(&mut self) -> Result<Node> {
        self.expect(&TokenKind::LBracket)?;
        let node = self.fresh_blank();
        if !matches!(self.current(), TokenKind::RBracket) {
            self.parse_predicate_object_list(&node)?;
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(node)
    }

    /// `( item ... )` as an `rdf:first`/`rdf:rest` chain; `()` is `rdf:nil`.
    fn parse_collection(&mut self) -> Result<Node> {
        let nil = self.factory.named_node(rdf::NIL)?;
        if matches!(self.current(), TokenKind::Nil) {
            self.advance();
            return Ok(nil);
        }

        self.expect(&TokenKind::LParen)?;
        if matches!(self.current(), TokenKind::RParen) {
            self.advance();
            return Ok(nil);
        }

        let first = self.factory.named_node(rdf::FIRST)?;
        let rest = self.factory.named_node(rdf::REST)?;
        let head = self.fresh_blank();
        let mut cell = head.clone();

        loop {
            let item = self.parse_object()?;
            self.emit(&cell, &first, item);

            if matches!(self.current(), TokenKind::RParen) {
                self.emit(&cell, &rest, nil);
                break;
            }
            let next = self.fresh_blank();
            self.emit(&cell, &rest, next.clone());
            cell = next;
        }

        self.expect(&TokenKind::RParen)?;
        Ok(head)
    }

    // =========================================================================
    // IRIs and blank nodes
    // =========================================================================

    /// Consume `<iri>`, `p:local` or `p:` and return the full IRI, or leave the
    /// position untouched and return `None`.
    fn take_iri(&mut self) -> Result<Option<String>> {
        let iri = match self.current() {
            TokenKind::Iri(reference) => self.resolve_iri(reference)?,
            TokenKind::PrefixedName { prefix, local } => self.expand(prefix, local)?,
            TokenKind::PrefixedNameNs(prefix) => self.expand(prefix, "")?,
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(iri))
    }

    fn expand(&self, prefix: &str, local: &str) -> Result<String> {
        match self.prefixes.get(prefix) {
            Some(namespace) => Ok(format!("{}{}", namespace, local)),
            None => Err(TurtleError::UndefinedPrefix(prefix.to_string())),
        }
    }

    /// Resolve against the base in scope. Without a base, relative references
    /// are kept as written unless strict resolution is on.
    fn resolve_iri(&self, reference: &str) -> Result<String> {
        if iri::is_absolute(reference) {
            return Ok(reference.to_string());
        }
        match &self.base {
            Some(base) => Ok(iri::resolve(base, reference)),
            None if self.strict_iris || reference.is_empty() => Err(TurtleError::IriResolution(
                format!("relative IRI <{}> with no base in scope", reference),
            )),
            None => Ok(reference.to_string()),
        }
    }

    fn fresh_blank(&self) -> Node {
        self.factory.blank_node(None)
    }
}

/// Parse a token stream into `sink`. Returns the number of triples emitted.
pub fn parse<S: TripleSink>(
    tokens: Vec<Token>,
    sink: &mut S,
    factory: NodeFactory,
    config: &ReaderConfig,
) -> Result<usize> {
    Parser::new(tokens, sink, factory, config).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::tokenize;
    use rdfi_graph::{Graph, Triple};
    use std::collections::HashSet;

    fn parse_with(input: &str, config: &ReaderConfig) -> Result<Vec<Triple>> {
        let mut triples = Vec::new();
        parse(tokenize(input)?, &mut triples, NodeFactory::default(), config)?;
        Ok(triples)
    }

    fn parse_str(input: &str) -> Result<Vec<Triple>> {
        parse_with(input, &ReaderConfig::default())
    }

    fn spo(t: &Triple) -> (&str, &str, &str) {
        (t.subject().value(), t.predicate().value(), t.object().value())
    }

    #[test]
    fn test_simple_triple() {
        let triples =
            parse_str(r#"<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> "Alice" ."#)
                .unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(
            spo(&triples[0]),
            ("http://example.org/alice", "http://xmlns.com/foaf/0.1/name", "Alice")
        );
        assert!(triples[0].subject().is_named());
        assert!(triples[0].object().is_literal());
    }

    #[test]
    fn test_prefix_directive() {
        let triples = parse_str(
            r#"
            @prefix ex: <http://example.org/> .
            PREFIX foaf: <http://xmlns.com/foaf/0.1/>
            ex:alice foaf:name "Alice" .
        "#,
        )
        .unwrap();
        assert_eq!(
            spo(&triples[0]),
            ("http://example.org/alice", "http://xmlns.com/foaf/0.1/name", "Alice")
        );
    }

    #[test]
    fn test_prefix_rebinding_takes_effect() {
        let triples = parse_str(
            r#"
            @prefix ex: <http://one.org/> .
            ex:a ex:p ex:b .
            @prefix ex: <http://two.org/> .
            ex:a ex:p ex:b .
        "#,
        )
        .unwrap();
        assert_eq!(triples[0].subject().value(), "http://one.org/a");
        assert_eq!(triples[1].subject().value(), "http://two.org/a");
    }

    #[test]
    fn test_undefined_prefix() {
        let err = parse_str("ex:a ex:p ex:b .").unwrap_err();
        assert!(matches!(err, TurtleError::UndefinedPrefix(p) if p == "ex"));
    }

    #[test]
    fn test_a_keyword() {
        let triples =
            parse_str("@prefix ex: <http://example.org/> . ex:alice a ex:Person .").unwrap();
        assert_eq!(triples[0].predicate().value(), rdf::TYPE);
    }

    #[test]
    fn test_semicolon_and_comma() {
        let triples = parse_str(
            r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" ;
                     ex:knows ex:bob, ex:charlie ;
                     .
        "#,
        )
        .unwrap();
        assert_eq!(triples.len(), 3);
        assert!(triples
            .iter()
            .all(|t| t.subject().value() == "http://example.org/alice"));
    }

    #[test]
    fn test_blank_node_labels_are_kept() {
        let triples = parse_str(r#"_:b1 <n1> "l1" . _:b1 <n2> _:x ."#).unwrap();
        assert_eq!(triples[0].subject(), triples[1].subject());
        assert_eq!(triples[0].subject().value(), "b1");
        assert!(triples[1].object().is_blank());
    }

    #[test]
    fn test_anonymous_nodes_avoid_document_labels() {
        let doc: String = (0..12)
            .map(|i| format!("_:b{i} <p> [] . _:anon{i} <p> [] . "))
            .collect();
        let triples = parse_str(&doc).unwrap();
        let explicit: HashSet<&str> = triples.iter().map(|t| t.subject().value()).collect();
        let anon: HashSet<&str> = triples.iter().map(|t| t.object().value()).collect();
        assert_eq!(explicit.len(), 24);
        assert_eq!(anon.len(), 24);
        assert!(explicit.is_disjoint(&anon));
    }

    #[test]
    fn test_blank_node_property_list() {
        let triples = parse_str(
            r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:address [ ex:city "Berlin" ; ex:zip "10115" ] .
            [ ex:name "anon" ] .
        "#,
        )
        .unwrap();
        assert_eq!(triples.len(), 4);
        let address = triples
            .iter()
            .find(|t| t.predicate().value() == "http://example.org/address")
            .unwrap()
            .object();
        let inner = triples
            .iter()
            .filter(|t| t.subject() == address)
            .count();
        assert_eq!(inner, 2);
    }

    #[test]
    fn test_literals() {
        let triples = parse_str(
            r#"
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            <s> <p> "chat"@fr, "5"^^xsd:integer, 007, 1.50, 1e3, true, "plain" .
        "#,
        )
        .unwrap();
        let lits: Vec<_> = triples
            .iter()
            .map(|t| t.object().as_literal().unwrap())
            .collect();

        assert_eq!(lits[0].language(), Some("fr"));
        assert_eq!(lits[1].datatype().as_iri(), xsd::INTEGER);
        assert_eq!((lits[2].lexical(), lits[2].datatype().as_iri()), ("007", xsd::INTEGER));
        assert_eq!((lits[3].lexical(), lits[3].datatype().as_iri()), ("1.50", xsd::DECIMAL));
        assert_eq!((lits[4].lexical(), lits[4].datatype().as_iri()), ("1e3", xsd::DOUBLE));
        assert_eq!((lits[5].lexical(), lits[5].datatype().as_iri()), ("true", xsd::BOOLEAN));
        assert!(lits[6].datatype().is_xsd_string());
    }

    #[test]
    fn test_collection() {
        let triples = parse_str(r#"<s> <p> ( "a" "b" ) ."#).unwrap();
        // two cells, each with first and rest, plus the link from <s>
        assert_eq!(triples.len(), 5);
        let firsts: Vec<&str> = triples
            .iter()
            .filter(|t| t.predicate().value() == rdf::FIRST)
            .map(|t| t.object().value())
            .collect();
        assert_eq!(firsts, vec!["a", "b"]);
        assert!(triples
            .iter()
            .any(|t| t.predicate().value() == rdf::REST && t.object().value() == rdf::NIL));
    }

    #[test]
    fn test_empty_collection() {
        let triples = parse_str("<s> <p> () .").unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].object().value(), rdf::NIL);
    }

    #[test]
    fn test_relative_iris_without_base() {
        let triples = parse_str(r#"<b1> <n1> "1" ."#).unwrap();
        assert_eq!(spo(&triples[0]), ("b1", "n1", "1"));

        let err = parse_with(r#"<b1> <n1> "1" ."#, &ReaderConfig::default().strict()).unwrap_err();
        assert!(matches!(err, TurtleError::IriResolution(_)));
    }

    #[test]
    fn test_base_resolution() {
        let triples = parse_str(
            r#"
            @base <http://example.org/data/> .
            <alice> <../vocab#name> "Alice" .
            <> <#self> <sub/> .
            BASE <other/>
            <bob> <p> "Bob" .
        "#,
        )
        .unwrap();
        assert_eq!(triples[0].subject().value(), "http://example.org/data/alice");
        assert_eq!(triples[0].predicate().value(), "http://example.org/vocab#name");
        assert_eq!(triples[1].subject().value(), "http://example.org/data/");
        assert_eq!(triples[1].predicate().value(), "http://example.org/data/#self");
        assert_eq!(triples[2].subject().value(), "http://example.org/data/other/bob");
    }

    #[test]
    fn test_configured_base() {
        let config = ReaderConfig::default().with_base("http://example.org/");
        let triples = parse_with("<a> <b> <c> .", &config).unwrap();
        assert_eq!(spo(&triples[0]), ("http://example.org/a", "http://example.org/b", "http://example.org/c"));
    }

    #[test]
    fn test_missing_dot() {
        let err = parse_str("<s> <p> <o>").unwrap_err();
        assert!(matches!(err, TurtleError::Parse { .. }));
        assert!(err.to_string().contains("'.'"));
    }

    #[test]
    fn test_literal_subject_rejected() {
        let err = parse_str(r#""lit" <p> <o> ."#).unwrap_err();
        assert!(err.to_string().contains("expected subject"));
    }

    #[test]
    fn test_invalid_language_tag_surfaces_graph_error() {
        let err = parse_str(r#"<s> <p> "x"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#langString> ."#)
            .unwrap_err();
        assert!(matches!(err, TurtleError::Graph(_)));
    }

    #[test]
    fn test_graph_sink_dedups() {
        let mut graph = Graph::new();
        let emitted = parse(
            tokenize(r#"<s> <p> "o" . <s> <p> "o" ."#).unwrap(),
            &mut graph,
            NodeFactory::default(),
            &ReaderConfig::default(),
        )
        .unwrap();
        assert_eq!(emitted, 2);
        assert_eq!(graph.len(), 1);
    }
}
