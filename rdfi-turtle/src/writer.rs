//! Turtle serializer.
//!
//! Output is grouped by subject:
//!
//! ```text
//! @prefix ex: <http://example.org/> .
//!
//! ex:alice a ex:Person ;
//!     ex:knows ex:bob , ex:carol .
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use rdfi_graph::ntriples::escape_string;
use rdfi_graph::{Graph, Node, Term};
use rdfi_profile::{PrefixMap, Profile};
use rdfi_vocab::rdf;

use crate::config::WriterConfig;
use crate::lex::chars::{is_iri_char, is_plain_blank_label, is_plain_pn_local, is_plain_pn_prefix};

/// Serializes graphs as Turtle.
#[derive(Clone, Debug, Default)]
pub struct TurtleWriter {
    config: WriterConfig,
}

impl TurtleWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Serialize `graph`, abbreviating IRIs with the profile's prefixes.
    pub fn serialize(&self, graph: &Graph, profile: Option<&Profile>) -> String {
        let _span = tracing::debug_span!("turtle_serialize", triples = graph.len()).entered();

        let prefixes = profile
            .map(Profile::prefixes)
            .filter(|_| self.config.shrink_iris);
        let mut body = Body {
            prefixes,
            used: BTreeMap::new(),
            labels: BlankLabels::new(graph),
            out: String::new(),
        };
        let indent = " ".repeat(self.config.indent);

        for subject in graph.subjects() {
            body.node(subject);
            for (i, predicate) in graph.predicates(subject).into_iter().enumerate() {
                if i > 0 {
                    body.out.push_str(" ;\n");
                    body.out.push_str(&indent);
                } else {
                    body.out.push(' ');
                }
                body.predicate(predicate);
                for (j, object) in graph.objects(subject, predicate).into_iter().enumerate() {
                    body.out.push_str(if j > 0 { " , " } else { " " });
                    body.node(object);
                }
            }
            body.out.push_str(" .\n\n");
        }

        let mut out = String::new();
        if self.config.emit_prefixes {
            let declared: Vec<(&str, &str)> = match (profile, self.config.only_used_prefixes) {
                (_, true) => body
                    .used
                    .iter()
                    .map(|(p, ns)| (p.as_str(), ns.as_str()))
                    .collect(),
                (Some(profile), false) => profile
                    .prefixes()
                    .iter()
                    .filter(|(p, _)| is_plain_pn_prefix(p))
                    .collect(),
                (None, false) => Vec::new(),
            };
            for (prefix, namespace) in &declared {
                out.push_str("@prefix ");
                out.push_str(prefix);
                out.push_str(": ");
                push_iri(&mut out, namespace);
                out.push_str(" .\n");
            }
            if !declared.is_empty() {
                out.push('\n');
            }
        }
        out.push_str(&body.out);

        tracing::debug!(bytes = out.len(), prefixes = body.used.len(), "graph serialized");
        out
    }
}

/// The subject blocks under construction, plus the prefixes they used.
struct Body<'p> {
    prefixes: Option<&'p PrefixMap>,
    used: BTreeMap<String, String>,
    labels: BlankLabels,
    out: String,
}

/// Replacement labels for blank nodes whose label is not valid after `_:`
/// (ids from a source with a prefix such as `urn:x:` end up in labels).
struct BlankLabels {
    taken: HashSet<String>,
    renamed: HashMap<String, String>,
    next: usize,
}

impl BlankLabels {
    fn new(graph: &Graph) -> Self {
        let taken = graph
            .iter()
            .flat_map(|t| t.nodes())
            .filter(|n| n.is_blank())
            .map(|n| n.value().to_string())
            .collect();
        Self {
            taken,
            renamed: HashMap::new(),
            next: 0,
        }
    }

    fn get(&mut self, label: &str) -> String {
        if is_plain_blank_label(label) {
            return label.to_string();
        }
        if let Some(renamed) = self.renamed.get(label) {
            return renamed.clone();
        }
        let fresh = loop {
            let candidate = format!("genid{}", self.next);
            self.next += 1;
            if !self.taken.contains(&candidate) {
                break candidate;
            }
        };
        self.taken.insert(fresh.clone());
        self.renamed.insert(label.to_string(), fresh.clone());
        fresh
    }
}

impl<'p> Body<'p> {
    fn predicate(&mut self, predicate: &Node) {
        if predicate.term().as_iri() == Some(rdf::TYPE) {
            self.out.push('a');
        } else {
            self.node(predicate);
        }
    }

    fn node(&mut self, node: &Node) {
        match node.term() {
            Term::Named(iri) => self.iri(iri),
            Term::Blank(label) => {
                let label = self.labels.get(label);
                self.out.push_str("_:");
                self.out.push_str(&label);
            }
            Term::Literal(lit) => {
                self.out.push('"');
                self.out.push_str(&escape_string(lit.lexical()));
                self.out.push('"');
                if let Some(lang) = lit.language() {
                    self.out.push('@');
                    self.out.push_str(lang);
                } else if !lit.datatype().is_xsd_string() {
                    self.out.push_str("^^");
                    self.iri(lit.datatype().as_iri());
                }
            }
        }
    }

    /// `prefix:local` when the IRI splits cleanly, `<iri>` otherwise.
    fn iri(&mut self, iri: &str) {
        if let Some(prefixes) = self.prefixes {
            if let Some((prefix, local)) = prefixes.split(iri) {
                if is_plain_pn_prefix(prefix) && (local.is_empty() || is_plain_pn_local(local)) {
                    if let Some(namespace) = prefixes.namespace(prefix) {
                        self.used.insert(prefix.to_string(), namespace.to_string());
                    }
                    self.out.push_str(prefix);
                    self.out.push(':');
                    self.out.push_str(local);
                    return;
                }
            }
        }
        push_iri(&mut self.out, iri);
    }
}

/// `<iri>`, with characters an IRIREF cannot hold written as `\uXXXX`.
fn push_iri(out: &mut String, iri: &str) {
    out.push('<');
    for c in iri.chars() {
        if is_iri_char(c) {
            out.push(c);
        } else {
            // writing to a String cannot fail
            let _ = write!(out, "\\u{:04X}", c as u32);
        }
    }
    out.push('>');
}
