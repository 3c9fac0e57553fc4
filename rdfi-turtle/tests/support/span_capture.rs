//! Span capture layer for checking reader and writer instrumentation.
//!
//! Records every span together with its fields, including fields filled in
//! later through `Span::record`.
//!
//! ```ignore
//! let (store, _guard) = init_test_tracing();
//! TurtleReader::default().parse(doc, ParseTarget::new())?;
//! assert_eq!(store.find_span("turtle_parse").unwrap().fields["triples"], "3");
//! ```
//!
//! The subscriber is installed with `set_default`, so spans are only seen on
//! the installing thread. Work moved to `spawn_blocking` is not captured.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::span::{Attributes, Id, Record};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: &'static str,
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
    pub parent_name: Option<String>,
}

/// Captured spans keyed by span id, in creation order.
#[derive(Debug, Clone, Default)]
pub struct SpanStore(Arc<Mutex<Vec<(u64, CapturedSpan)>>>);

impl SpanStore {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.0.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }

    pub fn span_names(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().iter().map(|(_, s)| s.name).collect()
    }

    pub fn has_span(&self, name: &str) -> bool {
        self.0.lock().unwrap().iter().any(|(_, s)| s.name == name)
    }

    pub fn find_span(&self, name: &str) -> Option<CapturedSpan> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(_, s)| s.clone())
    }
}

pub struct SpanCaptureLayer {
    store: SpanStore,
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> Layer<S> for SpanCaptureLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));

        let parent_name = attrs
            .parent()
            .and_then(|pid| ctx.span(pid))
            .map(|span| span.name().to_string())
            .or_else(|| ctx.lookup_current().map(|span| span.name().to_string()));

        let meta = attrs.metadata();
        let captured = CapturedSpan {
            name: meta.name(),
            level: *meta.level(),
            fields,
            parent_name,
        };
        self.store.0.lock().unwrap().push((id.into_u64(), captured));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        let mut spans = self.store.0.lock().unwrap();
        if let Some((_, span)) = spans.iter_mut().rev().find(|(sid, _)| *sid == id.into_u64()) {
            values.record(&mut FieldVisitor(&mut span.fields));
        }
    }
}

/// Install a capturing subscriber on this thread until the guard drops.
pub fn init_test_tracing() -> (SpanStore, tracing::subscriber::DefaultGuard) {
    let store = SpanStore::default();
    let layer = SpanCaptureLayer {
        store: store.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
