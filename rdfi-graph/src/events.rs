//! Change notification for graphs
//!
//! Handlers subscribe to one [`EventKind`] and are called synchronously, in
//! subscription order, after the mutation that triggered them has been
//! applied to every index.

use crate::triple::Triple;
use std::fmt;

/// The mutation that produced an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Remove,
    Clear,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Add => "add",
            EventKind::Remove => "remove",
            EventKind::Clear => "clear",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub enum EventData {
    /// The added or removed triple
    Triple(Triple),
    /// Every triple the graph held before a clear
    Triples(Vec<Triple>),
}

#[derive(Clone, Debug)]
pub struct GraphEvent {
    pub kind: EventKind,
    pub data: EventData,
}

impl GraphEvent {
    pub fn triple(&self) -> Option<&Triple> {
        match &self.data {
            EventData::Triple(t) => Some(t),
            EventData::Triples(_) => None,
        }
    }

    pub fn triples(&self) -> &[Triple] {
        match &self.data {
            EventData::Triple(t) => std::slice::from_ref(t),
            EventData::Triples(ts) => ts,
        }
    }
}

/// Handle returned by `Graph::subscribe`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type EventHandler = Box<dyn FnMut(&GraphEvent) + Send>;

struct Listener {
    id: SubscriptionId,
    kind: EventKind,
    handler: EventHandler,
}

/// Subscriber registry owned by one graph
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push(Listener { id, kind, handler });
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        self.entries.len() != before
    }

    /// Whether any handler listens for `kind`
    pub(crate) fn wants(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|l| l.kind == kind)
    }

    pub(crate) fn emit(&mut self, event: &GraphEvent) {
        for listener in self.entries.iter_mut().filter(|l| l.kind == event.kind) {
            (listener.handler)(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_filters_by_kind_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(
                EventKind::Clear,
                Box::new(move |_| seen.lock().unwrap().push(tag)),
            );
        }
        let add_seen = Arc::clone(&seen);
        listeners.subscribe(
            EventKind::Add,
            Box::new(move |_| add_seen.lock().unwrap().push("add")),
        );

        listeners.emit(&GraphEvent {
            kind: EventKind::Clear,
            data: EventData::Triples(Vec::new()),
        });
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners = Listeners::default();
        let id = listeners.subscribe(EventKind::Add, Box::new(|_| {}));
        assert!(listeners.wants(EventKind::Add));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(!listeners.wants(EventKind::Add));
        assert_eq!(listeners.len(), 0);
    }
}
