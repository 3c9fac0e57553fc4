//! Three-level triple index
//!
//! A `TripleIndex` maps `k1 -> k2 -> k3 -> [triple]`. The graph keeps three of
//! them over the same triples, keyed by primitives in different orders:
//!
//! | index     | k1        | k2                          | k3        |
//! |-----------|-----------|-----------------------------|-----------|
//! | primary   | subject   | (object is literal, predicate) | object |
//! | secondary | predicate | object                      | subject   |
//! | tertiary  | object    | subject                     | predicate |
//!
//! Leaves hold a `Vec` because non-equivalent triples can share all three
//! primitive keys (`<b1>` and `_:b1` are both `Text("b1")`).

use crate::ids::TripleId;
use crate::primitive::Primitive;
use crate::triple::Triple;
use std::collections::BTreeMap;

/// Second-level key of the primary index
pub(crate) type LiteralPredicate = (bool, Primitive);

#[derive(Clone, Debug)]
pub(crate) struct TripleIndex<K2: Ord> {
    map: BTreeMap<Primitive, BTreeMap<K2, BTreeMap<Primitive, Vec<Triple>>>>,
    len: usize,
}

impl<K2: Ord> Default for TripleIndex<K2> {
    fn default() -> Self {
        Self {
            map: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<K2: Ord> TripleIndex<K2> {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, k1: Primitive, k2: K2, k3: Primitive, triple: Triple) {
        self.map
            .entry(k1)
            .or_default()
            .entry(k2)
            .or_default()
            .entry(k3)
            .or_default()
            .push(triple);
        self.len += 1;
    }

    /// Remove the triple with `id` stored under the given keys, pruning empty levels.
    pub(crate) fn remove(&mut self, k1: &Primitive, k2: &K2, k3: &Primitive, id: &TripleId) -> bool {
        let Some(level2) = self.map.get_mut(k1) else {
            return false;
        };
        let Some(level3) = level2.get_mut(k2) else {
            return false;
        };
        let Some(bucket) = level3.get_mut(k3) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|t| t.id() == id) else {
            return false;
        };
        bucket.remove(pos);
        self.len -= 1;

        if bucket.is_empty() {
            level3.remove(k3);
        }
        if level3.is_empty() {
            level2.remove(k2);
        }
        if level2.is_empty() {
            self.map.remove(k1);
        }
        true
    }

    pub(crate) fn exact<'a>(
        &'a self,
        k1: &Primitive,
        k2: &K2,
        k3: &Primitive,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.map
            .get(k1)
            .and_then(|l2| l2.get(k2))
            .and_then(|l3| l3.get(k3))
            .into_iter()
            .flatten()
    }

    pub(crate) fn prefix2<'a>(&'a self, k1: &Primitive, k2: &K2) -> impl Iterator<Item = &'a Triple> + 'a {
        self.map
            .get(k1)
            .and_then(|l2| l2.get(k2))
            .into_iter()
            .flat_map(|l3| l3.values())
            .flatten()
    }

    pub(crate) fn prefix1<'a>(&'a self, k1: &Primitive) -> impl Iterator<Item = &'a Triple> + 'a {
        self.map
            .get(k1)
            .into_iter()
            .flat_map(|l2| l2.values())
            .flat_map(|l3| l3.values())
            .flatten()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Triple> + '_ {
        self.map
            .values()
            .flat_map(|l2| l2.values())
            .flat_map(|l3| l3.values())
            .flatten()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.len = 0;
    }
}

/// Index keys of one triple
pub(crate) struct TripleKeys {
    pub s: Primitive,
    pub p: Primitive,
    pub o: Primitive,
    pub literal: bool,
}

impl TripleKeys {
    pub(crate) fn of(triple: &Triple) -> Self {
        Self {
            s: triple.subject().primitive(),
            p: triple.predicate().primitive(),
            o: triple.object().primitive(),
            literal: triple.object().is_literal(),
        }
    }

    pub(crate) fn primary(&self) -> LiteralPredicate {
        (self.literal, self.p.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::NodeFactory;

    fn sample() -> Vec<Triple> {
        let f = NodeFactory::default();
        vec![
            f.triple(
                f.blank_node(Some("b1")),
                f.named_node("n1").unwrap(),
                f.string_literal("l1"),
            ),
            f.triple(
                f.named_node("b1").unwrap(),
                f.named_node("n1").unwrap(),
                f.string_literal("l1"),
            ),
        ]
    }

    #[test]
    fn test_colliding_keys_share_a_bucket() {
        let triples = sample();
        let mut index: TripleIndex<Primitive> = TripleIndex::default();
        for t in &triples {
            let k = TripleKeys::of(t);
            index.insert(k.p, k.o, k.s, t.clone());
        }
        assert_eq!(index.len(), 2);
        let k = TripleKeys::of(&triples[0]);
        assert_eq!(index.exact(&k.p, &k.o, &k.s).count(), 2);
    }

    #[test]
    fn test_remove_prunes_empty_levels() {
        let triples = sample();
        let mut index: TripleIndex<LiteralPredicate> = TripleIndex::default();
        for t in &triples {
            let k = TripleKeys::of(t);
            index.insert(k.s.clone(), k.primary(), k.o, t.clone());
        }
        for t in &triples {
            let k = TripleKeys::of(t);
            assert!(index.remove(&k.s, &k.primary(), &k.o, t.id()));
            assert!(!index.remove(&k.s, &k.primary(), &k.o, t.id()));
        }
        assert_eq!(index.len(), 0);
        assert!(index.map.is_empty());
    }

    #[test]
    fn test_prefix_scans() {
        let triples = sample();
        let mut index: TripleIndex<LiteralPredicate> = TripleIndex::default();
        for t in &triples {
            let k = TripleKeys::of(t);
            index.insert(k.s.clone(), k.primary(), k.o, t.clone());
        }
        let s = Primitive::text("b1");
        assert_eq!(index.prefix1(&s).count(), 2);
        assert_eq!(index.prefix2(&s, &(true, Primitive::text("n1"))).count(), 2);
        assert_eq!(index.prefix2(&s, &(false, Primitive::text("n1"))).count(), 0);
        assert_eq!(index.iter().count(), 2);
    }
}
