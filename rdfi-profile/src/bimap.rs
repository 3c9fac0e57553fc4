//! One-to-one map
//!
//! Both directions are kept in sorted maps so iteration order is
//! deterministic. Binding a key that already exists, or a value that already
//! exists, drops the old pair first: the most recent `insert` always wins on
//! both sides.

use std::borrow::Borrow;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneToOneMap<L, R> {
    forward: BTreeMap<L, R>,
    backward: BTreeMap<R, L>,
}

impl<L, R> Default for OneToOneMap<L, R> {
    fn default() -> Self {
        Self {
            forward: BTreeMap::new(),
            backward: BTreeMap::new(),
        }
    }
}

impl<L: Ord + Clone, R: Ord + Clone> OneToOneMap<L, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Bind `left` to `right`, evicting any pair that used either one.
    ///
    /// Returns the pairs that were evicted.
    pub fn insert(&mut self, left: L, right: R) -> Vec<(L, R)> {
        let mut evicted = Vec::new();
        if let Some(old_right) = self.forward.remove(&left) {
            self.backward.remove(&old_right);
            evicted.push((left.clone(), old_right));
        }
        if let Some(old_left) = self.backward.remove(&right) {
            self.forward.remove(&old_left);
            evicted.push((old_left, right.clone()));
        }
        self.forward.insert(left.clone(), right.clone());
        self.backward.insert(right, left);
        evicted
    }

    pub fn get_by_left<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.forward.get(left)
    }

    pub fn get_by_right<Q>(&self, right: &Q) -> Option<&L>
    where
        R: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.backward.get(right)
    }

    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.forward.contains_key(left)
    }

    pub fn contains_right<Q>(&self, right: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.backward.contains_key(right)
    }

    /// Whether `left` or `right` is bound to anything
    pub fn has_either<QL, QR>(&self, left: &QL, right: &QR) -> bool
    where
        L: Borrow<QL>,
        R: Borrow<QR>,
        QL: Ord + ?Sized,
        QR: Ord + ?Sized,
    {
        self.contains_left(left) || self.contains_right(right)
    }

    pub fn remove_by_left<Q>(&mut self, left: &Q) -> Option<R>
    where
        L: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let right = self.forward.remove(left)?;
        self.backward.remove(&right);
        Some(right)
    }

    pub fn remove_by_right<Q>(&mut self, right: &Q) -> Option<L>
    where
        R: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let left = self.backward.remove(right)?;
        self.forward.remove(&left);
        Some(left)
    }

    /// Pairs ordered by left value
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> + '_ {
        self.forward.iter()
    }

    pub fn lefts(&self) -> impl Iterator<Item = &L> + '_ {
        self.forward.keys()
    }

    /// Right values in their own sorted order
    pub fn rights(&self) -> impl Iterator<Item = &R> + '_ {
        self.backward.keys()
    }
}

impl<L: Ord + Clone, R: Ord + Clone> FromIterator<(L, R)> for OneToOneMap<L, R> {
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (l, r) in iter {
            map.insert(l, r);
        }
        map
    }
}
