//! SymTable: string keys to borrowed values, chained buckets over a node arena.

use crate::error::SymTableError;
use crate::hash::{bucket_index, KeyHasher, Poly65599};
use crate::schedule::BucketSchedule;
use crate::stats::Stats;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of one binding; chains link bindings through these.
    struct NodeKey;
}

struct Binding<'v, V: ?Sized> {
    key: String,
    value: &'v V,
    next: Option<NodeKey>,
}

/// Result of [`SymTable::put`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PutOutcome {
    /// A new binding was created.
    Inserted,
    /// The key was already bound; the table was left unchanged.
    AlreadyPresent,
}

impl PutOutcome {
    pub fn is_inserted(self) -> bool {
        self == PutOutcome::Inserted
    }
}

/// A symbol table mapping owned string keys to values borrowed for `'v`.
///
/// Duplicate keys are rejected: `put` on a bound key is a no-op reporting
/// [`PutOutcome::AlreadyPresent`], and the stored value is kept.
pub struct SymTable<'v, V: ?Sized, H = Poly65599> {
    hasher: H,
    schedule: BucketSchedule,
    buckets: Vec<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Binding<'v, V>>,
}

impl<'v, V: ?Sized> SymTable<'v, V> {
    pub fn new() -> Self {
        Self::with_hasher(Poly65599)
    }
}

impl<'v, V: ?Sized> Default for SymTable<'v, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'v, V: ?Sized, H> SymTable<'v, V, H> {
    pub(crate) fn with_parts(hasher: H, schedule: BucketSchedule) -> Self {
        Self {
            buckets: vec![None; schedule.min()],
            hasher,
            schedule,
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current number of buckets; always a member of the schedule.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn schedule(&self) -> &BucketSchedule {
        &self.schedule
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Iterates bindings bucket by bucket, each chain most recently linked
    /// first. Callers must not rely on the order.
    pub fn iter(&self) -> Iter<'_, 'v, V> {
        Iter {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cursor: None,
            remaining: self.nodes.len(),
        }
    }

    /// Calls `apply` on every binding with the caller's `extra` context.
    pub fn map<C, F>(&self, extra: &mut C, mut apply: F)
    where
        C: ?Sized,
        F: FnMut(&str, &'v V, &mut C),
    {
        for (key, value) in self.iter() {
            apply(key, value, &mut *extra);
        }
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &'v V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Drops every binding. The bucket array keeps its current size.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.fill(None);
    }

    fn chain_len(&self, head: Option<NodeKey>) -> usize {
        let mut n = 0;
        let mut cur = head;
        while let Some(k) = cur {
            n += 1;
            cur = self.nodes[k].next;
        }
        n
    }

    /// Chain length statistics over the current bucket array.
    pub fn stats(&self) -> Stats {
        Stats::from_chain_lengths(
            self.buckets.len(),
            self.buckets.iter().map(|&head| self.chain_len(head)),
        )
    }
}

impl<'v, V: ?Sized, H> SymTable<'v, V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_parts(hasher, BucketSchedule::default())
    }

    fn find_node(&self, key: &str) -> Option<NodeKey> {
        let mut cur = self.buckets[bucket_index(&self.hasher, key, self.buckets.len())];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&'v V> {
        self.find_node(key).map(|k| self.nodes[k].value)
    }

    /// Binds `key` to `value` unless `key` is already bound.
    ///
    /// The key is copied into storage owned by the table; `value` stays
    /// borrowed. May grow the bucket array first. On error nothing changes.
    pub fn put(&mut self, key: &str, value: &'v V) -> Result<PutOutcome, SymTableError> {
        if self.contains(key) {
            return Ok(PutOutcome::AlreadyPresent);
        }

        let owned = copy_key(key)?;
        if let Some(target) = self.schedule.grow_target(self.nodes.len(), self.buckets.len()) {
            self.rehash(target)?;
        }

        let idx = bucket_index(&self.hasher, &owned, self.buckets.len());
        let next = self.buckets[idx];
        let k = self.nodes.insert(Binding {
            key: owned,
            value,
            next,
        });
        self.buckets[idx] = Some(k);
        trace!("bound {:?} in bucket {}", key, idx);
        Ok(PutOutcome::Inserted)
    }

    /// Removes the binding for `key`. Returns false if there was none.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes the binding for `key`, handing back its owned key and the
    /// value reference.
    pub fn take(&mut self, key: &str) -> Option<(String, &'v V)> {
        let idx = bucket_index(&self.hasher, key, self.buckets.len());
        let mut prev: Option<NodeKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key != key {
                prev = Some(k);
                cur = node.next;
                continue;
            }

            let next = node.next;
            match prev {
                None => self.buckets[idx] = next,
                Some(p) => self.nodes[p].next = next,
            }
            let binding = self.nodes.remove(k)?;
            trace!("unbound {:?} from bucket {}", key, idx);
            return Some((binding.key, binding.value));
        }
        None
    }

    /// Moves every node into a fresh array of `target` buckets. The new
    /// array is reserved before anything is touched.
    fn rehash(&mut self, target: usize) -> Result<(), SymTableError> {
        let mut fresh: Vec<Option<NodeKey>> = Vec::new();
        fresh.try_reserve_exact(target).map_err(|_| SymTableError::OutOfMemory {
            bytes: target.saturating_mul(mem::size_of::<Option<NodeKey>>()),
        })?;
        fresh.resize(target, None);

        let old = mem::take(&mut self.buckets);
        let from = old.len();
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let node = &mut self.nodes[k];
                cur = node.next;
                let idx = bucket_index(&self.hasher, &node.key, target);
                node.next = fresh[idx];
                fresh[idx] = Some(k);
            }
        }
        self.buckets = fresh;
        debug!(
            "resized symbol table from {} to {} buckets ({} bindings)",
            from,
            target,
            self.nodes.len()
        );
        Ok(())
    }

    /// Panics unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        let n = self.buckets.len();
        assert!(self.schedule.contains(n), "bucket count {} not in schedule", n);
        let mut seen = HashSet::new();
        for (i, &head) in self.buckets.iter().enumerate() {
            let mut cur = head;
            while let Some(k) = cur {
                let node = &self.nodes[k];
                assert_eq!(bucket_index(&self.hasher, &node.key, n), i, "misplaced {:?}", node.key);
                assert!(seen.insert(k), "node linked twice");
                cur = node.next;
            }
        }
        assert_eq!(seen.len(), self.nodes.len(), "unreachable nodes in arena");
        let keys: HashSet<&str> = self.nodes.values().map(|b| b.key.as_str()).collect();
        assert_eq!(keys.len(), self.nodes.len(), "duplicate keys");
    }

    /// Keys of the chain `key` hashes to, in link order.
    #[cfg(test)]
    pub(crate) fn chain_of(&self, key: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = self.buckets[bucket_index(&self.hasher, key, self.buckets.len())];
        while let Some(k) = cur {
            out.push(self.nodes[k].key.clone());
            cur = self.nodes[k].next;
        }
        out
    }
}

fn copy_key(key: &str) -> Result<String, SymTableError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| SymTableError::OutOfMemory { bytes: key.len() })?;
    owned.push_str(key);
    Ok(owned)
}

impl<'v, V, H> fmt::Debug for SymTable<'v, V, H>
where
    V: ?Sized + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` bindings of a [`SymTable`].
pub struct Iter<'a, 'v, V: ?Sized> {
    buckets: core::slice::Iter<'a, Option<NodeKey>>,
    nodes: &'a SlotMap<NodeKey, Binding<'v, V>>,
    cursor: Option<NodeKey>,
    remaining: usize,
}

impl<'a, 'v, V: ?Sized> Iterator for Iter<'a, 'v, V> {
    type Item = (&'a str, &'v V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            if let Some(k) = self.cursor {
                let node = &nodes[k];
                self.cursor = node.next;
                self.remaining -= 1;
                return Some((node.key.as_str(), node.value));
            }
            self.cursor = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, 'v, V: ?Sized> ExactSizeIterator for Iter<'a, 'v, V> {}

impl<'a, 'v, V: ?Sized> FusedIterator for Iter<'a, 'v, V> {}

impl<'a, 'v, V: ?Sized, H> IntoIterator for &'a SymTable<'v, V, H> {
    type Item = (&'a str, &'v V);
    type IntoIter = Iter<'a, 'v, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
