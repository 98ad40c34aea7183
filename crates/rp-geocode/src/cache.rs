//! Bucketed label cache with explicit in-flight tracking.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

/// Bucket a path sample falls in.  A zero bucket size is treated as one.
#[inline]
pub fn bucket_for(path_index: usize, bucket_size: usize) -> usize {
    path_index / bucket_size.max(1)
}

/// Permission to perform one lookup, issued by [`LabelCache::begin_lookup`].
///
/// Carries the cache generation it was issued in; a ticket from before the
/// last [`invalidate`](LabelCache::invalidate) is stale and its result is
/// dropped.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct LookupTicket {
    pub bucket:     usize,
    pub generation: u64,
}

/// Bucket → label cache.
///
/// `None` entries record a failed lookup so the bucket is not re-issued.
/// Capacity is bounded; the oldest entry is evicted first.
#[derive(Clone, Debug)]
pub struct LabelCache {
    capacity:   usize,
    entries:    FxHashMap<usize, Option<String>>,
    order:      VecDeque<usize>,
    in_flight:  FxHashSet<usize>,
    generation: u64,
}

impl LabelCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity),
            in_flight: FxHashSet::default(),
            generation: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_in_flight(&self, bucket: usize) -> bool {
        self.in_flight.contains(&bucket)
    }

    /// `true` once a lookup for `bucket` has completed, successfully or not.
    pub fn contains(&self, bucket: usize) -> bool {
        self.entries.contains_key(&bucket)
    }

    /// The cached label, if the lookup succeeded.
    pub fn label(&self, bucket: usize) -> Option<&str> {
        self.entries.get(&bucket).and_then(|l| l.as_deref())
    }

    /// Reserve a lookup for `bucket`.  `None` if it is already cached or
    /// in flight.
    pub fn begin_lookup(&mut self, bucket: usize) -> Option<LookupTicket> {
        if self.entries.contains_key(&bucket) || !self.in_flight.insert(bucket) {
            return None;
        }
        Some(LookupTicket { bucket, generation: self.generation })
    }

    /// Record the outcome of a lookup.  Returns `false` (and changes
    /// nothing) for a stale ticket.
    pub fn complete(&mut self, ticket: LookupTicket, label: Option<String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.in_flight.remove(&ticket.bucket);
        if self.entries.insert(ticket.bucket, label).is_none() {
            self.order.push_back(ticket.bucket);
            while self.entries.len() > self.capacity {
                match self.order.pop_front() {
                    Some(old) => {
                        self.entries.remove(&old);
                    }
                    None => break,
                }
            }
        }
        true
    }

    /// Forget everything and start a new generation.  Outstanding tickets
    /// become stale.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.in_flight.clear();
        self.generation += 1;
    }
}
