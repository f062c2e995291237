//! Logarithmic weighted bin for probabilistic triangle selection
//!
//! A mutable collection of weighted items supporting weighted-random
//! draws with cost that is insensitive to weight skew. Triangle areas
//! in a mesh can span many orders of magnitude, so weights are grouped
//! into power-of-two buckets between a configured minimum and maximum:
//! a draw first picks a bucket with probability proportional to its
//! aggregate weight, then picks uniformly inside the bucket.
//!
//! Items live in a slot arena and are addressed by [`BinHandle`], a
//! generation-checked index that stays valid across insertions and
//! removals of other items. The sampling loop holds a handle from draw
//! to either acceptance or subdivision, and [`LogarithmicBin::erase`]
//! hands the item back by value so derived data can be computed after
//! the handle is invalidated.
//!
//! Author: Moroya Sakamoto

use crate::baking::rng::Rng64;

/// Stable handle to an item in a [`LogarithmicBin`].
///
/// Remains valid until the item it refers to is erased; erasing or
/// inserting other items never invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinHandle {
    slot: u32,
    generation: u32,
}

struct Entry<T> {
    item: T,
    weight: f32,
    bucket: u32,
    index_in_bucket: u32,
}

struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

#[derive(Default)]
struct Bucket {
    slots: Vec<u32>,
    total_weight: f64,
}

/// Weighted probabilistic container with logarithmic weight buckets
pub struct LogarithmicBin<T> {
    min_weight: f32,
    max_weight: f32,
    buckets: Vec<Bucket>,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> LogarithmicBin<T> {
    /// Create a bin accepting weights in `[min_weight, max_weight]`.
    ///
    /// Weights outside the range are clamped on insertion. Panics if
    /// `min_weight` is not strictly positive.
    pub fn new(min_weight: f32, max_weight: f32) -> Self {
        assert!(
            min_weight > 0.0 && min_weight.is_finite(),
            "minimum weight must be positive and finite"
        );
        let max_weight = max_weight.max(min_weight);
        let bucket_count = (max_weight / min_weight).log2().floor() as usize + 1;

        LogarithmicBin {
            min_weight,
            max_weight,
            buckets: (0..bucket_count).map(|_| Bucket::default()).collect(),
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Smallest weight the bin will store
    #[inline]
    pub fn min_weight(&self) -> f32 {
        self.min_weight
    }

    /// Largest weight the bin will store
    #[inline]
    pub fn max_weight(&self) -> f32 {
        self.max_weight
    }

    /// Number of stored items
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no items are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of all stored weights
    pub fn total_weight(&self) -> f64 {
        self.buckets.iter().map(|b| b.total_weight).sum()
    }

    #[inline]
    fn bucket_index(&self, weight: f32) -> u32 {
        let raw = (weight / self.min_weight).log2().floor() as i32;
        raw.clamp(0, self.buckets.len() as i32 - 1) as u32
    }

    /// Insert an item, returning a stable handle to it.
    ///
    /// The weight is clamped into the bin's range, so triangles smaller
    /// than the subdivision floor enter at the floor weight.
    pub fn insert(&mut self, item: T, weight: f32) -> BinHandle {
        let weight = weight.clamp(self.min_weight, self.max_weight);
        let bucket = self.bucket_index(weight);

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: None,
                });
                self.slots.len() as u32 - 1
            }
        };

        let b = &mut self.buckets[bucket as usize];
        b.slots.push(slot);
        b.total_weight += weight as f64;

        let index_in_bucket = b.slots.len() as u32 - 1;
        let s = &mut self.slots[slot as usize];
        s.entry = Some(Entry {
            item,
            weight,
            bucket,
            index_in_bucket,
        });

        self.len += 1;
        BinHandle {
            slot,
            generation: s.generation,
        }
    }

    /// Borrow the item behind a handle, if it is still alive
    pub fn get(&self, handle: BinHandle) -> Option<&T> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| &e.item)
    }

    /// Stored weight of the item behind a handle
    pub fn weight(&self, handle: BinHandle) -> Option<f32> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| e.weight)
    }

    /// Remove the item behind a handle, returning it by value.
    ///
    /// O(1) amortized: the bucket entry is swap-removed and the moved
    /// entry's back-index patched. Returns `None` for stale handles.
    pub fn erase(&mut self, handle: BinHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);

        let b = &mut self.buckets[entry.bucket as usize];
        b.slots.swap_remove(entry.index_in_bucket as usize);
        if let Some(&moved) = b.slots.get(entry.index_in_bucket as usize) {
            if let Some(moved_entry) = self.slots[moved as usize].entry.as_mut() {
                moved_entry.index_in_bucket = entry.index_in_bucket;
            }
        }
        b.total_weight -= entry.weight as f64;
        if b.slots.is_empty() {
            // Reset accumulated floating-point drift
            b.total_weight = 0.0;
        }

        self.free.push(handle.slot);
        self.len -= 1;
        Some(entry.item)
    }

    /// Draw a handle with probability proportional to item weight.
    ///
    /// Bucket selection is weighted by aggregate bucket weight; the
    /// pick inside a bucket is uniform, which is near-proportional
    /// because weights within one bucket differ by less than 2x.
    /// Returns `None` on an empty bin.
    pub fn random(&self, rng: &mut Rng64) -> Option<BinHandle> {
        if self.len == 0 {
            return None;
        }

        let total = self.total_weight();
        let mut r = rng.next_f32() as f64 * total;

        let mut chosen = None;
        for bucket in &self.buckets {
            if bucket.slots.is_empty() {
                continue;
            }
            // Remember the last non-empty bucket in case rounding
            // pushes r past the final aggregate
            chosen = Some(bucket);
            if r < bucket.total_weight {
                break;
            }
            r -= bucket.total_weight;
        }

        let bucket = chosen?;
        let slot = bucket.slots[rng.next_index(bucket.slots.len())];
        Some(BinHandle {
            slot,
            generation: self.slots[slot as usize].generation,
        })
    }
}
