use num::{FromPrimitive, ToPrimitive};

use crate::graph::{Node, Weight};

/// Trait for all possible types that can be used as a key for a RadixHeap
pub trait RadixKey: Copy + Default + PartialOrd {
    /// Number of bits of Self
    const NUM_BITS: usize;

    /// Difference to another instance of Self
    fn radix_similarity(&self, other: &Self) -> usize;

    /// Inverted radix_similarity (=> how far away is other from self)
    fn radix_distance(&self, other: &Self) -> usize {
        Self::NUM_BITS - self.radix_similarity(other)
    }
}

// Only valid for non-negative floats: their bit patterns are ordered like their values.
macro_rules! radix_key_impl_float {
    ($($t:ty),*) => {
        $(
            impl RadixKey for $t {
                const NUM_BITS: usize = (std::mem::size_of::<$t>() * 8);

                fn radix_similarity(&self, other: &Self) -> usize {
                    (self.to_bits() ^ other.to_bits()).leading_zeros() as usize
                }
            }
        )*
    };
}

radix_key_impl_float!(f32, f64);

/// Marker trait for types that can be used as values in IndexedRadixHeap (=> have to be usable for
/// indexing)
pub trait RadixValue: FromPrimitive + ToPrimitive + Default + Copy {}
impl<T: FromPrimitive + ToPrimitive + Default + Copy> RadixValue for T {}

/// Stores all key-value-pairs of the same similarity
type Bucket<K, V> = Vec<(K, V)>;

/// # IndexedRadixHeap: A monotone Radix-MinHeap
///
/// Allows fast insertions/deletions/queries into elements sorted by associated RadixKey-type.
/// Elements have to be convertible to a usize smaller than a given value to allow for fast
/// existence queries. Keys pushed must not be smaller than the last key popped.
///
/// ### IMPORTANT
/// NUM_BUCKETS must be equal to K::NUM_BITS + 1
#[derive(Debug)]
pub struct IndexedRadixHeap<K: RadixKey, V: RadixValue, const NUM_BUCKETS: usize> {
    /// Number of elements in the heap
    len: usize,
    /// Current top element (last element removed)
    top: K,
    /// All buckets
    buckets: [Bucket<K, V>; NUM_BUCKETS],
    /// A pointer for each element to where it is in the heap
    pointer: Vec<(u8, V)>,
}

/// A heap with node ids as values, keyed by tentative distances (Dijkstra)
pub type DistanceHeap = IndexedRadixHeap<Weight, Node, 65>;

impl<K: RadixKey, V: RadixValue, const NUM_BUCKETS: usize> IndexedRadixHeap<K, V, NUM_BUCKETS> {
    /// Creates a new heap with a given top element and a maximum number of elements
    pub fn new(n: usize, top: K) -> Self {
        Self {
            len: 0,
            top,
            buckets: array_init::array_init(|_| Vec::new()),
            pointer: vec![(u8::MAX, V::default()); n],
        }
    }

    /// Pushes an element on the heap; no-op if the element is already contained
    pub fn push(&mut self, key: K, value: V) {
        if self.contains(value) {
            return;
        }

        let bucket = key.radix_distance(&self.top);
        self.buckets[bucket].push((key, value));
        self.pointer[Self::index(value)] = (
            bucket as u8,
            Self::position(self.buckets[bucket].len() - 1),
        );
        self.len += 1;
    }

    /// Returns true if the element is currently stored in the heap
    pub fn contains(&self, value: V) -> bool {
        self.pointer
            .get(Self::index(value))
            .is_some_and(|&(bucket, _)| bucket != u8::MAX)
    }

    /// Replaces the key of an element (or inserts it)
    pub fn push_or_update(&mut self, key: K, value: V) {
        self.remove(value);
        self.push(key, value);
    }

    /// Removes a specific element from the heap
    pub fn remove(&mut self, value: V) -> Option<K> {
        let value = Self::index(value);
        if value >= self.pointer.len() {
            return None;
        }

        let (bucket, position) = self.pointer[value];
        if bucket == u8::MAX {
            return None;
        }

        let bucket = bucket as usize;
        let pos_usize = Self::index(position);

        let res = self.buckets[bucket].swap_remove(pos_usize);
        if self.buckets[bucket].len() > pos_usize {
            self.pointer[Self::index(self.buckets[bucket][pos_usize].1)].1 = position;
        }
        self.len -= 1;

        self.pointer[value].0 = u8::MAX;

        Some(res.0)
    }

    /// Updates the heap to find the new smallest element and re-order buckets accordingly
    fn update(&mut self) {
        let (buckets, repush) = match self.buckets.iter().position(|bucket| !bucket.is_empty()) {
            None | Some(0) => return,
            Some(index) => {
                let (buckets, rest) = self.buckets.split_at_mut(index);
                (buckets, &mut rest[0])
            }
        };

        self.top = repush
            .iter()
            .map(|&(k, _)| k)
            .fold(None, |min: Option<K>, k| match min {
                Some(m) if m <= k => Some(m),
                _ => Some(k),
            })
            .unwrap_or_default();

        for (key, value) in repush.drain(..) {
            let bucket = key.radix_distance(&self.top);
            buckets[bucket].push((key, value));
            self.pointer[Self::index(value)] =
                (bucket as u8, Self::position(buckets[bucket].len() - 1));
        }
    }

    /// Pops the smallest element from the heap
    pub fn pop(&mut self) -> Option<(K, V)> {
        let res = self.buckets[0].pop().or_else(|| {
            self.update();
            self.buckets[0].pop()
        });

        if let Some((key, val)) = res {
            self.len -= 1;
            self.pointer[Self::index(val)].0 = u8::MAX;

            Some((key, val))
        } else {
            None
        }
    }

    /// Length of the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the heap empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn index(value: V) -> usize {
        value.to_usize().unwrap_or(usize::MAX)
    }

    #[inline]
    fn position(pos: usize) -> V {
        V::from_usize(pos).unwrap_or_default()
    }
}
