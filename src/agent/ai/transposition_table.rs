use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default total number of entries across all shards
pub const DEFAULT_CAPACITY: usize = 1_000_000;

const DEFAULT_SHARDS: usize = 16;

/// Entry in the transposition table
///
/// Entries are advisory: a probe only trusts an entry produced at least as
/// deep as the caller needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranspositionEntry {
    /// Evaluation, White-positive
    pub score: f64,
    /// Search depth the score was produced at
    pub depth: u32,
}

struct Shard {
    table: HashMap<u64, TranspositionEntry>,
    /// Insertion order, oldest first
    order: VecDeque<u64>,
}

impl Shard {
    fn new() -> Self {
        Self {
            table: HashMap::new(),
            order: VecDeque::new(),
        }
    }
}

/// Transposition Table for storing previously evaluated positions
///
/// Keys are whatever stable identity the position adapter provides
/// (Zobrist hashes for chess). The table is split into lock-protected
/// shards so searches on several threads can share one table behind an
/// `Arc`. Each shard holds at most `capacity / shards` entries and evicts
/// its oldest key first when full.
pub struct TranspositionTable {
    shards: Vec<Mutex<Shard>>,
    shard_capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranspositionTable {
    /// Create a transposition table with default size (1 million entries)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new transposition table holding at most `max_size` entries
    pub fn with_capacity(max_size: usize) -> Self {
        let shards = DEFAULT_SHARDS.min(max_size.max(1));
        Self::with_shards(max_size, shards)
    }

    /// Create a table with an explicit shard count. Capacity is split evenly
    /// and rounded down, but every shard keeps room for one entry.
    pub fn with_shards(max_size: usize, shards: usize) -> Self {
        let shards = shards.max(1);
        Self {
            shards: (0..shards).map(|_| Mutex::new(Shard::new())).collect(),
            shard_capacity: (max_size / shards).max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn shard(&self, key: u64) -> &Mutex<Shard> {
        // Mix the high bits in; low bits of some keys are poorly distributed
        let idx = (key ^ (key >> 32)) as usize % self.shards.len();
        &self.shards[idx]
    }

    /// Look up `key`, accepting only entries searched at least
    /// `required_depth` deep. Updates hit/miss statistics.
    pub fn probe(&self, key: u64, required_depth: u32) -> Option<f64> {
        let found = self
            .shard(key)
            .lock()
            .table
            .get(&key)
            .filter(|entry| entry.depth >= required_depth)
            .map(|entry| entry.score);

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Raw entry for `key`, without touching the statistics
    pub fn get(&self, key: u64) -> Option<TranspositionEntry> {
        self.shard(key).lock().table.get(&key).copied()
    }

    /// Store an entry in the transposition table
    ///
    /// An existing entry of greater depth is kept. Equal or shallower
    /// entries are overwritten in place. A new key in a full shard evicts
    /// that shard's oldest key.
    pub fn store(&self, key: u64, score: f64, depth: u32) {
        let mut shard = self.shard(key).lock();
        let entry = TranspositionEntry { score, depth };

        if let Some(existing) = shard.table.get_mut(&key) {
            if existing.depth <= depth {
                *existing = entry;
            }
            return;
        }

        while shard.table.len() >= self.shard_capacity {
            match shard.order.pop_front() {
                Some(oldest) => {
                    shard.table.remove(&oldest);
                }
                None => break,
            }
        }

        shard.table.insert(key, entry);
        shard.order.push_back(key);
    }

    /// Clear the transposition table
    pub fn clear(&self) {
        for shard in &self.shards {
            let mut shard = shard.lock();
            shard.table.clear();
            shard.order.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().table.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries the table will hold
    pub fn capacity(&self) -> usize {
        self.shard_capacity * self.shards.len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_store_and_probe() {
        let table = TranspositionTable::with_capacity(100);
        let key = 0x1234567890ABCDEF;

        table.store(key, 100.0, 5);

        assert_eq!(table.probe(key, 5), Some(100.0));
        assert_eq!(table.probe(key, 3), Some(100.0));
        assert_eq!(table.get(key), Some(TranspositionEntry { score: 100.0, depth: 5 }));
    }

    #[test]
    fn test_shallow_entry_is_a_miss() {
        let table = TranspositionTable::with_capacity(100);
        table.store(42, 10.0, 2);

        assert_eq!(table.probe(42, 4), None);
        assert_eq!(table.misses(), 1);
        assert_eq!(table.hits(), 0);
    }

    #[test]
    fn test_deeper_entry_replaces_shallow() {
        let table = TranspositionTable::with_capacity(100);
        let key = 0x1234567890ABCDEF;

        table.store(key, 50.0, 3);
        table.store(key, 100.0, 5);

        assert_eq!(table.get(key), Some(TranspositionEntry { score: 100.0, depth: 5 }));
    }

    #[test]
    fn test_shallow_store_keeps_deep_entry() {
        let table = TranspositionTable::with_capacity(100);

        table.store(7, 100.0, 6);
        table.store(7, -30.0, 2);

        assert_eq!(table.get(7), Some(TranspositionEntry { score: 100.0, depth: 6 }));
    }

    #[test]
    fn test_equal_depth_overwrites() {
        let table = TranspositionTable::with_capacity(100);

        table.store(7, 100.0, 4);
        table.store(7, 80.0, 4);

        assert_eq!(table.probe(7, 4), Some(80.0));
    }

    #[test]
    fn test_fifo_eviction_is_bounded() {
        let table = TranspositionTable::with_shards(4, 1);

        for key in 0..10u64 {
            table.store(key, key as f64, 1);
        }

        assert_eq!(table.len(), 4);
        // Oldest keys went first
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(5), None);
        for key in 6..10u64 {
            assert_eq!(table.probe(key, 1), Some(key as f64));
        }
    }

    #[test]
    fn test_overwrite_does_not_grow_table() {
        let table = TranspositionTable::with_shards(2, 1);

        table.store(1, 1.0, 1);
        table.store(2, 2.0, 1);
        table.store(1, 3.0, 2);

        assert_eq!(table.len(), 2);
        assert_eq!(table.probe(1, 2), Some(3.0));
        assert_eq!(table.probe(2, 1), Some(2.0));
    }

    #[test]
    fn test_clear() {
        let table = TranspositionTable::with_capacity(100);

        table.store(123, 100.0, 5);
        table.probe(123, 0);
        assert_eq!(table.len(), 1);

        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.hits(), 0);
        assert_eq!(table.misses(), 0);
    }

    #[test]
    fn test_hit_rate() {
        let table = TranspositionTable::with_capacity(100);
        assert_eq!(table.hit_rate(), 0.0);

        table.store(123, 100.0, 5);

        // One hit
        table.probe(123, 5);
        // One miss
        table.probe(456, 0);

        assert_eq!(table.hit_rate(), 0.5);
    }

    #[test]
    fn test_shared_between_threads() {
        let table = Arc::new(TranspositionTable::with_capacity(10_000));

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for i in 0..500u64 {
                        table.store(t * 1000 + i, i as f64, 1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 2000);
        assert_eq!(table.probe(3499, 1), Some(499.0));
    }
}
