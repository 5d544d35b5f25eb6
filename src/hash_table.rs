use std::mem;

use log::{debug, trace, warn};

use crate::{
    Entry, TableError, entry,
    prime::{is_prime, next_prime},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Slot {
    #[default]
    Empty,
    /// Tombstone left by `remove`, keeps probe chains walkable
    Deleted,
    Occupied(Entry),
}

impl Slot {
    fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    fn into_entry(self) -> Option<Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Open addressed table of domain -> address entries.
///
/// Collisions are resolved with quadratic probing (`home + j²`) and the
/// capacity is always prime, which is what lets the probe sequence reach a free
/// slot as long as less than half of the slots are taken.
#[derive(Debug)]
pub struct HashTable {
    slots: Vec<Slot>,
    items: usize,
    tombstones: usize,
}

#[derive(Debug)]
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    pub const INITIAL_CAPACITY: usize = 13;
    pub const HASH_BASE: i64 = 31;
    pub const HASH_MODULUS: i64 = 1_000_000_007;

    /// Creates a new, empty table with `INITIAL_CAPACITY` slots
    pub fn new() -> Self {
        Self::with_slots(Self::INITIAL_CAPACITY)
    }

    /// Creates a new table with at least `min` slots,
    /// rounded up to the next prime (but never less than 3)
    pub fn with_capacity(min: usize) -> Self {
        let min = min.max(3);
        if is_prime(min) {
            Self::with_slots(min)
        } else {
            Self::with_slots(next_prime(min))
        }
    }

    fn with_slots(cap: usize) -> Self {
        Self {
            slots: (0..cap).map(|_| Slot::Empty).collect(),
            items: 0,
            tombstones: 0,
        }
    }

    /// Returns the number of entries in the table
    pub fn len(&self) -> usize {
        self.items
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.items as f32 / self.capacity() as f32
    }

    /// Polynomial rolling hash with base 31 modulo 1e9+7.
    ///
    /// Every byte contributes `(byte - 'a' + 1) * 31^i`. Bytes are treated as
    /// signed and the running value is kept in 32 bits, so anything that is not
    /// a lowercase letter pulls the sum negative and wraps around. Existing
    /// hashes depend on that, so it stays.
    pub fn hash(key: &str) -> u32 {
        let mut hash: u32 = 0;
        let mut p_pow: i64 = 1;

        for &byte in key.as_bytes() {
            let term = (byte as i8 as i64 - b'a' as i64 + 1) * p_pow;
            hash = ((hash as i64 + term) % Self::HASH_MODULUS) as u32;
            p_pow = (p_pow * Self::HASH_BASE) % Self::HASH_MODULUS;
        }

        hash
    }

    /// Getter for `HashTable::hash`
    pub fn get_hash(&self, key: &str) -> u32 {
        Self::hash(key)
    }

    /// Shorthand for `self.insert_entry(entry!(key, value))`
    pub fn insert(&mut self, key: &str, value: &str) -> Result<usize, TableError> {
        self.insert_entry(entry!(key, value))
    }

    /// Inserts an entry, growing the table first if the insert would push the
    /// load factor to 0.5 or above. Returns the index of the slot it landed in.
    ///
    /// Keys are not deduplicated, inserting a key twice stores both entries.
    pub fn insert_entry(&mut self, entry: Entry) -> Result<usize, TableError> {
        if self.needs_grow() {
            self.grow()?;
        }
        self.place(entry)
    }

    /// Returns the value of the first entry with `key` along its probe sequence
    pub fn find(&self, key: &str) -> Option<&str> {
        let idx = self.locate(key, |e| e.key == key)?;
        self.slots[idx].entry().map(|e| e.value.as_str())
    }

    /// Returns every value stored under `key`, in probe order
    pub fn find_all(&self, key: &str) -> Vec<&str> {
        let mut values = Vec::new();
        for idx in probe_seq(Self::hash(key), self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => break,
                Slot::Occupied(entry) if entry.key == key => values.push(entry.value.as_str()),
                _ => {}
            }
        }
        values
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry matching both `key` and `value`,
    /// leaving a tombstone in its slot
    pub fn remove(&mut self, key: &str, value: &str) -> Option<Entry> {
        let idx = self.locate(key, |e| e.key == key && e.value == value)?;

        let removed = mem::replace(&mut self.slots[idx], Slot::Deleted).into_entry()?;
        self.items -= 1;
        self.tombstones += 1;
        trace!("removed {:?} from slot {}", removed.key, idx);

        Some(removed)
    }

    /// Shorthand for `self.remove(&entry.key, &entry.value)`
    pub fn remove_entry(&mut self, entry: &Entry) -> Option<Entry> {
        self.remove(&entry.key, &entry.value)
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    // [private]

    /// Tombstones count as used, otherwise probe chains could fill up with them
    fn needs_grow(&self) -> bool {
        2 * (self.items + self.tombstones + 1) >= self.capacity()
    }

    /// Rebuilds the table, dropping tombstones. Moves to the next prime
    /// capacity only if the live entries alone would reach half the slots.
    /// The new slots are filled before being swapped in.
    fn grow(&mut self) -> Result<(), TableError> {
        let new_cap = if 2 * (self.items + 1) < self.capacity() {
            self.capacity()
        } else {
            next_prime(self.capacity())
        };
        debug!(
            "rehashing table from {} to {} slots ({} items, {} tombstones)",
            self.capacity(),
            new_cap,
            self.items,
            self.tombstones
        );

        let mut grown = Self::with_slots(new_cap);
        for entry in self.iter() {
            grown.place(entry.clone())?;
        }

        *self = grown;
        Ok(())
    }

    /// Writes `entry` into the first free or deleted slot of its probe
    /// sequence without checking the load factor
    fn place(&mut self, entry: Entry) -> Result<usize, TableError> {
        let hash = Self::hash(&entry.key);
        let Some(idx) = probe_seq(hash, self.capacity())
            .find(|&idx| !matches!(self.slots[idx], Slot::Occupied(_)))
        else {
            warn!(
                "probe sequence exhausted for {:?} at capacity {}",
                entry.key,
                self.capacity()
            );
            return Err(TableError::ProbeExhausted {
                key: entry.key,
                capacity: self.capacity(),
            });
        };

        if matches!(self.slots[idx], Slot::Deleted) {
            self.tombstones -= 1;
        }
        trace!(
            "placing {:?} at slot {} (home {})",
            entry.key,
            idx,
            hash as usize % self.capacity()
        );
        self.slots[idx] = Slot::Occupied(entry);
        self.items += 1;

        Ok(idx)
    }

    /// Walks the probe sequence of `key` until `pred` matches an entry
    /// or an empty slot ends the chain
    fn locate<F>(&self, key: &str, mut pred: F) -> Option<usize>
    where
        F: FnMut(&Entry) -> bool,
    {
        for idx in probe_seq(Self::hash(key), self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if pred(entry) => return Some(idx),
                _ => continue,
            }
        }
        None
    }
}

/// Slots visited for `hash` in a table of `cap` slots: `home + j²`.
///
/// For prime `cap` the offsets for `j = 0..=(cap - 1) / 2` are pairwise
/// distinct and every later `j` repeats one of them, so probing stops there.
fn probe_seq(hash: u32, cap: usize) -> impl Iterator<Item = usize> {
    let home = hash as usize % cap;
    (0..cap.div_ceil(2)).map(move |j| (home + (j * j) % cap) % cap)
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::entry)
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
