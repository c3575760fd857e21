//! Bitmap free list over the slots of a backing vector.

const WORD_BITS: usize = u64::BITS as usize;

#[inline]
fn decompose(index: usize) -> (usize, usize) {
    (index / WORD_BITS, index % WORD_BITS)
}

#[inline]
fn compose(word: usize, offset: usize) -> usize {
    word * WORD_BITS + offset
}

/// Tracks which indices of a vector are occupied.
///
/// Bit `n` of the bitmap is set iff index `n` is occupied. `next_free` always
/// points at the smallest vacant index, which is what
/// [`occupy_next_available`](Self::occupy_next_available) hands out.
#[derive(Debug, Clone, Default)]
pub struct IndexFreeList {
    next_free: usize,
    occupied: Vec<u64>,
}

impl IndexFreeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest vacant index at or after `word`; every index before `word`
    /// must already be occupied.
    fn search_next_free(&self, mut word: usize) -> usize {
        while word < self.occupied.len() {
            let offset = self.occupied[word].trailing_ones() as usize;
            if offset < WORD_BITS {
                return compose(word, offset);
            }
            word += 1;
        }
        compose(self.occupied.len(), 0)
    }

    /// Occupies and returns the smallest vacant index.
    pub fn occupy_next_available(&mut self) -> usize {
        let index = self.next_free;
        let (word, offset) = decompose(index);
        if word >= self.occupied.len() {
            self.occupied.resize(word + 1, 0);
        }

        self.occupied[word] |= 1 << offset;
        self.next_free = self.search_next_free(word);
        index
    }

    /// Occupies a specific index. Used when seeding entries at fixed ids.
    pub fn occupy(&mut self, index: usize) {
        let (word, offset) = decompose(index);
        if word >= self.occupied.len() {
            self.occupied.resize(word + 1, 0);
        }

        self.occupied[word] |= 1 << offset;
        if index == self.next_free {
            self.next_free = self.search_next_free(word);
        }
    }

    /// Marks every index in `[0, until)` occupied.
    pub fn occupy_until(&mut self, until: usize) {
        let (word, offset) = decompose(until);
        if word >= self.occupied.len() {
            self.occupied.resize(word + 1, 0);
        }

        self.occupied[..word].fill(u64::MAX);
        self.occupied[word] |= (1u64 << offset) - 1;
        self.next_free = self.search_next_free(word);
    }

    /// Returns `index` to the pool.
    pub fn vacate(&mut self, index: usize) {
        let (word, offset) = decompose(index);
        if let Some(bits) = self.occupied.get_mut(word) {
            *bits &= !(1u64 << offset);
        }

        if index < self.next_free {
            self.next_free = index;
        }
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        let (word, offset) = decompose(index);
        self.occupied
            .get(word)
            .is_some_and(|bits| bits & (1 << offset) != 0)
    }

    /// Drops trailing all-vacant words.
    pub fn shrink_to_fit(&mut self) {
        let used = self
            .occupied
            .iter()
            .rposition(|bits| *bits != 0)
            .map_or(0, |last| last + 1);
        self.occupied.truncate(used);
        self.occupied.shrink_to_fit();
    }
}
