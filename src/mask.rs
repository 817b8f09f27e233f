//! Fixed-width component bitmask.
//! One bit per registered component type; doubles as the view-cache key.

use std::fmt;

/// Maximum number of distinct component types a world can register.
pub const MAX_COMPONENT_TYPES: usize = 128;

const MASK_WORDS: usize = MAX_COMPONENT_TYPES / 64;

/// Set of component type bits attached to an entity, or requested by a view.
///
/// Fixed width so it stays `Copy` and hashes cheaply as a cache key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentMask {
    words: [u64; MASK_WORDS],
}

impl ComponentMask {
    /// Mask with no bits set.
    pub const EMPTY: Self = Self {
        words: [0; MASK_WORDS],
    };

    /// Set the bit at `index`.
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < MAX_COMPONENT_TYPES, "component bit out of range");
        self.words[index / 64] |= 1 << (index % 64);
    }

    /// Clear the bit at `index`.
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < MAX_COMPONENT_TYPES, "component bit out of range");
        self.words[index / 64] &= !(1 << (index % 64));
    }

    /// Check if the bit at `index` is set.
    pub fn get(&self, index: usize) -> bool {
        if index >= MAX_COMPONENT_TYPES {
            return false;
        }
        (self.words[index / 64] & (1 << (index % 64))) != 0
    }

    /// True if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// True if every bit set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        for i in 0..MASK_WORDS {
            if (self.words[i] & other.words[i]) != self.words[i] {
                return false;
            }
        }
        true
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns iterator over indices of set bits
    pub fn ones(&self) -> OnesIter {
        OnesIter {
            mask: self,
            word_idx: 0,
            current_word: self.words[0],
        }
    }
}

pub struct OnesIter<'a> {
    mask: &'a ComponentMask,
    word_idx: usize,
    current_word: u64,
}

impl<'a> Iterator for OnesIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let trailing = self.current_word.trailing_zeros();
                self.current_word &= !(1 << trailing); // Clear the bit we just found
                return Some(self.word_idx * 64 + trailing as usize);
            }

            self.word_idx += 1;
            if self.word_idx >= MASK_WORDS {
                return None;
            }
            self.current_word = self.mask.words[self.word_idx];
        }
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}
