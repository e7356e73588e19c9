use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::SortedIterator;

pub type Word = u64;
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of words needed to hold `bit_count` bits.
#[must_use]
pub const fn words_for(bit_count: usize) -> usize {
    bit_count.div_ceil(WORD_BITS)
}

/// Read-only operations over word-packed bits.
///
/// Implementors expose their storage through [`Bitwise::words`] and their
/// logical length through [`Bitwise::bit_len`]; everything else has a
/// word-level default. Bits past `bit_len` must be zero.
///
/// See also [`BitwiseMut`], [`BitwisePair`], and [`BitwisePairMut`].
pub trait Bitwise {
    fn words(&self) -> &[Word];
    fn bit_len(&self) -> usize;

    #[inline]
    fn index(&self, index: usize) -> bool {
        self.words()[index / WORD_BITS] >> (index % WORD_BITS) & 1 != 0
    }

    fn support(&self) -> impl SortedIterator<Item = usize> + '_ {
        SupportIter::over(self.words()).assume_sorted_by_item()
    }

    #[inline]
    fn min_support(&self) -> Option<usize> {
        self.find_next_one(0)
    }

    fn max_support(&self) -> Option<usize> {
        for (index, &word) in self.words().iter().enumerate().rev() {
            if word != 0 {
                return Some(index * WORD_BITS + WORD_BITS - 1 - word.leading_zeros() as usize);
            }
        }
        None
    }

    #[inline]
    fn weight(&self) -> usize {
        self.words().iter().map(|word| word.count_ones() as usize).sum()
    }

    #[inline]
    fn parity(&self) -> bool {
        self.words().iter().fold(0, |acc, word| acc ^ word).count_ones() % 2 == 1
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.words().iter().all(|&word| word == 0)
    }

    /// Index of the lowest set bit at position `start` or later.
    ///
    /// This is the hot search primitive of the tableau algorithms; it scans a
    /// word at a time and finishes with count-trailing-zeros.
    fn find_next_one(&self, start: usize) -> Option<usize> {
        let words = self.words();
        if start >= self.bit_len() {
            return None;
        }
        let mut word_index = start / WORD_BITS;
        let mut current = words[word_index] & (Word::MAX << (start % WORD_BITS));
        loop {
            if current != 0 {
                let found = word_index * WORD_BITS + current.trailing_zeros() as usize;
                return (found < self.bit_len()).then_some(found);
            }
            word_index += 1;
            if word_index == words.len() {
                return None;
            }
            current = words[word_index];
        }
    }
}

/// Mutable counterpart of [`Bitwise`].
pub trait BitwiseMut: Bitwise {
    fn words_mut(&mut self) -> &mut [Word];

    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        let word = &mut self.words_mut()[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        if to {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        self.words_mut()[index / WORD_BITS] ^= 1 << (index % WORD_BITS);
    }

    #[inline]
    fn clear_bits(&mut self) {
        self.words_mut().fill(0);
    }

    fn assign_random(&mut self, bit_count: usize, random_number_generator: &mut impl rand::Rng) {
        for index in 0..bit_count {
            self.assign_index(index, random_number_generator.gen());
        }
    }
}

/// Binary read-only operations between two bit containers.
///
/// See also [`Bitwise`], [`BitwiseMut`], and [`BitwisePairMut`].
pub trait BitwisePair<Other: ?Sized = Self> {
    /// Inner product over GF(2): parity of the AND of the two operands.
    fn dot(&self, other: &Other) -> bool;
    fn and_weight(&self, other: &Other) -> usize;
    fn or_weight(&self, other: &Other) -> usize;
}

impl<Left: Bitwise + ?Sized, Right: Bitwise + ?Sized> BitwisePair<Right> for Left {
    #[inline]
    fn dot(&self, other: &Right) -> bool {
        let total: usize = self
            .words()
            .iter()
            .zip(other.words())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum();
        total % 2 == 1
    }

    #[inline]
    fn and_weight(&self, other: &Right) -> usize {
        self.words()
            .iter()
            .zip(other.words())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    #[inline]
    fn or_weight(&self, other: &Right) -> usize {
        self.words()
            .iter()
            .zip(other.words())
            .map(|(a, b)| (a | b).count_ones() as usize)
            .sum()
    }
}

/// Binary in-place operations between two bit containers.
pub trait BitwisePairMut<Other: ?Sized = Self>: BitwiseMut {
    fn assign(&mut self, other: &Other);
    fn bitxor_assign(&mut self, other: &Other);
    fn bitand_assign(&mut self, other: &Other);
    fn bitor_assign(&mut self, other: &Other);
}

impl<Left: BitwiseMut + ?Sized, Right: Bitwise + ?Sized> BitwisePairMut<Right> for Left {
    #[inline]
    fn assign(&mut self, other: &Right) {
        for (to, from) in self.words_mut().iter_mut().zip(other.words()) {
            *to = *from;
        }
    }

    #[inline]
    fn bitxor_assign(&mut self, other: &Right) {
        for (to, from) in self.words_mut().iter_mut().zip(other.words()) {
            *to ^= *from;
        }
    }

    #[inline]
    fn bitand_assign(&mut self, other: &Right) {
        for (to, from) in self.words_mut().iter_mut().zip(other.words()) {
            *to &= *from;
        }
    }

    #[inline]
    fn bitor_assign(&mut self, other: &Right) {
        for (to, from) in self.words_mut().iter_mut().zip(other.words()) {
            *to |= *from;
        }
    }
}

/// Equality of logical bit content across container types.
#[must_use]
pub fn eq_bits<Left: Bitwise + ?Sized, Right: Bitwise + ?Sized>(left: &Left, right: &Right) -> bool {
    left.bit_len() == right.bit_len() && left.words().iter().zip(right.words()).all(|(a, b)| a == b)
}

impl Bitwise for [Word] {
    #[inline]
    fn words(&self) -> &[Word] {
        self
    }

    #[inline]
    fn bit_len(&self) -> usize {
        self.len() * WORD_BITS
    }
}

impl BitwiseMut for [Word] {
    #[inline]
    fn words_mut(&mut self) -> &mut [Word] {
        self
    }
}

pub struct SupportIter<'life> {
    words: &'life [Word],
    word_index: usize,
    current: Word,
}

impl<'life> SupportIter<'life> {
    fn over(words: &'life [Word]) -> Self {
        SupportIter {
            words,
            word_index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for SupportIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_index += 1;
            if self.word_index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_index];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.word_index * WORD_BITS + bit)
    }
}
