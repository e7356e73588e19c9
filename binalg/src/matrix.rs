use crate::bitwise::{words_for, Word, WORD_BITS};
use crate::vec::{BitView, BitViewMut};
use rand::Rng;

/// A row-major matrix of bits over GF(2).
///
/// Each row occupies a whole number of words, so row operations (swap, XOR)
/// are straight word loops and a row can be viewed as a [`BitView`] without
/// copying. Bits in the padding of a row are kept zero.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    words: Vec<Word>,
    row_words: usize,
    row_count: usize,
    column_count: usize,
}

impl BitMatrix {
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        let row_words = words_for(column_count);
        BitMatrix {
            words: vec![0; row_count * row_words],
            row_words,
            row_count,
            column_count,
        }
    }

    pub fn random_with_rng<R: Rng>(row_count: usize, column_count: usize, rng: &mut R) -> Self {
        let mut matrix = Self::zeros(row_count, column_count);
        rng.fill(matrix.words.as_mut_slice());
        let tail = column_count % WORD_BITS;
        if tail != 0 {
            let mask = (1 << tail) - 1;
            for row in 0..row_count {
                *matrix.row_words_mut(row).last_mut().unwrap() &= mask;
            }
        }
        matrix
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn row_words(&self, index: usize) -> &[Word] {
        &self.words[index * self.row_words..(index + 1) * self.row_words]
    }

    #[must_use]
    pub fn row_words_mut(&mut self, index: usize) -> &mut [Word] {
        &mut self.words[index * self.row_words..(index + 1) * self.row_words]
    }

    /// Word slices of two distinct rows, for in-place row combination.
    ///
    /// # Panics
    ///
    /// Panics if `first == second`.
    pub fn rows_mut_pair(&mut self, first: usize, second: usize) -> (&mut [Word], &mut [Word]) {
        assert_ne!(first, second);
        let stride = self.row_words;
        let (low, high) = (first.min(second), first.max(second));
        let (head, tail) = self.words.split_at_mut(high * stride);
        let low_row = &mut head[low * stride..(low + 1) * stride];
        let high_row = &mut tail[..stride];
        if first < second {
            (low_row, high_row)
        } else {
            (high_row, low_row)
        }
    }

    pub fn row(&self, index: usize) -> BitView<'_> {
        BitView::from_words(self.row_words(index), self.column_count)
    }

    pub fn row_mut(&mut self, index: usize) -> BitViewMut<'_> {
        let columns = self.column_count;
        BitViewMut::from_words(self.row_words_mut(index), columns)
    }

    pub fn swap_rows(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }
        let (a, b) = self.rows_mut_pair(first, second);
        a.swap_with_slice(b);
    }

    pub fn xor_row_into(&mut self, target: usize, source: usize) {
        let (target_words, source_words) = self.rows_mut_pair(target, source);
        for (to, from) in target_words.iter_mut().zip(source_words) {
            *to ^= *from;
        }
    }

    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn get(&self, index: (usize, usize)) -> bool {
        assert!(index.1 < self.column_count);
        self.row_words(index.0)[index.1 / WORD_BITS] >> (index.1 % WORD_BITS) & 1 != 0
    }

    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn set(&mut self, index: (usize, usize), to: bool) {
        assert!(index.1 < self.column_count);
        let word = &mut self.row_words_mut(index.0)[index.1 / WORD_BITS];
        let mask = 1 << (index.1 % WORD_BITS);
        if to {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }
}
