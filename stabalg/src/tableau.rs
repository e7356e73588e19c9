use binalg::{words_for, BitMatrix, BitView, BitViewMut, WORD_BITS};
use paulialg::{anti_commutes_with, product_phase_exponent, DensePauli, Pauli, PauliMut, PauliUnitary, PauliView, PauliViewMut};
use std::fmt::{Debug, Display};

/// An ordered sequence of Pauli rows on a fixed qubit count.
///
/// Rows are stored in a single bit matrix whose rows hold the X words
/// followed by the Z words (two word-aligned column blocks), so row
/// combination is a straight word loop over both blocks at once. Phase
/// exponents live in a separate byte column.
///
/// Row order carries meaning for the algorithms layered on top: the
/// canonical forms, the destabilizer pairing, and the block partitions of
/// the mixed tableaux are all positional.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct Tableau {
    xzs: BitMatrix,
    phases: Vec<u8>,
    qubit_count: usize,
}

impl Tableau {
    pub fn zeros(row_count: usize, qubit_count: usize) -> Tableau {
        let half_words = words_for(qubit_count);
        Tableau {
            xzs: BitMatrix::zeros(row_count, 2 * half_words * WORD_BITS),
            phases: vec![0; row_count],
            qubit_count,
        }
    }

    /// # Panics
    ///
    /// Panics if the rows disagree on qubit count.
    pub fn from_rows(rows: &[DensePauli]) -> Tableau {
        let qubit_count = rows.first().map_or(0, Pauli::qubit_count);
        let mut tableau = Tableau::zeros(rows.len(), qubit_count);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row.qubit_count(), qubit_count);
            tableau.set_row(index, row);
        }
        tableau
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    fn half_words(&self) -> usize {
        words_for(self.qubit_count)
    }

    pub fn row(&self, index: usize) -> PauliView<'_> {
        let (x_words, z_words) = self.xzs.row_words(index).split_at(self.half_words());
        PauliUnitary::from_parts(
            BitView::from_words(x_words, self.qubit_count),
            BitView::from_words(z_words, self.qubit_count),
            &self.phases[index],
        )
    }

    pub fn row_mut(&mut self, index: usize) -> PauliViewMut<'_> {
        let half_words = self.half_words();
        let qubit_count = self.qubit_count;
        let (x_words, z_words) = self.xzs.row_words_mut(index).split_at_mut(half_words);
        PauliUnitary::from_parts(
            BitViewMut::from_words(x_words, qubit_count),
            BitViewMut::from_words(z_words, qubit_count),
            &mut self.phases[index],
        )
    }

    pub fn set_row(&mut self, index: usize, pauli: &impl Pauli) {
        debug_assert_eq!(pauli.qubit_count(), self.qubit_count);
        self.row_mut(index).assign(pauli);
    }

    pub fn zero_row(&mut self, index: usize) {
        self.row_mut(index).set_identity();
    }

    pub fn copy_row(&mut self, source: usize, target: usize) {
        if source == target {
            return;
        }
        let (target_words, source_words) = self.xzs.rows_mut_pair(target, source);
        target_words.copy_from_slice(source_words);
        self.phases[target] = self.phases[source];
    }

    pub fn swap_rows(&mut self, first: usize, second: usize, phases: bool) {
        if first == second {
            return;
        }
        self.xzs.swap_rows(first, second);
        if phases {
            self.phases.swap(first, second);
        }
    }

    /// Row `target` ← row `source` · row `target`.
    ///
    /// With `phases` off only the bits are XORed, as for rows whose phase
    /// column is not physical.
    ///
    /// # Panics
    ///
    /// Panics if `target == source`.
    pub fn mul_left(&mut self, target: usize, source: usize, phases: bool) {
        assert_ne!(target, source);
        if phases {
            let extra = product_phase_exponent(&self.row(source), &self.row(target));
            let addend = self.phases[source].wrapping_add(extra);
            self.phases[target] = self.phases[target].wrapping_add(addend) % 4;
        }
        self.xzs.xor_row_into(target, source);
    }

    /// `pauli` ← row `source` · `pauli`.
    pub fn mul_row_into<P: PauliMut>(&self, source: usize, pauli: &mut P, phases: bool) {
        if phases {
            pauli.mul_assign_left(&self.row(source));
        } else {
            pauli.xor_assign_bits(&self.row(source));
        }
    }

    /// 1 iff `pauli` and row `index` anticommute.
    #[must_use]
    pub fn anticommutes_with(&self, index: usize, pauli: &impl Pauli) -> bool {
        anti_commutes_with(&self.row(index), pauli)
    }

    #[inline]
    #[must_use]
    pub fn x_bit(&self, row: usize, qubit: usize) -> bool {
        self.xzs.get((row, qubit))
    }

    #[inline]
    #[must_use]
    pub fn z_bit(&self, row: usize, qubit: usize) -> bool {
        self.xzs.get((row, self.half_words() * WORD_BITS + qubit))
    }

    #[must_use]
    pub fn phase(&self, row: usize) -> u8 {
        self.phases[row]
    }

    pub fn set_phase(&mut self, row: usize, value: u8) {
        self.phases[row] = value % 4;
    }
}

impl Display for Tableau {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for index in 0..self.row_count() {
            if index > 0 {
                writeln!(formatter)?;
            }
            write!(formatter, "{:+}", self.row(index))?;
        }
        Ok(())
    }
}

impl Debug for Tableau {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, formatter)
    }
}
