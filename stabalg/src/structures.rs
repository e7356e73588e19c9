use crate::errors::TableauError;
use crate::tableau::Tableau;
use paulialg::{anti_commutes_with, DensePauli, Pauli, PauliLetter, PauliMut, PauliParseError, PauliView};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A list of pairwise-commuting generators; a state of full rank when there
/// are as many rows as qubits, a code space otherwise.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct Stabilizer {
    pub(crate) tab: Tableau,
}

impl Stabilizer {
    /// # Panics
    ///
    /// Panics if the rows disagree on qubit count.
    pub fn from_rows(rows: &[DensePauli]) -> Stabilizer {
        Stabilizer {
            tab: Tableau::from_rows(rows),
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tab.row_count()
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.tab.qubit_count()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tab
    }

    pub fn row(&self, index: usize) -> PauliView<'_> {
        self.tab.row(index)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = PauliView<'_>> {
        (0..self.row_count()).map(|index| self.tab.row(index))
    }

    /// Every row is hermitian and every pair of rows commutes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        rows_pairwise_commute(&self.tab, 0, self.row_count())
            && (0..self.row_count()).all(|index| self.row(index).is_hermitian())
    }
}

/// A full stabilizer together with its symplectic dual basis, making
/// in-group phase queries O(n²). Rows `0..half` are the destabilizers,
/// rows `half..2·half` the stabilizers.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct Destabilizer {
    pub(crate) tab: Tableau,
}

impl Destabilizer {
    pub fn from_parts(destabilizer: &Stabilizer, stabilizer: &Stabilizer) -> Result<Destabilizer, TableauError> {
        if destabilizer.row_count() != stabilizer.row_count() {
            return Err(TableauError::ShapeMismatch {
                context: "destabilizer rows",
                expected: stabilizer.row_count(),
                actual: destabilizer.row_count(),
            });
        }
        if destabilizer.qubit_count() != stabilizer.qubit_count() {
            return Err(TableauError::ShapeMismatch {
                context: "destabilizer qubits",
                expected: stabilizer.qubit_count(),
                actual: destabilizer.qubit_count(),
            });
        }
        let half = stabilizer.row_count();
        let mut tab = Tableau::zeros(2 * half, stabilizer.qubit_count());
        for index in 0..half {
            tab.set_row(index, &destabilizer.row(index));
            tab.set_row(half + index, &stabilizer.row(index));
        }
        Ok(Destabilizer { tab })
    }

    /// The `|0…0⟩` state: destabilizers `X_i`, stabilizers `Z_i`.
    pub fn zero_state(qubit_count: usize) -> Destabilizer {
        let mut tab = Tableau::zeros(2 * qubit_count, qubit_count);
        for qubit in 0..qubit_count {
            tab.row_mut(qubit).set_letter(qubit, PauliLetter::X);
            tab.row_mut(qubit_count + qubit).set_letter(qubit, PauliLetter::Z);
        }
        Destabilizer { tab }
    }

    /// Number of destabilizer/stabilizer pairs.
    #[must_use]
    pub fn half(&self) -> usize {
        self.tab.row_count() / 2
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.tab.qubit_count()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tab
    }

    pub fn destabilizer_row(&self, index: usize) -> PauliView<'_> {
        self.tab.row(index)
    }

    pub fn stabilizer_row(&self, index: usize) -> PauliView<'_> {
        self.tab.row(self.half() + index)
    }

    /// A copy of the stabilizer block.
    pub fn stabilizer(&self) -> Stabilizer {
        copy_rows(&self.tab, self.half(), self.half())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        let half = self.half();
        rows_pairwise_commute(&self.tab, half, half)
            && rows_pairwise_commute(&self.tab, 0, half)
            && duality_holds(&self.tab, half, half)
            && (0..half).all(|index| self.stabilizer_row(index).is_hermitian())
    }
}

/// A stabilizer with physical capacity for `qubit_count` rows and an
/// explicit rank; rows past the rank are scratch.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct MixedStabilizer {
    pub(crate) tab: Tableau,
    pub(crate) rank: usize,
}

impl MixedStabilizer {
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.tab.qubit_count()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tab
    }

    pub fn row(&self, index: usize) -> PauliView<'_> {
        debug_assert!(index < self.rank);
        self.tab.row(index)
    }

    /// A copy of the active prefix.
    pub fn stabilizer(&self) -> Stabilizer {
        copy_rows(&self.tab, 0, self.rank)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        rows_pairwise_commute(&self.tab, 0, self.rank)
            && (0..self.rank).all(|index| self.row(index).is_hermitian())
    }
}

impl From<Stabilizer> for MixedStabilizer {
    fn from(stabilizer: Stabilizer) -> MixedStabilizer {
        let rank = stabilizer.row_count();
        let qubit_count = stabilizer.qubit_count();
        debug_assert!(rank <= qubit_count);
        let mut tab = Tableau::zeros(qubit_count, qubit_count);
        for index in 0..rank {
            tab.set_row(index, &stabilizer.row(index));
        }
        MixedStabilizer { tab, rank }
    }
}

/// The rank-aware destabilizer tableau. Its 2n rows are partitioned into
/// `[0..rank)` destabilizers, `[rank..n)` logical-X operators,
/// `[n..n+rank)` stabilizers, and `[n+rank..2n)` logical-Z operators.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct MixedDestabilizer {
    pub(crate) tab: Tableau,
    pub(crate) rank: usize,
}

impl MixedDestabilizer {
    pub fn from_blocks(
        destabilizer: &[DensePauli],
        logical_x: &[DensePauli],
        stabilizer: &[DensePauli],
        logical_z: &[DensePauli],
    ) -> Result<MixedDestabilizer, TableauError> {
        let rank = stabilizer.len();
        let qubit_count = rank + logical_x.len();
        if destabilizer.len() != rank {
            return Err(TableauError::ShapeMismatch {
                context: "destabilizer rows",
                expected: rank,
                actual: destabilizer.len(),
            });
        }
        if logical_z.len() != logical_x.len() {
            return Err(TableauError::ShapeMismatch {
                context: "logical-Z rows",
                expected: logical_x.len(),
                actual: logical_z.len(),
            });
        }
        let blocks = [destabilizer, logical_x, stabilizer, logical_z];
        if let Some(row) = blocks.iter().flat_map(|block| block.iter()).find(|row| row.qubit_count() != qubit_count) {
            return Err(TableauError::ShapeMismatch {
                context: "row qubits",
                expected: qubit_count,
                actual: row.qubit_count(),
            });
        }
        let mut tab = Tableau::zeros(2 * qubit_count, qubit_count);
        for (index, row) in blocks.into_iter().flatten().enumerate() {
            tab.set_row(index, row);
        }
        Ok(MixedDestabilizer { tab, rank })
    }

    /// The `|0…0⟩` state on the first `rank` qubits, maximally mixed on the
    /// rest: destabilizers and logical-X `X_i`, stabilizers and logical-Z
    /// `Z_i`.
    ///
    /// # Panics
    ///
    /// Panics if `rank > qubit_count`.
    pub fn zero_state(qubit_count: usize, rank: usize) -> MixedDestabilizer {
        assert!(rank <= qubit_count);
        let mut tab = Tableau::zeros(2 * qubit_count, qubit_count);
        for qubit in 0..qubit_count {
            tab.row_mut(qubit).set_letter(qubit, PauliLetter::X);
            tab.row_mut(qubit_count + qubit).set_letter(qubit, PauliLetter::Z);
        }
        MixedDestabilizer { tab, rank }
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.tab.qubit_count()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tab
    }

    pub fn destabilizer_row(&self, index: usize) -> PauliView<'_> {
        debug_assert!(index < self.rank);
        self.tab.row(index)
    }

    pub fn stabilizer_row(&self, index: usize) -> PauliView<'_> {
        debug_assert!(index < self.rank);
        self.tab.row(self.qubit_count() + index)
    }

    pub fn logical_x_row(&self, index: usize) -> PauliView<'_> {
        self.tab.row(self.rank + index)
    }

    pub fn logical_z_row(&self, index: usize) -> PauliView<'_> {
        self.tab.row(self.qubit_count() + self.rank + index)
    }

    #[must_use]
    pub fn logical_pair_count(&self) -> usize {
        self.qubit_count() - self.rank
    }

    /// A copy of the active stabilizer block.
    pub fn stabilizer(&self) -> Stabilizer {
        copy_rows(&self.tab, self.qubit_count(), self.rank)
    }

    /// A copy of the active destabilizer block.
    pub fn destabilizer(&self) -> Stabilizer {
        copy_rows(&self.tab, 0, self.rank)
    }

    /// Checks all partition invariants: stabilizer commutativity, the
    /// destabilizer duality `{D_i, S_j} = δ_ij`, and the symplectic pairing
    /// of the logical blocks.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.qubit_count();
        let r = self.rank;
        if !rows_pairwise_commute(&self.tab, n, r) || !rows_pairwise_commute(&self.tab, 0, r) {
            return false;
        }
        if !duality_holds(&self.tab, n, r) {
            return false;
        }
        if !(0..r).all(|index| self.stabilizer_row(index).is_hermitian()) {
            return false;
        }
        for j in 0..self.logical_pair_count() {
            for k in 0..self.logical_pair_count() {
                if anti_commutes_with(&self.logical_x_row(j), &self.logical_z_row(k)) != (j == k) {
                    return false;
                }
                if k > j
                    && (anti_commutes_with(&self.logical_x_row(j), &self.logical_x_row(k))
                        || anti_commutes_with(&self.logical_z_row(j), &self.logical_z_row(k)))
                {
                    return false;
                }
            }
            for i in 0..r {
                if anti_commutes_with(&self.logical_x_row(j), &self.stabilizer_row(i))
                    || anti_commutes_with(&self.logical_z_row(j), &self.stabilizer_row(i))
                    || anti_commutes_with(&self.logical_x_row(j), &self.destabilizer_row(i))
                    || anti_commutes_with(&self.logical_z_row(j), &self.destabilizer_row(i))
                {
                    return false;
                }
            }
        }
        true
    }
}

impl TryFrom<Destabilizer> for MixedDestabilizer {
    type Error = TableauError;

    fn try_from(destabilizer: Destabilizer) -> Result<MixedDestabilizer, TableauError> {
        let half = destabilizer.half();
        if half != destabilizer.qubit_count() {
            return Err(TableauError::ShapeMismatch {
                context: "destabilizer pairs",
                expected: destabilizer.qubit_count(),
                actual: half,
            });
        }
        Ok(MixedDestabilizer {
            tab: destabilizer.tab,
            rank: half,
        })
    }
}

fn copy_rows(tab: &Tableau, offset: usize, count: usize) -> Stabilizer {
    let mut copy = Tableau::zeros(count, tab.qubit_count());
    for index in 0..count {
        copy.set_row(index, &tab.row(offset + index));
    }
    Stabilizer { tab: copy }
}

fn rows_pairwise_commute(tab: &Tableau, offset: usize, count: usize) -> bool {
    for i in 0..count {
        for j in i + 1..count {
            if anti_commutes_with(&tab.row(offset + i), &tab.row(offset + j)) {
                return false;
            }
        }
    }
    true
}

fn duality_holds(tab: &Tableau, stabilizer_offset: usize, rank: usize) -> bool {
    for i in 0..rank {
        for j in 0..rank {
            let anticommute = anti_commutes_with(&tab.row(i), &tab.row(stabilizer_offset + j));
            if anticommute != (i == j) {
                return false;
            }
        }
    }
    true
}

impl FromStr for Stabilizer {
    type Err = PauliParseError;

    fn from_str(string: &str) -> Result<Stabilizer, PauliParseError> {
        let rows = string
            .split_whitespace()
            .map(str::parse::<DensePauli>)
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() || rows.iter().any(|row| row.qubit_count() != rows[0].qubit_count()) {
            return Err(PauliParseError);
        }
        Ok(Stabilizer::from_rows(&rows))
    }
}

impl Display for Stabilizer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Tableau as Display>::fmt(&self.tab, formatter)
    }
}

impl Debug for Stabilizer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Tableau as Display>::fmt(&self.tab, formatter)
    }
}

impl Debug for MixedStabilizer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "rank {}", self.rank)?;
        <Tableau as Display>::fmt(&self.tab, formatter)
    }
}

impl Debug for Destabilizer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Tableau as Display>::fmt(&self.tab, formatter)
    }
}

impl Debug for MixedDestabilizer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "rank {}", self.rank)?;
        <Tableau as Display>::fmt(&self.tab, formatter)
    }
}
