use crate::canonicalization::{canonicalize_rows, ActiveRows};
use crate::errors::TableauError;
use crate::structures::{Destabilizer, MixedDestabilizer, MixedStabilizer, Stabilizer};
use crate::tableau::Tableau;
use binalg::Bitwise;
use paulialg::{DensePauli, Pauli, PauliMut};
use smallvec::SmallVec;

pub type RowIndices = SmallVec<[usize; 8]>;

#[derive(Clone, Copy, Debug)]
pub struct ProjectionOptions {
    /// Compute the expectation phase when the operator commutes with the
    /// whole group. Turning this off skips the canonicalization (or the
    /// destabilizer sweep) that the phase requires.
    pub keep_result: bool,
    /// Track phase exponents through the row updates.
    pub phases: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions {
            keep_result: true,
            phases: true,
        }
    }
}

/// Outcome of projecting a state onto an eigenspace of a Pauli operator.
///
/// `anticommuting` is the index of the stabilizer row that was replaced by
/// the projected operator, if any. `phase` is the eigenvalue exponent (0
/// for +1, 2 for −1) when the operator was already in the stabilizer
/// group; `None` is the not-in-group signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    pub anticommuting: Option<usize>,
    pub phase: Option<u8>,
}

/// Projection onto a Pauli eigenspace for each tableau flavor.
pub trait Project {
    /// Projects the state onto an eigenspace of `pauli`, updating the
    /// tableau in place.
    ///
    /// When `pauli` anticommutes with the current group, the replaced
    /// stabilizer row keeps `pauli`'s own phase: a faithful measurement
    /// must randomize that row's phase (or force it, for postselection)
    /// afterwards. The choice is deliberately left to the caller.
    fn project_with(&mut self, pauli: &DensePauli, options: ProjectionOptions) -> Result<Projection, TableauError>;

    fn project(&mut self, pauli: &DensePauli) -> Result<Projection, TableauError> {
        self.project_with(pauli, ProjectionOptions::default())
    }
}

impl Stabilizer {
    /// Rewrites `pauli` as a product of rows of `self`, multiplying the
    /// rows into it in place, and returns the row indices used in the
    /// order applied. `self` must be canonicalized. Returns `None` and
    /// leaves `pauli` partially reduced when it is not in the group
    /// modulo phase.
    ///
    /// On success `pauli` is the identity up to phase; with `phases` on,
    /// its residual phase exponent tells which sign of the product was
    /// reduced.
    pub fn reduce(&self, pauli: &mut DensePauli, phases: bool) -> Option<RowIndices> {
        reduce_rows(&self.tab, self.row_count(), pauli, phases)
    }
}

fn reduce_rows(tab: &Tableau, row_count: usize, pauli: &mut DensePauli, phases: bool) -> Option<RowIndices> {
    let mut used = RowIndices::new();
    let mut cursor = 0;
    while let Some(qubit) = pauli.x_bits().find_next_one(0) {
        let row = (cursor..row_count).find(|&row| tab.x_bit(row, qubit))?;
        tab.mul_row_into(row, pauli, phases);
        used.push(row);
        cursor = row + 1;
    }
    while let Some(qubit) = pauli.z_bits().find_next_one(0) {
        let row = (cursor..row_count).find(|&row| tab.z_bit(row, qubit))?;
        tab.mul_row_into(row, pauli, phases);
        used.push(row);
        cursor = row + 1;
    }
    Some(used)
}

/// O(n³) projection on a plain stabilizer prefix: scan for an
/// anticommuting row, fold it into the later offenders, or fall back to
/// canonicalize-and-reduce for the in-group phase.
fn project_plain(tab: &mut Tableau, active: usize, pauli: &DensePauli, options: ProjectionOptions) -> Projection {
    let anticommuting = (0..active).find(|&row| tab.anticommutes_with(row, pauli));
    match anticommuting {
        None => {
            let phase = if options.keep_result {
                canonicalize_rows(&mut ActiveRows::plain(tab, active), options.phases);
                let mut residual = pauli.clone();
                reduce_rows(tab, active, &mut residual, options.phases).map(|_| residual.phase_exponent())
            } else {
                None
            };
            Projection {
                anticommuting: None,
                phase,
            }
        }
        Some(pivot) => {
            for row in pivot + 1..active {
                if tab.anticommutes_with(row, pauli) {
                    tab.mul_left(row, pivot, options.phases);
                }
            }
            tab.set_row(pivot, pauli);
            Projection {
                anticommuting,
                phase: None,
            }
        }
    }
}

/// Restores commutation with the new stabilizer at row `half + pivot` by
/// folding it into every other row that anticommutes with `pauli`: the
/// logical-X block, the stabilizers past the pivot together with the
/// logical-Z block, and the destabilizers (whose phases are not physical).
fn anticomm_update_rows(tab: &mut Tableau, pauli: &DensePauli, rank: usize, half: usize, pivot: usize, phases: bool) {
    let pivot_row = half + pivot;
    for row in rank..half {
        if tab.anticommutes_with(row, pauli) {
            tab.mul_left(row, pivot_row, phases);
        }
    }
    for row in pivot_row + 1..2 * half {
        if tab.anticommutes_with(row, pauli) {
            tab.mul_left(row, pivot_row, phases);
        }
    }
    for row in 0..rank {
        if row != pivot && tab.anticommutes_with(row, pauli) {
            tab.mul_left(row, pivot_row, false);
        }
    }
}

/// The O(n²) in-group phase: accumulate onto an identity scratch Pauli the
/// stabilizer rows paired with the destabilizers that anticommute with
/// `pauli`. The destabilizer expansion supplies the generator subset that
/// the O(n³) canonicalize-and-reduce path would have found.
fn destabilizer_phase(tab: &Tableau, pauli: &DensePauli, rank: usize, half: usize, phases: bool) -> u8 {
    let mut accumulator = DensePauli::identity(tab.qubit_count());
    accumulator.assign_phase_exponent(pauli.phase_exponent());
    for index in 0..rank {
        if tab.anticommutes_with(index, pauli) {
            tab.mul_row_into(half + index, &mut accumulator, phases);
        }
    }
    accumulator.phase_exponent()
}

impl Project for Stabilizer {
    fn project_with(&mut self, pauli: &DensePauli, options: ProjectionOptions) -> Result<Projection, TableauError> {
        let active = self.row_count();
        Ok(project_plain(&mut self.tab, active, pauli, options))
    }
}

impl Project for MixedStabilizer {
    fn project_with(&mut self, pauli: &DensePauli, options: ProjectionOptions) -> Result<Projection, TableauError> {
        let projection = project_plain(&mut self.tab, self.rank, pauli, options);
        // At full rank a commuting operator is always in the group, so the
        // append below is only reachable for self.rank < qubit_count.
        if projection.anticommuting.is_none() && projection.phase.is_none() && self.rank < self.qubit_count() {
            self.tab.set_row(self.rank, pauli);
            if options.keep_result {
                self.rank += 1;
            } else {
                // Without the in-group check above the appended row may be
                // dependent; canonicalizing the enlarged prefix trivializes
                // it in that case.
                let enlarged = self.rank + 1;
                canonicalize_rows(&mut ActiveRows::plain(&mut self.tab, enlarged), options.phases);
                if self.tab.row(self.rank).is_identity_bits() {
                    self.tab.zero_row(self.rank);
                } else {
                    self.rank += 1;
                }
            }
        }
        Ok(projection)
    }
}

impl Project for Destabilizer {
    fn project_with(&mut self, pauli: &DensePauli, options: ProjectionOptions) -> Result<Projection, TableauError> {
        let half = self.half();
        let anticommuting = (0..half).find(|&index| self.tab.anticommutes_with(half + index, pauli));
        match anticommuting {
            None => {
                if half != self.qubit_count() {
                    return Err(TableauError::BadDataStructure {
                        operation: "project",
                        structure: "Destabilizer",
                    });
                }
                let phase = options
                    .keep_result
                    .then(|| destabilizer_phase(&self.tab, pauli, half, half, options.phases));
                Ok(Projection {
                    anticommuting: None,
                    phase,
                })
            }
            Some(pivot) => {
                anticomm_update_rows(&mut self.tab, pauli, half, half, pivot, options.phases);
                self.tab.copy_row(half + pivot, pivot);
                self.tab.set_row(half + pivot, pauli);
                Ok(Projection {
                    anticommuting,
                    phase: None,
                })
            }
        }
    }
}

impl Project for MixedDestabilizer {
    fn project_with(&mut self, pauli: &DensePauli, options: ProjectionOptions) -> Result<Projection, TableauError> {
        let n = self.qubit_count();
        let r = self.rank;
        let tab = &mut self.tab;

        if let Some(pivot) = (0..r).find(|&index| tab.anticommutes_with(n + index, pauli)) {
            anticomm_update_rows(tab, pauli, r, n, pivot, options.phases);
            tab.copy_row(n + pivot, pivot);
            tab.set_row(n + pivot, pauli);
            return Ok(Projection {
                anticommuting: Some(pivot),
                phase: None,
            });
        }

        // Not determined by the stabilizer: look for a logical operator
        // that anticommutes, first among the X logicals, then the Z ones.
        let anticommuting_logical = (r..n)
            .find(|&row| tab.anticommutes_with(row, pauli))
            .or_else(|| (n + r..2 * n).find(|&row| tab.anticommutes_with(row, pauli)));

        match anticommuting_logical {
            Some(row) => {
                // The operator is a new independent generator. Rotate the
                // symplectic basis so the promoted pair sits at the new
                // destabilizer slot r and stabilizer slot n + r; the
                // displaced first-position logicals take over the freed
                // positions, which keeps the X/Z pairing aligned.
                if row < n {
                    tab.swap_rows(n + r, row, true);
                    if n != r + 1 && row != r {
                        tab.swap_rows(r, row + n, true);
                    }
                } else {
                    tab.swap_rows(r, row - n, true);
                    tab.swap_rows(n + r, row, true);
                }
                anticomm_update_rows(tab, pauli, r + 1, n, r, options.phases);
                tab.copy_row(n + r, r);
                tab.set_row(n + r, pauli);
                self.rank += 1;
                Ok(Projection {
                    anticommuting: None,
                    phase: None,
                })
            }
            None => {
                let phase = options
                    .keep_result
                    .then(|| destabilizer_phase(tab, pauli, r, n, options.phases));
                Ok(Projection {
                    anticommuting: None,
                    phase,
                })
            }
        }
    }
}
