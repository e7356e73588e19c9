use crate::canonicalization::{canonicalize_rref_rows, ActiveRows};
use crate::errors::TableauError;
use crate::projection::{Project, ProjectionOptions};
use crate::structures::{MixedDestabilizer, MixedStabilizer, Stabilizer};
use paulialg::{embedded, DensePauli, Pauli};

fn check_replacement_shape(newstate: &Stabilizer, qubits: &[usize]) -> Result<(), TableauError> {
    if newstate.qubit_count() != qubits.len() {
        return Err(TableauError::ShapeMismatch {
            context: "replacement state qubits",
            expected: qubits.len(),
            actual: newstate.qubit_count(),
        });
    }
    Ok(())
}

impl Stabilizer {
    /// Removes `qubits` from the state: rows pivoted on them are zeroed
    /// out after a qubit-restricted rref. Returns the number of surviving
    /// rows, which all have support only on the remaining qubits.
    ///
    /// Tracing more qubits than the current rank supports leaves the
    /// tableau valid but its content unspecified.
    pub fn trace_out(&mut self, qubits: &[usize], phases: bool) -> usize {
        let rows = self.row_count();
        let boundary = canonicalize_rref_rows(&mut ActiveRows::plain(&mut self.tab, rows), qubits, phases);
        for row in boundary..rows {
            self.tab.zero_row(row);
        }
        boundary
    }

    /// Replaces the reduced state on `qubits` with `newstate`, expanded to
    /// the full register. The rows of `newstate` land right after the rows
    /// that survived the qubit-restricted rref; anything past them is
    /// cleared.
    pub fn reset_qubits(&mut self, newstate: &Stabilizer, qubits: &[usize], phases: bool) -> Result<(), TableauError> {
        check_replacement_shape(newstate, qubits)?;
        let rows = self.row_count();
        let boundary = canonicalize_rref_rows(&mut ActiveRows::plain(&mut self.tab, rows), qubits, phases);
        if boundary + newstate.row_count() > rows {
            return Err(TableauError::ShapeMismatch {
                context: "replacement rows",
                expected: rows - boundary,
                actual: newstate.row_count(),
            });
        }
        let qubit_count = self.qubit_count();
        for (offset, row) in newstate.rows().enumerate() {
            self.tab.set_row(boundary + offset, &embedded(&row, qubit_count, qubits));
        }
        for row in boundary + newstate.row_count()..rows {
            self.tab.zero_row(row);
        }
        Ok(())
    }
}

impl MixedStabilizer {
    /// As [`Stabilizer::trace_out`], but the demoted rows are simply left
    /// behind the decremented rank.
    pub fn trace_out(&mut self, qubits: &[usize], phases: bool) -> usize {
        let rank = self.rank;
        let boundary = canonicalize_rref_rows(&mut ActiveRows::plain(&mut self.tab, rank), qubits, phases);
        self.rank = boundary;
        boundary
    }

    pub fn reset_qubits(&mut self, newstate: &Stabilizer, qubits: &[usize], phases: bool) -> Result<(), TableauError> {
        check_replacement_shape(newstate, qubits)?;
        let rank = self.rank;
        let boundary = canonicalize_rref_rows(&mut ActiveRows::plain(&mut self.tab, rank), qubits, phases);
        if boundary + newstate.row_count() > self.qubit_count() {
            return Err(TableauError::ShapeMismatch {
                context: "replacement rows",
                expected: self.qubit_count() - boundary,
                actual: newstate.row_count(),
            });
        }
        let qubit_count = self.qubit_count();
        for (offset, row) in newstate.rows().enumerate() {
            self.tab.set_row(boundary + offset, &embedded(&row, qubit_count, qubits));
        }
        self.rank = boundary + newstate.row_count();
        Ok(())
    }
}

impl MixedDestabilizer {
    /// Traces out `qubits` on the stabilizer block with lockstep
    /// destabilizer updates. The demoted stabilizer/destabilizer pairs
    /// fall exactly into the logical blocks of the lowered rank, so no
    /// rows move.
    pub fn trace_out(&mut self, qubits: &[usize], phases: bool) -> usize {
        let (offset, rank) = (self.qubit_count(), self.rank);
        let boundary = canonicalize_rref_rows(
            &mut ActiveRows::with_dual(&mut self.tab, offset, rank, 0),
            qubits,
            phases,
        );
        self.rank = boundary;
        boundary
    }

    /// Replaces the reduced state on `qubits` by projecting each expanded
    /// row of `newstate` and then forcing its phase:
    /// an anticommuting projection replaced a stabilizer row whose phase
    /// the projection left to us; a rank-growing projection appended the
    /// row verbatim; and for a row already in the group with the wrong
    /// sign, the stabilizer paired with its first anticommuting
    /// destabilizer is rewritten to the requested operator.
    pub fn reset_qubits(&mut self, newstate: &Stabilizer, qubits: &[usize], phases: bool) -> Result<(), TableauError> {
        check_replacement_shape(newstate, qubits)?;
        let qubit_count = self.qubit_count();
        let options = ProjectionOptions {
            keep_result: true,
            phases,
        };
        for index in 0..newstate.row_count() {
            let expanded = embedded(&newstate.row(index), qubit_count, qubits);
            let projection = self.project_with(&expanded, options)?;
            match (projection.anticommuting, projection.phase) {
                (Some(pivot), _) => {
                    self.tab.set_phase(qubit_count + pivot, expanded.phase_exponent());
                }
                (None, None) => {
                    let newest = self.rank - 1;
                    self.tab.set_phase(qubit_count + newest, expanded.phase_exponent());
                }
                (None, Some(residual)) => {
                    if phases && residual != 0 {
                        let rank = self.rank;
                        if let Some(pivot) = (0..rank).find(|&i| self.tab.anticommutes_with(i, &expanded)) {
                            for row in pivot + 1..rank {
                                if self.tab.anticommutes_with(row, &expanded) {
                                    self.tab.mul_left(row, pivot, false);
                                }
                            }
                            self.tab.set_row(qubit_count + pivot, &expanded);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
