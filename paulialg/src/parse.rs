use crate::pauli::{DensePauli, Pauli, PauliMut, PauliUnitary, PhaseExponent};
use crate::single::PauliLetter;
use binalg::Bitwise;
use std::fmt::{Debug, Display};
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Default)]
pub struct PauliParseError;

/// # Panics
///
/// Panics on a phase exponent outside 0..4.
#[must_use]
pub fn phase_to_string(phase_exponent: u8, with_plus: bool) -> &'static str {
    match (phase_exponent, with_plus) {
        (0, false) => "",
        (0, true) => "+",
        (1, false) => "i",
        (1, true) => "+i",
        (2, _) => "-",
        (3, _) => "-i",
        _ => panic!("unexpected phase exponent {phase_exponent}"),
    }
}

fn phase_prefix(string: &str) -> (&str, u8) {
    for (prefix, exponent) in [("+i", 1), ("-i", 3), ("i", 1), ("+", 0), ("-", 2)] {
        if let Some(rest) = string.strip_prefix(prefix) {
            return (rest, exponent);
        }
    }
    (string, 0)
}

impl FromStr for DensePauli {
    type Err = PauliParseError;

    fn from_str(string: &str) -> Result<DensePauli, PauliParseError> {
        let (letters, phase_exponent) = phase_prefix(string.trim());
        let mut result = DensePauli::identity(letters.chars().count());
        for (qubit, character) in letters.chars().enumerate() {
            let letter = PauliLetter::try_from(character).map_err(|()| PauliParseError)?;
            result.set_letter(qubit, letter);
        }
        result.assign_phase_exponent(phase_exponent);
        Ok(result)
    }
}

impl<Bits: Bitwise, Phase: PhaseExponent> Display for PauliUnitary<Bits, Phase> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut string = String::with_capacity(self.qubit_count() + 2);
        string.push_str(phase_to_string(self.phase_exponent(), formatter.sign_plus()));
        for qubit in 0..self.qubit_count() {
            string.push(self.letter(qubit).into());
        }
        formatter.pad(&string)
    }
}

impl<Bits: Bitwise, Phase: PhaseExponent> Debug for PauliUnitary<Bits, Phase> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, formatter)
    }
}
