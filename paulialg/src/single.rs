use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Single-qubit Pauli matrices in the two-bit `(x, z)` encoding of the
/// tableau columns: bit 0 is the X component, bit 1 the Z component, and
/// `(1, 1)` is the Y matrix itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum PauliLetter {
    /// One qubit identity matrix
    /// ```text
    /// |1 0|
    /// |0 1|
    /// ```
    I = 0b00,

    /// Pauli X
    /// ```text
    /// |0 1|
    /// |1 0|
    /// ```
    X = 0b01,

    /// Pauli Z
    /// ```text
    /// |1  0|
    /// |0 -1|
    /// ```
    Z = 0b10,

    /// Pauli Y
    /// ```text
    /// |0 -i|
    /// |i  0|
    /// ```
    Y = 0b11,
}

impl PauliLetter {
    #[must_use]
    pub fn from_xz(x: bool, z: bool) -> PauliLetter {
        PauliLetter::from_u8(u8::from(x) | u8::from(z) << 1).expect("two bits cover every letter")
    }

    #[must_use]
    pub fn x_bit(self) -> bool {
        self as u8 & 0b01 != 0
    }

    #[must_use]
    pub fn z_bit(self) -> bool {
        self as u8 & 0b10 != 0
    }

    #[must_use]
    pub fn all() -> [PauliLetter; 4] {
        [PauliLetter::I, PauliLetter::X, PauliLetter::Z, PauliLetter::Y]
    }
}

impl From<PauliLetter> for char {
    fn from(letter: PauliLetter) -> char {
        match letter {
            PauliLetter::I => 'I',
            PauliLetter::X => 'X',
            PauliLetter::Y => 'Y',
            PauliLetter::Z => 'Z',
        }
    }
}

impl TryFrom<char> for PauliLetter {
    type Error = ();

    fn try_from(character: char) -> Result<PauliLetter, ()> {
        match character {
            'I' | '_' | ' ' => Ok(PauliLetter::I),
            'X' | 'x' => Ok(PauliLetter::X),
            'Y' | 'y' => Ok(PauliLetter::Y),
            'Z' | 'z' => Ok(PauliLetter::Z),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    #[test]
    fn xz_bits_match_encoding() {
        for letter in PauliLetter::all() {
            assert_eq!(PauliLetter::from_xz(letter.x_bit(), letter.z_bit()), letter);
        }
    }

    #[test]
    fn y_is_x_xor_z() {
        let xored = PauliLetter::X.to_u8().unwrap() ^ PauliLetter::Z.to_u8().unwrap();
        assert_eq!(PauliLetter::from_u8(xored), Some(PauliLetter::Y));
    }
}
