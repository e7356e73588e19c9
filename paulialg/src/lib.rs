pub mod single;
pub use single::PauliLetter;

pub mod pauli;
pub use pauli::{
    anti_commutes_with, commutes_with, embedded, product_phase_exponent, DensePauli, Pauli, PauliMut, PauliUnitary,
    PauliView, PauliViewMut, PhaseExponent, PhaseExponentMut,
};

mod parse;
pub use parse::{phase_to_string, PauliParseError};
