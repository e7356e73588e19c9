pub mod bitwise;
pub use bitwise::{eq_bits, words_for, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, Word, WORD_BITS};

pub mod vec;
pub use vec::{BitVec, BitView, BitViewMut};

pub mod matrix;
pub use matrix::BitMatrix;
