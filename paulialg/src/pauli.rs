use crate::single::PauliLetter;
use binalg::{eq_bits, BitVec, BitView, BitViewMut, Bitwise, BitwiseMut, BitwisePair, Word};
use sorted_iter::SortedIterator;
use std::ops::{Mul, MulAssign, Neg};

/// Phase exponents `p` denoting multiplication by `i^p`, abstracted over
/// owned bytes and bytes borrowed from a tableau phase column.
pub trait PhaseExponent {
    fn raw_value(&self) -> u8;

    #[inline]
    fn value(&self) -> u8 {
        self.raw_value() % 4
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.value() == 0
    }
}

pub trait PhaseExponentMut: PhaseExponent {
    fn assign(&mut self, value: u8);
    fn add_assign(&mut self, value: u8);
}

impl PhaseExponent for u8 {
    fn raw_value(&self) -> u8 {
        *self
    }
}

impl PhaseExponent for &u8 {
    fn raw_value(&self) -> u8 {
        **self
    }
}

impl PhaseExponent for &mut u8 {
    fn raw_value(&self) -> u8 {
        **self
    }
}

impl PhaseExponentMut for u8 {
    fn assign(&mut self, value: u8) {
        *self = value % 4;
    }

    fn add_assign(&mut self, value: u8) {
        *self = self.wrapping_add(value) % 4;
    }
}

impl PhaseExponentMut for &mut u8 {
    fn assign(&mut self, value: u8) {
        **self = value % 4;
    }

    fn add_assign(&mut self, value: u8) {
        **self = self.wrapping_add(value) % 4;
    }
}

/// A Pauli operator `i^phase · ⊗ σ(x_k, z_k)` on `σ(0,0)=I`, `σ(1,0)=X`,
/// `σ(0,1)=Z`, `σ(1,1)=Y`.
///
/// The bit storage is generic so the same type covers owned operators
/// ([`DensePauli`]) and operators borrowed from tableau rows
/// ([`PauliView`], [`PauliViewMut`]).
///
/// ```
/// use paulialg::{DensePauli, Pauli, commutes_with};
///
/// let pauli: DensePauli = "-XYZ".parse().unwrap();
/// assert_eq!(pauli.phase_exponent(), 2);
/// assert_eq!(pauli.weight(), 3);
///
/// let x0 = DensePauli::x(0, 3);
/// let z0 = DensePauli::z(0, 3);
/// assert!(!commutes_with(&x0, &z0));
/// ```
#[must_use]
#[derive(Clone)]
pub struct PauliUnitary<Bits, Phase> {
    pub(crate) x_bits: Bits,
    pub(crate) z_bits: Bits,
    pub(crate) phase_exp: Phase,
}

pub type DensePauli = PauliUnitary<BitVec, u8>;
pub type PauliView<'life> = PauliUnitary<BitView<'life>, &'life u8>;
pub type PauliViewMut<'life> = PauliUnitary<BitViewMut<'life>, &'life mut u8>;

/// Read-only access to a Pauli operator.
pub trait Pauli {
    type Bits: Bitwise;

    fn x_bits(&self) -> &Self::Bits;
    fn z_bits(&self) -> &Self::Bits;
    /// Phase exponent reduced mod 4.
    fn phase_exponent(&self) -> u8;

    #[inline]
    fn qubit_count(&self) -> usize {
        self.x_bits().bit_len()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.x_bits().or_weight(self.z_bits())
    }

    #[inline]
    fn is_identity_bits(&self) -> bool {
        self.x_bits().is_zero() && self.z_bits().is_zero()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_identity_bits() && self.phase_exponent() == 0
    }

    /// Hermitian Paulis square to the identity; with Y stored directly this
    /// is an even phase exponent.
    #[inline]
    fn is_hermitian(&self) -> bool {
        self.phase_exponent() % 2 == 0
    }

    #[inline]
    fn letter(&self, qubit: usize) -> PauliLetter {
        PauliLetter::from_xz(self.x_bits().index(qubit), self.z_bits().index(qubit))
    }

    fn support(&self) -> impl SortedIterator<Item = usize> + '_ {
        self.x_bits().support().union(self.z_bits().support())
    }
}

impl<Bits: Bitwise, Phase: PhaseExponent> Pauli for PauliUnitary<Bits, Phase> {
    type Bits = Bits;

    #[inline]
    fn x_bits(&self) -> &Bits {
        &self.x_bits
    }

    #[inline]
    fn z_bits(&self) -> &Bits {
        &self.z_bits
    }

    #[inline]
    fn phase_exponent(&self) -> u8 {
        self.phase_exp.value()
    }
}

/// In-place mutation of a Pauli operator, on owned storage or a tableau row.
pub trait PauliMut: Pauli {
    fn x_words_mut(&mut self) -> &mut [Word];
    fn z_words_mut(&mut self) -> &mut [Word];
    fn assign_phase_exponent(&mut self, value: u8);
    fn add_assign_phase_exponent(&mut self, value: u8);

    #[inline]
    fn negate(&mut self) {
        self.add_assign_phase_exponent(2);
    }

    fn set_identity(&mut self) {
        self.x_words_mut().clear_bits();
        self.z_words_mut().clear_bits();
        self.assign_phase_exponent(0);
    }

    fn set_letter(&mut self, qubit: usize, letter: PauliLetter) {
        self.x_words_mut().assign_index(qubit, letter.x_bit());
        self.z_words_mut().assign_index(qubit, letter.z_bit());
    }

    fn assign<Rhs: Pauli>(&mut self, rhs: &Rhs) {
        for (to, from) in self.x_words_mut().iter_mut().zip(rhs.x_bits().words()) {
            *to = *from;
        }
        for (to, from) in self.z_words_mut().iter_mut().zip(rhs.z_bits().words()) {
            *to = *from;
        }
        self.assign_phase_exponent(rhs.phase_exponent());
    }

    /// XOR of the bit content only; the phase column is untouched.
    fn xor_assign_bits<Rhs: Pauli>(&mut self, rhs: &Rhs) {
        for (to, from) in self.x_words_mut().iter_mut().zip(rhs.x_bits().words()) {
            *to ^= *from;
        }
        for (to, from) in self.z_words_mut().iter_mut().zip(rhs.z_bits().words()) {
            *to ^= *from;
        }
    }

    /// `self ← lhs · self` with full phase tracking.
    fn mul_assign_left<Lhs: Pauli>(&mut self, lhs: &Lhs)
    where
        Self: Sized,
    {
        let extra = product_phase_exponent(lhs, &*self);
        self.xor_assign_bits(lhs);
        self.add_assign_phase_exponent(lhs.phase_exponent().wrapping_add(extra));
    }

    /// `self ← self · rhs` with full phase tracking.
    fn mul_assign_right<Rhs: Pauli>(&mut self, rhs: &Rhs)
    where
        Self: Sized,
    {
        let extra = product_phase_exponent(&*self, rhs);
        self.xor_assign_bits(rhs);
        self.add_assign_phase_exponent(rhs.phase_exponent().wrapping_add(extra));
    }

    fn set_random(&mut self, qubit_count: usize, random_number_generator: &mut impl rand::Rng) {
        self.x_words_mut().assign_random(qubit_count, random_number_generator);
        self.z_words_mut().assign_random(qubit_count, random_number_generator);
        self.assign_phase_exponent(random_number_generator.gen::<u8>() % 4);
    }
}

impl<Bits: BitwiseMut, Phase: PhaseExponentMut> PauliMut for PauliUnitary<Bits, Phase> {
    #[inline]
    fn x_words_mut(&mut self) -> &mut [Word] {
        self.x_bits.words_mut()
    }

    #[inline]
    fn z_words_mut(&mut self) -> &mut [Word] {
        self.z_bits.words_mut()
    }

    #[inline]
    fn assign_phase_exponent(&mut self, value: u8) {
        self.phase_exp.assign(value);
    }

    #[inline]
    fn add_assign_phase_exponent(&mut self, value: u8) {
        self.phase_exp.add_assign(value);
    }
}

impl<Bits, Phase> PauliUnitary<Bits, Phase> {
    pub fn from_parts(x_bits: Bits, z_bits: Bits, phase_exp: Phase) -> Self {
        PauliUnitary {
            x_bits,
            z_bits,
            phase_exp,
        }
    }
}

impl DensePauli {
    /// The identity operator on `qubit_count` qubits with phase `+1`
    /// (the `zero` element of the Pauli bit representation).
    pub fn identity(qubit_count: usize) -> DensePauli {
        PauliUnitary {
            x_bits: BitVec::zeros(qubit_count),
            z_bits: BitVec::zeros(qubit_count),
            phase_exp: 0,
        }
    }

    /// # Panics
    ///
    /// Panics if the two bit vectors have different lengths.
    pub fn from_bits(x_bits: BitVec, z_bits: BitVec, phase_exp: u8) -> DensePauli {
        assert_eq!(x_bits.len(), z_bits.len());
        PauliUnitary {
            x_bits,
            z_bits,
            phase_exp: phase_exp % 4,
        }
    }

    pub fn x(qubit: usize, qubit_count: usize) -> DensePauli {
        let mut result = DensePauli::identity(qubit_count);
        result.set_letter(qubit, PauliLetter::X);
        result
    }

    pub fn y(qubit: usize, qubit_count: usize) -> DensePauli {
        let mut result = DensePauli::identity(qubit_count);
        result.set_letter(qubit, PauliLetter::Y);
        result
    }

    pub fn z(qubit: usize, qubit_count: usize) -> DensePauli {
        let mut result = DensePauli::identity(qubit_count);
        result.set_letter(qubit, PauliLetter::Z);
        result
    }

    pub fn random(qubit_count: usize, random_number_generator: &mut impl rand::Rng) -> DensePauli {
        let mut result = DensePauli::identity(qubit_count);
        result.set_random(qubit_count, random_number_generator);
        result
    }

    /// A random Pauli with phase in `{0, 2}`, as stored for stabilizer
    /// generators.
    pub fn random_hermitian(qubit_count: usize, random_number_generator: &mut impl rand::Rng) -> DensePauli {
        let mut result = DensePauli::random(qubit_count, random_number_generator);
        result.assign_phase_exponent(if random_number_generator.gen() { 2 } else { 0 });
        result
    }

    pub fn as_view(&self) -> PauliView<'_> {
        PauliUnitary {
            x_bits: self.x_bits.as_view(),
            z_bits: self.z_bits.as_view(),
            phase_exp: &self.phase_exp,
        }
    }
}

impl From<PauliView<'_>> for DensePauli {
    fn from(view: PauliView<'_>) -> DensePauli {
        DensePauli::from_bits(view.x_bits.to_vec(), view.z_bits.to_vec(), view.phase_exponent())
    }
}

/// 1 iff the operators anticommute: the GF(2) symplectic inner product of
/// their `(x, z)` vectors.
pub fn anti_commutes_with<Left: Pauli, Right: Pauli>(left: &Left, right: &Right) -> bool {
    left.x_bits().dot(right.z_bits()) ^ left.z_bits().dot(right.x_bits())
}

pub fn commutes_with<Left: Pauli, Right: Pauli>(left: &Left, right: &Right) -> bool {
    !anti_commutes_with(left, right)
}

/// Extra phase exponent picked up when `left` is multiplied onto `right`,
/// beyond the sum of their own phases.
///
/// Runs word-parallel: `cnt1` holds the per-lane parity of anticommuting
/// single-qubit products, `cnt2` the per-lane carry, so one popcount of each
/// at the end yields the total mod 4. This is what keeps row multiplication
/// O(words) instead of O(qubits).
pub fn product_phase_exponent<Left: Pauli, Right: Pauli>(left: &Left, right: &Right) -> u8 {
    debug_assert_eq!(left.qubit_count(), right.qubit_count());
    let mut cnt1: Word = 0;
    let mut cnt2: Word = 0;
    let x_pairs = left.x_bits().words().iter().zip(right.x_bits().words());
    let z_pairs = left.z_bits().words().iter().zip(right.z_bits().words());
    for ((&x1, &x2), (&z1, &z2)) in x_pairs.zip(z_pairs) {
        let new_x = x1 ^ x2;
        let new_z = z1 ^ z2;
        let x1z2 = x1 & z2;
        let anti_comm = (x2 & z1) ^ x1z2;
        cnt2 ^= (cnt1 ^ new_x ^ new_z ^ x1z2) & anti_comm;
        cnt1 ^= anti_comm;
    }
    ((cnt1.count_ones() + 2 * cnt2.count_ones()) % 4) as u8
}

/// `pauli` placed on the listed qubit positions of a larger register, with
/// its phase carried over.
pub fn embedded<Small: Pauli>(pauli: &Small, qubit_count: usize, positions: &[usize]) -> DensePauli {
    debug_assert_eq!(pauli.qubit_count(), positions.len());
    let mut result = DensePauli::identity(qubit_count);
    for (index, &position) in positions.iter().enumerate() {
        result.set_letter(position, pauli.letter(index));
    }
    result.assign_phase_exponent(pauli.phase_exponent());
    result
}

impl<LeftBits, LeftPhase, RightBits, RightPhase> PartialEq<PauliUnitary<RightBits, RightPhase>>
    for PauliUnitary<LeftBits, LeftPhase>
where
    LeftBits: Bitwise,
    RightBits: Bitwise,
    LeftPhase: PhaseExponent,
    RightPhase: PhaseExponent,
{
    fn eq(&self, other: &PauliUnitary<RightBits, RightPhase>) -> bool {
        self.phase_exponent() == other.phase_exponent()
            && eq_bits(&self.x_bits, &other.x_bits)
            && eq_bits(&self.z_bits, &other.z_bits)
    }
}

impl Eq for DensePauli {}

impl<Bits: BitwiseMut, Phase: PhaseExponentMut, Rhs: Pauli> MulAssign<&Rhs> for PauliUnitary<Bits, Phase> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Rhs) {
        self.mul_assign_right(rhs);
    }
}

impl<Rhs: Pauli> Mul<&Rhs> for &DensePauli {
    type Output = DensePauli;

    fn mul(self, rhs: &Rhs) -> DensePauli {
        let mut result = self.clone();
        result.mul_assign_right(rhs);
        result
    }
}

impl Neg for DensePauli {
    type Output = DensePauli;

    #[inline]
    fn neg(mut self) -> DensePauli {
        self.negate();
        self
    }
}

impl Neg for &DensePauli {
    type Output = DensePauli;

    fn neg(self) -> DensePauli {
        let mut result = self.clone();
        result.negate();
        result
    }
}
