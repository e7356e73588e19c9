use binalg::{eq_bits, BitVec, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};
use proptest::prelude::*;

fn arbitrary_bitvec(max_length: usize) -> impl Strategy<Value = BitVec> {
    prop::collection::vec(any::<bool>(), 0..max_length).prop_map(BitVec::from_iter)
}

fn equal_length_bitvecs(max_length: usize) -> impl Strategy<Value = (BitVec, BitVec)> {
    (1..max_length).prop_flat_map(|length| {
        (
            prop::collection::vec(any::<bool>(), length).prop_map(BitVec::from_iter),
            prop::collection::vec(any::<bool>(), length).prop_map(BitVec::from_iter),
        )
    })
}

proptest! {
    #[test]
    fn from_iter_round_trip(bits in prop::collection::vec(any::<bool>(), 0..500)) {
        let vec = BitVec::from_iter(bits.clone());
        prop_assert_eq!(vec.len(), bits.len());
        let actual: Vec<bool> = vec.iter().collect();
        prop_assert_eq!(bits, actual);
    }

    #[test]
    fn weight_counts_set_bits(vec in arbitrary_bitvec(500)) {
        let expected = vec.iter().filter(|bit| *bit).count();
        prop_assert_eq!(vec.weight(), expected);
        prop_assert_eq!(vec.parity(), expected % 2 == 1);
        prop_assert_eq!(vec.is_zero(), expected == 0);
    }

    #[test]
    fn support_matches_indexing(vec in arbitrary_bitvec(500)) {
        let support: Vec<usize> = vec.support().collect();
        prop_assert_eq!(support.len(), vec.weight());
        for index in &support {
            prop_assert!(vec.index(*index));
        }
        let mut sorted = support.clone();
        sorted.sort_unstable();
        prop_assert_eq!(support, sorted);
    }

    #[test]
    fn find_next_one_scans_forward(vec in arbitrary_bitvec(500), start in 0..500usize) {
        let expected = (start..vec.len()).find(|&index| vec.index(index));
        prop_assert_eq!(vec.find_next_one(start), expected);
    }

    #[test]
    fn min_max_support(vec in arbitrary_bitvec(500)) {
        prop_assert_eq!(vec.min_support(), vec.support().next());
        prop_assert_eq!(vec.max_support(), vec.support().last());
    }

    #[test]
    fn bitxor_assign_is_per_bit_xor((left, right) in equal_length_bitvecs(500)) {
        let mut xored = left.clone();
        xored.bitxor_assign(&right);
        for index in 0..left.len() {
            prop_assert_eq!(xored.index(index), left.index(index) ^ right.index(index));
        }
    }

    #[test]
    fn bitand_bitor_weights((left, right) in equal_length_bitvecs(500)) {
        let mut anded = left.clone();
        anded.bitand_assign(&right);
        prop_assert_eq!(anded.weight(), left.and_weight(&right));

        let mut ored = left.clone();
        ored.bitor_assign(&right);
        prop_assert_eq!(ored.weight(), left.or_weight(&right));
    }

    #[test]
    fn dot_is_and_parity((left, right) in equal_length_bitvecs(500)) {
        prop_assert_eq!(left.dot(&right), left.and_weight(&right) % 2 == 1);
    }

    #[test]
    fn assign_copies_content((left, right) in equal_length_bitvecs(500)) {
        let mut copy = left.clone();
        copy.assign(&right);
        prop_assert!(eq_bits(&copy, &right));
    }

    #[test]
    fn negate_index_round_trip(vec in arbitrary_bitvec(500), index in 0..500usize) {
        prop_assume!(index < vec.len());
        let mut negated = vec.clone();
        negated.negate_index(index);
        prop_assert_eq!(negated.index(index), !vec.index(index));
        negated.negate_index(index);
        prop_assert!(eq_bits(&negated, &vec));
    }
}

#[test]
fn ones_masks_the_tail() {
    let ones = BitVec::ones(70);
    assert_eq!(ones.weight(), 70);
    assert_eq!(ones.max_support(), Some(69));
}

#[test]
fn views_share_storage() {
    let mut vec = BitVec::zeros(130);
    vec.as_view_mut().assign_index(128, true);
    assert!(vec.as_view().index(128));
    assert_eq!(vec.weight(), 1);
}
