use binalg::{BitMatrix, Bitwise, BitwiseMut};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arbitrary_matrix() -> impl Strategy<Value = BitMatrix> {
    (1..20usize, 1..150usize, any::<u64>()).prop_map(|(rows, columns, seed)| {
        let mut rng = StdRng::seed_from_u64(seed);
        BitMatrix::random_with_rng(rows, columns, &mut rng)
    })
}

proptest! {
    #[test]
    fn swap_rows_exchanges_content(matrix in arbitrary_matrix(), first in 0..20usize, second in 0..20usize) {
        prop_assume!(first < matrix.row_count() && second < matrix.row_count());
        let mut swapped = matrix.clone();
        swapped.swap_rows(first, second);
        prop_assert_eq!(swapped.row_words(first), matrix.row_words(second));
        prop_assert_eq!(swapped.row_words(second), matrix.row_words(first));
        swapped.swap_rows(first, second);
        prop_assert_eq!(swapped, matrix);
    }

    #[test]
    fn xor_row_into_is_per_bit(matrix in arbitrary_matrix(), target in 0..20usize, source in 0..20usize) {
        prop_assume!(target < matrix.row_count() && source < matrix.row_count() && target != source);
        let mut xored = matrix.clone();
        xored.xor_row_into(target, source);
        for column in 0..matrix.column_count() {
            prop_assert_eq!(
                xored.get((target, column)),
                matrix.get((target, column)) ^ matrix.get((source, column))
            );
        }
        prop_assert_eq!(xored.row_words(source), matrix.row_words(source));
    }

    #[test]
    fn set_get_round_trip(matrix in arbitrary_matrix(), row in 0..20usize, column in 0..150usize, value in any::<bool>()) {
        prop_assume!(row < matrix.row_count() && column < matrix.column_count());
        let mut updated = matrix.clone();
        updated.set((row, column), value);
        prop_assert_eq!(updated.get((row, column)), value);
    }

    #[test]
    fn random_fill_masks_padding(matrix in arbitrary_matrix()) {
        for row in 0..matrix.row_count() {
            prop_assert!(matrix.row(row).max_support().is_none_or(|bit| bit < matrix.column_count()));
        }
    }
}

#[test]
fn row_views_write_through() {
    let mut matrix = BitMatrix::zeros(2, 100);
    matrix.row_mut(1).assign_index(99, true);
    assert!(matrix.get((1, 99)));
    assert_eq!(matrix.row(1).weight(), 1);
}

#[test]
fn rows_mut_pair_order_matches_arguments() {
    let mut matrix = BitMatrix::zeros(3, 64);
    matrix.set((2, 5), true);
    let (target, source) = matrix.rows_mut_pair(0, 2);
    assert_eq!(target[0], 0);
    assert_eq!(source[0], 1 << 5);
}
