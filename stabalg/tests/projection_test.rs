use paulialg::{anti_commutes_with, DensePauli, Pauli, PauliMut};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stabalg::{
    Destabilizer, MixedDestabilizer, MixedStabilizer, Project, ProjectionOptions, Stabilizer, TableauError,
};

fn stab(text: &str) -> Stabilizer {
    text.parse().unwrap()
}

fn pauli(text: &str) -> DensePauli {
    text.parse().unwrap()
}

#[test]
fn ghz_destruction() {
    let mut state = stab("XXXX ZZII IZZI IIZZ");
    state.canonicalize(true);
    assert_eq!(state, stab("XXXX ZIIZ IZIZ IIZZ"));

    let projection = state.project(&pauli("ZIII")).unwrap();
    assert_eq!(projection.anticommuting, Some(0));
    assert_eq!(projection.phase, None);

    state.canonicalize(true);
    assert_eq!(state, stab("ZIII IZII IIZI IIIZ"));
}

#[test]
fn consistent_projection_inside_the_group() {
    let mut state = stab("ZII IXI IIY");
    state.canonicalize(true);
    assert_eq!(state, stab("IXI IIY ZII"));

    let projection = state.project(&pauli("-ZII")).unwrap();
    assert_eq!(projection.anticommuting, None);
    assert_eq!(projection.phase, Some(2));
    assert_eq!(state, stab("IXI IIY ZII"));
}

#[test]
fn commuting_projection_outside_the_group() {
    let mut state = stab("XZI IZI");
    let projection = state.project(&pauli("IIX")).unwrap();
    assert_eq!(projection.anticommuting, None);
    assert_eq!(projection.phase, None);

    // The keep_result path canonicalizes in place without changing the group.
    let mut original = stab("XZI IZI");
    original.canonicalize(true);
    assert_eq!(state, original);
}

#[test]
fn mixed_stabilizer_extends_the_group() {
    let mut state = MixedStabilizer::from(stab("XZI IZI"));
    let projection = state.project(&pauli("IIX")).unwrap();
    assert_eq!(projection.anticommuting, None);
    assert_eq!(projection.phase, None);
    assert_eq!(state.rank(), 3);
    assert_eq!(state.stabilizer(), stab("XII IZI IIX"));
    assert!(state.is_valid());
}

#[test]
fn mixed_stabilizer_append_without_result_detects_dependence() {
    let options = ProjectionOptions {
        keep_result: false,
        phases: true,
    };

    let mut state = MixedStabilizer::from(stab("ZII IZI"));
    state.project_with(&pauli("IIX"), options).unwrap();
    assert_eq!(state.rank(), 3);
    // The dependence check canonicalizes the enlarged prefix in place.
    assert_eq!(state.stabilizer(), stab("IIX ZII IZI"));

    // A dependent operator trivializes during the canonicalization check.
    let mut dependent = MixedStabilizer::from(stab("ZII IZI"));
    dependent.project_with(&pauli("ZZI"), options).unwrap();
    assert_eq!(dependent.rank(), 2);
}

#[test]
fn fresh_mixed_stabilizer_rank_growth() {
    let mut state = MixedStabilizer::from(stab("ZII IZI"));
    let projection = state.project(&pauli("IIX")).unwrap();
    assert_eq!(projection.anticommuting, None);
    assert_eq!(projection.phase, None);
    assert_eq!(state.rank(), 3);
    assert_eq!(state.stabilizer(), stab("ZII IZI IIX"));
}

#[test]
fn mixed_destabilizer_rank_growth_promotes_the_logical_pair() {
    let mut state = MixedDestabilizer::zero_state(3, 2);
    assert!(state.is_valid());

    let projection = state.project(&pauli("IIX")).unwrap();
    assert_eq!(projection.anticommuting, None);
    assert_eq!(projection.phase, None);
    assert_eq!(state.rank(), 3);
    assert_eq!(state.stabilizer(), stab("ZII IZI IIX"));
    assert_eq!(state.destabilizer(), stab("XII IXI IIZ"));
    assert!(state.is_valid());
}

#[test]
fn mixed_destabilizer_anticommuting_projection() {
    let mut state = MixedDestabilizer::zero_state(3, 3);
    let projection = state.project(&pauli("XXI")).unwrap();
    assert_eq!(projection.anticommuting, Some(0));
    assert_eq!(projection.phase, None);
    assert_eq!(state.rank(), 3);
    assert!(state.is_valid());
    // The replaced row keeps the projected operator's own phase.
    assert_eq!(state.stabilizer_row(0).phase_exponent(), 0);
}

#[test]
fn destabilizer_phase_matches_the_cubic_path() {
    let mut fast = Destabilizer::zero_state(4);
    let mut full = MixedDestabilizer::try_from(Destabilizer::zero_state(4)).unwrap();
    let mut slow = stab("ZIII IZII IIZI IIIZ");

    for text in ["XXII", "IXXI", "ZZII", "-ZIII", "YIIY"] {
        let operator = pauli(text);
        let fast_result = fast.project(&operator).unwrap();
        let full_result = full.project(&operator).unwrap();
        let slow_result = slow.project(&operator).unwrap();
        assert_eq!(fast_result.anticommuting.is_some(), slow_result.anticommuting.is_some());
        assert_eq!(fast_result.phase, slow_result.phase);
        assert_eq!(fast_result, full_result);

        let mut fast_group = fast.stabilizer();
        fast_group.canonicalize(true);
        let mut slow_group = slow.clone();
        slow_group.canonicalize(true);
        assert_eq!(fast_group, slow_group);
    }
}

#[test]
fn destabilizer_rejects_underdetermined_tableaux() {
    let mut partial = Destabilizer::from_parts(&stab("XI"), &stab("ZI")).unwrap();
    let error = partial.project(&pauli("IZ")).unwrap_err();
    assert_eq!(
        error,
        TableauError::BadDataStructure {
            operation: "project",
            structure: "Destabilizer",
        }
    );

    // An anticommuting operator is still handled in O(n²).
    let projection = partial.project(&pauli("XI")).unwrap();
    assert_eq!(projection.anticommuting, Some(0));
}

#[test]
fn generate_round_trip_on_a_concrete_state() {
    let mut state = stab("XXXX ZZII IZZI IIZZ");
    state.canonicalize(true);

    let mut product = DensePauli::identity(4);
    for row in [0usize, 2, 3] {
        product.mul_assign_left(&state.row(row));
    }
    let indices = state.reduce(&mut product, true).unwrap();
    assert_eq!(indices.as_slice(), &[0, 2, 3]);
    assert!(product.is_identity());

    let mut outside = pauli("IIIX");
    assert!(state.reduce(&mut outside, true).is_none());
}

fn arbitrary_hermitian_sequence() -> impl Strategy<Value = (usize, usize, Vec<DensePauli>)> {
    (1..6usize, any::<u64>(), 1..8usize).prop_flat_map(|(qubits, seed, steps)| {
        (0..=qubits).prop_map(move |rank| {
            let mut rng = StdRng::seed_from_u64(seed);
            let paulis = (0..steps).map(|_| non_identity_hermitian(qubits, &mut rng)).collect();
            (qubits, rank, paulis)
        })
    })
}

/// Projections of `±I` are degenerate, so the sequences avoid them.
fn non_identity_hermitian(qubits: usize, rng: &mut StdRng) -> DensePauli {
    loop {
        let operator = DensePauli::random_hermitian(qubits, rng);
        if !operator.is_identity_bits() {
            return operator;
        }
    }
}

fn zero_state_stabilizer(qubits: usize) -> Stabilizer {
    let rows: Vec<DensePauli> = (0..qubits).map(|qubit| DensePauli::z(qubit, qubits)).collect();
    Stabilizer::from_rows(&rows)
}

proptest! {
    #[test]
    fn projection_preserves_stabilizer_validity((qubits, _, paulis) in arbitrary_hermitian_sequence()) {
        let mut state = zero_state_stabilizer(qubits);
        for operator in &paulis {
            state.project(operator).unwrap();
            prop_assert!(state.is_valid());
        }
    }

    #[test]
    fn projection_preserves_duality_and_rank_monotonicity((qubits, rank, paulis) in arbitrary_hermitian_sequence()) {
        let mut state = MixedDestabilizer::zero_state(qubits, rank);
        for operator in &paulis {
            let before = state.rank();
            let projection = state.project(operator).unwrap();
            let grew = state.rank() - before;
            prop_assert!(grew <= 1);
            prop_assert_eq!(
                grew == 1,
                projection.anticommuting.is_none() && projection.phase.is_none()
            );
            prop_assert!(state.is_valid());
        }
        state.canonicalize(true);
        prop_assert!(state.is_valid());
    }

    #[test]
    fn projection_is_idempotent((qubits, rank, paulis) in arbitrary_hermitian_sequence()) {
        let mut state = MixedDestabilizer::zero_state(qubits, rank);
        for operator in &paulis {
            let first = state.project(operator).unwrap();
            let again = state.project(operator).unwrap();
            prop_assert_eq!(again.anticommuting, None);
            match first.phase {
                // Already in the group: the state was untouched and the
                // eigenvalue reads back unchanged.
                Some(phase) => prop_assert_eq!(again.phase, Some(phase)),
                // The operator was installed as a +1 stabilizer.
                None => prop_assert_eq!(again.phase, Some(0)),
            }
        }
    }

    #[test]
    fn stabilizer_projection_is_idempotent((qubits, _, paulis) in arbitrary_hermitian_sequence()) {
        let mut state = zero_state_stabilizer(qubits);
        for operator in &paulis {
            let first = state.project(operator).unwrap();
            let again = state.project(operator).unwrap();
            prop_assert_eq!(again.anticommuting, None);
            match first.phase {
                Some(phase) => prop_assert_eq!(again.phase, Some(phase)),
                None => prop_assert_eq!(again.phase, Some(0)),
            }
        }
    }

    #[test]
    fn destabilizer_agrees_with_stabilizer((qubits, _, paulis) in arbitrary_hermitian_sequence()) {
        let mut fast = Destabilizer::zero_state(qubits);
        let mut slow = zero_state_stabilizer(qubits);
        for operator in &paulis {
            let fast_result = fast.project(operator).unwrap();
            let slow_result = slow.project(operator).unwrap();
            prop_assert_eq!(fast_result.anticommuting.is_some(), slow_result.anticommuting.is_some());
            prop_assert_eq!(fast_result.phase, slow_result.phase);
            prop_assert!(fast.is_valid());
        }
    }

    #[test]
    fn generate_round_trip((qubits, _, paulis) in arbitrary_hermitian_sequence(), subset_mask in any::<u8>()) {
        let mut state = zero_state_stabilizer(qubits);
        for operator in &paulis {
            state.project(operator).unwrap();
        }
        state.canonicalize(true);

        let subset: Vec<usize> = (0..state.row_count()).filter(|row| subset_mask >> row & 1 != 0).collect();
        let mut product = DensePauli::identity(qubits);
        for &row in &subset {
            product.mul_assign_left(&state.row(row));
        }
        let indices = state.reduce(&mut product, true);
        prop_assert_eq!(indices.map(|used| used.to_vec()), Some(subset));
        prop_assert!(product.is_identity());
    }

    #[test]
    fn rank_growth_on_mixed_stabilizer((qubits, rank, paulis) in arbitrary_hermitian_sequence()) {
        let rows: Vec<DensePauli> = (0..rank).map(|qubit| DensePauli::z(qubit, qubits)).collect();
        let mut state = MixedStabilizer::from(Stabilizer::from_rows(&rows));
        for operator in &paulis {
            let before = state.rank();
            let projection = state.project(operator).unwrap();
            let grew = state.rank() - before;
            prop_assert!(grew <= 1);
            prop_assert_eq!(
                grew == 1,
                projection.anticommuting.is_none() && projection.phase.is_none()
            );
            prop_assert!(state.is_valid());
        }
        state.canonicalize(true);
        prop_assert!(state.is_valid());
    }

    #[test]
    fn replaced_rows_commute_with_the_rest((qubits, rank, paulis) in arbitrary_hermitian_sequence()) {
        let mut state = MixedDestabilizer::zero_state(qubits, rank);
        for operator in &paulis {
            if let Some(pivot) = state.project(operator).unwrap().anticommuting {
                for index in 0..state.rank() {
                    if index != pivot {
                        prop_assert!(!anti_commutes_with(&state.stabilizer_row(index), operator));
                    }
                }
                prop_assert!(anti_commutes_with(&state.destabilizer_row(pivot), operator));
            }
        }
    }
}
