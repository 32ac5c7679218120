// tests/solver_tests.rs

use qsim::solver::{self, to_bit_string, BitVector};
use qsim::{solve, QsimError};

use proptest::prelude::*;

fn dot(v: &[u8], sample: &str) -> u8 {
    v.iter().zip(sample.bytes()).fold(0, |acc, (a, b)| acc ^ (a & u8::from(b == b'1')))
}

fn bit_string(value: usize, len: usize) -> String {
    (0..len).map(|i| if (value >> (len - 1 - i)) & 1 == 1 { '1' } else { '0' }).collect()
}

// Every bit-string of length `len` orthogonal to `secret`.
fn orthogonal_strings(secret: &str) -> Vec<String> {
    let len = secret.len();
    (0..1usize << len)
        .map(|value| bit_string(value, len))
        .filter(|y| dot(&secret.bytes().map(|b| u8::from(b == b'1')).collect::<BitVector>(), y) == 0)
        .collect()
}

// XOR combinations of `candidates` (all 2^c of them).
fn span(candidates: &[BitVector], len: usize) -> Vec<String> {
    (0..1usize << candidates.len())
        .map(|mask| {
            let mut v = vec![0u8; len];
            for (i, c) in candidates.iter().enumerate() {
                if (mask >> i) & 1 == 1 {
                    v.iter_mut().zip(c).for_each(|(a, b)| *a ^= b);
                }
            }
            to_bit_string(&v)
        })
        .collect()
}

fn nonzero_secret(max_len: usize) -> impl Strategy<Value = String> {
    (1..=max_len).prop_flat_map(|len| (1..1usize << len).prop_map(move |value| bit_string(value, len)))
}

proptest! {
    #[test]
    fn candidates_are_orthogonal_to_every_sample(
        samples in (1..=6usize).prop_flat_map(|len| proptest::collection::vec(0..1usize << len, 1..10).prop_map(move |values| {
            values.into_iter().map(|v| bit_string(v, len)).collect::<Vec<String>>()
        }))
    ) {
        let candidates = solve(&samples).unwrap();
        prop_assert!(!candidates.is_empty());
        for v in &candidates {
            prop_assert_eq!(v.len(), samples[0].len());
            for s in &samples {
                prop_assert_eq!(dot(v, s), 0);
            }
        }
    }

    #[test]
    fn complete_orthogonal_set_yields_the_secret(secret in nonzero_secret(6)) {
        let samples = orthogonal_strings(&secret);
        let candidates = solve(&samples).unwrap();
        let recovered: Vec<String> = candidates.iter().map(|v| to_bit_string(v)).collect();
        prop_assert_eq!(recovered, vec![secret]);
    }

    #[test]
    fn secret_lies_in_candidate_span(secret in nonzero_secret(6), picks in proptest::collection::vec(any::<usize>(), 1..8)) {
        let all = orthogonal_strings(&secret);
        let samples: Vec<&String> = picks.iter().map(|i| &all[i % all.len()]).collect();
        let candidates = solve(&samples).unwrap();
        prop_assert!(span(&candidates, secret.len()).contains(&secret));
    }

    #[test]
    fn full_rank_samples_give_trivial_vector(len in 1..=6usize, rotation in 0..6usize) {
        let mut samples: Vec<String> = (0..len).map(|i| bit_string(1 << i, len)).collect();
        samples.rotate_left(rotation % len);
        prop_assert_eq!(solve(&samples).unwrap(), vec![vec![0u8; len]]);
    }
}

#[test]
fn test_row_echelon_preserves_identity_block_invertibility() {
    let samples = ["101", "011"];
    let mut mat = solver::augmented_matrix(&samples, 3, 2);
    solver::row_echelon(&mut mat, 2);
    let combinations: Vec<BitVector> = mat.iter().map(|row| row[2..].to_vec()).collect();
    // The recorded combinations stay linearly independent.
    let spanned = span(&combinations, 3);
    let mut distinct = spanned.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), spanned.len());
}

#[test]
fn test_solve_rejects_ragged_samples() {
    let err = solve(&["0101", "011"]).unwrap_err();
    assert_eq!(err, QsimError::DimensionMismatch { context: "solve", expected: 4, actual: 3 });
}

#[test]
fn test_simon_outcomes_for_secret_110() -> Result<(), QsimError> {
    let candidates = solve(&["000", "001", "110", "111"])?;
    assert_eq!(candidates.iter().map(|v| to_bit_string(v)).collect::<Vec<_>>(), vec!["110".to_string()]);
    Ok(())
}
