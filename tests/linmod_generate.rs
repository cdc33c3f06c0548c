use cellsample::linmod::{
    LinModConstraints, PartitionLimits, choose_modulus, generate_linmod_constraints, is_prime,
    next_prime_at_least,
};
use cellsample::rng::seeded_rng;
use cellsample::SampleError;

#[test]
fn modulus_is_smallest_prime_at_least_five() {
    assert_eq!(choose_modulus(1), Some(5));
    assert_eq!(choose_modulus(5), Some(5));
    assert_eq!(choose_modulus(6), Some(7));
    assert_eq!(choose_modulus(10), Some(11));
    assert_eq!(choose_modulus(100), Some(101));
    assert_eq!(next_prime_at_least(0), Some(2));
    assert_eq!(next_prime_at_least(u64::MAX), None);
    assert!(is_prime(7919));
    assert!(!is_prime(7917));
    assert!(!is_prime(1));
}

#[test]
fn end_to_end_shapes() {
    let mut rng = seeded_rng(42);
    let cs = generate_linmod_constraints(&mut rng, 0.1, 10, 3, &PartitionLimits::default())
        .expect("generate");
    assert_eq!(cs.p, 11);
    assert!(is_prime(cs.p) && cs.p >= 5);

    // 0.1 * 11^2 = 12.1 -> 12 = 6 * 2
    assert_eq!(cs.m_eq(), 0);
    assert_eq!(cs.m_ineq(), 2);
    assert_eq!(cs.c, vec![5, 1]);
    assert!(cs.b_eq.is_empty());
    assert_eq!(cs.b_ineq.len(), 2);
    assert!(cs.a_ineq.iter().all(|row| row.len() == 3));
    assert!(cs.a_ineq.iter().flatten().all(|&v| v < cs.p));
    assert!(cs.b_ineq.iter().all(|&v| v < cs.p));
}

#[test]
fn equality_rows_when_partition_has_no_factors() {
    let mut rng = seeded_rng(7);
    // p = 5, 0.04 * 25 = 1
    let cs = generate_linmod_constraints(&mut rng, 0.04, 3, 4, &PartitionLimits::default())
        .expect("generate");
    assert_eq!(cs.p, 5);
    assert_eq!(cs.m_eq(), 2);
    assert_eq!(cs.m_ineq(), 0);
    assert!(cs.c.is_empty());
    assert!(cs.a_eq.iter().all(|row| row.len() == 4));
    assert!((cs.cell_fraction() - 0.04).abs() < 1e-12);
}

#[test]
fn same_seed_same_constraints() {
    let limits = PartitionLimits::default();
    let a = generate_linmod_constraints(&mut seeded_rng(9), 0.05, 12, 6, &limits).expect("a");
    let b = generate_linmod_constraints(&mut seeded_rng(9), 0.05, 12, 6, &limits).expect("b");
    assert_eq!(a, b);
}

#[test]
fn rejects_bad_parameters() {
    let mut rng = seeded_rng(1);
    let limits = PartitionLimits::default();
    assert!(matches!(
        generate_linmod_constraints(&mut rng, 0.1, 0, 3, &limits),
        Err(SampleError::InvalidParameter { name: "l", .. })
    ));
    assert!(matches!(
        generate_linmod_constraints(&mut rng, 0.1, 10, 0, &limits),
        Err(SampleError::InvalidParameter { name: "len_x", .. })
    ));
    assert!(matches!(
        generate_linmod_constraints(&mut rng, 0.0, 10, 3, &limits),
        Err(SampleError::InvalidParameter { name: "lambda", .. })
    ));
}

fn fixed() -> LinModConstraints {
    LinModConstraints {
        a_eq: vec![vec![1, 2]],
        b_eq: vec![3],
        a_ineq: vec![vec![1, 0]],
        b_ineq: vec![1],
        c: vec![2],
        p: 5,
    }
}

#[test]
fn admits_checks_both_families() {
    let cs = fixed();
    // x = (1, 1): 1 + 2 = 3 ok; 1 + 1 = 2 <= 2 ok
    assert!(cs.admits(&[1, 1]).expect("admits"));
    // x = (3, 0): 3 ok; 3 + 1 = 4 > 2
    assert!(!cs.admits(&[3, 0]).expect("admits"));
    // x = (0, 0): 0 != 3
    assert!(!cs.admits(&[0, 0]).expect("admits"));
    assert!(cs.admits(&[1, 1, 1]).is_err());
}

#[test]
fn admitted_share_matches_cell_fraction() {
    let cs = fixed();
    let mut hits = 0;
    for x0 in 0..5 {
        for x1 in 0..5 {
            if cs.admits(&[x0, x1]).expect("admits") {
                hits += 1;
            }
        }
    }
    // one equality (1/5) and one inequality keeping 3 of 5 residues
    assert_eq!(hits, 3);
    assert!((cs.cell_fraction() - 3.0 / 25.0).abs() < 1e-12);
}

#[test]
fn serializes_with_solver_keys() {
    let value = serde_json::to_value(fixed()).expect("serialize");
    assert_eq!(value["A_eq"], serde_json::json!([[1, 2]]));
    assert_eq!(value["A_ineq"], serde_json::json!([[1, 0]]));
    assert_eq!(value["c"], serde_json::json!([2]));
    assert_eq!(value["p"], serde_json::json!(5));
}

#[test]
fn admits_rejects_inconsistent_shapes() {
    let mut cs = fixed();
    cs.b_eq.push(0);
    assert!(matches!(
        cs.admits(&[1, 1]),
        Err(SampleError::InvalidParameter { name: "b_eq", .. })
    ));

    let mut cs = fixed();
    cs.c.clear();
    assert!(cs.admits(&[1, 1]).is_err());

    let mut cs = fixed();
    cs.p = 0;
    assert!(matches!(
        cs.admits(&[1, 1]),
        Err(SampleError::InvalidParameter { name: "p", .. })
    ));
}

#[test]
fn admits_handles_moduli_near_u64_max() {
    // largest prime below 2^64
    let p = 18_446_744_073_709_551_557u64;
    let cs = LinModConstraints {
        a_eq: vec![],
        b_eq: vec![],
        a_ineq: vec![vec![1]],
        b_ineq: vec![p - 1],
        c: vec![p - 3],
        p,
    };
    // (p-1) + (p-1) = 2p - 2 = p - 2 (mod p) > p - 3
    assert!(!cs.admits(&[p - 1]).expect("admits"));
    // 2 + (p-1) = 1 (mod p)
    assert!(cs.admits(&[2]).expect("admits"));
}
