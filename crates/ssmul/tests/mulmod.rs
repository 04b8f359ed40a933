//! `mulmod_2expp1` against a `num-bigint` oracle, across the base-case /
//! negacyclic-driver threshold.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use ssmul::mulmod_2expp1;
use ssmul_arith::{Limb, LIMB_BITS};

fn to_uint(x: &[Limb]) -> BigUint {
    let mut v = BigUint::zero();
    for &limb in x.iter().rev() {
        v = (v << LIMB_BITS) + limb;
    }
    v
}

fn det_vec(n: usize, seed: u64) -> Vec<Limb> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            state ^ (state >> 31)
        })
        .collect()
}

fn check(n: usize, w: usize, a: &[Limb], b: &[Limb], c: Limb) {
    let bits = n * w;
    let limbs = bits / LIMB_BITS;
    let p = (BigUint::one() << bits) + 1u8;

    let va = (to_uint(a) + (BigUint::from(c & 1) << bits)) % &p;
    let vb = (to_uint(b) + (BigUint::from((c >> 1) & 1) << bits)) % &p;

    let mut r = vec![0; limbs + 1];
    let mut tt = vec![0; 2 * limbs + 2];
    let cy = mulmod_2expp1(&mut r, a, b, c, n, w, &mut tt);
    let got = (to_uint(&r[..limbs]) + (BigUint::from(cy) << bits)) % &p;

    assert_eq!(got, (va * vb) % &p, "n={n} w={w}");
}

/// Base-case sizes: the classic negacyclic ring of 1024 bits.
#[test]
fn basecase_sizes_random_pairs() {
    let (n, w) = (1024, 1);
    let limbs = n * w / LIMB_BITS;
    for seed in 0..40u64 {
        let a = det_vec(limbs, 1000 + seed);
        let b = det_vec(limbs, 2000 + seed);
        check(n, w, &a, &b, 0);
    }
}

/// Above the threshold the negacyclic FFT driver runs; 2^14 bits is 256
/// limbs of operand.
#[test]
fn fft_driver_random_pairs() {
    let (n, w) = (1 << 14, 1);
    let limbs = n * w / LIMB_BITS;
    for seed in 0..6u64 {
        let a = det_vec(limbs, 3000 + seed);
        let b = det_vec(limbs, 4000 + seed);
        check(n, w, &a, &b, 0);
    }
}

/// A larger ring exercising a second parameter shape.
#[test]
fn fft_driver_wider_ring() {
    let (n, w) = (1 << 13, 2);
    let limbs = n * w / LIMB_BITS;
    let a = det_vec(limbs, 77);
    let b = det_vec(limbs, 78);
    check(n, w, &a, &b, 0);
}

/// Operands equal to -1 (carry flag set) short-circuit at every size.
#[test]
fn minus_one_operands() {
    for (n, w) in [(1024usize, 1usize), (1 << 14, 1)] {
        let limbs = n * w / LIMB_BITS;
        let zero = vec![0; limbs];
        let b = det_vec(limbs, 55);

        check(n, w, &zero, &b, 1);
        check(n, w, &b, &zero, 2);
        check(n, w, &zero, &zero, 3);
    }
}

/// Squares of numbers just below the modulus: p - 2 squared is 4 mod p.
#[test]
fn near_modulus_square() {
    let (n, w) = (1 << 14, 1);
    let limbs = n * w / LIMB_BITS;
    // p - 2 = 2^bits - 1, i.e. all ones.
    let a = vec![!0u64; limbs];
    check(n, w, &a, &a, 0);
}
