//! Limb-vector primitives and the base-case `mulmod` against `num-bigint`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use proptest::collection::vec;
use proptest::prelude::*;
use ssmul_arith::{mpn, mulmod::mulmod_2expp1_basecase, Limb, LIMB_BITS};

fn to_uint(x: &[Limb]) -> BigUint {
    let mut v = BigUint::zero();
    for &limb in x.iter().rev() {
        v = (v << LIMB_BITS) + limb;
    }
    v
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn mul_matches_reference(a in vec(any::<Limb>(), 1..8), b in vec(any::<Limb>(), 1..8)) {
        let mut r = vec![0; a.len() + b.len()];
        mpn::mul(&mut r, &a, &b);
        prop_assert_eq!(to_uint(&r), to_uint(&a) * to_uint(&b));
    }

    #[test]
    fn add_in_place_matches(mut a in vec(any::<Limb>(), 2..8), b in vec(any::<Limb>(), 1..=2)) {
        let want = to_uint(&a) + to_uint(&b);
        let cy = mpn::add_in_place(&mut a, &b);
        let got = to_uint(&a) + (BigUint::from(cy) << (LIMB_BITS * a.len()));
        prop_assert_eq!(got, want);
    }

    #[test]
    fn sumdiff_matches(a in vec(any::<Limb>(), 1..8), b_seed in any::<u64>()) {
        // Same-length second operand derived from the first.
        let b: Vec<Limb> = a.iter().map(|&x| x.wrapping_mul(b_seed).wrapping_add(1)).collect();
        let n = a.len();
        let mut t = vec![0; n];
        let mut u = vec![0; n];
        let cy = mpn::sumdiff_n(&mut t, &mut u, &a, &b);
        let base = BigUint::one() << (LIMB_BITS * n);
        let sum = to_uint(&t) + (BigUint::from(cy >> 1) << (LIMB_BITS * n));
        prop_assert_eq!(sum, to_uint(&a) + to_uint(&b));
        let diff = to_uint(&a) + (BigUint::from(cy & 1) * base) - to_uint(&b);
        prop_assert_eq!(to_uint(&u), diff);
    }

    #[test]
    fn mulmod_basecase_matches(mut a in vec(any::<Limb>(), 2), mut b in vec(any::<Limb>(), 2), c in 0u64..4) {
        let bits = 2 * LIMB_BITS;
        let p = (BigUint::one() << bits) + 1u8;
        // A set carry flag means the operand is exactly 2^bits.
        if c & 1 != 0 { a = vec![0; 2]; }
        if c & 2 != 0 { b = vec![0; 2]; }
        let va = to_uint(&a) + (BigUint::from(c & 1) << bits);
        let vb = to_uint(&b) + (BigUint::from((c >> 1) & 1) << bits);
        let mut r = vec![0; 2];
        let mut tt = vec![0; 4];
        let cy = mulmod_2expp1_basecase(&mut r, &a, &b, c, bits, &mut tt);
        let got = (to_uint(&r) + (BigUint::from(cy) << bits)) % &p;
        prop_assert_eq!(got, (va * vb) % &p);
    }
}
