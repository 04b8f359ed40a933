//! Round-trips: IFFT(FFT(A))[i] must equal `2n * A[i]` modulo `2^{wn}+1`
//! (`4n` for the √2 length-doubled transforms).

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use ssmul_arith::{Limb, SignedLimb, LIMB_BITS};
use ssmul_fft::{fft, ifft, new_table, Coeff, Scratch};

/// Deterministic “random” limb, LCG-based so failures reproduce.
fn det_limb(state: &mut u64) -> Limb {
    *state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
    *state ^ (*state >> 31)
}

fn fill_table(tbl: &mut [Coeff], l: usize, seed: u64) {
    let mut state = seed;
    for coeff in tbl.iter_mut() {
        for limb in coeff[..l].iter_mut() {
            *limb = det_limb(&mut state);
        }
        coeff[l] = 0;
    }
}

fn modulus(l: usize) -> BigInt {
    (BigInt::one() << (LIMB_BITS * l)) + 1
}

fn canon(x: &[Limb], p: &BigInt) -> BigInt {
    let l = x.len() - 1;
    let mut v = BigInt::zero();
    for &limb in x[..l].iter().rev() {
        v = (v << LIMB_BITS) + limb;
    }
    v += BigInt::from(x[l] as SignedLimb) << (LIMB_BITS * l);
    let r = v % p;
    if r.is_negative() {
        r + p
    } else {
        r
    }
}

fn snapshot(tbl: &[Coeff], p: &BigInt) -> Vec<BigInt> {
    tbl.iter().map(|c| canon(c, p)).collect()
}

fn roundtrip_case(n: usize, w: usize, seed: u64) {
    let l = (n * w) / LIMB_BITS;
    let p = modulus(l);
    let mut tbl = new_table(2 * n, l + 1);
    let mut sc = Scratch::new(l + 1);
    fill_table(&mut tbl, l, seed);
    let before = snapshot(&tbl, &p);

    fft::fft(&mut tbl, n, w, &mut sc);
    ifft::ifft(&mut tbl, n, w, &mut sc);

    for (i, orig) in before.iter().enumerate() {
        let want = (orig * (2 * n)) % &p;
        assert_eq!(canon(&tbl[i], &p), want, "slot {i} (n={n}, w={w})");
    }
}

#[test]
fn fft_ifft_roundtrip_small_rings() {
    roundtrip_case(4, 16, 1);
    roundtrip_case(16, 4, 2);
    roundtrip_case(32, 2, 3);
    roundtrip_case(64, 1, 4);
    roundtrip_case(64, 2, 5);
    roundtrip_case(128, 1, 6);
}

#[test]
fn fft_ifft_roundtrip_deep() {
    // Depth 10, one-bit root: 2048 coefficients over 2^1024 + 1.
    roundtrip_case(1024, 1, 7);
}

#[test]
fn fft_ifft_sqrt2_roundtrip() {
    // Length 4n; the inverse returns 4n times the input.
    for (n, w, seed) in [(64usize, 1usize, 8u64), (64, 3, 9), (32, 2, 10), (128, 1, 11)] {
        let l = (n * w) / LIMB_BITS;
        let p = modulus(l);
        let mut tbl = new_table(4 * n, l + 1);
        let mut sc = Scratch::new(l + 1);
        fill_table(&mut tbl, l, seed);
        let before = snapshot(&tbl, &p);

        fft::fft_sqrt2(&mut tbl, n, w, &mut sc);
        ifft::ifft_sqrt2(&mut tbl, n, w, &mut sc);

        for (i, orig) in before.iter().enumerate() {
            let want = (orig * (4 * n)) % &p;
            assert_eq!(canon(&tbl[i], &p), want, "slot {i} (n={n}, w={w})");
        }
    }
}

#[test]
fn fft_ifft_negacyclic_roundtrip() {
    for (n, w, seed) in [(16usize, 4usize, 12u64), (64, 1, 13), (64, 3, 14), (32, 2, 15)] {
        let l = (n * w) / LIMB_BITS;
        let p = modulus(l);
        let mut tbl = new_table(2 * n, l + 1);
        let mut sc = Scratch::new(l + 1);
        fill_table(&mut tbl, l, seed);
        let before = snapshot(&tbl, &p);

        fft::fft_negacyclic(&mut tbl, n, w, &mut sc);
        ifft::ifft_negacyclic(&mut tbl, n, w, &mut sc);

        for (i, orig) in before.iter().enumerate() {
            let want = (orig * (2 * n)) % &p;
            assert_eq!(canon(&tbl[i], &p), want, "slot {i} (n={n}, w={w})");
        }
    }
}
