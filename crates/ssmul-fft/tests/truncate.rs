//! Truncated transforms: prefix equivalence against the full FFT, and
//! truncated round-trips.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use ssmul_arith::{Limb, SignedLimb, LIMB_BITS};
use ssmul_fft::{fft, ifft, new_table, Coeff, Scratch};

fn det_limb(state: &mut u64) -> Limb {
    *state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
    *state ^ (*state >> 31)
}

fn fill_table(tbl: &mut [Coeff], l: usize, live: usize, seed: u64) {
    let mut state = seed;
    for coeff in tbl.iter_mut().take(live) {
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

fn clone_table(tbl: &[Coeff]) -> Vec<Coeff> {
    tbl.iter().cloned().collect()
}

/// `fft_truncate` must agree with the full transform on the first `trunc`
/// slots whenever inputs past `trunc` are zero.
#[test]
fn truncate_matches_full_prefix() {
    for (n, w, trunc, seed) in [
        (64usize, 1usize, 80usize, 21u64),
        (64, 1, 64, 22),
        (64, 2, 100, 23),
        (32, 2, 40, 24),
    ] {
        let l = (n * w) / LIMB_BITS;
        let p = modulus(l);
        let mut full = new_table(2 * n, l + 1);
        let mut sc = Scratch::new(l + 1);
        fill_table(&mut full, l, trunc, seed);
        let mut pruned = clone_table(&full);

        fft::fft(&mut full, n, w, &mut sc);
        fft::fft_truncate(&mut pruned, n, w, &mut sc, trunc);

        for i in 0..trunc {
            assert_eq!(
                canon(&pruned[i], &p),
                canon(&full[i], &p),
                "slot {i} (n={n}, w={w}, trunc={trunc})"
            );
        }
    }
}

/// The scenario at real size: n = 1024, trunc = 1536 against the full
/// 2048-point transform.
#[test]
fn truncate_matches_full_prefix_deep() {
    let (n, w, trunc) = (1024usize, 1usize, 1536usize);
    let l = (n * w) / LIMB_BITS;
    let p = modulus(l);
    let mut full = new_table(2 * n, l + 1);
    let mut sc = Scratch::new(l + 1);
    fill_table(&mut full, l, trunc, 25);
    let mut pruned = clone_table(&full);

    fft::fft(&mut full, n, w, &mut sc);
    fft::fft_truncate(&mut pruned, n, w, &mut sc, trunc);

    for i in 0..trunc {
        assert_eq!(canon(&pruned[i], &p), canon(&full[i], &p), "slot {i}");
    }
}

/// Truncated round-trip: the inverse recovers `2n` times the inputs the
/// truncation kept.
#[test]
fn truncate_roundtrip() {
    for (n, w, trunc, seed) in [
        (64usize, 1usize, 80usize, 26u64),
        (64, 2, 100, 27),
        (128, 1, 190, 28),
        (32, 2, 34, 29),
    ] {
        let l = (n * w) / LIMB_BITS;
        let p = modulus(l);
        let mut tbl = new_table(2 * n, l + 1);
        let mut sc = Scratch::new(l + 1);
        fill_table(&mut tbl, l, trunc, seed);
        let before: Vec<BigInt> = tbl.iter().map(|c| canon(c, &p)).collect();

        fft::fft_truncate(&mut tbl, n, w, &mut sc, trunc);
        ifft::ifft_truncate(&mut tbl, n, w, &mut sc, trunc);

        for (i, orig) in before.iter().enumerate().take(trunc) {
            let want = (orig * (2 * n)) % &p;
            assert_eq!(canon(&tbl[i], &p), want, "slot {i} (n={n}, w={w}, trunc={trunc})");
        }
    }
}

/// √2 truncated round-trip: `4n` times the inputs, for `trunc` between
/// `2n` and `4n`.
#[test]
fn truncate_sqrt2_roundtrip() {
    for (n, w, trunc, seed) in [
        (64usize, 1usize, 192usize, 30u64),
        (64, 1, 130, 31),
        (64, 1, 128, 35), // exactly 2n: nothing survives in the upper half
        (64, 3, 200, 32),
        (32, 2, 84, 33),
        (64, 1, 256, 34),
    ] {
        let l = (n * w) / LIMB_BITS;
        let p = modulus(l);
        let mut tbl = new_table(4 * n, l + 1);
        let mut sc = Scratch::new(l + 1);
        fill_table(&mut tbl, l, trunc, seed);
        let before: Vec<BigInt> = tbl.iter().map(|c| canon(c, &p)).collect();

        fft::fft_truncate_sqrt2(&mut tbl, n, w, &mut sc, trunc);
        ifft::ifft_truncate_sqrt2(&mut tbl, n, w, &mut sc, trunc);

        for (i, orig) in before.iter().enumerate().take(trunc) {
            let want = (orig * (4 * n)) % &p;
            assert_eq!(canon(&tbl[i], &p), want, "slot {i} (n={n}, w={w}, trunc={trunc})");
        }
    }
}
