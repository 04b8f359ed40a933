//! Products modulo `2^{nw} + 1`.
//!
//! Small operands go straight to the schoolbook base case. Large ones run
//! a negacyclic convolution: split into `2n` coefficients, weight by a
//! `2n`-th root of `-1`, cyclic FFT, pointwise products (recursing into
//! this entry point), inverse, then recombine.
//!
//! Coefficients of the negacyclic product overflow the inner ring by a few
//! bits, so the driver also runs the naive length-`2n` convolution of the
//! low limbs of the inputs. Together with the value modulo `2^{nw'} + 1`
//! that recovers each coefficient exactly (the inner modulus is `1` modulo
//! `2^{64}`), and tells which coefficients went negative so the combine
//! stage can subtract the wrapped modulus again.

use crate::params;
use ssmul_arith::{fermat, mpn, mulmod::mulmod_2expp1_basecase, Limb, SignedLimb, LIMB_BITS};
use ssmul_fft::{fft, ifft, new_table, pack, Scratch};

/// `r = a * b mod 2^{nw} + 1`.
///
/// `a` and `b` are `l`-limb bodies (`l = nw / LIMB_BITS`) with their carry
/// limbs packed into `c = c1 + 2*c2`; `scratch` needs `2l + 2` limbs. The
/// body of the result lands in `r[..l]` and the new carry limb is
/// returned. `r` must not alias the inputs.
pub fn mulmod_2expp1(
    r: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
    c: Limb,
    n: usize,
    w: usize,
    scratch: &mut [Limb],
) -> Limb {
    let bits = n * w;
    let limbs = bits / LIMB_BITS;
    assert_eq!(bits % LIMB_BITS, 0, "nw must be a whole number of limbs");

    // An operand equal to -1 short-circuits to a negation at any size.
    if c & 3 != 0 || limbs < params::MULMOD_FFT_THRESHOLD {
        return mulmod_2expp1_basecase(r, a, b, c, bits, scratch);
    }

    let (depth, w1) = params::mulmod_params(n, w);
    fft_mulmod(r, a, b, limbs, depth, w1);
    r[limbs]
}

/// Negacyclic convolution driver for `r1 = i1 * i2 mod 2^{r_limbs·64} + 1`
/// with inner transform length `2^{depth+1}` over `2^{2^depth · w} + 1`.
///
/// `r1` needs `r_limbs + 1` limbs; the carry lands in `r1[r_limbs]`.
pub fn fft_mulmod(
    r1: &mut [Limb],
    i1: &[Limb],
    i2: &[Limb],
    r_limbs: usize,
    depth: u32,
    w: usize,
) {
    let n = 1usize << depth;
    let bits1 = (r_limbs * LIMB_BITS) / (2 * n);
    let limbs = (n * w) / LIMB_BITS;
    let size = limbs + 1;

    // The coefficient patch-up below needs limb-aligned splitting and a
    // CRT-recoverable coefficient bound; the parameter policy guarantees
    // both for the sizes the recursion produces.
    assert_eq!(bits1 % LIMB_BITS, 0, "unsupported mulmod operand size");
    debug_assert!(2 * bits1 + depth as usize + 2 <= n * w + LIMB_BITS - 1);

    tracing::debug!(r_limbs, depth, w, bits1, "mulmod via negacyclic transform");

    let mut ii = new_table(2 * n, size);
    let mut jj = new_table(2 * n, size);
    let mut sc = Scratch::new(size);
    let mut ii0: Vec<Limb> = vec![0; 2 * n];
    let mut jj0: Vec<Limb> = vec![0; 2 * n];
    let mut rlow: Vec<Limb> = vec![0; 2 * n];
    let mut tt: Vec<Limb> = vec![0; 2 * size];
    let mut slot: Box<[Limb]> = vec![0; size].into_boxed_slice();

    pack::split_bits(&mut ii, &i1[..r_limbs], bits1, limbs);
    for k in 0..2 * n {
        ii0[k] = ii[k][0];
    }
    fft::fft_negacyclic(&mut ii, n, w, &mut sc);
    for k in 0..2 * n {
        fermat::norm(&mut ii[k], limbs);
    }

    pack::split_bits(&mut jj, &i2[..r_limbs], bits1, limbs);
    for k in 0..2 * n {
        jj0[k] = jj[k][0];
    }
    fft::fft_negacyclic(&mut jj, n, w, &mut sc);

    for k in 0..2 * n {
        fermat::norm(&mut jj[k], limbs);
        let c = ii[k][limbs].wrapping_add(2 * jj[k][limbs]);
        slot.copy_from_slice(&ii[k]);
        let cy = mulmod_2expp1(&mut ii[k], &slot, &jj[k], c, n, w, &mut tt);
        ii[k][limbs] = cy;
    }

    ifft::ifft_negacyclic(&mut ii, n, w, &mut sc);

    naive_convolution(&mut rlow, &ii0, &jj0);

    for k in 0..2 * n {
        fermat::div_2exp(&mut ii[k], limbs, depth as usize + 1);
        fermat::norm(&mut ii[k], limbs);

        // CRT patch: rlow[k] holds the true coefficient modulo 2^64; the
        // difference to the ring value counts the modulus wraps.
        let t = ii[k][limbs];
        let x = rlow[k].wrapping_sub(ii[k][0]);
        ii[k][limbs] = x;
        let cy2 = mpn::add_1(&mut ii[k][..=limbs], x);
        let (sum, carry) = ii[k][limbs].overflowing_add(t);
        ii[k][limbs] = sum;
        rlow[k] = Limb::from(carry) + cy2;
    }

    mpn::zero(&mut r1[..=r_limbs]);
    pack::combine_bits(
        &mut r1[..=r_limbs],
        &ii,
        2 * n - 1,
        bits1,
        limbs + 1,
        &mut tt[..limbs + 2],
    );

    // Coefficients that wrapped (went negative, or overflowed into the
    // patch carry) each contributed a spurious multiple of the inner
    // modulus; subtract it back out window by window.
    let limb_add = bits1 / LIMB_BITS;
    let mut ll = 0;
    for k in 0..2 * n - 2 {
        if rlow[k] != 0 {
            mpn::sub_1(&mut r1[ll + 1..=r_limbs], 1);
        } else if (ii[k][limbs] as SignedLimb) < 0 {
            mpn::sub_1(&mut r1[ll + 1..=r_limbs], 1);
            mpn::sub_1(&mut r1[ll + limbs + 1..=r_limbs], 1);
        }
        ll += limb_add;
    }
    // Penultimate coefficient: its top bit fell outside the window.
    let k = 2 * n - 2;
    if rlow[k] != 0 || (ii[k][limbs] as SignedLimb) < 0 {
        mpn::sub_1(&mut r1[ll + 1..=r_limbs], 1);
    }

    // The final coefficient wraps around the modulus.
    let last = &ii[2 * n - 1];
    let cy = mpn::add_n_in_place(&mut r1[r_limbs - limb_add..r_limbs], &last[..limb_add]);
    r1[r_limbs] = r1[r_limbs].wrapping_add(cy);
    let c2 = mpn::sub_n_in_place(&mut r1[..limbs + 1 - limb_add], &last[limb_add..=limbs]);
    fermat::add_small(&mut r1[limbs + 1 - limb_add..=r_limbs], -(c2 as SignedLimb));
    fermat::norm(r1, r_limbs);
}

/// Naive negacyclic convolution of the low limbs, exact modulo `2^64`.
pub fn naive_convolution(r: &mut [Limb], a: &[Limb], b: &[Limb]) {
    let m = r.len();
    debug_assert!(a.len() == m && b.len() == m);

    for i in 0..m {
        r[i] = a[0].wrapping_mul(b[i]);
    }
    for i in 1..m {
        for j in 0..m - i {
            r[i + j] = r[i + j].wrapping_add(a[i].wrapping_mul(b[j]));
        }
        for j in m - i..m {
            r[i + j - m] = r[i + j - m].wrapping_sub(a[i].wrapping_mul(b[j]));
        }
    }
}
