//! Integer multiplication drivers.
//!
//! Both drivers follow the same sequence: split each operand into
//! `bits1`-bit coefficients, run a truncated √2 forward transform on each,
//! multiply coefficients pointwise in `2^{nw} + 1` (recursing through
//! `mulmod`), inverse-transform, divide out the `4n` scale factor and
//! recombine. They differ only in which transform pair they run.

use crate::params::{self, MulPlan, Strategy};
use crate::mulmod::mulmod_2expp1;
use ssmul_arith::{fermat, mpn, Limb, LIMB_BITS};
use ssmul_fft::{fft, ifft, mfa, new_table, pack, revbin, Coeff, Scratch};

/// Multiply `i1` by `i2` into `r1`, which must hold exactly
/// `i1.len() + i2.len()` limbs. Small products use the schoolbook
/// multiplier; large ones pick a transform plan automatically.
pub fn mul(r1: &mut [Limb], i1: &[Limb], i2: &[Limb]) {
    assert_eq!(
        r1.len(),
        i1.len() + i2.len(),
        "result must have space for every product limb"
    );

    if i1.len() + i2.len() < params::MUL_FFT_THRESHOLD {
        if i1.len() >= i2.len() {
            mpn::mul(r1, i1, i2);
        } else {
            mpn::mul(r1, i2, i1);
        }
        return;
    }

    let MulPlan { depth, w, strategy } = params::mul_params(i1.len(), i2.len());
    tracing::debug!(n1 = i1.len(), n2 = i2.len(), depth, w, ?strategy, "fft multiply");

    match strategy {
        Strategy::TruncateSqrt2 => mul_truncate_sqrt2(r1, i1, i2, depth, w),
        Strategy::MfaTruncateSqrt2 => mul_mfa_truncate_sqrt2(r1, i1, i2, depth, w),
    }
}

/// Shared pointwise stage: normalise the coefficient pair and multiply
/// into `ii[k]` through the `mulmod` recursion.
fn pointwise(
    ii: &mut [Coeff],
    jj: &mut [Coeff],
    k: usize,
    n: usize,
    w: usize,
    limbs: usize,
    slot: &mut [Limb],
    tt: &mut [Limb],
) {
    fermat::norm(&mut ii[k], limbs);
    fermat::norm(&mut jj[k], limbs);
    let c = ii[k][limbs].wrapping_add(2 * jj[k][limbs]);
    slot.copy_from_slice(&ii[k]);
    let cy = mulmod_2expp1(&mut ii[k], slot, &jj[k], c, n, w, tt);
    ii[k][limbs] = cy;
}

/// Multiply via the plain truncated √2 transform with `n = 2^depth`.
///
/// Requires `(n*w - (depth+1))/2`-bit coefficients to cover the operands
/// within `4n` slots; violations are caller errors and abort.
pub fn mul_truncate_sqrt2(r1: &mut [Limb], i1: &[Limb], i2: &[Limb], depth: u32, w: usize) {
    let n = 1usize << depth;
    let bits1 = (n * w - (depth as usize + 1)) / 2;
    let limbs = (n * w) / LIMB_BITS;
    let size = limbs + 1;

    let j1 = (i1.len() * LIMB_BITS - 1) / bits1 + 1;
    let j2 = (i2.len() * LIMB_BITS - 1) / bits1 + 1;
    assert!(j1 + j2 - 1 <= 4 * n, "operands overflow the transform length");
    assert_eq!((n * w) % LIMB_BITS, 0, "nw must be a whole number of limbs");

    let trunc = (2 * ((j1 + j2) / 2)).max(2 * n);

    let mut ii = new_table(4 * n, size);
    let mut jj = new_table(4 * n, size);
    let mut sc = Scratch::new(size);
    let mut tt: Vec<Limb> = vec![0; 2 * size];
    let mut slot: Box<[Limb]> = vec![0; size].into_boxed_slice();

    let j1 = pack::split_bits(&mut ii, i1, bits1, limbs);
    fft::fft_truncate_sqrt2(&mut ii, n, w, &mut sc, trunc);

    let j2 = pack::split_bits(&mut jj, i2, bits1, limbs);
    fft::fft_truncate_sqrt2(&mut jj, n, w, &mut sc, trunc);

    for k in 0..trunc {
        pointwise(&mut ii, &mut jj, k, n, w, limbs, &mut slot, &mut tt);
    }

    ifft::ifft_truncate_sqrt2(&mut ii, n, w, &mut sc, trunc);
    for k in 0..trunc {
        fermat::div_2exp(&mut ii[k], limbs, depth as usize + 2);
        fermat::norm(&mut ii[k], limbs);
    }

    mpn::zero(r1);
    pack::combine_bits(r1, &ii, j1 + j2 - 1, bits1, limbs, &mut tt[..limbs + 1]);
}

/// Multiply via the matrix Fourier truncated √2 transform, column count
/// `2^{⌊depth/2⌋}`. The driver of choice for megabit operands.
pub fn mul_mfa_truncate_sqrt2(r1: &mut [Limb], i1: &[Limb], i2: &[Limb], depth: u32, w: usize) {
    let n = 1usize << depth;
    let bits1 = (n * w - (depth as usize + 1)) / 2;
    let limbs = (n * w) / LIMB_BITS;
    let size = limbs + 1;
    let cols = 1usize << (depth / 2);
    let rows = (2 * n) / cols;
    let row_depth = rows.trailing_zeros();

    let j1 = (i1.len() * LIMB_BITS - 1) / bits1 + 1;
    let j2 = (i2.len() * LIMB_BITS - 1) / bits1 + 1;
    assert!(j1 + j2 - 1 <= 4 * n, "operands overflow the transform length");
    assert_eq!((n * w) % LIMB_BITS, 0, "nw must be a whole number of limbs");

    // Smallest multiple of 2*cols covering the output coefficients.
    let trunc = (2 * cols * ((j1 + j2 + 2 * cols - 2) / (2 * cols))).max(2 * n);

    let mut ii = new_table(4 * n, size);
    let mut jj = new_table(4 * n, size);
    let mut sc = Scratch::new(size);
    let mut tt: Vec<Limb> = vec![0; 2 * size];
    let mut slot: Box<[Limb]> = vec![0; size].into_boxed_slice();

    let j1 = pack::split_bits(&mut ii, i1, bits1, limbs);
    mfa::mfa_fft_truncate_sqrt2(&mut ii, n, w, &mut sc, cols, trunc);

    let j2 = pack::split_bits(&mut jj, i2, bits1, limbs);
    mfa::mfa_fft_truncate_sqrt2(&mut jj, n, w, &mut sc, cols, trunc);

    // First half is fully transformed; the second half only in the rows
    // the truncation kept, laid out in bit-reversed row order.
    for k in 0..2 * n {
        pointwise(&mut ii, &mut jj, k, n, w, limbs, &mut slot, &mut tt);
    }
    let trunc2 = (trunc - 2 * n) / cols;
    for s in 0..trunc2 {
        let row = revbin(s, row_depth);
        for t in 0..cols {
            let k = 2 * n + row * cols + t;
            pointwise(&mut ii, &mut jj, k, n, w, limbs, &mut slot, &mut tt);
        }
    }

    mfa::mfa_ifft_truncate_sqrt2(&mut ii, n, w, &mut sc, cols, trunc);
    for k in 0..trunc {
        fermat::div_2exp(&mut ii[k], limbs, depth as usize + 2);
        fermat::norm(&mut ii[k], limbs);
    }

    mpn::zero(r1);
    pack::combine_bits(r1, &ii, j1 + j2 - 1, bits1, limbs, &mut tt[..limbs + 1]);
}
