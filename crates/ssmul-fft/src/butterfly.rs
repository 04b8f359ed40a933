//! Two-input butterfly operators.
//!
//! The forward butterfly computes `s = a + b`, `t = z^i (a - b)` for the
//! principal `2n`-th root `z = 2^w`; the inverse form undoes it with
//! divisions. The √2 flavours implement the odd-exponent case of the
//! doubled-length transform, where the root is
//! `(2^{3wn/4} - 2^{wn/4}) * 2^{(w-1)/2}`: one shifted sum/difference, a
//! rotation by half the ring width, and a subtract.
//!
//! Exponent wraps past the ring order flip the sign; every operator
//! reduces its exponent explicitly and applies the final negation itself.
//!
//! Outputs go to caller-provided slots (the scratch pair); inputs may be
//! consumed (the inverse forms shift their second input in place).

use ssmul_arith::{fermat, mpn, Limb, SignedLimb, LIMB_BITS};

/// Reduce a shift exponent modulo `m`, tracking the accumulated sign.
#[inline]
fn reduce_exponent(mut e: usize, m: usize) -> (usize, bool) {
    let mut negate = false;
    while e >= m {
        negate = !negate;
        e -= m;
    }
    (e, negate)
}

/// `s = a + b`, `t = 2^{iw} (a - b)` modulo `2^{wn} + 1`.
pub fn forward(s: &mut [Limb], t: &mut [Limb], a: &[Limb], b: &[Limb], i: usize, n: usize, w: usize) {
    let l = (w * n) / LIMB_BITS;
    let (i, negate) = reduce_exponent(i, n);
    let bits = i * w;
    let y = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    fermat::lshb_sumdiff(s, t, a, b, l, 0, y);
    fermat::mul_2exp(t, l, b1);
    if negate {
        mpn::neg_in_place(&mut t[..=l]);
    }
}

/// √2 forward butterfly for odd `w` and odd exponent `i` of the `4n`-th
/// root: multiply by `2^{j + wn/4 + ik}` (with `i = 2j + 1`, `w = 2k + 1`),
/// then by a further `2^{wn/2}`, and subtract.
pub fn forward_sqrt2(
    s: &mut [Limb],
    t: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
    i: usize,
    n: usize,
    w: usize,
    temp: &mut [Limb],
) {
    debug_assert!(w % 2 == 1 && i % 2 == 1);
    let wn = w * n;
    let l = wn / LIMB_BITS;
    let j = i / 2;
    let k = w / 2;

    let (bits, negate) = reduce_exponent(j + wn / 4 + i * k, wn);
    let y = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    fermat::lshb_sumdiff(s, t, a, b, l, 0, y);
    fermat::mul_2exp(t, l, b1);
    if negate {
        mpn::neg_in_place(&mut t[..=l]);
    }

    mul_2exp_half(t, temp, l);
    mpn::rsub_n_in_place(&mut t[..=l], &temp[..=l]);
}

/// `s = a + 2^{-iw} b`, `t = a - 2^{-iw} b` modulo `2^{wn} + 1`.
/// Consumes `b` (shifted in place).
pub fn inverse(
    s: &mut [Limb],
    t: &mut [Limb],
    a: &mut [Limb],
    b: &mut [Limb],
    i: usize,
    n: usize,
    w: usize,
) {
    let l = (w * n) / LIMB_BITS;
    let bits = i * w;
    let y = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    fermat::div_2exp(b, l, b1);
    fermat::sumdiff_rshb(s, t, a, b, l, 0, y);
}

/// √2 inverse butterfly: division by the odd-exponent root, expressed as
/// multiplication by `2^{2wn - j - ik - 1 + wn/4}` and the half-width
/// rotation. Consumes `b`.
pub fn inverse_sqrt2(
    s: &mut [Limb],
    t: &mut [Limb],
    a: &mut [Limb],
    b: &mut [Limb],
    i: usize,
    n: usize,
    w: usize,
    temp: &mut [Limb],
) {
    debug_assert!(w % 2 == 1 && i % 2 == 1);
    let wn = w * n;
    let l = wn / LIMB_BITS;
    let j = i / 2;
    let k = w / 2;

    let (bits, negate) = reduce_exponent(2 * wn - j - i * k - 1 + wn / 4, wn);
    let y2 = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    if b1 != 0 {
        fermat::mul_2exp(b, l, b1);
    }

    mul_2exp_half(b, temp, l);
    if negate {
        mpn::rsub_n_in_place(&mut b[..=l], &temp[..=l]);
    } else {
        mpn::sub_n_in_place(&mut b[..=l], &temp[..=l]);
    }

    // The remaining 2^{64 y2} factor becomes a right shift by l - y2 limbs.
    fermat::sumdiff_rshb(s, t, a, b, l, 0, l - y2);
}

/// Twiddle form of the forward butterfly: the two rotation amounts `b1`
/// and `b2` (in bits, modulo `2wn`) are supplied by the caller. Used by
/// the MFA column stage where the effective root differs per row.
pub fn forward_twiddle(
    s: &mut [Limb],
    t: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
    nw: usize,
    b1: usize,
    b2: usize,
) {
    let l = nw / LIMB_BITS;

    let (b1, negate1) = reduce_exponent(b1 % (2 * nw), nw);
    let x = b1 / LIMB_BITS;
    let b1 = b1 % LIMB_BITS;

    let (b2, negate2) = reduce_exponent(b2 % (2 * nw), nw);
    let y = b2 / LIMB_BITS;
    let b2 = b2 % LIMB_BITS;

    fermat::lshb_sumdiff(s, t, a, b, l, x, y);
    fermat::mul_2exp(s, l, b1);
    if negate1 {
        mpn::neg_in_place(&mut s[..=l]);
    }
    fermat::mul_2exp(t, l, b2);
    if negate2 {
        mpn::neg_in_place(&mut t[..=l]);
    }
}

/// Twiddle form of the inverse butterfly. Consumes both inputs.
pub fn inverse_twiddle(
    s: &mut [Limb],
    t: &mut [Limb],
    a: &mut [Limb],
    b: &mut [Limb],
    nw: usize,
    b1: usize,
    b2: usize,
) {
    let l = nw / LIMB_BITS;

    let (b1, negate1) = reduce_exponent(b1 % (2 * nw), nw);
    let x = b1 / LIMB_BITS;
    let b1 = b1 % LIMB_BITS;

    let (b2, negate2) = reduce_exponent(b2 % (2 * nw), nw);
    let y = b2 / LIMB_BITS;
    let b2 = b2 % LIMB_BITS;

    if negate1 {
        mpn::neg_in_place(&mut a[..=l]);
    }
    fermat::div_2exp(a, l, b1);
    if negate2 {
        mpn::neg_in_place(&mut b[..=l]);
    }
    fermat::div_2exp(b, l, b2);
    fermat::sumdiff_rshb(s, t, a, b, l, x, y);
}

/// Rotate `x` by `2^{wn/2}` into `temp`: the upper half of the body moves
/// down negated, the lower half moves up, the carry limb folds in, and an
/// odd body length costs one extra half-limb shift.
pub(crate) fn mul_2exp_half(x: &[Limb], temp: &mut [Limb], l: usize) {
    let y = l / 2;

    temp[y..l].copy_from_slice(&x[..l - y]);
    temp[l] = 0;
    let cy = mpn::neg(&mut temp[..y], &x[l - y..l]);
    let hi = x[l] as SignedLimb;
    if hi < 0 {
        mpn::add_1(&mut temp[y..=l], hi.unsigned_abs());
    } else {
        mpn::sub_1(&mut temp[y..=l], hi as Limb);
    }
    mpn::sub_1(&mut temp[y..=l], cy);

    if l % 2 == 1 {
        fermat::mul_2exp(temp, l, LIMB_BITS / 2);
    }
}
