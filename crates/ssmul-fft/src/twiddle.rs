//! Standalone coefficient rotations: `r = z^i * a`.
//!
//! Unlike the butterflies these have no partner input; the truncated
//! kernels use them to synthesise outputs that the pruned recursion never
//! produced, and the negacyclic transform uses the half-exponent variant
//! to pre-weight its inputs.

use crate::butterfly::mul_2exp_half;
use ssmul_arith::{fermat, mpn, Limb, SignedLimb, LIMB_BITS};

/// `r = 2^{iw} * a` modulo `2^{wn} + 1` for `i < 2n`. `r` and `a` must be
/// distinct slots.
pub fn apply(r: &mut [Limb], a: &[Limb], i: usize, n: usize, w: usize) {
    let l = (n * w) / LIMB_BITS;
    let mut i = i;
    let mut negate = false;
    while i >= n {
        negate = !negate;
        i -= n;
    }
    let bits = w * i;
    let x = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    if x != 0 {
        // Rotate up by x limbs; the limbs that fall off the top re-enter
        // negated at the bottom.
        r[x..l].copy_from_slice(&a[..l - x]);
        r[l] = 0;
        let cy = mpn::neg(&mut r[..x], &a[l - x..l]);
        fermat::add_small(&mut r[x..=l], -(a[l] as SignedLimb));
        mpn::sub_1(&mut r[x..=l], cy);
        if negate {
            mpn::neg_in_place(&mut r[..=l]);
        }
        fermat::mul_2exp(r, l, b1);
    } else if negate {
        mpn::neg(&mut r[..=l], &a[..=l]);
        fermat::mul_2exp(r, l, b1);
    } else {
        r[..=l].copy_from_slice(&a[..=l]);
        fermat::mul_2exp(r, l, b1);
    }
}

/// √2 variant: `r = z^i * a` where `z` is the `4n`-th root, for odd `w`
/// and odd `i < 4n`.
pub fn apply_sqrt2(r: &mut [Limb], a: &[Limb], i: usize, n: usize, w: usize, temp: &mut [Limb]) {
    debug_assert!(w % 2 == 1 && i % 2 == 1);
    let wn = w * n;
    let l = wn / LIMB_BITS;
    let j = i / 2;
    let k = w / 2;

    let mut bits = j + wn / 4 + i * k;
    let mut negate = false;
    while bits >= wn {
        negate = !negate;
        bits -= wn;
    }
    let y = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    if y != 0 {
        temp[y..l].copy_from_slice(&a[..l - y]);
        let cy = mpn::neg(&mut temp[..y], &a[l - y..l]);
        temp[l] = 0;
        fermat::add_small(&mut temp[y..=l], -(a[l] as SignedLimb));
        mpn::sub_1(&mut temp[y..=l], cy);
        fermat::mul_2exp(temp, l, b1);
        r[..=l].copy_from_slice(&temp[..=l]);
    } else {
        r[..=l].copy_from_slice(&a[..=l]);
        fermat::mul_2exp(r, l, b1);
    }
    if negate {
        mpn::neg_in_place(&mut r[..=l]);
    }

    mul_2exp_half(r, temp, l);
    mpn::rsub_n_in_place(&mut r[..=l], &temp[..=l]);
}

/// Negacyclic pre-weight: multiply `a` by `2^{iw/2}` for `i < 4n`, the
/// `2n`-th root of `-1` raised to `i`.
///
/// The bit-level part of the rotation happens in place in `a`; when a limb
/// rotation is also needed it lands in `r` and the function returns `true`.
/// A `false` return means the result is still in `a`.
pub fn apply_negacyclic(r: &mut [Limb], a: &mut [Limb], i: usize, n: usize, w: usize) -> bool {
    let l = (n * w) / LIMB_BITS;
    let mut i = i;
    let mut negate = false;
    while i >= 2 * n {
        negate = !negate;
        i -= 2 * n;
    }
    let bits = (w * i) / 2;
    let x = bits / LIMB_BITS;
    let b1 = bits % LIMB_BITS;

    if negate {
        mpn::neg_in_place(&mut a[..=l]);
    }
    fermat::mul_2exp(a, l, b1);
    if x != 0 {
        r[x..l].copy_from_slice(&a[..l - x]);
        r[l] = 0;
        let cy = mpn::neg(&mut r[..x], &a[l - x..l]);
        fermat::add_small(&mut r[x..=l], -(a[l] as SignedLimb));
        mpn::sub_1(&mut r[x..=l], cy);
        return true;
    }
    false
}
