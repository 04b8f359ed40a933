//! Base-case product modulo `2^{bits} + 1`.
//!
//! Operands are normalised: an `l`-limb body plus a carry that is folded
//! into the packed flag argument `c = c1 + 2*c2`. A set flag means the
//! operand is exactly `2^{bits}`, i.e. `-1` in the ring, which turns the
//! product into a negation of the other operand.

use crate::{mpn, Limb, LIMB_BITS};

/// `r = a * b mod 2^{bits} + 1` by schoolbook product and wraparound fold.
///
/// `a` and `b` are `l`-limb bodies (`l = bits / LIMB_BITS`), `c` packs the
/// two carry limbs as `c1 + 2*c2`, `scratch` must hold `2l` limbs. Writes
/// the `l`-limb body of the result into `r` and returns the new carry limb.
///
/// No aliasing between `r` and the inputs.
pub fn mulmod_2expp1_basecase(
    r: &mut [Limb],
    a: &[Limb],
    b: &[Limb],
    c: Limb,
    bits: usize,
    scratch: &mut [Limb],
) -> Limb {
    let l = bits / LIMB_BITS;
    debug_assert_eq!(bits % LIMB_BITS, 0);
    debug_assert!(a.len() >= l && b.len() >= l && r.len() >= l);
    debug_assert!(scratch.len() >= 2 * l);

    match c & 3 {
        1 => neg_mod(&mut r[..l], &b[..l]),
        2 => neg_mod(&mut r[..l], &a[..l]),
        3 => {
            // (-1) * (-1) = 1
            mpn::zero(&mut r[..l]);
            r[0] = 1;
            0
        }
        _ => {
            let tt = &mut scratch[..2 * l];
            mpn::mul(tt, &a[..l], &b[..l]);
            let (lo, hi) = tt.split_at(l);
            r[..l].copy_from_slice(lo);
            let bw = mpn::sub_n_in_place(&mut r[..l], hi);
            if bw != 0 {
                // lo < hi: the wrapped value is short by 2^{bits}; adding 1
                // restores it modulo p.
                mpn::add_1(&mut r[..l], 1)
            } else {
                0
            }
        }
    }
}

/// `r = -a mod 2^{bits} + 1` for an `l`-limb body `a` in `[0, 2^{bits})`.
/// Returns the carry limb of the result.
fn neg_mod(r: &mut [Limb], a: &[Limb]) -> Limb {
    let nonzero = mpn::neg(r, a);
    if nonzero == 0 {
        // -0 is 0.
        return 0;
    }
    // r = 2^{bits} - a; one more gives p - a, possibly exactly 2^{bits}.
    mpn::add_1(r, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // p = 2^128 + 1, two limbs.
    const BITS: usize = 128;

    fn mm(a: [Limb; 2], b: [Limb; 2], c: Limb) -> ([Limb; 2], Limb) {
        let mut r = [0; 2];
        let mut tt = [0; 4];
        let cy = mulmod_2expp1_basecase(&mut r, &a, &b, c, BITS, &mut tt);
        (r, cy)
    }

    #[test]
    fn small_products_stay_small() {
        let (r, cy) = mm([3, 0], [5, 0], 0);
        assert_eq!((r, cy), ([15, 0], 0));
    }

    #[test]
    fn minus_one_times_x_negates() {
        // a = -1 (flag), b = 2 -> r = p - 2 = 2^128 - 1.
        let (r, cy) = mm([0, 0], [2, 0], 1);
        assert_eq!((r, cy), ([!0, !0], 0));

        // b = 1 -> r = p - 1 = 2^128, i.e. body 0 and carry 1.
        let (r, cy) = mm([0, 0], [1, 0], 1);
        assert_eq!((r, cy), ([0, 0], 1));

        // b = 0 -> r = 0.
        let (r, cy) = mm([0, 0], [0, 0], 1);
        assert_eq!((r, cy), ([0, 0], 0));
    }

    #[test]
    fn minus_one_squared_is_one() {
        let (r, cy) = mm([0, 0], [0, 0], 3);
        assert_eq!((r, cy), ([1, 0], 0));
    }

    #[test]
    fn wraparound_fold() {
        // (2^64)^2 = 2^128 = p - 1, representable only as body 0, carry 1.
        let (r, cy) = mm([0, 1], [0, 1], 0);
        assert_eq!((r, cy), ([0, 0], 1));
    }
}
