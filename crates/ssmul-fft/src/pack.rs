//! Packing integers into coefficient tables and back.
//!
//! `split_bits` chops a limb array into zero-padded coefficients of `bits`
//! bits each; `combine_bits` adds shifted coefficients back into a limb
//! array. When `bits` is limb-aligned both collapse to strided copies and
//! adds. On polynomials whose coefficients are nonnegative and fit in
//! `bits` bits, `combine_bits` is the exact inverse of `split_bits`.

use crate::table::Coeff;
use ssmul_arith::{mpn, Limb, LIMB_BITS};

/// Split `limbs` into coefficients of `coeff_limbs` whole limbs each,
/// zero-padding every slot to `output_limbs + 1` limbs. Returns the number
/// of coefficients written.
pub fn split(
    poly: &mut [Coeff],
    limbs: &[Limb],
    coeff_limbs: usize,
    output_limbs: usize,
) -> usize {
    let total_limbs = limbs.len();
    let length = (total_limbs - 1) / coeff_limbs + 1;

    let mut skip = 0;
    let mut i = 0;
    while skip + coeff_limbs <= total_limbs {
        mpn::zero(&mut poly[i][..=output_limbs]);
        poly[i][..coeff_limbs].copy_from_slice(&limbs[skip..skip + coeff_limbs]);
        skip += coeff_limbs;
        i += 1;
    }
    if i < length {
        mpn::zero(&mut poly[i][..=output_limbs]);
    }
    if total_limbs > skip {
        poly[i][..total_limbs - skip].copy_from_slice(&limbs[skip..]);
    }

    length
}

/// Split `limbs` into coefficients of `bits` bits each (not necessarily
/// limb-aligned), zero-padded to `output_limbs + 1` limbs. Returns the
/// number of coefficients written.
pub fn split_bits(poly: &mut [Coeff], limbs: &[Limb], bits: usize, output_limbs: usize) -> usize {
    let top_bits = bits % LIMB_BITS;
    if top_bits == 0 {
        return split(poly, limbs, bits / LIMB_BITS, output_limbs);
    }

    let total_limbs = limbs.len();
    let length = (LIMB_BITS * total_limbs - 1) / bits + 1;
    let coeff_limbs = bits / LIMB_BITS + 1;
    let mask = (1 << top_bits) - 1;

    let mut shift_bits = 0;
    let mut idx = 0usize;

    for i in 0..length - 1 {
        mpn::zero(&mut poly[i][..=output_limbs]);
        if shift_bits == 0 {
            poly[i][..coeff_limbs].copy_from_slice(&limbs[idx..idx + coeff_limbs]);
            poly[i][coeff_limbs - 1] &= mask;
            idx += coeff_limbs - 1;
            shift_bits += top_bits;
        } else {
            // The tail coefficient before the last may reach past the
            // input; missing limbs read as zero.
            let take = coeff_limbs.min(total_limbs - idx);
            mpn::rshift(&mut poly[i][..take], &limbs[idx..idx + take], shift_bits);
            idx += coeff_limbs - 1;
            shift_bits += top_bits;
            if shift_bits >= LIMB_BITS {
                idx += 1;
                if idx < total_limbs {
                    poly[i][coeff_limbs - 1] +=
                        limbs[idx] << (LIMB_BITS - (shift_bits - top_bits));
                }
                shift_bits -= LIMB_BITS;
            }
            poly[i][coeff_limbs - 1] &= mask;
        }
    }

    mpn::zero(&mut poly[length - 1][..=output_limbs]);
    let limbs_left = total_limbs - idx;
    if shift_bits == 0 {
        poly[length - 1][..limbs_left].copy_from_slice(&limbs[idx..]);
    } else {
        mpn::rshift(
            &mut poly[length - 1][..limbs_left],
            &limbs[idx..],
            shift_bits,
        );
    }

    length
}

/// Add `length` coefficients of `output_limbs` limbs each into `res`, each
/// shifted up by a further `coeff_limbs` whole limbs. `res` must be zeroed
/// in advance.
pub fn combine(
    res: &mut [Limb],
    poly: &[Coeff],
    length: usize,
    coeff_limbs: usize,
    output_limbs: usize,
) {
    let total_limbs = res.len();

    let mut skip = 0;
    let mut i = 0;
    while i < length && skip + output_limbs <= total_limbs {
        let end = total_limbs.min(skip + output_limbs + 1);
        mpn::add_in_place(&mut res[skip..end], &poly[i][..output_limbs]);
        i += 1;
        skip += coeff_limbs;
    }
    while skip < total_limbs && i < length {
        let take = (total_limbs - skip).min(output_limbs);
        mpn::add_n_in_place(&mut res[skip..skip + take], &poly[i][..take]);
        i += 1;
        skip += coeff_limbs;
    }
}

/// Add `length` coefficients back into `res` at successive offsets of
/// `bits` bits. `res` must be zeroed in advance; `temp` needs
/// `output_limbs + 1` limbs for the unaligned shifts.
pub fn combine_bits(
    res: &mut [Limb],
    poly: &[Coeff],
    length: usize,
    bits: usize,
    output_limbs: usize,
    temp: &mut [Limb],
) {
    let top_bits = bits % LIMB_BITS;
    if top_bits == 0 {
        combine(res, poly, length, bits / LIMB_BITS, output_limbs);
        return;
    }

    let total_limbs = res.len();
    let coeff_limbs = bits / LIMB_BITS + 1;

    let mut shift_bits = 0;
    let mut off = 0usize;
    let mut i = 0;

    while i < length && off + output_limbs < total_limbs {
        if shift_bits == 0 {
            mpn::add_in_place(
                &mut res[off..off + output_limbs + 1],
                &poly[i][..output_limbs],
            );
        } else {
            mpn::lshift(
                &mut temp[..=output_limbs],
                &poly[i][..=output_limbs],
                shift_bits,
            );
            mpn::add_n_in_place(&mut res[off..off + output_limbs + 1], &temp[..=output_limbs]);
        }
        shift_bits += top_bits;
        off += coeff_limbs - 1;
        if shift_bits >= LIMB_BITS {
            off += 1;
            shift_bits -= LIMB_BITS;
        }
        i += 1;
    }

    while off < total_limbs && i < length {
        let take = total_limbs - off;
        if shift_bits == 0 {
            mpn::add_n_in_place(&mut res[off..], &poly[i][..take]);
        } else {
            mpn::lshift(
                &mut temp[..=output_limbs],
                &poly[i][..=output_limbs],
                shift_bits,
            );
            mpn::add_n_in_place(&mut res[off..], &temp[..take]);
        }
        shift_bits += top_bits;
        off += coeff_limbs - 1;
        if shift_bits >= LIMB_BITS {
            off += 1;
            shift_bits -= LIMB_BITS;
        }
        i += 1;
    }
}
