//! Split/combine must be exact inverses on zero-padded coefficients.

use ssmul_arith::{Limb, LIMB_BITS};
use ssmul_fft::{new_table, pack};

fn det_limb(state: &mut u64) -> Limb {
    *state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
    *state ^ (*state >> 31)
}

fn det_vec(n: usize, seed: u64) -> Vec<Limb> {
    let mut state = seed;
    (0..n).map(|_| det_limb(&mut state)).collect()
}

#[test]
fn split_combine_limb_aligned() {
    let total = 40;
    let coeff_limbs = 3;
    let output_limbs = 8;
    let input = det_vec(total, 71);

    let mut poly = new_table(total / coeff_limbs + 2, output_limbs + 1);
    let len = pack::split(&mut poly, &input, coeff_limbs, output_limbs);
    assert_eq!(len, (total - 1) / coeff_limbs + 1);

    let mut res = vec![0; total];
    pack::combine(&mut res, &poly, len, coeff_limbs, output_limbs);
    assert_eq!(res, input);
}

#[test]
fn split_combine_bit_granular() {
    for (total, bits, output_limbs, seed) in [
        (40usize, 45usize, 4usize, 72u64),
        (64, 100, 6, 73),
        (17, 130, 6, 74),
        (33, 192, 8, 75), // limb-aligned fast path through the bits API
    ] {
        let input = det_vec(total, seed);
        let length = (LIMB_BITS * total - 1) / bits + 1;

        let mut poly = new_table(length + 1, output_limbs + 1);
        let len = pack::split_bits(&mut poly, &input, bits, output_limbs);
        assert_eq!(len, length);

        // Every coefficient fits its bit budget.
        for coeff in poly.iter().take(len) {
            let whole = bits / LIMB_BITS;
            if bits % LIMB_BITS != 0 {
                assert!(coeff[whole] < (1 << (bits % LIMB_BITS)));
                for &limb in &coeff[whole + 1..] {
                    assert_eq!(limb, 0);
                }
            }
        }

        let mut res = vec![0; total];
        let mut temp = vec![0; output_limbs + 1];
        pack::combine_bits(&mut res, &poly, len, bits, output_limbs, &mut temp);
        assert_eq!(res, input, "total={total} bits={bits}");
    }
}
