//! Transform parameter selection.
//!
//! All policies are table-free. The `mulmod` policy mirrors the shape the
//! recursion produces: operand bit counts there are powers of two (times a
//! small `w`), for which the divisions below are exact.

use ssmul_arith::LIMB_BITS;

/// Integer products with fewer total limbs than this go to the schoolbook
/// multiplier.
pub const MUL_FFT_THRESHOLD: usize = 512;

/// `mulmod` operands below this many limbs use the base-case product.
pub const MULMOD_FFT_THRESHOLD: usize = 250;

/// Transform strategy, fixed once per multiplication.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Straight truncated √2 transform over the whole length.
    TruncateSqrt2,
    /// Matrix Fourier driver, column/row split for cache locality.
    MfaTruncateSqrt2,
}

/// A chosen transform: `n = 2^depth`, coefficient ring `2^{nw} + 1`.
#[derive(Copy, Clone, Debug)]
pub struct MulPlan {
    /// log2 of the half transform length.
    pub depth: u32,
    /// Bits per root-of-unity step.
    pub w: usize,
    /// Which driver to run.
    pub strategy: Strategy,
}

/// Pick `(depth, w)` for a product of `n1 + n2` limbs: the smallest
/// transform whose per-coefficient bit budget `(nw - (depth+1))/2` covers
/// the inputs within the `4n` available coefficients.
#[must_use]
pub fn mul_params(n1: usize, n2: usize) -> MulPlan {
    let bits = (n1 + n2) * LIMB_BITS;

    for depth in 6..=30u32 {
        let n = 1usize << depth;
        for w in [1usize, 2] {
            let bits1 = (n * w - (depth as usize + 1)) / 2;
            let j1 = (n1 * LIMB_BITS - 1) / bits1 + 1;
            let j2 = (n2 * LIMB_BITS - 1) / bits1 + 1;
            if j1 + j2 - 1 <= 4 * n {
                let strategy = if depth >= 9 {
                    Strategy::MfaTruncateSqrt2
                } else {
                    Strategy::TruncateSqrt2
                };
                return MulPlan { depth, w, strategy };
            }
        }
    }
    unreachable!("no transform depth covers a {bits}-bit product")
}

/// Pick the inner `(depth, w)` for a `mulmod` of `n * w` bits, the
/// original table-free policy: start one short of `log2(sqrt(bits))`,
/// rescale `w` to keep `nw` at the coefficient modulus size, and bump the
/// depth for very large operands.
#[must_use]
pub fn mulmod_params(n: usize, w: usize) -> (u32, usize) {
    let bits = n * w;

    let mut depth = 1u32;
    while (1usize << (2 * depth)) < bits {
        depth += 1;
    }
    depth -= 1;

    let mut w1 = bits >> (2 * depth);

    depth -= 3;
    w1 *= LIMB_BITS;

    if n > (1 << 15) || (n == (1 << 15) && w == 2) {
        depth += 1;
        w1 /= 4;
    }
    if n > (1 << 17) {
        depth += 1;
        w1 /= 4;
    }

    (depth, w1)
}
