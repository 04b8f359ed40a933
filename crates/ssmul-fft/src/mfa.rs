//! Matrix Fourier drivers.
//!
//! A length `2n = rows × cols` transform runs as: column transforms with a
//! per-entry twist `z^{r·c}` (the twisted kernels), bit-reverse each
//! column, then row transforms, bit-reverse each row. Everything stays in
//! one table; only slot pointers move. The truncated √2 form prefaces the
//! column stage with the single cross-half butterfly layer of the
//! length-`4n` transform, restricted to the `trunc - 2n` live entries,
//! and prunes rows the truncation leaves dead.
//!
//! `cols` is the column count (`n1` in the classical description),
//! canonically `2^{⌊d/2⌋}`; `trunc` must be a multiple of `2·cols`.

use crate::table::{Coeff, Scratch};
use crate::{butterfly, fft, ifft, revbin, twiddle};
use core::mem::swap;
use ssmul_arith::{mpn, LIMB_BITS};

fn log2(x: usize) -> u32 {
    debug_assert!(x.is_power_of_two());
    x.trailing_zeros()
}

/// Bit-reverse the `count` slots `base, base + stride, …` of the table.
fn bit_reverse_stride(ii: &mut [Coeff], base: usize, stride: usize, count: usize) {
    let depth = log2(count);
    for j in 0..count {
        let s = revbin(j, depth);
        if j < s {
            ii.swap(base + j * stride, base + s * stride);
        }
    }
}

/// Forward MFA of length `2n` with `cols` columns.
pub fn mfa_fft(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, cols: usize) {
    let rows = (2 * n) / cols;

    for i in 0..cols {
        // Length-`rows` transform down column i, twisted by z^{r·i}.
        fft::fft_twisted(&mut ii[i..], cols, rows / 2, w * cols, sc, w, 0, i, 1);
        bit_reverse_stride(ii, i, cols, rows);
    }

    for i in 0..rows {
        fft::fft(&mut ii[i * cols..(i + 1) * cols], cols / 2, w * rows, sc);
        bit_reverse_stride(ii, i * cols, 1, cols);
    }
}

/// Inverse MFA of length `2n` with `cols` columns.
pub fn mfa_ifft(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, cols: usize) {
    let rows = (2 * n) / cols;

    for i in 0..rows {
        bit_reverse_stride(ii, i * cols, 1, cols);
        ifft::ifft(&mut ii[i * cols..(i + 1) * cols], cols / 2, w * rows, sc);
    }

    for i in 0..cols {
        bit_reverse_stride(ii, i, cols, rows);
        ifft::ifft_twisted(&mut ii[i..], cols, rows / 2, w * cols, sc, w, 0, i, 1);
    }
}

/// Truncated √2 forward MFA of length `4n`: two half-size MFAs prefaced by
/// the cross-half butterfly layer. `trunc` must be a multiple of
/// `2 * cols` and lie in `[2n, 4n]`.
pub fn mfa_fft_truncate_sqrt2(
    ii: &mut [Coeff],
    n: usize,
    w: usize,
    sc: &mut Scratch,
    cols: usize,
    trunc: usize,
) {
    let rows = (2 * n) / cols;
    let trunc2 = (trunc - 2 * n) / cols;
    let depth = log2(rows);

    debug_assert_eq!(trunc % (2 * cols), 0);
    debug_assert!(trunc >= 2 * n && trunc <= 4 * n);

    // First half: cross-half butterflies for the live entries of each
    // column, twiddles standing in for the dead ones, then a full MFA.
    for i in 0..cols {
        if w % 2 == 1 {
            let mut j = i;
            while j < trunc - 2 * n {
                if j % 2 == 0 {
                    butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[j], &ii[2 * n + j], j / 2, n, w);
                } else {
                    butterfly::forward_sqrt2(
                        &mut sc.t1,
                        &mut sc.t2,
                        &ii[j],
                        &ii[2 * n + j],
                        j,
                        n,
                        w,
                        &mut sc.temp,
                    );
                }
                swap(&mut ii[j], &mut sc.t1);
                swap(&mut ii[2 * n + j], &mut sc.t2);
                j += cols;
            }
            while j < 2 * n {
                let (src, dst) = crate::pair_mut(ii, j, 2 * n + j);
                if i % 2 == 0 {
                    twiddle::apply(dst, src, j / 2, n, w);
                } else {
                    twiddle::apply_sqrt2(dst, src, j, n, w, &mut sc.temp);
                }
                j += cols;
            }
        } else {
            let mut j = i;
            while j < trunc - 2 * n {
                butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[j], &ii[2 * n + j], j, 2 * n, w / 2);
                swap(&mut ii[j], &mut sc.t1);
                swap(&mut ii[2 * n + j], &mut sc.t2);
                j += cols;
            }
            while j < 2 * n {
                let (src, dst) = crate::pair_mut(ii, j, 2 * n + j);
                twiddle::apply(dst, src, j, 2 * n, w / 2);
                j += cols;
            }
        }

        fft::fft_twisted(&mut ii[i..], cols, rows / 2, w * cols, sc, w, 0, i, 1);
        bit_reverse_stride(ii, i, cols, rows);
    }

    for i in 0..rows {
        fft::fft(&mut ii[i * cols..(i + 1) * cols], cols / 2, w * rows, sc);
        bit_reverse_stride(ii, i * cols, 1, cols);
    }

    // Second half: truncated columns, and only the rows the truncation
    // keeps alive, visited in bit-reversed order.
    let half = 2 * n;

    for i in 0..cols {
        fft::fft_truncate1_twisted(
            &mut ii[half + i..],
            cols,
            rows / 2,
            w * cols,
            sc,
            w,
            0,
            i,
            1,
            trunc2,
        );
        bit_reverse_stride(ii, half + i, cols, rows);
    }

    for s in 0..trunc2 {
        let i = revbin(s, depth);
        fft::fft(&mut ii[half + i * cols..half + (i + 1) * cols], cols / 2, w * rows, sc);
        bit_reverse_stride(ii, half + i * cols, 1, cols);
    }
}

/// Truncated √2 inverse MFA, mirror of [`mfa_fft_truncate_sqrt2`].
pub fn mfa_ifft_truncate_sqrt2(
    ii: &mut [Coeff],
    n: usize,
    w: usize,
    sc: &mut Scratch,
    cols: usize,
    trunc: usize,
) {
    let rows = (2 * n) / cols;
    let trunc2 = (trunc - 2 * n) / cols;
    let depth = log2(rows);
    let size = (w * n) / LIMB_BITS + 1;

    debug_assert_eq!(trunc % (2 * cols), 0);
    debug_assert!(trunc >= 2 * n && trunc <= 4 * n);

    // First half: a full inverse MFA.
    for i in 0..rows {
        bit_reverse_stride(ii, i * cols, 1, cols);
        ifft::ifft(&mut ii[i * cols..(i + 1) * cols], cols / 2, w * rows, sc);
    }

    for i in 0..cols {
        bit_reverse_stride(ii, i, cols, rows);
        ifft::ifft_twisted(&mut ii[i..], cols, rows / 2, w * cols, sc, w, 0, i, 1);
    }

    // Second half: only the live rows carry transform data.
    let half = 2 * n;

    for s in 0..trunc2 {
        let i = revbin(s, depth);
        bit_reverse_stride(ii, half + i * cols, 1, cols);
        ifft::ifft(&mut ii[half + i * cols..half + (i + 1) * cols], cols / 2, w * rows, sc);
    }

    for i in 0..cols {
        for j in 0..trunc2 {
            let s = revbin(j, depth);
            if j < s {
                ii.swap(half + i + j * cols, half + i + s * cols);
            }
        }

        // Rebuild the dead rows of this column from the first half.
        for j in trunc2..rows {
            let u = i + j * cols;
            let (src, dst) = crate::pair_mut(ii, u, half + u);
            if w % 2 == 1 {
                if i % 2 == 0 {
                    twiddle::apply(dst, src, u / 2, n, w);
                } else {
                    twiddle::apply_sqrt2(dst, src, u, n, w, &mut sc.temp);
                }
            } else {
                twiddle::apply(dst, src, u, 2 * n, w / 2);
            }
        }

        ifft::ifft_truncate1_twisted(
            &mut ii[half + i..],
            cols,
            rows / 2,
            w * cols,
            sc,
            w,
            0,
            i,
            1,
            trunc2,
        );

        // Final cross-half inverse butterflies for the live entries…
        if w % 2 == 1 {
            let mut j = i;
            while j < trunc - 2 * n {
                {
                    let (a, b) = crate::pair_mut(ii, j, half + j);
                    if j % 2 == 0 {
                        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, j / 2, n, w);
                    } else {
                        butterfly::inverse_sqrt2(&mut sc.t1, &mut sc.t2, a, b, j, n, w, &mut sc.temp);
                    }
                }
                swap(&mut ii[j], &mut sc.t1);
                swap(&mut ii[half + j], &mut sc.t2);
                j += cols;
            }
        } else {
            let mut j = i;
            while j < trunc - 2 * n {
                {
                    let (a, b) = crate::pair_mut(ii, j, half + j);
                    butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, j, 2 * n, w / 2);
                }
                swap(&mut ii[j], &mut sc.t1);
                swap(&mut ii[half + j], &mut sc.t2);
                j += cols;
            }
        }

        // …and double the rest, standing in for the dead upper half.
        let mut j = trunc - 2 * n + i;
        while j < 2 * n {
            mpn::lshift_in_place(&mut ii[j][..size], 1);
            j += cols;
        }
    }
}
