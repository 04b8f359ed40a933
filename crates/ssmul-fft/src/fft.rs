//! Forward transforms: recursive radix-2 decimation in frequency.
//!
//! A length-`2n` transform butterflies element `i` against element `n + i`
//! and recurses on the two halves with the squared root (`2w` bits).
//! Outputs land in bit-reversed order. The √2 kernels double the length to
//! `4n`; the truncated kernels compute only the first `trunc` outputs,
//! assuming inputs past `trunc` are zero (`truncate`) or meaningful
//! (`truncate1`). Twisted kernels additionally rotate by `z^{c·i}` and are
//! what the matrix driver runs down its columns.
//!
//! Every butterfly writes the scratch pair and is swapped into the table;
//! bodies are never copied between slots.

use crate::table::{pair_mut, Coeff, Scratch};
use crate::{butterfly, twiddle};
use core::mem::swap;
use ssmul_arith::{mpn, LIMB_BITS};

/// Forward FFT of length `2n` on consecutive slots, root `2^w`.
pub fn fft(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    if n == 1 {
        butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[0], &ii[1], 0, 1, w);
        swap(&mut ii[0], &mut sc.t1);
        swap(&mut ii[1], &mut sc.t2);
        return;
    }

    for i in 0..n {
        butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[n + i], &mut sc.t2);
    }

    fft(&mut ii[..n], n / 2, 2 * w, sc);
    fft(&mut ii[n..], n / 2, 2 * w, sc);
}

/// Forward FFT of length `2n` on slots `0, stride, 2*stride, …`, with an
/// extra twist of `z^{c·i}` per output (`z` spanning `ws` bits, `i`
/// starting at `r` and advancing by `rs`). This is the column transform of
/// the matrix driver.
pub fn fft_twisted(
    ii: &mut [Coeff],
    stride: usize,
    n: usize,
    w: usize,
    sc: &mut Scratch,
    ws: usize,
    r: usize,
    c: usize,
    rs: usize,
) {
    if n == 1 {
        let tw1 = r * c;
        let tw2 = tw1 + rs * c;
        butterfly::forward_twiddle(
            &mut sc.t1,
            &mut sc.t2,
            &ii[0],
            &ii[stride],
            n * w,
            tw1 * ws,
            tw2 * ws,
        );
        swap(&mut ii[0], &mut sc.t1);
        swap(&mut ii[stride], &mut sc.t2);
        return;
    }

    for i in 0..n {
        butterfly::forward(
            &mut sc.t1,
            &mut sc.t2,
            &ii[i * stride],
            &ii[(n + i) * stride],
            i,
            n,
            w,
        );
        swap(&mut ii[i * stride], &mut sc.t1);
        swap(&mut ii[(n + i) * stride], &mut sc.t2);
    }

    fft_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs);
    fft_twisted(&mut ii[n * stride..], stride, n / 2, 2 * w, sc, ws, r + rs, c, 2 * rs);
}

/// Forward FFT of length `4n` using the √2 root of the `2^{wn}+1` ring.
///
/// For even `w` the root is an honest power of two and this is a plain
/// length-`4n` transform at `w/2` bits; odd `w` runs a custom first layer
/// alternating shift and √2 butterflies, then two plain halves.
pub fn fft_sqrt2(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    if w % 2 == 0 {
        fft(ii, 2 * n, w / 2, sc);
        return;
    }

    let mut i = 0;
    while i < 2 * n {
        butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[2 * n + i], i / 2, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;

        butterfly::forward_sqrt2(
            &mut sc.t1,
            &mut sc.t2,
            &ii[i],
            &ii[2 * n + i],
            i,
            n,
            w,
            &mut sc.temp,
        );
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;
    }

    fft(&mut ii[..2 * n], n, w, sc);
    fft(&mut ii[2 * n..], n, w, sc);
}

/// Truncated forward FFT: compute the first `trunc` outputs of a length
/// `2n` transform whose inputs past `trunc` are already meaningful
/// (in contrast to [`fft_truncate`], nothing is assumed zero).
/// `trunc` must be even and at most `2n`.
pub fn fft_truncate1(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    let size = (w * n) / LIMB_BITS + 1;

    if trunc == 0 {
        return;
    }
    if trunc == 2 * n {
        fft(ii, n, w, sc);
        return;
    }

    if trunc <= n {
        for i in 0..n {
            let (a, b) = pair_mut(ii, i, i + n);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
        }
        fft_truncate1(ii, n / 2, 2 * w, sc, trunc);
    } else {
        for i in 0..n {
            butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);
        }

        fft(&mut ii[..n], n / 2, 2 * w, sc);
        fft_truncate1(&mut ii[n..], n / 2, 2 * w, sc, trunc - n);
    }
}

/// Twisted sibling of [`fft_truncate1`], for the matrix driver's columns.
pub fn fft_truncate1_twisted(
    ii: &mut [Coeff],
    stride: usize,
    n: usize,
    w: usize,
    sc: &mut Scratch,
    ws: usize,
    r: usize,
    c: usize,
    rs: usize,
    trunc: usize,
) {
    let size = (w * n) / LIMB_BITS + 1;

    if trunc == 0 {
        return;
    }
    if trunc == 2 * n {
        fft_twisted(ii, stride, n, w, sc, ws, r, c, rs);
        return;
    }

    if trunc <= n {
        for i in 0..n {
            let (a, b) = pair_mut(ii, i * stride, (i + n) * stride);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
        }
        fft_truncate1_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs, trunc);
    } else {
        for i in 0..n {
            butterfly::forward(
                &mut sc.t1,
                &mut sc.t2,
                &ii[i * stride],
                &ii[(n + i) * stride],
                i,
                n,
                w,
            );
            swap(&mut ii[i * stride], &mut sc.t1);
            swap(&mut ii[(n + i) * stride], &mut sc.t2);
        }

        fft_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs);
        fft_truncate1_twisted(
            &mut ii[n * stride..],
            stride,
            n / 2,
            2 * w,
            sc,
            ws,
            r + rs,
            c,
            2 * rs,
            trunc - n,
        );
    }
}

/// Truncated forward FFT assuming inputs `trunc..2n` are zero. The missing
/// right-half inputs are synthesised by twiddling the surviving left half.
/// `trunc` must be even and at most `2n`.
pub fn fft_truncate(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    if trunc == 2 * n {
        fft(ii, n, w, sc);
        return;
    }

    if trunc <= n {
        fft_truncate(ii, n / 2, 2 * w, sc, trunc);
    } else {
        for i in 0..trunc - n {
            butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);
        }

        for i in trunc..2 * n {
            let (src, dst) = pair_mut(ii, i - n, i);
            twiddle::apply(dst, src, i - n, n, w);
        }

        fft(&mut ii[..n], n / 2, 2 * w, sc);
        fft_truncate1(&mut ii[n..], n / 2, 2 * w, sc, trunc - n);
    }
}

/// Truncated √2 forward FFT of effective length `trunc <= 4n`, `trunc`
/// even and at least `2n`, inputs `trunc..4n` zero.
pub fn fft_truncate_sqrt2(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    if trunc == 4 * n {
        fft_sqrt2(ii, n, w, sc);
        return;
    }

    if w % 2 == 0 {
        fft_truncate(ii, 2 * n, w / 2, sc, trunc);
        return;
    }

    debug_assert!(trunc >= 2 * n && trunc % 2 == 0);

    let mut i = 0;
    while i < trunc - 2 * n {
        butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[2 * n + i], i / 2, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;

        butterfly::forward_sqrt2(
            &mut sc.t1,
            &mut sc.t2,
            &ii[i],
            &ii[2 * n + i],
            i,
            n,
            w,
            &mut sc.temp,
        );
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;
    }

    let mut i = trunc;
    while i < 4 * n {
        {
            let (src, dst) = pair_mut(ii, i - 2 * n, i);
            twiddle::apply(dst, src, i / 2 - n, n, w);
        }

        i += 1;

        {
            let (src, dst) = pair_mut(ii, i - 2 * n, i);
            twiddle::apply_sqrt2(dst, src, i - 2 * n, n, w, &mut sc.temp);
        }

        i += 1;
    }

    fft(&mut ii[..2 * n], n, w, sc);
    fft_truncate1(&mut ii[2 * n..], n, w, sc, trunc - 2 * n);
}

/// Negacyclic forward transform of length `2n`: pre-weight input `i` by
/// the `4n`-th root raised to `i` (so the cyclic transform that follows
/// computes a convolution modulo `x^{2n} + 1`), then an ordinary FFT.
pub fn fft_negacyclic(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    debug_assert!(n >= 2, "negacyclic layer pairs even/odd slots");

    if w % 2 == 1 {
        let mut i = 0;
        while i < n {
            twiddle::apply(&mut sc.t1, &ii[i], i / 2, n, w);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply(&mut sc.t1, &ii[n + i], (n + i) / 2, n, w);
            swap(&mut ii[n + i], &mut sc.t1);

            butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);

            i += 1;

            twiddle::apply_sqrt2(&mut sc.t1, &ii[i], i, n, w, &mut sc.temp);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply_sqrt2(&mut sc.t1, &ii[n + i], n + i, n, w, &mut sc.temp);
            swap(&mut ii[n + i], &mut sc.t1);

            butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);

            i += 1;
        }
    } else {
        for i in 0..n {
            twiddle::apply(&mut sc.t1, &ii[i], i, 2 * n, w / 2);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply(&mut sc.t1, &ii[n + i], n + i, 2 * n, w / 2);
            swap(&mut ii[n + i], &mut sc.t1);

            butterfly::forward(&mut sc.t1, &mut sc.t2, &ii[i], &ii[n + i], i, n, w);
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);
        }
    }

    fft(&mut ii[..n], n / 2, 2 * w, sc);
    fft(&mut ii[n..], n / 2, 2 * w, sc);
}
