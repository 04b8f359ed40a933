//! Inverse transforms, mirrors of the forward kernels.
//!
//! Inputs arrive in bit-reversed order (as the forward kernels leave
//! them): recurse first, butterfly after. A full inverse returns `2n`
//! times the original coefficients (`4n` for the √2 forms); the truncated
//! inverses double the coefficients the pruned forward never touched to
//! compensate, and rebuild positions past `trunc` from the surviving half
//! with forward twiddles.

use crate::table::{pair_mut, Coeff, Scratch};
use crate::{butterfly, twiddle};
use core::mem::swap;
use ssmul_arith::{fermat, mpn, LIMB_BITS};

/// Inverse FFT of length `2n` on consecutive slots.
pub fn ifft(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    if n == 1 {
        let (a, b) = pair_mut(ii, 0, 1);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, 0, 1, w);
        swap(&mut ii[0], &mut sc.t1);
        swap(&mut ii[1], &mut sc.t2);
        return;
    }

    ifft(&mut ii[..n], n / 2, 2 * w, sc);
    ifft(&mut ii[n..], n / 2, 2 * w, sc);

    for i in 0..n {
        let (a, b) = pair_mut(ii, i, n + i);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[n + i], &mut sc.t2);
    }
}

/// Inverse of [`crate::fft::fft_twisted`]: undo the `z^{c·i}` twist and the
/// column transform in one pass.
pub fn ifft_twisted(
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
        let (a, b) = pair_mut(ii, 0, stride);
        butterfly::inverse_twiddle(&mut sc.t1, &mut sc.t2, a, b, n * w, tw1 * ws, tw2 * ws);
        swap(&mut ii[0], &mut sc.t1);
        swap(&mut ii[stride], &mut sc.t2);
        return;
    }

    ifft_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs);
    ifft_twisted(&mut ii[n * stride..], stride, n / 2, 2 * w, sc, ws, r + rs, c, 2 * rs);

    for i in 0..n {
        let (a, b) = pair_mut(ii, i * stride, (n + i) * stride);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
        swap(&mut ii[i * stride], &mut sc.t1);
        swap(&mut ii[(n + i) * stride], &mut sc.t2);
    }
}

/// Inverse FFT of length `4n` with the √2 root.
pub fn ifft_sqrt2(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    if w % 2 == 0 {
        ifft(ii, 2 * n, w / 2, sc);
        return;
    }

    ifft(&mut ii[..2 * n], n, w, sc);
    ifft(&mut ii[2 * n..], n, w, sc);

    let mut i = 0;
    while i < 2 * n {
        {
            let (a, b) = pair_mut(ii, i, 2 * n + i);
            butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i / 2, n, w);
        }
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;

        {
            let (a, b) = pair_mut(ii, i, 2 * n + i);
            butterfly::inverse_sqrt2(&mut sc.t1, &mut sc.t2, a, b, i, n, w, &mut sc.temp);
        }
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;
    }
}

/// Truncated inverse, `truncate1` flavour: positions `trunc..2n` of the
/// (bit-reversed) input hold transform data, positions `0..trunc` hold the
/// wanted outputs on exit. `trunc` even, at most `2n`.
pub fn ifft_truncate1(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    let size = (w * n) / LIMB_BITS + 1;

    if trunc == 0 {
        return;
    }
    if trunc == 2 * n {
        ifft(ii, n, w, sc);
        return;
    }

    if trunc <= n {
        for i in trunc..n {
            let (a, b) = pair_mut(ii, i, i + n);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
            fermat::div_2exp(a, size - 1, 1);
        }

        ifft_truncate1(ii, n / 2, 2 * w, sc, trunc);

        for i in 0..trunc {
            // ii[i] = 2*ii[i] - ii[n+i]
            let (a, b) = pair_mut(ii, i, n + i);
            mpn::lshift_in_place(&mut a[..size], 1);
            mpn::sub_n_in_place(&mut a[..size], &b[..size]);
        }
        return;
    }

    ifft(&mut ii[..n], n / 2, 2 * w, sc);

    for i in trunc - n..n {
        {
            let (a, b) = pair_mut(ii, i, i + n);
            mpn::rsub_n_in_place(&mut b[..size], &a[..size]);
            twiddle::apply(&mut sc.t1, b, i, n, w);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
        }
        swap(&mut ii[i + n], &mut sc.t1);
    }

    ifft_truncate1(&mut ii[n..], n / 2, 2 * w, sc, trunc - n);

    for i in 0..trunc - n {
        let (a, b) = pair_mut(ii, i, n + i);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[n + i], &mut sc.t2);
    }
}

/// Twisted sibling of [`ifft_truncate1`] for the matrix driver's columns.
pub fn ifft_truncate1_twisted(
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
        ifft_twisted(ii, stride, n, w, sc, ws, r, c, rs);
        return;
    }

    if trunc <= n {
        for i in trunc..n {
            let (a, b) = pair_mut(ii, i * stride, (i + n) * stride);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
            fermat::div_2exp(a, size - 1, 1);
        }

        ifft_truncate1_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs, trunc);

        for i in 0..trunc {
            let (a, b) = pair_mut(ii, i * stride, (n + i) * stride);
            mpn::lshift_in_place(&mut a[..size], 1);
            mpn::sub_n_in_place(&mut a[..size], &b[..size]);
        }
        return;
    }

    ifft_twisted(ii, stride, n / 2, 2 * w, sc, ws, r, c, 2 * rs);

    for i in trunc - n..n {
        {
            let (a, b) = pair_mut(ii, i * stride, (i + n) * stride);
            mpn::rsub_n_in_place(&mut b[..size], &a[..size]);
            twiddle::apply(&mut sc.t1, b, i, n, w);
            mpn::add_n_in_place(&mut a[..size], &b[..size]);
        }
        swap(&mut ii[(i + n) * stride], &mut sc.t1);
    }

    ifft_truncate1_twisted(
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

    for i in 0..trunc - n {
        let (a, b) = pair_mut(ii, i * stride, (n + i) * stride);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
        swap(&mut ii[i * stride], &mut sc.t1);
        swap(&mut ii[(n + i) * stride], &mut sc.t2);
    }
}

/// Truncated inverse assuming (conceptually) zero inputs past `trunc`:
/// outputs `0..trunc` are exact, each doubled position compensating the
/// transform data the forward never produced. `trunc` even, at most `2n`.
pub fn ifft_truncate(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    let size = (w * n) / LIMB_BITS + 1;

    if trunc == 2 * n {
        ifft(ii, n, w, sc);
        return;
    }

    if trunc <= n {
        ifft_truncate(ii, n / 2, 2 * w, sc, trunc);

        for i in 0..trunc {
            mpn::lshift_in_place(&mut ii[i][..size], 1);
        }
        return;
    }

    ifft(&mut ii[..n], n / 2, 2 * w, sc);

    for i in trunc..2 * n {
        let (src, dst) = pair_mut(ii, i - n, i);
        twiddle::apply(dst, src, i - n, n, w);
    }

    ifft_truncate1(&mut ii[n..], n / 2, 2 * w, sc, trunc - n);

    for i in 0..trunc - n {
        let (a, b) = pair_mut(ii, i, n + i);
        butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[n + i], &mut sc.t2);
    }

    for i in trunc - n..n {
        mpn::lshift_in_place(&mut ii[i][..size], 1);
    }
}

/// Truncated √2 inverse of effective length `trunc`, `trunc` even, between
/// `2n` and `4n`.
pub fn ifft_truncate_sqrt2(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch, trunc: usize) {
    let size = (w * n) / LIMB_BITS + 1;

    if trunc == 4 * n {
        ifft_sqrt2(ii, n, w, sc);
        return;
    }

    if w % 2 == 0 {
        ifft_truncate(ii, 2 * n, w / 2, sc, trunc);
        return;
    }

    debug_assert!(trunc >= 2 * n && trunc % 2 == 0);

    ifft(&mut ii[..2 * n], n, w, sc);

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

    ifft_truncate1(&mut ii[2 * n..], n, w, sc, trunc - 2 * n);

    let mut i = 0;
    while i < trunc - 2 * n {
        {
            let (a, b) = pair_mut(ii, i, 2 * n + i);
            butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i / 2, n, w);
        }
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;

        {
            let (a, b) = pair_mut(ii, i, 2 * n + i);
            butterfly::inverse_sqrt2(&mut sc.t1, &mut sc.t2, a, b, i, n, w, &mut sc.temp);
        }
        swap(&mut ii[i], &mut sc.t1);
        swap(&mut ii[2 * n + i], &mut sc.t2);

        i += 1;
    }

    for i in trunc - 2 * n..2 * n {
        mpn::lshift_in_place(&mut ii[i][..size], 1);
    }
}

/// Negacyclic inverse: ordinary inverse halves, then fused inverse
/// butterflies and un-weighting twiddles (the inverses of the forward
/// pre-weights).
pub fn ifft_negacyclic(ii: &mut [Coeff], n: usize, w: usize, sc: &mut Scratch) {
    debug_assert!(n >= 2, "negacyclic layer pairs even/odd slots");

    ifft(&mut ii[..n], n / 2, 2 * w, sc);
    ifft(&mut ii[n..], n / 2, 2 * w, sc);

    if w % 2 == 1 {
        let mut i = 0;
        while i < n {
            {
                let (a, b) = pair_mut(ii, i, n + i);
                butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
            }
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);

            twiddle::apply(&mut sc.t1, &ii[i], 2 * n - i / 2, n, w);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply(&mut sc.t1, &ii[n + i], 2 * n - (n + i) / 2, n, w);
            swap(&mut ii[n + i], &mut sc.t1);

            i += 1;

            {
                let (a, b) = pair_mut(ii, i, n + i);
                butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
            }
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);

            twiddle::apply_sqrt2(&mut sc.t1, &ii[i], 4 * n - i, n, w, &mut sc.temp);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply_sqrt2(&mut sc.t1, &ii[n + i], 3 * n - i, n, w, &mut sc.temp);
            swap(&mut ii[n + i], &mut sc.t1);

            i += 1;
        }
    } else {
        for i in 0..n {
            {
                let (a, b) = pair_mut(ii, i, n + i);
                butterfly::inverse(&mut sc.t1, &mut sc.t2, a, b, i, n, w);
            }
            swap(&mut ii[i], &mut sc.t1);
            swap(&mut ii[n + i], &mut sc.t2);

            twiddle::apply(&mut sc.t1, &ii[i], 4 * n - i, 2 * n, w / 2);
            swap(&mut ii[i], &mut sc.t1);
            twiddle::apply(&mut sc.t1, &ii[n + i], 3 * n - i, 2 * n, w / 2);
            swap(&mut ii[n + i], &mut sc.t1);
        }
    }
}
