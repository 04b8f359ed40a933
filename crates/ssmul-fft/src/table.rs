//! Coefficient tables and scratch slots.
//!
//! A transform works on a table of owned coefficient buffers. Kernels never
//! copy coefficient bodies between slots: a butterfly writes into the two
//! scratch slots and the caller swaps them into the table, an O(1) pointer
//! exchange. Bit-reversal passes likewise permute slots by swapping.

use ssmul_arith::Limb;

/// One coefficient: `l + 1` limbs, the last being the signed carry limb.
pub type Coeff = Box<[Limb]>;

/// Allocate a table of `len` zeroed coefficients of `size` limbs each.
#[must_use]
pub fn new_table(len: usize, size: usize) -> Vec<Coeff> {
    (0..len).map(|_| vec![0; size].into_boxed_slice()).collect()
}

/// The per-transform scratch: two butterfly output slots and the temp
/// buffer the √2 operators rotate through. Borrowed mutably by every
/// kernel; allocated once with the plan.
pub struct Scratch {
    /// First butterfly output slot.
    pub t1: Coeff,
    /// Second butterfly output slot.
    pub t2: Coeff,
    /// Rotation buffer for the √2 operators.
    pub temp: Coeff,
}

impl Scratch {
    /// Scratch for coefficients of `size` limbs.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            t1: vec![0; size].into_boxed_slice(),
            t2: vec![0; size].into_boxed_slice(),
            temp: vec![0; size].into_boxed_slice(),
        }
    }
}

/// Disjoint mutable borrows of slots `i < j` of one table.
#[inline]
pub fn pair_mut<T>(slots: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j, "pair_mut needs i < j, got {i} >= {j}");
    let (lo, hi) = slots.split_at_mut(j);
    (&mut lo[i], &mut hi[0])
}
