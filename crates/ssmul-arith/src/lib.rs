//! Limb-level arithmetic for the SSMUL large-integer multiplier.
//!
//! - `mpn`: flat operations on little-endian limb vectors (add/sub with
//!   carry, shifts, fused sum/diff, schoolbook multiply).
//! - `fermat`: the same vectors viewed as residues modulo `2^{wn} + 1`,
//!   carried non-normalised with a signed overflow limb.
//! - `mulmod`: the base-case product modulo `2^{wn} + 1`.
//!
//! Everything here is straight-line slice code; the transform layers above
//! only ever touch limbs through these functions.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::many_single_char_names,
    clippy::similar_names
)]

pub mod fermat;
pub mod mpn;
pub mod mulmod;

/// Machine word making up large integers, little-endian limb order.
pub type Limb = u64;

/// Signed view of a limb; the top limb of a ring element is one of these.
pub type SignedLimb = i64;

/// Bit width of a [`Limb`].
pub const LIMB_BITS: usize = 64;
