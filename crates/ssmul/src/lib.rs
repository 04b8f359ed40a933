//! Schönhage–Strassen multiplication of large nonnegative integers.
//!
//! Integer multiplication reduces to a cyclic convolution of polynomial
//! coefficients living in `Z / (2^{wn} + 1)`, where all roots of unity are
//! powers of two; the product is recovered by carry propagation. The
//! transforms themselves live in `ssmul-fft`, the limb arithmetic in
//! `ssmul-arith`; this crate chooses parameters and runs the pipeline.
//!
//! Entry points:
//! - [`mul`]: full product of two limb vectors, parameters chosen
//!   automatically.
//! - [`mulmod_2expp1`]: product modulo `2^{nw} + 1`, recursing through a
//!   negacyclic convolution above the base-case threshold.
//!
//! Everything is single-threaded and allocation happens once per call, up
//! front. Invalid parameters (sizes that overflow the chosen transform)
//! are caller errors and abort.

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
    clippy::similar_names,
    clippy::too_many_arguments
)]

pub mod mul;
pub mod mulmod;
pub mod params;

pub use mul::{mul, mul_mfa_truncate_sqrt2, mul_truncate_sqrt2};
pub use mulmod::{fft_mulmod, mulmod_2expp1};
pub use params::{MulPlan, Strategy};
