#![allow(clippy::many_single_char_names)]

//! Exact arithmetic for row reduction.
//!
//! The [`field`] module defines what the reducer needs from its scalars, [`prime`] handles the
//! characteristic of prime fields and [`matrix`] holds dense matrices together with the
//! elementary row operations.

pub mod field;
pub mod matrix;
pub mod prime;

pub use field::{Field, FieldElement, Fp, ParseElementError, Rationals, Reals};
pub use matrix::{Matrix, MatrixError, Subspace};
pub use prime::ValidPrime;
