mod matrix_inner;
mod subspace;

#[cfg(feature = "proptest")]
pub mod arbitrary;

pub use matrix_inner::{Matrix, MatrixError};
pub use subspace::Subspace;
