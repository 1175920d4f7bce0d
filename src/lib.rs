#![allow(clippy::many_single_char_names)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::if_not_else)]
#![warn(clippy::needless_continue)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::explicit_iter_loop)]

//! Row echelon and reduced row echelon forms with a record of every row operation.
//!
//! The entry point is [`reduce`], which takes a [`Matrix`](fp::Matrix) over any [`fp::Field`]
//! and returns a [`ReductionResult`]. The result holds the requested echelon forms, the pivot
//! columns and, if asked for, the [`Step`]s that produced them. Printing is kept apart in
//! [`pretty`].
//!
//! Matrices are usually referred to by name. A [`MatrixCollection`] stores them under
//! case-insensitive names and reports a [`NotFound`] listing the known names when a lookup fails.
//!
//! ```
//! # use echelon::{Form, MatrixCollection};
//! # use fp::{Matrix, Rationals};
//! let mut matrices = MatrixCollection::new(Rationals);
//! matrices.insert("A", Matrix::from_vec(Rationals, &[vec![2, 4], vec![1, 3]]).unwrap());
//!
//! let result = matrices.reduce(" a ", Form::Both, true).unwrap();
//! assert_eq!(result.rref_form, Some(Matrix::identity(Rationals, 2)));
//! assert_eq!(result.ref_steps[0].description(), "R1 ← R1 / (2)");
//!
//! let err = matrices.reduce("B", Form::Both, true).unwrap_err();
//! assert_eq!(err.available, ["A"]);
//! ```

pub mod collection;
pub mod pretty;
pub mod reduce;
pub mod step;
pub mod utils;

pub use collection::{normalize_name, CollectionError, MatrixCollection, NotFound};
pub use reduce::{reduce, Form, ParseFormError, ReductionResult};
pub use step::{replay, RowOperation, Step};
