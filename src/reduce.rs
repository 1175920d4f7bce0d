//! Gaussian elimination to row echelon form, followed by back substitution to reduced row
//! echelon form, recording every elementary row operation on request.

use std::fmt;
use std::str::FromStr;

use fp::{Field, FieldElement, Matrix};
use thiserror::Error;

use crate::step::{RowOperation, Step};

/// Which echelon forms to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    Ref,
    Rref,
    #[default]
    Both,
}

impl Form {
    pub fn includes_ref(self) -> bool {
        matches!(self, Self::Ref | Self::Both)
    }

    pub fn includes_rref(self) -> bool {
        matches!(self, Self::Rref | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form {0:?}. Should be one of ref, rref or both")]
pub struct ParseFormError(String);

impl FromStr for Form {
    type Err = ParseFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ref" => Ok(Self::Ref),
            "rref" => Ok(Self::Rref),
            "both" => Ok(Self::Both),
            _ => Err(ParseFormError(s.to_owned())),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Ref => "ref",
            Self::Rref => "rref",
            Self::Both => "both",
        })
    }
}

/// The output of [`reduce`]. The matrices are present exactly when the requested [`Form`]
/// includes them, while the pivots are always present. The step lists are empty unless tracing
/// was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionResult<F: Field> {
    pub ref_form: Option<Matrix<F>>,
    pub rref_form: Option<Matrix<F>>,
    /// The pivot column of each nonzero row, in row order. These are the same for the row
    /// echelon form and the reduced row echelon form.
    pub pivots: Vec<usize>,
    /// Steps taking the input to its row echelon form.
    pub ref_steps: Vec<Step<F>>,
    /// Steps taking the row echelon form to the reduced row echelon form.
    pub rref_steps: Vec<Step<F>>,
    pub columns: usize,
}

impl<F: Field> ReductionResult<F> {
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// The columns without a pivot. These correspond to the free variables of the linear system
    /// the matrix encodes.
    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|c| !self.pivots.contains(c))
            .collect()
    }
}

/// Computes the row echelon form and/or reduced row echelon form of `matrix`.
///
/// The input is never modified: the row echelon form is computed on a copy, and the reduced row
/// echelon form on a further copy of the row echelon form. If `trace` is set, every elementary
/// row operation is recorded together with a snapshot of the matrix after it. The row echelon
/// steps are recorded whenever `trace` is set, since the reduced form is computed from them.
///
/// # Example
/// ```
/// # use echelon::{reduce, Form};
/// # use fp::{Matrix, Rationals};
/// let m = Matrix::from_vec(Rationals, &[vec![0, 2, 4], vec![1, 2, 3], vec![2, 4, 8]]).unwrap();
/// let result = reduce(&m, Form::Both, false);
///
/// let echelon = Matrix::from_vec(Rationals, &[vec![1, 2, 3], vec![0, 1, 2], vec![0, 0, 1]]).unwrap();
/// assert_eq!(result.ref_form, Some(echelon));
/// assert_eq!(result.rref_form, Some(Matrix::identity(Rationals, 3)));
/// assert_eq!(result.pivots, vec![0, 1, 2]);
/// ```
#[tracing::instrument(
    level = "debug",
    skip(matrix),
    fields(rows = matrix.rows(), columns = matrix.columns(), rank = tracing::field::Empty)
)]
pub fn reduce<F: Field>(matrix: &Matrix<F>, form: Form, trace: bool) -> ReductionResult<F> {
    let mut ref_steps = trace.then(Vec::new);
    let mut rref_steps = trace.then(Vec::new);

    let mut echelon = matrix.clone();
    forward_eliminate(&mut echelon, &mut ref_steps);

    let pivots: Vec<usize> = echelon
        .leading_entries()
        .into_iter()
        .map(|(_, column)| column)
        .collect();
    tracing::Span::current().record("rank", pivots.len());
    tracing::debug!(rank = pivots.len(), ?pivots, "row echelon form found");

    let rref_form = form.includes_rref().then(|| {
        let mut reduced = echelon.clone();
        back_substitute(&mut reduced, &mut rref_steps);
        reduced
    });

    ReductionResult {
        ref_form: form.includes_ref().then_some(echelon),
        rref_form,
        pivots,
        ref_steps: ref_steps.unwrap_or_default(),
        rref_steps: rref_steps.unwrap_or_default(),
        columns: matrix.columns(),
    }
}

/// Applies `operation` to `matrix`, recording it if we are tracing. Every change the reducer
/// makes goes through here, so the recorded steps replay to exactly the returned matrix.
fn perform<F: Field>(
    matrix: &mut Matrix<F>,
    operation: RowOperation<F>,
    steps: &mut Option<Vec<Step<F>>>,
) {
    operation.apply(matrix);
    tracing::trace!(%operation);
    if let Some(steps) = steps {
        steps.push(Step {
            operation,
            matrix: matrix.clone(),
        });
    }
}

/// Reduces `matrix` to row echelon form with every pivot equal to 1.
///
/// This is a single top-to-bottom, left-to-right pass. When a column has no nonzero entry at or
/// below the current row, we move on to the next column and stay on the same row. Once the columns
/// run out the remaining rows are all zero and are left alone.
fn forward_eliminate<F: Field>(matrix: &mut Matrix<F>, steps: &mut Option<Vec<Step<F>>>) {
    let rows = matrix.rows();
    let columns = matrix.columns();

    let mut row = 0;
    let mut lead = 0;
    while row < rows && lead < columns {
        // Search down column for a nonzero entry.
        let Some(pivot_row) = (row..rows).find(|&i| !matrix[i][lead].is_zero()) else {
            lead += 1;
            continue;
        };

        if pivot_row != row {
            let swap = RowOperation::Swap {
                first: row,
                second: pivot_row,
            };
            perform(matrix, swap, steps);
        }

        let pivot = matrix[row][lead].clone();
        if !matrix.field().is_one(&pivot) {
            let scale = RowOperation::Scale {
                row,
                divisor: pivot,
            };
            perform(matrix, scale, steps);
        }

        for i in row + 1..rows {
            let entry = &matrix[i][lead];
            if entry.is_zero() {
                continue;
            }
            let eliminate = RowOperation::Eliminate {
                row: i,
                pivot_row: row,
                factor: entry.clone(),
            };
            perform(matrix, eliminate, steps);
        }

        row += 1;
        lead += 1;
    }
}

/// Clears the entries above every pivot of a matrix in row echelon form whose pivots are 1. The
/// pivots are the leading entries of the rows.
///
/// Pivots are processed from the bottom up. Clearing above the pivot in row `pr` only changes the
/// pivot column and columns to the right of it, and every pivot column further right has already
/// been cleared in row `pr`, so no cleared entry is ever made nonzero again.
fn back_substitute<F: Field>(matrix: &mut Matrix<F>, steps: &mut Option<Vec<Step<F>>>) {
    for (pivot_row, lead) in matrix.leading_entries().into_iter().rev() {
        for i in 0..pivot_row {
            let entry = &matrix[i][lead];
            if entry.is_zero() {
                continue;
            }
            let eliminate = RowOperation::Eliminate {
                row: i,
                pivot_row,
                factor: entry.clone(),
            };
            perform(matrix, eliminate, steps);
        }
    }
}
