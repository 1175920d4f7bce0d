use std::fmt;

use fp::{Field, Matrix};

/// An elementary row operation. Rows are indexed from 0, but the [`Display`](fmt::Display)
/// implementation names them `R1`, `R2`, ... as one would write them by hand.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOperation<F: Field> {
    /// Exchange rows `first` and `second`.
    Swap { first: usize, second: usize },
    /// Divide `row` by `divisor`. The divisor is the pivot of the row, so the pivot becomes 1.
    Scale { row: usize, divisor: F::Element },
    /// `row ← row - factor · pivot_row`.
    Eliminate {
        row: usize,
        pivot_row: usize,
        factor: F::Element,
    },
}

impl<F: Field> RowOperation<F> {
    /// Applies the operation to `matrix` in place. The factor and divisor are the values captured
    /// when the operation was created; the rows are read as they are now.
    pub fn apply(&self, matrix: &mut Matrix<F>) {
        match self {
            Self::Swap { first, second } => matrix.swap_rows(*first, *second),
            Self::Scale { row, divisor } => matrix.divide_row(*row, divisor),
            Self::Eliminate {
                row,
                pivot_row,
                factor,
            } => {
                let coeff = matrix.field().neg(factor);
                matrix.row_op(*row, *pivot_row, &coeff);
            }
        }
    }

    /// The row that the operation changes. A swap changes two rows; this returns the first.
    pub fn target(&self) -> usize {
        match self {
            Self::Swap { first, .. } => *first,
            Self::Scale { row, .. } | Self::Eliminate { row, .. } => *row,
        }
    }
}

impl<F: Field> fmt::Display for RowOperation<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Swap { first, second } => write!(f, "Swap R{} ↔ R{}", first + 1, second + 1),
            Self::Scale { row, divisor } => write!(f, "R{0} ← R{0} / ({divisor})", row + 1),
            Self::Eliminate {
                row,
                pivot_row,
                factor,
            } => write!(
                f,
                "R{0} ← R{0} - ({factor})·R{1}",
                row + 1,
                pivot_row + 1
            ),
        }
    }
}

/// A recorded [`RowOperation`] together with the matrix immediately after it was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<F: Field> {
    pub operation: RowOperation<F>,
    pub matrix: Matrix<F>,
}

impl<F: Field> Step<F> {
    pub fn description(&self) -> String {
        self.operation.to_string()
    }
}

/// Replays `steps` on `matrix` in order.
pub fn replay<'a, F: Field>(matrix: &mut Matrix<F>, steps: impl IntoIterator<Item = &'a Step<F>>) {
    for step in steps {
        step.operation.apply(matrix);
    }
}
