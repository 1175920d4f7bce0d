use std::fmt;

use itertools::Itertools;
use serde_json::Value;
use thiserror::Error;

use crate::field::{Field, FieldElement, ParseElementError};

/// A dense matrix over a field `F`. The way we store matrices means it is easier to perform row
/// operations than column operations, and the only operations that mutate a matrix after
/// construction are the three elementary row operations: [`Matrix::swap_rows`],
/// [`Matrix::scale_row`] (or [`Matrix::divide_row`]) and [`Matrix::row_op`].
///
/// The number of columns is stored separately, so a matrix with no rows still knows its width.
#[derive(Clone)]
pub struct Matrix<F: Field> {
    pub(crate) field: F,
    pub(crate) columns: usize,
    pub(crate) vectors: Vec<Vec<F::Element>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("row {} has {found} entries, expected {expected}", .row + 1)]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("entry ({}, {}): {source}", .row + 1, .column + 1)]
    Parse {
        row: usize,
        column: usize,
        #[source]
        source: ParseElementError,
    },
    #[error("expected {0}")]
    Shape(&'static str),
}

impl<F: Field> PartialEq for Matrix<F> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.columns == other.columns && self.vectors == other.vectors
    }
}

impl<F: Field> Matrix<F> {
    /// Produces a new matrix over `field` with the specified number of rows and columns,
    /// initialized to the 0 matrix.
    pub fn new(field: F, rows: usize, columns: usize) -> Self {
        let vectors = vec![vec![field.zero(); columns]; rows];
        Self {
            field,
            columns,
            vectors,
        }
    }

    pub fn identity(field: F, size: usize) -> Self {
        let mut result = Self::new(field, size, size);
        for i in 0..size {
            result.vectors[i][i] = result.field.one();
        }
        result
    }

    /// Unchecked constructor. Every vector must have length `columns`.
    pub(crate) fn from_parts(field: F, columns: usize, vectors: Vec<Vec<F::Element>>) -> Self {
        debug_assert!(vectors.iter().all(|v| v.len() == columns));
        Self {
            field,
            columns,
            vectors,
        }
    }

    /// Produces a matrix from a list of rows. If `vectors` is empty, this returns a matrix with 0
    /// rows and 0 columns. All rows must have the same length.
    pub fn from_rows(field: F, vectors: Vec<Vec<F::Element>>) -> Result<Self, MatrixError> {
        let columns = vectors.first().map_or(0, Vec::len);
        check_rectangular(vectors.iter().map(Vec::len), columns)?;
        Ok(Self::from_parts(field, columns, vectors))
    }

    /// Produces a matrix with small integer entries.
    ///
    /// # Example
    /// ```
    /// # use fp::{Matrix, Rationals};
    /// let m = Matrix::from_vec(Rationals, &[vec![1, 3, 6], vec![0, 3, 4]]).unwrap();
    /// assert_eq!(m.rows(), 2);
    /// assert_eq!(m.columns(), 3);
    /// ```
    pub fn from_vec(field: F, input: &[Vec<i64>]) -> Result<Self, MatrixError> {
        let vectors = input
            .iter()
            .map(|row| row.iter().map(|&x| field.from_i64(x)).collect())
            .collect();
        Self::from_rows(field, vectors)
    }

    /// Parses every entry with [`Field::parse`].
    ///
    /// # Example
    /// ```
    /// # use fp::{Matrix, Rationals};
    /// let m = Matrix::parse(Rationals, &[vec!["1/2", "3"], vec!["0.25", "-1"]]).unwrap();
    /// assert_eq!(m.to_string(), "[\n    [1/2, 3],\n    [1/4, -1]\n]");
    /// ```
    pub fn parse<S: AsRef<str>>(field: F, input: &[Vec<S>]) -> Result<Self, MatrixError> {
        let columns = input.first().map_or(0, Vec::len);
        check_rectangular(input.iter().map(Vec::len), columns)?;
        let vectors = input
            .iter()
            .enumerate()
            .map(|(row, entries)| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(column, s)| {
                        field
                            .parse(s.as_ref())
                            .map_err(|source| MatrixError::Parse {
                                row,
                                column,
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(field, columns, vectors))
    }

    /// Reads a matrix from a JSON array of rows. Entries may be strings or numbers, and both are
    /// parsed with [`Field::parse`]. A number is first written out by `serde_json`: integers
    /// exactly, and floats in their shortest round-trip form, which may carry an exponent (`1e-7`).
    /// So `0.1` is read as exactly `1/10` over the rationals.
    pub fn from_json(field: F, json: &Value) -> Result<Self, MatrixError> {
        let rows = json.as_array().ok_or(MatrixError::Shape("an array of rows"))?;
        let input = rows
            .iter()
            .enumerate()
            .map(|(row, entries)| {
                let entries = entries
                    .as_array()
                    .ok_or(MatrixError::Shape("each row to be an array of entries"))?;
                entries
                    .iter()
                    .enumerate()
                    .map(|(column, entry)| match entry {
                        Value::String(s) => Ok(s.clone()),
                        Value::Number(n) => Ok(n.to_string()),
                        other => Err(MatrixError::Parse {
                            row,
                            column,
                            source: ParseElementError::new(
                                &other.to_string(),
                                format!("{field:?}"),
                                "expected a string or a number",
                            ),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::parse(field, &input)
    }

    /// The entries as strings, one array per row.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.iter()
                .map(|row| Value::Array(row.iter().map(|x| Value::String(x.to_string())).collect()))
                .collect(),
        )
    }
}

fn check_rectangular(
    lengths: impl Iterator<Item = usize>,
    expected: usize,
) -> Result<(), MatrixError> {
    for (row, found) in lengths.enumerate() {
        if found != expected {
            return Err(MatrixError::Ragged {
                row,
                expected,
                found,
            });
        }
    }
    Ok(())
}

impl<F: Field> Matrix<F> {
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Gets the number of rows in the matrix.
    pub fn rows(&self) -> usize {
        self.vectors.len()
    }

    /// Gets the number of columns in the matrix.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<F::Element>> {
        self.vectors.iter()
    }

    /// Whether every entry is zero. A matrix with no entries is zero.
    pub fn is_zero(&self) -> bool {
        self.iter().flatten().all(FieldElement::is_zero)
    }

    /// The position of the first nonzero entry of every nonzero row, in row order.
    pub fn leading_entries(&self) -> Vec<(usize, usize)> {
        self.iter()
            .enumerate()
            .filter_map(|(row, v)| first_nonzero(v).map(|column| (row, column)))
            .collect()
    }

    /// Whether the matrix is in row echelon form: the leading entries move strictly to the right
    /// going down, and all zero rows are at the bottom. Pivots need not be 1.
    pub fn is_row_echelon(&self) -> bool {
        let mut last_column: Option<usize> = None;
        let mut seen_zero_row = false;
        for row in self.iter() {
            match first_nonzero(row) {
                None => seen_zero_row = true,
                Some(column) => {
                    if seen_zero_row || last_column.is_some_and(|last| column <= last) {
                        return false;
                    }
                    last_column = Some(column);
                }
            }
        }
        true
    }

    /// Whether the matrix is in reduced row echelon form, i.e. in row echelon form with every
    /// pivot equal to 1 and the only nonzero entry in its column.
    pub fn is_reduced_row_echelon(&self) -> bool {
        self.is_row_echelon()
            && self.leading_entries().into_iter().all(|(row, column)| {
                self.field.is_one(&self[row][column])
                    && (0..self.rows()).all(|i| i == row || self[i][column].is_zero())
            })
    }
}

pub(crate) fn first_nonzero<E: FieldElement>(row: &[E]) -> Option<usize> {
    row.iter().position(|x| !x.is_zero())
}

impl<F: Field> Matrix<F> {
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.vectors.swap(i, j);
    }

    /// Multiplies row `i` by `c`.
    pub fn scale_row(&mut self, i: usize, c: &F::Element) {
        let field = &self.field;
        for x in &mut self.vectors[i] {
            *x = field.mul(x, c);
        }
    }

    /// Divides row `i` by `c`, which must be nonzero.
    pub fn divide_row(&mut self, i: usize, c: &F::Element) {
        let field = &self.field;
        for x in &mut self.vectors[i] {
            *x = field.div(x, c);
        }
    }

    /// Performs `self[target] += coeff * self[source]`. The source row is read as it is when this
    /// is called.
    pub fn row_op(&mut self, target: usize, source: usize, coeff: &F::Element) {
        assert_ne!(target, source, "row_op needs two distinct rows");
        let field = &self.field;
        let (target_row, source_row) = if target < source {
            let (lo, hi) = self.vectors.split_at_mut(source);
            (&mut lo[target], &hi[0])
        } else {
            let (lo, hi) = self.vectors.split_at_mut(target);
            (&mut hi[0], &lo[source])
        };
        for (t, s) in target_row.iter_mut().zip(source_row) {
            if !s.is_zero() {
                *t = field.add(t, &field.mul(coeff, s));
            }
        }
    }

    /// Reduces the matrix to reduced row echelon form in one pass, clearing each pivot column
    /// both above and below the pivot as soon as the pivot is found. This records nothing. Returns
    /// the rank.
    ///
    /// # Example
    /// ```
    /// # use fp::{Fp, Matrix, ValidPrime};
    /// let p = Fp::new(ValidPrime::new(7));
    /// let mut m = Matrix::from_vec(p, &[vec![1, 3, 6], vec![0, 3, 4]]).unwrap();
    /// assert_eq!(m.row_reduce(), 2);
    /// assert_eq!(m, Matrix::from_vec(p, &[vec![1, 0, 2], vec![0, 1, 6]]).unwrap());
    /// ```
    pub fn row_reduce(&mut self) -> usize {
        let rows = self.rows();
        let mut pivot = 0;
        for pivot_column in 0..self.columns() {
            if pivot == rows {
                break;
            }
            // Search down column for a nonzero entry.
            let Some(pivot_row) = (pivot..rows).find(|&i| !self[i][pivot_column].is_zero())
            else {
                continue;
            };

            self.swap_rows(pivot, pivot_row);

            let c_inv = self.field.inv(&self[pivot][pivot_column]);
            self.scale_row(pivot, &c_inv);

            for i in 0..rows {
                if i == pivot || self[i][pivot_column].is_zero() {
                    continue;
                }
                let row_op_coeff = self.field.neg(&self[i][pivot_column]);
                self.row_op(i, pivot, &row_op_coeff);
            }
            pivot += 1;
        }
        pivot
    }
}

impl<F: Field> std::ops::Index<usize> for Matrix<F> {
    type Output = [F::Element];

    fn index(&self, i: usize) -> &Self::Output {
        &self.vectors[i]
    }
}

impl<F: Field> std::ops::IndexMut<usize> for Matrix<F> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.vectors[i]
    }
}

impl<'a, F: Field> IntoIterator for &'a Matrix<F> {
    type Item = &'a Vec<F::Element>;
    type IntoIter = std::slice::Iter<'a, Vec<F::Element>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<F: Field> fmt::Display for Matrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut it = self.iter();
        if let Some(x) = it.next() {
            write!(f, "[\n    [{}]", x.iter().format(", "))?;
        } else {
            return write!(f, "[]");
        }
        for x in it {
            write!(f, ",\n    [{}]", x.iter().format(", "))?;
        }
        write!(f, "\n]")
    }
}

impl<F: Field> fmt::Debug for Matrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} ", self.field)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Fp, Rationals, Reals};
    use crate::prime::ValidPrime;
    use expect_test::expect;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_row_reduce_2() {
        let p = Fp::new(ValidPrime::new(2));
        let input = [
            vec![0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 0, 1, 1],
            vec![0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1],
            vec![1, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0],
            vec![1, 1, 0, 0, 1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
            vec![0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 1],
        ];
        let goal_output = [
            vec![1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1],
            vec![0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 1],
            vec![0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            vec![0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
            vec![0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 1],
            vec![0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
        ];
        let mut m = Matrix::from_vec(p, &input).unwrap();
        assert_eq!(m.row_reduce(), 7);
        assert_eq!(m, Matrix::from_vec(p, &goal_output).unwrap());
        assert_eq!(
            m.leading_entries()
                .into_iter()
                .map(|(_, c)| c)
                .collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 12]
        );
    }

    #[test]
    fn row_reduce_rationals() {
        let mut m = Matrix::from_vec(
            Rationals,
            &[vec![2, 4, -2], vec![4, 9, -3], vec![-2, -3, 7]],
        )
        .unwrap();
        assert_eq!(m.row_reduce(), 3);
        assert_eq!(m, Matrix::identity(Rationals, 3));
    }

    #[test]
    fn row_op_both_directions() {
        let mut m = Matrix::from_vec(Rationals, &[vec![1, 2], vec![3, 4]]).unwrap();
        m.row_op(1, 0, &Rationals.from_i64(-3));
        m.row_op(0, 1, &Rationals.from_i64(1));
        expect![[r#"
            [
                [1, 0],
                [0, -2]
            ]"#]]
        .assert_eq(&m.to_string());
    }

    #[test]
    #[should_panic]
    fn row_op_same_row() {
        let mut m = Matrix::identity(Reals, 2);
        m.row_op(1, 1, &1.0);
    }

    #[rstest]
    #[case(&[vec![1, 2], vec![0, 3]], true, false)]
    #[case(&[vec![1, 0], vec![0, 1]], true, true)]
    #[case(&[vec![0, 0], vec![0, 1]], false, false)]
    #[case(&[vec![0, 1], vec![1, 0]], false, false)]
    #[case(&[vec![1, 5, 0], vec![0, 0, 1], vec![0, 0, 0]], true, true)]
    #[case(&[vec![1, 5, 2], vec![0, 0, 1]], true, false)]
    #[case(&[], true, true)]
    fn echelon_predicates(#[case] input: &[Vec<i64>], #[case] echelon: bool, #[case] reduced: bool) {
        let m = Matrix::from_vec(Rationals, input).unwrap();
        assert_eq!(m.is_row_echelon(), echelon);
        assert_eq!(m.is_reduced_row_echelon(), reduced);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_vec(Rationals, &[vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "row 2 has 1 entries, expected 2");
    }

    #[test]
    fn parse_reports_position() {
        let err = Matrix::parse(Rationals, &[vec!["1", "2"], vec!["3", "x"]]).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { row: 1, column: 1, .. }));
        assert!(err.to_string().starts_with("entry (2, 2): "));
    }

    #[test]
    fn json_round_trip() {
        let value = json!([["1/2", 3], [0.25, "-1"]]);
        let m = Matrix::from_json(Rationals, &value).unwrap();
        assert_eq!(m.to_json(), json!([["1/2", "3"], ["1/4", "-1"]]));

        let m = Matrix::from_json(Rationals, &json!([[1e-7, 2.5e10], [-3e2, 0.1]])).unwrap();
        assert_eq!(
            m.to_json(),
            json!([["1/10000000", "25000000000"], ["-300", "1/10"]])
        );
        assert!(Matrix::from_json(Rationals, &json!([[true]])).is_err());
        assert_eq!(
            Matrix::from_json(Rationals, &json!({"a": 1})).unwrap_err(),
            MatrixError::Shape("an array of rows")
        );
    }

    #[test]
    fn empty_display() {
        let m = Matrix::new(Rationals, 0, 3);
        assert_eq!(m.columns(), 3);
        assert_eq!(m.to_string(), "[]");
        assert!(m.is_zero());
    }

    proptest! {
        #[test]
        fn row_reduce_gives_rref(mut m in any::<Matrix<Rationals>>()) {
            let rank = m.row_reduce();
            prop_assert!(m.is_reduced_row_echelon());
            prop_assert_eq!(rank, m.leading_entries().len());
        }

        #[test]
        fn row_reduce_gives_rref_mod_p(mut m in any::<Matrix<Fp>>()) {
            m.row_reduce();
            prop_assert!(m.is_reduced_row_echelon());
        }
    }
}
