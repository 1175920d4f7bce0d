use super::matrix_inner::first_nonzero;
use super::Matrix;
use crate::field::{Field, FieldElement};

/// A subspace of a vector space, stored as a matrix in reduced row echelon form whose rows are a
/// basis of the subspace. Since reduced row echelon form is unique, two subspaces are equal
/// exactly when their matrices are.
///
/// # Fields
///  * `matrix` - A matrix in reduced row echelon form with no zero rows, whose number of columns
///  is the dimension of the ambient space.
///  * `pivots` - The pivot column of each row of `matrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subspace<F: Field> {
    matrix: Matrix<F>,
    pivots: Vec<usize>,
}

impl<F: Field> Subspace<F> {
    pub fn empty_space(field: F, dim: usize) -> Self {
        Self {
            matrix: Matrix::new(field, 0, dim),
            pivots: Vec::new(),
        }
    }

    pub fn entire_space(field: F, dim: usize) -> Self {
        Self {
            matrix: Matrix::identity(field, dim),
            pivots: (0..dim).collect(),
        }
    }

    /// The span of the rows of `matrix`.
    pub fn from_rows(mut matrix: Matrix<F>) -> Self {
        let rank = matrix.row_reduce();
        matrix.vectors.truncate(rank);
        let pivots = matrix
            .iter()
            .map(|row| first_nonzero(row).unwrap_or_default())
            .collect();
        Self { matrix, pivots }
    }

    pub fn dimension(&self) -> usize {
        self.matrix.rows()
    }

    pub fn ambient_dimension(&self) -> usize {
        self.matrix.columns()
    }

    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Returns a basis of the subspace.
    pub fn basis(&self) -> &Matrix<F> {
        &self.matrix
    }

    /// Projects a vector to a complement of the subspace. The complement is the set of vectors
    /// that have a 0 in every column where there is a pivot in `matrix`.
    pub fn reduce(&self, vector: &mut [F::Element]) {
        assert_eq!(vector.len(), self.ambient_dimension());
        let field = self.matrix.field();
        for (&col, row) in self.pivots.iter().zip(self.matrix.iter()) {
            let c = vector[col].clone();
            if c.is_zero() {
                continue;
            }
            for (v, r) in vector.iter_mut().zip(row) {
                *v = field.sub(v, &field.mul(&c, r));
            }
        }
    }

    pub fn contains(&self, vector: &[F::Element]) -> bool {
        let mut vector = vector.to_vec();
        self.reduce(&mut vector);
        vector.iter().all(FieldElement::is_zero)
    }

    /// Whether every vector of `other` lies in `self`.
    pub fn contains_space(&self, other: &Self) -> bool {
        other.matrix.iter().all(|row| self.contains(row))
    }
}

impl<F: Field> std::fmt::Display for Subspace<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.matrix)
    }
}
