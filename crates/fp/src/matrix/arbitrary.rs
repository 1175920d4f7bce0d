//! Proptest strategies for matrices. Entries are biased towards zero so that zero columns, zero
//! rows and rank deficient matrices show up often.

use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

use super::Matrix;
use crate::field::{Field, Fp, Rationals};
use crate::prime::ValidPrime;

pub const MAX_ROWS: usize = 6;
pub const MAX_COLUMNS: usize = 6;

#[derive(Debug, Clone)]
pub struct MatrixArbParams {
    pub rows: BoxedStrategy<usize>,
    pub columns: BoxedStrategy<usize>,
}

impl Default for MatrixArbParams {
    fn default() -> Self {
        Self {
            rows: (0..=MAX_ROWS).boxed(),
            columns: (0..=MAX_COLUMNS).boxed(),
        }
    }
}

pub fn arb_rational() -> impl Strategy<Value = BigRational> {
    prop_oneof![
        2 => Just(BigRational::zero()),
        5 => (-6i64..=6, 1i64..=4).prop_map(|(n, d)| BigRational::new(n.into(), d.into())),
    ]
}

pub fn arb_residue(p: ValidPrime) -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0),
        3 => 0..p.as_u32(),
    ]
}

fn arb_matrix_over<F: Field, S>(
    field: F,
    params: MatrixArbParams,
    entry: impl Fn() -> S + 'static,
) -> impl Strategy<Value = Matrix<F>>
where
    S: Strategy<Value = F::Element> + 'static,
{
    (params.rows, params.columns).prop_flat_map(move |(rows, columns)| {
        let field = field.clone();
        proptest::collection::vec(proptest::collection::vec(entry(), columns), rows)
            .prop_map(move |vectors| Matrix::from_parts(field.clone(), columns, vectors))
    })
}

impl Matrix<Rationals> {
    pub fn arbitrary_rational_with(params: MatrixArbParams) -> impl Strategy<Value = Self> {
        arb_matrix_over(Rationals, params, arb_rational)
    }

    /// A matrix whose rows are linear combinations of at most `max_rank` random rows. These have
    /// many dependent rows, which exercises the zero rows left at the bottom after elimination.
    pub fn arbitrary_low_rank(max_rank: usize) -> impl Strategy<Value = Self> {
        (1..=MAX_ROWS, 1..=MAX_COLUMNS, 0..=max_rank)
            .prop_flat_map(|(rows, columns, rank)| {
                let basis = Self::arbitrary_rational_with(MatrixArbParams {
                    rows: Just(rank).boxed(),
                    columns: Just(columns).boxed(),
                });
                let coefficients = Self::arbitrary_rational_with(MatrixArbParams {
                    rows: Just(rows).boxed(),
                    columns: Just(rank).boxed(),
                });
                (basis, coefficients, Just(columns))
            })
            .prop_map(|(basis, coefficients, columns)| {
                let field = Rationals;
                let vectors = coefficients
                    .iter()
                    .map(|coeffs| {
                        (0..columns)
                            .map(|j| {
                                coeffs.iter().zip(basis.iter()).fold(field.zero(), |acc, (c, b)| {
                                    field.add(&acc, &field.mul(c, &b[j]))
                                })
                            })
                            .collect()
                    })
                    .collect();
                Matrix::from_parts(field, columns, vectors)
            })
    }
}

impl Matrix<Fp> {
    pub fn arbitrary_mod_p_with(
        p: ValidPrime,
        params: MatrixArbParams,
    ) -> impl Strategy<Value = Self> {
        arb_matrix_over(Fp::new(p), params, move || arb_residue(p))
    }
}

impl Arbitrary for Matrix<Rationals> {
    type Parameters = MatrixArbParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        Self::arbitrary_rational_with(args).boxed()
    }
}

impl Arbitrary for Matrix<Fp> {
    type Parameters = MatrixArbParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        any::<ValidPrime>()
            .prop_flat_map(move |p| Self::arbitrary_mod_p_with(p, args.clone()))
            .boxed()
    }
}
