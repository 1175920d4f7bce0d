use std::fmt::{Debug, Display};

use thiserror::Error;

mod fp;
mod rational;
mod real;

pub use fp::Fp;
pub use rational::Rationals;
pub use real::Reals;

pub trait FieldElement: Clone + Debug + Display + PartialEq + Send + Sync + 'static {
    fn is_zero(&self) -> bool;
}

/// A field, as a value. Most fields carry no data (e.g. [`Rationals`]), but prime fields need to
/// remember their characteristic, so the arithmetic is implemented on the field object rather
/// than on the elements themselves.
///
/// Arithmetic is exact for every field except [`Reals`], which exists for matrices whose entries
/// are already floating point.
pub trait Field: Clone + Debug + PartialEq + Send + Sync + 'static {
    type Element: FieldElement;

    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Divides `a` by `b`. `b` must be nonzero.
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn neg(&self, a: &Self::Element) -> Self::Element;

    fn inv(&self, a: &Self::Element) -> Self::Element {
        self.div(&self.one(), a)
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == self.one()
    }

    /// Parses an element from its textual form. Surrounding whitespace is ignored.
    fn parse(&self, s: &str) -> Result<Self::Element, ParseElementError>;

    /// Converts a small integer into the field.
    fn from_i64(&self, n: i64) -> Self::Element;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?} as an element of {field}: {reason}")]
pub struct ParseElementError {
    pub input: String,
    pub field: String,
    pub reason: String,
}

impl ParseElementError {
    pub(crate) fn new(input: &str, field: impl Display, reason: impl Display) -> Self {
        Self {
            input: input.to_owned(),
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
