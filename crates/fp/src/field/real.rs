use std::fmt;

use super::{Field, FieldElement, ParseElementError};

/// Double precision floats. This is not exact: it is here for matrices whose entries are already
/// floating point, and no attempt is made to control rounding. An entry counts as a pivot if it is
/// not exactly `0.0`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reals;

impl fmt::Display for Reals {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "R")
    }
}

impl FieldElement for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Field for Reals {
    type Element = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn sub(&self, a: &f64, b: &f64) -> f64 {
        a - b
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    fn div(&self, a: &f64, b: &f64) -> f64 {
        a / b
    }

    fn neg(&self, a: &f64) -> f64 {
        -a
    }

    fn parse(&self, s: &str) -> Result<f64, ParseElementError> {
        let x: f64 = s
            .trim()
            .parse()
            .map_err(|e| ParseElementError::new(s, self, e))?;
        if x.is_finite() {
            Ok(x)
        } else {
            Err(ParseElementError::new(s, self, "entries must be finite"))
        }
    }

    fn from_i64(&self, n: i64) -> f64 {
        n as f64
    }
}
