use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{Field, FieldElement, ParseElementError};

/// The field of rational numbers, with arbitrary precision numerators and denominators.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rationals;

impl fmt::Display for Rationals {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Q")
    }
}

impl FieldElement for BigRational {
    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }
}

impl Field for Rationals {
    type Element = BigRational;

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn sub(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a - b
    }

    fn mul(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn div(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a / b
    }

    fn inv(&self, a: &BigRational) -> BigRational {
        a.recip()
    }

    fn neg(&self, a: &BigRational) -> BigRational {
        -a
    }

    fn is_one(&self, a: &BigRational) -> bool {
        One::is_one(a)
    }

    /// Accepts integers (`-3`), fractions (`3/4`) and terminating decimals with an optional
    /// exponent (`0.25`, `1e-7`, `2.5E10`). Decimals are converted exactly, so `0.1` is `1/10`.
    fn parse(&self, s: &str) -> Result<BigRational, ParseElementError> {
        let trimmed = s.trim();
        if trimmed.contains(['.', 'e', 'E']) {
            return parse_decimal(trimmed)
                .ok_or_else(|| ParseElementError::new(s, self, "invalid decimal literal"));
        }
        trimmed
            .parse::<BigRational>()
            .map_err(|e| ParseElementError::new(s, self, e))
    }

    fn from_i64(&self, n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }
}

/// Exponents beyond this are rejected rather than expanded into enormous integers.
const MAX_EXPONENT: u32 = 4096;

fn parse_decimal(s: &str) -> Option<BigRational> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (mantissa, exponent) = match digits.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (digits, 0),
    };
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let numer: BigInt = format!("{whole}{frac}").parse().ok()?;
    let shift = i64::from(exponent) - frac.len() as i64;
    let scale = num_traits::pow(BigInt::from(10), shift.unsigned_abs() as usize);
    let value = if shift >= 0 {
        BigRational::from_integer(numer * scale)
    } else {
        BigRational::new(numer, scale)
    };
    Some(if negative { -value } else { value })
}
