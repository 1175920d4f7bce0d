use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use serde::{Deserialize, Serialize};

use super::{Field, FieldElement, ParseElementError};
use crate::prime::ValidPrime;

/// A prime field. This is just a wrapper around a prime. Elements are residues in `0..p`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fp(pub ValidPrime);

impl Fp {
    pub const fn new(p: ValidPrime) -> Self {
        Self(p)
    }

}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F_{}", self.0)
    }
}

impl FieldElement for u32 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Field for Fp {
    type Element = u32;

    fn zero(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1
    }

    fn add(&self, a: &u32, b: &u32) -> u32 {
        self.0.sum(*a, *b)
    }

    fn sub(&self, a: &u32, b: &u32) -> u32 {
        self.0.sum(*a, self.0.negate(*b))
    }

    fn mul(&self, a: &u32, b: &u32) -> u32 {
        self.0.product(*a, *b)
    }

    fn div(&self, a: &u32, b: &u32) -> u32 {
        self.mul(a, &self.inv(b))
    }

    fn inv(&self, a: &u32) -> u32 {
        self.0.inverse(*a)
    }

    fn neg(&self, a: &u32) -> u32 {
        self.0.negate(*a)
    }

    /// Accepts any integer, however large, and reduces it mod p.
    fn parse(&self, s: &str) -> Result<u32, ParseElementError> {
        let n: BigInt = s
            .trim()
            .parse()
            .map_err(|e| ParseElementError::new(s, self, e))?;
        let residue = n.mod_floor(&BigInt::from(self.0.as_u32()));
        u32::try_from(&residue).map_err(|e| ParseElementError::new(s, self, e))
    }

    fn from_i64(&self, n: i64) -> u32 {
        self.0.reduce(n)
    }
}
