use std::{fmt, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

/// A prime number, checked at construction. This is the characteristic of an [`Fp`] field.
///
/// [`Fp`]: crate::field::Fp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidPrime {
    p: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimeError {
    NotAnInteger(std::num::ParseIntError),
    InvalidPrime(u32),
}

impl fmt::Display for PrimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger(s) => write!(f, "Not an integer: {s}"),
            Self::InvalidPrime(p) => write!(f, "{p} is not a valid prime"),
        }
    }
}

impl std::error::Error for PrimeError {}

pub const fn is_prime(p: u32) -> bool {
    if p < 2 {
        return false;
    }
    // (2..).take_while(k * k <= p).all(|k| p % k != 0), but make it const
    let mut k = 2;
    while (k as u64) * (k as u64) <= p as u64 {
        if p % k == 0 {
            return false;
        }
        k += 1;
    }
    true
}

impl ValidPrime {
    pub const fn new(p: u32) -> Self {
        // Products of two residues are computed in a u64, so any u32 prime is fine. We still keep
        // the bound from `as_i32` so that signed entries can be reduced without overflow.
        assert!(p < (1 << 31), "Tried to construct a prime larger than 2^31");
        assert!(is_prime(p), "Tried to construct a composite dynamic prime");
        Self { p }
    }

    pub const fn as_u32(self) -> u32 {
        self.p
    }

    pub const fn as_i64(self) -> i64 {
        self.p as i64
    }

    /// Computes the sum mod p. This takes care of overflow.
    pub fn sum(self, n1: u32, n2: u32) -> u32 {
        ((n1 as u64 + n2 as u64) % self.p as u64) as u32
    }

    /// Computes the product mod p. This takes care of overflow.
    pub fn product(self, n1: u32, n2: u32) -> u32 {
        ((n1 as u64 * n2 as u64) % self.p as u64) as u32
    }

    /// The additive inverse of a residue.
    pub fn negate(self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.p - n
        }
    }

    pub fn inverse(self, k: u32) -> u32 {
        inverse(self, k)
    }

    /// Reduces an arbitrary signed integer to its residue in `0..p`.
    pub fn reduce(self, n: i64) -> u32 {
        n.rem_euclid(self.as_i64()) as u32
    }
}

/// Compute b^e mod p.
pub const fn power_mod(p: u32, mut b: u32, mut e: u32) -> u32 {
    assert!(p > 0);
    let mut result: u32 = 1;
    while e > 0 {
        if (e & 1) == 1 {
            result = ((result as u64) * (b as u64) % (p as u64)) as u32;
        }
        b = (((b as u64) * (b as u64)) % (p as u64)) as u32;
        e >>= 1;
    }
    result
}

/// Computes the inverse of `k` mod `p` by Fermat's little theorem. `k` must be nonzero mod `p`.
///
/// # Example
/// ```
/// # use fp::prime::{inverse, ValidPrime};
/// let p = ValidPrime::new(7);
/// assert_eq!(inverse(p, 3), 5);
/// ```
pub fn inverse(p: ValidPrime, k: u32) -> u32 {
    debug_assert!(k % p.as_u32() != 0, "Tried to invert zero");
    power_mod(p.as_u32(), k, p.as_u32() - 2)
}

impl fmt::Display for ValidPrime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <u32 as fmt::Display>::fmt(&self.p, f)
    }
}

impl PartialEq<u32> for ValidPrime {
    fn eq(&self, other: &u32) -> bool {
        self.p == *other
    }
}

impl TryFrom<u32> for ValidPrime {
    type Error = PrimeError;

    fn try_from(p: u32) -> Result<Self, PrimeError> {
        if p < (1 << 31) && is_prime(p) {
            Ok(Self { p })
        } else {
            Err(PrimeError::InvalidPrime(p))
        }
    }
}

impl FromStr for ValidPrime {
    type Err = PrimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p: u32 = s.trim().parse().map_err(PrimeError::NotAnInteger)?;
        Self::try_from(p)
    }
}

impl Serialize for ValidPrime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.p.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidPrime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let p: u32 = u32::deserialize(deserializer)?;
        Self::try_from(p).map_err(D::Error::custom)
    }
}

#[cfg(feature = "proptest")]
impl proptest::arbitrary::Arbitrary for ValidPrime {
    type Parameters = ();
    type Strategy = proptest::sample::Select<ValidPrime>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        proptest::sample::select(
            [2, 3, 5, 7, 11, 13, 101]
                .into_iter()
                .map(ValidPrime::new)
                .collect::<Vec<_>>(),
        )
    }
}
