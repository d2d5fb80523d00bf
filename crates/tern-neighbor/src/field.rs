//! Prime fields `F_p` with a seeded element source.

use rand::Rng;
use tern_core::{is_prime, ErrorInfo, Int, RngHandle, TernError};

/// Substream used for non-residue selection.
const NON_RESIDUE_STREAM: u64 = 0x6e72;

/// Characteristic specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    /// `F_2`, where every element is a square.
    Two,
    /// Odd characteristic with a fixed quadratic non-residue.
    Odd {
        /// Seed selected quadratic non-residue used by Tonelli–Shanks.
        non_residue: u64,
    },
}

/// Immutable context for arithmetic modulo a prime.
///
/// Built once per prime and shared by reference (usually behind an `Arc`)
/// between every neighbor manager working at that prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiniteField {
    prime: u64,
    seed: u64,
    characteristic: Characteristic,
}

impl FiniteField {
    /// Field of `p` elements whose random choices derive from `seed`.
    pub fn new(p: u32, seed: u64) -> Result<Self, TernError> {
        let prime = u64::from(p);
        if !is_prime(prime) {
            return Err(TernError::Field(
                ErrorInfo::new("not-prime", "field order must be prime").with_context("p", p),
            ));
        }
        let characteristic = if prime == 2 {
            Characteristic::Two
        } else {
            let mut rng = RngHandle::substream(seed, prime ^ (NON_RESIDUE_STREAM << 32));
            let non_residue = loop {
                let candidate = rng.gen_range(2..prime);
                if legendre_u64(candidate, prime) == -1 {
                    break candidate;
                }
            };
            Characteristic::Odd { non_residue }
        };
        Ok(Self {
            prime,
            seed,
            characteristic,
        })
    }

    /// The prime `p`.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Master seed the field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Characteristic specific data.
    pub fn characteristic(&self) -> Characteristic {
        self.characteristic
    }

    /// Deterministic element source for a consumer identified by `stream`.
    pub fn rng(&self, stream: u64) -> RngHandle {
        RngHandle::substream(self.seed, self.prime ^ (stream << 32))
    }

    /// Least non-negative residue of an integer.
    pub fn residue<R: Int>(&self, x: &R) -> u64 {
        x.mod_floor(&R::from_small(self.prime as i64))
            .to_u64()
            .unwrap_or_default()
    }

    /// Lifts a residue back to the integers.
    pub fn lift<R: Int>(&self, x: u64) -> R {
        R::from_small(x as i64)
    }

    /// `a + b`.
    pub fn add(&self, a: u64, b: u64) -> u64 {
        (a + b) % self.prime
    }

    /// `a − b`.
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        (a + self.prime - b % self.prime) % self.prime
    }

    /// `a · b`.
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        (a % self.prime) * (b % self.prime) % self.prime
    }

    /// `−a`.
    pub fn neg(&self, a: u64) -> u64 {
        self.sub(0, a)
    }

    /// `a^e`.
    pub fn pow(&self, a: u64, mut e: u64) -> u64 {
        let mut base = a % self.prime;
        let mut acc = 1 % self.prime;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        acc
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inverse(&self, a: u64) -> Option<u64> {
        let a = a % self.prime;
        if a == 0 {
            None
        } else {
            Some(self.pow(a, self.prime - 2))
        }
    }

    /// Legendre symbol; 0 for zero, and 1 for every nonzero element of `F_2`.
    pub fn legendre(&self, a: u64) -> i32 {
        match self.characteristic {
            Characteristic::Two => i32::from(a % 2 == 1),
            Characteristic::Odd { .. } => legendre_u64(a, self.prime),
        }
    }

    /// A square root of `a`, `None` when `a` is not a square.
    pub fn sqrt(&self, a: u64) -> Option<u64> {
        let a = a % self.prime;
        let non_residue = match self.characteristic {
            Characteristic::Two => return Some(a),
            Characteristic::Odd { non_residue } => non_residue,
        };
        if a == 0 {
            return Some(0);
        }
        if self.legendre(a) != 1 {
            return None;
        }

        // Tonelli–Shanks with p − 1 = q · 2^s, q odd.
        let mut q = self.prime - 1;
        let mut s = 0u32;
        while q % 2 == 0 {
            q /= 2;
            s += 1;
        }
        let mut m = s;
        let mut c = self.pow(non_residue, q);
        let mut t = self.pow(a, q);
        let mut r = self.pow(a, (q + 1) / 2);
        while t != 1 {
            let mut i = 0u32;
            let mut t2 = t;
            while t2 != 1 {
                t2 = self.mul(t2, t2);
                i += 1;
            }
            let b = self.pow(c, 1u64 << (m - i - 1));
            m = i;
            c = self.mul(b, b);
            t = self.mul(t, c);
            r = self.mul(r, b);
        }
        Some(r)
    }

    /// Uniform element drawn from `rng`.
    pub fn random(&self, rng: &mut RngHandle) -> u64 {
        rng.gen_range(0..self.prime)
    }
}

fn legendre_u64(a: u64, p: u64) -> i32 {
    let a = a % p;
    if a == 0 {
        return 0;
    }
    let mut base = a;
    let mut e = (p - 1) / 2;
    let mut acc = 1u64;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc * base % p;
        }
        base = base * base % p;
        e >>= 1;
    }
    if acc == 1 {
        1
    } else {
        -1
    }
}
