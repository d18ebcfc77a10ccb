//! Nimber is a number that represents a Nim heap of a given size, i.e. the Sprague-Grundy value
//! of an impartial game position.

use auto_ops::impl_op_ex;
use std::{collections::BTreeSet, fmt::Display};

/// Number that represents a Nim heap of given size.
///
/// Addition is overloaded to Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Nimber(u32);

impl Nimber {
    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying nimber value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Check if the nimber is zero, i.e. the position is a loss for the player to move
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Compute the minimum excluded value from a collection of nimbers.
    /// See <https://en.wikipedia.org/wiki/Mex_(mathematics)>
    ///
    /// The input is treated as a set, neither order nor repetitions affect the result.
    /// The mex of no nimbers is zero.
    pub fn mex<I>(nimbers: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::mex_of_set(&nimbers.into_iter().collect())
    }

    /// Compute the minimum excluded value of a set of nimbers
    pub fn mex_of_set(nimbers: &BTreeSet<Self>) -> Self {
        let mut current = 0;
        for n in nimbers {
            if n.0 != current {
                // Sorted and unique, so the first mismatch is the gap
                return Self(current);
            }
            current += 1;
        }
        Self(current)
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Nimber> for u32 {
    fn from(value: Nimber) -> Self {
        value.0
    }
}

// xor is correct, that's how nimbers additon works
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

// Subtraction is the same as addition
impl_op_ex!(-|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(-=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

// Nimber is its own negative
impl_op_ex!(-|lhs: &Nimber| -> Nimber { *lhs });

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

#[test]
fn mex_works() {
    assert_eq!(
        Nimber(3),
        Nimber::mex(vec![Nimber(0), Nimber(0), Nimber(2), Nimber(5), Nimber(1)])
    );

    assert_eq!(
        Nimber(3),
        Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(2)])
    );

    assert_eq!(
        Nimber(2),
        Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(1)])
    );

    assert_eq!(Nimber(0), Nimber::mex(vec![Nimber(1), Nimber(2)]));

    assert_eq!(Nimber(0), Nimber::mex(vec![]));
}

#[test]
fn mex_ignores_order() {
    assert_eq!(
        Nimber::mex(vec![Nimber(4), Nimber(0), Nimber(3), Nimber(1)]),
        Nimber::mex(vec![Nimber(1), Nimber(3), Nimber(0), Nimber(4)])
    );
    assert_eq!(
        Nimber(2),
        Nimber::mex(vec![Nimber(4), Nimber(0), Nimber(3), Nimber(1)])
    );
}

#[test]
fn nim_sum() {
    assert_eq!(Nimber(3) + Nimber(5), Nimber(6));
    assert_eq!(Nimber(7) - Nimber(7), Nimber(0));
    assert_eq!(-Nimber(2), Nimber(2));

    let mut acc = Nimber(1);
    acc += Nimber(1);
    assert!(acc.is_zero());
}

#[test]
fn display() {
    assert_eq!(Nimber(0).to_string(), "0");
    assert_eq!(Nimber(1).to_string(), "*");
    assert_eq!(Nimber(6).to_string(), "*6");
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    #[test]
    fn mex_is_minimal_excluded() {
        let mut qc = QuickCheck::new();
        let test = |values: Vec<u8>| {
            let set = values
                .into_iter()
                .map(|v| Nimber::new(u32::from(v % 16)))
                .collect::<BTreeSet<_>>();
            let mex = Nimber::mex_of_set(&set);
            assert!(!set.contains(&mex));
            for below in 0..mex.value() {
                assert!(set.contains(&Nimber::new(below)));
            }
        };
        qc.quickcheck(test as fn(Vec<u8>));
    }
}
