//! Thread safe transposition table for nim values

use crate::numeric::nimber::Nimber;
use dashmap::{DashMap, mapref::entry::Entry};
use std::{fmt::Debug, hash::Hash, marker::PhantomData};

/// Interface of a transposition table
pub trait TranspositionTable<G> {
    /// Lookup a position value if exists
    fn lookup_position(&self, position: &G) -> Option<Nimber>;

    /// Save position and its game value
    ///
    /// Entries are never overwritten, inserting an already known position must be done with
    /// the same value.
    fn insert_position(&self, position: G, value: Nimber);
}

/// Transaction table (cache) of game positions and their nim values.
pub struct ParallelTranspositionTable<G> {
    positions: DashMap<G, Nimber, ahash::RandomState>,
}

impl<G> ParallelTranspositionTable<G>
where
    G: Eq + Hash,
{
    /// Create new empty transposition table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<G> Debug for ParallelTranspositionTable<G>
where
    G: Debug + Hash + Eq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ParallelTranspositionTable { positions } = self;

        f.debug_struct("ParallelTranspositionTable")
            .field("positions", positions)
            .finish()
    }
}

impl<G> Default for ParallelTranspositionTable<G>
where
    G: Hash + Eq,
{
    #[inline]
    fn default() -> Self {
        Self {
            positions: DashMap::default(),
        }
    }
}

impl<G> TranspositionTable<G> for ParallelTranspositionTable<G>
where
    G: Eq + Hash + Debug,
{
    #[inline]
    fn lookup_position(&self, position: &G) -> Option<Nimber> {
        self.positions.get(position).map(|value| *value)
    }

    #[inline]
    fn insert_position(&self, position: G, value: Nimber) {
        match self.positions.entry(position) {
            Entry::Occupied(known) => {
                debug_assert_eq!(
                    *known.get(),
                    value,
                    "position {:?} resolved to two different values",
                    known.key()
                );
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }
}

/// Dummy transposition table that does not store anythning
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoTranspositionTable<G>(PhantomData<G>);

impl<G> NoTranspositionTable<G> {
    #[inline]
    /// Create new dummy transposition table
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<G> Default for NoTranspositionTable<G> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<G> TranspositionTable<G> for NoTranspositionTable<G> {
    #[inline]
    fn lookup_position(&self, _position: &G) -> Option<Nimber> {
        None
    }

    #[inline]
    fn insert_position(&self, _position: G, _value: Nimber) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_positions() {
        let tt = ParallelTranspositionTable::new();
        assert!(tt.is_empty());

        tt.insert_position(vec![1, 0], Nimber::new(0));
        tt.insert_position(vec![2, 0], Nimber::new(1));
        tt.insert_position(vec![2, 0], Nimber::new(1));

        assert_eq!(tt.len(), 2);
        assert_eq!(tt.lookup_position(&vec![2, 0]), Some(Nimber::new(1)));
        assert_eq!(tt.lookup_position(&vec![3, 0]), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn rejects_conflicting_values() {
        let tt = ParallelTranspositionTable::new();
        tt.insert_position(vec![2], Nimber::new(1));
        tt.insert_position(vec![2], Nimber::new(2));
    }

    #[test]
    fn dummy_table_forgets() {
        let tt = NoTranspositionTable::new();
        tt.insert_position(vec![1], Nimber::new(0));
        assert_eq!(tt.lookup_position(&vec![1]), None);
    }
}
