//! Impartial game - both players have the same moves

use crate::{
    numeric::nimber::Nimber, short::impartial::transposition_table::TranspositionTable,
};
use std::collections::BTreeSet;

/// Impartial game
pub trait ImpartialGame: Sized {
    /// Get a list of moves from the position
    fn moves(&self) -> Vec<Self>;

    /// Calculate the Nim value of the position
    ///
    /// Every position is recomputed each time it is reached, see
    /// [`ImpartialGame::memoized_nim_value`] for a cached version.
    fn nim_value(&self) -> Nimber {
        Nimber::mex(self.moves().iter().map(Self::nim_value))
    }

    /// Calculate the Nim value of the position, reusing values stored in the transposition table
    /// and storing values of every position visited on the way.
    fn memoized_nim_value<TT>(&self, transposition_table: &TT) -> Nimber
    where
        Self: Clone,
        TT: TranspositionTable<Self>,
    {
        if let Some(known) = transposition_table.lookup_position(self) {
            return known;
        }

        let follower_values = self
            .moves()
            .iter()
            .map(|m| m.memoized_nim_value(transposition_table))
            .collect::<BTreeSet<Nimber>>();
        let value = Nimber::mex_of_set(&follower_values);

        transposition_table.insert_position(self.clone(), value);
        value
    }
}
