//! Strategies of walking the game graph when computing nim values.
//!
//! All strategies agree on the result, they differ in how the graph of positions is traversed.
//! Game graph of a short impartial game is a DAG, so none of them has to look for cycles.

use crate::{
    numeric::nimber::Nimber,
    short::impartial::{impartial_game::ImpartialGame, transposition_table::TranspositionTable},
};
use std::{
    collections::{BTreeSet, HashMap},
    hash::Hash,
};

#[cfg(feature = "rayon")]
use dashmap::DashMap;
#[cfg(feature = "rayon")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// Traversal used to compute the nim value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Depth first recursion, see [`ImpartialGame::memoized_nim_value`]
    #[default]
    Recursive,

    /// Depth first search with an explicit stack, see [`nim_value_worklist`]
    Worklist,

    /// Parallel resolution in dependency rounds, see [`nim_value_parallel`]
    #[cfg(feature = "rayon")]
    Parallel,
}

impl Strategy {
    /// Compute the nim value of `game` using the strategy
    pub fn nim_value<G, TT>(self, game: &G, transposition_table: &TT) -> Nimber
    where
        G: ImpartialGame + Clone + Eq + Hash + Send + Sync,
        TT: TranspositionTable<G> + Sync,
    {
        match self {
            Strategy::Recursive => game.memoized_nim_value(transposition_table),
            Strategy::Worklist => nim_value_worklist(game, transposition_table),
            #[cfg(feature = "rayon")]
            Strategy::Parallel => nim_value_parallel(game, transposition_table),
        }
    }
}

enum Step<G> {
    Expand(G),
    Resolve(G, Vec<G>),
}

/// Compute the nim value with an explicit stack instead of recursion, so deep game graphs do not
/// overflow the call stack.
///
/// Values are stored in the transposition table as well as in a local map that lives for the
/// duration of the call, so the dummy transposition table works too.
pub fn nim_value_worklist<G, TT>(game: &G, transposition_table: &TT) -> Nimber
where
    G: ImpartialGame + Clone + Eq + Hash,
    TT: TranspositionTable<G>,
{
    if let Some(known) = transposition_table.lookup_position(game) {
        return known;
    }

    let mut resolved: HashMap<G, Nimber, ahash::RandomState> = HashMap::default();
    let lookup = |resolved: &HashMap<G, Nimber, ahash::RandomState>, position: &G| {
        resolved
            .get(position)
            .copied()
            .or_else(|| transposition_table.lookup_position(position))
    };

    let mut stack = vec![Step::Expand(game.clone())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Expand(position) => {
                if lookup(&resolved, &position).is_some() {
                    continue;
                }
                let moves = position.moves();
                let unresolved = moves
                    .iter()
                    .filter(|m| lookup(&resolved, *m).is_none())
                    .cloned()
                    .collect::<Vec<_>>();
                stack.push(Step::Resolve(position, moves));
                stack.extend(unresolved.into_iter().map(Step::Expand));
            }
            Step::Resolve(position, moves) => {
                // Everything pushed above this step was reachable from `position` and is done
                let follower_values = moves
                    .iter()
                    .map(|m| lookup(&resolved, m))
                    .collect::<Option<BTreeSet<Nimber>>>()
                    .unwrap_or_else(|| unreachable!("follower resolved after its parent"));
                let value = Nimber::mex_of_set(&follower_values);
                log::trace!("resolved position with value {}", value);
                resolved.insert(position.clone(), value);
                transposition_table.insert_position(position, value);
            }
        }
    }

    lookup(&resolved, game).unwrap_or_else(|| unreachable!("starting position was not resolved"))
}

/// Compute the nim value on multiple threads.
///
/// First every position reachable from `game` that is not in the transposition table yet is
/// discovered. Then positions are resolved in rounds: a round resolves in parallel every position
/// whose moves all have known values. Every position is computed exactly once and no thread ever
/// waits for a value computed by another one.
#[cfg(feature = "rayon")]
pub fn nim_value_parallel<G, TT>(game: &G, transposition_table: &TT) -> Nimber
where
    G: ImpartialGame + Clone + Eq + Hash + Send + Sync,
    TT: TranspositionTable<G> + Sync,
{
    if let Some(known) = transposition_table.lookup_position(game) {
        return known;
    }

    let mut graph: HashMap<G, Vec<G>, ahash::RandomState> = HashMap::default();
    let mut to_visit = vec![game.clone()];
    while let Some(position) = to_visit.pop() {
        if graph.contains_key(&position) || transposition_table.lookup_position(&position).is_some()
        {
            continue;
        }
        let moves = position.moves();
        to_visit.extend(moves.iter().filter(|m| !graph.contains_key(m)).cloned());
        graph.insert(position, moves);
    }
    log::debug!("discovered {} unresolved positions", graph.len());

    let resolved: DashMap<G, Nimber, ahash::RandomState> = DashMap::default();
    let lookup = |position: &G| {
        resolved
            .get(position)
            .map(|value| *value)
            .or_else(|| transposition_table.lookup_position(position))
    };

    let mut pending = graph.into_iter().collect::<Vec<_>>();
    let mut rounds = 0_usize;
    while !pending.is_empty() {
        let (ready, blocked): (Vec<_>, Vec<_>) = pending
            .into_par_iter()
            .partition(|(_, moves)| moves.iter().all(|m| lookup(m).is_some()));
        if ready.is_empty() {
            unreachable!("game graph has a cycle");
        }

        ready.into_par_iter().for_each(|(position, moves)| {
            let follower_values = moves.iter().filter_map(&lookup).collect::<BTreeSet<_>>();
            let value = Nimber::mex_of_set(&follower_values);
            resolved.insert(position.clone(), value);
            transposition_table.insert_position(position, value);
        });

        pending = blocked;
        rounds += 1;
    }
    log::debug!("resolved game graph in {} rounds", rounds);

    lookup(game).unwrap_or_else(|| unreachable!("starting position was not resolved"))
}
