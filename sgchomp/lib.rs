//! Sprague-Grundy values of Chomp.
//!
//! Positions of [Chomp](crate::short::impartial::games::chomp) are solved by a memoized
//! search over their [followers](crate::short::impartial::impartial_game::ImpartialGame::moves),
//! taking the [minimum excluded value](crate::numeric::nimber::Nimber::mex) of follower values.
//! The cache is a [transposition table](crate::short::impartial::transposition_table) owned
//! by a single solve, and the search itself can be run with any of the
//! [solver strategies](crate::short::impartial::solver::Strategy).
//!
//! ```
//! assert_eq!(sgchomp::short::impartial::games::chomp::solve(&[3, 3]), Ok(4));
//! ```

#![warn(missing_docs)]

pub mod numeric;
pub mod parsing;
pub mod short;

mod display;
