//! Chomp is played on a staircase shaped board of chocolate squares. A move picks one square and
//! eats it together with every square above and to the right of it. The bottom left square is
//! poisoned and the player forced to eat it loses, so the position with only the poisoned square
//! left is the terminal position.
//!
//! Board is described by the number of squares in each row, bottom row first. Rows never get
//! longer going up.

use crate::{
    display,
    numeric::nimber::Nimber,
    parsing::{Parser, impl_from_str_via_parser, try_option},
    short::impartial::{
        impartial_game::ImpartialGame,
        solver::Strategy,
        transposition_table::{ParallelTranspositionTable, TranspositionTable},
    },
};
use itertools::Itertools;
use std::{error::Error, fmt::Display};

/// Board that cannot occur in a game of Chomp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPosition {
    /// Row is longer than the row directly beneath it
    NotStaircase {
        /// Index of the offending row, bottom row is 0
        row: usize,
        /// Number of squares in the offending row
        height: u32,
        /// Number of squares in the row beneath it
        below: u32,
    },
}

impl Display for InvalidPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPosition::NotStaircase { row, height, below } => write!(
                f,
                "Invalid position: row {} has {} squares but the row beneath it has only {}",
                row, height, below
            ),
        }
    }
}

impl Error for InvalidPosition {}

/// See [chomp](self) header
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chomp {
    // Invariant: non-increasing
    rows: Vec<u32>,
}

impl Display for Chomp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chomp")?;
        display::brackets(f, |f| display::commas(f, self.rows()))
    }
}

impl Chomp {
    /// Create new Chomp position from row lengths, bottom row first
    ///
    /// # Errors
    ///
    /// Fails if any row is longer than the row beneath it
    pub fn new(rows: Vec<u32>) -> Result<Self, InvalidPosition> {
        if let Some((row, (below, height))) = rows
            .iter()
            .copied()
            .tuple_windows()
            .enumerate()
            .find(|(_, (below, height))| height > below)
        {
            return Err(InvalidPosition::NotStaircase {
                row: row + 1,
                height,
                below,
            });
        }

        Ok(Self { rows })
    }

    /// Create new Chomp position without checking that rows form a staircase
    #[inline]
    pub const fn new_unchecked(rows: Vec<u32>) -> Self {
        Self { rows }
    }

    /// Position with only the poisoned square left
    ///
    /// With zero rows there is no poisoned square and the board is empty
    pub fn terminal(row_count: usize) -> Self {
        let mut rows = vec![0; row_count];
        if let Some(bottom) = rows.first_mut() {
            *bottom = 1;
        }
        Self { rows }
    }

    /// Board with every square eaten
    pub fn empty(row_count: usize) -> Self {
        Self {
            rows: vec![0; row_count],
        }
    }

    /// Row lengths, bottom row first
    #[inline]
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Number of rows, including empty ones
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of squares left on the board
    pub fn chips(&self) -> u64 {
        self.rows.iter().map(|&height| u64::from(height)).sum()
    }

    /// Check if there are no squares left
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&height| height == 0)
    }

    /// Check if only the poisoned square is left
    pub fn is_terminal(&self) -> bool {
        matches!(self.rows.split_first(), Some((1, rest)) if rest.iter().all(|&height| height == 0))
    }

    /// Eat the square at `column` in `row` together with all squares above and to the right.
    ///
    /// Rows that are too short to have a square at `column` are left untouched.
    #[must_use]
    pub fn eat(&self, row: usize, column: u32) -> Self {
        let mut rows = self.rows.clone();
        for height in rows.iter_mut().skip(row) {
            if column <= *height {
                *height = column;
            }
        }
        Self { rows }
    }

    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Self)> {
        let p = p.trim_whitespace();
        let p = p.parse_keyword("Chomp").unwrap_or(p).trim_whitespace();
        let (p, rows) = match p.parse_ascii_char('[') {
            Some(p) => {
                let (p, rows) = try_option!(p.parse_u32_list());
                let p = try_option!(p.trim_whitespace().parse_ascii_char(']'));
                (p, rows)
            }
            None => try_option!(p.parse_u32_list()),
        };
        let chomp = try_option!(Chomp::new(rows).ok());
        Some((p.trim_whitespace(), chomp))
    }

    /// Compute the Sprague-Grundy value of the position with a fresh transposition table
    pub fn sprague_grundy_value(&self) -> Nimber {
        let transposition_table = ParallelTranspositionTable::new();
        let value = self.sprague_grundy_value_with(Strategy::default(), &transposition_table);
        log::debug!(
            "{} resolved to {} with {} cached positions",
            self,
            value,
            transposition_table.len()
        );
        value
    }

    /// Compute the Sprague-Grundy value of the position using given strategy and transposition
    /// table.
    ///
    /// Terminal position of the same size is stored in the table before the search starts.
    pub fn sprague_grundy_value_with<TT>(
        &self,
        strategy: Strategy,
        transposition_table: &TT,
    ) -> Nimber
    where
        TT: TranspositionTable<Self> + Sync,
    {
        if self.is_empty() {
            return Nimber::new(0);
        }

        transposition_table.insert_position(Self::terminal(self.row_count()), Nimber::new(0));
        log::debug!("solving {} using {:?} strategy", self, strategy);
        strategy.nim_value(self, transposition_table)
    }
}

impl_from_str_via_parser!(Chomp);

impl ImpartialGame for Chomp {
    /// Followers of the position, without repetitions. Eating the poisoned square is not a move.
    fn moves(&self) -> Vec<Self> {
        let moves = (0..self.rows.len())
            .rev()
            .flat_map(|row| (0..self.rows[row]).rev().map(move |column| (row, column)))
            .map(|(row, column)| self.eat(row, column))
            .filter(|follower| !follower.is_empty())
            .unique()
            .collect::<Vec<_>>();

        debug_assert!(
            moves.iter().all(|follower| follower.chips() < self.chips()),
            "move from {} does not decrease the number of squares",
            self
        );

        moves
    }
}

/// Compute the Sprague-Grundy value of a Chomp board given by row lengths, bottom row first.
///
/// # Errors
///
/// Fails if the rows do not form a staircase
pub fn solve(rows: &[u32]) -> Result<u32, InvalidPosition> {
    let chomp = Chomp::new(rows.to_vec())?;
    Ok(chomp.sprague_grundy_value().value())
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Chomp {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let row_count = usize::arbitrary(g) % 3 + 1;
        let mut height = u32::arbitrary(g) % 5;
        let mut rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            rows.push(height);
            height = height.saturating_sub(u32::arbitrary(g) % 3);
        }
        Chomp::new_unchecked(rows)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.moves().into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;
    use std::str::FromStr;

    macro_rules! assert_sg {
        ($rows:expr, $expected:expr) => {
            assert_eq!(
                solve(&$rows),
                Ok($expected),
                "Sprague-Grundy value of {:?}",
                $rows
            );
        };
    }

    #[test]
    fn correct_sprague_grundy_values() {
        assert_sg!([1], 0);
        assert_sg!([0], 0);
        assert_sg!([2, 1], 0);
        assert_sg!([3, 2], 0);
        assert_sg!([1, 1], 1);
        assert_sg!([2], 1);
        assert_sg!([3], 2);
        assert_sg!([2, 2], 2);
        assert_sg!([3, 1], 3);
        assert_sg!([3, 3], 4);
        assert_sg!([5, 5, 5, 5, 5], 6);
    }

    #[test]
    fn more_sprague_grundy_values() {
        assert_sg!([4, 1], 2);
        assert_sg!([5, 1], 5);
        assert_sg!([4, 2], 4);
        assert_sg!([4, 4], 5);
        assert_sg!([2, 2, 2], 4);
        assert_sg!([3, 3, 3], 5);
        assert_sg!([4, 4, 4], 9);
        assert_sg!([3, 2, 1], 1);
        assert_sg!([3, 3, 1], 3);
        assert_sg!([2, 1, 1], 3);
        assert_sg!([3, 1, 1], 0);
        assert_sg!([4, 3, 2, 1], 1);
    }

    #[test]
    fn terminal_and_empty_are_zero() {
        for row_count in 0..8 {
            assert!(Chomp::terminal(row_count).sprague_grundy_value().is_zero());
            assert!(Chomp::empty(row_count).sprague_grundy_value().is_zero());
        }
        assert_eq!(solve(&[]), Ok(0));
    }

    #[test]
    fn single_row() {
        for width in 1..32 {
            assert_sg!([width], width - 1);
        }
    }

    #[test]
    fn two_rows_differing_by_one_are_lost() {
        for width in 1..16 {
            assert_sg!([width, width - 1], 0);
        }
    }

    #[test]
    fn deterministic() {
        let chomp = Chomp::new(vec![5, 4, 4, 2]).unwrap();
        let first = chomp.sprague_grundy_value();
        for _ in 0..4 {
            assert_eq!(chomp.clone().sprague_grundy_value(), first);
        }
    }

    #[test]
    fn rejects_non_staircase() {
        assert_eq!(
            Chomp::new(vec![3, 1, 2]),
            Err(InvalidPosition::NotStaircase {
                row: 2,
                height: 2,
                below: 1
            })
        );
        assert!(solve(&[0, 1]).is_err());
        assert_eq!(
            solve(&[2, 3]).unwrap_err().to_string(),
            "Invalid position: row 1 has 3 squares but the row beneath it has only 2"
        );
    }

    #[test]
    fn eat_cuts_rows_above() {
        let chomp = Chomp::new(vec![5, 4, 2]).unwrap();
        assert_eq!(chomp.eat(1, 3).rows(), &[5, 3, 2]);
        assert_eq!(chomp.eat(0, 1).rows(), &[1, 1, 1]);
        assert_eq!(chomp.eat(2, 0).rows(), &[5, 4, 0]);
        assert_eq!(chomp.eat(0, 0).rows(), &[0, 0, 0]);
    }

    #[test]
    fn correct_moves() {
        assert_eq!(
            Chomp::new(vec![2, 1])
                .unwrap()
                .moves()
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<String>>(),
            ["Chomp[2, 0]", "Chomp[1, 1]"]
        );

        assert_eq!(
            Chomp::new(vec![2, 2])
                .unwrap()
                .moves()
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<String>>(),
            ["Chomp[2, 1]", "Chomp[2, 0]", "Chomp[1, 1]"]
        );

        assert!(Chomp::terminal(3).moves().is_empty());
        assert!(Chomp::empty(3).moves().is_empty());
    }

    #[test]
    fn terminal_position() {
        assert_eq!(Chomp::terminal(3).rows(), &[1, 0, 0]);
        assert!(Chomp::terminal(3).is_terminal());
        assert!(!Chomp::new(vec![1, 1]).unwrap().is_terminal());
        assert!(!Chomp::empty(2).is_terminal());
        assert!(Chomp::terminal(0).is_empty());
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(
            Chomp::from_str("3,2").unwrap(),
            Chomp::new(vec![3, 2]).unwrap()
        );
        assert_eq!(
            Chomp::from_str(" [5, 5, 5] ").unwrap(),
            Chomp::new(vec![5, 5, 5]).unwrap()
        );
        assert_eq!(
            Chomp::from_str("Chomp[1, 0]").unwrap(),
            Chomp::terminal(2)
        );
        assert_eq!(Chomp::new(vec![4, 0]).unwrap().to_string(), "Chomp[4, 0]");
        assert_eq!(Chomp::from_str("[1, 2]"), Err("Parse error: parser failed"));
        assert_eq!(Chomp::from_str("[1, 2"), Err("Parse error: parser failed"));
        assert_eq!(Chomp::from_str("2 1"), Err("Parse error: leftover input"));
    }

    #[test]
    fn terminal_is_seeded() {
        let tt = ParallelTranspositionTable::new();
        let chomp = Chomp::new(vec![2, 2]).unwrap();
        chomp.sprague_grundy_value_with(Strategy::Recursive, &tt);
        assert_eq!(tt.lookup_position(&Chomp::terminal(2)), Some(Nimber::new(0)));
        assert_eq!(tt.lookup_position(&chomp), Some(Nimber::new(2)));
        assert_eq!(tt.lookup_position(&Chomp::empty(2)), None);
    }

    #[test]
    fn table_is_consistent() {
        let mut qc = QuickCheck::new();
        let test = |chomp: Chomp| {
            let tt = ParallelTranspositionTable::new();
            chomp.sprague_grundy_value_with(Strategy::Recursive, &tt);

            let mut to_visit = vec![chomp];
            while let Some(position) = to_visit.pop() {
                if position.is_empty() {
                    continue;
                }
                let moves = position.moves();
                let value = tt.lookup_position(&position).unwrap();
                let follower_values = moves
                    .iter()
                    .map(|m| tt.lookup_position(m).unwrap())
                    .collect::<Vec<_>>();
                assert_eq!(value, Nimber::mex(follower_values));
                to_visit.extend(moves);
            }
        };
        qc.quickcheck(test as fn(Chomp));
    }

    #[test]
    fn memoized_agrees_with_naive() {
        let mut qc = QuickCheck::new();
        let test = |chomp: Chomp| {
            assert_eq!(chomp.sprague_grundy_value(), chomp.nim_value());
        };
        qc.quickcheck(test as fn(Chomp));
    }

    #[test]
    fn moves_are_smaller_staircases() {
        let mut qc = QuickCheck::new();
        let test = |chomp: Chomp| {
            let moves = chomp.moves();
            assert_eq!(moves.iter().unique().count(), moves.len());
            for m in moves {
                assert_eq!(m.row_count(), chomp.row_count());
                assert!(m.chips() < chomp.chips());
                assert!(!m.is_empty());
                assert_eq!(Chomp::new(m.rows().to_vec()), Ok(m));
            }
        };
        qc.quickcheck(test as fn(Chomp));
    }

    #[test]
    fn parsing_preserves_equality() {
        let mut qc = QuickCheck::new();
        let test = |chomp: Chomp| {
            assert_eq!(Chomp::from_str(&chomp.to_string()).unwrap(), chomp);
        };
        qc.quickcheck(test as fn(Chomp));
    }
}
