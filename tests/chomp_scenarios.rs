use sgchomp::{
    numeric::nimber::Nimber,
    short::impartial::{
        games::chomp::{Chomp, InvalidPosition, solve},
        solver::Strategy,
        transposition_table::ParallelTranspositionTable,
    },
};

#[test]
fn known_boards() {
    let known: &[(&[u32], u32)] = &[
        (&[1], 0),
        (&[0], 0),
        (&[2, 1], 0),
        (&[3, 2], 0),
        (&[1, 1], 1),
        (&[2], 1),
        (&[3], 2),
        (&[2, 2], 2),
        (&[3, 1], 3),
        (&[3, 3], 4),
        (&[5, 5, 5, 5, 5], 6),
    ];

    for (rows, expected) in known {
        assert_eq!(solve(rows), Ok(*expected), "{:?}", rows);
    }
}

#[test]
fn worklist_on_square_board() {
    let chomp = Chomp::new(vec![5, 5, 5, 5, 5]).unwrap();
    let tt = ParallelTranspositionTable::new();
    assert_eq!(
        chomp.sprague_grundy_value_with(Strategy::Worklist, &tt),
        Nimber::new(6)
    );
    // Every staircase inside a 5x5 square except the empty one
    assert_eq!(tt.len(), 251);
}

#[test]
fn shared_table_across_boards() {
    let tt = ParallelTranspositionTable::new();
    let small = Chomp::new(vec![3, 3]).unwrap();
    let large = Chomp::new(vec![4, 4]).unwrap();

    assert_eq!(
        small.sprague_grundy_value_with(Strategy::Recursive, &tt),
        Nimber::new(4)
    );
    let cached = tt.len();
    assert_eq!(
        large.sprague_grundy_value_with(Strategy::Recursive, &tt),
        Nimber::new(5)
    );
    assert!(tt.len() > cached);
    assert_eq!(
        small.sprague_grundy_value_with(Strategy::Recursive, &tt),
        Nimber::new(4)
    );
}

#[test]
fn invalid_board() {
    assert_eq!(
        solve(&[1, 4, 4]),
        Err(InvalidPosition::NotStaircase {
            row: 1,
            height: 4,
            below: 1,
        })
    );
}
