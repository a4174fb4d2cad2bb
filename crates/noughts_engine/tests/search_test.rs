//! Properties of the minimax opponent over whole games.

use noughts_engine::{
    Board, Game, Mark, Outcome, Position, best_move, evaluate, minimax, select_computer_move,
};

/// Plays both sides with the search until the game ends.
fn self_play(mut board: Board, mut to_move: Mark) -> Board {
    while !evaluate(&board).is_terminal() {
        let mv = best_move(&board, to_move).expect("non-terminal board has a move");
        assert!(board.is_empty(mv.position), "search chose occupied {}", mv.position);
        board = board.with_mark(mv.position, to_move);
        to_move = to_move.opponent();
    }
    board
}

#[test]
fn test_perfect_play_from_empty_board_draws() {
    let end = self_play(Board::new(), Mark::X);
    assert_eq!(evaluate(&end), Outcome::Draw);
}

#[test]
fn test_perfect_play_draws_when_o_opens() {
    let end = self_play(Board::new(), Mark::O);
    assert_eq!(evaluate(&end), Outcome::Draw);
}

#[test]
fn test_empty_board_value_is_zero() {
    assert_eq!(minimax(&Board::new(), Mark::X), 0);
    assert_eq!(minimax(&Board::new(), Mark::O), 0);
}

#[test]
fn test_opening_move_is_corner_or_center() {
    let mv = best_move(&Board::new(), Mark::O).unwrap();
    assert_eq!(mv.score, 0);
    assert!(
        matches!(
            mv.position,
            Position::TopLeft
                | Position::TopRight
                | Position::Center
                | Position::BottomLeft
                | Position::BottomRight
        ),
        "unexpected opening {}",
        mv.position
    );
}

/// Walks every line of play available to X, with the computer answering
/// each X move. Tallies draws and computer wins.
fn explore_all_x_lines(game: &Game, counts: &mut [usize; 2]) {
    for pos in Position::valid_moves(game.state().board()) {
        let mut next = game.clone();
        let outcome = next.place(pos, Mark::X).expect("legal move");
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => {
                panic!("X won against the computer: {:?}", next.state().history())
            }
            Outcome::Draw => counts[0] += 1,
            Outcome::Win { mark: Mark::O, .. } => counts[1] += 1,
            Outcome::InProgress => match next.play_computer_move().expect("O to move") {
                (_, Outcome::InProgress) => explore_all_x_lines(&next, counts),
                (_, Outcome::Draw) => counts[0] += 1,
                (_, Outcome::Win { mark: Mark::O, .. }) => counts[1] += 1,
                (_, Outcome::Win { mark: Mark::X, .. }) => unreachable!("O move cannot win for X"),
            },
        }
    }
}

#[test]
fn test_computer_never_loses_to_any_line_of_play() {
    let mut counts = [0usize; 2];
    explore_all_x_lines(&Game::new(), &mut counts);
    let [draws, computer_wins] = counts;
    assert!(draws > 0);
    assert!(computer_wins > 0, "computer should punish weak play");
}

#[test]
fn test_computer_converts_forced_win() {
    // O to move; only the diagonal through the center completes.
    let board: Board = "OX. XO. X..".parse().unwrap();
    let pos = select_computer_move(&board).unwrap();
    assert_eq!(pos, Position::BottomRight);
}
