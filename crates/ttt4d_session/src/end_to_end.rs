// Whole-game scenarios across the core, engine and session crates
use std::cell::RefCell;
use std::rc::Rc;

use ttt4d_core::fixtures::{drawn_board, drawn_moves};
use ttt4d_core::lines;
use ttt4d_core::{
    check_winner, is_legal, legal_moves, Board, Cell, Coord, GameError, Move, Player, Terminal,
};
use ttt4d_engine::choose_move;

use crate::{GameController, Outcome, Session, SessionConfig, SessionError, Step};

type Reports = Rc<RefCell<Vec<Outcome>>>;

fn reports() -> (Reports, impl FnMut(Outcome) + 'static) {
    let reports: Reports = Rc::default();
    let sink = Rc::clone(&reports);
    (reports, move |outcome: Outcome| sink.borrow_mut().push(outcome))
}

#[test]
fn test_first_move_occupies_cell() {
    let (_, reporter) = reports();
    let mut session = Session::new(4, 3, reporter).unwrap();
    let board = session.state().board().clone();
    let mv = Move::new(0, 0, 0, 0);
    assert!(is_legal(&board, mv));

    session.apply_human_move(mv).unwrap();
    assert!(!is_legal(session.state().board(), mv));
}

#[test]
fn test_ai_completes_precomputed_line() {
    let table = lines::table(4);
    for id in [0, table.len() / 2, table.len() - 1] {
        let coords = table.line_coords(id);
        let mut board = Board::standard();
        for coord in &coords[..3] {
            board.set(*coord, Cell::Player1).unwrap();
        }
        assert_eq!(choose_move(&board, Player::Player1, 3).unwrap().coord, coords[3]);
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = drawn_board();
    assert_eq!(check_winner(&board), Terminal::Draw);
}

#[test]
fn test_occupied_cell_is_illegal_move() {
    let config = SessionConfig {
        search_depth: Some(2),
        ..SessionConfig::default()
    };
    let (_, reporter) = reports();
    let mut controller = GameController::initialize(&config, reporter).unwrap();
    controller.submit_move(&[1, 2, 3, 0]).unwrap();
    controller.wait_for_ai().unwrap();

    let before = controller.session().state().clone();
    let err = controller.submit_move(&[1, 2, 3, 0]).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Game(GameError::IllegalMove(coord)) if coord == Coord::new(1, 2, 3, 0)
    ));
    assert_eq!(controller.session().state(), &before);
}

#[test]
fn test_draw_is_reported_by_session() {
    let (reports, reporter) = reports();
    let mut session = Session::new(4, 3, reporter).unwrap();
    let (p1, p2) = drawn_moves();

    let mut last = None;
    for (human, ai) in p1.iter().zip(&p2) {
        session.apply_human_move(*human).unwrap();
        last = Some(session.apply_ai_move(*ai).unwrap());
    }
    assert_eq!(last, Some(Step::Finished(Outcome::Draw)));
    assert_eq!(*reports.borrow(), vec![Outcome::Draw]);
}

#[test]
fn test_game_against_ai_reports_exactly_once() {
    let config = SessionConfig {
        size: 3,
        search_depth: Some(2),
        ..SessionConfig::default()
    };
    let (reports, reporter) = reports();
    let mut controller = GameController::initialize(&config, reporter).unwrap();

    let outcome = loop {
        let mv = legal_moves(controller.session().state().board())
            .next()
            .expect("game ended without a report");
        let components = mv.coord.components().map(usize::from);
        match controller.submit_move(&components).unwrap() {
            Step::Finished(outcome) => break outcome,
            Step::DispatchAi(_) => {}
            Step::AwaitHuman => panic!("human move must hand over to the AI"),
        }
        if let Step::Finished(outcome) = controller.wait_for_ai().unwrap() {
            break outcome;
        }
    };

    assert_eq!(*reports.borrow(), vec![outcome]);
    assert_eq!(controller.session().outcome(), Some(outcome));
    assert!(controller.submit_move(&[0, 0, 0, 0]).is_err());
}

#[test]
fn test_reset_discards_pending_search() {
    let config = SessionConfig {
        search_depth: Some(2),
        ..SessionConfig::default()
    };
    let (_, reporter) = reports();
    let mut controller = GameController::initialize(&config, reporter).unwrap();
    controller.submit_move(&[0, 0, 0, 0]).unwrap();
    controller.reset().unwrap();

    // the old response is dropped when the new one is awaited
    controller.submit_move(&[3, 3, 3, 3]).unwrap();
    assert_eq!(controller.wait_for_ai().unwrap(), Step::AwaitHuman);
    let state = controller.session().state();
    assert_eq!(state.move_count(), 2);
    assert_eq!(state.board().get(Coord::new(3, 3, 3, 3)).unwrap(), Cell::Player1);
    assert_eq!(state.board().count(Cell::Player1), 1);
    assert_eq!(state.board().count(Cell::Player2), 1);
}
