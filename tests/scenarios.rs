//! End-to-end propagation and search scenarios through the public API.

use aargon::beam::{Beam, Color, MAX_BEAM_UPDATES};
use aargon::geometry::{Direction, Position};
use aargon::grid::Board;
use aargon::pieces::{Piece, PieceTemplate};
use aargon::puzzles::{AARGON_PUZZLE, CONVERTER_LOOP_DEMO};
use aargon::reflector::Reflector;
use aargon::solver::{solve, Inventory};

type Square = Board<7, 7>;

fn at(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn is_lit<const C: usize, const R: usize>(board: &Board<C, R>, x: i32, y: i32) -> bool {
    board.piece_at(at(x, y)).unwrap().unwrap().is_lit()
}

/// White laser along row 3 into a mirror at the centre, with white coins
/// on three sides of the mirror.
fn mirror_board(rotation: Direction) -> Square {
    let mut board = Square::new();
    board.add(Piece::laser(0, 3, Direction::East, Color::WHITE)).unwrap();
    board.add(Piece::reflector(3, 3, rotation, Reflector::Mirror)).unwrap();
    board.add(Piece::coin(3, 5, Color::WHITE)).unwrap();
    board.add(Piece::coin(5, 3, Color::WHITE)).unwrap();
    board.add(Piece::coin(3, 1, Color::WHITE)).unwrap();
    board.update();
    board
}

#[test]
fn mirror_deflects_beam_a_right_angle_onto_coin() {
    let board = mirror_board(Direction::SouthEast);

    assert!(is_lit(&board, 3, 5));
    assert!(!is_lit(&board, 5, 3));
    assert!(!is_lit(&board, 3, 1));
    assert_eq!(board.lit_coins(), 1);
    assert_eq!(
        board.beams_at(at(3, 4)).unwrap(),
        &[Beam::new(at(3, 4), Direction::South, Color::WHITE)]
    );
    assert!(board.beams_at(at(4, 3)).unwrap().is_empty());
}

#[test]
fn square_on_mirror_sends_beam_back_along_its_path() {
    let board = mirror_board(Direction::South);

    assert_eq!(board.lit_coins(), 0);
    for x in 1..3 {
        let beams = board.beams_at(at(x, 3)).unwrap();
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].direction, Direction::East);
        assert_eq!(beams[0].updates, 1);
    }
}

fn splitter_board(coin_color: Color) -> Square {
    let mut board = Square::new();
    board.add(Piece::laser(3, 6, Direction::North, Color::RED)).unwrap();
    board.add(Piece::reflector(3, 3, Direction::North, Reflector::Splitter)).unwrap();
    board.add(Piece::coin(5, 3, coin_color)).unwrap();
    board.add(Piece::coin(1, 3, coin_color)).unwrap();
    board.update();
    board
}

#[test]
fn splitter_lights_both_side_coins_of_matching_color() {
    let board = splitter_board(Color::RED);
    assert!(board.is_solved());
    assert_eq!(board.beams_at(at(6, 3)).unwrap()[0].direction, Direction::East);
    assert_eq!(board.beams_at(at(0, 3)).unwrap()[0].direction, Direction::West);
    // nothing passes the splitter
    assert!(board.beams_at(at(3, 2)).unwrap().is_empty());

    let board = splitter_board(Color::GREEN);
    assert_eq!(board.lit_coins(), 0);
}

#[test]
fn converter_recolors_beam_for_the_coin_beyond() {
    let mut board = Board::<7, 3>::new();
    board.add(Piece::laser(0, 1, Direction::East, Color::RED)).unwrap();
    board.add(Piece::reflector(2, 1, Direction::East, Reflector::Convert)).unwrap();
    board.add(Piece::coin(4, 1, Color::GREEN)).unwrap();
    board.add(Piece::coin(5, 1, Color::RED)).unwrap();
    board.update();

    assert!(is_lit(&board, 4, 1));
    assert!(!is_lit(&board, 5, 1));
    assert_eq!(board.beams_at(at(1, 1)).unwrap()[0].color, Color::RED);
    assert_eq!(board.beams_at(at(3, 1)).unwrap()[0].color, Color::GREEN);
}

#[test]
fn reflective_cycle_settles_at_the_merge_cap() {
    // a threeway feeds a loop of mirrors and a refractor that leads back
    // into the threeway
    let mut board = Square::new();
    board.add(Piece::laser(1, 4, Direction::NorthEast, Color::RED)).unwrap();
    board.add(Piece::reflector(2, 3, Direction::West, Reflector::Threeway)).unwrap();
    board.add(Piece::reflector(5, 3, Direction::SouthEast, Reflector::Mirror)).unwrap();
    board.add(Piece::reflector(5, 6, Direction::SouthWest, Reflector::Mirror)).unwrap();
    board.add(Piece::reflector(0, 6, Direction::NorthWest, Reflector::Mirror)).unwrap();
    board.add(Piece::reflector(0, 2, Direction::NorthEast, Reflector::Mirror)).unwrap();
    board.add(Piece::reflector(1, 2, Direction::East, Reflector::Refractor)).unwrap();
    board.add(Piece::coin(3, 6, Color::RED)).unwrap();
    board.update();

    assert!(board.is_solved());
    let lap = [
        (at(3, 3), Direction::East),
        (at(4, 3), Direction::East),
        (at(5, 4), Direction::South),
        (at(5, 5), Direction::South),
        (at(4, 6), Direction::West),
        (at(3, 6), Direction::West),
        (at(2, 6), Direction::West),
        (at(1, 6), Direction::West),
        (at(0, 5), Direction::North),
        (at(0, 4), Direction::North),
        (at(0, 3), Direction::North),
    ];
    for (position, direction) in lap {
        let mut expected = Beam::new(position, direction, Color::RED);
        expected.updates = MAX_BEAM_UPDATES;
        assert_eq!(board.beams_at(position).unwrap(), &[expected], "at {position}");
    }
}

#[test]
fn empty_inventory_reports_already_solved_or_nothing() {
    let mut board = Board::<5, 3>::new();
    board.add(Piece::laser(0, 1, Direction::East, Color::CYAN)).unwrap();
    board.add(Piece::coin(3, 1, Color::CYAN)).unwrap();
    let solution = solve(&board, &Inventory::new()).unwrap().unwrap();
    assert!(solution.placements.is_empty());

    board.add(Piece::coin(3, 0, Color::CYAN)).unwrap();
    assert!(solve(&board, &Inventory::new()).unwrap().is_none());
}

#[test]
fn solution_board_replays_from_its_placements() {
    let mut board = Board::<5, 5>::new();
    board.add(Piece::laser(0, 4, Direction::East, Color::BLUE)).unwrap();
    board.add(Piece::coin(4, 0, Color::BLUE)).unwrap();
    let inventory = Inventory::new().with(PieceTemplate::new(Reflector::Mirror), 2);

    let solution = solve(&board, &inventory).unwrap().unwrap();
    let mut replay = board.clone();
    for placement in &solution.placements {
        replay
            .add(PieceTemplate::new(placement.reflector).place(placement.position, placement.rotation))
            .unwrap();
    }
    replay.update();
    assert!(replay.is_solved());
    assert_eq!(replay.to_string(), solution.board.to_string());
}

fn assert_clone_matches<const C: usize, const R: usize>(original: &Board<C, R>) {
    let mut copy = original.clone();
    copy.update();

    assert_eq!(copy.is_solved(), original.is_solved());
    assert_eq!(copy.lit_coins(), original.lit_coins());
    for y in 0..R as i32 {
        for x in 0..C as i32 {
            assert_eq!(copy.beams_at(at(x, y)), original.beams_at(at(x, y)));
        }
    }
}

#[test]
fn cloned_boards_propagate_identically() {
    assert_clone_matches(&AARGON_PUZZLE.board().unwrap());
    assert_clone_matches(&CONVERTER_LOOP_DEMO.board().unwrap());
    assert_clone_matches(&splitter_board(Color::RED));
}
