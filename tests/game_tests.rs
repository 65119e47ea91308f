use minefield::game::{cell_at, Difficulty, GameController, Phase, CELL_COLS, CELL_ROWS};

/// Grid coordinates of some bomb on the controller's board.
fn find_bomb(game: &GameController) -> (usize, usize) {
    let b = game.board().expect("board");
    for y in 0..b.size() {
        for x in 0..b.size() {
            if b.cell(x, y).unwrap().is_bomb() {
                return (x, y);
            }
        }
    }
    panic!("no bomb on board");
}

/// Grid coordinates of some safe cell on the controller's board.
fn find_safe(game: &GameController) -> (usize, usize) {
    let b = game.board().expect("board");
    for y in 0..b.size() {
        for x in 0..b.size() {
            if !b.cell(x, y).unwrap().is_bomb() {
                return (x, y);
            }
        }
    }
    panic!("no safe cell on board");
}

fn click_cell(game: &mut GameController, x: usize, y: usize) {
    game.click(x as u16 * CELL_COLS, y as u16 * CELL_ROWS);
}

#[test]
fn starts_in_menu_without_board() {
    let game = GameController::new();
    assert_eq!(game.phase(), Phase::Menu);
    assert!(game.board().is_none());
}

#[test]
fn presets_match_difficulty_table() {
    assert_eq!(Difficulty::Low.params(), (10, 10));
    assert_eq!(Difficulty::Medium.params(), (20, 40));
    assert_eq!(Difficulty::High.params(), (30, 90));
}

#[test]
fn start_enters_playing_with_preset_board() {
    for d in Difficulty::ALL {
        let mut game = GameController::with_seed(7);
        game.start(d).unwrap();
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.difficulty(), d);
        let (size, bombs) = d.params();
        let b = game.board().unwrap();
        assert_eq!(b.size(), size);
        assert_eq!(b.bomb_count(), bombs);
    }
}

#[test]
fn safe_click_reveals_and_keeps_playing() {
    let mut game = GameController::with_seed(7);
    game.start(Difficulty::Low).unwrap();
    let (x, y) = find_safe(&game);
    click_cell(&mut game, x, y);
    assert_eq!(game.phase(), Phase::Playing);
    assert!(game.board().unwrap().cell(x, y).unwrap().revealed());
}

#[test]
fn bomb_click_transitions_to_game_over() {
    let mut game = GameController::with_seed(7);
    game.start(Difficulty::Low).unwrap();
    let (x, y) = find_bomb(&game);
    click_cell(&mut game, x, y);
    assert_eq!(game.phase(), Phase::GameOver);
    // The losing click reveals nothing.
    assert!(!game.board().unwrap().cell(x, y).unwrap().revealed());
}

#[test]
fn restart_after_game_over_resets_board() {
    let mut game = GameController::with_seed(7);
    game.start(Difficulty::Medium).unwrap();
    let (x, y) = find_safe(&game);
    click_cell(&mut game, x, y);
    let (bx, by) = find_bomb(&game);
    click_cell(&mut game, bx, by);
    assert_eq!(game.phase(), Phase::GameOver);

    game.restart().unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.difficulty(), Difficulty::Medium);
    let b = game.board().unwrap();
    assert_eq!((b.size(), b.bomb_count()), (20, 40));
    for y in 0..b.size() {
        for x in 0..b.size() {
            assert!(!b.cell(x, y).unwrap().revealed());
        }
    }
}

#[test]
fn restart_is_a_noop_outside_game_over() {
    let mut game = GameController::new();
    game.restart().unwrap();
    assert_eq!(game.phase(), Phase::Menu);
    assert!(game.board().is_none());

    game.start(Difficulty::Low).unwrap();
    let (x, y) = find_safe(&game);
    click_cell(&mut game, x, y);
    game.restart().unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    // The board in play is untouched.
    assert!(game.board().unwrap().cell(x, y).unwrap().revealed());
}

#[test]
fn clicks_outside_grid_are_ignored() {
    let mut game = GameController::with_seed(7);
    game.start(Difficulty::Low).unwrap();
    let size = game.board().unwrap().size();
    game.click(size as u16 * CELL_COLS, 0);
    game.click(0, size as u16 * CELL_ROWS);
    game.click(u16::MAX, u16::MAX);
    assert_eq!(game.phase(), Phase::Playing);
    for y in 0..size {
        for x in 0..size {
            assert!(!game.board().unwrap().cell(x, y).unwrap().revealed());
        }
    }
}

#[test]
fn clicks_are_ignored_outside_playing() {
    let mut game = GameController::with_seed(7);
    game.click(0, 0);
    assert_eq!(game.phase(), Phase::Menu);

    game.start(Difficulty::Low).unwrap();
    let (bx, by) = find_bomb(&game);
    click_cell(&mut game, bx, by);
    assert_eq!(game.phase(), Phase::GameOver);
    let (sx, sy) = find_safe(&game);
    click_cell(&mut game, sx, sy);
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(!game.board().unwrap().cell(sx, sy).unwrap().revealed());
}

#[test]
fn fixed_seed_reproduces_layout_across_restarts() {
    let mut game = GameController::with_seed(99);
    game.start(Difficulty::Low).unwrap();
    let first = find_bomb(&game);
    let (bx, by) = first;
    click_cell(&mut game, bx, by);
    game.restart().unwrap();
    assert_eq!(find_bomb(&game), first);
}

#[test]
fn pixel_mapping_uses_integer_division() {
    assert_eq!(cell_at(0, 0, 10), Some((0, 0)));
    assert_eq!(cell_at(CELL_COLS - 1, CELL_ROWS - 1, 10), Some((0, 0)));
    assert_eq!(cell_at(CELL_COLS, 0, 10), Some((1, 0)));
    assert_eq!(cell_at(9 * CELL_COLS, 9 * CELL_ROWS, 10), Some((9, 9)));
    assert_eq!(cell_at(10 * CELL_COLS, 0, 10), None);
    assert_eq!(cell_at(0, 10 * CELL_ROWS, 10), None);
}
