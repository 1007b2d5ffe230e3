use infisweep_core::snapshot;
use infisweep_core::*;

#[test]
fn click_through_viewport_then_save_and_load() {
    let viewport = Viewport::new(40, 20);
    let mut board = Board::new(42);

    // the center of the window is world (0, 0)
    let center = viewport.world_at(board.offset(), ScreenPos { column: 19, row: 9 }).unwrap();
    assert_eq!(center, (0, 0));
    assert_eq!(board.reveal(center).unwrap(), RevealOutcome::Revealed);

    // the safe start moved the frame, the clicked screen cell now shows the opened cell
    let opened = viewport.world_at(board.offset(), ScreenPos { column: 19, row: 9 }).unwrap();
    assert_eq!(opened, (1, 0));
    assert_eq!(board.cell_at(opened), Some(CellValue::Revealed(0)));

    let flag_at = viewport.world_at_char(board.offset(), 10, 2).unwrap();
    assert_eq!(board.toggle_flag(flag_at).unwrap(), MarkOutcome::Changed);

    let saved = snapshot::save(&board).unwrap();
    let mut restored = snapshot::load(&saved, BoardConfig::default()).unwrap();
    assert_eq!(restored, board);

    let before: Vec<_> = viewport.window(&board).collect();
    let after: Vec<_> = viewport.window(&restored).collect();
    assert_eq!(before, after);

    // the restored board keeps playing from the same frame
    assert_eq!(restored.reveal((-1, 1)).unwrap(), RevealOutcome::GameOver);
    assert_eq!(restored.cell_at((-1, 1)), None);
    assert!(restored.is_finished());
}

#[test]
fn failed_load_leaves_nothing_half_built() {
    let mut board = Board::new(9);
    board.reveal((0, 0)).unwrap();
    let mut text = String::from_utf8(snapshot::save(&board).unwrap()).unwrap();
    text.truncate(text.len() - 3);

    assert_eq!(
        snapshot::load(text.as_bytes(), BoardConfig::default()),
        Err(GameError::CorruptSave)
    );
}

#[test]
fn mine_placement_does_not_depend_on_play() {
    let seed = 1234;
    let probe: Vec<_> = (-30..30)
        .flat_map(|x| (-30..30).map(move |y| (x, y)))
        .collect();
    let fresh: Vec<_> = probe.iter().map(|&pos| is_mine(pos, seed)).collect();

    let mut board = Board::new(seed);
    board.reveal((5, 5)).unwrap();
    board.toggle_flag((-20, 3)).unwrap();

    let played: Vec<_> = probe.iter().map(|&pos| board.has_mine_at(pos)).collect();
    assert_eq!(fresh, played);
}

#[test]
fn truncated_flag_bonus_scores_every_flag_equally() {
    let config = BoardConfig {
        flag_bonus: FlagBonus::Truncated,
        ..Default::default()
    };
    let mut board = Board::with_config(SeededMinefield::new(42), config);
    for x in 0..10 {
        board.toggle_flag((100 + x, 100)).unwrap();
    }

    assert_eq!(board.score(), 10 * 5);
}
