//! Save-file round trips through the filesystem.

use ataxx::{Activation, Coord, GameError, GameResult, GameSession, Player, Snapshot};

fn played_session() -> GameSession {
    let mut session = GameSession::new();
    for (row, col) in [(0, 0), (1, 1), (0, 6), (0, 4), (6, 6), (5, 5)] {
        session.handle_cell_activation(row, col).unwrap();
    }
    for _ in 0..7 {
        session.tick();
    }
    session
}

#[test]
fn test_save_then_load_restores_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.wzqtql");

    let original = played_session();
    assert_eq!(original.move_count(), 3);
    original.save(&path).unwrap();

    let mut restored = GameSession::blank();
    restored.load(&path).unwrap();

    assert_eq!(restored.board(), original.board());
    assert_eq!(restored.move_count(), 3);
    assert_eq!(restored.elapsed_seconds(), 7);
    assert_eq!(restored.result(), GameResult::InProgress(Player::White));
    assert!(restored.timer_enabled());
    assert!(restored.selection().is_none());
}

#[test]
fn test_save_drops_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selected.sav");

    let mut session = GameSession::new();
    session.select(0, 0).unwrap();
    session.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let snapshot = Snapshot::decode(&text).unwrap();
    assert_eq!(snapshot, Snapshot::capture(&GameSession::new()));
}

#[test]
fn test_missing_file_leaves_session_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = played_session();
    let before = session.clone();

    assert!(session.load(dir.path().join("absent.sav")).is_err());
    assert_eq!(session, before);
}

#[test]
fn test_corrupt_file_leaves_session_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.sav");
    let mut session = played_session();
    let before = session.clone();

    for text in [
        "",
        "black: 1\nwhite: 1\nsteps: 0\nseconds: 0\ngame_state: 0\n",
        "black: 1\nwhite: 64\nsteps: 0\nseconds: 0\ngame_state: 9\n",
        "white: 64\nblack: 1\nsteps: 0\nseconds: 0\ngame_state: 0\n",
        "black: 128\nwhite: 64\nsteps: 0\nseconds: 0\ngame_state: 0\n",
        "black: 1\nwhite: 64\nsteps: -1\nseconds: 0\ngame_state: 0\n",
    ] {
        std::fs::write(&path, text).unwrap();
        assert!(session.load(&path).is_err(), "accepted {:?}", text);
        assert_eq!(session, before);
    }
}

#[test]
fn test_finished_game_round_trips() {
    let text = "black: 3\nwhite: 0\nsteps: 12\nseconds: 40\ngame_state: 3\n";
    let snapshot = Snapshot::decode(text).unwrap();
    assert_eq!(snapshot.encode(), text);

    let session = snapshot.into_session().unwrap();
    assert_eq!(session.result(), GameResult::Win(Player::Black));
    assert_eq!(session.counts(), (2, 0));
}

#[test]
fn test_exhausted_move_counter_blocks_moves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.sav");
    std::fs::write(
        &path,
        "black: 18014398509481985\nwhite: 281474976710720\nsteps: 4294967295\nseconds: 0\ngame_state: 0\n",
    )
    .unwrap();

    let mut session = GameSession::new();
    session.load(&path).unwrap();
    assert_eq!(session.move_count(), u32::MAX);

    session.handle_cell_activation(0, 0).unwrap();
    let selected = session.clone();
    assert_eq!(session.handle_cell_activation(0, 1).unwrap(), Activation::Ignored);
    assert_eq!(session, selected);

    let origin = Coord::new(0, 0).unwrap();
    let destination = Coord::new(0, 1).unwrap();
    assert!(matches!(
        session.execute_move(origin, destination),
        Err(GameError::IllegalMove(_))
    ));
    assert_eq!(session, selected);
}
