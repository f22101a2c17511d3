//! Scripted console sessions.

use ataxx::{AtaxxConfig, Console, Flow, GameResult, Player};
use std::io::Cursor;

#[test]
fn test_play_two_moves() {
    let mut console = Console::new(AtaxxConfig::default(), Vec::new());
    console
        .run(Cursor::new("0 0\n0 2\nclick 0 6\n1 5\nstatus\n"))
        .unwrap();

    assert_eq!(console.session().move_count(), 2);
    assert_eq!(console.session().result(), GameResult::InProgress(Player::Black));

    let text = String::from_utf8(console.into_output()).unwrap();
    assert!(text.starts_with("  0123456\n0 B.....W\n"));
    assert!(text.contains("jump 0,0 -> 0,2: White to move (move 1)"));
    assert!(text.contains("clone 0,6 -> 1,5: Black to move (move 2)"));
    assert!(text.ends_with("Black to move | B 2 W 3 | move 2 | 0s\n"));
}

#[test]
fn test_quit_stops_reading() {
    let mut console = Console::new(AtaxxConfig::default(), Vec::new());
    assert_eq!(console.execute("help").unwrap(), Flow::Continue);
    console.run(Cursor::new("quit\n0 0\n0 1\n")).unwrap();
    assert_eq!(console.session().move_count(), 0);
}

#[test]
fn test_bad_input_reported() {
    let mut console = Console::new(AtaxxConfig::default(), Vec::new());
    console.execute("jump").unwrap();
    console.execute("9 9").unwrap();
    console.execute("tick many").unwrap();
    let text = String::from_utf8(console.into_output()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "unknown command `jump` (try `help`)");
    assert_eq!(lines[1], "Coordinate (9, 9) is outside the board");
    assert!(lines[2].starts_with("usage: tick"));
}

#[test]
fn test_tick_and_clean() {
    let mut console = Console::new(AtaxxConfig::default(), Vec::new());
    console.execute("tick 5").unwrap();
    assert_eq!(console.session().elapsed_seconds(), 5);

    console.execute("clean").unwrap();
    console.execute("tick 3").unwrap();
    assert_eq!(console.session().elapsed_seconds(), 0);
    assert_eq!(console.session().board().occupied(), 0);
}

#[test]
fn test_blank_start() {
    let config = AtaxxConfig::default().with_start_on_launch(false);
    let mut console = Console::new(config, Vec::new());
    assert_eq!(console.session().board().occupied(), 0);
    assert!(!console.session().timer_enabled());

    console.execute("new").unwrap();
    assert_eq!(console.session().counts(), (2, 2));
}

#[test]
fn test_save_and_load_through_console() {
    let dir = tempfile::tempdir().unwrap();
    let config = AtaxxConfig::default().with_save_path(dir.path().join("game.sav"));

    let mut console = Console::new(config.clone(), Vec::new());
    console.run(Cursor::new("0 0\n1 1\ntick 4\nsave\n")).unwrap();
    let saved = console.session().clone();
    let text = String::from_utf8(console.into_output()).unwrap();
    assert!(text.contains("saved to"));

    let mut console = Console::new(config, Vec::new());
    console.execute("load").unwrap();
    assert_eq!(console.session().board(), saved.board());
    assert_eq!(console.session().move_count(), 1);
    assert_eq!(console.session().elapsed_seconds(), 4);
}

#[test]
fn test_load_without_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = AtaxxConfig::default().with_save_path(dir.path().join("missing.sav"));
    let mut console = Console::new(config, Vec::new());
    console.execute("0 0").unwrap();
    let before = console.session().clone();

    console.execute("load").unwrap();
    assert_eq!(console.session(), &before);
    let text = String::from_utf8(console.into_output()).unwrap();
    assert_eq!(text.lines().last(), Some("no saved game"));
}

#[test]
fn test_json_report() {
    let mut console = Console::new(AtaxxConfig::default(), Vec::new());
    console.execute("json").unwrap();
    let text = String::from_utf8(console.into_output()).unwrap();
    let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(value["move_count"], 0);
    assert_eq!(value["white"], 2);
    assert_eq!(value["timer_enabled"], true);
}
