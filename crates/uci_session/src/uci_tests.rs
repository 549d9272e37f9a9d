use super::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const RESPONSIVE: &str = r#"while read line; do
  case "$line" in
    uci) echo uciok ;;
    isready) echo readyok ;;
    go*) echo "bestmove e2e4" ;;
    quit) exit 0 ;;
  esac
done"#;

const SILENT_AFTER_HANDSHAKE: &str = r#"while read line; do
  case "$line" in
    uci) echo uciok ;;
    isready) echo readyok ;;
    quit) exit 0 ;;
  esac
done"#;

const DIES_ON_GO: &str = r#"while read line; do
  case "$line" in
    uci) echo uciok ;;
    isready) echo readyok ;;
    go*) exit 1 ;;
  esac
done"#;

fn stub_engine(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("uci-stub-{name}-{}.sh", std::process::id()));
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn handshakes_and_returns_bestmove() {
    let path = stub_engine("responsive", RESPONSIVE);
    let mut session = UciEngineSession::spawn("stub", &path).unwrap();

    let mv = session
        .best_move(START_FEN, Duration::from_millis(10))
        .unwrap();
    assert_eq!(mv, "e2e4");

    // Double release of a real process must not fail either.
    session.shutdown().unwrap();
    session.shutdown().unwrap();
    fs::remove_file(path).ok();
}

#[test]
fn silent_engine_times_out_instead_of_hanging() {
    let path = stub_engine("silent", SILENT_AFTER_HANDSHAKE);
    let mut session = UciEngineSession::spawn("stub", &path).unwrap();

    // Alive, handshaken, but never answers `go`.
    let err = session
        .best_move(START_FEN, Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, SessionError::Timeout));

    // The wedged process was reaped along the way.
    let err = session
        .best_move(START_FEN, Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, SessionError::Closed));
    fs::remove_file(path).ok();
}

#[test]
fn crashed_engine_reports_closed_stream() {
    let path = stub_engine("crashing", DIES_ON_GO);
    let mut session = UciEngineSession::spawn("stub", &path).unwrap();

    let err = session
        .best_move(START_FEN, Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, SessionError::Closed));
    fs::remove_file(path).ok();
}

#[test]
fn missing_binary_fails_to_spawn() {
    let err = UciEngineSession::spawn("stub", Path::new("/no/such/engine")).unwrap_err();
    assert!(matches!(err, SessionError::Spawn { .. }));
}
