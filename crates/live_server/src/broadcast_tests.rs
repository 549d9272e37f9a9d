use super::*;
use match_core::ResultTag;

fn game_over() -> SnapshotEvent {
    SnapshotEvent::GameOver {
        result: ResultTag::Draw,
    }
}

#[test]
fn deliver_without_subscribers_does_not_fail() {
    let (tx, rx) = broadcast::channel(EVENT_BUFFER);
    drop(rx);
    let mut sink = BroadcastSink::new(tx);
    sink.deliver(&game_over());
}

#[test]
fn subscribers_receive_published_events() {
    let (tx, mut rx) = broadcast::channel(EVENT_BUFFER);
    let mut sink = BroadcastSink::new(tx);
    sink.deliver(&game_over());
    assert_eq!(rx.try_recv().unwrap(), game_over());
}

#[test]
fn late_subscriber_sees_only_later_events() {
    let (tx, _keepalive) = broadcast::channel(EVENT_BUFFER);
    let mut sink = BroadcastSink::new(tx.clone());

    sink.deliver(&SnapshotEvent::Move {
        ply: 1,
        fen: "fen-1".to_string(),
        san: "e4".to_string(),
        uci: "e2e4".to_string(),
    });

    let mut rx = tx.subscribe();
    sink.deliver(&game_over());

    assert_eq!(rx.try_recv().unwrap(), game_over());
    assert!(rx.try_recv().is_err());
}
