use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use fluenter_overlay::relay::{Signal, WatcherLink};
use fluenter_overlay::server::{spawn_listener, CtxHandle, WatcherHub};

#[test]
fn signals_arrive_in_order_and_malformed_lines_are_skipped() {
    let (tx, rx) = mpsc::channel();
    let hub = WatcherHub::new();
    let addr = spawn_listener("127.0.0.1:0", tx, hub, CtxHandle::default()).unwrap();

    let mut stream = TcpStream::connect(addr).unwrap();
    writeln!(
        stream,
        r#"{{"signal":"update-position","payload":{{"x":100,"y":100}}}}"#
    )
    .unwrap();
    writeln!(stream, "definitely not json").unwrap();
    writeln!(stream).unwrap();
    writeln!(stream, r#"{{"signal":"hide-overlay"}}"#).unwrap();

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        Signal::UpdatePosition { x: 100, y: 100 }
    );
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        Signal::HideOverlay
    );
}

#[test]
fn multiple_watcher_connections_feed_the_same_channel() {
    let (tx, rx) = mpsc::channel();
    let hub = WatcherHub::new();
    let addr = spawn_listener("127.0.0.1:0", tx, hub, CtxHandle::default()).unwrap();

    let mut first = TcpStream::connect(addr).unwrap();
    let mut second = TcpStream::connect(addr).unwrap();
    writeln!(first, r#"{{"signal":"hide-overlay"}}"#).unwrap();
    writeln!(second, r#"{{"signal":"apply-correction","payload":"hi"}}"#).unwrap();

    // Cross-connection order is not guaranteed; both signals must land.
    let received = vec![
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
    ];
    assert!(received.contains(&Signal::HideOverlay));
    assert!(received.contains(&Signal::ApplyCorrection("hi".into())));
}

#[test]
fn correction_notice_is_written_back_to_the_watcher() {
    let (tx, _rx) = mpsc::channel();
    let hub = WatcherHub::new();
    let addr = spawn_listener("127.0.0.1:0", tx, hub.clone(), CtxHandle::default()).unwrap();

    let stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    // Wait for the accept loop to register the connection.
    let deadline = Instant::now() + Duration::from_secs(5);
    while hub.peer_count() == 0 {
        assert!(Instant::now() < deadline, "watcher was never registered");
        std::thread::sleep(Duration::from_millis(10));
    }

    hub.correction_applied("hello world");

    let mut line = String::new();
    BufReader::new(stream).read_line(&mut line).unwrap();
    let notice: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(notice["event"], "correction-applied");
    assert_eq!(notice["text"], "hello world");
}

#[test]
fn binding_an_occupied_port_fails() {
    let (tx, _rx) = mpsc::channel();
    let addr = spawn_listener("127.0.0.1:0", tx, WatcherHub::new(), CtxHandle::default()).unwrap();

    let (tx2, _rx2) = mpsc::channel();
    assert!(spawn_listener(
        &addr.to_string(),
        tx2,
        WatcherHub::new(),
        CtxHandle::default()
    )
    .is_err());
}
