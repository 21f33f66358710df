//! Tests for Connection
//!
//! These tests verify:
//! - One-way sends and request/response exchanges over TCP
//! - Fail responses leave the connection usable
//! - Partial reads are joined and leftovers kept for the next call
//! - Transport failures close the connection for good
//! - SharedConnection serializes concurrent callers

#[path = "../common/mod.rs"]
mod common;

use std::cell::Cell;
use std::io::ErrorKind;
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;

use common::{written, MockServer, ScriptedStream, Step};
use mcremote::{args, Config, Connection, ConnectionState, DelimiterPolicy, McError, SharedConnection};

/// Connection over a scripted stream, plus its read-call counter
fn scripted(chunks: &[&str]) -> (Connection<ScriptedStream>, Rc<Cell<usize>>) {
    let stream = ScriptedStream::new(chunks);
    let read_calls = stream.read_calls.clone();
    (Connection::from_stream(stream, &Config::default()), read_calls)
}

// =============================================================================
// TCP Round Trips
// =============================================================================

#[test]
fn test_send_writes_one_line() {
    let server = MockServer::start(vec![Step::Silent]);
    let mut conn = Connection::open(&server.config()).unwrap();

    conn.send("world.setBlock", &args![[0, 64, 0], "STONE"]).unwrap();

    assert_eq!(server.next_request(), "world.setBlock(0,64,0,STONE)");
    assert!(conn.is_open());
}

#[test]
fn test_send_receive_returns_payload() {
    let server = MockServer::start(vec![Step::line("1.5,64.0,-2.5")]);
    let mut conn = Connection::open(&server.config()).unwrap();

    let payload = conn.send_receive("player.getPos", &[]).unwrap();

    assert_eq!(payload, "1.5,64.0,-2.5");
    assert_eq!(server.next_request(), "player.getPos()");
}

#[test]
fn test_fail_response_keeps_connection_usable() {
    let server = MockServer::start(vec![Step::line("Fail something broke"), Step::line("STONE")]);
    let mut conn = Connection::open(&server.config()).unwrap();

    let err = conn.send_receive("world.getBlock", &args![[0, 0, 0]]).unwrap_err();
    assert!(err.is_server_fail());
    assert!(err.to_string().contains("something broke"));
    assert!(conn.is_open());

    let payload = conn.send_receive("world.getBlock", &args![[1, 2, 3]]).unwrap();
    assert_eq!(payload, "STONE");
}

#[test]
fn test_response_split_across_tcp_writes() {
    let server = MockServer::start(vec![Step::chunks(&["12,34", ",56\n"]), Step::line("next")]);
    let mut conn = Connection::open(&server.config()).unwrap();

    assert_eq!(conn.send_receive("world.getHeight", &[]).unwrap(), "12,34,56");
    assert_eq!(conn.pending_bytes(), 0);
    assert_eq!(conn.send_receive("world.getHeight", &[]).unwrap(), "next");
}

#[test]
fn test_mixed_send_and_send_receive_stay_in_step() {
    let server = MockServer::start(vec![Step::Silent, Step::line("42"), Step::Silent, Step::line("7")]);
    let mut conn = Connection::open(&server.config()).unwrap();

    conn.send("chat.post", &args!["hello"]).unwrap();
    assert_eq!(conn.send_receive("world.getHeight", &args![[0, 0]]).unwrap(), "42");
    conn.send("chat.post", &args!["again"]).unwrap();
    assert_eq!(conn.send_receive("world.getHeight", &args![[1, 1]]).unwrap(), "7");

    assert_eq!(server.next_request(), "chat.post(hello)");
    assert_eq!(server.next_request(), "world.getHeight(0,0)");
    assert_eq!(server.next_request(), "chat.post(again)");
    assert_eq!(server.next_request(), "world.getHeight(1,1)");
}

#[test]
fn test_server_hangup_closes_connection() {
    let server = MockServer::start(vec![Step::Hangup]);
    let mut conn = Connection::open(&server.config()).unwrap();

    let err = conn.send_receive("player.getPos", &[]).unwrap_err();
    assert!(err.is_transport());
    assert_eq!(conn.state(), ConnectionState::Closed);

    let err = conn.send("chat.post", &args!["x"]).unwrap_err();
    assert!(matches!(err, McError::ConnectionClosed));
}

#[test]
fn test_read_timeout_closes_connection() {
    let server = MockServer::start(vec![Step::Silent]);
    let config = Config::builder()
        .host("127.0.0.1")
        .port(server.port())
        .read_timeout_ms(100)
        .build();
    let mut conn = Connection::open(&config).unwrap();

    let err = conn.send_receive("player.getPos", &[]).unwrap_err();
    assert!(matches!(err, McError::Io(_)));
    assert!(!conn.is_open());
}

#[test]
fn test_open_unreachable_fails_fast() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = Connection::open(&Config::new("127.0.0.1", port));
    assert!(matches!(result, Err(McError::Network(_))));
}

#[test]
fn test_open_rejects_invalid_config() {
    assert!(matches!(
        Connection::open(&Config::new("", 4711)),
        Err(McError::Config(_))
    ));
    assert!(matches!(
        Connection::open(&Config::new("localhost", 0)),
        Err(McError::Config(_))
    ));
}

// =============================================================================
// Buffering (scripted stream)
// =============================================================================

#[test]
fn test_split_read_returns_line_once_without_residue() {
    let (mut conn, read_calls) = scripted(&["12,34", ",56\n"]);

    assert_eq!(conn.send_receive("world.getBlocks", &[]).unwrap(), "12,34,56");
    assert_eq!(read_calls.get(), 2);
    assert_eq!(conn.pending_bytes(), 0);
}

#[test]
fn test_two_responses_in_one_read() {
    let (mut conn, read_calls) = scripted(&["first\nsecond\n"]);

    assert_eq!(conn.send_receive("a.b", &[]).unwrap(), "first");
    assert_eq!(conn.send_receive("a.b", &[]).unwrap(), "second");
    assert_eq!(read_calls.get(), 1);
}

#[test]
fn test_eof_mid_line_is_transport_error() {
    let (mut conn, _) = scripted(&["12,3"]);

    let err = conn.send_receive("a.b", &[]).unwrap_err();
    assert!(matches!(err, McError::Network(_)));
    assert_eq!(conn.state(), ConnectionState::Closed);
}

#[test]
fn test_would_block_counts_as_timeout() {
    let stream = ScriptedStream::new(&["12"]).then_error(ErrorKind::WouldBlock);
    let mut conn = Connection::from_stream(stream, &Config::default());

    assert!(conn.send_receive("a.b", &[]).unwrap_err().is_transport());
    assert!(!conn.is_open());
}

#[test]
fn test_oversized_line_closes_connection() {
    let config = Config::builder().max_line_len(8).build();
    let stream = ScriptedStream::new(&["0123456789abcdef"]);
    let mut conn = Connection::from_stream(stream, &config);

    let err = conn.send_receive("a.b", &[]).unwrap_err();
    assert!(matches!(err, McError::Protocol(_)));
    assert!(!conn.is_open());
}

#[test]
fn test_rejected_argument_writes_nothing_and_stays_open() {
    let config = Config::builder()
        .delimiter_policy(DelimiterPolicy::Reject)
        .build();
    let stream = ScriptedStream::new(&[]);
    let sink = stream.written.clone();
    let mut conn = Connection::from_stream(stream, &config);

    let err = conn.send("chat.post", &args!["a,b"]).unwrap_err();
    assert!(matches!(err, McError::Argument(_)));
    assert!(conn.is_open());
    assert!(written(&sink).is_empty());
}

#[test]
fn test_depth_limit_from_config() {
    let config = Config::builder().max_depth(2).build();
    let mut conn = Connection::from_stream(ScriptedStream::new(&[]), &config);

    let deep = mcremote::Arg::list([mcremote::Arg::list([mcremote::Arg::list([mcremote::Arg::list([1])])])]);
    assert!(matches!(conn.send("a.b", &[deep]), Err(McError::Argument(_))));
    assert!(conn.is_open());
}

#[test]
fn test_close_is_idempotent() {
    let (mut conn, _) = scripted(&[]);

    conn.close();
    conn.close();

    assert_eq!(conn.state(), ConnectionState::Closed);
    assert!(matches!(
        conn.send_receive("a.b", &[]),
        Err(McError::ConnectionClosed)
    ));
}

// =============================================================================
// Shared Connection
// =============================================================================

#[test]
fn test_shared_connection_serializes_threads() {
    const THREADS: usize = 4;
    const CALLS: usize = 10;

    let server = MockServer::start(vec![Step::Echo; THREADS * CALLS]);
    let shared = SharedConnection::new(Connection::open(&server.config()).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let conn = shared.clone();
            thread::spawn(move || {
                for i in 0..CALLS {
                    let reply = conn.send_receive("test.echo", &args![t, i]).unwrap();
                    assert_eq!(reply, format!("test.echo({},{})", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(shared.is_open());
}

#[test]
fn test_shared_connection_with_holds_lock_across_calls() {
    let server = MockServer::start(vec![Step::Silent, Step::line("ok")]);
    let shared = SharedConnection::new(Connection::open(&server.config()).unwrap());

    let reply = shared
        .with(|conn| {
            conn.send("chat.post", &args!["hi"])?;
            conn.send_receive("world.getHeight", &args![[0, 0]])
        })
        .unwrap();

    assert_eq!(reply, "ok");
    shared.close();
    assert!(!shared.is_open());
}
