//! Localhost availability check for tests that need a listening socket.
//!
//! Sandboxed runners sometimes forbid binding even on loopback. Tests skip in
//! that case unless `DERIVATIVE_REQUIRE_SOCKET_TESTS` is set, which turns the
//! skip into a failure.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "DERIVATIVE_REQUIRE_SOCKET_TESTS";

fn skip_forbidden() -> bool {
    std::env::var(REQUIRE_ENV).is_ok_and(|value| {
        let value = value.trim();
        value == "1" || value.eq_ignore_ascii_case("true")
    })
}

/// True when the calling test should return early because loopback cannot
/// be bound.
#[track_caller]
pub fn localhost_unavailable() -> bool {
    let Err(error) = TcpListener::bind(("127.0.0.1", 0)) else {
        return false;
    };

    let caller = Location::caller();
    assert!(
        !skip_forbidden(),
        "{caller}: cannot bind 127.0.0.1 ({error}) and {REQUIRE_ENV} is set"
    );
    eprintln!("{caller}: cannot bind 127.0.0.1 ({error}); skipping socket-bound test");
    true
}

/// Starts a wiremock server, or returns `None` when the test must be skipped.
#[track_caller]
pub fn start_mock_server_or_skip() -> impl Future<Output = Option<MockServer>> {
    let unavailable = localhost_unavailable();
    async move {
        if unavailable {
            None
        } else {
            Some(MockServer::start().await)
        }
    }
}
