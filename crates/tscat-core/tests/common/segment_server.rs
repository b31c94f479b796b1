//! Minimal HTTP/1.1 server for segment crawl integration tests.
//!
//! Serves fixed bodies by request path, answers 404 for unknown paths, and can
//! be told to return a fixed status for a path, to fail its first N requests,
//! or to hold a request open without answering.
//! Every response closes the connection.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Routes {
    /// Path (e.g. "/seg1.ts") to 200 body.
    pub bodies: HashMap<String, Vec<u8>>,
    /// Path to a fixed non-200 status.
    pub statuses: HashMap<String, u16>,
    /// Path to (number of initial requests to fail, status to fail with).
    pub fail_first: HashMap<String, (usize, u16)>,
    /// Path to how long to hold the connection before closing it unanswered.
    pub stalls: HashMap<String, Duration>,
}

impl Routes {
    /// Bodies for `/{prefix}{i}.ts` with `i` zero-padded to `digits`.
    pub fn numbered(prefix: &str, digits: usize, bodies: &[(u64, Vec<u8>)]) -> Self {
        let bodies = bodies
            .iter()
            .map(|(i, b)| (format!("/{prefix}{i:0digits$}.ts"), b.clone()))
            .collect();
        Self {
            bodies,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }

    pub fn failing_first(mut self, path: &str, times: usize, status: u16) -> Self {
        self.fail_first.insert(path.to_string(), (times, status));
        self
    }

    pub fn stalling(mut self, path: &str, hold: Duration) -> Self {
        self.stalls.insert(path.to_string(), hold);
        self
    }
}

pub struct SegmentServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl SegmentServer {
    /// Requests seen for `path` so far.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Routes) -> SegmentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    SegmentServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// A base URL on which nothing is listening.
pub fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &Routes, hits: &Mutex<HashMap<String, usize>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    if !method.eq_ignore_ascii_case("GET") {
        respond(&mut stream, 405, b"");
        return;
    }

    let seen = {
        let mut hits = hits.lock().unwrap();
        let count = hits.entry(path.clone()).or_insert(0);
        *count += 1;
        *count
    };

    if let Some(&hold) = routes.stalls.get(&path) {
        thread::sleep(hold);
        return;
    }
    if let Some(&(times, status)) = routes.fail_first.get(&path) {
        if seen <= times {
            respond(&mut stream, status, b"");
            return;
        }
    }
    if let Some(&status) = routes.statuses.get(&path) {
        respond(&mut stream, status, b"");
        return;
    }
    match routes.bodies.get(&path) {
        Some(body) => respond(&mut stream, 200, body),
        None => respond(&mut stream, 404, b"not found"),
    }
}

fn respond(stream: &mut TcpStream, status: u16, body: &[u8]) {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: video/mp2t\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
