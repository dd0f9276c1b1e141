//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths. HEAD answers with a configurable
//! `Content-Length`; GET returns the body (optionally cut short) after an
//! optional delay. Counts requests per path and tracks the peak number of
//! concurrent GETs.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What HEAD reports as `Content-Length`.
#[derive(Debug, Clone)]
pub enum HeadLength {
    /// The body length.
    Actual,
    /// No header at all.
    Missing,
    /// Header with this literal value.
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub body: Vec<u8>,
    pub head_length: HeadLength,
    /// First N requests (any method) on this path get 503.
    pub fail_first: usize,
    /// Status for GET (200 by default).
    pub get_status: u16,
    /// Delay before GET sends its response.
    pub get_delay: Duration,
    /// GET advertises the full length but sends only this many bytes, then closes.
    pub get_truncate_to: Option<usize>,
}

impl Route {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            head_length: HeadLength::Actual,
            fail_first: 0,
            get_status: 200,
            get_delay: Duration::ZERO,
            get_truncate_to: None,
        }
    }

    pub fn head_length(mut self, head_length: HeadLength) -> Self {
        self.head_length = head_length;
        self
    }

    pub fn fail_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    pub fn get_status(mut self, status: u16) -> Self {
        self.get_status = status;
        self
    }

    pub fn get_delay(mut self, delay: Duration) -> Self {
        self.get_delay = delay;
        self
    }

    pub fn truncate_body(mut self, sent: usize) -> Self {
        self.get_truncate_to = Some(sent);
        self
    }
}

#[derive(Debug, Default)]
pub struct ServerStats {
    gets_in_flight: AtomicUsize,
    peak_gets: AtomicUsize,
    requests: Mutex<HashMap<String, (usize, usize)>>,
}

impl ServerStats {
    /// (HEAD count, GET count) seen for `name`.
    pub fn requests_for(&self, name: &str) -> (usize, usize) {
        self.requests
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or((0, 0))
    }

    pub fn total_requests(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .values()
            .map(|(h, g)| h + g)
            .sum()
    }

    pub fn peak_concurrent_gets(&self) -> usize {
        self.peak_gets.load(Ordering::SeqCst)
    }

    /// Records one request and returns how many requests the path has seen, this one included.
    fn record(&self, name: &str, is_head: bool) -> usize {
        let mut map = self.requests.lock().unwrap();
        let entry = map.entry(name.to_string()).or_insert((0, 0));
        if is_head {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
        entry.0 + entry.1
    }
}

pub struct FileServer {
    base: String,
    pub stats: Arc<ServerStats>,
}

impl FileServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(name, route)| (name.to_string(), route))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let stats = Arc::new(ServerStats::default());
        {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                for stream in listener.incoming().flatten() {
                    let routes = Arc::clone(&routes);
                    let stats = Arc::clone(&stats);
                    thread::spawn(move || handle(stream, &routes, &stats));
                }
            });
        }
        Self {
            base: format!("http://127.0.0.1:{}/files/", port),
            stats,
        }
    }

    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, stats: &ServerStats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
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
    let target = parts.next().unwrap_or("");
    let name = target
        .split('?')
        .next()
        .unwrap_or("")
        .rsplit('/')
        .next()
        .unwrap_or("");

    let is_head = method.eq_ignore_ascii_case("HEAD");
    if !is_head && !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    let Some(route) = routes.get(name) else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    };

    let seen = stats.record(name, is_head);
    if seen <= route.fail_first {
        let _ = stream.write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    if is_head {
        let length_header = match &route.head_length {
            HeadLength::Actual => format!("Content-Length: {}\r\n", route.body.len()),
            HeadLength::Missing => String::new(),
            HeadLength::Raw(v) => format!("Content-Length: {}\r\n", v),
        };
        let response = format!("HTTP/1.1 200 OK\r\n{}Connection: close\r\n\r\n", length_header);
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    let now = stats.gets_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak_gets.fetch_max(now, Ordering::SeqCst);
    thread::sleep(route.get_delay);
    // Only the held-back phase counts toward concurrency.
    stats.gets_in_flight.fetch_sub(1, Ordering::SeqCst);

    if route.get_status != 200 {
        let response = format!(
            "HTTP/1.1 {} Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            route.get_status
        );
        let _ = stream.write_all(response.as_bytes());
    } else {
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            route.body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let sent = route
            .get_truncate_to
            .map_or(route.body.len(), |n| n.min(route.body.len()));
        let _ = stream.write_all(&route.body[..sent]);
    }
    let _ = stream.flush();
}
