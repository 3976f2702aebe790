//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves GET routes from a mutable table and accepts multipart POSTs on
//! `/upload.php` with a configurable status. Every request is recorded.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const UPLOAD_PATH: &str = "/upload.php";
pub const CATALOG_PATH: &str = "/assets.php";

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering (timeout tests).
    pub delay: Option<Duration>,
    /// Advertise the full length but send only half the body, then close.
    pub truncate: bool,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
            truncate: false,
        }
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    upload_status: u16,
    /// (method, path) of every request in arrival order.
    requests: Vec<(String, String)>,
    /// Raw bodies of POSTs to the upload path.
    uploads: Vec<Vec<u8>>,
}

#[derive(Clone)]
pub struct AssetServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl AssetServer {
    /// Starts a server in a background thread. Runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State {
            upload_status: 200,
            ..Default::default()
        }));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn route(&self, path: &str, route: Route) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), route);
    }

    pub fn set_upload_status(&self, status: u16) {
        self.state.lock().unwrap().upload_status = status;
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().uploads.clone()
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let Some((method, path, headers, mut body)) = read_head(&mut stream) else {
        return;
    };

    if header(&headers, "expect").is_some_and(|v| v.eq_ignore_ascii_case("100-continue")) {
        let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }
    let content_length = header(&headers, "content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut buf = [0u8; 8192];
    while body.len() < content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => body.extend_from_slice(&buf[..n]),
        }
    }

    let route = {
        let mut st = state.lock().unwrap();
        st.requests.push((method.clone(), path.clone()));
        if method == "POST" && path == UPLOAD_PATH {
            st.uploads.push(body);
            Some(Route {
                status: st.upload_status,
                body: b"ok".to_vec(),
                delay: None,
                truncate: false,
            })
        } else if method == "GET" {
            st.routes.get(&path).cloned()
        } else {
            None
        }
    };
    let route = route.unwrap_or(Route {
        status: 404,
        body: b"not found".to_vec(),
        delay: None,
        truncate: false,
    });

    if let Some(d) = route.delay {
        thread::sleep(d);
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let sent = if route.truncate {
        &route.body[..route.body.len() / 2]
    } else {
        &route.body[..]
    };
    let _ = stream.write_all(sent);
    let _ = stream.flush();
}

type Headers = Vec<(String, String)>;

/// Reads up to the end of the header block. Returns method, path, headers,
/// and any body bytes already read.
fn read_head(stream: &mut TcpStream) -> Option<(String, String, Headers, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };
    let head = std::str::from_utf8(&data[..end]).ok()?;
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let rest = data[end + 4..].to_vec();
    Some((method, path, headers, rest))
}

fn header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
