//! In-process HTTP stub of the review API for tests.
//!
//! Routes are matched on method plus the full request target first, then the
//! target without its query string. Unmatched requests get a JSON 404.

use serde_json::Value;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A request received by [`StubApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target including the query string.
    pub path: String,
    pub body: String,
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(String, String), (u16, String)>,
    requests: Vec<RecordedRequest>,
}

pub struct StubApi {
    base_url: String,
    shared: Arc<Mutex<Shared>>,
    shutdown_tx: mpsc::Sender<()>,
    worker: Option<thread::JoinHandle<()>>,
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).ok()? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;
    Some(RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn respond(shared: &Mutex<Shared>, mut stream: TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let (status, body) = {
        let mut guard = match shared.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let bare = request
            .path
            .split_once('?')
            .map(|(bare, _)| bare.to_string())
            .unwrap_or_else(|| request.path.clone());
        let found = guard
            .routes
            .get(&(request.method.clone(), request.path.clone()))
            .or_else(|| guard.routes.get(&(request.method.clone(), bare)))
            .cloned();
        guard.requests.push(request);
        found.unwrap_or_else(|| (404, r#"{"error":"no stub route"}"#.to_string()))
    };
    let response = format!(
        concat!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n",
            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        ),
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

impl StubApi {
    /// Bind an ephemeral port and start serving.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener addr");
        listener
            .set_nonblocking(true)
            .expect("set stub listener non-blocking");
        let shared = Arc::new(Mutex::new(Shared::default()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => {
                    let _ = stream.set_nonblocking(false);
                    respond(&worker_shared, stream);
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        });
        Self {
            base_url: format!("http://{}", addr),
            shared,
            shutdown_tx,
            worker: Some(worker),
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Register (or replace) the canned response for `method path`.
    pub fn route(&self, method: &str, path: &str, status: u16, body: Value) {
        self.route_raw(method, path, status, &body.to_string());
    }

    pub fn route_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        let mut guard = self.shared.lock().expect("stub lock");
        guard.routes.insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.lock().expect("stub lock").requests.clone()
    }

    /// Requests matching `method` whose target starts with `prefix`.
    pub fn requests_to(&self, method: &str, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path.starts_with(prefix))
            .collect()
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
