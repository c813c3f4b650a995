// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons, in-memory collaborators and a local
//! HTTP stub for the network adapters.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::application::port::{Acknowledgement, GeocodeResolver, RenderSurface, SubmissionClient};
use crate::domain::error::{CaptureError, GeocodeError, SubmissionError};
use crate::domain::geo::{Coordinate, LocationQuery, ViewportState};
use crate::domain::snapshot::{CapturedImage, RasterFrame, ScaleFactor};

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;

/// Builds a coordinate known to be valid.
pub fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).expect("test coordinate in range")
}

/// Surface that records presented views and rasterizes a solid fill.
pub struct RecordingSurface {
    presented: Mutex<Vec<ViewportState>>,
    detached: AtomicBool,
    failure: Mutex<Option<CaptureError>>,
    settle_signal: bool,
    settled_calls: AtomicUsize,
    size: (u32, u32),
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            presented: Mutex::new(Vec::new()),
            detached: AtomicBool::new(false),
            failure: Mutex::new(None),
            settle_signal: false,
            settled_calls: AtomicUsize::new(0),
            size: (8, 4),
        }
    }
}

impl RecordingSurface {
    pub fn with_settle_signal() -> Self {
        Self {
            settle_signal: true,
            ..Self::default()
        }
    }

    pub fn presented(&self) -> Vec<ViewportState> {
        self.presented.lock().unwrap().clone()
    }

    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_rasterize(&self, error: CaptureError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn settled_calls(&self) -> usize {
        self.settled_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn is_attached(&self) -> bool {
        !self.detached.load(Ordering::SeqCst) && !self.presented.lock().unwrap().is_empty()
    }

    fn present(&self, viewport: &ViewportState) {
        self.presented.lock().unwrap().push(*viewport);
    }

    fn has_settle_signal(&self) -> bool {
        self.settle_signal
    }

    async fn settled(&self) {
        self.settled_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn rasterize(&self, scale: ScaleFactor) -> Result<RasterFrame, CaptureError> {
        if !self.is_attached() {
            return Err(CaptureError::RenderUnavailable);
        }
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }
        let width = scale.apply(self.size.0);
        let height = scale.apply(self.size.1);
        let shade = (self.presented.lock().unwrap().len() % 256) as u8;
        let pixels = [shade, 128, 64, 255].repeat((width * height) as usize);
        Ok(RasterFrame::from_rgba(width, height, pixels).expect("solid frame"))
    }
}

/// Resolver answering from a queue of canned results.
#[derive(Default)]
pub struct ScriptedResolver {
    responses: Mutex<VecDeque<Result<Coordinate, GeocodeError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn push(&self, response: Result<Coordinate, GeocodeError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodeResolver for ScriptedResolver {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, GeocodeError> {
        self.queries.lock().unwrap().push(query.as_str().to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GeocodeError::NotFound))
    }
}

/// Submission client answering from a queue of canned results.
#[derive(Default)]
pub struct ScriptedSubmitter {
    responses: Mutex<VecDeque<Result<Acknowledgement, SubmissionError>>>,
    sent: Mutex<Vec<(CapturedImage, String)>>,
}

impl ScriptedSubmitter {
    pub fn push(&self, response: Result<Acknowledgement, SubmissionError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn sent(&self) -> Vec<(CapturedImage, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for ScriptedSubmitter {
    async fn submit(
        &self,
        image: &CapturedImage,
        location: &str,
    ) -> Result<Acknowledgement, SubmissionError> {
        self.sent
            .lock()
            .unwrap()
            .push((image.clone(), location.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Acknowledgement { status: 200 }))
    }
}

/// A request received by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request line and headers.
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// First line, e.g. `GET /search?format=json&q=x HTTP/1.1`.
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }
}

/// Canned response of [`StubServer`].
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl StubReply {
    pub fn json(status: u16, body: &str) -> Self {
        Self::bytes(status, "application/json", body.as_bytes().to_vec())
    }

    pub fn bytes(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }
}

/// HTTP/1.1 server on a loopback port answering each request with `reply`.
/// One request per connection.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl StubServer {
    pub async fn start<F>(reply: F) -> Self
    where
        F: Fn(&RecordedRequest) -> StubReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let reply = Arc::new(reply);
        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let reply = Arc::clone(&reply);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = answer(stream, reply.as_ref(), &recorded).await;
                });
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// An address nothing listens on.
pub async fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind spare port");
    let addr = listener.local_addr().expect("spare port address");
    drop(listener);
    format!("http://{addr}{path}")
}

async fn answer<F>(
    mut stream: TcpStream,
    reply: &F,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()>
where
    F: Fn(&RecordedRequest) -> StubReply,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request = RecordedRequest {
        head,
        body: buf[head_end..].to_vec(),
    };
    let response = reply(&request);
    recorded.lock().unwrap().push(request);

    let header = format!(
        "HTTP/1.1 {} Stub\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.shutdown().await
}
