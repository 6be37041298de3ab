//! Recording transport for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{OsrmError, OsrmRequest, OsrmTransport, UpstreamResponse};

type Responder = Box<dyn Fn(&OsrmRequest) -> Result<UpstreamResponse, OsrmError> + Send + Sync>;

/// Transport that records every request and answers from a closure.
pub struct MockTransport {
    calls: Mutex<Vec<OsrmRequest>>,
    responder: Responder,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&OsrmRequest) -> Result<UpstreamResponse, OsrmError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Always answer `200` with the given body.
    pub fn ok(body: &'static str) -> Self {
        Self::new(move |_| Ok(UpstreamResponse::new(200, body)))
    }

    pub fn calls(&self) -> Vec<OsrmRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OsrmTransport for MockTransport {
    async fn get(&self, request: &OsrmRequest) -> Result<UpstreamResponse, OsrmError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }

    fn endpoint(&self) -> String {
        "mock://osrm".to_string()
    }
}
