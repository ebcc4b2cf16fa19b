//! Scripted in-memory transport for deterministic engine tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{HttpRequest, HttpResponse, Transport};
use crate::{Result, YahooError};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync;

/// Records every request and answers with a caller-supplied function.
pub(crate) struct MockTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer with queued responses in order; errors once the queue is empty.
    pub(crate) fn scripted(responses: Vec<HttpResponse>) -> Arc<Self> {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::new(move |_| {
            queue
                .lock()
                .pop_front()
                .ok_or_else(|| YahooError::Transport("no scripted response left".into()))
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn count_matching(&self, needle: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url.contains(needle))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request.clone());
        // Let concurrently spawned requests interleave at the network boundary.
        tokio::task::yield_now().await;
        (self.responder)(&request)
    }
}

pub(crate) fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}

/// Counter shared between a responder closure and the test body.
#[derive(Clone, Default)]
pub(crate) struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub(crate) fn bump(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
