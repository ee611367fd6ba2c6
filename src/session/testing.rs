//! Mock backend for testing
//!
//! Queued results per endpoint, recorded requests, and an in-flight
//! high-water mark for checking that flows never overlap.

use crate::backend::{
    Backend, BackendError, CompareRequest, CompareResponse, ExtractRequest, ExtractResponse,
    GenerateRequest, GenerateResponse,
};
use crate::catalog::Personality;
use crate::comparison::{ComparisonEntry, ComparisonSet};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn personality(key: &str, name: &str) -> Personality {
    Personality {
        key: key.to_string(),
        name: name.to_string(),
        description: None,
    }
}

pub fn comparison_set(entries: &[(&str, &str, &str)]) -> ComparisonSet {
    entries
        .iter()
        .map(|(key, name, response)| {
            (
                (*key).to_string(),
                ComparisonEntry {
                    name: (*name).to_string(),
                    response: (*response).to_string(),
                },
            )
        })
        .collect()
}

fn unqueued() -> BackendError {
    BackendError::transport("No mock response queued")
}

pub struct MockBackend {
    personalities: Mutex<Result<Vec<Personality>, BackendError>>,
    replies: Mutex<VecDeque<Result<GenerateResponse, BackendError>>>,
    extractions: Mutex<VecDeque<Result<ExtractResponse, BackendError>>>,
    comparisons: Mutex<VecDeque<Result<CompareResponse, BackendError>>>,
    pub generate_requests: Mutex<Vec<GenerateRequest>>,
    pub extract_requests: Mutex<Vec<ExtractRequest>>,
    pub compare_requests: Mutex<Vec<CompareRequest>>,
    /// Times each call yields to the scheduler before answering
    yields: usize,
    /// When set, every call waits for a notification before answering
    release: Option<Arc<Notify>>,
    /// Notified as each call starts
    pub request_started: Arc<Notify>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            personalities: Mutex::new(Ok(Vec::new())),
            replies: Mutex::new(VecDeque::new()),
            extractions: Mutex::new(VecDeque::new()),
            comparisons: Mutex::new(VecDeque::new()),
            generate_requests: Mutex::new(Vec::new()),
            extract_requests: Mutex::new(Vec::new()),
            compare_requests: Mutex::new(Vec::new()),
            yields: 0,
            release: None,
            request_started: Arc::new(Notify::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Suspend each call `yields` times so concurrent flows interleave
    pub fn with_yields(mut self, yields: usize) -> Self {
        self.yields = yields;
        self
    }

    /// Hold every call until `release` is notified
    pub fn held(mut self, release: Arc<Notify>) -> Self {
        self.release = Some(release);
        self
    }

    pub fn set_personalities(&self, result: Result<Vec<Personality>, BackendError>) {
        *self.personalities.lock().unwrap() = result;
    }

    pub fn queue_reply(&self, result: Result<GenerateResponse, BackendError>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub fn queue_extraction(&self, result: Result<ExtractResponse, BackendError>) {
        self.extractions.lock().unwrap().push_back(result);
    }

    pub fn queue_comparison(&self, result: Result<CompareResponse, BackendError>) {
        self.comparisons.lock().unwrap().push_back(result);
    }

    /// Flow calls made (catalog fetches excluded)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.generate_requests.lock().unwrap().clone()
    }

    pub fn extract_requests(&self) -> Vec<ExtractRequest> {
        self.extract_requests.lock().unwrap().clone()
    }

    pub fn compare_requests(&self) -> Vec<CompareRequest> {
        self.compare_requests.lock().unwrap().clone()
    }

    async fn enter(&self) -> InFlight<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.request_started.notify_one();

        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }

        InFlight { backend: self }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlight<'a> {
    backend: &'a MockBackend,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.backend.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn personalities(&self) -> Result<Vec<Personality>, BackendError> {
        self.personalities.lock().unwrap().clone()
    }

    async fn generate_response(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        self.generate_requests.lock().unwrap().push(request.clone());
        let _in_flight = self.enter().await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unqueued()))
    }

    async fn extract_memory(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        self.extract_requests.lock().unwrap().push(request.clone());
        let _in_flight = self.enter().await;
        self.extractions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unqueued()))
    }

    async fn compare_personalities(
        &self,
        request: &CompareRequest,
    ) -> Result<CompareResponse, BackendError> {
        self.compare_requests.lock().unwrap().push(request.clone());
        let _in_flight = self.enter().await;
        self.comparisons
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unqueued()))
    }
}
