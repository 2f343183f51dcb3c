//! Shared test doubles for the use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use crate::ports::progress::ProgressNotifier;
use crate::ports::schema_source::{SchemaSource, SchemaSourceError};
use async_trait::async_trait;
use mindat_query_domain::ConsensusRound;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Gateway answering from a queue of scripted responses, recording requests
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Value, GatewayError>>>,
    requests: Mutex<Vec<StructuredRequest>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<Value, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> Result<Value, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Gateway that answers after a delay and panics on selected calls
///
/// Tracks how many calls are in flight at once.
pub struct SlowGateway {
    answer: Value,
    delay: Duration,
    panic_on: Vec<usize>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowGateway {
    pub fn new(answer: Value, delay: Duration) -> Self {
        Self {
            answer,
            delay,
            panic_on: Vec::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Panic on the given 0-indexed calls
    pub fn panicking_on(mut self, calls: &[usize]) -> Self {
        self.panic_on = calls.to_vec();
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for SlowGateway {
    async fn generate_structured(
        &self,
        _request: &StructuredRequest,
    ) -> Result<Value, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on.contains(&call) {
            panic!("gateway crashed on call {}", call);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(self.answer.clone())
    }
}

/// Schema source serving a fixed document
pub struct StaticSchema(pub Value);

#[async_trait]
impl SchemaSource for StaticSchema {
    async fn load(&self) -> Result<Value, SchemaSourceError> {
        Ok(self.0.clone())
    }
}

/// Progress notifier recording each round's vote summary
#[derive(Default)]
pub struct RecordingProgress {
    pub started: Mutex<Vec<(usize, usize)>>,
    pub completed: Mutex<Vec<(usize, usize, bool)>>,
    pub votes: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_round_start(&self, round: usize, total_attempts: usize) {
        self.started.lock().unwrap().push((round, total_attempts));
    }

    fn on_attempt_complete(&self, round: usize, index: usize, success: bool) {
        self.completed.lock().unwrap().push((round, index, success));
    }

    fn on_round_complete(&self, round: &ConsensusRound) {
        self.votes.lock().unwrap().push(round.vote_summary());
    }
}

/// Geomaterials schema document with the element parameters documented
pub fn geomaterials_document() -> Value {
    json!({
        "paths": {
            "/v1/geomaterials/": {
                "get": {
                    "parameters": [
                        { "name": "el_inc", "description": "Chemical elements must include, e.g. Fe,Cu", "schema": { "type": "string" } },
                        { "name": "el_exc", "description": "Chemical elements must exclude, e.g. Fe,Cu", "schema": { "type": "string" } },
                        { "name": "hardness_min", "description": "Mohs hardness from", "schema": { "type": "number" } },
                        { "name": "q", "description": "Search query", "schema": { "type": "string" } }
                    ]
                }
            }
        }
    })
}
