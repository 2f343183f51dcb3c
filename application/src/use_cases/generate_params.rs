//! Generate Params use case
//!
//! Turns a free-text request into search parameters. With three repeats the
//! generations run concurrently and a majority vote decides; the agreed
//! value is rule-validated before it is returned.

use crate::config::GenerationParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use mindat_query_domain::quorum::{ConsensusFailure, GenerationFailure};
use mindat_query_domain::{
    ConsensusOutcome, ConsensusRound, GenerationCandidate, GenerationOutput, OutputSchema,
    PromptTemplate, QueryParameters, RepeatCount, RuleValidator, SearchRequest,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Failure of a single generation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Generated value does not match the parameter schema: {0}")]
    Decode(String),
}

impl GenerationError {
    /// Stable name of the error kind, fed back into retry prompts
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Gateway(e) => e.kind(),
            GenerationError::Decode(_) => "DecodeError",
        }
    }
}

/// Errors surfaced by the use case itself
///
/// Everything else (exhausted retries, consensus failure) is reported as data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateParamsError {
    #[error("num_generations must be either 1 or 3, got {0}")]
    InvalidRepeatCount(usize),
}

/// Input for the GenerateParams use case
#[derive(Debug, Clone)]
pub struct GenerateParamsInput {
    pub request: SearchRequest,
    pub params: GenerationParams,
}

impl GenerateParamsInput {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.params.repeats = repeats;
        self
    }
}

/// Use case for consensus-based parameter generation
pub struct GenerateParamsUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    rules: RuleValidator,
}

impl<G: LlmGateway + 'static> GenerateParamsUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            rules: RuleValidator::new(),
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: GenerateParamsInput,
    ) -> Result<Vec<GenerationOutput>, GenerateParamsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: GenerateParamsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<GenerationOutput>, GenerateParamsError> {
        let repeats = RepeatCount::try_from(input.params.repeats)
            .map_err(|_| GenerateParamsError::InvalidRepeatCount(input.params.repeats))?;
        let user_input = input.request.content();
        let max_attempts = input.params.max_attempts.max(1);

        info!("Generating parameters with {} repeat(s)", repeats);

        if !repeats.uses_consensus() {
            progress.on_round_start(1, 1);
            let candidate = Self::generate_once(&self.gateway, user_input, max_attempts).await;
            progress.on_attempt_complete(1, 0, candidate.is_generated());
            return Ok(vec![candidate.into()]);
        }

        let mut failure = ConsensusFailure::new(Vec::new());

        for round in 1..=input.params.max_rounds {
            let candidates = self
                .fan_out(round, repeats.get(), user_input, max_attempts, progress)
                .await;
            let tally = ConsensusRound::tally(round, candidates);
            info!("Round {} vote: {}", round, tally.vote_summary());
            progress.on_round_complete(&tally);

            match ConsensusOutcome::from_round(&tally) {
                ConsensusOutcome::Agreed(agreed) => {
                    return Ok(vec![self.rule_validated(agreed)]);
                }
                ConsensusOutcome::Failed(round_failure) => failure = round_failure,
            }
        }

        warn!(
            "No consensus after {} round(s), {} candidate(s) left",
            input.params.max_rounds,
            failure.candidates.len()
        );
        Ok(vec![failure.into()])
    }

    /// Run `count` generations concurrently and wait for all of them.
    ///
    /// Candidates are returned in launch order. A task that dies is recorded
    /// as a failed candidate without affecting the others.
    async fn fan_out(
        &self,
        round: usize,
        count: usize,
        user_input: &str,
        max_attempts: usize,
        progress: &dyn ProgressNotifier,
    ) -> Vec<GenerationCandidate> {
        debug!("Round {}: launching {} generations", round, count);
        progress.on_round_start(round, count);

        let mut join_set = JoinSet::new();
        let mut indices = HashMap::with_capacity(count);

        for index in 0..count {
            let gateway = Arc::clone(&self.gateway);
            let user_input = user_input.to_string();

            let handle = join_set.spawn(async move {
                Self::generate_once(&gateway, &user_input, max_attempts).await
            });
            indices.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<GenerationCandidate>> = vec![None; count];

        while let Some(result) = join_set.join_next_with_id().await {
            let (id, candidate) = match result {
                Ok((id, candidate)) => (id, candidate),
                Err(e) => {
                    warn!("Task join error: {}", e);
                    let id = e.id();
                    let position = indices.get(&id).map_or(0, |index| index + 1);
                    let candidate = GenerationCandidate::failed(format!(
                        "Error in generation {}: {}",
                        position, e
                    ));
                    (id, candidate)
                }
            };
            let Some(&index) = indices.get(&id) else {
                continue;
            };
            progress.on_attempt_complete(round, index, candidate.is_generated());
            slots[index] = Some(candidate);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    progress.on_attempt_complete(round, index, false);
                    GenerationCandidate::failed(format!(
                        "Error in generation {}: task did not complete",
                        index + 1
                    ))
                })
            })
            .collect()
    }

    /// One generation with up to `max_attempts` sequential tries.
    ///
    /// Each retry's prompt carries the previous failure.
    async fn generate_once(
        gateway: &G,
        user_input: &str,
        max_attempts: usize,
    ) -> GenerationCandidate {
        let schema = OutputSchema::query_parameters();
        let mut last_error: Option<GenerationError> = None;

        for attempt in 1..=max_attempts {
            let user_prompt = match &last_error {
                Some(e) => PromptTemplate::generation_retry(
                    user_input,
                    attempt - 1,
                    e.kind(),
                    &e.to_string(),
                ),
                None => PromptTemplate::generation_request(user_input),
            };
            let request = StructuredRequest::new(
                PromptTemplate::generation_system(),
                user_prompt,
                schema.clone(),
            );

            match Self::request_params(gateway, &request).await {
                Ok(params) => {
                    debug!("Generation succeeded on attempt {}", attempt);
                    return GenerationCandidate::generated(params);
                }
                Err(e) => {
                    warn!("Generation attempt {}/{} failed: {}", attempt, max_attempts, e);
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
        GenerationCandidate::failed(format!("Error after {} attempts: {}", max_attempts, reason))
    }

    async fn request_params(
        gateway: &G,
        request: &StructuredRequest,
    ) -> Result<QueryParameters, GenerationError> {
        let value = gateway.generate_structured(request).await?;
        serde_json::from_value(value).map_err(|e| GenerationError::Decode(e.to_string()))
    }

    /// Rule-validate the agreed value; a violation becomes a failure result
    fn rule_validated(&self, agreed: QueryParameters) -> GenerationOutput {
        let result = self.rules.run_validation(&agreed);
        match result.corrected_params {
            Some(corrected) if result.status.is_valid() => GenerationOutput::Params(corrected),
            _ => {
                let violated: Vec<_> = result.issues.keys().map(String::as_str).collect();
                warn!("Consensus value failed rule validation: {}", violated.join(", "));
                GenerationOutput::Failed(GenerationFailure::new(format!(
                    "Consensus parameters failed rule validation: {}",
                    violated.join(", ")
                )))
            }
        }
    }
}
