//! Majority-vote consensus over generation candidates
//!
//! Candidates are compared in canonical form (see
//! [`QueryParameters::canonicalize`]), so two generations that differ only in
//! list ordering count as the same vote.

use super::candidate::{GenerationCandidate, GenerationFailure};
use crate::query::QueryParameters;
use serde::{Deserialize, Serialize};

/// Minimum number of identical candidates that makes a consensus
pub const MIN_AGREEING: usize = 2;

/// Message returned when every round ended without consensus
pub const CONSENSUS_FAILED_MESSAGE: &str = "Parameter generation failed to reach consensus after 3 attempts. \
     Results were inconsistent. Please select one of the candidates or refine your query.";

/// Resolve the consensus value of a set of candidates.
///
/// Returns the canonical form shared by at least [`MIN_AGREEING`] valid
/// candidates. Failed candidates do not vote; a tie between equally large
/// groups is no consensus.
///
/// # Example
///
/// ```
/// use mindat_query_domain::quorum::{GenerationCandidate, resolve_consensus};
/// use mindat_query_domain::QueryParameters;
///
/// let candidates = vec![
///     GenerationCandidate::generated(QueryParameters::new().with_el_inc("Fe,Cu")),
///     GenerationCandidate::generated(QueryParameters::new().with_el_inc("Cu,Fe")),
///     GenerationCandidate::failed("timeout"),
/// ];
/// let agreed = resolve_consensus(&candidates).unwrap();
/// assert_eq!(agreed.el_inc.as_deref(), Some("Cu,Fe"));
/// ```
pub fn resolve_consensus(candidates: &[GenerationCandidate]) -> Option<QueryParameters> {
    let mut groups: Vec<(QueryParameters, usize)> = Vec::new();

    for params in candidates.iter().filter_map(GenerationCandidate::params) {
        let canonical = params.canonicalize();
        match groups.iter_mut().find(|(value, _)| *value == canonical) {
            Some((_, count)) => *count += 1,
            None => groups.push((canonical, 1)),
        }
    }

    let top = groups.iter().map(|(_, count)| *count).max()?;
    let mut leaders = groups.into_iter().filter(|(_, count)| *count == top);
    let (value, _) = leaders.next()?;

    if top >= MIN_AGREEING && leaders.next().is_none() {
        Some(value)
    } else {
        None
    }
}

/// One fan-out of generation attempts and its vote
///
/// ```
/// use mindat_query_domain::quorum::{ConsensusRound, GenerationCandidate};
/// use mindat_query_domain::QueryParameters;
///
/// let round = ConsensusRound::tally(1, vec![
///     GenerationCandidate::generated(QueryParameters::new().with_ima(true)),
///     GenerationCandidate::generated(QueryParameters::new().with_ima(true)),
///     GenerationCandidate::generated(QueryParameters::new().with_ima(false)),
/// ]);
/// assert!(round.is_agreed());
/// assert_eq!(round.vote_summary(), "[●●○]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRound {
    /// Round number (1-indexed)
    pub round: usize,
    /// Candidates in launch order
    pub candidates: Vec<GenerationCandidate>,
    /// Agreed canonical value, if any
    pub agreed: Option<QueryParameters>,
}

impl ConsensusRound {
    pub fn tally(round: usize, candidates: Vec<GenerationCandidate>) -> Self {
        let agreed = resolve_consensus(&candidates);
        Self {
            round,
            candidates,
            agreed,
        }
    }

    pub fn is_agreed(&self) -> bool {
        self.agreed.is_some()
    }

    /// Successful candidates, in launch order
    pub fn valid_candidates(&self) -> Vec<QueryParameters> {
        self.candidates
            .iter()
            .filter_map(GenerationCandidate::params)
            .cloned()
            .collect()
    }

    /// Number of candidates that failed all their attempts
    pub fn failed_count(&self) -> usize {
        self.candidates.iter().filter(|c| !c.is_generated()).count()
    }

    /// Visual vote summary: `●` agrees, `○` dissents, `×` failed
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for candidate in &self.candidates {
            let mark = match (candidate.params(), &self.agreed) {
                (None, _) => '×',
                (Some(params), Some(agreed)) if params.canonicalize() == *agreed => '●',
                (Some(_), _) => '○',
            };
            summary.push(mark);
        }
        summary.push(']');
        summary
    }
}

/// Terminal outcome when no round reached consensus
///
/// Serialized as `{"consensus_failed": true, "message": ..., "candidates": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusFailure {
    pub consensus_failed: bool,
    pub message: String,
    /// Valid candidates of the final round
    pub candidates: Vec<QueryParameters>,
}

impl ConsensusFailure {
    pub fn new(candidates: Vec<QueryParameters>) -> Self {
        Self {
            consensus_failed: true,
            message: CONSENSUS_FAILED_MESSAGE.to_string(),
            candidates,
        }
    }
}

/// Outcome of the consensus rounds
#[derive(Debug, Clone, PartialEq)]
pub enum ConsensusOutcome {
    Agreed(QueryParameters),
    Failed(ConsensusFailure),
}

impl ConsensusOutcome {
    /// Build the outcome from the final round
    pub fn from_round(round: &ConsensusRound) -> Self {
        match &round.agreed {
            Some(agreed) => ConsensusOutcome::Agreed(agreed.clone()),
            None => ConsensusOutcome::Failed(ConsensusFailure::new(round.valid_candidates())),
        }
    }

    pub fn is_agreed(&self) -> bool {
        matches!(self, ConsensusOutcome::Agreed(_))
    }
}

/// One element of the generation result sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    ConsensusFailed(ConsensusFailure),
    Failed(GenerationFailure),
    Params(QueryParameters),
}

impl GenerationOutput {
    /// Parameters of a successful result
    pub fn params(&self) -> Option<&QueryParameters> {
        match self {
            GenerationOutput::Params(params) => Some(params),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutput::Params(_))
    }
}

impl From<GenerationCandidate> for GenerationOutput {
    fn from(candidate: GenerationCandidate) -> Self {
        match candidate {
            GenerationCandidate::Generated(params) => GenerationOutput::Params(params),
            GenerationCandidate::Failed(failure) => GenerationOutput::Failed(failure),
        }
    }
}

impl From<ConsensusFailure> for GenerationOutput {
    fn from(failure: ConsensusFailure) -> Self {
        GenerationOutput::ConsensusFailed(failure)
    }
}
