//! Progress notification port
//!
//! Defines the interface for reporting progress during parameter generation.

use mindat_query_domain::ConsensusRound;

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a round of generation attempts starts
    fn on_round_start(&self, round: usize, total_attempts: usize);

    /// Called when one generation (including its retries) completes
    fn on_attempt_complete(&self, round: usize, index: usize, success: bool);

    /// Called when a round has been tallied
    fn on_round_complete(&self, _round: &ConsensusRound) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: usize, _total_attempts: usize) {}
    fn on_attempt_complete(&self, _round: usize, _index: usize, _success: bool) {}
}
