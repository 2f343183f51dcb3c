//! Consensus generation domain
//!
//! A request fans out to several independent generations. Their candidates
//! are compared in canonical form and a majority value wins.
//!
//! ```text
//! ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │ attempt 1│  │ attempt 2│  │ attempt 3│   (each retries internally)
//! └────┬─────┘  └────┬─────┘  └────┬─────┘
//!      └─────────────┼─────────────┘
//!                    v
//!            ConsensusRound::tally
//!                    │
//!        ≥2 identical canonical forms?
//!          yes │              │ no
//!              v              v
//!          Agreed       next round (max 3),
//!                       then ConsensusFailure
//! ```

pub mod candidate;
pub mod consensus;
pub mod repeat;

pub use candidate::{GenerationCandidate, GenerationFailure};
pub use consensus::{
    CONSENSUS_FAILED_MESSAGE, ConsensusFailure, ConsensusOutcome, ConsensusRound,
    GenerationOutput, MIN_AGREEING, resolve_consensus,
};
pub use repeat::RepeatCount;
