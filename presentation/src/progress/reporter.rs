//! Progress reporting for consensus rounds

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use mindat_query_application::ports::progress::ProgressNotifier;
use mindat_query_domain::ConsensusRound;
use std::io::IsTerminal;
use std::sync::Mutex;

/// Reports progress of each consensus round with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn round_name(round: usize) -> String {
        format!("Round {}", round)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: usize, total_attempts: usize) {
        let pb = self.multi.add(ProgressBar::new(total_attempts as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(Self::round_name(round));
        pb.set_message("Generating...");

        if let Ok(mut slot) = self.round_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_attempt_complete(&self, _round: usize, index: usize, success: bool) {
        if let Ok(slot) = self.round_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} generation {}", "v".green(), index + 1)
            } else {
                format!("{} generation {}", "x".red(), index + 1)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: &ConsensusRound) {
        if let Ok(mut slot) = self.round_bar.lock()
            && let Some(pb) = slot.take()
        {
            let verdict = if round.is_agreed() {
                "consensus".green()
            } else {
                "no consensus".yellow()
            };
            pb.finish_with_message(format!("{} {}", round.vote_summary(), verdict));
        }
    }
}

/// Progress display for stderr: bars on a terminal, plain lines otherwise
pub fn stderr_progress() -> Box<dyn ProgressNotifier> {
    progress_for(std::io::stderr().is_terminal())
}

fn progress_for(interactive: bool) -> Box<dyn ProgressNotifier> {
    if interactive {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SimpleProgress {
    fn round_line(round: usize, total_attempts: usize) -> String {
        format!(
            "{} {} ({} generations)",
            "->".cyan(),
            ProgressReporter::round_name(round).bold(),
            total_attempts
        )
    }

    fn attempt_line(index: usize, success: bool) -> String {
        if success {
            format!("  {} generation {}", "v".green(), index + 1)
        } else {
            format!("  {} generation {} (failed)", "x".red(), index + 1)
        }
    }
}

impl ProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: usize, total_attempts: usize) {
        eprintln!("{}", Self::round_line(round, total_attempts));
    }

    fn on_attempt_complete(&self, _round: usize, index: usize, success: bool) {
        eprintln!("{}", Self::attempt_line(index, success));
    }

    fn on_round_complete(&self, round: &ConsensusRound) {
        eprintln!("  {}", round.vote_summary());
    }
}
