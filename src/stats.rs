use crate::models::{ParseFailure, ParseOutcome};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters collected while parsing many item dumps
#[derive(Default)]
pub struct ParseStats {
    pub inputs: AtomicU64,
    pub valid: AtomicU64,
    pub empty_input: AtomicU64,
    pub name_not_found: AtomicU64,
    pub mods_collected: AtomicU64,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: &ParseOutcome) {
        self.inputs.fetch_add(1, Ordering::Relaxed);
        match outcome {
            ParseOutcome::Valid(item) => {
                self.valid.fetch_add(1, Ordering::Relaxed);
                self.mods_collected
                    .fetch_add(item.mods.len() as u64, Ordering::Relaxed);
            }
            ParseOutcome::Invalid { reason, .. } => match reason {
                ParseFailure::EmptyInput => {
                    self.empty_input.fetch_add(1, Ordering::Relaxed);
                }
                ParseFailure::NameNotFound => {
                    self.name_not_found.fetch_add(1, Ordering::Relaxed);
                }
            },
        }
    }

    pub fn inputs(&self) -> u64 {
        self.inputs.load(Ordering::Relaxed)
    }

    pub fn valid(&self) -> u64 {
        self.valid.load(Ordering::Relaxed)
    }

    pub fn empty_input(&self) -> u64 {
        self.empty_input.load(Ordering::Relaxed)
    }

    pub fn name_not_found(&self) -> u64 {
        self.name_not_found.load(Ordering::Relaxed)
    }

    pub fn invalid(&self) -> u64 {
        self.empty_input() + self.name_not_found()
    }

    pub fn mods(&self) -> u64 {
        self.mods_collected.load(Ordering::Relaxed)
    }
}
