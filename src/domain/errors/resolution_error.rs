//! Mirror resolution error types.

use thiserror::Error;

use crate::domain::entities::{ProbeOutcome, ProbeResult};

/// Resolution error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ResolutionError {
    #[error("no mirror could serve the identifier ({} attempted)", attempts.len())]
    AllMirrorsExhausted { attempts: Vec<ProbeResult> },

    #[error("no mirrors configured")]
    NoMirrorsConfigured,
}

impl ResolutionError {
    /// Creates an exhaustion error carrying per-endpoint diagnostics.
    #[must_use]
    pub fn exhausted(attempts: Vec<ProbeResult>) -> Self {
        Self::AllMirrorsExhausted { attempts }
    }

    /// Returns the per-endpoint outcomes, if this is an exhaustion error.
    #[must_use]
    pub fn attempts(&self) -> &[ProbeResult] {
        match self {
            Self::AllMirrorsExhausted { attempts } => attempts,
            Self::NoMirrorsConfigured => &[],
        }
    }

    /// Returns how many of the attempts timed out rather than erroring.
    #[must_use]
    pub fn timed_out_count(&self) -> usize {
        self.attempts()
            .iter()
            .filter(|a| a.outcome == ProbeOutcome::TimedOut)
            .count()
    }
}
