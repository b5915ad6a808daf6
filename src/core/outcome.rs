use crate::core::chain::Strategy;
use crate::error::{Error, ErrorKind};

/// Result of one pipeline run. Exactly one of summary text or error message
/// exists, enforced by the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizationOutcome {
    Success {
        summary: String,
        strategy: Strategy,
        total_words: usize,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl SummarizationOutcome {
    pub fn success(summary: String, strategy: Strategy, total_words: usize) -> Self {
        Self::Success {
            summary,
            strategy,
            total_words,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn summary_text(&self) -> Option<&str> {
        match self {
            Self::Success { summary, .. } => Some(summary),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}

impl From<Error> for SummarizationOutcome {
    fn from(err: Error) -> Self {
        Self::Failure {
            kind: err.kind(),
            message: err.message(),
        }
    }
}
