use crate::core::chain::{self, Strategy};
use crate::core::document::{Document, total_words};
use crate::core::model::ModelClient;
use crate::core::outcome::SummarizationOutcome;
use tracing::{info, warn};

/// Inputs below this many words are summarized in one call.
pub const WORD_THRESHOLD: usize = 1500;

pub fn select_strategy(total_words: usize) -> Strategy {
    if total_words < WORD_THRESHOLD {
        Strategy::Stuff
    } else {
        Strategy::MapReduce
    }
}

/// Picks a strategy from the measured input size and runs it.
/// Model errors are returned verbatim as a failed outcome; nothing is retried.
pub async fn summarize<C>(documents: &[Document], client: &C) -> SummarizationOutcome
where
    C: ModelClient + ?Sized,
{
    let words = total_words(documents);
    let strategy = select_strategy(words);
    info!(total_words = words, %strategy, "Using {strategy} method ({words} words)");

    match chain::run(client, strategy, documents).await {
        Ok(summary) => SummarizationOutcome::success(summary, strategy, words),
        Err(e) => {
            warn!(%strategy, error = %e, "summarization failed");
            e.into()
        }
    }
}
