use crate::core::chain::Strategy;
use crate::core::document::{SourceType, total_words};
use crate::core::loader::{ContentLoader, ensure_content};
use crate::core::model::ModelProvider;
use crate::core::outcome::SummarizationOutcome;
use crate::core::request::SummaryRequest;
use crate::core::selector;
use tracing::{info, warn};

/// Progress notifications emitted while a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Loading(SourceType),
    Loaded { documents: usize, words: usize },
    Summarizing { strategy: Strategy, words: usize },
}

/// Validate, load, summarize. One request per call; nothing is kept between runs.
#[derive(Clone)]
pub struct Pipeline<L, P> {
    loader: L,
    provider: P,
}

impl<L, P> Pipeline<L, P>
where
    L: ContentLoader,
    P: ModelProvider,
{
    pub fn new(loader: L, provider: P) -> Self {
        Self { loader, provider }
    }

    /// `report` is told about each stage as it starts.
    pub async fn run<F>(&self, request: &SummaryRequest, report: F) -> SummarizationOutcome
    where
        F: Fn(Stage) + Send + Sync,
    {
        let url = match request.validate() {
            Ok(url) => url,
            Err(e) => {
                warn!(?request, error = %e, "request rejected");
                return e.into();
            }
        };

        info!(url = %url, source_type = %request.source_type, "processing request");
        report(Stage::Loading(request.source_type));

        let documents = match self
            .loader
            .load(url.as_str(), request.source_type)
            .await
            .and_then(ensure_content)
        {
            Ok(documents) => documents,
            Err(e) => {
                warn!(error = %e, "load failed");
                return e.into();
            }
        };

        let words = total_words(&documents);
        report(Stage::Loaded {
            documents: documents.len(),
            words,
        });
        report(Stage::Summarizing {
            strategy: selector::select_strategy(words),
            words,
        });

        let client = self.provider.connect(request.credential.trim());
        selector::summarize(&documents, &client).await
    }
}
