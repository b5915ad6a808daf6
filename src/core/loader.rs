use crate::core::document::{Document, SourceType, total_words};
use crate::core::transcript::TranscriptService;
use crate::core::website::WebsiteService;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, info};

/// Retrieves the text behind a URL.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(&self, url: &str, source_type: SourceType) -> Result<Vec<Document>>;
}

/// Dispatches on the source type to the transcript or website service.
#[derive(Clone)]
pub struct SourceLoader {
    transcripts: TranscriptService,
    websites: WebsiteService,
}

impl SourceLoader {
    pub fn new(languages: Vec<String>) -> Result<Self> {
        Ok(Self {
            transcripts: TranscriptService::new(languages)?,
            websites: WebsiteService::new()?,
        })
    }
}

#[async_trait]
impl ContentLoader for SourceLoader {
    async fn load(&self, url: &str, source_type: SourceType) -> Result<Vec<Document>> {
        match source_type {
            SourceType::YouTube => self.transcripts.load(url).await,
            SourceType::Website => self.websites.load(url).await,
        }
    }
}

/// Rejects a load that produced no words at all.
pub fn ensure_content(documents: Vec<Document>) -> Result<Vec<Document>> {
    let words = total_words(&documents);
    if words == 0 {
        return Err(Error::load("no extractable content"));
    }

    for doc in &documents {
        debug!(source = %doc.source, words = doc.word_count(), "document");
    }
    info!(documents = documents.len(), words, "content loaded");
    Ok(documents)
}
