use crate::core::document::Document;
use crate::core::model::ModelClient;
use crate::error::Result;
use std::fmt;
use tracing::{debug, info};

/// Maximum words packed into one map-phase chunk.
pub const CHUNK_WORDS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Everything in a single call.
    Stuff,
    /// Summarize each chunk, then summarize the summaries.
    MapReduce,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Stuff => write!(f, "STUFF"),
            Strategy::MapReduce => write!(f, "MAP-REDUCE"),
        }
    }
}

pub fn summarize_prompt(text: &str) -> String {
    format!("Write a concise summary of the following:\n\n\"{text}\"\n\nCONCISE SUMMARY:")
}

pub async fn run<C>(client: &C, strategy: Strategy, documents: &[Document]) -> Result<String>
where
    C: ModelClient + ?Sized,
{
    match strategy {
        Strategy::Stuff => stuff(client, documents).await,
        Strategy::MapReduce => map_reduce(client, documents).await,
    }
}

async fn stuff<C>(client: &C, documents: &[Document]) -> Result<String>
where
    C: ModelClient + ?Sized,
{
    let combined = documents
        .iter()
        .map(|doc| doc.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    client.complete(&summarize_prompt(&combined)).await
}

async fn map_reduce<C>(client: &C, documents: &[Document]) -> Result<String>
where
    C: ModelClient + ?Sized,
{
    let chunks = split_into_chunks(documents, CHUNK_WORDS);
    info!(chunks = chunks.len(), "map phase");

    let mut summaries = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        debug!(chunk = index, "summarizing chunk");
        let summary = client.complete(&summarize_prompt(chunk)).await?;
        summaries.push(summary);
    }

    info!("reduce phase");
    client.complete(&summarize_prompt(&summaries.join("\n\n"))).await
}

/// Greedily packs words from the documents, in order, into chunks of at most
/// `max_words` words. Large documents are split at word boundaries; small
/// neighbours share a chunk.
pub fn split_into_chunks(documents: &[Document], max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::with_capacity(max_words);

    for word in documents.iter().flat_map(|doc| doc.text.split_whitespace()) {
        current.push(word);
        if current.len() == max_words {
            chunks.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}
