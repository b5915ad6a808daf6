pub mod chain;
pub mod document;
pub mod loader;
pub mod model;
pub mod outcome;
pub mod pipeline;
pub mod request;
pub mod selector;
pub mod transcript;
pub mod website;

#[cfg(test)]
pub mod testing;

pub use document::SourceType;
pub use loader::{ContentLoader, SourceLoader};
pub use model::{HostedModelProvider, ModelProvider};
pub use outcome::SummarizationOutcome;
pub use pipeline::{Pipeline, Stage};
pub use request::SummaryRequest;
