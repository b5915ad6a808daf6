use std::fmt;

/// A unit of retrieved text. One URL may produce several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub source: String,
}

impl Document {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn total_words(documents: &[Document]) -> usize {
    documents.iter().map(Document::word_count).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceType {
    #[default]
    YouTube,
    Website,
}

impl SourceType {
    pub const ALL: [SourceType; 2] = [SourceType::YouTube, SourceType::Website];

    pub fn label(self) -> &'static str {
        match self {
            SourceType::YouTube => "YouTube URL",
            SourceType::Website => "Website URL",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SourceType::YouTube => SourceType::Website,
            SourceType::Website => SourceType::YouTube,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::YouTube => write!(f, "YouTube"),
            SourceType::Website => write!(f, "Website"),
        }
    }
}
