use crate::core::document::SourceType;
use crate::error::{Error, Result};
use reqwest::Url;
use std::fmt;
use std::net::IpAddr;

/// One form submission. Lives for a single pipeline run.
#[derive(Clone)]
pub struct SummaryRequest {
    pub url: String,
    pub source_type: SourceType,
    pub credential: String,
}

impl SummaryRequest {
    pub fn new(
        url: impl Into<String>,
        source_type: SourceType,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            source_type,
            credential: credential.into(),
        }
    }

    /// Checks the credential first, then the URL. Returns the parsed URL.
    pub fn validate(&self) -> Result<Url> {
        if self.credential.trim().is_empty() {
            return Err(Error::validation("missing credential"));
        }
        parse_url(&self.url)
    }
}

// Keep the credential out of logs.
impl fmt::Debug for SummaryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryRequest")
            .field("url", &self.url)
            .field("source_type", &self.source_type)
            .field("credential", &"<redacted>")
            .finish()
    }
}

pub fn parse_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| Error::validation("please enter a valid URL"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::validation("URL must use http or https"));
    }

    let host_ok = match url.host_str() {
        Some(host) => is_ip_literal(host) || is_dotted_domain(host),
        None => false,
    };

    if !host_ok {
        return Err(Error::validation("please enter a valid URL"));
    }

    Ok(url)
}

fn is_ip_literal(host: &str) -> bool {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok()
}

fn is_dotted_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
