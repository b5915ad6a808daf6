use crate::core::document::Document;
use crate::error::{Error, Result};
use reqwest::Url;
use tracing::{debug, info};
use yt_transcript_rs::{FetchedTranscript, api::YouTubeTranscriptApi};

#[derive(Clone)]
pub struct TranscriptService {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl TranscriptService {
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| Error::custom(format!("Failed to initialise transcript client: {e}")))?;
        Ok(Self { api, languages })
    }

    pub async fn load(&self, url: &str) -> Result<Vec<Document>> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| Error::load("invalid URL for the given source type: no YouTube video id"))?;

        info!(%video_id, "fetching transcript");
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        let transcript = self
            .api
            .fetch_transcript(&video_id, &languages, false)
            .await
            .map_err(|e| Error::load(format!("Failed to fetch transcript: {e}")))?;

        let text = transcript_text(&transcript);
        debug!(%video_id, snippets = transcript.snippets.len(), "transcript fetched");

        Ok(vec![Document::new(text, url)])
    }
}

fn transcript_text(transcript: &FetchedTranscript) -> String {
    join_snippets(transcript.snippets.iter().map(|snippet| snippet.text.as_str()))
}

/// Unescapes and joins snippet texts with single spaces.
fn join_snippets<'a>(snippets: impl Iterator<Item = &'a str>) -> String {
    snippets
        .map(|text| html_escape::decode_html_entities(text.trim()).into_owned())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtu.be",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

/// Video id of a YouTube URL. URLs on any other host have none.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    if !YOUTUBE_HOSTS.contains(&host) {
        return None;
    }

    let raw_id = if host == "youtu.be" {
        parsed.path_segments()?.next()?.to_string()
    } else if let Some((_, v)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        v.into_owned()
    } else {
        let mut segments = parsed.path_segments()?;
        match segments.next()? {
            "shorts" | "embed" | "live" => segments.next()?.to_string(),
            _ => return None,
        }
    };

    sanitize_video_id(&raw_id).ok()
}

const MAX_VIDEO_ID_LEN: usize = 128;

/// Ensure a video identifier is safe for downstream use.
/// Only ASCII alphanumeric characters plus `_` and `-` are allowed.
pub fn sanitize_video_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::load("Video ID cannot be empty"));
    }

    if trimmed.len() > MAX_VIDEO_ID_LEN {
        return Err(Error::load("Video ID is unexpectedly long"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(Error::load(
            "Video ID contains unsupported characters; expected only letters, numbers, '-' or '_'",
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_expected_characters() {
        let id = sanitize_video_id("abcDEF123-_x").expect("valid ID");
        assert_eq!(id, "abcDEF123-_x");
    }

    #[test]
    fn rejects_empty() {
        assert!(sanitize_video_id("   ").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(sanitize_video_id("abc/../../etc").is_err());
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(MAX_VIDEO_ID_LEN + 1);
        assert!(sanitize_video_id(&long).is_err());
    }

    #[test]
    fn extracts_ids_from_common_url_shapes() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
        ];
        for url in cases {
            assert_eq!(extract_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn website_urls_have_no_video_id() {
        assert_eq!(extract_video_id("https://example.com/articles/rust"), None);
        assert_eq!(extract_video_id("https://example.com/?nav=1"), None);
    }

    #[test]
    fn other_hosts_have_no_video_id() {
        let cases = [
            "https://example.com/embed/abcdefghijk",
            "https://evil.example/watch?v=dQw4w9WgXcQ",
            "https://example.com/live/x",
            "https://notyoutu.be/dQw4w9WgXcQ",
        ];
        for url in cases {
            assert_eq!(extract_video_id(url), None, "{url}");
        }
    }

    #[test]
    fn nocookie_and_mobile_hosts_are_accepted() {
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[tokio::test]
    async fn load_rejects_other_hosts_before_fetching() {
        let service = TranscriptService::new(vec!["en".into()]).unwrap();
        let err = service
            .load("https://example.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Load);
        assert!(err.message().contains("invalid URL for the given source type"));
    }

    #[test]
    fn snippets_are_unescaped_and_joined() {
        let text = join_snippets(["  it&#39;s  ", "", "rock &amp; roll"].into_iter());
        assert_eq!(text, "it's rock & roll");
    }
}
