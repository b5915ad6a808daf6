use crate::core::document::Document;
use crate::error::{Error, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("clipsum/", env!("CARGO_PKG_VERSION"));

// Subtrees that never hold readable page text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

#[derive(Clone)]
pub struct WebsiteService {
    client: Client,
}

impl WebsiteService {
    pub fn new() -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::custom(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    pub async fn load(&self, url: &str) -> Result<Vec<Document>> {
        info!(%url, "fetching page");
        let response = self.client.get(url).send().await?;

        check_status(url, response.status())?;

        let html = response.text().await?;
        debug!(bytes = html.len(), "page downloaded");

        Ok(vec![Document::new(extract_text(&html)?, url)])
    }
}

fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::load(format!("{url} responded with HTTP {status}")))
    }
}

/// Readable text of an HTML page: the title (if any) followed by the body text,
/// whitespace collapsed.
pub fn extract_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body_selector = parse_selector("body")?;
    let title_selector = parse_selector("title")?;

    let mut parts = Vec::new();

    if let Some(title) = document.select(&title_selector).next() {
        let title = collapse_whitespace(&title.text().collect::<Vec<_>>().join(" "));
        if !title.is_empty() {
            parts.push(title);
        }
    }

    let root = document
        .select(&body_selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut body = String::with_capacity(html.len() / 2);
    collect_text(root, &mut body);
    let body = collapse_whitespace(&body);
    if !body.is_empty() {
        parts.push(body);
    }

    Ok(parts.join("\n\n"))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child)
            && !SKIPPED_ELEMENTS.contains(&child_element.value().name())
        {
            collect_text(child_element, out);
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::custom(format!("bad selector {selector}: {e:?}")))
}
