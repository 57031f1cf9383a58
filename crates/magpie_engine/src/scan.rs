use std::collections::HashSet;
use std::time::Duration;

use magpie_logging::{magpie_debug, magpie_info, magpie_warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::demo::{deep_demo_media, quick_demo_media};
use crate::types::{DiscoveredMedia, ScanError, ScanMode};

const QUICK_SCAN_PROMPT: &str = "You are a media extraction expert. Analyze a webpage \
and extract all downloadable media files (videos, images, audio) from it. For each \
media file provide: the direct download URL, the type (video/image/audio), a \
descriptive title, the source domain, and an estimated file size if possible. Focus \
on video files primarily, but also include high-quality images and audio files. \
Return the results as a JSON array of media objects and nothing else.";

const LINK_ANALYSIS_PROMPT: &str = "You are a web scraping expert. Analyze a webpage \
and extract all internal links that might contain media, external links to media \
platforms, direct media links, and pagination links. Return a structured JSON object \
with arrays for each link type.";

const DEEP_SCAN_PROMPT: &str = "You are an advanced media detection AI. Perform deep \
media extraction: examine the page and the provided link analysis for embedded \
players, galleries, streaming URLs, CDN links, thumbnails, audio files and \
downloadable media packages. For each media item provide the direct URL, the type \
(video/image/audio), a descriptive title, a size or quality estimate, the source \
domain, and a thumbnail URL if available. Be thorough. Return a JSON array and \
nothing else.";

/// Connection parameters for the chat-completions service.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The scan boundary: given a page URL, report which media files exist there.
#[async_trait::async_trait]
pub trait ScanProvider: Send + Sync {
    async fn scan(&self, url: &str, mode: ScanMode) -> Result<Vec<DiscoveredMedia>, ScanError>;
}

/// Scan provider backed by an OpenAI-style chat-completions endpoint.
///
/// Output handling is fail-open: when the model's answer cannot be parsed as
/// a media list, a demo catalog for the page's host is fabricated instead.
/// Only transport-level problems (HTTP failures, timeouts, an undecodable
/// response envelope) surface as errors.
#[derive(Debug, Clone)]
pub struct ChatScanner {
    settings: ScanSettings,
}

impl ChatScanner {
    pub fn new(settings: ScanSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ScanError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ScanError::Upstream(err.to_string()))
    }

    /// One chat-completions round trip; returns the assistant's content.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, ScanError> {
        let client = self.build_client()?;
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        let mut builder = client.post(&self.settings.endpoint).json(&request);
        if let Some(key) = &self.settings.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Upstream(format!(
                "chat endpoint returned {status}"
            )));
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|err| ScanError::MalformedResponse(err.to_string()))?;

        Ok(envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    async fn quick_scan(&self, url: &Url) -> Result<Vec<DiscoveredMedia>, ScanError> {
        let content = self
            .complete(
                QUICK_SCAN_PROMPT,
                format!("Extract all downloadable media from this URL: {url}"),
                0.3,
                None,
            )
            .await?;

        let items = parse_media_payload(&content);
        if items.is_empty() {
            let host = host_of(url);
            magpie_warn!("quick scan of {url} yielded no parseable media, using demo data");
            return Ok(quick_demo_media(&host));
        }
        Ok(items)
    }

    async fn deep_scan(&self, url: &Url) -> Result<Vec<DiscoveredMedia>, ScanError> {
        // Pass 1: link analysis. Its output is context for the second pass;
        // unparseable output degrades to an empty link set.
        let links_content = self
            .complete(
                LINK_ANALYSIS_PROMPT,
                format!("Analyze this page and extract all relevant links: {url}"),
                0.2,
                None,
            )
            .await?;
        let links: serde_json::Value =
            serde_json::from_str(extract_json_fragment(&links_content))
                .unwrap_or(serde_json::Value::Null);
        magpie_debug!("deep scan link analysis for {url}: {links}");

        // Pass 2: deep extraction over the page plus the link analysis.
        let content = self
            .complete(
                DEEP_SCAN_PROMPT,
                format!(
                    "Perform deep media extraction for: {url}\n\nExtracted links: {links}\n\n\
                     Find ALL possible media files and return them as a JSON array."
                ),
                0.1,
                Some(4000),
            )
            .await?;

        let mut items = parse_media_payload(&content);
        if items.is_empty() {
            let host = host_of(url);
            magpie_warn!("deep scan of {url} yielded no parseable media, using demo data");
            items = deep_demo_media(&host);
        }
        Ok(dedupe_by_url(items))
    }
}

#[async_trait::async_trait]
impl ScanProvider for ChatScanner {
    async fn scan(&self, url: &str, mode: ScanMode) -> Result<Vec<DiscoveredMedia>, ScanError> {
        let parsed = Url::parse(url).map_err(|err| ScanError::InvalidUrl(err.to_string()))?;
        let result = match mode {
            ScanMode::Quick => self.quick_scan(&parsed).await,
            ScanMode::Deep => self.deep_scan(&parsed).await,
        };
        if let Ok(items) = &result {
            magpie_info!("scan of {url} ({mode:?}) produced {} items", items.len());
        }
        result
    }
}

fn host_of(url: &Url) -> String {
    url.host_str().unwrap_or("example.com").to_string()
}

fn map_reqwest_error(err: reqwest::Error) -> ScanError {
    if err.is_timeout() {
        return ScanError::Timeout;
    }
    ScanError::Upstream(err.to_string())
}

/// Decodes the assistant's content as a media list, tolerating markdown code
/// fences and surrounding prose. Anything undecodable yields an empty list,
/// which callers treat as "fall back to demo data".
fn parse_media_payload(content: &str) -> Vec<DiscoveredMedia> {
    let fragment = extract_json_fragment(content);
    let items: Vec<DiscoveredMedia> = serde_json::from_str(fragment).unwrap_or_default();
    items
        .into_iter()
        .filter(|media| !media.url.trim().is_empty())
        .collect()
}

/// Narrows content to the outermost JSON array or object, if one is present.
fn extract_json_fragment(content: &str) -> &str {
    let array = content
        .find('[')
        .zip(content.rfind(']'))
        .filter(|(start, end)| end > start);
    let object = content
        .find('{')
        .zip(content.rfind('}'))
        .filter(|(start, end)| end > start);

    // Prefer whichever opens first so `{"a": [..]}` is kept whole.
    match (array, object) {
        (Some((a, ae)), Some((o, _))) if a < o => &content[a..=ae],
        (_, Some((o, oe))) => &content[o..=oe],
        (Some((a, ae)), None) => &content[a..=ae],
        (None, None) => content,
    }
}

/// First occurrence per URL wins; order is otherwise preserved.
fn dedupe_by_url(items: Vec<DiscoveredMedia>) -> Vec<DiscoveredMedia> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|media| seen.insert(media.url.clone()))
        .collect()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}
