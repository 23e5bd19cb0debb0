use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, REFERER, USER_AGENT},
    redirect, Client, StatusCode,
};
use scraper::Html;
use url::Url;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Platform, ProblemSource, ProblemText},
        dto::request::InputType,
    },
    services::{extraction_strategies, text_normalizer::normalize},
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 10;

/// Resolves a problem URL or pasted statement into normalized [`ProblemText`].
pub struct ProblemIngestor {
    client: Client,
}

impl ProblemIngestor {
    pub fn new(fetch_timeout: Duration) -> AppResult<Self> {
        Self::with_resolved_hosts(fetch_timeout, &[])
    }

    /// Pins each host to a fixed address instead of resolving it through DNS.
    /// The port still comes from the URL.
    pub fn with_resolved_hosts(
        fetch_timeout: Duration,
        hosts: &[(&str, SocketAddr)],
    ) -> AppResult<Self> {
        let builder = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(fetch_timeout);

        let client = hosts
            .iter()
            .fold(builder, |builder, (host, addr)| builder.resolve(host, *addr))
            .build()
            .map_err(|e| AppError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn ingest(&self, input_type: InputType, content: &str) -> AppResult<ProblemText> {
        match input_type {
            InputType::Text => {
                log::info!("Using pasted text: {} characters", content.chars().count());
                ProblemText::new(normalize(content), ProblemSource::Pasted, None)
            }
            InputType::Url => self.ingest_url(content).await,
        }
    }

    async fn ingest_url(&self, raw_url: &str) -> AppResult<ProblemText> {
        let url = Url::parse(raw_url.trim())
            .map_err(|e| AppError::UnsupportedPlatform(format!("invalid URL '{}': {}", raw_url.trim(), e)))?;
        let platform = Platform::from_url(&url).ok_or_else(|| {
            AppError::UnsupportedPlatform(url.host_str().unwrap_or("unknown host").to_string())
        })?;

        log::info!("Parsing {} URL: {}", platform, url);
        let html = self.fetch_html(&url, platform).await?;
        let body = extract_statement(platform, &html)?;
        log::info!("Successfully parsed URL, got {} characters", body.chars().count());

        ProblemText::new(body, ProblemSource::Url(url), Some(platform))
    }

    /// Fetches the page body, mapping 403 to [`AppError::Blocked`].
    pub async fn fetch_html(&self, url: &Url, platform: Platform) -> AppResult<String> {
        let response = self
            .client
            .get(url.clone())
            .headers(browser_headers(platform))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            log::warn!("{} returned 403 for {}", platform, url);
            return Err(AppError::Blocked(platform.name().to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "HTTP error accessing {} ({})",
                platform, status
            )));
        }

        Ok(response.text().await?)
    }
}

/// Runs the platform's extraction chain over `html` and normalizes the winner.
pub fn extract_statement(platform: Platform, html: &str) -> AppResult<String> {
    let doc = Html::parse_document(html);
    extraction_strategies::extract_problem(platform, &doc)
        .map(|candidate| normalize(&candidate))
        .ok_or_else(|| AppError::Extraction(format!("{} URL", platform)))
}

fn browser_headers(platform: Platform) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static(platform.referer()));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers
}
