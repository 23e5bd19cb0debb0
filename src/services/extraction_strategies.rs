//! Ordered, platform-specific strategies for pulling a problem statement out
//! of an HTML page.
//!
//! Each strategy is a pure `fn(&Html) -> Option<String>`. The ingestor tries
//! them in order and keeps the first candidate long enough to be a statement,
//! so supporting a new platform only means adding its strategy list here.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::models::domain::Platform;

/// Candidates shorter than this are treated as a failed strategy.
pub const MIN_CANDIDATE_CHARS: usize = 20;

pub type ExtractionStrategy = fn(&Html) -> Option<String>;

const LEETCODE_STRATEGIES: &[ExtractionStrategy] =
    &[leetcode_description, og_description, page_title];

const HACKERRANK_STRATEGIES: &[ExtractionStrategy] =
    &[hackerrank_problem_statement, og_description, page_title];

pub fn strategies_for(platform: Platform) -> &'static [ExtractionStrategy] {
    match platform {
        Platform::LeetCode => LEETCODE_STRATEGIES,
        Platform::HackerRank => HACKERRANK_STRATEGIES,
    }
}

/// Runs the platform's strategies in order and returns the first acceptable candidate.
pub fn extract_problem(platform: Platform, doc: &Html) -> Option<String> {
    strategies_for(platform)
        .iter()
        .filter_map(|strategy| strategy(doc))
        .map(|candidate| candidate.trim().to_string())
        .find(|candidate| candidate.chars().count() >= MIN_CANDIDATE_CHARS)
}

static LEETCODE_CONTAINER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_1l1MA|elfjS|content__").expect("LEETCODE_CONTAINER_REGEX is a valid regex pattern")
});

static HACKERRANK_CONTAINER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"problem-statement|challenge-body-html")
        .expect("HACKERRANK_CONTAINER_REGEX is a valid regex pattern")
});

static DIV_WITH_CLASS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class]").expect("valid div selector"));

static OG_DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:description"]"#).expect("valid og:description selector")
});

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid title selector"));

pub fn leetcode_description(doc: &Html) -> Option<String> {
    container_text(doc, &LEETCODE_CONTAINER_REGEX)
}

pub fn hackerrank_problem_statement(doc: &Html) -> Option<String> {
    container_text(doc, &HACKERRANK_CONTAINER_REGEX)
}

pub fn og_description(doc: &Html) -> Option<String> {
    doc.select(&OG_DESCRIPTION)
        .find_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

pub fn page_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First `div` whose class attribute matches `pattern`, as visible text.
fn container_text(doc: &Html, pattern: &Regex) -> Option<String> {
    doc.select(&DIV_WITH_CLASS)
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| pattern.is_match(class))
        })
        .map(visible_text)
        .filter(|text| !text.is_empty())
}

/// Text fragments of an element, one per line, skipping script and style bodies.
fn visible_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"));
            if hidden {
                return None;
            }
            let fragment = text.trim();
            (!fragment.is_empty()).then_some(fragment)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
