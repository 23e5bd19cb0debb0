use std::fmt;

use serde::Serialize;
use url::Url;

use crate::errors::{AppError, AppResult};

/// Minimum number of characters a problem statement needs before generation.
pub const MIN_PROBLEM_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LeetCode,
    HackerRank,
}

impl Platform {
    /// Host substrings that identify each platform.
    const HOST_MARKERS: [(&'static str, Platform); 2] = [
        ("leetcode.com", Platform::LeetCode),
        ("hackerrank.com", Platform::HackerRank),
    ];

    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();
        Self::HOST_MARKERS
            .iter()
            .find(|(marker, _)| host.contains(marker))
            .map(|(_, platform)| *platform)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::HackerRank => "HackerRank",
        }
    }

    pub fn referer(&self) -> &'static str {
        match self {
            Platform::LeetCode => "https://leetcode.com/",
            Platform::HackerRank => "https://www.hackerrank.com/",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSource {
    Url(Url),
    Pasted,
}

/// Normalized problem statement ready for the generation stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemText {
    body: String,
    source: ProblemSource,
    platform: Option<Platform>,
}

impl ProblemText {
    pub fn new(
        body: impl Into<String>,
        source: ProblemSource,
        platform: Option<Platform>,
    ) -> AppResult<Self> {
        let body = body.into();
        let len = body.chars().count();
        if len < MIN_PROBLEM_CHARS {
            return Err(AppError::InputTooShort(len));
        }

        Ok(Self {
            body,
            source,
            platform,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn source(&self) -> &ProblemSource {
        &self.source
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Leading excerpt of the statement, suffixed with `...` when cut short.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.body.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
